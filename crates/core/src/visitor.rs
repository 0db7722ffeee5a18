//! The event surface a class-file decoder drives.
//!
//! Events for one class arrive strictly in order. Each `visit_*` call that
//! opens a nested scope hands back a sink borrowed from its parent, so a
//! member's sub-events are necessarily delivered before the next
//! declaration.

use crate::error::Result;
use crate::model::ConstantValue;
use classmeta_api::{AccessFlags, AnnotationValue};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassHeader {
    pub access: AccessFlags,
    /// Internal name, e.g. `com/acme/Bench`.
    pub name: String,
    pub signature: Option<String>,
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
}

impl ClassHeader {
    pub fn new(access: AccessFlags, name: impl Into<String>) -> Self {
        Self {
            access,
            name: name.into(),
            signature: None,
            super_name: None,
            interfaces: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub access: AccessFlags,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub constant_value: Option<ConstantValue>,
}

impl FieldDecl {
    pub fn new(access: AccessFlags, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            access,
            name: name.into(),
            descriptor: descriptor.into(),
            signature: None,
            constant_value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub access: AccessFlags,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    /// Internal names of the declared exceptions.
    pub exceptions: Vec<String>,
}

impl MethodDecl {
    pub fn new(access: AccessFlags, name: impl Into<String>, descriptor: impl Into<String>) -> Self {
        Self {
            access,
            name: name.into(),
            descriptor: descriptor.into(),
            signature: None,
            exceptions: Vec::new(),
        }
    }
}

pub trait AnnotationVisitor {
    /// Records one element value. A repeated name replaces the earlier value.
    fn set_attribute(&mut self, name: &str, value: AnnotationValue);
}

pub trait FieldVisitor {
    fn visit_annotation(&mut self, descriptor: &str, visible: bool)
    -> Result<&mut dyn AnnotationVisitor>;
}

pub trait MethodVisitor {
    fn visit_annotation(&mut self, descriptor: &str, visible: bool)
    -> Result<&mut dyn AnnotationVisitor>;

    fn visit_parameter_annotation(
        &mut self,
        parameter: usize,
        descriptor: &str,
        visible: bool,
    ) -> Result<&mut dyn AnnotationVisitor>;
}

pub trait ClassVisitor {
    fn visit(&mut self, header: ClassHeader) -> Result<()>;

    fn visit_annotation(&mut self, descriptor: &str, visible: bool)
    -> Result<&mut dyn AnnotationVisitor>;

    fn visit_field(&mut self, decl: FieldDecl) -> Result<&mut dyn FieldVisitor>;

    fn visit_method(&mut self, decl: MethodDecl) -> Result<&mut dyn MethodVisitor>;
}
