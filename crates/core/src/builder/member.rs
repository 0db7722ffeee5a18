use super::Poison;
use crate::annotation::AnnotationSet;
use crate::descriptor;
use crate::error::Result;
use crate::model::method::CONSTRUCTOR_NAME;
use crate::model::{FieldInfo, MethodInfo};
use crate::visitor::{AnnotationVisitor, FieldDecl, FieldVisitor, MethodDecl, MethodVisitor};
use std::collections::BTreeMap;

/// Accumulates one field declaration and its annotations.
#[derive(Debug)]
pub struct FieldInfoBuilder {
    owner: String,
    decl: FieldDecl,
    annotations: AnnotationSet,
    poison: Poison,
}

impl FieldInfoBuilder {
    pub fn new(owner: impl Into<String>, decl: FieldDecl) -> Self {
        Self {
            owner: owner.into(),
            decl,
            annotations: AnnotationSet::default(),
            poison: Poison::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.decl.name
    }

    /// Fails with [`crate::BuildError::Aborted`] when one of the field's
    /// annotation events was rejected.
    pub fn build(self) -> Result<FieldInfo> {
        self.poison.check()?;
        Ok(FieldInfo {
            owner: self.owner,
            name: self.decl.name,
            descriptor: self.decl.descriptor,
            signature: self.decl.signature,
            access: self.decl.access,
            constant_value: self.decl.constant_value,
            annotations: self.annotations.freeze(),
        })
    }
}

impl FieldVisitor for FieldInfoBuilder {
    fn visit_annotation(
        &mut self,
        descriptor: &str,
        visible: bool,
    ) -> Result<&mut dyn AnnotationVisitor> {
        self.poison.check()?;
        let type_name =
            descriptor::field_type_name(descriptor).map_err(|e| self.poison.record(e))?;
        Ok(self.annotations.begin(type_name, visible))
    }
}

/// Accumulates one method (or constructor) declaration, its annotations and
/// its parameter annotations.
#[derive(Debug)]
pub struct MethodInfoBuilder {
    owner: String,
    decl: MethodDecl,
    annotations: AnnotationSet,
    parameter_annotations: BTreeMap<usize, AnnotationSet>,
    poison: Poison,
}

impl MethodInfoBuilder {
    pub fn new(owner: impl Into<String>, decl: MethodDecl) -> Self {
        Self {
            owner: owner.into(),
            decl,
            annotations: AnnotationSet::default(),
            parameter_annotations: BTreeMap::new(),
            poison: Poison::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.decl.name
    }

    pub fn is_constructor(&self) -> bool {
        self.decl.name == CONSTRUCTOR_NAME
    }

    pub fn build(self) -> Result<MethodInfo> {
        self.poison.check()?;
        Ok(MethodInfo {
            owner: self.owner,
            name: self.decl.name,
            descriptor: self.decl.descriptor,
            signature: self.decl.signature,
            access: self.decl.access,
            exceptions: self.decl.exceptions,
            annotations: self.annotations.freeze(),
            parameter_annotations: self
                .parameter_annotations
                .into_iter()
                .map(|(index, set)| (index, set.freeze()))
                .collect(),
        })
    }
}

impl MethodVisitor for MethodInfoBuilder {
    fn visit_annotation(
        &mut self,
        descriptor: &str,
        visible: bool,
    ) -> Result<&mut dyn AnnotationVisitor> {
        self.poison.check()?;
        let type_name =
            descriptor::field_type_name(descriptor).map_err(|e| self.poison.record(e))?;
        Ok(self.annotations.begin(type_name, visible))
    }

    fn visit_parameter_annotation(
        &mut self,
        parameter: usize,
        descriptor: &str,
        visible: bool,
    ) -> Result<&mut dyn AnnotationVisitor> {
        self.poison.check()?;
        let type_name =
            descriptor::field_type_name(descriptor).map_err(|e| self.poison.record(e))?;
        Ok(self
            .parameter_annotations
            .entry(parameter)
            .or_default()
            .begin(type_name, visible))
    }
}
