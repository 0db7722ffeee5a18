use crate::annotation::AnnotationMap;
use classmeta_api::{AccessFlags, Annotated, AnnotationHandle, AnnotationKind, AnnotationSchema, AnnotationView};
use std::fmt;
use std::sync::Arc;

use super::{FieldInfo, MethodInfo};

/// Metadata of one compiled class, built from its event stream.
///
/// Cross-class references (super class, interfaces, member types) are kept
/// as names; resolve them through [`crate::repo::ClassInfoRepo`].
#[derive(Debug)]
pub struct ClassInfo {
    pub(crate) id_name: String,
    pub(crate) qualified_name: String,
    pub(crate) package_name: String,
    pub(crate) nested_name: String,
    pub(crate) access: AccessFlags,
    pub(crate) signature: Option<String>,
    pub(crate) super_name: Option<String>,
    pub(crate) interfaces: Vec<String>,
    pub(crate) fields: Vec<Arc<FieldInfo>>,
    pub(crate) methods: Vec<Arc<MethodInfo>>,
    pub(crate) constructors: Vec<Arc<MethodInfo>>,
    pub(crate) annotations: AnnotationMap,
}

impl ClassInfo {
    /// Internal name, `com/acme/Bench`.
    pub fn id_name(&self) -> &str {
        &self.id_name
    }

    /// `com.acme.Bench`
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// `com.acme`; empty for the unnamed package.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Name after the last package separator. Nested classes keep their
    /// binary form (`Outer$Inner`).
    pub fn nested_name(&self) -> &str {
        &self.nested_name
    }

    pub fn access(&self) -> AccessFlags {
        self.access
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    /// Internal name of the direct super class as recorded in the header.
    pub fn super_name(&self) -> Option<&str> {
        self.super_name.as_deref()
    }

    pub fn interface_names(&self) -> &[String] {
        &self.interfaces
    }

    pub fn declared_fields(&self) -> &[Arc<FieldInfo>] {
        &self.fields
    }

    /// All declared methods in event order, constructors included.
    pub fn declared_methods(&self) -> &[Arc<MethodInfo>] {
        &self.methods
    }

    pub fn constructors(&self) -> &[Arc<MethodInfo>] {
        &self.constructors
    }

    /// Always empty: super class metadata is not resolved.
    pub fn superclasses(&self) -> Vec<Arc<ClassInfo>> {
        Vec::new()
    }

    /// Same as [`Annotated::get_annotation`]; inherited annotations are not
    /// searched.
    pub fn get_annotation_recursive<K: AnnotationKind>(&self) -> Option<AnnotationView<'static>> {
        self.get_annotation::<K>()
    }

    pub fn get_annotation_recursive_by<'s>(
        &self,
        schema: &'s AnnotationSchema,
    ) -> Option<AnnotationView<'s>> {
        self.get_annotation_by(schema)
    }

    pub fn is_public(&self) -> bool {
        self.access.contains(AccessFlags::PUBLIC)
    }

    pub fn is_abstract(&self) -> bool {
        self.access.contains(AccessFlags::ABSTRACT)
    }

    pub fn is_strict_fp(&self) -> bool {
        self.access.contains(AccessFlags::STRICT)
    }

    pub fn is_final(&self) -> bool {
        self.access.contains(AccessFlags::FINAL)
    }

    pub fn is_interface(&self) -> bool {
        self.access.contains(AccessFlags::INTERFACE)
    }

    pub fn is_annotation(&self) -> bool {
        self.access.contains(AccessFlags::ANNOTATION)
    }

    pub fn is_enum(&self) -> bool {
        self.access.contains(AccessFlags::ENUM)
    }
}

impl Annotated for ClassInfo {
    fn annotation_handle(&self, type_name: &str) -> Option<&AnnotationHandle> {
        self.annotations.get(type_name)
    }

    fn annotation_names(&self) -> Vec<&str> {
        self.annotations.keys().map(String::as_str).collect()
    }
}

impl fmt::Display for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name)
    }
}
