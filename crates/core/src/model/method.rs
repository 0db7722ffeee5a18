use crate::annotation::AnnotationMap;
use crate::descriptor;
use crate::error::Result;
use crate::repo::ClassInfoRepo;
use classmeta_api::{AccessFlags, Annotated, AnnotationHandle, to_qualified_name};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::ClassInfo;

pub const CONSTRUCTOR_NAME: &str = "<init>";
pub const STATIC_INITIALIZER_NAME: &str = "<clinit>";

#[derive(Debug)]
pub struct MethodInfo {
    pub(crate) owner: String,
    pub(crate) name: String,
    pub(crate) descriptor: String,
    pub(crate) signature: Option<String>,
    pub(crate) access: AccessFlags,
    pub(crate) exceptions: Vec<String>,
    pub(crate) annotations: AnnotationMap,
    pub(crate) parameter_annotations: BTreeMap<usize, AnnotationMap>,
}

impl MethodInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `com.acme.Bench.measure`
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", to_qualified_name(&self.owner), self.name)
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn access(&self) -> AccessFlags {
        self.access
    }

    /// Internal names of the exceptions listed in the `throws` clause.
    pub fn exceptions(&self) -> &[String] {
        &self.exceptions
    }

    pub fn return_type(&self) -> Result<String> {
        descriptor::method_types(&self.descriptor).map(|(ret, _)| ret)
    }

    pub fn parameter_types(&self) -> Result<Vec<String>> {
        descriptor::method_types(&self.descriptor).map(|(_, params)| params)
    }

    /// Parameters in declaration order with their decoded types and annotations.
    pub fn parameters(&self) -> Result<Vec<ParameterInfo<'_>>> {
        Ok(self
            .parameter_types()?
            .into_iter()
            .enumerate()
            .map(|(index, type_name)| ParameterInfo {
                index,
                type_name,
                annotations: self.parameter_annotations.get(&index),
            })
            .collect())
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn declaring_class(&self, repo: &ClassInfoRepo) -> Option<Arc<ClassInfo>> {
        repo.resolve(&self.owner)
    }

    pub fn is_constructor(&self) -> bool {
        self.name == CONSTRUCTOR_NAME
    }

    pub fn is_static_initializer(&self) -> bool {
        self.name == STATIC_INITIALIZER_NAME
    }

    pub fn is_public(&self) -> bool {
        self.access.contains(AccessFlags::PUBLIC)
    }

    pub fn is_abstract(&self) -> bool {
        self.access.contains(AccessFlags::ABSTRACT)
    }

    pub fn is_static(&self) -> bool {
        self.access.contains(AccessFlags::STATIC)
    }

    pub fn is_final(&self) -> bool {
        self.access.contains(AccessFlags::FINAL)
    }

    pub fn is_synchronized(&self) -> bool {
        self.access.contains(AccessFlags::SYNCHRONIZED)
    }

    pub fn is_strict_fp(&self) -> bool {
        self.access.contains(AccessFlags::STRICT)
    }

    pub fn is_varargs(&self) -> bool {
        self.access.contains(AccessFlags::VARARGS)
    }

    pub fn is_synthetic(&self) -> bool {
        self.access.contains(AccessFlags::SYNTHETIC)
    }
}

impl Annotated for MethodInfo {
    fn annotation_handle(&self, type_name: &str) -> Option<&AnnotationHandle> {
        self.annotations.get(type_name)
    }

    fn annotation_names(&self) -> Vec<&str> {
        self.annotations.keys().map(String::as_str).collect()
    }
}

#[derive(Debug, Clone)]
pub struct ParameterInfo<'a> {
    pub index: usize,
    pub type_name: String,
    annotations: Option<&'a AnnotationMap>,
}

impl Annotated for ParameterInfo<'_> {
    fn annotation_handle(&self, type_name: &str) -> Option<&AnnotationHandle> {
        self.annotations.and_then(|map| map.get(type_name))
    }

    fn annotation_names(&self) -> Vec<&str> {
        self.annotations
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
