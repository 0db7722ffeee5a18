use crate::annotation::AnnotationMap;
use crate::descriptor;
use crate::error::Result;
use crate::repo::ClassInfoRepo;
use classmeta_api::{AccessFlags, Annotated, AnnotationHandle};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::ClassInfo;

/// Value of a field's `ConstantValue` attribute.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ConstantValue {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

#[derive(Debug)]
pub struct FieldInfo {
    pub(crate) owner: String,
    pub(crate) name: String,
    pub(crate) descriptor: String,
    pub(crate) signature: Option<String>,
    pub(crate) access: AccessFlags,
    pub(crate) constant_value: Option<ConstantValue>,
    pub(crate) annotations: AnnotationMap,
}

impl FieldInfo {
    pub fn name(&self) -> &str {
        &self.name
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

    pub fn constant_value(&self) -> Option<&ConstantValue> {
        self.constant_value.as_ref()
    }

    /// Java type name decoded from the descriptor, e.g. `org.openjdk.jmh.infra.Blackhole`.
    pub fn type_name(&self) -> Result<String> {
        descriptor::field_type_name(&self.descriptor)
    }

    /// Internal name of the declaring class.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn declaring_class(&self, repo: &ClassInfoRepo) -> Option<Arc<ClassInfo>> {
        repo.resolve(&self.owner)
    }

    pub fn is_public(&self) -> bool {
        self.access.contains(AccessFlags::PUBLIC)
    }

    pub fn is_static(&self) -> bool {
        self.access.contains(AccessFlags::STATIC)
    }

    pub fn is_final(&self) -> bool {
        self.access.contains(AccessFlags::FINAL)
    }

    pub fn is_volatile(&self) -> bool {
        self.access.contains(AccessFlags::VOLATILE)
    }

    pub fn is_synthetic(&self) -> bool {
        self.access.contains(AccessFlags::SYNTHETIC)
    }
}

impl Annotated for FieldInfo {
    fn annotation_handle(&self, type_name: &str) -> Option<&AnnotationHandle> {
        self.annotations.get(type_name)
    }

    fn annotation_names(&self) -> Vec<&str> {
        self.annotations.keys().map(String::as_str).collect()
    }
}
