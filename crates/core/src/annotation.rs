use crate::visitor::AnnotationVisitor;
use classmeta_api::{AnnotationHandle, AnnotationValue};
use indexmap::IndexMap;

/// Finished annotations of one element, keyed by annotation type name.
pub type AnnotationMap = IndexMap<String, AnnotationHandle>;

/// Collects the element values of one annotation while its events arrive.
#[derive(Debug)]
pub struct AnnotationCapture {
    type_name: String,
    values: IndexMap<String, AnnotationValue>,
}

impl AnnotationCapture {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            values: IndexMap::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Closes the capture for writing.
    pub fn freeze(self) -> AnnotationHandle {
        AnnotationHandle::new(self.type_name, self.values)
    }
}

impl AnnotationVisitor for AnnotationCapture {
    fn set_attribute(&mut self, name: &str, value: AnnotationValue) {
        tracing::trace!("@{}.{} = {:?}", self.type_name, name, value);
        self.values.insert(name.to_string(), value);
    }
}

/// Annotation captures of one class, field, method or parameter.
#[derive(Debug, Default)]
pub(crate) struct AnnotationSet {
    captures: IndexMap<String, AnnotationCapture>,
}

impl AnnotationSet {
    /// Opens a capture for `type_name`, the Java name decoded from the
    /// annotation descriptor. A second annotation of the same type replaces
    /// the first.
    pub fn begin(&mut self, type_name: String, visible: bool) -> &mut AnnotationCapture {
        tracing::trace!("annotation @{} (visible: {})", type_name, visible);

        let capture = AnnotationCapture::new(type_name.clone());
        let (index, previous) = self.captures.insert_full(type_name, capture);
        if let Some(previous) = previous {
            tracing::warn!("@{} repeated, keeping the later one", previous.type_name());
        }
        &mut self.captures[index]
    }

    pub fn freeze(self) -> AnnotationMap {
        self.captures
            .into_iter()
            .map(|(name, capture)| (name, capture.freeze()))
            .collect()
    }
}
