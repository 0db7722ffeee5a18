use crate::error::{AnnotationError, AnnotationResult};
use crate::models::{AnnotationValue, NestedAnnotation};
use indexmap::IndexMap;
use std::sync::Arc;

/// Describes the shape of an annotation type: its name and the elements it
/// declares, each with an optional default value.
///
/// A schema is supplied by whoever queries an annotation, so the captured
/// data never has to know which shapes will be asked for later.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationSchema {
    type_name: String,
    elements: IndexMap<String, Option<AnnotationValue>>,
}

impl AnnotationSchema {
    /// `type_name` is the binary name of the annotation type
    /// (`org.openjdk.jmh.annotations.Fork`, nested types keep their `$`).
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            elements: IndexMap::new(),
        }
    }

    /// Declares an element without a default.
    pub fn element(mut self, name: impl Into<String>) -> Self {
        self.elements.insert(name.into(), None);
        self
    }

    pub fn element_with_default(
        mut self,
        name: impl Into<String>,
        default: impl Into<AnnotationValue>,
    ) -> Self {
        self.elements.insert(name.into(), Some(default.into()));
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn declares(&self, name: &str) -> bool {
        self.elements.contains_key(name)
    }

    pub fn default_value(&self, name: &str) -> Option<&AnnotationValue> {
        self.elements.get(name).and_then(Option::as_ref)
    }

    pub fn element_names(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }
}

/// A Rust-side stand-in for an annotation type.
///
/// ```ignore
/// struct Fork;
/// impl AnnotationKind for Fork {
///     fn schema() -> &'static AnnotationSchema {
///         static SCHEMA: Lazy<AnnotationSchema> = Lazy::new(|| {
///             AnnotationSchema::new("org.openjdk.jmh.annotations.Fork")
///                 .element_with_default("value", -1)
///         });
///         &SCHEMA
///     }
/// }
/// ```
pub trait AnnotationKind {
    fn schema() -> &'static AnnotationSchema;
}

/// Captured attribute data of one annotation instance. Closed for writing;
/// cloning shares the underlying map.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationHandle {
    type_name: String,
    values: Arc<IndexMap<String, AnnotationValue>>,
}

impl AnnotationHandle {
    pub fn new(type_name: impl Into<String>, values: IndexMap<String, AnnotationValue>) -> Self {
        Self {
            type_name: type_name.into(),
            values: Arc::new(values),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn attributes(&self) -> &IndexMap<String, AnnotationValue> {
        &self.values
    }

    /// Materializes a view shaped like `schema` over the captured values.
    /// Nothing is read until an accessor on the view is called.
    pub fn produce_view<'s>(&self, schema: &'s AnnotationSchema) -> AnnotationView<'s> {
        AnnotationView {
            schema,
            values: Arc::clone(&self.values),
        }
    }
}

/// Typed accessor surface over an annotation's captured values.
///
/// Each accessor resolves the recorded value first, then the schema default.
/// Errors are scoped to the single accessor call.
#[derive(Debug, Clone)]
pub struct AnnotationView<'s> {
    schema: &'s AnnotationSchema,
    values: Arc<IndexMap<String, AnnotationValue>>,
}

impl<'s> AnnotationView<'s> {
    pub fn type_name(&self) -> &str {
        self.schema.type_name()
    }

    pub fn schema(&self) -> &'s AnnotationSchema {
        self.schema
    }

    /// True when `name` was recorded in the class file rather than defaulted.
    pub fn is_explicit(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn value(&self, name: &str) -> AnnotationResult<&AnnotationValue> {
        if !self.schema.declares(name) {
            return Err(AnnotationError::UndeclaredElement {
                annotation: self.schema.type_name().to_string(),
                attribute: name.to_string(),
            });
        }
        if let Some(value) = self.values.get(name) {
            return Ok(value);
        }
        self.schema
            .default_value(name)
            .ok_or_else(|| AnnotationError::MissingAttribute {
                annotation: self.schema.type_name().to_string(),
                attribute: name.to_string(),
            })
    }

    pub fn string(&self, name: &str) -> AnnotationResult<&str> {
        match self.value(name)? {
            AnnotationValue::String(s) => Ok(s),
            other => Err(self.mismatch(name, "string", other)),
        }
    }

    pub fn bool(&self, name: &str) -> AnnotationResult<bool> {
        match self.value(name)? {
            AnnotationValue::Bool(b) => Ok(*b),
            other => Err(self.mismatch(name, "boolean", other)),
        }
    }

    /// Reads any integral element that fits an `i32`.
    pub fn int(&self, name: &str) -> AnnotationResult<i32> {
        match self.value(name)? {
            AnnotationValue::Int(v) => Ok(*v),
            AnnotationValue::Short(v) => Ok(i32::from(*v)),
            AnnotationValue::Byte(v) => Ok(i32::from(*v)),
            AnnotationValue::Char(c) => Ok(*c as i32),
            other => Err(self.mismatch(name, "int", other)),
        }
    }

    pub fn long(&self, name: &str) -> AnnotationResult<i64> {
        match self.value(name)? {
            AnnotationValue::Long(v) => Ok(*v),
            AnnotationValue::Int(v) => Ok(i64::from(*v)),
            AnnotationValue::Short(v) => Ok(i64::from(*v)),
            AnnotationValue::Byte(v) => Ok(i64::from(*v)),
            AnnotationValue::Char(c) => Ok(i64::from(u32::from(*c))),
            other => Err(self.mismatch(name, "long", other)),
        }
    }

    pub fn double(&self, name: &str) -> AnnotationResult<f64> {
        match self.value(name)? {
            AnnotationValue::Double(v) => Ok(*v),
            AnnotationValue::Float(v) => Ok(f64::from(*v)),
            other => Err(self.mismatch(name, "double", other)),
        }
    }

    /// Returns the type name of a class literal element.
    pub fn class_name(&self, name: &str) -> AnnotationResult<&str> {
        match self.value(name)? {
            AnnotationValue::Class(c) => Ok(c),
            other => Err(self.mismatch(name, "class", other)),
        }
    }

    /// Returns the constant name of an enum element, e.g. `Throughput`.
    pub fn enum_constant(&self, name: &str) -> AnnotationResult<&str> {
        match self.value(name)? {
            AnnotationValue::Enum { constant, .. } => Ok(constant),
            other => Err(self.mismatch(name, "enum", other)),
        }
    }

    pub fn strings(&self, name: &str) -> AnnotationResult<Vec<&str>> {
        self.array_of(name, "string[]", |v| v.as_str())
    }

    pub fn enum_constants(&self, name: &str) -> AnnotationResult<Vec<&str>> {
        self.array_of(name, "enum[]", |v| match v {
            AnnotationValue::Enum { constant, .. } => Some(constant.as_str()),
            _ => None,
        })
    }

    pub fn ints(&self, name: &str) -> AnnotationResult<Vec<i32>> {
        self.array_of(name, "int[]", |v| match v {
            AnnotationValue::Int(i) => Some(*i),
            _ => None,
        })
    }

    /// Views a nested annotation element through `schema`.
    pub fn nested<'t>(
        &self,
        name: &str,
        schema: &'t AnnotationSchema,
    ) -> AnnotationResult<AnnotationView<'t>> {
        match self.value(name)? {
            AnnotationValue::Annotation(nested) => Ok(Self::nested_view(nested, schema)),
            other => Err(self.mismatch(name, "annotation", other)),
        }
    }

    pub fn nested_array<'t>(
        &self,
        name: &str,
        schema: &'t AnnotationSchema,
    ) -> AnnotationResult<Vec<AnnotationView<'t>>> {
        let nested = self.array_of(name, "annotation[]", |v| match v {
            AnnotationValue::Annotation(n) => Some(n),
            _ => None,
        })?;
        Ok(nested
            .into_iter()
            .map(|n| Self::nested_view(n, schema))
            .collect())
    }

    fn nested_view<'t>(nested: &NestedAnnotation, schema: &'t AnnotationSchema) -> AnnotationView<'t> {
        AnnotationView {
            schema,
            values: Arc::new(nested.attributes.clone()),
        }
    }

    // A single value stored where an array is declared is read as a
    // one-element array; class files may encode `x = "a"` for `String[] x`.
    fn array_of<'a, T>(
        &'a self,
        name: &str,
        expected: &'static str,
        extract: impl Fn(&'a AnnotationValue) -> Option<T>,
    ) -> AnnotationResult<Vec<T>> {
        let value = self.value(name)?;
        let items: &[AnnotationValue] = match value {
            AnnotationValue::Array(items) => items,
            single => std::slice::from_ref(single),
        };
        items
            .iter()
            .map(|item| extract(item).ok_or_else(|| self.mismatch(name, expected, item)))
            .collect()
    }

    fn mismatch(&self, name: &str, expected: &'static str, found: &AnnotationValue) -> AnnotationError {
        AnnotationError::TypeMismatch {
            annotation: self.schema.type_name().to_string(),
            attribute: name.to_string(),
            expected,
            found: found.kind_name(),
        }
    }
}

/// Anything carrying annotations keyed by annotation type name.
pub trait Annotated {
    fn annotation_handle(&self, type_name: &str) -> Option<&AnnotationHandle>;

    fn annotation_names(&self) -> Vec<&str>;

    fn has_annotation(&self, type_name: &str) -> bool {
        self.annotation_handle(type_name).is_some()
    }

    /// Looks up the annotation named by `schema` and produces a fresh view.
    fn get_annotation_by<'s>(&self, schema: &'s AnnotationSchema) -> Option<AnnotationView<'s>> {
        self.annotation_handle(schema.type_name())
            .map(|handle| handle.produce_view(schema))
    }

    fn get_annotation<K: AnnotationKind>(&self) -> Option<AnnotationView<'static>>
    where
        Self: Sized,
    {
        self.get_annotation_by(K::schema())
    }
}
