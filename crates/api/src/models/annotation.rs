use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single annotation element value as it appears in a class file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum AnnotationValue {
    Bool(bool),
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// A class literal, stored as its Java type name (`java.lang.String`, `int[]`).
    Class(String),
    Enum {
        type_name: String,
        constant: String,
    },
    Annotation(NestedAnnotation),
    Array(Vec<AnnotationValue>),
}

/// An annotation used as the value of another annotation's element.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NestedAnnotation {
    pub type_name: String,
    pub attributes: IndexMap<String, AnnotationValue>,
}

impl AnnotationValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            AnnotationValue::Bool(_) => "boolean",
            AnnotationValue::Byte(_) => "byte",
            AnnotationValue::Char(_) => "char",
            AnnotationValue::Short(_) => "short",
            AnnotationValue::Int(_) => "int",
            AnnotationValue::Long(_) => "long",
            AnnotationValue::Float(_) => "float",
            AnnotationValue::Double(_) => "double",
            AnnotationValue::String(_) => "string",
            AnnotationValue::Class(_) => "class",
            AnnotationValue::Enum { .. } => "enum",
            AnnotationValue::Annotation(_) => "annotation",
            AnnotationValue::Array(_) => "array",
        }
    }

    pub fn enum_constant(type_name: impl Into<String>, constant: impl Into<String>) -> Self {
        AnnotationValue::Enum {
            type_name: type_name.into(),
            constant: constant.into(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for AnnotationValue {
    fn from(value: &str) -> Self {
        AnnotationValue::String(value.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(value: String) -> Self {
        AnnotationValue::String(value)
    }
}

impl From<bool> for AnnotationValue {
    fn from(value: bool) -> Self {
        AnnotationValue::Bool(value)
    }
}

impl From<i32> for AnnotationValue {
    fn from(value: i32) -> Self {
        AnnotationValue::Int(value)
    }
}

impl From<i64> for AnnotationValue {
    fn from(value: i64) -> Self {
        AnnotationValue::Long(value)
    }
}

impl From<f64> for AnnotationValue {
    fn from(value: f64) -> Self {
        AnnotationValue::Double(value)
    }
}

impl<T: Into<AnnotationValue>> From<Vec<T>> for AnnotationValue {
    fn from(values: Vec<T>) -> Self {
        AnnotationValue::Array(values.into_iter().map(Into::into).collect())
    }
}
