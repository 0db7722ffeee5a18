use crate::error::{ReadError, Result};
use classmeta_api::{AnnotationValue, NestedAnnotation};
use classmeta_core::{ConstantValue, descriptor};
use indexmap::IndexMap;
use ristretto_classfile::attributes::{Annotation, AnnotationElement};
use ristretto_classfile::{Constant, ConstantPool};

fn decode_error(e: impl std::fmt::Debug) -> ReadError {
    ReadError::Decode(format!("{e:?}"))
}

pub(crate) fn utf8(pool: &ConstantPool, index: u16) -> Result<String> {
    pool.try_get_utf8(index)
        .map(|s| s.to_string())
        .map_err(decode_error)
}

pub(crate) fn class_name(pool: &ConstantPool, index: u16) -> Result<String> {
    pool.try_get_class(index)
        .map(|s| s.to_string())
        .map_err(decode_error)
}

fn integer(pool: &ConstantPool, index: u16) -> Result<i32> {
    pool.try_get_integer(index)
        .map(|v| v.to_owned())
        .map_err(decode_error)
}

/// Java type name of a descriptor stored in the pool; `V` reads as `void`.
fn type_name(pool: &ConstantPool, index: u16) -> Result<String> {
    let raw = utf8(pool, index)?;
    if raw == "V" {
        return Ok("void".to_string());
    }
    Ok(descriptor::field_type_name(&raw)?)
}

pub struct AnnotationConverter;

impl AnnotationConverter {
    pub fn convert_element(pool: &ConstantPool, element: &AnnotationElement) -> Result<AnnotationValue> {
        let value = match element {
            AnnotationElement::Boolean { const_value_index } => {
                AnnotationValue::Bool(integer(pool, *const_value_index)? != 0)
            }
            AnnotationElement::Byte { const_value_index } => {
                AnnotationValue::Byte(integer(pool, *const_value_index)? as i8)
            }
            AnnotationElement::Char { const_value_index } => {
                let code = integer(pool, *const_value_index)? as u32;
                AnnotationValue::Char(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
            }
            AnnotationElement::Short { const_value_index } => {
                AnnotationValue::Short(integer(pool, *const_value_index)? as i16)
            }
            AnnotationElement::Int { const_value_index } => {
                AnnotationValue::Int(integer(pool, *const_value_index)?)
            }
            AnnotationElement::Long { const_value_index } => AnnotationValue::Long(
                pool.try_get_long(*const_value_index)
                    .map(|v| v.to_owned())
                    .map_err(decode_error)?,
            ),
            AnnotationElement::Float { const_value_index } => AnnotationValue::Float(
                pool.try_get_float(*const_value_index)
                    .map(|v| v.to_owned())
                    .map_err(decode_error)?,
            ),
            AnnotationElement::Double { const_value_index } => AnnotationValue::Double(
                pool.try_get_double(*const_value_index)
                    .map(|v| v.to_owned())
                    .map_err(decode_error)?,
            ),
            AnnotationElement::String { const_value_index } => {
                AnnotationValue::String(utf8(pool, *const_value_index)?)
            }
            AnnotationElement::Class { class_info_index } => {
                AnnotationValue::Class(type_name(pool, *class_info_index)?)
            }
            AnnotationElement::Enum {
                type_name_index,
                const_name_index,
            } => AnnotationValue::Enum {
                type_name: type_name(pool, *type_name_index)?,
                constant: utf8(pool, *const_name_index)?,
            },
            AnnotationElement::Annotation { annotation } => {
                AnnotationValue::Annotation(Self::convert_nested(pool, annotation)?)
            }
            AnnotationElement::Array { values } => AnnotationValue::Array(
                values
                    .iter()
                    .map(|v| Self::convert_element(pool, v))
                    .collect::<Result<Vec<_>>>()?,
            ),
        };
        Ok(value)
    }

    pub fn convert_nested(pool: &ConstantPool, annotation: &Annotation) -> Result<NestedAnnotation> {
        let mut attributes = IndexMap::new();
        for pair in &annotation.elements {
            attributes.insert(
                utf8(pool, pair.name_index)?,
                Self::convert_element(pool, &pair.value)?,
            );
        }
        Ok(NestedAnnotation {
            type_name: type_name(pool, annotation.type_index)?,
            attributes,
        })
    }
}

pub struct ConstantConverter;

impl ConstantConverter {
    /// Reads the target of a `ConstantValue` attribute.
    pub fn convert(pool: &ConstantPool, index: u16) -> Result<Option<ConstantValue>> {
        let value = match pool.get(index) {
            Some(Constant::Integer(v)) => Some(ConstantValue::Int(*v)),
            Some(Constant::Long(v)) => Some(ConstantValue::Long(*v)),
            Some(Constant::Float(v)) => Some(ConstantValue::Float(*v)),
            Some(Constant::Double(v)) => Some(ConstantValue::Double(*v)),
            Some(Constant::String(utf8_index)) => Some(ConstantValue::String(utf8(pool, *utf8_index)?)),
            _ => None,
        };
        Ok(value)
    }
}
