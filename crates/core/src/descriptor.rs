//! Decoding of JVM type descriptors into Java type names.
//!
//! Names are decoded only; looking them up as classes is left to the
//! consumer through [`crate::repo::ClassInfoRepo`].

use crate::error::{BuildError, Result};
use ristretto_classfile::{BaseType, FieldType};

/// Java type name of a decoded descriptor: `int`, `java.lang.String`, `long[][]`.
pub fn type_name(ty: &FieldType) -> String {
    match ty {
        FieldType::Base(BaseType::Byte) => "byte".to_string(),
        FieldType::Base(BaseType::Char) => "char".to_string(),
        FieldType::Base(BaseType::Double) => "double".to_string(),
        FieldType::Base(BaseType::Float) => "float".to_string(),
        FieldType::Base(BaseType::Int) => "int".to_string(),
        FieldType::Base(BaseType::Long) => "long".to_string(),
        FieldType::Base(BaseType::Short) => "short".to_string(),
        FieldType::Base(BaseType::Boolean) => "boolean".to_string(),
        FieldType::Object(name) => name.replace('/', "."),
        FieldType::Array(component) => {
            let mut dimensions = 1usize;
            let mut current = component.as_ref();
            while let FieldType::Array(inner) = current {
                dimensions += 1;
                current = inner.as_ref();
            }
            format!("{}{}", type_name(current), "[]".repeat(dimensions))
        }
    }
}

/// Decodes a method descriptor into `(return type, parameter types)`.
pub fn method_types(descriptor: &str) -> Result<(String, Vec<String>)> {
    let descriptor = descriptor.to_string();
    let (params, ret) = FieldType::parse_method_descriptor(&descriptor).map_err(|e| {
        BuildError::InvalidDescriptor {
            descriptor: descriptor.clone(),
            reason: format!("{e:?}"),
        }
    })?;
    let return_type = match ret {
        None => "void".to_string(),
        Some(ty) => type_name(&ty),
    };
    Ok((return_type, params.iter().map(type_name).collect()))
}

/// Decodes a field descriptor such as `Ljava/lang/String;` or `[I`.
pub fn field_type_name(descriptor: &str) -> Result<String> {
    // Parsed as the only parameter of a void method.
    let wrapped = format!("({descriptor})V");
    let (_, mut params) = method_types(&wrapped).map_err(|_| BuildError::InvalidDescriptor {
        descriptor: descriptor.to_string(),
        reason: "not a field descriptor".to_string(),
    })?;
    match params.len() {
        1 => Ok(params.remove(0)),
        _ => Err(BuildError::InvalidDescriptor {
            descriptor: descriptor.to_string(),
            reason: "not a single field type".to_string(),
        }),
    }
}
