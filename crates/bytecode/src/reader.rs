use crate::converter::{AnnotationConverter, ConstantConverter, class_name, utf8};
use crate::error::{ReadError, Result};
use classmeta_api::AccessFlags;
use classmeta_core::{
    AnnotationVisitor, ClassHeader, ClassInfo, ClassInfoBuilder, ClassInfoRepo, ClassVisitor,
    ConstantValue, ExtractConfig, FieldDecl, MethodDecl,
};
use rayon::prelude::*;
use ristretto_classfile::ClassFile;
use ristretto_classfile::ConstantPool;
use ristretto_classfile::attributes::{Annotation, Attribute};
use std::io::Cursor;
use std::sync::Arc;

/// Walks a decoded class file in file order and replays it as visitor events.
#[derive(Debug, Clone, Default)]
pub struct ClassReader {
    config: ExtractConfig,
}

impl ClassReader {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    pub fn decode(bytes: &[u8]) -> Result<ClassFile> {
        ClassFile::from_bytes(&mut Cursor::new(bytes.to_vec()))
            .map_err(|e| ReadError::Decode(format!("Failed to parse class: {e:?}")))
    }

    /// Decodes `bytes`, builds the class and publishes it to `repo`.
    pub fn read(&self, bytes: &[u8], repo: &ClassInfoRepo) -> Result<Arc<ClassInfo>> {
        let class = Self::decode(bytes)?;
        let mut builder = ClassInfoBuilder::with_config(repo.clone(), self.config.clone());
        self.accept(&class, &mut builder)?;
        Ok(builder.finish()?)
    }

    /// Reads a batch of class files on the rayon pool. Results keep the
    /// order of `batch`; a failing class does not affect the others.
    pub fn read_all(&self, batch: &[Vec<u8>], repo: &ClassInfoRepo) -> Vec<Result<Arc<ClassInfo>>> {
        batch
            .par_iter()
            .map(|bytes| {
                self.read(bytes, repo).inspect_err(|e| {
                    tracing::warn!("Skipping class: {}", e);
                })
            })
            .collect()
    }

    /// Replays `class` into `visitor`: header, class annotations, fields
    /// with their annotations, then methods with their own and their
    /// parameters' annotations.
    pub fn accept(&self, class: &ClassFile, visitor: &mut dyn ClassVisitor) -> Result<()> {
        let pool = &class.constant_pool;

        let super_name = match class.super_class {
            0 => None,
            index => Some(class_name(pool, index)?),
        };
        let interfaces = class
            .interfaces
            .iter()
            .map(|&index| class_name(pool, index))
            .collect::<Result<Vec<_>>>()?;
        visitor.visit(ClassHeader {
            access: AccessFlags::from(class.access_flags.bits()),
            name: class_name(pool, class.this_class)?,
            signature: Self::signature(pool, &class.attributes)?,
            super_name,
            interfaces,
        })?;

        for (annotation, visible) in self.annotations(&class.attributes) {
            let descriptor = utf8(pool, annotation.type_index)?;
            Self::fill(pool, annotation, visitor.visit_annotation(&descriptor, visible)?)?;
        }

        for field in &class.fields {
            let access = AccessFlags::from(field.access_flags.bits());
            if !self.wants(access) {
                continue;
            }
            let decl = FieldDecl {
                access,
                name: utf8(pool, field.name_index)?,
                descriptor: utf8(pool, field.descriptor_index)?,
                signature: Self::signature(pool, &field.attributes)?,
                constant_value: Self::constant_value(pool, &field.attributes)?,
            };
            let sink = visitor.visit_field(decl)?;
            for (annotation, visible) in self.annotations(&field.attributes) {
                let descriptor = utf8(pool, annotation.type_index)?;
                Self::fill(pool, annotation, sink.visit_annotation(&descriptor, visible)?)?;
            }
        }

        for method in &class.methods {
            let access = AccessFlags::from(method.access_flags.bits());
            if !self.wants(access) {
                continue;
            }
            let decl = MethodDecl {
                access,
                name: utf8(pool, method.name_index)?,
                descriptor: utf8(pool, method.descriptor_index)?,
                signature: Self::signature(pool, &method.attributes)?,
                exceptions: Self::exceptions(pool, &method.attributes)?,
            };
            let sink = visitor.visit_method(decl)?;
            for (annotation, visible) in self.annotations(&method.attributes) {
                let descriptor = utf8(pool, annotation.type_index)?;
                Self::fill(pool, annotation, sink.visit_annotation(&descriptor, visible)?)?;
            }
            for (parameter, annotation, visible) in self.parameter_annotations(&method.attributes) {
                let descriptor = utf8(pool, annotation.type_index)?;
                Self::fill(
                    pool,
                    annotation,
                    sink.visit_parameter_annotation(parameter, &descriptor, visible)?,
                )?;
            }
        }

        Ok(())
    }

    fn wants(&self, access: AccessFlags) -> bool {
        self.config.include_synthetic_members || !access.contains(AccessFlags::SYNTHETIC)
    }

    fn annotations<'c>(&self, attributes: &'c [Attribute]) -> Vec<(&'c Annotation, bool)> {
        let mut found = Vec::new();
        for attribute in attributes {
            match attribute {
                Attribute::RuntimeVisibleAnnotations { annotations, .. } => {
                    found.extend(annotations.iter().map(|a| (a, true)));
                }
                Attribute::RuntimeInvisibleAnnotations { annotations, .. }
                    if self.config.include_invisible_annotations =>
                {
                    found.extend(annotations.iter().map(|a| (a, false)));
                }
                _ => {}
            }
        }
        found
    }

    /// Parameter annotations as `(parameter index, annotation, visible)`.
    fn parameter_annotations<'c>(&self, attributes: &'c [Attribute]) -> Vec<(usize, &'c Annotation, bool)> {
        let mut found = Vec::new();
        for attribute in attributes {
            let (parameters, visible) = match attribute {
                Attribute::RuntimeVisibleParameterAnnotations {
                    parameter_annotations,
                    ..
                } => (parameter_annotations, true),
                Attribute::RuntimeInvisibleParameterAnnotations {
                    parameter_annotations,
                    ..
                } if self.config.include_invisible_annotations => (parameter_annotations, false),
                _ => continue,
            };
            for (index, parameter) in parameters.iter().enumerate() {
                found.extend(parameter.annotations.iter().map(|a| (index, a, visible)));
            }
        }
        found
    }

    fn fill(pool: &ConstantPool, annotation: &Annotation, sink: &mut dyn AnnotationVisitor) -> Result<()> {
        for pair in &annotation.elements {
            let name = utf8(pool, pair.name_index)?;
            sink.set_attribute(&name, AnnotationConverter::convert_element(pool, &pair.value)?);
        }
        Ok(())
    }

    fn signature(pool: &ConstantPool, attributes: &[Attribute]) -> Result<Option<String>> {
        for attribute in attributes {
            if let Attribute::Signature { signature_index, .. } = attribute {
                return utf8(pool, *signature_index).map(Some);
            }
        }
        Ok(None)
    }

    fn constant_value(pool: &ConstantPool, attributes: &[Attribute]) -> Result<Option<ConstantValue>> {
        for attribute in attributes {
            if let Attribute::ConstantValue {
                constant_value_index,
                ..
            } = attribute
            {
                return ConstantConverter::convert(pool, *constant_value_index);
            }
        }
        Ok(None)
    }

    fn exceptions(pool: &ConstantPool, attributes: &[Attribute]) -> Result<Vec<String>> {
        for attribute in attributes {
            if let Attribute::Exceptions {
                exception_indexes, ..
            } = attribute
            {
                return exception_indexes
                    .iter()
                    .map(|&index| class_name(pool, index))
                    .collect();
            }
        }
        Ok(Vec::new())
    }
}
