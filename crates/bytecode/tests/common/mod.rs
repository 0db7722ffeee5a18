//! Class-file fixtures assembled with `ristretto_classfile`.
#![allow(dead_code)]

use ristretto_classfile::attributes::{
    self, AnnotationElement, AnnotationValuePair, Attribute, Instruction, ParameterAnnotation,
};
use ristretto_classfile::{
    ClassAccessFlags, ClassFile, ConstantPool, Field, FieldAccessFlags, FieldType, JAVA_8, Method,
    MethodAccessFlags,
};

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;
pub const ACC_SUPER: u16 = 0x0020;
pub const ACC_SYNTHETIC: u16 = 0x1000;

/// Annotation element value as written in source.
#[derive(Clone)]
pub enum Element {
    Bool(bool),
    Int(i32),
    Long(i64),
    Str(String),
    Class(String),
    Enum(String, String),
    Nested(Annotation),
    Array(Vec<Element>),
}

impl Element {
    pub fn str(value: &str) -> Self {
        Element::Str(value.to_string())
    }

    pub fn enum_constant(descriptor: &str, constant: &str) -> Self {
        Element::Enum(descriptor.to_string(), constant.to_string())
    }

    fn encode(&self, pool: &mut ConstantPool) -> AnnotationElement {
        match self {
            Element::Bool(v) => AnnotationElement::Boolean {
                const_value_index: pool.add_integer(i32::from(*v)).unwrap(),
            },
            Element::Int(v) => AnnotationElement::Int {
                const_value_index: pool.add_integer(*v).unwrap(),
            },
            Element::Long(v) => AnnotationElement::Long {
                const_value_index: pool.add_long(*v).unwrap(),
            },
            Element::Str(v) => AnnotationElement::String {
                const_value_index: pool.add_utf8(v).unwrap(),
            },
            Element::Class(descriptor) => AnnotationElement::Class {
                class_info_index: pool.add_utf8(descriptor).unwrap(),
            },
            Element::Enum(descriptor, constant) => AnnotationElement::Enum {
                type_name_index: pool.add_utf8(descriptor).unwrap(),
                const_name_index: pool.add_utf8(constant).unwrap(),
            },
            Element::Nested(annotation) => AnnotationElement::Annotation {
                annotation: annotation.encode(pool),
            },
            Element::Array(values) => AnnotationElement::Array {
                values: values.iter().map(|v| v.encode(pool)).collect(),
            },
        }
    }
}

#[derive(Clone)]
pub struct Annotation {
    descriptor: String,
    elements: Vec<(String, Element)>,
}

impl Annotation {
    pub fn new(descriptor: &str) -> Self {
        Self {
            descriptor: descriptor.to_string(),
            elements: Vec::new(),
        }
    }

    pub fn with(mut self, name: &str, value: Element) -> Self {
        self.elements.push((name.to_string(), value));
        self
    }

    fn encode(&self, pool: &mut ConstantPool) -> attributes::Annotation {
        attributes::Annotation {
            type_index: pool.add_utf8(&self.descriptor).unwrap(),
            elements: self
                .elements
                .iter()
                .map(|(name, value)| AnnotationValuePair {
                    name_index: pool.add_utf8(name).unwrap(),
                    value: value.encode(pool),
                })
                .collect(),
        }
    }
}

/// A field or method declaration with the attributes the reader replays.
pub struct Member {
    access: u16,
    name: String,
    descriptor: String,
    signature: Option<String>,
    constant: Option<i32>,
    exceptions: Vec<String>,
    annotations: Vec<(Annotation, bool)>,
    parameter_annotations: Vec<(usize, Annotation, bool)>,
}

impl Member {
    pub fn new(access: u16, name: &str, descriptor: &str) -> Self {
        Self {
            access,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            signature: None,
            constant: None,
            exceptions: Vec::new(),
            annotations: Vec::new(),
            parameter_annotations: Vec::new(),
        }
    }

    pub fn signature(mut self, signature: &str) -> Self {
        self.signature = Some(signature.to_string());
        self
    }

    pub fn constant(mut self, value: i32) -> Self {
        self.constant = Some(value);
        self
    }

    pub fn throws(mut self, internal_name: &str) -> Self {
        self.exceptions.push(internal_name.to_string());
        self
    }

    pub fn annotated(mut self, annotation: Annotation, visible: bool) -> Self {
        self.annotations.push((annotation, visible));
        self
    }

    pub fn parameter_annotated(mut self, index: usize, annotation: Annotation, visible: bool) -> Self {
        self.parameter_annotations.push((index, annotation, visible));
        self
    }
}

fn signature_attribute(pool: &mut ConstantPool, signature: Option<&str>) -> Option<Attribute> {
    signature.map(|signature| Attribute::Signature {
        name_index: pool.add_utf8("Signature").unwrap(),
        signature_index: pool.add_utf8(signature).unwrap(),
    })
}

fn annotation_attributes(pool: &mut ConstantPool, annotations: &[(Annotation, bool)]) -> Vec<Attribute> {
    let mut found = Vec::new();
    for visible in [true, false] {
        let selected: Vec<_> = annotations
            .iter()
            .filter(|(_, v)| *v == visible)
            .map(|(a, _)| a.encode(pool))
            .collect();
        if selected.is_empty() {
            continue;
        }
        found.push(if visible {
            Attribute::RuntimeVisibleAnnotations {
                name_index: pool.add_utf8("RuntimeVisibleAnnotations").unwrap(),
                annotations: selected,
            }
        } else {
            Attribute::RuntimeInvisibleAnnotations {
                name_index: pool.add_utf8("RuntimeInvisibleAnnotations").unwrap(),
                annotations: selected,
            }
        });
    }
    found
}

fn parameter_annotation_attributes(pool: &mut ConstantPool, method: &Member) -> Vec<Attribute> {
    let (parameters, _) = FieldType::parse_method_descriptor(&method.descriptor).unwrap();
    let mut found = Vec::new();
    for visible in [true, false] {
        if !method.parameter_annotations.iter().any(|(_, _, v)| *v == visible) {
            continue;
        }
        let mut slots: Vec<ParameterAnnotation> = (0..parameters.len())
            .map(|_| ParameterAnnotation {
                annotations: Vec::new(),
            })
            .collect();
        for (index, annotation, _) in method
            .parameter_annotations
            .iter()
            .filter(|(_, _, v)| *v == visible)
        {
            let encoded = annotation.encode(pool);
            slots[*index].annotations.push(encoded);
        }
        found.push(if visible {
            Attribute::RuntimeVisibleParameterAnnotations {
                name_index: pool.add_utf8("RuntimeVisibleParameterAnnotations").unwrap(),
                parameter_annotations: slots,
            }
        } else {
            Attribute::RuntimeInvisibleParameterAnnotations {
                name_index: pool.add_utf8("RuntimeInvisibleParameterAnnotations").unwrap(),
                parameter_annotations: slots,
            }
        });
    }
    found
}

/// Assembles a Java 8 class file.
pub struct ClassFileBuilder {
    class: ClassFile,
    signature: Option<String>,
    annotations: Vec<(Annotation, bool)>,
}

impl ClassFileBuilder {
    pub fn new(access: u16, name: &str, super_name: Option<&str>) -> Self {
        let mut constant_pool = ConstantPool::default();
        let this_class = constant_pool.add_class(name).unwrap();
        let super_class = super_name
            .map(|s| constant_pool.add_class(s).unwrap())
            .unwrap_or(0);
        Self {
            class: ClassFile {
                version: JAVA_8,
                constant_pool,
                access_flags: ClassAccessFlags::from_bits_truncate(access),
                this_class,
                super_class,
                ..Default::default()
            },
            signature: None,
            annotations: Vec::new(),
        }
    }

    pub fn interface(mut self, name: &str) -> Self {
        let index = self.class.constant_pool.add_class(name).unwrap();
        self.class.interfaces.push(index);
        self
    }

    pub fn signature(mut self, signature: &str) -> Self {
        self.signature = Some(signature.to_string());
        self
    }

    pub fn annotated(mut self, annotation: Annotation, visible: bool) -> Self {
        self.annotations.push((annotation, visible));
        self
    }

    pub fn field(mut self, field: Member) -> Self {
        let pool = &mut self.class.constant_pool;
        let mut attributes = Vec::new();
        if let Some(value) = field.constant {
            attributes.push(Attribute::ConstantValue {
                name_index: pool.add_utf8("ConstantValue").unwrap(),
                constant_value_index: pool.add_integer(value).unwrap(),
            });
        }
        attributes.extend(signature_attribute(pool, field.signature.as_deref()));
        attributes.extend(annotation_attributes(pool, &field.annotations));

        self.class.fields.push(Field {
            access_flags: FieldAccessFlags::from_bits_truncate(field.access),
            name_index: pool.add_utf8(&field.name).unwrap(),
            descriptor_index: pool.add_utf8(&field.descriptor).unwrap(),
            field_type: FieldType::parse(&field.descriptor).unwrap(),
            attributes,
        });
        self
    }

    pub fn method(mut self, method: Member) -> Self {
        let pool = &mut self.class.constant_pool;
        let mut attributes = vec![Attribute::Code {
            name_index: pool.add_utf8("Code").unwrap(),
            max_stack: 1,
            max_locals: 4,
            code: vec![Instruction::Return],
            exception_table: Vec::new(),
            attributes: Vec::new(),
        }];
        if !method.exceptions.is_empty() {
            let name_index = pool.add_utf8("Exceptions").unwrap();
            let exception_indexes = method
                .exceptions
                .iter()
                .map(|e| pool.add_class(e).unwrap())
                .collect();
            attributes.push(Attribute::Exceptions {
                name_index,
                exception_indexes,
            });
        }
        attributes.extend(signature_attribute(pool, method.signature.as_deref()));
        attributes.extend(annotation_attributes(pool, &method.annotations));
        attributes.extend(parameter_annotation_attributes(pool, &method));

        self.class.methods.push(Method {
            access_flags: MethodAccessFlags::from_bits_truncate(method.access),
            name_index: pool.add_utf8(&method.name).unwrap(),
            descriptor_index: pool.add_utf8(&method.descriptor).unwrap(),
            attributes,
        });
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        let pool = &mut self.class.constant_pool;
        let mut attributes: Vec<Attribute> = signature_attribute(pool, self.signature.as_deref())
            .into_iter()
            .collect();
        attributes.extend(annotation_attributes(pool, &self.annotations));
        self.class.attributes = attributes;

        let mut bytes = Vec::new();
        self.class.to_bytes(&mut bytes).unwrap();
        bytes
    }
}
