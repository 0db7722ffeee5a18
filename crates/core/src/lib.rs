//! Streaming class metadata builder.
//!
//! A decoder drives a [`ClassInfoBuilder`] through the [`visitor`] traits;
//! the finished [`ClassInfo`] is published to a shared [`ClassInfoRepo`]
//! where other classes and the consumer look it up by name.

pub mod annotation;
pub mod builder;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod visitor;

pub use annotation::{AnnotationCapture, AnnotationMap};
pub use builder::{ClassInfoBuilder, FieldInfoBuilder, MethodInfoBuilder};
pub use config::ExtractConfig;
pub use error::{BuildError, Result};
pub use model::{ClassInfo, ConstantValue, FieldInfo, MethodInfo, ParameterInfo};
pub use repo::{ClassInfoRepo, ClassRef, ClassSlot};
pub use visitor::{
    AnnotationVisitor, ClassHeader, ClassVisitor, FieldDecl, FieldVisitor, MethodDecl,
    MethodVisitor,
};
