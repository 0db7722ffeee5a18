//! Consumer-facing vocabulary for class metadata: access flags, the
//! annotation value tree, annotation schemas and the typed views produced
//! from them.

pub mod annotation;
pub mod error;
pub mod models;

pub use annotation::{Annotated, AnnotationHandle, AnnotationKind, AnnotationSchema, AnnotationView};
pub use error::{AnnotationError, AnnotationResult};
pub use models::*;
