//! Immutable class metadata as handed to consumers.

pub mod class;
pub mod field;
pub mod method;

pub use class::ClassInfo;
pub use field::{ConstantValue, FieldInfo};
pub use method::{MethodInfo, ParameterInfo};
