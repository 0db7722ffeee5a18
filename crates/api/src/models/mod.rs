pub mod access;
pub mod annotation;
pub mod naming;

pub use access::*;
pub use annotation::*;
pub use naming::*;
