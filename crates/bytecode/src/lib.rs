//! Replays decoded class files as builder events.

pub mod error;
pub mod reader;

mod converter;

pub use error::{ReadError, Result};
pub use reader::ClassReader;
