//! Event-driven builders turning a decoder's visit stream into
//! [`crate::model`] values.
//!
//! A rejected event is fatal for the class being built: the builder that
//! raised it refuses every later event and its `finish`/`build` fails with
//! [`BuildError::Aborted`], so nothing partial reaches the repository.

mod class;
mod member;

pub use class::ClassInfoBuilder;
pub use member::{FieldInfoBuilder, MethodInfoBuilder};

use crate::error::{BuildError, Result};

/// Remembers the first error a builder raised.
#[derive(Debug, Default)]
pub(crate) struct Poison {
    cause: Option<String>,
}

impl Poison {
    pub fn check(&self) -> Result<()> {
        match &self.cause {
            Some(cause) => Err(BuildError::Aborted(cause.clone())),
            None => Ok(()),
        }
    }

    /// Latches `err` as the cause if none is recorded yet and hands it back.
    pub fn record(&mut self, err: BuildError) -> BuildError {
        if self.cause.is_none() {
            tracing::warn!("Aborting class build: {}", err);
            self.cause = Some(err.to_string());
        }
        err
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}
