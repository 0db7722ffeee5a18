use thiserror::Error;

/// Protocol violations raised while building one class. Any of these aborts
/// the class; nothing is published to the repository.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("class header visited twice (first {first}, then {second})")]
    DuplicateHeader { first: String, second: String },
    #[error("{event} event arrived before the class header")]
    MissingHeader { event: &'static str },
    #[error("class {0} has no package")]
    MissingPackage(String),
    #[error("class {0} was already built")]
    AlreadyBuilt(String),
    #[error("class build was aborted by an earlier error: {0}")]
    Aborted(String),
    #[error("invalid descriptor '{descriptor}': {reason}")]
    InvalidDescriptor { descriptor: String, reason: String },
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BuildError>;
