use classmeta_core::BuildError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("class file decoding failed: {0}")]
    Decode(String),
    #[error(transparent)]
    Build(#[from] BuildError),
}

pub type Result<T> = std::result::Result<T, ReadError>;
