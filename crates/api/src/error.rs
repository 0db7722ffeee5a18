#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnnotationError {
    #[error("@{annotation} has no value for '{attribute}' and declares no default")]
    MissingAttribute {
        annotation: String,
        attribute: String,
    },
    #[error("@{annotation} does not declare an element named '{attribute}'")]
    UndeclaredElement {
        annotation: String,
        attribute: String,
    },
    #[error("@{annotation}.{attribute} holds {found}, expected {expected}")]
    TypeMismatch {
        annotation: String,
        attribute: String,
        expected: &'static str,
        found: &'static str,
    },
}

pub type AnnotationResult<T> = std::result::Result<T, AnnotationError>;
