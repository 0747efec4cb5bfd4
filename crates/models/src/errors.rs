use thiserror::Error;

/// Errors raised while turning a request payload into a model value.
///
/// The `Display` text is what API clients see, so it stays short.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("{0}")]
    Validation(String),
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}
