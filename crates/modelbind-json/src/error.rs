use thiserror::Error;

/// Errors produced while decoding, binding, or writing JSON.
///
/// Every variant is recoverable and returned to the caller. Using a
/// [`JsonSerializationWriter`](crate::JsonSerializationWriter) after
/// `close()` is the one lifecycle violation that panics instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The input bytes are not valid JSON.
    #[error("invalid JSON payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// A decoded value cannot be narrowed to the requested primitive.
    #[error("value '{value}' is not compatible with type {target}")]
    TypeMismatch { value: String, target: &'static str },

    /// A string value does not parse as the requested textual primitive.
    #[error("value '{value}' is not a valid {target}")]
    InvalidFormat { value: String, target: &'static str },

    #[error("targetType {0} is not supported")]
    UnsupportedCollectionType(String),

    /// An additional-data entry has no JSON representation.
    #[error("unsupported additional data type {type_name} for key '{key}'")]
    UnsupportedAdditionalDataType { key: String, type_name: &'static str },

    #[error("the node does not hold an object")]
    NotAnObject,

    #[error("the node does not hold an array")]
    NotAnArray,

    #[error("expected content type {expected}, got {actual}")]
    ContentType { expected: &'static str, actual: String },

    #[error("no factory registered for content type {0}")]
    UnregisteredContentType(String),

    /// Raised by model code or lifecycle hooks.
    #[error("{0}")]
    Model(String),
}

impl Error {
    pub fn model(message: impl Into<String>) -> Self {
        Error::Model(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
