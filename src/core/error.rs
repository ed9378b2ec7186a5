use thiserror::Error;

/// Errors that can occur while building, signing, or rendering a QR payload.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QrError {
    /// A field value does not fit the single-byte TLV length.
    #[error("TLV field {tag} exceeds 255 bytes (len={len})")]
    Encoding { tag: u8, len: usize },

    /// A tag was pushed twice into one payload.
    #[error("TLV tag {0} already present in payload")]
    DuplicateTag(u8),

    /// Malformed TLV input.
    #[error("TLV decode error: {0}")]
    Decode(String),

    /// Private key or certificate missing, unreadable, or unparseable.
    #[error("signing material unavailable: {0}")]
    SigningMaterialUnavailable(String),

    /// The signing primitive itself failed.
    #[error("signing error: {0}")]
    Signing(String),

    /// A signed payload did not verify against its certificate.
    #[error("signature verification failed: {0}")]
    Verification(String),

    /// QR rasterisation or PNG encoding failed.
    #[error("QR render error: {0}")]
    Render(String),

    /// Configuration could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),

    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),
}

/// A single validation error with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "seller.vat_number").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Fold a list of validation errors into one [`QrError::Validation`].
pub(crate) fn validation_result(errors: Vec<ValidationError>) -> Result<(), QrError> {
    if errors.is_empty() {
        return Ok(());
    }
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(QrError::Validation(joined))
}
