//! Deployment configuration.
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::error::{QrError, validation_result};
use super::types::SellerIdentity;
use super::validation::validate_seller;

/// File name of the PEM private key inside the signing directory.
pub const PRIVATE_KEY_FILE: &str = "private_key.pem";
/// File name of the PEM certificate inside the signing directory.
pub const CERTIFICATE_FILE: &str = "certificate.pem";

/// Configuration for QR generation.
///
/// # Examples
/// ```rust
/// use einvoice_qr::core::QrConfig;
///
/// let config = QrConfig::from_json_str(r#"{
///     "seller": { "name": "Acme Trading Co", "vat_number": "300000000000003" },
///     "signing_dir": "/etc/einvoice/signing"
/// }"#)?;
/// assert!(config.signing_dir().is_some());
/// # Ok::<(), einvoice_qr::core::QrError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrConfig {
    seller: SellerIdentity,
    /// Directory holding [`PRIVATE_KEY_FILE`] and [`CERTIFICATE_FILE`].
    /// Without one every payload is generated unsigned.
    #[serde(default)]
    signing_dir: Option<PathBuf>,
}

impl QrConfig {
    pub fn new(seller: SellerIdentity) -> Self {
        Self {
            seller,
            signing_dir: None,
        }
    }

    pub fn with_signing_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.signing_dir = Some(dir.into());
        self
    }

    pub fn seller(&self) -> &SellerIdentity {
        &self.seller
    }

    pub fn signing_dir(&self) -> Option<&Path> {
        self.signing_dir.as_deref()
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, QrError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| QrError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, QrError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| QrError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), QrError> {
        validation_result(validate_seller(&self.seller))
    }
}
