use std::path::Path;

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use x509_cert::Certificate;
use x509_cert::der::{DecodePem, Encode};

use crate::core::{CERTIFICATE_FILE, PRIVATE_KEY_FILE, QrError};

/// A private key and its certificate, loaded for one generation call.
///
/// Nothing here is cached; load it again on the next call so rotated keys
/// are picked up.
pub struct SigningMaterial {
    private_key: RsaPrivateKey,
    certificate_der: Vec<u8>,
}

impl std::fmt::Debug for SigningMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningMaterial")
            .field("certificate_der_len", &self.certificate_der.len())
            .finish_non_exhaustive()
    }
}

impl SigningMaterial {
    /// Read `private_key.pem` and `certificate.pem` from `dir`.
    pub fn load(dir: &Path) -> Result<Self, QrError> {
        let key_pem = read_pem(&dir.join(PRIVATE_KEY_FILE))?;
        let cert_pem = read_pem(&dir.join(CERTIFICATE_FILE))?;
        Self::from_pem(&key_pem, &cert_pem)
    }

    /// Parse in-memory PEM material.
    ///
    /// The key may be PKCS#8 (`BEGIN PRIVATE KEY`) or PKCS#1
    /// (`BEGIN RSA PRIVATE KEY`). The certificate must carry the key's
    /// public half.
    pub fn from_pem(private_key_pem: &str, certificate_pem: &str) -> Result<Self, QrError> {
        let private_key = parse_private_key(private_key_pem)?;

        let certificate = Certificate::from_pem(certificate_pem.as_bytes()).map_err(|e| {
            QrError::SigningMaterialUnavailable(format!("certificate parse error: {e}"))
        })?;
        let certificate_der = certificate.to_der().map_err(|e| {
            QrError::SigningMaterialUnavailable(format!("certificate DER encoding error: {e}"))
        })?;

        let cert_key = certificate_public_key(&certificate)?;
        if cert_key != private_key.to_public_key() {
            return Err(QrError::SigningMaterialUnavailable(
                "certificate public key does not match private key".into(),
            ));
        }

        Ok(Self {
            private_key,
            certificate_der,
        })
    }

    pub(crate) fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// Certificate in DER form.
    pub fn certificate_der(&self) -> &[u8] {
        &self.certificate_der
    }
}

fn read_pem(path: &Path) -> Result<String, QrError> {
    std::fs::read_to_string(path).map_err(|e| {
        QrError::SigningMaterialUnavailable(format!("failed to read {}: {e}", path.display()))
    })
}

fn parse_private_key(pem: &str) -> Result<RsaPrivateKey, QrError> {
    match RsaPrivateKey::from_pkcs8_pem(pem) {
        Ok(key) => Ok(key),
        Err(pkcs8_err) => RsaPrivateKey::from_pkcs1_pem(pem).map_err(|pkcs1_err| {
            QrError::SigningMaterialUnavailable(format!(
                "private key parse error (pkcs8: {pkcs8_err}; pkcs1: {pkcs1_err})"
            ))
        }),
    }
}

/// RSA public key carried by a certificate.
pub(crate) fn certificate_public_key(certificate: &Certificate) -> Result<RsaPublicKey, QrError> {
    let spki_der = certificate
        .tbs_certificate
        .subject_public_key_info
        .to_der()
        .map_err(|e| {
            QrError::SigningMaterialUnavailable(format!("public key DER encoding error: {e}"))
        })?;
    RsaPublicKey::from_public_key_der(&spki_der).map_err(|e| {
        QrError::SigningMaterialUnavailable(format!("certificate key is not RSA: {e}"))
    })
}
