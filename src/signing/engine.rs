use base64ct::{Base64, Encoding};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use sha2::Sha256;
use x509_cert::Certificate;
use x509_cert::der::Decode;

use super::material::{SigningMaterial, certificate_public_key};
use crate::core::tlv::{self, TlvField, TlvPayload};
use crate::core::{QrError, tags};

/// RSA PKCS#1 v1.5 / SHA-256 signature over `payload`, as base64 text.
pub fn sign(payload: &[u8], material: &SigningMaterial) -> Result<String, QrError> {
    let signing_key = SigningKey::<Sha256>::new(material.private_key().clone());
    let signature = signing_key
        .try_sign(payload)
        .map_err(|e| QrError::Signing(format!("failed to sign payload: {e}")))?;
    Ok(Base64::encode_string(&signature.to_bytes()))
}

/// Sign a Phase 2 payload and append the signature (tag 10) and the base64
/// DER certificate (tag 11).
///
/// Both values are longer than one record allows and are written as
/// continuation records.
pub fn sign_payload(
    phase2: TlvPayload,
    material: &SigningMaterial,
) -> Result<TlvPayload, QrError> {
    let signature = sign(phase2.as_bytes(), material)?;
    let certificate = Base64::encode_string(material.certificate_der());

    let mut signed = phase2;
    signed.push_chunked(tags::SIGNATURE, signature.as_bytes())?;
    signed.push_chunked(tags::CERTIFICATE, certificate.as_bytes())?;
    Ok(signed)
}

/// Verify a signed payload against the certificate it carries.
///
/// The signed bytes are everything before the first signature record.
pub fn verify_signed_payload(bytes: &[u8]) -> Result<(), QrError> {
    let records = tlv::decode_records(bytes)?;
    let mut offset = 0usize;
    for record in &records {
        if record.tag == tags::SIGNATURE {
            break;
        }
        offset += 2 + record.value.len();
    }
    if offset == bytes.len() {
        return Err(QrError::Verification("payload carries no signature".into()));
    }
    let signed_part = &bytes[..offset];

    let fields = tlv::decode(&bytes[offset..])?;
    let signature_bytes = Base64::decode_vec(field_text(&fields, tags::SIGNATURE)?)
        .map_err(|e| QrError::Verification(format!("signature is not base64: {e}")))?;
    let certificate_der = Base64::decode_vec(field_text(&fields, tags::CERTIFICATE)?)
        .map_err(|e| QrError::Verification(format!("certificate is not base64: {e}")))?;

    let certificate = Certificate::from_der(&certificate_der)
        .map_err(|e| QrError::Verification(format!("certificate parse error: {e}")))?;
    let public_key = certificate_public_key(&certificate)
        .map_err(|e| QrError::Verification(e.to_string()))?;

    let signature = Signature::try_from(signature_bytes.as_slice())
        .map_err(|e| QrError::Verification(format!("malformed signature: {e}")))?;
    VerifyingKey::<Sha256>::new(public_key)
        .verify(signed_part, &signature)
        .map_err(|e| QrError::Verification(e.to_string()))
}

fn field_text(fields: &[TlvField], tag: u8) -> Result<&str, QrError> {
    fields
        .iter()
        .find(|f| f.tag == tag)
        .and_then(|f| f.value_str())
        .ok_or_else(|| QrError::Verification(format!("missing or non-UTF-8 tag {tag}")))
}
