#![cfg(feature = "signing")]

use std::path::{Path, PathBuf};

use base64ct::{Base64, Encoding};
use chrono::DateTime;
use einvoice_qr::core::tlv;
use einvoice_qr::core::*;
use einvoice_qr::signing::*;
use rsa::RsaPublicKey;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use rust_decimal_macros::dec;
use sha2::Sha256;
use uuid::Uuid;
use x509_cert::Certificate;
use x509_cert::der::{Decode, Encode};

fn fixtures(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn seller() -> SellerIdentity {
    SellerIdentity::new("Acme Trading Co", "300000000000003")
}

fn phase2() -> TlvPayload {
    let facts = InvoiceFactsBuilder::new(
        "42",
        "INV-0001",
        DateTime::parse_from_rfc3339("2024-01-01T10:00:00+03:00").unwrap(),
    )
    .grand_total(dec!(115.00))
    .vat_total(dec!(15.00))
    .build()
    .unwrap();
    let uuid = Uuid::parse_str("8e6000cf-1a98-4174-b3e7-b5d5954bc10d").unwrap();
    build_phase2(&facts, &seller(), &FixedUuid(uuid)).unwrap()
}

// --- Loading ---

#[test]
fn loads_pkcs8_material() {
    let material = SigningMaterial::load(&fixtures("signing")).unwrap();
    assert!(!material.certificate_der().is_empty());
}

#[test]
fn loads_pkcs1_material() {
    let pkcs8 = SigningMaterial::load(&fixtures("signing")).unwrap();
    let pkcs1 = SigningMaterial::load(&fixtures("signing-pkcs1")).unwrap();
    // same key, PKCS#1 v1.5 is deterministic
    assert_eq!(sign(b"x", &pkcs8).unwrap(), sign(b"x", &pkcs1).unwrap());
}

#[test]
fn missing_directory_is_unavailable() {
    let err = SigningMaterial::load(&fixtures("does-not-exist")).unwrap_err();
    assert!(matches!(err, QrError::SigningMaterialUnavailable(_)));
}

#[test]
fn corrupt_key_is_unavailable() {
    let err = SigningMaterial::load(&fixtures("signing-corrupt")).unwrap_err();
    assert!(matches!(err, QrError::SigningMaterialUnavailable(_)));
}

#[test]
fn garbage_certificate_is_unavailable() {
    let key = std::fs::read_to_string(fixtures("signing").join(PRIVATE_KEY_FILE)).unwrap();
    let err = SigningMaterial::from_pem(&key, "not a certificate").unwrap_err();
    assert!(matches!(err, QrError::SigningMaterialUnavailable(_)));
}

// --- Signing ---

#[test]
fn signed_payload_has_ten_fields() {
    let material = SigningMaterial::load(&fixtures("signing")).unwrap();
    let signed = sign_payload(phase2(), &material).unwrap();

    let fields = tlv::decode(signed.as_bytes()).unwrap();
    let tags: Vec<u8> = fields.iter().map(|f| f.tag).collect();
    assert_eq!(tags, vec![1, 2, 3, 4, 5, 6, 7, 8, 10, 11]);
    assert_eq!(fields, signed.fields());
}

#[test]
fn every_record_fits_a_single_length_byte() {
    let material = SigningMaterial::load(&fixtures("signing")).unwrap();
    let signed = sign_payload(phase2(), &material).unwrap();
    let records = tlv::decode_records(signed.as_bytes()).unwrap();
    assert!(records.len() > 10, "signature and certificate span several records");
    assert!(records.iter().all(|r| r.value.len() <= tlv::MAX_VALUE_LEN));
}

#[test]
fn signature_verifies_against_certificate_key() {
    let material = SigningMaterial::load(&fixtures("signing")).unwrap();
    let unsigned = phase2();
    let phase2_bytes = unsigned.as_bytes().to_vec();
    let signed = sign_payload(unsigned, &material).unwrap();

    let fields = tlv::decode(signed.as_bytes()).unwrap();
    let signature_b64 = fields[8].value_str().unwrap();
    let cert_b64 = fields[9].value_str().unwrap();

    let cert_der = Base64::decode_vec(cert_b64).unwrap();
    assert_eq!(cert_der, material.certificate_der());
    let cert = Certificate::from_der(&cert_der).unwrap();
    let spki = cert.tbs_certificate.subject_public_key_info.to_der().unwrap();
    let public_key = RsaPublicKey::from_public_key_der(&spki).unwrap();

    let signature = Signature::try_from(Base64::decode_vec(signature_b64).unwrap().as_slice()).unwrap();
    VerifyingKey::<Sha256>::new(public_key)
        .verify(&phase2_bytes, &signature)
        .unwrap();

    verify_signed_payload(signed.as_bytes()).unwrap();
}

#[test]
fn signing_does_not_touch_phase2_bytes() {
    let material = SigningMaterial::load(&fixtures("signing")).unwrap();
    let unsigned = phase2();
    let before = unsigned.as_bytes().to_vec();
    let signed = sign_payload(unsigned, &material).unwrap();
    assert_eq!(&signed.as_bytes()[..before.len()], before.as_slice());
}

#[test]
fn payload_that_already_has_a_signature_tag_is_rejected() {
    let material = SigningMaterial::load(&fixtures("signing")).unwrap();
    let once = sign_payload(phase2(), &material).unwrap();
    assert!(matches!(
        sign_payload(once, &material),
        Err(QrError::DuplicateTag(10))
    ));
}
