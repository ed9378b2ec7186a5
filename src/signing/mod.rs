//! RSA-SHA256 signing of Phase 2 payloads.
//!
//! Signing material is read from disk on every call and dropped afterwards.
//! Any problem with it surfaces as
//! [`QrError::SigningMaterialUnavailable`](crate::core::QrError::SigningMaterialUnavailable),
//! which generation treats as the trigger for the unsigned fallback.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use einvoice_qr::core::*;
//! use einvoice_qr::signing::{SigningMaterial, sign_payload, verify_signed_payload};
//!
//! # fn run(facts: &InvoiceFacts, seller: &SellerIdentity) -> Result<(), QrError> {
//! let material = SigningMaterial::load(Path::new("/etc/einvoice/signing"))?;
//! let signed = sign_payload(build_phase2(facts, seller, &RandomUuid)?, &material)?;
//! verify_signed_payload(signed.as_bytes())?;
//! # Ok(())
//! # }
//! ```

mod engine;
mod material;

pub use engine::{sign, sign_payload, verify_signed_payload};
pub use material::SigningMaterial;
