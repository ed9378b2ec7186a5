//! End-to-end QR generation with the unsigned fallback.
//!
//! Generation favours availability over integrity: when the signing material
//! is missing or unusable, or the signed payload would not fit one QR symbol,
//! it logs a warning and emits the unsigned Phase 1 payload, so an invoice
//! always gets a displayable QR code. The produced
//! [`SigningMode`] travels with the output; callers that must only embed
//! signed codes have to check it.
//!
//! # Example
//!
//! ```no_run
//! use chrono::DateTime;
//! use einvoice_qr::core::*;
//! use einvoice_qr::pipeline::QrGenerator;
//! use rust_decimal_macros::dec;
//!
//! let config = QrConfig::new(SellerIdentity::new("Acme Trading Co", "300000000000003"))
//!     .with_signing_dir("/etc/einvoice/signing");
//! let generator = QrGenerator::new(config).unwrap();
//!
//! let facts = InvoiceFactsBuilder::new(
//!     "42",
//!     "INV-0001",
//!     DateTime::parse_from_rfc3339("2024-01-01T10:00:00+03:00").unwrap(),
//! )
//! .grand_total(dec!(115.00))
//! .vat_total(dec!(15.00))
//! .build()
//! .unwrap();
//!
//! let qr = generator.generate(&facts).unwrap();
//! if !qr.mode.is_signed() {
//!     eprintln!("QR code is unsigned");
//! }
//! ```

use std::path::Path;

use crate::core::{
    GeneratedPayload, InvoiceFacts, QrConfig, QrError, QrImage, RandomUuid, SellerIdentity,
    SigningMode, TlvPayload, UuidProvider, build_phase1, build_phase2,
};
use crate::{render, signing};

/// Build the final payload, signed when possible.
///
/// Only a Phase 1 encoding failure is returned as an error; every failure on
/// the signing path falls back to the unsigned Phase 1 payload. A signed
/// payload too large for one QR symbol counts as a signing-path failure.
pub fn generate_payload(
    facts: &InvoiceFacts,
    seller: &SellerIdentity,
    signing_dir: Option<&Path>,
    uuids: &dyn UuidProvider,
) -> Result<GeneratedPayload, QrError> {
    match signed_payload(facts, seller, signing_dir, uuids) {
        Ok(signed) => {
            log::debug!(
                "invoice {}: signed {:?} QR payload ({} bytes)",
                facts.id,
                SigningMode::Signed.phase(),
                signed.as_bytes().len()
            );
            Ok(GeneratedPayload {
                bytes: signed.into_bytes(),
                mode: SigningMode::Signed,
            })
        }
        Err(err) => {
            log::warn!(
                "invoice {}: falling back to unsigned Phase 1 QR payload: {err}",
                facts.id
            );
            let unsigned = build_phase1(facts, seller)?;
            Ok(GeneratedPayload {
                bytes: unsigned.into_bytes(),
                mode: SigningMode::FallbackUnsigned,
            })
        }
    }
}

fn signed_payload(
    facts: &InvoiceFacts,
    seller: &SellerIdentity,
    signing_dir: Option<&Path>,
    uuids: &dyn UuidProvider,
) -> Result<TlvPayload, QrError> {
    let phase2 = build_phase2(facts, seller, uuids)?;
    let dir = signing_dir.ok_or_else(|| {
        QrError::SigningMaterialUnavailable("no signing directory configured".into())
    })?;
    let material = signing::SigningMaterial::load(dir)?;
    let signed = signing::sign_payload(phase2, &material)?;
    if !render::fits_symbol(signed.as_bytes()) {
        return Err(QrError::Render(format!(
            "signed payload of {} bytes exceeds the capacity of one QR symbol",
            signed.as_bytes().len()
        )));
    }
    Ok(signed)
}

/// Configured QR generator.
///
/// Holds only read-only configuration and is safe to share across threads.
pub struct QrGenerator {
    config: QrConfig,
    uuids: Box<dyn UuidProvider>,
}

impl std::fmt::Debug for QrGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QrGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl QrGenerator {
    /// Validate `config` and build a generator with random UUIDs.
    pub fn new(config: QrConfig) -> Result<Self, QrError> {
        config.validate()?;
        Ok(Self {
            config,
            uuids: Box::new(RandomUuid),
        })
    }

    /// Replace the UUID source used for invoices without a UUID.
    pub fn with_uuid_provider(mut self, uuids: impl UuidProvider + 'static) -> Self {
        self.uuids = Box::new(uuids);
        self
    }

    pub fn config(&self) -> &QrConfig {
        &self.config
    }

    pub fn generate_payload(&self, facts: &InvoiceFacts) -> Result<GeneratedPayload, QrError> {
        generate_payload(
            facts,
            self.config.seller(),
            self.config.signing_dir(),
            self.uuids.as_ref(),
        )
    }

    /// Generate and render the QR code for `facts`.
    pub fn generate(&self, facts: &InvoiceFacts) -> Result<QrImage, QrError> {
        let payload = self.generate_payload(facts)?;
        let data_uri = render::render(&payload.bytes)?;
        Ok(QrImage {
            data_uri,
            mode: payload.mode,
        })
    }
}
