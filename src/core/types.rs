use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The invoice facts a QR code is generated from.
///
/// Produced by the surrounding invoicing system; numbering, VAT computation
/// and persistence happen before this value exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceFacts {
    /// Internal invoice identifier.
    pub id: String,
    /// Creation timestamp, with the offset it was recorded in.
    pub created_at: DateTime<FixedOffset>,
    /// Invoice number printed on the document (tag 8).
    pub number: String,
    /// Externally assigned UUID (tag 6). Synthesised when absent.
    pub uuid: Option<Uuid>,
    /// Standard or simplified invoice (tag 7).
    pub kind: InvoiceKind,
    /// Invoice total including VAT (tag 4).
    pub grand_total: Option<Decimal>,
    /// Total VAT amount (tag 5).
    pub vat_total: Option<Decimal>,
}

/// Invoice kind as carried in the simplified-invoice flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvoiceKind {
    /// B2B tax invoice.
    Standard,
    /// B2C simplified tax invoice.
    #[default]
    Simplified,
}

impl InvoiceKind {
    /// Flag value emitted in tag 7.
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Standard => "0",
            Self::Simplified => "1",
        }
    }
}

/// Legal seller identity. Deployment configuration, passed explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerIdentity {
    /// Registered legal name (tag 1).
    pub name: String,
    /// VAT registration number (tag 2).
    pub vat_number: String,
}

impl SellerIdentity {
    pub fn new(name: impl Into<String>, vat_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vat_number: vat_number.into(),
        }
    }
}

/// Which payload shape was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Tags 1-5.
    Phase1,
    /// Tags 1-8.
    Phase2,
}

impl Phase {
    /// Tags in emission order.
    pub fn tags(&self) -> &'static [u8] {
        match self {
            Self::Phase1 => &[1, 2, 3, 4, 5],
            Self::Phase2 => &[1, 2, 3, 4, 5, 6, 7, 8],
        }
    }
}

/// Whether the final payload carries a signature.
///
/// Generation prefers availability: when signing material is missing the
/// unsigned Phase 1 payload is emitted instead. Callers that may only embed
/// compliant codes must check for [`SigningMode::Signed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SigningMode {
    /// Phase 2 payload with signature (tag 10) and certificate (tag 11).
    Signed,
    /// Unsigned Phase 1 payload.
    FallbackUnsigned,
}

impl SigningMode {
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed)
    }

    /// Payload phase the leading fields follow. A signed payload is Phase 2
    /// followed by tags 10 and 11.
    pub fn phase(&self) -> Phase {
        match self {
            Self::Signed => Phase::Phase2,
            Self::FallbackUnsigned => Phase::Phase1,
        }
    }
}

/// A finished TLV payload and the mode that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPayload {
    /// Exact bytes handed to the renderer.
    pub bytes: Vec<u8>,
    pub mode: SigningMode,
}

impl GeneratedPayload {
    pub fn phase(&self) -> Phase {
        self.mode.phase()
    }
}

/// A rendered QR code ready to embed in an invoice document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    /// `data:image/png;base64,...`
    pub data_uri: String,
    pub mode: SigningMode,
}
