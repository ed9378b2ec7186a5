use chrono::{DateTime, FixedOffset, SecondsFormat};
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use super::error::QrError;
use super::tlv::TlvPayload;
use super::types::{InvoiceFacts, SellerIdentity};

/// Tag numbers of the QR payload fields.
pub mod tags {
    pub const SELLER_NAME: u8 = 1;
    pub const VAT_NUMBER: u8 = 2;
    pub const TIMESTAMP: u8 = 3;
    pub const GRAND_TOTAL: u8 = 4;
    pub const VAT_TOTAL: u8 = 5;
    pub const INVOICE_UUID: u8 = 6;
    pub const SIMPLIFIED_FLAG: u8 = 7;
    pub const INVOICE_NUMBER: u8 = 8;
    pub const SIGNATURE: u8 = 10;
    pub const CERTIFICATE: u8 = 11;
}

/// Source of invoice UUIDs for invoices that do not carry one.
///
/// A random provider gives a different UUID on every call; callers that
/// regenerate QR codes for the same invoice should persist the UUID on the
/// invoice or supply a [`FixedUuid`].
pub trait UuidProvider: Send + Sync {
    fn invoice_uuid(&self, facts: &InvoiceFacts) -> Uuid;
}

/// Random v4 UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomUuid;

impl UuidProvider for RandomUuid {
    fn invoice_uuid(&self, _facts: &InvoiceFacts) -> Uuid {
        Uuid::new_v4()
    }
}

/// Always the same UUID.
#[derive(Debug, Clone, Copy)]
pub struct FixedUuid(pub Uuid);

impl UuidProvider for FixedUuid {
    fn invoice_uuid(&self, _facts: &InvoiceFacts) -> Uuid {
        self.0
    }
}

/// Build the Phase 1 payload: tags 1-5.
pub fn build_phase1(facts: &InvoiceFacts, seller: &SellerIdentity) -> Result<TlvPayload, QrError> {
    let mut tlv = TlvPayload::new();
    tlv.push_str(tags::SELLER_NAME, &seller.name)?;
    tlv.push_str(tags::VAT_NUMBER, &seller.vat_number)?;
    tlv.push_str(tags::TIMESTAMP, &format_timestamp(&facts.created_at))?;
    tlv.push_str(tags::GRAND_TOTAL, &format_amount(facts.grand_total))?;
    tlv.push_str(tags::VAT_TOTAL, &format_amount(facts.vat_total))?;
    Ok(tlv)
}

/// Build the Phase 2 payload: Phase 1, then UUID, simplified flag and
/// invoice number (tags 6-8).
pub fn build_phase2(
    facts: &InvoiceFacts,
    seller: &SellerIdentity,
    uuids: &dyn UuidProvider,
) -> Result<TlvPayload, QrError> {
    let mut tlv = build_phase1(facts, seller)?;
    let uuid = facts.uuid.unwrap_or_else(|| uuids.invoice_uuid(facts));
    tlv.push_str(tags::INVOICE_UUID, &uuid.hyphenated().to_string())?;
    tlv.push_str(tags::SIMPLIFIED_FLAG, facts.kind.flag())?;
    tlv.push_str(tags::INVOICE_NUMBER, &facts.number)?;
    Ok(tlv)
}

/// RFC 3339 with the recorded offset, second precision.
pub fn format_timestamp(at: &DateTime<FixedOffset>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Two fractional digits, half away from zero; missing amounts are `0.00`.
pub fn format_amount(amount: Option<Decimal>) -> String {
    let amount = amount.unwrap_or(Decimal::ZERO);
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.2}")
}
