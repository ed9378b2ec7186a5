use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::error::{QrError, validation_result};
use super::types::*;
use super::validation;

/// Builder for [`InvoiceFacts`].
///
/// ```
/// use chrono::DateTime;
/// use einvoice_qr::core::*;
/// use rust_decimal_macros::dec;
///
/// let facts = InvoiceFactsBuilder::new(
///     "42",
///     "INV-0001",
///     DateTime::parse_from_rfc3339("2024-01-01T10:00:00+03:00").unwrap(),
/// )
/// .grand_total(dec!(115.00))
/// .vat_total(dec!(15.00))
/// .build()
/// .unwrap();
///
/// assert_eq!(facts.kind, InvoiceKind::Simplified);
/// ```
pub struct InvoiceFactsBuilder {
    id: String,
    number: String,
    created_at: DateTime<FixedOffset>,
    uuid: Option<Uuid>,
    kind: InvoiceKind,
    grand_total: Option<Decimal>,
    vat_total: Option<Decimal>,
}

impl InvoiceFactsBuilder {
    pub fn new(
        id: impl Into<String>,
        number: impl Into<String>,
        created_at: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            id: id.into(),
            number: number.into(),
            created_at,
            uuid: None,
            kind: InvoiceKind::default(),
            grand_total: None,
            vat_total: None,
        }
    }

    pub fn uuid(mut self, uuid: Uuid) -> Self {
        self.uuid = Some(uuid);
        self
    }

    pub fn kind(mut self, kind: InvoiceKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn grand_total(mut self, amount: Decimal) -> Self {
        self.grand_total = Some(amount);
        self
    }

    pub fn vat_total(mut self, amount: Decimal) -> Self {
        self.vat_total = Some(amount);
        self
    }

    /// Build and validate the facts.
    pub fn build(self) -> Result<InvoiceFacts, QrError> {
        let facts = InvoiceFacts {
            id: self.id,
            created_at: self.created_at,
            number: self.number,
            uuid: self.uuid,
            kind: self.kind,
            grand_total: self.grand_total,
            vat_total: self.vat_total,
        };
        validation_result(validation::validate_facts(&facts))?;
        Ok(facts)
    }
}
