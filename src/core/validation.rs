use super::error::ValidationError;
use super::tlv::MAX_VALUE_LEN;
use super::types::{InvoiceFacts, SellerIdentity};

/// Validate a seller identity before it is used for any payload.
///
/// Both values end up in single TLV records, so each must fit in 255 UTF-8
/// bytes. The VAT registration number is 15 digits, first and last `3`.
pub fn validate_seller(seller: &SellerIdentity) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if seller.name.trim().is_empty() {
        errors.push(ValidationError::new("seller.name", "must not be empty"));
    } else if seller.name.len() > MAX_VALUE_LEN {
        errors.push(ValidationError::new(
            "seller.name",
            format!("exceeds {MAX_VALUE_LEN} bytes (len={})", seller.name.len()),
        ));
    }

    let vat = seller.vat_number.as_str();
    if vat.trim().is_empty() {
        errors.push(ValidationError::new("seller.vat_number", "must not be empty"));
    } else if !is_vat_registration_number(vat) {
        errors.push(ValidationError::new(
            "seller.vat_number",
            "must be 15 digits starting and ending with 3",
        ));
    }

    errors
}

/// Validate invoice facts.
pub fn validate_facts(facts: &InvoiceFacts) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if facts.id.trim().is_empty() {
        errors.push(ValidationError::new("invoice.id", "must not be empty"));
    }
    if facts.number.trim().is_empty() {
        errors.push(ValidationError::new("invoice.number", "must not be empty"));
    } else if facts.number.len() > MAX_VALUE_LEN {
        errors.push(ValidationError::new(
            "invoice.number",
            format!("exceeds {MAX_VALUE_LEN} bytes (len={})", facts.number.len()),
        ));
    }

    errors
}

fn is_vat_registration_number(vat: &str) -> bool {
    vat.len() == 15
        && vat.bytes().all(|b| b.is_ascii_digit())
        && vat.starts_with('3')
        && vat.ends_with('3')
}
