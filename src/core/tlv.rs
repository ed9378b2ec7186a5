//! Tag-length-value codec for QR payloads.
//!
//! A record is one tag byte, one length byte, then that many value bytes.
//! The length byte caps a record at 255 value bytes. Values that cannot fit
//! (signatures, certificates) are written as continuation records: the same
//! tag repeated on consecutive records, each carrying the next slice.
//! [`decode`] joins such runs back into one logical field.

use serde::{Deserialize, Serialize};

use super::error::QrError;

/// Largest value a single record can carry.
pub const MAX_VALUE_LEN: usize = u8::MAX as usize;

/// One logical TLV field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlvField {
    pub tag: u8,
    pub value: Vec<u8>,
}

impl TlvField {
    /// Value as UTF-8 text, if it is valid UTF-8.
    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.value).ok()
    }
}

/// Encode a text value as a single record.
pub fn encode(tag: u8, value: &str) -> Result<Vec<u8>, QrError> {
    encode_bytes(tag, value.as_bytes())
}

/// Encode raw bytes as a single record.
///
/// Fails with [`QrError::Encoding`] when `value` is longer than
/// [`MAX_VALUE_LEN`]; the value is never truncated.
pub fn encode_bytes(tag: u8, value: &[u8]) -> Result<Vec<u8>, QrError> {
    let mut out = Vec::with_capacity(value.len() + 2);
    write_record(&mut out, tag, value)?;
    Ok(out)
}

/// Encode a value of any length as one or more records sharing `tag`.
///
/// An empty value still produces one zero-length record.
pub fn encode_chunked(tag: u8, value: &[u8]) -> Vec<u8> {
    let records = value.len().div_ceil(MAX_VALUE_LEN).max(1);
    let mut out = Vec::with_capacity(value.len() + 2 * records);
    write_chunked(&mut out, tag, value);
    out
}

fn write_record(out: &mut Vec<u8>, tag: u8, value: &[u8]) -> Result<(), QrError> {
    let len = u8::try_from(value.len()).map_err(|_| QrError::Encoding {
        tag,
        len: value.len(),
    })?;
    out.push(tag);
    out.push(len);
    out.extend_from_slice(value);
    Ok(())
}

fn write_chunked(out: &mut Vec<u8>, tag: u8, value: &[u8]) {
    if value.is_empty() {
        out.push(tag);
        out.push(0);
        return;
    }
    for chunk in value.chunks(MAX_VALUE_LEN) {
        out.push(tag);
        // chunks() never yields more than MAX_VALUE_LEN bytes
        out.push(chunk.len() as u8);
        out.extend_from_slice(chunk);
    }
}

/// Read raw records without joining continuations.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<TlvField>, QrError> {
    let mut records = Vec::new();
    let mut idx = 0;
    while idx < bytes.len() {
        let tag = bytes[idx];
        let len = *bytes
            .get(idx + 1)
            .ok_or_else(|| QrError::Decode(format!("missing length byte for tag {tag} at offset {idx}")))?
            as usize;
        let start = idx + 2;
        let end = start + len;
        let value = bytes.get(start..end).ok_or_else(|| {
            QrError::Decode(format!(
                "tag {tag} declares {len} bytes but only {} remain",
                bytes.len() - start
            ))
        })?;
        records.push(TlvField {
            tag,
            value: value.to_vec(),
        });
        idx = end;
    }
    Ok(records)
}

/// Read logical fields: consecutive records with the same tag are joined.
pub fn decode(bytes: &[u8]) -> Result<Vec<TlvField>, QrError> {
    let mut fields: Vec<TlvField> = Vec::new();
    for record in decode_records(bytes)? {
        match fields.last_mut() {
            Some(last) if last.tag == record.tag => last.value.extend_from_slice(&record.value),
            _ => fields.push(record),
        }
    }
    Ok(fields)
}

/// Append-only payload builder with unique tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlvPayload {
    bytes: Vec<u8>,
    fields: Vec<TlvField>,
}

impl TlvPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, tag: u8, value: &str) -> Result<(), QrError> {
        self.push_bytes(tag, value.as_bytes())
    }

    /// Append a single record. Rejects values over [`MAX_VALUE_LEN`].
    pub fn push_bytes(&mut self, tag: u8, value: &[u8]) -> Result<(), QrError> {
        self.check_tag(tag)?;
        write_record(&mut self.bytes, tag, value)?;
        self.fields.push(TlvField {
            tag,
            value: value.to_vec(),
        });
        Ok(())
    }

    /// Append a value of any length using continuation records.
    pub fn push_chunked(&mut self, tag: u8, value: &[u8]) -> Result<(), QrError> {
        self.check_tag(tag)?;
        write_chunked(&mut self.bytes, tag, value);
        self.fields.push(TlvField {
            tag,
            value: value.to_vec(),
        });
        Ok(())
    }

    fn check_tag(&self, tag: u8) -> Result<(), QrError> {
        if self.fields.iter().any(|f| f.tag == tag) {
            return Err(QrError::DuplicateTag(tag));
        }
        Ok(())
    }

    pub fn fields(&self) -> &[TlvField] {
        &self.fields
    }

    pub fn tags(&self) -> Vec<u8> {
        self.fields.iter().map(|f| f.tag).collect()
    }

    pub fn field(&self, tag: u8) -> Option<&TlvField> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
