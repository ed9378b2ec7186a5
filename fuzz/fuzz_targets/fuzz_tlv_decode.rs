#![no_main]

use einvoice_qr::core::tlv;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must not panic; errors are fine, panics are bugs.
    if let Ok(fields) = tlv::decode(data) {
        let mut out = Vec::new();
        for field in &fields {
            out.extend(tlv::encode_chunked(field.tag, &field.value));
        }
        assert_eq!(tlv::decode(&out).ok(), Some(fields));
    }
});
