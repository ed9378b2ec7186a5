#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must not panic on arbitrary payloads.
    let _ = einvoice_qr::signing::verify_signed_payload(data);
});
