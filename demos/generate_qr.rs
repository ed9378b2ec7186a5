use chrono::DateTime;
use einvoice_qr::core::tlv;
use einvoice_qr::core::*;
use einvoice_qr::pipeline::QrGenerator;
use rust_decimal_macros::dec;

fn main() {
    let signing_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/signing");

    let facts = InvoiceFactsBuilder::new(
        "1",
        "INV-0001",
        DateTime::parse_from_rfc3339("2024-01-01T10:00:00+03:00").unwrap(),
    )
    .grand_total(dec!(115.00))
    .vat_total(dec!(15.00))
    .build()
    .unwrap();

    let seller = SellerIdentity::new("Acme Trading Co", "300000000000003");

    // ── 1. Without signing material ───────────────────────────────────
    println!("=== Unsigned (fallback) ===");
    let generator = QrGenerator::new(QrConfig::new(seller.clone())).unwrap();
    show(&generator, &facts);

    // ── 2. With signing material ──────────────────────────────────────
    println!("\n=== Signed ===");
    let generator =
        QrGenerator::new(QrConfig::new(seller).with_signing_dir(signing_dir)).unwrap();
    show(&generator, &facts);
}

fn show(generator: &QrGenerator, facts: &InvoiceFacts) {
    let payload = match generator.generate_payload(facts) {
        Ok(payload) => payload,
        Err(e) => {
            println!("  Generation failed: {e}");
            return;
        }
    };
    println!("  Mode: {:?}", payload.mode);
    for field in tlv::decode(&payload.bytes).unwrap_or_default() {
        let text = field.value_str().unwrap_or("<binary>");
        let shown: String = text.chars().take(48).collect();
        let ellipsis = if text.chars().count() > 48 { "…" } else { "" };
        println!("  [{:>2}] {shown}{ellipsis}", field.tag);
    }

    match generator.generate(facts) {
        Ok(qr) => println!("  Data URI: {} chars", qr.data_uri.len()),
        Err(e) => println!("  Render failed: {e}"),
    }
}
