#![cfg(feature = "render")]

use base64ct::{Base64, Encoding};
use einvoice_qr::core::QrError;
use einvoice_qr::render::*;
use image::GenericImageView;

const PHASE1_B64: &str = "AQ9BY21lIFRyYWRpbmcgQ28CDzMwMDAwMDAwMDAwMDAwMwMZMjAyNC0wMS0wMVQxMDowMDowMCswMzowMAQGMTE1LjAwBQUxNS4wMA==";

fn phase1_bytes() -> Vec<u8> {
    Base64::decode_vec(PHASE1_B64).unwrap()
}

fn decode_png(uri: &str) -> image::DynamicImage {
    let body = uri.strip_prefix(DATA_URI_PREFIX).unwrap();
    let png = Base64::decode_vec(body).unwrap();
    image::load_from_memory_with_format(&png, image::ImageFormat::Png).unwrap()
}

#[test]
fn symbol_text_is_payload_base64() {
    assert_eq!(symbol_text(&phase1_bytes()), PHASE1_B64);
}

#[test]
fn render_is_deterministic() {
    let payload = phase1_bytes();
    assert_eq!(render(&payload).unwrap(), render(&payload).unwrap());
}

#[test]
fn different_payloads_render_differently() {
    let mut other = phase1_bytes();
    let last = other.len() - 1;
    other[last] = b'1';
    assert_ne!(render(&phase1_bytes()).unwrap(), render(&other).unwrap());
}

#[test]
fn image_is_square_module_grid_without_border() {
    let img = decode_png(&render(&phase1_bytes()).unwrap());
    let (w, h) = img.dimensions();
    assert_eq!(w, h);
    assert_eq!(w % MODULE_PX, 0);
    // 21 + 4 * (version - 1) modules per side
    let modules = w / MODULE_PX;
    assert_eq!((modules - 21) % 4, 0);

    // finder pattern starts at the very corner: no quiet zone
    let gray = img.to_luma8();
    assert_eq!(gray.get_pixel(0, 0).0, [0]);
}

#[test]
fn only_black_and_white_pixels() {
    let gray = decode_png(&render(&phase1_bytes()).unwrap()).to_luma8();
    assert!(gray.pixels().all(|p| p.0 == [0] || p.0 == [255]));
}

#[test]
fn too_large_payload_is_a_render_error() {
    let err = render(&vec![b'x'; 4000]).unwrap_err();
    assert!(matches!(err, QrError::Render(_)));
}

#[test]
fn symbol_capacity_boundary() {
    // 2952 symbol characters: the largest version 40 symbol
    let img = decode_png(&render(&vec![b'x'; 2214]).unwrap());
    assert_eq!(img.width(), 177 * MODULE_PX);

    // 2956 symbol characters
    assert!(matches!(render(&vec![b'x'; 2215]), Err(QrError::Render(_))));
}

#[cfg(feature = "pipeline")]
mod signed {
    use std::path::{Path, PathBuf};

    use base64ct::{Base64, Encoding};
    use chrono::DateTime;
    use einvoice_qr::core::tlv;
    use einvoice_qr::core::*;
    use einvoice_qr::pipeline::QrGenerator;
    use einvoice_qr::render::*;
    use einvoice_qr::signing::{self, SigningMaterial};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn fixtures(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name)
    }

    fn seller() -> SellerIdentity {
        SellerIdentity::new("Acme Trading Co", "300000000000003")
    }

    fn scenario_invoice() -> InvoiceFacts {
        InvoiceFactsBuilder::new(
            "1",
            "INV-0001",
            DateTime::parse_from_rfc3339("2024-01-01T10:00:00+03:00").unwrap(),
        )
        .grand_total(dec!(115.00))
        .vat_total(dec!(15.00))
        .build()
        .unwrap()
    }

    /// Largest certificate DER, in bytes, whose signed scenario payload still
    /// fits one symbol with the key in `fixture`.
    fn largest_certificate(fixture: &str) -> usize {
        let material = SigningMaterial::load(&fixtures(fixture)).unwrap();
        let phase2 = build_phase2(&scenario_invoice(), &seller(), &FixedUuid(Uuid::nil())).unwrap();
        let signature = signing::sign(phase2.as_bytes(), &material).unwrap();
        let mut prefix = phase2.into_bytes();
        prefix.extend(tlv::encode_chunked(tags::SIGNATURE, signature.as_bytes()));

        let signed = |der_len: usize| {
            let cert = Base64::encode_string(&vec![0u8; der_len]);
            let mut bytes = prefix.clone();
            bytes.extend(tlv::encode_chunked(tags::CERTIFICATE, cert.as_bytes()));
            bytes
        };
        let largest = (0..4096)
            .take_while(|&n| fits_symbol(&signed(n)))
            .last()
            .unwrap();

        render(&signed(largest)).unwrap();
        largest
    }

    #[test]
    fn largest_supported_certificate_2048_bit() {
        assert_eq!(largest_certificate("signing"), 1293);
    }

    #[test]
    fn largest_supported_certificate_3072_bit() {
        assert_eq!(largest_certificate("signing-3072"), 1164);
    }

    fn generate_signed(fixture: &str) -> QrImage {
        let config = QrConfig::new(seller()).with_signing_dir(fixtures(fixture));
        let qr = QrGenerator::new(config)
            .unwrap()
            .generate(&scenario_invoice())
            .unwrap();
        assert_eq!(qr.mode, SigningMode::Signed);
        qr
    }

    #[test]
    fn renders_certificate_with_organisation_and_san() {
        // 2048-bit key, O/OU subject, two SANs (1145 DER bytes)
        let qr = generate_signed("signing-san");
        assert!(qr.data_uri.starts_with(DATA_URI_PREFIX));
    }

    #[test]
    fn renders_3072_bit_key() {
        // 1137 DER bytes, 384-byte signature
        let qr = generate_signed("signing-3072");
        assert!(qr.data_uri.starts_with(DATA_URI_PREFIX));
    }
}
