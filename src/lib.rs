//! # einvoice-qr
//!
//! Fiscal e-invoice QR codes: TLV payload assembly, RSA-SHA256 signing over
//! certificate material, and PNG rendering with an unsigned fallback.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::DateTime;
//! use einvoice_qr::core::*;
//! use einvoice_qr::pipeline::QrGenerator;
//! use rust_decimal_macros::dec;
//!
//! let seller = SellerIdentity::new("Acme Trading Co", "300000000000003");
//! let generator = QrGenerator::new(QrConfig::new(seller)).unwrap();
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
//! // No signing directory configured: unsigned Phase 1 payload.
//! let qr = generator.generate(&facts).unwrap();
//! assert_eq!(qr.mode, SigningMode::FallbackUnsigned);
//! assert!(qr.data_uri.starts_with("data:image/png;base64,"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Types, TLV codec, Phase 1/2 payloads, configuration |
//! | `signing` | RSA-SHA256 signing and verification |
//! | `render` | QR PNG rendering |
//! | `pipeline` (default) | Signed generation with fallback, `QrGenerator` |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "signing")]
pub mod signing;

#[cfg(feature = "render")]
pub mod render;

#[cfg(feature = "pipeline")]
pub mod pipeline;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
