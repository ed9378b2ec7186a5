//! Core types, TLV codec, payload assembly, and configuration.
//!
//! Everything here is pure: no I/O apart from reading a config file, and no
//! cryptography.

mod builder;
mod config;
mod error;
pub mod payload;
pub mod tlv;
mod types;
mod validation;

pub use builder::*;
pub use config::*;
pub use error::*;
pub use payload::{FixedUuid, RandomUuid, UuidProvider, build_phase1, build_phase2, tags};
pub use tlv::{TlvField, TlvPayload};
pub use types::*;
pub use validation::*;
