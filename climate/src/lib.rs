//! # Climate - Climate Record Library
//!
//! Schema, validation, and SQLite persistence for climate-data records.
//!
//! ## Features
//!
//! - **Typed Drafts**: Untyped JSON payloads are validated into a typed
//!   [`ClimateDraft`] before anything touches storage
//! - **Per-Field Errors**: Validation collects every failure into a
//!   field-to-messages map instead of stopping at the first one
//! - **Store-Assigned Identifiers**: SQLite assigns record identifiers;
//!   callers never pick their own
//! - **Embedded Storage**: Bundled SQLite, no external database required
//!
//! ## Quick Start
//!
//! ```ignore
//! use climate::{record, ClimateStore};
//!
//! // Validate an untyped payload into a draft
//! let payload = serde_json::json!({"temperature": 25.0, "humidity": 60.0});
//! let draft = record::validate(&payload).expect("valid payload");
//!
//! // Persist it; the store assigns the identifier
//! let store = ClimateStore::open("climate.db")?;
//! let record = store.insert(&draft)?;
//! println!("Created record {}", record.id);
//! ```
//!
//! ## Record Schema
//!
//! A climate record carries:
//!
//! - `temperature`: decimal degrees Celsius (required)
//! - `humidity`: relative humidity percent, 0.0 to 100.0 (required)
//! - `recorded_at`: RFC 3339 timestamp (optional; the store stamps the
//!   insertion time when omitted)
//!
//! Records are created once and never updated or deleted through this
//! library.

pub mod error;
pub mod record;
pub mod store;

// Re-export main types at crate root for convenience
pub use error::{Result, StoreError};
pub use record::{validate, ClimateDraft, ClimateRecord, FieldErrors};
pub use store::ClimateStore;
