//! # stockr - Stock-Photo Provider Client
//!
//! Thin client over a hosted stock-photo API (Unsplash wire format) that
//! normalizes the provider's JSON into one image record type.
//!
//! ## Key Features
//! - Listing and search endpoints behind one paginated call
//! - Flat-array and `{ "results": [...] }` payloads normalized to `ImageRecord`
//! - Typed errors, with lenient wrappers that log and return empty
//! - Static category and suggestion catalog
//! - `ImageSource` seam for alternative or in-memory providers

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod record;

// Re-export main types for easy use
pub use catalog::{categories, suggest};
pub use client::{ImageSource, StockClient};
pub use config::ProviderConfig;
pub use error::{ProviderError, ProviderResult};
pub use record::{Author, ImageRecord, ImageUrls};
