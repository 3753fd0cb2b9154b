//! # SakeNN Storage
//!
//! Catalog sources. Each source reads a whole catalog snapshot that the
//! similarity index is then built over.

pub mod csv_source;
pub mod json_source;
pub mod source;

pub use csv_source::CsvCatalogSource;
pub use json_source::JsonCatalogSource;
pub use source::{open_source, CatalogSource, MemorySource};
