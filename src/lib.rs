//! # SakeNN
//!
//! Recommends sake products similar to a chosen one, by nearest-neighbour
//! search over two taste-balance scores: `Amakara` (sweet to dry) and
//! `Notan` (light to rich).
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! sakenn recommend --catalog sake.csv --id 42 -k 10
//! sakenn hot --catalog sake.csv
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use sakenn::prelude::*;
//! use std::sync::Arc;
//!
//! let source: Arc<dyn CatalogSource> = Arc::new(CsvCatalogSource::new("sake.csv", "index"));
//! let recommender = Recommender::new(source, RecommenderConfig::default()).unwrap();
//!
//! for rec in recommender.recommend(&ItemId::Integer(42)).unwrap() {
//!     println!("{:.4} {}", rec.distance, rec.item.id);
//! }
//! ```
//!
//! ## Crate Structure
//!
//! - [`sakenn-core`](sakenn_core) - Catalog model, distance metrics, the similarity index
//! - [`sakenn-storage`](sakenn_storage) - JSON and CSV catalog sources
//! - this crate - configuration, the [`Recommender`] service and the `sakenn` binary

pub mod config;
pub mod recommender;

pub use config::RecommenderConfig;
pub use recommender::{Recommendation, Recommender};

// Re-export core types
pub use sakenn_core::{
    sake, Catalog, Distance, Error, Item, ItemId, Neighbor, QueryParams, Result, Sake,
    SimilarityIndex, Vector, ZeroVectorPolicy,
};

// Re-export storage
pub use sakenn_storage::{open_source, CatalogSource, CsvCatalogSource, JsonCatalogSource, MemorySource};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, CatalogSource, CsvCatalogSource, Distance, Error, Item, ItemId,
        JsonCatalogSource, MemorySource, Neighbor, QueryParams, Recommendation, Recommender,
        RecommenderConfig, Result, Sake, SimilarityIndex, ZeroVectorPolicy,
    };
}
