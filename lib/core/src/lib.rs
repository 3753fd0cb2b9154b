//! # SakeNN Core
//!
//! Core library for SakeNN, nearest-neighbour sake recommendations.
//!
//! This crate provides the data model and the similarity engine:
//!
//! - [`Item`] / [`ItemId`] - A catalog row with named fields
//! - [`Catalog`] - Ordered, id-keyed collection of items
//! - [`Distance`] - Cosine, Euclidean and Manhattan metrics
//! - [`SimilarityIndex`] - Brute-force kNN index over named numeric fields
//! - [`sake`] - The sake record and its popularity ranking
//!
//! ## Example
//!
//! ```rust
//! use sakenn_core::{Catalog, Distance, Item, ItemId, SimilarityIndex};
//!
//! let catalog = Catalog::from_items(vec![
//!     Item::with_features("A", &[("Amakara", 0.0), ("Notan", 1.0)]),
//!     Item::with_features("B", &[("Amakara", 1.0), ("Notan", 0.0)]),
//!     Item::with_features("C", &[("Amakara", 0.0), ("Notan", 1.0)]),
//! ])
//! .unwrap();
//!
//! let index = SimilarityIndex::build(&catalog, &["Amakara", "Notan"]).unwrap();
//! let result = index.query(&ItemId::from("A"), 2, Distance::Cosine).unwrap();
//!
//! assert_eq!(result[0].id, ItemId::from("A"));
//! assert_eq!(result[1].id, ItemId::from("C"));
//! assert_eq!(result[1].distance, 0.0);
//! ```

pub mod catalog;
pub mod distance;
pub mod error;
pub mod index;
pub mod item;
pub mod sake;
pub mod vector;

pub use catalog::Catalog;
pub use distance::{Distance, ZeroVectorPolicy};
pub use error::{Error, Result};
pub use index::{Neighbor, QueryParams, SimilarityIndex, DEFAULT_K};
pub use item::{Item, ItemId};
pub use sake::Sake;
pub use vector::Vector;
