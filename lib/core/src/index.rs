//! Brute-force k-nearest-neighbour index
//!
//! [`SimilarityIndex::build`] extracts the named numeric fields of every
//! catalog item into a dense row-major matrix. Queries compare the target's
//! row against every row, keep the `k` smallest distances in a bounded
//! max-heap and return them in ascending order. Equal distances keep
//! catalog row order.
//!
//! The index is immutable once built, so any number of threads can query it
//! at the same time without locking.

use crate::vector::is_zero;
use crate::{Catalog, Distance, Error, ItemId, Result, Vector, ZeroVectorPolicy};
use ahash::{AHashMap, AHashSet};
use ordered_float::OrderedFloat;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BinaryHeap;

/// Default number of neighbours returned per query
pub const DEFAULT_K: usize = 10;

/// One entry of a query result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub distance: f64,
    pub id: ItemId,
}

/// Parameters for a single query
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueryParams {
    pub k: usize,
    pub metric: Distance,
    pub zero_vectors: ZeroVectorPolicy,
    /// Drop the target row from its own result set
    pub exclude_self: bool,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            metric: Distance::Cosine,
            zero_vectors: ZeroVectorPolicy::Reject,
            exclude_self: false,
        }
    }
}

impl QueryParams {
    pub fn new(k: usize, metric: Distance) -> Self {
        Self {
            k,
            metric,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_zero_vectors(mut self, zero_vectors: ZeroVectorPolicy) -> Self {
        self.zero_vectors = zero_vectors;
        self
    }

    #[must_use]
    pub fn with_exclude_self(mut self, exclude_self: bool) -> Self {
        self.exclude_self = exclude_self;
        self
    }
}

/// Immutable snapshot of a catalog's feature vectors
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    feature_fields: Vec<String>,
    ids: Vec<ItemId>,
    rows: AHashMap<ItemId, usize>,
    matrix: Vec<f64>,
    dim: usize,
}

impl SimilarityIndex {
    /// Extract `feature_fields` from every item of `catalog`.
    ///
    /// Every field must be present and hold a finite number on every item;
    /// nothing is coerced.
    pub fn build<S: AsRef<str>>(catalog: &Catalog, feature_fields: &[S]) -> Result<Self> {
        if catalog.is_empty() {
            return Err(Error::EmptyCatalog);
        }
        if feature_fields.is_empty() {
            return Err(Error::NoFeatureFields);
        }

        let feature_fields: Vec<String> = feature_fields
            .iter()
            .map(|f| f.as_ref().to_string())
            .collect();
        let mut seen = AHashSet::with_capacity(feature_fields.len());
        for field in &feature_fields {
            if !seen.insert(field.as_str()) {
                return Err(Error::InvalidConfig(format!(
                    "feature field '{}' listed twice",
                    field
                )));
            }
        }

        let dim = feature_fields.len();
        let mut matrix = Vec::with_capacity(catalog.len() * dim);
        let mut ids = Vec::with_capacity(catalog.len());
        let mut rows = AHashMap::with_capacity(catalog.len());

        for (row, item) in catalog.iter().enumerate() {
            for field in &feature_fields {
                let value = match item.get(field) {
                    None | Some(Value::Null) => {
                        return Err(Error::MissingField {
                            id: item.id.to_string(),
                            field: field.clone(),
                        })
                    }
                    Some(value) => value.as_f64().filter(|x| x.is_finite()).ok_or_else(|| {
                        Error::NonNumericField {
                            id: item.id.to_string(),
                            field: field.clone(),
                        }
                    })?,
                };
                matrix.push(value);
            }
            ids.push(item.id.clone());
            rows.insert(item.id.clone(), row);
        }

        Ok(Self {
            feature_fields,
            ids,
            rows,
            matrix,
            dim,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn feature_fields(&self) -> &[String] {
        &self.feature_fields
    }

    /// Ids in row order
    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    #[inline]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.rows.contains_key(id)
    }

    /// Feature vector of an item
    pub fn vector(&self, id: &ItemId) -> Option<Vector> {
        self.rows.get(id).map(|&row| Vector::from_slice(self.row(row)))
    }

    #[inline]
    fn row(&self, row: usize) -> &[f64] {
        &self.matrix[row * self.dim..(row + 1) * self.dim]
    }

    /// The `k` nearest items to `target` under `metric`, default policies otherwise
    pub fn query(&self, target: &ItemId, k: usize, metric: Distance) -> Result<Vec<Neighbor>> {
        self.query_with(target, &QueryParams::new(k, metric))
    }

    pub fn query_with(&self, target: &ItemId, params: &QueryParams) -> Result<Vec<Neighbor>> {
        if params.k == 0 {
            return Err(Error::InvalidK(params.k));
        }
        let target_row = self
            .rows
            .get(target)
            .copied()
            .ok_or_else(|| Error::UnknownIdentifier(target.to_string()))?;
        let query = self.row(target_row);

        // Max-heap on (distance, row): the top is the current worst keeper.
        let mut heap: BinaryHeap<(OrderedFloat<f64>, usize)> =
            BinaryHeap::with_capacity(params.k.min(self.len()) + 1);

        for row in 0..self.len() {
            if params.exclude_self && row == target_row {
                continue;
            }
            let candidate = self.row(row);
            let distance = params
                .metric
                .between(query, candidate, params.zero_vectors)
                .ok_or_else(|| {
                    let zero_row = if is_zero(query) { target_row } else { row };
                    Error::DegenerateVector {
                        id: self.ids[zero_row].to_string(),
                    }
                })?;

            let entry = (OrderedFloat(distance), row);
            if heap.len() < params.k {
                heap.push(entry);
            } else if heap.peek().is_some_and(|worst| entry < *worst) {
                heap.pop();
                heap.push(entry);
            }
        }

        Ok(heap
            .into_sorted_vec()
            .into_iter()
            .map(|(distance, row)| Neighbor {
                distance: distance.into_inner(),
                id: self.ids[row].clone(),
            })
            .collect())
    }

    /// Run independent queries in parallel; results come back in `targets` order
    pub fn query_batch(&self, targets: &[ItemId], params: &QueryParams) -> Vec<Result<Vec<Neighbor>>> {
        targets
            .par_iter()
            .map(|target| self.query_with(target, params))
            .collect()
    }
}
