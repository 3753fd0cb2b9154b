use anyhow::{Context, Result};
use sakenn_core::{sake, Item, ItemId, SimilarityIndex};
use sakenn_storage::CatalogSource;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::RecommenderConfig;

/// A neighbour resolved back to its full catalog row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub distance: f64,
    pub item: Item,
}

/// Loads a fresh catalog snapshot per request and answers it with a
/// throwaway similarity index.
pub struct Recommender {
    source: Arc<dyn CatalogSource>,
    config: RecommenderConfig,
}

impl Recommender {
    pub fn new(source: Arc<dyn CatalogSource>, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Items most similar to `target`, nearest first
    pub fn recommend(&self, target: &ItemId) -> Result<Vec<Recommendation>> {
        let started = Instant::now();
        let catalog = self
            .source
            .load()
            .with_context(|| format!("Failed to load catalog from {}", self.source.describe()))?;
        debug!("Catalog snapshot has {} items", catalog.len());

        let index = SimilarityIndex::build(&catalog, self.config.feature_fields.as_slice())?;
        let neighbors = index.query_with(target, &self.config.query_params())?;

        let recommendations: Vec<Recommendation> = neighbors
            .into_iter()
            .filter_map(|neighbor| {
                catalog.get(&neighbor.id).map(|item| Recommendation {
                    distance: neighbor.distance,
                    item: item.clone(),
                })
            })
            .collect();

        info!(
            "Recommended {} items for {} ({} metric, {:?})",
            recommendations.len(),
            target,
            self.config.metric,
            started.elapsed()
        );
        Ok(recommendations)
    }

    /// Most voted items above the configured threshold
    pub fn popular(&self) -> Result<Vec<Item>> {
        let catalog = self
            .source
            .load()
            .with_context(|| format!("Failed to load catalog from {}", self.source.describe()))?;
        let hot: Vec<Item> = sake::popular(&catalog, self.config.min_votes)
            .into_iter()
            .cloned()
            .collect();
        info!(
            "{} of {} items have more than {} votes",
            hot.len(),
            catalog.len(),
            self.config.min_votes
        );
        Ok(hot)
    }
}
