use anyhow::{Context, Result};
use sakenn_core::sake::{DEFAULT_FEATURE_FIELDS, DEFAULT_MIN_VOTES, ID_FIELD};
use sakenn_core::{Distance, Error, QueryParams, ZeroVectorPolicy, DEFAULT_K};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Recommendation settings
///
/// Every key is optional in a config file; missing keys take the defaults
/// below (Amakara/Notan, 10 neighbours, cosine, self included).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Numeric fields making up the feature vector, in order
    pub feature_fields: Vec<String>,
    /// Column holding the item id in catalog files
    pub id_field: String,
    pub k: usize,
    pub metric: Distance,
    pub zero_vectors: ZeroVectorPolicy,
    pub exclude_self: bool,
    /// Vote threshold for the popular list
    pub min_votes: u64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            feature_fields: DEFAULT_FEATURE_FIELDS.iter().map(|f| f.to_string()).collect(),
            id_field: ID_FIELD.to_string(),
            k: DEFAULT_K,
            metric: Distance::Cosine,
            zero_vectors: ZeroVectorPolicy::Reject,
            exclude_self: false,
            min_votes: DEFAULT_MIN_VOTES,
        }
    }
}

impl RecommenderConfig {
    /// Load a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: Self = serde_json::from_str(&data)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> sakenn_core::Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidConfig("k must be at least 1".to_string()));
        }
        if self.feature_fields.is_empty() {
            return Err(Error::InvalidConfig(
                "feature_fields must name at least one field".to_string(),
            ));
        }
        if self.id_field.is_empty() {
            return Err(Error::InvalidConfig("id_field must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn query_params(&self) -> QueryParams {
        QueryParams::new(self.k, self.metric)
            .with_zero_vectors(self.zero_vectors)
            .with_exclude_self(self.exclude_self)
    }
}
