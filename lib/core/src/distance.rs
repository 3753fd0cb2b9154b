//! Distance metrics over feature vectors
//!
//! Every metric returns a non-negative distance where 0.0 means identical.

use crate::vector::{cosine_similarity, is_zero, l1_distance, l2_distance};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distance {
    /// 1 - cosine similarity, in [0, 2]
    #[default]
    Cosine,
    /// L2 distance
    Euclidean,
    /// L1 distance
    Manhattan,
}

/// How cosine distance treats a pair where exactly one vector is all zeros
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroVectorPolicy {
    /// Fail the query with `Error::DegenerateVector`
    #[default]
    Reject,
    /// Treat the pair as orthogonal (similarity 0, distance 1)
    Orthogonal,
}

impl Distance {
    pub const ALL: [Distance; 3] = [Distance::Cosine, Distance::Euclidean, Distance::Manhattan];

    /// Distance between two equal-length vectors.
    ///
    /// Returns `None` only for cosine under [`ZeroVectorPolicy::Reject`] when
    /// exactly one side is the zero vector. Two zero vectors are a
    /// degenerate match at distance 0.
    #[inline]
    pub fn between(self, a: &[f64], b: &[f64], zero_vectors: ZeroVectorPolicy) -> Option<f64> {
        match self {
            Distance::Cosine => cosine_distance(a, b, zero_vectors),
            Distance::Euclidean => Some(l2_distance(a, b)),
            Distance::Manhattan => Some(l1_distance(a, b)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Distance::Cosine => "cosine",
            Distance::Euclidean => "euclidean",
            Distance::Manhattan => "manhattan",
        }
    }
}

#[inline]
fn cosine_distance(a: &[f64], b: &[f64], zero_vectors: ZeroVectorPolicy) -> Option<f64> {
    if a == b {
        return Some(0.0);
    }
    match (is_zero(a), is_zero(b)) {
        (true, true) => Some(0.0),
        (false, false) => cosine_similarity(a, b).map(|sim| (1.0 - sim).clamp(0.0, 2.0)),
        _ => match zero_vectors {
            ZeroVectorPolicy::Reject => None,
            ZeroVectorPolicy::Orthogonal => Some(1.0),
        },
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cosine" | "cos" => Ok(Distance::Cosine),
            "euclidean" | "l2" => Ok(Distance::Euclidean),
            "manhattan" | "l1" | "cityblock" => Ok(Distance::Manhattan),
            _ => Err(Error::UnknownMetric(s.to_string())),
        }
    }
}

impl FromStr for ZeroVectorPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(ZeroVectorPolicy::Reject),
            "orthogonal" => Ok(ZeroVectorPolicy::Orthogonal),
            _ => Err(Error::InvalidConfig(format!("unknown zero-vector policy '{}'", s))),
        }
    }
}
