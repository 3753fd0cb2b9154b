use serde::{Deserialize, Serialize};

/// A dense feature vector of double-precision values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f64]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

// Slice kernels shared with the index, which stores rows in one flat buffer.

#[inline]
pub fn is_zero(a: &[f64]) -> bool {
    a.iter().all(|&x| x == 0.0)
}

#[inline]
fn max_abs(a: &[f64]) -> f64 {
    a.iter().fold(0.0f64, |m, x| m.max(x.abs()))
}

/// Cosine similarity in [-1, 1], `None` when either vector is all zeros.
///
/// Each side is divided by its largest magnitude first, so the dot product
/// and norms stay near 1 for any finite input instead of overflowing to
/// infinity or underflowing to zero.
#[inline]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Option<f64> {
    debug_assert_eq!(a.len(), b.len());
    if is_zero(a) || is_zero(b) {
        return None;
    }
    let (scale_a, scale_b) = (max_abs(a), max_abs(b));
    let (mut dot, mut norm_a, mut norm_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (x / scale_a, y / scale_b);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    // Both squared norms are >= 1 after scaling
    let sim = dot / (norm_a.sqrt() * norm_b.sqrt());
    sim.is_finite().then(|| sim.clamp(-1.0, 1.0))
}

#[inline]
pub fn l2_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

#[inline]
pub fn l1_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}
