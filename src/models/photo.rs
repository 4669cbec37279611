//! Photo set returned for a state

use serde::{Deserialize, Serialize};

/// Ordered image URLs for a state, at most `max_photos` long
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoSet {
    pub photos: Vec<String>,
}

impl PhotoSet {
    #[must_use]
    pub fn new(photos: Vec<String>) -> Self {
        Self { photos }
    }

    /// Deterministic placeholder images seeded by `seed` plus index 1..=count
    #[must_use]
    pub fn placeholders(base_url: &str, seed: &str, count: usize) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let seed = urlencoding::encode(seed);
        Self {
            photos: (1..=count)
                .map(|i| format!("{base_url}/seed/{seed}{i}/800/600"))
                .collect(),
        }
    }
}
