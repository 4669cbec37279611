//! Representative photos for a state
//!
//! Curated overrides short-circuit the provider. Otherwise one search is
//! issued, hits are de-duplicated by provider id (first occurrence wins,
//! insertion order kept) and the first `max_photos` large renditions are
//! returned. Any provider failure, or nothing left after de-duplication,
//! yields deterministic placeholders so callers always get images.

use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::{info, instrument, warn};

use crate::config::{PhotoConfig, resolve_api_key};
use crate::models::{PhotoSet, StateIdentity};
use crate::providers::{PexelsClient, PexelsPhoto};
use crate::Result;

pub struct PhotoService {
    pexels: PexelsClient,
    api_key: Option<String>,
    api_key_env: String,
    per_page: u32,
    max_photos: usize,
    placeholder_base_url: String,
    overrides: HashMap<String, Vec<String>>,
}

impl PhotoService {
    #[must_use]
    pub fn new(pexels: PexelsClient, config: &PhotoConfig) -> Self {
        Self {
            pexels,
            api_key: config.api_key.clone(),
            api_key_env: config.api_key_env.clone(),
            per_page: config.per_page,
            max_photos: config.max_photos,
            placeholder_base_url: config.placeholder_base_url.clone(),
            overrides: config
                .overrides
                .iter()
                .map(|(name, photos)| (name.trim().to_lowercase(), photos.clone()))
                .collect(),
        }
    }

    /// Photos for `state_name`. `state_code` seeds the placeholders when
    /// given; otherwise the catalogue code for the name is used.
    #[instrument(skip(self))]
    pub async fn photos_for(&self, state_name: &str, state_code: Option<&str>) -> Result<PhotoSet> {
        if let Some(curated) = self.overrides.get(&state_name.trim().to_lowercase()) {
            info!("Using curated photos for {}", state_name);
            return Ok(PhotoSet::new(
                curated.iter().take(self.max_photos).cloned().collect(),
            ));
        }

        let api_key = resolve_api_key(self.api_key.as_deref(), &self.api_key_env, "Pexels")?;
        let seed = placeholder_seed(state_name, state_code);

        let photos = match self.pexels.search(state_name.trim(), self.per_page, &api_key).await {
            Ok(hits) => unique_large_urls(hits, self.max_photos),
            Err(e) => {
                warn!("Photo search failed for {}: {}", state_name, e);
                Vec::new()
            }
        };

        if photos.is_empty() {
            info!("Falling back to placeholder photos for {}", state_name);
            return Ok(PhotoSet::placeholders(
                &self.placeholder_base_url,
                &seed,
                self.max_photos,
            ));
        }

        info!("Fetched {} photos for {}", photos.len(), state_name);
        Ok(PhotoSet::new(photos))
    }
}

/// De-duplicate by photo id and take the first `limit` large URLs
#[must_use]
pub fn unique_large_urls(hits: Vec<PexelsPhoto>, limit: usize) -> Vec<String> {
    let mut unique: IndexMap<u64, String> = IndexMap::new();
    for hit in hits {
        unique.entry(hit.id).or_insert(hit.src.large);
    }
    unique.into_values().take(limit).collect()
}

fn placeholder_seed(state_name: &str, state_code: Option<&str>) -> String {
    state_code
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_ascii_uppercase)
        .or_else(|| StateIdentity::from_name(state_name).map(|s| s.code.to_string()))
        .unwrap_or_else(|| state_name.split_whitespace().collect())
}
