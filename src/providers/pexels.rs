use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::PhotoConfig;
use crate::{Result, StatewatchError};

/// Pexels photo-search client
pub struct PexelsClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

/// A search hit; only identity and the large rendition are kept
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PexelsPhoto {
    pub id: u64,
    pub src: PhotoSources,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoSources {
    pub large: String,
}

impl PexelsClient {
    #[must_use]
    pub fn new(client: Client, config: &PhotoConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Search photos for `query`, returning provider order
    #[instrument(skip(self, api_key))]
    pub async fn search(&self, query: &str, per_page: u32, api_key: &str) -> Result<Vec<PexelsPhoto>> {
        let url = format!("{}/search", self.base_url);
        let per_page = per_page.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("query", query), ("per_page", per_page.as_str())])
            .header("Authorization", api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatewatchError::api(format!(
                "Pexels API error for query \"{}\": {}",
                query,
                status.as_u16()
            )));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| StatewatchError::api(format!("Failed to parse Pexels response: {e}")))?;

        debug!("Pexels returned {} photos for \"{}\"", search.photos.len(), query);
        Ok(search.photos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_search_sends_key_and_page_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", "Oregon"))
            .and(query_param("per_page", "15"))
            .and(header("Authorization", "pexels-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "photos": [
                    {"id": 1, "src": {"large": "https://img/1-large.jpg", "small": "s"}},
                    {"id": 2, "src": {"large": "https://img/2-large.jpg"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = PhotoConfig {
            base_url: server.uri(),
            ..PhotoConfig::default()
        };
        let photos = PexelsClient::new(Client::new(), &config)
            .search("Oregon", 15, "pexels-key")
            .await
            .unwrap();

        assert_eq!(photos.len(), 2);
        assert_eq!(photos[0].id, 1);
        assert_eq!(photos[1].src.large, "https://img/2-large.jpg");
    }

    #[tokio::test]
    async fn test_search_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let config = PhotoConfig {
            base_url: server.uri(),
            ..PhotoConfig::default()
        };
        let result = PexelsClient::new(Client::new(), &config)
            .search("Ohio", 15, "bad")
            .await;
        assert!(matches!(result, Err(StatewatchError::Api { .. })));
    }
}
