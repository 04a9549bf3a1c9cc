//! Address lookups against the AddressBase search index.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::domain::model::{AddressQuery, AddressRecord};
use crate::domain::ports::{AddressStore, ConfigProvider};
use crate::utils::error::{PropertyError, Result};

const SERVICE: &str = "address index";

// Two hits are enough to detect a duplicate; a few more keep the log useful.
const MAX_HITS: usize = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: SearchHits,
}

#[derive(Debug, Deserialize)]
struct SearchHits {
    hits: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "_source")]
    source: AddressRecord,
}

pub struct ElasticsearchAddressStore {
    client: Client,
    endpoint: String,
    index: String,
}

impl ElasticsearchAddressStore {
    pub fn new(endpoint: String, index: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            index,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.request_timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.elasticsearch_endpoint().to_string(),
            index: config.address_index().to_string(),
        })
    }

    fn search_url(&self) -> String {
        format!("{}/{}/_search", self.endpoint.trim_end_matches('/'), self.index)
    }
}

/// Term filter on the composite `addressKey` (`STREET_PAON[_SAON]_POSTCODE`)
/// the index is keyed by.
pub fn search_body(query: &AddressQuery) -> Value {
    json!({
        "size": MAX_HITS,
        "query": { "bool": { "filter": [
            { "term": { "addressKey": query.address_key() } }
        ] } }
    })
}

#[async_trait]
impl AddressStore for ElasticsearchAddressStore {
    async fn find(&self, query: &AddressQuery) -> Result<Vec<AddressRecord>> {
        let url = self.search_url();
        tracing::debug!("Searching {} for {}", url, query.address_key());

        let response = self
            .client
            .post(&url)
            .json(&search_body(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Address index returned {}", status);
            return Err(PropertyError::upstream(
                SERVICE,
                format!("HTTP {}: {}", status, body.chars().take(200).collect::<String>()),
            ));
        }

        let search: SearchResponse = serde_json::from_slice(&response.bytes().await?)?;
        let total = search.hits.hits.len();
        let records: Vec<AddressRecord> = search
            .hits
            .hits
            .into_iter()
            .map(|hit| hit.source)
            .filter(|record| query.matches(record))
            .collect();

        if records.len() != total {
            tracing::warn!(
                "Dropped {} index hits that do not match {} exactly",
                total - records.len(),
                query.address_key()
            );
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_body_filters_on_address_key() {
        let query = AddressQuery::parse("PL6 8RU", "PATTINSON DRIVE_100").unwrap();
        let body = search_body(&query);

        let filters = body["query"]["bool"]["filter"].as_array().unwrap();
        assert_eq!(filters.len(), 1);
        assert_eq!(filters[0]["term"]["addressKey"], "PATTINSON DRIVE_100_PL6 8RU");
        assert_eq!(body["size"], MAX_HITS);
    }

    #[test]
    fn test_search_body_key_includes_saon() {
        let query = AddressQuery::parse("PL2 1AD", "ALBERT ROAD_ROSE COTTAGE_FLAT 2").unwrap();
        let body = search_body(&query);

        assert_eq!(
            body["query"]["bool"]["filter"][0]["term"]["addressKey"],
            "ALBERT ROAD_ROSE COTTAGE_FLAT 2_PL2 1AD"
        );
    }

    #[test]
    fn test_search_url_trims_trailing_slash() {
        let store = ElasticsearchAddressStore::new(
            "http://localhost:9200/".to_string(),
            "landregistry".to_string(),
        );
        assert_eq!(store.search_url(), "http://localhost:9200/landregistry/_search");
    }
}
