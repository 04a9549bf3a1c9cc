//! Client for the Land Registry price-paid SPARQL endpoint.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::core::sparql::SaleQuery;
use crate::domain::model::{AddressQuery, SaleBinding};
use crate::domain::ports::{ConfigProvider, SaleHistory};
use crate::utils::error::{PropertyError, Result};

const SERVICE: &str = "price paid endpoint";

/// Standard SPARQL 1.1 JSON results document.
#[derive(Debug, Deserialize)]
pub struct SparqlResults {
    #[serde(default)]
    pub head: SparqlHead,
    pub results: SparqlBindings,
}

#[derive(Debug, Default, Deserialize)]
pub struct SparqlHead {
    #[serde(default)]
    pub vars: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SparqlBindings {
    pub bindings: Vec<HashMap<String, BindingValue>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BindingValue {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub datatype: Option<String>,
}

impl From<HashMap<String, BindingValue>> for SaleBinding {
    fn from(mut row: HashMap<String, BindingValue>) -> Self {
        let mut take = |var: &str| row.remove(var).map(|binding| binding.value);
        SaleBinding {
            amount: take("amount"),
            date: take("date"),
            property_type: take("property_type"),
        }
    }
}

pub struct PpiClient {
    client: Client,
    endpoint: String,
    result_limit: Option<usize>,
}

impl PpiClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            result_limit: Some(1),
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.request_timeout_seconds() {
            builder = builder.timeout(Duration::from_secs(seconds));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.ppi_endpoint().to_string(),
            result_limit: config.sale_result_limit(),
        })
    }

    pub fn with_result_limit(mut self, limit: Option<usize>) -> Self {
        self.result_limit = limit;
        self
    }

    async fn execute(&self, query: &str) -> Result<SparqlResults> {
        tracing::debug!("POST {} ({} byte query)", self.endpoint, query.len());

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("output", "json"), ("query", query)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!("Price paid endpoint returned {}", status);
            return Err(PropertyError::upstream(
                SERVICE,
                format!("HTTP {}: {}", status, truncate(&body, 200)),
            ));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl SaleHistory for PpiClient {
    async fn sales(&self, query: &AddressQuery) -> Result<Vec<SaleBinding>> {
        let sparql = SaleQuery::new(query).limit(self.result_limit).render();
        let results = self.execute(&sparql).await?;
        if !results.head.vars.iter().any(|var| var == "date") {
            tracing::warn!("Price paid result has no date column: {:?}", results.head.vars);
        }

        Ok(results
            .results
            .bindings
            .into_iter()
            .map(SaleBinding::from)
            .collect())
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
