#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_PPI_ENDPOINT: &str = "http://landregistry.data.gov.uk/landregistry/query";
pub const DEFAULT_ADDRESS_INDEX: &str = "landregistry";
pub const DEFAULT_SALE_RESULT_LIMIT: usize = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Resolved settings handed to the adapters at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub ppi_endpoint: String,
    pub elasticsearch_endpoint: String,
    pub address_index: String,
    /// `None` fetches every transaction and picks the latest locally.
    pub sale_result_limit: Option<usize>,
    pub request_timeout_seconds: Option<u64>,
    pub log_format: LogFormat,
    pub verbose: bool,
}

impl ServiceConfig {
    pub fn new(elasticsearch_endpoint: String) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            ppi_endpoint: DEFAULT_PPI_ENDPOINT.to_string(),
            elasticsearch_endpoint,
            address_index: DEFAULT_ADDRESS_INDEX.to_string(),
            sale_result_limit: Some(DEFAULT_SALE_RESULT_LIMIT),
            request_timeout_seconds: None,
            log_format: LogFormat::Compact,
            verbose: false,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl ConfigProvider for ServiceConfig {
    fn ppi_endpoint(&self) -> &str {
        &self.ppi_endpoint
    }

    fn elasticsearch_endpoint(&self) -> &str {
        &self.elasticsearch_endpoint
    }

    fn address_index(&self) -> &str {
        &self.address_index
    }

    fn sale_result_limit(&self) -> Option<usize> {
        self.sale_result_limit
    }

    fn request_timeout_seconds(&self) -> Option<u64> {
        self.request_timeout_seconds
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("host", &self.host)?;
        validate_range("port", self.port, 1, u16::MAX)?;
        validate_url("ppi_endpoint", &self.ppi_endpoint)?;
        validate_url("elasticsearch_endpoint", &self.elasticsearch_endpoint)?;
        validate_non_empty_string("address_index", &self.address_index)?;
        if let Some(limit) = self.sale_result_limit {
            validate_positive_number("sale_result_limit", limit, 1)?;
        }
        if let Some(timeout) = self.request_timeout_seconds {
            validate_range("request_timeout_seconds", timeout, 1, 300)?;
        }
        Ok(())
    }
}
