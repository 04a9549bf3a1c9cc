use crate::config::{
    LogFormat, ServiceConfig, DEFAULT_ADDRESS_INDEX, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_PPI_ENDPOINT, DEFAULT_SALE_RESULT_LIMIT,
};
use crate::utils::error::{PropertyError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerConfig>,
    pub address_store: AddressStoreConfig,
    pub sale_price: Option<SalePriceConfig>,
    pub logging: Option<LoggingConfig>,
    pub performance: Option<PerformanceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddressStoreConfig {
    pub endpoint: String,
    pub index: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalePriceConfig {
    pub endpoint: Option<String>,
    pub result_limit: Option<usize>,
    pub fetch_all: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceConfig {
    pub request_timeout: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PropertyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PropertyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PPI_END_POINT})
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PropertyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn to_service_config(&self) -> ServiceConfig {
        let server = self.server.as_ref();
        let sale_price = self.sale_price.as_ref();
        let logging = self.logging.as_ref();

        let fetch_all = sale_price.and_then(|s| s.fetch_all).unwrap_or(false);
        let sale_result_limit = if fetch_all {
            None
        } else {
            Some(
                sale_price
                    .and_then(|s| s.result_limit)
                    .unwrap_or(DEFAULT_SALE_RESULT_LIMIT),
            )
        };

        ServiceConfig {
            host: server
                .and_then(|s| s.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: server.and_then(|s| s.port).unwrap_or(DEFAULT_PORT),
            ppi_endpoint: sale_price
                .and_then(|s| s.endpoint.clone())
                .unwrap_or_else(|| DEFAULT_PPI_ENDPOINT.to_string()),
            elasticsearch_endpoint: self.address_store.endpoint.clone(),
            address_index: self
                .address_store
                .index
                .clone()
                .unwrap_or_else(|| DEFAULT_ADDRESS_INDEX.to_string()),
            sale_result_limit,
            request_timeout_seconds: self.performance.as_ref().and_then(|p| p.request_timeout),
            log_format: logging.and_then(|l| l.format).unwrap_or_default(),
            verbose: logging.and_then(|l| l.verbose).unwrap_or(false),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.to_service_config().validate()
    }
}
