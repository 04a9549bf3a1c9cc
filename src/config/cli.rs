use crate::config::{
    LogFormat, ServiceConfig, TomlConfig, DEFAULT_ADDRESS_INDEX, DEFAULT_HOST, DEFAULT_PORT,
    DEFAULT_PPI_ENDPOINT, DEFAULT_SALE_RESULT_LIMIT,
};
use crate::utils::error::Result;
use crate::utils::validation::{validate_required_field, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "property-lookup")]
#[command(about = "HTTP service joining address records with Land Registry price paid data")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file; flags override its values")]
    pub config: Option<String>,

    #[arg(long, env = "PPI_END_POINT")]
    pub ppi_endpoint: Option<String>,

    #[arg(long, env = "ELASTIC_SEARCH_ENDPOINT")]
    pub elasticsearch_endpoint: Option<String>,

    #[arg(long)]
    pub address_index: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[arg(long, help = "Rows requested from the price paid endpoint")]
    pub sale_result_limit: Option<usize>,

    #[arg(long, help = "Fetch every transaction and pick the latest locally")]
    pub fetch_all_sales: bool,

    #[arg(long)]
    pub request_timeout_seconds: Option<u64>,

    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Merges the optional TOML file with command-line flags and environment.
    pub fn into_service_config(self) -> Result<ServiceConfig> {
        let file_config = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?.to_service_config()),
            None => None,
        };

        let elasticsearch_endpoint = match self.elasticsearch_endpoint {
            Some(endpoint) => endpoint,
            None => validate_required_field(
                "elasticsearch_endpoint",
                &file_config.as_ref().map(|c| c.elasticsearch_endpoint.clone()),
            )?
            .clone(),
        };

        let base = file_config.unwrap_or_else(|| ServiceConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            ppi_endpoint: DEFAULT_PPI_ENDPOINT.to_string(),
            elasticsearch_endpoint: elasticsearch_endpoint.clone(),
            address_index: DEFAULT_ADDRESS_INDEX.to_string(),
            sale_result_limit: Some(DEFAULT_SALE_RESULT_LIMIT),
            request_timeout_seconds: None,
            log_format: LogFormat::Compact,
            verbose: false,
        });

        let sale_result_limit = if self.fetch_all_sales {
            None
        } else {
            self.sale_result_limit.or(base.sale_result_limit)
        };

        let config = ServiceConfig {
            host: self.host.unwrap_or(base.host),
            port: self.port.unwrap_or(base.port),
            ppi_endpoint: self.ppi_endpoint.unwrap_or(base.ppi_endpoint),
            elasticsearch_endpoint,
            address_index: self.address_index.unwrap_or(base.address_index),
            sale_result_limit,
            request_timeout_seconds: self.request_timeout_seconds.or(base.request_timeout_seconds),
            log_format: self.log_format.unwrap_or(base.log_format),
            verbose: self.verbose || base.verbose,
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PropertyError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["property-lookup"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_only() {
        let config = parse(&[
            "--elasticsearch-endpoint",
            "http://localhost:9200",
            "--ppi-endpoint",
            "http://localhost:3030/ppi",
            "--port",
            "8080",
            "--fetch-all-sales",
        ])
        .into_service_config()
        .unwrap();

        assert_eq!(config.elasticsearch_endpoint, "http://localhost:9200");
        assert_eq!(config.ppi_endpoint, "http://localhost:3030/ppi");
        assert_eq!(config.port, 8080);
        assert_eq!(config.sale_result_limit, None);
        assert_eq!(config.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            b"[address_store]\nendpoint = \"http://file:9200\"\nindex = \"from-file\"\n\n[logging]\nformat = \"json\"\n",
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let config = parse(&["--config", path.as_str(), "--address-index", "from-flag"])
            .into_service_config()
            .unwrap();

        assert_eq!(config.elasticsearch_endpoint, "http://file:9200");
        assert_eq!(config.address_index, "from-flag");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let err = parse(&["--elasticsearch-endpoint", "not a url"])
            .into_service_config()
            .unwrap_err();
        assert!(matches!(err, PropertyError::InvalidConfigValueError { .. }));
    }
}
