pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{ElasticsearchAddressStore, PpiClient};
pub use crate::config::{ServiceConfig, TomlConfig};
pub use crate::core::service::PropertyService;
pub use crate::utils::error::{PropertyError, Result};
