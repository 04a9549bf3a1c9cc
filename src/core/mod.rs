pub mod address_key;
pub mod merge;
pub mod service;
pub mod sparql;

pub use crate::domain::model::{AddressQuery, AddressRecord, PropertyResponse, SaleBinding};
pub use crate::domain::ports::{AddressStore, ConfigProvider, SaleHistory};
pub use crate::utils::error::Result;
