use crate::domain::model::{AddressQuery, AddressRecord, SaleBinding};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Read-only access to the external address store.
#[async_trait]
pub trait AddressStore: Send + Sync {
    /// All records matching the query. Callers decide what cardinality means.
    async fn find(&self, query: &AddressQuery) -> Result<Vec<AddressRecord>>;
}

/// Historical sale-price transactions for an address.
#[async_trait]
pub trait SaleHistory: Send + Sync {
    async fn sales(&self, query: &AddressQuery) -> Result<Vec<SaleBinding>>;
}

pub trait ConfigProvider: Send + Sync {
    fn ppi_endpoint(&self) -> &str;
    fn elasticsearch_endpoint(&self) -> &str;
    fn address_index(&self) -> &str;
    fn sale_result_limit(&self) -> Option<usize>;
    fn request_timeout_seconds(&self) -> Option<u64>;
}
