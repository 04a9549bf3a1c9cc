// Adapters layer: HTTP clients for the address index and the price-paid endpoint.

pub mod elasticsearch;
pub mod ppi;

pub use elasticsearch::ElasticsearchAddressStore;
pub use ppi::PpiClient;
