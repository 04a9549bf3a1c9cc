use crate::core::merge::build_response;
use crate::domain::model::{AddressQuery, AddressRecord, PropertyResponse};
use crate::domain::ports::{AddressStore, SaleHistory};
use crate::utils::error::{PropertyError, Result};

/// Parse → address lookup → sale query → merge, for one request.
pub struct PropertyService<A: AddressStore, S: SaleHistory> {
    addresses: A,
    sales: S,
}

impl<A: AddressStore, S: SaleHistory> PropertyService<A, S> {
    pub fn new(addresses: A, sales: S) -> Self {
        Self { addresses, sales }
    }

    pub async fn lookup(&self, postcode: &str, street_paon_saon: &str) -> Result<PropertyResponse> {
        // 解析路徑
        let query = AddressQuery::parse(postcode, street_paon_saon)?;
        tracing::debug!("Parsed address key {}", query.address_key());

        // 查地址
        let record = self.resolve_address(&query).await?;

        // Sales are looked up by the stored address, not the raw path.
        let sale_query = AddressQuery::from_record(&record);
        let sales = self.sales.sales(&sale_query).await?;
        tracing::debug!("Price paid query returned {} rows", sales.len());

        // 合併
        build_response(&record, &sales)
    }

    /// Exactly one record must match; anything else is an error.
    async fn resolve_address(&self, query: &AddressQuery) -> Result<AddressRecord> {
        let mut records = self.addresses.find(query).await?;

        match records.len() {
            0 => Err(PropertyError::NotFound {
                message: format!("No address found for {}", query.address_key()),
            }),
            1 => Ok(records.remove(0)),
            count => {
                tracing::error!(
                    "Address key {} matched {} records",
                    query.address_key(),
                    count
                );
                Err(PropertyError::Conflict { count })
            }
        }
    }
}
