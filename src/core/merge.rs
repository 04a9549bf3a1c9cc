use chrono::NaiveDate;

use crate::domain::model::{
    AddressRecord, Coordinates, PropertyResponse, PropertyType, SaleBinding,
};
use crate::utils::error::{PropertyError, Result};

pub const PROPERTY_TYPE_PREFIX: &str = "http://landregistry.data.gov.uk/def/common/";

impl PropertyType {
    /// Strips the Land Registry vocabulary prefix and checks the remainder
    /// against the known property types.
    pub fn from_uri(uri: &str) -> Result<Self> {
        let unknown = || PropertyError::UnknownPropertyType {
            uri: uri.to_string(),
        };

        let name = uri.strip_prefix(PROPERTY_TYPE_PREFIX).ok_or_else(unknown)?;
        match name {
            "detached" => Ok(PropertyType::Detached),
            "flat-maisonette" => Ok(PropertyType::FlatMaisonette),
            "semi-detached" => Ok(PropertyType::SemiDetached),
            "terraced" => Ok(PropertyType::Terraced),
            "otherPropertyType" => Ok(PropertyType::Other),
            _ => Err(unknown()),
        }
    }
}

/// The binding with the greatest transaction date. Ties keep the earliest
/// row, so an endpoint that already ordered its results wins ties.
pub fn latest_sale(bindings: &[SaleBinding]) -> Option<&SaleBinding> {
    bindings.iter().reduce(|latest, candidate| {
        if date_key(candidate) > date_key(latest) {
            candidate
        } else {
            latest
        }
    })
}

// ISO-8601 dates order correctly as strings; the parsed date is compared first
// so a datetime-suffixed value still sorts by its calendar day.
fn date_key(binding: &SaleBinding) -> (Option<NaiveDate>, Option<&str>) {
    let date = binding.date.as_deref();
    let parsed = date
        .and_then(|d| d.get(..10))
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok());
    (parsed, date)
}

/// Combines the resolved address with its most recent sale.
pub fn build_response(record: &AddressRecord, bindings: &[SaleBinding]) -> Result<PropertyResponse> {
    let latest = latest_sale(bindings);

    let property_type = latest
        .and_then(|sale| sale.property_type.as_deref())
        .map(PropertyType::from_uri)
        .transpose()?;

    Ok(PropertyResponse {
        saon: record.saon(),
        paon: record.paon(),
        street: record.thoroughfare_name.trim_end().to_string(),
        town: record.post_town.trim_end().to_string(),
        county: record.dependent_locality.trim_end().to_string(),
        postcode: record.postcode.trim_end().to_string(),
        amount: latest.and_then(|sale| sale.amount.clone()),
        date: latest.and_then(|sale| sale.date.clone()),
        property_type,
        coordinates: Coordinates {
            latitude: record.position.y,
            longitude: record.position.x,
        },
    })
}
