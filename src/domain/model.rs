use serde::{Deserialize, Deserializer, Serialize};

/// Address fields parsed from the request path, uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressQuery {
    pub postcode: String,
    pub street: String,
    pub paon: String,
    pub saon: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One AddressBase row as stored in the address index. Text columns are
/// fixed-width in the source data and may carry trailing padding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressRecord {
    pub uprn: Option<u64>,
    pub organisation_name: String,
    pub department_name: String,
    pub building_name: String,
    pub sub_building_name: String,
    #[serde(deserialize_with = "lenient_building_number")]
    pub building_number: Option<u32>,
    pub dependent_thoroughfare_name: String,
    pub thoroughfare_name: String,
    pub post_town: String,
    pub double_dependent_locality: String,
    pub dependent_locality: String,
    #[serde(rename = "postCode", alias = "postcode")]
    pub postcode: String,
    pub postcode_type: String,
    pub position: Position,
}

impl AddressRecord {
    /// PAON as the building number when there is one, otherwise the building name.
    pub fn paon(&self) -> String {
        match self.building_number {
            Some(number) => number.to_string(),
            None => self.building_name.trim_end().to_string(),
        }
    }

    pub fn saon(&self) -> Option<String> {
        let saon = self.sub_building_name.trim_end();
        if saon.is_empty() {
            None
        } else {
            Some(saon.to_string())
        }
    }
}

// Building numbers arrive as integers, floats, numeric strings or blank padded
// strings depending on how the index was loaded. Values that are not a whole
// number are dropped so one odd document cannot fail the whole search response.
fn lenient_building_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let number = match &value {
        None | Some(serde_json::Value::Null) => return Ok(None),
        Some(serde_json::Value::Number(n)) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        }),
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<u64>().ok()
        }
        Some(_) => None,
    };

    match number.and_then(|n| u32::try_from(n).ok()) {
        Some(n) => Ok(Some(n)),
        None => {
            if let Some(raw) = value {
                tracing::warn!("Ignoring unusable building number {}", raw);
            }
            Ok(None)
        }
    }
}

/// One row of a price-paid query result. Any variable may be unbound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleBinding {
    pub amount: Option<String>,
    pub date: Option<String>,
    pub property_type: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyType {
    Detached,
    FlatMaisonette,
    SemiDetached,
    Terraced,
    Other,
}

impl PropertyType {
    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Detached => "detached",
            PropertyType::FlatMaisonette => "flat-maisonette",
            PropertyType::SemiDetached => "semi-detached",
            PropertyType::Terraced => "terraced",
            PropertyType::Other => "other",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Public response body for `GET /properties/{postcode}/{segment}`.
///
/// Sale fields are always present in the JSON and are `null` when the
/// address has no recorded sale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyResponse {
    pub saon: Option<String>,
    pub paon: String,
    pub street: String,
    pub town: String,
    pub county: String,
    pub postcode: String,
    pub amount: Option<String>,
    pub date: Option<String>,
    pub property_type: Option<PropertyType>,
    pub coordinates: Coordinates,
}
