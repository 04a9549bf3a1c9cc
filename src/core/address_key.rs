//! Parsing of the combined `STREET_PAON[_SAON]` path segment.

use crate::domain::model::{AddressQuery, AddressRecord};
use crate::utils::error::{PropertyError, Result};

const DELIMITER: char = '_';

impl AddressQuery {
    /// Builds a query from the postcode path segment and the combined
    /// `STREET_PAON[_SAON]` segment. Both are uppercased.
    pub fn parse(postcode: &str, street_paon_saon: &str) -> Result<Self> {
        let combined = street_paon_saon.to_uppercase();
        let parts: Vec<&str> = combined.split(DELIMITER).collect();

        match parts.as_slice() {
            [street, paon] => Self::from_fields(postcode, street, paon, None),
            [street, paon, saon] => Self::from_fields(postcode, street, paon, Some(*saon)),
            _ => Err(PropertyError::input_format()),
        }
    }

    /// Builds a query from a key with the postcode prepended:
    /// `POSTCODE_STREET_PAON[_SAON]`.
    pub fn from_address_key(key: &str) -> Result<Self> {
        let upper = key.to_uppercase();
        let parts: Vec<&str> = upper.split(DELIMITER).collect();

        match parts.as_slice() {
            [postcode, street, paon] => Self::from_fields(postcode, street, paon, None),
            [postcode, street, paon, saon] => {
                Self::from_fields(postcode, street, paon, Some(*saon))
            }
            _ => Err(PropertyError::input_format()),
        }
    }

    /// Query for the canonical fields of a resolved address record.
    pub fn from_record(record: &AddressRecord) -> Self {
        Self {
            postcode: record.postcode.trim_end().to_uppercase(),
            street: record.thoroughfare_name.trim_end().to_uppercase(),
            paon: record.paon().to_uppercase(),
            saon: record.saon().map(|saon| saon.to_uppercase()),
        }
    }

    fn from_fields(postcode: &str, street: &str, paon: &str, saon: Option<&str>) -> Result<Self> {
        let postcode = postcode.trim().to_uppercase();
        if [postcode.as_str(), street, paon].iter().any(|part| part.is_empty())
            || saon.is_some_and(str::is_empty)
        {
            return Err(PropertyError::input_format());
        }

        Ok(Self {
            postcode,
            street: street.to_string(),
            paon: paon.to_string(),
            saon: saon.map(str::to_string),
        })
    }

    /// Composite key as stored in the index: `STREET_PAON[_SAON]_POSTCODE`.
    pub fn address_key(&self) -> String {
        let mut parts = vec![self.street.as_str(), self.paon.as_str()];
        if let Some(saon) = &self.saon {
            parts.push(saon);
        }
        parts.push(&self.postcode);
        parts.join("_")
    }

    /// Field/value pairs in the order they are matched against.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        let mut fields = vec![
            ("postcode", self.postcode.as_str()),
            ("street", self.street.as_str()),
            ("paon", self.paon.as_str()),
        ];
        if let Some(saon) = &self.saon {
            fields.push(("saon", saon.as_str()));
        }
        fields
    }

    /// Whether `record` is the address this query names. The PAON may be
    /// either the building number or the building name.
    pub fn matches(&self, record: &AddressRecord) -> bool {
        let paon_matches = record
            .building_number
            .is_some_and(|number| number.to_string() == self.paon)
            || record.building_name.trim_end() == self.paon;

        let saon_matches = match &self.saon {
            Some(saon) => record.sub_building_name.trim_end() == saon.as_str(),
            None => true,
        };

        record.postcode.trim_end() == self.postcode
            && record.thoroughfare_name.trim_end() == self.street
            && paon_matches
            && saon_matches
    }
}
