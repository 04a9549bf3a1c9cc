//! SPARQL text for the Land Registry price-paid dataset.
//!
//! See http://landregistry.data.gov.uk/app/qonsole for the vocabulary.

use crate::domain::model::AddressQuery;

const PREFIXES: &str = "prefix xsd: <http://www.w3.org/2001/XMLSchema#>
prefix lrppi: <http://landregistry.data.gov.uk/def/ppi/>
prefix lrcommon: <http://landregistry.data.gov.uk/def/common/>";

const TRANSACTION_PATTERN: &str = "    ?transx lrppi:pricePaid ?amount ;
            lrppi:transactionDate ?date ;
            lrppi:propertyAddress ?addr ;
            lrppi:propertyType ?property_type.";

/// Price-paid transactions for one address, most recent first.
#[derive(Debug, Clone)]
pub struct SaleQuery<'a> {
    address: &'a AddressQuery,
    limit: Option<usize>,
}

impl<'a> SaleQuery<'a> {
    pub fn new(address: &'a AddressQuery) -> Self {
        Self {
            address,
            limit: Some(1),
        }
    }

    /// `None` returns every matching transaction.
    pub fn limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    pub fn render(&self) -> String {
        let address_lines: Vec<String> = self
            .address
            .fields()
            .into_iter()
            .map(|(field, value)| {
                format!(
                    "    ?addr lrcommon:{} {}^^xsd:string.",
                    field,
                    string_literal(&value.to_uppercase())
                )
            })
            .collect();

        let mut query = format!(
            "{}\n\nSELECT ?amount ?date ?property_type\nWHERE\n{{\n{}\n{}\n}}\nORDER BY DESC(?date)",
            PREFIXES,
            TRANSACTION_PATTERN,
            address_lines.join("\n")
        );
        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }
        query.push('\n');
        query
    }
}

/// Double-quoted SPARQL string literal.
fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '"' => literal.push_str("\\\""),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}
