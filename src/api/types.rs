use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::deserializers::{lenient_u32, single_or_vec_or_null};

/// One page of a JSON:API response
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// Resources on this page
    pub data: Vec<Resource>,
    #[serde(default)]
    pub meta: Meta,
    #[serde(default)]
    pub links: Links,
}

/// A single JSON:API resource object
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub attributes: Value,
    #[serde(default)]
    pub relationships: Value,
}

impl Resource {
    /// Whether the resource declares a relationship with the given name
    pub fn has_relationship(&self, name: &str) -> bool {
        self.relationships
            .get(name)
            .map(|rel| !rel.is_null())
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub current_page: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub per_page: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub last_page: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Links {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

/// Attributes of a `lei-records` resource, limited to what the search output uses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeiAttributes {
    #[serde(default)]
    pub lei: Option<String>,
    #[serde(default)]
    pub entity: RawEntity,
    #[serde(default)]
    pub registration: RawRegistration,
    #[serde(default, deserialize_with = "single_or_vec_or_null")]
    pub bic: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntity {
    #[serde(default)]
    pub legal_name: Option<RawLegalName>,
    #[serde(default)]
    pub legal_address: Option<RawAddress>,
    #[serde(default)]
    pub jurisdiction: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRegistration {
    #[serde(default)]
    pub jurisdiction: Option<String>,
}

/// Legal names come as `{"name": .., "language": ..}`; older payloads carry a bare string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLegalName {
    Structured {
        name: Option<String>,
        #[serde(default)]
        language: Option<String>,
    },
    Plain(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddress {
    #[serde(default)]
    pub address_lines: Option<Vec<String>>,
    #[serde(default)]
    pub first_address_line: Option<String>,
    #[serde(default, deserialize_with = "single_or_vec_or_null")]
    pub additional_address_line: Option<Vec<String>>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// Attributes of an `isins` resource
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IsinAttributes {
    #[serde(default)]
    pub isin: Option<String>,
}
