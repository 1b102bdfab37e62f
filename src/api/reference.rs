use chrono::{DateTime, Utc};
use log::{error, info, warn};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use super::client::GleifApi;
use super::pagination::{HasMore, PageQuery};
use super::types::Resource;
use crate::error::{GleifError, Result};

/// Largest page size the reference endpoints accept
pub const MAX_REFERENCE_PAGE_SIZE: u32 = 200;

/// Reference datasets published by GLEIF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceType {
    Countries,
    Regions,
    EntityLegalForms,
    Jurisdictions,
    RegistrationAuthorities,
    OfficialOrganizationalRoles,
}

impl ReferenceType {
    /// Every type, in the order `--all` fetches them
    pub const ALL: [ReferenceType; 6] = [
        Self::Countries,
        Self::Regions,
        Self::EntityLegalForms,
        Self::Jurisdictions,
        Self::RegistrationAuthorities,
        Self::OfficialOrganizationalRoles,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Countries => "countries",
            Self::Regions => "regions",
            Self::EntityLegalForms => "entity-legal-forms",
            Self::Jurisdictions => "jurisdictions",
            Self::RegistrationAuthorities => "registration-authorities",
            Self::OfficialOrganizationalRoles => "official-organizational-roles",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Countries => "ISO country codes and names",
            Self::Regions => "ISO 3166-2 region/subdivision codes",
            Self::EntityLegalForms => "Legal entity form types (e.g., Corporation, LLC, Ltd)",
            Self::Jurisdictions => "Jurisdictions for entity registration",
            Self::RegistrationAuthorities => "Business register authorities",
            Self::OfficialOrganizationalRoles => "Organizational role types",
        }
    }

    /// API resource path, relative to the base URL
    pub fn resource(&self) -> &'static str {
        self.as_str()
    }

    /// Pagination rule for the resource. Every reference endpoint reports
    /// `meta.pagination.lastPage`; `links.next` is only present on some of them.
    pub fn has_more(&self) -> HasMore {
        HasMore::LastPage
    }

    /// Comma-separated list of accepted identifiers
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for ReferenceType {
    type Err = GleifError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| {
                GleifError::InvalidArgument(format!(
                    "Unknown reference data type '{}'. Available types: {}",
                    s,
                    Self::available()
                ))
            })
    }
}

impl fmt::Display for ReferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ReferenceType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One reference record: its id followed by the API attributes, verbatim
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceItem {
    pub id: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Output document for one reference type
#[derive(Debug, Clone, Serialize)]
pub struct ReferenceEnvelope {
    #[serde(rename = "type")]
    pub kind: ReferenceType,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub items_count: usize,
    pub items: Vec<ReferenceItem>,
}

impl ReferenceEnvelope {
    pub fn new(kind: ReferenceType, items: Vec<ReferenceItem>) -> Self {
        Self {
            kind,
            description: kind.description().to_string(),
            timestamp: Utc::now(),
            items_count: items.len(),
            items,
        }
    }
}

/// Output document for `--all`: type identifier to envelope, in fetch order
#[derive(Debug, Clone, Default)]
pub struct ReferenceBundle {
    envelopes: Vec<ReferenceEnvelope>,
}

impl Serialize for ReferenceBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.envelopes.len()))?;
        for envelope in &self.envelopes {
            map.serialize_entry(envelope.kind.as_str(), envelope)?;
        }
        map.end()
    }
}

/// Tunables for reference fetches
#[derive(Debug, Clone)]
pub struct ReferenceOptions {
    /// Items per page, capped at [`MAX_REFERENCE_PAGE_SIZE`]
    pub page_size: u32,
    /// Hard ceiling on pages per type
    pub max_pages: Option<u32>,
}

impl Default for ReferenceOptions {
    fn default() -> Self {
        Self {
            page_size: MAX_REFERENCE_PAGE_SIZE,
            max_pages: Some(100),
        }
    }
}

impl ReferenceOptions {
    pub fn page_query(&self, kind: ReferenceType) -> PageQuery {
        PageQuery::new(kind.resource(), self.page_size.clamp(1, MAX_REFERENCE_PAGE_SIZE))
            .max_pages(self.max_pages)
            .has_more(kind.has_more())
    }
}

/// Flatten a resource into `{id, ...attributes}`
pub fn normalize_item(kind: ReferenceType, resource: &Resource) -> Result<ReferenceItem> {
    let id = resource
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| GleifError::MalformedResponse(format!("{} item has no id", kind)))?
        .to_string();

    let mut attributes = match &resource.attributes {
        Value::Object(map) => map.clone(),
        Value::Null => Map::new(),
        other => {
            return Err(GleifError::MalformedResponse(format!(
                "{} item {}: attributes must be an object, got {}",
                kind, id, other
            )))
        }
    };
    // The resource id wins over any attribute of the same name
    attributes.remove("id");

    Ok(ReferenceItem { id, attributes })
}

/// Fetch one complete reference dataset
pub async fn fetch_reference(
    api: &dyn GleifApi,
    kind: ReferenceType,
    options: &ReferenceOptions,
) -> Result<ReferenceEnvelope> {
    info!("Fetching {}...", kind);
    let collected = api.fetch_all(&options.page_query(kind)).await?;
    if !collected.complete {
        warn!(
            "{}: page ceiling reached after {} pages; dataset is incomplete",
            kind, collected.pages_fetched
        );
    }

    let items = collected
        .items
        .iter()
        .map(|resource| normalize_item(kind, resource))
        .collect::<Result<Vec<_>>>()?;

    info!("Retrieved {} {} items", items.len(), kind);
    Ok(ReferenceEnvelope::new(kind, items))
}

/// Fetch every reference type, one after another.
///
/// The first failure stops the run: later types are not requested and the error
/// lists the types that were already fetched. Nothing partial is returned.
pub async fn fetch_all_reference(
    api: &dyn GleifApi,
    options: &ReferenceOptions,
) -> Result<ReferenceBundle> {
    let mut bundle = ReferenceBundle::default();

    for kind in ReferenceType::ALL {
        match fetch_reference(api, kind, options).await {
            Ok(envelope) => bundle.envelopes.push(envelope),
            Err(e) => {
                error!("Fetching {} failed: {}", kind, e);
                let completed = bundle
                    .envelopes
                    .iter()
                    .map(|envelope| (envelope.kind.to_string(), envelope.items_count))
                    .collect();
                return Err(GleifError::PartialFetch {
                    failed: kind.to_string(),
                    completed,
                    source: Box::new(e),
                });
            }
        }
    }

    Ok(bundle)
}
