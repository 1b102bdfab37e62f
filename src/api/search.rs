use log::{debug, info, warn};
use serde::Serialize;

use super::client::GleifApi;
use super::pagination::{HasMore, PageQuery};
use super::types::{IsinAttributes, LeiAttributes, RawAddress, RawLegalName, Resource};
use crate::error::{GleifError, Result};

/// Resource holding LEI records
pub const LEI_RECORDS: &str = "lei-records";
/// Filter applied in name mode
pub const NAME_FILTER: &str = "filter[entity.legalName]";
/// Filter applied in full-text mode
pub const FULLTEXT_FILTER: &str = "filter[fulltext]";
/// Server-side country filter
pub const COUNTRY_FILTER: &str = "filter[entity.legalAddress.country]";
/// Largest page size the search accepts
pub const MAX_SEARCH_PAGE_SIZE: u32 = 100;
/// Page size for ISIN lookups
pub const INSTRUMENT_PAGE_SIZE: u32 = 200;

/// Search mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Legal name only (default)
    Name,
    /// Name, address and metadata
    Fulltext,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Fulltext => "fulltext",
        }
    }

    /// Query parameter carrying the search string
    pub fn filter_param(&self) -> &'static str {
        match self {
            Self::Name => NAME_FILTER,
            Self::Fulltext => FULLTEXT_FILTER,
        }
    }
}

/// A validated entity search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    query: String,
    mode: SearchMode,
    country: Option<String>,
}

impl SearchRequest {
    /// Validate user input. Nothing here touches the network.
    pub fn new(query: &str, fulltext: bool, country: Option<&str>) -> Result<Self> {
        if query.trim().is_empty() {
            return Err(GleifError::InvalidArgument(
                "Search query cannot be empty".to_string(),
            ));
        }

        let country = country.map(normalize_country).transpose()?;
        let mode = if fulltext {
            SearchMode::Fulltext
        } else {
            SearchMode::Name
        };

        Ok(Self {
            query: query.to_string(),
            mode,
            country,
        })
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Uppercase country code, if a filter was requested
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Paginated query against the LEI records resource
    pub fn page_query(&self, options: &SearchOptions) -> PageQuery {
        let mut query = PageQuery::new(LEI_RECORDS, options.effective_page_size())
            .param(self.mode.filter_param(), self.query.as_str())
            .max_pages(options.max_pages)
            .has_more(HasMore::LastPage);
        if let Some(country) = &self.country {
            query = query.param(COUNTRY_FILTER, country.as_str());
        }
        query
    }
}

/// Validate a two-letter country code and uppercase it
pub fn normalize_country(code: &str) -> Result<String> {
    let code = code.trim();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(GleifError::InvalidArgument(format!(
            "Invalid country code '{}'. Must be a 2-letter ISO country code (e.g. GB, US, CN).",
            code
        )));
    }
    Ok(code.to_ascii_uppercase())
}

/// Tunables for one search run
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Results per page, capped at [`MAX_SEARCH_PAGE_SIZE`]
    pub page_size: u32,
    /// Hard ceiling on LEI record pages
    pub max_pages: Option<u32>,
    /// Look up ISINs for each record
    pub include_instruments: bool,
    /// Maximum number of ISIN page requests for the whole run
    pub instrument_request_budget: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            page_size: MAX_SEARCH_PAGE_SIZE,
            max_pages: Some(100),
            include_instruments: false,
            instrument_request_budget: 20,
        }
    }
}

impl SearchOptions {
    pub fn effective_page_size(&self) -> u32 {
        self.page_size.clamp(1, MAX_SEARCH_PAGE_SIZE)
    }
}

/// Search output document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultEnvelope {
    pub query: String,
    pub search_type: SearchMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_filter: Option<String>,
    pub results_count: usize,
    pub results: Vec<EntityRecord>,
}

impl SearchResultEnvelope {
    pub fn new(request: &SearchRequest, results: Vec<EntityRecord>) -> Self {
        Self {
            query: request.query.clone(),
            search_type: request.mode,
            country_filter: request.country.clone(),
            results_count: results.len(),
            results,
        }
    }
}

/// Normalized LEI record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityRecord {
    pub legal_entity_id: String,
    pub legal_entity_name: LegalName,
    pub region: Option<String>,
    pub country: Option<String>,
    pub country_of_jurisdiction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickers_and_instruments: Option<Vec<Instrument>>,
}

impl EntityRecord {
    /// Put looked-up ISINs ahead of the BIC entry taken from the record itself
    pub fn attach_isins(&mut self, isins: Vec<String>) {
        if isins.is_empty() {
            return;
        }
        let mut instruments = vec![Instrument {
            kind: InstrumentKind::Isin,
            value: isins,
        }];
        instruments.extend(self.tickers_and_instruments.take().unwrap_or_default());
        self.tickers_and_instruments = Some(instruments);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalName {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Address {
    fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InstrumentKind {
    Bic,
    Isin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instrument {
    #[serde(rename = "type")]
    pub kind: InstrumentKind,
    pub value: Vec<String>,
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn non_empty_lines(lines: &Option<Vec<String>>) -> Vec<String> {
    lines
        .iter()
        .flatten()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn legal_name(raw: Option<RawLegalName>) -> Option<LegalName> {
    match raw? {
        RawLegalName::Structured { name, language } => Some(LegalName {
            name: non_empty(&name)?,
            language: non_empty(&language),
        }),
        RawLegalName::Plain(name) => Some(LegalName {
            name: non_empty(&Some(name))?,
            language: None,
        }),
    }
}

fn address(raw: &RawAddress) -> Option<Address> {
    let lines = non_empty_lines(&raw.address_lines);
    let first_line = non_empty(&raw.first_address_line);

    let street = first_line.clone().or_else(|| lines.first().cloned());
    let additional = {
        let extra = non_empty_lines(&raw.additional_address_line);
        if !extra.is_empty() {
            Some(extra.join(", "))
        } else if first_line.is_none() && lines.len() > 1 {
            Some(lines[1..].join(", "))
        } else {
            None
        }
    };

    let address = Address {
        street,
        additional,
        city: non_empty(&raw.city),
        postal_code: non_empty(&raw.postal_code),
        country: non_empty(&raw.country),
    };
    (!address.is_empty()).then_some(address)
}

/// Reshape one `lei-records` resource. ISINs are attached separately.
pub fn normalize_record(resource: &Resource) -> Result<EntityRecord> {
    let attributes: LeiAttributes = serde_json::from_value(resource.attributes.clone())
        .map_err(|e| GleifError::MalformedResponse(format!("{} item attributes: {}", LEI_RECORDS, e)))?;

    let lei = non_empty(&attributes.lei).ok_or_else(|| {
        GleifError::MalformedResponse(format!("{} item has no 'lei' attribute", LEI_RECORDS))
    })?;

    let entity = attributes.entity;
    let name = legal_name(entity.legal_name).ok_or_else(|| {
        GleifError::MalformedResponse(format!("LEI record {} has no legal name", lei))
    })?;

    let legal_address = entity.legal_address.unwrap_or_default();
    let country = non_empty(&legal_address.country);
    let jurisdiction = non_empty(&entity.jurisdiction)
        .or_else(|| non_empty(&attributes.registration.jurisdiction))
        .or_else(|| country.clone());

    let bics = non_empty_lines(&attributes.bic);
    let instruments = (!bics.is_empty()).then(|| {
        vec![Instrument {
            kind: InstrumentKind::Bic,
            value: bics,
        }]
    });

    Ok(EntityRecord {
        legal_entity_id: lei,
        legal_entity_name: name,
        region: non_empty(&legal_address.region),
        country,
        country_of_jurisdiction: jurisdiction,
        address: address(&legal_address),
        tickers_and_instruments: instruments,
    })
}

/// Shared allowance of ISIN page requests for one run
#[derive(Debug)]
struct InstrumentBudget {
    remaining: u32,
    exhausted_reported: bool,
}

impl InstrumentBudget {
    fn new(requests: u32) -> Self {
        Self {
            remaining: requests,
            exhausted_reported: false,
        }
    }

    fn report_exhausted(&mut self) {
        if !self.exhausted_reported {
            warn!("Instrument lookup budget exhausted; stopping ISIN enrichment.");
            self.exhausted_reported = true;
        }
    }
}

async fn fetch_isins(
    api: &dyn GleifApi,
    lei: &str,
    budget: &mut InstrumentBudget,
) -> Result<Vec<String>> {
    if budget.remaining == 0 {
        budget.report_exhausted();
        return Ok(Vec::new());
    }

    let query = PageQuery::new(format!("{}/{}/isins", LEI_RECORDS, lei), INSTRUMENT_PAGE_SIZE)
        .max_pages(Some(budget.remaining))
        .has_more(HasMore::LastPage);
    let collected = api.fetch_all(&query).await?;

    budget.remaining = budget.remaining.saturating_sub(collected.pages_fetched);
    if !collected.complete {
        budget.report_exhausted();
    }

    let mut isins = Vec::with_capacity(collected.items.len());
    for item in &collected.items {
        let attributes: IsinAttributes = serde_json::from_value(item.attributes.clone())
            .map_err(|e| GleifError::MalformedResponse(format!("{}: {}", query.resource, e)))?;
        if let Some(isin) = non_empty(&attributes.isin) {
            isins.push(isin);
        }
    }
    debug!("{}: {} ISINs", lei, isins.len());
    Ok(isins)
}

/// Run an entity search and normalize every returned record
pub async fn search_entities(
    api: &dyn GleifApi,
    request: &SearchRequest,
    options: &SearchOptions,
) -> Result<SearchResultEnvelope> {
    info!(
        "Starting search for '{}' (type: {})",
        request.query,
        request.mode.as_str()
    );
    if let Some(country) = &request.country {
        info!("Filtering by country: {}", country);
    }

    let collected = api.fetch_all(&request.page_query(options)).await?;
    if !collected.complete {
        warn!(
            "Search stopped at the page ceiling after {} pages; more results exist",
            collected.pages_fetched
        );
    }

    let mut budget = InstrumentBudget::new(options.instrument_request_budget);
    let mut results = Vec::with_capacity(collected.items.len());
    for resource in &collected.items {
        let mut record = normalize_record(resource)?;
        if options.include_instruments && resource.has_relationship("isins") {
            let isins = fetch_isins(api, &record.legal_entity_id, &mut budget).await?;
            record.attach_isins(isins);
        }
        results.push(record);
    }

    info!("Search complete: {} entities found", results.len());
    Ok(SearchResultEnvelope::new(request, results))
}
