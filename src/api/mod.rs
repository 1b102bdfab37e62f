pub mod client;
pub mod deserializers;
pub mod http_client;
pub mod pagination;
pub mod reference;
pub mod search;
pub mod types;

pub use client::{ClientConfig, GleifApi, GleifClient, DEFAULT_BASE_URL};
pub use pagination::{Collected, HasMore, PageQuery};
pub use reference::{
    fetch_all_reference, fetch_reference, ReferenceBundle, ReferenceEnvelope, ReferenceOptions,
    ReferenceType,
};
pub use search::{search_entities, SearchMode, SearchOptions, SearchRequest, SearchResultEnvelope};
