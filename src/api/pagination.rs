//! Page-at-a-time retrieval of JSON:API collections.
//!
//! The loop itself lives in [`GleifClient::fetch_all`](super::GleifClient); this module
//! holds the query description and the termination rules it applies after every page.

use super::types::{Document, Resource};

/// How to tell whether a collection has more pages after the current one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HasMore {
    /// Continue while `meta.pagination.lastPage` is beyond the current page
    LastPage,
    /// Continue while the document carries a `links.next` URL
    NextLink,
    /// Continue while fewer items than `meta.pagination.total` were collected
    TotalCount,
}

impl HasMore {
    pub fn has_more(&self, page: &Document, current_page: u32, fetched: usize) -> bool {
        match self {
            Self::LastPage => page
                .meta
                .pagination
                .last_page
                .map(|last| current_page < last)
                .unwrap_or(false),
            Self::NextLink => page
                .links
                .next
                .as_deref()
                .map(|next| !next.is_empty())
                .unwrap_or(false),
            Self::TotalCount => page
                .meta
                .pagination
                .total
                .map(|total| fetched < total as usize)
                .unwrap_or(false),
        }
    }
}

/// One logical query against a paginated resource
#[derive(Debug, Clone)]
pub struct PageQuery {
    /// Resource path relative to the API base URL, e.g. `lei-records`
    pub resource: String,
    /// Filter parameters sent with every page request
    pub params: Vec<(String, String)>,
    /// Value of `page[size]`
    pub page_size: u32,
    /// Hard ceiling on the number of page requests
    pub max_pages: Option<u32>,
    pub has_more: HasMore,
}

impl PageQuery {
    pub fn new(resource: impl Into<String>, page_size: u32) -> Self {
        Self {
            resource: resource.into(),
            params: Vec::new(),
            page_size,
            max_pages: None,
            has_more: HasMore::LastPage,
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn has_more(mut self, has_more: HasMore) -> Self {
        self.has_more = has_more;
        self
    }

    /// Query parameters for one page request: filters first, then paging
    pub fn page_params(&self, page: u32) -> Vec<(String, String)> {
        let mut params = self.params.clone();
        params.push(("page[number]".to_string(), page.to_string()));
        params.push(("page[size]".to_string(), self.page_size.to_string()));
        params
    }

    /// Whether another page may be requested after `pages_fetched` pages
    pub fn within_ceiling(&self, pages_fetched: u32) -> bool {
        self.max_pages.map(|max| pages_fetched < max).unwrap_or(true)
    }
}

/// Everything a paginated fetch collected
#[derive(Debug, Clone, Default)]
pub struct Collected {
    /// Items of every page, in request order
    pub items: Vec<Resource>,
    /// Number of page requests issued
    pub pages_fetched: u32,
    /// False when the page ceiling stopped the fetch before the API ran out of pages
    pub complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(meta: serde_json::Value, links: serde_json::Value) -> Document {
        serde_json::from_value(json!({"data": [], "meta": meta, "links": links})).unwrap()
    }

    #[test]
    fn test_last_page_predicate() {
        let doc = page(json!({"pagination": {"currentPage": 1, "lastPage": 3}}), json!({}));
        assert!(HasMore::LastPage.has_more(&doc, 1, 10));
        assert!(HasMore::LastPage.has_more(&doc, 2, 20));
        assert!(!HasMore::LastPage.has_more(&doc, 3, 30));

        let doc = page(json!({"pagination": {}}), json!({}));
        assert!(!HasMore::LastPage.has_more(&doc, 1, 10));
    }

    #[test]
    fn test_next_link_predicate() {
        let doc = page(json!({}), json!({"next": "https://api.gleif.org/api/v1/countries?page[number]=2"}));
        assert!(HasMore::NextLink.has_more(&doc, 1, 0));

        let doc = page(json!({}), json!({"next": null}));
        assert!(!HasMore::NextLink.has_more(&doc, 1, 0));

        let doc = page(json!({}), json!({"next": ""}));
        assert!(!HasMore::NextLink.has_more(&doc, 1, 0));
    }

    #[test]
    fn test_total_count_predicate() {
        let doc = page(json!({"pagination": {"total": 25}}), json!({}));
        assert!(HasMore::TotalCount.has_more(&doc, 1, 10));
        assert!(HasMore::TotalCount.has_more(&doc, 2, 20));
        assert!(!HasMore::TotalCount.has_more(&doc, 3, 25));
    }

    #[test]
    fn test_page_params_order() {
        let query = PageQuery::new("lei-records", 100).param("filter[fulltext]", "Citibank");
        assert_eq!(
            query.page_params(2),
            vec![
                ("filter[fulltext]".to_string(), "Citibank".to_string()),
                ("page[number]".to_string(), "2".to_string()),
                ("page[size]".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn test_ceiling() {
        let unbounded = PageQuery::new("countries", 200);
        assert!(unbounded.within_ceiling(10_000));

        let bounded = PageQuery::new("countries", 200).max_pages(Some(2));
        assert!(bounded.within_ceiling(1));
        assert!(!bounded.within_ceiling(2));
    }
}
