//! List queries

use crate::application::config::RosterConfig;

/// Page, size, search and extra filters for a list request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub filters: Vec<(String, String)>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.filters.push((key.into(), value.to_string()));
        self
    }

    /// Query pairs in a stable order, so equal queries share a cache key
    pub fn to_pairs(&self, config: &RosterConfig) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.unwrap_or(1).max(1).to_string()),
            ("limit".to_string(), config.page_size(self.limit).to_string()),
        ];

        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search".to_string(), search.to_string()));
        }

        let mut filters = self.filters.clone();
        filters.sort();
        pairs.extend(filters);
        pairs
    }
}
