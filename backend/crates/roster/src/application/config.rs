//! Application Configuration
//!
//! Configuration for the roster resource clients.

/// Roster configuration
#[derive(Debug, Clone)]
pub struct RosterConfig {
    /// Page size used when a query does not set one
    pub default_page_size: u32,
    /// Upper bound accepted by the backend
    pub max_page_size: u32,
    /// Serve repeated reads from the query cache
    pub cache_reads: bool,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            default_page_size: 20,
            max_page_size: 100,
            cache_reads: true,
        }
    }
}

impl RosterConfig {
    /// Always hit the backend (console one-shot commands)
    pub fn uncached() -> Self {
        Self {
            cache_reads: false,
            ..Default::default()
        }
    }

    /// Clamp a requested page size into the accepted range
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        requested
            .unwrap_or(self.default_page_size)
            .clamp(1, self.max_page_size)
    }
}
