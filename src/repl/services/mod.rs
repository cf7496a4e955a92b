//! # Services Layer
//!
//! Business logic used by the controller. Services encapsulate the external
//! data source and the derivations computed from the cached dataset:
//! - HTTP access to the country API
//! - Exact-match detail lookups (with background execution)
//! - Autocomplete suggestions
//! - Result pagination

pub mod detail;
pub mod http;
pub mod paginator;
pub mod suggestion;

// Re-export service types
pub use detail::{DetailFetcher, LookupResponse};
pub use http::{CountryClient, BULK_FIELDS, DEFAULT_BASE_URL};
pub use paginator::{page, total_pages, PageControl, PageState, ResultPaginator, PAGE_SIZE};
pub use suggestion::{Suggestion, SuggestionEngine, MAX_SUGGESTIONS};

/// Aggregates all services for convenient access
pub struct Services {
    /// Exact-match lookups against the remote API
    pub detail: DetailFetcher,
    /// Autocomplete over the cached dataset
    pub suggestions: SuggestionEngine,
}

impl Services {
    /// Create services sharing one HTTP client
    pub fn new(client: CountryClient) -> Self {
        Self {
            detail: DetailFetcher::new(client),
            suggestions: SuggestionEngine::new(),
        }
    }

    pub fn client(&self) -> &CountryClient {
        self.detail.client()
    }
}
