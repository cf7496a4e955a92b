//! # HTTP Service
//!
//! Talks to the REST Countries API. Two calls exist: the bulk download of every
//! record and the exact-match lookup of a single name.

use crate::repl::errors::{FetchFailure, LookupFailure};
use crate::repl::models::CountryRecord;
use anyhow::Result;
use reqwest::{StatusCode, Url};
use serde_json::Value;

/// Public REST Countries endpoint
pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Projection requested on the bulk endpoint; the service rejects `/all` without it
pub const BULK_FIELDS: &str =
    "name,population,region,capital,flags,continents,currencies,languages";

const DEFAULT_USER_AGENT: &str = concat!("countryline/", env!("CARGO_PKG_VERSION"));

/// Thin client over the two country endpoints
///
/// Cloning is cheap; clones share the underlying connection pool, which is how
/// spawned lookups get their own handle.
#[derive(Debug, Clone)]
pub struct CountryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CountryClient {
    /// Create a client rooted at `base_url`
    pub fn new(base_url: &str, user_agent: Option<&str>) -> Result<Self> {
        tracing::debug!("Creating CountryClient for {base_url}");
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid base URL '{base_url}': {e}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow::anyhow!("Base URL '{base_url}' cannot carry a path"));
        }

        let http = reqwest::Client::builder()
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .build()?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the bulk endpoint
    pub fn all_url(&self) -> Url {
        let mut url = self.endpoint(&["all"]);
        url.query_pairs_mut().append_pair("fields", BULK_FIELDS);
        url
    }

    /// URL of the exact-match endpoint; the name is percent-encoded into the path
    pub fn name_url(&self, name: &str) -> Url {
        let mut url = self.endpoint(&["name", name]);
        url.query_pairs_mut().append_pair("fullText", "true");
        url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in new()
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Download the entire collection in one request
    pub async fn fetch_all(&self) -> Result<Vec<CountryRecord>, FetchFailure> {
        let url = self.all_url();
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchFailure::Transport(e.to_string()))?;

        serde_json::from_str::<Vec<CountryRecord>>(&body)
            .map_err(|e| FetchFailure::Parse(e.to_string()))
    }

    /// Exact full-name lookup returning the raw candidate list.
    ///
    /// Candidates stay as JSON values so that a record with gaps can still be
    /// projected field by field.
    pub async fn fetch_by_name(&self, name: &str) -> Result<Vec<Value>, LookupFailure> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LookupFailure::EmptyInput);
        }

        let url = self.name_url(name);
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LookupFailure::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LookupFailure::NoMatch(name.to_string()));
        }
        if !status.is_success() {
            return Err(LookupFailure::Transport(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupFailure::Transport(e.to_string()))?;

        serde_json::from_str::<Vec<Value>>(&body)
            .map_err(|e| LookupFailure::MalformedResponse(e.to_string()))
    }
}
