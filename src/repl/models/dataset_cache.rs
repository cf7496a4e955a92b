//! Dataset cache model
//!
//! Holds the full country collection for the lifetime of one session. The cache is
//! filled at most once by a successful bulk fetch and is read-only afterwards.

use crate::repl::errors::FetchFailure;
use crate::repl::models::CountryRecord;
use crate::repl::services::CountryClient;

/// In-memory snapshot of the bulk dataset
#[derive(Debug, Clone, Default)]
pub struct DatasetCache {
    records: Vec<CountryRecord>,
    loaded: bool,
}

impl DatasetCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve the whole collection and store it.
    ///
    /// On failure the cache stays empty and the error is handed back to the caller,
    /// which is expected to surface it and carry on.
    pub async fn load(&mut self, client: &CountryClient) -> Result<usize, FetchFailure> {
        tracing::info!("Loading country dataset from {}", client.base_url());

        let records = client.fetch_all().await.inspect_err(|e| {
            tracing::error!("Dataset load failed: {e}");
        })?;

        Ok(self.populate(records))
    }

    /// Store a freshly fetched snapshot.
    ///
    /// Only the first call has any effect; the snapshot is immutable afterwards.
    /// Returns the number of records held.
    pub fn populate(&mut self, records: Vec<CountryRecord>) -> usize {
        if self.loaded {
            tracing::warn!(
                "Dataset already populated with {} records, ignoring {} new records",
                self.records.len(),
                records.len()
            );
            return self.records.len();
        }

        self.records = records;
        self.loaded = true;
        tracing::info!("Dataset populated with {} records", self.records.len());
        self.records.len()
    }

    /// Case-insensitive substring match against common names.
    ///
    /// Returns matches in cache order. An unloaded cache matches nothing.
    pub fn query(&self, substring: &str) -> Vec<CountryRecord> {
        let needle = substring.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.name_contains(&needle))
            .cloned()
            .collect()
    }

    /// All records in their original order
    pub fn records(&self) -> &[CountryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether a bulk fetch has succeeded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
}
