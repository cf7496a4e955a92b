//! # Detail Service
//!
//! Exact-match lookups for the detail card. A lookup can be awaited directly or
//! spawned onto the runtime; spawned lookups report back through a channel tagged
//! with the generation they were started under, so the caller can drop answers to
//! questions nobody is asking any more.

use crate::repl::errors::LookupFailure;
use crate::repl::models::DetailRecord;
use crate::repl::services::CountryClient;
use tokio::sync::mpsc;

/// Outcome of a spawned lookup
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResponse {
    /// Generation the lookup was issued under
    pub generation: u64,
    /// Name as it was sent
    pub query: String,
    pub result: Result<DetailRecord, LookupFailure>,
    pub duration_ms: u64,
}

/// Performs exact-name lookups and normalizes the first candidate
pub struct DetailFetcher {
    client: CountryClient,
    response_receiver: mpsc::Receiver<LookupResponse>,
    response_sender: mpsc::Sender<LookupResponse>,
    in_flight: usize,
}

impl DetailFetcher {
    pub fn new(client: CountryClient) -> Self {
        let (response_sender, response_receiver) = mpsc::channel(16);
        Self {
            client,
            response_receiver,
            response_sender,
            in_flight: 0,
        }
    }

    pub fn client(&self) -> &CountryClient {
        &self.client
    }

    /// Look up `name` and build the detail record from the first candidate
    pub async fn fetch_by_exact_name(&self, name: &str) -> Result<DetailRecord, LookupFailure> {
        Self::lookup(&self.client, name).await
    }

    async fn lookup(client: &CountryClient, name: &str) -> Result<DetailRecord, LookupFailure> {
        let candidates = client.fetch_by_name(name).await?;

        let first = candidates
            .first()
            .ok_or_else(|| LookupFailure::NoMatch(name.trim().to_string()))?;
        if candidates.len() > 1 {
            tracing::debug!(
                "{} candidates for '{}', using the first",
                candidates.len(),
                name.trim()
            );
        }

        let record = DetailRecord::from_candidate(first);
        if !record.is_complete() {
            tracing::warn!(
                "Candidate for '{}' is missing fields: {:?}",
                name.trim(),
                record.missing_fields()
            );
        }
        Ok(record)
    }

    /// Run a lookup in the background.
    ///
    /// The response arrives through [`DetailFetcher::poll_response`] or
    /// [`DetailFetcher::next_response`].
    pub fn execute_async(&mut self, name: String, generation: u64) {
        let client = self.client.clone();
        let result_sender = self.response_sender.clone();
        self.in_flight += 1;

        tokio::spawn(async move {
            let start_time = std::time::Instant::now();
            let result = Self::lookup(&client, &name).await;
            if let Err(e) = &result {
                tracing::info!("Lookup #{generation} for '{name}' failed: {e}");
            }

            let response = LookupResponse {
                generation,
                query: name,
                result,
                duration_ms: start_time.elapsed().as_millis() as u64,
            };

            // Receiver may be gone if the session ended
            let _ = result_sender.send(response).await;
        });
    }

    /// Take a finished lookup without waiting
    pub fn poll_response(&mut self) -> Option<LookupResponse> {
        let response = self.response_receiver.try_recv().ok()?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(response)
    }

    /// Wait for the next finished lookup, or `None` when nothing is pending
    pub async fn next_response(&mut self) -> Option<LookupResponse> {
        if self.in_flight == 0 {
            return None;
        }
        let response = self.response_receiver.recv().await?;
        self.in_flight = self.in_flight.saturating_sub(1);
        Some(response)
    }

    /// Number of spawned lookups that have not been collected yet
    pub fn pending(&self) -> usize {
        self.in_flight
    }
}
