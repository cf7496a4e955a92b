//! Session state model
//!
//! The one piece of mutable state in a session: query text, autocomplete list,
//! current filtered result set with its page, lookup generation and lifecycle
//! phase. Every handler takes the state by mutable reference and returns the view
//! events the surface has to apply; nothing here touches I/O.

use crate::repl::errors::{FetchFailure, LookupFailure};
use crate::repl::events::{SessionPhase, ViewEvent};
use crate::repl::models::{CountryRecord, DatasetCache};
use crate::repl::services::{LookupResponse, ResultPaginator, Suggestion, SuggestionEngine};

/// A lookup the controller should start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    /// Trimmed name to look up
    pub name: String,
    pub generation: u64,
}

/// Read-only view of the session used by commands to decide what a key means
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    pub highlighted: Option<usize>,
    pub current_page: usize,
    pub total_pages: usize,
    pub phase: SessionPhase,
}

impl SessionSnapshot {
    /// Suggestion under the highlight, if any
    pub fn highlighted_suggestion(&self) -> Option<&Suggestion> {
        self.highlighted.and_then(|index| self.suggestions.get(index))
    }
}

/// Mutable state of one lookup session
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    query: String,
    suggestions: Vec<Suggestion>,
    highlighted: Option<usize>,
    results: Vec<CountryRecord>,
    paginator: ResultPaginator,
    generation: u64,
    phase: SessionPhase,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Current filtered result set
    pub fn results(&self) -> &[CountryRecord] {
        &self.results
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.paginator.total_pages(&self.results)
    }

    /// Generation of the most recent lookup (or clear)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            query: self.query.clone(),
            suggestions: self.suggestions.clone(),
            highlighted: self.highlighted,
            current_page: self.current_page(),
            total_pages: self.total_pages(),
            phase: self.phase,
        }
    }

    /// Bulk download started
    pub fn begin_loading(&mut self) -> Vec<ViewEvent> {
        self.phase = SessionPhase::Loading;
        vec![ViewEvent::LoadingChanged { loading: true }]
    }

    /// Bulk download finished; a failure is shown but the session still becomes ready
    pub fn finish_loading(&mut self, outcome: Result<usize, FetchFailure>) -> Vec<ViewEvent> {
        self.phase = SessionPhase::Ready;
        let mut events = vec![ViewEvent::LoadingChanged { loading: false }];
        if let Err(failure) = outcome {
            events.push(ViewEvent::ErrorRaised {
                message: failure.user_message().to_string(),
            });
        }
        events
    }

    /// Query text changed: recompute autocomplete
    pub fn input_changed(
        &mut self,
        text: String,
        cache: &DatasetCache,
        engine: &SuggestionEngine,
    ) -> Vec<ViewEvent> {
        self.suggestions = engine.suggest(&text, cache);
        self.highlighted = if self.suggestions.is_empty() {
            None
        } else {
            Some(0)
        };
        self.query = text;

        vec![
            ViewEvent::QueryChanged {
                text: self.query.clone(),
            },
            self.suggestions_event(),
        ]
    }

    /// Move the highlight through the suggestion list, wrapping at both ends
    pub fn move_highlight(&mut self, delta: isize) -> Vec<ViewEvent> {
        let count = self.suggestions.len() as isize;
        if count == 0 {
            return Vec::new();
        }
        let current = self.highlighted.unwrap_or(0) as isize;
        self.highlighted = Some((current + delta).rem_euclid(count) as usize);
        vec![self.suggestions_event()]
    }

    /// Selection action of a suggestion: the query becomes its exact name and
    /// the list is cleared
    pub fn accept_suggestion(&mut self, index: usize) -> Vec<ViewEvent> {
        let Some(suggestion) = self.suggestions.get(index) else {
            tracing::debug!("No suggestion at index {index}");
            return Vec::new();
        };

        self.query = suggestion.text().to_string();
        self.suggestions.clear();
        self.highlighted = None;

        vec![
            ViewEvent::QueryChanged {
                text: self.query.clone(),
            },
            self.suggestions_event(),
        ]
    }

    /// Explicit search. Blank text is rejected here, before any request exists.
    pub fn begin_search(&mut self) -> (Option<LookupTicket>, Vec<ViewEvent>) {
        let name = self.query.trim();
        if name.is_empty() {
            return (
                None,
                vec![ViewEvent::ErrorRaised {
                    message: LookupFailure::EmptyInput.user_message().to_string(),
                }],
            );
        }

        self.generation += 1;
        self.phase = SessionPhase::Searching;
        let ticket = LookupTicket {
            name: name.to_string(),
            generation: self.generation,
        };
        tracing::debug!("Search #{} for '{}'", ticket.generation, ticket.name);

        (Some(ticket), vec![ViewEvent::LoadingChanged { loading: true }])
    }

    /// Apply a finished lookup. Responses from superseded generations are dropped.
    pub fn complete_search(&mut self, response: LookupResponse) -> Vec<ViewEvent> {
        if response.generation != self.generation {
            tracing::debug!(
                "Discarding stale lookup #{} for '{}' (current #{})",
                response.generation,
                response.query,
                self.generation
            );
            return Vec::new();
        }

        self.phase = SessionPhase::Ready;
        let outcome = match response.result {
            Ok(record) => ViewEvent::DetailReady { record },
            Err(failure) => ViewEvent::ErrorRaised {
                message: failure.user_message().to_string(),
            },
        };
        vec![ViewEvent::LoadingChanged { loading: false }, outcome]
    }

    /// Filter the dataset by the current query and show the first page
    pub fn list(&mut self, cache: &DatasetCache) -> Vec<ViewEvent> {
        self.results = cache.query(&self.query);
        let controls = self.paginator.paginate(&self.results);
        tracing::debug!("'{}' matched {} countries", self.query, self.results.len());

        let table = if self.results.is_empty() {
            ViewEvent::ResultCleared
        } else {
            ViewEvent::TableChanged {
                rows: self.paginator.current_rows(&self.results).to_vec(),
            }
        };

        vec![
            table,
            ViewEvent::PageControlsChanged {
                controls,
                active_page: self.paginator.current_page(),
            },
        ]
    }

    /// Show another page of the same result set
    pub fn select_page(&mut self, page: usize) -> Vec<ViewEvent> {
        let Some(rows) = self.paginator.select(&self.results, page) else {
            return Vec::new();
        };

        vec![
            ViewEvent::TableChanged {
                rows: rows.to_vec(),
            },
            ViewEvent::PageControlsChanged {
                controls: self.paginator.controls(&self.results),
                active_page: self.paginator.current_page(),
            },
        ]
    }

    /// Move `delta` pages from the active one
    pub fn step_page(&mut self, delta: isize) -> Vec<ViewEvent> {
        match self.paginator.relative_page(&self.results, delta) {
            Some(page) if page != self.paginator.current_page() => self.select_page(page),
            _ => Vec::new(),
        }
    }

    /// Reset query, suggestions and results.
    ///
    /// Also advances the generation so a lookup still in flight cannot repaint
    /// the cleared screen.
    pub fn clear(&mut self) -> Vec<ViewEvent> {
        self.query.clear();
        self.suggestions.clear();
        self.highlighted = None;
        self.results.clear();
        self.paginator.paginate(&self.results);
        self.generation += 1;

        let mut events = Vec::new();
        if self.phase == SessionPhase::Searching {
            self.phase = SessionPhase::Ready;
            events.push(ViewEvent::LoadingChanged { loading: false });
        }
        events.extend([
            ViewEvent::QueryChanged {
                text: String::new(),
            },
            self.suggestions_event(),
            ViewEvent::ResultCleared,
            ViewEvent::PageControlsChanged {
                controls: Vec::new(),
                active_page: 1,
            },
        ]);
        events
    }

    fn suggestions_event(&self) -> ViewEvent {
        ViewEvent::SuggestionsChanged {
            suggestions: self.suggestions.clone(),
            highlighted: self.highlighted,
        }
    }
}
