//! # View Events
//!
//! Payloads the session hands to the rendering surface. Each variant is one
//! self-contained update; the surface needs no access to session state to draw it.

use crate::repl::models::{CountryRecord, DetailRecord};
use crate::repl::services::{PageControl, Suggestion};

/// Events emitted when the surface needs updating
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Query line shows new text
    QueryChanged { text: String },

    /// Autocomplete list replaced (possibly with nothing)
    SuggestionsChanged {
        suggestions: Vec<Suggestion>,
        highlighted: Option<usize>,
    },

    /// Detail card for a single country
    DetailReady { record: DetailRecord },

    /// Rows of the active result page
    TableChanged { rows: Vec<CountryRecord> },

    /// Page-number controls replaced (empty hides them)
    PageControlsChanged {
        controls: Vec<PageControl>,
        active_page: usize,
    },

    /// Plain-text error in the result area
    ErrorRaised { message: String },

    /// Loading indicator toggled
    LoadingChanged { loading: bool },

    /// Result area emptied
    ResultCleared,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_events_should_carry_payloads() {
        let event = ViewEvent::ErrorRaised {
            message: "Please enter a country name.".to_string(),
        };
        assert_eq!(
            event,
            ViewEvent::ErrorRaised {
                message: "Please enter a country name.".to_string()
            }
        );
        assert_ne!(event, ViewEvent::ResultCleared);
    }
}
