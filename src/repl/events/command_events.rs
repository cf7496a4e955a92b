//! # Command Events
//!
//! Events produced by commands that describe what the user asked for.
//! Commands produce these events, and the controller applies them to the session.
//! This maintains proper separation of concerns - commands suggest, controller decides.

/// Events that commands can produce to request changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandEvent {
    /// Query text was edited; carries the full new text
    QueryEdited { text: String },

    /// Move the suggestion highlight by `delta`, wrapping at the ends
    SuggestionHighlightMoved { delta: isize },

    /// Accept the suggestion at `index`
    SuggestionAccepted { index: usize },

    /// Exact-match lookup of the current query
    SearchRequested,

    /// Filter the dataset by the current query and show the table
    ListRequested,

    /// Show `page` of the current result set
    PageRequested { page: usize },

    /// Move `delta` pages from the active one
    PageStepRequested { delta: isize },

    /// Reset query, suggestions and results
    ClearRequested,

    /// Leave the application
    QuitRequested,

    /// Nothing to do
    NoAction,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_events_should_compare_by_payload() {
        assert_eq!(
            CommandEvent::PageRequested { page: 2 },
            CommandEvent::PageRequested { page: 2 }
        );
        assert_ne!(
            CommandEvent::QueryEdited {
                text: "fr".to_string()
            },
            CommandEvent::QueryEdited {
                text: "fra".to_string()
            }
        );
    }
}
