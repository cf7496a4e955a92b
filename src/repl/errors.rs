//! # Error Taxonomy
//!
//! Recoverable failures of the country pipeline. None of these end the session;
//! the controller turns each one into a line of text on the rendering surface.

/// Message shown when the bulk dataset could not be retrieved
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch countries.";

/// Message shown when a search is attempted with blank input
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a country name.";

/// Message shown when an exact-match lookup produced nothing usable
pub const INVALID_NAME_MESSAGE: &str = "Please enter a valid country name.";

/// Bulk dataset load failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchFailure {
    #[error("Bulk request failed: {0}")]
    Transport(String),

    #[error("Bulk request returned HTTP {0}")]
    Status(u16),

    #[error("Bulk response could not be parsed: {0}")]
    Parse(String),
}

impl FetchFailure {
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

/// Single-country lookup failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupFailure {
    /// Blank search text; rejected before any network call
    #[error("Search text is empty")]
    EmptyInput,

    /// Well-formed response without candidates
    #[error("No country matched '{0}'")]
    NoMatch(String),

    #[error("Lookup request failed: {0}")]
    Transport(String),

    /// Body was not the expected JSON array
    #[error("Lookup response was malformed: {0}")]
    MalformedResponse(String),
}

impl LookupFailure {
    /// Text for the rendering surface.
    ///
    /// Transport and malformed-body failures share the no-match wording on purpose;
    /// the variant itself is only visible in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            LookupFailure::EmptyInput => EMPTY_INPUT_MESSAGE,
            LookupFailure::NoMatch(_)
            | LookupFailure::Transport(_)
            | LookupFailure::MalformedResponse(_) => INVALID_NAME_MESSAGE,
        }
    }
}
