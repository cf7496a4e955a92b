//! Retained screen model
//!
//! The renderer keeps what is currently on screen so that a single view event can
//! redraw just its own region. Applying an event reports which region changed.

use crate::repl::events::ViewEvent;
use crate::repl::models::{CountryRecord, DetailRecord};
use crate::repl::services::{PageControl, Suggestion};

/// Content of the area below the suggestion list
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultArea {
    #[default]
    Empty,
    Detail(DetailRecord),
    Table(Vec<CountryRecord>),
    Error(String),
}

/// Screen regions that can be redrawn independently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Header,
    Query,
    Suggestions,
    Result,
    PageBar,
}

#[derive(Debug, Clone, Default)]
pub struct Screen {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
    pub highlighted: Option<usize>,
    pub result: ResultArea,
    pub page_controls: Vec<PageControl>,
    pub active_page: usize,
    pub loading: bool,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold `event` into the model and return the region to redraw
    pub fn apply(&mut self, event: &ViewEvent) -> Region {
        match event {
            ViewEvent::QueryChanged { text } => {
                self.query.clone_from(text);
                Region::Query
            }
            ViewEvent::SuggestionsChanged {
                suggestions,
                highlighted,
            } => {
                self.suggestions.clone_from(suggestions);
                self.highlighted = *highlighted;
                Region::Suggestions
            }
            ViewEvent::DetailReady { record } => {
                self.result = ResultArea::Detail(record.clone());
                Region::Result
            }
            ViewEvent::TableChanged { rows } => {
                self.result = ResultArea::Table(rows.clone());
                Region::Result
            }
            ViewEvent::PageControlsChanged {
                controls,
                active_page,
            } => {
                self.page_controls.clone_from(controls);
                self.active_page = *active_page;
                Region::PageBar
            }
            ViewEvent::ErrorRaised { message } => {
                self.result = ResultArea::Error(message.clone());
                Region::Result
            }
            ViewEvent::LoadingChanged { loading } => {
                self.loading = *loading;
                Region::Header
            }
            ViewEvent::ResultCleared => {
                self.result = ResultArea::Empty;
                Region::Result
            }
        }
    }
}
