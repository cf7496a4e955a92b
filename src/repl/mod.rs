//! # Lookup Session
//!
//! Components of an interactive lookup session, split the way data flows through
//! it: commands turn keys into requests, the controller applies them to the
//! session models, services talk to the API, views draw the result.

pub mod commands;
pub mod controllers;
pub mod errors;
pub mod events;
pub mod io;
pub mod models;
pub mod services;
pub mod utils;
pub mod views;

// Re-export core types
pub use controllers::AppController;
pub use errors::{FetchFailure, LookupFailure};
pub use events::{CommandEvent, SessionPhase, ViewEvent};
pub use models::{CountryRecord, DatasetCache, DetailRecord, SessionState};
pub use services::{CountryClient, DetailFetcher, ResultPaginator, SuggestionEngine};
pub use views::{TerminalRenderer, ViewRenderer};
