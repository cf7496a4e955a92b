//! # countryline - Terminal Country Lookup
//!
//! Looks up countries against the REST Countries API with live autocomplete over
//! a locally cached dataset, exact-name detail cards and a paginated result table.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐  key events  ┌──────────────┐ command events ┌──────────────┐
//! │ EventStream │─────────────▶│   Commands   │───────────────▶│  Controller  │
//! └─────────────┘              └──────────────┘                └──────┬───────┘
//!                                                                     │
//!                        ┌──────────────┐   view events   ┌───────────▼──────┐
//!                        │ TerminalRen- │◀────────────────│  SessionState    │
//!                        │ derer        │                 │  + DatasetCache  │
//!                        └──────────────┘                 └───────────┬──────┘
//!                                                                     │ lookups
//!                                                          ┌──────────▼───────┐
//!                                                          │ Services (HTTP)  │
//!                                                          └──────────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod logging;
pub mod repl;

// Re-export main types for easy access
pub use repl::*;
