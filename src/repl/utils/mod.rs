//! # Utils Module
//!
//! Formatting helpers shared by the views.

pub mod format;

pub use format::{fit_to_width, format_population};
