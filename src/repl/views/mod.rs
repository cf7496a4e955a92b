//! # Views Module
//!
//! Terminal rendering of session view events.

pub mod screen;
pub mod terminal_renderer;

pub use screen::{Region, ResultArea, Screen};
pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
