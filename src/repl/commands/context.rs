//! # Command Context
//!
//! Read-only session information handed to commands so they can decide whether a
//! key applies and what it means.

use crate::repl::models::SessionSnapshot;

/// Base context available to all commands
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub state: SessionSnapshot,
}

impl CommandContext {
    pub fn new(state: SessionSnapshot) -> Self {
        Self { state }
    }
}
