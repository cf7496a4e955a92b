//! # Application Control Commands
//!
//! Commands for controlling the session as a whole: quitting and clearing.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext};
use crate::repl::events::CommandEvent;

/// Terminate application (Ctrl+C)
pub struct AppTerminateCommand;

impl Command for AppTerminateCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('c')) && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::QuitRequested])
    }

    fn name(&self) -> &'static str {
        "AppTerminate"
    }
}

/// Clear query, suggestions and results (Esc)
pub struct ClearCommand;

impl Command for ClearCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Esc)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ClearRequested])
    }

    fn name(&self) -> &'static str {
        "Clear"
    }
}
