//! # Search Commands
//!
//! Explicit actions on the query: exact-match lookup (Enter) and filtered listing
//! (Ctrl+F).

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext};
use crate::repl::events::CommandEvent;

/// Look up the query as an exact country name (Enter)
pub struct SearchCommand;

impl Command for SearchCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Enter)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        // Blank queries are rejected by the session, which owns the message
        Ok(vec![CommandEvent::SearchRequested])
    }

    fn name(&self) -> &'static str {
        "Search"
    }
}

/// Show every cached country whose name contains the query (Ctrl+F)
pub struct ListCommand;

impl Command for ListCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('f')) && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ListRequested])
    }

    fn name(&self) -> &'static str {
        "List"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::commands::test_support::context_with;

    #[test]
    fn enter_should_search_even_when_blank() {
        let context = context_with("", 0, 0);
        let event = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(SearchCommand.is_relevant(&context, &event));
        assert_eq!(
            SearchCommand.execute(event, &context).unwrap(),
            vec![CommandEvent::SearchRequested]
        );
    }

    #[test]
    fn plain_f_should_not_list() {
        let context = context_with("", 0, 0);
        let event = KeyEvent::new(KeyCode::Char('f'), KeyModifiers::NONE);
        assert!(!ListCommand.is_relevant(&context, &event));
    }
}
