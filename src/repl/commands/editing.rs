//! # Query Editing Commands
//!
//! Typing and deleting characters in the query line. Each edit emits the complete
//! new query text so the controller can recompute suggestions from it.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext};
use crate::repl::events::CommandEvent;

/// Append a printable character to the query
pub struct InsertCharCommand;

impl Command for InsertCharCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::Char(ch) => {
                !ch.is_control()
                    && !event
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
            }
            _ => false,
        }
    }

    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let KeyCode::Char(ch) = event.code else {
            return Ok(vec![CommandEvent::NoAction]);
        };
        let mut text = context.state.query.clone();
        text.push(ch);
        Ok(vec![CommandEvent::QueryEdited { text }])
    }

    fn name(&self) -> &'static str {
        "InsertChar"
    }
}

/// Remove the last character of the query (Backspace)
pub struct DeleteCharCommand;

impl Command for DeleteCharCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Backspace) && !context.state.query.is_empty()
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let mut text = context.state.query.clone();
        text.pop();
        Ok(vec![CommandEvent::QueryEdited { text }])
    }

    fn name(&self) -> &'static str {
        "DeleteChar"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::commands::test_support::context_with;

    #[test]
    fn insert_should_accept_shifted_and_unicode_chars() {
        let context = context_with("C", 0, 0);
        let upper = KeyEvent::new(KeyCode::Char('O'), KeyModifiers::SHIFT);
        assert!(InsertCharCommand.is_relevant(&context, &upper));

        let accented = KeyEvent::new(KeyCode::Char('ô'), KeyModifiers::NONE);
        let events = InsertCharCommand.execute(accented, &context).unwrap();
        assert_eq!(
            events,
            vec![CommandEvent::QueryEdited {
                text: "Cô".to_string()
            }]
        );
    }

    #[test]
    fn insert_should_ignore_control_chords() {
        let context = context_with("", 0, 0);
        let chord = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert!(!InsertCharCommand.is_relevant(&context, &chord));
    }

    #[test]
    fn backspace_should_drop_last_char() {
        let context = context_with("Cô", 0, 0);
        let event = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(
            DeleteCharCommand.execute(event, &context).unwrap(),
            vec![CommandEvent::QueryEdited {
                text: "C".to_string()
            }]
        );
    }

    #[test]
    fn backspace_on_empty_query_should_not_apply() {
        let context = context_with("", 0, 0);
        let event = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert!(!DeleteCharCommand.is_relevant(&context, &event));
    }
}
