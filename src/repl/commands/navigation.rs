//! # Navigation Commands
//!
//! Moving through the suggestion list and through result pages. Selections are
//! emitted through the action of the suggestion or page control they pick.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext};
use crate::repl::events::CommandEvent;
use crate::repl::services::PageControl;

/// Move the suggestion highlight (Up/Down)
pub struct SuggestionHighlightCommand;

impl Command for SuggestionHighlightCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Up | KeyCode::Down) && !context.state.suggestions.is_empty()
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let delta = if event.code == KeyCode::Up { -1 } else { 1 };
        Ok(vec![CommandEvent::SuggestionHighlightMoved { delta }])
    }

    fn name(&self) -> &'static str {
        "SuggestionHighlight"
    }
}

/// Accept the highlighted suggestion (Tab)
pub struct AcceptSuggestionCommand;

impl Command for AcceptSuggestionCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Tab) && context.state.highlighted_suggestion().is_some()
    }

    fn execute(&self, _event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(match context.state.highlighted_suggestion() {
            Some(suggestion) => vec![suggestion.action()],
            None => vec![CommandEvent::NoAction],
        })
    }

    fn name(&self) -> &'static str {
        "AcceptSuggestion"
    }
}

/// Previous/next result page (PageUp/PageDown)
pub struct PageStepCommand;

impl Command for PageStepCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::PageUp | KeyCode::PageDown) && context.state.total_pages > 0
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let delta = if event.code == KeyCode::PageUp { -1 } else { 1 };
        Ok(vec![CommandEvent::PageStepRequested { delta }])
    }

    fn name(&self) -> &'static str {
        "PageStep"
    }
}

/// Jump straight to a page (Alt+1 .. Alt+9)
pub struct JumpToPageCommand;

impl Command for JumpToPageCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::Char(ch) if event.modifiers.contains(KeyModifiers::ALT) => ch
                .to_digit(10)
                .is_some_and(|page| page >= 1 && page as usize <= context.state.total_pages),
            _ => false,
        }
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let page = match event.code {
            KeyCode::Char(ch) => ch.to_digit(10),
            _ => None,
        };
        Ok(match page {
            Some(page) => vec![PageControl { page: page as usize }.action()],
            None => vec![CommandEvent::NoAction],
        })
    }

    fn name(&self) -> &'static str {
        "JumpToPage"
    }
}

/// First/last result page (Home/End)
pub struct PageBoundaryCommand;

impl Command for PageBoundaryCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Home | KeyCode::End) && context.state.total_pages > 0
    }

    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let page = if event.code == KeyCode::Home {
            1
        } else {
            context.state.total_pages
        };
        Ok(vec![PageControl { page }.action()])
    }

    fn name(&self) -> &'static str {
        "PageBoundary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::commands::test_support::context_with;

    #[test]
    fn arrows_should_only_apply_with_suggestions() {
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert!(!SuggestionHighlightCommand.is_relevant(&context_with("zz", 0, 0), &down));

        let context = context_with("ni", 2, 0);
        assert!(SuggestionHighlightCommand.is_relevant(&context, &down));
        assert_eq!(
            SuggestionHighlightCommand.execute(down, &context).unwrap(),
            vec![CommandEvent::SuggestionHighlightMoved { delta: 1 }]
        );
    }

    #[test]
    fn tab_should_accept_highlighted_suggestion() {
        let context = context_with("ni", 2, 0);
        let tab = KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE);
        assert_eq!(
            AcceptSuggestionCommand.execute(tab, &context).unwrap(),
            vec![CommandEvent::SuggestionAccepted { index: 0 }]
        );
    }

    #[test]
    fn page_keys_should_need_pages() {
        let page_down = KeyEvent::new(KeyCode::PageDown, KeyModifiers::NONE);
        assert!(!PageStepCommand.is_relevant(&context_with("a", 0, 0), &page_down));
        assert!(PageStepCommand.is_relevant(&context_with("a", 0, 2), &page_down));
    }

    #[test]
    fn home_and_end_should_reach_first_and_last_page() {
        let context = context_with("land", 0, 25);
        let home = KeyEvent::new(KeyCode::Home, KeyModifiers::NONE);
        let end = KeyEvent::new(KeyCode::End, KeyModifiers::NONE);

        assert_eq!(
            PageBoundaryCommand.execute(home, &context).unwrap(),
            vec![CommandEvent::PageRequested { page: 1 }]
        );
        assert_eq!(
            PageBoundaryCommand.execute(end, &context).unwrap(),
            vec![CommandEvent::PageRequested { page: 25 }]
        );
        assert!(!PageBoundaryCommand.is_relevant(&context_with("land", 0, 0), &end));
    }

    #[test]
    fn alt_digit_should_jump_within_range() {
        let context = context_with("a", 0, 3);
        let alt_two = KeyEvent::new(KeyCode::Char('2'), KeyModifiers::ALT);
        let alt_five = KeyEvent::new(KeyCode::Char('5'), KeyModifiers::ALT);
        let alt_zero = KeyEvent::new(KeyCode::Char('0'), KeyModifiers::ALT);

        assert!(JumpToPageCommand.is_relevant(&context, &alt_two));
        assert!(!JumpToPageCommand.is_relevant(&context, &alt_five));
        assert!(!JumpToPageCommand.is_relevant(&context, &alt_zero));
        assert_eq!(
            JumpToPageCommand.execute(alt_two, &context).unwrap(),
            vec![CommandEvent::PageRequested { page: 2 }]
        );
    }
}
