//! # Command Pattern Implementation
//!
//! Key events are mapped to [`CommandEvent`]s by a list of small commands. Each
//! command decides whether it is relevant for a key given the current session
//! snapshot; the registry runs the first relevant one. Commands never touch the
//! session themselves; the controller applies the events they produce.

use anyhow::Result;
use crossterm::event::{KeyEvent, KeyEventKind};

pub mod app;
pub mod context;
pub mod editing;
pub mod navigation;
pub mod search;

pub use context::CommandContext;

use crate::repl::events::CommandEvent;

/// Maps a key event to the events it requests
pub trait Command: Send + Sync {
    /// Whether this command handles `event` in the given context
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Produce the events for `event`
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Command name for debugging and logging
    fn name(&self) -> &'static str;
}

/// Ordered list of commands consulted for every key press
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// Registry with the default key bindings
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };
        registry.register_default_commands();
        registry
    }

    fn register_default_commands(&mut self) {
        // Modified keys first so Ctrl+F is not taken as a plain 'f'
        self.add_command(Box::new(app::AppTerminateCommand));
        self.add_command(Box::new(search::ListCommand));
        self.add_command(Box::new(navigation::JumpToPageCommand));
        self.add_command(Box::new(app::ClearCommand));
        self.add_command(Box::new(search::SearchCommand));
        self.add_command(Box::new(navigation::SuggestionHighlightCommand));
        self.add_command(Box::new(navigation::AcceptSuggestionCommand));
        self.add_command(Box::new(navigation::PageStepCommand));
        self.add_command(Box::new(navigation::PageBoundaryCommand));
        self.add_command(Box::new(editing::DeleteCharCommand));
        self.add_command(Box::new(editing::InsertCharCommand));
    }

    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Run the first relevant command for `event`.
    ///
    /// Key releases and repeats-as-release are ignored; unmatched keys produce no events.
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        if event.kind == KeyEventKind::Release {
            return Ok(Vec::new());
        }

        for command in &self.commands {
            if command.is_relevant(context, &event) {
                tracing::debug!("Key {:?} handled by {}", event.code, command.name());
                return command.execute(event, context);
            }
        }

        tracing::debug!("No command for key {:?}", event);
        Ok(Vec::new())
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
