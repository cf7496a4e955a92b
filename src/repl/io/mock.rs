//! # Mock I/O
//!
//! Scripted key input and an in-memory screen for driving the controller in
//! tests. The mock screen keeps a character grid so assertions can read rows
//! the way a user would see them; styling escapes are dropped.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Pre-programmed input events
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn push_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.push_event(Event::Key(KeyEvent::new(code, modifiers)));
    }

    /// One unmodified key press per character of `text`
    pub fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.push_key(KeyCode::Char(ch), KeyModifiers::NONE);
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

impl Default for MockEventStream {
    fn default() -> Self {
        Self::empty()
    }
}

/// Non-text operation recorded by [`MockRenderStream`]
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    ClearLine(u16),
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Flush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EscapeState {
    Text,
    Escape,
    Csi,
}

#[derive(Debug)]
struct MockScreen {
    commands: Vec<RenderCommand>,
    rows: Vec<Vec<char>>,
    size: TerminalSize,
    cursor: (u16, u16),
    escape: EscapeState,
    cursor_visible: bool,
    raw_mode: bool,
    alternate_screen: bool,
}

impl MockScreen {
    fn blank_rows(size: TerminalSize) -> Vec<Vec<char>> {
        vec![vec![' '; size.0 as usize]; size.1 as usize]
    }

    fn put(&mut self, ch: char) {
        self.escape = match (self.escape, ch) {
            (EscapeState::Text, '\x1b') => EscapeState::Escape,
            (EscapeState::Escape, '[') => EscapeState::Csi,
            (EscapeState::Escape, _) => EscapeState::Text,
            (EscapeState::Csi, '@'..='~') => EscapeState::Text,
            (EscapeState::Csi, _) => EscapeState::Csi,
            (EscapeState::Text, _) => {
                self.put_visible(ch);
                EscapeState::Text
            }
        };
    }

    fn put_visible(&mut self, ch: char) {
        if ch == '\r' || ch == '\n' {
            return;
        }
        let (x, y) = self.cursor;
        if let Some(cell) = self
            .rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            *cell = ch;
        }
        self.cursor.0 = x.saturating_add(1);
    }
}

/// In-memory terminal.
///
/// Clones share one screen, so a test can keep a handle while the controller
/// owns the stream.
#[derive(Debug, Clone)]
pub struct MockRenderStream {
    screen: Arc<Mutex<MockScreen>>,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((100, 40))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            screen: Arc::new(Mutex::new(MockScreen {
                commands: Vec::new(),
                rows: MockScreen::blank_rows(size),
                size,
                cursor: (0, 0),
                escape: EscapeState::Text,
                cursor_visible: true,
                raw_mode: false,
                alternate_screen: false,
            })),
        }
    }

    fn screen(&self) -> MutexGuard<'_, MockScreen> {
        self.screen.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, command: RenderCommand) {
        self.screen().commands.push(command);
    }

    pub fn get_commands(&self) -> Vec<RenderCommand> {
        self.screen().commands.clone()
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.screen().commands.contains(command)
    }

    pub fn clear_commands(&self) {
        self.screen().commands.clear();
    }

    /// Visible text of row `y` with trailing blanks removed
    pub fn row_text(&self, y: u16) -> String {
        self.screen()
            .rows
            .get(y as usize)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// All rows joined by newlines
    pub fn screen_text(&self) -> String {
        let rows = self.screen().size.1;
        (0..rows)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any row contains `needle`
    pub fn shows(&self, needle: &str) -> bool {
        let rows = self.screen().size.1;
        (0..rows).any(|y| self.row_text(y).contains(needle))
    }

    pub fn is_raw_mode(&self) -> bool {
        self.screen().raw_mode
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.screen().alternate_screen
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.screen().cursor_visible
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let mut screen = self.screen();
        for ch in text.chars() {
            screen.put(ch);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        let mut screen = self.screen();
        screen.commands.push(RenderCommand::ClearScreen);
        let size = screen.size;
        screen.rows = MockScreen::blank_rows(size);
        Ok(())
    }

    fn clear_line(&mut self, y: u16) -> Result<()> {
        let mut screen = self.screen();
        screen.commands.push(RenderCommand::ClearLine(y));
        if let Some(row) = screen.rows.get_mut(y as usize) {
            row.iter_mut().for_each(|cell| *cell = ' ');
        }
        screen.cursor = (0, y);
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        let mut screen = self.screen();
        screen.commands.push(RenderCommand::MoveCursor(x, y));
        screen.cursor = (x, y);
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        let mut screen = self.screen();
        screen.commands.push(RenderCommand::HideCursor);
        screen.cursor_visible = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        let mut screen = self.screen();
        screen.commands.push(RenderCommand::ShowCursor);
        screen.cursor_visible = true;
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.screen().size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        let mut screen = self.screen();
        screen.commands.push(RenderCommand::EnterAlternateScreen);
        screen.alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        let mut screen = self.screen();
        screen.commands.push(RenderCommand::LeaveAlternateScreen);
        screen.alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        let mut screen = self.screen();
        screen.commands.push(RenderCommand::EnableRawMode);
        screen.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        let mut screen = self.screen();
        screen.commands.push(RenderCommand::DisableRawMode);
        screen.raw_mode = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::queue;
    use crossterm::style::{Attribute, Print, SetAttribute};

    #[test]
    fn mock_event_stream_should_provide_events_in_order() {
        let mut stream = MockEventStream::empty();
        stream.push_text("ab");

        assert!(stream.poll(Duration::from_millis(0)).unwrap());
        match stream.read().unwrap() {
            Event::Key(key) => assert_eq!(key.code, KeyCode::Char('a')),
            other => panic!("Expected key event, got {other:?}"),
        }
        assert_eq!(stream.remaining(), 1);
        stream.read().unwrap();

        assert!(!stream.poll(Duration::from_millis(0)).unwrap());
        assert!(stream.read().is_err());
    }

    #[test]
    fn mock_render_stream_should_place_text_at_cursor() {
        let mut stream = MockRenderStream::with_size((20, 3));
        stream.move_cursor(2, 1).unwrap();
        stream.write_all(b"Hello").unwrap();

        assert_eq!(stream.row_text(1), "  Hello");
        assert_eq!(stream.row_text(0), "");
    }

    #[test]
    fn mock_render_stream_should_drop_styling_escapes() {
        let mut stream = MockRenderStream::with_size((20, 2));
        stream.move_cursor(0, 0).unwrap();
        queue!(
            stream,
            SetAttribute(Attribute::Reverse),
            Print("Chad"),
            SetAttribute(Attribute::Reset)
        )
        .unwrap();

        assert_eq!(stream.row_text(0), "Chad");
    }

    #[test]
    fn clones_should_share_one_screen() {
        let handle = MockRenderStream::with_size((20, 2));
        let mut stream = handle.clone();
        stream.move_cursor(0, 1).unwrap();
        stream.write_all(b"Peru").unwrap();
        stream.clear_line(0).unwrap();

        assert!(handle.shows("Peru"));
        assert!(handle.has_command(&RenderCommand::ClearLine(0)));

        stream.clear_line(1).unwrap();
        assert!(!handle.shows("Peru"));
    }

    #[test]
    fn mock_render_stream_should_track_terminal_state() {
        let mut stream = MockRenderStream::with_size((120, 40));
        assert_eq!(stream.get_size().unwrap(), (120, 40));

        stream.hide_cursor().unwrap();
        stream.enable_raw_mode().unwrap();
        stream.enter_alternate_screen().unwrap();

        assert!(!stream.is_cursor_visible());
        assert!(stream.is_raw_mode());
        assert!(stream.is_alternate_screen());
    }
}
