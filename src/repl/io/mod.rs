//! # I/O Abstraction Layer
//!
//! Input and output are reached only through two traits so that the controller
//! can be driven by a scripted key sequence and a recording screen in tests.
//!
//! ```text
//! Production:  AppController ──▶ TerminalEventStream ──▶ crossterm::event::read()
//!                            ──▶ TerminalRenderStream ──▶ crossterm::execute!()
//!
//! Testing:     AppController ──▶ MockEventStream     ──▶ VecDeque<Event>
//!                            ──▶ MockRenderStream    ──▶ Vec<RenderCommand>
//! ```

use anyhow::Result;
use crossterm::event::Event;
use std::io::Write;
use std::time::Duration;

pub mod mock;
pub mod terminal;

pub use mock::{MockEventStream, MockRenderStream, RenderCommand};
pub use terminal::{TerminalEventStream, TerminalRenderStream};

/// Terminal size as (width, height)
pub type TerminalSize = (u16, u16);

/// Source of key and resize events
pub trait EventStream: Send {
    /// Whether an event can be read within `timeout`
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Next event; only call after `poll` returned true
    fn read(&mut self) -> Result<Event>;
}

/// Sink for screen output.
///
/// Styled text is written through [`Write`]; the methods cover the terminal
/// state changes that are not plain text.
pub trait RenderStream: Write + Send {
    fn clear_screen(&mut self) -> Result<()>;

    /// Blank row `y` from the first column to the end
    fn clear_line(&mut self, y: u16) -> Result<()>;

    /// Move cursor to (column, row)
    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    fn hide_cursor(&mut self) -> Result<()>;

    fn show_cursor(&mut self) -> Result<()>;

    fn get_size(&self) -> Result<TerminalSize>;

    fn enter_alternate_screen(&mut self) -> Result<()>;

    fn leave_alternate_screen(&mut self) -> Result<()>;

    fn enable_raw_mode(&mut self) -> Result<()>;

    fn disable_raw_mode(&mut self) -> Result<()>;
}
