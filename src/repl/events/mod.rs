//! # Events Module
//!
//! Re-exports all event system components organized by category:
//! - command events flow from key commands into the controller
//! - view events flow from the session out to the rendering surface

pub mod command_events;
pub mod types;
pub mod view_events;

pub use command_events::CommandEvent;
pub use types::SessionPhase;
pub use view_events::ViewEvent;
