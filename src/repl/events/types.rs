//! # Core Event Types
//!
//! Session lifecycle phases shared by the controller and the views.

/// Where the session is in its lifecycle
///
/// `Idle -> Loading -> Ready`, with `Searching` entered while an exact-match
/// lookup is outstanding and left when its response is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    /// Bulk dataset download in progress
    Loading,
    Ready,
    /// A detail lookup is pending
    Searching,
}

impl SessionPhase {
    /// Whether input events are being processed
    pub fn accepts_input(&self) -> bool {
        matches!(self, SessionPhase::Ready | SessionPhase::Searching)
    }

    /// Whether the loading indicator should be visible
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionPhase::Loading | SessionPhase::Searching)
    }
}
