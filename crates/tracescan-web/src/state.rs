//! Application state.

use tracescan_core::PresenceAnalyzer;

/// Application state shared across handlers.
///
/// The analyzer is stateless, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: PresenceAnalyzer,
}

impl AppState {
    pub fn new(analyzer: PresenceAnalyzer) -> Self {
        Self { analyzer }
    }
}
