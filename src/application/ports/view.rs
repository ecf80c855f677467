//! View notification port interface

use async_trait::async_trait;

use crate::domain::capture::CaptureState;

/// State-change events published to the rendering layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// The cached task list was replaced
    TaskListChanged,
    /// The selected task was replaced or mutated
    TaskChanged(u64),
    /// The media list of a task gained or replaced entries
    MediaChanged(u64),
    /// The capture session moved to a new state
    SessionState(CaptureState),
    /// Transient user-facing notice (toast)
    Notice(String),
}

/// Port the core publishes state changes through so the view layer can
/// re-render. Delivery is fire-and-forget.
#[async_trait]
pub trait ViewSink: Send + Sync {
    async fn publish(&self, event: ViewEvent);
}
