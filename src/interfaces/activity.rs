use crate::domain::cancel::CancelToken;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityState {
    Running,
    Completed,
    Cancelled,
    Failed,
}

/// One progress handle, created per translate call when progress reporting
/// was requested. The orchestrator drives it to exactly one terminal state.
pub trait Activity: Send + Sync {
    fn set_state(&self, state: ActivityState);

    fn set_text(&self, text: &str);

    /// Wire external cancellation of the activity to the request token.
    fn attach_cancel(&self, token: CancelToken);
}

/// The host's progress/activity surface (a status bar, a task list, ...).
pub trait ActivitySink: Send + Sync {
    fn create_activity(&self) -> Box<dyn Activity>;
}

/// Fallback sink rendering activity updates as log records. Used when the
/// host does not inject its own.
pub struct LogActivitySink;

struct LogActivity;

impl Activity for LogActivity {
    fn set_state(&self, state: ActivityState) {
        debug!(?state, "translation activity");
    }

    fn set_text(&self, text: &str) {
        info!("{text}");
    }

    fn attach_cancel(&self, _token: CancelToken) {}
}

impl ActivitySink for LogActivitySink {
    fn create_activity(&self) -> Box<dyn Activity> {
        Box::new(LogActivity)
    }
}
