//! Per-view translation state.
//!
//! A surface is in one of two states: Original (no entry in the table) or
//! Translated (entry present). The entry stores the pre-translation content
//! snapshot and the identity of the message it belongs to, so stale state is
//! detected when the surface moves to a different message.

use crate::interfaces::surface::{ContentSnapshot, Surface, SurfaceId};
use dashmap::DashMap;
use tracing::debug;

struct ViewState {
    snapshot: Option<ContentSnapshot>,
    message_id: Option<String>,
}

/// Table of surfaces currently showing translated content.
///
/// Mutation happens only through the apply/restore/invalidate operations;
/// at most one entry exists per surface. Callers must not hold a reference
/// into the table across a suspension point.
pub struct ViewStates {
    entries: DashMap<SurfaceId, ViewState>,
}

impl ViewStates {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Render translated HTML into the surface, snapshotting the original
    /// content first if this surface is entering the Translated state.
    ///
    /// Idempotent per content identity: a second apply for the same message
    /// keeps the first snapshot instead of overwriting it with already
    /// translated content.
    pub fn apply_translation(&self, surface: &dyn Surface, translated_html: &str) {
        let key = surface.id();
        let current_id = surface.current_message_id();

        // An entry left over from a different message is stale; drop it
        // before deciding whether to snapshot.
        let stale = self
            .entries
            .get(&key)
            .map(|entry| !same_message(entry.message_id.as_deref(), current_id.as_deref()))
            .unwrap_or(false);
        if stale {
            debug!("clearing old translation state for different message");
            self.entries.remove(&key);
        }

        if !self.entries.contains_key(&key) {
            debug!(
                message_id = current_id.as_deref().unwrap_or("(none)"),
                "created translation state"
            );
            self.entries.insert(
                key,
                ViewState {
                    snapshot: surface.content_snapshot(),
                    message_id: current_id,
                },
            );
        }

        surface.render_html(translated_html);
    }

    /// Restore the stored original content and leave the Translated state.
    /// No-op when the surface is not translated.
    pub fn restore_original(&self, surface: &dyn Surface) {
        let Some((_, state)) = self.entries.remove(&surface.id()) else {
            return;
        };
        if let Some(snapshot) = &state.snapshot {
            surface.restore(snapshot);
        }
        debug!("restored original content");
    }

    pub fn is_translated(&self, surface: &dyn Surface) -> bool {
        self.entries.contains_key(&surface.id())
    }

    /// Drop the entry when the surface's current message identity no longer
    /// matches the stored one, including when the current identity is
    /// unavailable. Run this before any enablement query triggered by a
    /// focus or selection change.
    pub fn invalidate_if_changed(&self, surface: &dyn Surface) {
        let key = surface.id();
        let current_id = surface.current_message_id();

        let stale = self
            .entries
            .get(&key)
            .map(|entry| !same_message(entry.message_id.as_deref(), current_id.as_deref()))
            .unwrap_or(false);
        if stale {
            debug!(
                current = current_id.as_deref().unwrap_or("(none)"),
                "message changed; clearing stale translation state"
            );
            self.entries.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ViewStates {
    fn default() -> Self {
        Self::new()
    }
}

/// Two displays show the same message only when both identities are known
/// and equal.
fn same_message(stored: Option<&str>, current: Option<&str>) -> bool {
    matches!((stored, current), (Some(a), Some(b)) if a == b)
}
