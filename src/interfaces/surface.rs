use std::any::Any;
use std::sync::Arc;

/// Opaque identity of a visible surface (a message preview pane, a detached
/// viewer window, ...). The host assigns these; the library only compares
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceId(pub u64);

/// Backend-specific snapshot of a surface's pre-translation content (a part
/// list or equivalent). The state manager holds a shared reference for as
/// long as the surface shows translated content and releases it exactly once
/// on restore or invalidation.
pub type ContentSnapshot = Arc<dyn Any + Send + Sync>;

/// A visible surface translations are applied to.
///
/// This is the boundary to the host's view layer: message-body extraction,
/// rendering and reloading all happen behind it.
pub trait Surface: Send + Sync {
    fn id(&self) -> SurfaceId;

    /// Identity of the message currently displayed, when available.
    fn current_message_id(&self) -> Option<String>;

    /// Snapshot of the currently displayed content, when available.
    fn content_snapshot(&self) -> Option<ContentSnapshot>;

    /// Extract the displayed body HTML (mail-store boundary).
    fn selected_body_html(&self) -> Option<String>;

    /// Render an HTML string into the surface.
    fn render_html(&self, html: &str);

    /// Put a snapshot back and trigger a full reload of the surface.
    fn restore(&self, snapshot: &ContentSnapshot);
}
