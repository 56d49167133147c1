use crate::{Axis, ElementId, ElementKind};

/// The binding layer between the scroller and a concrete UI (DOM, native views, a test
/// double).
///
/// The scroller never creates or destroys containers; it only classifies them, reads their
/// geometry and writes scroll offsets through this trait.
///
/// Window semantics: `scroll_offset(window, _)` reports the window's effective scroll
/// position, while `set_scroll_offset` on a window's `documentElement`/`body` only has an
/// effect on the candidate that actually owns scrolling on this host.
pub trait ScrollHost {
    /// Returns `None` for unknown or detached handles.
    fn kind(&self, element: ElementId) -> Option<ElementKind>;

    /// The window owning a document, `documentElement` or `body`.
    fn owner_window(&self, element: ElementId) -> Option<ElementId>;

    /// The content window of a frame.
    fn content_window(&self, frame: ElementId) -> Option<ElementId>;

    fn document_element(&self, window: ElementId) -> Option<ElementId>;

    fn body(&self, window: ElementId) -> Option<ElementId>;

    /// Whether the window's document renders in quirks (compatibility) mode.
    fn is_quirks_mode(&self, _window: ElementId) -> bool {
        false
    }

    fn scroll_offset(&self, element: ElementId, axis: Axis) -> f64;

    fn set_scroll_offset(&mut self, element: ElementId, axis: Axis, offset: f64);

    /// Full content size along `axis` (for a window: its document's size).
    fn content_extent(&self, element: ElementId, axis: Axis) -> f64;

    /// Visible size along `axis`.
    fn viewport_extent(&self, element: ElementId, axis: Axis) -> f64;

    /// Creates an off-screen, standards-mode window with scrollable content, used once to
    /// detect which root candidate owns scrolling. Hosts that cannot sandbox return `None`.
    fn create_probe_window(&mut self) -> Option<ElementId> {
        None
    }

    fn destroy_probe_window(&mut self, _window: ElementId) {}
}
