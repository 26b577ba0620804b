//! Outbound notifications from a render window to the host.

use ivis_core::ViewMode;

use crate::input::CursorShape;

/// Something the host application should react to.
///
/// Windows queue notifications; the host drains them with
/// [`RenderWindow::take_notifications`](crate::RenderWindow::take_notifications).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowNotification {
    /// The view mode changed.
    ViewModeChanged(ViewMode),
    /// Stereo rendering was turned off because the layout no longer allows it.
    StereoDisabled,
    /// The window gained focus.
    WindowActive,
    /// The window lost focus.
    WindowInactive,
    /// The window is about to close.
    WindowClosing,
    /// The user asked to toggle fullscreen.
    ToggleFullscreen,
    /// The cursor shape should change.
    CursorChanged(CursorShape),
    /// The window contents should be repainted.
    RedrawRequested,
    /// The renderer failed; shown to the user once.
    RenderError(String),
}
