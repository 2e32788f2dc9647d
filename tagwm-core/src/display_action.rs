use crate::models::{BarSnapshot, Rect, WindowHandle};
use serde::{Deserialize, Serialize};

/// Requests from the window manager to the display server, drained
/// from the state's action queue after every handler runs.
#[allow(clippy::large_enum_variant)]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum DisplayAction {
    /// A new window is ours now: subscribe, map, append it to the
    /// client-list property, mark it in normal WM state.
    AddedWindow(WindowHandle),

    /// Unmanage a still-living window: restore its original border,
    /// drop our grabs, and mark it withdrawn. The server wraps this in
    /// a server grab so other clients observe it atomically.
    TeardownWindow {
        handle: WindowHandle,
        border_width: i32,
    },

    MoveResizeWindow {
        handle: WindowHandle,
        geometry: Rect,
        border_width: i32,
    },

    /// Position-only move, used to park hidden clients off-screen.
    MoveWindow { handle: WindowHandle, x: i32, y: i32 },

    /// Synthetic configure notify describing current geometry, sent
    /// when a configure request was denied or made no visible change.
    SendConfigureNotify {
        handle: WindowHandle,
        geometry: Rect,
        border_width: i32,
    },

    /// Give the window input focus unless it opts out, and always offer
    /// the take-focus protocol message.
    FocusWindow {
        handle: WindowHandle,
        never_focus: bool,
    },

    /// Revert input focus to the root and clear the active-window
    /// property.
    UnsetFocus,

    SetWindowBorder {
        handle: WindowHandle,
        focused: bool,
    },

    GrabButtons {
        handle: WindowHandle,
        focused: bool,
    },

    SetUrgency {
        handle: WindowHandle,
        urgent: bool,
    },

    SetFullscreenProp {
        handle: WindowHandle,
        fullscreen: bool,
    },

    RaiseWindow(WindowHandle),

    /// Stack the listed windows top to bottom, first entry topmost, and
    /// drain the pointer-enter events the shuffle generates.
    RestackWindows(Vec<WindowHandle>),

    /// Close politely via the delete protocol, or forcibly when the
    /// client does not speak it.
    KillWindow(WindowHandle),

    /// Rebuild the root client-list property from scratch.
    SetClientList(Vec<WindowHandle>),

    RefreshBars(Vec<BarSnapshot>),

    CreateBar { monitor: usize, geometry: Rect },

    MoveResizeBar {
        handle: WindowHandle,
        geometry: Rect,
    },

    DestroyBar(WindowHandle),
}
