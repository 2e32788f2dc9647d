use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::models::WindowHandle;
use crate::DisplayEvent;

pub mod bar;
#[cfg(test)]
mod mock_display_server;
pub mod xlib_display_server;

pub use self::bar::{Canvas, Scheme};
#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;
pub use self::xlib_display_server::XlibDisplayServer;

/// Cursor shape shown while the pointer is grabbed for a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragCursor {
    Move,
    Resize,
}

pub trait DisplayServer {
    fn new(config: &impl Config) -> Self;

    /// Block until at least one event arrives, then return everything
    /// pending. The first call reports the screen topology and any
    /// windows that existed before we started.
    fn get_next_events(&mut self) -> Vec<DisplayEvent>;

    /// Apply one queued action. Some actions complete with a follow-up
    /// event to feed back through the handlers.
    fn execute_action(&mut self, act: DisplayAction) -> Option<DisplayEvent>;

    fn flush(&self);

    /// Grab the pointer for an interactive drag. Returns false when the
    /// grab was refused and the drag must be abandoned.
    fn grab_pointer(&mut self, cursor: DragCursor) -> bool;

    fn ungrab_pointer(&mut self);

    /// Block for the next event while the pointer is grabbed.
    fn next_drag_event(&mut self) -> Option<DisplayEvent>;

    fn warp_pointer_to(&mut self, handle: WindowHandle, x: i32, y: i32);

    fn get_pointer_position(&self) -> Option<(i32, i32)>;

    /// Throw away pointer-crossing events piled up by a drag so they do
    /// not shift focus afterwards.
    fn flush_enter_events(&mut self);

    /// Hand every resource back to the display before shutdown.
    fn cleanup(&mut self) {}
}
