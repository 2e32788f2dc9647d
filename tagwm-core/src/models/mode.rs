use crate::models::WindowHandle;
use serde::{Deserialize, Serialize};

/// What the event loop is currently doing with the pointer. The drag
/// sub-loop refuses to start unless the mode is `Normal`, so a nested
/// move/resize can never happen.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    MovingWindow(WindowHandle),
    ResizingWindow(WindowHandle),
}
