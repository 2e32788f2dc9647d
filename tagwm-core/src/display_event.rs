use crate::config::MouseTarget;
use crate::models::{Client, ClientChange, Rect, WindowHandle};
use crate::utils::modmask_lookup::{Button, ModMask};
use crate::utils::xkeysym_lookup::XKeysym;

/// Notifications from the display server, decoded into the vocabulary
/// the handlers work in.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone)]
pub enum DisplayEvent {
    /// A new top-level window wants to be managed; the server has
    /// already gathered its properties into the client.
    ClientCreate(Client),
    ClientUnmapped(WindowHandle),
    ClientDestroyed(WindowHandle),
    ClientChanged(ClientChange),
    ConfigureRequest(ConfigureRequest),
    KeyCombo(ModMask, XKeysym),
    MouseCombo {
        modifiers: ModMask,
        button: Button,
        handle: WindowHandle,
        target: MouseTarget,
        /// Index of the clicked tag cell when the target is the tag
        /// strip.
        clicked_tag: Option<usize>,
        x: i32,
        y: i32,
    },
    PointerEnter(WindowHandle, i32, i32),
    /// Pointer crossed into the root window itself.
    RootEnter(i32, i32),
    /// Pointer moved over the root window outside any drag.
    RootMotion(i32, i32),
    /// The server reports this window now has input focus.
    FocusIn(WindowHandle),
    ScreensChanged {
        screens: Vec<Rect>,
        root_dimensions: (i32, i32),
        bar_height: i32,
    },
    StatusTextChanged(String),
    /// Pointer motion while a drag sub-loop is pumping; the timestamp
    /// drives the motion throttle.
    Motion { x: i32, y: i32, time: u64 },
    /// Button release ending a drag sub-loop.
    DragEnd,
    /// Follow-up from a bar-creation action.
    BarCreated(usize, WindowHandle),
}

/// A configure request from a managed window; absent fields were not in
/// the request's value mask.
#[derive(Debug, Clone, Copy)]
pub struct ConfigureRequest {
    pub handle: WindowHandle,
    pub x: Option<i32>,
    pub y: Option<i32>,
    pub w: Option<i32>,
    pub h: Option<i32>,
    pub border_width: Option<i32>,
}

impl ConfigureRequest {
    pub fn new(handle: WindowHandle) -> Self {
        Self {
            handle,
            x: None,
            y: None,
            w: None,
            h: None,
            border_width: None,
        }
    }

    pub const fn moves_only(&self) -> bool {
        (self.x.is_some() || self.y.is_some()) && self.w.is_none() && self.h.is_none()
    }
}
