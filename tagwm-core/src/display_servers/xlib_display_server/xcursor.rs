use std::os::raw::c_uint;
use x11_dl::xlib;

// Shapes from the standard cursor font.
const LEFT_PTR: c_uint = 68;
const SIZING: c_uint = 120;
const FLEUR: c_uint = 52;

/// The cursors we hold for the whole session: the root pointer and the
/// two drag shapes.
#[derive(Clone, Copy, Debug)]
pub struct XCursor {
    pub normal: xlib::Cursor,
    pub resize: xlib::Cursor,
    pub drag: xlib::Cursor,
}

impl XCursor {
    pub fn new(xlib: &xlib::Xlib, dpy: *mut xlib::Display) -> Self {
        unsafe {
            Self {
                normal: (xlib.XCreateFontCursor)(dpy, LEFT_PTR),
                resize: (xlib.XCreateFontCursor)(dpy, SIZING),
                drag: (xlib.XCreateFontCursor)(dpy, FLEUR),
            }
        }
    }
}
