//! Property and attribute writes.
use std::ffi::CString;
use std::os::raw::{c_int, c_long, c_uint, c_ulong};

use x11_dl::xlib;

use super::XWrap;

impl XWrap {
    pub fn replace_property_long(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
        data: &[c_long],
    ) {
        self.change_property_long(window, property, r#type, xlib::PropModeReplace, data);
    }

    pub fn append_property_long(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
        data: &[c_long],
    ) {
        self.change_property_long(window, property, r#type, xlib::PropModeAppend, data);
    }

    fn change_property_long(
        &self,
        window: xlib::Window,
        property: xlib::Atom,
        r#type: xlib::Atom,
        mode: c_int,
        data: &[c_long],
    ) {
        unsafe {
            (self.xlib.XChangeProperty)(
                self.display,
                window,
                property,
                r#type,
                32,
                mode,
                data.as_ptr().cast(),
                data.len() as c_int,
            );
        }
    }

    pub fn set_text_property(&self, window: xlib::Window, property: xlib::Atom, text: &str) {
        let data = CString::new(text).unwrap_or_default();
        unsafe {
            (self.xlib.XChangeProperty)(
                self.display,
                window,
                property,
                self.atoms.UTF8String,
                8,
                xlib::PropModeReplace,
                data.as_ptr().cast(),
                data.as_bytes().len() as c_int,
            );
        }
    }

    pub fn set_wm_state(&self, window: xlib::Window, state: c_long) {
        self.replace_property_long(window, self.atoms.WMState, self.atoms.WMState, &[state, 0]);
    }

    /// Rebuild `_NET_CLIENT_LIST` from scratch.
    pub fn set_client_list(&self, windows: &[xlib::Window]) {
        unsafe {
            (self.xlib.XDeleteProperty)(self.display, self.root, self.atoms.NetClientList);
        }
        for &window in windows {
            self.append_property_long(
                self.root,
                self.atoms.NetClientList,
                xlib::XA_WINDOW,
                &[window as c_long],
            );
        }
    }

    pub fn set_window_border_color(&self, window: xlib::Window, pixel: c_ulong) {
        unsafe {
            (self.xlib.XSetWindowBorder)(self.display, window, pixel);
        }
    }

    pub fn set_window_border_width(&self, window: xlib::Window, width: i32) {
        unsafe {
            (self.xlib.XSetWindowBorderWidth)(self.display, window, width.max(0) as c_uint);
        }
    }

    /// Flip the urgency bit in WM_HINTS, leaving the rest untouched.
    pub fn set_window_urgency(&self, window: xlib::Window, urgent: bool) {
        let Some(mut hints) = self.get_wm_hints(window) else {
            return;
        };
        if urgent {
            hints.flags |= xlib::XUrgencyHint;
        } else {
            hints.flags &= !xlib::XUrgencyHint;
        }
        unsafe {
            (self.xlib.XSetWMHints)(self.display, window, &mut hints);
        }
    }

    pub fn set_fullscreen_state(&self, window: xlib::Window, fullscreen: bool) {
        if fullscreen {
            self.replace_property_long(
                window,
                self.atoms.NetWMState,
                xlib::XA_ATOM,
                &[self.atoms.NetWMStateFullscreen as c_long],
            );
        } else {
            self.replace_property_long(window, self.atoms.NetWMState, xlib::XA_ATOM, &[]);
        }
    }
}
