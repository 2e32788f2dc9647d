//! Button grabs and pointer control.
use std::os::raw::c_uint;

use x11_dl::xlib;

use super::{grab_variants, xbutton_from, xmask_from, XWrap, BUTTONMASK, MOUSEMASK};
use crate::utils::modmask_lookup::{Button, ModMask};

impl XWrap {
    /// Regrab the buttons on one client. An unfocused client gets a
    /// catch-all grab so the first click can focus it; the configured
    /// client bindings are grabbed with the lock-key variants.
    pub fn grab_client_buttons(
        &self,
        window: xlib::Window,
        focused: bool,
        binds: &[(Button, ModMask)],
    ) {
        self.ungrab_buttons(window);
        if !focused {
            // Sync pointer mode freezes the press until we have focused
            // the client and replayed it.
            self.grab_button(
                window,
                xlib::AnyButton as c_uint,
                xlib::AnyModifier,
                xlib::GrabModeSync,
            );
        }
        for &(button, modifier) in binds {
            let xbutton = xbutton_from(button);
            if xbutton == 0 {
                continue;
            }
            if modifier == ModMask::Any {
                self.grab_button(window, xbutton, xlib::AnyModifier, xlib::GrabModeAsync);
                continue;
            }
            for mask in grab_variants(xmask_from(modifier), self.numlock_mask) {
                self.grab_button(window, xbutton, mask, xlib::GrabModeAsync);
            }
        }
    }

    pub fn ungrab_buttons(&self, window: xlib::Window) {
        unsafe {
            (self.xlib.XUngrabButton)(
                self.display,
                xlib::AnyButton as c_uint,
                xlib::AnyModifier,
                window,
            );
        }
    }

    fn grab_button(&self, window: xlib::Window, button: c_uint, mask: c_uint, pointer_mode: i32) {
        unsafe {
            (self.xlib.XGrabButton)(
                self.display,
                button,
                mask,
                window,
                xlib::False,
                BUTTONMASK as c_uint,
                pointer_mode,
                xlib::GrabModeSync,
                0,
                0,
            );
        }
    }

    /// Let a synchronously held button press continue to the client.
    pub fn replay_pointer(&self) {
        unsafe {
            (self.xlib.XAllowEvents)(self.display, xlib::ReplayPointer, xlib::CurrentTime);
        }
    }

    pub fn grab_pointer(&self, cursor: xlib::Cursor) -> bool {
        let status = unsafe {
            (self.xlib.XGrabPointer)(
                self.display,
                self.root,
                xlib::False,
                MOUSEMASK as c_uint,
                xlib::GrabModeAsync,
                xlib::GrabModeAsync,
                0,
                cursor,
                xlib::CurrentTime,
            )
        };
        status == xlib::GrabSuccess
    }

    pub fn ungrab_pointer(&self) {
        unsafe {
            (self.xlib.XUngrabPointer)(self.display, xlib::CurrentTime);
        }
    }

    /// Warp relative to the window's origin.
    pub fn warp_pointer(&self, window: xlib::Window, x: i32, y: i32) {
        unsafe {
            (self.xlib.XWarpPointer)(self.display, 0, window, 0, 0, 0, 0, x, y);
        }
    }
}
