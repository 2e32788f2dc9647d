//! Key grabs on the root window.
use std::os::raw::{c_uint, c_ulong};

use x11_dl::xlib;

use super::{grab_variants, xmask_from, XWrap};
use crate::config::Keybind;
use crate::utils::modmask_lookup::ModMask;
use crate::utils::xkeysym_lookup::{self, XKeysym};

impl XWrap {
    /// Drop every key grab and grab the configured chords again, with
    /// the lock-key variants so they fire regardless of NumLock and
    /// CapsLock. Called at startup and after a keyboard remap.
    pub fn reset_grabs(&self, keybinds: &[Keybind]) {
        unsafe {
            (self.xlib.XUngrabKey)(self.display, xlib::AnyKey, xlib::AnyModifier, self.root);
        }
        for bind in keybinds {
            let Some(keysym) = xkeysym_lookup::into_keysym(&bind.key) else {
                tracing::warn!("unknown key name in binding: {}", bind.key);
                continue;
            };
            let keycode =
                unsafe { (self.xlib.XKeysymToKeycode)(self.display, c_ulong::from(keysym)) };
            if keycode == 0 {
                continue;
            }
            if bind.modifier == ModMask::Any {
                self.grab_key(keycode, xlib::AnyModifier);
                continue;
            }
            for mask in grab_variants(xmask_from(bind.modifier), self.numlock_mask) {
                self.grab_key(keycode, mask);
            }
        }
    }

    fn grab_key(&self, keycode: xlib::KeyCode, mask: c_uint) {
        unsafe {
            (self.xlib.XGrabKey)(
                self.display,
                i32::from(keycode),
                mask,
                self.root,
                xlib::True,
                xlib::GrabModeAsync,
                xlib::GrabModeAsync,
            );
        }
    }

    pub fn keycode_to_keysym(&self, keycode: c_uint) -> XKeysym {
        unsafe { (self.xlib.XKeycodeToKeysym)(self.display, keycode as xlib::KeyCode, 0) as XKeysym }
    }

    pub fn refresh_keyboard(&self, event: &mut xlib::XMappingEvent) {
        unsafe {
            (self.xlib.XRefreshKeyboardMapping)(event);
        }
    }
}
