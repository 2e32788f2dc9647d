//! A thin wrapper owning the Xlib connection and the calls the backend
//! makes against it. Submodules group the call surface: getters read
//! window state, setters write properties, and keyboard/mouse/window
//! cover grabs and lifecycle.
mod getters;
mod keyboard;
mod mouse;
mod setters;
mod window;

use std::os::raw::{c_int, c_long, c_uchar, c_uint, c_ulong};
use std::ptr;
use std::slice;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use x11_dl::xlib;

use super::xatom::XAtom;
use super::xcursor::XCursor;
use crate::config::{ColorScheme, Config};
use crate::utils::modmask_lookup::{Button, ModMask};

pub const ROOT_EVENT_MASK: c_long = xlib::SubstructureRedirectMask
    | xlib::SubstructureNotifyMask
    | xlib::ButtonPressMask
    | xlib::PointerMotionMask
    | xlib::EnterWindowMask
    | xlib::LeaveWindowMask
    | xlib::StructureNotifyMask
    | xlib::PropertyChangeMask;

pub const CLIENT_EVENT_MASK: c_long = xlib::EnterWindowMask
    | xlib::FocusChangeMask
    | xlib::PropertyChangeMask
    | xlib::StructureNotifyMask;

const BUTTONMASK: c_long = xlib::ButtonPressMask | xlib::ButtonReleaseMask;
pub const MOUSEMASK: c_long = BUTTONMASK | xlib::PointerMotionMask;

// WM_STATE values from ICCCM 4.1.3.1.
pub const WITHDRAWN_STATE: c_long = 0;
pub const NORMAL_STATE: c_long = 1;
pub const ICONIC_STATE: c_long = 3;

pub const MAX_PROPERTY_VALUE_LEN: c_long = 4096;

// XK_Num_Lock from keysymdef.h.
const NUM_LOCK_KEYSYM: c_ulong = 0xff7f;

// Protocol request opcodes for the error allow-list.
const X_CONFIGURE_WINDOW: c_uchar = 12;
const X_GRAB_BUTTON: c_uchar = 28;
const X_GRAB_KEY: c_uchar = 33;
const X_SET_INPUT_FOCUS: c_uchar = 42;
const X_COPY_AREA: c_uchar = 62;
const X_POLY_SEGMENT: c_uchar = 66;
const X_POLY_FILL_RECTANGLE: c_uchar = 70;
const X_POLY_TEXT8: c_uchar = 74;

type XlibErrorHandler =
    unsafe extern "C" fn(*mut xlib::Display, *mut xlib::XErrorEvent) -> c_int;

static DEFAULT_ERROR_HANDLER: OnceLock<XlibErrorHandler> = OnceLock::new();
static STARTUP_ERRORED: AtomicBool = AtomicBool::new(false);

/// Races against asynchronous client lifetimes are expected and
/// suppressed; everything else is logged and handed to the default
/// handler, which terminates us.
extern "C" fn on_error_from_xlib(
    display: *mut xlib::Display,
    error: *mut xlib::XErrorEvent,
) -> c_int {
    let err = unsafe { &*error };
    if err.error_code == xlib::BadWindow {
        return 0;
    }
    let allowed = [
        (X_SET_INPUT_FOCUS, xlib::BadMatch),
        (X_CONFIGURE_WINDOW, xlib::BadMatch),
        (X_GRAB_BUTTON, xlib::BadAccess),
        (X_GRAB_KEY, xlib::BadAccess),
        (X_COPY_AREA, xlib::BadDrawable),
        (X_POLY_SEGMENT, xlib::BadDrawable),
        (X_POLY_FILL_RECTANGLE, xlib::BadDrawable),
        (X_POLY_TEXT8, xlib::BadDrawable),
    ];
    if allowed
        .iter()
        .any(|&(request, code)| err.request_code == request && err.error_code == code)
    {
        return 0;
    }
    tracing::error!(
        "fatal X error: request code {}, error code {}",
        err.request_code,
        err.error_code
    );
    match DEFAULT_ERROR_HANDLER.get() {
        Some(default) => unsafe { default(display, error) },
        None => 1,
    }
}

/// Installed around destructive teardown, where the target may already
/// be gone.
extern "C" fn on_error_from_xlib_dummy(
    _: *mut xlib::Display,
    _: *mut xlib::XErrorEvent,
) -> c_int {
    0
}

extern "C" fn on_startup_error(_: *mut xlib::Display, _: *mut xlib::XErrorEvent) -> c_int {
    STARTUP_ERRORED.store(true, Ordering::SeqCst);
    0
}

/// Resolved pixel values for one color scheme.
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemePixels {
    pub foreground: c_ulong,
    pub background: c_ulong,
    pub border: c_ulong,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Colors {
    pub normal: SchemePixels,
    pub selected: SchemePixels,
}

pub struct XWrap {
    pub xlib: xlib::Xlib,
    pub display: *mut xlib::Display,
    pub root: xlib::Window,
    pub atoms: XAtom,
    pub cursors: XCursor,
    pub colors: Colors,
    pub managed_windows: Vec<xlib::Window>,
    /// Which modifier bit Num_Lock currently sits on; grabs cover it
    /// and event decoding strips it.
    pub numlock_mask: c_uint,
    check_window: xlib::Window,
}

impl XWrap {
    /// Open the display and claim the window manager role. Panics when
    /// the display cannot be reached or another window manager already
    /// owns the substructure redirect; there is nothing to do but stop.
    pub fn new() -> Self {
        let xlib = xlib::Xlib::open().expect("couldn't open the Xlib shared library");
        let display = unsafe { (xlib.XOpenDisplay)(ptr::null()) };
        assert!(!display.is_null(), "cannot open the display");
        let root = unsafe { (xlib.XDefaultRootWindow)(display) };
        let atoms = XAtom::new(&xlib, display);
        let cursors = XCursor::new(&xlib, display);

        // Exactly one client may select substructure redirect on the
        // root; failing here means another window manager is running.
        if let Some(default) = unsafe { (xlib.XSetErrorHandler)(Some(on_startup_error)) } {
            let _ = DEFAULT_ERROR_HANDLER.set(default);
        }
        unsafe {
            (xlib.XSelectInput)(display, root, xlib::SubstructureRedirectMask);
            (xlib.XSync)(display, xlib::False);
        }
        assert!(
            !STARTUP_ERRORED.load(Ordering::SeqCst),
            "another window manager is already running"
        );
        unsafe {
            (xlib.XSetErrorHandler)(Some(on_error_from_xlib));
        }

        Self {
            xlib,
            display,
            root,
            atoms,
            cursors,
            colors: Colors::default(),
            managed_windows: Vec::new(),
            numlock_mask: 0,
            check_window: 0,
        }
    }

    /// Resolve colors, take over the root window, and publish the EWMH
    /// bookkeeping properties.
    pub fn init(&mut self, config: &impl Config) {
        self.colors = self.load_colors(&config.colors());
        unsafe {
            let mut attrs: xlib::XSetWindowAttributes = std::mem::zeroed();
            attrs.cursor = self.cursors.normal;
            attrs.event_mask = ROOT_EVENT_MASK;
            (self.xlib.XChangeWindowAttributes)(
                self.display,
                self.root,
                xlib::CWEventMask | xlib::CWCursor,
                &mut attrs,
            );
        }
        self.init_ewmh();
        self.update_numlock_mask();
        self.reset_grabs(&config.keybinds());
        self.sync();
    }

    /// Find the modifier bit Num_Lock is mapped to. Keyboards are free
    /// to put it on any of Mod2..Mod5, and a remap can move it.
    pub fn update_numlock_mask(&mut self) {
        self.numlock_mask = 0;
        unsafe {
            let keycode = (self.xlib.XKeysymToKeycode)(self.display, NUM_LOCK_KEYSYM);
            if keycode == 0 {
                return;
            }
            let mapping = (self.xlib.XGetModifierMapping)(self.display);
            if mapping.is_null() {
                return;
            }
            let per = (*mapping).max_keypermod as usize;
            let keys = slice::from_raw_parts((*mapping).modifiermap, 8 * per);
            for modifier in 0..8 {
                if keys[modifier * per..(modifier + 1) * per].contains(&keycode) {
                    self.numlock_mask = 1 << modifier;
                }
            }
            (self.xlib.XFreeModifiermap)(mapping);
        }
    }

    fn init_ewmh(&mut self) {
        let supported: Vec<c_long> = self
            .atoms
            .net_supported()
            .iter()
            .map(|&atom| atom as c_long)
            .collect();
        self.replace_property_long(self.root, self.atoms.NetSupported, xlib::XA_ATOM, &supported);
        unsafe {
            (self.xlib.XDeleteProperty)(self.display, self.root, self.atoms.NetClientList);
        }
        // The supporting-wm-check window names us per EWMH.
        self.check_window = unsafe {
            (self.xlib.XCreateSimpleWindow)(self.display, self.root, 0, 0, 1, 1, 0, 0, 0)
        };
        let check = self.check_window as c_long;
        self.replace_property_long(
            self.check_window,
            self.atoms.NetSupportingWmCheck,
            xlib::XA_WINDOW,
            &[check],
        );
        self.set_text_property(self.check_window, self.atoms.NetWMName, "tagwm");
        self.replace_property_long(
            self.root,
            self.atoms.NetSupportingWmCheck,
            xlib::XA_WINDOW,
            &[check],
        );
    }

    fn load_colors(&self, scheme: &ColorScheme) -> Colors {
        let load = |colors: &crate::config::SchemeColors| SchemePixels {
            foreground: self.get_color(&colors.foreground),
            background: self.get_color(&colors.background),
            // Compositors read an alpha byte out of the border pixel;
            // force it opaque.
            border: self.get_color(&colors.border) | 0xff00_0000,
        };
        Colors {
            normal: load(&scheme.normal),
            selected: load(&scheme.selected),
        }
    }

    pub fn queue_len(&self) -> i32 {
        unsafe { (self.xlib.XPending)(self.display) }
    }

    /// Block until the next event arrives.
    pub fn get_next_event(&self) -> xlib::XEvent {
        unsafe {
            let mut event: xlib::XEvent = std::mem::zeroed();
            (self.xlib.XNextEvent)(self.display, &mut event);
            event
        }
    }

    /// Block on the drag-time event subset: pointer traffic plus the
    /// forwarded types the sub-loop re-dispatches.
    pub fn get_mask_event(&self) -> xlib::XEvent {
        unsafe {
            let mut event: xlib::XEvent = std::mem::zeroed();
            (self.xlib.XMaskEvent)(
                self.display,
                MOUSEMASK | xlib::SubstructureRedirectMask | xlib::ExposureMask,
                &mut event,
            );
            event
        }
    }

    pub fn flush(&self) {
        unsafe {
            (self.xlib.XFlush)(self.display);
        }
    }

    pub fn sync(&self) {
        unsafe {
            (self.xlib.XSync)(self.display, xlib::False);
        }
    }

    /// Discard the pointer-crossing events a restack or drag piled up
    /// so they do not shift focus afterwards.
    pub fn flush_enter_events(&self) {
        self.sync();
        let mut event: xlib::XEvent = unsafe { std::mem::zeroed() };
        while unsafe {
            (self.xlib.XCheckMaskEvent)(self.display, xlib::EnterWindowMask, &mut event)
        } > 0
        {}
    }

    /// Hand everything back to the display. The connection is closed;
    /// the wrapper must not be used afterwards.
    pub fn cleanup(&mut self) {
        unsafe {
            (self.xlib.XUngrabKey)(self.display, xlib::AnyKey, xlib::AnyModifier, self.root);
            (self.xlib.XDestroyWindow)(self.display, self.check_window);
            (self.xlib.XSetInputFocus)(
                self.display,
                xlib::PointerRoot as xlib::Window,
                xlib::RevertToPointerRoot,
                xlib::CurrentTime,
            );
            (self.xlib.XDeleteProperty)(self.display, self.root, self.atoms.NetActiveWindow);
            (self.xlib.XSync)(self.display, xlib::False);
            (self.xlib.XCloseDisplay)(self.display);
        }
    }
}

/// Bindings carry modifiers in our mask; grabs and received events use
/// the X encoding.
pub fn xmask_from(mask: ModMask) -> c_uint {
    let mut x = 0;
    if mask.contains(ModMask::Shift) {
        x |= xlib::ShiftMask;
    }
    if mask.contains(ModMask::Control) {
        x |= xlib::ControlMask;
    }
    if mask.contains(ModMask::Alt) {
        x |= xlib::Mod1Mask;
    }
    if mask.contains(ModMask::Mod3) {
        x |= xlib::Mod3Mask;
    }
    if mask.contains(ModMask::Super) {
        x |= xlib::Mod4Mask;
    }
    if mask.contains(ModMask::Mod5) {
        x |= xlib::Mod5Mask;
    }
    x
}

/// Decode an event's modifier state, dropping the NumLock and CapsLock
/// bits so bindings fire regardless of the lock keys.
pub fn modmask_from(state: c_uint, numlock_mask: c_uint) -> ModMask {
    let state = state & !(numlock_mask | xlib::LockMask);
    let mut mask = ModMask::empty();
    if state & xlib::ShiftMask != 0 {
        mask |= ModMask::Shift;
    }
    if state & xlib::ControlMask != 0 {
        mask |= ModMask::Control;
    }
    if state & xlib::Mod1Mask != 0 {
        mask |= ModMask::Alt;
    }
    if state & xlib::Mod3Mask != 0 {
        mask |= ModMask::Mod3;
    }
    if state & xlib::Mod4Mask != 0 {
        mask |= ModMask::Super;
    }
    if state & xlib::Mod5Mask != 0 {
        mask |= ModMask::Mod5;
    }
    mask
}

pub fn xbutton_from(button: Button) -> c_uint {
    match button {
        Button::Button1 => xlib::Button1,
        Button::Button2 => xlib::Button2,
        Button::Button3 => xlib::Button3,
        Button::Button4 => xlib::Button4,
        Button::Button5 => xlib::Button5,
        _ => 0,
    }
}

pub fn button_from(button: c_uint) -> Button {
    match button {
        xlib::Button1 => Button::Button1,
        xlib::Button2 => Button::Button2,
        xlib::Button3 => Button::Button3,
        xlib::Button4 => Button::Button4,
        xlib::Button5 => Button::Button5,
        _ => Button::Zero,
    }
}

/// The lock-key variants a grab has to cover so it fires with NumLock
/// or CapsLock held, whichever modifier bit Num_Lock is mapped to.
pub fn grab_variants(mask: c_uint, numlock_mask: c_uint) -> [c_uint; 4] {
    [
        mask,
        mask | numlock_mask,
        mask | xlib::LockMask,
        mask | numlock_mask | xlib::LockMask,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifier_masks_survive_the_x_encoding() {
        let mask = ModMask::Super | ModMask::Shift;
        assert_eq!(modmask_from(xmask_from(mask), xlib::Mod2Mask), mask);
    }

    #[test]
    fn lock_keys_are_dropped_when_decoding() {
        let state = xlib::Mod4Mask | xlib::Mod2Mask | xlib::LockMask;
        assert_eq!(modmask_from(state, xlib::Mod2Mask), ModMask::Super);
    }

    #[test]
    fn remapped_numlock_is_grabbed_and_stripped() {
        // Num_Lock sitting on Mod3 instead of the usual Mod2.
        let variants = grab_variants(xlib::Mod4Mask, xlib::Mod3Mask);
        assert!(variants.contains(&(xlib::Mod4Mask | xlib::Mod3Mask)));
        assert!(!variants.contains(&(xlib::Mod4Mask | xlib::Mod2Mask)));
        let state = xlib::Mod4Mask | xlib::Mod3Mask;
        assert_eq!(modmask_from(state, xlib::Mod3Mask), ModMask::Super);
    }

    #[test]
    fn unknown_buttons_decode_to_zero() {
        assert_eq!(button_from(9), Button::Zero);
        assert_eq!(button_from(xlib::Button3), Button::Button3);
    }
}
