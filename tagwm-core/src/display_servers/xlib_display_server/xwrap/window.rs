//! Managed-window lifecycle: adoption, geometry, focus, teardown.
use std::os::raw::{c_int, c_long, c_uint};

use x11_dl::xlib;

use super::{
    on_error_from_xlib, on_error_from_xlib_dummy, XWrap, CLIENT_EVENT_MASK, NORMAL_STATE,
    WITHDRAWN_STATE,
};
use crate::models::{Client, Rect, WindowHandle};

impl XWrap {
    /// Gather a window's properties into a client. Nothing when the
    /// window is gone, override-redirect, or already ours.
    pub fn setup_window(&self, window: xlib::Window) -> Option<Client> {
        let attrs = self.get_window_attrs(window).ok()?;
        if attrs.override_redirect > 0 || self.managed_windows.contains(&window) {
            return None;
        }
        let handle = WindowHandle::XlibHandle(window);
        let geometry = Rect::new(attrs.x, attrs.y, attrs.width, attrs.height);
        let mut client = Client::new(handle, geometry, attrs.border_width);
        if let Some(name) = self.get_window_name(window) {
            client.set_name(&name);
        }
        if let Some((class, instance)) = self.get_class_hint(window) {
            client.class = class;
            client.instance = instance;
        }
        client.transient_for = self.get_transient_for(window).map(WindowHandle::XlibHandle);
        client.update_size_hints(self.get_normal_hints(window));
        if let Some(hints) = self.get_wm_hints(window) {
            client.never_focus = hints.flags & xlib::InputHint != 0 && hints.input == 0;
            client.is_urgent = hints.flags & xlib::XUrgencyHint != 0;
        }
        Some(client)
    }

    /// The window is ours now: subscribe, publish, mark normal, map.
    pub fn setup_managed_window(&mut self, window: xlib::Window) {
        self.subscribe_to_window_events(window);
        self.managed_windows.push(window);
        self.append_property_long(
            self.root,
            self.atoms.NetClientList,
            xlib::XA_WINDOW,
            &[window as c_long],
        );
        self.set_wm_state(window, NORMAL_STATE);
        unsafe {
            (self.xlib.XMapWindow)(self.display, window);
        }
    }

    pub fn subscribe_to_window_events(&self, window: xlib::Window) {
        unsafe {
            (self.xlib.XSelectInput)(self.display, window, CLIENT_EVENT_MASK);
        }
    }

    /// Unmanage a still-living window. The server grab makes the border
    /// restore, grab release, and state change atomic for observers;
    /// the dummy error handler rides over the window dying under us.
    pub fn teardown_managed_window(&mut self, window: xlib::Window, border_width: i32) {
        unsafe {
            (self.xlib.XGrabServer)(self.display);
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib_dummy));
            self.ungrab_buttons(window);
            self.set_window_border_width(window, border_width);
            self.set_wm_state(window, WITHDRAWN_STATE);
            (self.xlib.XSync)(self.display, xlib::False);
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib));
            (self.xlib.XUngrabServer)(self.display);
        }
        self.forget_window(window);
    }

    pub fn forget_window(&mut self, window: xlib::Window) {
        self.managed_windows.retain(|&managed| managed != window);
    }

    /// Apply geometry and border width, then report the result with a
    /// synthetic configure notify as ICCCM asks.
    pub fn move_resize_window(&self, window: xlib::Window, geometry: Rect, border_width: i32) {
        unsafe {
            let mut changes: xlib::XWindowChanges = std::mem::zeroed();
            changes.x = geometry.x;
            changes.y = geometry.y;
            changes.width = geometry.w.max(1);
            changes.height = geometry.h.max(1);
            changes.border_width = border_width;
            let mask = xlib::CWX | xlib::CWY | xlib::CWWidth | xlib::CWHeight | xlib::CWBorderWidth;
            (self.xlib.XConfigureWindow)(self.display, window, c_uint::from(mask), &mut changes);
        }
        self.send_configure_notify(window, geometry, border_width);
        self.sync();
    }

    pub fn move_window(&self, window: xlib::Window, x: i32, y: i32) {
        unsafe {
            (self.xlib.XMoveWindow)(self.display, window, x, y);
        }
    }

    pub fn send_configure_notify(&self, window: xlib::Window, geometry: Rect, border_width: i32) {
        let mut event: xlib::XConfigureEvent = unsafe { std::mem::zeroed() };
        event.type_ = xlib::ConfigureNotify;
        event.display = self.display;
        event.event = window;
        event.window = window;
        event.x = geometry.x;
        event.y = geometry.y;
        event.width = geometry.w;
        event.height = geometry.h;
        event.border_width = border_width;
        event.above = 0;
        event.override_redirect = xlib::False;
        let mut raw: xlib::XEvent = event.into();
        unsafe {
            (self.xlib.XSendEvent)(
                self.display,
                window,
                xlib::False,
                xlib::StructureNotifyMask,
                &mut raw,
            );
        }
    }

    /// Honor a configure request from a window we do not manage.
    pub fn configure_unmanaged(&self, event: &xlib::XConfigureRequestEvent) {
        unsafe {
            let mut changes: xlib::XWindowChanges = std::mem::zeroed();
            changes.x = event.x;
            changes.y = event.y;
            changes.width = event.width;
            changes.height = event.height;
            changes.border_width = event.border_width;
            changes.sibling = event.above;
            changes.stack_mode = event.detail;
            (self.xlib.XConfigureWindow)(
                self.display,
                event.window,
                event.value_mask as c_uint,
                &mut changes,
            );
        }
    }

    /// Give the window input focus unless it opted out, and always
    /// offer the take-focus protocol.
    pub fn window_take_focus(&self, window: xlib::Window, never_focus: bool) {
        if !never_focus {
            unsafe {
                (self.xlib.XSetInputFocus)(
                    self.display,
                    window,
                    xlib::RevertToPointerRoot,
                    xlib::CurrentTime,
                );
            }
            self.replace_property_long(
                self.root,
                self.atoms.NetActiveWindow,
                xlib::XA_WINDOW,
                &[window as c_long],
            );
        }
        self.send_protocol(window, self.atoms.WMTakeFocus);
    }

    /// Revert focus to the root and clear the active-window property.
    pub fn unfocus(&self) {
        unsafe {
            (self.xlib.XSetInputFocus)(
                self.display,
                self.root,
                xlib::RevertToPointerRoot,
                xlib::CurrentTime,
            );
            (self.xlib.XDeleteProperty)(self.display, self.root, self.atoms.NetActiveWindow);
        }
    }

    /// Close politely via WM_DELETE_WINDOW, or sever the client's
    /// connection when it does not speak the protocol.
    pub fn kill_window(&self, window: xlib::Window) {
        if self.send_protocol(window, self.atoms.WMDelete) {
            return;
        }
        unsafe {
            (self.xlib.XGrabServer)(self.display);
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib_dummy));
            (self.xlib.XSetCloseDownMode)(self.display, xlib::DestroyAll);
            (self.xlib.XKillClient)(self.display, window);
            (self.xlib.XSync)(self.display, xlib::False);
            (self.xlib.XSetErrorHandler)(Some(on_error_from_xlib));
            (self.xlib.XUngrabServer)(self.display);
        }
    }

    fn send_protocol(&self, window: xlib::Window, protocol: xlib::Atom) -> bool {
        if !self.supports_protocol(window, protocol) {
            return false;
        }
        let mut event: xlib::XClientMessageEvent = unsafe { std::mem::zeroed() };
        event.type_ = xlib::ClientMessage;
        event.window = window;
        event.message_type = self.atoms.WMProtocols;
        event.format = 32;
        event.data.set_long(0, protocol as c_long);
        event.data.set_long(1, xlib::CurrentTime as c_long);
        let mut raw: xlib::XEvent = event.into();
        unsafe {
            (self.xlib.XSendEvent)(self.display, window, xlib::False, xlib::NoEventMask, &mut raw);
        }
        true
    }

    /// Stack the windows top to bottom, then drain the enter events the
    /// shuffle generated.
    pub fn restack(&self, mut windows: Vec<xlib::Window>) {
        if windows.is_empty() {
            return;
        }
        unsafe {
            (self.xlib.XRestackWindows)(
                self.display,
                windows.as_mut_ptr(),
                windows.len() as c_int,
            );
        }
        self.flush_enter_events();
    }

    pub fn raise_window(&self, window: xlib::Window) {
        unsafe {
            (self.xlib.XRaiseWindow)(self.display, window);
        }
    }
}
