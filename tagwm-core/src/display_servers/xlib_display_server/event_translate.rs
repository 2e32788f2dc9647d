//! Raw X events decoded into the vocabulary the handlers speak.
use std::os::raw::c_long;

use x11_dl::xlib;

use super::xwrap::{button_from, modmask_from, WITHDRAWN_STATE};
use super::XlibDisplayServer;
use crate::config::MouseTarget;
use crate::display_event::ConfigureRequest;
use crate::models::{ClientChange, WindowHandle, WmStateAction};
use crate::utils::modmask_lookup::Button;
use crate::DisplayEvent;

impl XlibDisplayServer {
    pub(super) fn translate(&mut self, raw: xlib::XEvent) {
        match raw.get_type() {
            xlib::MapRequest => {
                let event = xlib::XMapRequestEvent::from(raw);
                self.window_discovered(event.window);
            }
            xlib::UnmapNotify => self.unmap_notify(&xlib::XUnmapEvent::from(raw)),
            xlib::DestroyNotify => self.destroy_notify(&xlib::XDestroyWindowEvent::from(raw)),
            xlib::ConfigureRequest => {
                self.configure_request(&xlib::XConfigureRequestEvent::from(raw));
            }
            xlib::ConfigureNotify => self.configure_notify(&xlib::XConfigureEvent::from(raw)),
            xlib::EnterNotify => self.enter_notify(&xlib::XCrossingEvent::from(raw)),
            xlib::MotionNotify => self.motion_notify(&xlib::XMotionEvent::from(raw)),
            xlib::FocusIn => self.focus_in(&xlib::XFocusChangeEvent::from(raw)),
            xlib::KeyPress => self.key_press(&xlib::XKeyEvent::from(raw)),
            xlib::ButtonPress => self.button_press(&xlib::XButtonEvent::from(raw)),
            xlib::ClientMessage => self.client_message(&xlib::XClientMessageEvent::from(raw)),
            xlib::PropertyNotify => self.property_notify(&xlib::XPropertyEvent::from(raw)),
            xlib::Expose => self.expose(&xlib::XExposeEvent::from(raw)),
            xlib::MappingNotify => self.mapping_notify(xlib::XMappingEvent::from(raw)),
            _ => {}
        }
    }

    /// A real unmap means the client is leaving; a synthetic one is the
    /// ICCCM request to be put in the withdrawn state.
    fn unmap_notify(&mut self, event: &xlib::XUnmapEvent) {
        if !self.xw.managed_windows.contains(&event.window) {
            return;
        }
        if event.send_event == xlib::False {
            self.pending.push_back(DisplayEvent::ClientUnmapped(
                WindowHandle::XlibHandle(event.window),
            ));
        } else {
            self.xw.set_wm_state(event.window, WITHDRAWN_STATE);
        }
    }

    fn destroy_notify(&mut self, event: &xlib::XDestroyWindowEvent) {
        if !self.xw.managed_windows.contains(&event.window) {
            return;
        }
        self.xw.forget_window(event.window);
        self.pending.push_back(DisplayEvent::ClientDestroyed(
            WindowHandle::XlibHandle(event.window),
        ));
    }

    /// Requests from unmanaged windows are honored as asked; managed
    /// ones go through the handlers, which may deny them.
    fn configure_request(&mut self, event: &xlib::XConfigureRequestEvent) {
        if !self.xw.managed_windows.contains(&event.window) {
            self.xw.configure_unmanaged(event);
            return;
        }
        let mut request = ConfigureRequest::new(WindowHandle::XlibHandle(event.window));
        let mask = event.value_mask;
        if mask & u64::from(xlib::CWX) != 0 {
            request.x = Some(event.x);
        }
        if mask & u64::from(xlib::CWY) != 0 {
            request.y = Some(event.y);
        }
        if mask & u64::from(xlib::CWWidth) != 0 {
            request.w = Some(event.width);
        }
        if mask & u64::from(xlib::CWHeight) != 0 {
            request.h = Some(event.height);
        }
        if mask & u64::from(xlib::CWBorderWidth) != 0 {
            request.border_width = Some(event.border_width);
        }
        self.pending.push_back(DisplayEvent::ConfigureRequest(request));
    }

    /// The root window changing size means the output layout changed.
    fn configure_notify(&mut self, event: &xlib::XConfigureEvent) {
        if event.window != self.xw.root {
            return;
        }
        let dimensions = (event.width, event.height);
        if dimensions == self.root_dimensions {
            return;
        }
        self.root_dimensions = dimensions;
        self.pending.push_back(DisplayEvent::ScreensChanged {
            screens: self.xw.get_screens(),
            root_dimensions: dimensions,
            bar_height: self.draw.bar_height(),
        });
    }

    fn enter_notify(&mut self, event: &xlib::XCrossingEvent) {
        // Grab-mode and child-to-parent crossings are noise.
        if (event.mode != xlib::NotifyNormal || event.detail == xlib::NotifyInferior)
            && event.window != self.xw.root
        {
            return;
        }
        if event.window == self.xw.root {
            self.pending
                .push_back(DisplayEvent::RootEnter(event.x_root, event.y_root));
        } else if self.xw.managed_windows.contains(&event.window) {
            self.pending.push_back(DisplayEvent::PointerEnter(
                WindowHandle::XlibHandle(event.window),
                event.x_root,
                event.y_root,
            ));
        }
    }

    fn motion_notify(&mut self, event: &xlib::XMotionEvent) {
        if event.window == self.xw.root {
            self.pending
                .push_back(DisplayEvent::RootMotion(event.x_root, event.y_root));
        }
    }

    fn focus_in(&mut self, event: &xlib::XFocusChangeEvent) {
        if self.xw.managed_windows.contains(&event.window) {
            self.pending.push_back(DisplayEvent::FocusIn(
                WindowHandle::XlibHandle(event.window),
            ));
        }
    }

    fn key_press(&mut self, event: &xlib::XKeyEvent) {
        let keysym = self.xw.keycode_to_keysym(event.keycode);
        self.pending.push_back(DisplayEvent::KeyCombo(
            modmask_from(event.state, self.xw.numlock_mask),
            keysym,
        ));
    }

    fn button_press(&mut self, event: &xlib::XButtonEvent) {
        let button = button_from(event.button);
        if button == Button::Zero {
            return;
        }
        let modifiers = modmask_from(event.state, self.xw.numlock_mask);
        let handle = WindowHandle::XlibHandle(event.window);
        let (target, clicked_tag) = if self.draw.is_bar(event.window) {
            self.draw
                .click(&self.xw, event.window, event.x)
                .unwrap_or((MouseTarget::WindowTitle, None))
        } else if event.window == self.xw.root {
            (MouseTarget::RootWindow, None)
        } else {
            // The catch-all grab froze this press; hand it on to the
            // client once we have seen it.
            self.xw.replay_pointer();
            (MouseTarget::ClientWindow, None)
        };
        self.pending.push_back(DisplayEvent::MouseCombo {
            modifiers,
            button,
            handle,
            target,
            clicked_tag,
            x: event.x_root,
            y: event.y_root,
        });
    }

    fn client_message(&mut self, event: &xlib::XClientMessageEvent) {
        if !self.xw.managed_windows.contains(&event.window) {
            return;
        }
        let handle = WindowHandle::XlibHandle(event.window);
        if event.message_type == self.xw.atoms.NetWMState {
            let fullscreen = self.xw.atoms.NetWMStateFullscreen as c_long;
            if event.data.get_long(1) != fullscreen && event.data.get_long(2) != fullscreen {
                return;
            }
            let action = match event.data.get_long(0) {
                0 => WmStateAction::Remove,
                1 => WmStateAction::Add,
                _ => WmStateAction::Toggle,
            };
            let mut change = ClientChange::new(handle);
            change.fullscreen = Some(action);
            self.pending.push_back(DisplayEvent::ClientChanged(change));
        } else if event.message_type == self.xw.atoms.NetActiveWindow {
            let mut change = ClientChange::new(handle);
            change.attention = true;
            self.pending.push_back(DisplayEvent::ClientChanged(change));
        }
    }

    fn property_notify(&mut self, event: &xlib::XPropertyEvent) {
        if event.window == self.xw.root {
            // The root window name carries the status text.
            if event.atom == xlib::XA_WM_NAME {
                self.pending.push_back(DisplayEvent::StatusTextChanged(
                    self.xw.get_window_name(self.xw.root).unwrap_or_default(),
                ));
            }
            return;
        }
        if !self.xw.managed_windows.contains(&event.window) {
            return;
        }
        let window = event.window;
        let mut change = ClientChange::new(WindowHandle::XlibHandle(window));
        match event.atom {
            xlib::XA_WM_TRANSIENT_FOR => {
                change.transient_for =
                    self.xw.get_transient_for(window).map(WindowHandle::XlibHandle);
                if change.transient_for.is_none() {
                    return;
                }
            }
            xlib::XA_WM_NORMAL_HINTS => {
                change.hints = Some(self.xw.get_normal_hints(window).unwrap_or_default());
            }
            xlib::XA_WM_HINTS => {
                let Some(hints) = self.xw.get_wm_hints(window) else {
                    return;
                };
                change.urgent = Some(hints.flags & xlib::XUrgencyHint != 0);
                change.never_focus =
                    Some(hints.flags & xlib::InputHint != 0 && hints.input == 0);
            }
            xlib::XA_WM_NAME => change.title = self.xw.get_window_name(window),
            atom if atom == self.xw.atoms.NetWMName => {
                change.title = self.xw.get_window_name(window);
            }
            atom if atom == self.xw.atoms.NetWMWindowType => {
                change.is_dialog =
                    self.xw.get_window_type(window) == self.xw.atoms.NetWMWindowTypeDialog;
                if !change.is_dialog {
                    return;
                }
            }
            _ => return,
        }
        self.pending.push_back(DisplayEvent::ClientChanged(change));
    }

    /// Only a count-zero expose triggers a redraw; the rest of the
    /// batch is still on its way.
    fn expose(&mut self, event: &xlib::XExposeEvent) {
        if event.count == 0 && self.draw.is_bar(event.window) {
            self.draw.redraw(&self.xw, event.window);
        }
    }

    fn mapping_notify(&mut self, mut event: xlib::XMappingEvent) {
        self.xw.refresh_keyboard(&mut event);
        if event.request == xlib::MappingKeyboard || event.request == xlib::MappingModifier {
            // A remap can move Num_Lock to a different modifier bit.
            self.xw.update_numlock_mask();
            self.xw.reset_grabs(&self.keybinds);
        }
    }
}
