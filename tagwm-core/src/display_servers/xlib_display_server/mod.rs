//! The Xlib backend: owns the display connection, turns raw X events
//! into [`DisplayEvent`]s, and applies the queued [`DisplayAction`]s.
mod draw;
mod event_translate;
mod xatom;
mod xcursor;
mod xwrap;

use std::collections::VecDeque;

use x11_dl::xlib;

use self::draw::BarDraw;
use self::xwrap::{XWrap, ICONIC_STATE};
use super::{DisplayServer, DragCursor};
use crate::config::{Config, Keybind, MouseTarget};
use crate::display_action::DisplayAction;
use crate::models::{ClientChange, WindowHandle, WmStateAction};
use crate::utils::modmask_lookup::{Button, ModMask};
use crate::DisplayEvent;

pub struct XlibDisplayServer {
    xw: XWrap,
    draw: BarDraw,
    keybinds: Vec<Keybind>,
    /// Mouse bindings on client windows, the set every client's grabs
    /// are built from.
    client_binds: Vec<(Button, ModMask)>,
    pending: VecDeque<DisplayEvent>,
    root_dimensions: (i32, i32),
    initialised: bool,
}

impl DisplayServer for XlibDisplayServer {
    fn new(config: &impl Config) -> Self {
        let mut xw = XWrap::new();
        xw.init(config);
        let draw = BarDraw::new(&xw, &config.font());
        let client_binds = config
            .mousebinds()
            .iter()
            .filter(|bind| bind.target == MouseTarget::ClientWindow)
            .map(|bind| (bind.button, bind.modifier))
            .collect();
        Self {
            xw,
            draw,
            keybinds: config.keybinds(),
            client_binds,
            pending: VecDeque::new(),
            root_dimensions: (0, 0),
            initialised: false,
        }
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent> {
        let mut events: Vec<DisplayEvent> = self.pending.drain(..).collect();
        if !self.initialised {
            self.initialised = true;
            self.root_dimensions = self.xw.get_root_dimensions();
            events.push(DisplayEvent::ScreensChanged {
                screens: self.xw.get_screens(),
                root_dimensions: self.root_dimensions,
                bar_height: self.draw.bar_height(),
            });
            events.push(DisplayEvent::StatusTextChanged(
                self.xw.get_window_name(self.xw.root).unwrap_or_default(),
            ));
            self.scan_existing_windows();
            events.extend(self.pending.drain(..));
            return events;
        }
        if events.is_empty() {
            let raw = self.xw.get_next_event();
            self.translate(raw);
        }
        while self.xw.queue_len() > 0 {
            let raw = self.xw.get_next_event();
            self.translate(raw);
        }
        events.extend(self.pending.drain(..));
        events
    }

    fn execute_action(&mut self, act: DisplayAction) -> Option<DisplayEvent> {
        tracing::trace!("display action: {:?}", act);
        match act {
            DisplayAction::AddedWindow(handle) => {
                if let Some(window) = xlib_window(handle) {
                    self.xw.setup_managed_window(window);
                }
            }
            DisplayAction::TeardownWindow {
                handle,
                border_width,
            } => {
                if let Some(window) = xlib_window(handle) {
                    self.xw.teardown_managed_window(window, border_width);
                }
            }
            DisplayAction::MoveResizeWindow {
                handle,
                geometry,
                border_width,
            } => {
                if let Some(window) = xlib_window(handle) {
                    self.xw.move_resize_window(window, geometry, border_width);
                }
            }
            DisplayAction::MoveWindow { handle, x, y } => {
                if let Some(window) = xlib_window(handle) {
                    self.xw.move_window(window, x, y);
                }
            }
            DisplayAction::SendConfigureNotify {
                handle,
                geometry,
                border_width,
            } => {
                if let Some(window) = xlib_window(handle) {
                    self.xw.send_configure_notify(window, geometry, border_width);
                }
            }
            DisplayAction::FocusWindow {
                handle,
                never_focus,
            } => {
                if let Some(window) = xlib_window(handle) {
                    self.xw.window_take_focus(window, never_focus);
                }
            }
            DisplayAction::UnsetFocus => self.xw.unfocus(),
            DisplayAction::SetWindowBorder { handle, focused } => {
                if let Some(window) = xlib_window(handle) {
                    let pixel = if focused {
                        self.xw.colors.selected.border
                    } else {
                        self.xw.colors.normal.border
                    };
                    self.xw.set_window_border_color(window, pixel);
                }
            }
            DisplayAction::GrabButtons { handle, focused } => {
                if let Some(window) = xlib_window(handle) {
                    self.xw
                        .grab_client_buttons(window, focused, &self.client_binds);
                }
            }
            DisplayAction::SetUrgency { handle, urgent } => {
                if let Some(window) = xlib_window(handle) {
                    self.xw.set_window_urgency(window, urgent);
                }
            }
            DisplayAction::SetFullscreenProp { handle, fullscreen } => {
                if let Some(window) = xlib_window(handle) {
                    self.xw.set_fullscreen_state(window, fullscreen);
                }
            }
            DisplayAction::RaiseWindow(handle) => {
                if let Some(window) = xlib_window(handle) {
                    self.xw.raise_window(window);
                }
            }
            DisplayAction::RestackWindows(handles) => {
                let windows: Vec<xlib::Window> =
                    handles.into_iter().filter_map(xlib_window).collect();
                self.xw.restack(windows);
            }
            DisplayAction::KillWindow(handle) => {
                if let Some(window) = xlib_window(handle) {
                    self.xw.kill_window(window);
                }
            }
            DisplayAction::SetClientList(handles) => {
                let windows: Vec<xlib::Window> =
                    handles.into_iter().filter_map(xlib_window).collect();
                self.xw.set_client_list(&windows);
            }
            DisplayAction::RefreshBars(snapshots) => {
                for snapshot in snapshots {
                    self.draw.refresh(&self.xw, snapshot);
                }
            }
            DisplayAction::CreateBar { monitor, geometry } => {
                let window = self.draw.create_bar(&self.xw, geometry);
                return Some(DisplayEvent::BarCreated(
                    monitor,
                    WindowHandle::XlibHandle(window),
                ));
            }
            DisplayAction::MoveResizeBar { handle, geometry } => {
                if let Some(window) = xlib_window(handle) {
                    self.draw.move_resize_bar(&self.xw, window, geometry);
                }
            }
            DisplayAction::DestroyBar(handle) => {
                if let Some(window) = xlib_window(handle) {
                    self.draw.destroy_bar(&self.xw, window);
                }
            }
        }
        None
    }

    fn flush(&self) {
        self.xw.flush();
    }

    fn grab_pointer(&mut self, cursor: DragCursor) -> bool {
        let cursor = match cursor {
            DragCursor::Move => self.xw.cursors.drag,
            DragCursor::Resize => self.xw.cursors.resize,
        };
        self.xw.grab_pointer(cursor)
    }

    fn ungrab_pointer(&mut self) {
        self.xw.ungrab_pointer();
    }

    fn next_drag_event(&mut self) -> Option<DisplayEvent> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        loop {
            let raw = self.xw.get_mask_event();
            match raw.get_type() {
                xlib::MotionNotify => {
                    let event = xlib::XMotionEvent::from(raw);
                    return Some(DisplayEvent::Motion {
                        x: event.x_root,
                        y: event.y_root,
                        time: event.time,
                    });
                }
                xlib::ButtonRelease => return Some(DisplayEvent::DragEnd),
                // Forwarded types re-dispatch through the normal
                // translation; some produce nothing, so keep pumping.
                _ => {
                    self.translate(raw);
                    if let Some(event) = self.pending.pop_front() {
                        return Some(event);
                    }
                }
            }
        }
    }

    fn warp_pointer_to(&mut self, handle: WindowHandle, x: i32, y: i32) {
        if let Some(window) = xlib_window(handle) {
            self.xw.warp_pointer(window, x, y);
        }
    }

    fn get_pointer_position(&self) -> Option<(i32, i32)> {
        self.xw.get_cursor_point()
    }

    fn flush_enter_events(&mut self) {
        self.xw.flush_enter_events();
    }

    fn cleanup(&mut self) {
        self.draw.cleanup(&self.xw);
        self.xw.cleanup();
    }
}

impl XlibDisplayServer {
    /// Adopt the windows that existed before we started, parents before
    /// their transients. Unmapped windows are picked up only when they
    /// were iconified, not withdrawn.
    fn scan_existing_windows(&mut self) {
        let windows = self.xw.get_windows_for_root();
        for &window in &windows {
            if self.xw.get_transient_for(window).is_none() && self.scannable(window) {
                self.window_discovered(window);
            }
        }
        for &window in &windows {
            if self.xw.get_transient_for(window).is_some() && self.scannable(window) {
                self.window_discovered(window);
            }
        }
    }

    fn scannable(&self, window: xlib::Window) -> bool {
        let Ok(attrs) = self.xw.get_window_attrs(window) else {
            return false;
        };
        if attrs.override_redirect > 0 {
            return false;
        }
        attrs.map_state == xlib::IsViewable || self.xw.get_wm_state(window) == Some(ICONIC_STATE)
    }

    /// A window asked to be managed, through a map request or the
    /// startup scan. Window type and fullscreen state follow as a
    /// property change so they land after the placement rules, the way
    /// a live update would.
    pub(super) fn window_discovered(&mut self, window: xlib::Window) {
        let Some(client) = self.xw.setup_window(window) else {
            return;
        };
        let handle = client.handle;
        self.pending.push_back(DisplayEvent::ClientCreate(client));
        let is_dialog = self.xw.get_window_type(window) == self.xw.atoms.NetWMWindowTypeDialog;
        let is_fullscreen = self
            .xw
            .get_window_states_atoms(window)
            .contains(&self.xw.atoms.NetWMStateFullscreen);
        if is_dialog || is_fullscreen {
            let mut change = ClientChange::new(handle);
            change.is_dialog = is_dialog;
            if is_fullscreen {
                change.fullscreen = Some(WmStateAction::Add);
            }
            self.pending.push_back(DisplayEvent::ClientChanged(change));
        }
    }
}

fn xlib_window(handle: WindowHandle) -> Option<xlib::Window> {
    match handle {
        WindowHandle::XlibHandle(window) => Some(window),
        WindowHandle::MockHandle(_) => None,
    }
}
