use super::{command_handler, Config, DisplayEvent, Manager, Mode, Rect, State, WindowHandle};
use crate::display_servers::{DisplayServer, DragCursor};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Interactive resize of the selected window, the counterpart of
    /// [`Manager::move_with_mouse`]. The pointer is warped to the
    /// bottom-right corner first so the drag feels anchored there, and
    /// warped again when the loop ends so it lands on the final corner.
    pub fn resize_with_mouse(&mut self) -> bool {
        if self.state.mode != Mode::Normal {
            return false;
        }
        let monitor = self.state.selected_monitor;
        let Some(handle) = self.state.monitors[monitor].selected else {
            return false;
        };
        let Some(client) = self.state.client(handle) else {
            return false;
        };
        if client.is_fullscreen {
            return false;
        }
        let origin = client.geometry;
        let border = client.border_width;
        self.state.restack(monitor);
        self.drain_actions();
        if !self.display_server.grab_pointer(DragCursor::Resize) {
            return false;
        }
        self.display_server
            .warp_pointer_to(handle, origin.w + border - 1, origin.h + border - 1);
        self.state.mode = Mode::ResizingWindow(handle);
        let mut last_motion = 0;
        loop {
            match self.display_server.next_drag_event() {
                Some(DisplayEvent::Motion { x, y, time }) => {
                    if time.saturating_sub(last_motion) <= 1000 / 60 {
                        continue;
                    }
                    last_motion = time;
                    self.state.drag_resize(handle, origin, (x, y));
                    self.drain_actions();
                }
                Some(DisplayEvent::DragEnd) | None => break,
                Some(event) => {
                    self.display_event_handler(event);
                    self.drain_actions();
                }
            }
        }
        if let Some(client) = self.state.client(handle) {
            let geometry = client.geometry;
            let border = client.border_width;
            self.display_server
                .warp_pointer_to(handle, geometry.w + border - 1, geometry.h + border - 1);
        }
        self.display_server.ungrab_pointer();
        self.display_server.flush_enter_events();
        self.state.mode = Mode::Normal;
        self.finish_drag(handle);
        true
    }
}

impl State {
    /// One pointer step of an interactive resize. The new size is the
    /// pointer's distance from the window's top-left corner; growing a
    /// tiled window past the snap distance pulls it out of the layout,
    /// but only while the dragged corner stays inside the selected
    /// monitor.
    pub(crate) fn drag_resize(&mut self, handle: WindowHandle, origin: Rect, pointer: (i32, i32)) {
        let monitor = self.selected_monitor;
        let area = self.monitors[monitor].window_area;
        let arranges = self.monitors[monitor].layout().arranges();
        let snap = self.snap_distance;
        let Some(client) = self.client(handle) else {
            return;
        };
        let border = client.border_width;
        let current = client.geometry;
        let floating = client.is_floating;
        let client_area = self.monitors[client.monitor].window_area;
        let nw = (pointer.0 - origin.x - 2 * border + 1).max(1);
        let nh = (pointer.1 - origin.y - 2 * border + 1).max(1);
        if client_area.x + nw >= area.x
            && client_area.x + nw <= area.right()
            && client_area.y + nh >= area.y
            && client_area.y + nh <= area.bottom()
            && !floating
            && arranges
            && ((nw - current.w).abs() > snap || (nh - current.h).abs() > snap)
        {
            command_handler::toggle_floating(self);
        }
        let floating = self.client(handle).map_or(false, |c| c.is_floating);
        if !arranges || floating {
            self.resize(handle, current.x, current.y, nw, nh, true);
        }
    }
}
