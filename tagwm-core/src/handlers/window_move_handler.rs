use super::{command_handler, Config, DisplayEvent, Manager, Mode, Rect, State, WindowHandle};
use crate::display_servers::{DisplayServer, DragCursor};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Interactive move of the selected window. The pointer is grabbed
    /// and events are pumped in a private loop until the button is
    /// released; motion is throttled to roughly sixty updates a
    /// second. Dragging a tiled window further than the snap distance
    /// pulls it out of the layout.
    pub fn move_with_mouse(&mut self) -> bool {
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
        self.state.restack(monitor);
        self.drain_actions();
        if !self.display_server.grab_pointer(DragCursor::Move) {
            return false;
        }
        let Some(start) = self.display_server.get_pointer_position() else {
            self.display_server.ungrab_pointer();
            return false;
        };
        self.state.mode = Mode::MovingWindow(handle);
        let mut last_motion = 0;
        loop {
            match self.display_server.next_drag_event() {
                Some(DisplayEvent::Motion { x, y, time }) => {
                    if time.saturating_sub(last_motion) <= 1000 / 60 {
                        continue;
                    }
                    last_motion = time;
                    self.state.drag_move(handle, origin, start, (x, y));
                    self.drain_actions();
                }
                Some(DisplayEvent::DragEnd) | None => break,
                Some(event) => {
                    self.display_event_handler(event);
                    self.drain_actions();
                }
            }
        }
        self.display_server.ungrab_pointer();
        self.state.mode = Mode::Normal;
        self.finish_drag(handle);
        true
    }

    /// A drag can leave the window over another monitor; adopt it there
    /// and follow it with focus.
    pub(crate) fn finish_drag(&mut self, handle: WindowHandle) {
        let Some(geometry) = self.state.client(handle).map(|c| c.geometry) else {
            return;
        };
        let monitor = self.state.rect_to_monitor(geometry);
        if monitor != self.state.selected_monitor {
            self.state.send_to_monitor(handle, monitor);
            self.state.selected_monitor = monitor;
            self.state.focus(None);
        }
        self.drain_actions();
    }
}

impl State {
    /// One pointer step of an interactive move. The window follows the
    /// pointer's offset from where the drag started, snapping to the
    /// window-area edges.
    pub(crate) fn drag_move(
        &mut self,
        handle: WindowHandle,
        origin: Rect,
        start: (i32, i32),
        pointer: (i32, i32),
    ) {
        let monitor = self.selected_monitor;
        let area = self.monitors[monitor].window_area;
        let arranges = self.monitors[monitor].layout().arranges();
        let snap = self.snap_distance;
        let Some(client) = self.client(handle) else {
            return;
        };
        let total_width = client.total_width();
        let total_height = client.total_height();
        let current = client.geometry;
        let floating = client.is_floating;
        let mut nx = origin.x + (pointer.0 - start.0);
        let mut ny = origin.y + (pointer.1 - start.1);
        if (area.x - nx).abs() < snap {
            nx = area.x;
        } else if (area.right() - (nx + total_width)).abs() < snap {
            nx = area.right() - total_width;
        }
        if (area.y - ny).abs() < snap {
            ny = area.y;
        } else if (area.bottom() - (ny + total_height)).abs() < snap {
            ny = area.bottom() - total_height;
        }
        if !floating
            && arranges
            && ((nx - current.x).abs() > snap || (ny - current.y).abs() > snap)
        {
            command_handler::toggle_floating(self);
        }
        let floating = self.client(handle).map_or(false, |c| c.is_floating);
        if !arranges || floating {
            self.resize(handle, nx, ny, current.w, current.h, true);
        }
    }
}
