use super::{DisplayAction, Monitor, Rect, State, WindowHandle};

impl State {
    /// Rebuild the monitor list from a fresh screen report. Existing
    /// monitors keep their views, layouts, and clients wherever a
    /// screen remains for them; surplus monitors hand every client to
    /// the first one (tags intact, so nothing is lost, just hidden
    /// until viewed). Returns whether anything actually changed.
    pub fn screens_changed_handler(
        &mut self,
        screens: Vec<Rect>,
        root_dimensions: (i32, i32),
        bar_height: i32,
    ) -> bool {
        self.root_dimensions = root_dimensions;
        self.bar_height = bar_height;
        let mut unique: Vec<Rect> = Vec::with_capacity(screens.len());
        for screen in screens {
            if !unique.contains(&screen) {
                unique.push(screen);
            }
        }
        if unique.is_empty() {
            // No usable screen info; treat the whole root as one.
            unique.push(Rect::new(0, 0, root_dimensions.0, root_dimensions.1));
        }
        tracing::debug!("screens changed: {} unique screens", unique.len());

        let mut dirty = false;
        while self.monitors.len() < unique.len() {
            let num = self.monitors.len();
            let mut monitor = Monitor::new(
                num,
                unique[num],
                self.default_master_factor,
                self.default_master_count,
                self.default_show_bar,
                self.default_bar_position,
                self.default_layouts,
            );
            monitor.update_bar_position(bar_height);
            let geometry = monitor.bar_rect(bar_height);
            self.monitors.push(monitor);
            self.actions
                .push_back(DisplayAction::CreateBar { monitor: num, geometry });
            dirty = true;
        }
        for (i, &geometry) in unique.iter().enumerate() {
            let monitor = &mut self.monitors[i];
            monitor.num = i;
            if monitor.geometry != geometry {
                dirty = true;
                monitor.geometry = geometry;
                monitor.update_bar_position(bar_height);
            }
        }
        while self.monitors.len() > unique.len() {
            dirty = true;
            let mut removed = self.monitors.pop().expect("length checked above");
            if let Some(bar) = removed.bar_handle {
                self.actions.push_back(DisplayAction::DestroyBar(bar));
            }
            let mut tiling = std::mem::take(&mut removed.tiling);
            let mut stacking = std::mem::take(&mut removed.stacking);
            for &handle in &tiling {
                if let Some(client) = self.client_mut(handle) {
                    client.monitor = 0;
                }
            }
            tiling.extend(self.monitors[0].tiling.drain(..));
            self.monitors[0].tiling = tiling;
            stacking.extend(self.monitors[0].stacking.drain(..));
            self.monitors[0].stacking = stacking;
        }

        if dirty {
            self.selected_monitor = 0;
            self.motion_monitor = None;
            let fullscreen: Vec<(WindowHandle, Rect)> = self
                .clients
                .iter()
                .filter(|c| c.is_fullscreen)
                .map(|c| (c.handle, self.monitors[c.monitor].geometry))
                .collect();
            for (handle, geometry) in fullscreen {
                self.resize_client(handle, geometry);
            }
            for monitor in &self.monitors {
                if let Some(bar) = monitor.bar_handle {
                    let geometry = monitor.bar_rect(bar_height);
                    self.actions
                        .push_back(DisplayAction::MoveResizeBar { handle: bar, geometry });
                }
            }
            self.focus(None);
            self.arrange(None);
        }
        dirty
    }

    /// The server finished creating a bar window for a monitor.
    pub fn bar_created_handler(&mut self, monitor: usize, handle: WindowHandle) -> bool {
        if monitor >= self.monitors.len() {
            return false;
        }
        self.monitors[monitor].bar_handle = Some(handle);
        self.update_bar(monitor);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TestConfig;
    use crate::models::{Client, TagMask};

    fn two_screens() -> Vec<Rect> {
        vec![Rect::new(0, 0, 1000, 800), Rect::new(1000, 0, 1000, 800)]
    }

    fn state_with(screens: Vec<Rect>) -> State {
        let mut state = State::new(&TestConfig::with_tag_count(9));
        state.screens_changed_handler(screens, (2000, 800), 20);
        state.actions.clear();
        state
    }

    fn add_client(state: &mut State, id: i32, monitor: usize) -> WindowHandle {
        let handle = WindowHandle::MockHandle(id);
        let mut client = Client::new(handle, Rect::new(10, 30, 300, 200), 1);
        client.monitor = monitor;
        client.tags = state.monitors[monitor].view_tagset();
        state.clients.push(client);
        state.attach(handle);
        state.attach_stack(handle);
        handle
    }

    #[test]
    fn duplicate_screens_collapse_into_one_monitor() {
        let state = state_with(vec![
            Rect::new(0, 0, 1000, 800),
            Rect::new(0, 0, 1000, 800),
        ]);
        assert_eq!(state.monitors.len(), 1);
    }

    #[test]
    fn empty_screen_report_falls_back_to_the_root() {
        let state = state_with(vec![]);
        assert_eq!(state.monitors.len(), 1);
        assert_eq!(state.monitors[0].geometry, Rect::new(0, 0, 2000, 800));
    }

    #[test]
    fn new_monitors_request_a_bar_each() {
        let mut state = State::new(&TestConfig::with_tag_count(9));
        state.screens_changed_handler(two_screens(), (2000, 800), 20);
        let bars = state
            .actions
            .iter()
            .filter(|a| matches!(a, DisplayAction::CreateBar { .. }))
            .count();
        assert_eq!(bars, 2);
        state.bar_created_handler(0, WindowHandle::MockHandle(100));
        assert_eq!(
            state.monitors[0].bar_handle,
            Some(WindowHandle::MockHandle(100))
        );
    }

    #[test]
    fn unchanged_topology_reports_clean() {
        let mut state = state_with(two_screens());
        let dirty = state.screens_changed_handler(two_screens(), (2000, 800), 20);
        assert!(!dirty);
        assert!(state.actions.is_empty());
    }

    #[test]
    fn lost_monitor_hands_its_clients_to_the_first() {
        let mut state = state_with(two_screens());
        let stays = add_client(&mut state, 1, 0);
        let moves = add_client(&mut state, 2, 1);
        state.monitors[1].tagset[0] = TagMask::single(5);
        if let Some(c) = state.client_mut(moves) {
            c.tags = TagMask::single(5);
        }
        let dirty =
            state.screens_changed_handler(vec![Rect::new(0, 0, 1000, 800)], (1000, 800), 20);
        assert!(dirty);
        assert_eq!(state.monitors.len(), 1);
        let moved = state.client(moves).unwrap();
        assert_eq!(moved.monitor, 0);
        // keeps its tags, so it stays hidden until that tag is viewed
        assert_eq!(moved.tags, TagMask::single(5));
        assert_eq!(state.monitors[0].tiling, vec![moves, stays]);
        assert_eq!(state.selected_monitor, 0);
    }

    #[test]
    fn geometry_change_restretches_fullscreen_clients() {
        let mut state = state_with(vec![Rect::new(0, 0, 1000, 800)]);
        let handle = add_client(&mut state, 1, 0);
        state.set_fullscreen(handle, true);
        state.actions.clear();
        let dirty =
            state.screens_changed_handler(vec![Rect::new(0, 0, 1600, 900)], (1600, 900), 20);
        assert!(dirty);
        assert_eq!(
            state.client(handle).unwrap().geometry,
            Rect::new(0, 0, 1600, 900)
        );
    }

    #[test]
    fn monitor_numbers_follow_list_positions() {
        let state = state_with(two_screens());
        assert_eq!(state.monitors[0].num, 0);
        assert_eq!(state.monitors[1].num, 1);
    }
}
