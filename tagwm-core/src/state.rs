//! The single owned context every handler threads through.

use std::collections::VecDeque;

use crate::config::{BarPosition, Config, Keybind, Mousebind, WindowRule};
use crate::display_action::DisplayAction;
use crate::layouts::{self, Layout};
use crate::models::{
    BarSnapshot, BarTitle, Client, Mode, Monitor, Rect, TagCell, TagMask, WindowHandle,
};

#[derive(Debug)]
pub struct State {
    /// Flat arena of managed clients, in manage order.
    pub clients: Vec<Client>,
    pub monitors: Vec<Monitor>,
    pub selected_monitor: usize,
    pub mode: Mode,
    pub status_text: String,
    pub running: bool,
    pub actions: VecDeque<DisplayAction>,
    /// Height of the bar strip, derived from the font by the server.
    pub bar_height: i32,
    /// Total display dimensions, the bound for interactive drags.
    pub root_dimensions: (i32, i32),
    /// Monitor the pointer was last seen on, for root-motion debounce.
    pub motion_monitor: Option<usize>,

    // Configuration snapshot, read once at startup.
    pub tag_names: Vec<String>,
    pub rules: Vec<WindowRule>,
    pub keybinds: Vec<Keybind>,
    pub mousebinds: Vec<Mousebind>,
    pub border_width: i32,
    pub snap_distance: i32,
    pub respect_resize_hints: bool,
    pub default_master_factor: f32,
    pub default_master_count: u32,
    pub default_show_bar: bool,
    pub default_bar_position: BarPosition,
    pub default_layouts: [Layout; 2],
}

impl State {
    pub(crate) fn new(config: &impl Config) -> Self {
        let mut tag_names = config.tag_names();
        tag_names.truncate(crate::models::MAX_TAGS);
        Self {
            clients: Vec::new(),
            monitors: Vec::new(),
            selected_monitor: 0,
            mode: Mode::default(),
            status_text: default_status_text(),
            running: true,
            actions: VecDeque::new(),
            bar_height: 0,
            root_dimensions: (0, 0),
            motion_monitor: None,
            tag_names,
            rules: config.rules(),
            keybinds: config.keybinds(),
            mousebinds: config.mousebinds(),
            border_width: config.border_width(),
            snap_distance: config.snap_distance(),
            respect_resize_hints: config.respect_resize_hints(),
            default_master_factor: config.master_factor(),
            default_master_count: config.master_count(),
            default_show_bar: config.show_bar(),
            default_bar_position: config.bar_position(),
            default_layouts: config.layouts(),
        }
    }

    pub fn client(&self, handle: WindowHandle) -> Option<&Client> {
        self.clients.iter().find(|c| c.handle == handle)
    }

    pub fn client_mut(&mut self, handle: WindowHandle) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| c.handle == handle)
    }

    /// Whether the client is shown under its monitor's current view.
    pub fn is_visible(&self, handle: WindowHandle) -> bool {
        self.client(handle)
            .map_or(false, |c| c.visible_on(self.monitors[c.monitor].view_tagset()))
    }

    /// The monitor's tiling order restricted to visible, non-floating
    /// clients. This is the sequence layouts operate on.
    pub fn tiled_handles(&self, monitor: usize) -> Vec<WindowHandle> {
        let view = self.monitors[monitor].view_tagset();
        self.monitors[monitor]
            .tiling
            .iter()
            .copied()
            .filter(|&h| {
                self.client(h)
                    .map_or(false, |c| !c.is_floating && c.visible_on(view))
            })
            .collect()
    }

    /// Count of all visible clients on the monitor, floating included.
    pub fn visible_count(&self, monitor: usize) -> usize {
        let view = self.monitors[monitor].view_tagset();
        self.monitors[monitor]
            .tiling
            .iter()
            .filter(|&&h| self.client(h).map_or(false, |c| c.visible_on(view)))
            .count()
    }

    pub fn first_visible_in_stack(&self, monitor: usize) -> Option<WindowHandle> {
        let view = self.monitors[monitor].view_tagset();
        self.monitors[monitor]
            .stacking
            .iter()
            .copied()
            .find(|&h| self.client(h).map_or(false, |c| c.visible_on(view)))
    }

    pub fn attach(&mut self, handle: WindowHandle) {
        let Some(monitor) = self.client(handle).map(|c| c.monitor) else {
            return;
        };
        self.monitors[monitor].attach(handle);
    }

    pub fn detach(&mut self, handle: WindowHandle) {
        let Some(monitor) = self.client(handle).map(|c| c.monitor) else {
            return;
        };
        self.monitors[monitor].detach(handle);
    }

    pub fn attach_stack(&mut self, handle: WindowHandle) {
        let Some(monitor) = self.client(handle).map(|c| c.monitor) else {
            return;
        };
        self.monitors[monitor].attach_stack(handle);
    }

    /// Removes the client from the stacking order; if it was the
    /// monitor's focused client, focus advances to the first remaining
    /// visible client in stack order.
    pub fn detach_stack(&mut self, handle: WindowHandle) {
        let Some(monitor) = self.client(handle).map(|c| c.monitor) else {
            return;
        };
        self.monitors[monitor].detach_stack(handle);
        if self.monitors[monitor].selected == Some(handle) {
            self.monitors[monitor].selected = self.first_visible_in_stack(monitor);
        }
    }

    /// The monitor whose usable area shares the most surface with the
    /// rectangle; ties keep the first. Falls back to the selected
    /// monitor when nothing overlaps.
    pub fn rect_to_monitor(&self, rect: Rect) -> usize {
        let mut result = self.selected_monitor;
        let mut best = 0;
        for (i, m) in self.monitors.iter().enumerate() {
            let area = rect.intersect_area(&m.window_area);
            if area > best {
                best = area;
                result = i;
            }
        }
        result
    }

    /// Monitor owning the given window, whether it is a bar or a
    /// managed client.
    pub fn window_to_monitor(&self, handle: WindowHandle) -> Option<usize> {
        if let Some(i) = self
            .monitors
            .iter()
            .position(|m| m.bar_handle == Some(handle))
        {
            return Some(i);
        }
        self.client(handle).map(|c| c.monitor)
    }

    /// Constrain a requested geometry to the screen and the client's
    /// size hints, in the order the hint rules demand: clamp to at
    /// least 1x1, keep the window reachable (fully inside the usable
    /// area unless the move is interactive), then base size, aspect
    /// ratio, resize increments, and min/max bounds. Hints apply to
    /// tiled clients only when configured to.
    pub fn apply_size_hints(
        &self,
        client: &Client,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        interactive: bool,
    ) -> (Rect, bool) {
        let monitor = &self.monitors[client.monitor];
        let mut x = x;
        let mut y = y;
        let mut w = w.max(1);
        let mut h = h.max(1);
        if interactive {
            let (sw, sh) = self.root_dimensions;
            if x > sw {
                x = sw - client.total_width();
            }
            if y > sh {
                y = sh - client.total_height();
            }
            if x + w + 2 * client.border_width < 0 {
                x = 0;
            }
            if y + h + 2 * client.border_width < 0 {
                y = 0;
            }
        } else {
            let area = monitor.window_area;
            if x >= area.right() {
                x = area.right() - client.total_width();
            }
            if y >= area.bottom() {
                y = area.bottom() - client.total_height();
            }
            if x + w + 2 * client.border_width <= area.x {
                x = area.x;
            }
            if y + h + 2 * client.border_width <= area.y {
                y = area.y;
            }
        }
        if h < self.bar_height {
            h = self.bar_height;
        }
        if w < self.bar_height {
            w = self.bar_height;
        }
        if self.respect_resize_hints || client.is_floating || !monitor.layout().arranges() {
            let hints = client.hints;
            // ICCCM 4.1.2.3: a base size doubling as the minimum must
            // not be subtracted before the aspect correction.
            let base_is_min = hints.base_w == hints.min_w && hints.base_h == hints.min_h;
            if !base_is_min {
                w -= hints.base_w;
                h -= hints.base_h;
            }
            if hints.min_aspect > 0.0 && hints.max_aspect > 0.0 {
                if hints.max_aspect < w as f32 / h as f32 {
                    w = (h as f32 * hints.max_aspect + 0.5) as i32;
                } else if hints.min_aspect < h as f32 / w as f32 {
                    h = (w as f32 * hints.min_aspect + 0.5) as i32;
                }
            }
            if base_is_min {
                w -= hints.base_w;
                h -= hints.base_h;
            }
            if hints.inc_w != 0 {
                w -= w % hints.inc_w;
            }
            if hints.inc_h != 0 {
                h -= h % hints.inc_h;
            }
            w = (w + hints.base_w).max(hints.min_w);
            h = (h + hints.base_h).max(hints.min_h);
            if hints.max_w != 0 {
                w = w.min(hints.max_w);
            }
            if hints.max_h != 0 {
                h = h.min(hints.max_h);
            }
        }
        let target = Rect::new(x, y, w, h);
        (target, target != client.geometry)
    }

    /// Resize with hint application; skips the server round trip when
    /// the final geometry is already current.
    pub fn resize(&mut self, handle: WindowHandle, x: i32, y: i32, w: i32, h: i32, interactive: bool) {
        let Some(client) = self.client(handle) else {
            return;
        };
        let (target, changed) = self.apply_size_hints(client, x, y, w, h, interactive);
        if changed {
            self.resize_client(handle, target);
        }
    }

    /// Apply a geometry unconditionally, remembering the previous one.
    pub fn resize_client(&mut self, handle: WindowHandle, target: Rect) {
        let Some(client) = self.client_mut(handle) else {
            return;
        };
        client.old_geometry = client.geometry;
        client.geometry = target;
        let border_width = client.border_width;
        self.actions.push_back(DisplayAction::MoveResizeWindow {
            handle,
            geometry: target,
            border_width,
        });
    }

    /// Re-lay-out one monitor (and restack it), or every monitor.
    pub fn arrange(&mut self, monitor: Option<usize>) {
        match monitor {
            Some(m) => {
                self.show_hide(m);
                self.arrange_monitor(m);
                self.restack(m);
            }
            None => {
                for m in 0..self.monitors.len() {
                    self.show_hide(m);
                }
                for m in 0..self.monitors.len() {
                    self.arrange_monitor(m);
                }
            }
        }
    }

    fn arrange_monitor(&mut self, monitor: usize) {
        let layout = self.monitors[monitor].layout();
        self.monitors[monitor].layout_symbol = layout.symbol().to_owned();
        match layout {
            Layout::Tiled => layouts::tiled::update(self, monitor),
            Layout::Monocle => layouts::monocle::update(self, monitor),
            Layout::Floating => {}
        }
    }

    /// Move visible clients back on screen walking the stack top-down,
    /// then park hidden ones off-screen bottom-up. The visitation
    /// order keeps newly exposed windows painted before the ones they
    /// covered are pulled away.
    pub fn show_hide(&mut self, monitor: usize) {
        let stacking = self.monitors[monitor].stacking.clone();
        let view = self.monitors[monitor].view_tagset();
        let arranges = self.monitors[monitor].layout().arranges();
        for &handle in &stacking {
            let Some((geometry, floating, fullscreen, visible)) = self
                .client(handle)
                .map(|c| (c.geometry, c.is_floating, c.is_fullscreen, c.visible_on(view)))
            else {
                continue;
            };
            if !visible {
                continue;
            }
            self.actions.push_back(DisplayAction::MoveWindow {
                handle,
                x: geometry.x,
                y: geometry.y,
            });
            if (!arranges || floating) && !fullscreen {
                self.resize(handle, geometry.x, geometry.y, geometry.w, geometry.h, false);
            }
        }
        for &handle in stacking.iter().rev() {
            let Some((x, y)) = self
                .client(handle)
                .filter(|c| !c.visible_on(view))
                .map(|c| (-2 * c.total_width(), c.geometry.y))
            else {
                continue;
            };
            self.actions.push_back(DisplayAction::MoveWindow { handle, x, y });
        }
    }

    pub fn set_urgent(&mut self, handle: WindowHandle, urgent: bool) {
        let Some(client) = self.client_mut(handle) else {
            return;
        };
        client.is_urgent = urgent;
        self.actions
            .push_back(DisplayAction::SetUrgency { handle, urgent });
    }

    /// Enter or leave fullscreen. Entering saves the floating flag,
    /// border, and geometry and stretches the client over the whole
    /// monitor, bar included; leaving restores all three and
    /// rearranges.
    pub fn set_fullscreen(&mut self, handle: WindowHandle, fullscreen: bool) {
        let Some((is_fullscreen, monitor)) =
            self.client(handle).map(|c| (c.is_fullscreen, c.monitor))
        else {
            return;
        };
        if fullscreen && !is_fullscreen {
            self.actions.push_back(DisplayAction::SetFullscreenProp {
                handle,
                fullscreen: true,
            });
            let monitor_geometry = self.monitors[monitor].geometry;
            if let Some(client) = self.client_mut(handle) {
                client.is_fullscreen = true;
                client.old_floating = client.is_floating;
                client.old_border_width = client.border_width;
                client.border_width = 0;
                client.is_floating = true;
            }
            self.resize_client(handle, monitor_geometry);
            self.actions.push_back(DisplayAction::RaiseWindow(handle));
        } else if !fullscreen && is_fullscreen {
            self.actions.push_back(DisplayAction::SetFullscreenProp {
                handle,
                fullscreen: false,
            });
            let mut restored = Rect::default();
            if let Some(client) = self.client_mut(handle) {
                client.is_fullscreen = false;
                client.is_floating = client.old_floating;
                client.border_width = client.old_border_width;
                client.geometry = client.old_geometry;
                restored = client.geometry;
            }
            self.resize_client(handle, restored);
            self.arrange(Some(monitor));
        }
    }

    /// Move a client to another monitor, giving it that monitor's
    /// current view tags.
    pub fn send_to_monitor(&mut self, handle: WindowHandle, target: usize) {
        let Some(current) = self.client(handle).map(|c| c.monitor) else {
            return;
        };
        if current == target || target >= self.monitors.len() {
            return;
        }
        self.unfocus(handle, true);
        self.detach(handle);
        self.detach_stack(handle);
        let view = self.monitors[target].view_tagset();
        if let Some(client) = self.client_mut(handle) {
            client.monitor = target;
            client.tags = view;
        }
        self.attach(handle);
        self.attach_stack(handle);
        self.focus(None);
        self.arrange(None);
    }

    /// Rebuild the published list of managed windows from scratch.
    pub fn update_client_list(&mut self) {
        let handles = self.clients.iter().map(|c| c.handle).collect();
        self.actions.push_back(DisplayAction::SetClientList(handles));
    }

    pub fn update_bars(&mut self) {
        let snapshots = (0..self.monitors.len())
            .filter_map(|m| self.bar_snapshot(m))
            .collect();
        self.actions.push_back(DisplayAction::RefreshBars(snapshots));
    }

    pub fn update_bar(&mut self, monitor: usize) {
        let snapshots = self.bar_snapshot(monitor).into_iter().collect();
        self.actions.push_back(DisplayAction::RefreshBars(snapshots));
    }

    fn bar_snapshot(&self, monitor: usize) -> Option<BarSnapshot> {
        let m = &self.monitors[monitor];
        let bar = m.bar_handle?;
        if !m.show_bar {
            return None;
        }
        let mut occupied = TagMask::new(0);
        let mut urgent = TagMask::new(0);
        for c in self.clients.iter().filter(|c| c.monitor == monitor) {
            occupied = occupied | c.tags;
            if c.is_urgent {
                urgent = urgent | c.tags;
            }
        }
        let selected_monitor = monitor == self.selected_monitor;
        let selected_client = m.selected.and_then(|h| self.client(h));
        let focused_tags = if selected_monitor {
            selected_client.map_or(TagMask::new(0), |c| c.tags)
        } else {
            TagMask::new(0)
        };
        let view = m.view_tagset();
        let tags = self
            .tag_names
            .iter()
            .enumerate()
            .map(|(i, label)| TagCell {
                label: label.clone(),
                viewed: view.contains(i),
                occupied: occupied.contains(i),
                urgent: urgent.contains(i),
                focus_here: focused_tags.contains(i),
            })
            .collect();
        let title = selected_client.map(|c| BarTitle {
            text: c.name.clone(),
            floating: c.is_floating,
            fixed: c.is_fixed,
        });
        Some(BarSnapshot {
            bar,
            width: m.geometry.w,
            tags,
            layout_symbol: m.layout_symbol.clone(),
            title,
            status: selected_monitor.then(|| self.status_text.clone()),
            selected_monitor,
        })
    }
}

pub(crate) fn default_status_text() -> String {
    concat!("tagwm-", env!("CARGO_PKG_VERSION")).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TestConfig;
    use crate::models::NormalHints;

    fn state_with_screen() -> State {
        let mut state = State::new(&TestConfig::with_tag_count(9));
        state.screens_changed_handler(vec![Rect::new(0, 0, 1000, 800)], (1000, 800), 20);
        state.actions.clear();
        state
    }

    fn add_client(state: &mut State, id: i32) -> WindowHandle {
        let handle = WindowHandle::MockHandle(id);
        let mut client = Client::new(handle, Rect::new(10, 30, 300, 200), 1);
        client.tags = state.monitors[0].view_tagset();
        state.clients.push(client);
        state.attach(handle);
        state.attach_stack(handle);
        handle
    }

    #[test]
    fn attach_places_clients_in_both_orders_or_neither() {
        let mut state = state_with_screen();
        let a = add_client(&mut state, 1);
        let b = add_client(&mut state, 2);
        for &h in &[a, b] {
            assert_eq!(state.monitors[0].tiling.iter().filter(|&&x| x == h).count(), 1);
            assert_eq!(
                state.monitors[0].stacking.iter().filter(|&&x| x == h).count(),
                1
            );
        }
        state.detach(a);
        state.detach_stack(a);
        assert!(!state.monitors[0].tiling.contains(&a));
        assert!(!state.monitors[0].stacking.contains(&a));
    }

    #[test]
    fn detach_stack_advances_selection_to_next_visible() {
        let mut state = state_with_screen();
        let a = add_client(&mut state, 1);
        let b = add_client(&mut state, 2);
        state.monitors[0].selected = Some(b);
        state.detach_stack(b);
        assert_eq!(state.monitors[0].selected, Some(a));
        state.detach_stack(a);
        assert_eq!(state.monitors[0].selected, None);
    }

    #[test]
    fn hidden_clients_do_not_receive_selection() {
        let mut state = state_with_screen();
        let a = add_client(&mut state, 1);
        let b = add_client(&mut state, 2);
        if let Some(c) = state.client_mut(a) {
            c.tags = TagMask::single(5);
        }
        state.monitors[0].selected = Some(b);
        state.detach_stack(b);
        assert_eq!(state.monitors[0].selected, None);
    }

    #[test]
    fn rect_to_monitor_prefers_largest_overlap_first_wins_on_tie() {
        let mut state = State::new(&TestConfig::with_tag_count(9));
        state.screens_changed_handler(
            vec![Rect::new(0, 0, 1000, 800), Rect::new(1000, 0, 1000, 800)],
            (2000, 800),
            20,
        );
        assert_eq!(state.rect_to_monitor(Rect::new(1200, 100, 10, 10)), 1);
        assert_eq!(state.rect_to_monitor(Rect::new(100, 100, 10, 10)), 0);
        // straddling both equally keeps the first
        assert_eq!(state.rect_to_monitor(Rect::new(990, 100, 20, 10)), 0);
    }

    #[test]
    fn size_hints_clamp_to_minimum_one_pixel() {
        let mut state = state_with_screen();
        let handle = add_client(&mut state, 1);
        if let Some(c) = state.client_mut(handle) {
            c.is_floating = true;
        }
        let client = state.client(handle).unwrap().clone();
        let (target, _) = state.apply_size_hints(&client, 50, 50, -10, 0, false);
        assert!(target.w >= 1 && target.h >= 1);
    }

    #[test]
    fn size_hints_respect_increments_above_base() {
        let mut state = state_with_screen();
        let handle = add_client(&mut state, 1);
        if let Some(c) = state.client_mut(handle) {
            c.is_floating = true;
            c.update_size_hints(Some(NormalHints {
                base: Some((10, 10)),
                inc: Some((7, 5)),
                ..NormalHints::default()
            }));
        }
        let client = state.client(handle).unwrap().clone();
        let (target, _) = state.apply_size_hints(&client, 100, 100, 100, 100, false);
        assert_eq!((target.w - 10) % 7, 0);
        assert_eq!((target.h - 10) % 5, 0);
    }

    #[test]
    fn size_hints_ignored_for_tiled_clients_by_default() {
        let mut state = state_with_screen();
        let handle = add_client(&mut state, 1);
        if let Some(c) = state.client_mut(handle) {
            c.update_size_hints(Some(NormalHints {
                inc: Some((100, 100)),
                ..NormalHints::default()
            }));
        }
        let client = state.client(handle).unwrap().clone();
        let (target, _) = state.apply_size_hints(&client, 100, 100, 333, 333, false);
        assert_eq!((target.w, target.h), (333, 333));
    }

    #[test]
    fn non_interactive_resize_stays_inside_the_window_area() {
        let mut state = state_with_screen();
        let handle = add_client(&mut state, 1);
        if let Some(c) = state.client_mut(handle) {
            c.is_floating = true;
        }
        let client = state.client(handle).unwrap().clone();
        let (target, _) = state.apply_size_hints(&client, 5000, 5000, 300, 200, false);
        assert!(target.x < state.monitors[0].window_area.right());
        assert!(target.y < state.monitors[0].window_area.bottom());
    }

    #[test]
    fn interactive_resize_may_cross_monitor_edges() {
        let mut state = state_with_screen();
        let handle = add_client(&mut state, 1);
        if let Some(c) = state.client_mut(handle) {
            c.is_floating = true;
        }
        let client = state.client(handle).unwrap().clone();
        // inside the total display bounds, past the window area
        let (target, _) = state.apply_size_hints(&client, 900, 700, 300, 200, true);
        assert_eq!((target.x, target.y), (900, 700));
    }

    #[test]
    fn resize_skips_the_server_when_nothing_changed() {
        let mut state = state_with_screen();
        let handle = add_client(&mut state, 1);
        let geometry = state.client(handle).unwrap().geometry;
        state.actions.clear();
        state.resize(handle, geometry.x, geometry.y, geometry.w, geometry.h, false);
        assert!(state.actions.is_empty());
    }

    #[test]
    fn show_hide_parks_hidden_clients_off_screen() {
        let mut state = state_with_screen();
        let handle = add_client(&mut state, 1);
        if let Some(c) = state.client_mut(handle) {
            c.tags = TagMask::single(3);
        }
        state.actions.clear();
        state.show_hide(0);
        let total_width = state.client(handle).unwrap().total_width();
        assert!(state.actions.iter().any(|a| matches!(
            a,
            DisplayAction::MoveWindow { x, .. } if *x == -2 * total_width
        )));
    }

    #[test]
    fn fullscreen_round_trip_restores_geometry_and_border() {
        let mut state = state_with_screen();
        let handle = add_client(&mut state, 1);
        let before = state.client(handle).unwrap().geometry;
        state.set_fullscreen(handle, true);
        let full = state.client(handle).unwrap();
        assert!(full.is_fullscreen);
        assert_eq!(full.geometry, state.monitors[0].geometry);
        assert_eq!(full.border_width, 0);
        state.set_fullscreen(handle, false);
        let restored = state.client(handle).unwrap();
        assert!(!restored.is_fullscreen);
        assert_eq!(restored.geometry, before);
        assert_eq!(restored.border_width, 1);
    }

    #[test]
    fn send_to_monitor_adopts_the_target_view() {
        let mut state = State::new(&TestConfig::with_tag_count(9));
        state.screens_changed_handler(
            vec![Rect::new(0, 0, 1000, 800), Rect::new(1000, 0, 1000, 800)],
            (2000, 800),
            20,
        );
        state.actions.clear();
        let handle = add_client(&mut state, 1);
        state.monitors[1].tagset = [TagMask::single(4), TagMask::single(0)];
        state.send_to_monitor(handle, 1);
        let client = state.client(handle).unwrap();
        assert_eq!(client.monitor, 1);
        assert_eq!(client.tags, TagMask::single(4));
        assert!(state.monitors[1].tiling.contains(&handle));
        assert!(!state.monitors[0].tiling.contains(&handle));
    }
}
