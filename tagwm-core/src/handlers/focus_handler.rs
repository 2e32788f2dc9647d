#![allow(clippy::wildcard_imports)]

use super::*;

impl State {
    /// Give a client input focus, or let focus fall back to the first
    /// visible client in the selected monitor's stack order. Passing a
    /// hidden client behaves like passing none. Focusing moves the
    /// client to the stack head, migrates monitor selection to it, and
    /// clears any urgency it carried; focusing nothing returns input to
    /// the root. Bars are redrawn either way.
    pub fn focus(&mut self, handle: Option<WindowHandle>) {
        let mut target = handle.filter(|&h| self.is_visible(h));
        if target.is_none() {
            target = self.first_visible_in_stack(self.selected_monitor);
        }
        let previous = self.monitors[self.selected_monitor].selected;
        if let Some(prev) = previous {
            if Some(prev) != target {
                self.unfocus(prev, false);
            }
        }
        if let Some(handle) = target {
            if let Some(monitor) = self.client(handle).map(|c| c.monitor) {
                if monitor != self.selected_monitor {
                    self.selected_monitor = monitor;
                }
            }
            if self.client(handle).map_or(false, |c| c.is_urgent) {
                self.set_urgent(handle, false);
            }
            self.detach_stack(handle);
            self.attach_stack(handle);
            self.actions.push_back(DisplayAction::GrabButtons {
                handle,
                focused: true,
            });
            self.actions.push_back(DisplayAction::SetWindowBorder {
                handle,
                focused: true,
            });
            let never_focus = self.client(handle).map_or(false, |c| c.never_focus);
            self.actions.push_back(DisplayAction::FocusWindow {
                handle,
                never_focus,
            });
        } else {
            self.actions.push_back(DisplayAction::UnsetFocus);
        }
        self.monitors[self.selected_monitor].selected = target;
        self.update_bars();
    }

    /// Strip focus feedback from a client; when `setfocus` is given,
    /// input reverts to the root as well.
    pub fn unfocus(&mut self, handle: WindowHandle, setfocus: bool) {
        if self.client(handle).is_none() {
            return;
        }
        self.actions.push_back(DisplayAction::GrabButtons {
            handle,
            focused: false,
        });
        self.actions.push_back(DisplayAction::SetWindowBorder {
            handle,
            focused: false,
        });
        if setfocus {
            self.actions.push_back(DisplayAction::UnsetFocus);
        }
    }

    /// Re-establish the monitor's z-order: bar redrawn first, the
    /// focused client raised if it floats, every visible tiled client
    /// slotted below the bar in stack order. The server drains the
    /// pointer-crossing events this shuffle produces so restacking
    /// never feeds back into focus.
    pub fn restack(&mut self, monitor: usize) {
        self.update_bar(monitor);
        let Some(selected) = self.monitors[monitor].selected else {
            return;
        };
        let arranges = self.monitors[monitor].layout().arranges();
        let floating = self.client(selected).map_or(false, |c| c.is_floating);
        if floating || !arranges {
            self.actions.push_back(DisplayAction::RaiseWindow(selected));
        }
        let mut order = Vec::new();
        if arranges {
            let view = self.monitors[monitor].view_tagset();
            if let Some(bar) = self.monitors[monitor].bar_handle {
                order.push(bar);
            }
            for &handle in &self.monitors[monitor].stacking {
                if self
                    .client(handle)
                    .map_or(false, |c| !c.is_floating && c.visible_on(view))
                {
                    order.push(handle);
                }
            }
        }
        self.actions.push_back(DisplayAction::RestackWindows(order));
    }

    /// The pointer crossed into a client or bar window.
    pub fn pointer_enter_handler(&mut self, handle: WindowHandle) {
        let is_client = self.client(handle).is_some();
        let Some(monitor) = self.window_to_monitor(handle) else {
            return;
        };
        if monitor != self.selected_monitor {
            if let Some(prev) = self.monitors[self.selected_monitor].selected {
                self.unfocus(prev, true);
            }
            self.selected_monitor = monitor;
        } else if !is_client || Some(handle) == self.monitors[monitor].selected {
            return;
        }
        self.focus(is_client.then_some(handle));
    }

    /// The pointer crossed back onto the root window.
    pub fn root_enter_handler(&mut self, x: i32, y: i32) {
        let monitor = self.rect_to_monitor(Rect::new(x, y, 1, 1));
        if monitor == self.selected_monitor {
            return;
        }
        if let Some(prev) = self.monitors[self.selected_monitor].selected {
            self.unfocus(prev, true);
        }
        self.selected_monitor = monitor;
        self.focus(None);
    }

    /// Pointer motion across the root; switches the selected monitor
    /// when the pointer wanders onto another one.
    pub fn root_motion_handler(&mut self, x: i32, y: i32) {
        let monitor = self.rect_to_monitor(Rect::new(x, y, 1, 1));
        if Some(monitor) != self.motion_monitor && self.motion_monitor.is_some() {
            if let Some(prev) = self.monitors[self.selected_monitor].selected {
                self.unfocus(prev, true);
            }
            self.selected_monitor = monitor;
            self.focus(None);
        }
        self.motion_monitor = Some(monitor);
    }

    /// Some clients steal input focus without asking; push it back to
    /// the window we consider focused.
    pub fn focus_in_handler(&mut self, handle: WindowHandle) {
        let Some(selected) = self.monitors[self.selected_monitor].selected else {
            return;
        };
        if selected != handle {
            let never_focus = self.client(selected).map_or(false, |c| c.never_focus);
            self.actions.push_back(DisplayAction::FocusWindow {
                handle: selected,
                never_focus,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::TestConfig;
    use crate::display_action::DisplayAction;
    use crate::models::{Client, Manager, Rect, TagMask, WindowHandle};

    fn manager() -> Manager<TestConfig, crate::display_servers::MockDisplayServer> {
        let mut manager = Manager::new_test(vec![
            "1".to_string(),
            "2".to_string(),
            "3".to_string(),
        ]);
        manager
            .state
            .screens_changed_handler(vec![Rect::new(0, 0, 1000, 800)], (1000, 800), 20);
        manager
    }

    fn created(manager: &mut Manager<TestConfig, crate::display_servers::MockDisplayServer>, id: i32) -> WindowHandle {
        let handle = WindowHandle::MockHandle(id);
        let client = Client::new(handle, Rect::new(5, 25, 400, 300), 1);
        manager.window_created_handler(client);
        handle
    }

    #[test]
    fn focus_falls_back_to_first_visible_in_stack() {
        let mut manager = manager();
        let a = created(&mut manager, 1);
        let b = created(&mut manager, 2);
        assert_eq!(manager.state.monitors[0].selected, Some(b));
        manager.state.focus(None);
        // b is the stack head, so fallback keeps it focused
        assert_eq!(manager.state.monitors[0].selected, Some(b));
        manager.state.focus(Some(a));
        assert_eq!(manager.state.monitors[0].selected, Some(a));
        assert_eq!(manager.state.monitors[0].stacking[0], a);
    }

    #[test]
    fn focusing_a_hidden_client_behaves_like_focus_none() {
        let mut manager = manager();
        let a = created(&mut manager, 1);
        let b = created(&mut manager, 2);
        if let Some(c) = manager.state.client_mut(a) {
            c.tags = TagMask::single(2);
        }
        manager.state.focus(Some(a));
        assert_eq!(manager.state.monitors[0].selected, Some(b));
    }

    #[test]
    fn focus_clears_urgency() {
        let mut manager = manager();
        let a = created(&mut manager, 1);
        let _b = created(&mut manager, 2);
        if let Some(c) = manager.state.client_mut(a) {
            c.is_urgent = true;
        }
        manager.state.focus(Some(a));
        assert!(!manager.state.client(a).unwrap().is_urgent);
    }

    #[test]
    fn focus_none_reverts_input_to_the_root() {
        let mut manager = manager();
        let a = created(&mut manager, 1);
        if let Some(c) = manager.state.client_mut(a) {
            c.tags = TagMask::single(2);
        }
        manager.state.actions.clear();
        manager.state.focus(None);
        assert_eq!(manager.state.monitors[0].selected, None);
        assert!(manager
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::UnsetFocus)));
    }

    #[test]
    fn pointer_enter_focuses_the_entered_client() {
        let mut manager = manager();
        let a = created(&mut manager, 1);
        let b = created(&mut manager, 2);
        assert_eq!(manager.state.monitors[0].selected, Some(b));
        manager.state.pointer_enter_handler(a);
        assert_eq!(manager.state.monitors[0].selected, Some(a));
    }

    #[test]
    fn restack_places_tiled_clients_below_the_bar() {
        let mut manager = manager();
        let bar = WindowHandle::MockHandle(99);
        manager.state.monitors[0].bar_handle = Some(bar);
        let a = created(&mut manager, 1);
        let b = created(&mut manager, 2);
        manager.state.actions.clear();
        manager.state.restack(0);
        let order = manager
            .state
            .actions
            .iter()
            .find_map(|act| match act {
                DisplayAction::RestackWindows(order) => Some(order.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(order, vec![bar, b, a]);
    }

    #[test]
    fn restack_raises_a_floating_selection() {
        let mut manager = manager();
        let a = created(&mut manager, 1);
        if let Some(c) = manager.state.client_mut(a) {
            c.is_floating = true;
        }
        manager.state.actions.clear();
        manager.state.restack(0);
        assert!(manager
            .state
            .actions
            .iter()
            .any(|act| matches!(act, DisplayAction::RaiseWindow(h) if *h == a)));
    }
}
