use std::sync::atomic::Ordering;

use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::models::WindowHandle;
use crate::{DisplayServer, Manager};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Run until `Command::Quit` clears the running flag. Each pass
    /// blocks in the display server for the next batch of events,
    /// feeds every one through the handlers, and performs whatever
    /// actions they queued before blocking again.
    pub fn event_loop(&mut self) {
        while self.state.running {
            self.display_server.flush();
            for event in self.display_server.get_next_events() {
                self.display_event_handler(event);
                self.drain_actions();
            }
            if self.reap_requested.swap(false, Ordering::SeqCst) {
                self.children.remove_finished_children();
            }
        }
    }

    /// Perform every queued action. An action can answer back with a
    /// follow-up event (bar creation does); those are fed straight
    /// back through the handlers, so the queue is pumped until it is
    /// truly empty.
    pub(crate) fn drain_actions(&mut self) {
        while let Some(act) = self.state.actions.pop_front() {
            if let Some(event) = self.display_server.execute_action(act) {
                self.display_event_handler(event);
            }
        }
    }

    /// Hand the session back in a usable state: tear every window down
    /// as if it had been unmapped, drop the bars, and let the server
    /// close its connection.
    pub fn cleanup(&mut self) {
        while let Some(handle) = self.state.clients.first().map(|c| c.handle) {
            self.window_unmapped_handler(handle);
        }
        let bars: Vec<WindowHandle> = self
            .state
            .monitors
            .iter()
            .filter_map(|m| m.bar_handle)
            .collect();
        for handle in bars {
            self.state.actions.push_back(DisplayAction::DestroyBar(handle));
        }
        self.drain_actions();
        self.display_server.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TestConfig;
    use crate::display_servers::MockDisplayServer;
    use crate::models::{Client, Rect};

    fn manager() -> Manager<TestConfig, MockDisplayServer> {
        let mut manager = Manager::new_test(vec!["1".to_string(), "2".to_string()]);
        manager
            .state
            .screens_changed_handler(vec![Rect::new(0, 0, 1000, 800)], (1000, 800), 20);
        manager
    }

    #[test]
    fn bar_creation_round_trips_through_the_action_queue() {
        let mut manager = manager();
        assert!(manager.state.monitors[0].bar_handle.is_none());
        manager.drain_actions();
        assert_eq!(
            manager.state.monitors[0].bar_handle,
            Some(WindowHandle::MockHandle(1000))
        );
        assert!(manager.state.actions.is_empty());
    }

    #[test]
    fn cleanup_tears_down_every_window_and_bar() {
        let mut manager = manager();
        manager.drain_actions();
        for id in 1..=2 {
            let handle = WindowHandle::MockHandle(id);
            manager.window_created_handler(Client::new(handle, Rect::new(0, 0, 200, 100), 1));
        }
        manager.cleanup();
        assert!(manager.state.clients.is_empty());
        let teardowns = manager
            .display_server
            .actions
            .iter()
            .filter(|a| matches!(a, DisplayAction::TeardownWindow { .. }))
            .count();
        assert_eq!(teardowns, 2);
        assert!(manager
            .display_server
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::DestroyBar(_))));
    }
}
