use super::{Command, Config, DisplayEvent, DisplayServer, Manager};
use crate::state::default_status_text;
use crate::utils::modmask_lookup::ModMask;
use crate::utils::xkeysym_lookup;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Process one event from the display server. Returns true if the
    /// event changed anything worth flushing.
    pub fn display_event_handler(&mut self, event: DisplayEvent) -> bool {
        match event {
            DisplayEvent::ClientCreate(client) => self.window_created_handler(client),
            DisplayEvent::ClientUnmapped(handle) => self.window_unmapped_handler(handle),
            DisplayEvent::ClientDestroyed(handle) => self.window_destroyed_handler(handle),
            DisplayEvent::ClientChanged(change) => self.window_changed_handler(change),
            DisplayEvent::ConfigureRequest(request) => self.configure_request_handler(request),

            DisplayEvent::KeyCombo(modifiers, keysym) => {
                // Every binding on the chord runs, not just the first.
                let matching: Vec<Command> = self
                    .state
                    .keybinds
                    .iter()
                    .filter(|bind| {
                        (bind.modifier == modifiers || bind.modifier == ModMask::Any)
                            && xkeysym_lookup::into_keysym(&bind.key) == Some(keysym)
                    })
                    .map(|bind| bind.command.clone())
                    .collect();
                let mut handled = false;
                for command in &matching {
                    handled = self.command_handler(command) || handled;
                }
                handled
            }

            DisplayEvent::MouseCombo {
                modifiers,
                button,
                handle,
                target,
                clicked_tag,
                x,
                y,
            } => self.mouse_combo_handler(modifiers, button, handle, target, clicked_tag, x, y),

            DisplayEvent::PointerEnter(handle, _, _) => {
                self.state.pointer_enter_handler(handle);
                false
            }
            DisplayEvent::RootEnter(x, y) => {
                self.state.root_enter_handler(x, y);
                false
            }
            DisplayEvent::RootMotion(x, y) => {
                self.state.root_motion_handler(x, y);
                false
            }
            DisplayEvent::FocusIn(handle) => {
                self.state.focus_in_handler(handle);
                false
            }

            DisplayEvent::ScreensChanged {
                screens,
                root_dimensions,
                bar_height,
            } => self
                .state
                .screens_changed_handler(screens, root_dimensions, bar_height),

            DisplayEvent::StatusTextChanged(text) => {
                self.state.status_text = if text.is_empty() {
                    default_status_text()
                } else {
                    text
                };
                self.state.update_bar(self.state.selected_monitor);
                false
            }

            // Only meaningful inside a drag sub-loop; stray ones are
            // dropped.
            DisplayEvent::Motion { .. } | DisplayEvent::DragEnd => false,

            DisplayEvent::BarCreated(monitor, handle) => {
                self.state.bar_created_handler(monitor, handle)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Keybind, TestConfig};
    use crate::display_servers::MockDisplayServer;
    use crate::models::{Client, Rect, TagMask, WindowHandle};

    fn manager_with_keybinds(keybinds: Vec<Keybind>) -> Manager<TestConfig, MockDisplayServer> {
        let mut manager = Manager::new_test_with_config(TestConfig {
            tags: vec!["1".to_string(), "2".to_string()],
            keybinds,
            ..TestConfig::default()
        });
        manager
            .state
            .screens_changed_handler(vec![Rect::new(0, 0, 1000, 800)], (1000, 800), 20);
        manager
    }

    #[test]
    fn key_chords_run_their_bound_command() {
        let bind = Keybind {
            command: Command::View(TagMask::single(1)),
            modifier: ModMask::Super,
            key: "2".to_string(),
        };
        let mut manager = manager_with_keybinds(vec![bind]);
        let keysym = xkeysym_lookup::into_keysym("2").unwrap();
        assert!(manager.display_event_handler(DisplayEvent::KeyCombo(ModMask::Super, keysym)));
        assert_eq!(manager.state.monitors[0].view_tagset(), TagMask::single(1));
    }

    #[test]
    fn every_binding_on_the_same_chord_runs() {
        let chord = |command| Keybind {
            command,
            modifier: ModMask::Super,
            key: "m".to_string(),
        };
        let binds = vec![
            chord(Command::IncMasterCount(1)),
            chord(Command::IncMasterCount(1)),
        ];
        let mut manager = manager_with_keybinds(binds);
        let before = manager.state.monitors[0].master_count;
        let keysym = xkeysym_lookup::into_keysym("m").unwrap();
        manager.display_event_handler(DisplayEvent::KeyCombo(ModMask::Super, keysym));
        assert_eq!(manager.state.monitors[0].master_count, before + 2);
    }

    #[test]
    fn chords_with_the_wrong_modifier_do_nothing() {
        let bind = Keybind {
            command: Command::View(TagMask::single(1)),
            modifier: ModMask::Super | ModMask::Shift,
            key: "2".to_string(),
        };
        let mut manager = manager_with_keybinds(vec![bind]);
        let before = manager.state.monitors[0].view_tagset();
        let keysym = xkeysym_lookup::into_keysym("2").unwrap();
        assert!(!manager.display_event_handler(DisplayEvent::KeyCombo(ModMask::Super, keysym)));
        assert_eq!(manager.state.monitors[0].view_tagset(), before);
    }

    #[test]
    fn empty_status_text_falls_back_to_the_version_string() {
        let mut manager = manager_with_keybinds(vec![]);
        manager.display_event_handler(DisplayEvent::StatusTextChanged("load 0.42".to_string()));
        assert_eq!(manager.state.status_text, "load 0.42");
        manager.display_event_handler(DisplayEvent::StatusTextChanged(String::new()));
        assert!(manager.state.status_text.starts_with("tagwm-"));
    }

    #[test]
    fn create_events_land_in_the_client_arena() {
        let mut manager = manager_with_keybinds(vec![]);
        let handle = WindowHandle::MockHandle(1);
        let client = Client::new(handle, Rect::new(0, 0, 300, 200), 1);
        assert!(manager.display_event_handler(DisplayEvent::ClientCreate(client)));
        assert!(manager.state.client(handle).is_some());
        assert!(manager.display_event_handler(DisplayEvent::ClientDestroyed(handle)));
        assert!(manager.state.client(handle).is_none());
    }
}
