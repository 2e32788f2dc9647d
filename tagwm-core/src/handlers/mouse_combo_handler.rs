use super::{Command, Config, Manager, Rect, TagMask, WindowHandle};
use crate::config::MouseTarget;
use crate::display_servers::DisplayServer;
use crate::utils::modmask_lookup::{Button, ModMask};

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// A button press, already decoded by the server into the region it
    /// landed in (and the tag cell for presses on the tag strip). The
    /// press focuses whatever is under it, then runs every matching
    /// mouse binding. The server reports modifiers with the lock masks
    /// already stripped.
    #[allow(clippy::too_many_arguments)]
    pub fn mouse_combo_handler(
        &mut self,
        modifiers: ModMask,
        button: Button,
        handle: WindowHandle,
        target: MouseTarget,
        clicked_tag: Option<usize>,
        x: i32,
        y: i32,
    ) -> bool {
        let monitor = match target {
            MouseTarget::RootWindow => Some(self.state.rect_to_monitor(Rect::new(x, y, 1, 1))),
            _ => self.state.window_to_monitor(handle),
        };
        let mut handled = false;
        if let Some(monitor) = monitor {
            if monitor != self.state.selected_monitor {
                if let Some(previous) = self.state.monitors[self.state.selected_monitor].selected {
                    self.state.unfocus(previous, true);
                }
                self.state.selected_monitor = monitor;
                self.state.focus(None);
                handled = true;
            }
        }
        if target == MouseTarget::ClientWindow && self.state.client(handle).is_some() {
            self.state.focus(Some(handle));
            self.state.restack(self.state.selected_monitor);
            handled = true;
        }
        let matching: Vec<Command> = self
            .state
            .mousebinds
            .iter()
            .filter(|bind| {
                bind.target == target && bind.button == button && bind.modifier == modifiers
            })
            .map(|bind| substitute_clicked_tag(&bind.command, clicked_tag))
            .collect();
        for command in &matching {
            handled = self.command_handler(command) || handled;
        }
        handled
    }
}

/// Bindings on the tag strip may carry an empty mask, which stands for
/// whichever tag cell the press landed on.
fn substitute_clicked_tag(command: &Command, clicked: Option<usize>) -> Command {
    let Some(index) = clicked else {
        return command.clone();
    };
    let clicked_mask = TagMask::single(index);
    match command {
        Command::View(mask) if mask.is_empty() => Command::View(clicked_mask),
        Command::ToggleView(mask) if mask.is_empty() => Command::ToggleView(clicked_mask),
        Command::Tag(mask) if mask.is_empty() => Command::Tag(clicked_mask),
        Command::ToggleTag(mask) if mask.is_empty() => Command::ToggleTag(clicked_mask),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Mousebind, TestConfig};
    use crate::display_servers::MockDisplayServer;
    use crate::models::Client;

    fn manager_with_binds(binds: Vec<Mousebind>) -> Manager<TestConfig, MockDisplayServer> {
        let mut manager = Manager::new_test_with_config(TestConfig {
            tags: vec!["1".to_string(), "2".to_string(), "3".to_string()],
            mousebinds: binds,
            ..TestConfig::default()
        });
        manager
            .state
            .screens_changed_handler(vec![Rect::new(0, 0, 1000, 800)], (1000, 800), 20);
        manager
    }

    fn created(
        manager: &mut Manager<TestConfig, MockDisplayServer>,
        id: i32,
    ) -> WindowHandle {
        let handle = WindowHandle::MockHandle(id);
        let client = Client::new(handle, Rect::new(0, 0, 300, 200), 1);
        manager.window_created_handler(client);
        handle
    }

    #[test]
    fn pressing_a_client_focuses_it() {
        let mut manager = manager_with_binds(vec![]);
        let first = created(&mut manager, 1);
        let second = created(&mut manager, 2);
        assert_eq!(manager.state.monitors[0].selected, Some(second));
        let handled = manager.mouse_combo_handler(
            ModMask::empty(),
            Button::Button1,
            first,
            MouseTarget::ClientWindow,
            None,
            150,
            100,
        );
        assert!(handled);
        assert_eq!(manager.state.monitors[0].selected, Some(first));
    }

    #[test]
    fn tag_cell_bindings_with_an_empty_mask_take_the_clicked_tag() {
        let bind = Mousebind {
            command: Command::View(TagMask::new(0)),
            target: MouseTarget::TagCell,
            modifier: ModMask::empty(),
            button: Button::Button1,
        };
        let mut manager = manager_with_binds(vec![bind]);
        manager.drain_actions();
        let bar = manager.state.monitors[0].bar_handle.unwrap();
        let handled = manager.mouse_combo_handler(
            ModMask::empty(),
            Button::Button1,
            bar,
            MouseTarget::TagCell,
            Some(2),
            40,
            10,
        );
        assert!(handled);
        assert_eq!(manager.state.monitors[0].view_tagset(), TagMask::single(2));
    }

    #[test]
    fn bindings_require_the_exact_modifier_and_region() {
        let bind = Mousebind {
            command: Command::View(TagMask::new(0)),
            target: MouseTarget::TagCell,
            modifier: ModMask::Super,
            button: Button::Button1,
        };
        let mut manager = manager_with_binds(vec![bind]);
        manager.drain_actions();
        let bar = manager.state.monitors[0].bar_handle.unwrap();
        let before = manager.state.monitors[0].view_tagset();
        let handled = manager.mouse_combo_handler(
            ModMask::empty(),
            Button::Button1,
            bar,
            MouseTarget::TagCell,
            Some(2),
            40,
            10,
        );
        assert!(!handled);
        assert_eq!(manager.state.monitors[0].view_tagset(), before);
    }

    #[test]
    fn root_presses_switch_the_selected_monitor() {
        let mut manager = manager_with_binds(vec![]);
        manager.state.screens_changed_handler(
            vec![Rect::new(0, 0, 1000, 800), Rect::new(1000, 0, 1000, 800)],
            (2000, 800),
            20,
        );
        assert_eq!(manager.state.selected_monitor, 0);
        let handled = manager.mouse_combo_handler(
            ModMask::empty(),
            Button::Button1,
            WindowHandle::MockHandle(999),
            MouseTarget::RootWindow,
            None,
            1500,
            400,
        );
        assert!(handled);
        assert_eq!(manager.state.selected_monitor, 1);
    }
}
