#![allow(clippy::wildcard_imports)]

use super::*;
use crate::layouts::Layout;
use crate::utils::child_process;

impl<C: Config, SERVER: DisplayServer> Manager<C, SERVER> {
    /// Run one user command and report whether it changed anything
    /// worth flushing.
    pub fn command_handler(&mut self, command: &Command) -> bool {
        process_internal(self, command).unwrap_or(false)
    }
}

fn process_internal<C: Config, SERVER: DisplayServer>(
    manager: &mut Manager<C, SERVER>,
    command: &Command,
) -> Option<bool> {
    let state = &mut manager.state;
    match command {
        Command::View(tags) => view(state, *tags),
        Command::ToggleView(tags) => toggle_view(state, *tags),
        Command::Tag(tags) => tag(state, *tags),
        Command::ToggleTag(tags) => toggle_tag(state, *tags),

        Command::FocusStack(delta) => focus_stack(state, *delta),
        Command::FocusMonitor(direction) => focus_monitor(state, *direction),
        Command::SendToMonitor(direction) => send_selected_to_monitor(state, *direction),

        Command::IncMasterCount(delta) => inc_master_count(state, *delta),
        Command::SetMasterFactor(factor) => set_master_factor(state, *factor),
        Command::SetLayout(layout) => set_layout(state, *layout),
        Command::Zoom => zoom(state),

        Command::ToggleBar => toggle_bar(state),
        Command::ToggleFloating => toggle_floating(state),
        Command::KillClient => kill_client(state),

        Command::MoveWithMouse => Some(manager.move_with_mouse()),
        Command::ResizeWithMouse => Some(manager.resize_with_mouse()),

        Command::Spawn(args) => spawn(manager, args),
        Command::Quit => quit(state),
    }
}

/// Switch the monitor to a new set of viewed tags. Viewing what is
/// already shown does nothing; an empty mask swaps back to the
/// previously viewed tags.
fn view(state: &mut State, tags: TagMask) -> Option<bool> {
    let monitor = state.selected_monitor;
    let clamped = tags.clamp_to(state.tag_names.len());
    if clamped == state.monitors[monitor].view_tagset() {
        return Some(false);
    }
    state.monitors[monitor].selected_tagset ^= 1;
    if !clamped.is_empty() {
        let slot = state.monitors[monitor].selected_tagset;
        state.monitors[monitor].tagset[slot] = clamped;
    }
    state.focus(None);
    state.arrange(Some(monitor));
    Some(true)
}

fn toggle_view(state: &mut State, tags: TagMask) -> Option<bool> {
    let monitor = state.selected_monitor;
    let toggled = state.monitors[monitor].view_tagset() ^ tags.clamp_to(state.tag_names.len());
    // the view may never become empty
    if toggled.is_empty() {
        return Some(false);
    }
    let slot = state.monitors[monitor].selected_tagset;
    state.monitors[monitor].tagset[slot] = toggled;
    state.focus(None);
    state.arrange(Some(monitor));
    Some(true)
}

fn tag(state: &mut State, tags: TagMask) -> Option<bool> {
    let monitor = state.selected_monitor;
    let handle = state.monitors[monitor].selected?;
    let clamped = tags.clamp_to(state.tag_names.len());
    if clamped.is_empty() {
        return Some(false);
    }
    state.client_mut(handle)?.tags = clamped;
    state.focus(None);
    state.arrange(Some(monitor));
    Some(true)
}

fn toggle_tag(state: &mut State, tags: TagMask) -> Option<bool> {
    let monitor = state.selected_monitor;
    let handle = state.monitors[monitor].selected?;
    let toggled = state.client(handle)?.tags ^ tags.clamp_to(state.tag_names.len());
    // a client may never lose its last tag
    if toggled.is_empty() {
        return Some(false);
    }
    state.client_mut(handle)?.tags = toggled;
    state.focus(None);
    state.arrange(Some(monitor));
    Some(true)
}

/// Cycle focus through the monitor's visible clients in tiling order,
/// floating ones included.
fn focus_stack(state: &mut State, delta: i32) -> Option<bool> {
    let monitor = state.selected_monitor;
    let selected = state.monitors[monitor].selected?;
    if state.client(selected)?.is_fullscreen {
        return Some(false);
    }
    let view = state.monitors[monitor].view_tagset();
    let visible: Vec<WindowHandle> = state.monitors[monitor]
        .tiling
        .iter()
        .copied()
        .filter(|&h| state.client(h).map_or(false, |c| c.visible_on(view)))
        .collect();
    let position = visible.iter().position(|&h| h == selected)?;
    let len = visible.len();
    let next = if delta > 0 {
        visible[(position + 1) % len]
    } else {
        visible[(position + len - 1) % len]
    };
    state.focus(Some(next));
    state.restack(monitor);
    Some(true)
}

fn direction_to_monitor(state: &State, direction: i32) -> usize {
    let count = state.monitors.len();
    if direction > 0 {
        (state.selected_monitor + 1) % count
    } else {
        (state.selected_monitor + count - 1) % count
    }
}

fn focus_monitor(state: &mut State, direction: i32) -> Option<bool> {
    if state.monitors.len() < 2 {
        return Some(false);
    }
    let target = direction_to_monitor(state, direction);
    if target == state.selected_monitor {
        return Some(false);
    }
    if let Some(selected) = state.monitors[state.selected_monitor].selected {
        state.unfocus(selected, false);
    }
    state.selected_monitor = target;
    state.focus(None);
    Some(true)
}

fn send_selected_to_monitor(state: &mut State, direction: i32) -> Option<bool> {
    if state.monitors.len() < 2 {
        return Some(false);
    }
    let handle = state.monitors[state.selected_monitor].selected?;
    let target = direction_to_monitor(state, direction);
    state.send_to_monitor(handle, target);
    Some(true)
}

fn inc_master_count(state: &mut State, delta: i32) -> Option<bool> {
    let monitor = state.selected_monitor;
    let count = state.monitors[monitor].master_count as i32 + delta;
    state.monitors[monitor].master_count = count.max(0) as u32;
    state.arrange(Some(monitor));
    Some(true)
}

/// Adjust the master area fraction. Values below 1.0 are deltas, the
/// rest are absolute minus one; results outside 0.05..=0.95 are
/// ignored.
fn set_master_factor(state: &mut State, factor: f32) -> Option<bool> {
    let monitor = state.selected_monitor;
    if !state.monitors[monitor].layout().arranges() {
        return Some(false);
    }
    let value = if factor < 1.0 {
        factor + state.monitors[monitor].master_factor
    } else {
        factor - 1.0
    };
    if !(0.05..=0.95).contains(&value) {
        return Some(false);
    }
    state.monitors[monitor].master_factor = value;
    state.arrange(Some(monitor));
    Some(true)
}

/// Activate a layout. The slot toggle always happens first, so
/// re-invoking the active layout switches back to the alternate slot
/// instead of being a no-op.
fn set_layout(state: &mut State, layout: Option<Layout>) -> Option<bool> {
    let monitor = state.selected_monitor;
    let previous = state.monitors[monitor].layout();
    state.monitors[monitor].selected_layout ^= 1;
    if let Some(layout) = layout {
        if layout != previous {
            let slot = state.monitors[monitor].selected_layout;
            state.monitors[monitor].layouts[slot] = layout;
        }
    }
    let symbol = state.monitors[monitor].layout().symbol().to_owned();
    state.monitors[monitor].layout_symbol = symbol;
    if state.monitors[monitor].selected.is_some() {
        state.arrange(Some(monitor));
    } else {
        state.update_bar(monitor);
    }
    Some(true)
}

/// Promote the selected client to the master slot; promoting the
/// master itself swaps it with the next tiled client.
fn zoom(state: &mut State) -> Option<bool> {
    let monitor = state.selected_monitor;
    if !state.monitors[monitor].layout().arranges() {
        return Some(false);
    }
    let selected = state.monitors[monitor].selected?;
    if state.client(selected)?.is_floating {
        return Some(false);
    }
    let tiled = state.tiled_handles(monitor);
    let mut target = selected;
    if tiled.first() == Some(&selected) {
        target = *tiled.get(1)?;
    }
    state.detach(target);
    state.attach(target);
    state.focus(Some(target));
    state.arrange(Some(monitor));
    Some(true)
}

fn toggle_bar(state: &mut State) -> Option<bool> {
    let monitor = state.selected_monitor;
    state.monitors[monitor].show_bar = !state.monitors[monitor].show_bar;
    let bar_height = state.bar_height;
    state.monitors[monitor].update_bar_position(bar_height);
    if let Some(bar) = state.monitors[monitor].bar_handle {
        let geometry = state.monitors[monitor].bar_rect(bar_height);
        state
            .actions
            .push_back(DisplayAction::MoveResizeBar { handle: bar, geometry });
    }
    state.arrange(Some(monitor));
    Some(true)
}

/// Drop the selected client out of the layout, or put it back in.
/// Fixed-size clients always stay floating.
pub(crate) fn toggle_floating(state: &mut State) -> Option<bool> {
    let monitor = state.selected_monitor;
    let handle = state.monitors[monitor].selected?;
    let client = state.client(handle)?;
    if client.is_fullscreen {
        return Some(false);
    }
    let floating = !client.is_floating || client.is_fixed;
    let geometry = client.geometry;
    state.client_mut(handle)?.is_floating = floating;
    if floating {
        state.resize(handle, geometry.x, geometry.y, geometry.w, geometry.h, false);
    }
    state.arrange(Some(monitor));
    Some(true)
}

fn kill_client(state: &mut State) -> Option<bool> {
    let handle = state.monitors[state.selected_monitor].selected?;
    state.actions.push_back(DisplayAction::KillWindow(handle));
    Some(false)
}

fn spawn<C: Config, SERVER: DisplayServer>(
    manager: &mut Manager<C, SERVER>,
    args: &[String],
) -> Option<bool> {
    if let Err(err) = child_process::spawn_program(args, &mut manager.children) {
        tracing::error!("failed to spawn {args:?}: {err}");
    }
    Some(false)
}

fn quit(state: &mut State) -> Option<bool> {
    state.running = false;
    Some(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TestConfig;
    use crate::display_servers::MockDisplayServer;
    use crate::models::{Client, NormalHints, Rect};

    fn manager() -> Manager<TestConfig, MockDisplayServer> {
        let mut manager = Manager::new_test(
            (1..=9).map(|n| n.to_string()).collect(),
        );
        manager
            .state
            .screens_changed_handler(vec![Rect::new(0, 0, 1000, 800)], (1000, 800), 20);
        manager
    }

    fn manager_with_two_monitors() -> Manager<TestConfig, MockDisplayServer> {
        let mut manager = Manager::new_test(
            (1..=9).map(|n| n.to_string()).collect(),
        );
        manager.state.screens_changed_handler(
            vec![Rect::new(0, 0, 1000, 800), Rect::new(1000, 0, 1000, 800)],
            (2000, 800),
            20,
        );
        manager
    }

    fn created(
        manager: &mut Manager<TestConfig, MockDisplayServer>,
        id: i32,
    ) -> WindowHandle {
        let handle = WindowHandle::MockHandle(id);
        let client = Client::new(handle, Rect::new(5, 25, 400, 300), 1);
        manager.window_created_handler(client);
        handle
    }

    #[test]
    fn view_switches_and_an_empty_mask_returns_to_the_previous_view() {
        let mut manager = manager();
        manager.command_handler(&Command::View(TagMask::single(2)));
        assert_eq!(
            manager.state.monitors[0].view_tagset(),
            TagMask::single(2)
        );
        manager.command_handler(&Command::View(TagMask::new(0)));
        assert_eq!(
            manager.state.monitors[0].view_tagset(),
            TagMask::single(0)
        );
    }

    #[test]
    fn viewing_the_current_tags_changes_nothing() {
        let mut manager = manager();
        let slot_before = manager.state.monitors[0].selected_tagset;
        assert!(!manager.command_handler(&Command::View(TagMask::single(0))));
        assert_eq!(manager.state.monitors[0].selected_tagset, slot_before);
    }

    #[test]
    fn toggle_view_refuses_to_empty_the_view() {
        let mut manager = manager();
        assert!(!manager.command_handler(&Command::ToggleView(TagMask::single(0))));
        assert_eq!(
            manager.state.monitors[0].view_tagset(),
            TagMask::single(0)
        );
        manager.command_handler(&Command::ToggleView(TagMask::single(4)));
        assert_eq!(
            manager.state.monitors[0].view_tagset(),
            TagMask::single(0) | TagMask::single(4)
        );
    }

    #[test]
    fn tag_retags_the_selected_client_and_ignores_empty_masks() {
        let mut manager = manager();
        let handle = created(&mut manager, 1);
        assert!(!manager.command_handler(&Command::Tag(TagMask::new(0))));
        manager.command_handler(&Command::Tag(TagMask::single(3)));
        assert_eq!(
            manager.state.client(handle).unwrap().tags,
            TagMask::single(3)
        );
        // the client left the view, so focus moved on
        assert_eq!(manager.state.monitors[0].selected, None);
    }

    #[test]
    fn toggle_tag_keeps_the_last_tag() {
        let mut manager = manager();
        let handle = created(&mut manager, 1);
        assert!(!manager.command_handler(&Command::ToggleTag(TagMask::single(0))));
        assert_eq!(
            manager.state.client(handle).unwrap().tags,
            TagMask::single(0)
        );
        manager.command_handler(&Command::ToggleTag(TagMask::single(1)));
        assert_eq!(
            manager.state.client(handle).unwrap().tags,
            TagMask::single(0) | TagMask::single(1)
        );
    }

    #[test]
    fn focus_stack_cycles_visible_clients_in_both_directions() {
        let mut manager = manager();
        let a = created(&mut manager, 1);
        let b = created(&mut manager, 2);
        let c = created(&mut manager, 3);
        // tiling order is [c, b, a] and c is selected
        assert_eq!(manager.state.monitors[0].selected, Some(c));
        manager.command_handler(&Command::FocusStack(1));
        assert_eq!(manager.state.monitors[0].selected, Some(b));
        manager.command_handler(&Command::FocusStack(-1));
        assert_eq!(manager.state.monitors[0].selected, Some(c));
        manager.command_handler(&Command::FocusStack(-1));
        assert_eq!(manager.state.monitors[0].selected, Some(a));
    }

    #[test]
    fn focus_stack_skips_clients_outside_the_view() {
        let mut manager = manager();
        let a = created(&mut manager, 1);
        let b = created(&mut manager, 2);
        let c = created(&mut manager, 3);
        if let Some(client) = manager.state.client_mut(b) {
            client.tags = TagMask::single(7);
        }
        manager.state.focus(Some(c));
        manager.command_handler(&Command::FocusStack(1));
        assert_eq!(manager.state.monitors[0].selected, Some(a));
    }

    #[test]
    fn zoom_swaps_the_master_with_the_next_tiled_client() {
        let mut manager = manager();
        let a = created(&mut manager, 1);
        let b = created(&mut manager, 2);
        assert_eq!(manager.state.monitors[0].tiling, vec![b, a]);
        manager.command_handler(&Command::Zoom);
        assert_eq!(manager.state.monitors[0].tiling, vec![a, b]);
        assert_eq!(manager.state.monitors[0].selected, Some(a));
    }

    #[test]
    fn zoom_promotes_a_non_master_client() {
        let mut manager = manager();
        let a = created(&mut manager, 1);
        let b = created(&mut manager, 2);
        manager.state.focus(Some(a));
        manager.command_handler(&Command::Zoom);
        assert_eq!(manager.state.monitors[0].tiling, vec![a, b]);
    }

    #[test]
    fn zoom_needs_an_arranging_layout() {
        let mut manager = manager();
        let a = created(&mut manager, 1);
        let _b = created(&mut manager, 2);
        manager.state.monitors[0].layouts = [Layout::Floating, Layout::Floating];
        manager.state.focus(Some(a));
        assert!(!manager.command_handler(&Command::Zoom));
    }

    #[test]
    fn master_factor_takes_deltas_and_absolutes_and_rejects_extremes() {
        let mut manager = manager();
        let _ = created(&mut manager, 1);
        manager.command_handler(&Command::SetMasterFactor(0.05));
        assert!((manager.state.monitors[0].master_factor - 0.60).abs() < 0.001);
        manager.command_handler(&Command::SetMasterFactor(1.75));
        assert!((manager.state.monitors[0].master_factor - 0.75).abs() < 0.001);
        assert!(!manager.command_handler(&Command::SetMasterFactor(0.9)));
        assert!((manager.state.monitors[0].master_factor - 0.75).abs() < 0.001);
    }

    #[test]
    fn master_count_never_goes_negative() {
        let mut manager = manager();
        manager.command_handler(&Command::IncMasterCount(-5));
        assert_eq!(manager.state.monitors[0].master_count, 0);
        manager.command_handler(&Command::IncMasterCount(2));
        assert_eq!(manager.state.monitors[0].master_count, 2);
    }

    #[test]
    fn reinvoking_the_active_layout_swaps_to_the_alternate_slot() {
        let mut manager = manager();
        manager.command_handler(&Command::SetLayout(Some(Layout::Monocle)));
        assert_eq!(manager.state.monitors[0].layout(), Layout::Monocle);
        manager.command_handler(&Command::SetLayout(Some(Layout::Monocle)));
        assert_eq!(manager.state.monitors[0].layout(), Layout::Tiled);
        manager.command_handler(&Command::SetLayout(None));
        assert_eq!(manager.state.monitors[0].layout(), Layout::Monocle);
    }

    #[test]
    fn toggle_floating_round_trips_but_fixed_clients_stay_floating() {
        let mut manager = manager();
        let plain = created(&mut manager, 1);
        manager.command_handler(&Command::ToggleFloating);
        assert!(manager.state.client(plain).unwrap().is_floating);
        manager.command_handler(&Command::ToggleFloating);
        assert!(!manager.state.client(plain).unwrap().is_floating);

        let handle = WindowHandle::MockHandle(2);
        let mut fixed = Client::new(handle, Rect::new(10, 30, 400, 400), 1);
        fixed.update_size_hints(Some(NormalHints {
            min: Some((400, 400)),
            max: Some((400, 400)),
            ..NormalHints::default()
        }));
        manager.window_created_handler(fixed);
        manager.command_handler(&Command::ToggleFloating);
        assert!(manager.state.client(handle).unwrap().is_floating);
    }

    #[test]
    fn toggle_bar_reclaims_and_returns_the_strip() {
        let mut manager = manager();
        let full = manager.state.monitors[0].geometry;
        manager.command_handler(&Command::ToggleBar);
        assert_eq!(manager.state.monitors[0].window_area, full);
        manager.command_handler(&Command::ToggleBar);
        assert_eq!(manager.state.monitors[0].window_area.h, full.h - 20);
    }

    #[test]
    fn kill_client_asks_the_server_to_close_the_selection() {
        let mut manager = manager();
        let handle = created(&mut manager, 1);
        manager.state.actions.clear();
        manager.command_handler(&Command::KillClient);
        assert!(manager
            .state
            .actions
            .iter()
            .any(|a| matches!(a, DisplayAction::KillWindow(h) if *h == handle)));
    }

    #[test]
    fn focus_monitor_cycles_and_needs_two_monitors() {
        let mut manager = manager();
        assert!(!manager.command_handler(&Command::FocusMonitor(1)));

        let mut manager = manager_with_two_monitors();
        manager.command_handler(&Command::FocusMonitor(1));
        assert_eq!(manager.state.selected_monitor, 1);
        manager.command_handler(&Command::FocusMonitor(1));
        assert_eq!(manager.state.selected_monitor, 0);
        manager.command_handler(&Command::FocusMonitor(-1));
        assert_eq!(manager.state.selected_monitor, 1);
    }

    #[test]
    fn send_to_monitor_moves_the_selection_next_door() {
        let mut manager = manager_with_two_monitors();
        let handle = created(&mut manager, 1);
        manager.command_handler(&Command::SendToMonitor(1));
        assert_eq!(manager.state.client(handle).unwrap().monitor, 1);
        assert!(manager.state.monitors[1].tiling.contains(&handle));
    }

    #[test]
    fn quit_stops_the_event_loop() {
        let mut manager = manager();
        assert!(manager.state.running);
        manager.command_handler(&Command::Quit);
        assert!(!manager.state.running);
    }
}
