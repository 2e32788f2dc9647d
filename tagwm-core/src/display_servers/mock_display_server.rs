use std::collections::VecDeque;

use super::{Config, DisplayAction, DisplayEvent, DisplayServer, DragCursor, WindowHandle};

/// Test double that records every action and replays scripted events.
#[derive(Default)]
pub struct MockDisplayServer {
    pub events: VecDeque<DisplayEvent>,
    pub drag_events: VecDeque<DisplayEvent>,
    pub actions: Vec<DisplayAction>,
    pub pointer: (i32, i32),
    pub refuse_grabs: bool,
    bars_created: i32,
}

impl DisplayServer for MockDisplayServer {
    fn new(_: &impl Config) -> Self {
        Self::default()
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent> {
        self.events.drain(..).collect()
    }

    fn execute_action(&mut self, act: DisplayAction) -> Option<DisplayEvent> {
        let follow_up = match &act {
            DisplayAction::CreateBar { monitor, .. } => {
                let handle = WindowHandle::MockHandle(1000 + self.bars_created);
                self.bars_created += 1;
                Some(DisplayEvent::BarCreated(*monitor, handle))
            }
            _ => None,
        };
        self.actions.push(act);
        follow_up
    }

    fn flush(&self) {}

    fn grab_pointer(&mut self, _cursor: DragCursor) -> bool {
        !self.refuse_grabs
    }

    fn ungrab_pointer(&mut self) {}

    fn next_drag_event(&mut self) -> Option<DisplayEvent> {
        self.drag_events.pop_front()
    }

    fn warp_pointer_to(&mut self, _handle: WindowHandle, x: i32, y: i32) {
        self.pointer = (x, y);
    }

    fn get_pointer_position(&self) -> Option<(i32, i32)> {
        Some(self.pointer)
    }

    fn flush_enter_events(&mut self) {}
}
