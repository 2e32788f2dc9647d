use crate::state::State;

/// Every visible tiled client fills the whole usable area, stacked on
/// top of each other. The layout symbol is rewritten to show the live
/// count of visible clients, floating ones included.
pub fn update(state: &mut State, monitor: usize) {
    let count = state.visible_count(monitor);
    if count > 0 {
        state.monitors[monitor].layout_symbol = format!("[{count}]");
    }

    let area = state.monitors[monitor].window_area;
    for handle in state.tiled_handles(monitor) {
        let Some(border) = state.client(handle).map(|c| c.border_width) else {
            continue;
        };
        state.resize(
            handle,
            area.x,
            area.y,
            area.w - 2 * border,
            area.h - 2 * border,
            false,
        );
    }
}
