use crate::state::State;

/// Master-and-stack split. The first `master_count` clients share the
/// left region at `master_factor` of the usable width, everyone else
/// shares the column on the right. Heights divide the remaining room
/// at every step, so integer rounding collects in the last client of
/// each region instead of leaving a gap.
pub fn update(state: &mut State, monitor: usize) {
    let handles = state.tiled_handles(monitor);
    let n = handles.len();
    if n == 0 {
        return;
    }

    let (area, master_factor, master_count) = {
        let m = &state.monitors[monitor];
        (m.window_area, m.master_factor, m.master_count as usize)
    };

    let master_width = if n > master_count {
        if master_count > 0 {
            (area.w as f32 * master_factor) as i32
        } else {
            0
        }
    } else {
        area.w
    };

    let mut master_y = 0;
    let mut stack_y = 0;
    for (i, &handle) in handles.iter().enumerate() {
        let Some(border) = state.client(handle).map(|c| c.border_width) else {
            continue;
        };
        if i < master_count {
            let rows = (n.min(master_count) - i) as i32;
            let height = (area.h - master_y) / rows;
            state.resize(
                handle,
                area.x,
                area.y + master_y,
                master_width - 2 * border,
                height - 2 * border,
                false,
            );
            let used = state.client(handle).map_or(0, |c| c.total_height());
            if master_y + used < area.h {
                master_y += used;
            }
        } else {
            let rows = (n - i) as i32;
            let height = (area.h - stack_y) / rows;
            state.resize(
                handle,
                area.x + master_width,
                area.y + stack_y,
                area.w - master_width - 2 * border,
                height - 2 * border,
                false,
            );
            let used = state.client(handle).map_or(0, |c| c.total_height());
            if stack_y + used < area.h {
                stack_y += used;
            }
        }
    }
}
