use crate::config::BarPosition;
use crate::layouts::Layout;
use crate::models::{Rect, TagMask, WindowHandle};
use serde::{Deserialize, Serialize};

/// One physical or virtual display region. The monitor owns its two
/// client orderings: `tiling` drives layout math, `stacking` drives
/// focus history and z-order. A client attached here appears in both
/// sequences exactly once, or in neither.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Monitor {
    /// Position in the monitor list, recomputed on topology changes.
    pub num: usize,
    pub layout_symbol: String,
    pub master_factor: f32,
    pub master_count: u32,
    pub geometry: Rect,
    /// Usable area once the bar strip is subtracted.
    pub window_area: Rect,
    pub bar_y: i32,
    /// Index of the active tagset slot; the other slot remembers the
    /// previous view so a view of the same tags toggles back.
    pub selected_tagset: usize,
    pub selected_layout: usize,
    pub tagset: [TagMask; 2],
    pub show_bar: bool,
    pub top_bar: bool,
    pub layouts: [Layout; 2],
    /// Tiling order, head is the most recent attach.
    pub tiling: Vec<WindowHandle>,
    /// Stacking/focus order, head is the most recently focused.
    pub stacking: Vec<WindowHandle>,
    pub selected: Option<WindowHandle>,
    pub bar_handle: Option<WindowHandle>,
}

impl Monitor {
    pub fn new(
        num: usize,
        geometry: Rect,
        master_factor: f32,
        master_count: u32,
        show_bar: bool,
        bar_position: BarPosition,
        layouts: [Layout; 2],
    ) -> Self {
        Self {
            num,
            layout_symbol: layouts[0].symbol().to_owned(),
            master_factor,
            master_count,
            geometry,
            window_area: geometry,
            bar_y: 0,
            selected_tagset: 0,
            selected_layout: 0,
            tagset: [TagMask::single(0), TagMask::single(0)],
            show_bar,
            top_bar: bar_position == BarPosition::Top,
            layouts,
            tiling: Vec::new(),
            stacking: Vec::new(),
            selected: None,
            bar_handle: None,
        }
    }

    /// The tag view currently shown on this monitor.
    pub fn view_tagset(&self) -> TagMask {
        self.tagset[self.selected_tagset]
    }

    pub fn layout(&self) -> Layout {
        self.layouts[self.selected_layout]
    }

    pub fn attach(&mut self, handle: WindowHandle) {
        debug_assert!(!self.tiling.contains(&handle), "double attach");
        self.tiling.insert(0, handle);
    }

    pub fn detach(&mut self, handle: WindowHandle) {
        self.tiling.retain(|h| *h != handle);
    }

    pub fn attach_stack(&mut self, handle: WindowHandle) {
        debug_assert!(!self.stacking.contains(&handle), "double attach");
        self.stacking.insert(0, handle);
    }

    /// Removes from the stacking order only; selection advance lives in
    /// the state where client visibility is known.
    pub fn detach_stack(&mut self, handle: WindowHandle) {
        self.stacking.retain(|h| *h != handle);
    }

    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.tiling.contains(&handle)
    }

    /// Recompute the usable window area around the bar strip. A hidden
    /// bar is parked just off-screen and the full area is reclaimed.
    pub fn update_bar_position(&mut self, bar_height: i32) {
        self.window_area = self.geometry;
        if self.show_bar {
            self.window_area.h -= bar_height;
            if self.top_bar {
                self.bar_y = self.window_area.y;
                self.window_area.y += bar_height;
            } else {
                self.bar_y = self.window_area.y + self.window_area.h;
            }
        } else {
            self.bar_y = -bar_height;
        }
    }

    pub fn bar_rect(&self, bar_height: i32) -> Rect {
        Rect::new(self.geometry.x, self.bar_y, self.geometry.w, bar_height)
    }
}
