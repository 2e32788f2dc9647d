//! Bar layout shared by drawing and click decoding. The renderer walks
//! a [`BarSnapshot`] left to right: one cell per tag, the layout
//! symbol, the focused window's title, and the status text on the right
//! edge of the selected monitor. `click_target` walks the same widths
//! so a button press lands in the region the user sees.
use crate::config::MouseTarget;
use crate::models::{BarSnapshot, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Normal,
    Selected,
}

/// The drawing surface the renderer paints on. The backend implements
/// this over a pixmap and a core font; tests use a fixed-width mock.
pub trait Canvas {
    /// Height of the font in pixels, which also sets the horizontal
    /// padding unit.
    fn font_height(&self) -> i32;

    fn text_width(&self, text: &str) -> i32;

    /// Select the color pair for the following operations. `invert`
    /// swaps foreground and background, used for urgent tags.
    fn select_scheme(&mut self, scheme: Scheme, invert: bool);

    /// Paint the background over the rect, then the text vertically
    /// centered and clipped to it.
    fn draw_text(&mut self, rect: Rect, left_pad: i32, text: &str);

    /// Small indicator square in the foreground color, outlined or
    /// filled.
    fn draw_rect(&mut self, rect: Rect, filled: bool);

    /// Flood the rect with the background color.
    fn fill_background(&mut self, rect: Rect);
}

/// Render one bar onto the canvas. The caller picks the surface and
/// copies it to the bar window afterwards.
pub fn draw_bar(canvas: &mut impl Canvas, snap: &BarSnapshot, height: i32) {
    let lrpad = canvas.font_height();
    let boxs = canvas.font_height() / 9;
    let boxw = canvas.font_height() / 6 + 2;

    let mut status_w = 0;
    if snap.selected_monitor {
        if let Some(status) = &snap.status {
            status_w = canvas.text_width(status) + 2;
            canvas.select_scheme(Scheme::Normal, false);
            canvas.draw_text(Rect::new(snap.width - status_w, 0, status_w, height), 0, status);
        }
    }

    let mut x = 0;
    for cell in &snap.tags {
        let w = canvas.text_width(&cell.label) + lrpad;
        let scheme = if cell.viewed {
            Scheme::Selected
        } else {
            Scheme::Normal
        };
        canvas.select_scheme(scheme, cell.urgent);
        canvas.draw_text(Rect::new(x, 0, w, height), lrpad / 2, &cell.label);
        if cell.occupied {
            canvas.draw_rect(Rect::new(x + boxs, boxs, boxw, boxw), cell.focus_here);
        }
        x += w;
    }

    let w = canvas.text_width(&snap.layout_symbol) + lrpad;
    canvas.select_scheme(Scheme::Normal, false);
    canvas.draw_text(Rect::new(x, 0, w, height), lrpad / 2, &snap.layout_symbol);
    x += w;

    let remaining = snap.width - status_w - x;
    if remaining > height {
        match &snap.title {
            Some(title) => {
                let scheme = if snap.selected_monitor {
                    Scheme::Selected
                } else {
                    Scheme::Normal
                };
                canvas.select_scheme(scheme, false);
                canvas.draw_text(Rect::new(x, 0, remaining, height), lrpad / 2, &title.text);
                if title.floating {
                    canvas.draw_rect(Rect::new(x + boxs, boxs, boxw, boxw), title.fixed);
                }
            }
            None => {
                canvas.select_scheme(Scheme::Normal, false);
                canvas.fill_background(Rect::new(x, 0, remaining, height));
            }
        }
    }
}

/// Decode a press at bar-relative `x` into the region it landed in,
/// plus the tag index for presses on the tag strip.
pub fn click_target(
    canvas: &impl Canvas,
    snap: &BarSnapshot,
    x: i32,
) -> (MouseTarget, Option<usize>) {
    let lrpad = canvas.font_height();
    let mut edge = 0;
    for (index, cell) in snap.tags.iter().enumerate() {
        edge += canvas.text_width(&cell.label) + lrpad;
        if x < edge {
            return (MouseTarget::TagCell, Some(index));
        }
    }
    edge += canvas.text_width(&snap.layout_symbol) + lrpad;
    if x < edge {
        return (MouseTarget::LayoutSymbol, None);
    }
    if snap.selected_monitor {
        if let Some(status) = &snap.status {
            if x >= snap.width - (canvas.text_width(status) + 2) {
                return (MouseTarget::StatusText, None);
            }
        }
    }
    (MouseTarget::WindowTitle, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BarTitle, TagCell, WindowHandle};

    /// Ten pixels per character, ten-pixel font.
    #[derive(Default)]
    struct MockCanvas {
        ops: Vec<Op>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Scheme(Scheme, bool),
        Text(Rect, String),
        Marker(Rect, bool),
        Fill(Rect),
    }

    impl Canvas for MockCanvas {
        fn font_height(&self) -> i32 {
            10
        }
        fn text_width(&self, text: &str) -> i32 {
            10 * text.chars().count() as i32
        }
        fn select_scheme(&mut self, scheme: Scheme, invert: bool) {
            self.ops.push(Op::Scheme(scheme, invert));
        }
        fn draw_text(&mut self, rect: Rect, _left_pad: i32, text: &str) {
            self.ops.push(Op::Text(rect, text.to_string()));
        }
        fn draw_rect(&mut self, rect: Rect, filled: bool) {
            self.ops.push(Op::Marker(rect, filled));
        }
        fn fill_background(&mut self, rect: Rect) {
            self.ops.push(Op::Fill(rect));
        }
    }

    fn cell(label: &str) -> TagCell {
        TagCell {
            label: label.to_string(),
            viewed: false,
            occupied: false,
            urgent: false,
            focus_here: false,
        }
    }

    fn snapshot() -> BarSnapshot {
        BarSnapshot {
            bar: WindowHandle::MockHandle(1),
            width: 500,
            tags: vec![cell("1"), cell("2"), cell("3")],
            layout_symbol: "[]=".to_string(),
            title: None,
            status: None,
            selected_monitor: true,
        }
    }

    // Each tag cell is 10 (label) + 10 (pad) = 20 wide, so the strip
    // ends at 60 and the layout symbol (30 + 10) at 100.

    #[test]
    fn presses_on_the_tag_strip_carry_the_cell_index() {
        let canvas = MockCanvas::default();
        let snap = snapshot();
        assert_eq!(click_target(&canvas, &snap, 0), (MouseTarget::TagCell, Some(0)));
        assert_eq!(click_target(&canvas, &snap, 25), (MouseTarget::TagCell, Some(1)));
        assert_eq!(click_target(&canvas, &snap, 59), (MouseTarget::TagCell, Some(2)));
    }

    #[test]
    fn the_layout_symbol_sits_after_the_tag_strip() {
        let canvas = MockCanvas::default();
        let snap = snapshot();
        assert_eq!(click_target(&canvas, &snap, 60), (MouseTarget::LayoutSymbol, None));
        assert_eq!(click_target(&canvas, &snap, 99), (MouseTarget::LayoutSymbol, None));
        assert_eq!(click_target(&canvas, &snap, 100), (MouseTarget::WindowTitle, None));
    }

    #[test]
    fn the_status_region_exists_only_on_the_selected_monitor() {
        let canvas = MockCanvas::default();
        let mut snap = snapshot();
        snap.status = Some("load".to_string());
        // Status is 4 * 10 + 2 = 42 wide, so it starts at 458.
        assert_eq!(click_target(&canvas, &snap, 458), (MouseTarget::StatusText, None));
        assert_eq!(click_target(&canvas, &snap, 457), (MouseTarget::WindowTitle, None));
        snap.selected_monitor = false;
        assert_eq!(click_target(&canvas, &snap, 490), (MouseTarget::WindowTitle, None));
    }

    #[test]
    fn urgent_tags_are_drawn_inverted() {
        let mut canvas = MockCanvas::default();
        let mut snap = snapshot();
        snap.tags[1].urgent = true;
        snap.tags[1].viewed = true;
        draw_bar(&mut canvas, &snap, 12);
        assert!(canvas.ops.contains(&Op::Scheme(Scheme::Selected, true)));
        assert!(canvas
            .ops
            .contains(&Op::Text(Rect::new(20, 0, 20, 12), "2".to_string())));
    }

    #[test]
    fn occupied_tags_get_a_marker_filled_when_focus_is_there() {
        let mut canvas = MockCanvas::default();
        let mut snap = snapshot();
        snap.tags[0].occupied = true;
        snap.tags[0].focus_here = true;
        snap.tags[2].occupied = true;
        draw_bar(&mut canvas, &snap, 12);
        // boxs = 10 / 9 = 1, boxw = 10 / 6 + 2 = 3.
        assert!(canvas.ops.contains(&Op::Marker(Rect::new(1, 1, 3, 3), true)));
        assert!(canvas.ops.contains(&Op::Marker(Rect::new(41, 1, 3, 3), false)));
    }

    #[test]
    fn the_title_area_is_blanked_when_nothing_is_focused() {
        let mut canvas = MockCanvas::default();
        let snap = snapshot();
        draw_bar(&mut canvas, &snap, 12);
        assert!(canvas.ops.contains(&Op::Fill(Rect::new(100, 0, 400, 12))));
    }

    #[test]
    fn floating_titles_carry_a_marker() {
        let mut canvas = MockCanvas::default();
        let mut snap = snapshot();
        snap.title = Some(BarTitle {
            text: "xterm".to_string(),
            floating: true,
            fixed: false,
        });
        draw_bar(&mut canvas, &snap, 12);
        assert!(canvas
            .ops
            .contains(&Op::Text(Rect::new(100, 0, 400, 12), "xterm".to_string())));
        assert!(canvas.ops.contains(&Op::Marker(Rect::new(101, 1, 3, 3), false)));
    }

    #[test]
    fn status_text_is_right_aligned_on_the_selected_monitor_only() {
        let mut canvas = MockCanvas::default();
        let mut snap = snapshot();
        snap.status = Some("load".to_string());
        draw_bar(&mut canvas, &snap, 12);
        assert!(canvas
            .ops
            .contains(&Op::Text(Rect::new(458, 0, 42, 12), "load".to_string())));

        let mut canvas = MockCanvas::default();
        snap.selected_monitor = false;
        draw_bar(&mut canvas, &snap, 12);
        assert!(!canvas
            .ops
            .iter()
            .any(|op| matches!(op, Op::Text(_, text) if text == "load")));
    }
}
