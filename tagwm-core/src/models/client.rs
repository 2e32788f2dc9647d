use crate::models::{Rect, TagMask};
use serde::{Deserialize, Serialize};

/// Titles are capped so a hostile client cannot grow the bar redraw
/// without bound.
const MAX_TITLE_LENGTH: usize = 255;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowHandle {
    MockHandle(i32),
    XlibHandle(u64),
}

/// WM_NORMAL_HINTS as decoded by the display server. A `None` field was
/// absent from the property; the fallback rules in
/// [`Client::update_size_hints`] turn this into usable constraints.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NormalHints {
    pub base: Option<(i32, i32)>,
    pub min: Option<(i32, i32)>,
    pub max: Option<(i32, i32)>,
    pub inc: Option<(i32, i32)>,
    /// Aspect bounds as ((min_x, min_y), (max_x, max_y)) ratios.
    pub aspect: Option<((i32, i32), (i32, i32))>,
}

/// Size constraints in the form the resize path consumes. Zero means
/// "unconstrained" on every field.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct SizeHints {
    pub base_w: i32,
    pub base_h: i32,
    pub inc_w: i32,
    pub inc_h: i32,
    pub max_w: i32,
    pub max_h: i32,
    pub min_w: i32,
    pub min_h: i32,
    pub min_aspect: f32,
    pub max_aspect: f32,
}

/// One managed top-level application window.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Client {
    pub handle: WindowHandle,
    pub name: String,
    pub class: String,
    pub instance: String,
    pub geometry: Rect,
    pub old_geometry: Rect,
    pub border_width: i32,
    pub old_border_width: i32,
    pub hints: SizeHints,
    pub tags: TagMask,
    /// Index of the owning monitor.
    pub monitor: usize,
    pub is_fixed: bool,
    pub is_floating: bool,
    /// Floating flag as it was before entering fullscreen.
    pub old_floating: bool,
    pub is_urgent: bool,
    pub never_focus: bool,
    pub is_fullscreen: bool,
    pub transient_for: Option<WindowHandle>,
}

impl Client {
    pub fn new(handle: WindowHandle, geometry: Rect, border_width: i32) -> Self {
        Self {
            handle,
            name: String::new(),
            class: String::new(),
            instance: String::new(),
            geometry,
            old_geometry: geometry,
            border_width,
            old_border_width: border_width,
            hints: SizeHints::default(),
            tags: TagMask::default(),
            monitor: 0,
            is_fixed: false,
            is_floating: false,
            old_floating: false,
            is_urgent: false,
            never_focus: false,
            is_fullscreen: false,
            transient_for: None,
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.chars().take(MAX_TITLE_LENGTH).collect();
    }

    pub fn visible_on(&self, view: TagMask) -> bool {
        self.tags.intersects(view)
    }

    /// Width including both borders, the footprint used for overlap and
    /// off-screen math.
    pub const fn total_width(&self) -> i32 {
        self.geometry.w + 2 * self.border_width
    }

    pub const fn total_height(&self) -> i32 {
        self.geometry.h + 2 * self.border_width
    }

    /// Decode a WM_NORMAL_HINTS report. Base size falls back to the
    /// minimum size and vice versa when only one of the two was given;
    /// a client whose minimum equals its maximum is fixed-size and can
    /// never be tiled.
    pub fn update_size_hints(&mut self, hints: Option<NormalHints>) {
        let hints = hints.unwrap_or_default();
        let (base_w, base_h) = hints.base.or(hints.min).unwrap_or((0, 0));
        let (min_w, min_h) = hints.min.or(hints.base).unwrap_or((0, 0));
        let (max_w, max_h) = hints.max.unwrap_or((0, 0));
        let (inc_w, inc_h) = hints.inc.unwrap_or((0, 0));
        let (min_aspect, max_aspect) = match hints.aspect {
            Some(((min_x, min_y), (max_x, max_y))) if min_x > 0 && max_y > 0 => {
                (min_y as f32 / min_x as f32, max_x as f32 / max_y as f32)
            }
            _ => (0.0, 0.0),
        };
        self.hints = SizeHints {
            base_w,
            base_h,
            inc_w,
            inc_h,
            max_w,
            max_h,
            min_w,
            min_h,
            min_aspect,
            max_aspect,
        };
        self.is_fixed = max_w != 0 && max_h != 0 && max_w == min_w && max_h == min_h;
    }
}

/// A fullscreen request carried by a client message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WmStateAction {
    Remove,
    Add,
    Toggle,
}

/// Property updates reported by the display server for one client.
/// Only the changed fields are populated.
#[derive(Debug, Clone)]
pub struct ClientChange {
    pub handle: WindowHandle,
    pub title: Option<String>,
    pub transient_for: Option<WindowHandle>,
    /// WM_NORMAL_HINTS changed; carries the freshly decoded value.
    pub hints: Option<NormalHints>,
    pub urgent: Option<bool>,
    pub never_focus: Option<bool>,
    pub fullscreen: Option<WmStateAction>,
    pub is_dialog: bool,
    /// Another client asked for this window's attention.
    pub attention: bool,
}

impl ClientChange {
    pub fn new(handle: WindowHandle) -> Self {
        Self {
            handle,
            title: None,
            transient_for: None,
            hints: None,
            urgent: None,
            never_focus: None,
            fullscreen: None,
            is_dialog: false,
            attention: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> Client {
        Client::new(WindowHandle::MockHandle(1), Rect::new(0, 0, 200, 100), 1)
    }

    #[test]
    fn equal_min_max_hints_mark_the_client_fixed() {
        let mut c = client();
        c.update_size_hints(Some(NormalHints {
            min: Some((400, 400)),
            max: Some((400, 400)),
            ..NormalHints::default()
        }));
        assert!(c.is_fixed);
    }

    #[test]
    fn base_size_falls_back_to_min_size() {
        let mut c = client();
        c.update_size_hints(Some(NormalHints {
            min: Some((80, 60)),
            ..NormalHints::default()
        }));
        assert_eq!((c.hints.base_w, c.hints.base_h), (80, 60));
        assert_eq!((c.hints.min_w, c.hints.min_h), (80, 60));
        assert!(!c.is_fixed);
    }

    #[test]
    fn min_size_falls_back_to_base_size() {
        let mut c = client();
        c.update_size_hints(Some(NormalHints {
            base: Some((10, 20)),
            ..NormalHints::default()
        }));
        assert_eq!((c.hints.min_w, c.hints.min_h), (10, 20));
    }

    #[test]
    fn absent_hints_leave_the_client_unconstrained() {
        let mut c = client();
        c.update_size_hints(None);
        assert_eq!(c.hints, SizeHints::default());
        assert!(!c.is_fixed);
    }

    #[test]
    fn aspect_ratios_are_stored_as_floats() {
        let mut c = client();
        c.update_size_hints(Some(NormalHints {
            aspect: Some(((1, 2), (3, 1))),
            ..NormalHints::default()
        }));
        assert!((c.hints.min_aspect - 2.0).abs() < f32::EPSILON);
        assert!((c.hints.max_aspect - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn titles_are_truncated() {
        let mut c = client();
        c.set_name(&"x".repeat(4096));
        assert_eq!(c.name.len(), 255);
    }
}
