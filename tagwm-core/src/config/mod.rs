mod keybind;
mod rule;

use crate::layouts::Layout;
use serde::{Deserialize, Serialize};

pub use keybind::{Keybind, Mousebind, MouseTarget};
pub use rule::WindowRule;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarPosition {
    Top,
    Bottom,
}

/// Foreground, background, and border color for one scheme, as color
/// names or `#rrggbb` strings the backend resolves at startup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SchemeColors {
    pub foreground: String,
    pub background: String,
    pub border: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    pub normal: SchemeColors,
    pub selected: SchemeColors,
}

/// The static configuration the core consumes, read once at startup.
/// The binary crate implements this for its TOML-backed settings.
pub trait Config {
    /// Tag names in display order, at most 31 of them.
    fn tag_names(&self) -> Vec<String>;

    fn rules(&self) -> Vec<WindowRule>;

    fn keybinds(&self) -> Vec<Keybind>;

    fn mousebinds(&self) -> Vec<Mousebind>;

    fn colors(&self) -> ColorScheme;

    fn border_width(&self) -> i32;

    /// Pixel distance at which interactive moves snap to window-area
    /// edges and pull tiled clients out into floating.
    fn snap_distance(&self) -> i32;

    fn master_factor(&self) -> f32;

    fn master_count(&self) -> u32;

    fn show_bar(&self) -> bool;

    fn bar_position(&self) -> BarPosition;

    fn font(&self) -> String;

    /// Honor size hints even for tiled clients.
    fn respect_resize_hints(&self) -> bool;

    /// The two layout slots a fresh monitor starts with.
    fn layouts(&self) -> [Layout; 2];
}

#[cfg(test)]
#[allow(clippy::module_name_repetitions)]
#[derive(Default)]
pub struct TestConfig {
    pub tags: Vec<String>,
    pub rules: Vec<WindowRule>,
    pub keybinds: Vec<Keybind>,
    pub mousebinds: Vec<Mousebind>,
}

#[cfg(test)]
impl TestConfig {
    pub fn with_tag_count(count: usize) -> Self {
        Self {
            tags: (1..=count).map(|n| n.to_string()).collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Config for TestConfig {
    fn tag_names(&self) -> Vec<String> {
        self.tags.clone()
    }
    fn rules(&self) -> Vec<WindowRule> {
        self.rules.clone()
    }
    fn keybinds(&self) -> Vec<Keybind> {
        self.keybinds.clone()
    }
    fn mousebinds(&self) -> Vec<Mousebind> {
        self.mousebinds.clone()
    }
    fn colors(&self) -> ColorScheme {
        ColorScheme {
            normal: SchemeColors {
                foreground: "#bbbbbb".into(),
                background: "#222222".into(),
                border: "#444444".into(),
            },
            selected: SchemeColors {
                foreground: "#eeeeee".into(),
                background: "#005577".into(),
                border: "#005577".into(),
            },
        }
    }
    fn border_width(&self) -> i32 {
        1
    }
    fn snap_distance(&self) -> i32 {
        32
    }
    fn master_factor(&self) -> f32 {
        0.55
    }
    fn master_count(&self) -> u32 {
        1
    }
    fn show_bar(&self) -> bool {
        true
    }
    fn bar_position(&self) -> BarPosition {
        BarPosition::Top
    }
    fn font(&self) -> String {
        "fixed".into()
    }
    fn respect_resize_hints(&self) -> bool {
        false
    }
    fn layouts(&self) -> [Layout; 2] {
        [Layout::Tiled, Layout::Floating]
    }
}
