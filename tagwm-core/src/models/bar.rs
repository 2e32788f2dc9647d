use crate::models::WindowHandle;
use serde::{Deserialize, Serialize};

/// Everything the renderer needs to draw one monitor's bar, captured
/// from the state at redraw time so drawing needs no model access.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BarSnapshot {
    pub bar: WindowHandle,
    pub width: i32,
    pub tags: Vec<TagCell>,
    pub layout_symbol: String,
    pub title: Option<BarTitle>,
    /// Root-window status text, shown on the selected monitor only.
    pub status: Option<String>,
    pub selected_monitor: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TagCell {
    pub label: String,
    pub viewed: bool,
    pub occupied: bool,
    pub urgent: bool,
    /// The focused client carries this tag; drawn as a filled marker.
    pub focus_here: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BarTitle {
    pub text: String,
    pub floating: bool,
    /// Fixed-size clients get a filled marker, others an outline.
    pub fixed: bool,
}
