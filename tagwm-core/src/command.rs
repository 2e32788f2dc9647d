use crate::layouts::Layout;
use crate::models::TagMask;
use serde::{Deserialize, Serialize};

/// User actions, produced by key and mouse bindings and dispatched by
/// the command handler. Tag arguments are masks over the configured tag
/// space; in mouse bindings an empty mask stands for the clicked tag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Command {
    View(TagMask),
    ToggleView(TagMask),
    Tag(TagMask),
    ToggleTag(TagMask),
    /// Cycle focus through visible clients; positive is forward.
    FocusStack(i32),
    FocusMonitor(i32),
    SendToMonitor(i32),
    IncMasterCount(i32),
    /// Below 1.0 the value is a delta; 1.0 and above means value − 1
    /// taken as the absolute fraction.
    SetMasterFactor(f32),
    /// `None` swaps back to the alternate layout slot.
    SetLayout(Option<Layout>),
    Zoom,
    KillClient,
    ToggleBar,
    ToggleFloating,
    MoveWithMouse,
    ResizeWithMouse,
    Spawn(Vec<String>),
    Quit,
}
