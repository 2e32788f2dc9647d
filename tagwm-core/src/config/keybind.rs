use crate::command::Command;
use crate::utils::modmask_lookup::{Button, ModMask};
use serde::{Deserialize, Serialize};

/// A key chord bound to a command. The key is an X keysym name
/// ("Return", "space", "j"); the backend resolves it when grabbing.
#[derive(Debug, Clone, PartialEq)]
pub struct Keybind {
    pub command: Command,
    pub modifier: ModMask,
    pub key: String,
}

/// Region of the screen a mouse binding applies to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseTarget {
    TagCell,
    LayoutSymbol,
    WindowTitle,
    StatusText,
    ClientWindow,
    RootWindow,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mousebind {
    pub command: Command,
    pub target: MouseTarget,
    pub modifier: ModMask,
    pub button: Button,
}
