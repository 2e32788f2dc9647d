use serde::{Deserialize, Serialize};

pub mod monocle;
pub mod tiled;

/// The fixed catalog of arrangement strategies. Every monitor holds two
/// layout slots and toggles between them when the active layout is
/// selected again.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Tiled,
    Monocle,
    Floating,
}

impl Layout {
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Tiled => "[]=",
            Self::Monocle => "[M]",
            Self::Floating => "><>",
        }
    }

    /// Whether this layout recomputes geometry for visible tiled
    /// clients. Floating leaves every client where move/resize put it.
    #[must_use]
    pub const fn arranges(&self) -> bool {
        !matches!(self, Self::Floating)
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::Tiled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floating_is_the_only_layout_without_an_arranger() {
        assert!(Layout::Tiled.arranges());
        assert!(Layout::Monocle.arranges());
        assert!(!Layout::Floating.arranges());
    }

    #[test]
    fn symbols() {
        assert_eq!(Layout::Tiled.symbol(), "[]=");
        assert_eq!(Layout::Monocle.symbol(), "[M]");
        assert_eq!(Layout::Floating.symbol(), "><>");
    }
}
