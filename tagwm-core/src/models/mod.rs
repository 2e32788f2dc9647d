mod bar;
mod client;
mod geometry;
mod manager;
mod mode;
mod monitor;
mod tags;

pub use bar::{BarSnapshot, BarTitle, TagCell};
pub use client::{Client, ClientChange, NormalHints, SizeHints, WindowHandle, WmStateAction};
pub use geometry::Rect;
pub use manager::Manager;
pub use mode::Mode;
pub use monitor::Monitor;
pub use tags::{TagMask, MAX_TAGS};
