pub mod command_handler;
pub mod display_event_handler;
mod focus_handler;
mod mouse_combo_handler;
mod screen_change_handler;
mod window_handler;
mod window_move_handler;
mod window_resize_handler;

use super::command::Command;
use super::config::Config;
use super::display_action::DisplayAction;
use super::display_servers::DisplayServer;
use super::models::{
    Client, ClientChange, Manager, Mode, Monitor, Rect, TagMask, WindowHandle, WmStateAction,
};
use super::state::State;
use super::DisplayEvent;
