use tagwm_core::config::{BarPosition, ColorScheme, MouseTarget, SchemeColors};
use tagwm_core::layouts::Layout;

use super::command::BaseCommand;
use super::keybind::{Keybind, Mousebind};
use super::Config;

fn bind(command: BaseCommand, value: &str, modifier: Vec<&str>, key: &str) -> Keybind {
    Keybind {
        command,
        value: value.to_owned(),
        modifier: Some(modifier.into()),
        key: key.to_owned(),
    }
}

fn mouse(
    command: BaseCommand,
    value: &str,
    modifier: Option<Vec<&str>>,
    button: &str,
    target: MouseTarget,
) -> Mousebind {
    Mousebind {
        command,
        value: value.to_owned(),
        modifier: modifier.map(Into::into),
        button: button.to_owned(),
        target,
    }
}

impl Default for Config {
    #[allow(clippy::too_many_lines)]
    fn default() -> Self {
        let mut keybind = vec![
            // Mod + p => launcher
            bind(BaseCommand::Execute, "dmenu_run", vec!["modkey"], "p"),
            // Mod + Shift + Return => terminal
            bind(
                BaseCommand::Execute,
                "xterm",
                vec!["modkey", "Shift"],
                "Return",
            ),
            bind(BaseCommand::ToggleBar, "", vec!["modkey"], "b"),
            bind(BaseCommand::FocusStack, "1", vec!["modkey"], "j"),
            bind(BaseCommand::FocusStack, "-1", vec!["modkey"], "k"),
            bind(BaseCommand::IncMasterCount, "1", vec!["modkey"], "i"),
            bind(BaseCommand::IncMasterCount, "-1", vec!["modkey"], "d"),
            bind(BaseCommand::SetMasterFactor, "-0.05", vec!["modkey"], "h"),
            bind(BaseCommand::SetMasterFactor, "0.05", vec!["modkey"], "l"),
            bind(BaseCommand::Zoom, "", vec!["modkey"], "Return"),
            // Mod + Tab => swap back to the previously viewed tags
            bind(BaseCommand::View, "", vec!["modkey"], "Tab"),
            bind(BaseCommand::KillClient, "", vec!["modkey", "Shift"], "c"),
            bind(BaseCommand::SetLayout, "Tiled", vec!["modkey"], "t"),
            bind(BaseCommand::SetLayout, "Floating", vec!["modkey"], "f"),
            bind(BaseCommand::SetLayout, "Monocle", vec!["modkey"], "m"),
            bind(BaseCommand::SetLayout, "", vec!["modkey"], "space"),
            bind(
                BaseCommand::ToggleFloating,
                "",
                vec!["modkey", "Shift"],
                "space",
            ),
            bind(BaseCommand::View, "0", vec!["modkey"], "0"),
            bind(BaseCommand::Tag, "0", vec!["modkey", "Shift"], "0"),
            bind(BaseCommand::FocusMonitor, "-1", vec!["modkey"], "comma"),
            bind(BaseCommand::FocusMonitor, "1", vec!["modkey"], "period"),
            bind(
                BaseCommand::SendToMonitor,
                "-1",
                vec!["modkey", "Shift"],
                "comma",
            ),
            bind(
                BaseCommand::SendToMonitor,
                "1",
                vec!["modkey", "Shift"],
                "period",
            ),
            bind(BaseCommand::Quit, "", vec!["modkey", "Shift"], "q"),
        ];
        // Mod [+ Control] [+ Shift] + 1..=9 => view/toggle/tag/toggle-tag
        for tag in 1..=9_usize {
            let value = tag.to_string();
            let key = tag.to_string();
            keybind.push(bind(BaseCommand::View, &value, vec!["modkey"], &key));
            keybind.push(bind(
                BaseCommand::ToggleView,
                &value,
                vec!["modkey", "Control"],
                &key,
            ));
            keybind.push(bind(
                BaseCommand::Tag,
                &value,
                vec!["modkey", "Shift"],
                &key,
            ));
            keybind.push(bind(
                BaseCommand::ToggleTag,
                &value,
                vec!["modkey", "Control", "Shift"],
                &key,
            ));
        }

        let mousebind = vec![
            mouse(
                BaseCommand::SetLayout,
                "",
                None,
                "Button1",
                MouseTarget::LayoutSymbol,
            ),
            mouse(
                BaseCommand::SetLayout,
                "Monocle",
                None,
                "Button3",
                MouseTarget::LayoutSymbol,
            ),
            mouse(
                BaseCommand::Zoom,
                "",
                None,
                "Button2",
                MouseTarget::WindowTitle,
            ),
            mouse(
                BaseCommand::Execute,
                "xterm",
                None,
                "Button2",
                MouseTarget::StatusText,
            ),
            mouse(
                BaseCommand::MoveWithMouse,
                "",
                Some(vec!["modkey"]),
                "Button1",
                MouseTarget::ClientWindow,
            ),
            mouse(
                BaseCommand::ToggleFloating,
                "",
                Some(vec!["modkey"]),
                "Button2",
                MouseTarget::ClientWindow,
            ),
            mouse(
                BaseCommand::ResizeWithMouse,
                "",
                Some(vec!["modkey"]),
                "Button3",
                MouseTarget::ClientWindow,
            ),
            mouse(
                BaseCommand::View,
                "",
                None,
                "Button1",
                MouseTarget::TagCell,
            ),
            mouse(
                BaseCommand::ToggleView,
                "",
                None,
                "Button3",
                MouseTarget::TagCell,
            ),
            mouse(
                BaseCommand::Tag,
                "",
                Some(vec!["modkey"]),
                "Button1",
                MouseTarget::TagCell,
            ),
            mouse(
                BaseCommand::ToggleTag,
                "",
                Some(vec!["modkey"]),
                "Button3",
                MouseTarget::TagCell,
            ),
        ];

        Self {
            modkey: "Mod4".to_owned(),
            tags: (1..=9).map(|n| n.to_string()).collect(),
            font: "fixed".to_owned(),
            border_width: 1,
            snap_distance: 32,
            master_factor: 0.55,
            master_count: 1,
            show_bar: true,
            bar_position: BarPosition::Top,
            respect_resize_hints: false,
            layouts: [Layout::Tiled, Layout::Floating],
            colors: ColorScheme {
                normal: SchemeColors {
                    foreground: "#bbbbbb".to_owned(),
                    background: "#222222".to_owned(),
                    border: "#444444".to_owned(),
                },
                selected: SchemeColors {
                    foreground: "#eeeeee".to_owned(),
                    background: "#005577".to_owned(),
                    border: "#005577".to_owned(),
                },
            },
            window_rules: Vec::new(),
            keybind,
            mousebind,
        }
    }
}
