//! Bindings as they appear in the configuration file, and their
//! conversion into the core's resolved forms. The literal string
//! `"modkey"` in a modifier list stands for the configured mod key.
use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tagwm_core::config::MouseTarget;
use tagwm_core::utils::modmask_lookup::{into_modmask, Button, ModMask};
use tagwm_core::utils::xkeysym_lookup::into_keysym;

use super::command::BaseCommand;

/// One or many modifier names; the file accepts both
/// `modifier = "Mod4"` and `modifier = ["Mod4", "Shift"]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Modifier {
    Single(String),
    List(Vec<String>),
}

impl Modifier {
    fn resolve(&self, modkey: &str) -> ModMask {
        let names: Vec<String> = match self {
            Self::Single(name) => vec![name.clone()],
            Self::List(names) => names.clone(),
        };
        let names: Vec<String> = names
            .into_iter()
            .map(|name| {
                if name == "modkey" {
                    modkey.to_owned()
                } else {
                    name
                }
            })
            .collect();
        into_modmask(&names)
    }
}

impl From<Vec<&str>> for Modifier {
    fn from(names: Vec<&str>) -> Self {
        Self::List(names.into_iter().map(str::to_owned).collect())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Keybind {
    pub command: BaseCommand,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Modifier>,
    pub key: String,
}

impl Keybind {
    pub fn try_convert(&self, modkey: &str) -> Result<tagwm_core::config::Keybind> {
        ensure!(
            into_keysym(&self.key).is_some(),
            "unknown key name '{}'",
            self.key
        );
        let command = self
            .command
            .build(&self.value)
            .with_context(|| format!("keybind on key '{}'", self.key))?;
        Ok(tagwm_core::config::Keybind {
            command,
            modifier: resolve(self.modifier.as_ref(), modkey),
            key: self.key.clone(),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Mousebind {
    pub command: BaseCommand,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<Modifier>,
    pub button: String,
    pub target: MouseTarget,
}

impl Mousebind {
    pub fn try_convert(&self, modkey: &str) -> Result<tagwm_core::config::Mousebind> {
        let command = self
            .command
            .build(&self.value)
            .with_context(|| format!("mousebind on '{}'", self.button))?;
        Ok(tagwm_core::config::Mousebind {
            command,
            target: self.target,
            modifier: resolve(self.modifier.as_ref(), modkey),
            button: parse_button(&self.button)?,
        })
    }
}

/// A binding without modifiers fires with any modifier state, the same
/// as writing `modifier = "None"`.
fn resolve(modifier: Option<&Modifier>, modkey: &str) -> ModMask {
    match modifier {
        Some(modifier) => modifier.resolve(modkey),
        None => ModMask::Any,
    }
}

fn parse_button(name: &str) -> Result<Button> {
    Ok(match name {
        "Button1" => Button::Button1,
        "Button2" => Button::Button2,
        "Button3" => Button::Button3,
        "Button4" => Button::Button4,
        "Button5" => Button::Button5,
        other => bail!("unknown button name '{other}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagwm_core::models::TagMask;
    use tagwm_core::Command;

    #[test]
    fn modkey_placeholder_resolves_to_the_configured_key() {
        let bind = Keybind {
            command: BaseCommand::Zoom,
            value: String::new(),
            modifier: Some(vec!["modkey", "Shift"].into()),
            key: "Return".to_owned(),
        };
        let converted = bind.try_convert("Mod1").unwrap();
        assert_eq!(converted.modifier, ModMask::Alt | ModMask::Shift);
    }

    #[test]
    fn missing_modifier_means_any() {
        let bind = Keybind {
            command: BaseCommand::Quit,
            value: String::new(),
            modifier: None,
            key: "q".to_owned(),
        };
        assert_eq!(bind.try_convert("Mod4").unwrap().modifier, ModMask::Any);
    }

    #[test]
    fn unknown_key_names_are_rejected() {
        let bind = Keybind {
            command: BaseCommand::Zoom,
            value: String::new(),
            modifier: None,
            key: "NoSuchKey".to_owned(),
        };
        assert!(bind.try_convert("Mod4").is_err());
    }

    #[test]
    fn mousebinds_carry_their_target_through() {
        let bind = Mousebind {
            command: BaseCommand::View,
            value: String::new(),
            modifier: None,
            button: "Button1".to_owned(),
            target: MouseTarget::TagCell,
        };
        let converted = bind.try_convert("Mod4").unwrap();
        assert_eq!(converted.command, Command::View(TagMask::new(0)));
        assert_eq!(converted.target, MouseTarget::TagCell);
        assert_eq!(converted.button, Button::Button1);
    }

    #[test]
    fn bad_button_names_are_rejected() {
        let bind = Mousebind {
            command: BaseCommand::Zoom,
            value: String::new(),
            modifier: None,
            button: "Button9".to_owned(),
            target: MouseTarget::WindowTitle,
        };
        assert!(bind.try_convert("Mod4").is_err());
    }
}
