//! The TOML-backed configuration, located through XDG and written out
//! with its defaults on first start.
pub mod command;
mod default;
pub mod keybind;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};
use tagwm_core::config::{BarPosition, ColorScheme, WindowRule};
use tagwm_core::layouts::Layout;
use tagwm_core::models::MAX_TAGS;
use xdg::BaseDirectories;

use self::keybind::{Keybind, Mousebind};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// The key `"modkey"` stands for in binding modifier lists.
    pub modkey: String,
    pub tags: Vec<String>,
    pub font: String,
    pub border_width: i32,
    pub snap_distance: i32,
    pub master_factor: f32,
    pub master_count: u32,
    pub show_bar: bool,
    pub bar_position: BarPosition,
    pub respect_resize_hints: bool,
    pub layouts: [Layout; 2],
    pub colors: ColorScheme,
    pub window_rules: Vec<WindowRule>,
    pub keybind: Vec<Keybind>,
    pub mousebind: Vec<Mousebind>,
}

/// Load the configuration, falling back to the defaults when the file
/// cannot be read or parsed so the manager still comes up.
pub fn load(path: Option<&Path>) -> Config {
    load_from_file(path)
        .map_err(|err| tracing::error!("error loading config: {err:#}"))
        .unwrap_or_default()
}

/// Load from the given file, or from the XDG config location. When
/// neither exists the default configuration is written there first; an
/// explicitly named file must already exist.
pub fn load_from_file(path: Option<&Path>) -> Result<Config> {
    let file = match path {
        Some(path) => path.to_path_buf(),
        None => config_file()?,
    };
    if file.exists() {
        tracing::debug!("loading config file {}", file.display());
        let contents = fs::read_to_string(&file)?;
        Ok(toml::from_str(&contents)?)
    } else if path.is_some() {
        bail!("config file {} does not exist", file.display());
    } else {
        tracing::debug!("no config file, writing defaults to {}", file.display());
        let config = Config::default();
        write_to_file(&file, &config)?;
        Ok(config)
    }
}

/// Validate without starting anything: the file must parse and every
/// binding must convert.
pub fn check(path: Option<&Path>) -> Result<()> {
    let config = load_from_file(path)?;
    ensure!(
        !config.tags.is_empty() && config.tags.len() <= MAX_TAGS,
        "between 1 and {MAX_TAGS} tags required, found {}",
        config.tags.len()
    );
    for bind in &config.keybind {
        bind.try_convert(&config.modkey)?;
    }
    for bind in &config.mousebind {
        bind.try_convert(&config.modkey)?;
    }
    Ok(())
}

fn config_file() -> Result<PathBuf> {
    Ok(BaseDirectories::with_prefix("tagwm")?.place_config_file("config.toml")?)
}

fn write_to_file(path: &Path, config: &Config) -> Result<()> {
    let toml = toml::to_string_pretty(config)?;
    let mut file = File::create(path)?;
    file.write_all(toml.as_bytes())?;
    Ok(())
}

impl tagwm_core::Config for Config {
    fn tag_names(&self) -> Vec<String> {
        let mut tags = self.tags.clone();
        if tags.is_empty() {
            tracing::warn!("no tags configured, using the defaults");
            tags = Self::default().tags;
        }
        if tags.len() > MAX_TAGS {
            tracing::warn!("more than {MAX_TAGS} tags configured, extra tags dropped");
            tags.truncate(MAX_TAGS);
        }
        tags
    }

    fn rules(&self) -> Vec<WindowRule> {
        self.window_rules.clone()
    }

    fn keybinds(&self) -> Vec<tagwm_core::config::Keybind> {
        self.keybind
            .iter()
            .filter_map(|bind| match bind.try_convert(&self.modkey) {
                Ok(bind) => Some(bind),
                Err(err) => {
                    tracing::warn!("ignoring keybind: {err:#}");
                    None
                }
            })
            .collect()
    }

    fn mousebinds(&self) -> Vec<tagwm_core::config::Mousebind> {
        self.mousebind
            .iter()
            .filter_map(|bind| match bind.try_convert(&self.modkey) {
                Ok(bind) => Some(bind),
                Err(err) => {
                    tracing::warn!("ignoring mousebind: {err:#}");
                    None
                }
            })
            .collect()
    }

    fn colors(&self) -> ColorScheme {
        self.colors.clone()
    }

    fn border_width(&self) -> i32 {
        self.border_width
    }

    fn snap_distance(&self) -> i32 {
        self.snap_distance
    }

    fn master_factor(&self) -> f32 {
        self.master_factor
    }

    fn master_count(&self) -> u32 {
        self.master_count
    }

    fn show_bar(&self) -> bool {
        self.show_bar
    }

    fn bar_position(&self) -> BarPosition {
        self.bar_position
    }

    fn font(&self) -> String {
        self.font.clone()
    }

    fn respect_resize_hints(&self) -> bool {
        self.respect_resize_hints
    }

    fn layouts(&self) -> [Layout; 2] {
        self.layouts
    }
}
