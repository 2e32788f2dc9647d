//! The command vocabulary of the configuration file. Each binding is a
//! command name plus one string value, resolved to a core command when
//! the binding tables are built.
use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use tagwm_core::layouts::Layout;
use tagwm_core::models::{TagMask, MAX_TAGS};
use tagwm_core::Command;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseCommand {
    /// Run the value as a shell command line.
    Execute,
    View,
    ToggleView,
    Tag,
    ToggleTag,
    FocusStack,
    FocusMonitor,
    SendToMonitor,
    IncMasterCount,
    SetMasterFactor,
    SetLayout,
    Zoom,
    KillClient,
    ToggleBar,
    ToggleFloating,
    MoveWithMouse,
    ResizeWithMouse,
    Quit,
}

impl BaseCommand {
    /// Build the core command, parsing the value the way the command
    /// expects it.
    ///
    /// Tag commands take a 1-based tag number, `0` for every tag, or an
    /// empty value for the empty mask: on a key that swaps back to the
    /// previously viewed tags, on a bar cell it stands for the clicked
    /// tag.
    pub fn build(self, value: &str) -> Result<Command> {
        Ok(match self {
            Self::Execute => {
                ensure!(!value.is_empty(), "Execute needs a command line");
                Command::Spawn(vec![
                    "/bin/sh".to_owned(),
                    "-c".to_owned(),
                    value.to_owned(),
                ])
            }
            Self::View => Command::View(tag_mask(value)?),
            Self::ToggleView => Command::ToggleView(tag_mask(value)?),
            Self::Tag => Command::Tag(tag_mask(value)?),
            Self::ToggleTag => Command::ToggleTag(tag_mask(value)?),
            Self::FocusStack => Command::FocusStack(signed(value)?),
            Self::FocusMonitor => Command::FocusMonitor(signed(value)?),
            Self::SendToMonitor => Command::SendToMonitor(signed(value)?),
            Self::IncMasterCount => Command::IncMasterCount(signed(value)?),
            Self::SetMasterFactor => Command::SetMasterFactor(
                value.parse().context("invalid master factor value")?,
            ),
            Self::SetLayout => Command::SetLayout(layout(value)?),
            Self::Zoom => Command::Zoom,
            Self::KillClient => Command::KillClient,
            Self::ToggleBar => Command::ToggleBar,
            Self::ToggleFloating => Command::ToggleFloating,
            Self::MoveWithMouse => Command::MoveWithMouse,
            Self::ResizeWithMouse => Command::ResizeWithMouse,
            Self::Quit => Command::Quit,
        })
    }
}

fn tag_mask(value: &str) -> Result<TagMask> {
    if value.is_empty() {
        return Ok(TagMask::new(0));
    }
    let number: usize = value.parse().context("invalid tag number")?;
    if number == 0 {
        return Ok(TagMask::all(MAX_TAGS));
    }
    ensure!(number <= MAX_TAGS, "tag number over the limit of {MAX_TAGS}");
    Ok(TagMask::single(number - 1))
}

fn signed(value: &str) -> Result<i32> {
    value.parse().context("invalid numeric value")
}

fn layout(value: &str) -> Result<Option<Layout>> {
    Ok(match value {
        "" => None,
        "Tiled" => Some(Layout::Tiled),
        "Monocle" => Some(Layout::Monocle),
        "Floating" => Some(Layout::Floating),
        other => bail!("unknown layout '{other}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_values_are_one_based() {
        assert_eq!(
            BaseCommand::View.build("3").unwrap(),
            Command::View(TagMask::single(2))
        );
    }

    #[test]
    fn tag_zero_means_every_tag() {
        assert_eq!(
            BaseCommand::View.build("0").unwrap(),
            Command::View(TagMask::all(MAX_TAGS))
        );
    }

    #[test]
    fn empty_tag_value_is_the_empty_mask() {
        assert_eq!(
            BaseCommand::ToggleView.build("").unwrap(),
            Command::ToggleView(TagMask::new(0))
        );
    }

    #[test]
    fn execute_requires_a_command_line() {
        assert!(BaseCommand::Execute.build("").is_err());
        assert_eq!(
            BaseCommand::Execute.build("dmenu_run").unwrap(),
            Command::Spawn(vec![
                "/bin/sh".to_owned(),
                "-c".to_owned(),
                "dmenu_run".to_owned()
            ])
        );
    }

    #[test]
    fn empty_layout_value_swaps_to_the_alternate_slot() {
        assert_eq!(
            BaseCommand::SetLayout.build("").unwrap(),
            Command::SetLayout(None)
        );
        assert_eq!(
            BaseCommand::SetLayout.build("Monocle").unwrap(),
            Command::SetLayout(Some(Layout::Monocle))
        );
        assert!(BaseCommand::SetLayout.build("Spiral").is_err());
    }

    #[test]
    fn numeric_values_are_validated() {
        assert_eq!(
            BaseCommand::FocusStack.build("-1").unwrap(),
            Command::FocusStack(-1)
        );
        assert!(BaseCommand::IncMasterCount.build("lots").is_err());
        assert!(BaseCommand::View.build("99").is_err());
    }
}
