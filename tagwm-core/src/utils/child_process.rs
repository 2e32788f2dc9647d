//! Spawns the programs bindings ask for and keeps their `Child`
//! handles around so they can be reaped.
use std::collections::HashMap;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command, Stdio};
use std::sync::{atomic::AtomicBool, Arc};

use crate::errors::{Result, TagwmError};

pub type ChildID = u32;

/// A struct managing children processes.
#[derive(Debug, Default)]
pub struct Children {
    inner: HashMap<ChildID, Child>,
}

impl Children {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Insert a `Child` in the `Children`.
    ///
    /// # Returns
    /// - `true` if `child` is a new child-process
    /// - `false` if `child` is already known
    pub fn insert(&mut self, child: Child) -> bool {
        self.inner.insert(child.id(), child).is_none()
    }

    /// Remove all children processes which finished.
    pub fn remove_finished_children(&mut self) {
        self.inner
            .retain(|_, child| child.try_wait().map_or(true, |ret| ret.is_none()));
    }
}

/// Register the `SIGCHLD` signal handler. Once the signal is received,
/// the flag will be set true. User needs to manually clear the flag.
pub fn register_child_hook(flag: Arc<AtomicBool>) {
    _ = signal_hook::flag::register(signal_hook::consts::signal::SIGCHLD, flag)
        .map_err(|err| tracing::error!("Cannot register SIGCHLD signal handler: {:?}", err));
}

/// Start a program with its arguments, detached from our stdio and
/// session so it outlives us and never writes to our terminal.
///
/// # Errors
///
/// An empty argument list, or the spawn itself failing (program not
/// found, permissions).
pub fn spawn_program(args: &[String], children: &mut Children) -> Result<ChildID> {
    let (program, rest) = args.split_first().ok_or(TagwmError::EmptyCommand)?;
    let mut command = Command::new(program);
    command
        .args(rest)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    unsafe {
        command.pre_exec(|| {
            libc::setsid();
            Ok(())
        });
    }
    let child = command.spawn()?;
    let pid = child.id();
    children.insert(child);
    Ok(pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawning_tracks_the_child() {
        let mut children = Children::new();
        assert!(spawn_program(&["true".to_string()], &mut children).is_ok());
        assert_eq!(children.len(), 1);
    }

    #[test]
    fn empty_command_lines_are_rejected() {
        let mut children = Children::new();
        assert!(matches!(
            spawn_program(&[], &mut children),
            Err(TagwmError::EmptyCommand)
        ));
        assert!(children.is_empty());
    }

    #[test]
    fn missing_programs_report_the_io_error() {
        let mut children = Children::new();
        let result = spawn_program(&["tagwm-no-such-program".to_string()], &mut children);
        assert!(matches!(result, Err(TagwmError::Io(_))));
        assert!(children.is_empty());
    }
}
