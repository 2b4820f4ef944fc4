//! Output sinks for rendered bundles.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::domain::errors::SinkError;

/// Destination accepting a single rendered bundle.
///
/// The sink is acquired once at the end of a run and released immediately
/// after writing; it is never held across the resolution phase.
pub trait OutputSink {
    fn write(&mut self, text: &str) -> Result<(), SinkError>;
}

/// System clipboard sink with fallbacks for headless environments.
pub struct SystemClipboard {
    primary: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Attempt to initialize the system clipboard. When unavailable we fall
    /// back to shell-based clipboard utilities.
    pub fn new() -> Self {
        let primary = arboard::Clipboard::new().ok();
        Self { primary }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), SinkError> {
        if let Some(primary) = self.primary.as_mut()
            && primary.set_text(text.to_owned()).is_ok()
        {
            return Ok(());
        }

        self.primary = None;
        fallback_copy(text)
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub contents: String,
}

impl OutputSink for MemorySink {
    fn write(&mut self, text: &str) -> Result<(), SinkError> {
        self.contents = text.to_owned();
        Ok(())
    }
}

fn fallback_copy(text: &str) -> Result<(), SinkError> {
    for command in fallback_commands() {
        if try_command_copy(command, text).is_ok() {
            return Ok(());
        }
    }

    Err(SinkError(
        "no clipboard backend accepted the bundle".to_owned(),
    ))
}

fn try_command_copy(command: &[&str], text: &str) -> Result<(), SinkError> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| SinkError("clipboard command missing program".to_owned()))?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()
        .map_err(|err| SinkError(format!("failed to spawn clipboard command {program}: {err}")))?;

    if let Some(stdin) = child.stdin.as_mut() {
        stdin
            .write_all(text.as_bytes())
            .map_err(|err| SinkError(format!("failed to write clipboard contents: {err}")))?;
    }

    let status = child
        .wait()
        .map_err(|err| SinkError(format!("clipboard command did not exit cleanly: {err}")))?;
    if status.success() {
        Ok(())
    } else {
        Err(SinkError(format!(
            "clipboard command exited with status {status}"
        )))
    }
}

#[cfg(target_os = "macos")]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["pbcopy"]]
}

#[cfg(all(unix, not(target_os = "macos")))]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["xclip", "-selection", "clipboard"], &["wl-copy"]]
}

#[cfg(target_os = "windows")]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    vec![&["powershell.exe", "-NoProfile", "-Command", "Set-Clipboard"]]
}

#[cfg(not(any(unix, target_os = "windows")))]
fn fallback_commands() -> Vec<&'static [&'static str]> {
    Vec::new()
}
