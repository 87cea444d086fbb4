//! System clipboard reads.
//!
//! The store only needs "give me the clipboard text, eventually". That is
//! the [`ClipboardSource`] seam; [`CommandClipboard`] fills it by running the
//! platform's paste utility.

use std::future::Future;
use std::process::Stdio;

use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("clipboard text is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Anything that can hand over the current clipboard text.
pub trait ClipboardSource {
    fn read_text(&self) -> impl Future<Output = Result<String, ClipboardError>>;
}

/// Reads the clipboard by running the platform paste command.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandClipboard;

impl CommandClipboard {
    #[cfg(target_os = "macos")]
    const PROGRAM: &'static str = "pbpaste";
    #[cfg(target_os = "macos")]
    const ARGS: &'static [&'static str] = &[];

    #[cfg(target_os = "windows")]
    const PROGRAM: &'static str = "powershell";
    #[cfg(target_os = "windows")]
    const ARGS: &'static [&'static str] = &["-NoProfile", "-Command", "Get-Clipboard -Raw"];

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    const PROGRAM: &'static str = "xclip";
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    const ARGS: &'static [&'static str] = &["-selection", "clipboard", "-o"];
}

impl ClipboardSource for CommandClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        let program = Self::PROGRAM;
        let output = Command::new(program)
            .args(Self::ARGS)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| ClipboardError::Spawn { program, source })?;

        if !output.status.success() {
            return Err(ClipboardError::Failed {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let mut text = String::from_utf8(output.stdout)?;
        // PowerShell terminates its output with a line break of its own.
        if cfg!(target_os = "windows") && text.ends_with("\r\n") {
            text.truncate(text.len() - 2);
        }
        Ok(text)
    }
}
