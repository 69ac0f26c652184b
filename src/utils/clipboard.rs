//! Copy text to the system clipboard through the platform's helper command.

use std::error::Error;
use std::fmt;
use std::io::Write;
use std::process::{Command, Stdio};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// None of the candidate helpers could be started.
    NoHelper(Vec<&'static str>),
    /// A helper started but exited unsuccessfully.
    HelperFailed(&'static str),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::NoHelper(tried) => write!(
                f,
                "No clipboard command found (tried {})",
                tried.join(", ")
            ),
            ClipboardError::HelperFailed(cmd) => write!(f, "Clipboard command `{cmd}` failed"),
        }
    }
}

impl Error for ClipboardError {}

/// Helper commands tried in order, with their arguments.
fn helpers() -> &'static [(&'static str, &'static [&'static str])] {
    #[cfg(target_os = "macos")]
    {
        &[("pbcopy", &[])]
    }
    #[cfg(target_os = "windows")]
    {
        &[("clip", &[])]
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        &[
            ("wl-copy", &[]),
            ("xclip", &["-selection", "clipboard"]),
            ("xsel", &["--clipboard", "--input"]),
        ]
    }
}

pub fn copy_to_clipboard(text: &str) -> Result<(), ClipboardError> {
    copy_with(helpers(), text)
}

fn copy_with(
    candidates: &[(&'static str, &'static [&'static str])],
    text: &str,
) -> Result<(), ClipboardError> {
    let mut last_failure = None;
    for &(cmd, args) in candidates {
        let child = Command::new(cmd)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        let Ok(mut child) = child else {
            continue;
        };
        if let Some(mut stdin) = child.stdin.take() {
            if stdin.write_all(text.as_bytes()).is_err() {
                tracing::debug!(cmd, "clipboard helper closed stdin early");
            }
        }
        match child.wait() {
            Ok(status) if status.success() => return Ok(()),
            _ => last_failure = Some(ClipboardError::HelperFailed(cmd)),
        }
    }
    Err(last_failure.unwrap_or_else(|| {
        ClipboardError::NoHelper(candidates.iter().map(|(cmd, _)| *cmd).collect())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_helpers_are_reported_by_name() {
        let err = copy_with(&[("tabchat-no-such-helper", &[])], "x").unwrap_err();
        assert_eq!(
            err,
            ClipboardError::NoHelper(vec!["tabchat-no-such-helper"])
        );
        assert!(err.to_string().contains("tabchat-no-such-helper"));
    }

    #[cfg(unix)]
    #[test]
    fn failing_helper_is_reported() {
        let err = copy_with(&[("false", &[])], "x").unwrap_err();
        assert_eq!(err, ClipboardError::HelperFailed("false"));
    }

    #[cfg(unix)]
    #[test]
    fn succeeding_helper_returns_ok() {
        assert_eq!(copy_with(&[("cat", &[])], "hello"), Ok(()));
    }
}
