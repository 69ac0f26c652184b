//! Plain-text transcripts and file uploads.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::core::config::path_display;
use crate::core::message::Message;

#[derive(Debug)]
pub enum FileIoError {
    Read { path: PathBuf, source: io::Error },
    Write { path: PathBuf, source: io::Error },
}

impl fmt::Display for FileIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileIoError::Read { path, source } => {
                write!(f, "Could not read file {}: {}", path_display(path), source)
            }
            FileIoError::Write { path, source } => write!(
                f,
                "Could not save chat history to {}: {}",
                path_display(path),
                source
            ),
        }
    }
}

impl Error for FileIoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FileIoError::Read { source, .. } | FileIoError::Write { source, .. } => Some(source),
        }
    }
}

/// Write one `[timestamp] User|AI: text` block per message, each followed by
/// a blank line.
pub fn write_transcript<'a, W: Write>(
    writer: &mut W,
    messages: impl IntoIterator<Item = &'a Message>,
) -> io::Result<()> {
    for message in messages {
        write!(
            writer,
            "[{}] {}: {}\n\n",
            message.formatted_timestamp(),
            message.origin().transcript_label(),
            message.content()
        )?;
    }
    Ok(())
}

pub fn render_transcript<'a>(messages: impl IntoIterator<Item = &'a Message>) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_transcript(&mut buffer, messages);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Save a transcript, replacing `path` only once the whole file is written.
pub fn save_transcript<'a>(
    path: &Path,
    messages: impl IntoIterator<Item = &'a Message>,
) -> Result<(), FileIoError> {
    let write_err = |source| FileIoError::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let temp_file = NamedTempFile::new_in(parent).map_err(write_err)?;

    let mut writer = BufWriter::new(temp_file);
    write_transcript(&mut writer, messages).map_err(write_err)?;
    let temp_file = writer
        .into_inner()
        .map_err(|err| write_err(err.into_error()))?;
    temp_file.as_file().sync_all().map_err(write_err)?;
    temp_file.persist(path).map_err(|err| write_err(err.error))?;
    Ok(())
}

/// Read a whole text file for the input box.
pub fn read_upload(path: &Path) -> Result<String, FileIoError> {
    fs::read_to_string(path).map_err(|source| FileIoError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// File name suggested when saving a tab.
pub fn default_transcript_name(tab_name: &str) -> String {
    format!("{tab_name} Chat History.txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::{parse_timestamp, Origin};
    use tempfile::TempDir;

    fn sample() -> Vec<Message> {
        vec![
            Message::new(
                "hi",
                Origin::User,
                parse_timestamp("2024-01-01 00:00:00").unwrap(),
            ),
            Message::new(
                "yo",
                Origin::Assistant,
                parse_timestamp("2024-01-01 00:00:01").unwrap(),
            ),
        ]
    }

    #[test]
    fn renders_exact_block_format() {
        assert_eq!(
            render_transcript(&sample()),
            "[2024-01-01 00:00:00] User: hi\n\n[2024-01-01 00:00:01] AI: yo\n\n"
        );
    }

    #[test]
    fn empty_history_renders_empty_file() {
        assert_eq!(render_transcript(&Vec::<Message>::new()), "");
    }

    #[test]
    fn save_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Default Chat Chat History.txt");
        fs::write(&path, "stale").unwrap();

        save_transcript(&path, &sample()).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[2024-01-01 00:00:00] User: hi\n\n[2024-01-01 00:00:01] AI: yo\n\n"
        );
    }

    #[test]
    fn save_into_missing_directory_is_a_write_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.txt");
        let err = save_transcript(&path, &sample()).unwrap_err();
        assert!(matches!(err, FileIoError::Write { .. }));
        assert!(err.to_string().starts_with("Could not save chat history"));
    }

    #[test]
    fn read_upload_returns_whole_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.txt");
        fs::write(&path, "line one\nline two\n").unwrap();
        assert_eq!(read_upload(&path).unwrap(), "line one\nline two\n");
    }

    #[test]
    fn read_upload_of_missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = read_upload(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, FileIoError::Read { .. }));
    }

    #[test]
    fn default_name_follows_tab() {
        assert_eq!(default_transcript_name("Work"), "Work Chat History.txt");
    }
}
