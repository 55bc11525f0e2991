//! Append-only feedback log.

use crate::error::{BriefError, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};

/// Appends user/bot interaction pairs to a flat text file.
///
/// Each record is written with a single `write_all`, so concurrent writers
/// interleave only at record granularity when the OS append is atomic for
/// the record size. Nothing in Brief reads the log back.
#[derive(Debug, Clone)]
pub struct FeedbackLog {
    path: PathBuf,
}

impl FeedbackLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format a two-line record followed by a blank line.
    pub fn format_record(user_input: &str, bot_response: &str) -> String {
        format!("User: {}\nBot: {}\n\n", user_input, bot_response)
    }

    /// Append one record, creating the log if absent.
    #[instrument(skip_all, fields(path = %self.path.display()))]
    pub async fn append(&self, user_input: &str, bot_response: &str) -> Result<()> {
        let record = Self::format_record(user_input, bot_response);

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| BriefError::Storage(e.to_string()))?;

        file.write_all(record.as_bytes())
            .await
            .map_err(|e| BriefError::Storage(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| BriefError::Storage(e.to_string()))?;

        debug!("Stored feedback record ({} bytes)", record.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_creates_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let log = FeedbackLog::new(dir.path().join("feedback_log.txt"));

        log.append("hi", "hello").await.unwrap();
        log.append("bye", "goodbye").await.unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(content, "User: hi\nBot: hello\n\nUser: bye\nBot: goodbye\n\n");
    }

    #[tokio::test]
    async fn test_never_truncates_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedback_log.txt");
        std::fs::write(&path, "earlier\n").unwrap();

        FeedbackLog::new(&path).append("q", "a").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("earlier\n"));
        assert!(content.ends_with("User: q\nBot: a\n\n"));
    }

    #[tokio::test]
    async fn test_unwritable_path_is_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = FeedbackLog::new(dir.path().join("missing").join("log.txt"));

        let err = log.append("q", "a").await.unwrap_err();
        assert!(matches!(err, BriefError::Storage(_)));
        assert_eq!(err.status_code(), 500);
    }
}
