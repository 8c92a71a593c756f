use chrono::Utc;
use fw_core::error::AppError;
use fw_core::feedback::FeedbackEntry;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

const FEEDBACK_LOG_FILE: &str = "feedback_log.json";
const ONBOARDING_MARKER_FILE: &str = "onboarding_complete";

/// File-backed session storage for the widget: the local feedback log and
/// the onboarding marker, both under one data directory.
///
/// The log is kept as a single JSON array and rewritten on every append.
/// Two writers racing can lose an update; that is accepted for this backup
/// copy.
#[derive(Debug, Clone)]
pub struct WidgetStorage {
    dir: PathBuf,
}

impl WidgetStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("feedback-widget")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn log_path(&self) -> PathBuf {
        self.dir.join(FEEDBACK_LOG_FILE)
    }

    fn marker_path(&self) -> PathBuf {
        self.dir.join(ONBOARDING_MARKER_FILE)
    }

    async fn ensure_dir(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    pub async fn append(&self, entry: &FeedbackEntry) -> Result<(), AppError> {
        let mut entries = self.list().await?;
        entries.push(entry.clone());

        self.ensure_dir().await?;
        fs::write(self.log_path(), serde_json::to_vec(&entries)?).await?;
        Ok(())
    }

    /// Oldest first, in submission order. A missing or unreadable log reads
    /// as empty.
    pub async fn list(&self) -> Result<Vec<FeedbackEntry>, AppError> {
        match fs::read(self.log_path()).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes).unwrap_or_default()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn clear(&self) -> Result<(), AppError> {
        remove_if_present(self.log_path()).await
    }

    pub async fn onboarding_complete(&self) -> bool {
        match fs::read_to_string(self.marker_path()).await {
            Ok(contents) => contents.trim() == "true",
            Err(_) => false,
        }
    }

    pub async fn set_onboarding_complete(&self) -> Result<(), AppError> {
        self.ensure_dir().await?;
        fs::write(self.marker_path(), "true").await?;
        Ok(())
    }

    pub async fn reset_onboarding(&self) -> Result<(), AppError> {
        remove_if_present(self.marker_path()).await
    }

    /// Writes the whole log as pretty JSON, defaulting to a date-stamped
    /// file in the working directory, and returns the path written.
    pub async fn export(&self, output: Option<PathBuf>) -> Result<PathBuf, AppError> {
        let entries = self.list().await?;
        let path = output.unwrap_or_else(|| {
            PathBuf::from(format!("feedback-{}.json", Utc::now().format("%Y-%m-%d")))
        });
        fs::write(&path, serde_json::to_vec_pretty(&entries)?).await?;
        Ok(path)
    }
}

async fn remove_if_present(path: PathBuf) -> Result<(), AppError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
