//! Append-only JSONL run log.

use herald_core::RunRecord;
use herald_error::{HeraldResult, JsonError, RunLogError};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument, warn};

/// File name of the run log inside the log directory.
pub const RUN_LOG_FILE: &str = "runs.jsonl";

/// One JSON object per line, one line per run.
///
/// Writes are best-effort: a run never fails because its record could not
/// be written.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    /// Run log at `<log_dir>/runs.jsonl`.
    pub fn in_dir(log_dir: impl AsRef<Path>) -> Self {
        Self {
            path: log_dir.as_ref().join(RUN_LOG_FILE),
        }
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record, reporting failures through tracing only.
    pub async fn append(&self, record: &RunRecord) {
        if let Err(e) = self.try_append(record).await {
            warn!(path = %self.path.display(), error = %e, "Failed to write run log");
        }
    }

    /// Append a record.
    #[instrument(skip(self, record), fields(path = %self.path.display(), run_id = %record.run_id()))]
    pub async fn try_append(&self, record: &RunRecord) -> HeraldResult<()> {
        let mut line = serde_json::to_string(record)
            .map_err(|e| JsonError::new(format!("Failed to serialize run record: {}", e)))?;
        line.push('\n');

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await.map_err(|e| {
                RunLogError::new(format!("Failed to create {}: {}", dir.display(), e))
            })?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| RunLogError::new(format!("Failed to open run log: {}", e)))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| RunLogError::new(format!("Failed to append run record: {}", e)))?;
        file.flush()
            .await
            .map_err(|e| RunLogError::new(format!("Failed to flush run log: {}", e)))?;

        debug!("Appended run record");
        Ok(())
    }

    /// All readable records, oldest first. A missing log is empty; lines that
    /// do not parse are skipped with a warning.
    pub async fn records(&self) -> HeraldResult<Vec<RunRecord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(RunLogError::new(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                ))
                .into());
            }
        };

        let mut records = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<RunRecord>(line) {
                Ok(record) => records.push(record),
                Err(e) => warn!(line = index + 1, error = %e, "Skipping unreadable run log line"),
            }
        }
        Ok(records)
    }

    /// Most recent live run that published `entry_id`, if any.
    pub async fn find_published(&self, entry_id: &str) -> HeraldResult<Option<RunRecord>> {
        let records = self.records().await?;
        Ok(records
            .into_iter()
            .rev()
            .find(|r| r.is_published() && r.entry_id().as_deref() == Some(entry_id)))
    }
}
