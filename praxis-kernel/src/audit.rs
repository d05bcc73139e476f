//! File-based audit trail of model interactions.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

/// Appends stage-tagged records to a per-boot markdown file.
///
/// Decisions and reflections land here so a run can be audited after the
/// fact without replaying memory.
pub struct AuditTrail {
    path: PathBuf,
}

impl AuditTrail {
    /// Create a trail under `dir`, named after the boot time.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created.
    pub fn create(dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(dir)?;
        let stamp = Utc::now().format("%Y%m%d_%H%M%S");
        Ok(Self {
            path: dir.join(format!("trace_{stamp}.md")),
        })
    }

    /// Append one stage-tagged record.
    ///
    /// # Errors
    ///
    /// Returns an error when the append fails; callers log and continue.
    pub fn record(&self, stage: &str, content: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "## [{stage}] {}\n{content}\n", Utc::now().to_rfc3339())
    }

    /// Location of the trail file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
