/*!
 * Directory traversal for textpack
 *
 * Collects a deterministic, fully sorted list of candidate files below the
 * source root. Excluded directories are pruned before descent, so their
 * contents are never read; unreadable directories are treated as empty.
 */

use std::sync::Arc;
use std::time::UNIX_EPOCH;

use indicatif::ProgressBar;
use walkdir::{DirEntry, WalkDir};

use crate::config::{Config, OutputTarget};
use crate::error::Result;
use crate::report::SUMMARY_FILE_NAME;
use crate::types::FileRecord;

/// Scanner for directory contents
pub struct Scanner {
    /// Scanner configuration
    config: Config,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Walk the source root and return every reachable file, sorted by
    /// relative path (path-segment-aware). Running twice on an unchanged
    /// tree yields an identical sequence.
    pub fn collect(&self) -> Result<Vec<FileRecord>> {
        let root = &self.config.source_root;
        let mut records = Vec::new();

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !self.is_pruned(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    // Unreadable directories count as empty, not fatal
                    eprintln!("Warning: skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            if self.is_own_output(&entry) {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or_else(|_| entry.path())
                .to_path_buf();
            let (size, modified) = match entry.metadata() {
                Ok(meta) => (meta.len(), meta.modified().unwrap_or(UNIX_EPOCH)),
                Err(_) => (0, UNIX_EPOCH),
            };
            records.push(FileRecord::new(
                entry.path().to_path_buf(),
                relative,
                size,
                modified,
            ));
        }

        records.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        self.progress
            .set_message(format!("🔎 Found {} files to process", records.len()));

        Ok(records)
    }

    /// True when the entry is a directory that must not be descended into:
    /// either its name is in the excluded set, or it is this run's own
    /// grouped output directory
    fn is_pruned(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }

        let name = entry.file_name().to_string_lossy();
        if self.config.excluded_dirs.contains(name.as_ref()) {
            return true;
        }

        if let OutputTarget::GroupedDir(dir) = &self.config.target {
            if entry.path().ends_with(dir) {
                return true;
            }
        }

        false
    }

    /// Don't process the output artifacts the run itself produces
    fn is_own_output(&self, entry: &DirEntry) -> bool {
        match &self.config.target {
            OutputTarget::SingleFile(output) => {
                entry.path().ends_with(output)
                    || entry.file_name().to_string_lossy() == SUMMARY_FILE_NAME
            }
            OutputTarget::GroupedDir(_) => false,
        }
    }
}
