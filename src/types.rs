/*!
 * Core types and data structures for the textpack application
 */

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use strum::Display;

/// A candidate file discovered by the traversal engine
#[derive(Debug, Clone)]
pub struct FileRecord {
    /// Absolute (or root-joined) path on disk
    pub absolute_path: PathBuf,
    /// Path relative to the source root used for traversal
    pub relative_path: PathBuf,
    /// Byte size at discovery time
    pub size: u64,
    /// Last modification time at discovery time
    pub modified: SystemTime,
    /// Extension, lowercased, including the leading dot; empty when none
    pub extension: String,
}

impl FileRecord {
    /// Build a record for a file at `absolute_path`, `relative_path` being
    /// its path below the source root
    pub fn new(
        absolute_path: PathBuf,
        relative_path: PathBuf,
        size: u64,
        modified: SystemTime,
    ) -> Self {
        let extension = extension_of(&relative_path);
        Self {
            absolute_path,
            relative_path,
            size,
            modified,
            extension,
        }
    }

    /// Relative path rendered for reports
    pub fn display_path(&self) -> String {
        self.relative_path.to_string_lossy().into_owned()
    }
}

/// Lowercased extension including the leading dot, or an empty string for
/// files without one (`Makefile`, dotfiles such as `.gitignore`)
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// Reason a file was skipped rather than converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum SkipReason {
    /// Extension not present in the allow-list
    #[strum(serialize = "unsupported extension")]
    UnsupportedExtension,
    /// Extension present in the deny-list
    #[strum(serialize = "excluded extension")]
    ExcludedExtension,
    /// Content empty after trimming
    #[strum(serialize = "empty after trimming")]
    Empty,
}

/// Final classification of a single file within a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A formatted block was appended to an output
    Converted,
    /// No block written, reason recorded
    Skipped(SkipReason),
    /// Read or write failed for this file; the run continues
    Error(String),
}

/// One file's result, immutable once produced
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub record: FileRecord,
    pub outcome: Outcome,
    /// Line count of the converted content (0 unless converted)
    pub lines: usize,
    /// Character count of the converted content (0 unless converted)
    pub chars: usize,
}

impl ConversionResult {
    pub fn converted(record: FileRecord, lines: usize, chars: usize) -> Self {
        Self {
            record,
            outcome: Outcome::Converted,
            lines,
            chars,
        }
    }

    pub fn skipped(record: FileRecord, reason: SkipReason) -> Self {
        Self {
            record,
            outcome: Outcome::Skipped(reason),
            lines: 0,
            chars: 0,
        }
    }

    pub fn errored(record: FileRecord, message: String) -> Self {
        Self {
            record,
            outcome: Outcome::Error(message),
            lines: 0,
            chars: 0,
        }
    }
}

/// A skipped file as listed in the summary report
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    pub path: String,
    pub reason: SkipReason,
}

/// An errored file as listed in the summary report
#[derive(Debug, Clone, Serialize)]
pub struct ErroredFile {
    pub path: String,
    pub message: String,
}

/// Per-file detail kept for the console report
#[derive(Debug, Clone, Default, Serialize)]
pub struct FileDetail {
    /// Number of lines in the file
    pub lines: usize,
    /// Number of characters in the file
    pub chars: usize,
    /// Byte size from traversal metadata
    pub size: u64,
}

/// Statistics accumulated across a run, finalized when processing ends
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStatistics {
    /// Number of files classified (converted + skipped + errored)
    pub files_scanned: usize,
    /// Number of files whose block was written
    pub converted: usize,
    /// Number of files skipped (unsupported, excluded or empty)
    pub skipped: usize,
    /// Number of files that failed with a per-file error
    pub errors: usize,
    /// Total lines across converted content
    pub total_lines: usize,
    /// Total characters across converted content
    pub total_chars: usize,
    /// Skipped files in processing order
    pub skipped_files: Vec<SkippedFile>,
    /// Errored files in processing order
    pub errored_files: Vec<ErroredFile>,
    /// Details for each converted file
    pub file_details: HashMap<String, FileDetail>,
    /// Converted-file counts keyed by extension name without the dot,
    /// taken from the output groups (grouped mode only)
    pub groups: BTreeMap<String, usize>,
}

impl RunStatistics {
    /// Fold one per-file result into the accumulator
    pub fn record(&mut self, result: &ConversionResult) {
        self.files_scanned += 1;
        let path = result.record.display_path();

        match &result.outcome {
            Outcome::Converted => {
                self.converted += 1;
                self.total_lines += result.lines;
                self.total_chars += result.chars;
                self.file_details.insert(
                    path,
                    FileDetail {
                        lines: result.lines,
                        chars: result.chars,
                        size: result.record.size,
                    },
                );
            }
            Outcome::Skipped(reason) => {
                self.skipped += 1;
                self.skipped_files.push(SkippedFile {
                    path,
                    reason: *reason,
                });
            }
            Outcome::Error(message) => {
                self.errors += 1;
                self.errored_files.push(ErroredFile {
                    path,
                    message: message.clone(),
                });
            }
        }
    }
}

/// One extension's destination in grouped mode, created lazily on the first
/// conversion of that extension and never removed within a run
#[derive(Debug, Clone)]
pub struct OutputGroup {
    /// Destination file inside the output directory
    pub path: PathBuf,
    /// Number of files appended so far
    pub files: usize,
}

impl OutputGroup {
    pub fn new(path: PathBuf) -> Self {
        Self { path, files: 0 }
    }
}
