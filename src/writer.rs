/*!
 * Formatting and output writing for textpack
 *
 * Renders one boundary block per converted file and appends it to the
 * configured destination: one `<ext>_logic_group.txt` per extension in
 * grouped mode, or a single consolidated file (header + directory tree,
 * then blocks) in single-file mode.
 *
 * All per-file failures are caught here and recorded as outcomes; nothing
 * is thrown across the per-file boundary.
 */

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use indicatif::ProgressBar;

use crate::config::{Config, OutputTarget};
use crate::error::{Result, ResultExt};
use crate::tree;
use crate::types::{ConversionResult, FileRecord, OutputGroup, RunStatistics, SkipReason};
use crate::utils::read_to_text;

/// Width of every boundary line
pub const BOUNDARY_WIDTH: usize = 80;

/// Writer for annotated text bundles
pub struct TextWriter {
    config: Config,
    progress: Arc<ProgressBar>,
}

impl TextWriter {
    /// Create a new writer
    pub fn new(config: Config, progress: Arc<ProgressBar>) -> Self {
        Self { config, progress }
    }

    /// Process every collected record in order, appending formatted blocks
    /// to the configured destination(s), and return the run statistics.
    /// Every record ends up with exactly one outcome.
    pub fn write(&self, records: &[FileRecord]) -> Result<RunStatistics> {
        match &self.config.target {
            OutputTarget::GroupedDir(dir) => self.write_grouped(records, dir),
            OutputTarget::SingleFile(path) => self.write_single(records, path),
        }
    }

    fn write_grouped(&self, records: &[FileRecord], dir: &Path) -> Result<RunStatistics> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;

        let mut stats = RunStatistics::default();
        let mut groups: BTreeMap<String, OutputGroup> = BTreeMap::new();

        for record in records {
            self.tick(record);

            let result = match self.config.classify(&record.extension) {
                Some(reason) => ConversionResult::skipped(record.clone(), reason),
                None => match self.append_grouped(record, dir, &mut groups) {
                    Ok(None) => ConversionResult::skipped(record.clone(), SkipReason::Empty),
                    Ok(Some((lines, chars))) => {
                        ConversionResult::converted(record.clone(), lines, chars)
                    }
                    Err(err) => ConversionResult::errored(record.clone(), err.to_string()),
                },
            };
            stats.record(&result);
        }

        // The groups map is the source of truth for per-extension counts
        for (key, group) in &groups {
            if group.files > 0 {
                stats.groups.insert(key.clone(), group.files);
            }
        }

        Ok(stats)
    }

    fn write_single(&self, records: &[FileRecord], path: &Path) -> Result<RunStatistics> {
        // Truncate exactly once, before any per-file content
        let file = File::create(path)
            .with_context(|| format!("creating output file {}", path.display()))?;
        let mut out = BufWriter::new(file);
        out.write_all(consolidated_header(&self.config).as_bytes())?;
        out.flush()?;
        drop(out);

        let mut stats = RunStatistics::default();
        let mut first = true;

        for record in records {
            self.tick(record);

            let result = match self.config.classify(&record.extension) {
                Some(reason) => ConversionResult::skipped(record.clone(), reason),
                None => match self.append_single(record, path, first) {
                    Ok(None) => ConversionResult::skipped(record.clone(), SkipReason::Empty),
                    Ok(Some((lines, chars))) => {
                        first = false;
                        ConversionResult::converted(record.clone(), lines, chars)
                    }
                    Err(err) => ConversionResult::errored(record.clone(), err.to_string()),
                },
            };
            stats.record(&result);
        }

        Ok(stats)
    }

    /// Append one block to the file's extension group. Returns Ok(None)
    /// when the trimmed content is empty and no block was written.
    fn append_grouped(
        &self,
        record: &FileRecord,
        dir: &Path,
        groups: &mut BTreeMap<String, OutputGroup>,
    ) -> io::Result<Option<(usize, usize)>> {
        let content = read_to_text(&record.absolute_path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        // Metadata is read at formatting time, never cached from traversal
        let meta = fs::metadata(&record.absolute_path)?;
        let modified = meta.modified()?;

        let key = record.extension.trim_start_matches('.').to_string();
        let group = groups.entry(key.clone()).or_insert_with(|| {
            OutputGroup::new(dir.join(format!("{}_logic_group.txt", key)))
        });

        let mut out = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&group.path)?;
        out.write_all(grouped_begin_marker(&record.relative_path, meta.len(), modified).as_bytes())?;
        out.write_all(content.as_bytes())?;
        out.write_all(grouped_end_marker(&record.relative_path).as_bytes())?;
        out.flush()?;
        group.files += 1;

        Ok(Some(count_text(&content)))
    }

    /// Append one block to the consolidated file. Returns Ok(None) when the
    /// trimmed content is empty and no block was written.
    fn append_single(
        &self,
        record: &FileRecord,
        path: &Path,
        first: bool,
    ) -> io::Result<Option<(usize, usize)>> {
        let content = read_to_text(&record.absolute_path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let meta = fs::metadata(&record.absolute_path)?;
        let modified = meta.modified()?;

        let mut out = OpenOptions::new().append(true).open(path)?;
        out.write_all(
            single_begin_marker(&record.relative_path, meta.len(), modified, first).as_bytes(),
        )?;
        out.write_all(content.as_bytes())?;
        out.write_all(b"\n\n")?;
        out.flush()?;

        Ok(Some(count_text(&content)))
    }

    fn tick(&self, record: &FileRecord) {
        self.progress.inc(1);

        let name = record
            .relative_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        // Truncate if too long to avoid display issues
        let display_name = if name.chars().count() > 40 {
            let tail: String = name.chars().rev().take(37).collect::<Vec<_>>().into_iter().rev().collect();
            format!("...{}", tail)
        } else {
            name
        };
        self.progress
            .set_message(format!("Current file: {}", display_name));
    }
}

/// Lines and characters of a decoded file
fn count_text(content: &str) -> (usize, usize) {
    (content.lines().count(), content.chars().count())
}

/// Absolute calendar timestamp with second precision, local time
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// High-contrast begin marker for grouped mode; every grouped block uses
/// the same uniform marker pair
pub fn grouped_begin_marker(relative: &Path, size: u64, modified: SystemTime) -> String {
    let boundary = "=".repeat(BOUNDARY_WIDTH);
    format!(
        "\n{boundary}\nFILE_BEGIN: {path}\nMETADATA: Size={size} bytes | Last_Modified={modified}\n{boundary}\n",
        boundary = boundary,
        path = relative.display(),
        size = size,
        modified = format_timestamp(modified),
    )
}

/// End-of-file marker for grouped mode, restating the relative path
pub fn grouped_end_marker(relative: &Path) -> String {
    format!(
        "\n\n[FILE_END: {}]\n{}\n",
        relative.display(),
        "#".repeat(BOUNDARY_WIDTH)
    )
}

/// Begin marker for single-file mode. The first file in the output uses
/// `=` boundary lines, every subsequent file uses `-`, so a reader can
/// tell where the preamble ends and the first file begins.
pub fn single_begin_marker(relative: &Path, size: u64, modified: SystemTime, first: bool) -> String {
    let boundary = if first { "=" } else { "-" }.repeat(BOUNDARY_WIDTH);
    format!(
        "{boundary}\nFILE: {path}\nSIZE: {size} bytes\nLAST MODIFIED: {modified}\n{boundary}\n\n",
        boundary = boundary,
        path = relative.display(),
        size = size,
        modified = format_timestamp(modified),
    )
}

/// Header written once at the start of the consolidated file: title,
/// generation timestamp, source and output paths, then the directory tree
pub fn consolidated_header(config: &Config) -> String {
    let boundary = "=".repeat(BOUNDARY_WIDTH);
    let tree = tree::render_tree(&config.source_root, &config.excluded_dirs);
    format!(
        "{boundary}\nCONSOLIDATED SOURCE EXPORT\nGenerated: {generated}\nSource: {source}\nOutput: {output}\n{boundary}\n\nDIRECTORY TREE\n--------------\n{tree}\n",
        boundary = boundary,
        generated = format_timestamp(SystemTime::now()),
        source = config.source_root.display(),
        output = config.target_display(),
        tree = tree,
    )
}
