/*!
 * Reporting functionality for textpack
 *
 * Accumulated run statistics are rendered as console tables (via the
 * tabled library) or JSON, and, in single-file mode, written out as a
 * standalone summary report next to the consolidated file.
 */

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use clap::ValueEnum;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::config::Config;
use crate::error::Result;
use crate::types::RunStatistics;
use crate::utils::format_file_size;
use crate::writer::format_timestamp;

/// Fixed name of the standalone summary report, written alongside the
/// consolidated output file
pub const SUMMARY_FILE_NAME: &str = "conversion_summary.txt";

/// Statistics for a completed run
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Output file (single-file mode) or output directory (grouped mode)
    pub target: String,
    /// Whether the run wrote extension-grouped outputs
    pub grouped: bool,
    /// Time taken to scan and write
    pub duration: Duration,
    /// Accumulated run statistics
    pub statistics: RunStatistics,
}

/// Format of the report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
    /// Machine-readable JSON on stdout
    Json,
}

impl Default for ReportFormat {
    fn default() -> Self {
        Self::ConsoleTable
    }
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Format a number with human-readable units
    fn format_number(&self, num: usize) -> String {
        if num >= 1_000_000 {
            format!("{:.1}M", num as f64 / 1_000_000.0)
        } else if num >= 1_000 {
            format!("{:.1}K", num as f64 / 1_000.0)
        } else {
            num.to_string()
        }
    }

    /// Generate a report string based on run statistics
    pub fn generate_report(&self, report: &ConversionReport) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(report),
            ReportFormat::Json => serde_json::to_string_pretty(report)
                .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ConversionReport) {
        println!("\n{}", self.generate_report(report));
    }

    // Shorten long paths for the console, keeping the trailing segments
    fn format_path(&self, path: &str, max_len: usize) -> String {
        if path.len() <= max_len {
            return path.to_string();
        }

        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() <= 2 {
            return format!("...{}", &path[path.len().saturating_sub(max_len - 3)..]);
        }

        // Keep the last few segments
        let mut current_len = 3; // Start with "..."
        let mut segments = Vec::new();
        for part in parts.iter().rev() {
            let part_len = part.len() + 1; // +1 for '/'
            if current_len + part_len <= max_len {
                segments.push(*part);
                current_len += part_len;
            } else {
                break;
            }
        }

        let mut result = String::from("...");
        for part in segments.iter().rev() {
            result.push('/');
            result.push_str(part);
        }
        result
    }

    // Create a summary table using the tabled crate
    fn create_summary_table(&self, report: &ConversionReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &report.statistics;
        let mut rows = Vec::new();

        rows.push(SummaryRow {
            key: "📂 Output".to_string(),
            value: report.target.clone(),
        });

        rows.push(SummaryRow {
            key: "⏱️ Process Time".to_string(),
            value: format!("{:.4?}", report.duration),
        });

        rows.push(SummaryRow {
            key: "📄 Files Scanned".to_string(),
            value: self.format_number(stats.files_scanned),
        });

        rows.push(SummaryRow {
            key: "✅ Converted".to_string(),
            value: self.format_number(stats.converted),
        });

        rows.push(SummaryRow {
            key: "⏭️ Skipped".to_string(),
            value: self.format_number(stats.skipped),
        });

        rows.push(SummaryRow {
            key: "❌ Errors".to_string(),
            value: self.format_number(stats.errors),
        });

        rows.push(SummaryRow {
            key: "📝 Total Lines".to_string(),
            value: self.format_number(stats.total_lines),
        });

        rows.push(SummaryRow {
            key: "🔤 Total Characters".to_string(),
            value: self.format_number(stats.total_chars),
        });

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Create a per-extension groups table (grouped mode)
    fn create_groups_table(&self, report: &ConversionReport) -> String {
        #[derive(Tabled)]
        struct GroupRow {
            #[tabled(rename = "Type")]
            group: String,

            #[tabled(rename = "Files")]
            files: String,

            #[tabled(rename = "Output File")]
            output: String,
        }

        let rows: Vec<GroupRow> = report
            .statistics
            .groups
            .iter()
            .map(|(ext, count)| GroupRow {
                group: ext.to_uppercase(),
                files: self.format_number(*count),
                output: format!("{}_logic_group.txt", ext),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Create a largest-files table using the tabled crate
    fn create_files_table(&self, report: &ConversionReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Size")]
            size: String,

            #[tabled(rename = "Lines")]
            lines: String,

            #[tabled(rename = "Characters")]
            chars: String,
        }

        // Sort files by character count
        let mut files: Vec<_> = report.statistics.file_details.iter().collect();
        files.sort_by(|(pa, a), (pb, b)| b.chars.cmp(&a.chars).then(pa.cmp(pb)));

        // Show all files or just the top 10
        let files_to_show = if files.len() > 15 {
            &files[0..10]
        } else {
            &files[..]
        };

        let rows: Vec<FileRow> = files_to_show
            .iter()
            .map(|(path, info)| FileRow {
                path: self.format_path(path, 60),
                size: format_file_size(info.size),
                lines: self.format_number(info.lines),
                chars: self.format_number(info.chars),
            })
            .collect();

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    // Generate a console table report
    fn generate_console_report(&self, report: &ConversionReport) -> String {
        let summary_title = "✅  CONVERSION COMPLETE";
        let summary_table = self.create_summary_table(report);

        if report.grouped {
            let groups_title = "📦  EXTENSION GROUPS";
            let groups_table = self.create_groups_table(report);
            return format!(
                "{}\n{}\n\n{}\n{}",
                groups_title, groups_table, summary_title, summary_table
            );
        }

        let files_table = self.create_files_table(report);
        let files_title = if report.statistics.file_details.len() > 15 {
            "📋  TOP 10 LARGEST FILES BY CHARACTER COUNT"
        } else {
            "📋  CONVERTED FILES"
        };

        format!(
            "{}\n{}\n\n{}\n{}",
            files_title, files_table, summary_title, summary_table
        )
    }

    /// Write the standalone summary report (single-file mode only).
    /// Returns the path written, or None in grouped mode.
    pub fn write_summary_file(
        &self,
        config: &Config,
        report: &ConversionReport,
    ) -> Result<Option<PathBuf>> {
        let path = match config.summary_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        let stats = &report.statistics;

        let file = File::create(&path)?;
        let mut out = BufWriter::new(file);

        writeln!(out, "CONVERSION SUMMARY")?;
        writeln!(out, "Generated: {}", format_timestamp(SystemTime::now()))?;
        writeln!(out, "Source: {}", config.source_root.display())?;
        writeln!(out, "Output: {}", report.target)?;
        writeln!(out)?;
        writeln!(out, "Files scanned:    {}", stats.files_scanned)?;
        writeln!(out, "Converted:        {}", stats.converted)?;
        writeln!(out, "Skipped:          {}", stats.skipped)?;
        writeln!(out, "Errors:           {}", stats.errors)?;
        writeln!(out, "Total lines:      {}", stats.total_lines)?;
        writeln!(out, "Total characters: {}", stats.total_chars)?;
        writeln!(out)?;

        writeln!(out, "SKIPPED FILES")?;
        writeln!(out, "-------------")?;
        if stats.skipped_files.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for skipped in &stats.skipped_files {
            writeln!(out, "  {} ({})", skipped.path, skipped.reason)?;
        }
        writeln!(out)?;

        writeln!(out, "ERRORS")?;
        writeln!(out, "------")?;
        if stats.errored_files.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for errored in &stats.errored_files {
            writeln!(out, "  {}: {}", errored.path, errored.message)?;
        }

        out.flush()?;
        Ok(Some(path))
    }
}
