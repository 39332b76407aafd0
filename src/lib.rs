/*!
 * TextPack - Concatenate directory trees into annotated plain-text bundles
 *
 * This library walks a source tree and concatenates matching files into
 * aggregated text outputs with high-visibility boundary markers, so the
 * result can be parsed back into per-file boundaries by humans or
 * text-processing pipelines.
 *
 * Two modes share one implementation:
 *
 * - **Grouped**: one `<ext>_logic_group.txt` per extension inside an output
 *   directory, appended to across runs. Configured programmatically:
 *
 *   ```no_run
 *   use std::sync::Arc;
 *   use indicatif::ProgressBar;
 *   use textpack::Config;
 *
 *   let config = Config::grouped(".", "ai_logic_review");
 *   let report = textpack::run(&config, Arc::new(ProgressBar::hidden())).unwrap();
 *   println!("{} files converted", report.statistics.converted);
 *   ```
 *
 * - **Single-file**: one consolidated file with a directory-tree header plus
 *   a `conversion_summary.txt` report, regenerated from scratch each run.
 *   This is the mode the `textpack` binary exposes.
 */

pub mod config;
pub mod error;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Args, Config, OutputTarget};
pub use error::{Result, TextPackError};
pub use report::{ConversionReport, ReportFormat, Reporter, SUMMARY_FILE_NAME};
pub use scanner::Scanner;
pub use types::{
    ConversionResult, FileRecord, Outcome, OutputGroup, RunStatistics, SkipReason,
};
pub use utils::format_file_size;
pub use writer::TextWriter;

use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run a full conversion: validate, scan, write, and return the report.
///
/// This is the single entry point shared by the CLI and by embedders of the
/// grouped variant. Per-file failures are recorded in the statistics; an
/// error return means the run itself could not proceed.
pub fn run(config: &Config, progress: Arc<ProgressBar>) -> Result<ConversionReport> {
    config.validate()?;

    let start_time = Instant::now();

    let scanner = Scanner::new(config.clone(), Arc::clone(&progress));
    let records = scanner.collect()?;
    progress.set_length(records.len() as u64);

    let writer = TextWriter::new(config.clone(), Arc::clone(&progress));
    let statistics = writer.write(&records)?;

    Ok(ConversionReport {
        target: config.target_display(),
        grouped: config.is_grouped(),
        duration: start_time.elapsed(),
        statistics,
    })
}
