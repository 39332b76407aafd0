/*!
 * Command-line interface for textpack (single-file variant)
 */

use std::io;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use textpack::config::{Args, Config};
use textpack::report::{ReportFormat, Reporter};

fn main() {
    let args = Args::parse();

    // Generate shell completions and exit
    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        clap_complete::generate(shell, &mut cmd, "textpack", &mut io::stdout());
        return;
    }

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> textpack::Result<()> {
    let config = Config::from_args(args);
    config.validate()?;

    // Progress bar with the length filled in once the scan has counted files
    let progress = ProgressBar::new(0);
    progress.set_style(ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) ⏱️  Elapsed: {elapsed_precise}")
        .unwrap());
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📊 Processing");
    progress.set_message(format!(
        "📂 Scanning directory: {}",
        config.source_root.display()
    ));
    let progress = Arc::new(progress);

    let report = textpack::run(&config, Arc::clone(&progress))?;

    progress.finish_and_clear();

    let reporter = Reporter::new(config.report_format);
    reporter.print_report(&report);

    if let Some(path) = reporter.write_summary_file(&config, &report)? {
        if config.report_format == ReportFormat::ConsoleTable {
            println!("Summary report written to {}", path.display());
        }
    }

    Ok(())
}
