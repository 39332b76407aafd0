/*!
 * Configuration handling for textpack
 */

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;
use clap_complete::Shell;

use crate::error::Result;
use crate::report::{ReportFormat, SUMMARY_FILE_NAME};
use crate::types::SkipReason;
use crate::utils::{
    DEFAULT_SINGLE_EXCLUDED_DIRS, DEFAULT_SINGLE_EXCLUDED_EXTENSIONS, DEFAULT_SINGLE_EXTENSIONS,
    DEFAULT_GROUPED_EXCLUDED_DIRS, DEFAULT_GROUPED_EXTENSIONS,
};
use crate::{bail, ensure};

/// Command-line arguments for textpack (single-file variant)
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "textpack",
    version = env!("CARGO_PKG_VERSION"),
    about = "Concatenate directory trees into annotated plain-text bundles",
    long_about = "Walks a directory tree and concatenates source files into one consolidated \
text file, annotated with per-file boundary markers (path, size, modification time) and a \
directory-tree header, plus a standalone summary report."
)]
pub struct Args {
    /// Source directory to scan
    #[clap(long, default_value = ".")]
    pub source: String,

    /// Consolidated output file
    #[clap(long, default_value = "consolidated_output.txt")]
    pub output: String,

    /// Comma-separated list of extensions to convert (overrides the default allow-list)
    #[clap(long, value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Comma-separated list of extensions to exclude (overrides the default deny-list)
    #[clap(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Comma-separated list of directory names to skip entirely
    #[clap(long, value_delimiter = ',')]
    pub exclude_dirs: Vec<String>,

    /// Report output format
    #[clap(long, value_enum, default_value_t = ReportFormat::default())]
    pub report_format: ReportFormat,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Where formatted blocks are persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// One `<ext>_logic_group.txt` per extension inside this directory
    GroupedDir(PathBuf),
    /// One consolidated file, truncated once at run start
    SingleFile(PathBuf),
}

/// Application configuration, validated once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory subtree being scanned
    pub source_root: PathBuf,

    /// Output destination and mode
    pub target: OutputTarget,

    /// Extensions eligible for conversion, lowercased with leading dot
    pub allow_list: BTreeSet<String>,

    /// Extensions excluded from conversion; takes precedence over the
    /// allow-list
    pub deny_list: BTreeSet<String>,

    /// Literal directory names pruned before descent
    pub excluded_dirs: BTreeSet<String>,

    /// Console report format
    pub report_format: ReportFormat,
}

impl Config {
    /// Create a single-file-mode configuration from command-line arguments
    pub fn from_args(args: Args) -> Self {
        let allow_list = if args.extensions.is_empty() {
            default_set(&DEFAULT_SINGLE_EXTENSIONS)
        } else {
            normalize_extensions(&args.extensions)
        };
        let deny_list = if args.exclude.is_empty() {
            default_set(&DEFAULT_SINGLE_EXCLUDED_EXTENSIONS)
        } else {
            normalize_extensions(&args.exclude)
        };
        let excluded_dirs = if args.exclude_dirs.is_empty() {
            default_set(&DEFAULT_SINGLE_EXCLUDED_DIRS)
        } else {
            args.exclude_dirs.iter().map(|d| d.trim().to_string()).collect()
        };

        Self {
            source_root: PathBuf::from(args.source),
            target: OutputTarget::SingleFile(PathBuf::from(args.output)),
            allow_list,
            deny_list,
            excluded_dirs,
            report_format: args.report_format,
        }
    }

    /// Create a grouped-mode configuration. The grouped variant takes no
    /// command-line arguments; embedders fix source root and output
    /// directory at invocation time.
    pub fn grouped(source_root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            target: OutputTarget::GroupedDir(output_dir.into()),
            allow_list: default_set(&DEFAULT_GROUPED_EXTENSIONS),
            deny_list: BTreeSet::new(),
            excluded_dirs: default_set(&DEFAULT_GROUPED_EXCLUDED_DIRS),
            report_format: ReportFormat::default(),
        }
    }

    /// Create a single-file-mode configuration with default lists, for
    /// embedders and tests
    pub fn single_file(source_root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            target: OutputTarget::SingleFile(output.into()),
            allow_list: default_set(&DEFAULT_SINGLE_EXTENSIONS),
            deny_list: default_set(&DEFAULT_SINGLE_EXCLUDED_EXTENSIONS),
            excluded_dirs: default_set(&DEFAULT_SINGLE_EXCLUDED_DIRS),
            report_format: ReportFormat::default(),
        }
    }

    /// Validate the configuration. Fails only for conditions that make the
    /// whole run impossible.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.source_root.exists() && self.source_root.is_dir(),
            Config,
            "Source directory not found: {}",
            self.source_root.display()
        );

        if let OutputTarget::SingleFile(path) = &self.target {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    bail!(
                        Config,
                        "Output directory not found: {}",
                        parent.display()
                    );
                }
            }
        }

        Ok(())
    }

    /// The Filter: classify an extension against the deny- and allow-lists.
    /// Returns `None` when the file is eligible for conversion; the final
    /// emptiness check happens at read time.
    pub fn classify(&self, extension: &str) -> Option<SkipReason> {
        if self.deny_list.contains(extension) {
            return Some(SkipReason::ExcludedExtension);
        }
        if !self.allow_list.contains(extension) {
            return Some(SkipReason::UnsupportedExtension);
        }
        None
    }

    /// Path of the standalone summary report, single-file mode only
    pub fn summary_path(&self) -> Option<PathBuf> {
        match &self.target {
            OutputTarget::SingleFile(path) => Some(path.with_file_name(SUMMARY_FILE_NAME)),
            OutputTarget::GroupedDir(_) => None,
        }
    }

    /// Output destination rendered for reports
    pub fn target_display(&self) -> String {
        match &self.target {
            OutputTarget::SingleFile(path) => path.display().to_string(),
            OutputTarget::GroupedDir(dir) => dir.display().to_string(),
        }
    }

    /// True when the target is an extension-grouped directory
    pub fn is_grouped(&self) -> bool {
        matches!(self.target, OutputTarget::GroupedDir(_))
    }
}

/// Normalize a user-supplied extension: lowercased, leading dot added when
/// missing. Empty entries are dropped.
pub fn normalize_extension(raw: &str) -> String {
    let ext = raw.trim().to_ascii_lowercase();
    if ext.is_empty() || ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

fn normalize_extensions(raw: &[String]) -> BTreeSet<String> {
    raw.iter()
        .map(|e| normalize_extension(e))
        .filter(|e| !e.is_empty())
        .collect()
}

fn default_set(defaults: &[&str]) -> BTreeSet<String> {
    defaults.iter().map(|s| s.to_string()).collect()
}
