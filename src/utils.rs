/*!
 * Utility functions and default filter lists for textpack
 */

use std::fs;
use std::io;
use std::path::Path;

use once_cell::sync::Lazy;

/// Default allow-list for grouped mode
pub static DEFAULT_GROUPED_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".html", ".json", ".js", ".css", ".yml", ".yaml", ".ts", ".py", ".md",
    ]
});

/// Default excluded directory names for grouped mode
pub static DEFAULT_GROUPED_EXCLUDED_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "node_modules",
        ".git",
        "dist",
        "build",
        "coverage",
        ".qodo",
    ]
});

/// Default allow-list for single-file mode
pub static DEFAULT_SINGLE_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".html", ".json", ".js", ".css", ".njk", ".yml", ".yaml", ".ts", ".tsx", ".jsx", ".vue",
        ".java", ".c", ".cpp", ".h", ".cs", ".rb", ".go", ".rs", ".php", ".sh", ".xml", ".csv",
    ]
});

/// Default deny-list for single-file mode; takes precedence over the
/// allow-list
pub static DEFAULT_SINGLE_EXCLUDED_EXTENSIONS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        ".png", ".jpg", ".jpeg", ".svg", ".mp4", ".webm", ".ico", ".woff", ".woff2", ".txt",
        ".py", ".md",
    ]
});

/// Default excluded directory names for single-file mode. Some entries look
/// like extensions; they are matched as literal directory names.
pub static DEFAULT_SINGLE_EXCLUDED_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "node_modules",
        "codeReview",
        ".git",
        ".clinerules",
        ".txt",
        ".md",
        ".py",
    ]
});

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

/// Read a file as text.
///
/// Bytes are decoded as UTF-8 first; when that fails the whole file is
/// re-decoded as Latin-1, where every byte maps to a char, so decoding
/// itself never fails once the bytes have been read.
pub fn read_to_text(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(err) => Ok(err.into_bytes().iter().map(|&b| b as char).collect()),
    }
}
