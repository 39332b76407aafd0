/*!
 * ASCII directory tree rendering for the single-file header
 */

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Render the source root as an ASCII tree.
///
/// The root is a single `.` line; siblings are listed in sorted order at
/// each level with `├── `/`└── ` connectors. Directories whose name is in
/// `excluded_dirs` are omitted together with their subtrees, matching the
/// traversal engine. Unreadable directories render as empty.
pub fn render_tree(root: &Path, excluded_dirs: &BTreeSet<String>) -> String {
    let mut out = String::from(".\n");
    render_children(root, excluded_dirs, "", &mut out);
    out
}

fn render_children(dir: &Path, excluded_dirs: &BTreeSet<String>, prefix: &str, out: &mut String) {
    let mut entries = match sorted_entries(dir) {
        Some(entries) => entries,
        None => return,
    };
    entries.retain(|entry| !(entry.is_dir && excluded_dirs.contains(&entry.name)));

    let count = entries.len();
    for (index, entry) in entries.iter().enumerate() {
        let is_last = index + 1 == count;
        let connector = if is_last { "└── " } else { "├── " };

        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(&entry.name);
        out.push('\n');

        if entry.is_dir {
            let child_prefix = if is_last {
                format!("{}    ", prefix)
            } else {
                format!("{}│   ", prefix)
            };
            render_children(&entry.path, excluded_dirs, &child_prefix, out);
        }
    }
}

struct TreeEntry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

fn sorted_entries(dir: &Path) -> Option<Vec<TreeEntry>> {
    let read_dir = fs::read_dir(dir).ok()?;
    let mut entries: Vec<TreeEntry> = read_dir
        .filter_map(|entry| entry.ok())
        .map(|entry| {
            let path = entry.path();
            let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
            TreeEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                is_dir,
            }
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Some(entries)
}
