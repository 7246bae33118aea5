//! Project file scanning.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into.
pub const IGNORED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "__pycache__",
    ".netlify",
    "venv",
    ".venv",
];

fn is_ignored_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| IGNORED_DIRS.contains(&name))
            .unwrap_or(false)
}

/// Render a path relative to `root` with `/` separators.
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// List every file under `root` as a sorted, `/`-separated relative path.
///
/// Unreadable entries are skipped.
pub fn scan_files(root: &Path) -> Vec<String> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                tracing::debug!("Skipping unreadable entry: {}", err);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| relative_path(root, e.path()))
        .collect()
}

/// Find the first file whose name equals `file_name`, honouring the ignore list.
pub fn find_by_name(root: &Path, file_name: &str) -> Option<std::path::PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_ignored_dir(e))
        .filter_map(|e| e.ok())
        .find(|e| e.file_type().is_file() && e.file_name().to_str() == Some(file_name))
        .map(|e| e.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scan_lists_nested_files_with_forward_slashes() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("netlify/functions")).unwrap();
        fs::write(temp.path().join("index.html"), "").unwrap();
        fs::write(temp.path().join("netlify/functions/hello.py"), "").unwrap();

        let files = scan_files(temp.path());
        assert_eq!(files, vec!["index.html", "netlify/functions/hello.py"]);
    }

    #[test]
    fn scan_skips_ignored_dirs() {
        let temp = TempDir::new().unwrap();
        for dir in IGNORED_DIRS {
            fs::create_dir_all(temp.path().join(dir)).unwrap();
            fs::write(temp.path().join(dir).join("junk.js"), "").unwrap();
        }
        fs::write(temp.path().join("app.js"), "").unwrap();

        let files = scan_files(temp.path());
        assert_eq!(files, vec!["app.js"]);
    }

    #[test]
    fn scan_does_not_ignore_root_named_like_ignored_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("venv");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join("main.py"), "").unwrap();

        assert_eq!(scan_files(&root), vec!["main.py"]);
    }

    #[test]
    fn find_by_name_searches_subdirectories() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("src/api")).unwrap();
        fs::write(temp.path().join("src/api/handler.py"), "print()").unwrap();

        let found = find_by_name(temp.path(), "handler.py").unwrap();
        assert!(found.ends_with("src/api/handler.py"));
        assert!(find_by_name(temp.path(), "missing.py").is_none());
    }

    #[test]
    fn find_by_name_skips_node_modules() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("node_modules/pkg")).unwrap();
        fs::write(temp.path().join("node_modules/pkg/index.js"), "").unwrap();

        assert!(find_by_name(temp.path(), "index.js").is_none());
    }
}
