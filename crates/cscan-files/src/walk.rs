//! Directory walking with the `ignore` crate.
//!
//! Source trees are walked raw: no `.gitignore`, no hidden-file filtering.
//! A C tree routinely keeps generated or vendored sources behind ignore
//! rules, and those still count as sources.

use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::FileFilter;

/// Build a walker over `root` that sees every file, in file name order.
pub(crate) fn build_walker(root: &Path) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.hidden(false);
    builder.sort_by_file_name(|a, b| a.cmp(b));
    builder.build()
}

/// Walk one root and keep the files `filter` selects, resolved for output.
pub(crate) fn walk_root(root: &Path, filter: &FileFilter) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for entry in build_walker(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(root = %root.display(), %error, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if !filter.matches_suffix(path) {
            continue;
        }
        let resolved = filter.resolve(path);
        let tree_path = if filter.relative_to.is_some() {
            resolved.as_path()
        } else {
            path.strip_prefix(root).unwrap_or(path)
        };
        if filter.is_excluded(tree_path) {
            tracing::trace!(path = %path.display(), "excluded tree");
            continue;
        }
        files.push(resolved);
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn raw_walk_sees_hidden_and_ignored_files() {
        let tmp = tempfile::tempdir().expect("temp dir");
        fs::create_dir_all(tmp.path().join("build")).expect("mkdir");
        fs::write(tmp.path().join(".gitignore"), "build/\n").expect("write");
        fs::write(tmp.path().join("build/generated.c"), "int g;").expect("write");
        fs::write(tmp.path().join(".hidden.c"), "int h;").expect("write");

        let entries: Vec<PathBuf> = build_walker(tmp.path())
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()))
            .map(|e| e.path().strip_prefix(tmp.path()).expect("under root").to_path_buf())
            .collect();

        assert!(entries.contains(&PathBuf::from("build/generated.c")));
        assert!(entries.contains(&PathBuf::from(".hidden.c")));
    }

    #[test]
    fn walk_order_is_by_file_name() {
        let tmp = tempfile::tempdir().expect("temp dir");
        for name in ["c.c", "a.c", "b.c"] {
            fs::write(tmp.path().join(name), "").expect("write");
        }

        let files = walk_root(tmp.path(), &FileFilter::default());

        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.c", "b.c", "c.c"]);
    }
}
