//! # cscan-files
//!
//! Finds the C source files under one or more roots, ready to be handed to
//! `cscan_parser::iter_variables` one path at a time.
//!
//! ```no_run
//! use cscan_files::{FileFilter, iter_files};
//!
//! let files = iter_files(&["Modules", "Objects"], &FileFilter::default()).expect("walk");
//! for path in files {
//!     println!("{}", path.display());
//! }
//! ```

mod error;
mod walk;

pub use error::FilesError;

use cscan_config::{ScanConfig, is_valid_suffix};
use std::path::{Path, PathBuf};

/// File name suffixes of C sources and headers.
pub const C_SOURCE_SUFFIXES: &[&str] = &[".c", ".h"];

/// Which walked files are reported, and how their paths are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    /// Keep files whose name ends with one of these.
    pub suffixes: Vec<String>,
    /// Drop files under these subtrees.
    pub excluded_trees: Vec<PathBuf>,
    /// Report paths relative to this directory.
    pub relative_to: Option<PathBuf>,
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new(C_SOURCE_SUFFIXES)
    }
}

impl FileFilter {
    pub fn new<S: AsRef<str>>(suffixes: &[S]) -> Self {
        Self {
            suffixes: suffixes.iter().map(|s| s.as_ref().to_string()).collect(),
            excluded_trees: Vec::new(),
            relative_to: None,
        }
    }

    #[must_use]
    pub fn from_config(config: &ScanConfig) -> Self {
        Self {
            suffixes: config.source.suffixes.clone(),
            excluded_trees: config
                .source
                .excluded_trees
                .iter()
                .map(PathBuf::from)
                .collect(),
            relative_to: config.source.relative_to.clone(),
        }
    }

    #[must_use]
    pub fn exclude_tree(mut self, tree: impl Into<PathBuf>) -> Self {
        self.excluded_trees.push(tree.into());
        self
    }

    #[must_use]
    pub fn relative_to(mut self, dir: impl Into<PathBuf>) -> Self {
        self.relative_to = Some(dir.into());
        self
    }

    fn validate(&self) -> Result<(), FilesError> {
        if self.suffixes.is_empty() {
            return Err(FilesError::InvalidArgument(
                "at least one suffix is required".to_string(),
            ));
        }
        if let Some(bad) = self.suffixes.iter().find(|s| !is_valid_suffix(s)) {
            return Err(FilesError::InvalidArgument(format!(
                "'{bad}' is not a '.'-prefixed file suffix"
            )));
        }
        Ok(())
    }

    fn matches_suffix(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| name.to_string_lossy())
            .is_some_and(|name| self.suffixes.iter().any(|s| name.ends_with(s.as_str())))
    }

    /// `path` relative to `relative_to`; paths outside it are kept as walked.
    fn resolve(&self, path: &Path) -> PathBuf {
        self.relative_to
            .as_deref()
            .and_then(|base| path.strip_prefix(base).ok())
            .unwrap_or(path)
            .to_path_buf()
    }

    fn is_excluded(&self, tree_path: &Path) -> bool {
        self.excluded_trees
            .iter()
            .any(|tree| tree_path.starts_with(tree))
    }
}

/// Collect the files under each root that `filter` selects.
///
/// Roots are walked in the order given; files within a root come out in
/// file name order.
///
/// # Errors
/// Returns [`FilesError::InvalidArgument`] for an empty root list, a root
/// that does not exist, or unusable suffixes. Nothing is walked in that case.
pub fn iter_files<P: AsRef<Path>>(
    roots: &[P],
    filter: &FileFilter,
) -> Result<Vec<PathBuf>, FilesError> {
    check_roots(roots)?;
    filter.validate()?;
    Ok(roots
        .iter()
        .flat_map(|root| walk::walk_root(root.as_ref(), filter))
        .collect())
}

/// Like [`iter_files`], but grouped by suffix in the order given.
///
/// # Errors
/// Same as [`iter_files`]; `suffixes` replaces the filter's own suffixes.
pub fn iter_files_by_suffix<P: AsRef<Path>, S: AsRef<str>>(
    roots: &[P],
    suffixes: &[S],
    filter: &FileFilter,
) -> Result<Vec<PathBuf>, FilesError> {
    check_roots(roots)?;
    FileFilter::new(suffixes).validate()?;
    let mut files = Vec::new();
    for suffix in suffixes {
        let single = FileFilter {
            suffixes: vec![suffix.as_ref().to_string()],
            ..filter.clone()
        };
        files.extend(iter_files(roots, &single)?);
    }
    Ok(files)
}

fn check_roots<P: AsRef<Path>>(roots: &[P]) -> Result<(), FilesError> {
    if roots.is_empty() {
        return Err(FilesError::InvalidArgument(
            "at least one root is required".to_string(),
        ));
    }
    for root in roots {
        let root: &Path = root.as_ref();
        if !root.exists() {
            return Err(FilesError::InvalidArgument(format!(
                "root does not exist: {}",
                root.display()
            )));
        }
    }
    Ok(())
}
