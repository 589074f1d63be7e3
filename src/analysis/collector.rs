use crate::analysis::types::FileRecord;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};
use walkdir::WalkDir;

const MAX_FILE_SIZE: u64 = 1024 * 1024;
const MAX_TEXT_READ_SIZE: u64 = 100 * 1024;
const BINARY_SNIFF_LEN: usize = 1024;

/// Directory names pruned from traversal. Neither the directories nor
/// anything under them is visited.
pub const IGNORED_DIRS: &[&str] = &[
    ".git",
    ".venv",
    "venv",
    "node_modules",
    "target",
    "build",
    "dist",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    "vendor",
];

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),
    #[error("Path is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Failed to resolve path {path}: {source}")]
    PathResolution {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub max_file_size: u64,
    pub max_text_read_size: u64,
    pub ignored_dirs: Vec<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            max_text_read_size: MAX_TEXT_READ_SIZE,
            ignored_dirs: IGNORED_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CollectorConfig {
    fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == name)
    }
}

/// Walks a project root and produces one [`FileRecord`] per regular file.
///
/// Individual unreadable files are skipped or recorded without content;
/// only a missing or non-directory root fails the whole collection.
pub struct FileCollector {
    config: CollectorConfig,
}

impl Default for FileCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl FileCollector {
    pub fn new() -> Self {
        Self {
            config: CollectorConfig::default(),
        }
    }

    pub fn with_config(config: CollectorConfig) -> Self {
        Self { config }
    }

    pub fn collect(&self, root: &Path) -> Result<Vec<FileRecord>, AnalysisError> {
        if !root.exists() {
            return Err(AnalysisError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(AnalysisError::NotADirectory(root.to_path_buf()));
        }

        let canonical_root = root
            .canonicalize()
            .map_err(|source| AnalysisError::PathResolution {
                path: root.to_path_buf(),
                source,
            })?;

        let mut records = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                if e.depth() == 0 {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                !(e.file_type().is_dir() && self.config.is_ignored_dir(&name))
            })
        {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    trace!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };

            // Path::is_file follows symlinks, so a link to a regular file
            // is considered here and filtered by the containment check below.
            if !entry.path().is_file() {
                continue;
            }

            // Files must resolve strictly inside the root; a symlink
            // escaping the tree is skipped, not an error.
            let resolved = match entry.path().canonicalize() {
                Ok(p) => p,
                Err(e) => {
                    trace!(path = %entry.path().display(), error = %e, "cannot resolve file");
                    continue;
                }
            };
            if !resolved.starts_with(&canonical_root) {
                debug!(path = %entry.path().display(), "file resolves outside root, skipping");
                continue;
            }

            let size = match fs::metadata(entry.path()) {
                Ok(m) => m.len(),
                Err(e) => {
                    trace!(path = %entry.path().display(), error = %e, "cannot stat file");
                    continue;
                }
            };
            if size > self.config.max_file_size {
                debug!(path = %entry.path().display(), size, "file exceeds size limit, skipping");
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .unwrap_or(entry.path())
                .to_path_buf();

            let is_binary = sniff_binary(entry.path());
            let mut record = FileRecord::new(relative, size);
            if is_binary {
                record = record.binary();
            } else if size < self.config.max_text_read_size {
                match fs::read_to_string(entry.path()) {
                    Ok(content) => record = record.with_content(content),
                    Err(e) => {
                        trace!(path = %entry.path().display(), error = %e, "content not readable as text");
                    }
                }
            }

            records.push(record);
        }

        debug!(root = %root.display(), files = records.len(), "collection complete");
        Ok(records)
    }
}

/// A file is treated as binary when its first bytes contain a NUL.
/// Unreadable files are treated as binary rather than failing collection.
fn sniff_binary(path: &Path) -> bool {
    let mut buf = [0u8; BINARY_SNIFF_LEN];
    match fs::File::open(path).and_then(|mut f| f.read(&mut buf)) {
        Ok(n) => buf[..n].contains(&0),
        Err(_) => true,
    }
}
