//! Pack archive discovery.
//!
//! Archives are returned sorted ascending by full path. The order decides
//! which pack wins when two packs register a descriptor under the same
//! name: the later-sorted pack is processed last and overwrites.
//!
//! ```text
//! Mods/
//! ├── _ModComponentTemp/         # staging folder, never scanned
//! ├── A-Tools.modcomponent       # processed first
//! ├── extras/
//! │   └── B-Food.modcomponent    # recursive mode only
//! └── C-Clothing.modcomponent    # processed last, wins collisions
//! ```

use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::DEFAULT_PACK_EXTENSION;

/// Discovers content pack archives under a root directory.
#[derive(Debug, Clone)]
pub struct ArchiveScanner {
    /// Root directory to scan.
    root: PathBuf,

    /// Whether subdirectories are scanned.
    recursive: bool,

    /// Accepted extensions, lowercase, without the dot.
    extensions: Vec<String>,

    /// Directories that are never descended into.
    excluded: Vec<PathBuf>,
}

impl ArchiveScanner {
    /// Create a non-recursive scanner accepting the default pack extension.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: false,
            extensions: vec![DEFAULT_PACK_EXTENSION.to_string()],
            excluded: Vec::new(),
        }
    }

    /// Enable or disable recursive scanning.
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Replace the extension allow-list.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Never descend into the given directory (e.g. the staging area).
    pub fn excluding(mut self, dir: impl Into<PathBuf>) -> Self {
        self.excluded.push(dir.into());
        self
    }

    /// Get the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Check if the root directory exists.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// Find all pack archives, sorted ascending by full path.
    ///
    /// A missing root yields an empty list. Unreadable subdirectories are
    /// logged and skipped; only an unreadable root is an error.
    pub fn find_archives(&self) -> io::Result<Vec<PathBuf>> {
        if !self.exists() {
            debug!(root = %self.root.display(), "Mods directory does not exist");
            return Ok(Vec::new());
        }

        let mut archives = Vec::new();
        self.collect(&self.root, &mut archives)?;

        archives.sort();

        Ok(archives)
    }

    /// Whether a file name carries an accepted extension (case-insensitive).
    pub fn is_pack_archive(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.iter().any(|allowed| *allowed == ext))
    }

    fn collect(&self, dir: &Path, archives: &mut Vec<PathBuf>) -> io::Result<()> {
        for entry in std::fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Skipping unreadable directory entry");
                    continue;
                }
            };
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            // Skip hidden files and folders
            if name.starts_with('.') {
                continue;
            }

            if path.is_dir() {
                if !self.recursive || self.excluded.iter().any(|ex| *ex == path) {
                    continue;
                }
                if let Err(e) = self.collect(&path, archives) {
                    warn!(dir = %path.display(), error = %e, "Skipping unreadable directory");
                }
            } else if self.is_pack_archive(&path) {
                archives.push(path);
            }
        }

        Ok(())
    }
}
