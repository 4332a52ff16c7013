//! Process-scoped staging directory for bundles and patched catalogs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Staging directory laid out as `<root>/<pack base name>/<file name>`.
///
/// Created once per run. [`StagingArea::teardown`] removes every written
/// file and then the root directory.
#[derive(Debug)]
pub struct StagingArea {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl StagingArea {
    /// Create (or reuse) the staging root.
    ///
    /// The root is canonicalized so staged locations are absolute.
    pub fn create(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref();
        if !root.exists() {
            debug!(path = %root.display(), "Creating staging folder");
        }
        fs::create_dir_all(root)?;
        let root = fs::canonicalize(root)?;

        Ok(Self {
            root,
            written: Vec::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Subdirectory holding one pack's files.
    pub fn pack_dir(&self, pack: &str) -> PathBuf {
        self.root.join(pack)
    }

    /// Location a file of a pack is (or would be) staged at.
    pub fn staged_path(&self, pack: &str, file_name: &str) -> PathBuf {
        self.pack_dir(pack).join(file_name)
    }

    /// Write a file into a pack's subdirectory, replacing any existing one.
    pub fn write_file(&mut self, pack: &str, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let dir = self.pack_dir(pack);
        fs::create_dir_all(&dir)?;

        let path = dir.join(file_name);
        fs::write(&path, bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "Staged file written");

        if !self.written.contains(&path) {
            self.written.push(path.clone());
        }
        Ok(path)
    }

    /// Files written during this run, in write order.
    pub fn written_files(&self) -> &[PathBuf] {
        &self.written
    }

    /// Delete the staged files, then the root directory.
    ///
    /// Returns the number of staged files removed.
    pub fn teardown(&mut self) -> io::Result<usize> {
        let mut removed = 0;
        for path in self.written.drain(..) {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }

        remove_dir(&self.root)?;
        debug!(path = %self.root.display(), removed, "Staging folder removed");
        Ok(removed)
    }
}

/// Remove a staging folder left over from an earlier run.
///
/// Returns `false` when there was nothing to remove.
pub fn remove_staging_folder(root: &Path) -> io::Result<bool> {
    if !root.exists() {
        return Ok(false);
    }
    remove_dir(root)?;
    Ok(true)
}

fn remove_dir(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_makes_absolute_root() {
        let temp = TempDir::new().unwrap();
        let staging = StagingArea::create(temp.path().join("_staging")).unwrap();

        assert!(staging.root().is_absolute());
        assert!(staging.root().is_dir());
    }

    #[test]
    fn test_write_file_layout_and_overwrite() {
        let temp = TempDir::new().unwrap();
        let mut staging = StagingArea::create(temp.path().join("_staging")).unwrap();

        let path = staging.write_file("Tools", "items.bundle", b"first").unwrap();
        assert_eq!(path, staging.root().join("Tools").join("items.bundle"));

        staging.write_file("Tools", "items.bundle", b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
        assert_eq!(staging.written_files().len(), 1);
    }

    #[test]
    fn test_teardown_removes_everything() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("_staging");
        let mut staging = StagingArea::create(&root).unwrap();
        staging.write_file("A", "a.bundle", b"a").unwrap();
        staging.write_file("B", "catalog.json", b"{}").unwrap();

        assert_eq!(staging.teardown().unwrap(), 2);
        assert!(!root.exists());
        assert!(staging.written_files().is_empty());
    }

    #[test]
    fn test_remove_staging_folder() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("_staging");
        assert!(!remove_staging_folder(&root).unwrap());

        fs::create_dir_all(root.join("A")).unwrap();
        assert!(remove_staging_folder(&root).unwrap());
        assert!(!root.exists());
    }
}
