//! Content pack identity and status.
//!
//! A content pack is one archive contributed by a third party. This module
//! holds the pieces of pack state that outlive a single archive walk:
//!
//! - [`ContentHash`]: SHA-256 of the raw archive, taken before extraction
//! - [`FaultRegistry`]: `Working` / `Failed` status per pack, first failure wins
//! - [`BuildInfo`]: optional identification from `buildinfo.json`

mod build_info;
mod hash;
mod status;

pub use build_info::BuildInfo;
pub use hash::{hash_archive, ContentHash};
pub use status::{FaultRegistry, PackFailure, PackStatus};

use std::path::{Path, PathBuf};

/// A discovered pack archive and its content identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentPack {
    /// Full path to the archive.
    pub archive_path: PathBuf,

    /// Digest of the raw archive bytes.
    pub content_hash: ContentHash,
}

impl ContentPack {
    pub fn new(archive_path: impl Into<PathBuf>, content_hash: ContentHash) -> Self {
        Self {
            archive_path: archive_path.into(),
            content_hash,
        }
    }

    /// Archive file name without its extension.
    ///
    /// Used as the pack's staging subdirectory name.
    pub fn base_name(&self) -> String {
        pack_base_name(&self.archive_path)
    }
}

/// Archive file name without its extension.
pub fn pack_base_name(archive_path: &Path) -> String {
    archive_path
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_name_strips_extension() {
        let pack = ContentPack::new(
            "/mods/packs/Tools.Plus.modcomponent",
            ContentHash::from_bytes([0; 32]),
        );
        assert_eq!(pack.base_name(), "Tools.Plus");
    }
}
