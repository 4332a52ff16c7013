//! Runtime configuration for the pack loading pipeline.

use std::path::PathBuf;

use super::file::ConfigFile;
use super::{DEFAULT_BUILTIN_SHADERS_MARKER, DEFAULT_PACK_EXTENSION, DEFAULT_STAGING_FOLDER};

/// Configuration for a single pipeline run.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Directory scanned for pack archives.
    ///
    /// The staging folder is created inside it.
    pub mods_dir: PathBuf,

    /// Whether subdirectories of `mods_dir` are scanned.
    pub recursive: bool,

    /// Accepted archive extensions, lowercase, without the dot.
    pub extensions: Vec<String>,

    /// Name of the staging folder inside `mods_dir`.
    pub staging_folder: String,

    /// Name fragment that marks the host's built-in shader catalog.
    pub builtin_shaders_marker: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            mods_dir: PathBuf::from("."),
            recursive: true,
            extensions: vec![DEFAULT_PACK_EXTENSION.to_string()],
            staging_folder: DEFAULT_STAGING_FOLDER.to_string(),
            builtin_shaders_marker: DEFAULT_BUILTIN_SHADERS_MARKER.to_string(),
        }
    }
}

impl LoaderConfig {
    /// Create a new configuration scanning the given mods directory.
    pub fn new(mods_dir: PathBuf) -> Self {
        Self {
            mods_dir,
            ..Default::default()
        }
    }

    /// Build a configuration from a parsed config file.
    ///
    /// Falls back to the current directory when no mods directory is set.
    pub fn from_file(file: &ConfigFile) -> Self {
        Self {
            mods_dir: file
                .packs
                .mods_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
            recursive: file.packs.recursive,
            extensions: file.packs.extensions.clone(),
            staging_folder: file.packs.staging_folder.clone(),
            builtin_shaders_marker: file.catalogs.builtin_shaders_marker.clone(),
        }
    }

    /// Set the mods directory.
    pub fn with_mods_dir(mut self, path: PathBuf) -> Self {
        self.mods_dir = path;
        self
    }

    /// Enable or disable recursive scanning.
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Add an accepted archive extension.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into().trim_start_matches('.').to_lowercase();
        if !self.extensions.contains(&extension) {
            self.extensions.push(extension);
        }
        self
    }

    /// Set the staging folder name.
    pub fn with_staging_folder(mut self, folder: impl Into<String>) -> Self {
        self.staging_folder = folder.into();
        self
    }

    /// Set the built-in shaders marker.
    pub fn with_builtin_shaders_marker(mut self, marker: impl Into<String>) -> Self {
        self.builtin_shaders_marker = marker.into();
        self
    }

    /// Location of the staging area inside the mods directory.
    pub fn staging_root(&self) -> PathBuf {
        self.mods_dir.join(&self.staging_folder)
    }
}
