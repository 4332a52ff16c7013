//! INI configuration file parsing.

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use super::{DEFAULT_BUILTIN_SHADERS_MARKER, DEFAULT_PACK_EXTENSION, DEFAULT_STAGING_FOLDER};

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read or parsed.
    #[error("failed to parse {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// A key holds a value of the wrong shape.
    #[error("invalid value for [{section}] {key}: '{value}'")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        value: String,
    },

    /// No configuration directory is available on this platform.
    #[error("no configuration directory available")]
    NoConfigDir,
}

/// `[packs]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct PackSettings {
    /// Root directory scanned for pack archives.
    pub mods_dir: Option<PathBuf>,

    /// Whether subdirectories are scanned too.
    pub recursive: bool,

    /// Archive extensions accepted by the scanner (without the dot).
    pub extensions: Vec<String>,

    /// Name of the staging folder inside the mods directory.
    pub staging_folder: String,
}

impl Default for PackSettings {
    fn default() -> Self {
        Self {
            mods_dir: None,
            recursive: true,
            extensions: vec![DEFAULT_PACK_EXTENSION.to_string()],
            staging_folder: DEFAULT_STAGING_FOLDER.to_string(),
        }
    }
}

/// `[catalogs]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSettings {
    /// Catalogs and bundles whose name contains this marker are staged but
    /// never tracked for loading or witness testing.
    pub builtin_shaders_marker: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            builtin_shaders_marker: DEFAULT_BUILTIN_SHADERS_MARKER.to_string(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,

    /// Optional log file; stderr only when absent.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Parsed `config.ini`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub packs: PackSettings,
    pub catalogs: CatalogSettings,
    pub logging: LoggingSettings,
}

impl ConfigFile {
    /// Default location: `<config_dir>/contentpack/config.ini`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("contentpack").join("config.ini"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load the config from its default location.
    ///
    /// A missing file is not an error; defaults are returned instead.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load the config from an explicit path, falling back to defaults when
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Self::from_ini(&ini)
    }

    /// Parse the config from INI text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            reason: e.to_string(),
        })?;

        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(section) = ini.section(Some("packs")) {
            if let Some(dir) = section.get("mods_dir").filter(|v| !v.trim().is_empty()) {
                config.packs.mods_dir = Some(PathBuf::from(dir.trim()));
            }
            if let Some(value) = section.get("recursive") {
                config.packs.recursive = parse_bool("packs", "recursive", value)?;
            }
            if let Some(value) = section.get("extensions") {
                let extensions: Vec<String> = value
                    .split(',')
                    .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
                    .filter(|ext| !ext.is_empty())
                    .collect();
                if extensions.is_empty() {
                    return Err(ConfigError::InvalidValue {
                        section: "packs",
                        key: "extensions",
                        value: value.to_string(),
                    });
                }
                config.packs.extensions = extensions;
            }
            if let Some(folder) = section.get("staging_folder").filter(|v| !v.trim().is_empty()) {
                config.packs.staging_folder = folder.trim().to_string();
            }
        }

        if let Some(section) = ini.section(Some("catalogs")) {
            if let Some(marker) = section
                .get("builtin_shaders_marker")
                .filter(|v| !v.trim().is_empty())
            {
                config.catalogs.builtin_shaders_marker = marker.trim().to_string();
            }
        }

        if let Some(section) = ini.section(Some("logging")) {
            if let Some(level) = section.get("level").filter(|v| !v.trim().is_empty()) {
                config.logging.level = level.trim().to_string();
            }
            if let Some(file) = section.get("file").filter(|v| !v.trim().is_empty()) {
                config.logging.file = Some(PathBuf::from(file.trim()));
            }
        }

        Ok(config)
    }
}

fn parse_bool(section: &'static str, key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(true),
        "false" | "no" | "0" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            section,
            key,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default();
        assert!(config.packs.mods_dir.is_none());
        assert!(config.packs.recursive);
        assert_eq!(config.packs.extensions, vec!["modcomponent".to_string()]);
        assert_eq!(config.packs.staging_folder, "_ModComponentTemp");
        assert_eq!(config.catalogs.builtin_shaders_marker, "unitybuiltinshaders");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_all_sections() {
        let config = ConfigFile::parse(
            "[packs]\n\
             mods_dir = /games/mods\n\
             recursive = no\n\
             extensions = .modcomponent, ZIP\n\
             staging_folder = _staged\n\
             [catalogs]\n\
             builtin_shaders_marker = builtin\n\
             [logging]\n\
             level = debug\n\
             file = /tmp/contentpack.log\n",
        )
        .unwrap();

        assert_eq!(config.packs.mods_dir, Some(PathBuf::from("/games/mods")));
        assert!(!config.packs.recursive);
        assert_eq!(
            config.packs.extensions,
            vec!["modcomponent".to_string(), "zip".to_string()]
        );
        assert_eq!(config.packs.staging_folder, "_staged");
        assert_eq!(config.catalogs.builtin_shaders_marker, "builtin");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/contentpack.log")));
    }

    #[test]
    fn test_invalid_bool_is_rejected() {
        let result = ConfigFile::parse("[packs]\nrecursive = sometimes\n");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { key: "recursive", .. })
        ));
    }

    #[test]
    fn test_empty_extension_list_is_rejected() {
        let result = ConfigFile::parse("[packs]\nextensions = , ,\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_returns_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ConfigFile::load_from(&temp.path().join("absent.ini")).unwrap();
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.ini");
        std::fs::write(&path, "[logging]\nlevel = warn\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.packs, PackSettings::default());
    }
}
