//! Configuration for the content pack loader.
//!
//! Two layers are provided:
//!
//! - [`ConfigFile`]: the user's `config.ini`, parsed with defaults for every key.
//! - [`LoaderConfig`]: the runtime configuration consumed by the pipeline,
//!   derived from a `ConfigFile` and then adjusted by command-line flags.
//!
//! # File Format
//!
//! ```ini
//! [packs]
//! mods_dir = /games/thelongdark/Mods
//! recursive = true
//! extensions = modcomponent
//! staging_folder = _ModComponentTemp
//!
//! [catalogs]
//! builtin_shaders_marker = unitybuiltinshaders
//!
//! [logging]
//! level = info
//! file = /var/log/contentpack.log
//! ```

mod file;
mod loader;

pub use file::{CatalogSettings, ConfigError, ConfigFile, LoggingSettings, PackSettings};
pub use loader::LoaderConfig;

/// Default archive extension for content packs.
pub const DEFAULT_PACK_EXTENSION: &str = "modcomponent";

/// Default name of the staging folder created inside the mods directory.
pub const DEFAULT_STAGING_FOLDER: &str = "_ModComponentTemp";

/// Default marker identifying the host's built-in shader catalog.
pub const DEFAULT_BUILTIN_SHADERS_MARKER: &str = "unitybuiltinshaders";
