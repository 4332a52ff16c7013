//! Capabilities the pipeline consumes from the host engine.
//!
//! The pipeline never references engine types. Everything it needs from the
//! host is expressed by two traits:
//!
//! - [`ResourceHost`]: bundle contents, catalog loading and typed asset lookup
//! - [`ContentHost`]: assembly loading, audio banks and category registrars
//!
//! Component attachment for the mapper layer lives in
//! [`crate::mapper::ComponentTarget`].
//!
//! [`OfflineHost`] implements both traits without an engine by reading the
//! staged catalog files directly.

mod offline;

pub use offline::OfflineHost;

use std::fmt;
use std::path::Path;

use thiserror::Error;

/// Failure reported by a host capability.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type for host calls.
pub type HostResult<T> = Result<T, HostError>;

/// Resource locator returned by a successful catalog load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Locator {
    /// Locator identity, normally the catalog's `m_LocatorId`.
    pub id: String,
    /// Keys the locator can resolve.
    pub keys: Vec<String>,
}

impl Locator {
    pub fn new(id: impl Into<String>, keys: Vec<String>) -> Self {
        Self {
            id: id.into(),
            keys,
        }
    }

    /// Whether the locator exposes at least one key.
    pub fn has_keys(&self) -> bool {
        !self.keys.is_empty()
    }
}

/// Expected type of a typed asset lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Texture,
    Material,
    Prefab,
}

impl AssetKind {
    /// Kind expected for a witness asset, by lowercase extension (no dot).
    pub fn for_extension(extension: &str) -> Option<Self> {
        match extension {
            "png" | "jpg" => Some(Self::Texture),
            "mat" => Some(Self::Material),
            "prefab" => Some(Self::Prefab),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Texture => "Texture2D",
            Self::Material => "Material",
            Self::Prefab => "GameObject",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved host asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAsset {
    pub name: String,
    pub kind: AssetKind,
}

/// Host resource system.
pub trait ResourceHost {
    /// Load a catalog from its staged path, blocking until complete.
    ///
    /// `Ok(None)` stands for a null locator.
    fn load_catalog(&mut self, path: &Path) -> HostResult<Option<Locator>>;

    /// Look up a loaded asset by name and expected type.
    fn resolve_typed_asset(&self, name: &str, kind: AssetKind) -> Option<ResolvedAsset>;

    /// Names of the assets stored in a staged bundle.
    ///
    /// Hosts that cannot open bundles report them as empty.
    fn list_bundle_assets(&mut self, path: &Path) -> HostResult<Vec<String>> {
        let _ = path;
        Ok(Vec::new())
    }
}

/// Host loaders and category registrars for archive content.
///
/// Every method defaults to accepting the content, so hosts only override
/// what they handle.
pub trait ContentHost {
    fn load_assembly(&mut self, file_name: &str, bytes: &[u8]) -> HostResult<()> {
        let _ = (file_name, bytes);
        Ok(())
    }

    fn register_audio_bank(&mut self, file_name: &str, bytes: &[u8]) -> HostResult<()> {
        let _ = (file_name, bytes);
        Ok(())
    }

    fn register_blueprint(&mut self, name: &str, text: &str) -> HostResult<()> {
        let _ = (name, text);
        Ok(())
    }

    fn register_recipe(&mut self, name: &str, text: &str) -> HostResult<()> {
        let _ = (name, text);
        Ok(())
    }

    /// Localization text arrives verbatim; a leading BOM is the host's to strip.
    fn register_localization(&mut self, name: &str, text: &str) -> HostResult<()> {
        let _ = (name, text);
        Ok(())
    }

    fn register_gear_spawns(&mut self, source: &str, records: &[String]) -> HostResult<()> {
        let _ = (source, records);
        Ok(())
    }
}
