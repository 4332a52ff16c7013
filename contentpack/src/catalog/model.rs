//! Catalog data model.

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk catalog manifest.
///
/// Only the two fields the patcher touches are typed. Everything else is
/// carried through untouched in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCatalog {
    #[serde(rename = "m_LocatorId", default)]
    pub locator_id: Option<String>,

    #[serde(rename = "m_InternalIds", default)]
    pub internal_ids: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A catalog after patching and staging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDescriptor {
    /// Manifest file stem, written back as `m_LocatorId`.
    pub locator_id: String,

    /// Patched asset locations, in manifest order.
    pub internal_ids: Vec<String>,

    /// File names of the bundles the manifest references.
    pub bundle_dependencies: BTreeSet<String>,

    /// First non-bundle location, probed after loading.
    pub witness_asset: Option<String>,

    /// Where the patched manifest was written.
    pub staged_path: PathBuf,

    /// Archive the manifest came from.
    pub source_pack: PathBuf,

    /// Host built-in shader catalog; staged but never loaded or probed.
    pub builtin_shaders: bool,
}

impl CatalogDescriptor {
    /// Whether the loader should pick this catalog up.
    pub fn is_tracked(&self) -> bool {
        !self.builtin_shaders
    }

    /// Whether the validator should probe this catalog.
    pub fn is_testable(&self) -> bool {
        self.is_tracked() && self.witness_asset.is_some()
    }
}

/// Outcome of probing a loaded catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Untested,
    Verified,
    Failed(String),
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Untested => f.write_str("untested"),
            Self::Verified => f.write_str("verified"),
            Self::Failed(reason) => write!(f, "validation failed: {}", reason),
        }
    }
}

/// Lifecycle of a staged catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    /// Written to staging; not (yet) handed to the host.
    Staged,
    /// Loaded by the host.
    Loaded {
        locator_id: String,
        validation: ValidationOutcome,
    },
    /// Rejected by the loader. Only this catalog is affected.
    LoadFailed(String),
}

impl CatalogState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Staged => "staged",
            Self::Loaded { .. } => "loaded",
            Self::LoadFailed(_) => "load-failed",
        }
    }
}

impl fmt::Display for CatalogState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staged => f.write_str("staged"),
            Self::Loaded { validation, .. } => write!(f, "loaded ({})", validation),
            Self::LoadFailed(reason) => write!(f, "load failed: {}", reason),
        }
    }
}

/// A staged catalog together with its current state.
#[derive(Debug, Clone)]
pub struct StagedCatalog {
    pub descriptor: CatalogDescriptor,
    pub state: CatalogState,
}

impl StagedCatalog {
    pub fn new(descriptor: CatalogDescriptor) -> Self {
        Self {
            descriptor,
            state: CatalogState::Staged,
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.locator_id
    }

    /// Outcome as a single word, for reports.
    pub fn outcome(&self) -> &'static str {
        match &self.state {
            CatalogState::Staged => "staged",
            CatalogState::LoadFailed(_) => "load-failed",
            CatalogState::Loaded { validation, .. } => match validation {
                ValidationOutcome::Untested => "loaded",
                ValidationOutcome::Verified => "verified",
                ValidationOutcome::Failed(_) => "invalid",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_fields_survive_round_trip() {
        let json = r#"{"m_LocatorId":"old","m_InternalIds":["a.bundle"],"m_KeyDataString":"abc","m_ProviderIds":["p"]}"#;
        let catalog: ContentCatalog = serde_json::from_str(json).unwrap();

        assert_eq!(catalog.locator_id.as_deref(), Some("old"));
        assert_eq!(catalog.internal_ids.as_ref().unwrap().len(), 1);
        assert_eq!(catalog.extra["m_KeyDataString"], "abc");

        let out = serde_json::to_value(&catalog).unwrap();
        assert_eq!(out["m_ProviderIds"][0], "p");
    }

    #[test]
    fn test_missing_internal_ids_deserializes_as_none() {
        let catalog: ContentCatalog = serde_json::from_str("{}").unwrap();
        assert!(catalog.internal_ids.is_none());
    }

    #[test]
    fn test_catalog_state_display() {
        let state = CatalogState::Loaded {
            locator_id: "items".to_string(),
            validation: ValidationOutcome::Verified,
        };
        assert_eq!(state.to_string(), "loaded (verified)");
        assert!(state.is_loaded());
        assert!(!CatalogState::LoadFailed("x".to_string()).is_loaded());
    }
}
