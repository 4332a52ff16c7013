//! Asset catalog patching, staging, loading and validation.
//!
//! A pack's catalog manifests (`bundle/*.json`) list asset locations that
//! only make sense inside the pack's original build. While a pack is
//! walked, [`CatalogPatcher`] rewrites every bundle location to the
//! [`StagingArea`] copy of that bundle and writes the patched manifest next
//! to it. Once every pack has been walked, the staged bundles are listed
//! into a [`BundleIndex`], then [`CatalogLoader`] hands each
//! staged manifest to the host and [`CatalogValidator`] probes it through
//! its witness asset.
//!
//! Catalog failures are per manifest. They are logged and recorded in the
//! catalog's [`CatalogState`], and never change the owning pack's status.

mod bundle_index;
mod error;
mod loader;
mod model;
mod patcher;
mod staging;
mod validator;

pub use bundle_index::BundleIndex;
pub use error::{CatalogError, CatalogResult};
pub use loader::{CatalogLoader, LoadReport};
pub use model::{CatalogDescriptor, CatalogState, ContentCatalog, StagedCatalog, ValidationOutcome};
pub use patcher::{CatalogPatcher, PatchedCatalog};
pub use staging::{remove_staging_folder, StagingArea};
pub use validator::{witness_parts, CatalogValidator, ValidationReport};
