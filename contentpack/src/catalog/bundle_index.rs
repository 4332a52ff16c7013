//! Index of staged bundles and the assets they contain.

use std::path::{Path, PathBuf};

use tracing::{debug, error};

use crate::entry::file_stem;
use crate::host::ResourceHost;

/// Asset names per staged bundle, in staging order.
///
/// Asset names are matched on their stem, case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleIndex {
    bundles: Vec<(PathBuf, Vec<String>)>,
}

impl BundleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the host for the contents of every staged bundle.
    ///
    /// A bundle the host cannot open is logged and left out. Paths that are
    /// already indexed are skipped.
    pub fn build<H: ResourceHost>(host: &mut H, bundle_paths: &[PathBuf]) -> Self {
        let mut index = Self::new();

        for path in bundle_paths {
            if index.contains_bundle(path) {
                continue;
            }
            match host.list_bundle_assets(path) {
                Ok(assets) => {
                    debug!(bundle = %path.display(), assets = assets.len(), "Bundle indexed");
                    index.insert(path.clone(), assets);
                }
                Err(e) => {
                    error!(bundle = %path.display(), error = %e, "Could not index bundle");
                }
            }
        }

        index
    }

    /// Add a bundle. Returns `false` if it was already indexed.
    pub fn insert(&mut self, path: PathBuf, assets: Vec<String>) -> bool {
        if self.contains_bundle(&path) {
            return false;
        }
        self.bundles.push((path, assets));
        true
    }

    pub fn contains_bundle(&self, path: &Path) -> bool {
        self.bundles.iter().any(|(bundle, _)| bundle == path)
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    /// Indexed bundles with their asset names.
    pub fn bundles(&self) -> impl Iterator<Item = (&Path, &[String])> {
        self.bundles
            .iter()
            .map(|(path, assets)| (path.as_path(), assets.as_slice()))
    }

    pub fn assets(&self, bundle: &Path) -> Option<&[String]> {
        self.bundles
            .iter()
            .find(|(path, _)| path == bundle)
            .map(|(_, assets)| assets.as_slice())
    }

    /// Whether any staged bundle carries an asset named `name`.
    pub fn contains_asset(&self, name: &str) -> bool {
        self.bundle_for(name).is_some()
    }

    /// First bundle, in staging order, carrying an asset named `name`.
    pub fn bundle_for(&self, name: &str) -> Option<&Path> {
        self.bundles
            .iter()
            .find(|(_, assets)| {
                assets
                    .iter()
                    .any(|asset| file_stem(asset).eq_ignore_ascii_case(name))
            })
            .map(|(path, _)| path.as_path())
    }

    /// Every prefab asset as `(bundle, prefab name)`.
    pub fn prefabs(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.bundles.iter().flat_map(|(path, assets)| {
            assets
                .iter()
                .filter(|asset| asset.to_lowercase().ends_with(".prefab"))
                .map(move |asset| (path.as_path(), file_stem(asset)))
        })
    }
}
