//! Declarative descriptors registered from pack archives.
//!
//! Descriptors are stored per category and keyed by logical name (the
//! member's file stem). Registering a name that already exists in the same
//! category overwrites it, so with archives processed in sorted-path order
//! the later-sorted pack wins.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Category selected by a member's internal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DescriptorCategory {
    Automapped,
    Blueprint,
    Recipe,
    Localization,
    Catalog,
    BuildInfo,
    GearSpawn,
}

impl DescriptorCategory {
    pub const ALL: [DescriptorCategory; 7] = [
        Self::Automapped,
        Self::Blueprint,
        Self::Recipe,
        Self::Localization,
        Self::Catalog,
        Self::BuildInfo,
        Self::GearSpawn,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Automapped => "automapped",
            Self::Blueprint => "blueprint",
            Self::Recipe => "recipe",
            Self::Localization => "localization",
            Self::Catalog => "catalog",
            Self::BuildInfo => "buildinfo",
            Self::GearSpawn => "gear-spawn",
        }
    }
}

impl fmt::Display for DescriptorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One registered descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub logical_name: String,
    pub category: DescriptorCategory,
    pub raw_text: String,
    /// Archive the descriptor was read from.
    pub source_pack: PathBuf,
}

/// Category-keyed descriptor store.
#[derive(Debug, Default)]
pub struct DescriptorRegistry {
    entries: BTreeMap<DescriptorCategory, BTreeMap<String, Descriptor>>,
}

impl DescriptorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor, replacing any previous one with the same
    /// category and name.
    ///
    /// Returns the replaced descriptor, if any.
    pub fn register(
        &mut self,
        category: DescriptorCategory,
        logical_name: impl Into<String>,
        raw_text: impl Into<String>,
        source_pack: &Path,
    ) -> Option<Descriptor> {
        let logical_name = logical_name.into();
        let descriptor = Descriptor {
            logical_name: logical_name.clone(),
            category,
            raw_text: raw_text.into(),
            source_pack: source_pack.to_path_buf(),
        };

        let replaced = self
            .entries
            .entry(category)
            .or_default()
            .insert(logical_name, descriptor);

        if let Some(previous) = &replaced {
            debug!(
                category = %category,
                name = %previous.logical_name,
                previous = %previous.source_pack.display(),
                winner = %source_pack.display(),
                "Descriptor overwritten by later pack"
            );
        }

        replaced
    }

    pub fn get(&self, category: DescriptorCategory, logical_name: &str) -> Option<&Descriptor> {
        self.entries.get(&category)?.get(logical_name)
    }

    /// Descriptors of one category in name order.
    pub fn category(&self, category: DescriptorCategory) -> impl Iterator<Item = &Descriptor> {
        self.entries
            .get(&category)
            .into_iter()
            .flat_map(|names| names.values())
    }

    /// Every descriptor, grouped by category.
    pub fn iter(&self) -> impl Iterator<Item = &Descriptor> {
        self.entries.values().flat_map(|names| names.values())
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn count(&self, category: DescriptorCategory) -> usize {
        self.entries.get(&category).map_or(0, BTreeMap::len)
    }
}
