//! Archive member classification and routing.
//!
//! Every member of a pack archive goes through two decisions:
//!
//! 1. [`EntryType::classify`] looks at the file name suffix only.
//! 2. [`route`] looks at the internal path prefix and picks a registrar.
//!
//! | Prefix | Suffix | Route |
//! |--------|--------|-------|
//! | `auto-mapped/` | `.json` | Automapped descriptor, keyed by file stem |
//! | `blueprints/` | `.json` | Blueprint descriptor |
//! | `recipes/` | `.json` | Recipe descriptor |
//! | `localizations/` | `.json` | Localization descriptor |
//! | `bundle/` | `.json` | Catalog manifest |
//! | `buildinfo.json` | | Build info line |
//! | `gear-spawns/` | `.txt` | Gear spawn records |
//! | `bundle/` | `.unity3d` `.bundle` | Staged bundle |
//! | any | `.dll` | Script assembly |
//! | any | `.bnk` | Audio bank |

mod classify;
mod route;
mod text;

pub use classify::{file_name, file_stem, has_bundle_suffix, EntryType, BUNDLE_SUFFIXES};
pub use route::{route, Route, RouteError};
pub use text::{check_json, decode_utf8, extract_json_body, split_records, strip_bom, TextError};

/// A member read from an archive during one walk.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub internal_path: String,
    pub entry_type: EntryType,
    pub raw_bytes: Vec<u8>,
}

impl ArchiveEntry {
    pub fn new(internal_path: impl Into<String>, raw_bytes: Vec<u8>) -> Self {
        let internal_path = internal_path.into();
        let entry_type = EntryType::classify_path(&internal_path);
        Self {
            internal_path,
            entry_type,
            raw_bytes,
        }
    }

    /// Route this entry.
    pub fn route(&self) -> Result<Route, RouteError> {
        route(&self.internal_path, self.entry_type)
    }
}
