//! Per-pack status tracking.
//!
//! Each pack starts `Working`. The first failure recorded for a pack becomes
//! its permanent reason; later failures are logged and dropped.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{error, warn};

use crate::error::{ErrorKind, PackError};

/// Why a pack stopped working.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackFailure {
    /// Taxonomy bucket of the first error.
    pub kind: ErrorKind,
    /// Rendered error, including the offending entry path.
    pub message: String,
}

impl fmt::Display for PackFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl From<&PackError> for PackFailure {
    fn from(error: &PackError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

/// Status of one content pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackStatus {
    Working,
    Failed(PackFailure),
}

impl PackStatus {
    pub fn is_working(&self) -> bool {
        matches!(self, Self::Working)
    }
}

/// Status cells for every pack seen in a run, keyed by archive path.
#[derive(Debug, Default)]
pub struct FaultRegistry {
    packs: BTreeMap<PathBuf, PackStatus>,
}

impl FaultRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a pack as `Working`.
    ///
    /// Registering an already known pack leaves its status untouched.
    pub fn register(&mut self, pack: &Path) {
        self.packs
            .entry(pack.to_path_buf())
            .or_insert(PackStatus::Working);
    }

    /// Record a failure for a pack.
    ///
    /// Returns `true` when this became the pack's canonical failure, `false`
    /// when the pack had already failed and the error was only logged.
    pub fn mark_failed(&mut self, pack: &Path, failure: &PackError) -> bool {
        let status = self
            .packs
            .entry(pack.to_path_buf())
            .or_insert(PackStatus::Working);

        match status {
            PackStatus::Working => {
                error!(
                    pack = %pack.display(),
                    kind = %failure.kind(),
                    error = %failure,
                    "Content pack marked as not working"
                );
                *status = PackStatus::Failed(PackFailure::from(failure));
                true
            }
            PackStatus::Failed(first) => {
                warn!(
                    pack = %pack.display(),
                    first = %first,
                    error = %failure,
                    "Additional failure for pack that already failed"
                );
                false
            }
        }
    }

    pub fn status(&self, pack: &Path) -> Option<&PackStatus> {
        self.packs.get(pack)
    }

    /// Whether the pack is known and has not failed.
    pub fn is_working(&self, pack: &Path) -> bool {
        self.status(pack).is_some_and(PackStatus::is_working)
    }

    /// Canonical failure message, if the pack failed.
    pub fn failure_reason(&self, pack: &Path) -> Option<String> {
        match self.status(pack)? {
            PackStatus::Working => None,
            PackStatus::Failed(failure) => Some(failure.message.clone()),
        }
    }

    pub fn failure(&self, pack: &Path) -> Option<&PackFailure> {
        match self.status(pack)? {
            PackStatus::Working => None,
            PackStatus::Failed(failure) => Some(failure),
        }
    }

    /// All packs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, &PackStatus)> {
        self.packs.iter().map(|(path, status)| (path.as_path(), status))
    }

    pub fn len(&self) -> usize {
        self.packs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }

    pub fn working_count(&self) -> usize {
        self.packs.values().filter(|s| s.is_working()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.len() - self.working_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(name: &str) -> PathBuf {
        PathBuf::from("/mods").join(name)
    }

    #[test]
    fn test_registered_pack_is_working() {
        let mut registry = FaultRegistry::new();
        registry.register(&pack("a.modcomponent"));

        assert!(registry.is_working(&pack("a.modcomponent")));
        assert!(registry.failure_reason(&pack("a.modcomponent")).is_none());
    }

    #[test]
    fn test_unknown_pack_is_not_working() {
        let registry = FaultRegistry::new();
        assert!(!registry.is_working(&pack("missing.modcomponent")));
        assert!(registry.status(&pack("missing.modcomponent")).is_none());
    }

    #[test]
    fn test_first_failure_wins() {
        let mut registry = FaultRegistry::new();
        let path = pack("b.modcomponent");
        registry.register(&path);

        let first = PackError::format("b.modcomponent/auto-mapped/x.json", "bad json");
        let second = PackError::resolution("b.modcomponent/code.dll", "bad image");

        assert!(registry.mark_failed(&path, &first));
        assert!(!registry.mark_failed(&path, &second));

        let failure = registry.failure(&path).unwrap();
        assert_eq!(failure.kind, ErrorKind::Format);
        assert!(failure.message.contains("auto-mapped/x.json"));
        assert!(!registry.is_working(&path));
    }

    #[test]
    fn test_failure_is_isolated_per_pack() {
        let mut registry = FaultRegistry::new();
        registry.register(&pack("a.modcomponent"));
        registry.register(&pack("b.modcomponent"));
        registry.register(&pack("c.modcomponent"));

        registry.mark_failed(&pack("b.modcomponent"), &PackError::format("b", "broken"));

        assert!(registry.is_working(&pack("a.modcomponent")));
        assert!(!registry.is_working(&pack("b.modcomponent")));
        assert!(registry.is_working(&pack("c.modcomponent")));
        assert_eq!(registry.working_count(), 2);
        assert_eq!(registry.failed_count(), 1);
    }

    #[test]
    fn test_register_after_failure_keeps_failure() {
        let mut registry = FaultRegistry::new();
        let path = pack("a.modcomponent");
        registry.mark_failed(&path, &PackError::format("a", "broken"));
        registry.register(&path);

        assert!(!registry.is_working(&path));
    }
}
