//! File-name based classification of archive members.

use std::fmt;

/// Suffixes of binary asset bundles referenced from catalogs.
pub const BUNDLE_SUFFIXES: &[&str] = &[".unity3d", ".bundle"];

/// Content type of an archive member, decided by its file name suffix.
///
/// Matching is case-sensitive, so `Data.JSON` is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    /// `.unity3d` / `.bundle`: binary asset bundle.
    CatalogAsset,
    /// `.json`: declarative text.
    Json,
    /// `.txt`: declarative text.
    Text,
    /// `.dll`: script assembly for the host's loader.
    ScriptAssembly,
    /// `.bnk`: audio bank for the host's sound engine.
    AudioBank,
    /// Anything else; skipped without being read.
    Ignored,
}

impl EntryType {
    /// Classify a member by file name (the last path segment).
    pub fn classify(file_name: &str) -> Self {
        if file_name.trim().is_empty() {
            return Self::Ignored;
        }

        if BUNDLE_SUFFIXES.iter().any(|suffix| file_name.ends_with(suffix)) {
            Self::CatalogAsset
        } else if file_name.ends_with(".json") {
            Self::Json
        } else if file_name.ends_with(".txt") {
            Self::Text
        } else if file_name.ends_with(".dll") {
            Self::ScriptAssembly
        } else if file_name.ends_with(".bnk") {
            Self::AudioBank
        } else {
            Self::Ignored
        }
    }

    /// Classify a member by its full internal path.
    pub fn classify_path(internal_path: &str) -> Self {
        Self::classify(file_name(internal_path))
    }

    /// Whether the member is declarative text routed by path prefix.
    pub fn is_declarative_text(&self) -> bool {
        matches!(self, Self::Json | Self::Text)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::CatalogAsset => "catalog-asset",
            Self::Json => "json",
            Self::Text => "text",
            Self::ScriptAssembly => "assembly",
            Self::AudioBank => "audio-bank",
            Self::Ignored => "ignored",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Last `/`-separated segment of an archive-internal path.
pub fn file_name(internal_path: &str) -> &str {
    internal_path.rsplit('/').next().unwrap_or(internal_path)
}

/// File name without its final extension.
pub fn file_stem(internal_path: &str) -> &str {
    let name = file_name(internal_path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(index) => &name[..index],
    }
}

/// Whether a path or URL-like asset location ends in a bundle suffix.
pub fn has_bundle_suffix(location: &str) -> bool {
    BUNDLE_SUFFIXES
        .iter()
        .any(|suffix| file_name(location).ends_with(suffix))
}
