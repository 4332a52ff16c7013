//! `buildinfo.json` identification records.

use std::fmt;

use serde::Deserialize;

/// Identification shipped at the root of a pack as `buildinfo.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildInfo {
    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "Version")]
    pub version: String,

    #[serde(rename = "Author", default)]
    pub author: Option<String>,
}

impl BuildInfo {
    /// Parse a build-info document; a leading byte-order mark is ignored.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text.trim_start_matches('\u{feff}'))
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.author {
            Some(author) => write!(f, "{} {} by {}", self.name, self.version, author),
            None => write!(f, "{} {}", self.name, self.version),
        }
    }
}
