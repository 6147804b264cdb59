use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Content provider a movie can be associated with.
///
/// Variant order is the canonical order used everywhere a set of platforms is
/// serialized: `netflix, amazon, imdb`. `Ord` is derived from it, so a
/// `BTreeSet<Platform>` iterates canonically regardless of insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Netflix,
    Amazon,
    Imdb,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Netflix, Platform::Amazon, Platform::Imdb];

    /// Wire identifier used by the catalog API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Netflix => "netflix",
            Platform::Amazon => "amazon",
            Platform::Imdb => "imdb",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Netflix => "Netflix",
            Platform::Amazon => "Amazon",
            Platform::Imdb => "IMDb",
        }
    }

    /// Outbound link for a platform-specific id.
    pub fn watch_url(&self, id: &str) -> String {
        match self {
            Platform::Netflix => format!("https://www.netflix.com/title/{}", id),
            Platform::Amazon => format!("https://www.primevideo.com/detail/{}", id),
            Platform::Imdb => format!("https://www.imdb.com/title/{}", id),
        }
    }

    pub fn watch_label(&self) -> &'static str {
        match self {
            Platform::Netflix => "Watch on Netflix",
            Platform::Amazon => "Watch on Amazon Prime",
            Platform::Imdb => "Open on IMDb",
        }
    }

    pub fn all() -> BTreeSet<Platform> {
        Self::ALL.into_iter().collect()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl fmt::Display for UnknownPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown platform '{}' (expected netflix, amazon or imdb)",
            self.0
        )
    }
}

impl std::error::Error for UnknownPlatform {}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "netflix" => Ok(Platform::Netflix),
            "amazon" => Ok(Platform::Amazon),
            "imdb" => Ok(Platform::Imdb),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}

/// Deserialize a platform list, skipping identifiers this client does not know.
pub(crate) fn lenient_platforms<'de, D>(deserializer: D) -> Result<BTreeSet<Platform>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match value.parse::<Platform>() {
            Ok(platform) => Some(platform),
            Err(e) => {
                debug!("Ignoring source: {}", e);
                None
            }
        })
        .collect())
}
