//! Platform detection and endpoint routing
//!
//! Supports:
//! - Domain-substring detection with a fixed priority order
//! - Fixed endpoint table per platform
//! - Last-write-wins selection between URL auto-detect and manual clicks

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known e-commerce platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Flipkart,
    Dell,
    Nykaa,
    Nike,
    Myntra,
}

impl Default for Platform {
    fn default() -> Self {
        Platform::Flipkart
    }
}

/// Detection order. The first platform whose domain appears in the URL wins.
pub const DETECTION_ORDER: [Platform; 5] = [
    Platform::Flipkart,
    Platform::Dell,
    Platform::Nykaa,
    Platform::Nike,
    Platform::Myntra,
];

impl Platform {
    /// Lowercase id used by platform controls and in logs.
    pub fn id(&self) -> &'static str {
        match self {
            Platform::Flipkart => "flipkart",
            Platform::Dell => "dell",
            Platform::Nykaa => "nykaa",
            Platform::Nike => "nike",
            Platform::Myntra => "myntra",
        }
    }

    /// Domain substring that identifies the platform in a product URL.
    pub fn domain(&self) -> &'static str {
        match self {
            Platform::Flipkart => "flipkart.com",
            Platform::Dell => "dell.com",
            Platform::Nykaa => "nykaa.com",
            Platform::Nike => "nike.com",
            Platform::Myntra => "myntra.com",
        }
    }

    /// Backend path serving this platform.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Platform::Flipkart => "/scrape",
            Platform::Dell => "/scrape/dell",
            Platform::Nykaa => "/scrape/nykaa",
            Platform::Nike => "/scrape/nike",
            Platform::Myntra => "/scrape/myntra",
        }
    }

    /// Lenient parse for control ids: unknown ids fall back to the default platform.
    pub fn from_id(id: &str) -> Self {
        id.parse().unwrap_or_default()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        DETECTION_ORDER
            .iter()
            .copied()
            .find(|p| p.id() == wanted)
            .ok_or_else(|| format!("Unknown platform: {}", s))
    }
}

/// Detect the platform of a product URL. Total: anything unrecognised maps to Flipkart.
pub fn resolve(url: &str) -> Platform {
    DETECTION_ORDER
        .iter()
        .copied()
        .find(|p| url.contains(p.domain()))
        .unwrap_or_default()
}

/// Endpoint path for a raw platform id; unmapped ids use the default endpoint.
pub fn endpoint_for_id(id: &str) -> &'static str {
    Platform::from_id(id).endpoint_path()
}

/// Where the current selection came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOrigin {
    /// Derived from the URL field
    Detected,
    /// Picked by clicking a platform control
    Manual,
}

/// Current platform choice. Whichever input source wrote last wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformSelection {
    platform: Platform,
    origin: SelectionOrigin,
}

impl Default for PlatformSelection {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            origin: SelectionOrigin::Detected,
        }
    }
}

impl PlatformSelection {
    pub fn current(&self) -> Platform {
        self.platform
    }

    pub fn origin(&self) -> SelectionOrigin {
        self.origin
    }

    /// URL field edited: re-detect, overriding any manual pick.
    pub fn url_edited(&mut self, url: &str) -> Platform {
        self.platform = resolve(url);
        self.origin = SelectionOrigin::Detected;
        self.platform
    }

    /// Platform control clicked.
    pub fn manual_pick(&mut self, platform: Platform) -> Platform {
        self.platform = platform;
        self.origin = SelectionOrigin::Manual;
        self.platform
    }
}
