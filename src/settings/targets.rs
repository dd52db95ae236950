use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Version meaning "this engine is not targeted at all". Legacy engines left
/// at this value never constrain feature selection.
pub const UNSUPPORTED: u32 = 0x7FFF_FFFF;

/// Minimum browser versions a build must keep working on, plus the two
/// settings that implicitly require the full feature set.
///
/// Safari versions are encoded as major * 10000 + minor * 100 + patch, so
/// Safari 14.1 is 141000.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BrowserTargets {
    #[serde(default = "default_min_chrome_version")]
    pub min_chrome_version: u32,
    #[serde(default = "default_min_firefox_version")]
    pub min_firefox_version: u32,
    #[serde(default = "default_min_safari_version")]
    pub min_safari_version: u32,
    #[serde(default = "unsupported")]
    pub min_ie_version: u32,
    #[serde(default = "unsupported")]
    pub min_edge_version: u32,
    #[serde(default)] // false is default
    pub threads: bool,
    #[serde(default)] // false is default
    pub relocatable: bool,
}

fn default_min_chrome_version() -> u32 {
    75
}

fn default_min_firefox_version() -> u32 {
    68
}

fn default_min_safari_version() -> u32 {
    140_100
}

fn unsupported() -> u32 {
    UNSUPPORTED
}

impl Default for BrowserTargets {
    fn default() -> Self {
        BrowserTargets {
            min_chrome_version: default_min_chrome_version(),
            min_firefox_version: default_min_firefox_version(),
            min_safari_version: default_min_safari_version(),
            min_ie_version: UNSUPPORTED,
            min_edge_version: UNSUPPORTED,
            threads: false,
            relocatable: false,
        }
    }
}

impl BrowserTargets {
    pub fn from_toml(contents: &str) -> Result<Self> {
        let targets: BrowserTargets = toml::from_str(contents)?;
        targets.validate()?;
        Ok(targets)
    }

    pub fn from_file(config_path: &Path) -> Result<Self> {
        anyhow::ensure!(
            config_path.exists(),
            "{} not found",
            config_path.display()
        );
        let contents = fs::read_to_string(config_path)?;
        Self::from_toml(&contents)
    }

    /// A zero minimum would silently mark every feature as supported.
    pub fn validate(&self) -> Result<()> {
        for (engine, version) in [
            ("chrome", self.min_chrome_version),
            ("firefox", self.min_firefox_version),
            ("safari", self.min_safari_version),
        ]
        .iter()
        {
            if *version == 0 {
                anyhow::bail!("minimum {} version must be greater than zero", engine);
            }
        }
        Ok(())
    }

    /// True when the build must keep working on any version of IE or legacy
    /// Edge.
    pub fn targets_legacy_browsers(&self) -> bool {
        self.min_ie_version != UNSUPPORTED || self.min_edge_version != UNSUPPORTED
    }
}
