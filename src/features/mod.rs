use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::settings::targets::BrowserTargets;

/// Optional wasm binary-format features whose availability depends on which
/// browser engines a build targets.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Feature {
    NonTrappingFpToInt,
    SignExt,
    BulkMemory,
    MutableGlobals,
}

struct MinVersions {
    chrome: u32,
    firefox: u32,
    // Safari versions are encoded as major * 10000 + minor * 100 + patch.
    safari: u32,
}

impl Feature {
    /// Declaration order. Flag emission follows this order so generated
    /// command lines are reproducible.
    pub const ALL: [Feature; 4] = [
        Feature::NonTrappingFpToInt,
        Feature::SignExt,
        Feature::BulkMemory,
        Feature::MutableGlobals,
    ];

    /// First browser release of each engine that shipped the feature.
    const fn min_versions(self) -> MinVersions {
        match self {
            Feature::NonTrappingFpToInt => MinVersions {
                chrome: 75,
                firefox: 65,
                safari: 150_000,
            },
            Feature::SignExt => MinVersions {
                chrome: 74,
                firefox: 62,
                safari: 141_000,
            },
            Feature::BulkMemory => MinVersions {
                chrome: 75,
                firefox: 79,
                safari: 150_000,
            },
            Feature::MutableGlobals => MinVersions {
                chrome: 74,
                firefox: 61,
                safari: 120_000,
            },
        }
    }

    /// The flag that tells the compiler not to emit code relying on this
    /// feature.
    pub fn disable_flag(self) -> &'static str {
        match self {
            Feature::NonTrappingFpToInt => "-mno-nontrapping-fptoint",
            Feature::SignExt => "-mno-sign-ext",
            Feature::BulkMemory => "-mno-bulk-memory",
            Feature::MutableGlobals => "-mno-mutable-globals",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let printable = match *self {
            Feature::NonTrappingFpToInt => "non-trapping-fptoint",
            Feature::SignExt => "sign-ext",
            Feature::BulkMemory => "bulk-memory",
            Feature::MutableGlobals => "mutable-globals",
        };
        write!(f, "{}", printable)
    }
}

impl FromStr for Feature {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "non-trapping-fptoint" => Ok(Feature::NonTrappingFpToInt),
            "sign-ext" => Ok(Feature::SignExt),
            "bulk-memory" => Ok(Feature::BulkMemory),
            "mutable-globals" => Ok(Feature::MutableGlobals),
            _ => anyhow::bail!("{} is not a recognized wasm feature!", s),
        }
    }
}

/// Returns whether every targeted browser is new enough to assume `feature`
/// is present.
pub fn supported(feature: Feature, targets: &BrowserTargets) -> bool {
    let min = feature.min_versions();
    if targets.min_chrome_version < min.chrome {
        return false;
    }
    if targets.min_firefox_version < min.firefox {
        return false;
    }
    if targets.min_safari_version < min.safari {
        return false;
    }
    // IE and Edge never shipped any post-MVP wasm features.
    if targets.targets_legacy_browsers() {
        return false;
    }
    true
}

/// Computes the codegen disable flags implied by the targeted browser
/// versions, in declaration order.
pub fn disable_flags(targets: &BrowserTargets) -> Vec<&'static str> {
    let mut flags = Vec::new();

    // Threads and relocatable output implicitly opt into all of these
    // features. TODO: bump the minimum browser versions when threads or
    // relocatable output is enabled instead of skipping the checks.
    if targets.threads || targets.relocatable {
        return flags;
    }

    for &feature in Feature::ALL.iter() {
        if !supported(feature, targets) {
            debug!(
                "adding {} due to target browser selection",
                feature.disable_flag()
            );
            flags.push(feature.disable_flag());
        }
    }

    flags
}
