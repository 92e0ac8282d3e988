//! Progression configuration with documented constants
//!
//! The leveling curve is fully described by the per-level banner cost table and
//! the number of banners needed per level. Everything else (the cumulative
//! stars-per-level table and the leveling table) is derived from these values
//! when the engine is built.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TrackerError};
use crate::core::types::{Level, Stars};

/// Upper bound on the number of stars in the leveling table, which holds one
/// entry per star
pub const MAX_TABLE_STARS: Stars = 1_000_000;

/// A named, contiguous range of levels in the leveling table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionConfig {
    pub name: String,
    pub first_level: Level,
    pub last_level: Level,
}

impl SectionConfig {
    pub fn new(name: impl Into<String>, first_level: Level, last_level: Level) -> Self {
        Self {
            name: name.into(),
            first_level,
            last_level,
        }
    }

    pub fn contains(&self, level: Level) -> bool {
        (self.first_level..=self.last_level).contains(&level)
    }
}

/// Configuration for the progression engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    // === LEVEL CURVE ===
    /// Highest real level a character can reach
    ///
    /// There is no progression after this level. Characters at the cap keep
    /// buying banners, but those only count towards rewards.
    pub max_level: Level,

    /// Number of banners needed to advance a single level below the cap
    pub banners_per_level: u64,

    /// Number of banners shown for the capped level in the leveling table
    ///
    /// Also used as the banners-per-level value at the cap, where it never
    /// triggers a level-up.
    pub legend_banners: u64,

    /// Stars needed to purchase one banner, indexed by `level - 1`
    ///
    /// A banner costs a single star at level one, with the cost increasing by
    /// a single star for every three levels after the fourth level. Must be
    /// non-decreasing and contain exactly `max_level` entries.
    pub stars_per_banner: Vec<Stars>,

    // === PRESENTATION ===
    /// Level ranges shown as collapsible sections in the leveling table
    pub sections: Vec<SectionConfig>,

    /// Level a newly created character starts at unless specified
    pub default_creation_level: Level,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            max_level: 20,
            banners_per_level: 8,
            legend_banners: 16,
            stars_per_banner: vec![
                1, 1, 1, 1, // 1-4
                2, 2, 2, // 5-7
                3, 3, 3, // 8-10
                4, 4, 4, // 11-13
                5, 5, 5, // 14-16
                6, 6, 6, // 17-19
                6, // 20
            ],
            sections: vec![
                SectionConfig::new("Recruit", 1, 4),
                SectionConfig::new("Adventurer", 5, 7),
                SectionConfig::new("Veteran", 8, 10),
                SectionConfig::new("Hero", 11, 13),
                SectionConfig::new("Champion", 14, 16),
                SectionConfig::new("Paragon", 17, 19),
                SectionConfig::new("Legend", 20, 20),
            ],
            default_creation_level: 5,
        }
    }
}

impl ProgressionConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML. Missing keys fall back to the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_level == 0 {
            return Err(invalid("max_level must be at least 1"));
        }

        if self.banners_per_level == 0 || self.legend_banners == 0 {
            return Err(invalid("banners per level must be positive"));
        }

        if self.stars_per_banner.len() != self.max_level as usize {
            return Err(invalid(format!(
                "stars_per_banner has {} entries, expected one per level up to {}",
                self.stars_per_banner.len(),
                self.max_level
            )));
        }

        if self.stars_per_banner.iter().any(|&cost| cost == 0) {
            return Err(invalid("banner costs must be positive"));
        }

        if let Some(window) = self.stars_per_banner.windows(2).find(|w| w[1] < w[0]) {
            return Err(invalid(format!(
                "banner costs must not decrease ({} followed by {})",
                window[0], window[1]
            )));
        }

        // Every level's banners plus the legend banners at the cap
        let cap_cost = self.stars_per_banner[self.max_level as usize - 1];
        let table_stars = self
            .stars_per_banner
            .iter()
            .take(self.max_level as usize - 1)
            .try_fold(0u64, |total, &cost| {
                cost.checked_mul(self.banners_per_level)
                    .and_then(|stars| total.checked_add(stars))
            })
            .and_then(|total| {
                cap_cost
                    .checked_mul(self.legend_banners)
                    .and_then(|stars| total.checked_add(stars))
            });
        match table_stars {
            Some(stars) if stars <= MAX_TABLE_STARS => {}
            _ => {
                return Err(invalid(format!(
                    "leveling table would hold more than {} stars",
                    MAX_TABLE_STARS
                )))
            }
        }

        // Sections must tile 1..=max_level in order
        let mut next_level = 1;
        for section in &self.sections {
            if section.first_level != next_level
                || section.last_level < section.first_level
                || section.last_level > self.max_level
            {
                return Err(invalid(format!(
                    "section '{}' ({}-{}) should start at level {} and end by level {}",
                    section.name, section.first_level, section.last_level, next_level, self.max_level
                )));
            }
            next_level = section.last_level + 1;
        }
        if next_level != self.max_level + 1 {
            return Err(invalid(format!(
                "sections cover levels up to {}, expected {}",
                next_level - 1,
                self.max_level
            )));
        }

        if !(1..=self.max_level).contains(&self.default_creation_level) {
            return Err(invalid(format!(
                "default_creation_level ({}) is outside 1-{}",
                self.default_creation_level, self.max_level
            )));
        }

        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> TrackerError {
    TrackerError::InvalidConfig(reason.into())
}

// === GLOBAL CONFIG ACCESS ===

use std::sync::OnceLock;

static CONFIG: OnceLock<ProgressionConfig> = OnceLock::new();

/// Get the global progression config (initializes with defaults if not set)
pub fn config() -> &'static ProgressionConfig {
    CONFIG.get_or_init(ProgressionConfig::default)
}

/// Set the global progression config (can only be called once)
///
/// Must happen before the first call to `config()` or `progression::engine()`.
pub fn set_config(config: ProgressionConfig) -> Result<()> {
    config.validate()?;
    CONFIG
        .set(config)
        .map_err(|_| invalid("progression config was already initialized"))
}
