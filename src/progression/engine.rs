//! Star/level conversions over the cached cost tables
//!
//! Only the raw number of stars is ever stored for a character. Levels, banners
//! and remaining stars are a view computed from that number whenever needed.

use std::sync::OnceLock;

use crate::core::config::ProgressionConfig;
use crate::core::error::{Result, TrackerError};
use crate::core::types::{CharacterProgression, Level, Stars};
use crate::progression::leveling_table::LevelingTable;

/// The leveling curve: per-level banner costs and the derived cumulative table
#[derive(Debug)]
pub struct ProgressionEngine {
    config: ProgressionConfig,
    /// Stars needed to reach each level, indexed by `level - 1`
    stars_for_level: Vec<Stars>,
    leveling_table: OnceLock<LevelingTable>,
}

impl ProgressionEngine {
    /// Build the engine from a config, rejecting inconsistent cost tables
    pub fn new(config: ProgressionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    pub(crate) fn from_validated(config: ProgressionConfig) -> Self {
        let stars_for_level = build_stars_for_level(&config);
        tracing::debug!(
            "Built stars-for-level table: {} levels, {} stars to reach the cap",
            stars_for_level.len(),
            stars_for_level.last().copied().unwrap_or(0)
        );

        Self {
            config,
            stars_for_level,
            leveling_table: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn max_level(&self) -> Level {
        self.config.max_level
    }

    /// Whether a level is at (or beyond) the cap where leveling stops
    pub fn is_capped(&self, level: Level) -> bool {
        level >= self.config.max_level
    }

    /// Cumulative stars needed to reach each level, starting at level 1
    pub fn stars_for_level(&self) -> &[Stars] {
        &self.stars_for_level
    }

    /// Banners needed to advance from `level` to the next one
    pub fn banners_per_level(&self, level: Level) -> u64 {
        if self.is_capped(level) {
            self.config.legend_banners
        } else {
            self.config.banners_per_level
        }
    }

    /// Stars needed for one banner at `level`
    pub fn try_stars_per_banner(&self, level: Level) -> Result<Stars> {
        level_index(level)
            .and_then(|i| self.config.stars_per_banner.get(i).copied())
            .ok_or(TrackerError::LevelNotFound(level))
    }

    /// Stars needed for one banner at `level`, pinned to the nearest level in
    /// the table. Levels past the cap cost the same as the cap.
    pub fn stars_per_banner(&self, level: Level) -> Stars {
        let level = level.clamp(1, self.config.max_level);
        self.config.stars_per_banner[level as usize - 1]
    }

    /// Stars needed to reach `level`, or zero for levels outside the table
    pub fn level_to_stars(&self, level: Level) -> Stars {
        self.try_level_to_stars(level).unwrap_or(0)
    }

    /// Stars needed to reach `level`
    pub fn try_level_to_stars(&self, level: Level) -> Result<Stars> {
        level_index(level)
            .and_then(|i| self.stars_for_level.get(i).copied())
            .ok_or(TrackerError::LevelNotFound(level))
    }

    /// Stars it costs to create a new character at `level`
    pub fn character_creation_cost(&self, level: Level) -> Stars {
        self.level_to_stars(level)
    }

    /// Convert a raw star count into a level, banners and remaining stars
    pub fn stars_to_level(&self, total_stars: Stars) -> CharacterProgression {
        // Thresholds are strictly increasing and the first one is zero, so at
        // least level 1 always qualifies
        let level = self
            .stars_for_level
            .partition_point(|&threshold| threshold <= total_stars)
            .max(1) as Level;

        let level_cost = self.stars_for_level[level as usize - 1];
        let banner_cost = self.stars_per_banner(level);
        let banners = (total_stars - level_cost) / banner_cost;
        let stars = total_stars - level_cost - banners * banner_cost;

        CharacterProgression {
            level,
            banners,
            stars,
        }
    }

    /// Convert a progression back into a raw star count
    pub fn progression_to_stars(&self, progression: &CharacterProgression) -> Stars {
        self.level_to_stars(progression.level)
            + progression.banners * self.stars_per_banner(progression.level)
            + progression.stars
    }

    /// How far the character has progressed towards the next level, as a
    /// fraction in `[0, 1)`.
    ///
    /// At the cap there is no next level, so the number of banners owned is
    /// returned instead. Callers must check `is_capped` before treating the
    /// value as a fraction.
    pub fn next_level_progress(&self, progression: &CharacterProgression) -> f64 {
        if self.is_capped(progression.level) {
            return progression.banners as f64;
        }

        let banner_cost = self.stars_per_banner(progression.level) as f64;
        (progression.banners as f64 + progression.stars as f64 / banner_cost)
            / self.banners_per_level(progression.level) as f64
    }

    /// Stars needed to buy `banners` more banners starting from `progression`.
    ///
    /// With `whole_banners` set, stars already put towards the current banner
    /// don't lower the price. The cost of every banner is taken at the level the
    /// character will be at when buying it, so purchases crossing a level-up
    /// get more expensive halfway through.
    pub fn banner_cost(
        &self,
        progression: &CharacterProgression,
        banners: i64,
        whole_banners: bool,
    ) -> Stars {
        if banners <= 0 {
            return 0;
        }

        let mut level = progression.level.clamp(1, self.config.max_level);
        let mut owned = progression.banners;
        let mut remainder = if whole_banners { 0 } else { progression.stars };
        let mut total = 0;

        for _ in 0..banners {
            total += self.stars_per_banner(level).saturating_sub(remainder);
            remainder = 0;

            if !self.is_capped(level) && owned + 1 >= self.banners_per_level(level) {
                level += 1;
                owned = 0;
            } else {
                owned += 1;
            }
        }

        total
    }

    /// The full leveling table, built on first use
    pub fn leveling_table(&self) -> &LevelingTable {
        self.leveling_table
            .get_or_init(|| LevelingTable::build(self))
    }
}

fn level_index(level: Level) -> Option<usize> {
    (level as usize).checked_sub(1)
}

/// Single forward pass: `stars_for_level[L + 1] = stars_for_level[L] + cost[L] * banners`
fn build_stars_for_level(config: &ProgressionConfig) -> Vec<Stars> {
    let mut table = Vec::with_capacity(config.max_level as usize);
    let mut total = 0;
    table.push(total);

    // There's no progression after the cap
    for &banner_cost in config.stars_per_banner.iter().take(config.max_level as usize - 1) {
        total += banner_cost * config.banners_per_level;
        table.push(total);
    }

    table
}
