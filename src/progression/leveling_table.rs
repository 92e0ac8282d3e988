//! The leveling table shown on a character's page
//!
//! Every star a character can own gets its own cell. Stars are numbered with a
//! single running counter across the whole table, so the index of a star is
//! exactly the raw star count a character needs to own it. This lets the
//! presentation layer fill banners by comparing indices with the character's
//! stars, without converting back and forth between levels.

use serde::Serialize;

use crate::core::types::{Level, Stars};
use crate::progression::engine::ProgressionEngine;

/// A banner and the absolute star indices that make it up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableBanner {
    pub stars: Vec<Stars>,
}

impl TableBanner {
    /// Star count at which this banner is complete
    pub fn threshold(&self) -> Stars {
        self.stars.last().copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableLevel {
    pub level: Level,
    pub banners: Vec<TableBanner>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSection {
    pub name: String,
    pub levels: Vec<TableLevel>,
}

impl TableSection {
    pub fn last_level(&self) -> Option<Level> {
        self.levels.last().map(|l| l.level)
    }
}

/// Where a star index lands in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCell {
    pub section: usize,
    pub level: Level,
    /// Zero-based banner within the level
    pub banner: usize,
    /// Zero-based star within the banner
    pub star: usize,
}

/// How a banner should be drawn for a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BannerState {
    /// The character already owns every star of this banner
    Filled,
    /// The player's unspent stars are enough to reach this banner
    Affordable,
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelingTable {
    pub sections: Vec<TableSection>,
}

impl LevelingTable {
    /// Build the table from the engine's cost curve and section catalog
    pub fn build(engine: &ProgressionEngine) -> Self {
        // Never reset between levels or sections
        let mut next_star: Stars = 1;
        let mut sections = Vec::with_capacity(engine.config().sections.len());

        for section in &engine.config().sections {
            let mut levels = Vec::new();

            for level in section.first_level..=section.last_level {
                let banner_cost = engine.stars_per_banner(level);
                let mut banners = Vec::new();

                for _ in 0..engine.banners_per_level(level) {
                    banners.push(TableBanner {
                        stars: (next_star..next_star + banner_cost).collect(),
                    });
                    next_star += banner_cost;
                }

                levels.push(TableLevel { level, banners });
            }

            sections.push(TableSection {
                name: section.name.clone(),
                levels,
            });
        }

        tracing::debug!(
            "Built leveling table: {} sections, {} stars",
            sections.len(),
            next_star - 1
        );

        Self { sections }
    }

    /// Highest star index in the table
    pub fn star_count(&self) -> Stars {
        self.banners().last().map_or(0, TableBanner::threshold)
    }

    pub fn levels(&self) -> impl Iterator<Item = &TableLevel> {
        self.sections.iter().flat_map(|s| s.levels.iter())
    }

    pub fn banners(&self) -> impl Iterator<Item = &TableBanner> {
        self.levels().flat_map(|l| l.banners.iter())
    }

    /// All star indices in table order
    pub fn star_indices(&self) -> impl Iterator<Item = Stars> + '_ {
        self.banners().flat_map(|b| b.stars.iter().copied())
    }

    pub fn section_for_level(&self, level: Level) -> Option<&TableSection> {
        self.sections
            .iter()
            .find(|s| s.levels.iter().any(|l| l.level == level))
    }

    /// Find the cell holding the `stars`-th star. Zero stars and counts past the
    /// end of the table have no cell.
    pub fn locate(&self, stars: Stars) -> Option<TableCell> {
        for (section_index, section) in self.sections.iter().enumerate() {
            for level in &section.levels {
                for (banner_index, banner) in level.banners.iter().enumerate() {
                    let (Some(&first), Some(&last)) = (banner.stars.first(), banner.stars.last())
                    else {
                        continue;
                    };
                    if (first..=last).contains(&stars) {
                        return Some(TableCell {
                            section: section_index,
                            level: level.level,
                            banner: banner_index,
                            star: (stars - first) as usize,
                        });
                    }
                }
            }
        }

        None
    }

    /// Which sections start collapsed for a character at `level`: those whose
    /// levels have all been completed
    pub fn collapsed_sections(&self, level: Level) -> Vec<(&str, bool)> {
        self.sections
            .iter()
            .map(|s| {
                let collapsed = s.last_level().map_or(false, |last| last < level);
                (s.name.as_str(), collapsed)
            })
            .collect()
    }
}

/// Decide how to draw a banner for a character with `character_stars`, given
/// the player's pool of `unspent_stars`
pub fn banner_state(banner: &TableBanner, character_stars: Stars, unspent_stars: Stars) -> BannerState {
    let threshold = banner.threshold();
    if character_stars >= threshold {
        BannerState::Filled
    } else if threshold - character_stars <= unspent_stars {
        BannerState::Affordable
    } else {
        BannerState::Locked
    }
}
