//! Star, banner and level progression
//!
//! The EXP system works as follows:
//!
//! - Characters collect stars. The raw star count is the only thing stored.
//! - Stars buy banners. A banner's price depends on the character's level.
//! - A fixed number of banners advances the character one level, up to the cap.
//!
//! The free functions below use the process-wide engine built from
//! `core::config::config()`. Tests and tools with their own curve can build a
//! `ProgressionEngine` directly.

pub mod change;
pub mod display;
pub mod engine;
pub mod leveling_table;

pub use change::ProgressionChange;
pub use display::{format_level, progress_label};
pub use engine::ProgressionEngine;
pub use leveling_table::{
    banner_state, BannerState, LevelingTable, TableBanner, TableCell, TableLevel, TableSection,
};

use std::sync::OnceLock;

use crate::core::config::config;
use crate::core::types::{CharacterProgression, Level, Stars};

static ENGINE: OnceLock<ProgressionEngine> = OnceLock::new();

/// Get the global progression engine, building its tables on first use
pub fn engine() -> &'static ProgressionEngine {
    // The global config is validated by `set_config` or is the default
    ENGINE.get_or_init(|| ProgressionEngine::from_validated(config().clone()))
}

pub fn stars_to_level(stars: Stars) -> CharacterProgression {
    engine().stars_to_level(stars)
}

pub fn level_to_stars(level: Level) -> Stars {
    engine().level_to_stars(level)
}

pub fn next_level_progress(progression: &CharacterProgression) -> f64 {
    engine().next_level_progress(progression)
}

pub fn banner_cost(progression: &CharacterProgression, banners: i64, whole_banners: bool) -> Stars {
    engine().banner_cost(progression, banners, whole_banners)
}

pub fn leveling_table() -> &'static LevelingTable {
    engine().leveling_table()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_engine_uses_default_curve() {
        assert_eq!(level_to_stars(2), 8);
        assert_eq!(stars_to_level(8), CharacterProgression::new(2, 0, 0));
        assert_eq!(banner_cost(&CharacterProgression::new(1, 7, 0), 1, false), 1);
        assert!(std::ptr::eq(leveling_table(), leveling_table()));
    }
}
