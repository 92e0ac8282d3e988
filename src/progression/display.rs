//! Short text summaries of a character's progression

use crate::core::types::{CharacterProgression, Level};
use crate::progression::engine::ProgressionEngine;

/// Level as shown to players. Nothing exists past the cap, so any higher level
/// is shown as the cap with a plus.
pub fn format_level(engine: &ProgressionEngine, level: Level) -> String {
    if level > engine.max_level() {
        format!("{}+", engine.max_level())
    } else {
        level.to_string()
    }
}

/// Summary used in character lists, e.g. `lvl 5 + 37.5%` or `lvl 20 + 3b`
pub fn progress_label(
    engine: &ProgressionEngine,
    progression: &CharacterProgression,
    dead: bool,
) -> String {
    let level = format_level(engine, progression.level);
    if dead {
        return format!("lvl {} (dead)", level);
    }

    if engine.is_capped(progression.level) {
        return format!("lvl {} + {}b", level, progression.banners);
    }

    let percent = engine.next_level_progress(progression) * 100.0;
    format!("lvl {} + {:.1}%", level, percent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ProgressionConfig;

    #[test]
    fn test_format_level() {
        let engine = ProgressionEngine::new(ProgressionConfig::default()).unwrap();
        assert_eq!(format_level(&engine, 1), "1");
        assert_eq!(format_level(&engine, 20), "20");
        assert_eq!(format_level(&engine, 23), "20+");
    }

    #[test]
    fn test_label_past_cap() {
        let engine = ProgressionEngine::new(ProgressionConfig::default()).unwrap();
        let progression = CharacterProgression::new(21, 4, 0);
        assert_eq!(progress_label(&engine, &progression, false), "lvl 20+ + 4b");
        assert_eq!(progress_label(&engine, &progression, true), "lvl 20+ (dead)");
    }

    #[test]
    fn test_labels() {
        let engine = ProgressionEngine::new(ProgressionConfig::default()).unwrap();
        let progression = CharacterProgression::new(5, 3, 0);
        assert_eq!(progress_label(&engine, &progression, false), "lvl 5 + 37.5%");
        assert_eq!(progress_label(&engine, &progression, true), "lvl 5 (dead)");
        assert_eq!(
            progress_label(&engine, &CharacterProgression::new(20, 3, 2), false),
            "lvl 20 + 3b"
        );
        assert_eq!(
            progress_label(&engine, &CharacterProgression::new(1, 0, 0), false),
            "lvl 1 + 0.0%"
        );
    }
}
