//! Detecting level-ups between two progressions

use serde::Serialize;

use crate::core::types::{CharacterProgression, Level};

/// What changed between two progressions of the same character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProgressionChange {
    /// The new level, if the character leveled up
    pub leveled_up_to: Option<Level>,
    /// The character lost a level or banners. Banner animations have to be
    /// restarted to stay in sync.
    pub regressed: bool,
}

impl ProgressionChange {
    pub fn between(before: &CharacterProgression, after: &CharacterProgression) -> Self {
        let leveled_up_to = (after.level > before.level).then_some(after.level);
        let regressed = after.level < before.level
            || (after.level == before.level && after.banners < before.banners);

        Self {
            leveled_up_to,
            regressed,
        }
    }

    pub fn leveled_up(&self) -> bool {
        self.leveled_up_to.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_up() {
        let change = ProgressionChange::between(
            &CharacterProgression::new(4, 7, 0),
            &CharacterProgression::new(5, 0, 0),
        );
        assert_eq!(change.leveled_up_to, Some(5));
        assert!(!change.regressed);
    }

    #[test]
    fn test_new_banner_same_level() {
        let change = ProgressionChange::between(
            &CharacterProgression::new(4, 2, 0),
            &CharacterProgression::new(4, 3, 0),
        );
        assert_eq!(change, ProgressionChange::default());
    }

    #[test]
    fn test_refund_regresses() {
        let change = ProgressionChange::between(
            &CharacterProgression::new(5, 0, 0),
            &CharacterProgression::new(4, 7, 0),
        );
        assert!(!change.leveled_up());
        assert!(change.regressed);

        let change = ProgressionChange::between(
            &CharacterProgression::new(6, 3, 1),
            &CharacterProgression::new(6, 2, 1),
        );
        assert!(change.regressed);
    }
}
