//! Reward catalog
//!
//! Some rewards go to the player's global pool of unspent stars, some are bound
//! to the character that earned them, and quest rewards are split between both.

use serde::{Deserialize, Serialize};

use crate::core::types::CharacterProgression;
use crate::progression::ProgressionEngine;

/// How the stars of a reward are distributed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RewardStars {
    pub global_stars: i64,
    pub character_bound_stars: i64,
}

impl RewardStars {
    pub fn global(stars: i64) -> Self {
        Self {
            global_stars: stars,
            character_bound_stars: 0,
        }
    }

    pub fn character_bound(stars: i64) -> Self {
        Self {
            global_stars: 0,
            character_bound_stars: stars,
        }
    }

    /// Half the stars go to the character, the other half (rounded up) to the pool
    pub fn split(stars: i64) -> Self {
        Self {
            global_stars: stars - stars.div_euclid(2),
            character_bound_stars: stars.div_euclid(2),
        }
    }

    pub fn total(&self) -> i64 {
        self.global_stars + self.character_bound_stars
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardKind {
    /// Fixed number of stars, split between pool and character
    Quest { stars: i64 },
    /// A number of whole banners at the character's level, split between pool
    /// and character
    QuestBanners { banners: i64 },
    Global(i64),
    CharacterBound(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    /// Shown in the reward menu, includes the number of stars or banners
    pub name: String,
    pub kind: RewardKind,
}

impl Reward {
    pub fn new(name: impl Into<String>, kind: RewardKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn calculate(
        &self,
        engine: &ProgressionEngine,
        progression: &CharacterProgression,
    ) -> RewardStars {
        match self.kind {
            RewardKind::Quest { stars } => RewardStars::split(stars),
            RewardKind::QuestBanners { banners } => {
                // Partial progress shouldn't make a quest worth less
                let stars = engine.banner_cost(progression, banners, true);
                RewardStars::split(stars as i64)
            }
            RewardKind::Global(stars) => RewardStars::global(stars),
            RewardKind::CharacterBound(stars) => RewardStars::character_bound(stars),
        }
    }

    /// Whether the reward only changes the current character's stars. Quest
    /// rewards also touch the character but are not considered bound.
    pub fn is_character_bound(
        &self,
        engine: &ProgressionEngine,
        progression: &CharacterProgression,
    ) -> bool {
        let stars = self.calculate(engine, progression);
        stars.global_stars == 0 && stars.character_bound_stars != 0
    }

    /// Whether claiming this costs stars rather than granting them
    pub fn is_negative(&self, engine: &ProgressionEngine, progression: &CharacterProgression) -> bool {
        let stars = self.calculate(engine, progression);
        stars.global_stars < 0 || stars.character_bound_stars < 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEntry {
    Reward(Reward),
    Divider,
}

/// The rewards available on a character page, in menu order
pub fn default_catalog() -> Vec<CatalogEntry> {
    use RewardKind::*;

    let quests = [1, 2, 3]
        .into_iter()
        .map(|banners| {
            let plural = if banners == 1 { "" } else { "s" };
            Reward::new(
                format!("Completed a quest ({banners} banner{plural})"),
                QuestBanners { banners },
            )
        })
        .chain(
            [2, 4, 5, 6, 8, 10, 12].into_iter().map(|stars| {
                Reward::new(format!("Completed a quest ({stars} stars)"), Quest { stars })
            }),
        );

    let contributions = [
        ("This character has won an NPC auction (1 star)", CharacterBound(1)),
        ("My proposed quest was accepted (1 star)", Global(1)),
        ("I was last session's MVP (1 star)", Global(1)),
        ("I've written a session log (2 stars)", Global(2)),
        ("I've written lore for my own campaign (2 stars)", Global(2)),
        ("I've created a piece of art (2 stars)", Global(2)),
        ("I've brought snacks to share (2 stars)", Global(2)),
        ("I've arranged a location for a session (2 stars)", Global(2)),
        ("I've registered this character on the Drive (3 stars)", CharacterBound(3)),
        ("I've submitted this character's backstory (4 stars)", CharacterBound(4)),
        ("I've filled in a survey (5 stars)", Global(5)),
        ("I've made the SDM sad with my character's death (6 stars)", Global(6)),
        ("I've helped out with the Drive (7 stars)", Global(7)),
        ("I've DM'ed a session (8 stars)", Global(8)),
    ];

    let inspiration = [
        ("I've received an inspiration star (1 star)", Global(1)),
        ("Buy inspiration (-1 star)", Global(-1)),
    ];

    let mut catalog: Vec<CatalogEntry> = quests.map(CatalogEntry::Reward).collect();
    catalog.push(CatalogEntry::Divider);
    catalog.extend(
        contributions
            .into_iter()
            .map(|(name, kind)| CatalogEntry::Reward(Reward::new(name, kind))),
    );
    catalog.push(CatalogEntry::Divider);
    catalog.extend(
        inspiration
            .into_iter()
            .map(|(name, kind)| CatalogEntry::Reward(Reward::new(name, kind))),
    );

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ProgressionConfig;

    fn engine() -> ProgressionEngine {
        ProgressionEngine::new(ProgressionConfig::default()).unwrap()
    }

    #[test]
    fn test_split_rounds_pool_up() {
        assert_eq!(RewardStars::split(5), RewardStars { global_stars: 3, character_bound_stars: 2 });
        assert_eq!(RewardStars::split(4), RewardStars { global_stars: 2, character_bound_stars: 2 });
        assert_eq!(RewardStars::split(5).total(), 5);
    }

    #[test]
    fn test_quest_banners_ignore_partial_stars() {
        let engine = engine();
        let reward = Reward::new("quest", RewardKind::QuestBanners { banners: 2 });
        // Level 8: 3 stars per banner, one star already towards the next banner
        let progression = CharacterProgression::new(8, 0, 1);
        assert_eq!(reward.calculate(&engine, &progression), RewardStars::split(6));
    }

    #[test]
    fn test_quest_banners_across_level_up() {
        let engine = engine();
        let reward = Reward::new("quest", RewardKind::QuestBanners { banners: 2 });
        let progression = CharacterProgression::new(4, 7, 0);
        assert_eq!(reward.calculate(&engine, &progression).total(), 3);
    }

    #[test]
    fn test_character_bound_and_negative() {
        let engine = engine();
        let progression = CharacterProgression::default();
        let auction = Reward::new("auction", RewardKind::CharacterBound(1));
        let quest = Reward::new("quest", RewardKind::Quest { stars: 4 });
        let inspiration = Reward::new("buy", RewardKind::Global(-1));

        assert!(auction.is_character_bound(&engine, &progression));
        assert!(!quest.is_character_bound(&engine, &progression));
        assert!(inspiration.is_negative(&engine, &progression));
        assert!(!quest.is_negative(&engine, &progression));
    }

    #[test]
    fn test_default_catalog_layout() {
        let catalog = default_catalog();
        let dividers = catalog
            .iter()
            .filter(|e| matches!(e, CatalogEntry::Divider))
            .count();
        assert_eq!(dividers, 2);
        assert!(matches!(catalog.first(), Some(CatalogEntry::Reward(_))));
        assert!(matches!(catalog.last(), Some(CatalogEntry::Reward(r)) if r.kind == RewardKind::Global(-1)));
    }
}
