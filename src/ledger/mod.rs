//! A player's star bookkeeping: the pool of unspent stars, their characters and
//! a log of every change.
//!
//! There are two ways to give a character stars and they serve different
//! purposes:
//!
//! - `spend` moves stars from the pool of unspent stars to a character.
//! - `set_character_stars` updates a character in place. This is used when
//!   claiming rewards that can only be spent on that character.

pub mod log;

pub use log::{LogEntry, LogValue};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TrackerError};
use crate::core::types::{CharacterId, CharacterProgression, Level, Stars};
use crate::progression::{ProgressionChange, ProgressionEngine};
use crate::rewards::Reward;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub stars: Stars,
    pub dead: bool,
}

/// What happened when a reward was claimed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RewardOutcome {
    pub pool_delta: i64,
    pub character_delta: i64,
    pub change: ProgressionChange,
}

#[derive(Debug)]
pub struct StarLedger<'e> {
    engine: &'e ProgressionEngine,
    unspent_stars: Stars,
    characters: AHashMap<CharacterId, Character>,
    logs: Vec<LogEntry>,
    next_log_id: u64,
}

impl<'e> StarLedger<'e> {
    pub fn new(engine: &'e ProgressionEngine) -> Self {
        Self {
            engine,
            unspent_stars: 0,
            characters: AHashMap::new(),
            logs: Vec::new(),
            next_log_id: 1,
        }
    }

    pub fn unspent_stars(&self) -> Stars {
        self.unspent_stars
    }

    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn progression(&self, id: CharacterId) -> Result<CharacterProgression> {
        let character = self.get(id)?;
        Ok(self.engine.stars_to_level(character.stars))
    }

    /// Characters ordered by stars, highest first
    pub fn sorted_characters(&self) -> Vec<&Character> {
        let mut characters: Vec<&Character> = self.characters.values().collect();
        characters.sort_by(|a, b| b.stars.cmp(&a.stars).then_with(|| a.name.cmp(&b.name)));
        characters
    }

    /// Log entries, newest first
    pub fn logs(&self) -> impl Iterator<Item = &LogEntry> {
        self.logs.iter().rev()
    }

    /// Add or remove stars from the pool of unspent stars
    pub fn adjust_pool(&mut self, delta: i64, reason: Option<String>) -> Result<Stars> {
        let Some(unspent) = apply_delta(self.unspent_stars, delta) else {
            tracing::warn!("Rejected pool adjustment of {} stars", delta);
            return Err(TrackerError::NegativePool);
        };

        self.unspent_stars = unspent;
        self.push_log(
            None,
            LogValue::StarsAdded {
                amount: delta,
                reason,
            },
        );
        tracing::info!("Adjusted star pool by {} to {}", delta, unspent);

        Ok(unspent)
    }

    /// Create a new character at `level`, paid for from the pool unless `free`
    pub fn add_character(&mut self, name: impl Into<String>, level: Level, free: bool) -> Result<CharacterId> {
        let stars = self.engine.try_level_to_stars(level)?;
        let cost = if free {
            0
        } else {
            self.engine.character_creation_cost(level)
        };

        if cost > self.unspent_stars {
            return Err(TrackerError::InsufficientStars {
                requested: cost,
                available: self.unspent_stars,
            });
        }

        let character = Character {
            id: CharacterId::new(),
            name: name.into(),
            stars,
            dead: false,
        };
        let id = character.id;

        self.unspent_stars -= cost;
        self.push_log(Some(id), LogValue::CharacterAdded(character.clone()));
        tracing::info!("Added level {} character '{}' for {} stars", level, character.name, cost);
        self.characters.insert(id, character);

        Ok(id)
    }

    /// Create a new character at the configured starting level
    pub fn add_default_character(&mut self, name: impl Into<String>, free: bool) -> Result<CharacterId> {
        let level = self.engine.config().default_creation_level;
        self.add_character(name, level, free)
    }

    pub fn remove_character(&mut self, id: CharacterId) -> Result<Character> {
        let character = self
            .characters
            .remove(&id)
            .ok_or(TrackerError::CharacterNotFound(id))?;

        // The character no longer exists, so the entry isn't linked to it
        self.push_log(None, LogValue::CharacterDeleted(character.clone()));
        tracing::info!("Deleted character '{}'", character.name);

        Ok(character)
    }

    pub fn rename_character(&mut self, id: CharacterId, name: impl Into<String>) -> Result<()> {
        self.get_mut(id)?.name = name.into();
        Ok(())
    }

    pub fn set_dead(&mut self, id: CharacterId, dead: bool) -> Result<()> {
        self.get_mut(id)?.dead = dead;
        Ok(())
    }

    /// Spend stars from the pool on a character. A negative amount refunds
    /// stars back to the pool.
    pub fn spend(&mut self, id: CharacterId, stars: i64) -> Result<ProgressionChange> {
        if stars == 0 {
            return Err(TrackerError::ZeroSpend);
        }

        let current = self.get(id)?.stars;
        if stars > 0 && stars.unsigned_abs() > self.unspent_stars {
            tracing::warn!(
                "Rejected spending {} stars with {} unspent",
                stars,
                self.unspent_stars
            );
            return Err(TrackerError::InsufficientStars {
                requested: stars.unsigned_abs(),
                available: self.unspent_stars,
            });
        }
        let Some(new_stars) = apply_delta(current, stars) else {
            return Err(TrackerError::NegativeCharacterStars);
        };
        let Some(unspent) = apply_delta(self.unspent_stars, -stars) else {
            return Err(TrackerError::NegativePool);
        };

        self.unspent_stars = unspent;
        let change = self.update_stars(id, new_stars)?;
        self.push_log(
            Some(id),
            LogValue::StarsSpent {
                amount: stars,
                reason: None,
            },
        );

        Ok(change)
    }

    /// Set a character's stars in place without touching the pool
    pub fn set_character_stars(
        &mut self,
        id: CharacterId,
        stars: Stars,
        reason: Option<String>,
    ) -> Result<ProgressionChange> {
        let old_stars = self.get(id)?.stars;
        let amount = star_delta(old_stars, stars)?;
        let change = self.update_stars(id, stars)?;

        if amount != 0 {
            self.push_log(Some(id), LogValue::StarsSpent { amount, reason });
        }

        Ok(change)
    }

    /// Spend whatever is needed from the pool to bring a character to exactly
    /// `stars`. Used when clicking a banner in the leveling table.
    pub fn level_character_to(&mut self, id: CharacterId, stars: Stars) -> Result<ProgressionChange> {
        let current = self.get(id)?.stars;
        if stars > current && stars - current > self.unspent_stars {
            return Err(TrackerError::InsufficientStars {
                requested: stars - current,
                available: self.unspent_stars,
            });
        }

        let delta = star_delta(current, stars)?;
        if delta == 0 {
            return Ok(ProgressionChange::default());
        }

        self.spend(id, delta)
    }

    /// Claim a reward for a character. Global stars go to the pool, character
    /// bound stars directly to the character.
    pub fn claim_reward(&mut self, id: CharacterId, reward: &Reward) -> Result<RewardOutcome> {
        let progression = self.progression(id)?;
        let stars = reward.calculate(self.engine, &progression);

        // Validate both halves before changing anything
        let current = self.get(id)?.stars;
        let new_stars =
            apply_delta(current, stars.character_bound_stars).ok_or(TrackerError::NegativeCharacterStars)?;
        if apply_delta(self.unspent_stars, stars.global_stars).is_none() {
            return Err(TrackerError::NegativePool);
        }

        if stars.global_stars != 0 {
            self.adjust_pool(stars.global_stars, Some(reward.name.clone()))?;
        }

        let mut change = ProgressionChange::default();
        if stars.character_bound_stars != 0 {
            change = self.set_character_stars(id, new_stars, Some(reward.name.clone()))?;
        }

        Ok(RewardOutcome {
            pool_delta: stars.global_stars,
            character_delta: stars.character_bound_stars,
            change,
        })
    }

    fn get(&self, id: CharacterId) -> Result<&Character> {
        self.characters.get(&id).ok_or(TrackerError::CharacterNotFound(id))
    }

    fn get_mut(&mut self, id: CharacterId) -> Result<&mut Character> {
        self.characters
            .get_mut(&id)
            .ok_or(TrackerError::CharacterNotFound(id))
    }

    fn update_stars(&mut self, id: CharacterId, stars: Stars) -> Result<ProgressionChange> {
        let engine = self.engine;
        let character = self.get_mut(id)?;

        let before = engine.stars_to_level(character.stars);
        character.stars = stars;
        let after = engine.stars_to_level(stars);

        let change = ProgressionChange::between(&before, &after);
        if let Some(level) = change.leveled_up_to {
            tracing::info!("'{}' is now level {}", character.name, level);
        }

        Ok(change)
    }

    fn push_log(&mut self, character: Option<CharacterId>, value: LogValue) {
        self.logs.push(LogEntry {
            id: self.next_log_id,
            character,
            value,
        });
        self.next_log_id += 1;
    }
}

/// Signed change from `from` to `to`, as long as both fit in an `i64`
fn star_delta(from: Stars, to: Stars) -> Result<i64> {
    let signed = |stars: Stars| i64::try_from(stars).map_err(|_| TrackerError::StarCountOutOfRange(stars));
    signed(to)?
        .checked_sub(signed(from)?)
        .ok_or(TrackerError::StarCountOutOfRange(to.max(from)))
}

fn apply_delta(stars: Stars, delta: i64) -> Option<Stars> {
    if delta >= 0 {
        stars.checked_add(delta.unsigned_abs())
    } else {
        stars.checked_sub(delta.unsigned_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ProgressionConfig;

    fn engine() -> ProgressionEngine {
        ProgressionEngine::new(ProgressionConfig::default()).unwrap()
    }

    #[test]
    fn test_adjust_pool_rejects_negative() {
        let engine = engine();
        let mut ledger = StarLedger::new(&engine);
        assert_eq!(ledger.adjust_pool(5, None).unwrap(), 5);
        assert!(matches!(ledger.adjust_pool(-6, None), Err(TrackerError::NegativePool)));
        assert_eq!(ledger.unspent_stars(), 5);
        assert_eq!(ledger.logs().count(), 1);
    }

    #[test]
    fn test_add_character_charges_creation_cost() {
        let engine = engine();
        let mut ledger = StarLedger::new(&engine);
        ledger.adjust_pool(40, None).unwrap();

        let id = ledger.add_character("Brynn", 5, false).unwrap();
        assert_eq!(ledger.unspent_stars(), 8);
        assert_eq!(ledger.character(id).unwrap().stars, 32);
        assert_eq!(ledger.progression(id).unwrap(), CharacterProgression::new(5, 0, 0));
    }

    #[test]
    fn test_add_default_character_starts_at_level_5() {
        let engine = engine();
        let mut ledger = StarLedger::new(&engine);
        let id = ledger.add_default_character("Brynn", true).unwrap();
        assert_eq!(ledger.progression(id).unwrap().level, 5);
    }

    #[test]
    fn test_add_character_too_expensive() {
        let engine = engine();
        let mut ledger = StarLedger::new(&engine);
        let err = ledger.add_character("Brynn", 5, false).unwrap_err();
        assert!(matches!(err, TrackerError::InsufficientStars { requested: 32, available: 0 }));

        assert!(ledger.add_character("Brynn", 5, true).is_ok());
        assert!(matches!(
            ledger.add_character("Nobody", 21, true),
            Err(TrackerError::LevelNotFound(21))
        ));
    }

    #[test]
    fn test_spend_rules() {
        let engine = engine();
        let mut ledger = StarLedger::new(&engine);
        let id = ledger.add_character("Brynn", 1, true).unwrap();
        ledger.adjust_pool(3, None).unwrap();

        assert!(matches!(ledger.spend(id, 0), Err(TrackerError::ZeroSpend)));
        assert!(matches!(
            ledger.spend(id, 4),
            Err(TrackerError::InsufficientStars { requested: 4, available: 3 })
        ));
        assert!(matches!(ledger.spend(id, -1), Err(TrackerError::NegativeCharacterStars)));

        ledger.spend(id, 3).unwrap();
        assert_eq!(ledger.unspent_stars(), 0);
        assert_eq!(ledger.character(id).unwrap().stars, 3);

        // Refund
        ledger.spend(id, -2).unwrap();
        assert_eq!(ledger.unspent_stars(), 2);
        assert_eq!(ledger.character(id).unwrap().stars, 1);
    }

    #[test]
    fn test_spend_reports_level_up() {
        let engine = engine();
        let mut ledger = StarLedger::new(&engine);
        let id = ledger.add_character("Brynn", 1, true).unwrap();
        ledger.adjust_pool(10, None).unwrap();

        let change = ledger.spend(id, 8).unwrap();
        assert_eq!(change.leveled_up_to, Some(2));
    }

    #[test]
    fn test_set_character_stars_logs_only_changes() {
        let engine = engine();
        let mut ledger = StarLedger::new(&engine);
        let id = ledger.add_character("Brynn", 2, true).unwrap();
        let logged = ledger.logs().count();

        ledger.set_character_stars(id, 8, None).unwrap();
        assert_eq!(ledger.logs().count(), logged);

        ledger.set_character_stars(id, 5, Some("penalty".into())).unwrap();
        let newest = ledger.logs().next().unwrap();
        assert_eq!(
            newest.value,
            LogValue::StarsSpent {
                amount: -3,
                reason: Some("penalty".into())
            }
        );
    }

    #[test]
    fn test_set_character_stars_out_of_range() {
        let engine = engine();
        let mut ledger = StarLedger::new(&engine);
        let id = ledger.add_character("Brynn", 2, true).unwrap();
        let logged = ledger.logs().count();

        let err = ledger.set_character_stars(id, 1 << 63, None).unwrap_err();
        assert!(matches!(err, TrackerError::StarCountOutOfRange(_)));
        assert_eq!(ledger.character(id).unwrap().stars, 8);
        assert_eq!(ledger.logs().count(), logged);

        // The largest signed count still works and logs the exact change
        ledger.set_character_stars(id, i64::MAX as u64, None).unwrap();
        assert!(matches!(
            ledger.logs().next().unwrap().value,
            LogValue::StarsSpent { amount, .. } if amount == i64::MAX - 8
        ));
    }

    #[test]
    fn test_level_character_to_huge_target() {
        let engine = engine();
        let mut ledger = StarLedger::new(&engine);
        let id = ledger.add_character("Brynn", 2, true).unwrap();

        let err = ledger.level_character_to(id, 1 << 63).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::InsufficientStars { requested, available: 0 } if requested == (1 << 63) - 8
        ));

        // Enough in the pool, but the change can't be expressed as a spend
        ledger.adjust_pool(i64::MAX, None).unwrap();
        ledger.adjust_pool(i64::MAX, None).unwrap();
        let err = ledger.level_character_to(id, 1 << 63).unwrap_err();
        assert!(matches!(err, TrackerError::StarCountOutOfRange(_)));
        assert_eq!(ledger.character(id).unwrap().stars, 8);
    }

    #[test]
    fn test_remove_character() {
        let engine = engine();
        let mut ledger = StarLedger::new(&engine);
        let id = ledger.add_character("Brynn", 1, true).unwrap();

        let removed = ledger.remove_character(id).unwrap();
        assert_eq!(removed.name, "Brynn");
        assert!(ledger.character(id).is_none());
        assert!(matches!(ledger.remove_character(id), Err(TrackerError::CharacterNotFound(_))));
        assert!(matches!(ledger.logs().next().unwrap().value, LogValue::CharacterDeleted(_)));
    }

    #[test]
    fn test_sorted_characters() {
        let engine = engine();
        let mut ledger = StarLedger::new(&engine);
        ledger.add_character("Low", 1, true).unwrap();
        ledger.add_character("High", 10, true).unwrap();
        ledger.add_character("Mid", 5, true).unwrap();

        let names: Vec<&str> = ledger.sorted_characters().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn test_rename_and_kill() {
        let engine = engine();
        let mut ledger = StarLedger::new(&engine);
        let id = ledger.add_character("Brynn", 1, true).unwrap();
        ledger.rename_character(id, "Brynn the Bold").unwrap();
        ledger.set_dead(id, true).unwrap();

        let character = ledger.character(id).unwrap();
        assert_eq!(character.name, "Brynn the Bold");
        assert!(character.dead);
    }
}
