//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Character level (1 up to the configured cap)
pub type Level = u32;

/// Absolute star count, the only persisted progression value
pub type Stars = u64;

/// Unique identifier for characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

/// The progression of a character derived from its raw star count.
///
/// `banners` is the number of whole banners towards the next level and `stars`
/// the number of stars towards the next banner. At the level cap `banners`
/// counts every banner bought since reaching the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterProgression {
    pub level: Level,
    pub banners: u64,
    pub stars: Stars,
}

impl CharacterProgression {
    pub fn new(level: Level, banners: u64, stars: Stars) -> Self {
        Self {
            level,
            banners,
            stars,
        }
    }
}

impl Default for CharacterProgression {
    fn default() -> Self {
        Self::new(1, 0, 0)
    }
}
