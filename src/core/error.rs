use thiserror::Error;

use crate::core::types::{CharacterId, Level};

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Level not found in leveling table: {0}")]
    LevelNotFound(Level),

    #[error("Invalid progression config: {0}")]
    InvalidConfig(String),

    #[error("The number of stars spent must be non-zero")]
    ZeroSpend,

    #[error("Not enough unspent stars: requested {requested}, available {available}")]
    InsufficientStars { requested: u64, available: u64 },

    #[error("A character can't have a negative number of stars")]
    NegativeCharacterStars,

    #[error("The star pool can't go below zero")]
    NegativePool,

    #[error("Star count {0} is too large to adjust by")]
    StarCountOutOfRange(u64),

    #[error("Character not found: {0:?}")]
    CharacterNotFound(CharacterId),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
