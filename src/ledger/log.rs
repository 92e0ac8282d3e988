//! Ledger log entries

use serde::{Deserialize, Serialize};

use crate::core::types::CharacterId;
use crate::ledger::Character;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogValue {
    /// Stars added to (or removed from) the pool of unspent stars
    StarsAdded { amount: i64, reason: Option<String> },
    /// Stars moved onto (or off) a character
    StarsSpent { amount: i64, reason: Option<String> },
    CharacterAdded(Character),
    CharacterDeleted(Character),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Sequential, starting at 1
    pub id: u64,
    pub character: Option<CharacterId>,
    #[serde(flatten)]
    pub value: LogValue,
}
