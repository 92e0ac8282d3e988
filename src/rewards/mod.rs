//! Rewards that grant (or cost) stars

pub mod catalog;

pub use catalog::{default_catalog, CatalogEntry, Reward, RewardKind, RewardStars};
