//! Exptracker - star, banner and level progression for campaign characters

pub mod core;
pub mod ledger;
pub mod progression;
pub mod rewards;
