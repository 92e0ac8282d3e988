pub mod config;
pub mod error;
pub mod types;

pub use config::{config, set_config, ProgressionConfig, SectionConfig};
pub use error::{Result, TrackerError};
pub use types::{CharacterId, CharacterProgression, Level, Stars};
