//! Exptracker - Entry Point
//!
//! Command line access to the progression engine: convert between stars and
//! levels, price banners, and print the leveling table or reward catalog.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use exptracker::core::config::ProgressionConfig;
use exptracker::core::error::Result;
use exptracker::core::types::{CharacterProgression, Level, Stars};
use exptracker::progression::{banner_state, progress_label, BannerState, ProgressionEngine};
use exptracker::rewards::{default_catalog, CatalogEntry, RewardStars};

#[derive(Parser, Debug)]
#[command(name = "exptracker")]
#[command(about = "Convert between stars, banners and levels")]
struct Args {
    /// Progression config (TOML). Uses the built-in curve when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the level, banners and stars for a raw star count
    Progress { stars: Stars },
    /// Show how many stars are needed to reach a level
    #[command(name = "stars")]
    LevelStars { level: Level },
    /// Price a number of banners for a character with the given stars
    Cost {
        stars: Stars,
        banners: i64,
        /// Count stars already put towards the current banner
        #[arg(long)]
        partial: bool,
    },
    /// Print the leveling table, optionally marking a character's banners
    Table {
        #[arg(long, default_value_t = 0)]
        stars: Stars,
        /// Unspent stars in the player's pool
        #[arg(long, default_value_t = 0)]
        unspent: Stars,
    },
    /// List rewards and what they're worth for a character with the given stars
    Rewards { stars: Stars },
}

#[derive(Serialize)]
struct ProgressReport {
    stars: Stars,
    progression: CharacterProgression,
    next_level_progress: f64,
    capped: bool,
    label: String,
}

#[derive(Serialize)]
struct CostReport {
    progression: CharacterProgression,
    banners: i64,
    whole_banners: bool,
    cost: Stars,
}

#[derive(Serialize)]
struct RewardReport<'a> {
    name: &'a str,
    stars: RewardStars,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "exptracker=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading progression config from {}", path.display());
            ProgressionConfig::load(path)?
        }
        None => ProgressionConfig::default(),
    };
    let engine = ProgressionEngine::new(config)?;

    match args.command {
        Command::Progress { stars } => {
            let progression = engine.stars_to_level(stars);
            let report = ProgressReport {
                stars,
                progression,
                next_level_progress: engine.next_level_progress(&progression),
                capped: engine.is_capped(progression.level),
                label: progress_label(&engine, &progression, false),
            };
            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                Format::Text => {
                    println!(
                        "{} stars = level {}, {} banners, {} stars",
                        stars, progression.level, progression.banners, progression.stars
                    );
                    println!("{}", report.label);
                }
            }
        }
        Command::LevelStars { level } => {
            let stars = engine.try_level_to_stars(level)?;
            match args.format {
                Format::Json => println!("{}", serde_json::json!({ "level": level, "stars": stars })),
                Format::Text => println!("Level {} needs {} stars", level, stars),
            }
        }
        Command::Cost {
            stars,
            banners,
            partial,
        } => {
            let progression = engine.stars_to_level(stars);
            let report = CostReport {
                progression,
                banners,
                whole_banners: !partial,
                cost: engine.banner_cost(&progression, banners, !partial),
            };
            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                Format::Text => println!(
                    "{} banners from level {} ({} banners, {} stars) cost {} stars",
                    banners, progression.level, progression.banners, progression.stars, report.cost
                ),
            }
        }
        Command::Table { stars, unspent } => {
            let table = engine.leveling_table();
            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(table)?),
                Format::Text => print_table(&engine, stars, unspent),
            }
        }
        Command::Rewards { stars } => {
            let progression = engine.stars_to_level(stars);
            let catalog = default_catalog();
            let rewards: Vec<RewardReport> = catalog
                .iter()
                .filter_map(|entry| match entry {
                    CatalogEntry::Reward(reward) => Some(RewardReport {
                        name: &reward.name,
                        stars: reward.calculate(&engine, &progression),
                    }),
                    CatalogEntry::Divider => None,
                })
                .collect();
            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&rewards)?),
                Format::Text => {
                    for reward in &rewards {
                        println!(
                            "{:<60} pool {:>3}  character {:>3}",
                            reward.name, reward.stars.global_stars, reward.stars.character_bound_stars
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

/// One line per level: `#` filled, `+` affordable, `.` locked
fn print_table(engine: &ProgressionEngine, stars: Stars, unspent: Stars) {
    let table = engine.leveling_table();
    let level = engine.stars_to_level(stars).level;

    for ((name, collapsed), section) in table.collapsed_sections(level).into_iter().zip(&table.sections) {
        println!("== {}{}", name, if collapsed { " (complete)" } else { "" });
        if collapsed {
            continue;
        }

        for table_level in &section.levels {
            let banners: String = table_level
                .banners
                .iter()
                .map(|banner| match banner_state(banner, stars, unspent) {
                    BannerState::Filled => '#',
                    BannerState::Affordable => '+',
                    BannerState::Locked => '.',
                })
                .collect();
            println!("  lvl {:>2} [{}]", table_level.level, banners);
        }
    }
}
