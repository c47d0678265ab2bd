use crate::output::print_json;
use anyhow::Context;
use clap::Subcommand;
use reviewbot_core::config::{Config, WarnLevel};
use std::path::Path;

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show the effective configuration
    Show,

    /// Update sampling settings
    Set {
        /// Default seed for random reviewer selection
        #[arg(long, conflicts_with = "clear_seed")]
        seed: Option<u64>,
        /// Forget the default seed and draw a fresh one per run
        #[arg(long)]
        clear_seed: bool,
        /// Draw-cap multiplier for random selection (at least 1)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        attempt_factor: Option<u32>,
    },

    /// Validate the config for common mistakes
    Validate,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ConfigSubcommand::Show => show(root, json),
        ConfigSubcommand::Set {
            seed,
            clear_seed,
            attempt_factor,
        } => set(root, seed, clear_seed, attempt_factor),
        ConfigSubcommand::Validate => validate(root, json),
    }
}

// ---------------------------------------------------------------------------
// show / set
// ---------------------------------------------------------------------------

fn show(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    if json {
        return print_json(&config);
    }
    println!("version:        {}", config.version);
    match config.sampling.seed {
        Some(seed) => println!("seed:           {seed}"),
        None => println!("seed:           (random per run)"),
    }
    println!("attempt_factor: {}", config.sampling.attempt_factor);
    Ok(())
}

fn set(
    root: &Path,
    seed: Option<u64>,
    clear_seed: bool,
    attempt_factor: Option<u32>,
) -> anyhow::Result<()> {
    let mut config = Config::load(root).context("failed to load config")?;
    if clear_seed {
        config.sampling.seed = None;
    }
    if let Some(seed) = seed {
        config.sampling.seed = Some(seed);
    }
    if let Some(factor) = attempt_factor {
        config.sampling.attempt_factor = factor;
    }
    config.save(root).context("failed to save config")?;
    println!("Config updated.");
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

fn validate(root: &Path, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    let warnings = config.validate();

    if json {
        let value = serde_json::json!({
            "warnings": warnings,
        });
        print_json(&value)?;
    } else if warnings.is_empty() {
        println!("Config is valid. No warnings.");
    } else {
        for w in &warnings {
            let prefix = match w.level {
                WarnLevel::Warning => "warning",
                WarnLevel::Error => "error",
            };
            println!("[{prefix}] {}", w.message);
        }
    }

    if warnings.iter().any(|w| w.level == WarnLevel::Error) {
        anyhow::bail!("config validation found errors");
    }

    Ok(())
}
