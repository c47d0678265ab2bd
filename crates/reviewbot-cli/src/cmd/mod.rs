pub mod config;
pub mod leaves;
pub mod lint;
pub mod plan;
pub mod select;

use anyhow::Context;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use reviewbot_core::config::{Config, WarnLevel};
use reviewbot_core::{snapshot::Snapshot, Selection, SelectionOptions};
use serde::Serialize;
use std::path::Path;

pub(crate) fn load_snapshot(path: &Path) -> anyhow::Result<Snapshot> {
    Snapshot::load(path).with_context(|| format!("failed to load snapshot {}", path.display()))
}

/// Everything a selection run needs besides the snapshot.
pub(crate) struct RunSetup {
    pub seed: u64,
    pub rng: StdRng,
    pub options: SelectionOptions,
}

/// Pick the seed (flag, then config, then fresh entropy) and selection
/// options for one run. Refuses a config that `config validate` would reject.
pub(crate) fn setup(root: &Path, seed: Option<u64>) -> anyhow::Result<RunSetup> {
    let config = Config::load(root).context("failed to load config")?;
    let errors: Vec<String> = config
        .validate()
        .into_iter()
        .filter(|w| w.level == WarnLevel::Error)
        .map(|w| w.message)
        .collect();
    if !errors.is_empty() {
        anyhow::bail!("invalid config: {}", errors.join("; "));
    }

    let seed = match seed.or(config.sampling.seed) {
        Some(seed) => seed,
        None => {
            let seed: u64 = rand::thread_rng().gen();
            tracing::warn!(seed, "no seed configured; drew a fresh one");
            seed
        }
    };
    Ok(RunSetup {
        seed,
        rng: StdRng::seed_from_u64(seed),
        options: config.selection_options(),
    })
}

/// JSON shape of `select` and `plan` output. The seed is included so a run
/// can be repeated exactly.
#[derive(Serialize)]
pub(crate) struct SelectionReport<'a> {
    pub seed: u64,
    #[serde(flatten)]
    pub selection: &'a Selection,
}

pub(crate) fn print_selection(selection: &Selection, seed: u64) {
    if selection.is_empty() {
        println!("No review requests needed (seed {seed}).");
        return;
    }
    for user in &selection.users {
        println!("user  {user}");
    }
    for team in &selection.teams {
        println!("team  {team}");
    }
    println!("seed  {seed}");
}
