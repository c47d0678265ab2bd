use crate::cmd::{load_snapshot, print_selection, setup, SelectionReport};
use crate::output::print_json;
use anyhow::Context;
use reviewbot_core::{io::atomic_write, plan_requests};
use std::path::Path;

pub fn run(
    root: &Path,
    snapshot: &Path,
    seed: Option<u64>,
    out: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let snapshot = load_snapshot(snapshot)?;
    let mut ctx = setup(root, seed)?;

    let plan = plan_requests(
        &snapshot.tree,
        &snapshot.directory,
        &snapshot.reviewers,
        &mut ctx.rng,
        &ctx.options,
    )
    .context("reviewer selection failed")?;

    let report = SelectionReport {
        seed: ctx.seed,
        selection: &plan,
    };

    if let Some(path) = out {
        let data = serde_json::to_string_pretty(&report)?;
        atomic_write(path, data.as_bytes())
            .with_context(|| format!("failed to write plan to {}", path.display()))?;
    }

    if json {
        print_json(&report)
    } else {
        print_selection(&plan, ctx.seed);
        Ok(())
    }
}
