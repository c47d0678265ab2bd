use crate::cmd::{load_snapshot, print_selection, setup, SelectionReport};
use crate::output::print_json;
use anyhow::Context;
use reviewbot_core::select_reviewers;
use std::path::Path;

pub fn run(root: &Path, snapshot: &Path, seed: Option<u64>, json: bool) -> anyhow::Result<()> {
    let snapshot = load_snapshot(snapshot)?;
    let mut ctx = setup(root, seed)?;

    let selection = select_reviewers(&snapshot.tree, &snapshot.directory, &mut ctx.rng, &ctx.options)
        .context("reviewer selection failed")?;

    if json {
        print_json(&SelectionReport {
            seed: ctx.seed,
            selection: &selection,
        })
    } else {
        print_selection(&selection, ctx.seed);
        Ok(())
    }
}
