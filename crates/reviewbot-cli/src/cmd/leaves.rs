use crate::cmd::load_snapshot;
use crate::output::{print_json, print_table};
use reviewbot_core::tree::find_active_leaves;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct LeafRow<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    required_count: Option<usize>,
}

pub fn run(snapshot: &Path, json: bool) -> anyhow::Result<()> {
    let snapshot = load_snapshot(snapshot)?;
    let leaves = find_active_leaves(&snapshot.tree);

    let rows: Vec<LeafRow> = leaves
        .iter()
        .map(|leaf| LeafRow {
            name: &leaf.name,
            mode: leaf.review_rule.as_ref().map(|r| r.mode.to_string()),
            required_count: leaf.review_rule.as_ref().map(|r| r.required_count),
        })
        .collect();

    if json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("No leaves are waiting on review.");
        return Ok(());
    }

    let table: Vec<[String; 3]> = rows
        .iter()
        .map(|r| {
            [
                r.name.to_string(),
                r.mode.clone().unwrap_or_else(|| "-".to_string()),
                r.required_count
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ]
        })
        .collect();
    print_table(["LEAF", "MODE", "COUNT"], &table);
    Ok(())
}
