use crate::cmd::load_snapshot;
use crate::output::print_json;
use reviewbot_core::policy::PolicyNode;
use serde::Serialize;
use std::path::Path;

#[derive(Serialize)]
struct RuleWarning {
    leaf: String,
    message: String,
}

/// Every rule in the tree is checked, not just the active leaves, so mistakes
/// surface before the rule ever becomes pending.
fn collect(node: &PolicyNode, out: &mut Vec<RuleWarning>) {
    if let Some(rule) = &node.review_rule {
        out.extend(rule.validate().into_iter().map(|message| RuleWarning {
            leaf: node.name.clone(),
            message,
        }));
    }
    for child in &node.children {
        collect(child, out);
    }
}

pub fn run(snapshot: &Path, json: bool) -> anyhow::Result<()> {
    let snapshot = load_snapshot(snapshot)?;
    let mut warnings = Vec::new();
    collect(&snapshot.tree, &mut warnings);

    if json {
        return print_json(&warnings);
    }

    if warnings.is_empty() {
        println!("All review rules look fine.");
    } else {
        for w in &warnings {
            println!("[warning] {}: {}", w.leaf, w.message);
        }
    }
    Ok(())
}
