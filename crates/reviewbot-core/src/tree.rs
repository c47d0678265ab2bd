use crate::policy::PolicyNode;

/// Collect the leaves that still need reviewers, in depth-first declaration
/// order.
///
/// A leaf qualifies when it is pending and evaluated without error. Any node
/// that is not pending prunes its whole subtree, so pending or failed leaves
/// under an approved, disapproved, or skipped parent are never returned.
///
/// The order matters: leaves are processed, and the shared random source is
/// consumed, in exactly this sequence.
pub fn find_active_leaves(root: &PolicyNode) -> Vec<&PolicyNode> {
    let mut leaves = Vec::new();
    if root.is_pending() {
        collect(root, &mut leaves);
    }
    leaves
}

fn collect<'a>(node: &'a PolicyNode, leaves: &mut Vec<&'a PolicyNode>) {
    if node.is_leaf() {
        if node.is_pending() && node.evaluation_error.is_none() {
            leaves.push(node);
        }
        return;
    }
    for child in node.children.iter().filter(|c| c.is_pending()) {
        collect(child, leaves);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
