//! The reviewer selection pipeline.
//!
//! ```text
//! find_active_leaves ─▶ resolve_candidates ─▶ filter_eligible ─▶ mode ─▶ Selection
//!                                                                           │
//!                                              observed reviewers ─▶ difference
//! ```
//!
//! Leaves are processed one at a time in tree order and share a single random
//! source, so a given tree, seed, and set of directory responses always
//! produce the same selection. Any hard failure aborts the whole evaluation;
//! no partial selection is ever returned.

use crate::directory::{Directory, PermissionMap};
use crate::eligibility::filter_eligible;
use crate::error::{ReviewError, Result};
use crate::policy::{PolicyNode, ReviewRule};
use crate::pool::{resolve_candidates, CandidatePool};
use crate::reconcile::{difference, Reviewer};
use crate::sampling::{select_random, DEFAULT_ATTEMPT_FACTOR};
use crate::tree::find_active_leaves;
use crate::types::{split_team, Mode};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Users and fully qualified teams to request review from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default)]
    pub users: BTreeSet<String>,
    #[serde(default)]
    pub teams: BTreeSet<String>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.teams.is_empty()
    }

    pub fn len(&self) -> usize {
        self.users.len() + self.teams.len()
    }

    pub fn extend(&mut self, other: Selection) {
        self.users.extend(other.users);
        self.teams.extend(other.teams);
    }
}

// ---------------------------------------------------------------------------
// SelectionOptions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionOptions {
    /// Random selection gives up after `required_count * attempt_factor` draws.
    pub attempt_factor: u32,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            attempt_factor: DEFAULT_ATTEMPT_FACTOR,
        }
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Compute everyone who should be asked to review, across all active leaves.
///
/// No directory lookups happen when nothing in the tree is waiting on review.
pub fn select_reviewers<R>(
    tree: &PolicyNode,
    directory: &dyn Directory,
    rng: &mut R,
    options: &SelectionOptions,
) -> Result<Selection>
where
    R: Rng + ?Sized,
{
    let rules: Vec<(&str, &ReviewRule)> = find_active_leaves(tree)
        .into_iter()
        .filter_map(|leaf| {
            let rule = leaf.review_rule.as_ref();
            if rule.is_none() {
                tracing::debug!(leaf = %leaf.name, "active leaf has no review rule");
            }
            rule.map(|r| (leaf.name.as_str(), r))
        })
        .filter(|(_, rule)| rule.required_count > 0)
        .collect();

    let mut selection = Selection::default();
    if rules.is_empty() {
        return Ok(selection);
    }

    let author = directory
        .author()
        .map_err(|e| ReviewError::lookup("pull request author", e))?;
    let collaborators = directory
        .repository_collaborators()
        .map_err(|e| ReviewError::lookup("repository collaborators", e))?;
    let repository_teams = if rules.iter().any(|(_, r)| r.mode == Mode::Teams) {
        directory
            .teams()
            .map_err(|e| ReviewError::lookup("repository teams", e))?
    } else {
        PermissionMap::new()
    };

    for (name, rule) in rules {
        let pool = resolve_candidates(rule, directory, &collaborators)?;
        let picked = match rule.mode {
            Mode::AllUsers => Selection {
                users: filter_eligible(&pool.users, &author, &collaborators),
                teams: BTreeSet::new(),
            },
            Mode::RandomUsers => {
                let eligible: Vec<String> = filter_eligible(&pool.users, &author, &collaborators)
                    .into_iter()
                    .collect();
                let users = select_random(rule.required_count, &eligible, rng, options.attempt_factor)?;
                Selection {
                    users: users.into_iter().collect(),
                    teams: BTreeSet::new(),
                }
            }
            Mode::Teams => Selection {
                users: BTreeSet::new(),
                teams: permitted_teams(&pool, &repository_teams),
            },
        };
        tracing::debug!(
            leaf = %name,
            mode = %rule.mode,
            candidates = pool.users.len(),
            users = picked.users.len(),
            teams = picked.teams.len(),
            "selected reviewers for leaf"
        );
        selection.extend(picked);
    }

    Ok(selection)
}

/// Teams from the pool that hold some permission on the repository.
fn permitted_teams(pool: &CandidatePool, repository_teams: &PermissionMap) -> BTreeSet<String> {
    pool.teams
        .keys()
        .filter(|team| match split_team(team) {
            Ok((_, slug)) => repository_teams.contains_key(slug),
            Err(_) => false,
        })
        .cloned()
        .collect()
}

/// Compute the review requests still to be issued: the full selection minus
/// reviewers already on record and not dismissed.
pub fn plan_requests<R>(
    tree: &PolicyNode,
    directory: &dyn Directory,
    reviewers: &[Reviewer],
    rng: &mut R,
    options: &SelectionOptions,
) -> Result<Selection>
where
    R: Rng + ?Sized,
{
    let selection = select_reviewers(tree, directory, rng, options)?;
    Ok(difference(&selection, reviewers))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
