//! Candidate pool resolution.
//!
//! Turns the declarative membership of a [`ReviewRule`] into concrete user
//! names. Team and organization listings are best-effort: a listing that
//! fails is logged and contributes nothing, so one deleted team does not
//! block requests for the rest of the rule. The collaborator listings are
//! required and their failures propagate.

use crate::directory::{Directory, PermissionMap, Users};
use crate::error::{ReviewError, Result};
use crate::policy::ReviewRule;
use crate::types::{qualify_team, split_team, AdminScope, Permission};
use std::collections::{BTreeMap, BTreeSet};

/// Everyone a rule could ask, before eligibility filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    pub users: BTreeSet<String>,
    /// Fully qualified team name → members, for every team that contributed.
    pub teams: BTreeMap<String, Users>,
}

impl CandidatePool {
    fn add_team(&mut self, team: String, members: Users) {
        self.users.extend(members.iter().cloned());
        self.teams.entry(team).or_default().extend(members);
    }
}

/// Build the candidate pool for one rule.
///
/// `collaborators` is the repository's full collaborator map, fetched once
/// per evaluation by the caller.
pub fn resolve_candidates(
    rule: &ReviewRule,
    directory: &dyn Directory,
    collaborators: &PermissionMap,
) -> Result<CandidatePool> {
    let mut pool = CandidatePool::default();

    pool.users.extend(rule.users.iter().cloned());

    for team in &rule.teams {
        if split_team(team).is_err() {
            tracing::warn!(team = %team, "skipping team without an org prefix");
            continue;
        }
        match directory.team_members(team) {
            Ok(members) => pool.add_team(team.clone(), members),
            Err(e) => tracing::warn!(team = %team, error = %e, "failed to list team members"),
        }
    }

    for org in &rule.organizations {
        match directory.organization_members(org) {
            Ok(members) => pool.users.extend(members),
            Err(e) => tracing::warn!(org = %org, error = %e, "failed to list organization members"),
        }
    }

    if rule.write_collaborators {
        pool.users
            .extend(with_permission(collaborators, |p| p == Permission::Write));
    }

    if !rule.permissions.is_empty() {
        pool.users
            .extend(with_permission(collaborators, |p| rule.permissions.contains(&p)));
    }

    if rule.admins {
        match rule.admin_scope {
            Some(scope) => add_admins(&mut pool, scope, directory)?,
            None => tracing::warn!("admins requested without an admin scope; adding nobody"),
        }
    }

    Ok(pool)
}

fn with_permission<'a>(
    collaborators: &'a PermissionMap,
    keep: impl Fn(Permission) -> bool + 'a,
) -> impl Iterator<Item = String> + 'a {
    collaborators
        .iter()
        .filter(move |(_, p)| keep(**p))
        .map(|(user, _)| user.clone())
}

fn add_admins(pool: &mut CandidatePool, scope: AdminScope, directory: &dyn Directory) -> Result<()> {
    match scope {
        AdminScope::User => {
            let direct = directory
                .direct_repository_collaborators()
                .map_err(|e| ReviewError::lookup("direct repository collaborators", e))?;
            pool.users
                .extend(with_permission(&direct, |p| p == Permission::Admin));
        }
        AdminScope::Team => {
            let owner = directory
                .repository_owner()
                .map_err(|e| ReviewError::lookup("repository owner", e))?;
            let teams = match directory.teams() {
                Ok(teams) => teams,
                Err(e) => {
                    tracing::warn!(error = %e, "failed to list repository teams; no admin teams added");
                    return Ok(());
                }
            };
            for (slug, _) in teams.iter().filter(|(_, p)| **p == Permission::Admin) {
                let team = qualify_team(&owner, slug);
                match directory.team_members(&team) {
                    Ok(members) => pool.add_team(team, members),
                    Err(e) => {
                        tracing::warn!(team = %team, error = %e, "failed to list admin team members")
                    }
                }
            }
        }
        AdminScope::Org => {
            let owner = directory
                .repository_owner()
                .map_err(|e| ReviewError::lookup("repository owner", e))?;
            match directory.organization_owners(&owner) {
                Ok(owners) => pool.users.extend(owners),
                Err(e) => {
                    tracing::warn!(org = %owner, error = %e, "failed to list organization owners")
                }
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
