//! Lookups against the hosting service's view of users, teams, and
//! organizations.
//!
//! The engine never talks to GitHub itself. Everything it needs to know about
//! people arrives through a [`Directory`], which the caller backs with
//! whatever client and caching it likes. All sets and maps are ordered so the
//! same responses always produce the same candidate pools.

use crate::types::Permission;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

pub type Users = BTreeSet<String>;
pub type PermissionMap = BTreeMap<String, Permission>;

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

pub trait Directory {
    /// Login of the pull request's author.
    fn author(&self) -> Result<String, DirectoryError>;

    /// Organization (or user) that owns the repository.
    fn repository_owner(&self) -> Result<String, DirectoryError>;

    /// Members of a fully qualified `org/team`.
    fn team_members(&self, team: &str) -> Result<Users, DirectoryError>;

    fn organization_members(&self, org: &str) -> Result<Users, DirectoryError>;

    fn organization_owners(&self, org: &str) -> Result<Users, DirectoryError>;

    /// Every collaborator with their effective permission, including grants
    /// inherited through teams and organization roles.
    fn repository_collaborators(&self) -> Result<PermissionMap, DirectoryError>;

    /// Collaborators whose permission was granted to them directly.
    fn direct_repository_collaborators(&self) -> Result<PermissionMap, DirectoryError>;

    /// Teams granted access to the repository, keyed by team slug.
    fn teams(&self) -> Result<PermissionMap, DirectoryError>;
}

// ---------------------------------------------------------------------------
// StaticDirectory
// ---------------------------------------------------------------------------

/// A fully materialised directory, typically loaded from a snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaticDirectory {
    pub author: String,
    pub owner: String,
    /// Fully qualified team name → members.
    #[serde(default)]
    pub team_members: BTreeMap<String, Users>,
    #[serde(default)]
    pub organization_members: BTreeMap<String, Users>,
    #[serde(default)]
    pub organization_owners: BTreeMap<String, Users>,
    #[serde(default)]
    pub collaborators: PermissionMap,
    #[serde(default)]
    pub direct_collaborators: PermissionMap,
    /// Team slug → permission on the repository.
    #[serde(default)]
    pub teams: PermissionMap,
}

impl StaticDirectory {
    pub fn new(author: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            owner: owner.into(),
            ..Self::default()
        }
    }

    pub fn with_team(mut self, team: &str, members: &[&str]) -> Self {
        self.team_members
            .insert(team.to_string(), members.iter().map(|m| m.to_string()).collect());
        self
    }

    pub fn with_org(mut self, org: &str, members: &[&str]) -> Self {
        self.organization_members
            .insert(org.to_string(), members.iter().map(|m| m.to_string()).collect());
        self
    }

    pub fn with_org_owners(mut self, org: &str, owners: &[&str]) -> Self {
        self.organization_owners
            .insert(org.to_string(), owners.iter().map(|m| m.to_string()).collect());
        self
    }

    pub fn with_collaborator(mut self, user: &str, permission: Permission) -> Self {
        self.collaborators.insert(user.to_string(), permission);
        self
    }

    pub fn with_direct_collaborator(mut self, user: &str, permission: Permission) -> Self {
        self.direct_collaborators.insert(user.to_string(), permission);
        self.collaborators.insert(user.to_string(), permission);
        self
    }

    pub fn with_repository_team(mut self, slug: &str, permission: Permission) -> Self {
        self.teams.insert(slug.to_string(), permission);
        self
    }
}

fn lookup(
    map: &BTreeMap<String, Users>,
    kind: &'static str,
    name: &str,
) -> Result<Users, DirectoryError> {
    map.get(name).cloned().ok_or_else(|| DirectoryError::NotFound {
        kind,
        name: name.to_string(),
    })
}

impl Directory for StaticDirectory {
    fn author(&self) -> Result<String, DirectoryError> {
        Ok(self.author.clone())
    }

    fn repository_owner(&self) -> Result<String, DirectoryError> {
        Ok(self.owner.clone())
    }

    fn team_members(&self, team: &str) -> Result<Users, DirectoryError> {
        lookup(&self.team_members, "team", team)
    }

    fn organization_members(&self, org: &str) -> Result<Users, DirectoryError> {
        lookup(&self.organization_members, "organization", org)
    }

    fn organization_owners(&self, org: &str) -> Result<Users, DirectoryError> {
        lookup(&self.organization_owners, "organization", org)
    }

    fn repository_collaborators(&self) -> Result<PermissionMap, DirectoryError> {
        Ok(self.collaborators.clone())
    }

    fn direct_repository_collaborators(&self) -> Result<PermissionMap, DirectoryError> {
        Ok(self.direct_collaborators.clone())
    }

    fn teams(&self) -> Result<PermissionMap, DirectoryError> {
        Ok(self.teams.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
