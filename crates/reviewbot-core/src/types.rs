use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Permission
// ---------------------------------------------------------------------------

/// Repository permission level, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    None,
    #[serde(alias = "pull")]
    Read,
    Triage,
    #[serde(alias = "push")]
    Write,
    Maintain,
    Admin,
}

impl Permission {
    pub fn at_least(self, min: Permission) -> bool {
        self >= min
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Permission::None => "none",
            Permission::Read => "read",
            Permission::Triage => "triage",
            Permission::Write => "write",
            Permission::Maintain => "maintain",
            Permission::Admin => "admin",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Permission {
    type Err = crate::error::ReviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Permission::None),
            "read" | "pull" => Ok(Permission::Read),
            "triage" => Ok(Permission::Triage),
            "write" | "push" => Ok(Permission::Write),
            "maintain" => Ok(Permission::Maintain),
            "admin" => Ok(Permission::Admin),
            _ => Err(crate::error::ReviewError::InvalidPermission(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// EvaluationStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    Pending,
    Approved,
    Disapproved,
    Skipped,
}

impl fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EvaluationStatus::Pending => "pending",
            EvaluationStatus::Approved => "approved",
            EvaluationStatus::Disapproved => "disapproved",
            EvaluationStatus::Skipped => "skipped",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// How a leaf turns its eligible pool into review requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    AllUsers,
    #[default]
    RandomUsers,
    Teams,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::AllUsers => "all-users",
            Mode::RandomUsers => "random-users",
            Mode::Teams => "teams",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AdminScope
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminScope {
    /// Direct collaborators holding admin, ignoring team-inherited grants.
    User,
    /// Members of every team granted admin on the repository.
    Team,
    /// Owners of the repository's organization.
    Org,
}

impl fmt::Display for AdminScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AdminScope::User => "user",
            AdminScope::Team => "team",
            AdminScope::Org => "org",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// ReviewerKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewerKind {
    User,
    Team,
}

// ---------------------------------------------------------------------------
// Team names
// ---------------------------------------------------------------------------

/// Split a fully qualified `org/team` name into its organization and slug.
pub fn split_team(name: &str) -> crate::error::Result<(&str, &str)> {
    match name.split_once('/') {
        Some((org, slug)) if !org.is_empty() && !slug.is_empty() && !slug.contains('/') => {
            Ok((org, slug))
        }
        _ => Err(crate::error::ReviewError::InvalidTeamName(name.to_string())),
    }
}

pub fn qualify_team(org: &str, slug: &str) -> String {
    format!("{org}/{slug}")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
