use crate::types::{split_team, AdminScope, EvaluationStatus, Mode, Permission};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

// ---------------------------------------------------------------------------
// ReviewRule
// ---------------------------------------------------------------------------

/// Who a leaf may ask for review, and how many of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRule {
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub users: BTreeSet<String>,
    /// Fully qualified `org/team` names.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub teams: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub organizations: BTreeSet<String>,
    #[serde(default)]
    pub write_collaborators: bool,
    #[serde(default)]
    pub admins: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_scope: Option<AdminScope>,
    /// Collaborators holding exactly one of these levels join the pool.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub permissions: BTreeSet<Permission>,
    #[serde(default)]
    pub required_count: usize,
    #[serde(default)]
    pub mode: Mode,
}

impl Default for ReviewRule {
    fn default() -> Self {
        Self {
            users: BTreeSet::new(),
            teams: BTreeSet::new(),
            organizations: BTreeSet::new(),
            write_collaborators: false,
            admins: false,
            admin_scope: None,
            permissions: BTreeSet::new(),
            required_count: 0,
            mode: Mode::default(),
        }
    }
}

impl ReviewRule {
    pub fn new(mode: Mode, required_count: usize) -> Self {
        Self {
            mode,
            required_count,
            ..Self::default()
        }
    }

    pub fn with_users(mut self, users: &[&str]) -> Self {
        self.users.extend(users.iter().map(|u| u.to_string()));
        self
    }

    pub fn with_teams(mut self, teams: &[&str]) -> Self {
        self.teams.extend(teams.iter().map(|t| t.to_string()));
        self
    }

    pub fn with_organizations(mut self, orgs: &[&str]) -> Self {
        self.organizations.extend(orgs.iter().map(|o| o.to_string()));
        self
    }

    pub fn with_admins(mut self, scope: AdminScope) -> Self {
        self.admins = true;
        self.admin_scope = Some(scope);
        self
    }

    /// Configuration mistakes that do not stop selection but almost
    /// certainly produce fewer requests than the author intended.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for team in &self.teams {
            if split_team(team).is_err() {
                warnings.push(format!("team '{team}' is missing its 'org/' prefix"));
            }
        }

        if self.admins && self.admin_scope.is_none() {
            warnings.push("admins is enabled but admin_scope is not set".to_string());
        }

        match self.mode {
            Mode::Teams => {
                let admin_teams = self.admins && self.admin_scope == Some(AdminScope::Team);
                if self.teams.is_empty() && !admin_teams {
                    warnings.push("teams mode has no teams to request".to_string());
                }
            }
            Mode::RandomUsers | Mode::AllUsers => {
                if self.required_count == 0 {
                    warnings.push(format!(
                        "{} mode with required_count 0 never requests anyone",
                        self.mode
                    ));
                }
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// PolicyNode
// ---------------------------------------------------------------------------

/// One node of an evaluated approval policy. Leaves carry a [`ReviewRule`];
/// interior nodes combine their children and carry none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: EvaluationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation_error: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "present_children"
    )]
    pub children: Vec<PolicyNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_rule: Option<ReviewRule>,
}

/// Child lists coming from other tools may contain `null` placeholders for
/// nodes that failed to build; those slots are dropped.
fn present_children<'de, D>(deserializer: D) -> Result<Vec<PolicyNode>, D::Error>
where
    D: Deserializer<'de>,
{
    let slots: Vec<Option<PolicyNode>> = Vec::deserialize(deserializer)?;
    let total = slots.len();
    let children: Vec<PolicyNode> = slots.into_iter().flatten().collect();
    if children.len() != total {
        tracing::debug!(skipped = total - children.len(), "dropped empty child slots");
    }
    Ok(children)
}

impl PolicyNode {
    pub fn leaf(name: impl Into<String>, status: EvaluationStatus, rule: ReviewRule) -> Self {
        Self {
            name: name.into(),
            description: None,
            status,
            evaluation_error: None,
            children: Vec::new(),
            review_rule: Some(rule),
        }
    }

    pub fn group(
        name: impl Into<String>,
        status: EvaluationStatus,
        children: Vec<PolicyNode>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            status,
            evaluation_error: None,
            children,
            review_rule: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.evaluation_error = Some(error.into());
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_pending(&self) -> bool {
        self.status == EvaluationStatus::Pending
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
