//! A pull request frozen at one point in time: its evaluated policy tree,
//! everything the directory would answer, and the reviewers already on record.

use crate::directory::StaticDirectory;
use crate::error::Result;
use crate::policy::PolicyNode;
use crate::reconcile::Reviewer;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub directory: StaticDirectory,
    pub tree: PolicyNode,
    #[serde(default)]
    pub reviewers: Vec<Reviewer>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(data)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReviewError;
    use crate::selection::{plan_requests, SelectionOptions};
    use crate::types::{Mode, Permission};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"
directory:
  author: alice
  owner: acme
  team_members:
    acme/backend: [bob, carol]
  collaborators:
    alice: write
    bob: write
    carol: push
    dave: admin
  teams:
    backend: write
tree:
  name: policy
  status: pending
  children:
    - name: backend approval
      status: pending
      review_rule:
        teams: [acme/backend]
        mode: all-users
        required_count: 1
    - name: backend team
      status: pending
      review_rule:
        teams: [acme/backend]
        mode: teams
        required_count: 1
    - name: already approved
      status: approved
      review_rule:
        users: [dave]
        mode: all-users
        required_count: 1
reviewers:
  - type: user
    name: bob
  - type: user
    name: carol
    removed: true
"#;

    #[test]
    fn parses_full_snapshot() {
        let snap = Snapshot::parse(SNAPSHOT).unwrap();
        assert_eq!(snap.directory.author, "alice");
        assert_eq!(snap.directory.collaborators.get("carol"), Some(&Permission::Write));
        assert_eq!(snap.tree.children.len(), 3);
        assert_eq!(
            snap.tree.children[1].review_rule.as_ref().map(|r| r.mode),
            Some(Mode::Teams)
        );
        assert_eq!(snap.reviewers.len(), 2);
    }

    #[test]
    fn plans_from_snapshot() {
        let snap = Snapshot::parse(SNAPSHOT).unwrap();
        let planned = plan_requests(
            &snap.tree,
            &snap.directory,
            &snap.reviewers,
            &mut StdRng::seed_from_u64(0),
            &SelectionOptions::default(),
        )
        .unwrap();
        assert_eq!(planned.users.into_iter().collect::<Vec<_>>(), vec!["carol"]);
        assert_eq!(
            planned.teams.into_iter().collect::<Vec<_>>(),
            vec!["acme/backend"]
        );
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pr.yaml");
        std::fs::write(&path, SNAPSHOT).unwrap();
        assert_eq!(Snapshot::load(&path).unwrap(), Snapshot::parse(SNAPSHOT).unwrap());
    }

    #[test]
    fn unknown_mode_is_rejected_at_load() {
        let bad = SNAPSHOT.replace("mode: teams", "mode: round-robin");
        assert!(matches!(Snapshot::parse(&bad), Err(ReviewError::Yaml(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let err = Snapshot::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ReviewError::Io(_)));
    }
}
