use crate::selection::Selection;
use crate::types::ReviewerKind;
use serde::{Deserialize, Serialize};

/// A reviewer the hosting service already has on record for the pull
/// request, either requested or having reviewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reviewer {
    #[serde(rename = "type")]
    pub kind: ReviewerKind,
    pub name: String,
    /// The request was dismissed after being issued.
    #[serde(default)]
    pub removed: bool,
}

impl Reviewer {
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            kind: ReviewerKind::User,
            name: name.into(),
            removed: false,
        }
    }

    pub fn team(name: impl Into<String>) -> Self {
        Self {
            kind: ReviewerKind::Team,
            name: name.into(),
            removed: false,
        }
    }

    pub fn removed(mut self) -> Self {
        self.removed = true;
        self
    }

    fn satisfies(&self, kind: ReviewerKind, name: &str) -> bool {
        !self.removed && self.kind == kind && self.name == name
    }
}

/// The part of `selection` not already covered by live reviewers.
///
/// Dismissed requests do not count as coverage, so anyone whose request was
/// removed is asked again.
pub fn difference(selection: &Selection, reviewers: &[Reviewer]) -> Selection {
    let outstanding = |kind: ReviewerKind, name: &str| {
        !reviewers.iter().any(|r| r.satisfies(kind, name))
    };
    Selection {
        users: selection
            .users
            .iter()
            .filter(|u| outstanding(ReviewerKind::User, u.as_str()))
            .cloned()
            .collect(),
        teams: selection
            .teams
            .iter()
            .filter(|t| outstanding(ReviewerKind::Team, t.as_str()))
            .cloned()
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn selection(users: &[&str], teams: &[&str]) -> Selection {
        Selection {
            users: users.iter().map(|u| u.to_string()).collect(),
            teams: teams.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn nothing_observed_keeps_everything() {
        let s = selection(&["a", "b"], &["acme/core"]);
        assert_eq!(difference(&s, &[]), s);
    }

    #[test]
    fn live_user_request_is_dropped() {
        let s = selection(&["a", "b"], &[]);
        let out = difference(&s, &[Reviewer::user("a")]);
        assert_eq!(out, selection(&["b"], &[]));
    }

    #[test]
    fn removed_request_is_reissued() {
        let s = selection(&["a", "b"], &["acme/core"]);
        let out = difference(
            &s,
            &[Reviewer::user("a").removed(), Reviewer::team("acme/core").removed()],
        );
        assert_eq!(out, s);
    }

    #[test]
    fn kinds_do_not_cross() {
        let s = selection(&["acme/core"], &["alice"]);
        let out = difference(&s, &[Reviewer::team("acme/core"), Reviewer::user("alice")]);
        assert_eq!(out, s);
    }

    #[test]
    fn live_entry_wins_over_removed_duplicate() {
        let s = selection(&["a"], &[]);
        let out = difference(&s, &[Reviewer::user("a").removed(), Reviewer::user("a")]);
        assert!(out.is_empty());
    }

    #[test]
    fn reviewer_yaml_shape() {
        let yaml = "- type: user\n  name: a\n- type: team\n  name: acme/core\n  removed: true\n";
        let reviewers: Vec<Reviewer> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            reviewers,
            vec![Reviewer::user("a"), Reviewer::team("acme/core").removed()]
        );
    }

    fn name() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["a", "b", "c", "d", "org/x", "org/y"]).prop_map(String::from)
    }

    fn reviewer() -> impl Strategy<Value = Reviewer> {
        (name(), any::<bool>(), any::<bool>()).prop_map(|(n, team, removed)| Reviewer {
            kind: if team { ReviewerKind::Team } else { ReviewerKind::User },
            name: n,
            removed,
        })
    }

    proptest! {
        #[test]
        fn difference_is_idempotent(
            users in prop::collection::btree_set(name(), 0..5),
            teams in prop::collection::btree_set(name(), 0..5),
            reviewers in prop::collection::vec(reviewer(), 0..8),
        ) {
            let s = Selection { users, teams };
            let once = difference(&s, &reviewers);
            let twice = difference(&once, &reviewers);
            prop_assert_eq!(&twice, &once);
            prop_assert!(once.users.is_subset(&s.users));
            prop_assert!(once.teams.is_subset(&s.teams));
        }
    }
}
