use crate::directory::PermissionMap;
use std::collections::BTreeSet;

/// Narrow candidates to users that can actually be asked for review.
///
/// The review request API rejects a whole batch if any single name is the
/// author or lacks access to the repository, so both are removed up front.
/// Any recorded permission level counts as access.
pub fn filter_eligible(
    candidates: &BTreeSet<String>,
    author: &str,
    collaborators: &PermissionMap,
) -> BTreeSet<String> {
    candidates
        .iter()
        .filter(|user| user.as_str() != author && collaborators.contains_key(user.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Permission;
    use proptest::prelude::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn removes_author_and_strangers() {
        let collaborators: PermissionMap = [
            ("x".to_string(), Permission::Write),
            ("y".to_string(), Permission::Admin),
            ("z".to_string(), Permission::Write),
        ]
        .into_iter()
        .collect();
        let eligible = filter_eligible(&set(&["x", "y", "z", "stranger"]), "z", &collaborators);
        assert_eq!(eligible, set(&["x", "y"]));
    }

    #[test]
    fn read_only_collaborators_are_eligible() {
        let collaborators: PermissionMap =
            [("r".to_string(), Permission::Read)].into_iter().collect();
        assert_eq!(filter_eligible(&set(&["r"]), "a", &collaborators), set(&["r"]));
    }

    #[test]
    fn empty_candidates_stay_empty() {
        assert!(filter_eligible(&BTreeSet::new(), "a", &PermissionMap::new()).is_empty());
    }

    fn user() -> impl Strategy<Value = String> {
        prop::sample::select(vec!["ann", "ben", "cat", "dov", "eve", "fay"]).prop_map(String::from)
    }

    fn permission() -> impl Strategy<Value = Permission> {
        prop::sample::select(vec![
            Permission::None,
            Permission::Read,
            Permission::Write,
            Permission::Admin,
        ])
    }

    proptest! {
        #[test]
        fn eligible_is_exactly_candidate_collaborators_minus_author(
            candidates in prop::collection::btree_set(user(), 0..6),
            author in user(),
            collaborators in prop::collection::btree_map(user(), permission(), 0..6),
        ) {
            let eligible = filter_eligible(&candidates, &author, &collaborators);

            prop_assert!(eligible.is_subset(&candidates));
            prop_assert!(!eligible.contains(&author));
            for user in &eligible {
                prop_assert!(collaborators.contains_key(user));
            }
            for user in &candidates {
                if *user != author && collaborators.contains_key(user) {
                    prop_assert!(eligible.contains(user));
                }
            }
        }
    }
}
