//! Property tests for scratch path generation and containment.

use std::collections::HashSet;

use proptest::prelude::*;

use bundle_sync::domain::value_objects::{ScratchDir, SCRATCH_FILE_PREFIX};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9_-]{1,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: fresh paths are direct children named prefix + 32 hex chars.
    #[test]
    fn property_fresh_paths_live_in_scratch_dir(
        segments in proptest::collection::vec(segment(), 1..4),
    ) {
        let dir = ScratchDir::new(&format!("/{}", segments.join("/"))).unwrap();
        let path = dir.fresh_path();

        prop_assert!(dir.contains(path.as_str()));
        prop_assert!(dir.ensure_contains(path.as_str()).is_ok());

        let name = path.as_str().rsplit('/').next().unwrap();
        let suffix = name.strip_prefix(SCRATCH_FILE_PREFIX).unwrap();
        prop_assert_eq!(suffix.len(), 32);
        prop_assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    /// PROPERTY: paths outside the scratch dir are never accepted for removal.
    #[test]
    fn property_outside_paths_are_rejected(
        base in segment(),
        other in segment(),
        name in segment(),
    ) {
        prop_assume!(base != other);
        let dir = ScratchDir::new(&format!("/{}", base)).unwrap();

        let sibling = format!("/{}/{}", other, name);
        let nested = format!("/{}/{}/{}", base, other, name);
        let dotdot = format!("/{}/../{}", base, name);
        let lookalike = format!("/{}{}/{}", base, other, name);
        prop_assert!(!dir.contains(&sibling));
        prop_assert!(!dir.contains(&nested));
        prop_assert!(!dir.contains(&dotdot));
        prop_assert!(!dir.contains(&lookalike));
        prop_assert!(dir.ensure_contains(&sibling).is_err());
    }
}

#[test]
fn fresh_paths_do_not_collide() {
    let dir = ScratchDir::default();
    let paths: HashSet<String> = (0..1000).map(|_| dir.fresh_path().to_string()).collect();
    assert_eq!(paths.len(), 1000);
}
