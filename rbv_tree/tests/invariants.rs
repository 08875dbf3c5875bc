use proptest::prelude::*;
use rbv_tree::{RBTree, StructureChange};

const MAX_KEYS: usize = 400;

fn height_bound(n: usize) -> f64 {
    2.0 * ((n + 1) as f64).log2()
}

fn build(keys: &[i32]) -> RBTree<i32> {
    let mut tree = RBTree::new();
    for &key in keys {
        tree.insert(key);
    }
    tree
}

#[test]
fn sorted_and_reverse_sorted_stay_balanced() {
    let ascending: Vec<i32> = (0..1000).collect();
    let descending: Vec<i32> = (0..1000).rev().collect();

    for keys in [ascending, descending] {
        let tree = build(&keys);
        assert_eq!(tree.validate(), Ok(()));
        assert!(tree.height() as f64 <= height_bound(keys.len()));
        assert_eq!(tree.len(), 1000);
    }
}

#[test]
fn all_equal_keys_stay_balanced() {
    let tree = build(&[7; 200]);
    assert_eq!(tree.validate(), Ok(()));
    assert!(tree.iter().all(|&k| k == 7));
    assert!(tree.height() as f64 <= height_bound(200));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn invariants_hold_after_every_insert(keys in proptest::collection::vec(-50..50i32, 0..MAX_KEYS)) {
        let mut tree = RBTree::new();
        for (i, &key) in keys.iter().enumerate() {
            tree.insert(key);
            prop_assert_eq!(tree.validate(), Ok(()));
            prop_assert!(tree.height() as f64 <= height_bound(i + 1));
        }
    }

    #[test]
    fn in_order_matches_sorted_multiset(keys in proptest::collection::vec(any::<i32>(), 0..MAX_KEYS)) {
        let tree = build(&keys);
        let mut expected = keys.clone();
        expected.sort();
        prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn every_inserted_key_is_found(keys in proptest::collection::vec(0..10_000i32, 1..MAX_KEYS)) {
        let tree = build(&keys);
        for key in &keys {
            prop_assert!(tree.contains(key));
        }
    }

    #[test]
    fn fixup_notifications_bounded_by_height(keys in proptest::collection::vec(any::<i32>(), 1..MAX_KEYS)) {
        let mut tree = RBTree::new();
        for &key in &keys {
            let mut count = 0usize;
            let mut settled = 0usize;
            tree.insert_observed(key, &mut |t: &RBTree<i32>, change: StructureChange| {
                count += 1;
                if let StructureChange::Settled { root } = change {
                    settled += 1;
                    assert_eq!(t.root(), Some(root));
                }
            });
            prop_assert_eq!(settled, 1);
            prop_assert!(count <= tree.height() + 2);
        }
    }

    #[test]
    fn rotation_round_trip_restores_structure(
        keys in proptest::collection::vec(any::<i32>(), 2..MAX_KEYS),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tree = build(&keys);
        let candidates: Vec<_> = tree
            .nodes()
            .filter(|(_, node)| node.right().is_some())
            .map(|(id, _)| id)
            .collect();
        prop_assume!(!candidates.is_empty());

        let x = candidates[pick.index(candidates.len())];
        let before = tree.snapshot();
        let promoted = tree.right(x).expect("candidate has a right child");

        tree.rotate_left(x);
        prop_assert_eq!(tree.parent(x), Some(promoted));
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), sorted);

        tree.rotate_right(promoted);
        prop_assert_eq!(tree.snapshot(), before);
    }

    #[test]
    fn mirrored_rotation_round_trip_restores_structure(
        keys in proptest::collection::vec(any::<i32>(), 2..MAX_KEYS),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut tree = build(&keys);
        let candidates: Vec<_> = tree
            .nodes()
            .filter(|(_, node)| node.left().is_some())
            .map(|(id, _)| id)
            .collect();
        prop_assume!(!candidates.is_empty());

        let x = candidates[pick.index(candidates.len())];
        let before = tree.snapshot();
        let promoted = tree.left(x).expect("candidate has a left child");

        tree.rotate_right(x);
        prop_assert_eq!(tree.parent(x), Some(promoted));
        prop_assert_eq!(tree.right(promoted), Some(x));
        let mut sorted = keys.clone();
        sorted.sort();
        prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), sorted);

        tree.rotate_left(promoted);
        prop_assert_eq!(tree.snapshot(), before);
    }
}
