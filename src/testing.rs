/// Generates the behavioural test-suite every `SearchTree` has to pass
macro_rules! test_search_tree {
    ($env:ident, $tree:ident) => {
        #[cfg(test)]
        mod $env {
            use crate::tree::*;
            use itertools::Itertools;
            use rand::{Rng, SeedableRng, seq::SliceRandom};
            use rand_pcg::Pcg64Mcg;

            fn assert_matches(tree: &$tree<u32>, reference: &[u32]) {
                let mut sorted = reference.to_vec();
                sorted.sort_unstable();
                assert_eq!(tree.values(), sorted);
                assert_eq!(tree.len(), sorted.len());
                assert_eq!(tree.is_empty(), sorted.is_empty());
                if let Err(violation) = tree.check_invariants() {
                    panic!("{violation}");
                }
            }

            #[test]
            fn empty_tree() {
                let mut tree = <$tree<u32>>::new();
                assert!(tree.is_empty());
                assert_eq!(tree.root(), None);
                assert_eq!(tree.first(), None);
                assert_eq!(tree.last(), None);
                assert_eq!(tree.search(&3), None);
                assert_eq!(tree.take(&3), None);
                assert!(!tree.delete(&3));
                assert_eq!(tree.height(), 0);
                assert_eq!(format!("{tree}"), "<empty tree>");
                assert!(tree.check_invariants().is_ok());
            }

            #[test]
            fn random_operations_match_sorted_reference() {
                let rng = &mut Pcg64Mcg::seed_from_u64(3);

                for universe in [8u32, 64, 1000] {
                    for _ in 0..10 {
                        let mut tree = <$tree<u32>>::new();
                        let mut reference = Vec::new();

                        for _ in 0..300 {
                            let x = rng.random_range(0..universe);
                            if rng.random_bool(0.6) {
                                let id = tree.insert(x);
                                assert_eq!(*tree.value(id), x);
                                reference.push(x);
                            } else {
                                let expected = reference.iter().position(|&y| y == x);
                                assert_eq!(tree.take(&x), expected.map(|_| x));
                                if let Some(pos) = expected {
                                    reference.swap_remove(pos);
                                }
                            }
                            assert_matches(&tree, &reference);
                        }
                    }
                }
            }

            #[test]
            fn deleting_everything_empties_the_tree() {
                let rng = &mut Pcg64Mcg::seed_from_u64(5);

                for n in [1u32, 2, 3, 10, 100, 500] {
                    let mut values = (0..n).collect_vec();
                    values.shuffle(rng);
                    let mut tree: $tree<u32> = values.iter().copied().collect();
                    assert_matches(&tree, &values);

                    values.shuffle(rng);
                    while let Some(x) = values.pop() {
                        assert!(tree.delete(&x));
                        assert!(!tree.contains(&x));
                        assert_matches(&tree, &values);
                    }
                    assert_eq!(tree.root(), None);
                }
            }

            #[test]
            fn duplicates_are_kept() {
                let mut tree = <$tree<u32>>::from([5, 3, 5, 8, 5]);
                assert_eq!(tree.values(), vec![3, 5, 5, 5, 8]);
                assert_eq!(tree.iter().filter(|&&x| x == 5).count(), 3);

                assert!(tree.delete(&5));
                assert!(tree.delete(&5));
                assert_eq!(tree.values(), vec![3, 5, 8]);
                assert!(tree.delete(&5));
                assert!(!tree.delete(&5));
                assert_eq!(tree.values(), vec![3, 8]);
                assert!(tree.check_invariants().is_ok());
            }

            #[test]
            fn search_is_idempotent() {
                let tree = <$tree<u32>>::from([50, 20, 80, 10, 30, 70, 90]);
                for x in [10, 30, 50, 90, 99] {
                    let first = tree.search(&x);
                    assert_eq!(first, tree.search(&x));
                    assert_eq!(first.is_some(), x != 99);
                    if let Some(id) = first {
                        assert_eq!(*tree.value(id), x);
                    }
                }
            }

            #[test]
            fn missing_value_leaves_tree_untouched() {
                let mut tree = <$tree<u32>>::from([4, 2, 6]);
                let root = tree.root();
                assert!(!tree.delete(&5));
                assert_eq!(tree.root(), root);
                assert_eq!(tree.values(), vec![2, 4, 6]);
            }

            #[test]
            fn neighbours_and_extrema() {
                let rng = &mut Pcg64Mcg::seed_from_u64(7);
                let mut values = (0..200u32).map(|x| 3 * x).collect_vec();
                values.shuffle(rng);
                let tree: $tree<u32> = values.into_iter().collect();

                let root = tree.root().unwrap();
                assert_eq!(*tree.value(tree.minimum(root)), 0);
                assert_eq!(*tree.value(tree.maximum(root)), 597);
                assert_eq!(tree.first(), Some(&0));
                assert_eq!(tree.last(), Some(&597));
                assert_eq!(tree.parent(root), None);

                let mut forward = Vec::new();
                let mut cur = Some(tree.minimum(root));
                while let Some(id) = cur {
                    forward.push(*tree.value(id));
                    cur = tree.successor(id);
                }
                assert_eq!(forward, (0..200).map(|x| 3 * x).collect_vec());

                let mut backward = Vec::new();
                let mut cur = Some(tree.maximum(root));
                while let Some(id) = cur {
                    backward.push(*tree.value(id));
                    cur = tree.predecessor(id);
                }
                backward.reverse();
                assert_eq!(forward, backward);

                for id in tree.arena().iter() {
                    for child in [tree.left(id), tree.right(id)].into_iter().flatten() {
                        assert_eq!(tree.parent(child), Some(id));
                    }
                }
            }

            #[test]
            fn clone_is_independent() {
                let mut tree: $tree<u32> = (0..20).collect();
                let copy = tree.clone();
                for x in 0..10 {
                    assert!(tree.delete(&x));
                }
                tree.extend([100, 101]);

                assert_eq!(copy.values(), (0..20).collect_vec());
                assert_eq!(tree.values(), (10..20).chain([100, 101]).collect_vec());
                assert!(copy.check_invariants().is_ok());
                assert!(tree.check_invariants().is_ok());

                tree.clear();
                assert!(tree.is_empty());
                assert_eq!(copy.len(), 20);
            }

            #[test]
            fn display_lists_values_in_order() {
                let tree = <$tree<u32>>::from(vec![3, 1, 2]);
                assert_eq!(format!("{tree}"), "1 2 3");
                assert_eq!((&tree).into_iter().copied().collect_vec(), vec![1, 2, 3]);
            }
        }
    };
}

pub(crate) use test_search_tree;
