//! Property tests for the search trees
//!
//! Every tree must keep its in-order sequence equal to the multiset of stored values and hold
//! its balancing invariants after any sequence of inserts and deletes.

use forestgraph::prelude::*;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(i16),
    Delete(i16),
}

fn strategy_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => (-50i16..50).prop_map(Op::Insert),
            2 => (-50i16..50).prop_map(Op::Delete),
        ],
        0..200,
    )
}

/// Applies `ops` to `tree` and to a sorted reference vector, comparing after every step
fn run_ops<T>(tree: &mut T, ops: &[Op]) -> Result<(), TestCaseError>
where
    T: SearchTree<i16>,
{
    let mut reference: Vec<i16> = Vec::new();
    for op in ops {
        match *op {
            Op::Insert(x) => {
                tree.insert(x);
                let pos = reference.partition_point(|&y| y <= x);
                reference.insert(pos, x);
            }
            Op::Delete(x) => {
                let expected = reference.binary_search(&x).ok();
                prop_assert_eq!(tree.delete(&x), expected.is_some());
                if let Some(pos) = expected {
                    reference.remove(pos);
                }
            }
        }

        prop_assert_eq!(tree.values(), reference.clone());
        prop_assert_eq!(tree.len(), reference.len());
        if let Err(violation) = tree.check_invariants() {
            return Err(TestCaseError::fail(violation.to_string()));
        }
    }
    Ok(())
}

/// Builds a permutation of `0..n` from arbitrary sort keys
fn permutation(keys: &[u32]) -> Vec<u32> {
    let mut order: Vec<u32> = (0..keys.len() as u32).collect();
    order.sort_by_key(|&i| (keys[i as usize], i));
    order
}

// ============================================================================
// In-order sequence equals the stored multiset
// ============================================================================

proptest! {
    #[test]
    fn prop_bst_matches_reference(ops in strategy_ops()) {
        run_ops(&mut BinarySearchTree::<i16>::new(), &ops)?;
    }

    #[test]
    fn prop_avl_matches_reference(ops in strategy_ops()) {
        run_ops(&mut AvlTree::<i16>::new(), &ops)?;
    }

    #[test]
    fn prop_red_black_matches_reference(ops in strategy_ops()) {
        run_ops(&mut RedBlackTree::<i16>::new(), &ops)?;
    }
}

// ============================================================================
// Height bounds
// ============================================================================

proptest! {
    // AVL height stays below 1.44 * log2(n + 2).
    #[test]
    fn prop_avl_height_bound(keys in prop::collection::vec(any::<u32>(), 1..400)) {
        let tree: AvlTree<u32> = permutation(&keys).into_iter().collect();
        let n = tree.len() as f64;
        prop_assert!((tree.height() as f64) <= 1.45 * (n + 2.0).log2());
    }

    // Red-black height stays below 2 * log2(n + 1).
    #[test]
    fn prop_red_black_height_bound(keys in prop::collection::vec(any::<u32>(), 1..400)) {
        let tree: RedBlackTree<u32> = permutation(&keys).into_iter().collect();
        let n = tree.len() as f64;
        prop_assert!((tree.height() as f64) <= 2.0 * (n + 1.0).log2());
        prop_assert_eq!(tree.color(tree.root().unwrap()), Color::Black);
    }
}

// ============================================================================
// Round-trip: deleting every inserted value empties the tree
// ============================================================================

proptest! {
    #[test]
    fn prop_delete_all_empties(
        insert_keys in prop::collection::vec(any::<u32>(), 0..300),
        delete_keys in prop::collection::vec(any::<u32>(), 300)
    ) {
        let values = permutation(&insert_keys);
        let removal = permutation(&delete_keys[..values.len()]);

        let mut bst: BinarySearchTree<u32> = values.iter().copied().collect();
        let mut avl: AvlTree<u32> = values.iter().copied().collect();
        let mut rb: RedBlackTree<u32> = values.iter().copied().collect();

        for x in &removal {
            prop_assert!(bst.delete(x));
            prop_assert!(avl.delete(x));
            prop_assert!(rb.delete(x));
        }

        prop_assert!(bst.is_empty() && avl.is_empty() && rb.is_empty());
        prop_assert_eq!(bst.root(), None);
        prop_assert_eq!(avl.root(), None);
        prop_assert_eq!(rb.root(), None);
    }

    // Searching twice without mutation yields the same node.
    #[test]
    fn prop_search_is_idempotent(
        values in prop::collection::vec(0u8..64, 0..100),
        probe in 0u8..64
    ) {
        let tree: RedBlackTree<u8> = values.iter().copied().collect();
        let first = tree.search(&probe);
        prop_assert_eq!(first, tree.search(&probe));
        prop_assert_eq!(first.is_some(), values.contains(&probe));
    }
}
