use super::*;
use crate::testing::test_search_tree;

/// Unbalanced binary search tree.
///
/// Every operation costs `O(h)` where `h` is the height of the tree, which degenerates to
/// `O(n)` for sorted insertion orders. All walks are iterative, so even a degenerate tree
/// does not exhaust the call stack.
#[derive(Debug, Clone)]
pub struct BinarySearchTree<T> {
    arena: NodeArena<T, ()>,
}

impl<T: Ord> BinarySearchTree<T> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(()),
        }
    }
}

impl<T: Ord> SearchTree<T> for BinarySearchTree<T> {
    type Meta = ();

    fn arena(&self) -> &NodeArena<T, ()> {
        &self.arena
    }

    fn insert(&mut self, value: T) -> NodeId {
        let id = self.arena.alloc(value, ());
        self.arena.attach(id);
        id
    }

    fn take(&mut self, value: &T) -> Option<T> {
        let z = live(self.arena.search(value))?;
        self.arena.unlink(z);
        Some(self.arena.release(z))
    }

    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.arena.check_structure(true)
    }

    fn clear(&mut self) {
        self.arena.clear();
    }
}

impl_tree_common!(BinarySearchTree);

test_search_tree!(bst_suite, BinarySearchTree);
