use log::trace;

use super::*;
use crate::testing::test_search_tree;

/// Height of a node; an absent child has height `-1`, a leaf `0`.
type Height = i32;

/// Height-balanced binary search tree.
///
/// After every insert and every physical removal, heights are recomputed on the path from the
/// mutation point up to the root, and a single or double rotation is applied wherever the heights
/// of both subtrees differ by two. The walk never stops early, so no ancestor is left unbalanced.
#[derive(Debug, Clone)]
pub struct AvlTree<T> {
    arena: NodeArena<T, Height>,
}

impl<T: Ord> AvlTree<T> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(-1),
        }
    }

    /// Returns the stored height of a node (`0` for a leaf).
    /// ** Panics if `id` is not a live node **
    pub fn node_height(&self, id: NodeId) -> i32 {
        assert!(self.arena.is_live(id));
        *self.arena.meta(id)
    }

    #[inline]
    fn height_of(&self, id: NodeId) -> Height {
        *self.arena.meta(id)
    }

    fn balance_of(&self, id: NodeId) -> Height {
        self.height_of(self.arena.left(id)) - self.height_of(self.arena.right(id))
    }

    fn update_height(&mut self, id: NodeId) {
        let height = 1 + self
            .height_of(self.arena.left(id))
            .max(self.height_of(self.arena.right(id)));
        *self.arena.meta_mut(id) = height;
    }

    fn rotate_left(&mut self, x: NodeId) {
        trace!("avl: rotate left at node {x}");
        self.arena.rotate_left(x);
        self.update_height(x);
        self.update_height(self.arena.parent(x));
    }

    fn rotate_right(&mut self, x: NodeId) {
        trace!("avl: rotate right at node {x}");
        self.arena.rotate_right(x);
        self.update_height(x);
        self.update_height(self.arena.parent(x));
    }

    /// Walks from `id` up to the root, fixing heights and rotating where needed
    fn rebalance_from(&mut self, mut id: NodeId) {
        while id != NIL {
            self.update_height(id);
            let balance = self.balance_of(id);

            if balance > 1 {
                let left = self.arena.left(id);
                if self.balance_of(left) < 0 {
                    self.rotate_left(left);
                }
                self.rotate_right(id);
                id = self.arena.parent(id);
            } else if balance < -1 {
                let right = self.arena.right(id);
                if self.balance_of(right) > 0 {
                    self.rotate_right(right);
                }
                self.rotate_left(id);
                id = self.arena.parent(id);
            }

            id = self.arena.parent(id);
        }
    }

    /// Recomputes every height bottom-up and compares with the stored ones
    fn check_balance(&self) -> Result<(), InvariantViolation> {
        for id in self.arena.preorder().into_iter().rev() {
            let (left, right) = (self.arena.left(id), self.arena.right(id));
            let expected = 1 + self.height_of(left).max(self.height_of(right));
            let stored = self.height_of(id);
            if stored != expected {
                return Err(InvariantViolation::StaleHeight {
                    node: id,
                    stored,
                    expected,
                });
            }
            if self.balance_of(id).abs() > 1 {
                return Err(InvariantViolation::Unbalanced(id));
            }
        }
        Ok(())
    }
}

impl<T: Ord> SearchTree<T> for AvlTree<T> {
    type Meta = Height;

    fn arena(&self) -> &NodeArena<T, Height> {
        &self.arena
    }

    fn insert(&mut self, value: T) -> NodeId {
        let id = self.arena.alloc(value, 0);
        self.arena.attach(id);
        self.rebalance_from(self.arena.parent(id));
        id
    }

    fn take(&mut self, value: &T) -> Option<T> {
        let z = live(self.arena.search(value))?;
        // `x_parent` is z's former parent, the successor itself if it was z's right child,
        // or the successor's former parent otherwise
        let (_, x_parent) = self.arena.unlink(z);
        self.rebalance_from(x_parent);
        Some(self.arena.release(z))
    }

    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.arena.check_structure(false)?;
        self.check_balance()
    }

    fn clear(&mut self) {
        self.arena.clear();
    }
}

impl_tree_common!(AvlTree);

test_search_tree!(avl_suite, AvlTree);

#[cfg(test)]
mod tests {
    use super::*;
    fn value_at<T: Ord + Copy>(tree: &AvlTree<T>, id: Option<NodeId>) -> T {
        *tree.value(id.unwrap())
    }

    #[test]
    fn delete_triggers_single_and_double_rotations() {
        let mut tree = AvlTree::from([41, 20, 65, 11, 29, 50, 91, 32, 72, 99]);
        assert!(tree.check_invariants().is_ok());

        assert!(tree.delete(&11));
        let root = tree.root().unwrap();
        assert_eq!(value_at(&tree, tree.left(root)), 29);

        assert!(tree.delete(&50));
        let root = tree.root().unwrap();
        let ninety_one = tree.search(&91).unwrap();
        assert_eq!(value_at(&tree, tree.left(ninety_one)), 65);
        assert_eq!(value_at(&tree, tree.right(root)), 91);

        assert!(tree.delete(&99));
        let root = tree.root().unwrap();
        let seventy_two = tree.search(&72).unwrap();
        assert_eq!(value_at(&tree, tree.right(seventy_two)), 91);
        assert_eq!(value_at(&tree, tree.left(seventy_two)), 65);
        assert_eq!(value_at(&tree, tree.right(root)), 72);

        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn delete_of_two_child_root_rebalances() {
        let mut tree = AvlTree::from([44, 17, 78, 32, 50, 88, 48, 62]);
        let root = tree.root().unwrap();
        assert_eq!(*tree.value(root), 44);
        assert_eq!(value_at(&tree, tree.left(root)), 17);
        assert_eq!(value_at(&tree, tree.right(root)), 78);

        let fifty = tree.search(&50).unwrap();
        assert_eq!(value_at(&tree, tree.left(fifty)), 48);
        assert_eq!(value_at(&tree, tree.right(fifty)), 62);

        assert!(tree.delete(&32));
        let root = tree.root().unwrap();
        assert_eq!(*tree.value(root), 50);
        assert_eq!(value_at(&tree, tree.left(root)), 44);

        assert!(tree.delete(&50));
        let root = tree.root().unwrap();
        assert_eq!(*tree.value(root), 62);
        assert_eq!(value_at(&tree, tree.left(root)), 44);
        assert_eq!(value_at(&tree, tree.right(root)), 78);

        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn successor_as_right_child_rebalances_at_successor() {
        // 30 is both the successor of 20 and its right child
        let mut tree = AvlTree::from([20, 10, 30, 5, 40]);
        assert!(tree.delete(&20));
        assert!(tree.delete(&40));
        let root = tree.root().unwrap();
        assert_eq!(*tree.value(root), 10);
        assert_eq!(tree.node_height(root), 1);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn sorted_insertions_stay_logarithmic() {
        let n = 1023;
        let tree: AvlTree<u32> = (0..n).collect();
        assert!((tree.height() as f64) <= 1.45 * ((n + 2) as f64).log2());
        assert_eq!(
            tree.node_height(tree.root().unwrap()) as usize + 1,
            tree.height()
        );
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn rotations_keep_equal_values_valid() {
        let mut tree = AvlTree::from([5, 5, 5]);
        let root = tree.root().unwrap();
        assert_eq!(value_at(&tree, tree.left(root)), 5);
        assert_eq!(tree.check_invariants(), Ok(()));

        tree.extend([5, 3, 5, 7, 5]);
        assert_eq!(tree.check_invariants(), Ok(()));
        assert!(tree.delete(&5));
        assert!(tree.delete(&5));
        assert_eq!(tree.values(), vec![3, 5, 5, 5, 7]);
        assert_eq!(tree.check_invariants(), Ok(()));
    }
}
