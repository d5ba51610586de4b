use std::fmt::Display;

use log::trace;

use super::*;
use crate::testing::test_search_tree;

/// Colour of a red-black tree node. The sentinel [`NIL`] is always black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Red => write!(f, "red"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Red-black tree.
///
/// Invariants:
/// - the root and the sentinel are black,
/// - no red node has a red child,
/// - every path from a node down to the sentinel passes the same number of black nodes.
///
/// The sentinel's parent link is written during deletion so that the fix-up can climb
/// from an absent child.
#[derive(Debug, Clone)]
pub struct RedBlackTree<T> {
    arena: NodeArena<T, Color>,
}

impl<T: Ord> RedBlackTree<T> {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(Color::Black),
        }
    }

    /// Returns the colour of a node; [`NIL`] is black.
    pub fn color(&self, id: NodeId) -> Color {
        *self.arena.meta(id)
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        *self.arena.meta_mut(id) = color;
    }

    #[inline]
    fn is_red(&self, id: NodeId) -> bool {
        self.color(id) == Color::Red
    }

    #[inline]
    fn is_black(&self, id: NodeId) -> bool {
        self.color(id) == Color::Black
    }

    fn insert_fixup(&mut self, mut z: NodeId) {
        let a = &mut self.arena;
        while *a.meta(a.parent(z)) == Color::Red {
            let parent = a.parent(z);
            let grandparent = a.parent(parent);

            if parent == a.left(grandparent) {
                let uncle = a.right(grandparent);
                if *a.meta(uncle) == Color::Red {
                    trace!("rb insert: red uncle at {grandparent}, recolor");
                    *a.meta_mut(parent) = Color::Black;
                    *a.meta_mut(uncle) = Color::Black;
                    *a.meta_mut(grandparent) = Color::Red;
                    z = grandparent;
                } else {
                    if z == a.right(parent) {
                        trace!("rb insert: inner child at {z}, rotate left");
                        z = parent;
                        a.rotate_left(z);
                    }
                    let parent = a.parent(z);
                    let grandparent = a.parent(parent);
                    trace!("rb insert: outer child at {z}, rotate right at {grandparent}");
                    *a.meta_mut(parent) = Color::Black;
                    *a.meta_mut(grandparent) = Color::Red;
                    a.rotate_right(grandparent);
                }
            } else {
                let uncle = a.left(grandparent);
                if *a.meta(uncle) == Color::Red {
                    trace!("rb insert: red uncle at {grandparent}, recolor");
                    *a.meta_mut(parent) = Color::Black;
                    *a.meta_mut(uncle) = Color::Black;
                    *a.meta_mut(grandparent) = Color::Red;
                    z = grandparent;
                } else {
                    if z == a.left(parent) {
                        trace!("rb insert: inner child at {z}, rotate right");
                        z = parent;
                        a.rotate_right(z);
                    }
                    let parent = a.parent(z);
                    let grandparent = a.parent(parent);
                    trace!("rb insert: outer child at {z}, rotate left at {grandparent}");
                    *a.meta_mut(parent) = Color::Black;
                    *a.meta_mut(grandparent) = Color::Red;
                    a.rotate_left(grandparent);
                }
            }
        }

        let root = a.root();
        *a.meta_mut(root) = Color::Black;
    }

    /// Restores the colouring after a black node left the position now held by `x`
    fn delete_fixup(&mut self, mut x: NodeId) {
        while x != self.arena.root() && self.is_black(x) {
            let parent = self.arena.parent(x);

            if x == self.arena.left(parent) {
                let mut sibling = self.arena.right(parent);
                if self.is_red(sibling) {
                    trace!("rb delete: red sibling {sibling}, rotate left at {parent}");
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.arena.rotate_left(parent);
                    sibling = self.arena.right(self.arena.parent(x));
                }

                let (left, right) = (self.arena.left(sibling), self.arena.right(sibling));
                if self.is_black(left) && self.is_black(right) {
                    trace!("rb delete: black nephews, recolor {sibling} and ascend");
                    self.set_color(sibling, Color::Red);
                    x = self.arena.parent(x);
                } else {
                    if self.is_black(self.arena.right(sibling)) {
                        trace!("rb delete: far nephew black, rotate right at {sibling}");
                        self.set_color(self.arena.left(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.arena.rotate_right(sibling);
                        sibling = self.arena.right(self.arena.parent(x));
                    }

                    let parent = self.arena.parent(x);
                    trace!("rb delete: far nephew red, rotate left at {parent}");
                    self.set_color(sibling, self.color(parent));
                    self.set_color(parent, Color::Black);
                    self.set_color(self.arena.right(sibling), Color::Black);
                    self.arena.rotate_left(parent);
                    x = self.arena.root();
                }
            } else {
                let mut sibling = self.arena.left(parent);
                if self.is_red(sibling) {
                    trace!("rb delete: red sibling {sibling}, rotate right at {parent}");
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.arena.rotate_right(parent);
                    sibling = self.arena.left(self.arena.parent(x));
                }

                let (left, right) = (self.arena.left(sibling), self.arena.right(sibling));
                if self.is_black(left) && self.is_black(right) {
                    trace!("rb delete: black nephews, recolor {sibling} and ascend");
                    self.set_color(sibling, Color::Red);
                    x = self.arena.parent(x);
                } else {
                    if self.is_black(self.arena.left(sibling)) {
                        trace!("rb delete: far nephew black, rotate left at {sibling}");
                        self.set_color(self.arena.right(sibling), Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.arena.rotate_left(sibling);
                        sibling = self.arena.left(self.arena.parent(x));
                    }

                    let parent = self.arena.parent(x);
                    trace!("rb delete: far nephew red, rotate right at {parent}");
                    self.set_color(sibling, self.color(parent));
                    self.set_color(parent, Color::Black);
                    self.set_color(self.arena.left(sibling), Color::Black);
                    self.arena.rotate_right(parent);
                    x = self.arena.root();
                }
            }
        }

        self.set_color(x, Color::Black);
    }

    fn check_coloring(&self) -> Result<(), InvariantViolation> {
        let root = self.arena.root();
        if self.is_red(root) {
            return Err(InvariantViolation::RedRoot(root));
        }

        // black height per node, counting the sentinel below it
        let mut black_height = vec![0usize; self.arena.len()];
        let height_of = |bh: &[usize], id: NodeId| if id == NIL { 1 } else { bh[id as usize] };

        for id in self.arena.preorder().into_iter().rev() {
            let (left, right) = (self.arena.left(id), self.arena.right(id));
            if self.is_red(id) && (self.is_red(left) || self.is_red(right)) {
                return Err(InvariantViolation::RedRed(id));
            }

            let below = height_of(&black_height, left);
            if below != height_of(&black_height, right) {
                return Err(InvariantViolation::BlackHeight(id));
            }
            black_height[id as usize] = below + usize::from(self.is_black(id));
        }

        Ok(())
    }
}

impl<T: Ord> SearchTree<T> for RedBlackTree<T> {
    type Meta = Color;

    fn arena(&self) -> &NodeArena<T, Color> {
        &self.arena
    }

    fn insert(&mut self, value: T) -> NodeId {
        let id = self.arena.alloc(value, Color::Red);
        self.arena.attach(id);
        self.insert_fixup(id);
        id
    }

    fn take(&mut self, value: &T) -> Option<T> {
        let z = live(self.arena.search(value))?;

        let moved = self.arena.removal_target(z);
        let moved_color = self.color(moved);
        let (x, _) = self.arena.unlink(z);
        if moved != z {
            self.set_color(moved, self.color(z));
        }

        if moved_color == Color::Black {
            self.delete_fixup(x);
        }
        Some(self.arena.release(z))
    }

    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.color(NIL) != Color::Black {
            return Err(InvariantViolation::RedSentinel);
        }
        self.arena.check_structure(false)?;
        self.check_coloring()
    }

    fn clear(&mut self) {
        self.arena.clear();
    }
}

impl_tree_common!(RedBlackTree);

test_search_tree!(red_black_suite, RedBlackTree);

#[cfg(test)]
mod tests {
    use super::*;
    fn node(tree: &RedBlackTree<i32>, value: i32) -> NodeId {
        tree.search(&value).unwrap()
    }

    #[test]
    fn insert_fixup_recolors_and_rotates() {
        let mut tree = RedBlackTree::from([11, 2, 14, 1, 7, 15, 5, 8]);
        let root = tree.root().unwrap();
        assert_eq!(*tree.value(root), 11);
        assert_eq!(tree.color(root), Color::Black);
        assert_eq!(tree.color(tree.minimum(root)), Color::Black);
        assert_eq!(tree.color(tree.maximum(root)), Color::Red);
        assert_eq!(tree.color(node(&tree, 8)), Color::Red);
        assert_eq!(tree.color(node(&tree, 5)), Color::Red);
        assert_eq!(tree.color(node(&tree, 7)), Color::Black);

        tree.insert(4);
        let root = tree.root().unwrap();
        assert_eq!(*tree.value(root), 7);
        assert_eq!(*tree.value(tree.left(root).unwrap()), 2);
        assert_eq!(*tree.value(tree.right(root).unwrap()), 11);
        assert_eq!(*tree.value(tree.left(node(&tree, 11)).unwrap()), 8);
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn delete_fixup_through_the_sentinel() {
        let mut tree = RedBlackTree::from([11, 2, 14, 1, 7, 15, 5, 8, 4, 3]);

        assert!(tree.delete(&1));
        let root = tree.root().unwrap();
        let four = tree.left(root).unwrap();
        assert_eq!(*tree.value(four), 4);
        assert_eq!(tree.color(four), Color::Red);
        let two = tree.left(four).unwrap();
        assert_eq!(*tree.value(two), 2);
        assert_eq!(tree.color(two), Color::Black);
        assert_eq!(*tree.value(tree.right(two).unwrap()), 3);
        assert!(tree.check_invariants().is_ok());

        assert!(tree.delete(&7));
        let root = tree.root().unwrap();
        assert_eq!(*tree.value(root), 8);
        assert_eq!(tree.color(root), Color::Black);
        let four = tree.left(root).unwrap();
        assert_eq!(*tree.value(four), 4);
        assert_eq!(tree.color(four), Color::Red);
        assert!(tree.check_invariants().is_ok());

        assert_eq!(tree.color(NIL), Color::Black);
    }

    #[test]
    fn height_is_logarithmic() {
        let n = 4096u32;
        let mut tree: RedBlackTree<u32> = (0..n).collect();
        assert!((tree.height() as f64) <= 2.0 * ((n + 1) as f64).log2());

        for x in (0..n).step_by(2) {
            assert!(tree.delete(&x));
        }
        let m = tree.len() as f64;
        assert!((tree.height() as f64) <= 2.0 * (m + 1.0).log2());
        assert!(tree.check_invariants().is_ok());
    }

    #[test]
    fn rotations_keep_equal_values_valid() {
        let mut tree = RedBlackTree::from([5, 5, 5]);
        let root = tree.root().unwrap();
        assert_eq!(*tree.value(tree.left(root).unwrap()), 5);
        assert_eq!(tree.check_invariants(), Ok(()));

        tree.extend([5, 3, 5, 7, 5]);
        assert_eq!(tree.check_invariants(), Ok(()));
        assert!(tree.delete(&5));
        assert!(tree.delete(&5));
        assert_eq!(tree.values(), vec![3, 5, 5, 5, 7]);
        assert_eq!(tree.check_invariants(), Ok(()));
    }

    #[test]
    fn red_sentinel_is_reported() {
        let mut tree = RedBlackTree::from([1, 2, 3]);
        tree.set_color(NIL, Color::Red);
        assert_eq!(
            tree.check_invariants(),
            Err(InvariantViolation::RedSentinel)
        );
    }
}
