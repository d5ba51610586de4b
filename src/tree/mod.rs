/*!
# Binary Search Trees

Three search trees sharing one node model:
- [`BinarySearchTree`]: the unbalanced core,
- [`AvlTree`]: height-balanced via rotations after every insert and delete,
- [`RedBlackTree`]: colour-balanced with a black sentinel standing in for every absent child.

All of them store their nodes in a [`NodeArena`] and hand out [`NodeId`]s for inspection.
Duplicates are allowed; a value equal to a node's value is placed in its right subtree.

Shared read access (search, extrema, in-order neighbours, iteration) is provided by the
[`SearchTree`] trait, so that
```
use forestgraph::prelude::*;

let mut tree: AvlTree<u32> = (1..=7).collect();
assert!(tree.delete(&4));
assert_eq!(tree.values(), vec![1, 2, 3, 5, 6, 7]);
assert!(tree.check_invariants().is_ok());
```
works the same for every tree.
*/

use std::fmt::Display;

use itertools::Itertools;

use crate::error::InvariantViolation;

mod arena;
mod avl;
mod bst;
mod red_black;

pub use arena::{InOrder, NIL, NodeArena};
pub use avl::AvlTree;
pub use bst::BinarySearchTree;
pub use red_black::{Color, RedBlackTree};

/// Handle of a node inside a tree's [`NodeArena`]
pub type NodeId = u32;

#[inline]
fn live(id: NodeId) -> Option<NodeId> {
    (id != NIL).then_some(id)
}

/// Ordered multiset stored as a binary search tree
pub trait SearchTree<T: Ord> {
    /// Per-node balancing metadata
    type Meta;

    /// Returns the arena holding all nodes of the tree
    fn arena(&self) -> &NodeArena<T, Self::Meta>;

    /// Inserts a value and returns the id of its new node.
    /// Equal values are placed in the right subtree.
    fn insert(&mut self, value: T) -> NodeId;

    /// Removes one node holding `value` and returns the stored value,
    /// or `None` (leaving the tree untouched) if there is no such node.
    fn take(&mut self, value: &T) -> Option<T>;

    /// Verifies all structural invariants of the tree
    fn check_invariants(&self) -> Result<(), InvariantViolation>;

    /// Removes all nodes
    fn clear(&mut self);

    /// Removes one node holding `value`. Returns *false* if there is no such node.
    fn delete(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Returns the number of stored values
    fn len(&self) -> usize {
        self.arena().len()
    }

    /// Returns *true* if the tree stores no values
    fn is_empty(&self) -> bool {
        self.arena().is_empty()
    }

    /// Returns the root or `None` if the tree is empty
    fn root(&self) -> Option<NodeId> {
        live(self.arena().root())
    }

    /// Returns a node holding `value`, or `None` if the value is absent
    fn search(&self, value: &T) -> Option<NodeId> {
        live(self.arena().search(value))
    }

    /// Returns *true* if at least one node holds `value`
    fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }

    /// Returns the value of a node.
    /// ** Panics if `id` is not a live node **
    fn value(&self, id: NodeId) -> &T {
        self.arena().value(id)
    }

    /// Returns the parent of a node (`None` for the root)
    fn parent(&self, id: NodeId) -> Option<NodeId> {
        live(self.arena().parent(id))
    }

    /// Returns the left child of a node
    fn left(&self, id: NodeId) -> Option<NodeId> {
        live(self.arena().left(id))
    }

    /// Returns the right child of a node
    fn right(&self, id: NodeId) -> Option<NodeId> {
        live(self.arena().right(id))
    }

    /// Returns the node with the smallest value in the subtree rooted at `id`.
    /// ** Panics if `id` is not a live node **
    fn minimum(&self, id: NodeId) -> NodeId {
        self.arena().minimum(id)
    }

    /// Returns the node with the largest value in the subtree rooted at `id`.
    /// ** Panics if `id` is not a live node **
    fn maximum(&self, id: NodeId) -> NodeId {
        self.arena().maximum(id)
    }

    /// Returns the in-order successor of a node, or `None` for the last node
    fn successor(&self, id: NodeId) -> Option<NodeId> {
        live(self.arena().successor(id))
    }

    /// Returns the in-order predecessor of a node, or `None` for the first node
    fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        live(self.arena().predecessor(id))
    }

    /// Returns the smallest stored value
    fn first(&self) -> Option<&T> {
        self.root().map(|r| self.value(self.minimum(r)))
    }

    /// Returns the largest stored value
    fn last(&self) -> Option<&T> {
        self.root().map(|r| self.value(self.maximum(r)))
    }

    /// Returns an iterator over all values in non-decreasing order
    fn iter(&self) -> Iter<'_, T, Self::Meta> {
        Iter::new(self.arena())
    }

    /// Returns all values in non-decreasing order
    fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Returns the number of levels of the tree (`0` if empty)
    fn height(&self) -> usize {
        self.arena().height()
    }
}

/// In-order iterator over the values of a [`SearchTree`]
pub struct Iter<'a, T, M> {
    arena: &'a NodeArena<T, M>,
    ids: InOrder<'a, T, M>,
}

impl<'a, T, M> Iter<'a, T, M> {
    fn new(arena: &'a NodeArena<T, M>) -> Self {
        Self {
            arena,
            ids: arena.iter(),
        }
    }
}

impl<'a, T, M> Iterator for Iter<'a, T, M> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        self.ids.next().map(|id| arena.value(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<T, M> ExactSizeIterator for Iter<'_, T, M> {}

/// Writes the in-order values separated by single spaces
fn fmt_values<T: Display, M>(
    arena: &NodeArena<T, M>,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    if arena.is_empty() {
        return write!(f, "<empty tree>");
    }
    write!(f, "{}", arena.iter().map(|id| arena.value(id)).format(" "))
}

/// Implements construction and formatting traits for a tree type `$tree<T>` with a `new()`
macro_rules! impl_tree_common {
    ($tree:ident) => {
        impl<T: Ord> Default for $tree<T> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<T: Ord> FromIterator<T> for $tree<T> {
            fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
                let mut tree = Self::new();
                tree.extend(iter);
                tree
            }
        }

        impl<T: Ord> Extend<T> for $tree<T> {
            fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
                for value in iter {
                    self.insert(value);
                }
            }
        }

        impl<T: Ord> From<Vec<T>> for $tree<T> {
            fn from(values: Vec<T>) -> Self {
                values.into_iter().collect()
            }
        }

        impl<T: Ord, const N: usize> From<[T; N]> for $tree<T> {
            fn from(values: [T; N]) -> Self {
                values.into_iter().collect()
            }
        }

        impl<'a, T: Ord> IntoIterator for &'a $tree<T> {
            type Item = &'a T;
            type IntoIter = $crate::tree::Iter<'a, T, <$tree<T> as SearchTree<T>>::Meta>;

            fn into_iter(self) -> Self::IntoIter {
                self.iter()
            }
        }

        impl<T: Ord + std::fmt::Display> std::fmt::Display for $tree<T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                super::fmt_values(self.arena(), f)
            }
        }
    };
}

pub(crate) use impl_tree_common;
