/*!
# Node Arena

All three search trees store their nodes in a [`NodeArena`]: a dense `Vec` of slots addressed
by [`NodeId`]s. Child and parent links are plain ids, so rotations and transplants are index
updates and no node is ever owned twice.

The arena also owns one sentinel, addressed by [`NIL`]. Every absent child or parent is `NIL`.
Reading the links or the metadata of `NIL` is always valid, and so is writing them: the
red-black delete fix-up relies on `NIL` carrying a parent while it walks up, and on its metadata
(the colour black) during case analysis. The AVL tree stores `-1` as the sentinel's metadata,
which is exactly the height of an absent child.

Removing a node moves the last slot into the freed one (`swap_remove`) and re-targets the links
that pointed at it. Hence ids survive insertions but a removal may relocate one node.
*/

use std::cmp::Ordering;

use super::NodeId;

/// Id of the sentinel standing in for every absent child or parent.
pub const NIL: NodeId = NodeId::MAX;

/// Parent and child links of a single node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Links {
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl Links {
    pub(crate) const DETACHED: Links = Links {
        parent: NIL,
        left: NIL,
        right: NIL,
    };
}

#[derive(Debug, Clone)]
struct Slot<T, M> {
    value: T,
    links: Links,
    meta: M,
}

/// Arena of tree nodes holding a value `T` and per-variant metadata `M` each
/// (nothing for the plain BST, the height for AVL, the colour for red-black trees).
#[derive(Debug, Clone)]
pub struct NodeArena<T, M> {
    slots: Vec<Slot<T, M>>,
    root: NodeId,
    nil: Links,
    nil_meta: M,
}

impl<T, M> NodeArena<T, M> {
    /// Creates an empty arena whose sentinel carries `nil_meta`
    pub(crate) fn new(nil_meta: M) -> Self {
        Self {
            slots: Vec::new(),
            root: NIL,
            nil: Links::DETACHED,
            nil_meta,
        }
    }

    /// Returns the number of live nodes
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns *true* if the arena holds no nodes
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns *true* if `id` addresses a live node (i.e. is neither `NIL` nor out of range)
    pub fn is_live(&self, id: NodeId) -> bool {
        (id as usize) < self.slots.len()
    }

    /// Returns the root or `NIL` for an empty tree
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the value stored in a node.
    /// ** Panics if `id` is not a live node **
    pub fn value(&self, id: NodeId) -> &T {
        &self.slots[id as usize].value
    }

    #[inline]
    fn links(&self, id: NodeId) -> &Links {
        if id == NIL {
            &self.nil
        } else {
            &self.slots[id as usize].links
        }
    }

    #[inline]
    fn links_mut(&mut self, id: NodeId) -> &mut Links {
        if id == NIL {
            &mut self.nil
        } else {
            &mut self.slots[id as usize].links
        }
    }

    /// Returns the parent of a node (`NIL` for the root)
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.links(id).parent
    }

    /// Returns the left child of a node (`NIL` if absent)
    pub fn left(&self, id: NodeId) -> NodeId {
        self.links(id).left
    }

    /// Returns the right child of a node (`NIL` if absent)
    pub fn right(&self, id: NodeId) -> NodeId {
        self.links(id).right
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.links_mut(id).parent = parent;
    }

    pub(crate) fn set_left(&mut self, id: NodeId, left: NodeId) {
        self.links_mut(id).left = left;
    }

    pub(crate) fn set_right(&mut self, id: NodeId, right: NodeId) {
        self.links_mut(id).right = right;
    }

    /// Returns the metadata of a node or of the sentinel
    pub fn meta(&self, id: NodeId) -> &M {
        if id == NIL {
            &self.nil_meta
        } else {
            &self.slots[id as usize].meta
        }
    }

    pub(crate) fn meta_mut(&mut self, id: NodeId) -> &mut M {
        if id == NIL {
            &mut self.nil_meta
        } else {
            &mut self.slots[id as usize].meta
        }
    }

    /// Stores a detached node and returns its id
    pub(crate) fn alloc(&mut self, value: T, meta: M) -> NodeId {
        let id = self.slots.len() as NodeId;
        assert!(id != NIL, "tree node ids are exhausted");
        self.slots.push(Slot {
            value,
            links: Links::DETACHED,
            meta,
        });
        id
    }

    /// Frees a node that is no longer linked into the tree and returns its value.
    ///
    /// The last slot is moved into the freed one and every link to it is re-targeted.
    /// The sentinel's parent is reset since it only has meaning during a fix-up.
    pub(crate) fn release(&mut self, id: NodeId) -> T {
        let last = (self.slots.len() - 1) as NodeId;
        if id != last {
            let Links {
                parent,
                left,
                right,
            } = self.slots[last as usize].links;

            if parent == NIL {
                debug_assert_eq!(self.root, last);
                self.root = id;
            } else if self.left(parent) == last {
                self.set_left(parent, id);
            } else {
                self.set_right(parent, id);
            }

            if left != NIL {
                self.set_parent(left, id);
            }
            if right != NIL {
                self.set_parent(right, id);
            }
        }

        self.nil = Links::DETACHED;
        self.slots.swap_remove(id as usize).value
    }

    /// Drops all nodes
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.root = NIL;
        self.nil = Links::DETACHED;
    }

    /// Returns the node holding the smallest value of the subtree rooted at `id`.
    /// ** Panics if `id` is not a live node **
    pub fn minimum(&self, mut id: NodeId) -> NodeId {
        assert!(self.is_live(id), "minimum of an empty subtree");
        while self.left(id) != NIL {
            id = self.left(id);
        }
        id
    }

    /// Returns the node holding the largest value of the subtree rooted at `id`.
    /// ** Panics if `id` is not a live node **
    pub fn maximum(&self, mut id: NodeId) -> NodeId {
        assert!(self.is_live(id), "maximum of an empty subtree");
        while self.right(id) != NIL {
            id = self.right(id);
        }
        id
    }

    /// Returns the in-order successor of `id` or `NIL` if `id` holds the largest value
    pub fn successor(&self, mut id: NodeId) -> NodeId {
        if self.right(id) != NIL {
            return self.minimum(self.right(id));
        }
        let mut parent = self.parent(id);
        while parent != NIL && id == self.right(parent) {
            id = parent;
            parent = self.parent(id);
        }
        parent
    }

    /// Returns the in-order predecessor of `id` or `NIL` if `id` holds the smallest value
    pub fn predecessor(&self, mut id: NodeId) -> NodeId {
        if self.left(id) != NIL {
            return self.maximum(self.left(id));
        }
        let mut parent = self.parent(id);
        while parent != NIL && id == self.left(parent) {
            id = parent;
            parent = self.parent(id);
        }
        parent
    }

    /// Replaces the subtree rooted at `u` by the subtree rooted at `v`.
    /// `v` may be `NIL`, in which case the sentinel's parent is set.
    pub(crate) fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self.parent(u);
        if parent == NIL {
            self.root = v;
        } else if u == self.left(parent) {
            self.set_left(parent, v);
        } else {
            self.set_right(parent, v);
        }
        self.set_parent(v, parent);
    }

    /// Returns the node that physically leaves its position when `z` is removed:
    /// `z` itself if it has at most one child, its successor otherwise.
    pub(crate) fn removal_target(&self, z: NodeId) -> NodeId {
        if self.left(z) == NIL || self.right(z) == NIL {
            z
        } else {
            self.minimum(self.right(z))
        }
    }

    /// Unlinks `z` using the classical three-case transplant and returns `(x, x_parent)`:
    /// the node (possibly `NIL`) that took over the removal target's position and its
    /// parent after the splice. `z` stays allocated and must be [`release`](Self::release)d.
    pub(crate) fn unlink(&mut self, z: NodeId) -> (NodeId, NodeId) {
        let (left, right) = (self.left(z), self.right(z));

        if left == NIL {
            self.transplant(z, right);
            (right, self.parent(z))
        } else if right == NIL {
            self.transplant(z, left);
            (left, self.parent(z))
        } else {
            let y = self.minimum(right);
            let x = self.right(y);
            let x_parent;

            if self.parent(y) == z {
                self.set_parent(x, y);
                x_parent = y;
            } else {
                x_parent = self.parent(y);
                self.transplant(y, x);
                self.set_right(y, right);
                self.set_parent(right, y);
            }

            self.transplant(z, y);
            self.set_left(y, left);
            self.set_parent(left, y);
            (x, x_parent)
        }
    }

    /// Left-rotates around `x`; `x`'s right child takes its place
    pub(crate) fn rotate_left(&mut self, x: NodeId) {
        let y = self.right(x);
        debug_assert_ne!(y, NIL);

        let y_left = self.left(y);
        self.set_right(x, y_left);
        if y_left != NIL {
            self.set_parent(y_left, x);
        }

        let parent = self.parent(x);
        self.set_parent(y, parent);
        if parent == NIL {
            self.root = y;
        } else if x == self.left(parent) {
            self.set_left(parent, y);
        } else {
            self.set_right(parent, y);
        }

        self.set_left(y, x);
        self.set_parent(x, y);
    }

    /// Right-rotates around `x`; `x`'s left child takes its place
    pub(crate) fn rotate_right(&mut self, x: NodeId) {
        let y = self.left(x);
        debug_assert_ne!(y, NIL);

        let y_right = self.right(y);
        self.set_left(x, y_right);
        if y_right != NIL {
            self.set_parent(y_right, x);
        }

        let parent = self.parent(x);
        self.set_parent(y, parent);
        if parent == NIL {
            self.root = y;
        } else if x == self.right(parent) {
            self.set_right(parent, y);
        } else {
            self.set_left(parent, y);
        }

        self.set_right(y, x);
        self.set_parent(x, y);
    }

    /// Returns the in-order iterator over all nodes
    pub fn iter(&self) -> InOrder<'_, T, M> {
        InOrder {
            arena: self,
            next: if self.root == NIL {
                NIL
            } else {
                self.minimum(self.root)
            },
            remaining: self.len(),
        }
    }

    /// Returns the number of nodes on the longest root-to-leaf path (`0` for an empty tree)
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        if self.root != NIL {
            stack.push((self.root, 1));
        }
        while let Some((id, depth)) = stack.pop() {
            height = height.max(depth);
            for child in [self.left(id), self.right(id)] {
                if child != NIL {
                    stack.push((child, depth + 1));
                }
            }
        }
        height
    }

    /// Visits every node in pre-order with an explicit stack
    pub(crate) fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.len());
        let mut stack = Vec::new();
        if self.root != NIL {
            stack.push(self.root);
        }
        while let Some(id) = stack.pop() {
            order.push(id);
            for child in [self.right(id), self.left(id)] {
                if child != NIL {
                    stack.push(child);
                }
            }
        }
        order
    }
}

impl<T: Ord, M> NodeArena<T, M> {
    /// Returns the first node holding `value` on the search path from the root, or `NIL`
    pub fn search(&self, value: &T) -> NodeId {
        let mut id = self.root;
        while id != NIL {
            match value.cmp(self.value(id)) {
                Ordering::Equal => break,
                Ordering::Less => id = self.left(id),
                Ordering::Greater => id = self.right(id),
            }
        }
        id
    }

    /// Links the detached node `z` in at its leaf position. Ties go right.
    pub(crate) fn attach(&mut self, z: NodeId) {
        let mut parent = NIL;
        let mut cur = self.root;
        let mut goes_left = false;
        while cur != NIL {
            parent = cur;
            goes_left = self.value(z) < self.value(cur);
            cur = if goes_left {
                self.left(cur)
            } else {
                self.right(cur)
            };
        }

        self.set_parent(z, parent);
        if parent == NIL {
            self.root = z;
        } else if goes_left {
            self.set_left(parent, z);
        } else {
            self.set_right(parent, z);
        }
    }

    /// Verifies ordering, parent links and size of the tree structure.
    ///
    /// With `strict_left`, a left child must be smaller than its parent, which holds as long as
    /// equal values only ever descend to the right. Rotations may move an equal value into a
    /// left subtree, so balanced trees only require `left <= node <= right`.
    pub(crate) fn check_structure(
        &self,
        strict_left: bool,
    ) -> Result<(), crate::error::InvariantViolation> {
        use std::cmp::Ordering;

        use crate::error::InvariantViolation;

        if self.root != NIL && self.parent(self.root) != NIL {
            return Err(InvariantViolation::RootHasParent(self.root));
        }

        let reachable = self.preorder();
        for &id in &reachable {
            for child in [self.left(id), self.right(id)] {
                if child != NIL && self.parent(child) != id {
                    return Err(InvariantViolation::BrokenParentLink { parent: id, child });
                }
            }
            let left = self.left(id);
            if left != NIL {
                match self.value(left).cmp(self.value(id)) {
                    Ordering::Less => {}
                    Ordering::Equal if !strict_left => {}
                    _ => return Err(InvariantViolation::OutOfOrder(left)),
                }
            }
            if self.right(id) != NIL && self.value(self.right(id)) < self.value(id) {
                return Err(InvariantViolation::OutOfOrder(self.right(id)));
            }
        }

        if reachable.len() != self.len() {
            return Err(InvariantViolation::SizeMismatch {
                reachable: reachable.len(),
                stored: self.len(),
            });
        }

        let mut prev: Option<&T> = None;
        let mut id = if self.root == NIL {
            NIL
        } else {
            self.minimum(self.root)
        };
        while id != NIL {
            if prev.is_some_and(|p| p > self.value(id)) {
                return Err(InvariantViolation::OutOfOrder(id));
            }
            prev = Some(self.value(id));
            id = self.successor(id);
        }

        Ok(())
    }
}

/// In-order iterator over the node ids of a tree.
///
/// Walks successor links, so it needs neither recursion nor an auxiliary stack.
pub struct InOrder<'a, T, M> {
    arena: &'a NodeArena<T, M>,
    next: NodeId,
    remaining: usize,
}

impl<T, M> Iterator for InOrder<'_, T, M> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == NIL {
            return None;
        }
        let id = self.next;
        self.next = self.arena.successor(id);
        self.remaining -= 1;
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, M> ExactSizeIterator for InOrder<'_, T, M> {}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn arena_from(values: &[i32]) -> NodeArena<i32, ()> {
        let mut arena = NodeArena::new(());
        for &v in values {
            let id = arena.alloc(v, ());
            arena.attach(id);
        }
        arena
    }

    fn values(arena: &NodeArena<i32, ()>) -> Vec<i32> {
        arena.iter().map(|id| *arena.value(id)).collect_vec()
    }

    #[test]
    fn attach_keeps_order_and_ties_go_right() {
        let arena = arena_from(&[5, 3, 8, 5, 1]);
        assert_eq!(values(&arena), vec![1, 3, 5, 5, 8]);

        let root = arena.root();
        assert_eq!(*arena.value(root), 5);
        let dup = arena.right(arena.left(arena.right(root)));
        assert_eq!(dup, NIL);
        assert_eq!(*arena.value(arena.left(arena.right(root))), 5);
        assert!(arena.check_structure(true).is_ok());
    }

    #[test]
    fn rotations_preserve_inorder() {
        let mut arena = arena_from(&[4, 2, 6, 1, 3, 5, 7]);
        let root = arena.root();

        arena.rotate_left(root);
        assert_eq!(*arena.value(arena.root()), 6);
        assert_eq!(values(&arena), (1..=7).collect_vec());
        assert!(arena.check_structure(true).is_ok());

        arena.rotate_right(arena.root());
        assert_eq!(*arena.value(arena.root()), 4);
        assert_eq!(values(&arena), (1..=7).collect_vec());
        assert!(arena.check_structure(true).is_ok());
    }

    #[test]
    fn unlink_and_release_relocate_last_slot() {
        let mut arena = arena_from(&[4, 2, 6, 1, 3, 5, 7]);

        // 4 has two children; its successor 5 is not its direct child
        let z = arena.search(&4);
        let (x, x_parent) = arena.unlink(z);
        assert_eq!(x, NIL);
        assert_eq!(*arena.value(x_parent), 6);
        assert_eq!(arena.release(z), 4);

        assert_eq!(arena.len(), 6);
        assert_eq!(*arena.value(arena.root()), 5);
        assert_eq!(values(&arena), vec![1, 2, 3, 5, 6, 7]);
        assert!(arena.check_structure(true).is_ok());

        // successor is the direct right child
        let z = arena.search(&2);
        let (x, x_parent) = arena.unlink(z);
        assert_eq!(x, NIL);
        assert_eq!(*arena.value(x_parent), 3);
        arena.release(z);
        assert_eq!(values(&arena), vec![1, 3, 5, 6, 7]);
        assert!(arena.check_structure(true).is_ok());
    }

    #[test]
    fn successor_and_predecessor_walk() {
        let arena = arena_from(&[20, 10, 30, 5, 15, 25, 35]);
        let first = arena.minimum(arena.root());
        let last = arena.maximum(arena.root());
        assert_eq!(*arena.value(first), 5);
        assert_eq!(*arena.value(last), 35);
        assert_eq!(arena.predecessor(first), NIL);
        assert_eq!(arena.successor(last), NIL);

        let mut backwards = Vec::new();
        let mut id = last;
        while id != NIL {
            backwards.push(*arena.value(id));
            id = arena.predecessor(id);
        }
        assert_eq!(backwards, vec![35, 30, 25, 20, 15, 10, 5]);
    }

    #[test]
    fn height_counts_levels() {
        assert_eq!(arena_from(&[]).height(), 0);
        assert_eq!(arena_from(&[1]).height(), 1);
        assert_eq!(arena_from(&[2, 1, 3]).height(), 2);
        assert_eq!(arena_from(&[1, 2, 3, 4]).height(), 4);
    }
}
