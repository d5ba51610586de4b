/*!
# Indexed Priority Queue

Binary min-heap over `(key, priority)` pairs with an additional key→position [`Map`], so the
priority of any queued key can be changed in `O(log n)`. Dijkstra's algorithm uses it keyed by
vertex with the tentative distance as priority.
*/

use fxhash::FxHashMap;

use super::{FromCapacity, Map};
use crate::error::QueueError;

/// Min-queue whose entries can be addressed by key.
///
/// Keys are unique: inserting a key that is already queued only changes its priority.
/// Among equal priorities, no order is guaranteed.
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<K, P, M = FxHashMap<K, usize>> {
    heap: Vec<(K, P)>,
    positions: M,
}

impl<K, P, M> Default for IndexedPriorityQueue<K, P, M>
where
    K: Clone,
    P: Ord,
    M: Map<K, usize> + FromCapacity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, P, M> IndexedPriorityQueue<K, P, M>
where
    K: Clone,
    P: Ord,
    M: Map<K, usize> + FromCapacity,
{
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty queue with space for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            positions: M::from_capacity(capacity),
        }
    }

    /// Returns the number of queued keys
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns *true* if no key is queued
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns *true* if `key` is queued
    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// Returns the current priority of `key`
    pub fn priority_of(&self, key: &K) -> Option<&P> {
        self.positions.get(key).map(|&pos| &self.heap[pos].1)
    }

    /// Queues `key` with `priority`. If `key` is already queued, its priority is replaced.
    pub fn insert(&mut self, key: K, priority: P) {
        if let Some(&pos) = self.positions.get(&key) {
            self.heap[pos].1 = priority;
            self.restore(pos);
            return;
        }

        let pos = self.heap.len();
        self.positions.insert(key.clone(), pos);
        self.heap.push((key, priority));
        self.sift_up(pos);
    }

    /// Returns the entry with the smallest priority without removing it
    pub fn top(&self) -> Result<(&K, &P), QueueError> {
        self.heap
            .first()
            .map(|(k, p)| (k, p))
            .ok_or(QueueError::Empty)
    }

    /// Removes and returns the entry with the smallest priority
    pub fn pop(&mut self) -> Result<(K, P), QueueError> {
        if self.heap.is_empty() {
            return Err(QueueError::Empty);
        }

        let last = self.heap.len() - 1;
        self.swap(0, last);
        let (key, priority) = self.heap.pop().ok_or(QueueError::Empty)?;
        self.positions.remove(&key);

        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Ok((key, priority))
    }

    /// Replaces the priority of a queued key, moving it in either direction
    pub fn update(&mut self, key: &K, priority: P) -> Result<(), QueueError> {
        let pos = *self.positions.get(key).ok_or(QueueError::UnknownKey)?;
        self.heap[pos].1 = priority;
        self.restore(pos);
        Ok(())
    }

    /// Removes all entries
    pub fn clear(&mut self) {
        self.heap.clear();
        self.positions.clear();
    }

    fn restore(&mut self, pos: usize) {
        let pos = self.sift_down(pos);
        self.sift_up(pos);
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        for k in [i, j] {
            if let Some(pos) = self.positions.get_mut(&self.heap[k].0) {
                *pos = k;
            }
        }
    }

    fn sift_up(&mut self, mut pos: usize) -> usize {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[parent].1 <= self.heap[pos].1 {
                break;
            }
            self.swap(parent, pos);
            pos = parent;
        }
        pos
    }

    fn sift_down(&mut self, mut pos: usize) -> usize {
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;

            let mut smallest = pos;
            if left < self.heap.len() && self.heap[left].1 < self.heap[smallest].1 {
                smallest = left;
            }
            if right < self.heap.len() && self.heap[right].1 < self.heap[smallest].1 {
                smallest = right;
            }
            if smallest == pos {
                return pos;
            }

            self.swap(pos, smallest);
            pos = smallest;
        }
    }
}
