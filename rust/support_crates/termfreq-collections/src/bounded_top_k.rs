//! Fixed-capacity selection of the best items of an unbounded stream.
//!
//! `BoundedTopK` keeps at most `capacity` items in a binary min-heap ordered
//! by a caller-supplied "ranks worse than" predicate. The heap root is always
//! the worst retained item, so deciding whether a new candidate is admitted is
//! a single comparison against the root, and admitting it costs
//! O(log capacity).

use termfreq_common::{Result, verify_arg};

/// A bounded priority structure retaining the `capacity` best items offered.
///
/// The ordering is supplied as a strict predicate `less_than(a, b)` that
/// returns `true` when `a` ranks worse than `b`. Items for which neither
/// `less_than(a, b)` nor `less_than(b, a)` holds are treated as equal; their
/// relative order is determined by the heap layout and should not be relied
/// upon. Callers wanting a deterministic result must make the predicate a
/// total order.
///
/// # Examples
///
/// ```
/// use termfreq_collections::BoundedTopK;
///
/// let mut top = BoundedTopK::new(2, |a: &u32, b: &u32| a < b).unwrap();
/// for rank in [3, 1, 4, 1, 5] {
///     top.offer(rank);
/// }
/// assert_eq!(top.drain_descending(), vec![5, 4]);
/// assert!(top.is_empty());
/// ```
pub struct BoundedTopK<T, F> {
    /// Heap storage; `heap[0]` is the worst retained item.
    heap: Vec<T>,
    capacity: usize,
    less_than: F,
}

impl<T, F> BoundedTopK<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Creates an empty selector retaining at most `capacity` items.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidArgument` error when `capacity` is zero.
    pub fn new(capacity: usize, less_than: F) -> Result<Self> {
        verify_arg!(capacity, capacity > 0);
        Ok(BoundedTopK {
            heap: Vec::with_capacity(capacity),
            capacity,
            less_than,
        })
    }

    /// Maximum number of items the selector retains.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items currently held.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns `true` once `capacity` items are held and every further
    /// admission evicts the current worst.
    pub fn is_full(&self) -> bool {
        self.heap.len() == self.capacity
    }

    /// The worst retained item, i.e. the one the next admission would evict.
    pub fn peek_worst(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Offers a candidate.
    ///
    /// While fewer than `capacity` items are held the candidate is always
    /// admitted. Afterwards it is admitted only if it ranks better than the
    /// current worst, which is then evicted.
    ///
    /// Returns the item that did not make it: the evicted worst, the rejected
    /// candidate itself, or `None` if nothing was dropped.
    pub fn offer(&mut self, item: T) -> Option<T> {
        if self.heap.len() < self.capacity {
            self.heap.push(item);
            self.sift_up(self.heap.len() - 1);
            None
        } else if (self.less_than)(&self.heap[0], &item) {
            let evicted = std::mem::replace(&mut self.heap[0], item);
            self.sift_down(0);
            Some(evicted)
        } else {
            Some(item)
        }
    }

    /// Removes and returns the worst retained item.
    pub fn pop_worst(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.heap.swap(0, last);
        let worst = self.heap.pop();
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        worst
    }

    /// Removes all items and returns them ordered from best to worst.
    ///
    /// Popping the heap yields items worst first, so they are written into
    /// the output from the back.
    pub fn drain_descending(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(worst) = self.pop_worst() {
            out.push(worst);
        }
        out.reverse();
        out
    }

    /// Consumes the selector, returning its items ordered from best to worst.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.drain_descending()
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if (self.less_than)(&self.heap[pos], &self.heap[parent]) {
                self.heap.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut worst = pos;
            if left < len && (self.less_than)(&self.heap[left], &self.heap[worst]) {
                worst = left;
            }
            if right < len && (self.less_than)(&self.heap[right], &self.heap[worst]) {
                worst = right;
            }
            if worst == pos {
                break;
            }
            self.heap.swap(pos, worst);
            pos = worst;
        }
    }
}

impl<T: std::fmt::Debug, F> std::fmt::Debug for BoundedTopK<T, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedTopK")
            .field("capacity", &self.capacity)
            .field("len", &self.heap.len())
            .field("worst", &self.heap.first())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termfreq_common::error::ErrorKind;

    fn ascending(a: &u64, b: &u64) -> bool {
        a < b
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = BoundedTopK::new(0, ascending).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    }

    #[test]
    fn test_keeps_best_two() {
        let mut top = BoundedTopK::new(2, ascending).unwrap();
        for rank in [3, 1, 4, 1, 5] {
            top.offer(rank);
        }
        assert_eq!(top.len(), 2);
        assert_eq!(top.peek_worst(), Some(&4));
        assert_eq!(top.drain_descending(), vec![5, 4]);
        assert!(top.is_empty());
        assert_eq!(top.drain_descending(), Vec::<u64>::new());
    }

    #[test]
    fn test_offer_returns_dropped_item() {
        let mut top = BoundedTopK::new(2, ascending).unwrap();
        assert_eq!(top.offer(3), None);
        assert_eq!(top.offer(1), None);
        assert!(top.is_full());
        // Rejected candidate comes back.
        assert_eq!(top.offer(0), Some(0));
        // Admitted candidate evicts the worst.
        assert_eq!(top.offer(7), Some(1));
        // Equal to the worst is not an improvement.
        assert_eq!(top.offer(3), Some(3));
        assert_eq!(top.into_sorted_vec(), vec![7, 3]);
    }

    #[test]
    fn test_fewer_items_than_capacity() {
        let mut top = BoundedTopK::new(10, ascending).unwrap();
        for rank in [2, 9, 4] {
            top.offer(rank);
        }
        assert!(!top.is_full());
        assert_eq!(top.drain_descending(), vec![9, 4, 2]);
    }

    #[test]
    fn test_pop_worst_order() {
        let mut top = BoundedTopK::new(4, ascending).unwrap();
        for rank in [8, 2, 6, 4, 10, 1] {
            top.offer(rank);
        }
        let mut popped = Vec::new();
        while let Some(rank) = top.pop_worst() {
            popped.push(rank);
        }
        assert_eq!(popped, vec![4, 6, 8, 10]);
    }

    #[test]
    fn test_custom_order_on_pairs() {
        // Rank by the count, then prefer the smaller key.
        let less_than = |a: &(u64, &str), b: &(u64, &str)| a.0 < b.0 || (a.0 == b.0 && a.1 > b.1);
        let mut top = BoundedTopK::new(3, less_than).unwrap();
        for item in [(5, "e"), (7, "b"), (5, "a"), (7, "a"), (1, "z"), (5, "c")] {
            top.offer(item);
        }
        assert_eq!(top.drain_descending(), vec![(7, "a"), (7, "b"), (5, "a")]);
    }

    #[test]
    fn test_random_streams_match_sorting() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..200 {
            let capacity = rng.usize(1..20);
            let count = rng.usize(0..200);
            let items: Vec<u64> = (0..count).map(|_| rng.u64(0..50)).collect();

            let mut top = BoundedTopK::new(capacity, ascending).unwrap();
            for &item in &items {
                top.offer(item);
                assert!(top.len() <= capacity);
            }

            let mut expected = items.clone();
            expected.sort_unstable_by(|a, b| b.cmp(a));
            expected.truncate(capacity);

            assert_eq!(top.drain_descending(), expected);
        }
    }
}
