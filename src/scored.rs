use core::cmp::Ordering;

/// `MinScored<K, T>` holds a score `K` and a scored object `T` in a pair for
/// use with a `BinaryHeap`.
///
/// `MinScored` compares in reverse order by the score, so that we can use
/// `BinaryHeap` as a min-heap to extract the score-value pair with the least
/// score.
#[derive(Copy, Clone, Debug)]
pub struct MinScored<K, T>(pub K, pub T);

impl<K: Ord, T> PartialEq for MinScored<K, T> {
    #[inline]
    fn eq(&self, other: &MinScored<K, T>) -> bool {
        self.0 == other.0
    }
}

impl<K: Ord, T> Eq for MinScored<K, T> {}

impl<K: Ord, T> PartialOrd for MinScored<K, T> {
    #[inline]
    fn partial_cmp(&self, other: &MinScored<K, T>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord, T> Ord for MinScored<K, T> {
    #[inline]
    fn cmp(&self, other: &MinScored<K, T>) -> Ordering {
        other.0.cmp(&self.0)
    }
}
