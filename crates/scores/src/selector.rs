use crate::error::{Result, ScoresError};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::num::NonZeroUsize;

/// Upper bound on the up-front heap allocation; beyond it the heap grows on demand.
const INITIAL_CAPACITY_CAP: usize = 1024;

/// Outcome of [`TopN::offer`].
#[derive(Debug, PartialEq, Eq)]
pub enum Offer<T> {
    /// The set was not full yet.
    Inserted,
    /// The item displaced the previous minimum, returned here.
    Replaced(T),
    /// The item was not strictly greater than the current minimum.
    Rejected(T),
}

/// Bounded streaming selection of the `limit` largest items.
///
/// Backed by a min-heap of at most `limit` entries: every offer costs
/// O(log limit) and memory never depends on how many items were offered.
/// When the set is full, an item equal to the current minimum is rejected,
/// so among ties at the cutoff the first one seen keeps its slot.
#[derive(Debug, Clone)]
pub struct TopN<T: Ord> {
    limit: NonZeroUsize,
    heap: BinaryHeap<Reverse<T>>,
}

impl<T: Ord> TopN<T> {
    pub fn new(limit: usize) -> Result<Self> {
        let limit =
            NonZeroUsize::new(limit).ok_or_else(|| ScoresError::InvalidLimit(limit.to_string()))?;
        Ok(Self::with_limit(limit))
    }

    pub fn with_limit(limit: NonZeroUsize) -> Self {
        Self {
            limit,
            heap: BinaryHeap::with_capacity(limit.get().min(INITIAL_CAPACITY_CAP)),
        }
    }

    pub fn limit(&self) -> NonZeroUsize {
        self.limit
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The current eviction target, if any.
    pub fn peek_min(&self) -> Option<&T> {
        self.heap.peek().map(|Reverse(item)| item)
    }

    pub fn offer(&mut self, item: T) -> Offer<T> {
        if self.heap.len() < self.limit.get() {
            self.heap.push(Reverse(item));
            return Offer::Inserted;
        }

        match self.heap.peek_mut() {
            Some(mut min) if item > min.0 => {
                let evicted = std::mem::replace(&mut min.0, item);
                Offer::Replaced(evicted)
            }
            _ => Offer::Rejected(item),
        }
    }

    /// Consume the selector, returning the retained items largest first.
    pub fn finalize(self) -> Vec<T> {
        // Ascending order of Reverse<T> is descending order of T.
        self.heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(item)| item)
            .collect()
    }
}

/// Parse a user-supplied limit. Anything that is not an integer greater
/// than zero is rejected.
pub fn parse_limit(raw: &str) -> Result<NonZeroUsize> {
    let invalid = || ScoresError::InvalidLimit(raw.to_string());
    let value: i128 = raw.trim().parse().map_err(|_| invalid())?;
    if value <= 0 {
        return Err(invalid());
    }
    let value = usize::try_from(value).map_err(|_| invalid())?;
    NonZeroUsize::new(value).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorClass;
    use crate::record::Record;
    use pretty_assertions::assert_eq;

    fn scores(records: &[Record]) -> Vec<i64> {
        records.iter().map(|r| r.score).collect()
    }

    #[test]
    fn zero_limit_is_rejected() {
        let err = TopN::<i64>::new(0).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Usage);
    }

    #[test]
    fn keeps_the_largest() {
        let mut top = TopN::new(2).unwrap();
        top.offer(Record::new(10, "a"));
        top.offer(Record::new(5, "b"));
        top.offer(Record::new(20, "c"));
        assert_eq!(
            top.finalize(),
            vec![Record::new(20, "c"), Record::new(10, "a")]
        );
    }

    #[test]
    fn fewer_items_than_limit_returns_all_sorted() {
        let mut top = TopN::new(5).unwrap();
        top.offer(Record::new(1, "x"));
        top.offer(Record::new(3, "y"));
        assert_eq!(scores(&top.finalize()), vec![3, 1]);
    }

    #[test]
    fn empty_selector_finalizes_to_nothing() {
        let top = TopN::<Record>::new(3).unwrap();
        assert!(top.is_empty());
        assert!(top.finalize().is_empty());
    }

    #[test]
    fn offer_reports_what_happened() {
        let mut top = TopN::new(1).unwrap();
        assert_eq!(top.offer(5), Offer::Inserted);
        assert_eq!(top.offer(3), Offer::Rejected(3));
        assert_eq!(top.offer(9), Offer::Replaced(5));
        assert_eq!(top.peek_min(), Some(&9));
    }

    #[test]
    fn tie_with_minimum_keeps_first_seen() {
        let mut top = TopN::new(2).unwrap();
        top.offer(Record::new(10, "a"));
        top.offer(Record::new(7, "first"));

        // Exactly equal to the minimum: rejected.
        let dup = Record::new(7, "first");
        assert_eq!(top.offer(dup.clone()), Offer::Rejected(dup));
        assert_eq!(top.peek_min(), Some(&Record::new(7, "first")));

        // Same score, greater id: strictly greater pair, accepted.
        assert_eq!(
            top.offer(Record::new(7, "second")),
            Offer::Replaced(Record::new(7, "first"))
        );
    }

    #[test]
    fn equal_scores_sort_by_id_descending() {
        let mut top = TopN::new(3).unwrap();
        top.offer(Record::new(1, "a"));
        top.offer(Record::new(1, "c"));
        top.offer(Record::new(1, "b"));
        let ids: Vec<_> = top.finalize().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn size_never_exceeds_limit() {
        let mut top = TopN::new(3).unwrap();
        for value in 0..1_000 {
            top.offer(value);
            assert!(top.len() <= 3);
        }
        assert_eq!(top.finalize(), vec![999, 998, 997]);
    }

    #[test]
    fn huge_limit_does_not_preallocate() {
        let top = TopN::<i64>::new(usize::MAX).unwrap();
        assert!(top.heap.capacity() < 2 * INITIAL_CAPACITY_CAP);
        assert_eq!(top.limit().get(), usize::MAX);
    }

    #[test]
    fn parses_limits() {
        assert_eq!(parse_limit("3").unwrap().get(), 3);
        assert_eq!(parse_limit(" 12 ").unwrap().get(), 12);
        for raw in ["0", "-1", "abc", "", "2.5"] {
            let err = parse_limit(raw).unwrap_err();
            assert_eq!(err.class(), ErrorClass::Usage, "{raw}");
        }
    }
}
