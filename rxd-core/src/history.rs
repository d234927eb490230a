//! Bounded, shift-indexable history of weighted-average values.
//!
//! The buffer holds values of *previous* bars. Shift `k` addresses the value
//! `k` bars before the current one, so `get_shifted(1)` is the most recently
//! stored value and shift 0 never resolves.

use rust_decimal::Decimal;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    shift: usize,
    capacity: usize,
    values: VecDeque<Decimal>,
}

impl HistoryBuffer {
    /// Buffer sized for a scorer sampling lags `shift, 2·shift, 3·shift, 4·shift`.
    /// A shift of 0 is treated as 1.
    pub fn new(shift: usize) -> Self {
        let shift = shift.max(1);
        let capacity = shift * 4 + 5;
        Self {
            shift,
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a value, evicting the oldest past capacity.
    ///
    /// Returns whether enough samples exist for scoring (`>= 4·shift`).
    pub fn add(&mut self, value: Decimal) -> bool {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
        self.is_ready()
    }

    pub fn get_shifted(&self, shift: usize) -> Option<Decimal> {
        if shift == 0 || shift > self.values.len() {
            return None;
        }
        self.values.get(self.values.len() - shift).copied()
    }

    pub fn is_ready(&self) -> bool {
        self.values.len() >= self.shift * 4
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn shift(&self) -> usize {
        self.shift
    }

    /// Oldest-first iterator over the stored values.
    pub fn iter(&self) -> impl Iterator<Item = &Decimal> {
        self.values.iter()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn capacity_follows_shift() {
        assert_eq!(HistoryBuffer::new(1).capacity(), 9);
        assert_eq!(HistoryBuffer::new(3).capacity(), 17);
        // shift 0 clamps to 1
        assert_eq!(HistoryBuffer::new(0).capacity(), 9);
        assert_eq!(HistoryBuffer::new(0).shift(), 1);
    }

    #[test]
    fn ready_after_four_shifts() {
        let mut buf = HistoryBuffer::new(2);
        for i in 0..7 {
            assert!(!buf.add(Decimal::from(i)), "ready too early at {i}");
        }
        assert!(buf.add(dec!(7)));
    }

    #[test]
    fn shifted_lookup() {
        let mut buf = HistoryBuffer::new(1);
        buf.add(dec!(1));
        buf.add(dec!(2));
        buf.add(dec!(3));
        assert_eq!(buf.get_shifted(1), Some(dec!(3)));
        assert_eq!(buf.get_shifted(3), Some(dec!(1)));
        assert_eq!(buf.get_shifted(4), None);
        assert_eq!(buf.get_shifted(0), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut buf = HistoryBuffer::new(1);
        buf.clear();
        buf.add(dec!(1));
        buf.clear();
        buf.clear();
        assert!(buf.is_empty());
        assert!(!buf.is_ready());
    }

    proptest! {
        /// After N > C inserts the buffer holds exactly the last C values in order.
        #[test]
        fn fifo_eviction_keeps_last_capacity(
            shift in 1usize..6,
            values in prop::collection::vec(-10_000i64..10_000, 0..80),
        ) {
            let mut buf = HistoryBuffer::new(shift);
            for v in &values {
                buf.add(Decimal::from(*v));
            }
            let cap = buf.capacity();
            prop_assert!(buf.len() <= cap);
            let expected: Vec<Decimal> = values
                .iter()
                .skip(values.len().saturating_sub(cap))
                .map(|v| Decimal::from(*v))
                .collect();
            let stored: Vec<Decimal> = buf.iter().copied().collect();
            prop_assert_eq!(stored, expected);
        }
    }
}
