//! Transaction position index
//!
//! Slot `i` holds the offset of transaction `i` relative to the logical
//! file's header position, or `UNUSED`. Relative offsets survive shifts of
//! the whole logical file; only shifts inside the file touch them.
//!
//! Growth:
//! - starts without storage
//! - first resize allocates `count + 1` slots
//! - later resizes double, capped at `MAX_TRANSACTIONS`

/// Most transactions one logical file can hold (E4 is seven digits)
pub const MAX_TRANSACTIONS: usize = 9_999_999;

/// Marker of an unused slot
pub const UNUSED: i64 = -1;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionIndex {
    slots: Option<Vec<i64>>,
}

impl TransactionIndex {
    pub fn capacity(&self) -> usize {
        self.slots.as_ref().map_or(0, Vec::len)
    }

    /// Makes room for slot `slot`, `count` being the transaction count.
    pub fn ensure(&mut self, slot: usize, count: usize) {
        while slot >= self.capacity() && self.capacity() < MAX_TRANSACTIONS {
            self.resize(count);
        }
    }

    fn resize(&mut self, count: usize) {
        match self.slots.as_mut() {
            None => self.slots = Some(vec![UNUSED; (count + 1).min(MAX_TRANSACTIONS)]),
            Some(slots) => {
                let capacity = (slots.len() * 2).min(MAX_TRANSACTIONS);
                slots.resize(capacity, UNUSED);
            }
        }
    }

    /// Offset of transaction `i`, `None` for unused or missing slots.
    pub fn get(&self, i: usize) -> Option<u64> {
        self.slots
            .as_ref()
            .and_then(|slots| slots.get(i))
            .filter(|&&offset| offset != UNUSED)
            .map(|&offset| offset as u64)
    }

    /// Stores an offset; the slot must exist.
    pub fn set(&mut self, i: usize, offset: u64) {
        if let Some(slot) = self.slots.as_mut().and_then(|slots| slots.get_mut(i)) {
            *slot = offset as i64;
        }
    }

    /// Adds `delta` to every used slot after `i`.
    pub fn shift_after(&mut self, i: usize, delta: i64) {
        if let Some(slots) = self.slots.as_mut() {
            for slot in slots.iter_mut().skip(i + 1) {
                if *slot != UNUSED {
                    *slot += delta;
                }
            }
        }
    }

    /// Drops slot `i`: later entries move one slot down and `length` bytes
    /// back; the freed last slot becomes unused.
    pub fn remove(&mut self, i: usize, length: u64) {
        let Some(slots) = self.slots.as_mut() else {
            return;
        };
        if i >= slots.len() {
            return;
        }
        for j in i + 1..slots.len() {
            slots[j - 1] = if slots[j] == UNUSED {
                UNUSED
            } else {
                slots[j] - length as i64
            };
        }
        if let Some(last) = slots.last_mut() {
            *last = UNUSED;
        }
    }

    /// Number of used slots
    pub fn live_count(&self) -> usize {
        self.slots
            .as_ref()
            .map_or(0, |slots| slots.iter().filter(|&&s| s != UNUSED).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth() {
        let mut index = TransactionIndex::default();
        assert_eq!(index.capacity(), 0);

        index.ensure(0, 0);
        assert_eq!(index.capacity(), 1);
        index.ensure(1, 1);
        assert_eq!(index.capacity(), 2);
        index.ensure(2, 2);
        assert_eq!(index.capacity(), 4);
        index.ensure(4, 4);
        assert_eq!(index.capacity(), 8);
        assert_eq!(index.live_count(), 0);
    }

    #[test]
    fn test_first_resize_uses_count() {
        let mut index = TransactionIndex::default();
        index.ensure(5, 5);
        assert_eq!(index.capacity(), 6);
    }

    #[test]
    fn test_set_get() {
        let mut index = TransactionIndex::default();
        index.ensure(0, 0);
        index.set(0, 128);
        assert_eq!(index.get(0), Some(128));
        assert_eq!(index.get(1), None);
    }

    #[test]
    fn test_shift_after() {
        let mut index = TransactionIndex::default();
        for (i, offset) in [128, 384, 640].into_iter().enumerate() {
            index.ensure(i, i);
            index.set(i, offset);
        }
        index.shift_after(0, 128);
        assert_eq!(index.get(0), Some(128));
        assert_eq!(index.get(1), Some(512));
        assert_eq!(index.get(2), Some(768));
        assert_eq!(index.get(3), None);
    }

    #[test]
    fn test_remove() {
        let mut index = TransactionIndex::default();
        for (i, offset) in [128, 384, 640].into_iter().enumerate() {
            index.ensure(i, i);
            index.set(i, offset);
        }
        index.remove(0, 256);
        assert_eq!(index.get(0), Some(128));
        assert_eq!(index.get(1), Some(384));
        assert_eq!(index.get(2), None);
        assert_eq!(index.live_count(), 2);
    }
}
