//! Fixed-size repetition table.
//!
//! One slot per `key mod size`, no chaining. Each slot remembers the full key it
//! counts for, so a collision is a missed repetition rather than a false draw.

const REPETITION_SLOTS: usize = 1 << 12;

#[derive(Clone, Copy, Debug, Default)]
struct RepetitionEntry {
    key: u64,
    count: u16,
}

#[derive(Clone, Debug)]
pub(crate) struct RepetitionTable {
    entries: Vec<RepetitionEntry>,
}

impl RepetitionTable {
    pub(crate) fn new() -> Self {
        RepetitionTable {
            entries: vec![RepetitionEntry::default(); REPETITION_SLOTS],
        }
    }

    #[inline]
    fn slot(key: u64) -> usize {
        (key % REPETITION_SLOTS as u64) as usize
    }

    pub(crate) fn get(&self, key: u64) -> u32 {
        let entry = &self.entries[Self::slot(key)];
        if entry.count > 0 && entry.key == key {
            u32::from(entry.count)
        } else {
            0
        }
    }

    /// Count one more occurrence of `key`; a slot owned by another live key is left alone.
    pub(crate) fn increment(&mut self, key: u64) -> u32 {
        let entry = &mut self.entries[Self::slot(key)];
        if entry.count == 0 {
            entry.key = key;
        }
        if entry.key != key {
            return 0;
        }
        entry.count = entry.count.saturating_add(1);
        u32::from(entry.count)
    }

    pub(crate) fn decrement(&mut self, key: u64) {
        let entry = &mut self.entries[Self::slot(key)];
        if entry.key == key && entry.count > 0 {
            entry.count -= 1;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.fill(RepetitionEntry::default());
    }
}
