//! Transposition table for caching search results.
//!
//! One entry per `key mod size`, no buckets and no chaining. A collision
//! between two positions evicts the resident only once it has aged, that is,
//! survived `max_age` searches without being refreshed.

use std::mem;

use crate::board::{Move, PackedMove};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Failed high: score >= beta
    UpperBound, // Failed low: score <= alpha
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub best_move: PackedMove,
    pub depth: i32,
    pub score: i32,
    pub bound_type: BoundType,
    /// Search generation that last wrote this entry.
    pub generation: u16,
}

impl TTEntry {
    pub fn best_move(&self) -> Option<PackedMove> {
        (!self.best_move.is_none()).then_some(self.best_move)
    }

    /// Score usable as a cutoff at `depth` inside the `(alpha, beta)` window.
    #[must_use]
    pub fn cutoff(&self, depth: i32, score: i32, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        match self.bound_type {
            BoundType::Exact => Some(score),
            BoundType::LowerBound if score >= beta => Some(score),
            BoundType::UpperBound if score <= alpha => Some(score),
            _ => None,
        }
    }
}

pub const DEFAULT_TT_MB: usize = 16;
pub const DEFAULT_MAX_AGE: u16 = 2;
const MIN_ENTRIES: usize = 1024;

pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    max_age: u16,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let slots = (size_mb * 1024 * 1024) / mem::size_of::<Option<TTEntry>>();
        Self::with_entries(slots.max(MIN_ENTRIES))
    }

    /// Table with an exact number of slots.
    #[must_use]
    pub fn with_entries(slots: usize) -> Self {
        TranspositionTable {
            entries: vec![None; slots.max(1)],
            max_age: DEFAULT_MAX_AGE,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(Option::is_none)
    }

    pub fn set_max_age(&mut self, max_age: u16) {
        self.max_age = max_age.max(1);
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key % self.entries.len() as u64) as usize
    }

    /// Entry stored under exactly this key, if any.
    #[must_use]
    pub fn lookup(&self, key: u64) -> Option<&TTEntry> {
        self.entries[self.index(key)]
            .as_ref()
            .filter(|entry| entry.key == key)
    }

    /// Store a search result.
    ///
    /// - Same key: overwrite when `depth` is at least the resident depth;
    ///   otherwise only patch in `best_move` if the resident has none.
    /// - Different key: overwrite an empty or aged slot, else keep the resident.
    pub fn store(
        &mut self,
        key: u64,
        depth: i32,
        score: i32,
        bound_type: BoundType,
        best_move: Option<&Move>,
        generation: u16,
    ) {
        let incoming = TTEntry {
            key,
            best_move: best_move.map_or(PackedMove::NONE, Move::pack),
            depth,
            score,
            bound_type,
            generation,
        };
        let max_age = self.max_age;
        let idx = self.index(key);
        let slot = &mut self.entries[idx];

        match slot {
            None => *slot = Some(incoming),
            Some(resident) if resident.key == key => {
                if depth >= resident.depth {
                    *resident = incoming;
                } else {
                    if resident.best_move.is_none() && !incoming.best_move.is_none() {
                        resident.best_move = incoming.best_move;
                    }
                    resident.generation = generation;
                }
            }
            Some(resident) => {
                if generation.wrapping_sub(resident.generation) >= max_age {
                    *resident = incoming;
                }
            }
        }
    }

    /// Returns hash table fullness in per mille (0-1000), sampled.
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let sample = self.entries.len().min(1000);
        let used = self.entries[..sample].iter().filter(|e| e.is_some()).count();
        ((used * 1000) / sample) as u32
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
    }
}
