//! Unordered list of occupied squares with a square -> slot reverse index.
//!
//! Removal swaps the last entry into the freed slot. `restore` undoes exactly
//! that swap, so a remove/restore pair leaves the iteration order untouched.

use super::types::{Square, BOARD_SIZE};

pub(crate) const MAX_PIECES: usize = 32;
pub(crate) const NO_SLOT: u8 = u8::MAX;

#[derive(Clone, Debug)]
pub(crate) struct PieceList {
    squares: [Square; MAX_PIECES],
    len: usize,
    slot_of: [u8; BOARD_SIZE],
}

impl PieceList {
    pub(crate) fn new() -> Self {
        PieceList {
            squares: [Square::at(0, 0); MAX_PIECES],
            len: 0,
            slot_of: [NO_SLOT; BOARD_SIZE],
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[Square] {
        &self.squares[..self.len]
    }

    /// Returns false when the list is full or the square is already listed.
    pub(crate) fn add(&mut self, sq: Square) -> bool {
        if self.len >= MAX_PIECES || self.slot_of[sq.padded()] != NO_SLOT {
            return false;
        }
        self.squares[self.len] = sq;
        self.slot_of[sq.padded()] = self.len as u8;
        self.len += 1;
        true
    }

    /// Remove `sq` and return the slot it occupied.
    pub(crate) fn remove(&mut self, sq: Square) -> u8 {
        let slot = self.slot_of[sq.padded()];
        debug_assert!(slot != NO_SLOT, "removing unlisted square {sq}");
        if slot == NO_SLOT {
            return NO_SLOT;
        }
        let last = self.squares[self.len - 1];
        self.squares[slot as usize] = last;
        self.slot_of[last.padded()] = slot;
        self.slot_of[sq.padded()] = NO_SLOT;
        self.len -= 1;
        slot
    }

    /// Put `sq` back into `slot`, sending the current occupant to the end.
    pub(crate) fn restore(&mut self, sq: Square, slot: u8) {
        if slot == NO_SLOT {
            return;
        }
        let slot_idx = slot as usize;
        if slot_idx < self.len {
            let displaced = self.squares[slot_idx];
            self.squares[self.len] = displaced;
            self.slot_of[displaced.padded()] = self.len as u8;
        }
        self.squares[slot_idx] = sq;
        self.slot_of[sq.padded()] = slot;
        self.len += 1;
    }

    #[inline]
    pub(crate) fn relocate(&mut self, from: Square, to: Square) {
        let slot = self.slot_of[from.padded()];
        self.slot_of[from.padded()] = NO_SLOT;
        self.slot_of[to.padded()] = slot;
        if slot != NO_SLOT {
            self.squares[slot as usize] = to;
        }
    }
}
