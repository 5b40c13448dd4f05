use super::super::types::{MoveList, Square};
use super::super::Board;
use super::GenMode;

pub(crate) const KNIGHT_OFFSETS: [i16; 8] = [33, 31, 18, 14, -14, -18, -31, -33];

impl Board {
    /// Knight and king moves: one step along each offset.
    pub(super) fn generate_leaper_moves(
        &self,
        from: Square,
        code: i8,
        offsets: &[i16],
        mode: GenMode,
        moves: &mut MoveList,
    ) {
        for &delta in offsets {
            if let Some(to) = from.offset(delta) {
                self.push_target(from, to, code, mode, moves);
            }
        }
    }
}
