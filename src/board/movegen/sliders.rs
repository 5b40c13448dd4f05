use super::super::types::{MoveList, Square};
use super::super::Board;
use super::GenMode;

pub(crate) const DIAGONALS: [i16; 4] = [15, 17, -15, -17];
pub(crate) const ORTHOGONALS: [i16; 4] = [1, 16, -1, -16];

impl Board {
    /// Ray-cast along each direction until the edge or the first occupied square.
    pub(super) fn generate_slider_moves(
        &self,
        from: Square,
        code: i8,
        dirs: &[i16],
        mode: GenMode,
        moves: &mut MoveList,
    ) {
        for &dir in dirs {
            let mut cur = from.offset(dir);
            while let Some(to) = cur {
                if !self.push_target(from, to, code, mode, moves) {
                    break;
                }
                cur = to.offset(dir);
            }
        }
    }
}
