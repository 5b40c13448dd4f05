//! Forward pruning and reductions applied inside `alphabeta`.

use crate::board::PackedMove;

use super::super::constants::MATE_THRESHOLD;
use super::{NodeType, SearchContext};

impl SearchContext<'_> {
    /// Node-level pruning before any move is searched: reverse futility,
    /// razoring and null move. `depth` may be lowered by razoring.
    ///
    /// Only called at non-PV, non-root nodes that are not in check.
    #[allow(clippy::too_many_arguments)]
    pub(super) fn prune_node(
        &mut self,
        depth: &mut i32,
        ply: usize,
        extensions: u32,
        alpha: i32,
        beta: i32,
        static_eval: i32,
        allow_null: bool,
        node: NodeType,
    ) -> Option<i32> {
        let params = self.state.params.clone();

        if params.reverse_futility
            && *depth <= params.rfp_max_depth
            && static_eval - params.rfp_margin * *depth >= beta
        {
            return Some(static_eval);
        }

        if params.razoring && *depth <= params.razor_max_depth && static_eval + params.razor_margin < alpha {
            *depth -= 1;
            if *depth <= 0 {
                return Some(self.leaf(alpha, beta, ply));
            }
        }

        if params.null_move
            && allow_null
            && *depth >= params.null_min_depth
            && static_eval >= beta
            && !self.board.only_pawns_left(self.board.side_to_move())
        {
            self.board.make_null_move();
            let score = -self.alphabeta(
                *depth - 1 - params.null_reduction,
                ply + 1,
                extensions,
                -beta,
                -beta + 1,
                false,
                node.child(),
            );
            self.board.unmake_null_move();
            if self.aborted {
                return None;
            }
            if score >= beta {
                return Some(beta);
            }
        }

        None
    }

    /// Shallow search at a PV node with no hash move, to find one.
    pub(super) fn internal_iterative_deepening(
        &mut self,
        depth: i32,
        ply: usize,
        extensions: u32,
        alpha: i32,
        beta: i32,
    ) -> Option<PackedMove> {
        let params = &self.state.params;
        if !params.iid || !params.use_tt || depth < params.iid_min_depth {
            return None;
        }
        let reduced = depth - params.iid_reduction;

        let root_best = self.root_best;
        self.alphabeta(reduced, ply, extensions, alpha, beta, true, NodeType::Pv);
        self.root_best = root_best;
        if self.aborted {
            return None;
        }

        self.state.tt.lookup(self.board.hash()).and_then(|entry| entry.best_move())
    }

    /// Static score plus margin below which quiet moves are skipped, if
    /// futility pruning applies at this node.
    pub(super) fn futility_floor(
        &self,
        depth: i32,
        alpha: i32,
        static_eval: i32,
        in_check: bool,
        is_pv: bool,
    ) -> Option<i32> {
        let params = &self.state.params;
        (params.futility
            && !is_pv
            && !in_check
            && depth <= params.futility_max_depth
            && alpha.abs() < MATE_THRESHOLD)
            .then(|| static_eval + params.futility_margin * depth)
    }

    /// Plies to take off a late quiet move.
    pub(super) fn late_move_reduction(
        &self,
        depth: i32,
        legal: usize,
        quiet: bool,
        in_check: bool,
        gives_check: bool,
        node: NodeType,
    ) -> i32 {
        let params = &self.state.params;
        if !params.lmr
            || depth < params.lmr_min_depth
            || legal <= params.lmr_min_move
            || !quiet
            || in_check
            || gives_check
        {
            return 0;
        }
        let mut reduction = 1;
        if legal > 2 * params.lmr_min_move {
            reduction += 1;
        }
        if node == NodeType::Cut {
            reduction += 1;
        }
        reduction.min(depth - 2).max(0)
    }
}
