//! Iterative deepening driver with aspiration windows and PV extraction.

use crate::board::Move;

use super::super::constants::{ASPIRATION_MAX_DELTA, INFINITY, MATE_SCORE, MATE_THRESHOLD};
use super::super::{mate_in, SearchIterationInfo, SearchResult};
use super::{NodeType, SearchContext};

impl SearchContext<'_> {
    pub(crate) fn iterative_deepening(&mut self) -> SearchResult {
        let mut result = SearchResult::default();

        if !self.board.has_both_kings() {
            log::warn!("search refused: position is missing a king");
            return result;
        }

        let root_moves = self.board.generate_legal_moves();
        if root_moves.is_empty() {
            result.score = if self.board.in_check() { -MATE_SCORE } else { 0 };
            return result;
        }

        // A forced move needs no deep search, just a score.
        let max_depth = if root_moves.len() == 1 { 1 } else { self.max_depth };

        for depth in 1..=max_depth {
            self.state.pv_table.clear();
            let score = self.search_root(depth as i32, result.score);

            if self.aborted {
                log::debug!("iteration {depth} aborted after {} nodes", self.nodes);
                break;
            }

            let Some(best) = self.root_best.or_else(|| root_moves.first()) else {
                break;
            };
            result.best_move = Some(best);
            result.score = score;
            result.depth = depth;
            result.seldepth = self.seldepth as u32;
            result.pv = self.extract_pv(best, depth as usize + 8);
            result.nodes = self.nodes;

            self.state.stats.nodes = self.nodes;
            self.state.stats.seldepth = self.seldepth as u32;
            self.report(&result);

            if score.abs() >= MATE_THRESHOLD && MATE_SCORE - score.abs() <= depth as i32 {
                break;
            }
            if self.soft_time_ms > 0 && self.elapsed_ms() >= self.soft_time_ms {
                break;
            }
        }

        if result.best_move.is_none() {
            result.best_move = root_moves.first();
            result.pv = result.best_move.into_iter().collect();
        }
        result.nodes = self.nodes;
        self.state.stats.nodes = self.nodes;
        result
    }

    /// One root search, narrowing the window around the previous score
    /// once deep enough. Widens on failure until a full window is reached.
    fn search_root(&mut self, depth: i32, previous: i32) -> i32 {
        let params = &self.state.params;
        let use_aspiration = depth as u32 >= params.aspiration_min_depth && previous.abs() < MATE_THRESHOLD;
        let mut delta = params.aspiration_window.max(1);

        if !use_aspiration {
            self.root_best = None;
            return self.alphabeta(depth, 0, 0, -INFINITY, INFINITY, true, NodeType::Pv);
        }

        loop {
            let alpha = (previous - delta).max(-INFINITY);
            let beta = (previous + delta).min(INFINITY);
            self.root_best = None;
            let score = self.alphabeta(depth, 0, 0, alpha, beta, true, NodeType::Pv);
            if self.aborted || (score > alpha && score < beta) {
                return score;
            }

            delta *= 2;
            log::trace!("depth {depth}: score {score} outside ({alpha}, {beta}), widening to {delta}");
            if delta > ASPIRATION_MAX_DELTA {
                self.root_best = None;
                return self.alphabeta(depth, 0, 0, -INFINITY, INFINITY, true, NodeType::Pv);
            }
        }
    }

    /// Follow stored best moves from the root, stopping at a miss, an illegal
    /// move, or a repeated position. The board is restored on return.
    fn extract_pv(&mut self, first: Move, max_len: usize) -> Vec<Move> {
        let mut pv = vec![first];
        let mut seen = vec![self.board.hash()];
        self.board.make_move(&first);

        while pv.len() < max_len {
            let key = self.board.hash();
            if seen.contains(&key) {
                break;
            }
            seen.push(key);

            let stored = self
                .state
                .pv_table
                .lookup(key)
                .or_else(|| self.state.tt.lookup(key))
                .and_then(|entry| entry.best_move());
            let Some(packed) = stored else {
                break;
            };
            let legal = self.board.generate_legal_moves();
            let Some(next) = legal.iter().find(|m| packed.matches(m)).copied() else {
                break;
            };
            self.board.make_move(&next);
            pv.push(next);
        }

        for m in pv.iter().rev() {
            self.board.unmake_move(m);
        }
        pv
    }

    fn report(&self, result: &SearchResult) {
        let time_ms = self.elapsed_ms();
        let pv = result
            .pv
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");

        log::debug!(
            "depth {} seldepth {} score {} nodes {} time {}ms pv {}",
            result.depth,
            result.seldepth,
            result.score,
            result.nodes,
            time_ms,
            pv
        );

        if let Some(callback) = &self.info_callback {
            let info = SearchIterationInfo {
                depth: result.depth,
                seldepth: result.seldepth,
                score: result.score,
                mate_in: mate_in(result.score),
                nodes: result.nodes,
                nps: result.nodes * 1000 / time_ms.max(1),
                time_ms,
                tt_hits: self.state.stats.tt_hits,
                hashfull: self.state.hashfull_per_mille(),
                pv,
            };
            callback(&info);
        }
    }
}
