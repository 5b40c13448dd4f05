//! Core search implementation.
//!
//! Scores are negamax: always relative to the side to move at the node.
//! The search is fail-hard, so a node returns a value inside `[alpha, beta]`
//! except for transposition table hits and static pruning returns.

mod iterative;
mod pruning;
mod quiescence;

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::board::{Board, GenMode, Move, MoveList, PackedMove};
use crate::tt::BoundType;

use super::constants::{DRAW_SCORE, MATE_SCORE, MATE_THRESHOLD, MAX_PLY};
use super::{order_moves, SearchConfig, SearchInfoCallback, SearchState};

/// Expected role of a node in the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    /// On the principal variation, searched with an open window.
    Pv,
    /// Expected to fail high.
    Cut,
    /// Expected to fail low.
    All,
}

impl NodeType {
    /// Type of a non-PV child.
    #[inline]
    fn child(self) -> NodeType {
        match self {
            NodeType::Pv | NodeType::All => NodeType::Cut,
            NodeType::Cut => NodeType::All,
        }
    }
}

/// Mate scores are stored relative to the node, not the root.
#[inline]
fn score_to_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score + ply as i32
    } else if score <= -MATE_THRESHOLD {
        score - ply as i32
    } else {
        score
    }
}

#[inline]
fn score_from_tt(score: i32, ply: usize) -> i32 {
    if score >= MATE_THRESHOLD {
        score - ply as i32
    } else if score <= -MATE_THRESHOLD {
        score + ply as i32
    } else {
        score
    }
}

/// State of one running search.
pub(crate) struct SearchContext<'a> {
    pub(crate) board: &'a mut Board,
    pub(crate) state: &'a mut SearchState,
    stop: &'a AtomicBool,
    start_time: Instant,
    soft_time_ms: u64,
    hard_time_ms: u64,
    node_limit: u64,
    max_depth: u32,
    info_callback: Option<SearchInfoCallback>,
    pub(crate) nodes: u64,
    seldepth: usize,
    /// Sticky: once set, every node returns immediately and results are discarded.
    aborted: bool,
    /// Best move found at ply 0 during the current iteration.
    root_best: Option<Move>,
}

impl<'a> SearchContext<'a> {
    pub(crate) fn new(
        board: &'a mut Board,
        state: &'a mut SearchState,
        config: &SearchConfig,
        stop: &'a AtomicBool,
    ) -> Self {
        SearchContext {
            board,
            state,
            stop,
            start_time: Instant::now(),
            soft_time_ms: config.soft_time_ms,
            hard_time_ms: config.hard_time_ms,
            node_limit: config.node_limit,
            max_depth: config.max_depth.unwrap_or(MAX_PLY as u32).clamp(1, MAX_PLY as u32 - 1),
            info_callback: config.info_callback.clone(),
            nodes: 0,
            seldepth: 0,
            aborted: false,
            root_best: None,
        }
    }

    /// Stop flag and node budget every node, clock every `poll_interval` nodes.
    #[inline]
    fn check_abort(&mut self) -> bool {
        if self.aborted {
            return true;
        }
        if self.stop.load(Ordering::Relaxed) || (self.node_limit > 0 && self.nodes >= self.node_limit) {
            self.aborted = true;
        } else if self.hard_time_ms > 0
            && self.nodes % self.state.params.poll_interval.max(1) == 0
            && self.elapsed_ms() >= self.hard_time_ms
        {
            self.aborted = true;
        }
        self.aborted
    }

    #[inline]
    fn elapsed_ms(&self) -> u64 {
        self.start_time.elapsed().as_millis() as u64
    }

    /// Static evaluation relative to the side to move.
    #[inline]
    fn evaluate(&self) -> i32 {
        let score = self.state.evaluator().evaluate(self.board);
        if self.board.white_to_move() {
            score
        } else {
            -score
        }
    }

    #[inline]
    fn visit(&mut self, ply: usize) {
        self.nodes += 1;
        if ply > self.seldepth {
            self.seldepth = ply;
        }
    }

    /// Horizon: quiescence when enabled, otherwise the static score.
    fn leaf(&mut self, alpha: i32, beta: i32, ply: usize) -> i32 {
        if self.state.params.quiescence {
            self.quiescence(alpha, beta, ply)
        } else {
            self.visit(ply);
            self.evaluate()
        }
    }

    fn store(&mut self, depth: i32, ply: usize, score: i32, bound: BoundType, best: Option<&Move>) {
        if self.aborted {
            return;
        }
        let key = self.board.hash();
        let score = score_to_tt(score, ply);
        let generation = self.state.generation;
        if self.state.params.use_tt {
            self.state.tt.store(key, depth, score, bound, best, generation);
        }
        if bound == BoundType::Exact {
            self.state.pv_table.store(key, depth, score, bound, best, generation);
        }
    }

    /// Alpha-beta with PVS. Returns 0 once aborted; callers must check `aborted`.
    #[allow(clippy::too_many_arguments, clippy::too_many_lines)]
    pub(crate) fn alphabeta(
        &mut self,
        mut depth: i32,
        ply: usize,
        mut extensions: u32,
        mut alpha: i32,
        mut beta: i32,
        allow_null: bool,
        node: NodeType,
    ) -> i32 {
        if self.check_abort() {
            return 0;
        }
        if depth <= 0 {
            return self.leaf(alpha, beta, ply);
        }
        self.visit(ply);

        let is_root = ply == 0;
        let is_pv = node == NodeType::Pv;

        if !is_root {
            if self.board.halfmove_clock() >= 100
                || self.board.repetition_count() >= 2
                || self.board.is_insufficient_material()
            {
                return DRAW_SCORE;
            }

            // Mate-distance pruning
            alpha = alpha.max(-MATE_SCORE + ply as i32);
            beta = beta.min(MATE_SCORE - ply as i32 - 1);
            if alpha >= beta {
                return alpha;
            }

            if ply >= MAX_PLY - 1 {
                return self.evaluate();
            }
        }

        let key = self.board.hash();
        let mut tt_move = PackedMove::NONE;
        if self.state.params.use_tt {
            if let Some(entry) = self.state.tt.lookup(key).copied() {
                tt_move = entry.best_move;
                if !is_pv {
                    let score = score_from_tt(entry.score, ply);
                    if let Some(cut) = entry.cutoff(depth, score, alpha, beta) {
                        self.state.stats.tt_hits += 1;
                        return cut;
                    }
                }
            }
        }

        let in_check = self.board.in_check();
        if in_check && !is_root && extensions < self.state.params.max_check_extensions {
            depth += 1;
            extensions += 1;
        }

        let static_eval = self.evaluate();

        if !is_pv && !in_check && !is_root && beta.abs() < MATE_THRESHOLD {
            if let Some(score) = self.prune_node(&mut depth, ply, extensions, alpha, beta, static_eval, allow_null, node) {
                return score;
            }
            if self.aborted {
                return 0;
            }
        }

        if is_pv && tt_move.is_none() {
            if let Some(mv) = self.internal_iterative_deepening(depth, ply, extensions, alpha, beta) {
                tt_move = mv;
            }
            if self.aborted {
                return 0;
            }
        }

        let mut moves = MoveList::new();
        self.board.generate_pseudo_moves(GenMode::Search, &mut moves);
        order_moves(&mut moves, tt_move, Some(&self.state.history));

        let futility_floor = self.futility_floor(depth, alpha, static_eval, in_check, is_pv);

        let mut legal = 0usize;
        let mut best: Option<Move> = None;

        for m in &moves {
            self.board.make_move(m);
            if self.board.mover_left_in_check() {
                self.board.unmake_move(m);
                continue;
            }
            legal += 1;

            let gives_check = self.board.in_check();
            let quiet = m.is_quiet();

            if legal > 1 && quiet && !gives_check && futility_floor.is_some_and(|floor| floor <= alpha) {
                self.board.unmake_move(m);
                continue;
            }

            let child_depth = depth - 1;
            let mut score;
            if legal == 1 {
                let child = if is_pv { NodeType::Pv } else { node.child() };
                score = -self.alphabeta(child_depth, ply + 1, extensions, -beta, -alpha, true, child);
            } else {
                let child = node.child();
                let reduction = self.late_move_reduction(depth, legal, quiet, in_check, gives_check, node);
                score = -self.alphabeta(child_depth - reduction, ply + 1, extensions, -alpha - 1, -alpha, true, child);
                if reduction > 0 && score > alpha && !self.aborted {
                    score = -self.alphabeta(child_depth, ply + 1, extensions, -alpha - 1, -alpha, true, child);
                }
                if is_pv && score > alpha && score < beta && !self.aborted {
                    score = -self.alphabeta(child_depth, ply + 1, extensions, -beta, -alpha, true, NodeType::Pv);
                }
            }

            self.board.unmake_move(m);
            if self.aborted {
                return 0;
            }

            if score >= beta {
                self.store(depth, ply, beta, BoundType::LowerBound, Some(m));
                if quiet {
                    self.state.history.reward(m, depth);
                }
                if is_root {
                    self.root_best = Some(*m);
                }
                return beta;
            }
            if score > alpha {
                alpha = score;
                best = Some(*m);
                if is_root {
                    self.root_best = Some(*m);
                }
            }
        }

        if legal == 0 {
            return if in_check {
                -MATE_SCORE + ply as i32
            } else {
                DRAW_SCORE
            };
        }

        match best {
            Some(m) => self.store(depth, ply, alpha, BoundType::Exact, Some(&m)),
            None => self.store(depth, ply, alpha, BoundType::UpperBound, None),
        }
        alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mate_scores_convert_both_ways() {
        let mate_in_three = MATE_SCORE - 5;
        let stored = score_to_tt(mate_in_three, 2);
        assert_eq!(stored, MATE_SCORE - 3);
        assert_eq!(score_from_tt(stored, 2), mate_in_three);
        assert_eq!(score_from_tt(score_to_tt(-mate_in_three, 4), 4), -mate_in_three);
        assert_eq!(score_to_tt(150, 9), 150);
    }

    #[test]
    fn test_node_type_children() {
        assert_eq!(NodeType::Pv.child(), NodeType::Cut);
        assert_eq!(NodeType::Cut.child(), NodeType::All);
        assert_eq!(NodeType::All.child(), NodeType::Cut);
    }
}
