use std::time::Duration;

use crate::board::{Move, SearchIterationInfo};

pub fn print_perft_info(depth: usize, nodes: u64, elapsed: Duration) {
    println!(
        "info string perft depth {} nodes {} time_ms {}",
        depth,
        nodes,
        elapsed.as_millis()
    );
}

pub fn print_time_info(soft_time_ms: u64, hard_time_ms: u64, move_overhead_ms: u64, depth: Option<u32>) {
    println!(
        "info string time soft {} hard {} overhead {} depth {}",
        soft_time_ms,
        hard_time_ms,
        move_overhead_ms,
        depth.map_or_else(|| "-".to_string(), |d| d.to_string())
    );
}

/// One `info` line per completed iteration.
#[must_use]
pub fn format_iteration_info(info: &SearchIterationInfo) -> String {
    let score = match info.mate_in {
        Some(moves) => format!("mate {moves}"),
        None => format!("cp {}", info.score),
    };
    format!(
        "info depth {} seldepth {} score {} nodes {} nps {} time {} hashfull {} pv {}",
        info.depth, info.seldepth, score, info.nodes, info.nps, info.time_ms, info.hashfull, info.pv
    )
}

pub fn print_bestmove(best_move: Option<Move>) {
    match best_move {
        Some(mv) => println!("bestmove {mv}"),
        None => println!("bestmove 0000"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_mate_and_centipawn_scores() {
        let mut info = SearchIterationInfo {
            depth: 5,
            seldepth: 9,
            score: 34,
            mate_in: None,
            nodes: 12_000,
            nps: 400_000,
            time_ms: 30,
            tt_hits: 100,
            hashfull: 3,
            pv: "e2e4 e7e5".to_string(),
        };
        assert_eq!(
            format_iteration_info(&info),
            "info depth 5 seldepth 9 score cp 34 nodes 12000 nps 400000 time 30 hashfull 3 pv e2e4 e7e5"
        );

        info.mate_in = Some(-2);
        assert!(format_iteration_info(&info).contains("score mate -2 "));
    }
}
