//! Universal Chess Interface (UCI) protocol implementation.
//!
//! Handles communication with chess GUIs following the UCI specification.

use std::fmt;
use std::io::{self, BufRead};
use std::sync::Arc;
use std::time::Instant;

use crate::board::{Board, FenError, Move, MoveParseError, SearchInfoCallback};
use crate::engine::{BuiltinBook, EngineController, SearchRequest, TimeControl};

pub mod command;
pub mod options;
pub mod print;

use command::{parse_go, parse_uci_command, GoArgs, UciCommand};
use options::{parse_setoption, UciOptionAction, UciOptions};

/// Error type for UCI position command parsing
#[derive(Debug, Clone)]
pub enum UciError {
    /// Invalid FEN string
    InvalidFen(FenError),
    /// Invalid move in the move list
    InvalidMove { move_str: String, error: MoveParseError },
    /// Missing required parts in the command
    MissingParts,
}

impl fmt::Display for UciError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UciError::InvalidFen(e) => write!(f, "Invalid FEN: {e}"),
            UciError::InvalidMove { move_str, error } => {
                write!(f, "Invalid move '{move_str}': {error}")
            }
            UciError::MissingParts => write!(f, "Missing required parts in position command"),
        }
    }
}

impl std::error::Error for UciError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UciError::InvalidFen(e) => Some(e),
            UciError::InvalidMove { error, .. } => Some(error),
            UciError::MissingParts => None,
        }
    }
}

impl From<FenError> for UciError {
    fn from(e: FenError) -> Self {
        UciError::InvalidFen(e)
    }
}

/// A parsed `position` command.
#[derive(Debug, Clone)]
pub struct PositionSetup {
    pub board: Board,
    /// Moves from the initial position; `None` when set up from a FEN.
    pub played: Option<Vec<String>>,
}

/// Parse a move in UCI format (e.g., "e2e4", "e7e8q").
///
/// Delegates to `Board::find_move`. Returns `None` if the move is invalid.
#[must_use]
pub fn parse_uci_move(board: &mut Board, uci_string: &str) -> Option<Move> {
    board.find_move(uci_string)
}

/// Parse a UCI position command.
///
/// Supports both "position startpos" and "position fen <fen>" formats,
/// optionally followed by "moves <move1> <move2> ...". The FEN may omit its
/// trailing clock fields.
pub fn try_parse_position_command(parts: &[&str]) -> Result<PositionSetup, UciError> {
    let moves_at = parts.iter().position(|p| *p == "moves").unwrap_or(parts.len());

    let (mut board, mut played) = match parts.get(1) {
        Some(&"startpos") => (Board::new(), Some(Vec::new())),
        Some(&"fen") if moves_at > 2 => (Board::try_from_fen(&parts[2..moves_at].join(" "))?, None),
        _ => return Err(UciError::MissingParts),
    };

    for text in parts.iter().skip(moves_at + 1) {
        let mv = board.parse_move(text).map_err(|error| UciError::InvalidMove {
            move_str: (*text).to_string(),
            error,
        })?;
        board.play(&mv);
        if let Some(played) = played.as_mut() {
            played.push(mv.to_string());
        }
    }

    Ok(PositionSetup { board, played })
}

/// Time control for the side to move.
#[must_use]
pub fn time_control_for(args: &GoArgs, white_to_move: bool) -> TimeControl {
    if args.infinite {
        return TimeControl::Infinite;
    }
    if let Some(ms) = args.movetime {
        return TimeControl::move_time_ms(ms);
    }
    let (time, inc) = if white_to_move {
        (args.wtime, args.winc)
    } else {
        (args.btime, args.binc)
    };
    match time {
        Some(time_left_ms) => TimeControl::Incremental {
            time_left_ms,
            inc_ms: inc.unwrap_or(0),
            movestogo: args.movestogo,
        },
        None => TimeControl::Infinite,
    }
}

fn info_printer() -> SearchInfoCallback {
    Arc::new(|info| println!("{}", print::format_iteration_info(info)))
}

/// Run the UCI loop on stdin/stdout until `quit` or end of input.
pub fn run_uci_loop() {
    let mut options = UciOptions::default();
    let mut controller = EngineController::new(options.hash_mb);
    controller.set_info_callback(Some(info_printer()));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("failed to read stdin: {e}");
                break;
            }
        };
        let Some(cmd) = parse_uci_command(&line) else {
            continue;
        };

        match cmd {
            UciCommand::Uci => options.print(),
            UciCommand::IsReady => println!("readyok"),
            UciCommand::UciNewGame => controller.new_game(),
            UciCommand::Position(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                match try_parse_position_command(&parts) {
                    Ok(setup) => controller.set_position(setup.board, setup.played),
                    Err(e) => {
                        log::warn!("rejected position: {e}");
                        println!("info string error {e}");
                    }
                }
            }
            UciCommand::Go(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                let args = parse_go(&parts);
                let time_control = time_control_for(&args, controller.board().white_to_move());
                controller.time_config_mut().move_overhead_ms = options.move_overhead_ms;

                let (soft, hard) = time_control.compute_limits(controller.time_config());
                print::print_time_info(soft, hard, options.move_overhead_ms, args.depth);

                let request = SearchRequest {
                    time_control,
                    depth: args.depth,
                    nodes: args.nodes,
                };
                if let Err(e) = controller.start_search(request, |result| print::print_bestmove(result.best_move)) {
                    log::warn!("could not start search: {e}");
                    print::print_bestmove(None);
                }
            }
            UciCommand::Perft(depth) => {
                controller.stop_search();
                let mut board = controller.board().clone();
                let start = Instant::now();
                let nodes = board.perft(depth);
                print::print_perft_info(depth, nodes, start.elapsed());
            }
            UciCommand::SetOption(parts) => {
                let parts: Vec<&str> = parts.iter().map(String::as_str).collect();
                let Some((name, value)) = parse_setoption(&parts) else {
                    continue;
                };
                match options.apply_setoption(&name, value.as_deref()) {
                    Some(UciOptionAction::ReinitHash(mb)) => controller.resize_hash(mb),
                    Some(UciOptionAction::SetOwnBook(true)) => {
                        controller.set_book(Some(Arc::new(BuiltinBook::new())));
                    }
                    Some(UciOptionAction::SetOwnBook(false)) => controller.set_book(None),
                    Some(UciOptionAction::SetMoveOverhead(_)) | None => {}
                }
            }
            UciCommand::Stop => controller.stop_search(),
            UciCommand::Quit => break,
            UciCommand::Unknown(text) => log::info!("ignoring unknown command: {text}"),
        }
    }

    controller.stop_search();
}
