//! Engine controller implementation.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;

use crate::board::{search, Board, Move, SearchConfig, SearchInfoCallback, SearchResult, SearchState};

use super::book::OpeningBook;
use super::time::{TimeConfig, TimeControl};

/// Search thread stack size (32 MB)
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

/// Active search job state
pub struct SearchJob {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl SearchJob {
    /// Stop the search and wait for the thread to finish
    pub fn stop_and_wait(self) {
        self.stop.store(true, Ordering::Relaxed);
        self.wait();
    }

    /// Let the search run to its own limits.
    pub fn wait(self) {
        if self.handle.join().is_err() {
            log::warn!("search thread panicked");
        }
    }

    /// Signal stop without waiting
    pub fn signal_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

/// What to search for on `go`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchRequest {
    pub time_control: TimeControl,
    /// Maximum depth to search (None = unlimited)
    pub depth: Option<u32>,
    /// Node limit (None = unlimited)
    pub nodes: Option<u64>,
}

impl SearchRequest {
    #[must_use]
    pub fn depth(depth: u32) -> Self {
        SearchRequest {
            depth: Some(depth),
            ..Default::default()
        }
    }
}

/// Engine controller managing search and game state
pub struct EngineController {
    board: Board,
    /// Move texts since the initial position; `None` after a custom setup.
    played: Option<Vec<String>>,
    search_state: Arc<Mutex<SearchState>>,
    current_job: Option<SearchJob>,
    info_callback: Option<SearchInfoCallback>,
    book: Option<Arc<dyn OpeningBook>>,
    /// Set once the engine has searched in the current game.
    left_book: bool,
    time_config: TimeConfig,
}

impl EngineController {
    #[must_use]
    pub fn new(tt_mb: usize) -> Self {
        EngineController {
            board: Board::new(),
            played: Some(Vec::new()),
            search_state: Arc::new(Mutex::new(SearchState::new(tt_mb))),
            current_job: None,
            info_callback: None,
            book: None,
            left_book: false,
            time_config: TimeConfig::default(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Set the position. `played` lists the moves from the initial
    /// position, or `None` if the game started from a custom setup.
    pub fn set_position(&mut self, board: Board, played: Option<Vec<String>>) {
        self.stop_search();
        self.board = board;
        self.played = played;
    }

    #[must_use]
    pub fn search_state(&self) -> &Arc<Mutex<SearchState>> {
        &self.search_state
    }

    /// Reset the board and forget everything learned in the previous game.
    pub fn new_game(&mut self) {
        self.stop_search();
        self.board = Board::new();
        self.played = Some(Vec::new());
        self.left_book = false;
        self.search_state.lock().clear();
    }

    pub fn set_book(&mut self, book: Option<Arc<dyn OpeningBook>>) {
        self.book = book;
    }

    #[must_use]
    pub fn time_config(&self) -> &TimeConfig {
        &self.time_config
    }

    pub fn time_config_mut(&mut self) -> &mut TimeConfig {
        &mut self.time_config
    }

    /// Set callback for iteration info reporting.
    pub fn set_info_callback(&mut self, cb: Option<SearchInfoCallback>) {
        self.info_callback = cb;
    }

    /// Resize the transposition table
    pub fn resize_hash(&mut self, mb: usize) {
        self.stop_search();
        self.search_state.lock().reset_tables(mb);
    }

    /// Stop any active search
    pub fn stop_search(&mut self) {
        if let Some(job) = self.current_job.take() {
            job.stop_and_wait();
        }
    }

    /// Signal stop to active search (non-blocking)
    pub fn signal_stop(&mut self) {
        if let Some(job) = &self.current_job {
            job.signal_stop();
        }
    }

    /// Block until the active search finishes on its own.
    pub fn wait_for_search(&mut self) {
        if let Some(job) = self.current_job.take() {
            job.wait();
        }
    }

    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.current_job.is_some()
    }

    /// Book reply for the current game, if the book is enabled, the game
    /// started from the initial position and the engine has not searched yet.
    pub fn book_move(&mut self) -> Option<Move> {
        if self.left_book {
            return None;
        }
        let book = self.book.as_ref()?;
        let played = self.played.as_ref()?;
        let text = book.lookup(played)?;
        match self.board.find_move(&text) {
            Some(mv) => Some(mv),
            None => {
                log::warn!("book move {text} is not legal here");
                None
            }
        }
    }

    /// Start a search on a worker thread.
    ///
    /// `on_complete` runs on that thread with the result. A book move, when
    /// available, completes immediately on the calling thread instead.
    pub fn start_search<F>(&mut self, request: SearchRequest, on_complete: F) -> io::Result<()>
    where
        F: FnOnce(SearchResult) + Send + 'static,
    {
        self.stop_search();

        if let Some(mv) = self.book_move() {
            log::info!("book move {mv}");
            on_complete(SearchResult {
                best_move: Some(mv),
                pv: vec![mv],
                ..SearchResult::default()
            });
            return Ok(());
        }
        self.left_book = true;

        let mut config: SearchConfig =
            request
                .time_control
                .search_config(&self.time_config, request.depth, request.nodes);
        config.info_callback = self.info_callback.clone();

        let stop = Arc::new(AtomicBool::new(false));
        let stop_clone = Arc::clone(&stop);
        let search_state = Arc::clone(&self.search_state);
        let mut search_board = self.board.clone();

        let handle = thread::Builder::new()
            .name("search".to_string())
            .stack_size(SEARCH_STACK_SIZE)
            .spawn(move || {
                let result = {
                    let mut guard = search_state.lock();
                    search(&mut search_board, &mut guard, &config, &stop_clone)
                };
                on_complete(result);
            })?;

        self.current_job = Some(SearchJob { stop, handle });
        Ok(())
    }
}

impl Drop for EngineController {
    fn drop(&mut self) {
        self.stop_search();
    }
}
