//! Engine controller for managing search and game state.
//!
//! Owns the game position, runs searches on a worker thread, and consults
//! the opening book before the first search of a game.

mod book;
mod controller;
pub mod time;

pub use book::{BuiltinBook, OpeningBook};
pub use controller::{EngineController, SearchJob, SearchRequest};
pub use time::{TimeConfig, TimeControl};
