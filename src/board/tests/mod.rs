//! Board and search tests, grouped by concern.

mod draw;
mod perft;
mod proptest;
