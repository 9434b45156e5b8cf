// Pedantic lint configuration for the crate.
// - cast_possible_wrap / cast_sign_loss: sizes and row ids cross the SQLite i64 boundary
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Panics are confined to tests
// - module_name_repetitions: `ScanStats` in `scanner` reads better than `Stats`
#![allow(
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod scanner;
pub mod sink;
