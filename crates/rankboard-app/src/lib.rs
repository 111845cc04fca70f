//! Rankboard Application
//!
//! Native shell that loads a word list into a board, ranks it and runs the
//! exports through system backends.

mod app;

#[cfg(feature = "native")]
mod clipboard;

pub use app::{AppConfig, AppError, JsonCloudWriter, load_board, rank_all, run_exports};

#[cfg(feature = "native")]
pub use clipboard::SystemClipboard;
