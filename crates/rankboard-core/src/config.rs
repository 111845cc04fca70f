//! Board configuration defaults.

use crate::cloud::CLOUD_CANVAS;
use crate::color::{SerializableColor, default_palette};
use kurbo::Size;
use serde::{Deserialize, Serialize};

/// Initial board title.
pub const DEFAULT_BOARD_TITLE: &str = "RANKING BOARD";

/// Minimum number of rank slots shown on the board.
pub const MIN_SLOTS: usize = 5;

/// In-memory settings for a board session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Initial board title.
    pub title: String,
    /// Minimum number of rank slots, filled or not.
    pub min_slots: usize,
    /// Word-cloud export canvas.
    pub cloud_size: Size,
    /// Colors word-cloud glyphs are drawn from.
    pub palette: Vec<SerializableColor>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_BOARD_TITLE.to_string(),
            min_slots: MIN_SLOTS,
            cloud_size: CLOUD_CANVAS,
            palette: default_palette(),
        }
    }
}
