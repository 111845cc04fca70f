//! Board session: text buffer, entity store, drag gesture and exports.

use crate::cloud::{ApproximateMeasure, CloudError, CloudLayoutEngine, TextMeasure};
use crate::config::BoardConfig;
use crate::drag::{DragEvent, DragState};
use crate::entity::{Entity, EntityStore};
use crate::export::{BoardFormat, BoardRasterizer, ClipboardSink, CloudRasterizer, format_ranking};
use crate::notice::Notice;
use crate::reconcile::{non_blank_lines, reconcile};
use rand::Rng;
use serde::Serialize;

/// Number of top ranks that get a highlight.
const HIGHLIGHTED_RANKS: usize = 10;

/// Highlight opacity of the first rank.
const MAX_HIGHLIGHT: f64 = 0.6;

/// Serializable view of the board contents.
#[derive(Debug, Serialize)]
struct BoardSnapshot<'a> {
    title: &'a str,
    ranked: &'a [Entity],
    pooled: &'a [Entity],
}

/// A ranking session.
#[derive(Debug, Clone)]
pub struct Board {
    /// Editable board title.
    pub title: String,
    text: String,
    store: EntityStore,
    drag: DragState,
    config: BoardConfig,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with default settings.
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    /// Create an empty board.
    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            title: config.title.clone(),
            text: String::new(),
            store: EntityStore::new(),
            drag: DragState::Idle,
            config,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The raw text buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn ranked(&self) -> &[Entity] {
        &self.store.ranked
    }

    pub fn pooled(&self) -> &[Entity] {
        &self.store.pooled
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// The entity under the pointer during a drag, for the drag preview.
    pub fn active_entity(&self) -> Option<&Entity> {
        self.drag.active().and_then(|id| self.store.get(id))
    }

    /// Replace the text buffer and bring the entities in line with it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        let lines = non_blank_lines(&self.text);
        let previous = std::mem::take(&mut self.store);
        self.store = reconcile(&lines, previous);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Feed one drag lifecycle event.
    pub fn handle_drag(&mut self, event: &DragEvent) {
        let store = std::mem::take(&mut self.store);
        let (drag, store) = self.drag.apply(store, event);
        self.drag = drag;
        self.store = store;
    }

    /// Shuffle the waiting pool.
    pub fn shuffle_pool(&mut self) {
        self.shuffle_pool_with(&mut rand::thread_rng());
    }

    /// Shuffle the waiting pool with the given random source.
    pub fn shuffle_pool_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.store.shuffle_pooled(rng);
    }

    /// Number of non-blank lines in the buffer.
    pub fn word_count(&self) -> usize {
        non_blank_lines(&self.text).len()
    }

    /// Number of rank slots shown, filled or not.
    pub fn slot_count(&self) -> usize {
        self.config.min_slots.max(self.word_count())
    }

    /// 1-based rank numbers of the empty slots after the ranked entities.
    pub fn empty_slots(&self) -> std::ops::RangeInclusive<usize> {
        let filled = self.store.ranked.len();
        // An empty range when every slot is filled.
        (filled + 1)..=self.slot_count().max(filled)
    }

    /// Highlight opacity for the 0-based rank index.
    pub fn rank_highlight(index: usize) -> f64 {
        if index < HIGHLIGHTED_RANKS {
            (HIGHLIGHTED_RANKS - index) as f64 / HIGHLIGHTED_RANKS as f64 * MAX_HIGHLIGHT
        } else {
            0.0
        }
    }

    /// The ranking as plain text.
    pub fn ranking_text(&self) -> String {
        format_ranking(&self.title, &self.store.ranked)
    }

    /// Copy the ranking text to the clipboard.
    pub fn export_text<C: ClipboardSink + ?Sized>(&self, clipboard: &mut C) -> Notice {
        match clipboard.write_text(&self.ranking_text()) {
            Ok(()) => {
                log::info!("Copied ranking ({} entries) to clipboard", self.store.ranked.len());
                Notice::success("Ranking copied to clipboard")
            }
            Err(e) => {
                log::error!("Failed to copy ranking: {}", e);
                Notice::error("Export failed")
            }
        }
    }

    /// Save the board as an image or document.
    pub fn export_board<B: BoardRasterizer + ?Sized>(&self, backend: &mut B, format: BoardFormat) -> Notice {
        match backend.rasterize_board(&self.title, &self.store.ranked, format) {
            Ok(()) => {
                log::info!("Exported ranking as {}", format.name());
                Notice::success(format!("Ranking saved as {}", format.name()))
            }
            Err(e) => {
                log::error!("Failed to export ranking as {}: {}", format.name(), e);
                Notice::error("Export failed")
            }
        }
    }

    /// Lay out the ranking as a word cloud and hand it to the rasterizer.
    pub fn export_cloud<C: CloudRasterizer + ?Sized>(&self, backend: &mut C) -> Notice {
        let engine = CloudLayoutEngine::new(ApproximateMeasure::default(), self.config.palette.clone());
        self.export_cloud_with(backend, &engine, &mut rand::thread_rng())
    }

    /// Word-cloud export with explicit measurement and random source.
    pub fn export_cloud_with<C, M, R>(&self, backend: &mut C, engine: &CloudLayoutEngine<M>, rng: &mut R) -> Notice
    where
        C: CloudRasterizer + ?Sized,
        M: TextMeasure,
        R: Rng + ?Sized,
    {
        let canvas = self.config.cloud_size;
        let layout = match engine.layout_with(&self.store.ranked, canvas, rng) {
            Ok(layout) => layout,
            Err(CloudError::Empty) => {
                log::info!("Word cloud export skipped: no ranked words");
                return Notice::info("Add words to the ranking first");
            }
        };
        match backend.rasterize_cloud(&layout, canvas) {
            Ok(()) => {
                log::info!("Exported word cloud with {} words", layout.glyphs.len());
                Notice::success("Word cloud saved")
            }
            Err(e) => {
                log::error!("Failed to export word cloud: {}", e);
                Notice::error("Export failed")
            }
        }
    }

    /// Serialize the board contents to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&BoardSnapshot {
            title: &self.title,
            ranked: &self.store.ranked,
            pooled: &self.store.pooled,
        })
    }
}
