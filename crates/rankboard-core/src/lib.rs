//! Rankboard Core Library
//!
//! Platform-agnostic data model and algorithms for the Rankboard word
//! ranking board: text reconciliation, drag transfer between the board and
//! the waiting pool, and word-cloud layout.

pub mod board;
pub mod cloud;
pub mod color;
pub mod config;
pub mod drag;
pub mod entity;
pub mod export;
pub mod notice;
pub mod reconcile;

pub use board::Board;
pub use cloud::{ApproximateMeasure, CloudError, CloudLayout, CloudLayoutEngine, PlacedGlyph, TextMeasure, CLOUD_CANVAS};
pub use color::SerializableColor;
pub use config::BoardConfig;
pub use drag::{DragEvent, DragState, DropTarget};
pub use entity::{Entity, EntityId, EntityStore, SequenceKind};
pub use export::{BoardFormat, BoardRasterizer, ClipboardSink, CloudRasterizer, ExportError, ExportResult, MemoryClipboard};
pub use notice::{Notice, NoticeKind};
pub use reconcile::{non_blank_lines, reconcile};
