//! Export formats and the backends that produce them.
//!
//! The core only formats data and hands it to a backend. Backends
//! (clipboard, board rasterizer, cloud rasterizer) live outside the core
//! and report failures through [`ExportError`].

use crate::cloud::CloudLayout;
use crate::entity::Entity;
use kurbo::Size;
use thiserror::Error;

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Clipboard error: {0}")]
    Clipboard(String),
    #[error("Rasterization error: {0}")]
    Rasterize(String),
    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::Io(err.to_string())
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Output format for a board snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardFormat {
    Png,
    Pdf,
}

impl BoardFormat {
    /// Default file name for the saved board.
    pub fn file_name(self) -> &'static str {
        match self {
            BoardFormat::Png => "ranking.png",
            BoardFormat::Pdf => "ranking.pdf",
        }
    }

    /// Get display name for this format.
    pub fn name(self) -> &'static str {
        match self {
            BoardFormat::Png => "PNG",
            BoardFormat::Pdf => "PDF",
        }
    }
}

/// Destination for the plain-text ranking.
pub trait ClipboardSink {
    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> ExportResult<()>;
}

/// Renders the ranking board to an image or document.
pub trait BoardRasterizer {
    fn rasterize_board(&mut self, title: &str, ranked: &[Entity], format: BoardFormat) -> ExportResult<()>;
}

/// Renders a laid-out word cloud to an image.
pub trait CloudRasterizer {
    fn rasterize_cloud(&mut self, layout: &CloudLayout, canvas: Size) -> ExportResult<()>;
}

/// Format the ranking as `title` followed by one `"{rank}. {text}"` line per entity.
pub fn format_ranking(title: &str, ranked: &[Entity]) -> String {
    let lines: Vec<String> = ranked
        .iter()
        .enumerate()
        .map(|(index, entity)| format!("{}. {}", index + 1, entity.text))
        .collect();
    format!("{}\n{}", title, lines.join("\n"))
}

/// In-memory clipboard for testing and headless use.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    /// Create an empty clipboard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text written, if any.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ClipboardSink for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> ExportResult<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}
