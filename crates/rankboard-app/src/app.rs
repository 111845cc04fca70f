//! Headless application run: load words, rank them, export.

use clap::Parser;
use kurbo::Size;
use rankboard_core::{
    Board, BoardConfig, ClipboardSink, CloudLayout, CloudRasterizer, DragEvent, DropTarget, ExportError,
    ExportResult, Notice, SequenceKind,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Rank a word list and export it.
#[derive(Parser, Debug, Clone)]
#[command(name = "rankboard", author, version, about, long_about = None)]
pub struct AppConfig {
    /// File with one word per line
    pub words: PathBuf,

    /// Where to write the word-cloud layout as JSON
    pub cloud_out: Option<PathBuf>,

    /// Keep running until another program takes over the clipboard (Linux)
    #[arg(long, default_value_t = false)]
    pub wait_clipboard: bool,

    #[arg(skip)]
    pub board: BoardConfig,
}

/// Writes the cloud layout as JSON for an external rasterizer.
#[derive(Debug)]
pub struct JsonCloudWriter {
    path: PathBuf,
}

impl JsonCloudWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CloudRasterizer for JsonCloudWriter {
    fn rasterize_cloud(&mut self, layout: &CloudLayout, canvas: Size) -> ExportResult<()> {
        let glyphs: Vec<_> = layout
            .glyphs
            .iter()
            .map(|g| {
                serde_json::json!({
                    "text": g.text,
                    "font_size": g.font_size,
                    "x": g.x,
                    "y": g.y,
                    "width": g.width,
                    "height": g.height,
                    "color": g.color.to_hex(),
                })
            })
            .collect();
        let json = serde_json::json!({
            "width": canvas.width,
            "height": canvas.height,
            "glyphs": glyphs,
        });
        let text = serde_json::to_string_pretty(&json).map_err(|e| ExportError::Rasterize(e.to_string()))?;
        std::fs::write(&self.path, text)?;
        log::info!("Wrote word-cloud layout to: {:?}", self.path);
        Ok(())
    }
}

/// Build a board from a word list, ranking words in file order.
pub fn load_board(path: &Path, config: BoardConfig) -> Result<Board, AppError> {
    let text = std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut board = Board::with_config(config);
    board.set_text(text);
    rank_all(&mut board);
    Ok(board)
}

/// Drag every pooled word to the end of the ranking, in pool order.
pub fn rank_all(board: &mut Board) {
    let target = Some(DropTarget::Sequence(SequenceKind::Ranked));
    while let Some(dragged) = board.pooled().first().map(|e| e.id) {
        board.handle_drag(&DragEvent::Start { dragged });
        board.handle_drag(&DragEvent::Over {
            dragged,
            target: DropTarget::Sequence(SequenceKind::Ranked),
            pointer_below: false,
        });
        board.handle_drag(&DragEvent::End { dragged, target });
    }
}

/// Run the exports for a loaded board, returning the notices to show.
pub fn run_exports<C: ClipboardSink + ?Sized>(board: &Board, clipboard: &mut C, cloud_out: Option<&Path>) -> Vec<Notice> {
    let mut notices = vec![board.export_text(clipboard)];
    if let Some(path) = cloud_out {
        notices.push(board.export_cloud(&mut JsonCloudWriter::new(path)));
    }
    notices
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;
    use rankboard_core::{MemoryClipboard, NoticeKind};

    fn parse(args: &[&str]) -> Result<AppConfig, clap::Error> {
        AppConfig::try_parse_from(std::iter::once("rankboard").chain(args.iter().copied()))
    }

    #[test]
    fn test_args() {
        let config = parse(&["words.txt"]).unwrap();
        assert_eq!(config.words, PathBuf::from("words.txt"));
        assert!(config.cloud_out.is_none());
        assert!(!config.wait_clipboard);
        assert_eq!(config.board, BoardConfig::default());

        let config = parse(&["--wait-clipboard", "words.txt", "cloud.json"]).unwrap();
        assert_eq!(config.cloud_out, Some(PathBuf::from("cloud.json")));
        assert!(config.wait_clipboard);

        assert_eq!(parse(&[]).unwrap_err().kind(), ErrorKind::MissingRequiredArgument);
        assert_eq!(parse(&["a", "b", "c"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_flags_are_not_paths() {
        assert_eq!(parse(&["--help"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
        assert_eq!(parse(&["-v", "words.txt"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_definition() {
        AppConfig::command().debug_assert();
    }

    #[test]
    fn test_load_and_export() {
        let dir = tempfile::tempdir().unwrap();
        let words = dir.path().join("words.txt");
        let cloud = dir.path().join("cloud.json");
        std::fs::write(&words, "sushi\n\nramen\nsushi\n").unwrap();

        let board = load_board(&words, BoardConfig::default()).unwrap();
        assert!(board.pooled().is_empty());
        assert_eq!(board.ranked().len(), 3);

        let mut clipboard = MemoryClipboard::new();
        let notices = run_exports(&board, &mut clipboard, Some(&cloud));
        assert!(notices.iter().all(|n| n.kind == NoticeKind::Success));
        assert_eq!(clipboard.contents(), Some("RANKING BOARD\n1. sushi\n2. sushi\n3. ramen"));

        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&cloud).unwrap()).unwrap();
        assert_eq!(json["width"], 1920.0);
        assert_eq!(json["glyphs"][0]["font_size"], 250.0);
        assert_eq!(json["glyphs"][0]["text"], "sushi");
        let color = json["glyphs"][0]["color"].as_str().unwrap();
        assert!(color.starts_with('#') && color.len() == 7, "{color}");
    }

    #[test]
    fn test_missing_file() {
        let result = load_board(Path::new("/nonexistent/words.txt"), BoardConfig::default());
        assert!(matches!(result, Err(AppError::Read { .. })));
    }
}
