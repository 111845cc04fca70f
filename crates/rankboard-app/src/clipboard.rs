//! System clipboard backed by arboard.

use rankboard_core::{ClipboardSink, ExportError, ExportResult};

/// The desktop clipboard.
///
/// The arboard handle is opened on first write and kept until this value is
/// dropped. On X11 and Wayland the copied text is served by this process, so
/// without a clipboard manager it only outlives the process when
/// `wait_for_handoff` is set.
#[derive(Default)]
pub struct SystemClipboard {
    clipboard: Option<arboard::Clipboard>,
    wait_for_handoff: bool,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block each write until another program takes over the clipboard.
    /// Only has an effect on Linux.
    pub fn waiting(mut self, wait: bool) -> Self {
        self.wait_for_handoff = wait;
        self
    }

    pub fn is_waiting(&self) -> bool {
        self.wait_for_handoff
    }

    fn handle(&mut self) -> ExportResult<&mut arboard::Clipboard> {
        if self.clipboard.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ExportError::Clipboard(format!("Failed to access clipboard: {}", e)))?;
            self.clipboard = Some(clipboard);
        }
        self.clipboard
            .as_mut()
            .ok_or_else(|| ExportError::Clipboard("Clipboard unavailable".to_string()))
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, text: &str) -> ExportResult<()> {
        let wait = self.wait_for_handoff;
        let clipboard = self.handle()?;

        #[cfg(target_os = "linux")]
        let result = if wait {
            use arboard::SetExtLinux;
            log::info!("Holding clipboard until another program takes it over");
            clipboard.set().wait().text(text.to_string())
        } else {
            clipboard.set_text(text.to_string())
        };
        #[cfg(not(target_os = "linux"))]
        let result = {
            let _ = wait;
            clipboard.set_text(text.to_string())
        };

        result.map_err(|e| ExportError::Clipboard(e.to_string()))?;
        log::debug!("Copied {} bytes to clipboard", text.len());
        Ok(())
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.clipboard.is_some())
            .field("wait_for_handoff", &self.wait_for_handoff)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_opens_lazily() {
        let clipboard = SystemClipboard::new();
        assert!(clipboard.clipboard.is_none());
        assert!(!clipboard.is_waiting());
        assert!(SystemClipboard::new().waiting(true).is_waiting());
    }
}
