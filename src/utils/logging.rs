use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::warn;

use crate::core::message::Speaker;
use crate::core::render::Renderer;

/// Append-only log of every bubble shown on screen.
pub struct LoggingState {
    file_path: Option<String>,
}

impl LoggingState {
    pub fn new(log_file: Option<String>) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(path) = &log_file {
            test_file_access(path)?;
        }
        Ok(LoggingState {
            file_path: log_file,
        })
    }

    pub fn disabled() -> Self {
        LoggingState { file_path: None }
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.file_path.is_some()
    }

    pub fn log_turn(&self, speaker: Speaker, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.log_message(&format!("{}: {}", speaker.display_label(), text))
    }

    pub fn log_message(&self, content: &str) -> Result<(), Box<dyn std::error::Error>> {
        let Some(file_path) = self.file_path.as_ref() else {
            return Ok(());
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        let mut writer = BufWriter::new(file);

        for line in content.lines() {
            writeln!(writer, "{line}")?;
        }
        // Blank line between entries, matching the on-screen spacing
        writeln!(writer)?;

        writer.flush()?;
        Ok(())
    }

    pub fn get_status_string(&self) -> String {
        match &self.file_path {
            None => "disabled".to_string(),
            Some(path) => format!(
                "active ({})",
                Path::new(path)
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
            ),
        }
    }
}

fn test_file_access(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.flush()?;
    Ok(())
}

/// Renderer decorator that mirrors every bubble into the log.
pub struct LoggingRenderer<'a, R> {
    inner: R,
    logging: &'a LoggingState,
}

impl<'a, R: Renderer> LoggingRenderer<'a, R> {
    pub fn new(inner: R, logging: &'a LoggingState) -> Self {
        Self { inner, logging }
    }
}

impl<R: Renderer> Renderer for LoggingRenderer<'_, R> {
    fn render_turn(&mut self, speaker: Speaker, text: &str) {
        self.inner.render_turn(speaker, text);
        if let Err(err) = self.logging.log_turn(speaker, text) {
            warn!(error = %err, "failed to write transcript log");
        }
    }

    fn clear(&mut self) {
        self.inner.clear();
        if let Err(err) = self.logging.log_message("## Conversation loaded") {
            warn!(error = %err, "failed to write transcript log");
        }
    }
}
