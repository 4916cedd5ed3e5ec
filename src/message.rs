use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// The full text of a commit message file.
///
/// Line 0 is the subject line. The original bytes are kept alongside a
/// lossy UTF-8 view used for parsing, so a body in another encoding is
/// still parsed and written back unchanged. Rewriting the subject keeps
/// every other byte of the file untouched, including `\r\n` terminators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    raw: Vec<u8>,
    text: String,
}

impl MessageDraft {
    pub fn new(raw: impl Into<String>) -> Self {
        let text = raw.into();
        Self {
            raw: text.clone().into_bytes(),
            text,
        }
    }

    /// Wrap raw file content; invalid UTF-8 is replaced in the text view only.
    pub fn from_bytes(raw: Vec<u8>) -> Self {
        let text = String::from_utf8_lossy(&raw).into_owned();
        Self { raw, text }
    }

    /// Read a message file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn read(path: &Path) -> Result<Self> {
        let raw = fs::read(path)
            .with_context(|| format!("failed to read commit message: {}", path.display()))?;
        Ok(Self::from_bytes(raw))
    }

    /// Write the message back to `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.raw)
            .with_context(|| format!("failed to write commit message: {}", path.display()))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    /// Byte length of the subject line in `raw`, without its terminator.
    fn subject_end(&self) -> usize {
        let end = self
            .raw
            .iter()
            .position(|&b| b == b'\n')
            .unwrap_or(self.raw.len());
        if self.raw[..end].ends_with(b"\r") {
            end - 1
        } else {
            end
        }
    }

    /// The first line, untrimmed, as decoded text.
    pub fn subject(&self) -> &str {
        let end = self.text.find('\n').unwrap_or(self.text.len());
        let line = &self.text[..end];
        line.strip_suffix('\r').unwrap_or(line)
    }

    /// Replace line 0 with `line`, keeping the rest of the file verbatim.
    pub fn replace_subject(&mut self, line: &str) {
        let end = self.subject_end();
        self.raw.splice(..end, line.bytes());
        self.text = String::from_utf8_lossy(&self.raw).into_owned();
    }

    /// The first line that, trimmed, is non-empty and not a `#` comment.
    pub fn first_meaningful_line(&self) -> Option<&str> {
        self.text
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty() && !l.starts_with('#'))
    }
}
