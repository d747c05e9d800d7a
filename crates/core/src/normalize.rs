//! Edit normalization for slide text.
//!
//! Turns free-form text typed into an editor into the shape the layout
//! engine expects: one bullet per line, no blank bullets, NFC text.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Regex to collapse runs of whitespace into one space.
static WHITESPACE_COLLAPSE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Leading list markers pasted in from other tools: `-`, `*`, `•`, `1.`, `1)`.
static LIST_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*•▪‣◦]|\d+[.)])(?:\s+|$)").unwrap());

/// Normalizer for edited slide text.
#[derive(Debug, Clone, Default)]
pub struct ContentNormalizer {
    /// Whether to drop leading list markers from each bullet.
    strip_markers: bool,
}

impl ContentNormalizer {
    /// Create a normalizer that keeps list markers as typed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to strip leading list markers.
    pub fn with_strip_markers(mut self, strip: bool) -> Self {
        self.strip_markers = strip;
        self
    }

    /// Split an edited text area into bullets.
    ///
    /// - Normalizes line endings and composes to NFC
    /// - Trims each line and drops blank ones
    /// - Strips list markers if configured
    pub fn bullets_from_text(&self, text: &str) -> Vec<String> {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let composed: String = text.nfc().collect();

        composed
            .lines()
            .map(|line| self.clean_bullet(line))
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Normalize a single-line field such as a title or subtitle.
    ///
    /// Internal whitespace runs, newlines included, collapse to one space.
    pub fn normalize_title(&self, text: &str) -> String {
        let composed: String = text.nfc().collect();
        WHITESPACE_COLLAPSE_REGEX
            .replace_all(composed.trim(), " ")
            .into_owned()
    }

    /// Join bullets back into editor text, one per line.
    pub fn text_from_bullets<S: AsRef<str>>(&self, bullets: &[S]) -> String {
        bullets
            .iter()
            .map(|bullet| bullet.as_ref())
            .collect::<Vec<&str>>()
            .join("\n")
    }

    fn clean_bullet(&self, line: &str) -> String {
        let line = line.trim();
        if self.strip_markers {
            LIST_MARKER_REGEX.replace(line, "").trim().to_string()
        } else {
            line.to_string()
        }
    }
}
