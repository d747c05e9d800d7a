//! Plain-text outline output.
//!
//! Writes a deck as text: the deck title, then one block per slide
//! separated by a blank line.

use crate::types::{Presentation, Slide};

/// Formatter for plain-text deck outlines.
#[derive(Debug, Clone)]
pub struct OutlineFormatter {
    /// Whether to include speaker notes.
    include_notes: bool,
    /// Prefix written before each bullet.
    bullet: String,
}

impl Default for OutlineFormatter {
    fn default() -> Self {
        Self {
            include_notes: false,
            bullet: "-".to_string(),
        }
    }
}

impl OutlineFormatter {
    /// Create a formatter without notes and with `-` bullets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether speaker notes are written under each slide.
    pub fn with_notes(mut self, include: bool) -> Self {
        self.include_notes = include;
        self
    }

    /// Set the bullet prefix.
    pub fn with_bullet(mut self, bullet: impl Into<String>) -> Self {
        self.bullet = bullet.into();
        self
    }

    /// Format a whole presentation.
    ///
    /// # Example output
    /// ```text
    /// Rust in Production
    ///
    /// 1. Why Rust
    ///    - Memory safety
    ///    - Speed
    ///
    /// 2. Questions?
    /// ```
    pub fn format(&self, presentation: &Presentation) -> String {
        let mut blocks = vec![presentation.title.trim().to_string()];
        blocks.extend(
            presentation
                .slides
                .iter()
                .enumerate()
                .map(|(idx, slide)| self.format_slide(idx + 1, slide)),
        );

        blocks
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Format and add a trailing newline.
    pub fn format_with_newline(&self, presentation: &Presentation) -> String {
        let formatted = self.format(presentation);
        if formatted.is_empty() {
            formatted
        } else {
            format!("{}\n", formatted)
        }
    }

    /// Format one slide with its 1-based number.
    pub fn format_slide(&self, number: usize, slide: &Slide) -> String {
        let mut lines = vec![format!("{}. {}", number, slide.title.trim())];

        if let Some(subtitle) = slide.subtitle.as_deref().map(str::trim) {
            if !subtitle.is_empty() {
                lines.push(format!("   {}", subtitle));
            }
        }

        lines.extend(
            slide
                .content
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(|item| format!("   {} {}", self.bullet, item)),
        );

        if self.include_notes {
            if let Some(notes) = slide.notes.as_deref() {
                lines.extend(
                    notes
                        .lines()
                        .map(str::trim)
                        .filter(|l| !l.is_empty())
                        .map(|l| format!("   > {}", l)),
                );
            }
        }

        lines.join("\n")
    }
}
