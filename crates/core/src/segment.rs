//! Text-math segmentation.
//!
//! Splits a text field into plain runs and `$...$` / `$$...$$` math runs so
//! the host can hand each math run to a typesetter. Segmentation is total:
//! unmatched dollar signs stay in the surrounding plain text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Shortest `$$...$$` span, else shortest `$...$` span. Spans may cross lines.
static MATH_SPAN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\$\$.*?\$\$|\$.*?\$").unwrap());

const BLOCK_DELIMITER: &str = "$$";
const INLINE_DELIMITER: &str = "$";

/// One classified run of a text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Segment {
    /// Literal text, rendered as-is.
    Text(String),
    /// Math typeset inline with the surrounding text.
    InlineMath(String),
    /// Display math on its own line.
    BlockMath(String),
}

impl Segment {
    /// The text or math expression without delimiters.
    pub fn payload(&self) -> &str {
        match self {
            Segment::Text(s) | Segment::InlineMath(s) | Segment::BlockMath(s) => s,
        }
    }

    pub fn is_math(&self) -> bool {
        !matches!(self, Segment::Text(_))
    }

    /// Block math may be wider than the slide; the host should put it in a
    /// horizontally scrollable container.
    pub fn needs_scroll_container(&self) -> bool {
        matches!(self, Segment::BlockMath(_))
    }

    /// Write the segment back out with its delimiters restored.
    pub fn to_source(&self) -> String {
        match self {
            Segment::Text(s) => s.clone(),
            Segment::InlineMath(s) => format!("{INLINE_DELIMITER}{s}{INLINE_DELIMITER}"),
            Segment::BlockMath(s) => format!("{BLOCK_DELIMITER}{s}{BLOCK_DELIMITER}"),
        }
    }
}

/// Partition `text` into an ordered sequence of segments.
///
/// A field whose trimmed form is wrapped in `$$` on both ends becomes a
/// single block segment. Otherwise math spans are matched left to right,
/// shortest first, with the text between them kept as plain segments.
pub fn segment(text: &str) -> Vec<Segment> {
    let trimmed = text.trim();
    if let Some(expr) = whole_block(trimmed) {
        return vec![Segment::BlockMath(expr.to_string())];
    }

    let mut segments = Vec::new();
    let mut cursor = 0;

    for span in MATH_SPAN_REGEX.find_iter(text) {
        if span.start() > cursor {
            segments.push(Segment::Text(text[cursor..span.start()].to_string()));
        }
        segments.push(classify(span.as_str()));
        cursor = span.end();
    }

    if cursor < text.len() {
        segments.push(Segment::Text(text[cursor..].to_string()));
    }

    segments
}

/// Restore the source text of a segment sequence.
pub fn join_source(segments: &[Segment]) -> String {
    segments.iter().map(Segment::to_source).collect()
}

fn whole_block(trimmed: &str) -> Option<&str> {
    // Four bytes minimum so the opening and closing `$$` never overlap.
    if trimmed.len() >= 2 * BLOCK_DELIMITER.len()
        && trimmed.starts_with(BLOCK_DELIMITER)
        && trimmed.ends_with(BLOCK_DELIMITER)
    {
        Some(&trimmed[BLOCK_DELIMITER.len()..trimmed.len() - BLOCK_DELIMITER.len()])
    } else {
        None
    }
}

fn classify(span: &str) -> Segment {
    match whole_block(span) {
        Some(expr) => Segment::BlockMath(expr.to_string()),
        None => {
            let end = span.len() - INLINE_DELIMITER.len();
            Segment::InlineMath(span[INLINE_DELIMITER.len()..end].to_string())
        }
    }
}
