//! Error types for presentation documents and layout configuration.
//!
//! Segmenting, sizing, and laying out a slide never fail; these errors only
//! come from editing a document or loading a configuration.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by document operations and configuration checks.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A palette role does not hold a hex color.
    #[error("Invalid color for palette role '{role}': {value}")]
    InvalidColor { role: &'static str, value: String },

    /// Two slides in one presentation share an id.
    #[error("Duplicate slide id: {0}")]
    DuplicateSlideId(String),

    /// No slide with the requested id exists.
    #[error("Slide not found: {0}")]
    SlideNotFound(String),

    /// A positional slide operation pointed past the end of the deck.
    #[error("Slide index {index} out of range for {len} slides")]
    SlideIndexOutOfRange { index: usize, len: usize },

    /// A sizing policy table would produce nonsense sizes.
    #[error("Invalid sizing policy: {0}")]
    InvalidSizingPolicy(String),

    /// Strict layout tag parsing met a tag outside the closed set.
    #[error("Unknown layout tag: {0}")]
    UnknownLayout(String),
}
