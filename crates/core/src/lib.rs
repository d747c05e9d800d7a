//! Slide data model, text-math segmentation, heuristic font sizing, and
//! layout dispatch for generated presentations.

pub mod engine;
pub mod error;
pub mod layout;
pub mod normalize;
pub mod outline;
pub mod render;
pub mod segment;
pub mod sizing;
pub mod types;

pub use engine::{
    layout_slide, BulletList, ImageLoadState, ImageSlot, LayoutEngine, SlideBody, SlideLayout,
    TextBlock,
};
pub use error::{Error, Result};
pub use layout::{select_template, ImageSide, LayoutKind, LayoutTag, Template};
pub use normalize::ContentNormalizer;
pub use outline::OutlineFormatter;
pub use render::{MarkupWriter, MathRenderer, TexDelimiters};
pub use segment::{segment, Segment};
pub use sizing::{estimate_font_size, RenderMode, SizeTable, SizingPolicy};
pub use types::{GroundingSource, Palette, Presentation, Slide};
