//! Slide layout: fills a template with segmented, sized text.
//!
//! Every call is a pure function of the slide and the render mode.

use crate::layout::{split_point, ImageSide, LayoutKind, Template};
use crate::segment::{segment, Segment};
use crate::sizing::{FixedRole, RenderMode, ScaledRole, SizeTable, SizingPolicy};
use crate::types::{Presentation, Slide};
use serde::{Deserialize, Serialize};

/// A sized run of segmented text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub segments: Vec<Segment>,
    pub font_size: u32,
}

impl TextBlock {
    fn new(text: &str, font_size: u32) -> Self {
        Self {
            segments: segment(text),
            font_size,
        }
    }
}

/// Bullets sharing one font size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulletList {
    pub items: Vec<Vec<Segment>>,
    pub font_size: u32,
}

impl BulletList {
    fn new<S: AsRef<str>>(items: &[S], font_size: u32) -> Self {
        Self {
            items: items.iter().map(|item| segment(item.as_ref())).collect(),
            font_size,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// What fills the image column of a media layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ImageSlot {
    Image {
        src: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    /// No image yet; the host shows its fixed placeholder.
    Placeholder,
}

/// Loading state of a slide image, owned by the rendering layer.
///
/// Only toggles opacity and the placeholder spinner; geometry never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageLoadState {
    #[default]
    Pending,
    Loaded,
}

impl ImageLoadState {
    pub fn opacity(self) -> f32 {
        match self {
            ImageLoadState::Pending => 0.0,
            ImageLoadState::Loaded => 1.0,
        }
    }

    pub fn shows_spinner(self) -> bool {
        self == ImageLoadState::Pending
    }
}

/// A template with its slots filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "kebab-case")]
pub enum SlideBody {
    TitleCard {
        title: TextBlock,
        #[serde(skip_serializing_if = "Option::is_none")]
        subtitle: Option<TextBlock>,
    },
    QuoteCard {
        quote: TextBlock,
        attribution: TextBlock,
    },
    #[serde(rename_all = "camelCase")]
    Media {
        image_side: ImageSide,
        header: TextBlock,
        bullets: BulletList,
        image: ImageSlot,
    },
    SplitColumns {
        header: TextBlock,
        left: BulletList,
        right: BulletList,
    },
    SingleColumn {
        header: TextBlock,
        bullets: BulletList,
    },
}

impl SlideBody {
    pub fn template(&self) -> Template {
        match self {
            SlideBody::TitleCard { .. } => Template::TitleCard,
            SlideBody::QuoteCard { .. } => Template::QuoteCard,
            SlideBody::Media { image_side, .. } => Template::Media {
                image_side: *image_side,
            },
            SlideBody::SplitColumns { .. } => Template::SplitColumns,
            SlideBody::SingleColumn { .. } => Template::SingleColumn,
        }
    }
}

/// A rendering-ready slide description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideLayout {
    pub slide_id: String,
    pub kind: LayoutKind,
    pub mode: RenderMode,
    pub body: SlideBody,
}

impl SlideLayout {
    pub fn template(&self) -> Template {
        self.body.template()
    }
}

/// Lays out slides with a sizing policy and a role size table.
#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    policy: SizingPolicy,
    sizes: SizeTable,
}

impl LayoutEngine {
    /// Create an engine with the default policy and size table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the shrink curve constants.
    pub fn with_sizing_policy(mut self, policy: SizingPolicy) -> Self {
        log::debug!("sizing policy: {policy:?}");
        self.policy = policy;
        self
    }

    /// Replace the per-layout role sizes.
    pub fn with_size_table(mut self, sizes: SizeTable) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn policy(&self) -> &SizingPolicy {
        &self.policy
    }

    pub fn sizes(&self) -> &SizeTable {
        &self.sizes
    }

    /// Lay out one slide.
    pub fn layout_slide(&self, slide: &Slide, mode: RenderMode) -> SlideLayout {
        let kind = slide.layout.kind();
        let sizes = &self.sizes;

        let body = match kind {
            LayoutKind::Title => {
                let title = [slide.title.as_str()];
                SlideBody::TitleCard {
                    title: TextBlock::new(
                        &slide.title,
                        self.scaled(&title, &sizes.title_heading, mode),
                    ),
                    subtitle: slide.subtitle.as_deref().map(|subtitle| {
                        TextBlock::new(
                            subtitle,
                            self.scaled(&[subtitle], &sizes.title_subtitle, mode),
                        )
                    }),
                }
            }
            LayoutKind::Quote => {
                // Only the first entry is quoted; the rest never reach layout.
                let lines = &slide.content[..slide.content.len().min(1)];
                let quote = lines.first().map(String::as_str).unwrap_or("");
                SlideBody::QuoteCard {
                    quote: TextBlock::new(quote, self.scaled(lines, &sizes.quote_body, mode)),
                    attribution: self.fixed(&slide.title, &sizes.quote_attribution, mode),
                }
            }
            LayoutKind::ImageLeft | LayoutKind::ImageRight => {
                let image_side = if kind == LayoutKind::ImageLeft {
                    ImageSide::Left
                } else {
                    ImageSide::Right
                };
                let image = if slide.has_image() {
                    ImageSlot::Image {
                        src: slide.image_url.clone().unwrap_or_default(),
                        alt: slide.image_prompt.clone(),
                    }
                } else {
                    ImageSlot::Placeholder
                };
                SlideBody::Media {
                    image_side,
                    header: self.fixed(&slide.title, &sizes.media_header, mode),
                    bullets: BulletList::new(
                        &slide.content,
                        self.scaled(&slide.content, &sizes.media_body, mode),
                    ),
                    image,
                }
            }
            LayoutKind::Split => {
                // Both columns share the size of the combined list.
                let font_size = self.scaled(&slide.content, &sizes.split_body, mode);
                let (left, right) = slide.content.split_at(split_point(slide.content.len()));
                SlideBody::SplitColumns {
                    header: self.fixed(&slide.title, &sizes.split_header, mode),
                    left: BulletList::new(left, font_size),
                    right: BulletList::new(right, font_size),
                }
            }
            LayoutKind::Content => SlideBody::SingleColumn {
                header: self.fixed(&slide.title, &sizes.content_header, mode),
                bullets: BulletList::new(
                    &slide.content,
                    self.scaled(&slide.content, &sizes.content_body, mode),
                ),
            },
        };

        SlideLayout {
            slide_id: slide.id.clone(),
            kind,
            mode,
            body,
        }
    }

    /// Lay out every slide in presentation order.
    pub fn layout_presentation(
        &self,
        presentation: &Presentation,
        mode: RenderMode,
    ) -> Vec<SlideLayout> {
        if let Err(e) = presentation.validate() {
            log::warn!("laying out invalid presentation '{}': {}", presentation.id, e);
        }

        presentation
            .slides
            .iter()
            .map(|slide| self.layout_slide(slide, mode))
            .collect()
    }

    fn scaled<S: AsRef<str>>(&self, content: &[S], role: &ScaledRole, mode: RenderMode) -> u32 {
        let size = role.for_mode(mode);
        self.policy
            .estimate(content, size.base, size.min, mode.is_thumbnail())
    }

    fn fixed(&self, text: &str, role: &FixedRole, mode: RenderMode) -> TextBlock {
        TextBlock::new(text, role.for_mode(mode))
    }
}

/// Lay out one slide with the default engine.
pub fn layout_slide(slide: &Slide, mode: RenderMode) -> SlideLayout {
    LayoutEngine::new().layout_slide(slide, mode)
}
