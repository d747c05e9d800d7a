//! Domain types for presentation documents.

use crate::error::{Error, Result};
use crate::layout::LayoutTag;
use crate::normalize::ContentNormalizer;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

/// `#rgb` or `#rrggbb`.
static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap());

/// An entire presentation document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    /// Opaque document id.
    pub id: String,

    /// Deck title.
    pub title: String,

    /// Slides in presentation order.
    #[serde(default)]
    pub slides: Vec<Slide>,

    /// Visual style tag chosen at generation time (e.g. "minimal").
    #[serde(default)]
    pub style: String,

    /// Five-role color palette.
    #[serde(default)]
    pub palette: Palette,

    /// Provenance of generated content. Carried, never read by layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<GroundingSource>>,
}

impl Presentation {
    /// Create an empty presentation.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            slides: Vec::new(),
            style: String::new(),
            palette: Palette::default(),
            sources: None,
        }
    }

    /// Set the style tag.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    /// Set the color palette.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Append a slide at the end of the deck.
    pub fn add_slide(&mut self, slide: Slide) -> Result<()> {
        self.ensure_unique_id(&slide.id)?;
        self.slides.push(slide);
        Ok(())
    }

    /// Insert a slide before position `index` (`index == len` appends).
    pub fn insert_slide(&mut self, index: usize, slide: Slide) -> Result<()> {
        if index > self.slides.len() {
            return Err(Error::SlideIndexOutOfRange {
                index,
                len: self.slides.len(),
            });
        }
        self.ensure_unique_id(&slide.id)?;
        self.slides.insert(index, slide);
        Ok(())
    }

    /// Remove the slide with the given id, returning it.
    pub fn remove_slide(&mut self, id: &str) -> Result<Slide> {
        let index = self.position(id)?;
        Ok(self.slides.remove(index))
    }

    /// Move the slide at `from` so that it ends up at `to`.
    pub fn move_slide(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.slides.len();
        for index in [from, to] {
            if index >= len {
                return Err(Error::SlideIndexOutOfRange { index, len });
            }
        }
        let slide = self.slides.remove(from);
        self.slides.insert(to, slide);
        Ok(())
    }

    /// Look up a slide by id.
    pub fn slide(&self, id: &str) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }

    /// Look up a slide by id for editing.
    pub fn slide_mut(&mut self, id: &str) -> Option<&mut Slide> {
        self.slides.iter_mut().find(|s| s.id == id)
    }

    /// Check document-level invariants: unique slide ids and a valid palette.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for slide in &self.slides {
            if !seen.insert(slide.id.as_str()) {
                return Err(Error::DuplicateSlideId(slide.id.clone()));
            }
        }
        self.palette.validate()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.slides
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| Error::SlideNotFound(id.to_string()))
    }

    fn ensure_unique_id(&self, id: &str) -> Result<()> {
        if self.slide(id).is_some() {
            return Err(Error::DuplicateSlideId(id.to_string()));
        }
        Ok(())
    }
}

/// A single slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Opaque slide id.
    pub id: String,

    /// Slide title. Doubles as the attribution on quote slides.
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Bullets in display order.
    #[serde(default)]
    pub content: Vec<String>,

    /// Layout variant. Unknown tags are kept verbatim and laid out as content.
    #[serde(default)]
    pub layout: LayoutTag,

    /// Speaker notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Image reference (URL or data URI).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Prompt the image was (or will be) generated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
}

impl Slide {
    /// Create a content slide with a title and no bullets.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            content: Vec::new(),
            layout: LayoutTag::default(),
            notes: None,
            image_url: None,
            image_prompt: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_content<I, S>(mut self, content: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.content = content.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_layout(mut self, layout: impl Into<LayoutTag>) -> Self {
        self.layout = layout.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn with_image_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.image_prompt = Some(prompt.into());
        self
    }

    /// Replace the bullets with the lines of an edited text area.
    ///
    /// Blank lines are dropped, so no bullet is ever empty afterwards.
    pub fn set_content_from_text(&mut self, normalizer: &ContentNormalizer, text: &str) {
        self.content = normalizer.bullets_from_text(text);
    }

    /// Whether an image reference is present and non-blank.
    pub fn has_image(&self) -> bool {
        self.image_url
            .as_deref()
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Five named color roles, as CSS hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: String,
    pub text: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1f2937".to_string(),
            primary: "#2563eb".to_string(),
            secondary: "#64748b".to_string(),
            accent: "#f59e0b".to_string(),
        }
    }
}

impl Palette {
    /// Roles paired with their values, in a fixed order.
    pub fn roles(&self) -> [(&'static str, &str); 5] {
        [
            ("background", self.background.as_str()),
            ("text", self.text.as_str()),
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
        ]
    }

    /// Check every role holds a `#rgb` or `#rrggbb` color.
    pub fn validate(&self) -> Result<()> {
        for (role, value) in self.roles() {
            if !HEX_COLOR_REGEX.is_match(value) {
                return Err(Error::InvalidColor {
                    role,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A web source the generator cited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}
