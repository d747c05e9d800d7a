//! Layout variants and structural template dispatch.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of slide layout variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutKind {
    Title,
    #[default]
    Content,
    Split,
    Quote,
    ImageLeft,
    ImageRight,
}

impl LayoutKind {
    pub const ALL: [LayoutKind; 6] = [
        LayoutKind::Title,
        LayoutKind::Content,
        LayoutKind::Split,
        LayoutKind::Quote,
        LayoutKind::ImageLeft,
        LayoutKind::ImageRight,
    ];

    /// The tag as written in documents.
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutKind::Title => "title",
            LayoutKind::Content => "content",
            LayoutKind::Split => "split",
            LayoutKind::Quote => "quote",
            LayoutKind::ImageLeft => "image-left",
            LayoutKind::ImageRight => "image-right",
        }
    }

    /// The structural arrangement for this variant.
    pub fn template(self) -> Template {
        match self {
            LayoutKind::Title => Template::TitleCard,
            LayoutKind::Quote => Template::QuoteCard,
            LayoutKind::ImageLeft => Template::Media {
                image_side: ImageSide::Left,
            },
            LayoutKind::ImageRight => Template::Media {
                image_side: ImageSide::Right,
            },
            LayoutKind::Split => Template::SplitColumns,
            LayoutKind::Content => Template::SingleColumn,
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutKind {
    type Err = Error;

    /// Strict parse; use [`LayoutTag::parse`] for the lenient form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownLayout(s.to_string()))
    }
}

/// A layout tag as found in a document.
///
/// Tags outside the closed set are kept verbatim so documents round-trip,
/// and lay out as [`LayoutKind::Content`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LayoutTag {
    Known(LayoutKind),
    Unknown(String),
}

impl LayoutTag {
    pub fn parse(tag: &str) -> Self {
        match tag.parse() {
            Ok(kind) => LayoutTag::Known(kind),
            Err(_) => LayoutTag::Unknown(tag.to_string()),
        }
    }

    /// The variant to lay out with.
    pub fn kind(&self) -> LayoutKind {
        match self {
            LayoutTag::Known(kind) => *kind,
            LayoutTag::Unknown(tag) => {
                log::debug!("unknown layout tag '{tag}', using content");
                LayoutKind::Content
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            LayoutTag::Known(kind) => kind.as_str(),
            LayoutTag::Unknown(tag) => tag,
        }
    }
}

impl Default for LayoutTag {
    fn default() -> Self {
        LayoutTag::Known(LayoutKind::default())
    }
}

impl From<LayoutKind> for LayoutTag {
    fn from(kind: LayoutKind) -> Self {
        LayoutTag::Known(kind)
    }
}

impl From<&str> for LayoutTag {
    fn from(tag: &str) -> Self {
        LayoutTag::parse(tag)
    }
}

impl From<String> for LayoutTag {
    fn from(tag: String) -> Self {
        match tag.parse() {
            Ok(kind) => LayoutTag::Known(kind),
            Err(_) => LayoutTag::Unknown(tag),
        }
    }
}

impl From<LayoutTag> for String {
    fn from(tag: LayoutTag) -> Self {
        match tag {
            LayoutTag::Known(kind) => kind.as_str().to_string(),
            LayoutTag::Unknown(tag) => tag,
        }
    }
}

/// Which column holds the image in a media layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageSide {
    Left,
    Right,
}

/// Structural arrangement of a slide, before any content is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "kebab-case")]
pub enum Template {
    /// Centered single column over a full-bleed background.
    TitleCard,
    /// Centered single column with a decorative quote mark.
    QuoteCard,
    /// Two equal columns, image on one side and bullets on the other.
    Media {
        #[serde(rename = "imageSide")]
        image_side: ImageSide,
    },
    /// Full-width header over two equal bullet columns.
    SplitColumns,
    /// Full-width header over one bullet column.
    SingleColumn,
}

/// Map a layout tag to its structural arrangement.
///
/// Unrecognized tags get the single-column content arrangement.
pub fn select_template(tag: &str) -> Template {
    LayoutTag::parse(tag).kind().template()
}

/// Split point for two columns: the left column takes the extra item.
pub fn split_point(len: usize) -> usize {
    len.div_ceil(2)
}
