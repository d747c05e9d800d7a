//! Heuristic font sizing.
//!
//! Estimates a pixel size for a text block from its character count and
//! line count alone. No glyph metrics are measured, so unusual glyph widths
//! can over- or under-fit; the estimate is cheap and deterministic instead.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// The constants driving the shrink curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizingPolicy {
    /// Complexity at or below which text renders at its base size.
    pub easy_threshold: f64,

    /// Complexity at which the shrink reaches `max_shrink`.
    pub hard_limit: f64,

    /// Fraction of the base size removed at the hard limit.
    pub max_shrink: f64,

    /// Extra characters charged for each line.
    pub line_weight: f64,

    /// Fixed fraction of the base size used in thumbnail mode.
    pub thumbnail_ratio: f64,
}

impl Default for SizingPolicy {
    fn default() -> Self {
        Self {
            easy_threshold: 300.0,
            hard_limit: 1200.0,
            max_shrink: 0.6,
            line_weight: 40.0,
            thumbnail_ratio: 0.4,
        }
    }
}

impl SizingPolicy {
    /// Reject tables that would divide by zero or grow text.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("easyThreshold", self.easy_threshold),
            ("hardLimit", self.hard_limit),
            ("maxShrink", self.max_shrink),
            ("lineWeight", self.line_weight),
            ("thumbnailRatio", self.thumbnail_ratio),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidSizingPolicy(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        if self.hard_limit <= self.easy_threshold {
            return Err(Error::InvalidSizingPolicy(format!(
                "hardLimit ({}) must exceed easyThreshold ({})",
                self.hard_limit, self.easy_threshold
            )));
        }
        if self.thumbnail_ratio == 0.0 || self.thumbnail_ratio > 1.0 {
            return Err(Error::InvalidSizingPolicy(format!(
                "thumbnailRatio must be in (0, 1], got {}",
                self.thumbnail_ratio
            )));
        }
        Ok(())
    }

    /// Characters plus `line_weight` per line.
    pub fn complexity<S: AsRef<str>>(&self, content: &[S]) -> f64 {
        let text_length: usize = content.iter().map(|s| s.as_ref().chars().count()).sum();
        text_length as f64 + content.len() as f64 * self.line_weight
    }

    /// Estimate the pixel size for a block.
    ///
    /// Thumbnails take a fixed fraction of `base_size`. Full-size blocks keep
    /// `base_size` up to the easy threshold, then shrink linearly toward
    /// `1 - max_shrink` at the hard limit, never below `min_size / base_size`.
    /// The result is truncated, not rounded.
    pub fn estimate<S: AsRef<str>>(
        &self,
        content: &[S],
        base_size: u32,
        min_size: u32,
        thumbnail: bool,
    ) -> u32 {
        let base = f64::from(base_size);

        if thumbnail {
            return to_pixels(base * self.thumbnail_ratio);
        }

        let complexity = self.complexity(content);
        if complexity <= self.easy_threshold || base_size == 0 {
            return base_size;
        }

        let progress = (complexity - self.easy_threshold) / (self.hard_limit - self.easy_threshold);
        let floor_ratio = f64::from(min_size) / base;
        let scale = 1.0 - progress * self.max_shrink;
        if scale <= floor_ratio {
            return min_size;
        }

        log::trace!(
            "complexity {complexity} over {} lines: scale {scale:.3} of {base_size}px",
            content.len()
        );

        to_pixels(base * scale)
    }
}

/// Estimate a size with the default policy.
pub fn estimate_font_size<S: AsRef<str>>(
    content: &[S],
    base_size: u32,
    min_size: u32,
    thumbnail: bool,
) -> u32 {
    SizingPolicy::default().estimate(content, base_size, min_size, thumbnail)
}

fn to_pixels(size: f64) -> u32 {
    // Float-to-int `as` saturates, so negative sizes land on zero.
    size.floor() as u32
}

/// Render mode of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Full-size slide in the editor, presenter, or export.
    #[default]
    Full,
    /// Small preview in the slide rail.
    Thumbnail,
}

impl RenderMode {
    pub fn is_thumbnail(self) -> bool {
        self == RenderMode::Thumbnail
    }
}

/// Base and minimum size for a complexity-scaled role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSize {
    pub base: u32,
    pub min: u32,
}

impl RoleSize {
    pub const fn new(base: u32, min: u32) -> Self {
        Self { base, min }
    }
}

/// A complexity-scaled role, sized per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaledRole {
    pub full: RoleSize,
    pub thumbnail: RoleSize,
}

impl ScaledRole {
    pub const fn new(full: RoleSize, thumbnail: RoleSize) -> Self {
        Self { full, thumbnail }
    }

    pub fn for_mode(&self, mode: RenderMode) -> RoleSize {
        match mode {
            RenderMode::Full => self.full,
            RenderMode::Thumbnail => self.thumbnail,
        }
    }
}

/// A role whose size only switches between modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedRole {
    pub full: u32,
    pub thumbnail: u32,
}

impl FixedRole {
    pub const fn new(full: u32, thumbnail: u32) -> Self {
        Self { full, thumbnail }
    }

    pub fn for_mode(&self, mode: RenderMode) -> u32 {
        match mode {
            RenderMode::Full => self.full,
            RenderMode::Thumbnail => self.thumbnail,
        }
    }
}

/// Per-layout role sizes in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeTable {
    pub title_heading: ScaledRole,
    pub title_subtitle: ScaledRole,
    pub quote_body: ScaledRole,
    pub quote_attribution: FixedRole,
    pub media_header: FixedRole,
    pub media_body: ScaledRole,
    pub split_header: FixedRole,
    pub split_body: ScaledRole,
    pub content_header: FixedRole,
    pub content_body: ScaledRole,
}

impl Default for SizeTable {
    fn default() -> Self {
        Self {
            title_heading: ScaledRole::new(RoleSize::new(64, 32), RoleSize::new(24, 12)),
            title_subtitle: ScaledRole::new(RoleSize::new(28, 16), RoleSize::new(12, 8)),
            quote_body: ScaledRole::new(RoleSize::new(40, 20), RoleSize::new(14, 10)),
            quote_attribution: FixedRole::new(20, 10),
            media_header: FixedRole::new(44, 16),
            media_body: ScaledRole::new(RoleSize::new(20, 12), RoleSize::new(10, 8)),
            split_header: FixedRole::new(44, 16),
            split_body: ScaledRole::new(RoleSize::new(18, 12), RoleSize::new(9, 7)),
            content_header: FixedRole::new(44, 16),
            content_body: ScaledRole::new(RoleSize::new(26, 14), RoleSize::new(11, 9)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_thumbnail_is_fixed_fraction() {
        assert_eq!(estimate_font_size(&NONE, 64, 32, true), 25);
        let long = ["x".repeat(5000)];
        assert_eq!(estimate_font_size(&long, 64, 32, true), 25);
    }

    #[test]
    fn test_short_content_unscaled() {
        assert_eq!(estimate_font_size(&["short"], 64, 32, false), 64);
        assert_eq!(estimate_font_size(&NONE, 26, 14, false), 26);
    }

    #[test]
    fn test_complexity() {
        let policy = SizingPolicy::default();
        assert_eq!(policy.complexity(&["abc", "de"]), 85.0);
        assert_eq!(policy.complexity(&NONE), 0.0);
        // Characters, not bytes.
        assert_eq!(policy.complexity(&["é✓"]), 42.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // 260 chars + 40 = 300
        let content = ["a".repeat(260)];
        assert_eq!(estimate_font_size(&content, 26, 14, false), 26);

        // 261 chars + 40 = 301: scale = 1 - (1/900)*0.6, 26 * 0.99933 = 25.98
        let content = ["a".repeat(261)];
        assert_eq!(estimate_font_size(&content, 26, 14, false), 25);
    }

    #[test]
    fn test_linear_midpoint() {
        // complexity 750: scale = 1 - 0.5 * 0.6 = 0.7; 20 * 0.7 = 14
        let content = ["a".repeat(710)];
        assert_eq!(estimate_font_size(&content, 20, 1, false), 14);
    }

    #[test]
    fn test_hard_limit_reaches_forty_percent() {
        // complexity 1200: scale = 0.4; 100 * 0.4 = 40
        let content = ["a".repeat(1160)];
        assert_eq!(estimate_font_size(&content, 100, 10, false), 40);
    }

    #[test]
    fn test_min_size_floor() {
        let content = ["a".repeat(4000)];
        assert_eq!(estimate_font_size(&content, 26, 14, false), 14);
        assert_eq!(estimate_font_size(&content, 64, 32, false), 32);
    }

    #[test]
    fn test_line_count_weight() {
        // Ten one-char lines: 10 + 400 = 410 > 300
        let lines = vec!["a"; 10];
        assert!(estimate_font_size(&lines, 26, 14, false) < 26);

        // Same characters on one line stay unscaled.
        let one_line = ["a".repeat(10)];
        assert_eq!(estimate_font_size(&one_line, 26, 14, false), 26);
    }

    #[test]
    fn test_monotonic_in_text_length() {
        let mut previous = u32::MAX;
        for len in (0..2000).step_by(25) {
            let content = ["a".repeat(len), "b".repeat(10)];
            let size = estimate_font_size(&content, 26, 14, false);
            assert!(size <= previous, "size grew at length {len}");
            assert!(size >= 14);
            previous = size;
        }
    }

    #[test]
    fn test_zero_sizes_never_panic() {
        let content = ["a".repeat(2000)];
        assert_eq!(estimate_font_size(&content, 0, 0, false), 0);
        assert_eq!(estimate_font_size(&content, 10, 0, false), 0);
        assert_eq!(estimate_font_size(&content, 0, 0, true), 0);
    }

    #[test]
    fn test_custom_policy() {
        let policy = SizingPolicy {
            easy_threshold: 10.0,
            line_weight: 0.0,
            ..SizingPolicy::default()
        };
        assert!(policy.validate().is_ok());
        assert_eq!(policy.estimate(&["a".repeat(10)], 30, 10, false), 30);
        assert!(policy.estimate(&["a".repeat(200)], 30, 10, false) < 30);
    }

    #[test]
    fn test_policy_validation() {
        let inverted = SizingPolicy {
            hard_limit: 100.0,
            ..SizingPolicy::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(Error::InvalidSizingPolicy(_))
        ));

        let nan = SizingPolicy {
            max_shrink: f64::NAN,
            ..SizingPolicy::default()
        };
        assert!(nan.validate().is_err());

        let zero_thumb = SizingPolicy {
            thumbnail_ratio: 0.0,
            ..SizingPolicy::default()
        };
        assert!(zero_thumb.validate().is_err());
    }

    #[test]
    fn test_policy_json_round_trip_names() {
        let json = serde_json::to_value(SizingPolicy::default()).unwrap();
        assert_eq!(json["easyThreshold"], 300.0);
        assert_eq!(json["lineWeight"], 40.0);
    }

    #[test]
    fn test_role_for_mode() {
        let table = SizeTable::default();
        assert_eq!(table.title_heading.for_mode(RenderMode::Full), RoleSize::new(64, 32));
        assert_eq!(
            table.title_heading.for_mode(RenderMode::Thumbnail),
            RoleSize::new(24, 12)
        );
        assert_eq!(table.quote_attribution.for_mode(RenderMode::Thumbnail), 10);
        assert_eq!(table.content_header.for_mode(RenderMode::Full), 44);
    }
}
