//! WASM-compatible wrapper for slide layout.
//!
//! Exposes segmentation, font sizing, and deck layout to JavaScript hosts
//! such as the browser editor or a Cloudflare Worker.

use deck_core::{
    estimate_font_size, segment, ContentNormalizer, LayoutEngine, Presentation, RenderMode,
    Segment, Slide, SlideLayout,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Result of laying out a presentation.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckLayoutResult {
    /// Number of slides in the source document.
    pub slide_count: usize,
    /// One layout per slide, in presentation order.
    pub slides: Vec<SlideLayout>,
    /// Validation problem found in the document, if any. Layout still runs.
    pub warning: Option<String>,
}

/// Split a text field into text and math segments.
#[wasm_bindgen(js_name = segmentText)]
pub fn segment_text(text: &str) -> Result<JsValue, JsValue> {
    to_js(&segment_text_impl(text))
}

/// Estimate a font size for a block of lines.
///
/// # Arguments
/// * `lines` - Array of strings, one per line or bullet
/// * `base_size` - Nominal size in pixels
/// * `min_size` - Smallest size the block may shrink to
/// * `thumbnail` - Whether the block renders in the thumbnail rail
#[wasm_bindgen(js_name = estimateFontSize)]
pub fn estimate_font_size_js(
    lines: JsValue,
    base_size: u32,
    min_size: u32,
    thumbnail: bool,
) -> Result<u32, JsValue> {
    let lines: Vec<String> = serde_wasm_bindgen::from_value(lines)
        .map_err(|e| JsValue::from_str(&format!("Invalid lines array: {}", e)))?;
    Ok(estimate_font_size(&lines, base_size, min_size, thumbnail))
}

/// Lay out a single slide object.
#[wasm_bindgen(js_name = layoutSlide)]
pub fn layout_slide(slide: JsValue, thumbnail: bool) -> Result<JsValue, JsValue> {
    let slide: Slide = serde_wasm_bindgen::from_value(slide)
        .map_err(|e| JsValue::from_str(&format!("Invalid slide: {}", e)))?;
    to_js(&LayoutEngine::new().layout_slide(&slide, mode(thumbnail)))
}

/// Lay out a presentation given as a JSON string.
#[wasm_bindgen(js_name = layoutPresentation)]
pub fn layout_presentation(json: &str, thumbnail: bool) -> Result<JsValue, JsValue> {
    let result = layout_presentation_impl(json, thumbnail).map_err(|e| JsValue::from_str(&e))?;
    to_js(&result)
}

/// Turn edited text-area contents into bullets.
#[wasm_bindgen(js_name = bulletsFromText)]
pub fn bullets_from_text(text: &str, strip_markers: bool) -> Result<JsValue, JsValue> {
    to_js(&bullets_from_text_impl(text, strip_markers))
}

fn layout_presentation_impl(json: &str, thumbnail: bool) -> Result<DeckLayoutResult, String> {
    let presentation: Presentation =
        serde_json::from_str(json).map_err(|e| format!("Invalid presentation: {}", e))?;

    let warning = presentation.validate().err().map(|e| e.to_string());
    let slides = LayoutEngine::new().layout_presentation(&presentation, mode(thumbnail));

    Ok(DeckLayoutResult {
        slide_count: presentation.slides.len(),
        slides,
        warning,
    })
}

fn bullets_from_text_impl(text: &str, strip_markers: bool) -> Vec<String> {
    ContentNormalizer::new()
        .with_strip_markers(strip_markers)
        .bullets_from_text(text)
}

fn segment_text_impl(text: &str) -> Vec<Segment> {
    segment(text)
}

fn mode(thumbnail: bool) -> RenderMode {
    if thumbnail {
        RenderMode::Thumbnail
    } else {
        RenderMode::Full
    }
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{SlideBody, Template};

    const DECK: &str = r##"{
        "id": "p1",
        "title": "Physics 101",
        "style": "academic",
        "palette": {
            "background": "#0f172a",
            "text": "#f8fafc",
            "primary": "#38bdf8",
            "secondary": "#94a3b8",
            "accent": "#fbbf24"
        },
        "slides": [
            { "id": "s1", "title": "Physics 101", "subtitle": "Week 1", "layout": "title" },
            { "id": "s2", "title": "Laws", "content": ["$F = ma$", "a", "b"], "layout": "split" },
            { "id": "s3", "title": "Misc", "content": ["x"], "layout": "timeline" }
        ]
    }"##;

    #[test]
    fn test_layout_presentation() {
        let result = layout_presentation_impl(DECK, false).unwrap();

        assert_eq!(result.slide_count, 3);
        assert!(result.warning.is_none());
        assert_eq!(result.slides[0].template(), Template::TitleCard);
        assert_eq!(result.slides[2].template(), Template::SingleColumn);

        match &result.slides[1].body {
            SlideBody::SplitColumns { left, right, .. } => {
                assert_eq!(left.len(), 2);
                assert_eq!(right.len(), 1);
            }
            other => panic!("expected split columns, got {other:?}"),
        }
    }

    #[test]
    fn test_layout_presentation_reports_invalid_palette() {
        let json = DECK.replace("#fbbf24", "gold");
        let result = layout_presentation_impl(&json, true).unwrap();
        assert!(result.warning.unwrap().contains("accent"));
        assert_eq!(result.slides.len(), 3);
    }

    #[test]
    fn test_layout_presentation_rejects_bad_json() {
        let err = layout_presentation_impl("{ not json", false).unwrap_err();
        assert!(err.starts_with("Invalid presentation"));
    }

    #[test]
    fn test_bullets_from_text() {
        assert_eq!(
            bullets_from_text_impl("- one\n\n- two", true),
            vec!["one", "two"]
        );
    }

    #[test]
    fn test_segment_text() {
        assert_eq!(
            segment_text_impl("$$x^2$$"),
            vec![Segment::BlockMath("x^2".to_string())]
        );
    }
}
