//! Hosting segments and slide layouts as HTML markup.
//!
//! Math typesetting is injected through [`MathRenderer`]; this module only
//! decides which segments reach it and where the output lands.

use crate::engine::{BulletList, ImageSlot, SlideBody, SlideLayout, TextBlock};
use crate::layout::ImageSide;
use crate::segment::Segment;
use std::fmt::Write;

/// A math typesetting capability.
pub trait MathRenderer {
    /// Typeset an expression inline with text.
    fn render_inline(&self, expr: &str) -> String;

    /// Typeset an expression as display math.
    fn render_block(&self, expr: &str) -> String;
}

/// Passes TeX through with `\( \)` and `\[ \]` delimiters for a client-side
/// typesetter to pick up.
#[derive(Debug, Clone, Copy, Default)]
pub struct TexDelimiters;

impl MathRenderer for TexDelimiters {
    fn render_inline(&self, expr: &str) -> String {
        format!("\\({}\\)", escape_html(expr))
    }

    fn render_block(&self, expr: &str) -> String {
        format!("\\[{}\\]", escape_html(expr))
    }
}

/// Writes segments and layouts as HTML using a math renderer.
#[derive(Debug, Clone, Default)]
pub struct MarkupWriter<R> {
    renderer: R,
}

impl<R: MathRenderer> MarkupWriter<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Render a segment sequence.
    ///
    /// Block math is wrapped in a horizontally scrollable container since it
    /// may be wider than the slide.
    pub fn segments(&self, segments: &[Segment]) -> String {
        let mut out = String::new();
        for segment in segments {
            match segment {
                Segment::Text(text) => out.push_str(&escape_html(text)),
                Segment::InlineMath(expr) => {
                    let _ = write!(
                        out,
                        r#"<span class="math-inline">{}</span>"#,
                        self.renderer.render_inline(expr)
                    );
                }
                Segment::BlockMath(expr) => {
                    let _ = write!(
                        out,
                        r#"<div class="math-block" style="overflow-x:auto">{}</div>"#,
                        self.renderer.render_block(expr)
                    );
                }
            }
        }
        out
    }

    /// Render a laid-out slide as a `<section>`.
    pub fn slide(&self, layout: &SlideLayout) -> String {
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<section class="slide slide-{}" data-slide-id="{}">"#,
            layout.kind,
            escape_html(&layout.slide_id)
        );

        match &layout.body {
            SlideBody::TitleCard { title, subtitle } => {
                out.push_str(&self.block("h1", "slide-title", title));
                if let Some(subtitle) = subtitle {
                    out.push_str(&self.block("p", "slide-subtitle", subtitle));
                }
            }
            SlideBody::QuoteCard { quote, attribution } => {
                out.push_str(r#"<span class="quote-mark" aria-hidden="true">&ldquo;</span>"#);
                out.push_str(&self.block("blockquote", "quote-text", quote));
                out.push_str(&self.block("cite", "quote-attribution", attribution));
            }
            SlideBody::Media {
                image_side,
                header,
                bullets,
                image,
            } => {
                let text_column = format!(
                    r#"<div class="column">{}{}</div>"#,
                    self.block("h2", "slide-header", header),
                    self.list(bullets)
                );
                let image_column = image_markup(image);
                let (first, second) = match image_side {
                    ImageSide::Left => (image_column, text_column),
                    ImageSide::Right => (text_column, image_column),
                };
                let _ = write!(out, r#"<div class="columns">{first}{second}</div>"#);
            }
            SlideBody::SplitColumns {
                header,
                left,
                right,
            } => {
                out.push_str(&self.block("h2", "slide-header", header));
                let _ = write!(
                    out,
                    r#"<div class="columns"><div class="column">{}</div><div class="column">{}</div></div>"#,
                    self.list(left),
                    self.list(right)
                );
            }
            SlideBody::SingleColumn { header, bullets } => {
                out.push_str(&self.block("h2", "slide-header", header));
                out.push_str(&self.list(bullets));
            }
        }

        out.push_str("</section>");
        out
    }

    fn block(&self, tag: &str, class: &str, block: &TextBlock) -> String {
        format!(
            r#"<{tag} class="{class}" style="font-size:{}px">{}</{tag}>"#,
            block.font_size,
            self.segments(&block.segments)
        )
    }

    fn list(&self, list: &BulletList) -> String {
        let mut out = format!(r#"<ul style="font-size:{}px">"#, list.font_size);
        for item in &list.items {
            let _ = write!(out, "<li>{}</li>", self.segments(item));
        }
        out.push_str("</ul>");
        out
    }
}

fn image_markup(image: &ImageSlot) -> String {
    match image {
        ImageSlot::Image { src, alt } => format!(
            r#"<div class="column image"><img src="{}" alt="{}"></div>"#,
            escape_html(src),
            escape_html(alt.as_deref().unwrap_or(""))
        ),
        ImageSlot::Placeholder => {
            r#"<div class="column image image-placeholder" aria-label="Image not generated yet"></div>"#
                .to_string()
        }
    }
}

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::layout_slide;
    use crate::layout::LayoutKind;
    use crate::segment::segment;
    use crate::sizing::RenderMode;
    use crate::types::Slide;
    use std::cell::RefCell;

    /// Records what reaches the typesetter.
    #[derive(Default)]
    struct Recording {
        calls: RefCell<Vec<(bool, String)>>,
    }

    impl MathRenderer for &Recording {
        fn render_inline(&self, expr: &str) -> String {
            self.calls.borrow_mut().push((false, expr.to_string()));
            "I".to_string()
        }

        fn render_block(&self, expr: &str) -> String {
            self.calls.borrow_mut().push((true, expr.to_string()));
            "B".to_string()
        }
    }

    #[test]
    fn test_only_math_reaches_renderer() {
        let recording = Recording::default();
        let writer = MarkupWriter::new(&recording);
        let html = writer.segments(&segment("a $x$ b $$y$$ c"));

        assert_eq!(
            *recording.calls.borrow(),
            vec![(false, "x".to_string()), (true, "y".to_string())]
        );
        assert_eq!(
            html,
            r#"a <span class="math-inline">I</span> b <div class="math-block" style="overflow-x:auto">B</div> c"#
        );
    }

    #[test]
    fn test_plain_text_is_escaped() {
        let writer = MarkupWriter::new(TexDelimiters);
        assert_eq!(
            writer.segments(&segment("<b>R&D</b>")),
            "&lt;b&gt;R&amp;D&lt;/b&gt;"
        );
    }

    #[test]
    fn test_tex_delimiters() {
        let writer = MarkupWriter::new(TexDelimiters);
        assert_eq!(
            writer.segments(&segment("$a<b$")),
            r#"<span class="math-inline">\(a&lt;b\)</span>"#
        );
    }

    #[test]
    fn test_quote_slide_markup() {
        let slide = Slide::new("q", "Grace Hopper")
            .with_content(["It's easier to ask forgiveness than permission."])
            .with_layout(LayoutKind::Quote);
        let html = MarkupWriter::new(TexDelimiters).slide(&layout_slide(&slide, RenderMode::Full));

        assert!(html.starts_with(r#"<section class="slide slide-quote" data-slide-id="q">"#));
        assert!(html.contains("quote-mark"));
        assert!(html.contains(r#"<cite class="quote-attribution" style="font-size:20px">Grace Hopper</cite>"#));
        assert!(html.ends_with("</section>"));
    }

    #[test]
    fn test_media_columns_mirror() {
        let base = Slide::new("m", "Map").with_content(["North"]);
        let writer = MarkupWriter::new(TexDelimiters);

        let left = writer.slide(&layout_slide(
            &base.clone().with_layout(LayoutKind::ImageLeft),
            RenderMode::Full,
        ));
        let right = writer.slide(&layout_slide(
            &base.with_layout(LayoutKind::ImageRight),
            RenderMode::Full,
        ));

        let image_first = |html: &str| {
            html.find("image-placeholder").unwrap() < html.find("slide-header").unwrap()
        };
        assert!(image_first(&left));
        assert!(!image_first(&right));
    }

    #[test]
    fn test_split_markup_has_two_lists() {
        let slide = Slide::new("s", "Split")
            .with_content(["a", "b", "c"])
            .with_layout(LayoutKind::Split);
        let html = MarkupWriter::new(TexDelimiters).slide(&layout_slide(&slide, RenderMode::Full));
        assert_eq!(html.matches("<ul ").count(), 2);
        assert_eq!(html.matches("<li>").count(), 3);
    }

    #[test]
    fn test_image_attributes_escaped() {
        let slide = Slide::new("i", "Pic")
            .with_layout(LayoutKind::ImageRight)
            .with_image("https://x/y.png?a=1&b=2")
            .with_image_prompt("a \"quoted\" prompt");
        let html = MarkupWriter::new(TexDelimiters).slide(&layout_slide(&slide, RenderMode::Full));
        assert!(html.contains(r#"src="https://x/y.png?a=1&amp;b=2""#));
        assert!(html.contains(r#"alt="a &quot;quoted&quot; prompt""#));
    }
}
