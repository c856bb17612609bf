//! Positioned XHTML templates.
//!
//! Regions are absolutely positioned elements:
//!
//! ```html
//! <html><head><title>overview</title></head>
//! <body style="width: 720pt; height: 405pt">
//!   <h1 style="left: 36pt; top: 20pt; width: 648pt; height: 40pt; font-size: 28pt">Overview</h1>
//!   <div class="placeholder" id="donut-chart"
//!        style="left: 36pt; top: 80pt; width: 300pt; height: 280pt"></div>
//! </body></html>
//! ```
//!
//! Every element whose class list contains `placeholder` becomes a
//! [`Placeholder`]. Positioned `h1`..`h6` and `p` elements become static text.

use crate::chart::style::normalize_color;
use crate::common::unit::{parse_font_size_pt, parse_length_inches};
use crate::common::xml::{resolve_entity, unescape_xml};
use crate::document::{SlideContent, SlideLayout, TextBlock};
use crate::placeholder::{Placeholder, Rect};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{ParseError, ParsedTemplate, TemplateParser, TemplateRef};

/// Allowed difference between the body size and the layout size, in inches.
const LAYOUT_TOLERANCE_IN: f64 = 0.01;

/// Class marking an element as a chart placeholder.
const PLACEHOLDER_CLASS: &str = "placeholder";

/// [`TemplateParser`] for positioned XHTML markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupParser {
    layout: Option<SlideLayout>,
}

impl MarkupParser {
    /// Parser that accepts any body size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser that rejects templates whose body size differs from `layout`.
    pub fn with_layout(layout: SlideLayout) -> Self {
        Self {
            layout: Some(layout),
        }
    }

    /// Parse markup held in memory.
    pub fn parse_str(&self, markup: &str) -> Result<ParsedTemplate, ParseError> {
        let mut reader = Reader::from_str(markup);
        let mut buf = Vec::new();
        let mut state = MarkupState::default();
        let mut depth = 0usize;

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(ref e) => {
                    depth += 1;
                    self.open_element(e, depth, &mut state)?;
                },
                Event::Empty(ref e) => {
                    self.open_element(e, depth + 1, &mut state)?;
                    state.close_element(depth + 1);
                },
                Event::End(_) => {
                    state.close_element(depth);
                    depth = depth.saturating_sub(1);
                },
                Event::Text(ref t) => state.push_text(&String::from_utf8_lossy(t)),
                Event::CData(ref t) => state.push_text(&String::from_utf8_lossy(t)),
                Event::GeneralRef(ref r) => {
                    let name = String::from_utf8_lossy(r);
                    match resolve_entity(&name) {
                        Some(c) => state.push_text(c.encode_utf8(&mut [0; 4])),
                        None => state.push_text(&format!("&{};", name)),
                    }
                },
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        Ok(ParsedTemplate {
            content: state.content,
            placeholders: state.placeholders,
        })
    }

    fn open_element(
        &self,
        e: &BytesStart,
        depth: usize,
        state: &mut MarkupState,
    ) -> Result<(), ParseError> {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).to_ascii_lowercase();
        let attrs = ElementAttrs::read(e);

        match name.as_str() {
            "title" => state.title = Some(TextCapture::new(depth, InlineStyle::default(), false)),
            "body" => self.check_body(&attrs.style)?,
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "p" if state.text.is_none() => {
                state.text = Some(TextCapture::new(depth, attrs.style.clone(), name != "p"));
            },
            _ => {},
        }

        if attrs.has_class(PLACEHOLDER_CLASS) {
            let id = attrs
                .id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| ParseError::MissingId {
                    element: name.clone(),
                })?;
            let rect = attrs
                .style
                .rect()
                .map_err(|reason| ParseError::InvalidGeometry {
                    id: id.clone(),
                    reason,
                })?;
            if state.placeholders.iter().any(|p| p.id == id) {
                return Err(ParseError::DuplicatePlaceholder(id));
            }
            log::debug!("placeholder '{}' at {}", id, rect);
            state.placeholders.push(Placeholder::new(id, rect));
        }

        Ok(())
    }

    fn check_body(&self, style: &InlineStyle) -> Result<(), ParseError> {
        let Some(layout) = self.layout else {
            return Ok(());
        };
        let (Some(width), Some(height)) = (style.get("width"), style.get("height")) else {
            return Ok(());
        };

        let (found_w, found_h) = match (parse_length_inches(width), parse_length_inches(height)) {
            (Ok(w), Ok(h)) => (w, h),
            (Err(reason), _) | (_, Err(reason)) => {
                return Err(ParseError::InvalidGeometry {
                    id: "body".to_string(),
                    reason,
                });
            },
        };
        let (expected_w, expected_h) = layout.size_inches();
        if (found_w - expected_w).abs() > LAYOUT_TOLERANCE_IN
            || (found_h - expected_h).abs() > LAYOUT_TOLERANCE_IN
        {
            return Err(ParseError::LayoutMismatch {
                expected_w,
                expected_h,
                found_w,
                found_h,
            });
        }
        Ok(())
    }
}

impl TemplateParser for MarkupParser {
    fn parse(&self, template: &TemplateRef) -> Result<ParsedTemplate, ParseError> {
        let markup = std::fs::read_to_string(template.path()).map_err(|source| ParseError::Io {
            path: template.path().to_path_buf(),
            source,
        })?;
        self.parse_str(&markup)
    }
}

#[derive(Debug, Default)]
struct MarkupState {
    title: Option<TextCapture>,
    text: Option<TextCapture>,
    content: SlideContent,
    placeholders: Vec<Placeholder>,
}

impl MarkupState {
    fn push_text(&mut self, text: &str) {
        if let Some(ref mut title) = self.title {
            title.text.push_str(text);
        }
        if let Some(ref mut capture) = self.text {
            capture.text.push_str(text);
        }
    }

    fn close_element(&mut self, depth: usize) {
        if self.title.as_ref().is_some_and(|t| t.depth == depth)
            && let Some(title) = self.title.take()
        {
            let name = collapse_whitespace(&title.text);
            if !name.is_empty() {
                self.content.name = Some(name);
            }
        }

        if self.text.as_ref().is_some_and(|t| t.depth == depth)
            && let Some(capture) = self.text.take()
            && let Some(block) = capture.into_block()
        {
            self.content.texts.push(block);
        }
    }
}

/// Text collected from one heading or paragraph.
#[derive(Debug)]
struct TextCapture {
    depth: usize,
    style: InlineStyle,
    heading: bool,
    text: String,
}

impl TextCapture {
    fn new(depth: usize, style: InlineStyle, heading: bool) -> Self {
        Self {
            depth,
            style,
            heading,
            text: String::new(),
        }
    }

    fn into_block(self) -> Option<TextBlock> {
        let text = collapse_whitespace(&self.text);
        if text.is_empty() {
            return None;
        }
        let rect = match self.style.rect() {
            Ok(rect) => rect,
            Err(reason) => {
                log::debug!("skipping unpositioned text '{}': {}", text, reason);
                return None;
            },
        };

        let font_size_pt = self
            .style
            .get("font-size")
            .and_then(|v| parse_font_size_pt(v).ok())
            .filter(|size| {
                let usable = *size > 0.0;
                if !usable {
                    log::debug!("ignoring font size {}pt on '{}'", size, text);
                }
                usable
            });
        let bold = match self.style.get("font-weight") {
            Some(weight) => {
                weight.eq_ignore_ascii_case("bold")
                    || weight.eq_ignore_ascii_case("bolder")
                    || weight.parse::<u32>().is_ok_and(|w| w >= 600)
            },
            None => self.heading,
        };
        let color = self.style.get("color").and_then(normalize_color);

        Some(TextBlock {
            text,
            rect,
            font_size_pt,
            bold,
            color,
        })
    }
}

/// Attributes the parser cares about.
#[derive(Debug, Default)]
struct ElementAttrs {
    id: Option<String>,
    class: Option<String>,
    style: InlineStyle,
}

impl ElementAttrs {
    fn read(e: &BytesStart) -> Self {
        let mut attrs = Self::default();
        for attr in e.attributes().flatten() {
            let value = unescape_xml(&String::from_utf8_lossy(&attr.value));
            match attr.key.local_name().as_ref() {
                b"id" => attrs.id = Some(value),
                b"class" => attrs.class = Some(value),
                b"style" => attrs.style = InlineStyle::parse(&value),
                _ => {},
            }
        }
        attrs
    }

    fn has_class(&self, class: &str) -> bool {
        self.class
            .as_deref()
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }
}

/// Declarations of an inline `style` attribute.
#[derive(Debug, Clone, Default)]
struct InlineStyle(Vec<(String, String)>);

impl InlineStyle {
    fn parse(style: &str) -> Self {
        Self(
            style
                .split(';')
                .filter_map(|decl| {
                    let (key, value) = decl.split_once(':')?;
                    let key = key.trim().to_ascii_lowercase();
                    (!key.is_empty()).then(|| (key, value.trim().to_string()))
                })
                .collect(),
        )
    }

    /// Last declaration of `name` wins.
    fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Absolute geometry from `left`, `top`, `width` and `height`, in inches.
    fn rect(&self) -> Result<Rect, String> {
        let length = |name: &str| -> Result<f64, String> {
            let value = self.get(name).ok_or_else(|| format!("missing '{}'", name))?;
            parse_length_inches(value)
        };
        let rect = Rect::new(
            length("left")?,
            length("top")?,
            length("width")?,
            length("height")?,
        );
        if !rect.is_well_formed() {
            return Err(format!("negative geometry {}", rect));
        }
        Ok(rect)
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Opinion &amp; share</title></head>
<body style="width: 720pt; height: 405pt;">
  <h1 style="left: 36pt; top: 18pt; width: 648pt; height: 40pt; font-size: 28pt; color: #1F2937">
    Positive   vs negative
  </h1>
  <p style="left: 36pt; top: 360pt; width: 648pt; height: 20pt; font-size: 12pt">Source: survey</p>
  <p>unpositioned note</p>
  <div class="chart placeholder" id="donut-chart" style="left: 36pt; top: 72pt; width: 288pt; height: 270pt"></div>
  <div class="placeholder" id="trend" style="left:4.5in;top:1in;width:4.5in;height:3.75in"/>
</body>
</html>"#;

    #[test]
    fn test_parse_slide() {
        let parsed = MarkupParser::with_layout(SlideLayout::Layout16x9)
            .parse_str(SLIDE)
            .unwrap();

        assert_eq!(parsed.content.name.as_deref(), Some("Opinion & share"));
        assert_eq!(parsed.placeholders.len(), 2);
        assert_eq!(parsed.placeholders[0].id, "donut-chart");
        assert_eq!(parsed.placeholders[0].rect, Rect::new(0.5, 1.0, 4.0, 3.75));
        assert_eq!(parsed.placeholders[1].rect, Rect::new(4.5, 1.0, 4.5, 3.75));

        let texts = &parsed.content.texts;
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].text, "Positive vs negative");
        assert!(texts[0].bold);
        assert_eq!(texts[0].font_size_pt, Some(28.0));
        assert_eq!(texts[0].color.as_deref(), Some("1F2937"));
        assert_eq!(texts[1].text, "Source: survey");
        assert!(!texts[1].bold);
    }

    #[test]
    fn test_non_positive_font_size_is_dropped() {
        let markup = r#"<body>
            <p style="left:0;top:0;width:2in;height:1in;font-size:-4pt">shrunk</p>
            <p style="left:0;top:1in;width:2in;height:1in;font-size:0">gone</p>
        </body>"#;
        let parsed = MarkupParser::new().parse_str(markup).unwrap();
        let texts = &parsed.content.texts;
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[0].text, "shrunk");
        assert_eq!(texts[0].font_size_pt, None);
        assert_eq!(texts[1].font_size_pt, None);
    }

    #[test]
    fn test_missing_id() {
        let markup = r#"<body><div class="placeholder" style="left:0;top:0;width:1in;height:1in"></div></body>"#;
        let err = MarkupParser::new().parse_str(markup).unwrap_err();
        assert!(matches!(err, ParseError::MissingId { .. }));
    }

    #[test]
    fn test_invalid_geometry() {
        let markup = r#"<body><div class="placeholder" id="a" style="left:0;top:0;width:1in"></div></body>"#;
        let err = MarkupParser::new().parse_str(markup).unwrap_err();
        assert!(matches!(err, ParseError::InvalidGeometry { ref id, .. } if id == "a"));

        let markup = r#"<body><div class="placeholder" id="a" style="left:0;top:0;width:-1in;height:1in"></div></body>"#;
        let err = MarkupParser::new().parse_str(markup).unwrap_err();
        assert!(matches!(err, ParseError::InvalidGeometry { .. }));
    }

    #[test]
    fn test_duplicate_placeholder() {
        let markup = r#"<body>
            <div class="placeholder" id="a" style="left:0;top:0;width:1in;height:1in"/>
            <div class="placeholder" id="a" style="left:1in;top:0;width:1in;height:1in"/>
        </body>"#;
        let err = MarkupParser::new().parse_str(markup).unwrap_err();
        assert!(matches!(err, ParseError::DuplicatePlaceholder(ref id) if id == "a"));
    }

    #[test]
    fn test_layout_mismatch() {
        let markup = r#"<body style="width: 720pt; height: 540pt"></body>"#;
        let err = MarkupParser::with_layout(SlideLayout::Layout16x9)
            .parse_str(markup)
            .unwrap_err();
        assert!(matches!(err, ParseError::LayoutMismatch { .. }));
        assert!(MarkupParser::with_layout(SlideLayout::Layout4x3).parse_str(markup).is_ok());
        assert!(MarkupParser::new().parse_str(markup).is_ok());
    }

    #[test]
    fn test_malformed_markup() {
        let err = MarkupParser::new()
            .parse_str("<body><div></body>")
            .unwrap_err();
        assert!(matches!(err, ParseError::Xml(_)));
    }

    #[test]
    fn test_unreadable_template() {
        let err = MarkupParser::new()
            .parse(&TemplateRef::new("/nonexistent/slide.html"))
            .unwrap_err();
        assert!(matches!(err, ParseError::Io { .. }));
    }
}
