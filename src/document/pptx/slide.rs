/// Slide type and XML generation for generated presentations.
use crate::common::xml::escape_xml;
use crate::document::error::Result;
use crate::document::model::TextBlock;
use std::fmt::Write as FmtWrite;

use super::shape::{ChartShape, ShapeKind, SlideShape};

/// A slide in a generated presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct PptxSlide {
    /// Slide ID (unique within the presentation, starts at 256)
    pub(crate) slide_id: u32,
    /// Slide name from the template
    pub(crate) name: Option<String>,
    /// Shapes in z-order
    pub(crate) shapes: Vec<SlideShape>,
}

impl PptxSlide {
    pub(crate) fn new(slide_id: u32, name: Option<String>) -> Self {
        Self {
            slide_id,
            name,
            shapes: Vec::new(),
        }
    }

    /// Get the slide ID.
    pub fn slide_id(&self) -> u32 {
        self.slide_id
    }

    /// Get the slide name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Charts on this slide in insertion order.
    pub fn charts(&self) -> impl Iterator<Item = &ChartShape> {
        self.shapes.iter().filter_map(|shape| match &shape.kind {
            ShapeKind::Chart(chart) => Some(chart),
            ShapeKind::TextBox(_) => None,
        })
    }

    /// Static text blocks on this slide.
    pub fn text_blocks(&self) -> impl Iterator<Item = &TextBlock> {
        self.shapes.iter().filter_map(|shape| match &shape.kind {
            ShapeKind::TextBox(block) => Some(block),
            ShapeKind::Chart(_) => None,
        })
    }

    pub(crate) fn push(&mut self, kind: ShapeKind) {
        // id 1 is the group shape
        let shape_id = self.shapes.len() as u32 + 2;
        self.shapes.push(SlideShape { shape_id, kind });
    }

    /// Generate slide XML.
    ///
    /// `chart_rel_ids` holds one relationship ID per chart, in the order of
    /// [`PptxSlide::charts`].
    pub(crate) fn to_xml(&self, chart_rel_ids: &[String]) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<p:sld xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" "#,
        );
        xml.push_str(r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#);
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        );

        match self.name {
            Some(ref name) => write!(xml, r#"<p:cSld name="{}">"#, escape_xml(name))?,
            None => xml.push_str("<p:cSld>"),
        }
        xml.push_str("<p:spTree>");

        xml.push_str("<p:nvGrpSpPr>");
        xml.push_str(r#"<p:cNvPr id="1" name=""/>"#);
        xml.push_str("<p:cNvGrpSpPr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGrpSpPr>");
        xml.push_str("<p:grpSpPr>");
        xml.push_str("<a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/>");
        xml.push_str("<a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm>");
        xml.push_str("</p:grpSpPr>");

        let mut chart_index = 0;
        for shape in &self.shapes {
            let rel_id = match shape.kind {
                ShapeKind::Chart(_) => {
                    let id = chart_rel_ids.get(chart_index).map(String::as_str);
                    chart_index += 1;
                    id
                },
                ShapeKind::TextBox(_) => None,
            };
            shape.to_xml(&mut xml, rel_id)?;
        }

        xml.push_str("</p:spTree>");
        xml.push_str("</p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::model::{ChartOptions, ChartType};
    use crate::placeholder::Rect;

    fn chart(number: usize) -> ShapeKind {
        ShapeKind::Chart(ChartShape {
            chart_number: number,
            chart_type: ChartType::Line,
            series: Vec::new(),
            options: ChartOptions::at(Rect::new(0.0, 0.0, 1.0, 1.0)),
        })
    }

    #[test]
    fn test_shape_ids_start_after_group() {
        let mut slide = PptxSlide::new(256, Some("overview".into()));
        slide.push(ShapeKind::TextBox(TextBlock {
            text: "Title".into(),
            rect: Rect::new(0.5, 0.2, 9.0, 0.8),
            font_size_pt: None,
            bold: false,
            color: None,
        }));
        slide.push(chart(1));
        assert_eq!(slide.shapes[0].shape_id, 2);
        assert_eq!(slide.shapes[1].shape_id, 3);
        assert_eq!(slide.charts().count(), 1);
        assert_eq!(slide.text_blocks().count(), 1);
    }

    #[test]
    fn test_chart_rel_ids_follow_chart_order() {
        let mut slide = PptxSlide::new(256, None);
        slide.push(chart(1));
        slide.push(chart(2));
        let xml = slide
            .to_xml(&["rId2".to_string(), "rId3".to_string()])
            .unwrap();
        let first = xml.find(r#"r:id="rId2""#).unwrap();
        let second = xml.find(r#"r:id="rId3""#).unwrap();
        assert!(first < second);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.ends_with("</p:sld>"));
    }
}
