/// Shape types and XML generation for generated slides.
use crate::common::unit::inches_to_emu;
use crate::common::xml::escape_xml;
use crate::document::error::Result;
use crate::document::model::{ChartOptions, ChartType, SeriesRecord, TextBlock};
use crate::placeholder::Rect;
use std::fmt::Write as FmtWrite;

/// A chart placed on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartShape {
    /// Package-wide chart number (`/ppt/charts/chartN.xml`)
    pub(crate) chart_number: usize,
    /// Chart type token
    pub chart_type: ChartType,
    /// Series in plot order
    pub series: Vec<SeriesRecord>,
    /// Position and styling
    pub options: ChartOptions,
}

impl ChartShape {
    /// Frame bounds in layout units.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.options.rect
    }

    /// Part name of the chart inside the package.
    #[inline]
    pub(crate) fn partname(&self) -> String {
        format!("/ppt/charts/chart{}.xml", self.chart_number)
    }
}

/// A shape on a generated slide.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ShapeKind {
    /// Static text from the template
    TextBox(TextBlock),
    /// Chart graphic frame
    Chart(ChartShape),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SlideShape {
    pub(crate) shape_id: u32,
    pub(crate) kind: ShapeKind,
}

impl SlideShape {
    /// Generate XML for this shape.
    ///
    /// Chart frames reference their chart part through `chart_rel_id`.
    pub(crate) fn to_xml(&self, xml: &mut String, chart_rel_id: Option<&str>) -> Result<()> {
        match &self.kind {
            ShapeKind::TextBox(block) => self.write_text_box(xml, block),
            ShapeKind::Chart(chart) => {
                self.write_chart_frame(xml, chart, chart_rel_id.unwrap_or("rIdChartPlaceholder"))
            },
        }
    }

    fn write_text_box(&self, xml: &mut String, block: &TextBlock) -> Result<()> {
        xml.push_str("<p:sp>");
        xml.push_str("<p:nvSpPr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="Text Box {}"/>"#,
            self.shape_id, self.shape_id
        )?;
        xml.push_str("<p:cNvSpPr txBox=\"1\"/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvSpPr>");

        xml.push_str("<p:spPr>");
        write_xfrm(xml, "a:xfrm", &block.rect)?;
        xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
        xml.push_str("<a:noFill/>");
        xml.push_str("</p:spPr>");

        xml.push_str("<p:txBody>");
        xml.push_str(r#"<a:bodyPr wrap="square" lIns="0" tIns="0" rIns="0" bIns="0" rtlCol="0">"#);
        xml.push_str("<a:noAutofit/>");
        xml.push_str("</a:bodyPr>");
        xml.push_str("<a:lstStyle/>");
        xml.push_str("<a:p>");
        xml.push_str("<a:r>");

        xml.push_str("<a:rPr lang=\"en-US\" dirty=\"0\"");
        if let Some(size) = block.font_size_pt {
            // sz is hundredths of a point, 1pt..=4000pt
            let sz = ((size * 100.0).round() as u32).clamp(100, 400_000);
            write!(xml, " sz=\"{}\"", sz)?;
        }
        if block.bold {
            xml.push_str(" b=\"1\"");
        }
        xml.push('>');
        if let Some(ref color) = block.color {
            write!(
                xml,
                "<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>",
                escape_xml(color)
            )?;
        }
        xml.push_str("</a:rPr>");

        write!(xml, "<a:t>{}</a:t>", escape_xml(&block.text))?;
        xml.push_str("</a:r>");
        xml.push_str("</a:p>");
        xml.push_str("</p:txBody>");

        xml.push_str("</p:sp>");
        Ok(())
    }

    fn write_chart_frame(&self, xml: &mut String, chart: &ChartShape, rel_id: &str) -> Result<()> {
        xml.push_str("<p:graphicFrame>");
        xml.push_str("<p:nvGraphicFramePr>");
        write!(
            xml,
            r#"<p:cNvPr id="{}" name="Chart {}"/>"#,
            self.shape_id, self.shape_id
        )?;
        xml.push_str("<p:cNvGraphicFramePr/>");
        xml.push_str("<p:nvPr/>");
        xml.push_str("</p:nvGraphicFramePr>");

        write_xfrm(xml, "p:xfrm", &chart.rect())?;

        xml.push_str("<a:graphic>");
        xml.push_str(r#"<a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/chart">"#);
        write!(
            xml,
            r#"<c:chart xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" r:id="{}"/>"#,
            rel_id
        )?;
        xml.push_str("</a:graphicData>");
        xml.push_str("</a:graphic>");
        xml.push_str("</p:graphicFrame>");
        Ok(())
    }
}

fn write_xfrm(xml: &mut String, tag: &str, rect: &Rect) -> Result<()> {
    write!(xml, "<{}>", tag)?;
    write!(
        xml,
        r#"<a:off x="{}" y="{}"/>"#,
        inches_to_emu(rect.x),
        inches_to_emu(rect.y)
    )?;
    write!(
        xml,
        r#"<a:ext cx="{}" cy="{}"/>"#,
        inches_to_emu(rect.w),
        inches_to_emu(rect.h)
    )?;
    write!(xml, "</{}>", tag)?;
    Ok(())
}
