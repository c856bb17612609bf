//! Chart XML writer.
//!
//! Generates the `c:chartSpace` part for a [`ChartShape`]. Data is written as
//! literal caches (`c:strLit` / `c:numLit`), so the package needs no embedded
//! workbook.

use crate::common::unit::pt_to_emu_f64;
use crate::common::xml::escape_xml;
use crate::document::model::{AxisGroup, ChartOptions, ChartType, SeriesRecord, ValueAxisOptions};
use crate::document::pptx::shape::ChartShape;
use std::io::Write;

const PRIMARY_CAT_AXIS: u32 = 1;
const PRIMARY_VAL_AXIS: u32 = 2;
const SECONDARY_CAT_AXIS: u32 = 3;
const SECONDARY_VAL_AXIS: u32 = 4;

/// Write a chart part to XML.
pub(crate) fn write_chart<W: Write>(writer: &mut W, chart: &ChartShape) -> std::io::Result<()> {
    write!(
        writer,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#
    )?;
    write!(
        writer,
        r#"<c:chartSpace xmlns:c="http://schemas.openxmlformats.org/drawingml/2006/chart" "#
    )?;
    write!(
        writer,
        r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#
    )?;
    write!(
        writer,
        r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#
    )?;
    write!(writer, r#"<c:date1904 val="0"/>"#)?;
    write!(writer, r#"<c:lang val="en-US"/>"#)?;
    write!(writer, r#"<c:roundedCorners val="0"/>"#)?;

    write!(writer, "<c:chart>")?;

    let options = &chart.options;
    if let Some(ref title) = options.title {
        write_title(writer, title)?;
    }
    write!(
        writer,
        r#"<c:autoTitleDeleted val="{}"/>"#,
        if options.title.is_some() { "0" } else { "1" }
    )?;

    write_plot_area(writer, chart)?;

    if let Some(position) = options.legend {
        write!(writer, "<c:legend>")?;
        write!(writer, r#"<c:legendPos val="{}"/>"#, position.xml_value())?;
        write!(writer, r#"<c:overlay val="0"/>"#)?;
        write!(writer, "</c:legend>")?;
    }

    write!(writer, r#"<c:plotVisOnly val="1"/>"#)?;
    write!(writer, r#"<c:dispBlanksAs val="gap"/>"#)?;
    write!(writer, "</c:chart>")?;
    write!(writer, "</c:chartSpace>")?;

    Ok(())
}

fn write_title<W: Write>(writer: &mut W, text: &str) -> std::io::Result<()> {
    write!(writer, "<c:title>")?;
    write!(writer, "<c:tx><c:rich>")?;
    write!(writer, "<a:bodyPr/><a:lstStyle/>")?;
    write!(writer, "<a:p><a:pPr><a:defRPr/></a:pPr>")?;
    write!(
        writer,
        r#"<a:r><a:rPr lang="en-US"/><a:t>{}</a:t></a:r>"#,
        escape_xml(text)
    )?;
    write!(writer, "</a:p></c:rich></c:tx>")?;
    write!(writer, r#"<c:overlay val="0"/>"#)?;
    write!(writer, "</c:title>")?;
    Ok(())
}

fn write_plot_area<W: Write>(writer: &mut W, chart: &ChartShape) -> std::io::Result<()> {
    write!(writer, "<c:plotArea>")?;
    write!(writer, "<c:layout/>")?;

    let options = &chart.options;
    match chart.chart_type {
        ChartType::Pie | ChartType::Doughnut => {
            write_pie_chart(writer, chart.chart_type, &chart.series, options)?;
        },
        ChartType::Bar | ChartType::Column => {
            write_bar_chart(writer, chart.chart_type, &chart.series, options)?;
            write_axes(writer, chart.chart_type, options, false)?;
        },
        ChartType::Line => {
            let secondary = chart
                .series
                .iter()
                .any(|s| s.axis == AxisGroup::Secondary);
            write_line_chart(writer, &chart.series, options, AxisGroup::Primary)?;
            if secondary {
                write_line_chart(writer, &chart.series, options, AxisGroup::Secondary)?;
            }
            write_axes(writer, chart.chart_type, options, secondary)?;
        },
    }

    write!(writer, "</c:plotArea>")?;
    Ok(())
}

fn write_pie_chart<W: Write>(
    writer: &mut W,
    chart_type: ChartType,
    series: &[SeriesRecord],
    options: &ChartOptions,
) -> std::io::Result<()> {
    let tag = chart_type.xml_element_name();
    write!(writer, "<c:{}>", tag)?;
    write!(writer, r#"<c:varyColors val="1"/>"#)?;

    for (index, record) in series.iter().enumerate() {
        write_series_header(writer, index, record)?;
        for (point, color) in options
            .point_colors
            .iter()
            .take(record.values.len())
            .enumerate()
        {
            write!(writer, "<c:dPt>")?;
            write!(writer, r#"<c:idx val="{}"/>"#, point)?;
            write!(writer, r#"<c:bubble3D val="0"/>"#)?;
            write!(writer, "<c:spPr>")?;
            write_solid_fill(writer, color)?;
            write!(writer, "</c:spPr>")?;
            write!(writer, "</c:dPt>")?;
        }
        write_series_data(writer, record)?;
        write!(writer, "</c:ser>")?;
    }

    write_data_labels(writer, options.show_values, options.show_percent)?;
    write!(writer, r#"<c:firstSliceAng val="0"/>"#)?;
    if chart_type == ChartType::Doughnut {
        write!(
            writer,
            r#"<c:holeSize val="{}"/>"#,
            options.hole_size.unwrap_or(50)
        )?;
    }
    write!(writer, "</c:{}>", tag)?;
    Ok(())
}

fn write_bar_chart<W: Write>(
    writer: &mut W,
    chart_type: ChartType,
    series: &[SeriesRecord],
    options: &ChartOptions,
) -> std::io::Result<()> {
    write!(writer, "<c:barChart>")?;
    write!(
        writer,
        r#"<c:barDir val="{}"/>"#,
        if chart_type == ChartType::Bar { "bar" } else { "col" }
    )?;
    write!(writer, r#"<c:grouping val="clustered"/>"#)?;
    write!(writer, r#"<c:varyColors val="0"/>"#)?;

    for (index, record) in series.iter().enumerate() {
        write_series_header(writer, index, record)?;
        if let Some(ref color) = record.color {
            write!(writer, "<c:spPr>")?;
            write_solid_fill(writer, color)?;
            write!(writer, "</c:spPr>")?;
        }
        write!(writer, r#"<c:invertIfNegative val="0"/>"#)?;
        write_series_data(writer, record)?;
        write!(writer, "</c:ser>")?;
    }

    write_data_labels(writer, options.show_values, false)?;
    write!(writer, r#"<c:gapWidth val="150"/>"#)?;
    write!(
        writer,
        r#"<c:axId val="{}"/><c:axId val="{}"/>"#,
        PRIMARY_CAT_AXIS, PRIMARY_VAL_AXIS
    )?;
    write!(writer, "</c:barChart>")?;
    Ok(())
}

fn write_line_chart<W: Write>(
    writer: &mut W,
    series: &[SeriesRecord],
    options: &ChartOptions,
    group: AxisGroup,
) -> std::io::Result<()> {
    write!(writer, "<c:lineChart>")?;
    write!(writer, r#"<c:grouping val="standard"/>"#)?;
    write!(writer, r#"<c:varyColors val="0"/>"#)?;

    // idx/order stay global so legend order follows declaration order across groups
    for (index, record) in series.iter().enumerate().filter(|(_, s)| s.axis == group) {
        write_series_header(writer, index, record)?;
        write!(writer, "<c:spPr>")?;
        let width = pt_to_emu_f64(options.line_width_pt.unwrap_or(2.0));
        write!(writer, r#"<a:ln w="{}" cap="rnd">"#, width)?;
        if let Some(ref color) = record.color {
            write_solid_fill(writer, color)?;
        }
        write!(writer, "<a:round/></a:ln>")?;
        write!(writer, "</c:spPr>")?;
        write!(writer, r#"<c:marker><c:symbol val="none"/></c:marker>"#)?;
        write_series_data(writer, record)?;
        write!(writer, r#"<c:smooth val="0"/>"#)?;
        write!(writer, "</c:ser>")?;
    }

    write_data_labels(writer, options.show_values, false)?;
    write!(writer, r#"<c:marker val="1"/>"#)?;
    let (cat, val) = match group {
        AxisGroup::Primary => (PRIMARY_CAT_AXIS, PRIMARY_VAL_AXIS),
        AxisGroup::Secondary => (SECONDARY_CAT_AXIS, SECONDARY_VAL_AXIS),
    };
    write!(writer, r#"<c:axId val="{}"/><c:axId val="{}"/>"#, cat, val)?;
    write!(writer, "</c:lineChart>")?;
    Ok(())
}

fn write_series_header<W: Write>(
    writer: &mut W,
    index: usize,
    record: &SeriesRecord,
) -> std::io::Result<()> {
    write!(writer, "<c:ser>")?;
    write!(writer, r#"<c:idx val="{}"/>"#, index)?;
    write!(writer, r#"<c:order val="{}"/>"#, index)?;
    write!(writer, "<c:tx><c:v>{}</c:v></c:tx>", escape_xml(&record.name))?;
    Ok(())
}

fn write_series_data<W: Write>(writer: &mut W, record: &SeriesRecord) -> std::io::Result<()> {
    write!(writer, "<c:cat>")?;
    write!(writer, "<c:strLit>")?;
    write!(writer, r#"<c:ptCount val="{}"/>"#, record.labels.len())?;
    for (i, label) in record.labels.iter().enumerate() {
        write!(
            writer,
            r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#,
            i,
            escape_xml(label)
        )?;
    }
    write!(writer, "</c:strLit>")?;
    write!(writer, "</c:cat>")?;

    let mut buffer = ryu::Buffer::new();
    write!(writer, "<c:val>")?;
    write!(writer, "<c:numLit>")?;
    write!(writer, r#"<c:formatCode>General</c:formatCode>"#)?;
    write!(writer, r#"<c:ptCount val="{}"/>"#, record.values.len())?;
    for (i, value) in record.values.iter().enumerate() {
        write!(
            writer,
            r#"<c:pt idx="{}"><c:v>{}</c:v></c:pt>"#,
            i,
            buffer.format(*value)
        )?;
    }
    write!(writer, "</c:numLit>")?;
    write!(writer, "</c:val>")?;
    Ok(())
}

fn write_solid_fill<W: Write>(writer: &mut W, color: &str) -> std::io::Result<()> {
    write!(
        writer,
        r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
        escape_xml(color)
    )
}

fn write_data_labels<W: Write>(
    writer: &mut W,
    show_values: bool,
    show_percent: bool,
) -> std::io::Result<()> {
    let flag = |on: bool| if on { "1" } else { "0" };
    write!(writer, "<c:dLbls>")?;
    write!(writer, r#"<c:showLegendKey val="0"/>"#)?;
    write!(writer, r#"<c:showVal val="{}"/>"#, flag(show_values))?;
    write!(writer, r#"<c:showCatName val="0"/>"#)?;
    write!(writer, r#"<c:showSerName val="0"/>"#)?;
    write!(writer, r#"<c:showPercent val="{}"/>"#, flag(show_percent))?;
    write!(writer, r#"<c:showBubbleSize val="0"/>"#)?;
    write!(writer, "</c:dLbls>")?;
    Ok(())
}

fn write_axes<W: Write>(
    writer: &mut W,
    chart_type: ChartType,
    options: &ChartOptions,
    secondary: bool,
) -> std::io::Result<()> {
    // horizontal bars swap which edge each axis sits on
    let (cat_pos, val_pos) = if chart_type == ChartType::Bar {
        ("l", "b")
    } else {
        ("b", "l")
    };

    let primary = options.value_axes.first();
    write_category_axis(
        writer,
        PRIMARY_CAT_AXIS,
        PRIMARY_VAL_AXIS,
        cat_pos,
        options.category_axis_title.as_deref(),
        false,
    )?;
    write_value_axis(writer, PRIMARY_VAL_AXIS, PRIMARY_CAT_AXIS, val_pos, primary, "autoZero")?;

    if secondary {
        write_category_axis(
            writer,
            SECONDARY_CAT_AXIS,
            SECONDARY_VAL_AXIS,
            cat_pos,
            None,
            true,
        )?;
        write_value_axis(
            writer,
            SECONDARY_VAL_AXIS,
            SECONDARY_CAT_AXIS,
            "r",
            options.value_axes.get(1),
            "max",
        )?;
    }

    Ok(())
}

fn write_category_axis<W: Write>(
    writer: &mut W,
    axis_id: u32,
    cross_axis_id: u32,
    position: &str,
    title: Option<&str>,
    deleted: bool,
) -> std::io::Result<()> {
    write!(writer, "<c:catAx>")?;
    write!(writer, r#"<c:axId val="{}"/>"#, axis_id)?;
    write!(writer, r#"<c:scaling><c:orientation val="minMax"/></c:scaling>"#)?;
    write!(
        writer,
        r#"<c:delete val="{}"/>"#,
        if deleted { "1" } else { "0" }
    )?;
    write!(writer, r#"<c:axPos val="{}"/>"#, position)?;
    if let Some(title) = title {
        write_title(writer, title)?;
    }
    write!(writer, r#"<c:majorTickMark val="out"/>"#)?;
    write!(writer, r#"<c:minorTickMark val="none"/>"#)?;
    write!(writer, r#"<c:tickLblPos val="nextTo"/>"#)?;
    write!(writer, r#"<c:crossAx val="{}"/>"#, cross_axis_id)?;
    write!(writer, r#"<c:crosses val="autoZero"/>"#)?;
    write!(writer, r#"<c:auto val="1"/>"#)?;
    write!(writer, r#"<c:lblAlgn val="ctr"/>"#)?;
    write!(writer, r#"<c:lblOffset val="100"/>"#)?;
    write!(writer, r#"<c:noMultiLvlLbl val="0"/>"#)?;
    write!(writer, "</c:catAx>")?;
    Ok(())
}

fn write_value_axis<W: Write>(
    writer: &mut W,
    axis_id: u32,
    cross_axis_id: u32,
    position: &str,
    axis: Option<&ValueAxisOptions>,
    crosses: &str,
) -> std::io::Result<()> {
    write!(writer, "<c:valAx>")?;
    write!(writer, r#"<c:axId val="{}"/>"#, axis_id)?;
    write!(writer, r#"<c:scaling><c:orientation val="minMax"/></c:scaling>"#)?;
    write!(writer, r#"<c:delete val="0"/>"#)?;
    write!(writer, r#"<c:axPos val="{}"/>"#, position)?;
    if axis.is_none_or(|a| a.gridlines) {
        write!(writer, "<c:majorGridlines/>")?;
    }
    if let Some(title) = axis.and_then(|a| a.title.as_deref()) {
        write_title(writer, title)?;
    }
    write!(
        writer,
        r#"<c:numFmt formatCode="General" sourceLinked="0"/>"#
    )?;
    write!(writer, r#"<c:majorTickMark val="out"/>"#)?;
    write!(writer, r#"<c:minorTickMark val="none"/>"#)?;
    write!(writer, r#"<c:tickLblPos val="nextTo"/>"#)?;
    write!(writer, r#"<c:crossAx val="{}"/>"#, cross_axis_id)?;
    write!(writer, r#"<c:crosses val="{}"/>"#, crosses)?;
    write!(writer, r#"<c:crossBetween val="between"/>"#)?;
    write!(writer, "</c:valAx>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::LegendPosition;
    use crate::placeholder::Rect;

    fn record(name: &str, axis: AxisGroup, color: &str) -> SeriesRecord {
        SeriesRecord {
            name: name.into(),
            labels: vec!["1/23".into(), "1/26".into()],
            values: vec![3.72, 4.2],
            axis,
            color: Some(color.into()),
        }
    }

    fn render(chart: &ChartShape) -> String {
        let mut out = Vec::new();
        write_chart(&mut out, chart).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_pie_chart_xml() {
        let mut options = ChartOptions::at(Rect::new(0.0, 0.0, 4.0, 3.0));
        options.point_colors = vec!["00CC96".into(), "E33737".into()];
        options.show_percent = true;
        options.legend = Some(LegendPosition::Bottom);
        let chart = ChartShape {
            chart_number: 1,
            chart_type: ChartType::Pie,
            series: vec![SeriesRecord {
                name: "share".into(),
                labels: vec!["a".into(), "b".into()],
                values: vec![60.0, 40.0],
                axis: AxisGroup::Primary,
                color: None,
            }],
            options,
        };

        let xml = render(&chart);
        assert!(xml.contains("<c:pieChart>"));
        assert_eq!(xml.matches("<c:dPt>").count(), 2);
        assert!(xml.contains(r#"<c:showPercent val="1"/>"#));
        assert!(xml.contains(r#"<c:legendPos val="b"/>"#));
        assert!(xml.contains("<c:v>60.0</c:v>"));
        assert!(!xml.contains("<c:catAx>"));
    }

    #[test]
    fn test_doughnut_hole_size() {
        let mut options = ChartOptions::at(Rect::default());
        options.hole_size = Some(60);
        let chart = ChartShape {
            chart_number: 1,
            chart_type: ChartType::Doughnut,
            series: vec![record("s", AxisGroup::Primary, "4472C4")],
            options,
        };
        let xml = render(&chart);
        assert!(xml.contains("<c:doughnutChart>"));
        assert!(xml.contains(r#"<c:holeSize val="60"/>"#));
    }

    #[test]
    fn test_horizontal_bar_axes() {
        let mut options = ChartOptions::at(Rect::default());
        options.value_axes = vec![ValueAxisOptions {
            title: Some("ratio (%)".into()),
            gridlines: true,
        }];
        let chart = ChartShape {
            chart_number: 2,
            chart_type: ChartType::Bar,
            series: vec![
                record("before", AxisGroup::Primary, "636EFA"),
                record("after", AxisGroup::Primary, "E33737"),
            ],
            options,
        };
        let xml = render(&chart);
        assert!(xml.contains(r#"<c:barDir val="bar"/>"#));
        assert!(xml.contains(r#"<c:catAx><c:axId val="1"/><c:scaling><c:orientation val="minMax"/></c:scaling><c:delete val="0"/><c:axPos val="l"/>"#));
        assert!(xml.contains("ratio (%)"));
        assert!(xml.contains(r#"<a:srgbClr val="E33737"/>"#));
        assert!(xml.contains(r#"<c:autoTitleDeleted val="1"/>"#));
    }

    #[test]
    fn test_dual_axis_line() {
        let mut options = ChartOptions::at(Rect::default());
        options.line_width_pt = Some(3.0);
        options.value_axes = vec![
            ValueAxisOptions {
                title: Some("views".into()),
                gridlines: false,
            },
            ValueAxisOptions {
                title: Some("videos".into()),
                gridlines: false,
            },
        ];
        let chart = ChartShape {
            chart_number: 3,
            chart_type: ChartType::Line,
            series: vec![
                record("views", AxisGroup::Primary, "F1C40F"),
                record("videos", AxisGroup::Secondary, "636EFA"),
            ],
            options,
        };
        let xml = render(&chart);
        assert_eq!(xml.matches("<c:lineChart>").count(), 2);
        assert!(xml.contains(r#"<c:axId val="3"/><c:axId val="4"/></c:lineChart>"#));
        assert!(xml.contains(r#"<c:axPos val="r"/>"#));
        assert!(xml.contains(r#"<c:crosses val="max"/>"#));
        assert!(xml.contains(r#"<a:ln w="38100" cap="rnd">"#));
        assert!(!xml.contains("<c:majorGridlines/>"));
        assert!(xml.contains(r#"<c:idx val="1"/><c:order val="1"/><c:tx><c:v>videos</c:v>"#));
    }

    #[test]
    fn test_single_axis_line_has_one_group() {
        let chart = ChartShape {
            chart_number: 4,
            chart_type: ChartType::Line,
            series: vec![record("negative", AxisGroup::Primary, "E33737")],
            options: ChartOptions::at(Rect::default()),
        };
        let xml = render(&chart);
        assert_eq!(xml.matches("<c:lineChart>").count(), 1);
        assert_eq!(xml.matches("<c:valAx>").count(), 1);
        assert!(xml.contains("<c:majorGridlines/>"));
    }
}
