//! Package assembly for generated presentations.
//!
//! Lays out every part of the presentation, writes the ZIP archive in memory
//! and moves it onto the target path in one step.

use crate::common::xml::escape_xml;
use crate::document::error::Result;
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

use super::chart::write_chart;
use super::constants::{content_type as ct, namespace, relationship_type as rt};
use super::pres::PptxDocument;
use super::template;

const PRESENTATION_PART: &str = "/ppt/presentation.xml";
const SLIDE_MASTER_PART: &str = "/ppt/slideMasters/slideMaster1.xml";
const SLIDE_LAYOUT_PART: &str = "/ppt/slideLayouts/slideLayout1.xml";
const THEME_PART: &str = "/ppt/theme/theme1.xml";
const CORE_PART: &str = "/docProps/core.xml";
const APP_PART: &str = "/docProps/app.xml";

/// Relationships of one part, numbered in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Relationships {
    rels: Vec<(String, &'static str, String)>,
}

impl Relationships {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its ID.
    pub(crate) fn add(&mut self, reltype: &'static str, target: impl Into<String>) -> String {
        let r_id = format!("rId{}", self.rels.len() + 1);
        self.rels.push((r_id.clone(), reltype, target.into()));
        r_id
    }

    pub(crate) fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Relationships xmlns="{}">"#, namespace::RELATIONSHIPS));
        for (r_id, reltype, target) in &self.rels {
            xml.push_str(&format!(
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                r_id,
                reltype,
                escape_xml(target)
            ));
        }
        xml.push_str("</Relationships>");
        xml
    }
}

/// Builder for `[Content_Types].xml`.
#[derive(Debug)]
struct ContentTypes {
    defaults: BTreeMap<&'static str, &'static str>,
    overrides: BTreeMap<String, &'static str>,
}

impl ContentTypes {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels", ct::OPC_RELATIONSHIPS);
        defaults.insert("xml", ct::XML);
        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn add_override(&mut self, partname: impl Into<String>, content_type: &'static str) {
        self.overrides.insert(partname.into(), content_type);
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(&format!(r#"<Types xmlns="{}">"#, namespace::CONTENT_TYPES));
        for (ext, content_type) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                ext, content_type
            ));
        }
        for (partname, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                content_type
            ));
        }
        xml.push_str("</Types>");
        xml
    }
}

/// ZIP entry name for a part name (`/ppt/x.xml` -> `ppt/x.xml`).
#[inline]
fn entry_name(partname: &str) -> &str {
    partname.trim_start_matches('/')
}

/// Relationship part name for a part (`/ppt/slides/slide1.xml` -> `ppt/slides/_rels/slide1.xml.rels`).
fn rels_entry_name(partname: &str) -> String {
    let name = entry_name(partname);
    match name.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", name),
    }
}

struct PackageBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    content_types: ContentTypes,
}

impl PackageBuilder {
    fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated),
            content_types: ContentTypes::new(),
        }
    }

    fn write_entry(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(data)?;
        Ok(())
    }

    fn add_part(
        &mut self,
        partname: &str,
        content_type: &'static str,
        data: &[u8],
        rels: Option<&Relationships>,
    ) -> Result<()> {
        self.content_types.add_override(partname, content_type);
        self.write_entry(entry_name(partname), data)?;
        if let Some(rels) = rels {
            self.write_entry(&rels_entry_name(partname), rels.to_xml().as_bytes())?;
        }
        Ok(())
    }

    fn finish(mut self, package_rels: &Relationships) -> Result<Vec<u8>> {
        let content_types = self.content_types.to_xml();
        self.write_entry("[Content_Types].xml", content_types.as_bytes())?;
        self.write_entry("_rels/.rels", package_rels.to_xml().as_bytes())?;
        let cursor = self.zip.finish()?;
        Ok(cursor.into_inner())
    }
}

/// Serialize a presentation to the bytes of a `.pptx` file.
pub(crate) fn to_bytes(document: &PptxDocument) -> Result<Vec<u8>> {
    let mut builder = PackageBuilder::new();

    let mut package_rels = Relationships::new();
    package_rels.add(rt::OFFICE_DOCUMENT, entry_name(PRESENTATION_PART));
    package_rels.add(rt::CORE_PROPERTIES, entry_name(CORE_PART));
    package_rels.add(rt::EXTENDED_PROPERTIES, entry_name(APP_PART));

    let mut presentation_rels = Relationships::new();
    presentation_rels.add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
    presentation_rels.add(rt::THEME, "theme/theme1.xml");

    let mut slide_rel_ids = Vec::with_capacity(document.slide_count());
    for (index, slide) in document.slides().enumerate() {
        let slide_number = index + 1;
        slide_rel_ids.push(
            presentation_rels.add(rt::SLIDE, format!("slides/slide{}.xml", slide_number)),
        );

        let mut slide_rels = Relationships::new();
        slide_rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");

        let mut chart_rel_ids = Vec::new();
        for chart in slide.charts() {
            chart_rel_ids.push(slide_rels.add(
                rt::CHART,
                format!("../charts/chart{}.xml", chart.chart_number),
            ));

            let mut chart_xml = Vec::with_capacity(4096);
            write_chart(&mut chart_xml, chart)?;
            builder.add_part(&chart.partname(), ct::DML_CHART, &chart_xml, None)?;
        }

        let slide_xml = slide.to_xml(&chart_rel_ids)?;
        builder.add_part(
            &format!("/ppt/slides/slide{}.xml", slide_number),
            ct::PML_SLIDE,
            slide_xml.as_bytes(),
            Some(&slide_rels),
        )?;
    }

    let presentation_xml = document.presentation_xml(&slide_rel_ids)?;
    builder.add_part(
        PRESENTATION_PART,
        ct::PML_PRESENTATION_MAIN,
        presentation_xml.as_bytes(),
        Some(&presentation_rels),
    )?;

    let mut master_rels = Relationships::new();
    master_rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
    master_rels.add(rt::THEME, "../theme/theme1.xml");
    builder.add_part(
        SLIDE_MASTER_PART,
        ct::PML_SLIDE_MASTER,
        template::default_slide_master_xml().as_bytes(),
        Some(&master_rels),
    )?;

    let mut layout_rels = Relationships::new();
    layout_rels.add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
    builder.add_part(
        SLIDE_LAYOUT_PART,
        ct::PML_SLIDE_LAYOUT,
        template::blank_slide_layout_xml().as_bytes(),
        Some(&layout_rels),
    )?;

    builder.add_part(
        THEME_PART,
        ct::OFC_THEME,
        template::default_theme_xml().as_bytes(),
        None,
    )?;

    builder.add_part(
        CORE_PART,
        ct::OPC_CORE_PROPERTIES,
        core_properties_xml(document).as_bytes(),
        None,
    )?;
    builder.add_part(
        APP_PART,
        ct::OFC_EXTENDED_PROPERTIES,
        app_properties_xml(document).as_bytes(),
        None,
    )?;

    builder.finish(&package_rels)
}

fn core_properties_xml(document: &PptxDocument) -> String {
    let metadata = document.metadata();
    let now = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    let mut xml = String::with_capacity(1024);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
    xml.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(&metadata.title)));
    if let Some(ref subject) = metadata.subject {
        xml.push_str(&format!("<dc:subject>{}</dc:subject>", escape_xml(subject)));
    }
    if let Some(ref author) = metadata.author {
        xml.push_str(&format!("<dc:creator>{}</dc:creator>", escape_xml(author)));
    }
    xml.push_str(&format!(
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
        now
    ));
    xml.push_str(&format!(
        r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
        now
    ));
    xml.push_str("</cp:coreProperties>");
    xml
}

fn app_properties_xml(document: &PptxDocument) -> String {
    let mut xml = String::with_capacity(512);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push('\n');
    xml.push_str(r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#);
    xml.push_str(&format!(
        "<Application>{} {}</Application>",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    ));
    xml.push_str(&format!("<Slides>{}</Slides>", document.slide_count()));
    xml.push_str("</Properties>");
    xml
}

/// Write `bytes` to `path` through a sibling temporary file.
///
/// The temporary file is renamed onto `path` only after every byte has been
/// written and synced; on error it is removed and `path` is untouched.
pub(crate) fn persist_atomically(bytes: &[u8], path: &Path) -> Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut file = tempfile::NamedTempFile::new_in(parent)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_ids_are_sequential() {
        let mut rels = Relationships::new();
        assert_eq!(rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"), "rId1");
        assert_eq!(rels.add(rt::CHART, "../charts/chart1.xml"), "rId2");
        let xml = rels.to_xml();
        assert!(xml.contains(r#"Id="rId2""#));
        assert!(xml.contains(r#"Target="../charts/chart1.xml""#));
    }

    #[test]
    fn test_rels_entry_name() {
        assert_eq!(
            rels_entry_name("/ppt/slides/slide3.xml"),
            "ppt/slides/_rels/slide3.xml.rels"
        );
        assert_eq!(
            rels_entry_name("/ppt/presentation.xml"),
            "ppt/_rels/presentation.xml.rels"
        );
    }

    #[test]
    fn test_content_types_xml() {
        let mut types = ContentTypes::new();
        types.add_override("/ppt/charts/chart1.xml", ct::DML_CHART);
        let xml = types.to_xml();
        assert!(xml.contains(r#"<Default Extension="rels""#));
        assert!(xml.contains(&format!(
            r#"<Override PartName="/ppt/charts/chart1.xml" ContentType="{}"/>"#,
            ct::DML_CHART
        )));
    }

    #[test]
    fn test_persist_atomically_replaces_target() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pptx");
        std::fs::write(&path, b"old").unwrap();
        persist_atomically(b"new", &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"new");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
