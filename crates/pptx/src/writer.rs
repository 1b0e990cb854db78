//! PPTX deck writer.
//!
//! Builds a PresentationML package in memory: one cover slide followed by one
//! slide per question/answer record, all in the carousel theme.

use crate::template::{content_type, ns, rel, STATIC_PARTS, STATIC_RELS};
use crate::theme::{Region, BACKGROUND_COLOR, FONT_FACE, SLIDE_SIZE, TEXT_COLOR};
use carousel_core::{DeckRenderer, Error, Outline, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// First slide id; PowerPoint requires ids of at least 256.
const FIRST_SLIDE_ID: usize = 256;

/// Renderer producing `.pptx` bytes from an outline.
pub struct PptxRenderer;

impl PptxRenderer {
    /// Create a new PPTX renderer.
    pub fn new() -> Self {
        Self
    }

    /// Render an outline into a complete `.pptx` package.
    pub fn render_to_vec(&self, outline: &Outline) -> Result<Vec<u8>> {
        let slides = slide_plan(outline);
        log::debug!("Rendering {} slides", slides.len());

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        // Fixed timestamps keep identical outlines byte-identical.
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        let mut add = |path: &str, body: &[u8]| -> Result<()> {
            zip.start_file(path, options)
                .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", path, e)))?;
            zip.write_all(body)
                .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", path, e)))
        };

        add("[Content_Types].xml", content_types_xml(slides.len())?.as_bytes())?;
        add("_rels/.rels", root_rels_xml()?.as_bytes())?;
        add("ppt/presentation.xml", presentation_xml(slides.len())?.as_bytes())?;
        add(
            "ppt/_rels/presentation.xml.rels",
            presentation_rels_xml(slides.len())?.as_bytes(),
        )?;

        for (idx, regions) in slides.iter().enumerate() {
            let number = idx + 1;
            add(
                &format!("ppt/slides/slide{}.xml", number),
                slide_xml(regions)?.as_bytes(),
            )?;
            add(
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                slide_rels_xml()?.as_bytes(),
            )?;
        }

        for part in STATIC_PARTS {
            add(part.path, part.body.as_bytes())?;
        }
        for &(path, body) in STATIC_RELS {
            add(path, body.as_bytes())?;
        }

        let cursor = zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))?;
        Ok(cursor.into_inner())
    }
}

impl Default for PptxRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckRenderer for PptxRenderer {
    fn render(&self, outline: &Outline) -> Result<Vec<u8>> {
        self.render_to_vec(outline)
    }
}

/// The two text regions of each slide, in deck order.
fn slide_plan(outline: &Outline) -> Vec<[(Region, &str); 2]> {
    let cover = outline.cover();
    std::iter::once([
        (Region::Title, cover.title()),
        (Region::Subtitle, cover.subtitle()),
    ])
    .chain(
        outline
            .qa_slides()
            .iter()
            .map(|qa| [(Region::Question, qa.question()), (Region::Answer, qa.answer())]),
    )
    .collect()
}

/// Split text into the lines of one paragraph.
///
/// Characters XML 1.0 cannot carry are dropped and any line ending becomes a
/// line break.
fn text_lines(text: &str) -> Vec<String> {
    let cleaned: String = text
        .replace("\r\n", "\n")
        .chars()
        .map(|c| if c == '\r' { '\n' } else { c })
        .filter(|&c| c == '\t' || c == '\n' || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}'))
        .collect();
    cleaned.split('\n').map(str::to_string).collect()
}

/// Thin wrapper over the quick-xml writer for building one part.
struct XmlPart {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl XmlPart {
    fn new() -> Result<Self> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
            .map_err(|e| Error::XmlError(format!("Failed to write XML declaration: {}", e)))?;
        Ok(Self { writer })
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut elem = BytesStart::new(name);
        elem.extend_attributes(attrs.iter().copied());
        self.writer
            .write_event(Event::Start(elem))
            .map_err(|e| Error::XmlError(format!("Failed to open <{}>: {}", name, e)))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut elem = BytesStart::new(name);
        elem.extend_attributes(attrs.iter().copied());
        self.writer
            .write_event(Event::Empty(elem))
            .map_err(|e| Error::XmlError(format!("Failed to write <{}/>: {}", name, e)))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(|e| Error::XmlError(format!("Failed to close <{}>: {}", name, e)))
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(|e| Error::XmlError(format!("Failed to write text: {}", e)))
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner().into_inner())
            .map_err(|e| Error::XmlError(format!("Generated XML is not UTF-8: {}", e)))
    }
}

fn relationships_xml(rels: &[(String, &str, String)]) -> Result<String> {
    let mut xml = XmlPart::new()?;
    xml.start("Relationships", &[("xmlns", ns::RELATIONSHIPS)])?;
    for (id, rel_type, target) in rels {
        xml.empty(
            "Relationship",
            &[("Id", id.as_str()), ("Type", *rel_type), ("Target", target.as_str())],
        )?;
    }
    xml.end("Relationships")?;
    xml.finish()
}

fn content_types_xml(slide_count: usize) -> Result<String> {
    let mut xml = XmlPart::new()?;
    xml.start("Types", &[("xmlns", ns::CONTENT_TYPES)])?;
    xml.empty(
        "Default",
        &[("Extension", "rels"), ("ContentType", content_type::RELATIONSHIPS)],
    )?;
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", content_type::XML)])?;
    xml.empty(
        "Override",
        &[
            ("PartName", "/ppt/presentation.xml"),
            ("ContentType", content_type::PRESENTATION),
        ],
    )?;
    for number in 1..=slide_count {
        let part_name = format!("/ppt/slides/slide{}.xml", number);
        xml.empty(
            "Override",
            &[("PartName", part_name.as_str()), ("ContentType", content_type::SLIDE)],
        )?;
    }
    for part in STATIC_PARTS {
        let part_name = format!("/{}", part.path);
        xml.empty(
            "Override",
            &[("PartName", part_name.as_str()), ("ContentType", part.content_type)],
        )?;
    }
    xml.end("Types")?;
    xml.finish()
}

fn root_rels_xml() -> Result<String> {
    relationships_xml(&[
        ("rId1".to_string(), rel::OFFICE_DOCUMENT, "ppt/presentation.xml".to_string()),
        ("rId2".to_string(), rel::CORE_PROPERTIES, "docProps/core.xml".to_string()),
        ("rId3".to_string(), rel::EXTENDED_PROPERTIES, "docProps/app.xml".to_string()),
    ])
}

/// Relationship id of the slide at `index` (0-based) in `presentation.xml.rels`.
fn slide_rel_id(index: usize) -> String {
    format!("rId{}", index + 2)
}

fn presentation_rels_xml(slide_count: usize) -> Result<String> {
    let mut rels = vec![(
        "rId1".to_string(),
        rel::SLIDE_MASTER,
        "slideMasters/slideMaster1.xml".to_string(),
    )];
    for index in 0..slide_count {
        rels.push((
            slide_rel_id(index),
            rel::SLIDE,
            format!("slides/slide{}.xml", index + 1),
        ));
    }
    let trailing = [
        (rel::PRES_PROPS, "presProps.xml"),
        (rel::VIEW_PROPS, "viewProps.xml"),
        (rel::THEME, "theme/theme1.xml"),
        (rel::TABLE_STYLES, "tableStyles.xml"),
    ];
    for (offset, (rel_type, target)) in trailing.into_iter().enumerate() {
        rels.push((
            format!("rId{}", slide_count + 2 + offset),
            rel_type,
            target.to_string(),
        ));
    }
    relationships_xml(&rels)
}

fn presentation_xml(slide_count: usize) -> Result<String> {
    let size = SLIDE_SIZE.to_string();
    let mut xml = XmlPart::new()?;
    xml.start(
        "p:presentation",
        &[
            ("xmlns:a", ns::A),
            ("xmlns:r", ns::R),
            ("xmlns:p", ns::P),
            ("saveSubsetFonts", "1"),
        ],
    )?;

    xml.start("p:sldMasterIdLst", &[])?;
    xml.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
    xml.end("p:sldMasterIdLst")?;

    xml.start("p:sldIdLst", &[])?;
    for index in 0..slide_count {
        let id = (FIRST_SLIDE_ID + index).to_string();
        let rel_id = slide_rel_id(index);
        xml.empty("p:sldId", &[("id", id.as_str()), ("r:id", rel_id.as_str())])?;
    }
    xml.end("p:sldIdLst")?;

    xml.empty("p:sldSz", &[("cx", size.as_str()), ("cy", size.as_str())])?;
    xml.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
    xml.end("p:presentation")?;
    xml.finish()
}

fn slide_rels_xml() -> Result<String> {
    relationships_xml(&[(
        "rId1".to_string(),
        rel::SLIDE_LAYOUT,
        "../slideLayouts/slideLayout1.xml".to_string(),
    )])
}

fn slide_xml(regions: &[(Region, &str)]) -> Result<String> {
    let mut xml = XmlPart::new()?;
    xml.start(
        "p:sld",
        &[("xmlns:a", ns::A), ("xmlns:r", ns::R), ("xmlns:p", ns::P)],
    )?;
    xml.start("p:cSld", &[])?;

    xml.start("p:bg", &[])?;
    xml.start("p:bgPr", &[])?;
    write_solid_fill(&mut xml, BACKGROUND_COLOR)?;
    xml.empty("a:effectLst", &[])?;
    xml.end("p:bgPr")?;
    xml.end("p:bg")?;

    xml.start("p:spTree", &[])?;
    xml.start("p:nvGrpSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml.empty("p:cNvGrpSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvGrpSpPr")?;
    xml.start("p:grpSpPr", &[])?;
    xml.start("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    xml.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    xml.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    xml.end("a:xfrm")?;
    xml.end("p:grpSpPr")?;

    for (idx, (region, text)) in regions.iter().enumerate() {
        // id 1 belongs to the group shape.
        write_text_shape(&mut xml, idx as u32 + 2, *region, text)?;
    }

    xml.end("p:spTree")?;
    xml.end("p:cSld")?;
    xml.start("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.end("p:clrMapOvr")?;
    xml.end("p:sld")?;
    xml.finish()
}

fn write_solid_fill(xml: &mut XmlPart, color: &str) -> Result<()> {
    xml.start("a:solidFill", &[])?;
    xml.empty("a:srgbClr", &[("val", color)])?;
    xml.end("a:solidFill")
}

fn write_text_shape(xml: &mut XmlPart, shape_id: u32, region: Region, text: &str) -> Result<()> {
    let frame = region.frame();
    let id = shape_id.to_string();
    let name = format!("{} {}", region.shape_name(), shape_id - 1);
    let (x, y) = (frame.x.to_string(), frame.y.to_string());
    let (cx, cy) = (frame.cx.to_string(), frame.cy.to_string());

    xml.start("p:sp", &[])?;

    xml.start("p:nvSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", id.as_str()), ("name", name.as_str())])?;
    xml.empty("p:cNvSpPr", &[("txBox", "1")])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvSpPr")?;

    xml.start("p:spPr", &[])?;
    xml.start("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
    xml.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    xml.end("a:xfrm")?;
    xml.start("a:prstGeom", &[("prst", "rect")])?;
    xml.empty("a:avLst", &[])?;
    xml.end("a:prstGeom")?;
    xml.empty("a:noFill", &[])?;
    xml.end("p:spPr")?;

    xml.start("p:txBody", &[])?;
    xml.start(
        "a:bodyPr",
        &[
            ("wrap", "square"),
            ("lIns", "0"),
            ("tIns", "0"),
            ("rIns", "0"),
            ("bIns", "0"),
            ("anchor", "t"),
            ("rtlCol", "0"),
        ],
    )?;
    xml.empty("a:noAutofit", &[])?;
    xml.end("a:bodyPr")?;
    xml.empty("a:lstStyle", &[])?;

    xml.start("a:p", &[])?;
    xml.empty("a:pPr", &[("algn", "l")])?;
    for (idx, line) in text_lines(text).iter().enumerate() {
        if idx > 0 {
            xml.start("a:br", &[])?;
            write_run_props(xml, "a:rPr", region)?;
            xml.end("a:br")?;
        }
        if !line.is_empty() {
            xml.start("a:r", &[])?;
            write_run_props(xml, "a:rPr", region)?;
            xml.start("a:t", &[])?;
            xml.text(line)?;
            xml.end("a:t")?;
            xml.end("a:r")?;
        }
    }
    write_run_props(xml, "a:endParaRPr", region)?;
    xml.end("a:p")?;
    xml.end("p:txBody")?;

    xml.end("p:sp")
}

fn write_run_props(xml: &mut XmlPart, tag: &str, region: Region) -> Result<()> {
    let size = region.font_size().to_string();
    let bold = if region.bold() { "1" } else { "0" };
    xml.start(
        tag,
        &[("lang", "en-US"), ("sz", size.as_str()), ("b", bold), ("dirty", "0")],
    )?;
    write_solid_fill(xml, TEXT_COLOR)?;
    xml.empty("a:latin", &[("typeface", FONT_FACE)])?;
    xml.end(tag)
}
