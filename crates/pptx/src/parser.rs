//! PPTX deck reader.
//!
//! Reads a `.pptx` back into slides of positioned, styled text regions.

use carousel_core::{DeckSummary, Error, Result, SlideSummary, TextRegion, TextStyle};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Reader for PPTX (Office Open XML) decks.
pub struct DeckReader;

impl DeckReader {
    /// Create a new deck reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a deck from a reader.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<DeckSummary> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let presentation = self.read_file_from_archive(&mut archive, "ppt/presentation.xml")?;
        let (width, height, slide_rel_ids) = parse_presentation(&presentation)?;
        let mut deck = DeckSummary::new(width, height);

        let slide_order = self.get_slide_order(&mut archive, &slide_rel_ids)?;

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let slide = self.parse_slide(&mut archive, slide_path, idx + 1)?;
            deck.add_slide(slide);
        }

        log::debug!("Read deck with {} slides", deck.slides.len());
        Ok(deck)
    }

    /// Get the ordered list of slide paths.
    ///
    /// Follows `p:sldIdLst` when present, otherwise falls back to the numeric
    /// suffix of the relationship id or target.
    fn get_slide_order<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_rel_ids: &[String],
    ) -> Result<Vec<String>> {
        let rels_path = "ppt/_rels/presentation.xml.rels";
        let rels_content = self.read_file_from_archive(archive, rels_path)?;

        let mut targets: HashMap<String, String> = HashMap::new();
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let rel_type = attr_value(e, b"Type").unwrap_or_default();
                    let target = attr_value(e, b"Target").unwrap_or_default();
                    let id = attr_value(e, b"Id").unwrap_or_default();

                    if rel_type.ends_with("/slide") {
                        let full_path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        let order_num =
                            extract_slide_number(&id).or_else(|| extract_slide_number(&target));
                        targets.insert(id, full_path.clone());
                        slides.push((full_path, order_num));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        if !slide_rel_ids.is_empty() {
            return slide_rel_ids
                .iter()
                .map(|id| {
                    targets.get(id).cloned().ok_or_else(|| {
                        Error::DeckParse(format!("Slide relationship '{}' has no target", id))
                    })
                })
                .collect();
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Parse a single slide from the archive.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<SlideSummary> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let mut slide = SlideSummary::new(slide_number);

        let (background, regions) = extract_regions_from_xml(&content)?;
        slide.background = background;
        slide.regions = regions;
        slide.sort_by_position();

        Ok(slide)
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for DeckReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Read the slide size and ordered slide relationship ids from `presentation.xml`.
fn parse_presentation(xml: &str) -> Result<(i64, i64, Vec<String>)> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut size = None;
    let mut rel_ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                match local_name(e.name().as_ref()) {
                    b"sldSz" => {
                        let cx = attr_value(e, b"cx").and_then(|v| v.parse().ok());
                        let cy = attr_value(e, b"cy").and_then(|v| v.parse().ok());
                        if let (Some(cx), Some(cy)) = (cx, cy) {
                            size = Some((cx, cy));
                        }
                    }
                    b"sldId" => {
                        if let Some(id) = attr_value(e, b"r:id") {
                            rel_ids.push(id);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation.xml: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    let (cx, cy) =
        size.ok_or_else(|| Error::DeckParse("presentation.xml has no slide size".to_string()))?;
    Ok((cx, cy, rel_ids))
}

/// Shape being assembled while walking slide XML.
#[derive(Debug, Default)]
struct ShapeInfo {
    paragraphs: Vec<String>,
    x: i64,
    y: i64,
    style: TextStyle,
    /// Run properties seen so far; only the first run styles the region.
    styled: bool,
}

/// Extract the background colour and text regions from slide XML.
fn extract_regions_from_xml(xml_content: &str) -> Result<(Option<String>, Vec<TextRegion>)> {
    let mut regions = Vec::new();
    let mut background = None;
    let mut reader = Reader::from_str(xml_content);
    // Text inside a:t keeps its surrounding whitespace.
    reader.trim_text(false);

    let mut current_shape: Option<ShapeInfo> = None;
    let mut in_background = false;
    let mut in_run = false;
    let mut in_run_props = false;
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"bg" => in_background = true,
                    b"sp" => current_shape = Some(ShapeInfo::default()),
                    b"p" => {
                        if let Some(ref mut shape) = current_shape {
                            shape.paragraphs.push(String::new());
                        }
                    }
                    b"r" => in_run = true,
                    b"rPr" if in_run => {
                        if let Some(ref mut shape) = current_shape {
                            if !shape.styled {
                                read_run_props(e, &mut shape.style);
                                in_run_props = true;
                            }
                        }
                    }
                    b"t" if in_run => in_text = true,
                    other => {
                        apply_shape_attrs(other, e, current_shape.as_mut());
                    }
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"srgbClr" if in_background => {
                        background = attr_value(e, b"val");
                    }
                    b"srgbClr" if in_run_props => {
                        if let Some(ref mut shape) = current_shape {
                            shape.style.color = attr_value(e, b"val");
                        }
                    }
                    b"latin" if in_run_props => {
                        if let Some(ref mut shape) = current_shape {
                            shape.style.font = attr_value(e, b"typeface");
                        }
                    }
                    b"rPr" if in_run => {
                        if let Some(ref mut shape) = current_shape {
                            if !shape.styled {
                                read_run_props(e, &mut shape.style);
                                shape.styled = true;
                            }
                        }
                    }
                    b"br" => {
                        if let Some(ref mut shape) = current_shape {
                            if let Some(para) = shape.paragraphs.last_mut() {
                                para.push('\n');
                            }
                        }
                    }
                    other => {
                        apply_shape_attrs(other, e, current_shape.as_mut());
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_text {
                    if let Some(ref mut shape) = current_shape {
                        let text = e
                            .unescape()
                            .map_err(|err| Error::XmlError(format!("Bad text content: {}", err)))?;
                        if let Some(para) = shape.paragraphs.last_mut() {
                            para.push_str(&text);
                        }
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"bg" => in_background = false,
                    b"br" => {
                        // <a:br> with child run properties.
                        if let Some(ref mut shape) = current_shape {
                            if let Some(para) = shape.paragraphs.last_mut() {
                                para.push('\n');
                            }
                        }
                    }
                    b"r" => in_run = false,
                    b"rPr" if in_run_props => {
                        in_run_props = false;
                        if let Some(ref mut shape) = current_shape {
                            shape.styled = true;
                        }
                    }
                    b"t" => in_text = false,
                    b"sp" => {
                        if let Some(shape) = current_shape.take() {
                            let text = shape.paragraphs.join("\n");
                            if !text.is_empty() {
                                regions.push(TextRegion {
                                    text,
                                    x: shape.x,
                                    y: shape.y,
                                    style: shape.style,
                                });
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!("Error parsing slide: {}", e)));
            }
            _ => {}
        }
    }

    Ok((background, regions))
}

/// Record position, paragraph and body attributes on the current shape.
fn apply_shape_attrs(local: &[u8], e: &BytesStart, shape: Option<&mut ShapeInfo>) {
    let Some(shape) = shape else {
        return;
    };
    match local {
        b"off" => {
            if let Some(x) = attr_value(e, b"x").and_then(|v| v.parse().ok()) {
                shape.x = x;
            }
            if let Some(y) = attr_value(e, b"y").and_then(|v| v.parse().ok()) {
                shape.y = y;
            }
        }
        b"pPr" => {
            if shape.style.align.is_none() {
                shape.style.align = attr_value(e, b"algn");
            }
        }
        b"bodyPr" => {
            shape.style.anchor = attr_value(e, b"anchor");
            for (slot, key) in [b"lIns", b"tIns", b"rIns", b"bIns"].iter().enumerate() {
                shape.style.insets[slot] = attr_value(e, *key).and_then(|v| v.parse().ok());
            }
        }
        _ => {}
    }
}

fn read_run_props(e: &BytesStart, style: &mut TextStyle) {
    style.size = attr_value(e, b"sz").and_then(|v| v.parse().ok());
    style.bold = matches!(attr_value(e, b"b").as_deref(), Some("1") | Some("true"));
}

/// Get an attribute value by its full (possibly prefixed) name.
fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
