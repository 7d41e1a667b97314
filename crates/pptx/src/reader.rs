//! PPTX reader for decks produced by [`crate::PptxWriter`].
//!
//! Reads slides back into the deck model so a saved file can be checked
//! against what was built.

use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

use deck_core::{
    Alignment, DeckMetadata, Emu, Error, Font, Frame, Paragraph, Result, RgbColor, Slide,
    SlideLayout, TextBox, TextBoxRole,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::template;

/// Everything recovered from a saved deck.
#[derive(Debug, Clone)]
pub struct DeckOutline {
    pub metadata: DeckMetadata,
    pub width: Emu,
    pub height: Emu,
    pub slides: Vec<Slide>,
}

/// Reader for PPTX (Office Open XML) files.
pub struct PptxReader;

impl PptxReader {
    /// Create a new PPTX reader.
    pub fn new() -> Self {
        Self
    }

    /// Open and read a PPTX file from disk.
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<DeckOutline> {
        let file = std::fs::File::open(path)?;
        self.read(std::io::BufReader::new(file))
    }

    /// Read a PPTX package from a reader.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<DeckOutline> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let presentation = read_file_from_archive(&mut archive, template::PRESENTATION_PART)?;
        let (slide_rel_ids, width, height) = parse_presentation(&presentation)?;

        let rels = read_file_from_archive(&mut archive, template::PRESENTATION_RELS_PART)?;
        let targets = parse_relationships(&rels)?;

        let mut slides = Vec::with_capacity(slide_rel_ids.len());
        for rel_id in &slide_rel_ids {
            let target = targets.get(rel_id).ok_or_else(|| {
                Error::InvalidPackage(format!("Slide relationship '{}' has no target", rel_id))
            })?;
            let path = resolve_target(target);
            let xml = read_file_from_archive(&mut archive, &path)?;
            slides.push(parse_slide(&xml)?);
            log::debug!("Read slide {} from {}", slides.len(), path);
        }

        let metadata = match read_file_from_archive(&mut archive, "docProps/core.xml") {
            Ok(core) => parse_core_properties(&core)?,
            Err(Error::MissingPart(_)) => DeckMetadata::default(),
            Err(e) => return Err(e),
        };

        Ok(DeckOutline {
            metadata,
            width,
            height,
            slides,
        })
    }
}

impl Default for PptxReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Read a file from the ZIP archive.
fn read_file_from_archive<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
) -> Result<String> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| Error::MissingPart(format!("'{}': {}", path, e)))?;

    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

    Ok(content)
}

/// Slide relationship ids in presentation order plus the slide size.
fn parse_presentation(xml: &str) -> Result<(Vec<String>, Emu, Emu)> {
    let mut reader = Reader::from_str(xml);
    let mut rel_ids = Vec::new();
    let mut size = None;

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sldId" => {
                    if let Some(id) = attr(e, b"r:id") {
                        rel_ids.push(id);
                    }
                }
                b"sldSz" => {
                    size = Some((parse_emu(attr(e, b"cx")), parse_emu(attr(e, b"cy"))));
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing presentation: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    let (width, height) =
        size.ok_or_else(|| Error::InvalidPackage("Presentation has no slide size".to_string()))?;
    Ok((rel_ids, width, height))
}

/// Map of relationship id to target.
fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                if let (Some(id), Some(target)) = (attr(e, b"Id"), attr(e, b"Target")) {
                    targets.insert(id, target);
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

    Ok(targets)
}

/// Resolve a relationship target relative to `ppt/`.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

fn parse_core_properties(xml: &str) -> Result<DeckMetadata> {
    let mut reader = Reader::from_str(xml);
    let mut metadata = DeckMetadata::default();
    let mut current: Option<Vec<u8>> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => current = Some(e.name().as_ref().to_vec()),
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| Error::XmlError(e.to_string()))?
                    .into_owned();
                match current.as_deref() {
                    Some(b"dc:title") => metadata.title = text,
                    Some(b"dc:subject") => metadata.subject = text,
                    Some(b"dc:creator") => metadata.author = text,
                    _ => {}
                }
            }
            Ok(Event::End(_)) => current = None,
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing core properties: {}",
                    e
                )));
            }
            _ => {}
        }
    }

    Ok(metadata)
}

/// Paragraph being assembled while walking `a:p`.
#[derive(Debug, Default)]
struct ParagraphState {
    text: String,
    size_pt: u16,
    bold: bool,
    color: Option<RgbColor>,
    space_before_pt: Option<u16>,
    alignment: Alignment,
}

impl ParagraphState {
    fn finish(self) -> Paragraph {
        Paragraph {
            text: self.text,
            font: Font {
                size_pt: self.size_pt,
                bold: self.bold,
                color: self.color,
            },
            space_before_pt: self.space_before_pt,
            alignment: self.alignment,
        }
    }
}

/// Text box being assembled while walking `p:sp`.
#[derive(Debug)]
struct ShapeState {
    role: Option<TextBoxRole>,
    frame: Frame,
    word_wrap: bool,
    paragraphs: Vec<Paragraph>,
}

impl Default for ShapeState {
    fn default() -> Self {
        Self {
            role: None,
            frame: Frame::inches(0.0, 0.0, 0.0, 0.0),
            word_wrap: false,
            paragraphs: Vec::new(),
        }
    }
}

/// Parse a slide part into the deck model.
fn parse_slide(xml: &str) -> Result<Slide> {
    let mut reader = Reader::from_str(xml);

    let mut layout = None;
    let mut boxes = Vec::new();
    let mut shape: Option<ShapeState> = None;
    let mut paragraph: Option<ParagraphState> = None;
    let mut in_text = false;
    let mut in_run_props = false;
    let mut in_space_before = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::XmlError(format!("Error parsing slide: {}", e)))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                match local_name(e.name().as_ref()) {
                    b"cSld" => layout = attr(e, b"name").as_deref().and_then(SlideLayout::from_name),
                    b"sp" if !is_empty => shape = Some(ShapeState::default()),
                    b"cNvPr" => {
                        if let Some(ref mut shape) = shape {
                            shape.role = attr(e, b"name").as_deref().and_then(TextBoxRole::from_name);
                        }
                    }
                    b"off" => {
                        if let Some(ref mut shape) = shape {
                            shape.frame.x = parse_emu(attr(e, b"x"));
                            shape.frame.y = parse_emu(attr(e, b"y"));
                        }
                    }
                    b"ext" => {
                        if let Some(ref mut shape) = shape {
                            shape.frame.width = parse_emu(attr(e, b"cx"));
                            shape.frame.height = parse_emu(attr(e, b"cy"));
                        }
                    }
                    b"bodyPr" => {
                        if let Some(ref mut shape) = shape {
                            shape.word_wrap = attr(e, b"wrap").as_deref() != Some("none");
                        }
                    }
                    // An empty `<a:p/>` only satisfies the schema; it is not content.
                    b"p" if !is_empty && shape.is_some() => {
                        paragraph = Some(ParagraphState::default());
                    }
                    b"pPr" => {
                        if let Some(ref mut paragraph) = paragraph {
                            if attr(e, b"algn").as_deref() == Some("ctr") {
                                paragraph.alignment = Alignment::Center;
                            }
                        }
                    }
                    b"spcBef" if !is_empty => in_space_before = true,
                    b"spcPts" if in_space_before => {
                        if let Some(ref mut paragraph) = paragraph {
                            paragraph.space_before_pt =
                                hundredths(attr(e, b"val")).map(|points| points as u16);
                        }
                    }
                    b"rPr" | b"endParaRPr" => {
                        if let Some(ref mut paragraph) = paragraph {
                            if let Some(size) = hundredths(attr(e, b"sz")) {
                                paragraph.size_pt = size as u16;
                            }
                            paragraph.bold = matches!(attr(e, b"b").as_deref(), Some("1" | "true"));
                        }
                        in_run_props = !is_empty;
                    }
                    b"srgbClr" if in_run_props => {
                        if let Some(ref mut paragraph) = paragraph {
                            paragraph.color = attr(e, b"val").as_deref().and_then(RgbColor::from_hex);
                        }
                    }
                    b"br" => {
                        if let Some(ref mut paragraph) = paragraph {
                            paragraph.text.push('\n');
                        }
                    }
                    b"t" if !is_empty => in_text = true,
                    _ => {}
                }
            }
            Event::Text(ref e) if in_text => {
                let text = e.unescape().map_err(|e| Error::XmlError(e.to_string()))?;
                if let Some(ref mut paragraph) = paragraph {
                    paragraph.text.push_str(&text);
                }
            }
            Event::End(ref e) => match local_name(e.name().as_ref()) {
                b"t" => in_text = false,
                b"rPr" | b"endParaRPr" => in_run_props = false,
                b"spcBef" => in_space_before = false,
                b"p" => {
                    if let (Some(finished), Some(shape)) = (paragraph.take(), shape.as_mut()) {
                        shape.paragraphs.push(finished.finish());
                    }
                }
                b"sp" => {
                    if let Some(finished) = shape.take() {
                        match finished.role {
                            Some(role) => boxes.push(TextBox {
                                role,
                                frame: finished.frame,
                                word_wrap: finished.word_wrap,
                                paragraphs: finished.paragraphs,
                            }),
                            None => log::warn!("Skipping shape without a known role"),
                        }
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    let layout =
        layout.ok_or_else(|| Error::InvalidPackage("Slide has no known layout name".to_string()))?;
    Ok(Slide::from_boxes(layout, boxes))
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Value of the attribute with the given qualified name.
fn attr(element: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|a| a.key.as_ref() == key)
        .map(|a| String::from_utf8_lossy(&a.value).into_owned())
}

fn parse_emu(value: Option<String>) -> Emu {
    Emu(value.and_then(|v| v.parse().ok()).unwrap_or_default())
}

/// Parse a value stored in hundredths of a point into whole points.
fn hundredths(value: Option<String>) -> Option<u32> {
    value.and_then(|v| v.parse::<u32>().ok()).map(|v| v / 100)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use deck_core::{Deck, DeckMetadata};

    use super::*;
    use crate::PptxWriter;

    fn round_trip(deck: &Deck) -> DeckOutline {
        let bytes = PptxWriter::new().to_bytes(deck).unwrap();
        PptxReader::new().read(Cursor::new(bytes)).unwrap()
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name(b"p:sp"), b"sp");
        assert_eq!(local_name(b"a:t"), b"t");
        assert_eq!(local_name(b"sp"), b"sp");
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(resolve_target("/ppt/slides/slide2.xml"), "ppt/slides/slide2.xml");
    }

    #[test]
    fn test_written_deck_reads_back() {
        let mut deck = Deck::new(
            DeckMetadata::new("Audit")
                .with_author("Reprise AI")
                .with_subject("Findings"),
        );
        deck.add_title_slide("Impact3 & Co", "Line one\n\nLine three");
        deck.add_content_slide(
            "Summary",
            ["## Goal", "Scale <fast>", "", "# Heading", "- nested"],
        );
        deck.add_two_column_slide("Columns", ["## Left", "a"], Vec::<&str>::new());

        let outline = round_trip(&deck);
        assert_eq!(outline.slides, deck.slides());
        assert_eq!(outline.metadata, deck.metadata);
        assert_eq!(outline.width, deck.width);
        assert_eq!(outline.height, deck.height);
    }

    #[test]
    fn test_slide_order_follows_presentation_list() {
        let mut deck = Deck::new(DeckMetadata::new("Order"));
        for i in 1..=12 {
            deck.add_content_slide(&format!("Slide {}", i), ["x"]);
        }

        let outline = round_trip(&deck);
        let titles: Vec<_> = outline.slides.iter().filter_map(|s| s.title()).collect();
        let expected: Vec<String> = (1..=12).map(|i| format!("Slide {}", i)).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_parse_slide_skips_unknown_shapes() {
        let xml = concat!(
            r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld name="Content"><p:spTree>"#,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="2" name="Picture 2"/></p:nvSpPr></p:sp>"#,
            r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="Title 3"/></p:nvSpPr>"#,
            r#"<p:txBody><a:bodyPr wrap="none"/><a:p><a:r><a:rPr sz="3200" b="1"/>"#,
            r#"<a:t>Hello</a:t></a:r></a:p></p:txBody></p:sp>"#,
            r#"</p:spTree></p:cSld></p:sld>"#,
        );
        let slide = parse_slide(xml).unwrap();
        assert_eq!(slide.layout, SlideLayout::Content);
        assert_eq!(slide.boxes.len(), 1);
        assert_eq!(slide.title(), Some("Hello"));
        assert_eq!(slide.boxes[0].paragraphs[0].font.size_pt, 32);
        assert!(slide.boxes[0].paragraphs[0].font.bold);
        assert!(!slide.boxes[0].word_wrap);
    }

    #[test]
    fn test_parse_slide_requires_layout() {
        let xml = r#"<p:sld xmlns:p="p"><p:cSld><p:spTree/></p:cSld></p:sld>"#;
        assert!(matches!(parse_slide(xml), Err(Error::InvalidPackage(_))));
    }

    #[test]
    fn test_read_rejects_non_zip() {
        let result = PptxReader::new().read(Cursor::new(b"not a zip".to_vec()));
        assert!(matches!(result, Err(Error::ZipError(_))));
    }

    #[test]
    fn test_open_saved_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        let mut deck = Deck::new(DeckMetadata::new("Saved"));
        deck.add_title_slide("Only", "");
        PptxWriter::new().save(&deck, &path).unwrap();

        let outline = PptxReader::new().open(&path).unwrap();
        assert_eq!(outline.slides.len(), 1);
        assert_eq!(outline.metadata.title, "Saved");
    }
}
