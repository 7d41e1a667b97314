//! PPTX package writer.

use std::io::{Cursor, Seek, Write};
use std::path::Path;

use deck_core::{Alignment, Deck, DeckMetadata, Error, Paragraph, Result, Slide, TextBox};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::template::{self, ct, rel, NS_A, NS_CONTENT_TYPES, NS_P, NS_PACKAGE_RELS, NS_R};

/// First id handed out to slides in `sldIdLst`.
const FIRST_SLIDE_ID: usize = 256;

/// Relationship id of the first slide in `presentation.xml.rels`
/// (`rId1` is the slide master, `rId2` the theme).
const FIRST_SLIDE_REL: usize = 3;

/// Writer for PPTX (Office Open XML) packages.
pub struct PptxWriter {
    compression: CompressionMethod,
}

impl PptxWriter {
    /// Create a writer that deflates every part.
    pub fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }

    /// Use a different compression method, e.g. `Stored` for inspection.
    pub fn with_compression(mut self, compression: CompressionMethod) -> Self {
        self.compression = compression;
        self
    }

    /// Write the deck as a PPTX package into `writer` and return it.
    pub fn write<W: Write + Seek>(&self, deck: &Deck, writer: W) -> Result<W> {
        let mut zip = ZipWriter::new(writer);
        let slide_count = deck.slide_count();

        self.add_part(&mut zip, "[Content_Types].xml", &content_types_xml(slide_count)?)?;
        self.add_part(&mut zip, "_rels/.rels", &package_rels_xml()?)?;
        self.add_part(&mut zip, "docProps/core.xml", &core_properties_xml(&deck.metadata)?)?;
        self.add_part(&mut zip, "docProps/app.xml", &app_properties_xml(slide_count)?)?;
        self.add_part(&mut zip, template::PRESENTATION_PART, &presentation_xml(deck)?)?;
        self.add_part(
            &mut zip,
            template::PRESENTATION_RELS_PART,
            &presentation_rels_xml(slide_count)?,
        )?;
        self.add_part(
            &mut zip,
            template::SLIDE_MASTER_PART,
            template::SLIDE_MASTER_XML.as_bytes(),
        )?;
        self.add_part(
            &mut zip,
            template::SLIDE_MASTER_RELS_PART,
            &relationships_xml(&[
                ("rId1", rel::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
                ("rId2", rel::THEME, "../theme/theme1.xml"),
            ])?,
        )?;
        self.add_part(
            &mut zip,
            template::SLIDE_LAYOUT_PART,
            template::SLIDE_LAYOUT_XML.as_bytes(),
        )?;
        self.add_part(
            &mut zip,
            template::SLIDE_LAYOUT_RELS_PART,
            &relationships_xml(&[(
                "rId1",
                rel::SLIDE_MASTER,
                "../slideMasters/slideMaster1.xml",
            )])?,
        )?;
        self.add_part(&mut zip, template::THEME_PART, template::THEME_XML.as_bytes())?;

        let slide_rels = relationships_xml(&[(
            "rId1",
            rel::SLIDE_LAYOUT,
            "../slideLayouts/slideLayout1.xml",
        )])?;
        for (idx, slide) in deck.slides().iter().enumerate() {
            let number = idx + 1;
            self.add_part(&mut zip, &template::slide_part(number), &slide_xml(slide)?)?;
            self.add_part(&mut zip, &template::slide_rels_part(number), &slide_rels)?;
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))
    }

    /// Serialize the whole package into memory.
    pub fn to_bytes(&self, deck: &Deck) -> Result<Vec<u8>> {
        let cursor = self.write(deck, Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    /// Save the deck to `path`.
    ///
    /// The package is assembled in memory first and written with a single
    /// file write, so a serialization failure never leaves a partial file.
    pub fn save<P: AsRef<Path>>(&self, deck: &Deck, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes(deck)?;
        std::fs::write(path, &bytes)?;
        log::info!(
            "Saved {} slides ({} bytes) to {}",
            deck.slide_count(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }

    fn add_part<W: Write + Seek>(
        &self,
        zip: &mut ZipWriter<W>,
        name: &str,
        content: &[u8],
    ) -> Result<()> {
        let options = FileOptions::default().compression_method(self.compression);
        zip.start_file(name, options)
            .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", name, e)))?;
        zip.write_all(content)?;
        log::debug!("Wrote part {} ({} bytes)", name, content.len());
        Ok(())
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Thin wrapper over the quick-xml writer that maps errors into our Error type.
struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    fn new() -> Result<Self> {
        let mut writer = Self {
            inner: Writer::new(Vec::new()),
        };
        writer.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(writer)
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|e| Error::XmlError(e.to_string()))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.event(Event::Start(element))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.event(Event::Empty(element))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.event(Event::Text(BytesText::new(text)))
    }

    /// Element with escaped text content and no attributes.
    fn leaf(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name, &[])?;
        self.text(text)?;
        self.end(name)
    }

    /// Append pre-built markup verbatim.
    fn raw(&mut self, xml: &str) {
        self.inner.get_mut().extend_from_slice(xml.as_bytes());
    }

    fn finish(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

fn content_types_xml(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    xml.empty(
        "Default",
        &[("Extension", "rels"), ("ContentType", ct::RELATIONSHIPS)],
    )?;
    xml.empty("Default", &[("Extension", "xml"), ("ContentType", ct::XML)])?;

    let fixed = [
        ("/ppt/presentation.xml", ct::PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml", ct::SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml", ct::SLIDE_LAYOUT),
        ("/ppt/theme/theme1.xml", ct::THEME),
        ("/docProps/core.xml", ct::CORE_PROPERTIES),
        ("/docProps/app.xml", ct::EXTENDED_PROPERTIES),
    ];
    for (part, content_type) in fixed {
        xml.empty("Override", &[("PartName", part), ("ContentType", content_type)])?;
    }
    for number in 1..=slide_count {
        let part = format!("/{}", template::slide_part(number));
        xml.empty(
            "Override",
            &[("PartName", part.as_str()), ("ContentType", ct::SLIDE)],
        )?;
    }

    xml.end("Types")?;
    Ok(xml.finish())
}

fn relationships_xml(rels: &[(&str, &str, &str)]) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start("Relationships", &[("xmlns", NS_PACKAGE_RELS)])?;
    for &(id, rel_type, target) in rels {
        xml.empty(
            "Relationship",
            &[("Id", id), ("Type", rel_type), ("Target", target)],
        )?;
    }
    xml.end("Relationships")?;
    Ok(xml.finish())
}

fn package_rels_xml() -> Result<Vec<u8>> {
    relationships_xml(&[
        ("rId1", rel::OFFICE_DOCUMENT, template::PRESENTATION_PART),
        ("rId2", rel::CORE_PROPERTIES, "docProps/core.xml"),
        ("rId3", rel::EXTENDED_PROPERTIES, "docProps/app.xml"),
    ])
}

fn presentation_rels_xml(slide_count: usize) -> Result<Vec<u8>> {
    let slides: Vec<(String, String)> = (0..slide_count)
        .map(|idx| {
            (
                format!("rId{}", FIRST_SLIDE_REL + idx),
                format!("slides/slide{}.xml", idx + 1),
            )
        })
        .collect();

    let mut rels = vec![
        ("rId1", rel::SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
        ("rId2", rel::THEME, "theme/theme1.xml"),
    ];
    rels.extend(
        slides
            .iter()
            .map(|(id, target)| (id.as_str(), rel::SLIDE, target.as_str())),
    );
    relationships_xml(&rels)
}

fn core_properties_xml(metadata: &DeckMetadata) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    xml.leaf("dc:title", &metadata.title)?;
    xml.leaf("dc:subject", &metadata.subject)?;
    xml.leaf("dc:creator", &metadata.author)?;
    xml.leaf("cp:lastModifiedBy", &metadata.author)?;
    xml.leaf("cp:revision", "1")?;
    xml.end("cp:coreProperties")?;
    Ok(xml.finish())
}

fn app_properties_xml(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "Properties",
        &[
            (
                "xmlns",
                "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
            ),
            (
                "xmlns:vt",
                "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
            ),
        ],
    )?;
    xml.leaf("Application", env!("CARGO_PKG_NAME"))?;
    xml.leaf("PresentationFormat", "Custom")?;
    xml.leaf("Slides", &slide_count.to_string())?;
    xml.end("Properties")?;
    Ok(xml.finish())
}

fn presentation_xml(deck: &Deck) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "p:presentation",
        &[
            ("xmlns:a", NS_A),
            ("xmlns:r", NS_R),
            ("xmlns:p", NS_P),
            ("saveSubsetFonts", "1"),
        ],
    )?;

    xml.start("p:sldMasterIdLst", &[])?;
    xml.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
    xml.end("p:sldMasterIdLst")?;

    if deck.slide_count() > 0 {
        xml.start("p:sldIdLst", &[])?;
        for idx in 0..deck.slide_count() {
            let id = (FIRST_SLIDE_ID + idx).to_string();
            let rel_id = format!("rId{}", FIRST_SLIDE_REL + idx);
            xml.empty("p:sldId", &[("id", id.as_str()), ("r:id", rel_id.as_str())])?;
        }
        xml.end("p:sldIdLst")?;
    }

    let (cx, cy) = (deck.width.0.to_string(), deck.height.0.to_string());
    xml.empty("p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    xml.empty("p:notesSz", &[("cx", "6858000"), ("cy", "9144000")])?;
    xml.end("p:presentation")?;
    Ok(xml.finish())
}

/// Serialize one slide. Shape ids start at 2; id 1 is the shape tree itself.
fn slide_xml(slide: &Slide) -> Result<Vec<u8>> {
    let mut xml = XmlWriter::new()?;
    xml.start(
        "p:sld",
        &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)],
    )?;
    xml.start("p:cSld", &[("name", slide.layout.as_str())])?;
    xml.start("p:spTree", &[])?;
    xml.raw(template::SP_TREE_HEADER);

    for (idx, text_box) in slide.boxes.iter().enumerate() {
        write_text_box(&mut xml, text_box, idx + 2)?;
    }

    xml.end("p:spTree")?;
    xml.end("p:cSld")?;
    xml.start("p:clrMapOvr", &[])?;
    xml.empty("a:masterClrMapping", &[])?;
    xml.end("p:clrMapOvr")?;
    xml.end("p:sld")?;
    Ok(xml.finish())
}

fn write_text_box(xml: &mut XmlWriter, text_box: &TextBox, shape_id: usize) -> Result<()> {
    let id = shape_id.to_string();
    let name = format!("{} {}", text_box.role.as_str(), shape_id);
    let frame = text_box.frame;
    let (x, y) = (frame.x.0.to_string(), frame.y.0.to_string());
    let (cx, cy) = (frame.width.0.to_string(), frame.height.0.to_string());

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
    let wrap = if text_box.word_wrap { "square" } else { "none" };
    xml.start("a:bodyPr", &[("wrap", wrap), ("rtlCol", "0")])?;
    xml.empty("a:spAutoFit", &[])?;
    xml.end("a:bodyPr")?;
    xml.empty("a:lstStyle", &[])?;

    if text_box.paragraphs.is_empty() {
        // A text body needs at least one paragraph.
        xml.empty("a:p", &[])?;
    }
    for paragraph in &text_box.paragraphs {
        write_paragraph(xml, paragraph)?;
    }

    xml.end("p:txBody")?;
    xml.end("p:sp")
}

fn write_paragraph(xml: &mut XmlWriter, paragraph: &Paragraph) -> Result<()> {
    xml.start("a:p", &[])?;

    let centered = paragraph.alignment == Alignment::Center;
    if centered || paragraph.space_before_pt.is_some() {
        let attrs: &[(&str, &str)] = if centered { &[("algn", "ctr")] } else { &[] };
        match paragraph.space_before_pt {
            Some(points) => {
                xml.start("a:pPr", attrs)?;
                xml.start("a:spcBef", &[])?;
                let val = (u32::from(points) * 100).to_string();
                xml.empty("a:spcPts", &[("val", val.as_str())])?;
                xml.end("a:spcBef")?;
                xml.end("a:pPr")?;
            }
            None => xml.empty("a:pPr", attrs)?,
        }
    }

    for (idx, segment) in paragraph.text.split('\n').enumerate() {
        if idx > 0 {
            xml.empty("a:br", &[])?;
        }
        if segment.is_empty() {
            continue;
        }
        xml.start("a:r", &[])?;
        write_run_properties(xml, "a:rPr", paragraph)?;
        xml.leaf("a:t", segment)?;
        xml.end("a:r")?;
    }

    write_run_properties(xml, "a:endParaRPr", paragraph)?;
    xml.end("a:p")
}

fn write_run_properties(xml: &mut XmlWriter, tag: &str, paragraph: &Paragraph) -> Result<()> {
    let font = paragraph.font;
    let size = (u32::from(font.size_pt) * 100).to_string();
    let mut attrs = vec![("lang", "en-US"), ("sz", size.as_str())];
    if font.bold {
        attrs.push(("b", "1"));
    }
    attrs.push(("dirty", "0"));

    match font.color {
        Some(color) => {
            xml.start(tag, &attrs)?;
            xml.start("a:solidFill", &[])?;
            let hex = color.to_hex();
            xml.empty("a:srgbClr", &[("val", hex.as_str())])?;
            xml.end("a:solidFill")?;
            xml.end(tag)
        }
        None => xml.empty(tag, &attrs),
    }
}

#[cfg(test)]
mod tests {
    use deck_core::{DeckMetadata, Font, Frame, SlideLayout, TextBoxRole};
    use std::io::Read;
    use zip::ZipArchive;

    use super::*;

    fn sample_deck() -> Deck {
        let mut deck = Deck::new(
            DeckMetadata::new("Sample & Test")
                .with_author("Reprise AI")
                .with_subject("Findings"),
        );
        deck.add_title_slide("Cover", "Line one\nLine two");
        deck.add_content_slide("Agenda", ["## Goals", "Ship <it>", ""]);
        deck.add_two_column_slide("Split", ["left"], Vec::<&str>::new());
        deck
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_package_contains_all_parts() {
        let bytes = PptxWriter::new().to_bytes(&sample_deck()).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();

        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide3.xml",
            "ppt/slides/_rels/slide3.xml.rels",
        ] {
            assert!(names.contains(&part), "missing {}", part);
        }
        assert!(!names.contains(&"ppt/slides/slide4.xml"));
    }

    #[test]
    fn test_content_types_list_every_slide() {
        let bytes = PptxWriter::new().to_bytes(&sample_deck()).unwrap();
        let types = read_part(&bytes, "[Content_Types].xml");
        assert_eq!(types.matches(ct::SLIDE).count(), 3);
        assert!(types.contains(r#"PartName="/ppt/slides/slide2.xml""#));
    }

    #[test]
    fn test_presentation_lists_slides_in_order() {
        let bytes = PptxWriter::new().to_bytes(&sample_deck()).unwrap();
        let xml = read_part(&bytes, "ppt/presentation.xml");
        assert!(xml.contains(
            r#"<p:sldIdLst><p:sldId id="256" r:id="rId3"/><p:sldId id="257" r:id="rId4"/><p:sldId id="258" r:id="rId5"/></p:sldIdLst>"#
        ));
        assert!(xml.contains(r#"<p:sldSz cx="12191695" cy="6858000"/>"#));

        let rels = read_part(&bytes, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains(r#"Id="rId5""#));
        assert!(rels.contains(r#"Target="slides/slide3.xml""#));
    }

    #[test]
    fn test_metadata_is_escaped() {
        let bytes = PptxWriter::new().to_bytes(&sample_deck()).unwrap();
        let core = read_part(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:title>Sample &amp; Test</dc:title>"));
        assert!(core.contains("<dc:creator>Reprise AI</dc:creator>"));

        let app = read_part(&bytes, "docProps/app.xml");
        assert!(app.contains("<Slides>3</Slides>"));
    }

    #[test]
    fn test_slide_markup() {
        let bytes = PptxWriter::new().to_bytes(&sample_deck()).unwrap();

        let cover = read_part(&bytes, "ppt/slides/slide1.xml");
        assert!(cover.contains(r#"<p:cSld name="Title">"#));
        assert!(cover.contains(r#"<a:pPr algn="ctr"/>"#));
        assert!(cover.contains("<a:t>Line one</a:t></a:r><a:br/><a:r>"));
        assert!(cover.contains(r#"sz="4400" b="1""#));

        let agenda = read_part(&bytes, "ppt/slides/slide2.xml");
        assert!(agenda.contains("<a:t>• Ship &lt;it&gt;</a:t>"));
        assert!(agenda.contains(r#"<a:spcPts val="1600"/>"#));
        assert!(agenda.contains(r#"wrap="square""#));
        assert!(agenda.contains(r#"<a:srgbClr val="333333"/>"#));
    }

    #[test]
    fn test_empty_column_still_has_paragraph() {
        let bytes = PptxWriter::new().to_bytes(&sample_deck()).unwrap();
        let split = read_part(&bytes, "ppt/slides/slide3.xml");
        assert_eq!(split.matches("<p:sp>").count(), 3);
        assert!(split.contains("<a:lstStyle/><a:p/></p:txBody>"));
    }

    #[test]
    fn test_plain_font_writes_empty_run_properties() {
        let mut text_box = TextBox::new(TextBoxRole::Body, Frame::inches(0.0, 0.0, 1.0, 1.0));
        text_box.add_paragraph(Paragraph::new("plain", Font::new(12)));
        let slide = Slide::from_boxes(SlideLayout::Content, vec![text_box]);

        let xml = String::from_utf8(slide_xml(&slide).unwrap()).unwrap();
        assert!(xml.contains(r#"<a:rPr lang="en-US" sz="1200" dirty="0"/>"#));
        assert!(xml.contains(r#"name="Body 2""#));
        assert!(!xml.contains("<a:pPr"));
    }

    #[test]
    fn test_empty_deck_has_no_slide_list() {
        let deck = Deck::new(DeckMetadata::new("Empty"));
        let bytes = PptxWriter::new()
            .with_compression(CompressionMethod::Stored)
            .to_bytes(&deck)
            .unwrap();
        let xml = read_part(&bytes, "ppt/presentation.xml");
        assert!(!xml.contains("sldIdLst"));
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("deck.pptx");
        let result = PptxWriter::new().save(&sample_deck(), &path);
        assert!(matches!(result, Err(Error::IoError(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_save_writes_zip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        PptxWriter::new().save(&sample_deck(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]));
    }
}
