//! Domain types for representing a deck before it is persisted.

use serde::{Deserialize, Serialize};

use crate::style::DeckStyle;

/// Length in English Metric Units (914400 per inch, 12700 per point).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Emu(pub i64);

impl Emu {
    /// EMUs per inch.
    pub const PER_INCH: i64 = 914_400;

    /// EMUs per typographic point.
    pub const PER_POINT: i64 = 12_700;

    /// Convert inches to EMUs, truncating like the presentation format expects.
    pub fn from_inches(inches: f64) -> Self {
        Self((inches * Self::PER_INCH as f64) as i64)
    }

    /// Convert points to EMUs.
    pub fn from_points(points: f64) -> Self {
        Self((points * Self::PER_POINT as f64) as i64)
    }

    pub fn as_inches(self) -> f64 {
        self.0 as f64 / Self::PER_INCH as f64
    }
}

/// Position and size of a text box on the slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub x: Emu,
    pub y: Emu,
    pub width: Emu,
    pub height: Emu,
}

impl Frame {
    /// Create a frame from inch measurements.
    pub fn inches(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Emu::from_inches(x),
            y: Emu::from_inches(y),
            width: Emu::from_inches(width),
            height: Emu::from_inches(height),
        }
    }
}

/// A 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    /// Hex representation as used in `srgbClr` values, e.g. `1A1A2E`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }

    /// Parse a six digit hex string (case-insensitive, no leading `#`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        Some(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
}

/// Character formatting applied to a whole paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    /// Size in whole points.
    pub size_pt: u16,
    pub bold: bool,
    pub color: Option<RgbColor>,
}

impl Font {
    pub fn new(size_pt: u16) -> Self {
        Self {
            size_pt,
            bold: false,
            color: None,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn with_color(mut self, color: RgbColor) -> Self {
        self.color = Some(color);
        self
    }
}

/// One paragraph inside a text box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Paragraph text. `\n` is rendered as a line break inside the paragraph.
    pub text: String,

    pub font: Font,

    /// Extra space above the paragraph, in points.
    pub space_before_pt: Option<u16>,

    pub alignment: Alignment,
}

impl Paragraph {
    /// Create a left-aligned paragraph with no extra spacing.
    pub fn new(text: impl Into<String>, font: Font) -> Self {
        Self {
            text: text.into(),
            font,
            space_before_pt: None,
            alignment: Alignment::Left,
        }
    }

    pub fn with_space_before(mut self, points: u16) -> Self {
        self.space_before_pt = Some(points);
        self
    }

    pub fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }
}

/// What a text box is used for on its slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextBoxRole {
    Title,
    Subtitle,
    Body,
}

impl TextBoxRole {
    /// Name prefix used for the shape in the saved package.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Subtitle => "Subtitle",
            Self::Body => "Body",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.split_whitespace().next()? {
            "Title" => Some(Self::Title),
            "Subtitle" => Some(Self::Subtitle),
            "Body" => Some(Self::Body),
            _ => None,
        }
    }
}

/// A positioned text region on a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBox {
    pub role: TextBoxRole,
    pub frame: Frame,

    /// Whether text wraps at the frame width.
    pub word_wrap: bool,

    /// Paragraphs in stacking order (top to bottom).
    pub paragraphs: Vec<Paragraph>,
}

impl TextBox {
    /// Create an empty, non-wrapping text box.
    pub fn new(role: TextBoxRole, frame: Frame) -> Self {
        Self {
            role,
            frame,
            word_wrap: false,
            paragraphs: Vec::new(),
        }
    }

    pub fn wrapped(mut self) -> Self {
        self.word_wrap = true;
        self
    }

    /// Add a paragraph to the end of the box.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    /// Text of every paragraph, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.paragraphs.iter().map(|p| p.text.as_str()).collect()
    }
}

/// The builder that produced a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideLayout {
    Title,
    Content,
    TwoColumn,
}

impl SlideLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Content => "Content",
            Self::TwoColumn => "TwoColumn",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Title" => Some(Self::Title),
            "Content" => Some(Self::Content),
            "TwoColumn" => Some(Self::TwoColumn),
            _ => None,
        }
    }
}

/// A single slide: text boxes in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub layout: SlideLayout,
    pub boxes: Vec<TextBox>,
}

impl Slide {
    pub(crate) fn new(layout: SlideLayout) -> Self {
        Self {
            layout,
            boxes: Vec::new(),
        }
    }

    /// Build a slide from already-positioned boxes, e.g. when reading a saved deck.
    pub fn from_boxes(layout: SlideLayout, boxes: Vec<TextBox>) -> Self {
        Self { layout, boxes }
    }

    /// Text of the first title box, if any.
    pub fn title(&self) -> Option<&str> {
        self.boxes
            .iter()
            .find(|b| b.role == TextBoxRole::Title)
            .and_then(|b| b.paragraphs.first())
            .map(|p| p.text.as_str())
    }

    /// Boxes with the given role, in insertion order.
    pub fn boxes_with_role(&self, role: TextBoxRole) -> Vec<&TextBox> {
        self.boxes.iter().filter(|b| b.role == role).collect()
    }
}

/// Document properties recorded in the saved package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckMetadata {
    pub title: String,
    pub author: String,
    pub subject: String,
}

impl DeckMetadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }
}

/// An entire deck: slides in presentation order plus shared style.
#[derive(Debug, Clone, Serialize)]
pub struct Deck {
    pub metadata: DeckMetadata,

    /// Slide width.
    pub width: Emu,

    /// Slide height.
    pub height: Emu,

    /// Styling shared by every builder.
    #[serde(skip)]
    pub style: DeckStyle,

    slides: Vec<Slide>,
}

impl Deck {
    /// Create an empty widescreen (13.333" x 7.5") deck with the default style.
    pub fn new(metadata: DeckMetadata) -> Self {
        Self::with_style(metadata, DeckStyle::default())
    }

    pub fn with_style(metadata: DeckMetadata, style: DeckStyle) -> Self {
        Self {
            metadata,
            width: Emu::from_inches(13.333),
            height: Emu::from_inches(7.5),
            style,
            slides: Vec::new(),
        }
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Append a finished slide and return a reference to it.
    pub(crate) fn push_slide(&mut self, slide: Slide) -> &Slide {
        log::debug!(
            "Added {} slide #{} ({:?})",
            slide.layout.as_str(),
            self.slides.len() + 1,
            slide.title().unwrap_or_default()
        );
        self.slides.push(slide);
        &self.slides[self.slides.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emu_conversions() {
        assert_eq!(Emu::from_inches(1.0), Emu(914_400));
        assert_eq!(Emu::from_inches(0.5), Emu(457_200));
        assert_eq!(Emu::from_points(44.0), Emu(558_800));
        assert!((Emu(1_371_600).as_inches() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_widescreen_dimensions() {
        let deck = Deck::new(DeckMetadata::new("Test"));
        assert_eq!(deck.width, Emu(12_191_695));
        assert_eq!(deck.height, Emu(6_858_000));
        assert_eq!(deck.slide_count(), 0);
    }

    #[test]
    fn test_rgb_hex() {
        let color = RgbColor(0x1a, 0x1a, 0x2e);
        assert_eq!(color.to_hex(), "1A1A2E");
        assert_eq!(RgbColor::from_hex("1a1a2e"), Some(color));
        assert_eq!(RgbColor::from_hex("4169E1"), Some(RgbColor(0x41, 0x69, 0xe1)));
        assert_eq!(RgbColor::from_hex("xyz"), None);
        assert_eq!(RgbColor::from_hex("12345g"), None);
    }

    #[test]
    fn test_role_names() {
        assert_eq!(TextBoxRole::from_name("Title 2"), Some(TextBoxRole::Title));
        assert_eq!(TextBoxRole::from_name("Body 4"), Some(TextBoxRole::Body));
        assert_eq!(TextBoxRole::from_name("Subtitle"), Some(TextBoxRole::Subtitle));
        assert_eq!(TextBoxRole::from_name("Picture 3"), None);
        assert_eq!(TextBoxRole::from_name(""), None);
    }

    #[test]
    fn test_slide_title_lookup() {
        let mut title = TextBox::new(TextBoxRole::Title, Frame::inches(0.5, 0.3, 12.333, 0.8));
        title.add_paragraph(Paragraph::new("Agenda", Font::new(32).bold()));
        let body = TextBox::new(TextBoxRole::Body, Frame::inches(0.5, 1.2, 12.333, 5.8)).wrapped();

        let slide = Slide::from_boxes(SlideLayout::Content, vec![title, body]);
        assert_eq!(slide.title(), Some("Agenda"));
        assert_eq!(slide.boxes_with_role(TextBoxRole::Body).len(), 1);
        assert!(slide.boxes_with_role(TextBoxRole::Body)[0].word_wrap);
    }
}
