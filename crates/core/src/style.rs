//! Style constants shared by every slide builder.

use crate::markup::{LineClass, MarkupRules};
use crate::types::{Font, Frame, RgbColor};

pub const DARK_BLUE: RgbColor = RgbColor(0x1a, 0x1a, 0x2e);
pub const MID_GRAY: RgbColor = RgbColor(0x66, 0x66, 0x66);
pub const TEXT_GRAY: RgbColor = RgbColor(0x33, 0x33, 0x33);

/// Text colors used across the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub title: RgbColor,
    pub subtitle: RgbColor,
    pub heading: RgbColor,
    pub body: RgbColor,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            title: DARK_BLUE,
            subtitle: MID_GRAY,
            heading: DARK_BLUE,
            body: TEXT_GRAY,
        }
    }
}

/// Font size and spacing for one markup class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub size_pt: u16,
    pub bold: bool,
    pub space_before_pt: Option<u16>,
}

impl LineStyle {
    const fn new(size_pt: u16, bold: bool, space_before_pt: Option<u16>) -> Self {
        Self {
            size_pt,
            bold,
            space_before_pt,
        }
    }
}

/// Per-class styles for a body text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextScale {
    pub heading: LineStyle,
    pub sub_heading: LineStyle,
    pub bullet: LineStyle,
}

impl TextScale {
    /// Full-width content body.
    pub const CONTENT: Self = Self {
        heading: LineStyle::new(26, true, None),
        sub_heading: LineStyle::new(22, true, Some(16)),
        bullet: LineStyle::new(18, false, Some(8)),
    };

    /// Narrower two-column body.
    pub const COLUMN: Self = Self {
        heading: LineStyle::new(22, true, Some(6)),
        sub_heading: LineStyle::new(20, true, Some(6)),
        bullet: LineStyle::new(16, false, Some(6)),
    };

    pub fn for_class(&self, class: LineClass) -> LineStyle {
        match class {
            LineClass::Heading => self.heading,
            LineClass::SubHeading => self.sub_heading,
            LineClass::Bullet => self.bullet,
        }
    }
}

/// Text box positions for each slide layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub cover_title: Frame,
    pub cover_subtitle: Frame,
    pub title: Frame,
    pub body: Frame,
    pub left_column: Frame,
    pub right_column: Frame,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cover_title: Frame::inches(0.5, 2.5, 12.333, 1.5),
            cover_subtitle: Frame::inches(0.5, 4.0, 12.333, 1.0),
            title: Frame::inches(0.5, 0.3, 12.333, 0.8),
            body: Frame::inches(0.5, 1.2, 12.333, 5.8),
            left_column: Frame::inches(0.5, 1.2, 5.9, 5.8),
            right_column: Frame::inches(6.9, 1.2, 5.9, 5.8),
        }
    }
}

/// Everything the builders need to style a slide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckStyle {
    pub palette: Palette,
    pub layout: Layout,
    pub content: TextScale,
    pub column: TextScale,
    pub markup: MarkupRules,

    /// Title slide heading size.
    pub cover_title_pt: u16,
    /// Title slide subtitle size.
    pub cover_subtitle_pt: u16,
    /// Slide title size for content and two-column slides.
    pub title_pt: u16,
}

impl Default for DeckStyle {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            layout: Layout::default(),
            content: TextScale::CONTENT,
            column: TextScale::COLUMN,
            markup: MarkupRules::default(),
            cover_title_pt: 44,
            cover_subtitle_pt: 24,
            title_pt: 32,
        }
    }
}

impl DeckStyle {
    /// Font for a body line of the given class.
    pub fn body_font(&self, scale: &TextScale, class: LineClass) -> Font {
        let style = scale.for_class(class);
        let color = match class {
            LineClass::Bullet => self.palette.body,
            LineClass::Heading | LineClass::SubHeading => self.palette.heading,
        };
        Font {
            size_pt: style.size_pt,
            bold: style.bold,
            color: Some(color),
        }
    }
}
