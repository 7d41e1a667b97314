//! Slide builders: title, content and two-column slides.
//!
//! Each builder appends exactly one slide to the deck. Body lines use the
//! markup convention from [`crate::markup`].

use crate::style::TextScale;
use crate::types::{
    Deck, Font, Frame, Paragraph, Slide, SlideLayout, TextBox, TextBoxRole,
};

impl Deck {
    /// Append a title slide: a centered large title and an optional subtitle.
    ///
    /// The subtitle box is only added when `subtitle` is non-empty. Line
    /// breaks in the subtitle are kept inside a single paragraph.
    pub fn add_title_slide(&mut self, title: &str, subtitle: &str) -> &Slide {
        let style = &self.style;
        let mut slide = Slide::new(SlideLayout::Title);

        let title_font = Font::new(style.cover_title_pt)
            .bold()
            .with_color(style.palette.title);
        let mut title_box = TextBox::new(TextBoxRole::Title, style.layout.cover_title);
        title_box.add_paragraph(Paragraph::new(title, title_font).centered());
        slide.boxes.push(title_box);

        if !subtitle.is_empty() {
            let subtitle_font =
                Font::new(style.cover_subtitle_pt).with_color(style.palette.subtitle);
            let mut subtitle_box =
                TextBox::new(TextBoxRole::Subtitle, style.layout.cover_subtitle);
            subtitle_box.add_paragraph(Paragraph::new(subtitle, subtitle_font).centered());
            slide.boxes.push(subtitle_box);
        }

        self.push_slide(slide)
    }

    /// Append a content slide: a bold title and one body box with a paragraph
    /// per input line, in input order.
    pub fn add_content_slide<I, S>(&mut self, title: &str, lines: I) -> &Slide
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut slide = Slide::new(SlideLayout::Content);
        slide.boxes.push(self.slide_title_box(title));
        slide
            .boxes
            .push(self.body_box(self.style.layout.body, &self.style.content, lines));
        self.push_slide(slide)
    }

    /// Append a two-column slide: a bold title and independent left and right
    /// body boxes using the narrower column scale.
    ///
    /// Either column may be empty; the slide always has both body boxes.
    pub fn add_two_column_slide<L, R, S, T>(&mut self, title: &str, left: L, right: R) -> &Slide
    where
        L: IntoIterator<Item = S>,
        R: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let layout = self.style.layout;
        let scale = self.style.column;

        let mut slide = Slide::new(SlideLayout::TwoColumn);
        slide.boxes.push(self.slide_title_box(title));
        slide
            .boxes
            .push(self.body_box(layout.left_column, &scale, left));
        slide
            .boxes
            .push(self.body_box(layout.right_column, &scale, right));
        self.push_slide(slide)
    }

    fn slide_title_box(&self, title: &str) -> TextBox {
        let font = Font::new(self.style.title_pt)
            .bold()
            .with_color(self.style.palette.title);
        let mut title_box = TextBox::new(TextBoxRole::Title, self.style.layout.title);
        title_box.add_paragraph(Paragraph::new(title, font));
        title_box
    }

    fn body_box<I, S>(&self, frame: Frame, scale: &TextScale, lines: I) -> TextBox
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut body = TextBox::new(TextBoxRole::Body, frame).wrapped();
        for line in lines {
            let styled = self.style.markup.render(line.as_ref());
            let font = self.style.body_font(scale, styled.class);
            let mut paragraph = Paragraph::new(styled.text, font);
            paragraph.space_before_pt = scale.for_class(styled.class).space_before_pt;
            body.add_paragraph(paragraph);
        }
        body
    }
}
