//! Line markup used by slide bodies.
//!
//! A body line is classified by its leading characters:
//!
//! ```text
//! ## Goal          -> sub-heading "Goal"
//! # Overview       -> heading "Overview"
//! Scale to $6M     -> bullet "• Scale to $6M"
//! - nested point   -> bullet "  • nested point"
//! ```
//!
//! Classification is a pure function so every builder interprets lines the
//! same way.

use serde::{Deserialize, Serialize};

/// Marker character that introduces headings.
pub const HEADING_MARKER: char = '#';

/// Style class of a markup line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineClass {
    /// Single marker prefix (`#`).
    Heading,
    /// Double marker prefix (`##`).
    SubHeading,
    /// Anything else, including empty lines.
    Bullet,
}

/// Classify a line with the default `#` marker.
pub fn classify(line: &str) -> LineClass {
    classify_with(line, HEADING_MARKER)
}

fn classify_with(line: &str, marker: char) -> LineClass {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a == marker && b == marker => LineClass::SubHeading,
        (Some(a), _) if a == marker => LineClass::Heading,
        _ => LineClass::Bullet,
    }
}

/// A classified line with its display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub class: LineClass,
    pub text: String,
}

/// Rules for turning markup lines into display text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupRules {
    /// Heading marker character.
    pub marker: char,

    /// Prepended to ordinary bullet lines.
    pub bullet_glyph: String,

    /// Replaces the leading dash of a dash-prefixed bullet line.
    pub dash_glyph: String,
}

impl Default for MarkupRules {
    fn default() -> Self {
        Self {
            marker: HEADING_MARKER,
            bullet_glyph: "• ".to_string(),
            dash_glyph: "  •".to_string(),
        }
    }
}

impl MarkupRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different glyph in place of a leading dash.
    pub fn with_dash_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.dash_glyph = glyph.into();
        self
    }

    pub fn with_bullet_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.bullet_glyph = glyph.into();
        self
    }

    pub fn classify(&self, line: &str) -> LineClass {
        classify_with(line, self.marker)
    }

    /// Classify a line and produce the text that should be displayed.
    ///
    /// Heading markers and one following space are stripped. Empty lines stay
    /// empty so they can act as vertical spacing.
    pub fn render(&self, line: &str) -> StyledLine {
        let class = self.classify(line);
        let text = match class {
            LineClass::SubHeading => strip_marker(line, 2),
            LineClass::Heading => strip_marker(line, 1),
            LineClass::Bullet if line.is_empty() => String::new(),
            LineClass::Bullet => match line.strip_prefix('-') {
                Some(rest) => format!("{}{}", self.dash_glyph, rest),
                None => format!("{}{}", self.bullet_glyph, line),
            },
        };
        StyledLine { class, text }
    }
}

fn strip_marker(line: &str, count: usize) -> String {
    let rest = line
        .char_indices()
        .nth(count)
        .map(|(idx, _)| &line[idx..])
        .unwrap_or("");
    rest.strip_prefix(' ').unwrap_or(rest).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_prefixes() {
        assert_eq!(classify("## Goal"), LineClass::SubHeading);
        assert_eq!(classify("##Goal"), LineClass::SubHeading);
        assert_eq!(classify("### Deep"), LineClass::SubHeading);
        assert_eq!(classify("# Overview"), LineClass::Heading);
        assert_eq!(classify("#"), LineClass::Heading);
        assert_eq!(classify("Plain text"), LineClass::Bullet);
        assert_eq!(classify(""), LineClass::Bullet);
        assert_eq!(classify(" ## indented"), LineClass::Bullet);
        assert_eq!(classify("- dash"), LineClass::Bullet);
    }

    #[test]
    fn test_render_headings_strip_marker() {
        let rules = MarkupRules::new();
        assert_eq!(
            rules.render("## Key Finding"),
            StyledLine {
                class: LineClass::SubHeading,
                text: "Key Finding".to_string()
            }
        );
        assert_eq!(rules.render("# Overview").text, "Overview");
        assert_eq!(rules.render("##NoSpace").text, "NoSpace");
        assert_eq!(rules.render("##").text, "");
        assert_eq!(rules.render("#").text, "");
    }

    #[test]
    fn test_render_bullets() {
        let rules = MarkupRules::new();
        assert_eq!(rules.render("Executive Summary").text, "• Executive Summary");
        assert_eq!(rules.render("Raul (CEO) - Scaling").text, "• Raul (CEO) - Scaling");
    }

    #[test]
    fn test_render_leading_dash_is_replaced() {
        let rules = MarkupRules::new();
        let line = rules.render("- nested point");
        assert_eq!(line.class, LineClass::Bullet);
        assert_eq!(line.text, "  • nested point");
        assert!(!line.text.starts_with('-'));

        // Only the leading dash is replaced.
        assert_eq!(rules.render("-a-b").text, "  •a-b");
    }

    #[test]
    fn test_render_custom_dash_glyph() {
        let rules = MarkupRules::new().with_dash_glyph("    ◦");
        assert_eq!(rules.render("- sub").text, "    ◦ sub");
    }

    #[test]
    fn test_render_empty_line_has_no_glyph() {
        let line = MarkupRules::new().render("");
        assert_eq!(line.class, LineClass::Bullet);
        assert_eq!(line.text, "");
    }

    #[test]
    fn test_unicode_content_is_preserved() {
        let rules = MarkupRules::new();
        assert_eq!(rules.render("## Tier 1 → Done").text, "Tier 1 → Done");
        assert_eq!(rules.render("40 → 60 people").text, "• 40 → 60 people");
    }
}
