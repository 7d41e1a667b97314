//! Core deck model, line markup and slide builders for generated
//! presentations.

pub mod builder;
pub mod error;
pub mod markup;
pub mod style;
pub mod types;

pub use error::{Error, Result};
pub use markup::{classify, LineClass, MarkupRules, StyledLine};
pub use style::{DeckStyle, Layout, LineStyle, Palette, TextScale};
pub use types::{
    Alignment, Deck, DeckMetadata, Emu, Font, Frame, Paragraph, RgbColor, Slide, SlideLayout,
    TextBox, TextBoxRole,
};
