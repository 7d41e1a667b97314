//! PPTX (Office Open XML) backend for generated decks.
//!
//! Writes a [`deck_core::Deck`] as a .pptx package (a ZIP archive of XML
//! parts) and reads such packages back for verification.

pub mod reader;
pub mod template;
pub mod writer;

pub use reader::{DeckOutline, PptxReader};
pub use writer::PptxWriter;
