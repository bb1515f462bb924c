//! Mask compilation, matching and decoration stripping.
//!
//! Mask syntax: `9` digit, `A` letter, `*` letter or digit, `?` any
//! character. `\` makes the next mask character a literal. Everything else is
//! rendered as-is.

mod format;
mod model;
mod parser;

pub use format::{Reformatted, classify, format_text, reformat, strip_text};
pub use model::{
    DecoratedBuffer, DecoratedChar, InputMode, MaskToken, Provenance, Selection, SlotClass,
};
pub use parser::{
    ALPHANUMERIC_MARKER, ANY_MARKER, DIGIT_MARKER, ESCAPE_CHAR, LETTER_MARKER, compile,
};

pub const PHONE_US: &str = "(999) 999-9999";
pub const ZIP_US: &str = "99999";
pub const DATE_DD_MM_YYYY: &str = "99/99/9999";
pub const TIME_HH_MM: &str = "99:99";

/// A compiled mask together with its source string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Mask {
    source: String,
    tokens: Vec<MaskToken>,
}

impl Mask {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let tokens = compile(source.as_str());
        Self { source, tokens }
    }

    pub fn as_str(&self) -> &str {
        self.source.as_str()
    }

    pub fn tokens(&self) -> &[MaskToken] {
        self.tokens.as_slice()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn slot_count(&self) -> usize {
        self.tokens.iter().filter(|token| token.is_slot()).count()
    }

    pub fn format(&self, input: &str, placeholder: char) -> String {
        format_text(self.tokens(), input, placeholder)
    }

    pub fn strip(&self, text: &str, placeholder: char) -> String {
        strip_text(self.tokens(), text, placeholder)
    }
}

impl From<&str> for Mask {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Mask {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
