use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotClass {
    Digit,
    Letter,
    AlphaNumeric,
    Any,
}

impl SlotClass {
    pub fn accepts(self, ch: char) -> bool {
        match self {
            Self::Digit => ch.is_ascii_digit(),
            Self::Letter => ch.is_alphabetic(),
            Self::AlphaNumeric => ch.is_ascii_digit() || ch.is_alphabetic(),
            Self::Any => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskToken {
    Slot(SlotClass),
    Literal(char),
}

impl MaskToken {
    pub fn is_slot(&self) -> bool {
        matches!(self, Self::Slot(_))
    }
}

/// Where a character of the decorated buffer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    UserInput,
    Placeholder,
    Literal,
}

impl Provenance {
    pub fn is_decoration(self) -> bool {
        !matches!(self, Self::UserInput)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoratedChar {
    pub ch: char,
    pub provenance: Provenance,
}

impl DecoratedChar {
    pub fn user(ch: char) -> Self {
        Self {
            ch,
            provenance: Provenance::UserInput,
        }
    }

    pub fn placeholder(ch: char) -> Self {
        Self {
            ch,
            provenance: Provenance::Placeholder,
        }
    }

    pub fn literal(ch: char) -> Self {
        Self {
            ch,
            provenance: Provenance::Literal,
        }
    }
}

/// Keyboard hint derived from a reformat pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Unspecified,
    Numeric,
    Text,
}

/// Caret or selection as char offsets. Always normalized so `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn caret(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn clamp(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// Text of an edit field with the provenance of every character.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecoratedBuffer {
    chars: Vec<DecoratedChar>,
}

impl DecoratedBuffer {
    /// Buffer where every character counts as user input.
    pub fn from_raw(text: &str) -> Self {
        Self {
            chars: text.chars().map(DecoratedChar::user).collect(),
        }
    }

    pub(crate) fn from_chars(chars: Vec<DecoratedChar>) -> Self {
        Self { chars }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[DecoratedChar] {
        self.chars.as_slice()
    }

    pub fn get(&self, idx: usize) -> Option<DecoratedChar> {
        self.chars.get(idx).copied()
    }

    pub fn provenance_at(&self, idx: usize) -> Option<Provenance> {
        self.chars.get(idx).map(|item| item.provenance)
    }

    pub fn text(&self) -> String {
        self.chars.iter().map(|item| item.ch).collect()
    }

    /// Removes every placeholder and literal character.
    pub fn strip(&self) -> Vec<char> {
        self.chars
            .iter()
            .filter(|item| !item.provenance.is_decoration())
            .map(|item| item.ch)
            .collect()
    }

    pub fn raw_text(&self) -> String {
        self.strip().into_iter().collect()
    }

    /// Count of user-input characters before `offset`.
    pub fn raw_offset(&self, offset: usize) -> usize {
        self.chars[..offset.min(self.chars.len())]
            .iter()
            .filter(|item| !item.provenance.is_decoration())
            .count()
    }

    pub fn raw_selection(&self, selection: Selection) -> Selection {
        Selection::new(self.raw_offset(selection.start), self.raw_offset(selection.end))
    }

    pub fn user_input_count(&self) -> usize {
        self.raw_offset(self.chars.len())
    }

    /// Replaces `range` with `inserted`; the new characters are user input.
    pub fn splice(&mut self, range: Range<usize>, inserted: &str) {
        let end = range.end.min(self.chars.len());
        let start = range.start.min(end);
        self.chars
            .splice(start..end, inserted.chars().map(DecoratedChar::user));
    }
}
