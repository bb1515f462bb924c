use super::model::{
    DecoratedBuffer, DecoratedChar, InputMode, MaskToken, Provenance, Selection, SlotClass,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reformatted {
    pub buffer: DecoratedBuffer,
    /// Selection in decorated offsets.
    pub selection: Selection,
    pub input_mode: InputMode,
}

/// Raw offset waiting to be placed in the decorated output.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    raw: usize,
    resolved: Option<usize>,
}

impl Anchor {
    fn new(raw: usize) -> Self {
        Self {
            raw,
            resolved: None,
        }
    }

    /// Pins the anchor the first time the raw cursor reaches it. Output
    /// emitted afterwards lands behind the anchor.
    fn settle(&mut self, raw_cursor: usize, out_len: usize) {
        if self.resolved.is_none() && raw_cursor >= self.raw {
            self.resolved = Some(out_len);
        }
    }

    fn finish(self, out_len: usize) -> usize {
        self.resolved.unwrap_or(out_len).min(out_len)
    }
}

/// Matches `raw` input against the mask tokens and renders the decorated
/// buffer.
///
/// `raw_selection` is expressed in raw offsets (user-input characters before
/// each bound). Input characters that do not fit their slot are dropped;
/// input beyond the last slot is truncated.
pub fn reformat(
    tokens: &[MaskToken],
    raw: &[char],
    placeholder: char,
    raw_selection: Selection,
) -> Reformatted {
    let mut out = Vec::<DecoratedChar>::with_capacity(tokens.len());
    let mut raw_idx = 0usize;
    let mut matched = 0usize;
    let mut numeric_only = true;
    let mut start = Anchor::new(raw_selection.start);
    let mut end = Anchor::new(raw_selection.end);

    start.settle(raw_idx, out.len());
    end.settle(raw_idx, out.len());

    for token in tokens {
        match *token {
            MaskToken::Literal(ch) => out.push(DecoratedChar::literal(ch)),
            MaskToken::Slot(class) => {
                numeric_only &= class == SlotClass::Digit;
                loop {
                    let Some(&ch) = raw.get(raw_idx) else {
                        out.push(DecoratedChar::placeholder(placeholder));
                        break;
                    };
                    raw_idx += 1;
                    let accepted = class.accepts(ch);
                    if accepted {
                        out.push(DecoratedChar::user(ch));
                        matched += 1;
                    } else {
                        tracing::trace!(?ch, ?class, "dropping input that does not fit slot");
                    }
                    start.settle(raw_idx, out.len());
                    end.settle(raw_idx, out.len());
                    if accepted {
                        break;
                    }
                }
            }
        }
    }

    let truncated = raw.len().saturating_sub(raw_idx);
    if truncated > 0 {
        tracing::trace!(truncated, "input exceeds mask length");
    }

    let len = out.len();
    let input_mode = if matched == 0 {
        InputMode::Unspecified
    } else if numeric_only {
        InputMode::Numeric
    } else {
        InputMode::Text
    };

    Reformatted {
        buffer: DecoratedBuffer::from_chars(out),
        selection: Selection::new(start.finish(len), end.finish(len)),
        input_mode,
    }
}

/// Formats plain input with no caret to track.
pub fn format_text(tokens: &[MaskToken], input: &str, placeholder: char) -> String {
    let raw: Vec<char> = input.chars().collect();
    reformat(tokens, raw.as_slice(), placeholder, Selection::default())
        .buffer
        .text()
}

/// Re-derives provenance for plain decorated text with a dry run of the
/// matcher.
///
/// Text and tokens are walked together. A character equal to the current
/// literal, or the placeholder glyph at a slot, is decoration and consumes
/// the token. A character the current slot accepts is user input and consumes
/// the token. Any other character is user input that leaves the token in
/// place, except a stray placeholder glyph, which stays decoration. Past the
/// end of the mask only placeholder glyphs are decoration.
pub fn classify(tokens: &[MaskToken], text: &str, placeholder: char) -> DecoratedBuffer {
    let mut token_idx = 0;
    let mut chars = Vec::with_capacity(text.len());

    for ch in text.chars() {
        let (provenance, consumed) = match tokens.get(token_idx) {
            Some(MaskToken::Literal(literal)) if *literal == ch => (Provenance::Literal, true),
            Some(MaskToken::Slot(_)) if ch == placeholder => (Provenance::Placeholder, true),
            Some(MaskToken::Slot(class)) if class.accepts(ch) => (Provenance::UserInput, true),
            _ if ch == placeholder => (Provenance::Placeholder, false),
            _ => (Provenance::UserInput, false),
        };
        if consumed {
            token_idx += 1;
        }
        chars.push(DecoratedChar { ch, provenance });
    }

    DecoratedBuffer::from_chars(chars)
}

/// Removes the mask decoration from plain text.
pub fn strip_text(tokens: &[MaskToken], text: &str, placeholder: char) -> String {
    classify(tokens, text, placeholder).raw_text()
}
