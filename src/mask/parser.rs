use super::model::{MaskToken, SlotClass};

pub const DIGIT_MARKER: char = '9';
pub const LETTER_MARKER: char = 'A';
pub const ALPHANUMERIC_MARKER: char = '*';
pub const ANY_MARKER: char = '?';
pub const ESCAPE_CHAR: char = '\\';

pub(crate) fn slot_class(marker: char) -> Option<SlotClass> {
    match marker {
        DIGIT_MARKER => Some(SlotClass::Digit),
        LETTER_MARKER => Some(SlotClass::Letter),
        ALPHANUMERIC_MARKER => Some(SlotClass::AlphaNumeric),
        ANY_MARKER => Some(SlotClass::Any),
        _ => None,
    }
}

/// Compiles a mask string into tokens.
///
/// Any string is a valid mask. An escape at the very end of the mask has
/// nothing to escape and is dropped.
pub fn compile(mask: &str) -> Vec<MaskToken> {
    let mut tokens = Vec::<MaskToken>::with_capacity(mask.len());
    let mut escaped = false;

    for ch in mask.chars() {
        if escaped {
            tokens.push(MaskToken::Literal(ch));
            escaped = false;
            continue;
        }

        if ch == ESCAPE_CHAR {
            escaped = true;
            continue;
        }

        match slot_class(ch) {
            Some(class) => tokens.push(MaskToken::Slot(class)),
            None => tokens.push(MaskToken::Literal(ch)),
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::compile;
    use crate::mask::model::{MaskToken, SlotClass};
    use pretty_assertions::assert_eq;

    #[test]
    fn compiles_slots_and_literals() {
        assert_eq!(
            compile("(9A*?)"),
            vec![
                MaskToken::Literal('('),
                MaskToken::Slot(SlotClass::Digit),
                MaskToken::Slot(SlotClass::Letter),
                MaskToken::Slot(SlotClass::AlphaNumeric),
                MaskToken::Slot(SlotClass::Any),
                MaskToken::Literal(')'),
            ]
        );
    }

    #[test]
    fn escape_turns_marker_into_literal() {
        assert_eq!(
            compile("\\999"),
            vec![
                MaskToken::Literal('9'),
                MaskToken::Slot(SlotClass::Digit),
                MaskToken::Slot(SlotClass::Digit),
            ]
        );
    }

    #[test]
    fn escaped_escape_is_a_literal_backslash() {
        assert_eq!(
            compile("\\\\9"),
            vec![MaskToken::Literal('\\'), MaskToken::Slot(SlotClass::Digit)]
        );
    }

    #[test]
    fn escape_before_plain_character_is_transparent() {
        assert_eq!(compile("\\-"), vec![MaskToken::Literal('-')]);
    }

    #[test]
    fn trailing_escape_is_dropped() {
        assert_eq!(compile("9\\"), vec![MaskToken::Slot(SlotClass::Digit)]);
        assert!(compile("\\").is_empty());
    }

    #[test]
    fn lowercase_letters_are_literals() {
        assert_eq!(
            compile("a9"),
            vec![MaskToken::Literal('a'), MaskToken::Slot(SlotClass::Digit)]
        );
    }

    #[test]
    fn empty_mask_compiles_to_nothing() {
        assert!(compile("").is_empty());
    }
}
