use std::ops::Range;

pub fn char_count(value: &str) -> usize {
    value.chars().count()
}

pub fn clamp_cursor(cursor: usize, value: &str) -> usize {
    cursor.min(char_count(value))
}

pub fn byte_index_at_char(value: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    value
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(value.len())
}

/// Replaces the chars in `range` with `inserted`. Returns the clamped range
/// that was actually replaced.
pub fn replace_range(value: &mut String, range: Range<usize>, inserted: &str) -> Range<usize> {
    let end = clamp_cursor(range.end, value);
    let start = range.start.min(end);
    let byte_start = byte_index_at_char(value, start);
    let byte_end = byte_index_at_char(value, end);
    value.replace_range(byte_start..byte_end, inserted);
    start..end
}

#[cfg(test)]
mod tests {
    use super::{byte_index_at_char, char_count, clamp_cursor, replace_range};
    use pretty_assertions::assert_eq;

    #[test]
    fn counts_chars_not_bytes() {
        assert_eq!(char_count("héllo"), 5);
        assert_eq!(clamp_cursor(9, "héllo"), 5);
        assert_eq!(byte_index_at_char("héllo", 2), 3);
        assert_eq!(byte_index_at_char("héllo", 9), "héllo".len());
    }

    #[test]
    fn replace_range_handles_multibyte_text() {
        let mut value = String::from("ab€cd");
        let replaced = replace_range(&mut value, 2..3, "xy");
        assert_eq!(value, "abxycd");
        assert_eq!(replaced, 2..3);
    }

    #[test]
    fn replace_range_clamps_past_end() {
        let mut value = String::from("abc");
        let replaced = replace_range(&mut value, 5..9, "!");
        assert_eq!(value, "abc!");
        assert_eq!(replaced, 3..3);
    }
}
