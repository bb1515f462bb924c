use super::text_edit;
use crate::mask::{InputMode, Selection};

/// Change notification from a host: `removed` chars at `start` were replaced
/// by `inserted`. Offsets are in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub start: usize,
    pub removed: usize,
    pub inserted: String,
}

impl TextEdit {
    pub fn new(start: usize, removed: usize, inserted: impl Into<String>) -> Self {
        Self {
            start,
            removed,
            inserted: inserted.into(),
        }
    }
}

/// The text widget a masked field is attached to.
pub trait TextHost {
    fn text(&self) -> &str;
    fn selection(&self) -> Selection;
    fn set_text(&mut self, text: &str, selection: Selection);

    fn input_mode(&self) -> InputMode;
    fn set_input_mode(&mut self, mode: InputMode);

    /// Stop reporting changes until `attach_listener` is called.
    fn detach_listener(&mut self);
    fn attach_listener(&mut self);

    /// Drains change notifications queued since the last call.
    fn take_edits(&mut self) -> Vec<TextEdit>;
}

/// In-memory host with the editing operations of a single-line text widget.
#[derive(Debug, Clone)]
pub struct EditBuffer {
    value: String,
    selection: Selection,
    input_mode: InputMode,
    listening: bool,
    pending: Vec<TextEdit>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            selection: Selection::default(),
            input_mode: InputMode::Unspecified,
            listening: true,
            pending: Vec::new(),
        }
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        let mut host = Self::new();
        host.value = text.into();
        host.selection = Selection::caret(host.len());
        host
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn has_pending_edits(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        text_edit::char_count(self.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamp(self.len());
    }

    pub fn set_caret(&mut self, pos: usize) {
        self.set_selection(Selection::caret(pos));
    }

    pub fn select_all(&mut self) {
        self.selection = Selection::new(0, self.len());
    }

    /// Types `ch` over the current selection.
    pub fn insert_char(&mut self, ch: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf))
    }

    /// Pastes `text` over the current selection.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let selection = self.selection.clamp(self.len());
        let changed = self.replace(selection.start, selection.len(), text);
        self.selection = Selection::caret(selection.start + text_edit::char_count(text));
        changed
    }

    pub fn backspace(&mut self) -> bool {
        let selection = self.selection.clamp(self.len());
        if !selection.is_caret() {
            return self.delete_selection(selection);
        }
        if selection.start == 0 {
            return false;
        }
        let pos = selection.start - 1;
        self.selection = Selection::caret(pos);
        self.replace(pos, 1, "")
    }

    pub fn delete_forward(&mut self) -> bool {
        let selection = self.selection.clamp(self.len());
        if !selection.is_caret() {
            return self.delete_selection(selection);
        }
        if selection.start >= self.len() {
            return false;
        }
        self.replace(selection.start, 1, "")
    }

    fn delete_selection(&mut self, selection: Selection) -> bool {
        self.selection = Selection::caret(selection.start);
        self.replace(selection.start, selection.len(), "")
    }

    fn replace(&mut self, start: usize, removed: usize, inserted: &str) -> bool {
        if removed == 0 && inserted.is_empty() {
            return false;
        }
        let range = text_edit::replace_range(&mut self.value, start..start + removed, inserted);
        self.notify(TextEdit::new(range.start, range.len(), inserted));
        true
    }

    fn notify(&mut self, edit: TextEdit) {
        if self.listening {
            self.pending.push(edit);
        }
    }
}

impl Default for EditBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextHost for EditBuffer {
    fn text(&self) -> &str {
        self.value.as_str()
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_text(&mut self, text: &str, selection: Selection) {
        let removed = self.len();
        let changed = self.value != text;
        self.value.clear();
        self.value.push_str(text);
        self.selection = selection.clamp(self.len());
        if changed {
            self.notify(TextEdit::new(0, removed, text));
        }
    }

    fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    fn set_input_mode(&mut self, mode: InputMode) {
        self.input_mode = mode;
    }

    fn detach_listener(&mut self) {
        self.listening = false;
    }

    fn attach_listener(&mut self) {
        self.listening = true;
    }

    fn take_edits(&mut self) -> Vec<TextEdit> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::{EditBuffer, TextEdit, TextHost};
    use crate::mask::Selection;
    use pretty_assertions::assert_eq;

    #[test]
    fn typing_queues_one_edit_per_keystroke() {
        let mut host = EditBuffer::new();
        assert!(host.insert_char('a'));
        assert!(host.insert_char('b'));
        assert_eq!(host.text(), "ab");
        assert_eq!(host.selection(), Selection::caret(2));
        assert_eq!(
            host.take_edits(),
            vec![TextEdit::new(0, 0, "a"), TextEdit::new(1, 0, "b")]
        );
        assert!(!host.has_pending_edits());
    }

    #[test]
    fn paste_replaces_selection() {
        let mut host = EditBuffer::with_text("hello");
        host.set_selection(Selection::new(1, 4));
        host.insert_str("ipp");
        assert_eq!(host.text(), "hippo");
        assert_eq!(host.selection(), Selection::caret(4));
        assert_eq!(host.take_edits(), vec![TextEdit::new(1, 3, "ipp")]);
    }

    #[test]
    fn backspace_and_delete_at_boundaries() {
        let mut host = EditBuffer::with_text("ab");
        host.set_caret(0);
        assert!(!host.backspace());
        assert!(host.delete_forward());
        assert_eq!(host.text(), "b");

        host.set_caret(1);
        assert!(!host.delete_forward());
        assert!(host.backspace());
        assert_eq!(host.text(), "");
        assert_eq!(
            host.take_edits(),
            vec![TextEdit::new(0, 1, ""), TextEdit::new(0, 1, "")]
        );
    }

    #[test]
    fn backspace_removes_whole_selection() {
        let mut host = EditBuffer::with_text("abcdef");
        host.set_selection(Selection::new(4, 1));
        assert!(host.backspace());
        assert_eq!(host.text(), "aef");
        assert_eq!(host.selection(), Selection::caret(1));
    }

    #[test]
    fn detached_listener_queues_nothing() {
        let mut host = EditBuffer::new();
        host.detach_listener();
        host.insert_str("12");
        host.set_text("34", Selection::caret(1));
        assert!(!host.has_pending_edits());

        host.attach_listener();
        assert!(host.is_listening());
        host.set_text("34", Selection::caret(0));
        assert!(!host.has_pending_edits());
        host.set_text("5", Selection::caret(9));
        assert_eq!(host.selection(), Selection::caret(1));
        assert_eq!(host.take_edits(), vec![TextEdit::new(0, 2, "5")]);
    }

    #[test]
    fn select_all_spans_the_text() {
        let mut host = EditBuffer::with_text("a€c");
        host.select_all();
        assert_eq!(host.selection(), Selection::new(0, 3));
        assert_eq!(host.len(), 3);
        assert!(!host.is_empty());
    }
}
