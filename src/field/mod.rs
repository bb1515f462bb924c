mod guard;
mod host;
pub mod text_edit;

pub use guard::{ReformatFlag, ReformatGuard};
pub use host::{EditBuffer, TextEdit, TextHost};

use crate::config::{DEFAULT_PLACEHOLDER, MaskAttributes, MaskConfig};
use crate::mask::{self, DecoratedBuffer, InputMode, Mask, MaskToken, Selection};
use unicode_width::UnicodeWidthChar;

/// Keeps the text of a host widget formatted by a mask while the user edits
/// it.
///
/// Every change notification from the host triggers a reformat pass: decoration is
/// stripped, the remaining input is matched against the mask, and the host
/// receives the decorated text with the caret mapped onto it.
pub struct MaskedField<H: TextHost = EditBuffer> {
    host: H,
    mask: Mask,
    placeholder: char,
    buffer: DecoratedBuffer,
    flag: ReformatFlag,
}

impl<H: TextHost> MaskedField<H> {
    pub fn new(host: H, mask: impl Into<String>, placeholder: char) -> Self {
        let buffer = DecoratedBuffer::from_raw(host.text());
        let mut field = Self {
            host,
            mask: Mask::new(mask.into()),
            placeholder,
            buffer,
            flag: ReformatFlag::new(),
        };
        field.reformat();
        field
    }

    pub fn with_mask(host: H, mask: impl Into<String>) -> Self {
        Self::new(host, mask, DEFAULT_PLACEHOLDER)
    }

    pub fn from_config(host: H, config: &MaskConfig) -> Self {
        Self::new(host, config.mask.clone(), config.placeholder)
    }

    /// Explicit arguments take precedence over the attribute bag, see
    /// [`MaskConfig::resolve`].
    pub fn from_attributes(
        host: H,
        mask: &str,
        placeholder: char,
        attributes: &MaskAttributes,
    ) -> Self {
        Self::from_config(host, &MaskConfig::resolve(mask, placeholder, attributes))
    }

    pub fn phone_us(host: H) -> Self {
        Self::with_mask(host, mask::PHONE_US)
    }

    pub fn zip_us(host: H) -> Self {
        Self::with_mask(host, mask::ZIP_US)
    }

    pub fn date_dd_mm_yyyy(host: H) -> Self {
        Self::with_mask(host, mask::DATE_DD_MM_YYYY)
    }

    pub fn time_hh_mm(host: H) -> Self {
        Self::with_mask(host, mask::TIME_HH_MM)
    }

    pub fn mask(&self) -> &str {
        self.mask.as_str()
    }

    pub fn set_mask(&mut self, mask: impl Into<String>) {
        self.absorb_pending_edits();
        self.mask = Mask::new(mask.into());
        self.reformat();
    }

    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    pub fn set_placeholder(&mut self, placeholder: char) {
        self.absorb_pending_edits();
        self.placeholder = placeholder;
        self.reformat();
    }

    pub fn tokens(&self) -> &[MaskToken] {
        self.mask.tokens()
    }

    /// Decorated text, or only what the user entered when
    /// `strip_decoration` is set. Always reads the current host text, even
    /// with edits not yet processed.
    pub fn value(&self, strip_decoration: bool) -> String {
        let text = self.host.text();
        if !strip_decoration {
            return text.to_string();
        }
        if self.buffer.text() == text {
            self.buffer.raw_text()
        } else {
            mask::strip_text(self.tokens(), text, self.placeholder)
        }
    }

    pub fn input_mode(&self) -> InputMode {
        self.host.input_mode()
    }

    pub fn buffer(&self) -> &DecoratedBuffer {
        &self.buffer
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Direct access to the host. Changes made here are picked up by the
    /// next [`process_edits`](Self::process_edits).
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn is_reformatting(&self) -> bool {
        self.flag.is_active()
    }

    /// Display column of the caret.
    pub fn cursor_col(&self) -> usize {
        let caret = self.host.selection().end;
        self.host
            .text()
            .chars()
            .take(caret)
            .map(|ch| UnicodeWidthChar::width(ch).unwrap_or(0))
            .sum()
    }

    /// Runs a host mutation, then reformats for the changes it reported.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut H) -> R) -> R {
        let out = f(&mut self.host);
        self.process_edits();
        out
    }

    /// Replaces the whole content. The new text is treated as user input.
    pub fn set_text(&mut self, text: &str) {
        self.host.detach_listener();
        self.host
            .set_text(text, Selection::caret(text_edit::char_count(text)));
        self.host.attach_listener();
        self.buffer = DecoratedBuffer::from_raw(text);
        self.reformat();
    }

    /// Drains the host's change notifications and reformats once for the
    /// batch. Queued edits are sequential, so they are applied in order
    /// before matching. Returns the number of notifications handled.
    pub fn process_edits(&mut self) -> usize {
        let edits = self.host.take_edits();
        if edits.is_empty() {
            return 0;
        }
        if self.flag.is_active() {
            tracing::trace!("change during reformat pass ignored");
            return 0;
        }

        for edit in &edits {
            self.apply_edit(edit);
        }
        self.sync_with_host();
        self.reformat();
        edits.len()
    }

    /// Brings the tagged buffer up to date with the host without a pass.
    fn absorb_pending_edits(&mut self) {
        for edit in self.host.take_edits() {
            self.apply_edit(&edit);
        }
        self.sync_with_host();
    }

    /// Change hook for a single notification: applies `edit` to the tagged
    /// buffer and reformats.
    pub fn on_text_changed(&mut self, edit: &TextEdit) {
        if self.flag.is_active() {
            tracing::trace!("change during reformat pass ignored");
            return;
        }

        self.apply_edit(edit);
        self.sync_with_host();
        self.reformat();
    }

    fn apply_edit(&mut self, edit: &TextEdit) {
        self.buffer.splice(
            edit.start..edit.start.saturating_add(edit.removed),
            edit.inserted.as_str(),
        );
    }

    fn sync_with_host(&mut self) {
        if self.buffer.len() == text_edit::char_count(self.host.text())
            && self.buffer.text() == self.host.text()
        {
            return;
        }
        tracing::debug!("host text out of sync, re-deriving decoration");
        self.buffer = mask::classify(self.tokens(), self.host.text(), self.placeholder);
    }

    fn reformat(&mut self) {
        if self.mask.is_empty() {
            return;
        }
        let Some(_guard) = self.flag.acquire() else {
            tracing::trace!("reformat already running");
            return;
        };

        let selection = self.host.selection().clamp(self.buffer.len());
        let raw_selection = self.buffer.raw_selection(selection);
        let raw = self.buffer.strip();
        let out = mask::reformat(self.tokens(), raw.as_slice(), self.placeholder, raw_selection);

        tracing::debug!(
            mask = self.mask.as_str(),
            raw_len = raw.len(),
            caret = out.selection.end,
            "reformat pass"
        );

        let text = out.buffer.text();
        self.host.detach_listener();
        self.host.set_text(text.as_str(), out.selection);
        if self.host.input_mode() != out.input_mode {
            self.host.set_input_mode(out.input_mode);
        }
        self.host.attach_listener();
        self.buffer = out.buffer;
    }
}
