//! Masked text input: keeps an edit field formatted by a mask such as
//! `(999) 999-9999` while the user types, without losing the caret.
//!
//! ```
//! use maskedit::{EditBuffer, MaskedField};
//!
//! let mut field = MaskedField::new(EditBuffer::new(), "(999) 999-9999", '_');
//! field.edit(|host| host.insert_str("555"));
//! assert_eq!(field.value(false), "(555) ___-____");
//! assert_eq!(field.value(true), "555");
//! ```

pub mod config;
pub mod field;
pub mod mask;

pub use config::{ConfigError, MaskAttributes, MaskConfig};
pub use field::{EditBuffer, MaskedField, TextEdit, TextHost};
pub use mask::{DecoratedBuffer, InputMode, Mask, MaskToken, Provenance, Selection, SlotClass};
