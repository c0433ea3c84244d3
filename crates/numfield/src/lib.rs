//! Locale-aware numeric text editing.
//!
//! `numfield` implements the editing model behind a numeric input field:
//! a canonical `f64` value on one side, a locale-formatted display string
//! on the other, and a set of edit operations (typing, deleting, pasting,
//! spinning) that keep the two in sync while preserving a sensible caret.
//!
//! Formatting and locale data come from [ICU4X](https://docs.rs/icu); the
//! editing layer never hard-codes separators or digit glyphs, it derives
//! a [`LocaleProfile`] by probing the formatter.
//!
//! The crate is host-agnostic: [`NumberField`] consumes [`FieldEvent`]s
//! and returns [`EventResponse`]s for the host's text element, and
//! notifies value changes through `numfield-core` signals.
//!
//! # Example
//!
//! ```
//! use numfield::{FieldEvent, NumberField, NumberFormatOptions, Selection};
//!
//! let mut field = NumberField::new(
//!     NumberFormatOptions::new("de-DE").with_max_fraction_digits(2),
//! ).unwrap();
//! field.set_value(Some(1234.5));
//! assert_eq!(field.text(), "1.234,5");
//! ```

pub mod cursor;
pub mod edit;
pub mod error;
pub mod event;
pub mod field;
pub mod format;
pub mod options;
pub mod parse;
pub mod profile;
pub mod provider;
pub mod spin;
pub mod value;

pub use cursor::Selection;
pub use edit::{EditEngine, EditResult, SpinDirection};
pub use error::ConfigError;
pub use event::{EventResponse, FieldEvent, FieldUpdate, Key, ValueChange};
pub use field::NumberField;
pub use format::Formatter;
pub use options::{CurrencyDisplay, FormatStyle, LocaleMatcher, NumberFormatOptions};
pub use parse::Parser;
pub use profile::LocaleProfile;
pub use provider::{
    FormatRequest, IcuNumberFormat, NumberFormatProvider, ResolvedFormat, system_locale,
};
pub use spin::{INITIAL_DELAY, REPEAT_INTERVAL, SpinController};
pub use value::FieldValue;
