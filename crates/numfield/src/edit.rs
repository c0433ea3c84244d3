//! The edit-op interpreter.
//!
//! [`EditEngine`] owns the derived locale profile and interprets every
//! destructive operation on the display string: typed characters, paste,
//! backspace, forward delete, range deletion, and spin steps. Each accepted
//! operation runs the same pipeline:
//!
//! 1. splice the raw display string at the selection
//! 2. parse the raw result into a [`FieldValue`]
//! 3. re-format the value canonically (re-attaching a mid-edit fraction
//!    tail where needed)
//! 4. reconcile the caret against the re-formatted text
//!
//! Rejected operations (minus where it is not allowed, fraction overflow,
//! a second decimal separator) return `None` and leave the field untouched.

use std::sync::Arc;

use crate::cursor::{self, OpKind, Selection, char_at, char_len, slice_chars};
use crate::error::ConfigError;
use crate::format::Formatter;
use crate::options::{FormatStyle, NumberFormatOptions};
use crate::parse::Parser;
use crate::profile::LocaleProfile;
use crate::provider::{FormatRequest, NumberFormatProvider};
use crate::value::{self, FieldValue};

/// Direction of a spin step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinDirection {
    /// Increment by the configured step.
    Up,
    /// Decrement by the configured step.
    Down,
}

impl SpinDirection {
    /// The signed unit for this direction.
    pub fn sign(self) -> f64 {
        match self {
            SpinDirection::Up => 1.0,
            SpinDirection::Down => -1.0,
        }
    }
}

/// The outcome of an accepted edit operation.
#[derive(Debug, Clone, PartialEq)]
pub struct EditResult {
    /// The new display string.
    pub text: String,
    /// The new caret position, in char offsets.
    pub caret: usize,
    /// The value the new display string parses to.
    pub value: FieldValue,
    /// Whether observers should be notified of a value change.
    pub value_changed: bool,
}

/// Interprets edit operations against one locale profile and options set.
pub struct EditEngine {
    options: NumberFormatOptions,
    profile: LocaleProfile,
    provider: Arc<dyn NumberFormatProvider>,
}

impl EditEngine {
    /// Create an engine; validates options and derives the locale profile.
    pub fn new(
        options: NumberFormatOptions,
        provider: Arc<dyn NumberFormatProvider>,
    ) -> Result<Self, ConfigError> {
        options.validate()?;
        let profile = LocaleProfile::derive(provider.as_ref(), &options);
        Ok(Self {
            options,
            profile,
            provider,
        })
    }

    /// The active options.
    pub fn options(&self) -> &NumberFormatOptions {
        &self.options
    }

    /// The derived locale profile.
    pub fn profile(&self) -> &LocaleProfile {
        &self.profile
    }

    /// A parser over the derived profile.
    pub fn parser(&self) -> Parser<'_> {
        Parser::new(&self.profile)
    }

    /// A formatter over the provider and options.
    pub fn formatter(&self) -> Formatter<'_> {
        Formatter::new(self.provider.as_ref(), &self.options)
    }

    /// Format a value into canonical display text.
    pub fn format_value(&self, value: FieldValue) -> String {
        self.formatter().format(value)
    }

    // =========================================================================
    // Insertion
    // =========================================================================

    /// Handle a typed character. Digits, the decimal separator, and the
    /// minus sign are interpreted; anything else is rejected.
    pub fn insert_char(&self, text: &str, sel: Selection, ch: char) -> Option<EditResult> {
        if ch.is_ascii_digit() {
            self.insert(text, sel, &ch.to_string())
        } else if self.profile.is_minus(ch) {
            self.insert_minus(text, sel)
        } else if self.profile.is_decimal_sep(ch) {
            self.insert_decimal(text, sel)
        } else {
            tracing::trace!(target: "numfield::edit", %ch, "rejected keystroke");
            None
        }
    }

    /// Handle pasted text: parse it with the locale rules, then insert its
    /// plain numeral rendition.
    pub fn paste(&self, text: &str, sel: Selection, clipboard: &str) -> Option<EditResult> {
        match self.parser().parse(clipboard) {
            FieldValue::Number(n) => self.insert(text, sel, &n.to_string()),
            FieldValue::SignOnly => self.insert_minus(text, sel),
            FieldValue::Empty => None,
        }
    }

    /// Insert plain numeral text (ASCII digits, optionally `-` and `.`) at
    /// the selection.
    fn insert(&self, text: &str, sel: Selection, inserted: &str) -> Option<EditResult> {
        if !self.options.allows_negative() && inserted.chars().any(|c| self.profile.is_minus(c)) {
            return None;
        }

        let decimal_idx = self.profile.decimal_index(text);
        let op = if sel.is_range() {
            OpKind::RangeInsert
        } else {
            OpKind::Insert
        };

        // Inserting after the decimal separator types over the fraction
        // digits in place, bounded by the resolved maximum
        if let Some(didx) = decimal_idx {
            if didx > 0 && sel.start > didx {
                let max_fraction = self
                    .provider
                    .resolved_options(&FormatRequest::from_options(&self.options))
                    .max_fraction_digits;
                let new_fraction = sel.start + char_len(inserted) - (didx + 1);
                if new_fraction > usize::from(max_fraction) {
                    return None;
                }
                let boundary = self.fraction_overwrite_boundary(text, sel.start);
                let raw = format!(
                    "{}{}{}{}",
                    slice_chars(text, 0, sel.start),
                    inserted,
                    slice_chars(text, sel.start + char_len(inserted), boundary),
                    slice_chars(text, boundary, char_len(text)),
                );
                return self.apply(text, sel, &raw, inserted, op);
            }
        }

        let raw = self.insert_text(text, inserted, sel.start, sel.end);
        self.apply(text, sel, &raw, inserted, op)
    }

    /// Where overwrite-insertion in the fraction stops: before the currency
    /// glyph or suffix when the caret sits left of them, else text end.
    fn fraction_overwrite_boundary(&self, text: &str, sel_start: usize) -> usize {
        let len = char_len(text);
        if let Some(cidx) = self.profile.currency_index(text) {
            if cidx >= sel_start {
                return cidx.saturating_sub(1);
            }
        }
        if let Some(sidx) = self.profile.suffix_index(text) {
            if sidx >= sel_start {
                return sidx;
            }
        }
        len
    }

    fn insert_minus(&self, text: &str, sel: Selection) -> Option<EditResult> {
        if !self.options.allows_negative() || sel.start != 0 {
            return None;
        }
        let raw = if self.profile.minus_index(text).is_none() || sel.end != 0 {
            self.insert_text(text, "-", 0, sel.end)
        } else {
            // Minus already present at a bare caret; re-run the pipeline so
            // the caret still advances
            text.to_string()
        };
        self.apply(text, sel, &raw, "-", OpKind::Insert)
    }

    fn insert_decimal(&self, text: &str, sel: Selection) -> Option<EditResult> {
        let sep = self.profile.decimal_sep().to_string();
        match self.profile.decimal_index(text) {
            // Caret right before the existing separator: suppress the
            // duplicate and step over it
            Some(didx) if didx > 0 && sel.start == didx => {
                self.apply(text, sel, text, &sep, OpKind::Insert)
            }
            // Separator inside the selection: it is being replaced
            Some(didx) if didx > sel.start && didx < sel.end => {
                let raw = self.insert_text(text, &sep, sel.start, sel.end);
                self.apply(text, sel, &raw, &sep, OpKind::Insert)
            }
            None if self.options.max_fraction_digits().is_some() => {
                let raw = self.insert_text(text, &sep, sel.start, sel.end);
                self.apply(text, sel, &raw, &sep, OpKind::Insert)
            }
            _ => None,
        }
    }

    /// Splice `inserted` into `text` over the char range `start..end`.
    ///
    /// Inserted text carrying its own decimal point (a paste) replaces a
    /// selection that spans the separator with the formatted number, fills
    /// an empty field, and is otherwise dropped; partial splices of a
    /// decimal quantity cannot preserve the fraction structure.
    fn insert_text(&self, text: &str, inserted: &str, start: usize, end: usize) -> String {
        let len = char_len(text);
        let has_own_decimal = inserted != "." && inserted.contains('.');
        if has_own_decimal {
            let selected = slice_chars(text, start, end);
            let formatted = match self.parser_ascii(inserted) {
                Some(n) => self.format_value(FieldValue::Number(n)),
                None => return text.to_string(),
            };
            return if self.profile.decimal_index(&selected).is_some_and(|i| i > 0) {
                format!(
                    "{}{}{}",
                    slice_chars(text, 0, start),
                    formatted,
                    slice_chars(text, end, len)
                )
            } else if text.is_empty() {
                formatted
            } else {
                text.to_string()
            };
        }

        let inserted = if self.profile.is_decimal_sep(char_at(inserted, 0).unwrap_or('\0'))
            || inserted == "."
        {
            self.profile.decimal_sep().to_string()
        } else {
            inserted.to_string()
        };

        if end.saturating_sub(start) == len {
            inserted
        } else if start == 0 {
            format!("{}{}", inserted, slice_chars(text, end, len))
        } else if end == len {
            format!("{}{}", slice_chars(text, 0, start), inserted)
        } else {
            format!(
                "{}{}{}",
                slice_chars(text, 0, start),
                inserted,
                slice_chars(text, end, len)
            )
        }
    }

    /// Parse a plain ASCII numeral string (as produced for pasting).
    fn parser_ascii(&self, text: &str) -> Option<f64> {
        text.parse::<f64>().ok().filter(|n| n.is_finite())
    }

    // =========================================================================
    // Deletion
    // =========================================================================

    /// Handle backspace.
    pub fn delete_backward(&self, text: &str, sel: Selection) -> Option<EditResult> {
        if sel.is_range() {
            let raw = delete_range_text(text, sel.start, sel.end);
            return self.apply(text, sel, &raw, "", OpKind::DeleteRange);
        }
        if sel.start == 0 {
            return None;
        }

        let delete_char = char_at(text, sel.start - 1)?;
        if !self.profile.is_numeral_like(delete_char) {
            return None;
        }

        let len = char_len(text);
        let decimal_idx = self.profile.decimal_index(text);
        let fraction_len = self.profile.fraction_length(text);

        let raw = if self.profile.is_group_sep(delete_char) {
            // Drop the digit left of the separator; re-formatting restores
            // the grouping
            format!(
                "{}{}",
                slice_chars(text, 0, sel.start.saturating_sub(2)),
                slice_chars(text, sel.start - 1, len)
            )
        } else if self.profile.is_decimal_sep(delete_char) {
            if fraction_len > 0 {
                // Fraction digits exist: step over the separator instead of
                // deleting it
                return Some(self.caret_only(text, sel.start - 1));
            }
            format!(
                "{}{}",
                slice_chars(text, 0, sel.start - 1),
                slice_chars(text, sel.start, len)
            )
        } else if decimal_idx.is_some_and(|d| d > 0 && sel.start > d) {
            let replacement = self.fraction_digit_replacement(fraction_len);
            format!(
                "{}{}{}",
                slice_chars(text, 0, sel.start - 1),
                replacement,
                slice_chars(text, sel.start, len)
            )
        } else if self.profile.decimal_index_without_prefix(text) == Some(1) {
            // Sole integer digit: zero it, and clear the field entirely
            // unless something non-zero remains
            let zeroed = format!(
                "{}{}{}",
                slice_chars(text, 0, sel.start - 1),
                '0',
                slice_chars(text, sel.start, len)
            );
            self.keep_if_positive(zeroed)
        } else {
            format!(
                "{}{}",
                slice_chars(text, 0, sel.start - 1),
                slice_chars(text, sel.start, len)
            )
        };

        self.apply(text, sel, &raw, "", OpKind::DeleteBackward)
    }

    /// Handle forward delete.
    pub fn delete_forward(&self, text: &str, sel: Selection) -> Option<EditResult> {
        if sel.is_range() {
            let raw = delete_range_text(text, sel.start, sel.end);
            return self.apply(text, sel, &raw, "", OpKind::DeleteRange);
        }

        let delete_char = char_at(text, sel.start)?;
        if !self.profile.is_numeral_like(delete_char) {
            return None;
        }

        let len = char_len(text);
        let decimal_idx = self.profile.decimal_index(text);
        let fraction_len = self.profile.fraction_length(text);

        let raw = if self.profile.is_group_sep(delete_char) {
            // Drop the separator and the digit right after it
            format!(
                "{}{}",
                slice_chars(text, 0, sel.start),
                slice_chars(text, sel.start + 2, len)
            )
        } else if self.profile.is_decimal_sep(delete_char) {
            if fraction_len > 0 {
                // Mirror backspace: the separator is a boundary to step
                // over, not content to delete
                return Some(self.caret_only(text, sel.start + 1));
            }
            format!(
                "{}{}",
                slice_chars(text, 0, sel.start),
                slice_chars(text, sel.start + 1, len)
            )
        } else if decimal_idx.is_some_and(|d| d > 0 && sel.start > d) {
            let replacement = self.fraction_digit_replacement(fraction_len);
            format!(
                "{}{}{}",
                slice_chars(text, 0, sel.start),
                replacement,
                slice_chars(text, sel.start + 1, len)
            )
        } else if self.profile.decimal_index_without_prefix(text) == Some(1) {
            let zeroed = format!(
                "{}{}{}",
                slice_chars(text, 0, sel.start),
                '0',
                slice_chars(text, sel.start + 1, len)
            );
            self.keep_if_positive(zeroed)
        } else {
            format!(
                "{}{}",
                slice_chars(text, 0, sel.start),
                slice_chars(text, sel.start + 1, len)
            )
        };

        self.apply(text, sel, &raw, "", OpKind::DeleteForward)
    }

    /// What deleting a fraction digit leaves behind: nothing while the
    /// fraction is longer than the decimal style minimum, a placeholder
    /// zero once at it.
    fn fraction_digit_replacement(&self, fraction_len: usize) -> &'static str {
        let min = usize::from(self.options.min_fraction_digits().unwrap_or(0));
        if self.options.style() == FormatStyle::Decimal && min < fraction_len {
            ""
        } else {
            "0"
        }
    }

    fn keep_if_positive(&self, raw: String) -> String {
        match self.parser().parse(&raw) {
            FieldValue::Number(n) if n > 0.0 => raw,
            _ => String::new(),
        }
    }

    fn caret_only(&self, text: &str, caret: usize) -> EditResult {
        EditResult {
            text: text.to_string(),
            caret: caret.min(char_len(text)),
            value: self.parser().parse(text),
            value_changed: false,
        }
    }

    // =========================================================================
    // Spin
    // =========================================================================

    /// Step the current value by the configured step, clamped to the range.
    ///
    /// An empty or sign-only field steps from zero.
    pub fn spin(&self, text: &str, direction: SpinDirection) -> EditResult {
        let current = self
            .parser()
            .parse(text)
            .as_number()
            .unwrap_or(0.0);
        let stepped = current + self.options.step() * direction.sign();
        let new_value = value::validate(FieldValue::Number(stepped), &self.options);

        let old_value = self.parser().parse(text);
        let new_text = self.format_value(new_value);
        let caret = cursor::caret_after_edit(
            OpKind::Spin,
            text,
            &new_text,
            Selection::caret(0),
            "",
            &self.profile,
        );
        EditResult {
            text: new_text,
            caret,
            value: new_value,
            value_changed: value::is_changed(old_value, new_value),
        }
    }

    // =========================================================================
    // Pipeline tail
    // =========================================================================

    /// Parse the raw spliced text, re-format, reconcile the caret, and
    /// detect the value transition.
    fn apply(
        &self,
        old_text: &str,
        sel: Selection,
        raw: &str,
        inserted: &str,
        op: OpKind,
    ) -> Option<EditResult> {
        let old_value = self.parser().parse(old_text);
        let parsed = value::coerce_empty(self.parser().parse(raw), &self.options);

        let formatted = self.format_value(parsed);
        let new_text = if formatted != raw {
            self.formatter().concat_values(&formatted, raw, &self.profile)
        } else {
            formatted
        };

        let caret = cursor::caret_after_edit(op, old_text, &new_text, sel, inserted, &self.profile);

        tracing::debug!(
            target: "numfield::edit",
            ?op,
            raw,
            new = %numfield_core::CaretDisplay::new(&new_text, caret),
            "applied edit"
        );

        Some(EditResult {
            text: new_text,
            caret,
            value: parsed,
            value_changed: value::is_changed(old_value, parsed),
        })
    }
}

/// Remove the char range `start..end` from `text`.
fn delete_range_text(text: &str, start: usize, end: usize) -> String {
    let len = char_len(text);
    if end - start == len {
        String::new()
    } else if start == 0 {
        slice_chars(text, end, len)
    } else if end == len {
        slice_chars(text, 0, start)
    } else {
        format!("{}{}", slice_chars(text, 0, start), slice_chars(text, end, len))
    }
}
