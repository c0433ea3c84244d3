//! Display text to value parsing.
//!
//! Parsing reverses formatting by stripping locale decoration in a fixed
//! order: suffix text, prefix text, whitespace, currency glyphs, grouping
//! separators; then the minus glyph, decimal separator, and digit glyphs
//! are mapped to their ASCII equivalents and the remainder is read as a
//! float. Any leftover character makes the parse fail, which reads as an
//! empty field.

use crate::profile::LocaleProfile;
use crate::value::FieldValue;

/// Parses display strings against one [`LocaleProfile`].
#[derive(Debug, Clone, Copy)]
pub struct Parser<'a> {
    profile: &'a LocaleProfile,
}

impl<'a> Parser<'a> {
    /// Create a parser over a derived profile.
    pub fn new(profile: &'a LocaleProfile) -> Self {
        Self { profile }
    }

    /// Parse display text into a field value.
    ///
    /// Empty text (after stripping decoration) is [`FieldValue::Empty`]; a
    /// lone minus sign is [`FieldValue::SignOnly`]; unparseable text is
    /// treated as empty.
    pub fn parse(&self, text: &str) -> FieldValue {
        let profile = self.profile;

        let mut stripped = text.to_string();
        if !profile.suffix().is_empty() {
            stripped = stripped.replace(profile.suffix(), "");
        }
        if !profile.prefix().is_empty() {
            stripped = stripped.replace(profile.prefix(), "");
        }

        let mut ascii = String::with_capacity(stripped.len());
        for c in stripped.trim().chars() {
            if c.is_whitespace() || is_format_control(c) {
                continue;
            }
            if profile.is_currency_char(c) || profile.is_group_sep(c) {
                continue;
            }
            if profile.is_minus(c) {
                ascii.push('-');
            } else if profile.is_decimal_sep(c) {
                ascii.push('.');
            } else if let Some(d) = profile.digit_value(c) {
                ascii.push(char::from(b'0' + d));
            } else {
                // Unknown char; keep it so the float parse rejects the text
                ascii.push(c);
            }
        }

        if ascii.is_empty() {
            return FieldValue::Empty;
        }
        if ascii == "-" {
            return FieldValue::SignOnly;
        }
        match ascii.parse::<f64>() {
            Ok(n) if n.is_finite() => FieldValue::Number(n),
            _ => FieldValue::Empty,
        }
    }
}

/// Invisible bidi/format controls some locales emit around signs.
fn is_format_control(c: char) -> bool {
    matches!(
        c,
        '\u{061c}' | '\u{200b}' | '\u{200e}' | '\u{200f}' | '\u{202a}'..='\u{202e}'
    )
}
