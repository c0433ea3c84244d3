//! Probe-derived locale character classification.
//!
//! Rather than hard-coding separator tables, the profile asks the format
//! provider to render a handful of probe values and reads the glyphs back
//! out of the results:
//!
//! - `9876543210` (no grouping) yields the digit glyphs, reversed so the
//!   glyph for digit `d` lands at index `d`
//! - `1000000` (grouping on) yields the grouping separator
//! - `1.1` yields the decimal separator
//! - `-1` yields the minus sign
//! - `1` formatted with the configured style yields the derived prefix and
//!   suffix around the numeral
//! - `1` formatted as currency yields the set of currency glyph characters
//!
//! Every classifier below is a pure function over the derived character
//! sets; the profile holds no formatter state and nothing mutable.

use crate::options::{FormatStyle, NumberFormatOptions};
use crate::provider::{FormatRequest, NumberFormatProvider};

/// Per-locale character sets and affixes used by parsing and editing.
#[derive(Debug, Clone, PartialEq)]
pub struct LocaleProfile {
    /// Digit glyphs; `digits[d]` renders the digit `d`.
    digits: [char; 10],
    /// Grouping separator.
    group_sep: Option<char>,
    /// Decimal separator.
    decimal_sep: char,
    /// Minus sign glyph.
    minus_sign: char,
    /// Characters that may appear as currency adornment (symbol letters,
    /// code letters, and the spacing between them).
    currency_chars: Vec<char>,
    /// Literal text before the numerals: explicit override, or derived from
    /// the styled probe.
    prefix: String,
    /// Literal text after the numerals.
    suffix: String,
}

impl LocaleProfile {
    /// Derive a profile by probing `provider` under `options`.
    pub fn derive(provider: &dyn NumberFormatProvider, options: &NumberFormatOptions) -> Self {
        let digits = derive_digits(provider);
        let group_sep = derive_group_sep(provider, &digits);
        let decimal_sep = derive_decimal_sep(provider, &digits);
        let minus_sign = derive_minus_sign(provider, &digits);
        let currency_chars = derive_currency_chars(provider, options, &digits);

        let (derived_prefix, derived_suffix) = derive_affixes(provider, options, &digits);
        let prefix = options
            .prefix()
            .map(str::to_string)
            .unwrap_or(derived_prefix);
        let suffix = options
            .suffix()
            .map(str::to_string)
            .unwrap_or(derived_suffix);

        tracing::debug!(
            target: "numfield::profile",
            locale = provider.locale(),
            decimal = %decimal_sep,
            group = ?group_sep,
            minus = %minus_sign,
            prefix = %prefix,
            suffix = %suffix,
            "derived locale profile"
        );

        Self {
            digits,
            group_sep,
            decimal_sep,
            minus_sign,
            currency_chars,
            prefix,
            suffix,
        }
    }

    // =========================================================================
    // Character classifiers
    // =========================================================================

    /// The numeric value of a digit glyph, accepting both the locale's
    /// glyphs and ASCII digits.
    pub fn digit_value(&self, c: char) -> Option<u8> {
        if let Some(d) = c.to_digit(10) {
            if c.is_ascii_digit() {
                return Some(d as u8);
            }
        }
        self.digits.iter().position(|&g| g == c).map(|i| i as u8)
    }

    /// Whether `c` is a digit glyph (locale or ASCII).
    pub fn is_numeral(&self, c: char) -> bool {
        self.digit_value(c).is_some()
    }

    /// Whether `c` is the grouping separator.
    pub fn is_group_sep(&self, c: char) -> bool {
        self.group_sep == Some(c)
    }

    /// Whether `c` is the decimal separator.
    pub fn is_decimal_sep(&self, c: char) -> bool {
        c == self.decimal_sep
    }

    /// Whether `c` is a minus sign, accepting both the locale glyph and the
    /// ASCII hyphen-minus.
    pub fn is_minus(&self, c: char) -> bool {
        c == self.minus_sign || c == '-'
    }

    /// Whether `c` belongs to the currency adornment character set.
    pub fn is_currency_char(&self, c: char) -> bool {
        self.currency_chars.contains(&c)
    }

    /// Whether `c` participates in the numeric body of the text: a numeral,
    /// separator, or minus sign. Edit operations only act on such chars.
    pub fn is_numeral_like(&self, c: char) -> bool {
        self.is_numeral(c) || self.is_group_sep(c) || self.is_decimal_sep(c) || self.is_minus(c)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The digit glyph for `d` (0..=9).
    pub fn digit(&self, d: u8) -> char {
        self.digits[usize::from(d) % 10]
    }

    /// The decimal separator.
    pub fn decimal_sep(&self) -> char {
        self.decimal_sep
    }

    /// The grouping separator, if the locale uses one.
    pub fn group_sep(&self) -> Option<char> {
        self.group_sep
    }

    /// The minus sign glyph.
    pub fn minus_sign(&self) -> char {
        self.minus_sign
    }

    /// The literal prefix text.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The literal suffix text.
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    // =========================================================================
    // Text queries
    // =========================================================================

    /// Char offset of the first decimal separator, if present.
    pub fn decimal_index(&self, text: &str) -> Option<usize> {
        text.chars().position(|c| self.is_decimal_sep(c))
    }

    /// Char offset of the first minus sign, if present.
    pub fn minus_index(&self, text: &str) -> Option<usize> {
        text.chars().position(|c| self.is_minus(c))
    }

    /// Char offset of the first currency glyph, if present.
    pub fn currency_index(&self, text: &str) -> Option<usize> {
        text.chars().position(|c| self.is_currency_char(c))
    }

    /// Char offset where the suffix text starts, if the suffix occurs.
    pub fn suffix_index(&self, text: &str) -> Option<usize> {
        if self.suffix.is_empty() {
            return None;
        }
        let byte_idx = text.find(&self.suffix)?;
        Some(text[..byte_idx].chars().count())
    }

    /// Char offset of the first numeral, if present.
    pub fn first_numeral_index(&self, text: &str) -> Option<usize> {
        text.chars().position(|c| self.is_numeral(c))
    }

    /// Char offset just past the last numeral-like char, or 0 for text with
    /// no numeric body.
    pub fn numeral_run_end(&self, text: &str) -> usize {
        let mut end = 0;
        for (i, c) in text.chars().enumerate() {
            if self.is_numeral_like(c) {
                end = i + 1;
            }
        }
        end
    }

    /// Number of fraction digit glyphs currently displayed.
    ///
    /// Suffix text, whitespace, and currency glyphs after the separator do
    /// not count.
    pub fn fraction_length(&self, text: &str) -> usize {
        let Some(idx) = self.decimal_index(text) else {
            return 0;
        };
        text.chars()
            .skip(idx + 1)
            .filter(|&c| self.is_numeral(c))
            .count()
    }

    /// Char offset of the decimal separator after stripping prefix text,
    /// whitespace, and currency glyphs. Used to recognize the sole leading
    /// integer digit.
    pub fn decimal_index_without_prefix(&self, text: &str) -> Option<usize> {
        let mut stripped = text.to_string();
        if !self.prefix.is_empty() {
            stripped = stripped.replacen(&self.prefix, "", 1);
        }
        let filtered: String = stripped
            .chars()
            .filter(|&c| !c.is_whitespace() && !self.is_currency_char(c))
            .collect();
        filtered.chars().position(|c| self.is_decimal_sep(c))
    }
}

// ============================================================================
// Probe derivations
// ============================================================================

fn derive_digits(provider: &dyn NumberFormatProvider) -> [char; 10] {
    let probe = provider.format_number(9_876_543_210.0, &FormatRequest::probe(0, 0, false));
    let glyphs: Vec<char> = probe.chars().rev().collect();
    if glyphs.len() == 10 {
        let mut digits = ['0'; 10];
        digits.copy_from_slice(&glyphs);
        digits
    } else {
        // Provider emitted something unexpected; ASCII keeps editing usable.
        ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9']
    }
}

fn derive_group_sep(provider: &dyn NumberFormatProvider, digits: &[char; 10]) -> Option<char> {
    let probe = provider.format_number(1_000_000.0, &FormatRequest::probe(0, 0, true));
    probe.chars().find(|c| !digits.contains(c))
}

fn derive_decimal_sep(provider: &dyn NumberFormatProvider, digits: &[char; 10]) -> char {
    let probe = provider.format_number(1.1, &FormatRequest::probe(1, 1, false));
    probe.chars().find(|c| !digits.contains(c)).unwrap_or('.')
}

fn derive_minus_sign(provider: &dyn NumberFormatProvider, digits: &[char; 10]) -> char {
    let probe = provider.format_number(-1.0, &FormatRequest::probe(0, 0, false));
    // Some locales wrap the sign in bidi controls; prefer a recognizable
    // minus glyph over whatever non-digit comes first.
    let mut candidates = probe.chars().filter(|c| !digits.contains(c));
    candidates
        .clone()
        .find(|&c| c == '-' || c == '\u{2212}')
        .or_else(|| candidates.next())
        .unwrap_or('-')
}

fn derive_currency_chars(
    provider: &dyn NumberFormatProvider,
    options: &NumberFormatOptions,
    digits: &[char; 10],
) -> Vec<char> {
    if options.style() != FormatStyle::Currency || options.currency().is_none() {
        return Vec::new();
    }
    let request = FormatRequest {
        min_fraction_digits: 0,
        max_fraction_digits: 0,
        ..FormatRequest::from_options(options)
    };
    let probe = provider.format_number(1.0, &request);
    let mut chars: Vec<char> = probe
        .chars()
        .filter(|c| !digits.contains(c) && !c.is_whitespace())
        .collect();
    chars.dedup();
    chars
}

fn derive_affixes(
    provider: &dyn NumberFormatProvider,
    options: &NumberFormatOptions,
    digits: &[char; 10],
) -> (String, String) {
    let request = FormatRequest {
        min_fraction_digits: 0,
        max_fraction_digits: 0,
        ..FormatRequest::from_options(options)
    };
    let probe = provider.format_number(1.0, &request);
    match probe.chars().position(|c| digits.contains(&c)) {
        Some(idx) => {
            let prefix: String = probe.chars().take(idx).collect();
            let suffix: String = probe.chars().skip(idx + 1).collect();
            (prefix, suffix)
        }
        None => (String::new(), String::new()),
    }
}
