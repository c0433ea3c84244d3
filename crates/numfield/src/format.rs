//! Value to display text formatting.

use crate::options::NumberFormatOptions;
use crate::profile::LocaleProfile;
use crate::provider::{FormatRequest, NumberFormatProvider};
use crate::value::FieldValue;

/// Formats field values into display strings.
///
/// The provider renders the locale body (digits, separators, style
/// adornments); explicit prefix/suffix text from the options is wrapped
/// around the result.
#[derive(Clone, Copy)]
pub struct Formatter<'a> {
    provider: &'a dyn NumberFormatProvider,
    options: &'a NumberFormatOptions,
}

impl<'a> Formatter<'a> {
    /// Create a formatter over a provider and options.
    pub fn new(provider: &'a dyn NumberFormatProvider, options: &'a NumberFormatOptions) -> Self {
        Self { provider, options }
    }

    /// Format a field value. Empty renders as the empty string and a lone
    /// minus sign renders as itself.
    pub fn format(&self, value: FieldValue) -> String {
        match value {
            FieldValue::Empty => String::new(),
            FieldValue::SignOnly => String::from("-"),
            FieldValue::Number(n) => {
                let request = FormatRequest::from_options(self.options);
                let mut text = self.provider.format_number(n, &request);
                if let Some(prefix) = self.options.prefix() {
                    text = format!("{prefix}{text}");
                }
                if let Some(suffix) = self.options.suffix() {
                    text = format!("{text}{suffix}");
                }
                text
            }
        }
    }

    /// Keep a mid-edit fraction tail the canonical format would drop.
    ///
    /// While typing `12.` or `0.05` the raw spliced text carries decimal
    /// state (`12.`, `0.0`) that re-formatting the parsed value loses. When
    /// the raw text has a decimal separator, the canonical integer part is
    /// kept and the raw text's separator and tail are re-attached.
    pub fn concat_values(&self, formatted: &str, raw: &str, profile: &LocaleProfile) -> String {
        if formatted.is_empty() || raw.is_empty() {
            return formatted.to_string();
        }
        let Some(raw_decimal_idx) = profile.decimal_index(raw) else {
            return formatted.to_string();
        };
        let integer_part: String = match profile.decimal_index(formatted) {
            Some(idx) => formatted.chars().take(idx).collect(),
            None => formatted.to_string(),
        };
        let tail: String = raw.chars().skip(raw_decimal_idx).collect();
        format!("{integer_part}{tail}")
    }
}
