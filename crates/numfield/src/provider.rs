//! Locale-aware number formatting providers.
//!
//! The editing engine never talks to ICU directly; it goes through the
//! [`NumberFormatProvider`] capability. The production implementation,
//! [`IcuNumberFormat`], is backed by ICU4X with compiled locale data. Tests
//! and embedders with unusual conventions can supply their own provider.

use std::fmt;

use icu::decimal::input::Decimal;
use icu::decimal::options::{DecimalFormatterOptions, GroupingStrategy};
use icu::decimal::{DecimalFormatter, DecimalFormatterPreferences};
use icu::locale::Locale;

use crate::error::ConfigError;
use crate::options::{CurrencyDisplay, FormatStyle, NumberFormatOptions};

/// A single formatting request: the subset of the options a formatter needs,
/// with fraction digits already resolved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatRequest<'a> {
    /// Presentation style.
    pub style: FormatStyle,
    /// ISO 4217 currency code for the currency style.
    pub currency: Option<&'a str>,
    /// Currency rendering mode.
    pub currency_display: CurrencyDisplay,
    /// Whether grouping separators are emitted.
    pub use_grouping: bool,
    /// Resolved minimum fraction digits.
    pub min_fraction_digits: u8,
    /// Resolved maximum fraction digits.
    pub max_fraction_digits: u8,
}

impl<'a> FormatRequest<'a> {
    /// Build the full request an options set describes.
    pub fn from_options(options: &'a NumberFormatOptions) -> Self {
        let (min, max) = options.resolved_fraction_digits();
        Self {
            style: options.style(),
            currency: options.currency(),
            currency_display: options.currency_display(),
            use_grouping: options.use_grouping(),
            min_fraction_digits: min,
            max_fraction_digits: max,
        }
    }

    /// A plain decimal request without grouping, used for probing separator
    /// and digit glyphs.
    pub fn probe(min_fraction_digits: u8, max_fraction_digits: u8, use_grouping: bool) -> Self {
        Self {
            style: FormatStyle::Decimal,
            currency: None,
            currency_display: CurrencyDisplay::Symbol,
            use_grouping,
            min_fraction_digits,
            max_fraction_digits,
        }
    }
}

/// The resolved settings a provider actually applies for a request.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFormat {
    /// The locale the provider formats with.
    pub locale: String,
    /// Effective minimum fraction digits.
    pub min_fraction_digits: u8,
    /// Effective maximum fraction digits.
    pub max_fraction_digits: u8,
    /// Whether grouping separators are emitted.
    pub use_grouping: bool,
}

/// Capability to format numbers for one locale.
///
/// Implementations must be deterministic: the engine derives its character
/// classification by probing `format_number` and assumes later calls agree
/// with the probes.
pub trait NumberFormatProvider: Send + Sync {
    /// Format `value` according to `request`, including style adornments
    /// (currency symbol, percent sign) but not explicit prefix/suffix text.
    fn format_number(&self, value: f64, request: &FormatRequest<'_>) -> String;

    /// Report the settings actually applied for `request`.
    fn resolved_options(&self, request: &FormatRequest<'_>) -> ResolvedFormat;

    /// The BCP 47 tag of the locale this provider formats for.
    fn locale(&self) -> &str;
}

/// The current system locale as a BCP 47 tag, falling back to `en-US`.
pub fn system_locale() -> String {
    sys_locale::get_locale().unwrap_or_else(|| String::from("en-US"))
}

/// ICU4X-backed [`NumberFormatProvider`].
///
/// Decimal bodies come from `icu::decimal::DecimalFormatter`; currency and
/// percent adornments are applied with a conventional symbol/placement table
/// since ICU4X currency formatting is still maturing.
pub struct IcuNumberFormat {
    tag: String,
    locale: Locale,
}

impl fmt::Debug for IcuNumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IcuNumberFormat")
            .field("locale", &self.tag)
            .finish()
    }
}

impl IcuNumberFormat {
    /// Create a provider for a specific BCP 47 locale tag.
    pub fn new(tag: &str) -> Result<Self, ConfigError> {
        let locale: Locale = tag.parse().map_err(|_| ConfigError::InvalidLocale {
            tag: tag.to_string(),
        })?;
        Ok(Self {
            tag: tag.to_string(),
            locale,
        })
    }

    /// Create a provider for the current system locale, falling back to
    /// `en-US` when the system locale cannot be parsed.
    pub fn system() -> Self {
        let tag = system_locale();
        Self::new(&tag).unwrap_or_else(|_| {
            Self::new("en-US").expect("en-US is a valid locale tag")
        })
    }

    /// The language subtag, lowercased.
    fn language(&self) -> String {
        self.tag
            .split(['-', '_'])
            .next()
            .unwrap_or("en")
            .to_ascii_lowercase()
    }

    fn decimal_formatter(&self, use_grouping: bool) -> DecimalFormatter {
        let prefs = DecimalFormatterPreferences::from(&self.locale);
        let mut opts = DecimalFormatterOptions::default();
        opts.grouping_strategy = Some(if use_grouping {
            GroupingStrategy::Auto
        } else {
            GroupingStrategy::Never
        });
        DecimalFormatter::try_new(prefs, opts.clone())
            .unwrap_or_else(|_| {
                DecimalFormatter::try_new(Default::default(), opts)
                    .expect("root locale data is compiled in")
            })
    }

    /// Symbol for an ISO 4217 code, or the code itself when unknown.
    fn currency_symbol(code: &str, display: CurrencyDisplay) -> String {
        if display == CurrencyDisplay::Code {
            return code.to_string();
        }
        match code {
            "USD" => "$".to_string(),
            "EUR" => "\u{20ac}".to_string(), // €
            "GBP" => "\u{00a3}".to_string(), // £
            "JPY" => "\u{00a5}".to_string(), // ¥
            "CNY" => "\u{00a5}".to_string(), // ¥
            "KRW" => "\u{20a9}".to_string(), // ₩
            "INR" => "\u{20b9}".to_string(), // ₹
            "RUB" => "\u{20bd}".to_string(), // ₽
            "BRL" => "R$".to_string(),
            "CAD" => "CA$".to_string(),
            "AUD" => "A$".to_string(),
            "CHF" => "CHF".to_string(),
            "MXN" => "MX$".to_string(),
            _ => code.to_string(),
        }
    }

    /// Whether this locale places the currency after the amount.
    fn currency_is_suffix(&self) -> bool {
        matches!(
            self.language().as_str(),
            "de" | "fr" | "es" | "pt" | "it" | "nl" | "fi" | "sv" | "da" | "nb" | "nn" | "no"
                | "pl" | "cs" | "sk" | "hu" | "ro" | "bg" | "hr" | "sl" | "ru" | "uk" | "tr"
                | "el" | "lt" | "lv" | "et" | "is" | "vi"
        )
    }

    /// Whether this locale separates the percent sign with a space.
    fn percent_has_space(&self) -> bool {
        matches!(
            self.language().as_str(),
            "de" | "fr" | "es" | "pt" | "nl" | "it" | "da" | "fi" | "nb" | "nn" | "no" | "sv"
                | "pl" | "cs" | "sk" | "hu" | "ro" | "bg" | "hr" | "sl" | "tr" | "el" | "uk"
                | "ru" | "et" | "lv" | "lt" | "ar" | "he" | "fa" | "is"
        )
    }

    /// Wrap a formatted body in the style adornments for this request.
    fn adorn(&self, body: String, negative: bool, request: &FormatRequest<'_>) -> String {
        match request.style {
            FormatStyle::Decimal => body,
            FormatStyle::Percent => {
                if self.percent_has_space() {
                    format!("{body}\u{a0}%")
                } else {
                    format!("{body}%")
                }
            }
            FormatStyle::Currency => {
                let code = request.currency.unwrap_or("");
                let symbol = Self::currency_symbol(code, request.currency_display);
                let spaced = request.currency_display == CurrencyDisplay::Code;
                if self.currency_is_suffix() {
                    format!("{body}\u{a0}{symbol}")
                } else if negative {
                    // Keep the sign in front of the symbol: -$1.00
                    let unsigned: String = body.chars().skip(1).collect();
                    if spaced {
                        format!("-{symbol}\u{a0}{unsigned}")
                    } else {
                        format!("-{symbol}{unsigned}")
                    }
                } else if spaced {
                    format!("{symbol}\u{a0}{body}")
                } else {
                    format!("{symbol}{body}")
                }
            }
        }
    }
}

/// Convert a float to a `Decimal` with the requested fraction digit bounds.
///
/// Scales to an integer at the maximum fraction digits, rounds, then trims
/// trailing zeros down to the minimum. Magnitudes beyond `i64` saturate.
fn to_decimal(value: f64, min_fraction_digits: u8, max_fraction_digits: u8) -> Decimal {
    let scale = 10f64.powi(i32::from(max_fraction_digits));
    let scaled = (value * scale).round();
    let mut scaled = if scaled >= i64::MAX as f64 {
        i64::MAX
    } else if scaled <= i64::MIN as f64 {
        i64::MIN
    } else {
        scaled as i64
    };

    let mut digits = max_fraction_digits;
    while digits > min_fraction_digits && scaled % 10 == 0 {
        scaled /= 10;
        digits -= 1;
    }

    let mut decimal = Decimal::from(scaled);
    decimal.multiply_pow10(-i16::from(digits));
    decimal
}

impl NumberFormatProvider for IcuNumberFormat {
    fn format_number(&self, value: f64, request: &FormatRequest<'_>) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        let formatter = self.decimal_formatter(request.use_grouping);
        let decimal = to_decimal(
            value,
            request.min_fraction_digits,
            request.max_fraction_digits,
        );
        let body = formatter.format(&decimal).to_string();
        let negative = value < 0.0;
        self.adorn(body, negative, request)
    }

    fn resolved_options(&self, request: &FormatRequest<'_>) -> ResolvedFormat {
        ResolvedFormat {
            locale: self.tag.clone(),
            min_fraction_digits: request.min_fraction_digits,
            max_fraction_digits: request.max_fraction_digits.max(request.min_fraction_digits),
            use_grouping: request.use_grouping,
        }
    }

    fn locale(&self) -> &str {
        &self.tag
    }
}
