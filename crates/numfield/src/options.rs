//! Formatting and editing configuration.
//!
//! [`NumberFormatOptions`] collects everything that shapes how a value is
//! displayed and edited: locale, style, grouping, fraction digit bounds,
//! explicit prefix/suffix text, range constraints, and spin step.
//!
//! # Example
//!
//! ```
//! use numfield::{FormatStyle, NumberFormatOptions};
//!
//! let options = NumberFormatOptions::new("de-DE")
//!     .with_style(FormatStyle::Currency)
//!     .with_currency("EUR")
//!     .with_range(0.0, 10_000.0)
//!     .with_step(0.5);
//!
//! assert_eq!(options.resolved_fraction_digits(), (2, 2));
//! ```

use crate::error::ConfigError;

/// Presentation style for the formatted value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormatStyle {
    /// Plain decimal number.
    #[default]
    Decimal,
    /// Currency amount; requires a currency code.
    Currency,
    /// Percentage. The displayed magnitude equals the stored value, so a
    /// field showing `5%` holds `5.0`.
    Percent,
}

/// How a currency is rendered in the display text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CurrencyDisplay {
    /// A localized symbol such as `$` or `€`.
    #[default]
    Symbol,
    /// The ISO 4217 code, e.g. `USD`.
    Code,
}

/// Locale negotiation preference.
///
/// Advisory only; the ICU-backed provider performs its own fallback. Kept in
/// the options because changing it invalidates the derived locale profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LocaleMatcher {
    /// Best-fit matching (default).
    #[default]
    BestFit,
    /// Exact lookup matching.
    Lookup,
}

/// Default maximum fraction digits for the decimal style.
const DECIMAL_DEFAULT_MAX_FRACTION_DIGITS: u8 = 3;

/// Configuration for a numeric field.
///
/// Constructed with [`NumberFormatOptions::new`] and customized through
/// `with_*` builder methods or `set_*` mutators. [`validate`](Self::validate)
/// checks cross-field consistency; the field constructor calls it for you.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberFormatOptions {
    /// BCP 47 locale tag, e.g. "en-US" or "de-DE".
    locale: String,

    /// Locale negotiation preference.
    locale_matcher: LocaleMatcher,

    /// Presentation style.
    style: FormatStyle,

    /// ISO 4217 currency code, required for [`FormatStyle::Currency`].
    currency: Option<String>,

    /// Currency rendering mode.
    currency_display: CurrencyDisplay,

    /// Whether grouping separators are shown.
    use_grouping: bool,

    /// Explicit minimum fraction digits.
    min_fraction_digits: Option<u8>,

    /// Explicit maximum fraction digits.
    max_fraction_digits: Option<u8>,

    /// Literal text prepended to the formatted value.
    prefix: Option<String>,

    /// Literal text appended to the formatted value.
    suffix: Option<String>,

    /// Minimum accepted value.
    min: Option<f64>,

    /// Maximum accepted value.
    max: Option<f64>,

    /// Step applied by spin operations.
    step: f64,

    /// Whether an empty field commits as "no value" rather than zero.
    allow_empty: bool,
}

impl NumberFormatOptions {
    /// Create options for a specific locale with default settings:
    /// decimal style, grouping on, step 1, empty allowed, no range.
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            locale_matcher: LocaleMatcher::default(),
            style: FormatStyle::default(),
            currency: None,
            currency_display: CurrencyDisplay::default(),
            use_grouping: true,
            min_fraction_digits: None,
            max_fraction_digits: None,
            prefix: None,
            suffix: None,
            min: None,
            max: None,
            step: 1.0,
            allow_empty: true,
        }
    }

    // =========================================================================
    // Locale
    // =========================================================================

    /// Get the locale tag.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Set the locale tag.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// Set locale using builder pattern.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.set_locale(locale);
        self
    }

    /// Get the locale matcher preference.
    pub fn locale_matcher(&self) -> LocaleMatcher {
        self.locale_matcher
    }

    /// Set the locale matcher preference.
    pub fn set_locale_matcher(&mut self, matcher: LocaleMatcher) {
        self.locale_matcher = matcher;
    }

    /// Set locale matcher using builder pattern.
    pub fn with_locale_matcher(mut self, matcher: LocaleMatcher) -> Self {
        self.set_locale_matcher(matcher);
        self
    }

    // =========================================================================
    // Style
    // =========================================================================

    /// Get the presentation style.
    pub fn style(&self) -> FormatStyle {
        self.style
    }

    /// Set the presentation style.
    pub fn set_style(&mut self, style: FormatStyle) {
        self.style = style;
    }

    /// Set style using builder pattern.
    pub fn with_style(mut self, style: FormatStyle) -> Self {
        self.set_style(style);
        self
    }

    /// Get the currency code, if any.
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Set the currency code.
    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = Some(currency.into());
    }

    /// Set currency using builder pattern.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.set_currency(currency);
        self
    }

    /// Get the currency display mode.
    pub fn currency_display(&self) -> CurrencyDisplay {
        self.currency_display
    }

    /// Set the currency display mode.
    pub fn set_currency_display(&mut self, display: CurrencyDisplay) {
        self.currency_display = display;
    }

    /// Set currency display using builder pattern.
    pub fn with_currency_display(mut self, display: CurrencyDisplay) -> Self {
        self.set_currency_display(display);
        self
    }

    // =========================================================================
    // Digits and grouping
    // =========================================================================

    /// Whether grouping separators are shown.
    pub fn use_grouping(&self) -> bool {
        self.use_grouping
    }

    /// Enable or disable grouping separators.
    pub fn set_use_grouping(&mut self, use_grouping: bool) {
        self.use_grouping = use_grouping;
    }

    /// Set grouping using builder pattern.
    pub fn with_use_grouping(mut self, use_grouping: bool) -> Self {
        self.set_use_grouping(use_grouping);
        self
    }

    /// Get the explicit minimum fraction digits, if set.
    pub fn min_fraction_digits(&self) -> Option<u8> {
        self.min_fraction_digits
    }

    /// Set the minimum fraction digits.
    pub fn set_min_fraction_digits(&mut self, digits: u8) {
        self.min_fraction_digits = Some(digits);
    }

    /// Set minimum fraction digits using builder pattern.
    pub fn with_min_fraction_digits(mut self, digits: u8) -> Self {
        self.set_min_fraction_digits(digits);
        self
    }

    /// Get the explicit maximum fraction digits, if set.
    pub fn max_fraction_digits(&self) -> Option<u8> {
        self.max_fraction_digits
    }

    /// Set the maximum fraction digits.
    pub fn set_max_fraction_digits(&mut self, digits: u8) {
        self.max_fraction_digits = Some(digits);
    }

    /// Set maximum fraction digits using builder pattern.
    pub fn with_max_fraction_digits(mut self, digits: u8) -> Self {
        self.set_max_fraction_digits(digits);
        self
    }

    // =========================================================================
    // Prefix and suffix
    // =========================================================================

    /// Get the explicit prefix text, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// Set literal prefix text.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = Some(prefix.into());
    }

    /// Set prefix using builder pattern.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.set_prefix(prefix);
        self
    }

    /// Get the explicit suffix text, if any.
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// Set literal suffix text.
    pub fn set_suffix(&mut self, suffix: impl Into<String>) {
        self.suffix = Some(suffix.into());
    }

    /// Set suffix using builder pattern.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.set_suffix(suffix);
        self
    }

    // =========================================================================
    // Range, step, empty handling
    // =========================================================================

    /// Get the minimum accepted value, if any.
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// Set the minimum accepted value.
    pub fn set_min(&mut self, min: f64) {
        self.min = Some(min);
    }

    /// Set minimum using builder pattern.
    pub fn with_min(mut self, min: f64) -> Self {
        self.set_min(min);
        self
    }

    /// Get the maximum accepted value, if any.
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Set the maximum accepted value.
    pub fn set_max(&mut self, max: f64) {
        self.max = Some(max);
    }

    /// Set maximum using builder pattern.
    pub fn with_max(mut self, max: f64) -> Self {
        self.set_max(max);
        self
    }

    /// Set both range bounds using builder pattern.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.set_min(min);
        self.set_max(max);
        self
    }

    /// Get the spin step.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Set the spin step.
    pub fn set_step(&mut self, step: f64) {
        self.step = step;
    }

    /// Set step using builder pattern.
    pub fn with_step(mut self, step: f64) -> Self {
        self.set_step(step);
        self
    }

    /// Whether an empty field commits as "no value".
    pub fn allow_empty(&self) -> bool {
        self.allow_empty
    }

    /// Set whether an empty field commits as "no value". When disabled,
    /// clearing the field yields zero instead.
    pub fn set_allow_empty(&mut self, allow_empty: bool) {
        self.allow_empty = allow_empty;
    }

    /// Set empty handling using builder pattern.
    pub fn with_allow_empty(mut self, allow_empty: bool) -> Self {
        self.set_allow_empty(allow_empty);
        self
    }

    // =========================================================================
    // Derived queries
    // =========================================================================

    /// Whether the minus sign may be typed. Negative input is rejected as
    /// soon as a minimum of zero or above is configured.
    pub fn allows_negative(&self) -> bool {
        self.min.is_none_or(|min| min < 0.0)
    }

    /// Resolve the effective (minimum, maximum) fraction digits.
    ///
    /// Explicit settings win. Otherwise the style decides: decimal shows up
    /// to three fraction digits with none required, currency uses the
    /// currency's conventional digits for both bounds, percent shows none.
    pub fn resolved_fraction_digits(&self) -> (u8, u8) {
        let (style_min, style_max) = match self.style {
            FormatStyle::Decimal => (0, DECIMAL_DEFAULT_MAX_FRACTION_DIGITS),
            FormatStyle::Currency => {
                let digits = currency_fraction_digits(self.currency.as_deref().unwrap_or(""));
                (digits, digits)
            }
            FormatStyle::Percent => (0, 0),
        };
        let min = self.min_fraction_digits.unwrap_or(style_min);
        let max = self.max_fraction_digits.unwrap_or(style_max).max(min);
        (min, max)
    }

    /// Validate cross-field consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.style == FormatStyle::Currency && self.currency.is_none() {
            return Err(ConfigError::MissingCurrency);
        }
        if let (Some(min), Some(max)) = (self.min_fraction_digits, self.max_fraction_digits) {
            if min > max {
                return Err(ConfigError::FractionDigitsOutOfOrder { min, max });
            }
        }
        if let (Some(min), Some(max)) = (self.min, self.max) {
            if min > max {
                return Err(ConfigError::RangeOutOfOrder { min, max });
            }
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(ConfigError::InvalidStep { step: self.step });
        }
        Ok(())
    }
}

impl Default for NumberFormatOptions {
    fn default() -> Self {
        Self::new(crate::provider::system_locale())
    }
}

/// Conventional fraction digits for an ISO 4217 currency code.
///
/// Covers the common zero-digit and three-digit currencies; everything else
/// uses two.
pub(crate) fn currency_fraction_digits(code: &str) -> u8 {
    match code {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" => 0,
        "KWD" | "BHD" | "OMR" | "JOD" | "TND" => 3,
        _ => 2,
    }
}
