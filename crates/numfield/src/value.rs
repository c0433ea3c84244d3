//! Field value model.
//!
//! A numeric field distinguishes between holding a number, being empty, and
//! holding a bare minus sign mid-edit. [`FieldValue`] captures all three so
//! the edit pipeline never has to smuggle sentinels through strings.

use crate::options::NumberFormatOptions;

/// The semantic content of a numeric field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FieldValue {
    /// A concrete numeric value.
    Number(f64),
    /// Nothing entered.
    #[default]
    Empty,
    /// A lone minus sign; a transient state while typing a negative number.
    SignOnly,
}

impl FieldValue {
    /// The numeric value, if this is a number.
    pub fn as_number(self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The committed value: numbers commit as themselves, everything else
    /// commits as "no value".
    pub fn committed(self) -> Option<f64> {
        self.as_number()
    }

    /// Whether the field holds nothing.
    pub fn is_empty(self) -> bool {
        self == FieldValue::Empty
    }

    /// Whether the field holds a lone minus sign.
    pub fn is_sign_only(self) -> bool {
        self == FieldValue::SignOnly
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(n) => FieldValue::Number(n),
            None => FieldValue::Empty,
        }
    }
}

/// Clamp a value into the configured range and collapse non-numbers.
///
/// A lone minus sign validates to empty; it is never a committable value.
pub fn validate(value: FieldValue, options: &NumberFormatOptions) -> FieldValue {
    match value {
        FieldValue::Number(n) => {
            let mut n = n;
            if let Some(min) = options.min() {
                n = n.max(min);
            }
            if let Some(max) = options.max() {
                n = n.min(max);
            }
            FieldValue::Number(n)
        }
        FieldValue::Empty | FieldValue::SignOnly => FieldValue::Empty,
    }
}

/// Apply the empty-value policy: when empty values are not allowed, an empty
/// field reads as zero.
pub fn coerce_empty(value: FieldValue, options: &NumberFormatOptions) -> FieldValue {
    if value.is_empty() && !options.allow_empty() {
        FieldValue::Number(0.0)
    } else {
        value
    }
}

/// Whether a transition from `current` to `new` should notify observers.
///
/// Leaving a number for empty notifies; arriving at the same number does
/// not; a lone minus sign is treated as "no value yet" and never notifies
/// on its own.
pub fn is_changed(current: FieldValue, new: FieldValue) -> bool {
    let current = match current {
        FieldValue::SignOnly => FieldValue::Empty,
        other => other,
    };
    match (current, new) {
        (_, FieldValue::SignOnly) => false,
        (FieldValue::Number(_), FieldValue::Empty) => true,
        (FieldValue::Empty, FieldValue::Empty) => false,
        (FieldValue::Empty, FieldValue::Number(_)) => true,
        (FieldValue::Number(a), FieldValue::Number(b)) => a != b,
        (FieldValue::SignOnly, _) => unreachable!("normalized above"),
    }
}
