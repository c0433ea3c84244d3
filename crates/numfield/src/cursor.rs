//! Caret placement and reconciliation.
//!
//! All positions here are char offsets into the display string, never byte
//! offsets; locale digits and currency glyphs are multi-byte in UTF-8 and a
//! caret between bytes is meaningless. After every edit the display string
//! is re-formatted, so the caret must be recomputed rather than trusted.

use crate::profile::LocaleProfile;

/// A selection in the display string, in char offsets.
///
/// `start == end` is a plain caret. Constructors normalize order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Inclusive start offset.
    pub start: usize,
    /// Exclusive end offset.
    pub end: usize,
}

impl Selection {
    /// A caret with no selected range.
    pub fn caret(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    /// A range selection; reversed bounds are swapped.
    pub fn range(a: usize, b: usize) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Whether any text is selected.
    pub fn is_range(&self) -> bool {
        self.start != self.end
    }

    /// Number of selected chars.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the selection is a bare caret.
    pub fn is_empty(&self) -> bool {
        !self.is_range()
    }
}

/// The kind of edit that produced a new display string.
///
/// Determines how the caret is reconciled after re-formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OpKind {
    /// Single insertion at a caret.
    Insert,
    /// Insertion replacing a range selection.
    RangeInsert,
    /// Backspace at a caret.
    DeleteBackward,
    /// Forward delete at a caret.
    DeleteForward,
    /// Deletion of a range selection.
    DeleteRange,
    /// Value stepped by a spin operation.
    Spin,
}

// ============================================================================
// Char-offset string helpers
// ============================================================================

/// Length in chars.
pub(crate) fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Char at a char offset.
pub(crate) fn char_at(s: &str, idx: usize) -> Option<char> {
    s.chars().nth(idx)
}

/// Substring between char offsets, clamped to the text.
pub(crate) fn slice_chars(s: &str, start: usize, end: usize) -> String {
    s.chars().skip(start).take(end.saturating_sub(start)).collect()
}

// ============================================================================
// Caret placement
// ============================================================================

/// Place the caret sensibly after a click or focus.
///
/// If the char at the caret is part of the numeric body the caret stays.
/// Otherwise scan left for the nearest numeric char and land just after it;
/// failing that, scan right and land on the first one.
pub(crate) fn init_caret(text: &str, caret: usize, profile: &LocaleProfile) -> usize {
    if char_at(text, caret).is_some_and(|c| profile.is_numeral_like(c)) {
        return caret;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut i = caret.min(chars.len());
    while i > 0 {
        if profile.is_numeral_like(chars[i - 1]) {
            return i;
        }
        i -= 1;
    }
    for (j, &c) in chars.iter().enumerate().skip(caret.min(chars.len())) {
        if profile.is_numeral_like(c) {
            return j;
        }
    }
    0
}

/// Reconcile the caret after an edit re-formatted the display string.
///
/// `old_text` is the display before the edit, `new_text` after, `sel` the
/// selection the edit was applied at, and `inserted` the text the user
/// inserted (empty for deletions and spins).
pub(crate) fn caret_after_edit(
    op: OpKind,
    old_text: &str,
    new_text: &str,
    sel: Selection,
    inserted: &str,
    profile: &LocaleProfile,
) -> usize {
    let old_len = char_len(old_text);
    let new_len = char_len(new_text);

    let caret = if old_len == 0 {
        // Field was empty; land after the inserted numerals, past any prefix
        init_caret(new_text, 0, profile) + char_len(inserted)
    } else if op == OpKind::RangeInsert {
        caret_after_range_insert(old_text, new_text, sel.start, inserted, profile)
    } else if op == OpKind::Spin {
        profile.numeral_run_end(new_text)
    } else if new_len == old_len {
        match op {
            OpKind::Insert | OpKind::DeleteForward => sel.end + 1,
            OpKind::DeleteBackward => sel.end.saturating_sub(1),
            _ => sel.end,
        }
    } else if op == OpKind::DeleteForward {
        // Re-grouping shifted the text; keep the caret on the same digit
        let prev = char_at(old_text, sel.end.saturating_sub(1));
        let next = char_at(old_text, sel.end);
        let diff = old_len as isize - new_len as isize;
        let next_is_group = next.is_some_and(|c| profile.is_group_sep(c));
        if next_is_group && diff == 1 {
            sel.end + 1
        } else if !next_is_group && prev.is_some_and(|c| profile.is_numeral_like(c)) {
            (sel.end as isize - diff + 1).max(0) as usize
        } else {
            sel.end
        }
    } else if old_text == "-" && op == OpKind::Insert {
        init_caret(new_text, 0, profile) + char_len(inserted) + 1
    } else {
        let shifted = sel.end as isize + (new_len as isize - old_len as isize);
        shifted.clamp(0, new_len as isize) as usize
    };

    let caret = caret.min(new_len);
    tracing::trace!(
        target: "numfield::cursor",
        ?op,
        old = %old_text,
        new = %numfield_core::CaretDisplay::new(new_text, caret),
        "caret reconciled"
    );
    caret
}

/// Recover the caret after an insertion replaced a range selection.
///
/// Counts the numeral glyphs before the selection plus the numerals
/// inserted, then walks the new text past that many numerals. Grouping
/// separators shift freely without pulling the caret off its digit.
fn caret_after_range_insert(
    old_text: &str,
    new_text: &str,
    sel_start: usize,
    inserted: &str,
    profile: &LocaleProfile,
) -> usize {
    let target = old_text
        .chars()
        .take(sel_start)
        .filter(|&c| profile.is_numeral(c))
        .count()
        + inserted.chars().filter(|&c| profile.is_numeral(c)).count();

    if target == 0 {
        return profile.first_numeral_index(new_text).unwrap_or(0);
    }

    let mut seen = 0;
    for (i, c) in new_text.chars().enumerate() {
        if profile.is_numeral(c) {
            seen += 1;
            if seen == target {
                return i + 1;
            }
        }
    }
    char_len(new_text)
}

// ============================================================================
// Arrow-key guards
// ============================================================================

/// Whether moving left would keep the caret in the numeric body.
pub(crate) fn allow_arrow_left(text: &str, caret: usize, profile: &LocaleProfile) -> bool {
    caret > 0 && char_at(text, caret - 1).is_some_and(|c| profile.is_numeral_like(c))
}

/// Whether moving right would keep the caret in the numeric body.
pub(crate) fn allow_arrow_right(text: &str, caret: usize, profile: &LocaleProfile) -> bool {
    char_at(text, caret).is_some_and(|c| profile.is_numeral_like(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{FormatStyle, NumberFormatOptions};
    use crate::provider::IcuNumberFormat;

    fn profile_for(options: &NumberFormatOptions) -> LocaleProfile {
        let provider = IcuNumberFormat::new(options.locale()).unwrap();
        LocaleProfile::derive(&provider, options)
    }

    fn usd_profile() -> LocaleProfile {
        profile_for(
            &NumberFormatOptions::new("en-US")
                .with_style(FormatStyle::Currency)
                .with_currency("USD"),
        )
    }

    #[test]
    fn test_selection_normalization() {
        let sel = Selection::range(5, 2);
        assert_eq!(sel, Selection { start: 2, end: 5 });
        assert!(sel.is_range());
        assert_eq!(sel.len(), 3);
        assert!(Selection::caret(3).is_empty());
    }

    #[test]
    fn test_char_helpers() {
        assert_eq!(char_len("\u{20ac}12"), 3);
        assert_eq!(char_at("\u{20ac}12", 1), Some('1'));
        assert_eq!(slice_chars("\u{20ac}12", 1, 3), "12");
        assert_eq!(slice_chars("abc", 2, 1), "");
    }

    #[test]
    fn test_init_caret_stays_on_numeral() {
        let profile = usd_profile();
        assert_eq!(init_caret("$1,234.56", 3, &profile), 3);
    }

    #[test]
    fn test_init_caret_skips_prefix() {
        let profile = usd_profile();
        // Click on the "$": nearest numeral is to the right
        assert_eq!(init_caret("$1,234.56", 0, &profile), 1);
    }

    #[test]
    fn test_init_caret_backs_off_suffix() {
        let profile = profile_for(&NumberFormatOptions::new("en-US").with_suffix(" km"));
        // Click past the suffix: land right after the last digit
        assert_eq!(init_caret("12.5 km", 7, &profile), 4);
    }

    #[test]
    fn test_init_caret_empty_text() {
        let profile = usd_profile();
        assert_eq!(init_caret("", 0, &profile), 0);
    }

    #[test]
    fn test_caret_same_length_rules() {
        let profile = profile_for(&NumberFormatOptions::new("en-US"));
        // Insert with no length change advances by one
        assert_eq!(
            caret_after_edit(OpKind::Insert, "1,234", "1,234", Selection::caret(3), "5", &profile),
            4
        );
        // Backspace with no length change steps back
        assert_eq!(
            caret_after_edit(
                OpKind::DeleteBackward,
                "12.50",
                "12.50",
                Selection::caret(4),
                "",
                &profile
            ),
            3
        );
        // Range delete keeps the edit point
        assert_eq!(
            caret_after_edit(
                OpKind::DeleteRange,
                "1,234",
                "1,234",
                Selection::range(2, 4),
                "",
                &profile
            ),
            4
        );
    }

    #[test]
    fn test_caret_empty_field_insert() {
        let profile = usd_profile();
        // Typing "5" into an empty currency field gives "$5.00"
        assert_eq!(
            caret_after_edit(OpKind::Insert, "", "$5.00", Selection::caret(0), "5", &profile),
            2
        );
    }

    #[test]
    fn test_caret_length_changed_insert() {
        let profile = profile_for(&NumberFormatOptions::new("en-US"));
        // "999" + "9" formats to "9,999": length grew by 2, caret follows
        assert_eq!(
            caret_after_edit(OpKind::Insert, "999", "9,999", Selection::caret(3), "9", &profile),
            5
        );
    }

    #[test]
    fn test_caret_spin_goes_to_numeral_end() {
        let profile = profile_for(&NumberFormatOptions::new("en-US").with_suffix(" km"));
        assert_eq!(
            caret_after_edit(OpKind::Spin, "9 km", "10 km", Selection::caret(1), "", &profile),
            2
        );
    }

    #[test]
    fn test_caret_range_insert_digit_counting() {
        let profile = profile_for(&NumberFormatOptions::new("en-US"));
        // "1,|234,567|" selecting "234,567", typing "9" -> "19"
        assert_eq!(
            caret_after_range_insert("1,234,567", "19", 2, "9", &profile),
            2
        );
        // "1|,234|" replaced by "9": caret lands after the second digit of "19"
        assert_eq!(caret_after_range_insert("1,234", "19", 1, "9", &profile), 2);
        // Whole text replaced: count only the inserted digit
        assert_eq!(caret_after_range_insert("1,234", "7", 0, "7", &profile), 1);
    }

    #[test]
    fn test_arrow_guards() {
        let profile = usd_profile();
        let text = "$1,234.56";
        // Caret at 1 is just after the "$": left would leave the body
        assert!(!allow_arrow_left(text, 1, &profile));
        assert!(allow_arrow_left(text, 2, &profile));
        // Caret at the end: right would leave the body
        assert!(!allow_arrow_right(text, 9, &profile));
        assert!(allow_arrow_right(text, 4, &profile));
    }
}
