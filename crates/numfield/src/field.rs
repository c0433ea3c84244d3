//! The stateful number field.
//!
//! [`NumberField`] glues the pieces together: it owns the display text,
//! the caret, the committed value, the spin auto-repeat state, and the
//! notification signals. The host feeds it [`FieldEvent`]s and applies
//! the [`EventResponse`]s to its text element.

use std::sync::Arc;
use std::time::Instant;

use numfield_core::Signal;

use crate::cursor::{self, Selection};
use crate::edit::{EditEngine, EditResult, SpinDirection};
use crate::error::ConfigError;
use crate::event::{EventResponse, FieldEvent, FieldUpdate, Key, ValueChange};
use crate::options::NumberFormatOptions;
use crate::provider::{IcuNumberFormat, NumberFormatProvider};
use crate::spin::SpinController;
use crate::value::{self, FieldValue};

/// A locale-aware numeric input field.
///
/// # Example
///
/// ```
/// use numfield::{FieldEvent, NumberField, NumberFormatOptions, Selection};
///
/// let mut field = NumberField::new(
///     NumberFormatOptions::new("en-US").with_max_fraction_digits(2),
/// ).unwrap();
/// field.handle_event(FieldEvent::CharInput { ch: '4', selection: Selection::caret(0) });
/// field.handle_event(FieldEvent::CharInput { ch: '2', selection: Selection::caret(1) });
/// assert_eq!(field.text(), "42");
/// assert_eq!(field.value(), Some(42.0));
/// ```
pub struct NumberField {
    engine: EditEngine,
    provider: Arc<dyn NumberFormatProvider>,
    text: String,
    caret: usize,
    value: FieldValue,
    focused: bool,
    spin: SpinController,
    value_changed: Signal<ValueChange>,
    editing_finished: Signal<Option<f64>>,
}

impl NumberField {
    /// Create a field backed by the ICU formatter for the options' locale.
    pub fn new(options: NumberFormatOptions) -> Result<Self, ConfigError> {
        let provider = Arc::new(IcuNumberFormat::new(options.locale())?);
        Self::with_provider(options, provider)
    }

    /// Create a field with a custom format provider.
    pub fn with_provider(
        options: NumberFormatOptions,
        provider: Arc<dyn NumberFormatProvider>,
    ) -> Result<Self, ConfigError> {
        let engine = EditEngine::new(options, Arc::clone(&provider))?;
        Ok(Self {
            engine,
            provider,
            text: String::new(),
            caret: 0,
            value: FieldValue::Empty,
            focused: false,
            spin: SpinController::new(),
            value_changed: Signal::new(),
            editing_finished: Signal::new(),
        })
    }

    // =========================================================================
    // State access
    // =========================================================================

    /// The current display text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The current caret position, in char offsets.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// The committed value, `None` when empty or sign-only.
    pub fn value(&self) -> Option<f64> {
        self.value.committed()
    }

    /// The active options.
    pub fn options(&self) -> &NumberFormatOptions {
        self.engine.options()
    }

    /// Whether the field currently has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Emitted whenever an edit changes the committed value.
    pub fn value_changed(&self) -> &Signal<ValueChange> {
        &self.value_changed
    }

    /// Emitted when editing is committed by Enter, Tab, or focus loss.
    pub fn editing_finished(&self) -> &Signal<Option<f64>> {
        &self.editing_finished
    }

    /// Set the value programmatically, clamping to the range and
    /// re-formatting the display.
    ///
    /// A push the field accepts verbatim is silent; `value_changed` is
    /// emitted only when the field had to adjust it (clamped to the range,
    /// or coerced from empty when empty values are not allowed), so the
    /// host learns the value it pushed is not the value the field holds.
    pub fn set_value(&mut self, value: Option<f64>) {
        let requested = FieldValue::from(value);
        let validated = value::validate(requested, self.engine.options());
        let validated = value::coerce_empty(validated, self.engine.options());
        let previous = self.value.committed();
        self.value = validated;
        self.text = self.engine.format_value(validated);
        self.caret = self.engine.profile().numeral_run_end(&self.text);
        if value::is_changed(requested, validated) {
            self.notify_value_changed(previous);
        }
    }

    /// Replace the options, re-deriving the locale profile and
    /// re-formatting the current value.
    ///
    /// When the locale tag changed a fresh ICU provider is built for it;
    /// otherwise the existing provider is kept.
    pub fn set_options(&mut self, options: NumberFormatOptions) -> Result<(), ConfigError> {
        if options.locale() != self.provider.locale() {
            self.provider = Arc::new(IcuNumberFormat::new(options.locale())?);
        }
        self.engine = EditEngine::new(options, Arc::clone(&self.provider))?;
        self.set_value(self.value.committed());
        Ok(())
    }

    // =========================================================================
    // Event handling
    // =========================================================================

    /// Interpret one input event.
    pub fn handle_event(&mut self, event: FieldEvent) -> EventResponse {
        match event {
            FieldEvent::KeyDown { key, selection } => self.handle_key(key, selection),
            FieldEvent::CharInput { ch, selection } => {
                match self.engine.insert_char(&self.text, selection, ch) {
                    Some(result) => self.apply(result),
                    // Every printable char is consumed; rejected ones leave
                    // the text alone
                    None => EventResponse::Suppressed,
                }
            }
            FieldEvent::Paste { text, selection } => {
                match self.engine.paste(&self.text, selection, &text) {
                    Some(result) => self.apply(result),
                    None => EventResponse::Suppressed,
                }
            }
            FieldEvent::Click { selection } => {
                if selection.is_range() {
                    self.caret = selection.end;
                    EventResponse::Ignored
                } else {
                    self.caret =
                        cursor::init_caret(&self.text, selection.start, self.engine.profile());
                    EventResponse::CaretMoved(self.caret)
                }
            }
            FieldEvent::Focus { selection } => {
                self.focused = true;
                self.caret =
                    cursor::init_caret(&self.text, selection.start, self.engine.profile());
                EventResponse::CaretMoved(self.caret)
            }
            FieldEvent::Blur => {
                self.focused = false;
                self.spin.release();
                self.commit()
            }
            FieldEvent::SpinPressed { direction } => {
                self.spin.press(direction, Instant::now());
                let result = self.engine.spin(&self.text, direction);
                self.apply(result)
            }
            FieldEvent::SpinReleased | FieldEvent::PointerLeft => {
                self.spin.release();
                EventResponse::Suppressed
            }
        }
    }

    fn handle_key(&mut self, key: Key, selection: Selection) -> EventResponse {
        match key {
            Key::ArrowUp => {
                let result = self.engine.spin(&self.text, SpinDirection::Up);
                self.apply(result)
            }
            Key::ArrowDown => {
                let result = self.engine.spin(&self.text, SpinDirection::Down);
                self.apply(result)
            }
            Key::ArrowLeft => {
                if cursor::allow_arrow_left(&self.text, selection.end, self.engine.profile()) {
                    self.caret = selection.end.saturating_sub(1);
                    EventResponse::Ignored
                } else {
                    EventResponse::Suppressed
                }
            }
            Key::ArrowRight => {
                if cursor::allow_arrow_right(&self.text, selection.end, self.engine.profile()) {
                    self.caret = selection.end + 1;
                    EventResponse::Ignored
                } else {
                    EventResponse::Suppressed
                }
            }
            Key::Home => match self.engine.options().min() {
                Some(min) => self.jump_to(min),
                None => EventResponse::Ignored,
            },
            Key::End => match self.engine.options().max() {
                Some(max) => self.jump_to(max),
                None => EventResponse::Ignored,
            },
            Key::Backspace => match self.engine.delete_backward(&self.text, selection) {
                Some(result) => self.apply(result),
                None => EventResponse::Suppressed,
            },
            Key::Delete => match self.engine.delete_forward(&self.text, selection) {
                Some(result) => self.apply(result),
                None => EventResponse::Suppressed,
            },
            Key::Enter => self.commit(),
            Key::Tab => {
                // Commit, then let the host move focus
                self.commit();
                EventResponse::Ignored
            }
        }
    }

    // =========================================================================
    // Spin repeat
    // =========================================================================

    /// Step up once, as if the up spin button were clicked.
    pub fn step_up(&mut self) -> EventResponse {
        let result = self.engine.spin(&self.text, SpinDirection::Up);
        self.apply(result)
    }

    /// Step down once.
    pub fn step_down(&mut self) -> EventResponse {
        let result = self.engine.spin(&self.text, SpinDirection::Down);
        self.apply(result)
    }

    /// When the next auto-repeat spin step is due, if a button is held.
    pub fn spin_deadline(&self) -> Option<Instant> {
        self.spin.deadline()
    }

    /// Apply one auto-repeat spin step if its deadline has passed.
    pub fn poll_spin(&mut self, now: Instant) -> Option<FieldUpdate> {
        let direction = self.spin.poll(now)?;
        let result = self.engine.spin(&self.text, direction);
        match self.apply(result) {
            EventResponse::Updated(update) => Some(update),
            _ => None,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn apply(&mut self, result: EditResult) -> EventResponse {
        let EditResult {
            text,
            caret,
            value,
            value_changed,
        } = result;
        let previous = self.value.committed();
        self.text = text;
        self.caret = caret;
        self.value = value;
        if value_changed {
            self.notify_value_changed(previous);
        }
        EventResponse::Updated(FieldUpdate {
            text: self.text.clone(),
            caret: self.caret,
        })
    }

    /// Validate, clamp, and re-format on commit.
    fn commit(&mut self) -> EventResponse {
        let parsed = self.engine.parser().parse(&self.text);
        let validated = value::validate(parsed, self.engine.options());
        let validated = value::coerce_empty(validated, self.engine.options());

        let changed = value::is_changed(self.value, validated);
        let previous = self.value.committed();
        self.value = validated;
        self.text = self.engine.format_value(validated);
        self.caret = self.caret.min(cursor::char_len(&self.text));
        if changed {
            self.notify_value_changed(previous);
        }
        self.editing_finished.emit(validated.committed());

        tracing::debug!(
            target: "numfield::edit",
            value = ?validated,
            text = %self.text,
            "committed"
        );
        EventResponse::Updated(FieldUpdate {
            text: self.text.clone(),
            caret: self.caret,
        })
    }

    fn jump_to(&mut self, target: f64) -> EventResponse {
        let validated = value::validate(FieldValue::Number(target), self.engine.options());
        let changed = value::is_changed(self.value, validated);
        let previous = self.value.committed();
        self.value = validated;
        self.text = self.engine.format_value(validated);
        self.caret = self.engine.profile().numeral_run_end(&self.text);
        if changed {
            self.notify_value_changed(previous);
        }
        EventResponse::Updated(FieldUpdate {
            text: self.text.clone(),
            caret: self.caret,
        })
    }

    fn notify_value_changed(&self, previous: Option<f64>) {
        self.value_changed.emit(ValueChange {
            previous,
            value: self.value.committed(),
            formatted: self.engine.format_value(self.value),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::FormatStyle;
    use parking_lot::Mutex;

    fn field(options: NumberFormatOptions) -> NumberField {
        NumberField::new(options).unwrap()
    }

    fn type_text(field: &mut NumberField, keys: &str) {
        for ch in keys.chars() {
            let sel = Selection::caret(field.caret());
            field.handle_event(FieldEvent::CharInput { ch, selection: sel });
        }
    }

    #[test]
    fn test_typing_builds_grouped_number() {
        let mut field = field(NumberFormatOptions::new("en-US"));
        type_text(&mut field, "1234567");
        assert_eq!(field.text(), "1,234,567");
        assert_eq!(field.value(), Some(1234567.0));
        assert_eq!(field.caret(), 9);
    }

    #[test]
    fn test_letters_are_suppressed() {
        let mut field = field(NumberFormatOptions::new("en-US"));
        type_text(&mut field, "12");
        let response = field.handle_event(FieldEvent::CharInput {
            ch: 'x',
            selection: Selection::caret(2),
        });
        assert_eq!(response, EventResponse::Suppressed);
        assert_eq!(field.text(), "12");
    }

    #[test]
    fn test_value_changed_signal_fires_once_per_change() {
        let mut field = field(NumberFormatOptions::new("en-US"));
        let seen: Arc<Mutex<Vec<(Option<f64>, Option<f64>)>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        field
            .value_changed()
            .connect(move |change: &ValueChange| {
                sink.lock().push((change.previous, change.value))
            });

        type_text(&mut field, "12");
        assert_eq!(
            seen.lock().as_slice(),
            &[(None, Some(1.0)), (Some(1.0), Some(12.0))]
        );
    }

    #[test]
    fn test_set_value_in_range_is_silent() {
        let mut field = field(NumberFormatOptions::new("en-US"));
        let count = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&count);
        field
            .value_changed()
            .connect(move |_: &ValueChange| *sink.lock() += 1);

        field.set_value(Some(1234.0));
        assert_eq!(field.text(), "1,234");
        assert_eq!(field.value(), Some(1234.0));
        assert_eq!(*count.lock(), 0);
    }

    #[test]
    fn test_set_value_clamps_and_notifies() {
        let mut field = field(NumberFormatOptions::new("en-US").with_range(0.0, 100.0));
        let seen: Arc<Mutex<Vec<Option<f64>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        field
            .value_changed()
            .connect(move |change: &ValueChange| sink.lock().push(change.value));

        // Out-of-range push: the host hears the value the field kept
        field.set_value(Some(250.0));
        assert_eq!(field.value(), Some(100.0));
        assert_eq!(field.text(), "100");
        assert_eq!(seen.lock().as_slice(), &[Some(100.0)]);

        // In-range push afterwards stays silent
        field.set_value(Some(50.0));
        assert_eq!(seen.lock().len(), 1);
    }

    #[test]
    fn test_set_value_empty_coercion_notifies() {
        let mut field = field(NumberFormatOptions::new("en-US").with_allow_empty(false));
        let seen: Arc<Mutex<Vec<Option<f64>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        field
            .value_changed()
            .connect(move |change: &ValueChange| sink.lock().push(change.value));

        field.set_value(Some(5.0));
        field.set_value(None);
        assert_eq!(field.value(), Some(0.0));
        assert_eq!(field.text(), "0");
        assert_eq!(seen.lock().as_slice(), &[Some(0.0)]);
    }

    #[test]
    fn test_commit_on_enter_clamps_and_notifies() {
        let mut field = field(NumberFormatOptions::new("en-US").with_max(100.0));
        let finished: Arc<Mutex<Vec<Option<f64>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&finished);
        field
            .editing_finished()
            .connect(move |v: &Option<f64>| sink.lock().push(*v));

        type_text(&mut field, "250");
        assert_eq!(field.text(), "250");
        field.handle_event(FieldEvent::KeyDown {
            key: Key::Enter,
            selection: Selection::caret(field.caret()),
        });
        assert_eq!(field.text(), "100");
        assert_eq!(field.value(), Some(100.0));
        assert_eq!(finished.lock().as_slice(), &[Some(100.0)]);
    }

    #[test]
    fn test_blur_commits_sign_only_to_empty() {
        let mut field = field(NumberFormatOptions::new("en-US"));
        type_text(&mut field, "-");
        assert_eq!(field.text(), "-");
        field.handle_event(FieldEvent::Blur);
        assert_eq!(field.text(), "");
        assert_eq!(field.value(), None);
    }

    #[test]
    fn test_blur_coerces_empty_to_zero_when_required() {
        let mut field = field(NumberFormatOptions::new("en-US").with_allow_empty(false));
        field.handle_event(FieldEvent::Blur);
        assert_eq!(field.text(), "0");
        assert_eq!(field.value(), Some(0.0));
    }

    #[test]
    fn test_arrow_up_down_steps() {
        let mut field = field(NumberFormatOptions::new("en-US").with_range(0.0, 10.0));
        field.set_value(Some(9.0));
        field.handle_event(FieldEvent::KeyDown {
            key: Key::ArrowUp,
            selection: Selection::caret(1),
        });
        assert_eq!(field.value(), Some(10.0));
        field.handle_event(FieldEvent::KeyDown {
            key: Key::ArrowUp,
            selection: Selection::caret(2),
        });
        assert_eq!(field.value(), Some(10.0));
        field.handle_event(FieldEvent::KeyDown {
            key: Key::ArrowDown,
            selection: Selection::caret(2),
        });
        assert_eq!(field.value(), Some(9.0));
    }

    #[test]
    fn test_home_end_jump_to_range_bounds() {
        let mut field = field(NumberFormatOptions::new("en-US").with_range(5.0, 500.0));
        let response = field.handle_event(FieldEvent::KeyDown {
            key: Key::Home,
            selection: Selection::caret(0),
        });
        assert!(matches!(response, EventResponse::Updated(_)));
        assert_eq!(field.value(), Some(5.0));

        field.handle_event(FieldEvent::KeyDown {
            key: Key::End,
            selection: Selection::caret(1),
        });
        assert_eq!(field.text(), "500");
        assert_eq!(field.value(), Some(500.0));
    }

    #[test]
    fn test_home_ignored_without_min() {
        let mut field = field(NumberFormatOptions::new("en-US"));
        let response = field.handle_event(FieldEvent::KeyDown {
            key: Key::Home,
            selection: Selection::caret(0),
        });
        assert_eq!(response, EventResponse::Ignored);
    }

    #[test]
    fn test_arrow_guards_inside_currency_affixes() {
        let mut field = field(
            NumberFormatOptions::new("en-US")
                .with_style(FormatStyle::Currency)
                .with_currency("USD"),
        );
        field.set_value(Some(5.0));
        assert_eq!(field.text(), "$5.00");
        // Caret after "$5.00" digits; moving right past the end is refused
        let response = field.handle_event(FieldEvent::KeyDown {
            key: Key::ArrowRight,
            selection: Selection::caret(5),
        });
        assert_eq!(response, EventResponse::Suppressed);
        // Caret just after "$"; moving left onto the symbol is refused
        let response = field.handle_event(FieldEvent::KeyDown {
            key: Key::ArrowLeft,
            selection: Selection::caret(1),
        });
        assert_eq!(response, EventResponse::Suppressed);
        // Moving left within the digits is fine
        let response = field.handle_event(FieldEvent::KeyDown {
            key: Key::ArrowLeft,
            selection: Selection::caret(3),
        });
        assert_eq!(response, EventResponse::Ignored);
    }

    #[test]
    fn test_click_lands_caret_inside_numeric_body() {
        let mut field = field(NumberFormatOptions::new("en-US").with_suffix(" km"));
        field.set_value(Some(42.0));
        assert_eq!(field.text(), "42 km");
        // Click in the suffix snaps back after the last digit
        let response = field.handle_event(FieldEvent::Click {
            selection: Selection::caret(5),
        });
        assert_eq!(response, EventResponse::CaretMoved(2));
    }

    #[test]
    fn test_spin_press_steps_immediately_and_repeats() {
        let mut field = field(NumberFormatOptions::new("en-US"));
        field.set_value(Some(5.0));
        field.handle_event(FieldEvent::SpinPressed {
            direction: SpinDirection::Up,
        });
        assert_eq!(field.value(), Some(6.0));
        let deadline = field.spin_deadline().expect("armed");

        assert!(field.poll_spin(deadline - std::time::Duration::from_millis(1)).is_none());
        let update = field.poll_spin(deadline).expect("repeat step");
        assert_eq!(update.text, "7");
        assert_eq!(field.value(), Some(7.0));

        field.handle_event(FieldEvent::SpinReleased);
        assert!(field.spin_deadline().is_none());
    }

    #[test]
    fn test_pointer_leaving_button_stops_repeat() {
        let mut field = field(NumberFormatOptions::new("en-US"));
        field.handle_event(FieldEvent::SpinPressed {
            direction: SpinDirection::Down,
        });
        assert!(field.spin_deadline().is_some());
        field.handle_event(FieldEvent::PointerLeft);
        assert!(field.spin_deadline().is_none());
    }

    #[test]
    fn test_paste_event() {
        let mut field = field(NumberFormatOptions::new("en-US").with_max_fraction_digits(2));
        let response = field.handle_event(FieldEvent::Paste {
            text: "1,234.5".to_string(),
            selection: Selection::caret(0),
        });
        assert!(matches!(response, EventResponse::Updated(_)));
        assert_eq!(field.value(), Some(1234.5));
        assert_eq!(field.text(), "1,234.5");
    }

    #[test]
    fn test_set_options_reformats() {
        let mut field = field(NumberFormatOptions::new("en-US"));
        field.set_value(Some(1234.5));
        field
            .set_options(NumberFormatOptions::new("de-DE").with_max_fraction_digits(2))
            .unwrap();
        assert_eq!(field.text(), "1.234,5");
        assert_eq!(field.value(), Some(1234.5));
    }

    #[test]
    fn test_backspace_and_delete_events() {
        let mut field = field(NumberFormatOptions::new("en-US"));
        type_text(&mut field, "1234");
        assert_eq!(field.text(), "1,234");
        field.handle_event(FieldEvent::KeyDown {
            key: Key::Backspace,
            selection: Selection::caret(5),
        });
        assert_eq!(field.text(), "123");
        field.handle_event(FieldEvent::KeyDown {
            key: Key::Delete,
            selection: Selection::caret(0),
        });
        assert_eq!(field.text(), "23");
    }

    #[test]
    fn test_de_locale_full_flow() {
        let mut field = field(NumberFormatOptions::new("de-DE").with_max_fraction_digits(2));
        type_text(&mut field, "1234,5");
        assert_eq!(field.text(), "1.234,5");
        assert_eq!(field.value(), Some(1234.5));
    }
}
