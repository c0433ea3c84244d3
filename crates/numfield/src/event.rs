//! Input events and the field's responses to them.
//!
//! The host (a widget toolkit, a terminal UI, a test harness) translates
//! its native input into [`FieldEvent`]s and applies whatever
//! [`EventResponse`] comes back to its text element.

use crate::cursor::Selection;
use crate::edit::SpinDirection;

/// Non-character keys the field interprets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Backspace,
    Delete,
    Enter,
    Tab,
}

/// One input event delivered to the field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// A non-character key went down with the given selection.
    KeyDown { key: Key, selection: Selection },
    /// A printable character was typed.
    CharInput { ch: char, selection: Selection },
    /// Text was pasted over the selection.
    Paste { text: String, selection: Selection },
    /// The pointer placed the caret or selection.
    Click { selection: Selection },
    /// The field gained focus with the given selection.
    Focus { selection: Selection },
    /// The field lost focus.
    Blur,
    /// A spin button went down.
    SpinPressed { direction: SpinDirection },
    /// The held spin button was released.
    SpinReleased,
    /// The pointer left the spin button while held.
    PointerLeft,
}

/// What the host should do with its text element after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum EventResponse {
    /// Replace the text and caret.
    Updated(FieldUpdate),
    /// Move only the caret.
    CaretMoved(usize),
    /// The event was consumed without effect; the host must not apply
    /// its default behavior.
    Suppressed,
    /// The event is not the field's concern; default behavior applies.
    Ignored,
}

/// A text and caret replacement for the host's text element.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub text: String,
    pub caret: usize,
}

/// Payload of the value-changed signal.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    /// The value before the edit, `None` when the field was empty.
    pub previous: Option<f64>,
    /// The committed value, `None` when the field is empty.
    pub value: Option<f64>,
    /// The canonical display string for the new value.
    pub formatted: String,
}
