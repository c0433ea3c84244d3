//! Logging and debugging facilities for numfield.
//!
//! This module provides:
//! - Integration with the `tracing` crate for structured logging
//! - Debug rendering of display text with an inline caret marker
//!
//! # Tracing Integration
//!
//! numfield uses the `tracing` crate for instrumentation. To see logs, you
//! need to install a tracing subscriber in your application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```

use std::fmt;

/// Span names used throughout numfield for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Edit operation span.
    pub const EDIT: &str = "numfield::edit";
    /// Spin auto-repeat span.
    pub const SPIN: &str = "numfield::spin";
    /// Signal emission span.
    pub const SIGNAL: &str = "numfield::signal";
    /// Locale profile derivation span.
    pub const PROFILE: &str = "numfield::profile";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "numfield_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "numfield_core::signal";
    /// Edit engine target.
    pub const EDIT: &str = "numfield::edit";
    /// Caret reconciliation target.
    pub const CURSOR: &str = "numfield::cursor";
    /// Spin controller target.
    pub const SPIN: &str = "numfield::spin";
    /// Locale profile target.
    pub const PROFILE: &str = "numfield::profile";
}

/// Renders a display string with an inline `|` caret marker for trace output.
///
/// The caret position is a char offset; positions past the end render the
/// marker at the end.
///
/// # Example
///
/// ```
/// use numfield_core::logging::CaretDisplay;
///
/// assert_eq!(CaretDisplay::new("1,234", 2).to_string(), "1,|234");
/// assert_eq!(CaretDisplay::new("42", 9).to_string(), "42|");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CaretDisplay<'a> {
    text: &'a str,
    caret: usize,
}

impl<'a> CaretDisplay<'a> {
    /// Create a caret display for `text` with the caret at char offset `caret`.
    pub fn new(text: &'a str, caret: usize) -> Self {
        Self { text, caret }
    }
}

impl fmt::Display for CaretDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut emitted = false;
        for (i, ch) in self.text.chars().enumerate() {
            if i == self.caret {
                f.write_str("|")?;
                emitted = true;
            }
            write!(f, "{}", ch)?;
        }
        if !emitted {
            f.write_str("|")?;
        }
        Ok(())
    }
}
