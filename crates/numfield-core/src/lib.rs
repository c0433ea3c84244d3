//! Core systems for numfield.
//!
//! This crate provides the foundation the editing engine is built on:
//!
//! - [`Signal`]: type-safe signal/slot change notification
//! - [`logging`]: tracing targets and debug rendering helpers
//!
//! It is deliberately small; everything locale- or edit-specific lives in
//! the `numfield` crate.

pub mod logging;
pub mod signal;

pub use logging::CaretDisplay;
pub use signal::{ConnectionGuard, ConnectionId, Signal};
