//! Shared infrastructure for the Lumen compatibility checker.
//!
//! This crate holds the pieces every other crate agrees on: source spans and
//! the diagnostic model (categories, numeric codes, message templates).

pub mod diagnostics;
pub mod span;

pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, FixId, diagnostic_codes, format_message,
    message_for_code,
};
pub use span::Span;
