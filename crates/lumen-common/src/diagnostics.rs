//! Diagnostic model for the checker.
//!
//! Diagnostics are plain values: a category, a stable numeric code, a span and
//! a rendered message. Message templates live in a static table keyed by code
//! and are interpolated with positional `{0}`-style arguments, so the checker
//! core never hand-assembles user-facing text.
//!
//! Quick-fix handles are opaque: the checker records them on the diagnostic
//! and passes them through to whatever sink consumes the report.

use crate::span::Span;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticCategory {
    Warning,
    Error,
}

/// A message template entry in the static diagnostic table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Opaque quick-fix handle. The checker never inspects these; they are
/// registered by collaborators and forwarded untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixId(pub u32);

pub mod diagnostic_codes {
    pub const INAPPLICABLE_METHOD: u32 = 5001;
    pub const INAPPLICABLE_CLOSURE: u32 = 5002;
    pub const INAPPLICABLE_CONSTRUCTOR: u32 = 5003;
    pub const INAPPLICABLE_OPERATOR: u32 = 5004;
    pub const INAPPLICABLE_INDEX: u32 = 5005;
    pub const AMBIGUOUS_CALL: u32 = 5010;
    pub const TYPE_MISMATCH: u32 = 5020;
    pub const TYPE_MISMATCH_LIKELY: u32 = 5021;
    pub const UNKNOWN_ARGUMENTS: u32 = 5030;
    pub const NAMED_ARGUMENT_TYPE_MISMATCH: u32 = 5040;
    pub const TUPLE_ARITY_MISMATCH: u32 = 5050;
    pub const ENUM_CONSTANT_UNKNOWN: u32 = 5060;
    pub const ENUM_CONSTANT_UNVERIFIABLE: u32 = 5061;
    pub const CATEGORY_METHOD_MISMATCH: u32 = 5070;
}

pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::INAPPLICABLE_METHOD,
        category: DiagnosticCategory::Error,
        message: "'{0}' cannot be applied to '({1})'",
    },
    DiagnosticMessage {
        code: diagnostic_codes::INAPPLICABLE_CLOSURE,
        category: DiagnosticCategory::Error,
        message: "Closure cannot be called with arguments '({0})'",
    },
    DiagnosticMessage {
        code: diagnostic_codes::INAPPLICABLE_CONSTRUCTOR,
        category: DiagnosticCategory::Error,
        message: "Constructor '{0}' cannot be applied to '({1})'",
    },
    DiagnosticMessage {
        code: diagnostic_codes::INAPPLICABLE_OPERATOR,
        category: DiagnosticCategory::Error,
        message: "Operator '{0}' cannot be applied to '({1})'",
    },
    DiagnosticMessage {
        code: diagnostic_codes::INAPPLICABLE_INDEX,
        category: DiagnosticCategory::Error,
        message: "Index property cannot be applied to '({0})'",
    },
    DiagnosticMessage {
        code: diagnostic_codes::AMBIGUOUS_CALL,
        category: DiagnosticCategory::Error,
        message: "Call is ambiguous: arguments '({0})' match more than one candidate",
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_MISMATCH,
        category: DiagnosticCategory::Error,
        message: "Cannot convert '{0}' to '{1}'",
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_MISMATCH_LIKELY,
        category: DiagnosticCategory::Warning,
        message: "'{0}' may not convert to '{1}'",
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNKNOWN_ARGUMENTS,
        category: DiagnosticCategory::Warning,
        message: "Cannot infer argument types",
    },
    DiagnosticMessage {
        code: diagnostic_codes::NAMED_ARGUMENT_TYPE_MISMATCH,
        category: DiagnosticCategory::Error,
        message: "Named argument '{0}' expects {1}, found '{2}'",
    },
    DiagnosticMessage {
        code: diagnostic_codes::TUPLE_ARITY_MISMATCH,
        category: DiagnosticCategory::Error,
        message: "Incorrect number of values: expected {0}, found {1}",
    },
    DiagnosticMessage {
        code: diagnostic_codes::ENUM_CONSTANT_UNKNOWN,
        category: DiagnosticCategory::Error,
        message: "Cannot find enum constant '{0}' in '{1}'",
    },
    DiagnosticMessage {
        code: diagnostic_codes::ENUM_CONSTANT_UNVERIFIABLE,
        category: DiagnosticCategory::Warning,
        message: "Cannot verify enum constant value at compile time",
    },
    DiagnosticMessage {
        code: diagnostic_codes::CATEGORY_METHOD_MISMATCH,
        category: DiagnosticCategory::Error,
        message: "Category method '{0}' from '{1}' cannot be applied to receiver '{2}'",
    },
];

pub fn message_for_code(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub span: Span,
    pub message_text: String,
    pub fixes: Vec<FixId>,
}

impl Diagnostic {
    /// Build a diagnostic from the static message table, interpolating `args`.
    /// The category comes from the table; policy may adjust it afterwards.
    pub fn from_code(code: u32, span: Span, args: &[&str]) -> Self {
        let entry = message_for_code(code);
        let (category, template) = match entry {
            Some(m) => (m.category, m.message),
            None => (DiagnosticCategory::Error, "Unknown diagnostic"),
        };
        Self {
            category,
            code,
            span,
            message_text: format_message(template, args),
            fixes: Vec::new(),
        }
    }

    pub fn with_fix(mut self, fix: FixId) -> Self {
        self.fixes.push(fix);
        self
    }

    pub fn with_category(mut self, category: DiagnosticCategory) -> Self {
        self.category = category;
        self
    }
}
