//! Call applicability and type-compatibility checking for Lumen.
//!
//! This crate is organized into several submodules:
//! - `context` - `CheckerContext` for collaborators and per-pass state
//! - `state` - `CheckerState`, the pass driver
//! - `call_info` - uniform call-site descriptors per call kind
//! - `applicability` - tri-state candidate filtering
//! - `ambiguity` - aggregation of per-candidate verdicts
//! - `conversion` - positioned assignment/cast/return/tuple verdicts
//! - `named_args` - named-argument validation against descriptors
//! - `policy` - context-sensitive severity mapping
//! - `error_reporter` - diagnostic construction helpers
//! - `visitor` - the arena walk dispatching each node
//!
//! The checker consumes an arena AST, a resolver, an expression typer, a
//! named-argument provider and a feature gate, and pushes diagnostics into
//! an append-only sink. It never parses, resolves names, or infers types
//! itself.

pub mod ambiguity;
pub mod applicability;
pub mod call_info;
pub mod context;
pub mod conversion;
pub mod error_reporter;
pub mod named_args;
pub mod policy;
pub mod state;
pub mod visitor;

pub mod diagnostics {
    pub use lumen_common::diagnostics::{
        Diagnostic, DiagnosticCategory, FixId, diagnostic_codes, format_message, message_for_code,
    };
}

pub use ambiguity::CallKind;
pub use applicability::{Applicability, CandidateVerdict};
pub use call_info::{
    CallSite, ConstructorCallInfo, DelegatingCallInfo, EnumConstantCallInfo, IndexCallInfo,
    MethodCallInfo, OperatorCallInfo,
};
pub use context::{CancelFlag, CheckerContext, CheckerOptions, DiagnosticsSink};
pub use conversion::{ConversionVerdict, Position};
pub use state::CheckerState;
