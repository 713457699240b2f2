//! Context-sensitive severity policy.
//!
//! Every diagnostic the checker produces passes through `emit` exactly once.
//! Warnings always go through unchanged. Error-class verdicts depend on
//! where the offending code sits: inside a static-discipline region the
//! always-on strict checker already reports them, so this pass suppresses
//! its copy (unless that checker is disabled, in which case the error stands
//! as-is); in dynamic code the verdict is advisory and is downgraded to a
//! warning, keeping its original code.

use crate::state::CheckerState;
use lumen_common::{Diagnostic, DiagnosticCategory};

impl CheckerState<'_> {
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.category == DiagnosticCategory::Warning {
            self.ctx.diagnostics.push(diagnostic);
            return;
        }
        if self.ctx.in_static_region() {
            if self.ctx.options.strict_checker_active {
                tracing::debug!(code = diagnostic.code, "suppressed in static region");
                return;
            }
            self.ctx.diagnostics.push(diagnostic);
            return;
        }
        self.ctx
            .diagnostics
            .push(diagnostic.with_category(DiagnosticCategory::Warning));
    }
}
