//! Pass driver.

use crate::context::{CheckerContext, DiagnosticsSink};
use lumen_ast::NodeIndex;
use lumen_common::Diagnostic;

/// One checking pass over one tree. The component modules (`applicability`,
/// `ambiguity`, `conversion`, `named_args`, `policy`, `visitor`) extend this
/// type with their methods; the struct itself only owns the context.
pub struct CheckerState<'a> {
    pub ctx: CheckerContext<'a>,
}

impl<'a> CheckerState<'a> {
    pub fn new(ctx: CheckerContext<'a>) -> Self {
        CheckerState { ctx }
    }

    /// Walk the tree rooted at `root`, emitting diagnostics into the
    /// context. Aborts between node visits when the cancel flag is set;
    /// diagnostics produced so far remain valid.
    pub fn check_root(&mut self, root: NodeIndex) {
        self.visit(root);
    }

    pub fn finish(self) -> Vec<Diagnostic> {
        self.ctx.diagnostics
    }

    pub fn drain_into(&mut self, sink: &mut dyn DiagnosticsSink) {
        for diagnostic in self.ctx.diagnostics.drain(..) {
            sink.push_diagnostic(diagnostic);
        }
    }
}
