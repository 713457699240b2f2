//! Diagnostic construction helpers.
//!
//! Each helper renders its arguments, picks the message template for the
//! call kind and hands the finished diagnostic to the severity policy. The
//! rest of the checker never touches message text.

use crate::ambiguity::CallKind;
use crate::call_info::CallSite;
use crate::state::CheckerState;
use lumen_common::{Diagnostic, Span, diagnostic_codes};
use lumen_resolve::Candidate;
use lumen_types::TypeId;

impl CheckerState<'_> {
    fn rendered_arguments(&self, call: &dyn CallSite) -> String {
        self.ctx
            .formatter()
            .format_argument_list(call.argument_types().unwrap_or(&[]))
    }

    fn call_span(&self, call: &dyn CallSite) -> Span {
        self.ctx.arena.span(call.highlight_element())
    }

    pub fn report_inapplicable(
        &mut self,
        kind: CallKind<'_>,
        call: &dyn CallSite,
        best: Option<&Candidate>,
    ) {
        let args = self.rendered_arguments(call);
        let span = self.call_span(call);
        // A method reference resolved through property syntax is really a
        // closure-valued property; the message says so.
        let property_syntax = best.is_some_and(|c| c.via_property_syntax);
        let diagnostic = match kind {
            CallKind::Method { name } if !property_syntax => {
                Diagnostic::from_code(diagnostic_codes::INAPPLICABLE_METHOD, span, &[name, &args])
            }
            CallKind::Method { .. } | CallKind::Closure => {
                Diagnostic::from_code(diagnostic_codes::INAPPLICABLE_CLOSURE, span, &[&args])
            }
            CallKind::Constructor { class_name } => Diagnostic::from_code(
                diagnostic_codes::INAPPLICABLE_CONSTRUCTOR,
                span,
                &[class_name, &args],
            ),
            CallKind::EnumConstant { enum_name } => Diagnostic::from_code(
                diagnostic_codes::INAPPLICABLE_CONSTRUCTOR,
                span,
                &[enum_name, &args],
            ),
            CallKind::Operator { symbol } => Diagnostic::from_code(
                diagnostic_codes::INAPPLICABLE_OPERATOR,
                span,
                &[symbol, &args],
            ),
            CallKind::Index => {
                Diagnostic::from_code(diagnostic_codes::INAPPLICABLE_INDEX, span, &[&args])
            }
        };
        self.emit(diagnostic);
    }

    /// One diagnostic per ambiguous site, however many candidates matched.
    pub fn report_ambiguous(&mut self, call: &dyn CallSite) {
        let args = self.rendered_arguments(call);
        let span = self.call_span(call);
        self.emit(Diagnostic::from_code(
            diagnostic_codes::AMBIGUOUS_CALL,
            span,
            &[&args],
        ));
    }

    pub fn report_unknown_arguments(&mut self, call: &dyn CallSite) {
        let span = self.call_span(call);
        self.emit(Diagnostic::from_code(
            diagnostic_codes::UNKNOWN_ARGUMENTS,
            span,
            &[],
        ));
    }

    pub fn report_category_mismatch(&mut self, call: &dyn CallSite, candidate: &Candidate) {
        let reg = self.ctx.registry;
        let Some(decl) = reg.decl(candidate.decl) else {
            return;
        };
        let name = decl.name.clone();
        // Name the class the helper actually came from; a resolver that did
        // not record one leaves the declaring class.
        let origin = reg.class(candidate.category.unwrap_or(decl.owner)).name.clone();
        let receiver = match call.qualifier_instance_type() {
            Some(ty) => self.ctx.formatter().format(ty),
            None => "?".to_string(),
        };
        let span = self.call_span(call);
        self.emit(Diagnostic::from_code(
            diagnostic_codes::CATEGORY_METHOD_MISMATCH,
            span,
            &[&name, &origin, &receiver],
        ));
    }

    /// `definite` picks between the hard mismatch and the likely-mismatch
    /// template; the latter is warning-class from the start.
    pub fn report_type_mismatch(
        &mut self,
        span: Span,
        target: TypeId,
        source: TypeId,
        definite: bool,
    ) {
        let formatter = self.ctx.formatter();
        let source_text = formatter.format(source);
        let target_text = formatter.format(target);
        let code = if definite {
            diagnostic_codes::TYPE_MISMATCH
        } else {
            diagnostic_codes::TYPE_MISMATCH_LIKELY
        };
        self.emit(Diagnostic::from_code(
            code,
            span,
            &[&source_text, &target_text],
        ));
    }
}
