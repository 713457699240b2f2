//! Per-site verdict aggregation.
//!
//! `process_call` is the single entry point for every call-shaped node. When
//! the resolver pre-selected a best match, that candidate alone decides the
//! outcome. Otherwise the whole candidate list is scored: no applicable
//! candidate means an inapplicability diagnostic (or a weaker warning when
//! something was only conditionally ruled out), exactly one means the call
//! is fine, and two or more applicable candidates are reported as a single
//! ambiguity regardless of how many matched.

use crate::applicability::{Applicability, CandidateVerdict};
use crate::call_info::CallSite;
use crate::state::CheckerState;

/// What kind of construct the call site came from; selects the message
/// template for inapplicability reports.
#[derive(Copy, Clone, Debug)]
pub enum CallKind<'a> {
    Method { name: &'a str },
    Closure,
    Constructor { class_name: &'a str },
    EnumConstant { enum_name: &'a str },
    Operator { symbol: &'a str },
    Index,
}

impl CheckerState<'_> {
    pub fn process_call(&mut self, kind: CallKind<'_>, call: &dyn CallSite) {
        if call.argument_types().is_none() {
            self.report_unknown_arguments(call);
            return;
        }

        // The resolver already disambiguated; trust its pick.
        if let Some(best) = call.resolve() {
            let Some(decl) = self.candidate_decl(best) else {
                return;
            };
            match self.check_candidate(call, best, decl) {
                CandidateVerdict::Fit(Applicability::Inapplicable) => {
                    self.report_inapplicable(kind, call, Some(best));
                }
                CandidateVerdict::ReceiverMismatch => {
                    self.report_category_mismatch(call, best);
                }
                CandidateVerdict::Fit(_) => {}
            }
            return;
        }

        let candidates = call.multi_resolve();
        if candidates.is_empty() {
            // Unresolved reference; that is the resolver's report, not ours.
            return;
        }

        let mut scored = 0usize;
        let mut applicable = 0usize;
        let mut conditional = false;
        let mut receiver_mismatch = None;
        for candidate in candidates {
            let Some(decl) = self.candidate_decl(candidate) else {
                continue;
            };
            scored += 1;
            match self.check_candidate(call, candidate, decl) {
                CandidateVerdict::Fit(Applicability::Applicable) => applicable += 1,
                CandidateVerdict::Fit(Applicability::ConditionallyApplicable) => conditional = true,
                CandidateVerdict::Fit(Applicability::Inapplicable) => {}
                CandidateVerdict::ReceiverMismatch => receiver_mismatch = Some(candidate),
            }
        }
        if scored == 0 {
            return;
        }

        match applicable {
            0 => {
                if conditional {
                    self.report_unknown_arguments(call);
                } else if let Some(candidate) = receiver_mismatch {
                    self.report_category_mismatch(call, candidate);
                } else {
                    self.report_inapplicable(kind, call, candidates.first());
                }
            }
            1 => {}
            _ => self.report_ambiguous(call),
        }
    }
}
