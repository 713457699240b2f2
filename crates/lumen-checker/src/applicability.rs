//! Tri-state applicability filtering.
//!
//! Each candidate is scored against the call site's argument types:
//! `Applicable` when every argument fits, `ConditionallyApplicable` when at
//! least one argument type is unknown and everything known fits, and
//! `Inapplicable` on any definite mismatch. Category/extension candidates
//! additionally check the receiver and can fail with `ReceiverMismatch`
//! instead of an argument verdict.

use crate::call_info::CallSite;
use crate::state::CheckerState;
use lumen_resolve::Candidate;
use lumen_types::{ClosureParam, Decl, DeclKind, Type, TypeId, is_assignable};

/// Argument-fit score for one candidate. Ordered worst-last so verdicts
/// combine with `max`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Applicability {
    Applicable,
    ConditionallyApplicable,
    Inapplicable,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CandidateVerdict {
    Fit(Applicability),
    /// Category/extension candidate whose declared receiver does not accept
    /// the qualifier the call was made on.
    ReceiverMismatch,
}

impl CheckerState<'_> {
    /// Look up the declaration behind a candidate. A resolver handing back an
    /// id the registry does not know is an invariant violation; the caller
    /// skips that candidate.
    pub fn candidate_decl(&self, candidate: &Candidate) -> Option<&Decl> {
        let decl = self.ctx.registry.decl(candidate.decl);
        if decl.is_none() {
            tracing::debug!(decl = candidate.decl.0, "candidate without a declaration, skipping");
        }
        decl
    }

    /// Score one resolver candidate against a call site.
    pub fn check_candidate(
        &self,
        call: &dyn CallSite,
        candidate: &Candidate,
        decl: &Decl,
    ) -> CandidateVerdict {
        let itn = self.ctx.types;
        let reg = self.ctx.registry;

        if let Some(receiver) = decl.category_receiver {
            let receiver = candidate.substitution.apply(itn, receiver);
            if let Some(qualifier) = call.qualifier_instance_type() {
                if qualifier != TypeId::UNKNOWN && !is_assignable(itn, reg, receiver, qualifier) {
                    return CandidateVerdict::ReceiverMismatch;
                }
            }
        }

        let Some(arg_types) = call.argument_types() else {
            // Untypeable argument list; nothing definite can be said.
            return CandidateVerdict::Fit(Applicability::ConditionallyApplicable);
        };

        if decl.kind == DeclKind::Field {
            return CandidateVerdict::Fit(self.check_field_invocation(candidate, decl, arg_types));
        }

        // Invoking `call` on a structurally-typed closure checks against the
        // closure's own parameter list, not the declared stub.
        if decl.kind == DeclKind::Method
            && decl.name == "call"
            && decl.owner == reg.well_known.closure_class
        {
            if let Some(qualifier) = call.qualifier_instance_type() {
                if let Type::Closure { params, .. } = itn.get(qualifier) {
                    return CandidateVerdict::Fit(self.check_closure_fit(&params, arg_types));
                }
            }
        }

        let params: Vec<TypeId> = decl
            .params
            .iter()
            .map(|p| candidate.substitution.apply(itn, p.ty))
            .collect();
        CandidateVerdict::Fit(self.check_parameter_fit(&params, decl.is_varargs, arg_types))
    }

    /// A field referenced with call syntax: applicable when its value is a
    /// closure whose parameters accept the arguments.
    fn check_field_invocation(
        &self,
        candidate: &Candidate,
        decl: &Decl,
        arg_types: &[Option<TypeId>],
    ) -> Applicability {
        let itn = self.ctx.types;
        let reg = self.ctx.registry;
        let value_ty = candidate.substitution.apply(itn, decl.return_ty);
        if value_ty == TypeId::UNKNOWN {
            return Applicability::ConditionallyApplicable;
        }
        match itn.get(value_ty) {
            Type::Closure { params, .. } => self.check_closure_fit(&params, arg_types),
            // A non-structural closure value; arity is unknowable here.
            Type::Class { def, .. } if def == reg.well_known.closure_class => {
                Applicability::ConditionallyApplicable
            }
            _ => Applicability::Inapplicable,
        }
    }

    /// Positional fit of `arg_types` against substituted parameter types.
    /// With `is_varargs`, the last parameter is an array whose element type
    /// absorbs surplus arguments; at exact arity the final argument may match
    /// either the array type or its element type.
    pub fn check_parameter_fit(
        &self,
        params: &[TypeId],
        is_varargs: bool,
        arg_types: &[Option<TypeId>],
    ) -> Applicability {
        if !is_varargs {
            if arg_types.len() != params.len() {
                return Applicability::Inapplicable;
            }
            return params
                .iter()
                .zip(arg_types)
                .map(|(&param, &arg)| self.fit_one(param, arg))
                .max()
                .unwrap_or(Applicability::Applicable);
        }

        let Some((&vararg, fixed)) = params.split_last() else {
            return Applicability::Inapplicable;
        };
        if arg_types.len() < fixed.len() {
            return Applicability::Inapplicable;
        }
        let mut verdict = fixed
            .iter()
            .zip(arg_types)
            .map(|(&param, &arg)| self.fit_one(param, arg))
            .max()
            .unwrap_or(Applicability::Applicable);

        let elem = match self.ctx.types.get(vararg) {
            Type::Array(elem) => elem,
            _ => vararg,
        };
        let surplus = &arg_types[fixed.len()..];
        if surplus.len() == 1 {
            // The whole-array spelling and the single-element spelling are
            // both valid at exact arity.
            let one = surplus[0];
            verdict = verdict.max(self.fit_one(vararg, one).min(self.fit_one(elem, one)));
        } else {
            for &arg in surplus {
                verdict = verdict.max(self.fit_one(elem, arg));
            }
        }
        verdict
    }

    /// Fit against a structural closure's parameter list. Trailing optional
    /// parameters may be omitted; an array-typed final parameter absorbs
    /// surplus arguments like a vararg method parameter.
    pub fn check_closure_fit(
        &self,
        params: &[ClosureParam],
        arg_types: &[Option<TypeId>],
    ) -> Applicability {
        let itn = self.ctx.types;
        let required = params.iter().filter(|p| !p.optional).count();
        let vararg_elem = params.last().and_then(|p| match itn.get(p.ty) {
            Type::Array(elem) => Some(elem),
            _ => None,
        });

        let min = if vararg_elem.is_some() {
            required.saturating_sub(1)
        } else {
            required
        };
        if arg_types.len() < min {
            return Applicability::Inapplicable;
        }
        if arg_types.len() > params.len() && vararg_elem.is_none() {
            return Applicability::Inapplicable;
        }

        let mut verdict = Applicability::Applicable;
        for (i, &arg) in arg_types.iter().enumerate() {
            let fit = if i < params.len() {
                let param = params[i].ty;
                if i + 1 == params.len() && arg_types.len() == params.len() {
                    if let Some(elem) = vararg_elem {
                        self.fit_one(param, arg).min(self.fit_one(elem, arg))
                    } else {
                        self.fit_one(param, arg)
                    }
                } else {
                    self.fit_one(param, arg)
                }
            } else {
                // Surplus beyond the parameter list lands in the vararg tail.
                match vararg_elem {
                    Some(elem) => self.fit_one(elem, arg),
                    None => Applicability::Inapplicable,
                }
            };
            verdict = verdict.max(fit);
        }
        verdict
    }

    fn fit_one(&self, param: TypeId, arg: Option<TypeId>) -> Applicability {
        let Some(arg) = arg else {
            return Applicability::ConditionallyApplicable;
        };
        if arg == TypeId::UNKNOWN || param == TypeId::UNKNOWN {
            return Applicability::ConditionallyApplicable;
        }
        if is_assignable(self.ctx.types, self.ctx.registry, param, arg) {
            Applicability::Applicable
        } else {
            Applicability::Inapplicable
        }
    }
}
