//! Resolution candidates.

use lumen_types::{ClassId, DeclId, Substitution};

/// One possible target for a call or reference, prior to applicability
/// filtering. Candidates are produced by the resolver; the checker only
/// filters and ranks them.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub decl: DeclId,
    /// Generic substitution inferred by the resolver for this site.
    pub substitution: Substitution,
    /// The reference resolved through property syntax (e.g. a closure-valued
    /// property invoked as a method).
    pub via_property_syntax: bool,
    /// Originating category/extension class, when the candidate is a
    /// statically-declared helper invoked as an instance method.
    pub category: Option<ClassId>,
}

impl Candidate {
    pub fn direct(decl: DeclId) -> Self {
        Candidate {
            decl,
            substitution: Substitution::new(),
            via_property_syntax: false,
            category: None,
        }
    }
}

/// What the resolver knows about one call site: the full ordered candidate
/// list, plus a single best match when resolution already disambiguated.
#[derive(Clone, Debug, Default)]
pub struct ResolveOutcome {
    pub best: Option<Candidate>,
    pub candidates: Vec<Candidate>,
}

impl ResolveOutcome {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_candidates(candidates: Vec<Candidate>) -> Self {
        ResolveOutcome {
            best: None,
            candidates,
        }
    }

    pub fn best(candidate: Candidate) -> Self {
        ResolveOutcome {
            best: Some(candidate),
            candidates: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_none() && self.candidates.is_empty()
    }
}
