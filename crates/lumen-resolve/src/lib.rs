//! Collaborator surface between the front end and the compatibility checker.
//!
//! Name resolution, expression typing, named-argument descriptors and
//! language-capability gating are external to the checker: it consumes them
//! through the traits defined here and never constructs candidates itself.

pub mod cache;
pub mod candidate;

pub use cache::ResolutionCache;
pub use candidate::{Candidate, ResolveOutcome};

use lumen_ast::NodeIndex;
use lumen_types::TypeId;

/// Synthetic member name under which constructors are resolved.
pub const CONSTRUCTOR_NAME: &str = "<init>";

/// Name resolution, consumed as a black box: an ordered candidate list plus
/// an optional pre-selected best match per call-shaped node, and member
/// lookups against a receiver type (including synthetic/extension
/// candidates).
pub trait CallResolver {
    fn resolve_call(&self, node: NodeIndex) -> ResolveOutcome;

    fn resolve_member(&self, receiver: TypeId, name: &str) -> Vec<Candidate>;
}

/// Static expression types, as far as the front end could infer them.
/// `None` means "uninferable"; the checker treats such slots as unknown
/// rather than mismatched.
pub trait ExprTyper {
    fn type_of(&self, node: NodeIndex) -> Option<TypeId>;
}

/// Per-label validation of named arguments. Descriptors come from external
/// metadata; a label without a descriptor is an open named argument and is
/// never an error.
pub struct NamedArgumentDescriptor {
    pub label: String,
    /// Rendered expected-type text for diagnostics.
    pub expected: String,
    predicate: Box<dyn Fn(TypeId) -> bool + Send + Sync>,
}

impl NamedArgumentDescriptor {
    pub fn new(
        label: impl Into<String>,
        expected: impl Into<String>,
        predicate: impl Fn(TypeId) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            expected: expected.into(),
            predicate: Box::new(predicate),
        }
    }

    pub fn accepts(&self, ty: TypeId) -> bool {
        (self.predicate)(ty)
    }
}

pub trait NamedArgumentProvider {
    fn descriptor(&self, call: NodeIndex, label: &str) -> Option<&NamedArgumentDescriptor>;
}

/// Provider with no descriptors: every named argument is open.
pub struct NoNamedArguments;

impl NamedArgumentProvider for NoNamedArguments {
    fn descriptor(&self, _call: NodeIndex, _label: &str) -> Option<&NamedArgumentDescriptor> {
        None
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Feature {
    /// Implicit conversion of compile-time string constants to enum
    /// constants; newer language levels only.
    EnumCoercionFromString,
}

/// Language-capability gate: whether the language level in force at a given
/// location supports a feature.
pub trait FeatureGate {
    fn supports(&self, feature: Feature, node: NodeIndex) -> bool;
}

/// Gate for the current language level: everything on.
pub struct AllFeatures;

impl FeatureGate for AllFeatures {
    fn supports(&self, _feature: Feature, _node: NodeIndex) -> bool {
        true
    }
}
