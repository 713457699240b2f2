//! Uniform call-site descriptors.
//!
//! Every call-shaped node (plain call, constructor, operator, index access,
//! enum constant) is viewed through the `CallSite` trait: argument types,
//! argument and named-argument lists, the invoked expression, the element to
//! attach diagnostics to, and the resolver's outcome for the site.
//!
//! `argument_types` is two-level: `None` means the argument list could not
//! be typed at all (the call is skipped with an unknown-arguments warning);
//! a `None` slot inside `Some` means one argument's type is uninferable (the
//! candidate degrades to conditionally-applicable).
//!
//! `DelegatingCallInfo` is the composition-based decorator: it wraps another
//! descriptor and overrides a subset of accessors, which is how the
//! `call`-through-closure rewrite injects a synthetic receiver without
//! duplicating the whole descriptor.

use crate::context::CheckerContext;
use lumen_ast::{Arena, NodeIndex};
use lumen_resolve::{CONSTRUCTOR_NAME, Candidate, ResolveOutcome};
use lumen_types::{Type, TypeId};
use smallvec::SmallVec;

type ArgTypes = SmallVec<[Option<TypeId>; 4]>;

pub trait CallSite {
    fn argument_types(&self) -> Option<&[Option<TypeId>]>;
    fn arguments(&self) -> &[NodeIndex];
    fn named_arguments(&self) -> &[NodeIndex];
    fn invoked_expression(&self) -> NodeIndex;
    fn highlight_element(&self) -> NodeIndex;
    fn resolve(&self) -> Option<&Candidate>;
    fn multi_resolve(&self) -> &[Candidate];
    fn qualifier_instance_type(&self) -> Option<TypeId>;
}

struct CallSiteCore {
    node: NodeIndex,
    invoked: NodeIndex,
    args: Vec<NodeIndex>,
    named_args: Vec<NodeIndex>,
    arg_types: Option<ArgTypes>,
    outcome: ResolveOutcome,
    qualifier_ty: Option<TypeId>,
}

impl CallSiteCore {
    fn argument_types(&self) -> Option<&[Option<TypeId>]> {
        self.arg_types.as_deref()
    }

    fn resolve(&self) -> Option<&Candidate> {
        self.outcome.best.as_ref()
    }

    fn multi_resolve(&self) -> &[Candidate] {
        &self.outcome.candidates
    }
}

macro_rules! forward_call_site {
    ($ty:ident) => {
        impl CallSite for $ty {
            fn argument_types(&self) -> Option<&[Option<TypeId>]> {
                self.core.argument_types()
            }
            fn arguments(&self) -> &[NodeIndex] {
                &self.core.args
            }
            fn named_arguments(&self) -> &[NodeIndex] {
                &self.core.named_args
            }
            fn invoked_expression(&self) -> NodeIndex {
                self.core.invoked
            }
            fn highlight_element(&self) -> NodeIndex {
                self.core.node
            }
            fn resolve(&self) -> Option<&Candidate> {
                self.core.resolve()
            }
            fn multi_resolve(&self) -> &[Candidate] {
                self.core.multi_resolve()
            }
            fn qualifier_instance_type(&self) -> Option<TypeId> {
                self.core.qualifier_ty
            }
        }
    };
}

/// Positional argument types plus the named-argument list. The first
/// map-literal argument is the named-argument position; a spread argument
/// makes the whole list untypeable (its arity is unknown statically).
fn collect_arguments(ctx: &CheckerContext<'_>, args: &[NodeIndex]) -> (Vec<NodeIndex>, Option<ArgTypes>) {
    let arena: &Arena = ctx.arena;
    let mut named: Vec<NodeIndex> = Vec::new();
    let mut types: ArgTypes = SmallVec::new();
    let mut untypeable = false;
    let mut leading_map_taken = false;
    for &arg in args {
        if let Some(entries) = arena.get_map_literal(arg) {
            // Only the first map literal is the named-argument position,
            // even when it has no entries.
            if !leading_map_taken {
                leading_map_taken = true;
                named.extend_from_slice(entries);
            }
            types.push(ctx.type_of(arg));
            continue;
        }
        if arena.get_spread(arg).is_some() {
            untypeable = true;
            continue;
        }
        types.push(ctx.type_of(arg));
    }
    (named, if untypeable { None } else { Some(types) })
}

pub struct MethodCallInfo {
    core: CallSiteCore,
    method_name: Option<String>,
}

forward_call_site!(MethodCallInfo);

impl MethodCallInfo {
    pub fn new(ctx: &CheckerContext<'_>, node: NodeIndex) -> Option<Self> {
        let arena = ctx.arena;
        let data = arena.get_call(node)?;
        let (named_args, arg_types) = collect_arguments(ctx, &data.args);
        let ident = arena.get_ident(data.callee);
        let method_name = ident.map(|(name, _)| name.to_string());
        let qualifier_ty = ident.and_then(|(_, qualifier)| ctx.type_of(qualifier));
        let outcome = ctx.resolve_call(node);
        Some(MethodCallInfo {
            core: CallSiteCore {
                node,
                invoked: data.callee,
                args: data.args.clone(),
                named_args,
                arg_types,
                outcome,
                qualifier_ty,
            },
            method_name,
        })
    }

    pub fn method_name(&self) -> Option<&str> {
        self.method_name.as_deref()
    }

    pub fn is_unresolved(&self) -> bool {
        self.core.outcome.is_empty()
    }
}

pub struct ConstructorCallInfo {
    core: CallSiteCore,
    class_name: String,
}

forward_call_site!(ConstructorCallInfo);

impl ConstructorCallInfo {
    pub fn new(ctx: &CheckerContext<'_>, node: NodeIndex) -> Option<Self> {
        let arena = ctx.arena;
        let data = arena.get_constructor_call(node)?;
        let (named_args, arg_types) = collect_arguments(ctx, &data.args);
        let outcome = ResolveOutcome::from_candidates(
            ctx.resolver.resolve_member(data.class_ty, CONSTRUCTOR_NAME),
        );
        let class_name = match ctx.types.get(data.class_ty) {
            Type::Class { def, .. } => ctx.registry.class(def).name.clone(),
            _ => ctx.formatter().format(data.class_ty),
        };
        Some(ConstructorCallInfo {
            core: CallSiteCore {
                node,
                invoked: NodeIndex::NONE,
                args: data.args.clone(),
                named_args,
                arg_types,
                outcome,
                qualifier_ty: None,
            },
            class_name,
        })
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn has_candidates(&self) -> bool {
        !self.core.outcome.is_empty()
    }
}

pub struct EnumConstantCallInfo {
    core: CallSiteCore,
    enum_name: String,
}

forward_call_site!(EnumConstantCallInfo);

impl EnumConstantCallInfo {
    pub fn new(ctx: &CheckerContext<'_>, node: NodeIndex) -> Option<Self> {
        let arena = ctx.arena;
        let data = arena.get_enum_constant(node)?;
        let (named_args, arg_types) = collect_arguments(ctx, &data.args);
        let outcome = ResolveOutcome::from_candidates(
            ctx.resolver.resolve_member(data.enum_ty, CONSTRUCTOR_NAME),
        );
        let enum_name = match ctx.types.get(data.enum_ty) {
            Type::Class { def, .. } => ctx.registry.class(def).name.clone(),
            _ => ctx.formatter().format(data.enum_ty),
        };
        Some(EnumConstantCallInfo {
            core: CallSiteCore {
                node,
                invoked: NodeIndex::NONE,
                args: data.args.clone(),
                named_args,
                arg_types,
                outcome,
                qualifier_ty: None,
            },
            enum_name,
        })
    }

    pub fn enum_name(&self) -> &str {
        &self.enum_name
    }

    pub fn has_candidates(&self) -> bool {
        !self.core.outcome.is_empty()
    }
}

pub struct OperatorCallInfo {
    core: CallSiteCore,
    symbol: &'static str,
}

forward_call_site!(OperatorCallInfo);

impl OperatorCallInfo {
    pub fn new(ctx: &CheckerContext<'_>, node: NodeIndex) -> Option<Self> {
        let arena = ctx.arena;
        let data = arena.get_binary(node)?;
        let mut arg_types: ArgTypes = SmallVec::new();
        arg_types.push(ctx.type_of(data.rhs));
        let outcome = ctx.resolve_call(node);
        Some(OperatorCallInfo {
            core: CallSiteCore {
                node,
                invoked: NodeIndex::NONE,
                args: vec![data.rhs],
                named_args: Vec::new(),
                arg_types: Some(arg_types),
                outcome,
                qualifier_ty: ctx.type_of(data.lhs),
            },
            symbol: data.op.symbol(),
        })
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn has_candidates(&self) -> bool {
        !self.core.outcome.is_empty()
    }
}

pub struct IndexCallInfo {
    core: CallSiteCore,
}

forward_call_site!(IndexCallInfo);

impl IndexCallInfo {
    pub fn new(ctx: &CheckerContext<'_>, node: NodeIndex) -> Option<Self> {
        let arena = ctx.arena;
        let data = arena.get_index(node)?;
        let (named_args, arg_types) = collect_arguments(ctx, &data.indexes);
        let outcome = ctx.resolve_call(node);
        Some(IndexCallInfo {
            core: CallSiteCore {
                node,
                invoked: data.receiver,
                args: data.indexes.clone(),
                named_args,
                arg_types,
                outcome,
                qualifier_ty: ctx.type_of(data.receiver),
            },
        })
    }

    pub fn has_candidates(&self) -> bool {
        !self.core.outcome.is_empty()
    }
}

/// Wraps another descriptor and overrides a subset of accessors; everything
/// else forwards to the wrapped one.
pub struct DelegatingCallInfo<'a> {
    inner: &'a dyn CallSite,
    invoked: Option<NodeIndex>,
    qualifier_ty: Option<Option<TypeId>>,
    outcome: Option<ResolveOutcome>,
}

impl<'a> DelegatingCallInfo<'a> {
    pub fn new(inner: &'a dyn CallSite) -> Self {
        DelegatingCallInfo {
            inner,
            invoked: None,
            qualifier_ty: None,
            outcome: None,
        }
    }

    pub fn with_invoked_expression(mut self, invoked: NodeIndex) -> Self {
        self.invoked = Some(invoked);
        self
    }

    pub fn with_qualifier_instance_type(mut self, qualifier: Option<TypeId>) -> Self {
        self.qualifier_ty = Some(qualifier);
        self
    }

    pub fn with_outcome(mut self, outcome: ResolveOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }
}

impl CallSite for DelegatingCallInfo<'_> {
    fn argument_types(&self) -> Option<&[Option<TypeId>]> {
        self.inner.argument_types()
    }

    fn arguments(&self) -> &[NodeIndex] {
        self.inner.arguments()
    }

    fn named_arguments(&self) -> &[NodeIndex] {
        self.inner.named_arguments()
    }

    fn invoked_expression(&self) -> NodeIndex {
        self.invoked.unwrap_or_else(|| self.inner.invoked_expression())
    }

    fn highlight_element(&self) -> NodeIndex {
        self.inner.highlight_element()
    }

    fn resolve(&self) -> Option<&Candidate> {
        match &self.outcome {
            Some(outcome) => outcome.best.as_ref(),
            None => self.inner.resolve(),
        }
    }

    fn multi_resolve(&self) -> &[Candidate] {
        match &self.outcome {
            Some(outcome) => &outcome.candidates,
            None => self.inner.multi_resolve(),
        }
    }

    fn qualifier_instance_type(&self) -> Option<TypeId> {
        match self.qualifier_ty {
            Some(qualifier) => qualifier,
            None => self.inner.qualifier_instance_type(),
        }
    }
}
