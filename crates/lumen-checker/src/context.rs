//! Shared checker context.
//!
//! `CheckerContext` bundles the immutable collaborators (arena, type model,
//! resolver, typer, descriptors, feature gate) with the mutable per-pass
//! state: the diagnostic list, the static-discipline region depth, the
//! in-progress node guard set and the cooperative cancellation flag.
//! Everything is created per pass and discarded with it; the only structure
//! that outlives a pass is the advisory `ResolutionCache`.

use lumen_ast::{Arena, NodeIndex};
use lumen_common::Diagnostic;
use lumen_resolve::{
    CallResolver, ExprTyper, FeatureGate, NamedArgumentProvider, ResolutionCache, ResolveOutcome,
};
use lumen_types::{TypeFormatter, TypeId, TypeInterner, TypeRegistry};
use rustc_hash::FxHashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Clone, Debug)]
pub struct CheckerOptions {
    /// A separate always-on strict checker reports error-class verdicts
    /// inside static-discipline regions. While it does, this pass must not
    /// re-emit them there.
    pub strict_checker_active: bool,
}

impl Default for CheckerOptions {
    fn default() -> Self {
        CheckerOptions {
            strict_checker_active: true,
        }
    }
}

/// Cooperative cancellation. The visitor checks this between node visits;
/// diagnostics emitted before the abort point stay valid.
#[derive(Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Append-only receiver for diagnostics. The checker never retracts.
pub trait DiagnosticsSink {
    fn push_diagnostic(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticsSink for Vec<Diagnostic> {
    fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

pub struct CheckerContext<'a> {
    pub arena: &'a Arena,
    pub types: &'a TypeInterner,
    pub registry: &'a TypeRegistry,
    pub resolver: &'a dyn CallResolver,
    pub typer: &'a dyn ExprTyper,
    pub named_args: &'a dyn NamedArgumentProvider,
    pub features: &'a dyn FeatureGate,
    pub options: CheckerOptions,
    pub diagnostics: Vec<Diagnostic>,
    cache: Option<&'a ResolutionCache>,
    cancel: CancelFlag,
    static_depth: u32,
    return_types: Vec<Option<TypeId>>,
    in_progress: FxHashSet<NodeIndex>,
}

impl<'a> CheckerContext<'a> {
    pub fn new(
        arena: &'a Arena,
        types: &'a TypeInterner,
        registry: &'a TypeRegistry,
        resolver: &'a dyn CallResolver,
        typer: &'a dyn ExprTyper,
        named_args: &'a dyn NamedArgumentProvider,
        features: &'a dyn FeatureGate,
        options: CheckerOptions,
    ) -> Self {
        CheckerContext {
            arena,
            types,
            registry,
            resolver,
            typer,
            named_args,
            features,
            options,
            diagnostics: Vec::new(),
            cache: None,
            cancel: CancelFlag::new(),
            static_depth: 0,
            return_types: Vec::new(),
            in_progress: FxHashSet::default(),
        }
    }

    pub fn with_cache(mut self, cache: &'a ResolutionCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn type_of(&self, node: NodeIndex) -> Option<TypeId> {
        if node.is_none() {
            return None;
        }
        self.typer.type_of(node)
    }

    pub fn formatter(&self) -> TypeFormatter<'a> {
        TypeFormatter::new(self.types, self.registry)
    }

    /// Resolver lookup through the advisory cache, keyed by the declaration
    /// set version. A miss is always answered by the resolver itself.
    pub fn resolve_call(&self, node: NodeIndex) -> ResolveOutcome {
        let version = self.registry.version();
        if let Some(cache) = self.cache {
            if let Some(hit) = cache.get(version, node) {
                return hit;
            }
        }
        let outcome = self.resolver.resolve_call(node);
        if let Some(cache) = self.cache {
            cache.insert(version, node, outcome.clone());
        }
        outcome
    }

    pub fn in_static_region(&self) -> bool {
        self.static_depth > 0
    }

    pub fn enter_static_region(&mut self) {
        self.static_depth += 1;
    }

    pub fn leave_static_region(&mut self) {
        debug_assert!(self.static_depth > 0);
        self.static_depth = self.static_depth.saturating_sub(1);
    }

    pub fn push_return_type(&mut self, ty: Option<TypeId>) {
        self.return_types.push(ty);
    }

    pub fn pop_return_type(&mut self) {
        self.return_types.pop();
    }

    pub fn current_return_type(&self) -> Option<TypeId> {
        self.return_types.last().copied().flatten()
    }

    /// Re-entrancy guard keyed by node identity. Returns false when the node
    /// is already being checked; callers must skip it then.
    pub fn begin_check(&mut self, node: NodeIndex) -> bool {
        self.in_progress.insert(node)
    }

    pub fn end_check(&mut self, node: NodeIndex) {
        self.in_progress.remove(&node);
    }
}
