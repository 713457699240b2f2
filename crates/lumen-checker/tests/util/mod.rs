//! Shared fixture for checker integration tests.
//!
//! Tests build a tree through `AstBuilder`, describe declarations in the
//! registry, pin expression types and resolver outcomes in lookup tables,
//! then run one checking pass and assert on the emitted diagnostic codes.

#![allow(dead_code)]

use lumen_ast::{Arena, AstBuilder, NodeIndex, NodeKind};
use lumen_checker::{CancelFlag, CheckerContext, CheckerOptions, CheckerState};
use lumen_common::Diagnostic;
use lumen_resolve::{
    CONSTRUCTOR_NAME, CallResolver, Candidate, ExprTyper, Feature, FeatureGate,
    NamedArgumentDescriptor, NamedArgumentProvider, ResolveOutcome,
};
use lumen_types::{
    ClassDef, ClassId, ClassKind, Decl, DeclId, DeclKind, Param, TypeId, TypeInterner, TypeRegistry,
};
use rustc_hash::FxHashMap;

#[derive(Default)]
pub struct TableResolver {
    calls: FxHashMap<NodeIndex, ResolveOutcome>,
    members: FxHashMap<(TypeId, String), Vec<Candidate>>,
}

impl TableResolver {
    pub fn set_call(&mut self, node: NodeIndex, outcome: ResolveOutcome) {
        self.calls.insert(node, outcome);
    }

    pub fn set_member(&mut self, receiver: TypeId, name: &str, candidates: Vec<Candidate>) {
        self.members.insert((receiver, name.to_string()), candidates);
    }
}

impl CallResolver for TableResolver {
    fn resolve_call(&self, node: NodeIndex) -> ResolveOutcome {
        self.calls.get(&node).cloned().unwrap_or_default()
    }

    fn resolve_member(&self, receiver: TypeId, name: &str) -> Vec<Candidate> {
        self.members
            .get(&(receiver, name.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

/// Table-backed typer with literal synthesis: explicit entries win, literals
/// type themselves, everything else is uninferable.
struct TableTyper<'a> {
    arena: &'a Arena,
    itn: &'a TypeInterner,
    reg: &'a TypeRegistry,
    types: &'a FxHashMap<NodeIndex, TypeId>,
}

impl ExprTyper for TableTyper<'_> {
    fn type_of(&self, node: NodeIndex) -> Option<TypeId> {
        if let Some(&ty) = self.types.get(&node) {
            return Some(ty);
        }
        match &self.arena.get(node)?.kind {
            NodeKind::IntLit(_) => Some(TypeId::INT),
            NodeKind::FloatLit(_) => Some(TypeId::DOUBLE),
            NodeKind::BoolLit(_) => Some(TypeId::BOOLEAN),
            NodeKind::NullLit => Some(TypeId::NULL),
            NodeKind::StringLit { interpolated, .. } => Some(if *interpolated {
                self.reg.well_known.interpolated_string
            } else {
                self.reg.well_known.string
            }),
            NodeKind::ListLit { elements } => {
                let elems = elements
                    .iter()
                    .map(|&e| self.type_of(e).unwrap_or(TypeId::UNKNOWN))
                    .collect();
                Some(self.itn.list_literal(elems))
            }
            NodeKind::MapLit { entries } => {
                let mut typed = Vec::new();
                for &entry in entries.iter() {
                    if let Some((label, value)) = self.arena.get_named_arg(entry) {
                        typed.push((
                            label.to_string(),
                            self.type_of(value).unwrap_or(TypeId::UNKNOWN),
                        ));
                    }
                }
                Some(self.itn.map_literal(typed))
            }
            NodeKind::Cast(data) => Some(data.target_ty),
            _ => None,
        }
    }
}

struct Gate(bool);

impl FeatureGate for Gate {
    fn supports(&self, _feature: Feature, _node: NodeIndex) -> bool {
        self.0
    }
}

pub struct TableNamedArgs {
    pub descriptors: Vec<NamedArgumentDescriptor>,
}

impl NamedArgumentProvider for TableNamedArgs {
    fn descriptor(&self, _call: NodeIndex, label: &str) -> Option<&NamedArgumentDescriptor> {
        self.descriptors.iter().find(|d| d.label == label)
    }
}

pub struct Fixture {
    pub itn: TypeInterner,
    pub reg: TypeRegistry,
    pub b: AstBuilder,
    pub resolver: TableResolver,
    pub types: FxHashMap<NodeIndex, TypeId>,
    pub named: TableNamedArgs,
    pub enum_coercion: bool,
    pub options: CheckerOptions,
    pub cancel: Option<CancelFlag>,
}

impl Fixture {
    pub fn new() -> Self {
        let itn = TypeInterner::new();
        let reg = TypeRegistry::with_builtins(&itn);
        Fixture {
            itn,
            reg,
            b: AstBuilder::new(),
            resolver: TableResolver::default(),
            types: FxHashMap::default(),
            named: TableNamedArgs {
                descriptors: Vec::new(),
            },
            enum_coercion: true,
            options: CheckerOptions::default(),
            cancel: None,
        }
    }

    pub fn class(&mut self, name: &str) -> (ClassId, TypeId) {
        let object = self.reg.well_known.object;
        let id = self.reg.add_class(ClassDef {
            name: name.to_string(),
            superclass: Some(object),
            interfaces: vec![],
            type_params: vec![],
            kind: ClassKind::Class,
        });
        (id, self.itn.class_type(id, vec![]))
    }

    pub fn enum_class(&mut self, name: &str, constants: &[&str]) -> (ClassId, TypeId) {
        let object = self.reg.well_known.object;
        let id = self.reg.add_class(ClassDef {
            name: name.to_string(),
            superclass: Some(object),
            interfaces: vec![],
            type_params: vec![],
            kind: ClassKind::Enum {
                constants: constants.iter().map(|c| c.to_string()).collect(),
            },
        });
        (id, self.itn.class_type(id, vec![]))
    }

    pub fn method(&mut self, owner: ClassId, name: &str, params: &[TypeId], ret: TypeId) -> DeclId {
        self.decl(DeclKind::Method, owner, name, params, false, ret)
    }

    pub fn varargs_method(
        &mut self,
        owner: ClassId,
        name: &str,
        params: &[TypeId],
        ret: TypeId,
    ) -> DeclId {
        self.decl(DeclKind::Method, owner, name, params, true, ret)
    }

    pub fn constructor(&mut self, owner: ClassId, params: &[TypeId]) -> DeclId {
        self.decl(
            DeclKind::Constructor,
            owner,
            CONSTRUCTOR_NAME,
            params,
            false,
            TypeId::VOID,
        )
    }

    pub fn field(&mut self, owner: ClassId, name: &str, ty: TypeId) -> DeclId {
        self.decl(DeclKind::Field, owner, name, &[], false, ty)
    }

    fn decl(
        &mut self,
        kind: DeclKind,
        owner: ClassId,
        name: &str,
        params: &[TypeId],
        is_varargs: bool,
        return_ty: TypeId,
    ) -> DeclId {
        self.reg.add_decl(Decl {
            kind,
            name: name.to_string(),
            owner,
            params: params
                .iter()
                .enumerate()
                .map(|(i, &ty)| Param {
                    name: format!("p{i}"),
                    ty,
                })
                .collect(),
            is_varargs,
            return_ty,
            type_params: vec![],
            category_receiver: None,
            is_static: false,
        })
    }

    pub fn set_type(&mut self, node: NodeIndex, ty: TypeId) {
        self.types.insert(node, ty);
    }

    pub fn run(&self, root: NodeIndex) -> Vec<Diagnostic> {
        let arena = self.b.arena();
        let typer = TableTyper {
            arena,
            itn: &self.itn,
            reg: &self.reg,
            types: &self.types,
        };
        let gate = Gate(self.enum_coercion);
        let mut ctx = CheckerContext::new(
            arena,
            &self.itn,
            &self.reg,
            &self.resolver,
            &typer,
            &self.named,
            &gate,
            self.options.clone(),
        );
        if let Some(cancel) = &self.cancel {
            ctx = ctx.with_cancel_flag(cancel.clone());
        }
        let mut state = CheckerState::new(ctx);
        state.check_root(root);
        state.finish()
    }
}

pub fn codes(diagnostics: &[Diagnostic]) -> Vec<u32> {
    diagnostics.iter().map(|d| d.code).collect()
}
