//! Arena walk.
//!
//! One `visit` per node: children first, then the node's own checks. The
//! walk re-checks the cancel flag at every entry and bails between nodes;
//! a re-entrancy guard keyed on the declaration node protects against
//! cyclic default-initializer shapes.

use crate::ambiguity::CallKind;
use crate::applicability::Applicability;
use crate::call_info::{
    CallSite, ConstructorCallInfo, DelegatingCallInfo, EnumConstantCallInfo, IndexCallInfo,
    MethodCallInfo, OperatorCallInfo,
};
use crate::conversion::{ConversionVerdict, Position};
use crate::state::CheckerState;
use lumen_ast::{
    AssignmentData, BinaryData, CallData, FnDeclData, ForInData, IndexData, NodeIndex, NodeKind,
};
use lumen_resolve::ResolveOutcome;
use lumen_types::{Substitution, Type, element_type};

impl CheckerState<'_> {
    pub fn visit(&mut self, node: NodeIndex) {
        if node.is_none() || self.ctx.is_cancelled() {
            return;
        }
        let Some(n) = self.ctx.arena.get(node) else {
            return;
        };
        match &n.kind {
            NodeKind::Root { items } => {
                for &item in items {
                    self.visit(item);
                }
            }
            NodeKind::FnDecl(data) => self.visit_fn_decl(node, data),
            NodeKind::Call(data) => self.visit_call(node, data),
            NodeKind::ConstructorCall(data) => {
                for &arg in &data.args {
                    self.visit(arg);
                }
                self.visit_constructor_call(node);
            }
            NodeKind::EnumConstant(data) => {
                for &arg in &data.args {
                    self.visit(arg);
                }
                self.visit_enum_constant(node);
            }
            NodeKind::Binary(data) => self.visit_binary(node, data),
            NodeKind::Index(data) => self.visit_index(node, data),
            NodeKind::Assignment(data) => self.visit_assignment(data),
            NodeKind::TupleAssignment(data) => {
                self.visit(data.rhs);
                self.check_tuple_assignment(data);
            }
            NodeKind::Cast(data) => {
                self.visit(data.expr);
                self.check_expression_conversion(Position::ExplicitCast, data.target_ty, data.expr);
            }
            NodeKind::VarDecl(data) => {
                self.visit(data.init);
                if let Some(declared) = data.declared_ty {
                    self.check_expression_conversion(Position::Assignment, declared, data.init);
                }
            }
            NodeKind::Return { value } => {
                self.visit(*value);
                if let Some(expected) = self.ctx.current_return_type() {
                    self.check_expression_conversion(Position::Return, expected, *value);
                }
            }
            NodeKind::ForIn(data) => self.visit_for_in(data),
            NodeKind::ListLit { elements } => {
                for &element in elements {
                    self.visit(element);
                }
            }
            NodeKind::MapLit { entries } => {
                for &entry in entries {
                    self.visit(entry);
                }
            }
            NodeKind::NamedArg { value, .. } => self.visit(*value),
            NodeKind::ClosureLit { body } => {
                for &stmt in body {
                    self.visit(stmt);
                }
            }
            NodeKind::Spread { inner } => self.visit(*inner),
            NodeKind::Ident { .. }
            | NodeKind::StringLit { .. }
            | NodeKind::IntLit(_)
            | NodeKind::FloatLit(_)
            | NodeKind::BoolLit(_)
            | NodeKind::NullLit => {}
        }
    }

    fn visit_fn_decl(&mut self, node: NodeIndex, data: &FnDeclData) {
        if !self.ctx.begin_check(node) {
            return;
        }
        if data.static_region {
            self.ctx.enter_static_region();
        }
        self.ctx.push_return_type(data.return_ty);

        // Default initializers are checked against the declared parameter
        // type with the declaration's own type parameters erased to their
        // bounds; no call site exists to infer them from.
        let erasure = Substitution::erasing_to_bounds(
            self.ctx.types,
            self.ctx.registry,
            &data.type_params,
        );
        for param in &data.params {
            if param.default.is_none() {
                continue;
            }
            self.visit(param.default);
            if let Some(declared) = param.ty {
                let expected = erasure.apply(self.ctx.types, declared);
                self.check_expression_conversion(Position::DefaultParameter, expected, param.default);
            }
        }
        for &stmt in &data.body {
            self.visit(stmt);
        }

        self.ctx.pop_return_type();
        if data.static_region {
            self.ctx.leave_static_region();
        }
        self.ctx.end_check(node);
    }

    fn visit_call(&mut self, node: NodeIndex, data: &CallData) {
        self.visit(data.callee);
        for &arg in &data.args {
            self.visit(arg);
        }
        let Some(info) = MethodCallInfo::new(&self.ctx, node) else {
            return;
        };
        tracing::trace!(node = node.0, "checking call");
        self.check_named_arguments(&info);
        if info.is_unresolved() {
            self.check_closure_invocation(data, &info);
            return;
        }
        let name = info.method_name().unwrap_or("call").to_string();
        self.process_call(CallKind::Method { name: &name }, &info);
    }

    /// A call whose callee resolved to nothing may still be a closure-typed
    /// value invoked directly. A structural closure type is checked in
    /// place; a plain `Closure`-classed value goes through the declared
    /// `call` stub with the callee injected as receiver.
    fn check_closure_invocation(&mut self, data: &CallData, info: &MethodCallInfo) {
        let Some(callee_ty) = self.ctx.type_of(data.callee) else {
            return;
        };
        match self.ctx.types.get(callee_ty) {
            Type::Closure { params, .. } => {
                let Some(arg_types) = info.argument_types() else {
                    self.report_unknown_arguments(info);
                    return;
                };
                if self.check_closure_fit(&params, arg_types) == Applicability::Inapplicable {
                    self.report_inapplicable(CallKind::Closure, info, None);
                }
            }
            Type::Class { def, .. } if def == self.ctx.registry.well_known.closure_class => {
                let candidates = self
                    .ctx
                    .resolver
                    .resolve_member(self.ctx.registry.well_known.closure_object, "call");
                if candidates.is_empty() {
                    return;
                }
                let delegated = DelegatingCallInfo::new(info)
                    .with_invoked_expression(data.callee)
                    .with_qualifier_instance_type(Some(callee_ty))
                    .with_outcome(ResolveOutcome::from_candidates(candidates));
                self.process_call(CallKind::Closure, &delegated);
            }
            _ => {}
        }
    }

    fn visit_constructor_call(&mut self, node: NodeIndex) {
        let Some(info) = ConstructorCallInfo::new(&self.ctx, node) else {
            return;
        };
        self.check_named_arguments(&info);
        if !info.has_candidates() {
            return;
        }
        let class_name = info.class_name().to_string();
        self.process_call(
            CallKind::Constructor {
                class_name: &class_name,
            },
            &info,
        );
    }

    fn visit_enum_constant(&mut self, node: NodeIndex) {
        let Some(info) = EnumConstantCallInfo::new(&self.ctx, node) else {
            return;
        };
        if !info.has_candidates() {
            return;
        }
        let enum_name = info.enum_name().to_string();
        self.process_call(
            CallKind::EnumConstant {
                enum_name: &enum_name,
            },
            &info,
        );
    }

    fn visit_binary(&mut self, node: NodeIndex, data: &BinaryData) {
        self.visit(data.lhs);
        self.visit(data.rhs);
        let Some(info) = OperatorCallInfo::new(&self.ctx, node) else {
            return;
        };
        // No candidates means the operands are dynamic; nothing to check.
        if !info.has_candidates() {
            return;
        }
        let symbol = info.symbol();
        self.process_call(CallKind::Operator { symbol }, &info);
    }

    fn visit_index(&mut self, node: NodeIndex, data: &IndexData) {
        self.visit(data.receiver);
        for &index in &data.indexes {
            self.visit(index);
        }
        let Some(info) = IndexCallInfo::new(&self.ctx, node) else {
            return;
        };
        if !info.has_candidates() {
            return;
        }
        self.process_call(CallKind::Index, &info);
    }

    fn visit_assignment(&mut self, data: &AssignmentData) {
        self.visit(data.lhs);
        self.visit(data.rhs);
        let Some(target) = self.ctx.type_of(data.lhs) else {
            return;
        };
        self.check_expression_conversion(Position::Assignment, target, data.rhs);
    }

    fn visit_for_in(&mut self, data: &ForInData) {
        self.visit(data.iterable);
        if let Some(declared) = data.declared_ty {
            if let Some(iterable_ty) = self.ctx.type_of(data.iterable) {
                if let Some(elem) = element_type(self.ctx.types, self.ctx.registry, iterable_ty) {
                    let span = self.ctx.arena.span(data.iterable);
                    match self.check_types(Position::ForInVariable, declared, elem) {
                        ConversionVerdict::Ok => {}
                        ConversionVerdict::Warning => {
                            self.report_type_mismatch(span, declared, elem, false);
                        }
                        ConversionVerdict::Error => {
                            self.report_type_mismatch(span, declared, elem, true);
                        }
                    }
                }
            }
        }
        for &stmt in &data.body {
            self.visit(stmt);
        }
    }
}
