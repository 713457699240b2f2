//! Conversion verdicts.
//!
//! `check_types` grades a source-to-target conversion for a given syntactic
//! position: `Ok` for silence, `Warning` for conversions that may succeed at
//! runtime (downcasts, literal coercions through constructors), `Error` for
//! definite mismatches. `check_expression_conversion` is the node-level
//! wrapper that also handles the enum-from-string coercion and routes the
//! verdict into a diagnostic; tuple destructuring gets its own entry point
//! because arity errors replace element checks.

use crate::state::CheckerState;
use lumen_ast::{NodeIndex, TupleAssignmentData, const_string_value};
use lumen_common::{Diagnostic, diagnostic_codes};
use lumen_resolve::Feature;
use lumen_types::{
    PrimitiveKind, Type, TypeId, element_type, is_assignable, is_string_like, is_subtype,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConversionVerdict {
    Ok,
    Warning,
    Error,
}

/// Syntactic position a conversion happens in. Casts are deliberately more
/// permissive than assignments; the rest share one rule set but keep their
/// identity for future tightening.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Position {
    Assignment,
    Return,
    ExplicitCast,
    TupleAssignment,
    MethodParameter,
    DefaultParameter,
    ForInVariable,
}

impl CheckerState<'_> {
    pub fn check_types(&self, position: Position, target: TypeId, source: TypeId) -> ConversionVerdict {
        if target == source || target == TypeId::UNKNOWN || source == TypeId::UNKNOWN {
            return ConversionVerdict::Ok;
        }
        if position == Position::ExplicitCast {
            return self.check_cast(target, source);
        }
        let itn = self.ctx.types;
        let reg = self.ctx.registry;
        if is_assignable(itn, reg, target, source) {
            return ConversionVerdict::Ok;
        }
        // null unboxes into a primitive slot only at runtime, and badly.
        if source == TypeId::NULL && itn.is_primitive(target) {
            return ConversionVerdict::Warning;
        }
        // The reverse direction holding means a runtime downcast could
        // succeed; that is worth a warning, not an error.
        if is_subtype(itn, reg, target, source) {
            return ConversionVerdict::Warning;
        }
        match itn.get(source) {
            // A list literal in a non-collection position may be a
            // constructor-argument coercion.
            Type::ListLiteral(_) => {
                if element_type(itn, reg, target).is_none()
                    && matches!(itn.get(target), Type::Class { .. })
                {
                    ConversionVerdict::Warning
                } else {
                    ConversionVerdict::Error
                }
            }
            // Map literals coerce to any class via property-setting.
            Type::MapLiteral(_) if matches!(itn.get(target), Type::Class { .. }) => {
                ConversionVerdict::Warning
            }
            _ => ConversionVerdict::Error,
        }
    }

    /// Explicit casts only reject combinations that cannot succeed at
    /// runtime: unrelated concrete classes. Either-direction assignability,
    /// numeric conversions and interface targets all pass.
    fn check_cast(&self, target: TypeId, source: TypeId) -> ConversionVerdict {
        let itn = self.ctx.types;
        let reg = self.ctx.registry;
        if is_assignable(itn, reg, target, source) || is_assignable(itn, reg, source, target) {
            return ConversionVerdict::Ok;
        }
        if self.is_numeric(target) && self.is_numeric(source) {
            return ConversionVerdict::Ok;
        }
        if self.is_interface(target) || self.is_interface(source) {
            return ConversionVerdict::Ok;
        }
        ConversionVerdict::Error
    }

    fn is_numeric(&self, ty: TypeId) -> bool {
        match self.ctx.types.get(ty) {
            Type::Primitive(kind) => kind != PrimitiveKind::Boolean,
            _ => self
                .ctx
                .registry
                .unboxed_kind(ty)
                .is_some_and(|kind| kind != PrimitiveKind::Boolean),
        }
    }

    fn is_interface(&self, ty: TypeId) -> bool {
        match self.ctx.types.get(ty) {
            Type::Class { def, .. } => {
                self.ctx.registry.class(def).kind == lumen_types::ClassKind::Interface
            }
            _ => false,
        }
    }

    /// Check one expression against an expected type and report. The
    /// enum-from-string coercion is tried first when the language level
    /// allows it.
    pub fn check_expression_conversion(&mut self, position: Position, target: TypeId, expr: NodeIndex) {
        if expr.is_none() {
            return;
        }
        let Some(source) = self.ctx.type_of(expr) else {
            return;
        };
        if self.check_enum_coercion(target, source, expr) {
            return;
        }
        match self.check_types(position, target, source) {
            ConversionVerdict::Ok => {}
            ConversionVerdict::Warning => {
                let span = self.ctx.arena.span(expr);
                self.report_type_mismatch(span, target, source, false);
            }
            ConversionVerdict::Error => {
                let span = self.ctx.arena.span(expr);
                self.report_type_mismatch(span, target, source, true);
            }
        }
    }

    /// String-to-enum coercion: a compile-time string constant must name a
    /// declared constant; a non-constant string can only be flagged as
    /// unverifiable. Returns true when the coercion path applies and the
    /// conversion check must not run.
    fn check_enum_coercion(&mut self, target: TypeId, source: TypeId, expr: NodeIndex) -> bool {
        let itn = self.ctx.types;
        let reg = self.ctx.registry;
        if !reg.is_enum_type(itn, target) || !is_string_like(itn, reg, source) {
            return false;
        }
        if !self
            .ctx
            .features
            .supports(Feature::EnumCoercionFromString, expr)
        {
            return false;
        }
        let span = self.ctx.arena.span(expr);
        match const_string_value(self.ctx.arena, expr) {
            Some(value) => {
                let constants = reg.enum_constants(itn, target).unwrap_or(&[]);
                if !constants.iter().any(|c| c == &value) {
                    let enum_name = self.ctx.formatter().format(target);
                    self.emit(Diagnostic::from_code(
                        diagnostic_codes::ENUM_CONSTANT_UNKNOWN,
                        span,
                        &[&value, &enum_name],
                    ));
                }
            }
            None => {
                self.emit(Diagnostic::from_code(
                    diagnostic_codes::ENUM_CONSTANT_UNVERIFIABLE,
                    span,
                    &[],
                ));
            }
        }
        true
    }

    /// Multiple assignment. A literal list on the right is checked
    /// element-by-element; too few values is a single arity diagnostic and
    /// suppresses the element checks. A non-literal right-hand side is
    /// checked through its extracted element type.
    pub fn check_tuple_assignment(&mut self, data: &TupleAssignmentData) {
        let itn = self.ctx.types;
        let reg = self.ctx.registry;
        if let Some(elements) = self.ctx.arena.get_list_literal(data.rhs) {
            if data.targets.len() > elements.len() {
                let span = self.ctx.arena.span(data.rhs);
                self.emit(Diagnostic::from_code(
                    diagnostic_codes::TUPLE_ARITY_MISMATCH,
                    span,
                    &[&data.targets.len().to_string(), &elements.len().to_string()],
                ));
                return;
            }
            let pairs: Vec<(NodeIndex, NodeIndex)> = data
                .targets
                .iter()
                .copied()
                .zip(elements.iter().copied())
                .collect();
            for (target, element) in pairs {
                let Some(target_ty) = self.tuple_target_type(target) else {
                    continue;
                };
                self.check_expression_conversion(Position::TupleAssignment, target_ty, element);
            }
            return;
        }
        let Some(source_ty) = self.ctx.type_of(data.rhs) else {
            return;
        };
        let Some(elem) = element_type(itn, reg, source_ty) else {
            return;
        };
        let span = self.ctx.arena.span(data.rhs);
        for &target in &data.targets {
            let Some(target_ty) = self.tuple_target_type(target) else {
                continue;
            };
            match self.check_types(Position::TupleAssignment, target_ty, elem) {
                ConversionVerdict::Ok => {}
                ConversionVerdict::Warning => self.report_type_mismatch(span, target_ty, elem, false),
                ConversionVerdict::Error => self.report_type_mismatch(span, target_ty, elem, true),
            }
        }
    }

    /// The expected type of one destructuring target. A spread target
    /// collects surplus values, so the comparison runs against its element
    /// type.
    fn tuple_target_type(&self, target: NodeIndex) -> Option<TypeId> {
        if let Some(inner) = self.ctx.arena.get_spread(target) {
            let aggregate = self.ctx.type_of(inner)?;
            return element_type(self.ctx.types, self.ctx.registry, aggregate);
        }
        self.ctx.type_of(target)
    }
}
