//! Named-argument validation.
//!
//! Named arguments travel in the leading map-literal argument. Each label is
//! looked up in the descriptor provider; labels without a descriptor are
//! open and never reported. For labels with a descriptor the value type must
//! satisfy the descriptor's predicate, with primitive values boxed first so
//! a predicate written against `Integer` accepts an `int` expression.

use crate::call_info::CallSite;
use crate::state::CheckerState;
use lumen_common::{Diagnostic, diagnostic_codes};
use lumen_types::{Type, TypeId};

impl CheckerState<'_> {
    pub fn check_named_arguments(&mut self, call: &dyn CallSite) {
        let provider = self.ctx.named_args;
        let arena = self.ctx.arena;
        let call_node = call.highlight_element();
        for &entry in call.named_arguments() {
            let Some((label, value)) = arena.get_named_arg(entry) else {
                continue;
            };
            let Some(descriptor) = provider.descriptor(call_node, label) else {
                continue;
            };
            let Some(value_ty) = self.ctx.type_of(value) else {
                continue;
            };
            if value_ty == TypeId::UNKNOWN {
                continue;
            }
            if descriptor.accepts(value_ty) || descriptor.accepts(self.boxed_view(value_ty)) {
                continue;
            }
            let actual = self.ctx.formatter().format(value_ty);
            let span = arena.span(value);
            self.emit(Diagnostic::from_code(
                diagnostic_codes::NAMED_ARGUMENT_TYPE_MISMATCH,
                span,
                &[&descriptor.label, &descriptor.expected, &actual],
            ));
        }
    }

    fn boxed_view(&self, ty: TypeId) -> TypeId {
        match self.ctx.types.get(ty) {
            Type::Primitive(kind) => self.ctx.registry.boxed_type(kind),
            _ => ty,
        }
    }
}
