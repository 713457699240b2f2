//! Programmatic node construction.
//!
//! Front-end collaborators (and tests) build trees through this API. Each
//! node gets a distinct synthetic span so diagnostics stay attributable.

use crate::arena::{
    Arena, AssignmentData, BinaryData, BinaryOp, CallData, CastData, ConstructorCallData,
    EnumConstantData, FnDeclData, FnParam, ForInData, IndexData, NodeIndex, NodeKind,
    TupleAssignmentData, VarDeclData,
};
use lumen_common::Span;
use lumen_types::{TypeId, TypeParamId};

pub struct AstBuilder {
    arena: Arena,
    cursor: u32,
}

impl AstBuilder {
    pub fn new() -> Self {
        AstBuilder {
            arena: Arena::new(),
            cursor: 0,
        }
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn finish(self) -> Arena {
        self.arena
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeIndex {
        let span = Span::new(self.cursor, 4);
        self.cursor += 8;
        self.arena.alloc(kind, span)
    }

    pub fn ident(&mut self, name: &str) -> NodeIndex {
        self.alloc(NodeKind::Ident {
            name: name.to_string(),
            qualifier: NodeIndex::NONE,
        })
    }

    pub fn qualified(&mut self, qualifier: NodeIndex, name: &str) -> NodeIndex {
        self.alloc(NodeKind::Ident {
            name: name.to_string(),
            qualifier,
        })
    }

    pub fn string(&mut self, value: &str) -> NodeIndex {
        self.alloc(NodeKind::StringLit {
            value: value.to_string(),
            interpolated: false,
        })
    }

    pub fn interpolated_string(&mut self, value: &str) -> NodeIndex {
        self.alloc(NodeKind::StringLit {
            value: value.to_string(),
            interpolated: true,
        })
    }

    pub fn int(&mut self, value: i64) -> NodeIndex {
        self.alloc(NodeKind::IntLit(value))
    }

    pub fn float(&mut self, value: f64) -> NodeIndex {
        self.alloc(NodeKind::FloatLit(value))
    }

    pub fn boolean(&mut self, value: bool) -> NodeIndex {
        self.alloc(NodeKind::BoolLit(value))
    }

    pub fn null(&mut self) -> NodeIndex {
        self.alloc(NodeKind::NullLit)
    }

    pub fn list(&mut self, elements: Vec<NodeIndex>) -> NodeIndex {
        self.alloc(NodeKind::ListLit { elements })
    }

    pub fn named_arg(&mut self, label: &str, value: NodeIndex) -> NodeIndex {
        self.alloc(NodeKind::NamedArg {
            label: label.to_string(),
            value,
        })
    }

    pub fn map(&mut self, entries: Vec<NodeIndex>) -> NodeIndex {
        self.alloc(NodeKind::MapLit { entries })
    }

    pub fn closure(&mut self, body: Vec<NodeIndex>) -> NodeIndex {
        self.alloc(NodeKind::ClosureLit { body })
    }

    pub fn call(&mut self, callee: NodeIndex, args: Vec<NodeIndex>) -> NodeIndex {
        self.alloc(NodeKind::Call(CallData { callee, args }))
    }

    pub fn constructor_call(&mut self, class_ty: TypeId, args: Vec<NodeIndex>) -> NodeIndex {
        self.alloc(NodeKind::ConstructorCall(ConstructorCallData {
            class_ty,
            args,
        }))
    }

    pub fn enum_constant(&mut self, enum_ty: TypeId, name: &str, args: Vec<NodeIndex>) -> NodeIndex {
        self.alloc(NodeKind::EnumConstant(EnumConstantData {
            enum_ty,
            name: name.to_string(),
            args,
        }))
    }

    pub fn binary(&mut self, op: BinaryOp, lhs: NodeIndex, rhs: NodeIndex) -> NodeIndex {
        self.alloc(NodeKind::Binary(BinaryData { op, lhs, rhs }))
    }

    pub fn index(&mut self, receiver: NodeIndex, indexes: Vec<NodeIndex>) -> NodeIndex {
        self.alloc(NodeKind::Index(IndexData { receiver, indexes }))
    }

    pub fn assign(&mut self, lhs: NodeIndex, rhs: NodeIndex) -> NodeIndex {
        self.alloc(NodeKind::Assignment(AssignmentData { lhs, rhs }))
    }

    pub fn tuple_assign(&mut self, targets: Vec<NodeIndex>, rhs: NodeIndex) -> NodeIndex {
        self.alloc(NodeKind::TupleAssignment(TupleAssignmentData { targets, rhs }))
    }

    pub fn spread(&mut self, inner: NodeIndex) -> NodeIndex {
        self.alloc(NodeKind::Spread { inner })
    }

    pub fn cast(&mut self, target_ty: TypeId, expr: NodeIndex) -> NodeIndex {
        self.alloc(NodeKind::Cast(CastData { target_ty, expr }))
    }

    pub fn var_decl(
        &mut self,
        name: &str,
        declared_ty: Option<TypeId>,
        init: NodeIndex,
    ) -> NodeIndex {
        self.alloc(NodeKind::VarDecl(VarDeclData {
            name: name.to_string(),
            declared_ty,
            init,
        }))
    }

    pub fn ret(&mut self, value: NodeIndex) -> NodeIndex {
        self.alloc(NodeKind::Return { value })
    }

    pub fn for_in(
        &mut self,
        var_name: &str,
        declared_ty: Option<TypeId>,
        iterable: NodeIndex,
        body: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.alloc(NodeKind::ForIn(ForInData {
            var_name: var_name.to_string(),
            declared_ty,
            iterable,
            body,
        }))
    }

    pub fn fn_param(name: &str, ty: Option<TypeId>) -> FnParam {
        FnParam {
            name: name.to_string(),
            ty,
            default: NodeIndex::NONE,
        }
    }

    pub fn fn_param_with_default(name: &str, ty: Option<TypeId>, default: NodeIndex) -> FnParam {
        FnParam {
            name: name.to_string(),
            ty,
            default,
        }
    }

    pub fn fn_decl(
        &mut self,
        name: &str,
        params: Vec<FnParam>,
        return_ty: Option<TypeId>,
        type_params: Vec<TypeParamId>,
        body: Vec<NodeIndex>,
        static_region: bool,
    ) -> NodeIndex {
        self.alloc(NodeKind::FnDecl(FnDeclData {
            name: name.to_string(),
            params,
            return_ty,
            type_params,
            body,
            static_region,
        }))
    }

    pub fn root(&mut self, items: Vec<NodeIndex>) -> NodeIndex {
        self.alloc(NodeKind::Root { items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::{assert_eq, assert_ne};

    #[test]
    fn builder_assigns_distinct_spans() {
        let mut b = AstBuilder::new();
        let a = b.ident("a");
        let c = b.ident("c");
        let arena = b.finish();
        assert_ne!(arena.span(a), arena.span(c));
        assert_eq!(arena.get_ident(a).unwrap().0, "a");
    }
}
