//! Node storage and typed accessors.

use lumen_common::Span;
use lumen_types::{TypeId, TypeParamId};

/// Handle into the arena. `NodeIndex::NONE` marks an absent child.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    pub fn is_none(self) -> bool {
        self == NodeIndex::NONE
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Power,
    LeftShift,
    RightShift,
    Compare,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Power => "**",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
            BinaryOp::Compare => "<=>",
        }
    }
}

#[derive(Clone, Debug)]
pub struct CallData {
    pub callee: NodeIndex,
    pub args: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct ConstructorCallData {
    /// Instantiated class type as resolved by the binder.
    pub class_ty: TypeId,
    pub args: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct EnumConstantData {
    pub enum_ty: TypeId,
    pub name: String,
    pub args: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct BinaryData {
    pub op: BinaryOp,
    pub lhs: NodeIndex,
    pub rhs: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct IndexData {
    pub receiver: NodeIndex,
    pub indexes: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct AssignmentData {
    pub lhs: NodeIndex,
    pub rhs: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct TupleAssignmentData {
    /// Declared targets; a `Spread` target collects the remainder.
    pub targets: Vec<NodeIndex>,
    pub rhs: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct CastData {
    pub target_ty: TypeId,
    pub expr: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct VarDeclData {
    pub name: String,
    pub declared_ty: Option<TypeId>,
    pub init: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct ForInData {
    pub var_name: String,
    pub declared_ty: Option<TypeId>,
    pub iterable: NodeIndex,
    pub body: Vec<NodeIndex>,
}

#[derive(Clone, Debug)]
pub struct FnParam {
    pub name: String,
    pub ty: Option<TypeId>,
    /// Default-value initializer expression, or `NodeIndex::NONE`.
    pub default: NodeIndex,
}

#[derive(Clone, Debug)]
pub struct FnDeclData {
    pub name: String,
    pub params: Vec<FnParam>,
    pub return_ty: Option<TypeId>,
    pub type_params: Vec<TypeParamId>,
    pub body: Vec<NodeIndex>,
    /// Declaration opted into the static-discipline region.
    pub static_region: bool,
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    Root { items: Vec<NodeIndex> },
    FnDecl(FnDeclData),
    Ident { name: String, qualifier: NodeIndex },
    StringLit { value: String, interpolated: bool },
    IntLit(i64),
    FloatLit(f64),
    BoolLit(bool),
    NullLit,
    ListLit { elements: Vec<NodeIndex> },
    MapLit { entries: Vec<NodeIndex> },
    NamedArg { label: String, value: NodeIndex },
    ClosureLit { body: Vec<NodeIndex> },
    Call(CallData),
    ConstructorCall(ConstructorCallData),
    EnumConstant(EnumConstantData),
    Binary(BinaryData),
    Index(IndexData),
    Assignment(AssignmentData),
    TupleAssignment(TupleAssignmentData),
    Spread { inner: NodeIndex },
    Cast(CastData),
    VarDecl(VarDeclData),
    Return { value: NodeIndex },
    ForIn(ForInData),
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub fn new() -> Self {
        Arena { nodes: Vec::new() }
    }

    pub fn alloc(&mut self, kind: NodeKind, span: Span) -> NodeIndex {
        let idx = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(Node { kind, span });
        idx
    }

    pub fn get(&self, idx: NodeIndex) -> Option<&Node> {
        if idx.is_none() {
            return None;
        }
        self.nodes.get(idx.0 as usize)
    }

    pub fn span(&self, idx: NodeIndex) -> Span {
        self.get(idx).map(|n| n.span).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn get_call(&self, idx: NodeIndex) -> Option<&CallData> {
        match &self.get(idx)?.kind {
            NodeKind::Call(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_constructor_call(&self, idx: NodeIndex) -> Option<&ConstructorCallData> {
        match &self.get(idx)?.kind {
            NodeKind::ConstructorCall(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_enum_constant(&self, idx: NodeIndex) -> Option<&EnumConstantData> {
        match &self.get(idx)?.kind {
            NodeKind::EnumConstant(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_binary(&self, idx: NodeIndex) -> Option<&BinaryData> {
        match &self.get(idx)?.kind {
            NodeKind::Binary(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_index(&self, idx: NodeIndex) -> Option<&IndexData> {
        match &self.get(idx)?.kind {
            NodeKind::Index(data) => Some(data),
            _ => None,
        }
    }

    pub fn get_list_literal(&self, idx: NodeIndex) -> Option<&[NodeIndex]> {
        match &self.get(idx)?.kind {
            NodeKind::ListLit { elements } => Some(elements),
            _ => None,
        }
    }

    pub fn get_map_literal(&self, idx: NodeIndex) -> Option<&[NodeIndex]> {
        match &self.get(idx)?.kind {
            NodeKind::MapLit { entries } => Some(entries),
            _ => None,
        }
    }

    pub fn get_named_arg(&self, idx: NodeIndex) -> Option<(&str, NodeIndex)> {
        match &self.get(idx)?.kind {
            NodeKind::NamedArg { label, value } => Some((label.as_str(), *value)),
            _ => None,
        }
    }

    pub fn get_spread(&self, idx: NodeIndex) -> Option<NodeIndex> {
        match &self.get(idx)?.kind {
            NodeKind::Spread { inner } => Some(*inner),
            _ => None,
        }
    }

    pub fn get_ident(&self, idx: NodeIndex) -> Option<(&str, NodeIndex)> {
        match &self.get(idx)?.kind {
            NodeKind::Ident { name, qualifier } => Some((name.as_str(), *qualifier)),
            _ => None,
        }
    }

    pub fn get_fn_decl(&self, idx: NodeIndex) -> Option<&FnDeclData> {
        match &self.get(idx)?.kind {
            NodeKind::FnDecl(data) => Some(data),
            _ => None,
        }
    }
}

/// Compile-time string value of an expression, when it has one: plain string
/// literals and `+` concatenations of such. Interpolated strings are never
/// compile-time constants here.
pub fn const_string_value(arena: &Arena, idx: NodeIndex) -> Option<String> {
    match &arena.get(idx)?.kind {
        NodeKind::StringLit {
            value,
            interpolated: false,
        } => Some(value.clone()),
        NodeKind::Binary(data) if data.op == BinaryOp::Add => {
            let lhs = const_string_value(arena, data.lhs)?;
            let rhs = const_string_value(arena, data.rhs)?;
            Some(format!("{lhs}{rhs}"))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn const_string_folds_concatenation() {
        let mut arena = Arena::new();
        let a = arena.alloc(
            NodeKind::StringLit {
                value: "VAL".to_string(),
                interpolated: false,
            },
            Span::new(0, 5),
        );
        let b = arena.alloc(
            NodeKind::StringLit {
                value: "UE".to_string(),
                interpolated: false,
            },
            Span::new(6, 4),
        );
        let concat = arena.alloc(
            NodeKind::Binary(BinaryData {
                op: BinaryOp::Add,
                lhs: a,
                rhs: b,
            }),
            Span::new(0, 10),
        );
        assert_eq!(const_string_value(&arena, concat).as_deref(), Some("VALUE"));

        let interp = arena.alloc(
            NodeKind::StringLit {
                value: "VAL".to_string(),
                interpolated: true,
            },
            Span::new(11, 6),
        );
        assert_eq!(const_string_value(&arena, interp), None);
    }
}
