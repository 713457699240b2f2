//! Arena AST for the Lumen compatibility checker.
//!
//! The checker does not parse source text; a front-end collaborator
//! constructs nodes into an `Arena` (tests use the `builder` API directly).
//! Nodes carry spans for diagnostics and, where the surface syntax declares
//! one, an interned `TypeId` resolved by the binder collaborator.

pub mod arena;
pub mod builder;

pub use arena::{
    Arena, AssignmentData, BinaryData, BinaryOp, CallData, CastData, ConstructorCallData,
    EnumConstantData,
    FnDeclData, FnParam, ForInData, IndexData, Node, NodeIndex, NodeKind, TupleAssignmentData,
    VarDeclData, const_string_value,
};
pub use builder::AstBuilder;
