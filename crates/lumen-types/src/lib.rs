//! Type model for the Lumen compatibility checker.
//!
//! This crate is organized into several submodules:
//! - `interner` - `TypeId` interning of structural `Type` values
//! - `registry` - declaration store: classes, enums, methods, fields
//! - `relations` - identity / widening / boxing / subtype primitives
//! - `substitution` - generic substitution maps
//! - `extract` - iterable element-type extraction
//! - `display` - type rendering for diagnostics
//!
//! The checker sits on top of these primitives; nothing here emits
//! diagnostics or knows about AST nodes.

pub mod display;
pub mod extract;
pub mod interner;
pub mod registry;
pub mod relations;
pub mod substitution;

pub use display::TypeFormatter;
pub use extract::element_type;
pub use interner::{ClosureParam, PrimitiveKind, Type, TypeId, TypeInterner};
pub use registry::{
    ClassDef, ClassId, ClassKind, Decl, DeclId, DeclKind, Param, TypeParamDef, TypeParamId,
    TypeRegistry, WellKnown,
};
pub use relations::{is_assignable, is_string_like, is_subtype};
pub use substitution::Substitution;
