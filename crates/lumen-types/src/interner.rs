//! Type interning.
//!
//! Structural `Type` values are interned into a `TypeInterner` and referred to
//! by `TypeId` everywhere else. Interning makes identity checks cheap and
//! keeps substitution/relation code allocation-light.

use rustc_hash::FxHashMap;
use std::cell::RefCell;

/// Interned type handle. Stable within one `TypeInterner`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

impl TypeId {
    /// Inference failed or the collaborator had nothing to say. Compatible
    /// with everything; checks involving it never produce diagnostics.
    pub const UNKNOWN: TypeId = TypeId(0);
    pub const VOID: TypeId = TypeId(1);
    pub const NULL: TypeId = TypeId(2);
    pub const BOOLEAN: TypeId = TypeId(3);
    pub const CHAR: TypeId = TypeId(4);
    pub const BYTE: TypeId = TypeId(5);
    pub const SHORT: TypeId = TypeId(6);
    pub const INT: TypeId = TypeId(7);
    pub const LONG: TypeId = TypeId(8);
    pub const FLOAT: TypeId = TypeId(9);
    pub const DOUBLE: TypeId = TypeId(10);
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Boolean,
    Char,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Char,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
        }
    }
}

/// Declaration handle into the `TypeRegistry` class table.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassId(pub u32);

/// Handle for a declared type parameter in the `TypeRegistry`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeParamId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClosureParam {
    pub ty: TypeId,
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Type {
    Unknown,
    Void,
    Null,
    Primitive(PrimitiveKind),
    Class { def: ClassId, args: Vec<TypeId> },
    Array(TypeId),
    Closure { params: Vec<ClosureParam>, ret: TypeId },
    TypeParam(TypeParamId),
    Wildcard { bound: Option<TypeId> },
    /// Static type of a list literal expression: one entry per element.
    ListLiteral(Vec<TypeId>),
    /// Static type of a map literal expression: label to value type.
    MapLiteral(Vec<(String, TypeId)>),
}

struct Inner {
    types: Vec<Type>,
    map: FxHashMap<Type, TypeId>,
}

/// Interner for `Type` values. Interior-mutable so it can be shared immutably
/// through the checker; one pass uses one interner on one thread.
pub struct TypeInterner {
    inner: RefCell<Inner>,
}

impl TypeInterner {
    pub fn new() -> Self {
        let interner = TypeInterner {
            inner: RefCell::new(Inner {
                types: Vec::new(),
                map: FxHashMap::default(),
            }),
        };
        // Seed order backs the TypeId constants above.
        let unknown = interner.intern(Type::Unknown);
        interner.intern(Type::Void);
        interner.intern(Type::Null);
        for kind in PrimitiveKind::ALL {
            interner.intern(Type::Primitive(kind));
        }
        debug_assert_eq!(unknown, TypeId::UNKNOWN);
        debug_assert_eq!(
            interner.intern(Type::Primitive(PrimitiveKind::Int)),
            TypeId::INT
        );
        interner
    }

    pub fn intern(&self, ty: Type) -> TypeId {
        let mut inner = self.inner.borrow_mut();
        if let Some(&id) = inner.map.get(&ty) {
            return id;
        }
        let id = TypeId(inner.types.len() as u32);
        inner.types.push(ty.clone());
        inner.map.insert(ty, id);
        id
    }

    /// Fetch the interned value. Types are small; returning a clone keeps
    /// borrow scopes out of caller code.
    pub fn get(&self, id: TypeId) -> Type {
        self.inner.borrow().types[id.0 as usize].clone()
    }

    pub fn primitive(&self, kind: PrimitiveKind) -> TypeId {
        match kind {
            PrimitiveKind::Boolean => TypeId::BOOLEAN,
            PrimitiveKind::Char => TypeId::CHAR,
            PrimitiveKind::Byte => TypeId::BYTE,
            PrimitiveKind::Short => TypeId::SHORT,
            PrimitiveKind::Int => TypeId::INT,
            PrimitiveKind::Long => TypeId::LONG,
            PrimitiveKind::Float => TypeId::FLOAT,
            PrimitiveKind::Double => TypeId::DOUBLE,
        }
    }

    pub fn class_type(&self, def: ClassId, args: Vec<TypeId>) -> TypeId {
        self.intern(Type::Class { def, args })
    }

    pub fn array(&self, of: TypeId) -> TypeId {
        self.intern(Type::Array(of))
    }

    pub fn closure(&self, params: Vec<ClosureParam>, ret: TypeId) -> TypeId {
        self.intern(Type::Closure { params, ret })
    }

    pub fn type_param(&self, id: TypeParamId) -> TypeId {
        self.intern(Type::TypeParam(id))
    }

    pub fn wildcard(&self, bound: Option<TypeId>) -> TypeId {
        self.intern(Type::Wildcard { bound })
    }

    pub fn list_literal(&self, elements: Vec<TypeId>) -> TypeId {
        self.intern(Type::ListLiteral(elements))
    }

    pub fn map_literal(&self, entries: Vec<(String, TypeId)>) -> TypeId {
        self.intern(Type::MapLiteral(entries))
    }

    pub fn is_primitive(&self, id: TypeId) -> bool {
        matches!(self.get(id), Type::Primitive(_))
    }
}
