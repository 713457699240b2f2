//! Declaration registry.
//!
//! Holds everything the checker needs to know about declared names: classes
//! and their hierarchy, enums and their constants, type parameters with
//! bounds, and callable/field declarations. Name resolution itself happens in
//! a collaborator; this registry only answers by-id lookups.

use crate::interner::{PrimitiveKind, Type, TypeId, TypeInterner};
use indexmap::IndexMap;

pub use crate::interner::{ClassId, TypeParamId};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Enum { constants: Vec<String> },
}

#[derive(Clone, Debug)]
pub struct ClassDef {
    pub name: String,
    pub superclass: Option<TypeId>,
    pub interfaces: Vec<TypeId>,
    pub type_params: Vec<TypeParamId>,
    pub kind: ClassKind,
}

#[derive(Clone, Debug)]
pub struct TypeParamDef {
    pub name: String,
    pub bounds: Vec<TypeId>,
}

/// Declaration handle for methods, constructors and fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct DeclId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeclKind {
    Method,
    Constructor,
    Field,
}

#[derive(Clone, Debug)]
pub struct Param {
    pub name: String,
    pub ty: TypeId,
}

#[derive(Clone, Debug)]
pub struct Decl {
    pub kind: DeclKind,
    pub name: String,
    pub owner: ClassId,
    pub params: Vec<Param>,
    /// Last parameter is an array accepting zero-or-more surplus arguments.
    pub is_varargs: bool,
    pub return_ty: TypeId,
    pub type_params: Vec<TypeParamId>,
    /// Category/extension method: statically declared elsewhere but invoked
    /// as an instance method on receivers of this type.
    pub category_receiver: Option<TypeId>,
    pub is_static: bool,
}

/// Well-known classes seeded by `TypeRegistry::with_builtins`.
#[derive(Clone, Debug)]
pub struct WellKnown {
    pub object_class: ClassId,
    pub object: TypeId,
    pub char_sequence_class: ClassId,
    pub char_sequence: TypeId,
    pub string_class: ClassId,
    pub string: TypeId,
    pub interpolated_string_class: ClassId,
    pub interpolated_string: TypeId,
    pub number_class: ClassId,
    pub number: TypeId,
    pub iterable_class: ClassId,
    pub collection_class: ClassId,
    pub list_class: ClassId,
    pub list: TypeId,
    pub map_class: ClassId,
    pub map: TypeId,
    pub closure_class: ClassId,
    pub closure_object: TypeId,
}

pub struct TypeRegistry {
    classes: Vec<ClassDef>,
    type_params: Vec<TypeParamDef>,
    decls: Vec<Decl>,
    /// Boxed class per primitive, in `PrimitiveKind::ALL` order.
    boxed: IndexMap<PrimitiveKind, TypeId>,
    pub well_known: WellKnown,
}

impl TypeRegistry {
    /// Build a registry seeded with the builtin hierarchy:
    /// `String`/`InterpolatedString` implement `CharSequence`, boxed numeric
    /// classes extend `Number`, `List extends Collection extends Iterable`.
    pub fn with_builtins(itn: &TypeInterner) -> Self {
        let mut classes = Vec::new();
        let mut add = |name: &str, superclass: Option<TypeId>, interfaces: Vec<TypeId>,
                       type_params: Vec<TypeParamId>, kind: ClassKind| {
            let id = ClassId(classes.len() as u32);
            classes.push(ClassDef {
                name: name.to_string(),
                superclass,
                interfaces,
                type_params,
                kind,
            });
            id
        };

        let object_class = add("Object", None, vec![], vec![], ClassKind::Class);
        let object = itn.class_type(object_class, vec![]);

        let char_sequence_class =
            add("CharSequence", Some(object), vec![], vec![], ClassKind::Interface);
        let char_sequence = itn.class_type(char_sequence_class, vec![]);

        let string_class = add("String", Some(object), vec![char_sequence], vec![], ClassKind::Class);
        let string = itn.class_type(string_class, vec![]);

        let interpolated_string_class = add(
            "InterpolatedString",
            Some(object),
            vec![char_sequence],
            vec![],
            ClassKind::Class,
        );
        let interpolated_string = itn.class_type(interpolated_string_class, vec![]);

        let number_class = add("Number", Some(object), vec![], vec![], ClassKind::Class);
        let number = itn.class_type(number_class, vec![]);

        let mut type_params: Vec<TypeParamDef> = Vec::new();
        let mut fresh_param = |name: &str, bounds: Vec<TypeId>| {
            let id = TypeParamId(type_params.len() as u32);
            type_params.push(TypeParamDef {
                name: name.to_string(),
                bounds,
            });
            id
        };

        let iterable_elem = fresh_param("E", vec![object]);
        let iterable_class = add(
            "Iterable",
            Some(object),
            vec![],
            vec![iterable_elem],
            ClassKind::Interface,
        );

        let collection_elem = fresh_param("E", vec![object]);
        let collection_super = itn.class_type(iterable_class, vec![itn.type_param(collection_elem)]);
        let collection_class = add(
            "Collection",
            Some(object),
            vec![collection_super],
            vec![collection_elem],
            ClassKind::Interface,
        );

        let list_elem = fresh_param("E", vec![object]);
        let list_super = itn.class_type(collection_class, vec![itn.type_param(list_elem)]);
        let list_class = add(
            "List",
            Some(object),
            vec![list_super],
            vec![list_elem],
            ClassKind::Interface,
        );
        let list = itn.class_type(list_class, vec![]);

        let map_key = fresh_param("K", vec![object]);
        let map_value = fresh_param("V", vec![object]);
        let map_class = add(
            "Map",
            Some(object),
            vec![],
            vec![map_key, map_value],
            ClassKind::Interface,
        );
        let map = itn.class_type(map_class, vec![]);

        let closure_class = add("Closure", Some(object), vec![], vec![], ClassKind::Class);
        let closure_object = itn.class_type(closure_class, vec![]);

        let mut boxed = IndexMap::new();
        for (kind, name) in [
            (PrimitiveKind::Boolean, "Boolean"),
            (PrimitiveKind::Char, "Character"),
            (PrimitiveKind::Byte, "Byte"),
            (PrimitiveKind::Short, "Short"),
            (PrimitiveKind::Int, "Integer"),
            (PrimitiveKind::Long, "Long"),
            (PrimitiveKind::Float, "Float"),
            (PrimitiveKind::Double, "Double"),
        ] {
            let superclass = match kind {
                PrimitiveKind::Boolean | PrimitiveKind::Char => object,
                _ => number,
            };
            let class = add(name, Some(superclass), vec![], vec![], ClassKind::Class);
            boxed.insert(kind, itn.class_type(class, vec![]));
        }

        TypeRegistry {
            classes,
            type_params,
            decls: Vec::new(),
            boxed,
            well_known: WellKnown {
                object_class,
                object,
                char_sequence_class,
                char_sequence,
                string_class,
                string,
                interpolated_string_class,
                interpolated_string,
                number_class,
                number,
                iterable_class,
                collection_class,
                list_class,
                list,
                map_class,
                map,
                closure_class,
                closure_object,
            },
        }
    }

    pub fn add_class(&mut self, def: ClassDef) -> ClassId {
        let id = ClassId(self.classes.len() as u32);
        self.classes.push(def);
        id
    }

    pub fn add_type_param(&mut self, def: TypeParamDef) -> TypeParamId {
        let id = TypeParamId(self.type_params.len() as u32);
        self.type_params.push(def);
        id
    }

    pub fn add_decl(&mut self, decl: Decl) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        self.decls.push(decl);
        id
    }

    pub fn class(&self, id: ClassId) -> &ClassDef {
        &self.classes[id.0 as usize]
    }

    pub fn type_param(&self, id: TypeParamId) -> &TypeParamDef {
        &self.type_params[id.0 as usize]
    }

    /// `None` when the id is out of range, which means the resolver handed
    /// back a candidate for a declaration this registry never saw.
    pub fn decl(&self, id: DeclId) -> Option<&Decl> {
        self.decls.get(id.0 as usize)
    }

    pub fn boxed_type(&self, kind: PrimitiveKind) -> TypeId {
        self.boxed[&kind]
    }

    pub fn unboxed_kind(&self, ty: TypeId) -> Option<PrimitiveKind> {
        self.boxed
            .iter()
            .find(|&(_, &b)| b == ty)
            .map(|(&kind, _)| kind)
    }

    /// Enum constants declared on the class behind `ty`, if it is an enum.
    pub fn enum_constants(&self, itn: &TypeInterner, ty: TypeId) -> Option<&[String]> {
        let Type::Class { def, .. } = itn.get(ty) else {
            return None;
        };
        match &self.class(def).kind {
            ClassKind::Enum { constants } => Some(constants),
            _ => None,
        }
    }

    pub fn is_enum_type(&self, itn: &TypeInterner, ty: TypeId) -> bool {
        self.enum_constants(itn, ty).is_some()
    }

    /// Version counter over the declaration set. Advisory caches key on this
    /// and must be invalidated whenever it changes.
    pub fn version(&self) -> u64 {
        (self.classes.len() as u64) << 32 | self.decls.len() as u64
    }
}
