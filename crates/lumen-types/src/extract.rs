//! Iterable element-type extraction.
//!
//! Used by the tuple-assignment and for-in checks: given the static type of
//! an iterated expression, produce the element type a loop variable or
//! destructuring target receives. Returns `None` when the type is not
//! iterable as far as the checker can tell.

use crate::interner::{Type, TypeId, TypeInterner};
use crate::registry::{ClassId, TypeRegistry};
use crate::substitution::Substitution;

pub fn element_type(itn: &TypeInterner, reg: &TypeRegistry, ty: TypeId) -> Option<TypeId> {
    if ty == TypeId::UNKNOWN {
        return Some(TypeId::UNKNOWN);
    }
    match itn.get(ty) {
        Type::Array(elem) => Some(elem),
        Type::ListLiteral(elems) => Some(lub(reg, &elems)),
        Type::Class { def, args } => iterable_argument(itn, reg, def, &args),
        _ => None,
    }
}

/// Walk the hierarchy up to `Iterable` and return its instantiated element
/// argument. Raw collection types iterate as `Object`.
fn iterable_argument(
    itn: &TypeInterner,
    reg: &TypeRegistry,
    def: ClassId,
    args: &[TypeId],
) -> Option<TypeId> {
    if def == reg.well_known.iterable_class {
        return Some(args.first().copied().unwrap_or(reg.well_known.object));
    }
    let cls = reg.class(def);
    let mut subst = Substitution::new();
    for (&param, &arg) in cls.type_params.iter().zip(args) {
        subst.insert(param, arg);
    }
    for &parent in cls.superclass.iter().chain(cls.interfaces.iter()) {
        let instantiated = subst.apply(itn, parent);
        if let Type::Class {
            def: parent_def,
            args: parent_args,
        } = itn.get(instantiated)
        {
            if let Some(elem) = iterable_argument(itn, reg, parent_def, &parent_args) {
                return Some(elem);
            }
        }
    }
    None
}

/// Least upper bound of literal element types: the common type if all agree,
/// otherwise `Object`.
fn lub(reg: &TypeRegistry, elems: &[TypeId]) -> TypeId {
    match elems.first() {
        None => reg.well_known.object,
        Some(&first) if elems.iter().all(|&e| e == first) => first,
        Some(_) => reg.well_known.object,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn extracts_from_arrays_lists_and_literals() {
        let itn = TypeInterner::new();
        let reg = TypeRegistry::with_builtins(&itn);
        let string = reg.well_known.string;

        assert_eq!(element_type(&itn, &reg, itn.array(string)), Some(string));

        let list_of_string = itn.class_type(reg.well_known.list_class, vec![string]);
        assert_eq!(element_type(&itn, &reg, list_of_string), Some(string));

        let raw_list = itn.class_type(reg.well_known.list_class, vec![]);
        assert_eq!(element_type(&itn, &reg, raw_list), Some(reg.well_known.object));

        let lit = itn.list_literal(vec![TypeId::INT, TypeId::INT]);
        assert_eq!(element_type(&itn, &reg, lit), Some(TypeId::INT));

        let mixed = itn.list_literal(vec![TypeId::INT, string]);
        assert_eq!(element_type(&itn, &reg, mixed), Some(reg.well_known.object));

        assert_eq!(element_type(&itn, &reg, TypeId::INT), None);
        assert_eq!(element_type(&itn, &reg, TypeId::UNKNOWN), Some(TypeId::UNKNOWN));
    }
}
