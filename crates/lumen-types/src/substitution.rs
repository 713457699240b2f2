//! Generic substitution maps.
//!
//! A `Substitution` maps declared type parameters to concrete argument types.
//! Candidates carry one of these from name resolution; the checker applies it
//! to parameter types before any conversion check. The bound-erasing
//! constructor backs default-parameter initializer checks, where a
//! declaration's own type parameters are replaced by the upper-bound wildcard
//! of their constraints.

use crate::interner::{ClosureParam, Type, TypeId, TypeInterner, TypeParamId};
use crate::registry::TypeRegistry;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default)]
pub struct Substitution {
    map: FxHashMap<TypeParamId, TypeId>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, param: TypeParamId, ty: TypeId) {
        self.map.insert(param, ty);
    }

    pub fn get(&self, param: TypeParamId) -> Option<TypeId> {
        self.map.get(&param).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Map each of `params` to the upper-bound wildcard of its constraints
    /// (the first declared bound, or an unbounded wildcard).
    pub fn erasing_to_bounds(
        itn: &TypeInterner,
        reg: &TypeRegistry,
        params: &[TypeParamId],
    ) -> Self {
        let mut subst = Substitution::new();
        for &param in params {
            let bound = reg.type_param(param).bounds.first().copied();
            subst.insert(param, itn.wildcard(bound));
        }
        subst
    }

    /// Rebuild `ty` with every mapped type parameter replaced. Unmapped
    /// parameters stay as-is.
    pub fn apply(&self, itn: &TypeInterner, ty: TypeId) -> TypeId {
        if self.map.is_empty() {
            return ty;
        }
        match itn.get(ty) {
            Type::TypeParam(param) => self.get(param).unwrap_or(ty),
            Type::Array(elem) => {
                let mapped = self.apply(itn, elem);
                if mapped == elem { ty } else { itn.array(mapped) }
            }
            Type::Class { def, args } => {
                let mapped: Vec<TypeId> = args.iter().map(|&a| self.apply(itn, a)).collect();
                if mapped == args {
                    ty
                } else {
                    itn.class_type(def, mapped)
                }
            }
            Type::Closure { params, ret } => {
                let mapped_params: Vec<ClosureParam> = params
                    .iter()
                    .map(|p| ClosureParam {
                        ty: self.apply(itn, p.ty),
                        optional: p.optional,
                    })
                    .collect();
                let mapped_ret = self.apply(itn, ret);
                if mapped_params == params && mapped_ret == ret {
                    ty
                } else {
                    itn.closure(mapped_params, mapped_ret)
                }
            }
            Type::Wildcard { bound } => match bound {
                Some(b) => {
                    let mapped = self.apply(itn, b);
                    if mapped == b { ty } else { itn.wildcard(Some(mapped)) }
                }
                None => ty,
            },
            Type::ListLiteral(elems) => {
                let mapped: Vec<TypeId> = elems.iter().map(|&e| self.apply(itn, e)).collect();
                if mapped == elems {
                    ty
                } else {
                    itn.list_literal(mapped)
                }
            }
            Type::MapLiteral(entries) => {
                let mapped: Vec<(String, TypeId)> = entries
                    .iter()
                    .map(|(k, v)| (k.clone(), self.apply(itn, *v)))
                    .collect();
                if mapped == entries {
                    ty
                } else {
                    itn.map_literal(mapped)
                }
            }
            Type::Unknown | Type::Void | Type::Null | Type::Primitive(_) => ty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::TypeParamDef;
    use pretty_assertions::assert_eq;

    #[test]
    fn applies_through_nested_types() {
        let itn = TypeInterner::new();
        let mut reg = TypeRegistry::with_builtins(&itn);
        let t = reg.add_type_param(TypeParamDef {
            name: "T".to_string(),
            bounds: vec![reg.well_known.object],
        });
        let t_ty = itn.type_param(t);
        let list_of_t = itn.class_type(reg.well_known.list_class, vec![t_ty]);

        let mut subst = Substitution::new();
        subst.insert(t, reg.well_known.string);

        let applied = subst.apply(&itn, list_of_t);
        assert_eq!(
            applied,
            itn.class_type(reg.well_known.list_class, vec![reg.well_known.string])
        );
        // Arrays of the parameter map too.
        assert_eq!(
            subst.apply(&itn, itn.array(t_ty)),
            itn.array(reg.well_known.string)
        );
    }

    #[test]
    fn erasing_substitution_uses_first_bound() {
        let itn = TypeInterner::new();
        let mut reg = TypeRegistry::with_builtins(&itn);
        let bounded = reg.add_type_param(TypeParamDef {
            name: "N".to_string(),
            bounds: vec![reg.well_known.number],
        });
        let subst = Substitution::erasing_to_bounds(&itn, &reg, &[bounded]);
        assert_eq!(
            subst.apply(&itn, itn.type_param(bounded)),
            itn.wildcard(Some(reg.well_known.number))
        );
    }
}
