//! Assignability primitives.
//!
//! Boolean relations only: identity, primitive widening, boxing, the subtype
//! walk, and the string coercion family. Severity decisions (ok / warning /
//! error) belong to the checker's conversion layer, which combines these.

use crate::interner::{PrimitiveKind, Type, TypeId, TypeInterner};
use crate::registry::{ClassId, TypeRegistry};
use crate::substitution::Substitution;
use rustc_hash::FxHashSet;
use tracing::trace;

/// Primitive widening per the numeric tower. `char` widens to the integral
/// and floating kinds but nothing widens to `char`.
pub fn widens_to(from: PrimitiveKind, to: PrimitiveKind) -> bool {
    use PrimitiveKind::*;
    if from == to {
        return true;
    }
    match from {
        Boolean | Double => false,
        Char => matches!(to, Int | Long | Float | Double),
        Byte => matches!(to, Short | Int | Long | Float | Double),
        Short => matches!(to, Int | Long | Float | Double),
        Int => matches!(to, Long | Float | Double),
        Long => matches!(to, Float | Double),
        Float => matches!(to, Double),
    }
}

pub fn is_string_like(itn: &TypeInterner, reg: &TypeRegistry, ty: TypeId) -> bool {
    let wk = &reg.well_known;
    ty == wk.string
        || ty == wk.interpolated_string
        || ty == wk.char_sequence
        || is_subtype(itn, reg, ty, wk.char_sequence)
}

/// Nominal subtype walk, including wildcard bounds, type-parameter bounds,
/// array covariance, closure shape compatibility and literal-type coercions.
pub fn is_subtype(itn: &TypeInterner, reg: &TypeRegistry, sub: TypeId, sup: TypeId) -> bool {
    let mut rel = Relation {
        itn,
        reg,
        seen: FxHashSet::default(),
    };
    rel.subtype(sub, sup)
}

/// Whether a value of `source` type may be used where `target` is expected,
/// at the ok-severity level: identity, widening, boxing/unboxing, string
/// coercion, subtyping.
pub fn is_assignable(itn: &TypeInterner, reg: &TypeRegistry, target: TypeId, source: TypeId) -> bool {
    let mut rel = Relation {
        itn,
        reg,
        seen: FxHashSet::default(),
    };
    rel.assignable(target, source)
}

struct Relation<'a> {
    itn: &'a TypeInterner,
    reg: &'a TypeRegistry,
    /// (sub, sup) pairs currently on the walk; recursive generics terminate
    /// by treating an in-progress pair as satisfied.
    seen: FxHashSet<(TypeId, TypeId)>,
}

impl Relation<'_> {
    fn assignable(&mut self, target: TypeId, source: TypeId) -> bool {
        if target == source || target == TypeId::UNKNOWN || source == TypeId::UNKNOWN {
            return true;
        }
        let wk = &self.reg.well_known;
        if target == wk.object {
            return source != TypeId::VOID;
        }
        let target_ty = self.itn.get(target);
        let source_ty = self.itn.get(source);

        if source == TypeId::NULL {
            return !matches!(target_ty, Type::Primitive(_));
        }

        match (&target_ty, &source_ty) {
            (Type::Primitive(t), Type::Primitive(s)) => return widens_to(*s, *t),
            (_, Type::Primitive(s)) => {
                let boxed = self.reg.boxed_type(*s);
                return self.subtype(boxed, target);
            }
            (Type::Primitive(t), _) => {
                if let Some(unboxed) = self.reg.unboxed_kind(source) {
                    return widens_to(unboxed, *t);
                }
                return false;
            }
            _ => {}
        }

        // Interpolated strings coerce to String implicitly; the reverse does not hold.
        if target == wk.string && source == wk.interpolated_string {
            return true;
        }

        self.subtype(source, target)
    }

    fn subtype(&mut self, sub: TypeId, sup: TypeId) -> bool {
        if sub == sup || sub == TypeId::UNKNOWN || sup == TypeId::UNKNOWN {
            return true;
        }
        if !self.seen.insert((sub, sup)) {
            return true;
        }
        let result = self.subtype_uncached(sub, sup);
        self.seen.remove(&(sub, sup));
        trace!(?sub, ?sup, result, "subtype");
        result
    }

    fn subtype_uncached(&mut self, sub: TypeId, sup: TypeId) -> bool {
        let wk = &self.reg.well_known;
        let sub_ty = self.itn.get(sub);
        let sup_ty = self.itn.get(sup);

        match &sup_ty {
            Type::Wildcard { bound } => {
                return match bound {
                    Some(b) => self.subtype(sub, *b),
                    None => true,
                };
            }
            Type::TypeParam(id) => {
                let bounds = self.reg.type_param(*id).bounds.clone();
                return bounds.iter().all(|&b| self.subtype(sub, b));
            }
            _ => {}
        }

        if sup == wk.object {
            return !matches!(sub_ty, Type::Primitive(_)) && sub != TypeId::VOID;
        }

        match &sub_ty {
            Type::Null => !matches!(sup_ty, Type::Primitive(_)),
            Type::Wildcard { bound } => match bound {
                Some(b) => self.subtype(*b, sup),
                None => false,
            },
            Type::TypeParam(id) => {
                let bounds = self.reg.type_param(*id).bounds.clone();
                bounds.iter().any(|&b| self.subtype(b, sup))
            }
            Type::Class { def, args } => self.class_subtype(*def, args, sup, &sup_ty),
            Type::Array(elem) => match &sup_ty {
                Type::Array(sup_elem) => self.subtype(*elem, *sup_elem),
                _ => false,
            },
            Type::Closure { params, ret } => match &sup_ty {
                Type::Closure {
                    params: sup_params,
                    ret: sup_ret,
                } => {
                    if params.len() != sup_params.len() {
                        return false;
                    }
                    let params = params.clone();
                    let sup_params = sup_params.clone();
                    let (ret, sup_ret) = (*ret, *sup_ret);
                    // Parameters contravariant, return covariant.
                    params
                        .iter()
                        .zip(&sup_params)
                        .all(|(p, sp)| self.assignable(p.ty, sp.ty))
                        && (ret == TypeId::VOID || self.subtype(ret, sup_ret))
                }
                Type::Class { def, .. } => *def == wk.closure_class,
                _ => false,
            },
            Type::ListLiteral(elems) => {
                let elems = elems.clone();
                match &sup_ty {
                    Type::Array(sup_elem) => {
                        let sup_elem = *sup_elem;
                        elems.iter().all(|&e| self.assignable(sup_elem, e))
                    }
                    Type::Class { def, args } => {
                        if !self.is_collection_family(*def) {
                            return false;
                        }
                        match args.first().copied() {
                            Some(elem_ty) => elems.iter().all(|&e| self.assignable(elem_ty, e)),
                            None => true,
                        }
                    }
                    _ => false,
                }
            }
            Type::MapLiteral(entries) => {
                let entries = entries.clone();
                match &sup_ty {
                    Type::Class { def, args } => {
                        if *def != wk.map_class {
                            return false;
                        }
                        match (args.first().copied(), args.get(1).copied()) {
                            (Some(key_ty), Some(value_ty)) => {
                                let string = wk.string;
                                self.assignable(key_ty, string)
                                    && entries.iter().all(|(_, v)| self.assignable(value_ty, *v))
                            }
                            _ => true,
                        }
                    }
                    _ => false,
                }
            }
            Type::Unknown | Type::Void | Type::Primitive(_) => false,
        }
    }

    fn class_subtype(&mut self, def: ClassId, args: &[TypeId], sup: TypeId, sup_ty: &Type) -> bool {
        if let Type::Class {
            def: sup_def,
            args: sup_args,
        } = sup_ty
        {
            if def == *sup_def {
                return self.class_args_compatible(args, sup_args);
            }
        }
        for parent in self.instantiated_supertypes(def, args) {
            if self.subtype(parent, sup) {
                return true;
            }
        }
        false
    }

    /// Raw types and arity mismatches are treated as compatible; otherwise
    /// pairwise, with wildcard bounds honored on the supertype side.
    fn class_args_compatible(&mut self, sub_args: &[TypeId], sup_args: &[TypeId]) -> bool {
        if sub_args.is_empty() || sup_args.is_empty() || sub_args.len() != sup_args.len() {
            return true;
        }
        sub_args
            .iter()
            .zip(sup_args)
            .all(|(&sa, &pa)| sa == pa || self.subtype(sa, pa))
    }

    /// Direct supertypes of `def`, with the class's own type parameters
    /// substituted by `args`.
    fn instantiated_supertypes(&mut self, def: ClassId, args: &[TypeId]) -> Vec<TypeId> {
        let cls = self.reg.class(def);
        let mut subst = Substitution::new();
        for (&param, &arg) in cls.type_params.iter().zip(args) {
            subst.insert(param, arg);
        }
        cls.superclass
            .iter()
            .chain(cls.interfaces.iter())
            .map(|&t| subst.apply(self.itn, t))
            .collect()
    }

    fn is_collection_family(&self, def: ClassId) -> bool {
        let wk = &self.reg.well_known;
        def == wk.list_class || def == wk.collection_class || def == wk.iterable_class
    }
}
