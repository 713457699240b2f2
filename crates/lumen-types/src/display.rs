//! Type rendering for diagnostics.

use crate::interner::{Type, TypeId, TypeInterner};
use crate::registry::TypeRegistry;

pub struct TypeFormatter<'a> {
    itn: &'a TypeInterner,
    reg: &'a TypeRegistry,
}

impl<'a> TypeFormatter<'a> {
    pub fn new(itn: &'a TypeInterner, reg: &'a TypeRegistry) -> Self {
        Self { itn, reg }
    }

    pub fn format(&self, ty: TypeId) -> String {
        match self.itn.get(ty) {
            Type::Unknown => "?".to_string(),
            Type::Void => "void".to_string(),
            Type::Null => "null".to_string(),
            Type::Primitive(kind) => kind.name().to_string(),
            Type::Class { def, args } => {
                let name = &self.reg.class(def).name;
                if args.is_empty() {
                    name.clone()
                } else {
                    let rendered: Vec<String> = args.iter().map(|&a| self.format(a)).collect();
                    format!("{}<{}>", name, rendered.join(", "))
                }
            }
            Type::Array(elem) => format!("{}[]", self.format(elem)),
            Type::Closure { params, ret } => {
                let rendered: Vec<String> = params.iter().map(|p| self.format(p.ty)).collect();
                format!("{{ ({}) -> {} }}", rendered.join(", "), self.format(ret))
            }
            Type::TypeParam(id) => self.reg.type_param(id).name.clone(),
            Type::Wildcard { bound } => match bound {
                Some(b) => format!("? extends {}", self.format(b)),
                None => "?".to_string(),
            },
            Type::ListLiteral(elems) => {
                let rendered: Vec<String> = elems.iter().map(|&e| self.format(e)).collect();
                format!("[{}]", rendered.join(", "))
            }
            Type::MapLiteral(entries) => {
                let rendered: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, self.format(*v)))
                    .collect();
                format!("[{}]", rendered.join(", "))
            }
        }
    }

    /// Render a call's argument type list, with uninferable slots as `?`.
    pub fn format_argument_list(&self, types: &[Option<TypeId>]) -> String {
        let rendered: Vec<String> = types
            .iter()
            .map(|slot| match slot {
                Some(ty) => self.format(*ty),
                None => "?".to_string(),
            })
            .collect();
        rendered.join(", ")
    }
}
