use std::fmt;

use codespan::Span;
use derivative::Derivative;

use crate::{HasSpan, Ident};

/// The built-in primitive types of the Table language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimType {
    Int,
    Float,
    Str,
    Bool,
    None,
}

impl PrimType {
    pub const ALL: [PrimType; 5] =
        [PrimType::Int, PrimType::Float, PrimType::Str, PrimType::Bool, PrimType::None];

    pub fn name(self) -> &'static str {
        match self {
            PrimType::Int => "int",
            PrimType::Float => "float",
            PrimType::Str => "str",
            PrimType::Bool => "bool",
            PrimType::None => "none",
        }
    }
}

impl fmt::Display for PrimType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A reference to a named type.
///
/// Type references are immutable values compared by structural identity,
/// i.e. by name and pointer depth. Spans never participate in equality.
///
/// `Var` is a generic parameter placeholder; it stands for a type that is
/// only known at instantiation time. `SelfType` may occur exclusively inside
/// interface method signatures, where it stands for the implementing struct.
#[derive(Debug, Clone, Derivative)]
#[derivative(Eq, PartialEq, Hash)]
pub enum TypeRef {
    /// A built-in primitive, e.g. `int`.
    Prim(PrimType),
    /// A user-defined struct, referenced by name.
    Named(Ident),
    /// A pointer to another type, e.g. `*int`.
    Ptr(Box<TypeRef>),
    /// A generic parameter placeholder, e.g. the `T` in `fun f[T: ToString]`.
    Var(Ident),
    /// The `Self` type inside an interface method signature.
    SelfType {
        #[derivative(PartialEq = "ignore", Hash = "ignore")]
        span: Option<Span>,
    },
}

impl TypeRef {
    pub fn prim(prim: PrimType) -> Self {
        TypeRef::Prim(prim)
    }

    pub fn named(id: &str) -> Self {
        TypeRef::Named(Ident::from_string(id))
    }

    pub fn var(id: &str) -> Self {
        TypeRef::Var(Ident::from_string(id))
    }

    pub fn self_type() -> Self {
        TypeRef::SelfType { span: None }
    }

    pub fn ptr(inner: TypeRef) -> Self {
        TypeRef::Ptr(Box::new(inner))
    }

    /// The type behind all pointer indirections.
    pub fn base(&self) -> &TypeRef {
        match self {
            TypeRef::Ptr(inner) => inner.base(),
            _ => self,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Prim(prim) => write!(f, "{prim}"),
            TypeRef::Named(name) => write!(f, "{name}"),
            TypeRef::Ptr(inner) => write!(f, "*{inner}"),
            TypeRef::Var(name) => write!(f, "{name}"),
            TypeRef::SelfType { .. } => write!(f, "Self"),
        }
    }
}

impl HasSpan for TypeRef {
    fn span(&self) -> Option<Span> {
        match self {
            TypeRef::Prim(_) => None,
            TypeRef::Named(name) => name.span,
            TypeRef::Ptr(inner) => inner.span(),
            TypeRef::Var(name) => name.span,
            TypeRef::SelfType { span } => *span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Structural identity ignores spans but not pointer depth.
    #[test]
    fn pointer_depth_is_load_bearing() {
        let by_value = TypeRef::named("Vec2");
        let by_pointer = TypeRef::ptr(TypeRef::named("Vec2"));
        assert_ne!(by_value, by_pointer);
        assert_eq!(by_pointer, TypeRef::ptr(TypeRef::named("Vec2")));
    }

    #[test]
    fn base_strips_all_indirections() {
        let typ = TypeRef::ptr(TypeRef::ptr(TypeRef::prim(PrimType::Int)));
        assert_eq!(typ.base(), &TypeRef::prim(PrimType::Int));
    }

    #[test]
    fn display_uses_surface_syntax() {
        assert_eq!(TypeRef::ptr(TypeRef::prim(PrimType::Int)).to_string(), "*int");
        assert_eq!(TypeRef::ptr(TypeRef::self_type()).to_string(), "*Self");
    }
}
