use std::fmt;

use codespan::Span;

use crate::{HasSpan, Ident, TypeRef};

/// A name/type pair: a struct field or a declared parameter.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: Ident,
    pub typ: TypeRef,
}

impl Param {
    pub fn new(name: &str, typ: TypeRef) -> Self {
        Param { name: Ident::from_string(name), typ }
    }
}

/// The signature of a method defined by a struct or required by an interface.
///
/// The receiver is the first entry of `params`; it is typed either by value
/// or by pointer to the owning struct (resp. `Self` inside interfaces).
#[derive(Debug, Clone)]
pub struct MethodSignature {
    pub span: Option<Span>,
    pub name: Ident,
    pub params: Vec<Param>,
    pub ret: TypeRef,
}

impl MethodSignature {
    pub fn receiver(&self) -> Option<&Param> {
        self.params.first()
    }
}

impl HasSpan for MethodSignature {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

/// An interface declaration: a named set of required method signatures.
///
/// An interface may require conformance to other interfaces (`supers`),
/// making its own conformance conditional on theirs.
#[derive(Debug, Clone)]
pub struct InterfaceDecl {
    pub span: Option<Span>,
    pub name: Ident,
    /// Required methods, uniquely named within the interface.
    pub methods: Vec<MethodSignature>,
    /// Required supertype interfaces.
    pub supers: Vec<Ident>,
}

impl InterfaceDecl {
    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.iter().find(|method| method.name.id == name)
    }
}

impl HasSpan for InterfaceDecl {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

/// A struct declaration.
///
/// Field order is preserved for layout purposes but irrelevant to
/// conformance. The `implements` list records the interfaces the struct
/// asserts, as in `struct S : ToString, Iter`.
#[derive(Debug, Clone)]
pub struct StructDecl {
    pub span: Option<Span>,
    pub name: Ident,
    pub fields: Vec<Param>,
    pub methods: Vec<MethodSignature>,
    pub implements: Vec<Ident>,
}

impl StructDecl {
    pub fn method(&self, name: &str) -> Option<&MethodSignature> {
        self.methods.iter().find(|method| method.name.id == name)
    }

    /// Whether the struct asserts the interface in its `implements` list.
    pub fn asserts(&self, interface: &str) -> bool {
        self.implements.iter().any(|name| name.id == interface)
    }
}

impl HasSpan for StructDecl {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

/// A generic parameter together with its interface bounds.
///
/// Bounds are conjunctive; duplicates carry no additional meaning.
#[derive(Debug, Clone)]
pub struct GenericParam {
    pub name: Ident,
    pub bounds: Vec<Ident>,
}

/// A generic function declaration, e.g. `fun print_twice[T: ToString](x: *T)`.
///
/// Concrete parameters and the return type may reference the generic
/// parameters by name through [TypeRef::Var].
#[derive(Debug, Clone)]
pub struct GenericFunctionDecl {
    pub span: Option<Span>,
    pub name: Ident,
    pub generic_params: Vec<GenericParam>,
    pub params: Vec<Param>,
    pub ret: TypeRef,
}

impl HasSpan for GenericFunctionDecl {
    fn span(&self) -> Option<Span> {
        self.span
    }
}

// Declarations
//
//

/// A toplevel declaration produced by the parsing stage.
#[derive(Debug, Clone)]
pub enum Decl {
    Struct(StructDecl),
    Interface(InterfaceDecl),
    Fun(GenericFunctionDecl),
}

impl Decl {
    pub fn kind(&self) -> DeclKind {
        match self {
            Decl::Struct(_) => DeclKind::Struct,
            Decl::Interface(_) => DeclKind::Interface,
            Decl::Fun(_) => DeclKind::Fun,
        }
    }

    pub fn name(&self) -> &Ident {
        match self {
            Decl::Struct(strukt) => &strukt.name,
            Decl::Interface(interface) => &interface.name,
            Decl::Fun(fun) => &fun.name,
        }
    }
}

impl HasSpan for Decl {
    fn span(&self) -> Option<Span> {
        match self {
            Decl::Struct(strukt) => strukt.span,
            Decl::Interface(interface) => interface.span,
            Decl::Fun(fun) => fun.span,
        }
    }
}

/// The namespace a declaration lives in.
///
/// Structs, interfaces and functions occupy separate namespaces; a struct
/// and an interface may share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Struct,
    Interface,
    Fun,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclKind::Struct => write!(f, "struct"),
            DeclKind::Interface => write!(f, "interface"),
            DeclKind::Fun => write!(f, "function"),
        }
    }
}
