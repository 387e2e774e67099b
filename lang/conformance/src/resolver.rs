//! Deciding whether a type satisfies an interface

use codespan::Span;
use log::trace;

use table_lang_ast::{HashMap, Ident, InterfaceDecl, StructDecl, TypeRef};
use table_lang_miette_util::ToMiette;

use crate::builtin;
use crate::declarations::DeclarationTable;
use crate::matcher;
use crate::result::{ConformanceError, ConformanceResult};

/// The outcome of a conformance query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conformance {
    Satisfied,
    NotSatisfied,
}

impl Conformance {
    pub fn is_satisfied(self) -> bool {
        matches!(self, Conformance::Satisfied)
    }
}

/// Node marking for the memo table.
///
/// Absent entries are unvisited. `InProgress` marks a query on the current
/// resolution path; finding it again means the interface requirement graph
/// is cyclic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConformanceState {
    InProgress,
    Resolved(Conformance),
}

/// Memoizing resolver for conformance queries against one sealed
/// declaration table.
///
/// Results are computed lazily on first query and never change afterwards;
/// the declarations are frozen, so no invalidation exists. One resolver is
/// owned per compilation unit.
pub struct ConformanceResolver<'a> {
    table: &'a DeclarationTable,
    memo: HashMap<(String, String), ConformanceState>,
}

impl<'a> ConformanceResolver<'a> {
    pub fn new(table: &'a DeclarationTable) -> Self {
        ConformanceResolver { table, memo: HashMap::default() }
    }

    /// The declaration table this resolver answers queries against.
    pub fn table(&self) -> &'a DeclarationTable {
        self.table
    }

    /// Decide whether `typ` satisfies `interface`.
    ///
    /// The `span` is the caller's correlation token and only feeds the
    /// diagnostic labels of any failure.
    pub fn satisfies(
        &mut self,
        typ: &TypeRef,
        interface: &InterfaceDecl,
        span: Option<Span>,
    ) -> ConformanceResult<Conformance> {
        trace!("Checking conformance of {} to {}", typ, interface.name);

        match typ {
            // Built-ins never have user-declared methods to match.
            TypeRef::Prim(prim) => Ok(builtin::implements(*prim, &interface.name.id)),
            // Conformance is a property of the underlying type, observed
            // through either value or pointer.
            TypeRef::Ptr(inner) => self.satisfies(inner, interface, span),
            TypeRef::Named(name) => self.struct_satisfies(name, interface, span),
            TypeRef::Var(name) => Err(ConformanceError::UnresolvedGenericParameter {
                name: name.id.clone(),
                span: name.span.or(span).to_miette(),
            }
            .into()),
            TypeRef::SelfType { span: self_span } => Err(ConformanceError::impossible(
                "Self outside of an interface method signature",
                self_span.or(span).to_miette(),
            )),
        }
    }

    fn struct_satisfies(
        &mut self,
        name: &Ident,
        interface: &InterfaceDecl,
        span: Option<Span>,
    ) -> ConformanceResult<Conformance> {
        let key = (name.id.clone(), interface.name.id.clone());
        match self.memo.get(&key) {
            Some(ConformanceState::Resolved(outcome)) => return Ok(*outcome),
            Some(ConformanceState::InProgress) => {
                return Err(ConformanceError::CyclicInterfaceRequirement {
                    typ: name.id.clone(),
                    interface_name: interface.name.id.clone(),
                    span: span.to_miette(),
                }
                .into());
            }
            None => {}
        }

        let table = self.table;
        let strukt = table.lookup_struct(name)?;

        self.memo.insert(key.clone(), ConformanceState::InProgress);
        let outcome = self.verify_struct(strukt, interface, span)?;
        self.memo.insert(key, ConformanceState::Resolved(outcome));

        Ok(outcome)
    }

    /// Verify one struct against one interface.
    ///
    /// Supertype requirements are resolved first so that cycles in the
    /// requirement graph surface even for interfaces without methods. The
    /// struct must assert the interface in its `implements` list and provide
    /// a matching method for every requirement.
    fn verify_struct(
        &mut self,
        strukt: &StructDecl,
        interface: &InterfaceDecl,
        span: Option<Span>,
    ) -> ConformanceResult<Conformance> {
        let table = self.table;

        for super_name in &interface.supers {
            let super_decl = table.lookup_interface(super_name)?;
            let super_typ = TypeRef::Named(strukt.name.clone());
            if !self.satisfies(&super_typ, super_decl, span)?.is_satisfied() {
                return Ok(Conformance::NotSatisfied);
            }
        }

        if !strukt.asserts(&interface.name.id) {
            return Ok(Conformance::NotSatisfied);
        }

        for required in &interface.methods {
            let found = strukt
                .methods
                .iter()
                .any(|candidate| matcher::matches(required, candidate, &strukt.name).is_some());
            if !found {
                return Ok(Conformance::NotSatisfied);
            }
        }

        Ok(Conformance::Satisfied)
    }
}

#[cfg(test)]
mod tests {
    use table_lang_ast::{Decl, MethodSignature, Param, PrimType};

    use super::*;
    use crate::declarations::build_declaration_table;

    fn to_string_interface() -> Decl {
        Decl::Interface(InterfaceDecl {
            span: None,
            name: Ident::from_string("ToString"),
            methods: vec![MethodSignature {
                span: None,
                name: Ident::from_string("to_string"),
                params: vec![Param::new("self", TypeRef::ptr(TypeRef::self_type()))],
                ret: TypeRef::prim(PrimType::Str),
            }],
            supers: vec![],
        })
    }

    fn marker_interface(name: &str, supers: &[&str]) -> Decl {
        Decl::Interface(InterfaceDecl {
            span: None,
            name: Ident::from_string(name),
            methods: vec![],
            supers: supers.iter().map(|id| Ident::from_string(id)).collect(),
        })
    }

    fn example_struct(with_method: bool, implements: &[&str]) -> Decl {
        let methods = if with_method {
            vec![MethodSignature {
                span: None,
                name: Ident::from_string("to_string"),
                params: vec![Param::new("self", TypeRef::ptr(TypeRef::named("ExampleStruct")))],
                ret: TypeRef::prim(PrimType::Str),
            }]
        } else {
            vec![]
        };
        Decl::Struct(StructDecl {
            span: None,
            name: Ident::from_string("ExampleStruct"),
            fields: vec![Param::new("value", TypeRef::prim(PrimType::Int))],
            methods,
            implements: implements.iter().map(|id| Ident::from_string(id)).collect(),
        })
    }

    fn satisfies_example(decls: Vec<Decl>, interface: &str) -> ConformanceResult<Conformance> {
        let table = build_declaration_table(decls).unwrap();
        let interface = table.lookup_interface(&Ident::from_string(interface)).unwrap().clone();
        let mut resolver = ConformanceResolver::new(&table);
        resolver.satisfies(&TypeRef::named("ExampleStruct"), &interface, None)
    }

    #[test]
    fn primitives_satisfy_to_string() {
        let table = build_declaration_table([to_string_interface()]).unwrap();
        let interface = table.lookup_interface(&Ident::from_string("ToString")).unwrap().clone();
        let mut resolver = ConformanceResolver::new(&table);
        for prim in PrimType::ALL {
            let outcome = resolver.satisfies(&TypeRef::prim(prim), &interface, None).unwrap();
            assert_eq!(outcome, Conformance::Satisfied);
        }
    }

    #[test]
    fn struct_with_matching_method_satisfies() {
        let decls = vec![to_string_interface(), example_struct(true, &["ToString"])];
        assert_eq!(satisfies_example(decls, "ToString").unwrap(), Conformance::Satisfied);
    }

    /// Removing the method flips the result.
    #[test]
    fn struct_without_method_does_not_satisfy() {
        let decls = vec![to_string_interface(), example_struct(false, &["ToString"])];
        assert_eq!(satisfies_example(decls, "ToString").unwrap(), Conformance::NotSatisfied);
    }

    /// The `implements` assertion is required in addition to the shape.
    #[test]
    fn struct_without_assertion_does_not_satisfy() {
        let decls = vec![to_string_interface(), example_struct(true, &[])];
        assert_eq!(satisfies_example(decls, "ToString").unwrap(), Conformance::NotSatisfied);
    }

    /// Conformance is observed through pointers: `*S` and `**S` behave like `S`.
    #[test]
    fn pointer_conformance_follows_pointee() {
        let decls = vec![to_string_interface(), example_struct(true, &["ToString"])];
        let table = build_declaration_table(decls).unwrap();
        let interface = table.lookup_interface(&Ident::from_string("ToString")).unwrap().clone();
        let mut resolver = ConformanceResolver::new(&table);
        let pointer = TypeRef::ptr(TypeRef::named("ExampleStruct"));
        assert!(resolver.satisfies(&pointer, &interface, None).unwrap().is_satisfied());
        let double = TypeRef::ptr(pointer);
        assert!(resolver.satisfies(&double, &interface, None).unwrap().is_satisfied());
    }

    /// Interface A requires B and B requires A: resolution terminates with
    /// a cycle error instead of looping.
    #[test]
    fn mutually_requiring_interfaces_are_cyclic() {
        let decls = vec![
            marker_interface("A", &["B"]),
            marker_interface("B", &["A"]),
            example_struct(false, &[]),
        ];
        let result = satisfies_example(decls, "A");
        assert!(matches!(
            *result.unwrap_err(),
            ConformanceError::CyclicInterfaceRequirement { .. }
        ));
    }

    /// A diamond requirement graph is not a cycle.
    #[test]
    fn diamond_requirements_resolve() {
        let decls = vec![
            marker_interface("Base", &[]),
            marker_interface("Left", &["Base"]),
            marker_interface("Right", &["Base"]),
            marker_interface("Top", &["Left", "Right"]),
            example_struct(false, &["Base", "Left", "Right", "Top"]),
        ];
        assert_eq!(satisfies_example(decls, "Top").unwrap(), Conformance::Satisfied);
    }

    /// Supertype conformance also demands the supertype's assertion.
    #[test]
    fn supertype_assertion_is_required() {
        let decls = vec![
            marker_interface("Base", &[]),
            marker_interface("Derived", &["Base"]),
            example_struct(false, &["Derived"]),
        ];
        assert_eq!(satisfies_example(decls, "Derived").unwrap(), Conformance::NotSatisfied);
    }

    /// Memoized queries return identical results on repetition.
    #[test]
    fn satisfies_is_idempotent() {
        let decls = vec![to_string_interface(), example_struct(true, &["ToString"])];
        let table = build_declaration_table(decls).unwrap();
        let interface = table.lookup_interface(&Ident::from_string("ToString")).unwrap().clone();
        let mut resolver = ConformanceResolver::new(&table);
        let typ = TypeRef::named("ExampleStruct");
        let first = resolver.satisfies(&typ, &interface, None).unwrap();
        let second = resolver.satisfies(&typ, &interface, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unresolved_generic_parameter_is_rejected() {
        let table = build_declaration_table([to_string_interface()]).unwrap();
        let interface = table.lookup_interface(&Ident::from_string("ToString")).unwrap().clone();
        let mut resolver = ConformanceResolver::new(&table);
        let result = resolver.satisfies(&TypeRef::var("T"), &interface, None);
        assert!(matches!(
            *result.unwrap_err(),
            ConformanceError::UnresolvedGenericParameter { .. }
        ));
    }

    #[test]
    fn unknown_struct_name_is_rejected() {
        let table = build_declaration_table([to_string_interface()]).unwrap();
        let interface = table.lookup_interface(&Ident::from_string("ToString")).unwrap().clone();
        let mut resolver = ConformanceResolver::new(&table);
        let result = resolver.satisfies(&TypeRef::named("Missing"), &interface, None);
        assert!(matches!(*result.unwrap_err(), ConformanceError::UnknownIdentifier { .. }));
    }
}
