//! Collection phase: registering parsed declarations into the table
use codespan::Span;
use log::trace;

use table_lang_ast::{Decl, DeclKind, HasSpan, Ident};
use table_lang_miette_util::ToMiette;

use super::DeclarationTable;
use crate::result::{ConformanceError, ConformanceResult};

/// Collect a parsed declaration set into a sealed table.
///
/// This is the two-phase entry point expected by the front-end: all
/// declarations are registered before any conformance query runs, so
/// forward references between declarations need no ordering.
pub fn build_declaration_table(
    decls: impl IntoIterator<Item = Decl>,
) -> ConformanceResult<DeclarationTable> {
    let mut table = DeclarationTable::default();

    for decl in decls {
        table.register(decl)?;
    }

    table.seal();
    Ok(table)
}

impl DeclarationTable {
    /// Insert a declaration into its namespace.
    ///
    /// Fails with [ConformanceError::DuplicateDeclaration] if the name is
    /// already taken within the same namespace.
    pub fn register(&mut self, decl: Decl) -> ConformanceResult {
        trace!("Registering {} {}", decl.kind(), decl.name());

        if self.sealed {
            return Err(ConformanceError::impossible(
                format!("Registration of {} after the table was sealed", decl.name()),
                decl.span().to_miette(),
            ));
        }

        let kind = decl.kind();
        let name = decl.name().clone();
        let span = decl.span();
        let previous_span = match decl {
            Decl::Struct(strukt) => {
                self.map_struct.insert(strukt.name.id.clone(), strukt).map(|prev| prev.span)
            }
            Decl::Interface(interface) => self
                .map_interface
                .insert(interface.name.id.clone(), interface)
                .map(|prev| prev.span),
            Decl::Fun(fun) => self.map_fun.insert(fun.name.id.clone(), fun).map(|prev| prev.span),
        };

        match previous_span {
            Some(previous) => Err(duplicate(kind, &name, span, previous)),
            None => Ok(()),
        }
    }

    /// Transition the table to its read-only phase.
    ///
    /// Queries after sealing never allocate new entries, and further
    /// registrations are rejected.
    pub fn seal(&mut self) {
        self.sealed = true;
    }
}

fn duplicate(
    kind: DeclKind,
    name: &Ident,
    span: Option<Span>,
    previous: Option<Span>,
) -> Box<ConformanceError> {
    ConformanceError::DuplicateDeclaration {
        kind,
        name: name.id.clone(),
        span: span.to_miette(),
        previous_span: previous.to_miette(),
    }
    .into()
}
