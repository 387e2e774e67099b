//! The `Iter` protocol for `for` loop targets
//!
//! `for x : expr` is valid only when the static type of `expr` implements
//! the `Iter` interface. The language has no generic interfaces, so the std
//! declaration of `Iter` carries a placeholder element:
//!
//! ```text
//! interface Iter {
//!     fun next(self: *Self): *E
//! }
//! ```
//!
//! The pointer around the element is the end-of-sequence wrapper; a null
//! pointer signals exhaustion. The matcher binds `E` against the target's
//! own `next` method, which yields the element type of the loop variable.

use codespan::Span;
use log::trace;

use table_lang_ast::{Ident, InterfaceDecl, MethodSignature, TypeRef};
use table_lang_miette_util::ToMiette;

use crate::matcher;
use crate::resolver::{Conformance, ConformanceResolver};
use crate::result::{ConformanceError, ConformanceResult};

/// The name `for` loops resolve against.
pub const ITER_INTERFACE: &str = "Iter";

/// Check that `typ` can be iterated and resolve its element type.
///
/// A target whose `next` yields values of some other type `T` iterates over
/// `T`; a target whose `next` yields values of its own type is iterated
/// directly (a linked node walking its successors binds the element to the
/// node itself).
pub fn check_iterable(
    resolver: &mut ConformanceResolver,
    typ: &TypeRef,
    span: Option<Span>,
) -> ConformanceResult<TypeRef> {
    trace!("Checking iterability of {}", typ);

    let table = resolver.table();
    let iter = table.lookup_interface(&Ident { span, id: ITER_INTERFACE.to_owned() })?;
    let (next, element) = next_requirement(iter, span)?;

    if resolver.satisfies(typ, iter, span)? == Conformance::NotSatisfied {
        return Err(ConformanceError::NotIterable {
            typ: typ.to_string(),
            span: span.to_miette(),
        }
        .into());
    }

    let strukt = match typ.base() {
        TypeRef::Named(name) => table.lookup_struct(name)?,
        // Primitives never satisfy Iter through the built-in table, and
        // placeholders already failed resolution above.
        base => {
            return Err(ConformanceError::impossible(
                format!("Type {base} satisfied Iter without being a struct"),
                span.to_miette(),
            ));
        }
    };

    for candidate in &strukt.methods {
        if let Some(bindings) = matcher::matches(next, candidate, &strukt.name) {
            let element = bindings.get(element).ok_or_else(|| {
                ConformanceError::impossible(
                    format!("The element of {ITER_INTERFACE} was not bound by {}", next.name),
                    span.to_miette(),
                )
            })?;
            return Ok(resolve_self(element, &strukt.name));
        }
    }

    Err(ConformanceError::impossible(
        format!("Type {typ} satisfied {ITER_INTERFACE} without a matching {} method", next.name),
        span.to_miette(),
    ))
}

/// Validate the declared shape of the `Iter` interface and return its single
/// required method together with the name of the element placeholder.
///
/// A malformed declaration set is a structural impossibility supplied by the
/// front-end, not a language-level error.
fn next_requirement<'a>(
    iter: &'a InterfaceDecl,
    span: Option<Span>,
) -> ConformanceResult<(&'a MethodSignature, &'a str)> {
    let [next] = iter.methods.as_slice() else {
        return Err(ConformanceError::impossible(
            format!("The {ITER_INTERFACE} interface must declare exactly one method"),
            iter.span.or(span).to_miette(),
        ));
    };
    match &next.ret {
        TypeRef::Ptr(inner) => match inner.as_ref() {
            TypeRef::Var(element) => Ok((next, &element.id)),
            _ => Err(malformed_return(next, span)),
        },
        _ => Err(malformed_return(next, span)),
    }
}

fn malformed_return(next: &MethodSignature, span: Option<Span>) -> Box<ConformanceError> {
    ConformanceError::impossible(
        format!("The return type of {} must wrap the element in a pointer", next.name),
        next.span.or(span).to_miette(),
    )
}

/// An element bound to `Self` is the iterated struct itself.
fn resolve_self(element: &TypeRef, owner: &Ident) -> TypeRef {
    match element {
        TypeRef::SelfType { .. } => TypeRef::Named(owner.clone()),
        element => element.clone(),
    }
}
