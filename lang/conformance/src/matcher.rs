//! Structural matching of method signatures

use table_lang_ast::{HashMap, Ident, MethodSignature, TypeRef};

/// Placeholder assignments produced by a successful match.
///
/// Placeholders only occur in required signatures of interfaces that are
/// polymorphic over a type, such as the element of `Iter`. For ordinary
/// interfaces the binding set is empty.
pub type Bindings = HashMap<String, TypeRef>;

/// Decide whether `candidate`, a method defined by the struct `owner`,
/// provides the method required by `required`.
///
/// Matching is structural and exact: the names must be equal, the parameter
/// counts must be equal, and every parameter and the return type must be
/// equal after substituting `Self -> owner` in the required signature at the
/// same pointer depth. A receiver declared `self: *ExampleStruct` therefore
/// satisfies a requirement declared `self: *Self`, while a by-value receiver
/// does not. There is no numeric widening and no coercion.
///
/// This is a pure function; identical inputs always produce identical
/// results.
pub fn matches(
    required: &MethodSignature,
    candidate: &MethodSignature,
    owner: &Ident,
) -> Option<Bindings> {
    if required.name != candidate.name {
        return None;
    }
    if required.params.len() != candidate.params.len() {
        return None;
    }

    let mut bindings = Bindings::default();
    for (req, cand) in required.params.iter().zip(&candidate.params) {
        if !unify(&req.typ, &cand.typ, owner, &mut bindings) {
            return None;
        }
    }
    if !unify(&required.ret, &candidate.ret, owner, &mut bindings) {
        return None;
    }

    Some(bindings)
}

/// Match one required type against one candidate type.
///
/// Pointer indirections must agree on both sides; `Self` resolves to the
/// candidate's owning struct; placeholders bind to the candidate type,
/// consistently across repeated occurrences.
fn unify(required: &TypeRef, candidate: &TypeRef, owner: &Ident, bindings: &mut Bindings) -> bool {
    match (required, candidate) {
        (TypeRef::Ptr(req), TypeRef::Ptr(cand)) => unify(req, cand, owner, bindings),
        (TypeRef::SelfType { .. }, TypeRef::Named(name)) => name == owner,
        (TypeRef::SelfType { .. }, TypeRef::SelfType { .. }) => true,
        (TypeRef::Var(name), _) => match bindings.get(&name.id) {
            Some(bound) => bound == candidate,
            None => {
                bindings.insert(name.id.clone(), candidate.clone());
                true
            }
        },
        (req, cand) => req == cand,
    }
}
