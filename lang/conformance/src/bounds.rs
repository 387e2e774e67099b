//! Validation of generic call sites against their declared bounds

use codespan::Span;
use log::trace;

use table_lang_ast::{GenericFunctionDecl, HashMap, HashSet, Ident, Param, TypeRef};
use table_lang_miette_util::ToMiette;

use crate::resolver::ConformanceResolver;
use crate::result::{BoundViolation, ConformanceError, ConformanceResult};

/// A fully substituted generic function signature.
///
/// This is the record the code generation stage consumes for a validated
/// call site: every generic parameter has been replaced by its concrete
/// type argument.
#[derive(Debug, Clone)]
pub struct FunctionInstance {
    pub name: Ident,
    pub type_args: Vec<TypeRef>,
    pub params: Vec<Param>,
    pub ret: TypeRef,
}

/// Validate the type arguments of one generic call site.
///
/// The arity is checked first; on mismatch no bound checks run. Bounds of a
/// single parameter are conjunctive with duplicates collapsed; the first
/// failing bound of a parameter short-circuits the rest of *that* parameter,
/// but every parameter is examined, so the returned
/// [ConformanceError::BoundViolations] carries the complete list of
/// violations for the call site.
pub fn check_instantiation(
    resolver: &mut ConformanceResolver,
    decl: &GenericFunctionDecl,
    type_args: &[TypeRef],
    span: Option<Span>,
) -> ConformanceResult {
    trace!("Checking instantiation of {}", decl.name);

    if type_args.len() != decl.generic_params.len() {
        return Err(ConformanceError::ArityMismatch {
            name: decl.name.id.clone(),
            expected: decl.generic_params.len(),
            actual: type_args.len(),
            span: span.to_miette(),
        }
        .into());
    }

    let mut violations = Vec::new();
    for (param, arg) in decl.generic_params.iter().zip(type_args) {
        let mut seen: HashSet<&str> = HashSet::default();
        for bound in &param.bounds {
            if !seen.insert(&bound.id) {
                continue;
            }
            let interface = resolver.table().lookup_interface(bound)?;
            if resolver.satisfies(arg, interface, span)?.is_satisfied() {
                continue;
            }
            violations.push(BoundViolation {
                param_name: param.name.id.clone(),
                interface_name: bound.id.clone(),
                type_arg: arg.to_string(),
                span: span.to_miette(),
            });
            break;
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ConformanceError::BoundViolations {
            name: decl.name.id.clone(),
            violations,
            span: span.to_miette(),
        }
        .into())
    }
}

/// Validate a call site and substitute the type arguments through the
/// declared signature.
pub fn instantiate(
    resolver: &mut ConformanceResolver,
    decl: &GenericFunctionDecl,
    type_args: &[TypeRef],
    span: Option<Span>,
) -> ConformanceResult<FunctionInstance> {
    check_instantiation(resolver, decl, type_args, span)?;

    let mut subst: HashMap<&str, &TypeRef> = HashMap::default();
    for (param, arg) in decl.generic_params.iter().zip(type_args) {
        subst.insert(&param.name.id, arg);
    }

    let params = decl
        .params
        .iter()
        .map(|param| {
            Ok(Param { name: param.name.clone(), typ: subst_type(&param.typ, &subst, span)? })
        })
        .collect::<ConformanceResult<Vec<_>>>()?;
    let ret = subst_type(&decl.ret, &subst, span)?;

    Ok(FunctionInstance {
        name: decl.name.clone(),
        type_args: type_args.to_vec(),
        params,
        ret,
    })
}

fn subst_type(
    typ: &TypeRef,
    subst: &HashMap<&str, &TypeRef>,
    span: Option<Span>,
) -> ConformanceResult<TypeRef> {
    match typ {
        TypeRef::Var(name) => match subst.get(name.id.as_str()) {
            Some(arg) => Ok((*arg).clone()),
            None => Err(ConformanceError::impossible(
                format!("Unbound generic parameter {name} in function signature"),
                name.span.or(span).to_miette(),
            )),
        },
        TypeRef::Ptr(inner) => Ok(TypeRef::ptr(subst_type(inner, subst, span)?)),
        TypeRef::SelfType { span: self_span } => Err(ConformanceError::impossible(
            "Self in a function signature",
            self_span.or(span).to_miette(),
        )),
        typ => Ok(typ.clone()),
    }
}
