use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use table_lang_ast::DeclKind;

/// The result type specialized to conformance errors.
pub type ConformanceResult<T = ()> = Result<T, Box<ConformanceError>>;

/// All errors that can be emitted while collecting declarations or resolving
/// conformance queries. Every variant is recoverable at the call site; the
/// resolver itself never panics on malformed input.
///
/// The core is location-agnostic: spans are correlation tokens supplied by
/// the caller and are only carried through into the diagnostic labels.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum ConformanceError {
    #[error("Duplicate declaration of {kind} {name}")]
    #[diagnostic(code("C-001"))]
    DuplicateDeclaration {
        kind: DeclKind,
        name: String,
        #[label]
        span: Option<SourceSpan>,
        #[label("Previously declared here")]
        previous_span: Option<SourceSpan>,
    },
    #[error("Unknown identifier {name}")]
    #[diagnostic(code("C-002"))]
    UnknownIdentifier {
        name: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("The requirements of interface {interface_name} are cyclic")]
    #[diagnostic(
        code("C-003"),
        help("The conformance of {typ} to {interface_name} depends on itself.")
    )]
    CyclicInterfaceRequirement {
        typ: String,
        interface_name: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Conformance of generic parameter {name} cannot be decided before instantiation")]
    #[diagnostic(code("C-004"))]
    UnresolvedGenericParameter {
        name: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Wrong number of type arguments to {name} provided: got {actual}, expected {expected}")]
    #[diagnostic(code("C-005"))]
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
        #[label]
        span: Option<SourceSpan>,
    },
    /// Carries every violated bound of the call site, not just the first,
    /// so that the consuming compiler can report them all at once.
    #[error("Type arguments do not satisfy the declared bounds of {name}")]
    #[diagnostic(code("C-006"))]
    BoundViolations {
        name: String,
        #[related]
        violations: Vec<BoundViolation>,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("Type {typ} cannot be iterated")]
    #[diagnostic(code("C-007"), help("for loop targets must implement Iter."))]
    NotIterable {
        typ: String,
        #[label]
        span: Option<SourceSpan>,
    },
    #[error("An unexpected internal error occurred: {message}")]
    #[diagnostic(code("C-XXX"))]
    /// This error should not occur.
    /// Some internal invariant has been violated.
    Impossible {
        message: String,
        #[label]
        span: Option<SourceSpan>,
    },
}

impl ConformanceError {
    pub fn impossible(message: impl Into<String>, span: Option<SourceSpan>) -> Box<Self> {
        ConformanceError::Impossible { message: message.into(), span }.into()
    }
}

/// A single type argument failing a single bound of a generic parameter.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("{type_arg} does not implement {interface_name}, required by the bound on {param_name}")]
#[diagnostic(code("C-006"))]
pub struct BoundViolation {
    pub param_name: String,
    pub interface_name: String,
    pub type_arg: String,
    #[label]
    pub span: Option<SourceSpan>,
}
