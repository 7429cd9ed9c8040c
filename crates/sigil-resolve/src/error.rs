use miette::Diagnostic;
use sigil_signature::SignatureError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ResolveError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Signature(#[from] SignatureError),

    #[error("unresolved type `{token}`")]
    #[diagnostic(
        code(sigil::resolve::unresolved_type),
        help("the base path must name a class known to the host table")
    )]
    UnresolvedType { token: String },

    #[error("type `{token}` expects {expected} generic arguments, found {found}")]
    #[diagnostic(code(sigil::resolve::generic_arity))]
    GenericArity {
        token: String,
        expected: usize,
        found: usize,
    },

    #[error("`{signature}` must include a namespace path")]
    #[diagnostic(
        code(sigil::resolve::namespace),
        help("bare names are only accepted for well-known type keywords")
    )]
    MissingNamespace { signature: String },

    #[error("no symbol matches `{signature}`")]
    #[diagnostic(
        code(sigil::resolve::not_found),
        help("check the namespace path, member name and parameter types")
    )]
    NotFound { signature: String },

    #[error("signature `{signature}` is ambiguous: {count} candidates match")]
    #[diagnostic(
        code(sigil::resolve::ambiguous),
        help("spell out more parameter types to disambiguate the overload")
    )]
    Ambiguous { signature: String, count: usize },
}
