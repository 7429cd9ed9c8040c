use miette::Diagnostic;
use sigil_resolve::ResolveError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum BuildError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),

    #[error("`{callable}` takes {expected} arguments, {found} supplied")]
    #[diagnostic(
        code(sigil::build::arity),
        help("supply exactly the non-defaulted parameters, in declaration order")
    )]
    ArityMismatch {
        callable: String,
        expected: usize,
        found: usize,
    },

    #[error("receiver mismatch for `{callable}`: {detail}")]
    #[diagnostic(code(sigil::build::receiver))]
    ReceiverMismatch { callable: String, detail: String },

    #[error("unsupported argument: {detail}")]
    #[diagnostic(code(sigil::build::argument))]
    InvalidArg { detail: String },
}
