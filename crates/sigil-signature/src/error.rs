use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum SignatureError {
    #[error("malformed signature `{signature}`: {reason}")]
    #[diagnostic(
        code(sigil::signature),
        help("expected `[namespace/][Owner.Path.]member(param, ...)`")
    )]
    Malformed { signature: String, reason: String },

    #[error("malformed signature `{signature}`: `*` must be the single final parameter")]
    #[diagnostic(
        code(sigil::signature::wildcard),
        help("the rest wildcard accepts all remaining parameters; nothing may follow it")
    )]
    MisplacedWildcard { signature: String },

    #[error("malformed signature `{signature}`: empty or invalid path segment")]
    #[diagnostic(
        code(sigil::signature::segment),
        help("path segments are identifiers separated by `/` (namespace) and `.` (nested types)")
    )]
    BadSegment { signature: String },
}

impl SignatureError {
    /// Bridges a chumsky parse error into the signature taxonomy.
    pub(crate) fn from_rich<T: std::fmt::Display>(
        signature: &str,
        error: chumsky::error::Rich<'_, T>,
    ) -> Self {
        let offset = error.span().into_range().start;
        Self::Malformed {
            signature: signature.to_owned(),
            reason: format!("{error} (at offset {offset})"),
        }
    }
}
