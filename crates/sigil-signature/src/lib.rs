//! # Sigil Signature: the textual reference grammar
//!
//! Parses human-readable signature strings into structured queries:
//!
//! ```text
//! [namespace/][Owner.Path.]member(param1, param2, ...)
//! ```
//!
//! Parameter tokens are type tokens per the resolver's rules, `G` marks a
//! generic placeholder ("the position must exist, the type is unconstrained")
//! and `*` is the rest wildcard ("accept any remaining parameters"), valid
//! only in the final position. Dot-splitting of the owner path only applies
//! when a `/` namespace separator is present; a bare name stays a simple
//! member name.

pub mod error;
pub mod sig;

mod parse;

pub use error::SignatureError;
pub use sig::{ParamSpec, Signature, TypeToken};
