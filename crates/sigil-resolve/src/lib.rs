//! # Sigil Resolve: signature-driven symbol lookup
//!
//! Turns parsed signatures into concrete symbols from the host table. Two
//! layers:
//!
//! - [`types::TypeResolver`] maps a single type token (keyword, qualified
//!   path, nested generics, nullable suffix) to a structural [`Ty`].
//! - [`resolver::Resolver`] finds the unique class, function, constructor or
//!   property matching a signature, applying the overload-disambiguation
//!   rules: exact arity, rest-wildcard prefix matching, default-parameter
//!   fallback, extension-receiver filtering and platform-aware type equality.
//!
//! Zero matches is `NotFound` and more than one is `Ambiguous`; there is no
//! arbitrary pick unless the caller explicitly opts into the
//! fewest-erased-parameters tie-break via [`resolver::MatchOptions`].
//!
//! [`Ty`]: sigil_symtab::Ty

pub mod error;
pub mod resolver;
pub mod types;

pub use error::ResolveError;
pub use resolver::{MatchOptions, Resolver};
pub use types::TypeResolver;
