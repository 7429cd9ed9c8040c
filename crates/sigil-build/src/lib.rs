//! # Sigil Build: the call-construction DSL
//!
//! A thin, strict layer over [`sigil_ir`]: callers hand in a callable (by id
//! or by signature string) and a list of [`arg::Arg`] values, and get back
//! the id of a well-formed call node. The builder enforces what the host
//! table declares:
//!
//! - argument count equals the callable's non-defaulted parameter count,
//! - the receiver lands in the dispatch slot, the extension slot, or both,
//!   exactly as declared; anything else is a [`error::BuildError`] up front,
//! - singleton-object members receive their object instance implicitly.
//!
//! A built call is itself an [`Arg`], so calls chain:
//! `a.call(f).call(g)` produces `g(f(a))`.
//!
//! [`Arg`]: arg::Arg

pub mod arg;
pub mod builder;
pub mod error;

pub use arg::Arg;
pub use builder::Builder;
pub use error::BuildError;
