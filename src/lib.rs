//! # Sigil: signature-driven symbol resolution and call construction
//!
//! A toolkit for compiler plugins that need to talk about host symbols
//! without depending on how the host spells them internally: symbols are
//! addressed by compact signature strings (`"pkg/Owner.member(Int,String?)"`),
//! resolved against a read-only [`SymbolTable`], and turned into well-typed
//! IR call expressions by a strict construction DSL.
//!
//! The pieces, bottom up:
//!
//! - [`sigil_signature`] parses signature strings.
//! - [`sigil_symtab`] models the host's symbol table.
//! - [`sigil_resolve`] finds the unique matching symbol, with overload
//!   disambiguation, wildcard and default-parameter tolerance, and
//!   platform-aware nullability.
//! - [`sigil_ir`] + [`sigil_build`] own and construct the expression trees.
//! - [`sigil_probe`] instruments function bodies with enter/exit probes.
//! - [`sigil_inspect`] dumps trees as JSON and serves them for inspection.
//!
//! [`facade::Sigil`] bundles the resolution and construction entry points
//! behind one borrow of the table; [`loader`] reads table descriptions from
//! JSON so external tools can bring their own.
//!
//! [`SymbolTable`]: sigil_symtab::SymbolTable

pub mod facade;
pub mod loader;

pub use facade::Sigil;

pub use sigil_build::{Arg, BuildError, Builder};
pub use sigil_inspect::{dump, Server};
pub use sigil_ir::prelude::{Body, Expr, Id, NameSupply, Unit};
pub use sigil_probe::{Instrumenter, ProbeConfig};
pub use sigil_resolve::{MatchOptions, ResolveError, Resolver, TypeResolver};
pub use sigil_signature::{Signature, SignatureError};
pub use sigil_symtab::{SymbolTable, TableBuilder, Ty};
