//! # Sigil IR: owned call-expression trees
//!
//! The intermediate representation the construction DSL produces and the
//! instrumentation pass rewrites. Expression nodes live in an append-only
//! arena ([`body::Body`]) and are addressed by niche-optimized typed ids;
//! synthesized declarations (fields, functions) hang off a compilation
//! [`decl::Unit`] that owns the arena.
//!
//! The IR references host symbols by their table ids, so a tree is only
//! meaningful together with the [`SymbolTable`] it was built against.
//!
//! [`SymbolTable`]: sigil_symtab::SymbolTable

pub mod body;
pub mod decl;
pub mod id;
pub mod name;
pub mod node;

pub mod prelude {
    pub use crate::body::{Body, LocalDef, LocalId};
    pub use crate::decl::{Field, FieldId, FunParam, Function, FunctionId, Unit};
    pub use crate::id::Id;
    pub use crate::name::NameSupply;
    pub use crate::node;
    pub use crate::node::Expr;
}
