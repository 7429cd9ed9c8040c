//! # Sigil Symtab: the host symbol table
//!
//! A concrete model of the tables a host compiler exposes to its plugins:
//! classes, functions, constructors and properties, addressed by stable ids
//! and queried read-only. The resolver and the expression builder treat this
//! crate as the authoritative oracle: they never create or destroy symbols,
//! only look them up and compare their types.
//!
//! Types are structural values ([`ty::Ty`]) rather than interned handles:
//! equality of two types is decided by walking their shape, which is exactly
//! what signature matching needs (including the platform-type erasure rule).

pub mod builtins;
pub mod def;
pub mod fixture;
pub mod table;
pub mod ty;

pub use builtins::Builtins;
pub use def::{ClassDef, ClassId, CtorDef, CtorId, FunDef, FunId, Param, PropDef, PropId};
pub use table::{FunSpec, GenericArityError, SymbolTable, TableBuilder};
pub use ty::{Ty, TyBase};
