//! # Sigil Probe: enter/exit instrumentation
//!
//! Wraps every function body of a unit as
//!
//! ```text
//! enter-probe(name)
//! try { <original body> } finally { exit-probe(name, clock()) }
//! ```
//!
//! so the exit probe fires on every path out of the function. The probe
//! callables are configured as signature strings and resolved through the
//! construction DSL; this crate contains no resolution logic of its own.
//! The first failure aborts instrumentation for the whole unit.

pub mod config;
pub mod instrument;

pub use config::ProbeConfig;
pub use instrument::Instrumenter;
