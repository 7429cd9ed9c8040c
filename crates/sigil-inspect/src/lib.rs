//! # Sigil Inspect: IR visualization
//!
//! Presentation layer over [`sigil_ir`]: [`dump::dump`] renders a unit as a
//! JSON tree with every symbol id replaced by its resolved name, and
//! [`server::Server`] serves that tree over HTTP while parking the calling
//! thread until a client requests `/continue`.

pub mod dump;
pub mod server;

pub use dump::{dump, render_ty};
pub use server::{InspectError, Server};
