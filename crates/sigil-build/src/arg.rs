use derive_more::From;
use sigil_ir::prelude::{Expr, FieldId, FunctionId, Id, LocalId};
use sigil_symtab::{ClassId, PropId};

/// The closed set of argument kinds a call site can supply.
///
/// Everything the builder accepts is enumerated here; there is no dynamic
/// fallthrough, so an unsupported value is a compile error at the call site
/// rather than a runtime surprise.
#[derive(Debug, Clone, From)]
pub enum Arg {
    Int(i32),
    Long(i64),
    Double(f64),
    Bool(bool),
    Str(String),
    #[from(ignore)]
    Null,
    /// An already-built expression, e.g. the result of a previous call.
    Expr(Id<Expr>),
    /// Read of a body-scoped local.
    Local(LocalId),
    /// Read of a synthetic function's parameter.
    #[from(ignore)]
    Param { function: FunctionId, index: usize },
    /// Read of a synthesized unit field.
    Field(FieldId),
    /// Property read; member properties must belong to a singleton object.
    Prop(PropId),
    /// Singleton-object instance.
    Class(ClassId),
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}
