use derive_more::From;
use sigil_symtab::{ClassId, CtorId, FunId, PropId};
use sigil_utils::impl_try_as;

use crate::{
    body::LocalId,
    decl::{FieldId, FunctionId},
    id::Id,
};

/// Constant values the host runtime can materialize directly.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i32),
    Long(i64),
    Double(f64),
    Bool(bool),
    Str(String),
    Unit,
    Null,
}

/// Read of a local declared in the enclosing body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetLocal {
    pub local: LocalId,
}

/// Read of a parameter of a synthetic function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetParam {
    pub function: FunctionId,
    pub index: usize,
}

/// Read of a synthetic unit field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetField {
    pub field: FieldId,
}

/// Property read, dispatched on a receiver for member properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetProp {
    pub receiver: Option<Id<Expr>>,
    pub prop: PropId,
}

/// Access to the unique instance of a singleton object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetObject {
    pub class: ClassId,
}

/// A call with its receivers slotted the way the callee declares them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub callee: FunId,
    pub dispatch: Option<Id<Expr>>,
    pub extension: Option<Id<Expr>>,
    pub args: Vec<Id<Expr>>,
}

/// Constructor invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct New {
    pub ctor: CtorId,
    pub args: Vec<Id<Expr>>,
}

/// Binds the initializer value to a body-scoped local.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Let {
    pub local: LocalId,
    pub init: Id<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Return {
    pub value: Option<Id<Expr>>,
}

/// `try { body } finally { finally }`; the finally arm runs on every exit
/// path of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryFinally {
    pub body: Id<Expr>,
    pub finally: Id<Expr>,
}

/// Statement sequence evaluating to its last statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub stmts: Vec<Id<Expr>>,
}

#[derive(Debug, From, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    GetLocal(GetLocal),
    GetParam(GetParam),
    GetField(GetField),
    GetProp(GetProp),
    GetObject(GetObject),
    Call(Call),
    New(New),
    Let(Let),
    Return(Return),
    TryFinally(TryFinally),
    Block(Block),
}

impl<T> Id<T>
where
    Expr: sigil_utils::convert::TryAsRef<T>,
{
    /// Erases the node kind, yielding a plain expression id.
    pub fn erase(self) -> Id<Expr> {
        Id::new(self.as_u32())
    }
}

impl_try_as!(
    Expr,
    Literal(Literal),
    GetLocal(GetLocal),
    GetParam(GetParam),
    GetField(GetField),
    GetProp(GetProp),
    GetObject(GetObject),
    Call(Call),
    New(New),
    Let(Let),
    Return(Return),
    TryFinally(TryFinally),
    Block(Block),
);
