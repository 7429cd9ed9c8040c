use sigil_symtab::{SymbolTable, Ty};
use sigil_utils::define_id;

use crate::{
    body::Body,
    id::Id,
    node::{Expr, Literal},
};

define_id!(FieldId);
define_id!(FunctionId);

/// A synthesized unit field: name, type and initializer expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: Ty,
    pub init: Id<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunParam {
    pub name: String,
    pub ty: Ty,
}

/// A synthesized function owned by a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub params: Vec<FunParam>,
    pub ret: Ty,
    pub body: Id<Expr>,
}

/// A compilation unit: one shared expression arena plus the declarations
/// synthesized into it.
///
/// Declarations are appended once; only a function's body root may be
/// re-pointed, which is how an instrumentation pass wraps existing bodies
/// without rewriting their nodes.
#[derive(Debug, Clone)]
pub struct Unit {
    pub name: String,
    body: Body,
    fields: Vec<Field>,
    functions: Vec<Function>,
}

impl Unit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: Body::new(),
            fields: Vec::new(),
            functions: Vec::new(),
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn add_field(&mut self, field: Field) -> FieldId {
        let id = FieldId::from_usize(self.fields.len());
        self.fields.push(field);
        id
    }

    pub fn add_function(&mut self, function: Function) -> FunctionId {
        let id = FunctionId::from_usize(self.functions.len());
        self.functions.push(function);
        id
    }

    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.as_usize()]
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions[id.as_usize()]
    }

    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &Field)> {
        self.fields
            .iter()
            .enumerate()
            .map(|(i, f)| (FieldId::from_usize(i), f))
    }

    pub fn functions(&self) -> impl Iterator<Item = (FunctionId, &Function)> {
        self.functions
            .iter()
            .enumerate()
            .map(|(i, f)| (FunctionId::from_usize(i), f))
    }

    pub fn function_ids(&self) -> Vec<FunctionId> {
        (0..self.functions.len()).map(FunctionId::from_usize).collect()
    }

    /// Re-points a function's body root, e.g. at a wrapper around the old
    /// body. The previous root stays valid in the arena.
    pub fn set_function_body(&mut self, id: FunctionId, body: Id<Expr>) {
        self.functions[id.as_usize()].body = body;
    }

    /// The result type of an expression, read off the node and the table.
    pub fn ty_of(&self, table: &SymbolTable, id: Id<Expr>) -> Ty {
        let b = table.builtins();
        match self.body.expr(id) {
            Expr::Literal(lit) => match lit {
                Literal::Int(_) => Ty::class(b.int),
                Literal::Long(_) => Ty::class(b.long),
                Literal::Double(_) => Ty::class(b.double),
                Literal::Bool(_) => Ty::class(b.boolean),
                Literal::Str(_) => Ty::class(b.string),
                Literal::Unit => Ty::class(b.unit),
                Literal::Null => Ty::class(b.nothing).as_nullable(),
            },
            Expr::GetLocal(get) => self.body.local(get.local).ty.clone(),
            Expr::GetParam(get) => self.function(get.function).params[get.index].ty.clone(),
            Expr::GetField(get) => self.field(get.field).ty.clone(),
            Expr::GetProp(get) => table.property(get.prop).ty.clone(),
            Expr::GetObject(get) => Ty::class(get.class),
            Expr::Call(call) => table.function(call.callee).ret.clone(),
            Expr::New(new) => Ty::class(table.constructor(new.ctor).owner),
            Expr::Let(_) | Expr::Return(_) => Ty::class(b.unit),
            Expr::TryFinally(tf) => self.ty_of(table, tf.body),
            Expr::Block(block) => match block.stmts.last() {
                Some(&last) => self.ty_of(table, last),
                None => Ty::class(b.unit),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Call, GetObject, TryFinally};
    use sigil_symtab::fixture;

    #[test]
    fn literal_types_come_from_the_builtins() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");

        let s = unit.body_mut().add(Literal::Str("hi".into()));
        assert_eq!(
            unit.ty_of(&table, s.erase()).class_id(),
            Some(table.builtins().string)
        );

        let n = unit.body_mut().add(Literal::Null);
        let null_ty = unit.ty_of(&table, n.erase());
        assert!(null_ty.nullable);
        assert_eq!(null_ty.class_id(), Some(table.builtins().nothing));
    }

    #[test]
    fn call_results_use_the_declared_return_type() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");

        let trace = table.class_by_path("trace/Clock").unwrap();
        let now = table
            .member_functions(trace, "now")
            .next()
            .unwrap();

        let obj = unit.body_mut().add(GetObject { class: trace });
        let call = unit.body_mut().add(Call {
            callee: now,
            dispatch: Some(obj.erase()),
            extension: None,
            args: Vec::new(),
        });

        assert_eq!(
            unit.ty_of(&table, call.erase()).class_id(),
            Some(table.builtins().long)
        );
    }

    #[test]
    fn try_finally_takes_the_body_type() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");

        let body = unit.body_mut().add(Literal::Int(1)).erase();
        let fin = unit.body_mut().add(Literal::Unit).erase();
        let tf = unit.body_mut().add(TryFinally { body, finally: fin });

        assert_eq!(
            unit.ty_of(&table, tf.erase()).class_id(),
            Some(table.builtins().int)
        );
    }
}
