use sigil_symtab::Ty;
use sigil_utils::{convert::TryAsRef, define_id};

use crate::{
    id::Id,
    node::{Expr, Literal},
};

define_id!(LocalId);

/// A local introduced by a [`Let`](crate::node::Let) binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalDef {
    pub name: String,
    pub ty: Ty,
}

/// Append-only arena of expression nodes plus the locals they bind.
///
/// Nodes are addressed by [`Id`]; once added they are never mutated, so an id
/// always denotes the same node. Slot 0 is reserved so that `Option<Id<T>>`
/// stays four bytes.
#[derive(Debug, Clone)]
pub struct Body {
    exprs: Vec<Expr>,
    locals: Vec<LocalDef>,
}

impl Body {
    pub fn new() -> Self {
        // Reserve slot 0 with a dummy node.
        Self {
            exprs: vec![Expr::Literal(Literal::Unit)],
            locals: Vec::new(),
        }
    }

    pub fn add<T>(&mut self, node: T) -> Id<T>
    where
        T: Into<Expr>,
    {
        let id = self.exprs.len() as u32;
        self.exprs.push(node.into());
        Id::new(id)
    }

    pub fn expr(&self, id: Id<Expr>) -> &Expr {
        &self.exprs[id.as_usize()]
    }

    /// Borrows the node a typed id points at.
    pub fn node<T>(&self, id: Id<T>) -> &T
    where
        Expr: TryAsRef<T>,
    {
        self.exprs[id.as_usize()]
            .try_as_ref()
            .expect("node kind matches its typed id")
    }

    pub fn add_local(&mut self, name: impl Into<String>, ty: Ty) -> LocalId {
        let id = LocalId::from_usize(self.locals.len());
        self.locals.push(LocalDef {
            name: name.into(),
            ty,
        });
        id
    }

    pub fn local(&self, id: LocalId) -> &LocalDef {
        &self.locals[id.as_usize()]
    }

    pub fn locals(&self) -> impl Iterator<Item = (LocalId, &LocalDef)> {
        self.locals
            .iter()
            .enumerate()
            .map(|(i, l)| (LocalId::from_usize(i), l))
    }

    pub fn len(&self) -> usize {
        self.exprs.len()
    }

    pub fn is_empty(&self) -> bool {
        // Slot 0 is always occupied.
        self.exprs.len() <= 1
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Block, GetLocal};

    #[test]
    fn ids_address_their_nodes() {
        let mut body = Body::new();
        let lit = body.add(Literal::Int(7));
        let block = body.add(Block {
            stmts: vec![lit.erase()],
        });

        assert_eq!(body.node(lit), &Literal::Int(7));
        assert_eq!(body.node(block).stmts.len(), 1);
        assert!(matches!(body.expr(lit.erase()), Expr::Literal(_)));
    }

    #[test]
    fn locals_are_registered_in_order() {
        let mut body = Body::new();
        let a = body.add_local("a", Ty::param("T"));
        let b = body.add_local("b", Ty::param("U"));

        assert_ne!(a, b);
        assert_eq!(body.local(a).name, "a");
        let _ = body.add(GetLocal { local: b });
    }
}
