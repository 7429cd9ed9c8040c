use serde::{Deserialize, Serialize};

use crate::def::ClassId;

/// The base of a structural type: either a concrete class or a reference to
/// a type parameter declared by the surrounding callable/class.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TyBase {
    Class(ClassId),
    Param(String),
}

/// A structural type value.
///
/// `platform` marks a type whose nullability is unknown because it crossed
/// over from a foreign type system; such types compare nullability-insensitive
/// (only the erased upper bound is checked).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ty {
    pub base: TyBase,
    pub args: Vec<Ty>,
    pub nullable: bool,
    pub platform: bool,
}

impl Ty {
    pub fn class(id: ClassId) -> Self {
        Self {
            base: TyBase::Class(id),
            args: Vec::new(),
            nullable: false,
            platform: false,
        }
    }

    pub fn param(name: impl Into<String>) -> Self {
        Self {
            base: TyBase::Param(name.into()),
            args: Vec::new(),
            nullable: false,
            platform: false,
        }
    }

    pub fn as_nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn as_non_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn as_platform(mut self) -> Self {
        self.platform = true;
        self
    }

    /// True if the base is a type-parameter reference.
    pub fn is_param(&self) -> bool {
        matches!(self.base, TyBase::Param(_))
    }

    pub fn class_id(&self) -> Option<ClassId> {
        match self.base {
            TyBase::Class(id) => Some(id),
            TyBase::Param(_) => None,
        }
    }

    /// Structural equality with the platform rule applied.
    ///
    /// Two types are equal when their bases and argument lists are equal.
    /// Nullability takes part in the comparison only when `ignore_nullability`
    /// is unset and neither side is a platform type.
    pub fn structurally_eq(&self, other: &Ty, ignore_nullability: bool) -> bool {
        if self.base != other.base || self.args.len() != other.args.len() {
            return false;
        }
        if !self
            .args
            .iter()
            .zip(&other.args)
            .all(|(a, b)| a.structurally_eq(b, ignore_nullability))
        {
            return false;
        }
        if ignore_nullability || self.platform || other.platform {
            true
        } else {
            self.nullable == other.nullable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(id: u32) -> Ty {
        Ty::class(ClassId::from_usize(id as usize))
    }

    #[test]
    fn nullability_is_significant_by_default() {
        let a = class(1);
        let b = class(1).as_nullable();

        assert!(!a.structurally_eq(&b, false));
        assert!(a.structurally_eq(&b, true));
    }

    #[test]
    fn platform_types_erase_nullability() {
        let a = class(1).as_platform();
        let b = class(1).as_nullable();

        assert!(a.structurally_eq(&b, false));
        assert!(b.structurally_eq(&a, false));
    }

    #[test]
    fn argument_shape_is_compared_recursively() {
        let mut pair = class(7);
        pair.args = vec![class(1), class(2)];

        let mut other = class(7);
        other.args = vec![class(1), class(3)];

        assert!(!pair.structurally_eq(&other, true));

        other.args[1] = class(2);
        assert!(pair.structurally_eq(&other, true));
    }
}
