use serde::{Deserialize, Serialize};
use sigil_utils::define_id;

use crate::ty::Ty;

define_id!(ClassId);
define_id!(FunId);
define_id!(CtorId);
define_id!(PropId);

/// A declared parameter of a function or constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: Ty,
    pub has_default: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: Ty) -> Self {
        Self {
            name: name.into(),
            ty,
            has_default: false,
        }
    }

    pub fn defaulted(name: impl Into<String>, ty: Ty) -> Self {
        Self {
            name: name.into(),
            ty,
            has_default: true,
        }
    }
}

/// A class (or singleton object) known to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDef {
    /// Simple name, the last segment of `path`.
    pub name: String,
    /// Full path, e.g. `pkg/Outer.Inner`.
    pub path: String,
    pub type_params: Vec<String>,
    /// Singleton object: referencing the class yields its unique instance.
    pub is_object: bool,
    /// Designated fallback scope searched when a member lookup on the class
    /// itself finds nothing (companion/static scope).
    pub fallback: Option<ClassId>,
    pub functions: Vec<FunId>,
    pub properties: Vec<PropId>,
    pub constructors: Vec<CtorId>,
    pub nested: Vec<ClassId>,
}

/// A function, either a member of a class or top-level under a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunDef {
    pub name: String,
    pub owner: Option<ClassId>,
    /// Qualified name for top-level functions, e.g. `pkg/greet`.
    pub qualified: Option<String>,
    pub params: Vec<Param>,
    pub ret: Ty,
    pub is_static: bool,
    /// Extension-receiver type, if the function is declared as an extension.
    pub extension: Option<Ty>,
}

impl FunDef {
    /// Member functions that are not static take an implicit `self`.
    pub fn has_dispatch_receiver(&self) -> bool {
        self.owner.is_some() && !self.is_static
    }

    pub fn has_extension_receiver(&self) -> bool {
        self.extension.is_some()
    }

    /// Number of parameters a caller must supply positionally.
    pub fn required_arity(&self) -> usize {
        self.params.iter().filter(|p| !p.has_default).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtorDef {
    pub owner: ClassId,
    pub params: Vec<Param>,
}

impl CtorDef {
    pub fn required_arity(&self) -> usize {
        self.params.iter().filter(|p| !p.has_default).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropDef {
    pub name: String,
    pub owner: Option<ClassId>,
    pub qualified: Option<String>,
    pub ty: Ty,
}
