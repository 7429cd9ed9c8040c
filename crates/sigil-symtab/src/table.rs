use indexmap::IndexMap;
use thiserror::Error;

use crate::{
    builtins::Builtins,
    def::{ClassDef, ClassId, CtorDef, CtorId, FunDef, FunId, Param, PropDef, PropId},
    ty::Ty,
};

/// Applying generic arguments with the wrong count.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("expected {expected} generic arguments, found {found}")]
pub struct GenericArityError {
    pub expected: usize,
    pub found: usize,
}

/// The read-only symbol table the core queries.
///
/// All ids handed out by a table are only valid for that table. Mutation
/// happens exclusively through [`TableBuilder`]; once built, the table is
/// never written again.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    classes: Vec<ClassDef>,
    functions: Vec<FunDef>,
    constructors: Vec<CtorDef>,
    properties: Vec<PropDef>,
    class_paths: IndexMap<String, ClassId>,
    top_functions: IndexMap<String, Vec<FunId>>,
    top_properties: IndexMap<String, PropId>,
    builtins: Builtins,
}

impl SymbolTable {
    pub fn class(&self, id: ClassId) -> &ClassDef {
        &self.classes[id.as_usize()]
    }

    pub fn function(&self, id: FunId) -> &FunDef {
        &self.functions[id.as_usize()]
    }

    pub fn constructor(&self, id: CtorId) -> &CtorDef {
        &self.constructors[id.as_usize()]
    }

    pub fn property(&self, id: PropId) -> &PropDef {
        &self.properties[id.as_usize()]
    }

    pub fn builtins(&self) -> &Builtins {
        &self.builtins
    }

    pub fn class_by_path(&self, path: &str) -> Option<ClassId> {
        self.class_paths.get(path).copied()
    }

    pub fn classes(&self) -> impl Iterator<Item = (ClassId, &ClassDef)> {
        self.classes
            .iter()
            .enumerate()
            .map(|(i, c)| (ClassId::from_usize(i), c))
    }

    /// All top-level functions registered under the given qualified name.
    pub fn top_level_functions(&self, qualified: &str) -> &[FunId] {
        self.top_functions
            .get(qualified)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn top_level_property(&self, qualified: &str) -> Option<PropId> {
        self.top_properties.get(qualified).copied()
    }

    /// Member functions of `class` with the given simple name.
    pub fn member_functions<'a>(
        &'a self,
        class: ClassId,
        name: &'a str,
    ) -> impl Iterator<Item = FunId> + 'a {
        self.class(class)
            .functions
            .iter()
            .copied()
            .filter(move |id| self.function(*id).name == name)
    }

    pub fn class_constructors(&self, class: ClassId) -> &[CtorId] {
        &self.class(class).constructors
    }

    /// Case-insensitive property lookup within a class.
    pub fn member_property(&self, class: ClassId, name: &str) -> Option<PropId> {
        self.class(class)
            .properties
            .iter()
            .copied()
            .find(|id| self.property(*id).name.eq_ignore_ascii_case(name))
    }

    /// Applies generic arguments to a base type, checking declared arity.
    pub fn apply_args(&self, base: Ty, args: Vec<Ty>) -> Result<Ty, GenericArityError> {
        let expected = match base.class_id() {
            Some(id) => self.class(id).type_params.len(),
            None => 0,
        };
        if expected != args.len() {
            return Err(GenericArityError {
                expected,
                found: args.len(),
            });
        }
        let mut ty = base;
        ty.args = args;
        Ok(ty)
    }
}

/// Declarative description of a function, fed to [`TableBuilder`].
#[derive(Debug, Clone)]
pub struct FunSpec {
    name: String,
    params: Vec<Param>,
    ret: Ty,
    is_static: bool,
    extension: Option<Ty>,
}

impl FunSpec {
    pub fn new(name: impl Into<String>, ret: Ty) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            ret,
            is_static: false,
            extension: None,
        }
    }

    pub fn param(mut self, name: impl Into<String>, ty: Ty) -> Self {
        self.params.push(Param::new(name, ty));
        self
    }

    pub fn defaulted(mut self, name: impl Into<String>, ty: Ty) -> Self {
        self.params.push(Param::defaulted(name, ty));
        self
    }

    pub fn static_scope(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn extension(mut self, receiver: Ty) -> Self {
        self.extension = Some(receiver);
        self
    }
}

/// Single-writer construction of a [`SymbolTable`].
///
/// A fresh builder starts with the builtin classes installed so that type
/// tokens like `int` or `list` always resolve.
pub struct TableBuilder {
    table: SymbolTable,
}

impl TableBuilder {
    pub fn new() -> Self {
        let mut builder = Self {
            table: SymbolTable {
                classes: Vec::new(),
                functions: Vec::new(),
                constructors: Vec::new(),
                properties: Vec::new(),
                class_paths: IndexMap::new(),
                top_functions: IndexMap::new(),
                top_properties: IndexMap::new(),
                builtins: Builtins::placeholder(),
            },
        };
        builder.table.builtins = Builtins::install(&mut builder);
        builder
    }

    pub fn builtins(&self) -> &Builtins {
        &self.table.builtins
    }

    /// Peek at the table built so far. Loaders use this to resolve member
    /// types against classes declared in an earlier pass.
    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Registers a class under its full path, linking it into its enclosing
    /// class when the path names a nested type.
    pub fn add_class(&mut self, path: &str, type_params: &[&str]) -> ClassId {
        self.insert_class(path, type_params, false)
    }

    /// Registers a singleton object.
    pub fn add_object(&mut self, path: &str) -> ClassId {
        self.insert_class(path, &[], true)
    }

    fn insert_class(&mut self, path: &str, type_params: &[&str], is_object: bool) -> ClassId {
        if let Some(existing) = self.table.class_paths.get(path) {
            return *existing;
        }

        let name = simple_name(path);
        let id = ClassId::from_usize(self.table.classes.len());
        self.table.classes.push(ClassDef {
            name: name.to_owned(),
            path: path.to_owned(),
            type_params: type_params.iter().map(|s| (*s).to_owned()).collect(),
            is_object,
            fallback: None,
            functions: Vec::new(),
            properties: Vec::new(),
            constructors: Vec::new(),
            nested: Vec::new(),
        });
        self.table.class_paths.insert(path.to_owned(), id);

        if let Some(parent_path) = enclosing_path(path) {
            if let Some(parent) = self.table.class_paths.get(parent_path).copied() {
                self.table.classes[parent.as_usize()].nested.push(id);
            }
        }

        id
    }

    /// Marks `fallback` as the designated fallback scope of `class`.
    pub fn set_fallback(&mut self, class: ClassId, fallback: ClassId) {
        self.table.classes[class.as_usize()].fallback = Some(fallback);
    }

    pub fn add_member(&mut self, owner: ClassId, spec: FunSpec) -> FunId {
        let id = FunId::from_usize(self.table.functions.len());
        self.table.functions.push(FunDef {
            name: spec.name,
            owner: Some(owner),
            qualified: None,
            params: spec.params,
            ret: spec.ret,
            is_static: spec.is_static,
            extension: spec.extension,
        });
        self.table.classes[owner.as_usize()].functions.push(id);
        id
    }

    pub fn add_top_level(&mut self, namespace: &str, spec: FunSpec) -> FunId {
        let qualified = format!("{namespace}/{}", spec.name);
        let id = FunId::from_usize(self.table.functions.len());
        self.table.functions.push(FunDef {
            name: spec.name,
            owner: None,
            qualified: Some(qualified.clone()),
            params: spec.params,
            ret: spec.ret,
            is_static: spec.is_static,
            extension: spec.extension,
        });
        self.table.top_functions.entry(qualified).or_default().push(id);
        id
    }

    pub fn add_ctor(&mut self, owner: ClassId, params: Vec<Param>) -> CtorId {
        let id = CtorId::from_usize(self.table.constructors.len());
        self.table.constructors.push(CtorDef { owner, params });
        self.table.classes[owner.as_usize()].constructors.push(id);
        id
    }

    pub fn add_member_prop(&mut self, owner: ClassId, name: &str, ty: Ty) -> PropId {
        let id = PropId::from_usize(self.table.properties.len());
        self.table.properties.push(PropDef {
            name: name.to_owned(),
            owner: Some(owner),
            qualified: None,
            ty,
        });
        self.table.classes[owner.as_usize()].properties.push(id);
        id
    }

    pub fn add_top_prop(&mut self, namespace: &str, name: &str, ty: Ty) -> PropId {
        let qualified = format!("{namespace}/{name}");
        let id = PropId::from_usize(self.table.properties.len());
        self.table.properties.push(PropDef {
            name: name.to_owned(),
            owner: None,
            qualified: Some(qualified.clone()),
            ty,
        });
        self.table.top_properties.insert(qualified, id);
        id
    }

    pub fn finish(self) -> SymbolTable {
        self.table
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Last segment of a class path, e.g. `Inner` for `pkg/Outer.Inner`.
fn simple_name(path: &str) -> &str {
    let tail = path.rsplit('/').next().unwrap_or(path);
    tail.rsplit('.').next().unwrap_or(tail)
}

/// Path of the enclosing class, if the path names a nested type.
fn enclosing_path(path: &str) -> Option<&str> {
    let tail = path.rsplit('/').next().unwrap_or(path);
    if tail.contains('.') {
        path.rfind('.').map(|i| &path[..i])
    } else {
        None
    }
}
