use sigil_build::{Arg, BuildError, Builder};
use sigil_ir::prelude::{Expr, FieldId, Id, Unit};
use sigil_resolve::{MatchOptions, ResolveError, Resolver, TypeResolver};
use sigil_symtab::{ClassId, CtorId, FunId, PropId, SymbolTable, Ty};

/// One-stop entry point over a borrowed symbol table.
///
/// Bundles the resolver and the construction DSL under a single set of
/// [`MatchOptions`], so a plugin configures nullability handling and the
/// ambiguity tie-break once and uses plain strings everywhere else.
#[derive(Clone, Copy)]
pub struct Sigil<'t> {
    table: &'t SymbolTable,
    opts: MatchOptions,
}

impl<'t> Sigil<'t> {
    pub fn new(table: &'t SymbolTable) -> Self {
        Self {
            table,
            opts: MatchOptions::default(),
        }
    }

    pub fn with_options(mut self, opts: MatchOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn table(&self) -> &'t SymbolTable {
        self.table
    }

    pub fn options(&self) -> MatchOptions {
        self.opts
    }

    fn resolver(&self) -> Resolver<'t> {
        Resolver::new(self.table)
    }

    pub fn resolve_class(&self, signature: &str) -> Result<ClassId, ResolveError> {
        self.resolver().resolve_class(signature)
    }

    pub fn resolve_class_opt(&self, signature: &str) -> Result<Option<ClassId>, ResolveError> {
        self.resolver().resolve_class_opt(signature)
    }

    pub fn resolve_function(
        &self,
        signature: &str,
        extension: Option<&Ty>,
    ) -> Result<FunId, ResolveError> {
        self.resolver().resolve_function(signature, extension, self.opts)
    }

    pub fn resolve_function_opt(
        &self,
        signature: &str,
        extension: Option<&Ty>,
    ) -> Result<Option<FunId>, ResolveError> {
        self.resolver().resolve_function_opt(signature, extension, self.opts)
    }

    pub fn resolve_constructor(&self, signature: &str) -> Result<CtorId, ResolveError> {
        self.resolver().resolve_constructor(signature, self.opts)
    }

    pub fn resolve_constructor_opt(
        &self,
        signature: &str,
    ) -> Result<Option<CtorId>, ResolveError> {
        self.resolver().resolve_constructor_opt(signature, self.opts)
    }

    pub fn resolve_property(&self, signature: &str) -> Result<PropId, ResolveError> {
        self.resolver().resolve_property(signature)
    }

    pub fn resolve_property_opt(&self, signature: &str) -> Result<Option<PropId>, ResolveError> {
        self.resolver().resolve_property_opt(signature)
    }

    /// Resolves a type token such as `"Pair<Int,String?>"`.
    pub fn resolve_type(&self, token: &str) -> Result<Ty, ResolveError> {
        TypeResolver::new(self.table).resolve_str(token)
    }

    /// A construction DSL builder over `unit`, carrying this facade's
    /// options.
    pub fn builder<'u>(&self, unit: &'u mut Unit) -> Builder<'u, 't> {
        Builder::new(self.table, unit).with_options(self.opts)
    }

    /// Resolves the callable named by `signature` and builds the call.
    pub fn build_call(
        &self,
        unit: &mut Unit,
        signature: &str,
        args: Vec<Arg>,
    ) -> Result<Id<Expr>, BuildError> {
        self.builder(unit).call_str(signature, args)
    }

    /// Synthesizes a unit field with its type inferred from the initializer.
    pub fn create_field(
        &self,
        unit: &mut Unit,
        name: &str,
        init: impl FnOnce(&mut Builder<'_, 't>) -> Result<Id<Expr>, BuildError>,
    ) -> Result<FieldId, BuildError> {
        self.builder(unit).create_field(name, init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_symtab::fixture;

    #[test]
    fn the_facade_carries_its_options_into_resolution() {
        let table = fixture::table();

        let strict = Sigil::new(&table);
        assert!(matches!(
            strict.resolve_function("demo/put(String,*)", None),
            Err(ResolveError::Ambiguous { .. })
        ));

        let lenient = Sigil::new(&table).with_options(MatchOptions {
            prefer_fewest_erased: true,
            ..Default::default()
        });
        assert!(lenient.resolve_function("demo/put(String,*)", None).is_ok());
    }

    #[test]
    fn build_call_goes_from_string_to_node() {
        let table = fixture::table();
        let sigil = Sigil::new(&table);
        let mut unit = Unit::new("demo");

        let id = sigil
            .build_call(&mut unit, "demo/banner(String)", vec!["hi".into()])
            .unwrap();
        assert!(matches!(unit.body().expr(id), Expr::Call(_)));
    }
}
