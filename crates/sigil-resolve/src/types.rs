use sigil_signature::TypeToken;
use sigil_symtab::{builtins, SymbolTable, Ty};

use crate::error::ResolveError;

/// Maps type tokens to structural types against a host table.
#[derive(Clone, Copy)]
pub struct TypeResolver<'t> {
    table: &'t SymbolTable,
}

impl<'t> TypeResolver<'t> {
    pub fn new(table: &'t SymbolTable) -> Self {
        Self { table }
    }

    /// Resolves a textual token, e.g. `"Pair<Int,Int>?"`.
    pub fn resolve_str(&self, input: &str) -> Result<Ty, ResolveError> {
        let token = TypeToken::parse(input)?;
        self.resolve_token(&token)
    }

    /// Resolves a parsed token: keyword or qualified base path, recursive
    /// generic arguments (arity-checked), nullability re-applied last.
    pub fn resolve_token(&self, token: &TypeToken) -> Result<Ty, ResolveError> {
        let keyword = token.base.to_lowercase();
        let path = match builtins::keyword_path(&keyword) {
            Some(path) => path,
            None if token.base.contains('/') => token.base.as_str(),
            None => {
                return Err(ResolveError::MissingNamespace {
                    signature: token.to_string(),
                })
            }
        };

        let class = self
            .table
            .class_by_path(path)
            .ok_or_else(|| ResolveError::UnresolvedType {
                token: token.to_string(),
            })?;

        let mut ty = Ty::class(class);
        if !token.args.is_empty() {
            let args = token
                .args
                .iter()
                .map(|arg| self.resolve_token(arg))
                .collect::<Result<Vec<_>, _>>()?;
            ty = self.table.apply_args(ty, args).map_err(|err| {
                ResolveError::GenericArity {
                    token: token.to_string(),
                    expected: err.expected,
                    found: err.found,
                }
            })?;
        }

        if token.nullable {
            ty = ty.as_nullable();
        }
        Ok(ty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_symtab::TableBuilder;

    #[test]
    fn keywords_resolve_case_insensitively() {
        let table = TableBuilder::new().finish();
        let types = TypeResolver::new(&table);

        let int = types.resolve_str("int").unwrap();
        let int_upper = types.resolve_str("Int").unwrap();
        assert_eq!(int, int_upper);
        assert_eq!(int.class_id(), Some(table.builtins().int));
    }

    #[test]
    fn qualified_paths_resolve_directly() {
        let table = TableBuilder::new().finish();
        let types = TypeResolver::new(&table);

        let file = types.resolve_str("java/io/File").unwrap();
        assert_eq!(
            file.class_id(),
            table.class_by_path("java/io/File")
        );
    }

    #[test]
    fn nested_generics_round_trip_through_apply_args() {
        let table = TableBuilder::new().finish();
        let types = TypeResolver::new(&table);
        let b = table.builtins();

        let resolved = types.resolve_str("Pair<Int,Pair<Int,Int>>").unwrap();

        let int = Ty::class(b.int);
        let inner = table
            .apply_args(Ty::class(b.pair), vec![int.clone(), int.clone()])
            .unwrap();
        let manual = table
            .apply_args(Ty::class(b.pair), vec![int, inner])
            .unwrap();

        assert!(resolved.structurally_eq(&manual, false));
        assert_eq!(resolved, manual);
    }

    #[test]
    fn generic_arity_is_checked() {
        let table = TableBuilder::new().finish();
        let types = TypeResolver::new(&table);

        let err = types.resolve_str("Pair<Int>").unwrap_err();
        assert!(matches!(
            err,
            ResolveError::GenericArity {
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn nullability_is_reapplied_after_resolution() {
        let table = TableBuilder::new().finish();
        let types = TypeResolver::new(&table);

        let ty = types.resolve_str("String?").unwrap();
        assert!(ty.nullable);
    }

    #[test]
    fn unknown_bases_fail() {
        let table = TableBuilder::new().finish();
        let types = TypeResolver::new(&table);

        assert!(matches!(
            types.resolve_str("no/such/Type"),
            Err(ResolveError::UnresolvedType { .. })
        ));
        assert!(matches!(
            types.resolve_str("NoKeyword"),
            Err(ResolveError::MissingNamespace { .. })
        ));
    }
}
