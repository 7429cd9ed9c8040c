use log::trace;
use sigil_signature::{ParamSpec, Signature, SignatureError};
use sigil_symtab::{builtins, ClassId, CtorId, FunId, Param, PropId, SymbolTable, Ty};

use crate::{error::ResolveError, types::TypeResolver};

/// Knobs of the matching engine.
///
/// `prefer_fewest_erased` opts into the tie-break that picks the surviving
/// candidate with the fewest untyped (`Any`-erased or type-parameter-bound)
/// parameters instead of rejecting the lookup as ambiguous. It still fails
/// when no unique minimum exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    pub ignore_nullability: bool,
    pub prefer_fewest_erased: bool,
}

/// A resolved parameter position of a query.
enum ParamQuery {
    /// Must structurally equal the declared parameter type.
    Exact(Ty),
    /// `G`: accepted only where the declared parameter is itself
    /// type-parameter-bound.
    Unconstrained,
}

/// Signature-driven lookup over a host table.
pub struct Resolver<'t> {
    table: &'t SymbolTable,
    types: TypeResolver<'t>,
}

impl<'t> Resolver<'t> {
    pub fn new(table: &'t SymbolTable) -> Self {
        Self {
            table,
            types: TypeResolver::new(table),
        }
    }

    pub fn table(&self) -> &'t SymbolTable {
        self.table
    }

    pub fn types(&self) -> TypeResolver<'t> {
        self.types
    }

    /// Resolves a class reference, e.g. `"pkg/Outer.Inner"` or a bare
    /// well-known keyword like `"stringbuilder"`.
    pub fn resolve_class(&self, signature: &str) -> Result<ClassId, ResolveError> {
        let sig = Signature::parse(signature)?;
        if sig.params.is_some() {
            return Err(SignatureError::Malformed {
                signature: signature.to_owned(),
                reason: "class references take no parameter list".to_owned(),
            }
            .into());
        }
        self.class_of(&sig, signature)
    }

    pub fn resolve_class_opt(&self, signature: &str) -> Result<Option<ClassId>, ResolveError> {
        ok_or_none(self.resolve_class(signature))
    }

    /// Resolves a function: a member when the signature names an owner type
    /// (searching the owner's designated fallback scope when the direct
    /// lookup fails), otherwise a top-level function under the namespace.
    pub fn resolve_function(
        &self,
        signature: &str,
        extension: Option<&Ty>,
        opts: MatchOptions,
    ) -> Result<FunId, ResolveError> {
        let sig = Signature::parse(signature)?;
        let (queries, rest) = self.queries(&sig, signature)?;
        let table = self.table;
        let params_of = move |id: FunId| table.function(id).params.as_slice();

        if let Some(owner_path) = sig.owner_path() {
            let class = self.named_class(&owner_path, signature)?;
            let primary = self.collect_members(class, &sig.member, extension, opts);
            trace!("`{signature}`: {} member candidates", primary.len());
            let direct = self.select(signature, &primary, params_of, &queries, rest, opts);
            match (direct, self.table.class(class).fallback) {
                (Err(ResolveError::NotFound { .. }), Some(fallback)) => {
                    let fallback = self.collect_members(fallback, &sig.member, extension, opts);
                    trace!("`{signature}`: {} fallback-scope candidates", fallback.len());
                    self.select(signature, &fallback, params_of, &queries, rest, opts)
                }
                (result, _) => result,
            }
        } else if sig.has_namespace() {
            let candidates = self
                .table
                .top_level_functions(&sig.qualified_member())
                .iter()
                .copied()
                .filter(|&id| self.extension_ok(id, extension, opts))
                .collect::<Vec<_>>();
            trace!("`{signature}`: {} top-level candidates", candidates.len());
            self.select(signature, &candidates, params_of, &queries, rest, opts)
        } else {
            Err(ResolveError::MissingNamespace {
                signature: signature.to_owned(),
            })
        }
    }

    pub fn resolve_function_opt(
        &self,
        signature: &str,
        extension: Option<&Ty>,
        opts: MatchOptions,
    ) -> Result<Option<FunId>, ResolveError> {
        ok_or_none(self.resolve_function(signature, extension, opts))
    }

    /// Resolves a constructor: the signature names the class, the parameter
    /// list selects among its declared constructors with the same engine as
    /// function overloads.
    pub fn resolve_constructor(
        &self,
        signature: &str,
        opts: MatchOptions,
    ) -> Result<CtorId, ResolveError> {
        let sig = Signature::parse(signature)?;
        let (queries, rest) = self.queries(&sig, signature)?;
        let class = self.class_of(&sig, signature)?;
        let candidates = self.table.class_constructors(class).to_vec();
        trace!("`{signature}`: {} constructor candidates", candidates.len());

        let table = self.table;
        self.select(
            signature,
            &candidates,
            move |id: CtorId| table.constructor(id).params.as_slice(),
            &queries,
            rest,
            opts,
        )
    }

    pub fn resolve_constructor_opt(
        &self,
        signature: &str,
        opts: MatchOptions,
    ) -> Result<Option<CtorId>, ResolveError> {
        ok_or_none(self.resolve_constructor(signature, opts))
    }

    /// Resolves a property: case-insensitive name match within the owner
    /// type (then its fallback scope), or a qualified top-level lookup.
    pub fn resolve_property(&self, signature: &str) -> Result<PropId, ResolveError> {
        let sig = Signature::parse(signature)?;
        if sig.params.is_some() {
            return Err(SignatureError::Malformed {
                signature: signature.to_owned(),
                reason: "property references take no parameter list".to_owned(),
            }
            .into());
        }

        let not_found = || ResolveError::NotFound {
            signature: signature.to_owned(),
        };

        if let Some(owner_path) = sig.owner_path() {
            let class = self.named_class(&owner_path, signature)?;
            self.table
                .member_property(class, &sig.member)
                .or_else(|| {
                    self.table
                        .class(class)
                        .fallback
                        .and_then(|fb| self.table.member_property(fb, &sig.member))
                })
                .ok_or_else(not_found)
        } else if sig.has_namespace() {
            self.table
                .top_level_property(&sig.qualified_member())
                .ok_or_else(not_found)
        } else {
            Err(ResolveError::MissingNamespace {
                signature: signature.to_owned(),
            })
        }
    }

    pub fn resolve_property_opt(&self, signature: &str) -> Result<Option<PropId>, ResolveError> {
        ok_or_none(self.resolve_property(signature))
    }

    fn class_of(&self, sig: &Signature, original: &str) -> Result<ClassId, ResolveError> {
        if sig.has_namespace() {
            let mut segments = sig.owners.clone();
            segments.push(sig.member.clone());
            let path = format!("{}/{}", sig.namespace.join("/"), segments.join("."));
            self.named_class(&path, original)
        } else {
            match builtins::keyword_path(&sig.member.to_lowercase()) {
                Some(path) => self.named_class(path, original),
                None => Err(ResolveError::MissingNamespace {
                    signature: original.to_owned(),
                }),
            }
        }
    }

    fn named_class(&self, path: &str, original: &str) -> Result<ClassId, ResolveError> {
        self.table
            .class_by_path(path)
            .ok_or_else(|| ResolveError::NotFound {
                signature: original.to_owned(),
            })
    }

    /// Resolves the parameter specs of a signature into query positions plus
    /// the rest-wildcard flag.
    fn queries(
        &self,
        sig: &Signature,
        original: &str,
    ) -> Result<(Vec<ParamQuery>, bool), ResolveError> {
        let specs = sig.params.as_deref().ok_or_else(|| {
            ResolveError::Signature(SignatureError::Malformed {
                signature: original.to_owned(),
                reason: "a parameter list is required for callable lookups".to_owned(),
            })
        })?;

        let rest = matches!(specs.last(), Some(ParamSpec::Rest));
        let prefix = &specs[..specs.len() - usize::from(rest)];

        let mut queries = Vec::with_capacity(prefix.len());
        for spec in prefix {
            queries.push(match spec {
                ParamSpec::Concrete(token) => ParamQuery::Exact(self.types.resolve_token(token)?),
                ParamSpec::Generic => ParamQuery::Unconstrained,
                // The parser guarantees a rest wildcard is final.
                ParamSpec::Rest => {
                    return Err(ResolveError::Signature(SignatureError::MisplacedWildcard {
                        signature: original.to_owned(),
                    }))
                }
            });
        }
        Ok((queries, rest))
    }

    fn collect_members(
        &self,
        class: ClassId,
        name: &str,
        extension: Option<&Ty>,
        opts: MatchOptions,
    ) -> Vec<FunId> {
        self.table
            .member_functions(class, name)
            .filter(|&id| self.extension_ok(id, extension, opts))
            .collect()
    }

    fn extension_ok(&self, id: FunId, expected: Option<&Ty>, opts: MatchOptions) -> bool {
        match expected {
            Some(want) => self
                .table
                .function(id)
                .extension
                .as_ref()
                .is_some_and(|have| have.structurally_eq(want, opts.ignore_nullability)),
            None => true,
        }
    }

    /// The matching engine shared by functions and constructors.
    fn select<S: Copy>(
        &self,
        signature: &str,
        candidates: &[S],
        params_of: impl Fn(S) -> &'t [Param],
        queries: &[ParamQuery],
        rest: bool,
        opts: MatchOptions,
    ) -> Result<S, ResolveError> {
        let exact = candidates
            .iter()
            .copied()
            .filter(|&c| {
                let declared = params_of(c);
                let arity_ok = if rest {
                    declared.len() >= queries.len()
                } else {
                    declared.len() == queries.len()
                };
                arity_ok && prefix_matches(declared, queries, opts)
            })
            .collect::<Vec<_>>();

        // Exact arity found nothing: tolerate callables with trailing
        // defaulted parameters the caller omitted.
        let matches = if exact.is_empty() && !rest {
            candidates
                .iter()
                .copied()
                .filter(|&c| {
                    let declared = params_of(c);
                    declared.len() >= queries.len() && prefix_matches(declared, queries, opts)
                })
                .collect()
        } else {
            exact
        };

        match matches.len() {
            0 => Err(ResolveError::NotFound {
                signature: signature.to_owned(),
            }),
            1 => Ok(matches[0]),
            count if opts.prefer_fewest_erased => {
                self.fewest_erased(signature, &matches, params_of, count)
            }
            count => Err(ResolveError::Ambiguous {
                signature: signature.to_owned(),
                count,
            }),
        }
    }

    /// Opt-in tie-break: the unique candidate with the fewest erased
    /// parameters wins; anything else stays ambiguous.
    fn fewest_erased<S: Copy>(
        &self,
        signature: &str,
        matches: &[S],
        params_of: impl Fn(S) -> &'t [Param],
        count: usize,
    ) -> Result<S, ResolveError> {
        let erased = |c: S| {
            params_of(c)
                .iter()
                .filter(|p| self.is_erased(&p.ty))
                .count()
        };
        let min = matches.iter().map(|&c| erased(c)).min().unwrap_or(0);
        let winners = matches
            .iter()
            .copied()
            .filter(|&c| erased(c) == min)
            .collect::<Vec<_>>();
        match winners.as_slice() {
            [single] => Ok(*single),
            _ => Err(ResolveError::Ambiguous {
                signature: signature.to_owned(),
                count,
            }),
        }
    }

    fn is_erased(&self, ty: &Ty) -> bool {
        ty.is_param() || ty.class_id() == Some(self.table.builtins().any)
    }
}

fn prefix_matches(declared: &[Param], queries: &[ParamQuery], opts: MatchOptions) -> bool {
    declared.len() >= queries.len()
        && queries.iter().zip(declared).all(|(query, param)| match query {
            ParamQuery::Exact(ty) => param.ty.structurally_eq(ty, opts.ignore_nullability),
            ParamQuery::Unconstrained => param.ty.is_param(),
        })
}

fn ok_or_none<T>(result: Result<T, ResolveError>) -> Result<Option<T>, ResolveError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(ResolveError::NotFound { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}
