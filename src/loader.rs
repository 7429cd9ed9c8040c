use log::debug;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use sigil_resolve::{ResolveError, TypeResolver};
use sigil_symtab::{FunSpec, Param, SymbolTable, TableBuilder, Ty};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum LoaderError {
    #[error("table description is not valid JSON")]
    #[diagnostic(code(sigil::loader::json))]
    Json(#[from] serde_json::Error),

    #[error("fallback scope `{path}` is not declared")]
    #[diagnostic(
        code(sigil::loader::fallback),
        help("companion scopes must appear in the class list themselves")
    )]
    UnknownFallback { path: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),
}

/// JSON description of a symbol table.
///
/// All types are written as signature type tokens (`"Int"`,
/// `"Pair<Int,String?>"`) and resolved in a second pass, so members can
/// reference classes declared later in the document.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TableDoc {
    #[serde(default)]
    pub classes: Vec<ClassDoc>,
    #[serde(default)]
    pub functions: Vec<TopFunDoc>,
    #[serde(default)]
    pub properties: Vec<TopPropDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassDoc {
    pub path: String,
    #[serde(default)]
    pub type_params: Vec<String>,
    #[serde(default)]
    pub object: bool,
    /// Path of the designated fallback scope, if any.
    #[serde(default)]
    pub companion: Option<String>,
    #[serde(default)]
    pub constructors: Vec<Vec<ParamDoc>>,
    #[serde(default)]
    pub functions: Vec<FunDoc>,
    #[serde(default)]
    pub properties: Vec<PropDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FunDoc {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ParamDoc>,
    /// Defaults to `unit` when omitted.
    #[serde(default)]
    pub returns: Option<String>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub extension: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParamDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub default: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopFunDoc {
    pub namespace: String,
    #[serde(flatten)]
    pub fun: FunDoc,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PropDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopPropDoc {
    pub namespace: String,
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Parses and builds a table from its JSON description.
pub fn load(json: &str) -> Result<SymbolTable, LoaderError> {
    let doc: TableDoc = serde_json::from_str(json)?;
    build(&doc)
}

/// Builds a table from a parsed description. First pass registers every
/// class; the second resolves member types against the now-complete class
/// set.
pub fn build(doc: &TableDoc) -> Result<SymbolTable, LoaderError> {
    let mut builder = TableBuilder::new();

    let mut ids = Vec::with_capacity(doc.classes.len());
    for class in &doc.classes {
        let params = class.type_params.iter().map(String::as_str).collect::<Vec<_>>();
        let id = if class.object {
            builder.add_object(&class.path)
        } else {
            builder.add_class(&class.path, &params)
        };
        ids.push(id);
    }

    for (class, &id) in doc.classes.iter().zip(&ids) {
        if let Some(companion) = &class.companion {
            let fallback = builder.table().class_by_path(companion).ok_or_else(|| {
                LoaderError::UnknownFallback {
                    path: companion.clone(),
                }
            })?;
            builder.set_fallback(id, fallback);
        }
    }

    for (class, &id) in doc.classes.iter().zip(&ids) {
        for params in &class.constructors {
            let params = resolve_params(&builder, params)?;
            builder.add_ctor(id, params);
        }
        for fun in &class.functions {
            let spec = resolve_fun(&builder, fun)?;
            builder.add_member(id, spec);
        }
        for prop in &class.properties {
            let ty = resolve_ty(&builder, &prop.ty)?;
            builder.add_member_prop(id, &prop.name, ty);
        }
    }

    for top in &doc.functions {
        let spec = resolve_fun(&builder, &top.fun)?;
        builder.add_top_level(&top.namespace, spec);
    }
    for top in &doc.properties {
        let ty = resolve_ty(&builder, &top.ty)?;
        builder.add_top_prop(&top.namespace, &top.name, ty);
    }

    debug!(
        "loaded table description: {} classes, {} top-level functions, {} top-level properties",
        doc.classes.len(),
        doc.functions.len(),
        doc.properties.len()
    );
    Ok(builder.finish())
}

fn resolve_ty(builder: &TableBuilder, token: &str) -> Result<Ty, ResolveError> {
    TypeResolver::new(builder.table()).resolve_str(token)
}

fn resolve_params(builder: &TableBuilder, docs: &[ParamDoc]) -> Result<Vec<Param>, ResolveError> {
    docs.iter()
        .map(|doc| {
            let ty = resolve_ty(builder, &doc.ty)?;
            Ok(if doc.default {
                Param::defaulted(&doc.name, ty)
            } else {
                Param::new(&doc.name, ty)
            })
        })
        .collect()
}

fn resolve_fun(builder: &TableBuilder, doc: &FunDoc) -> Result<FunSpec, ResolveError> {
    let ret = match &doc.returns {
        Some(token) => resolve_ty(builder, token)?,
        None => Ty::class(builder.builtins().unit),
    };
    let mut spec = FunSpec::new(&doc.name, ret);
    for param in &doc.params {
        let ty = resolve_ty(builder, &param.ty)?;
        spec = if param.default {
            spec.defaulted(&param.name, ty)
        } else {
            spec.param(&param.name, ty)
        };
    }
    if doc.is_static {
        spec = spec.static_scope();
    }
    if let Some(receiver) = &doc.extension {
        spec = spec.extension(resolve_ty(builder, receiver)?);
    }
    Ok(spec)
}
