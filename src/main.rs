use std::{fs, path::PathBuf};

use miette::IntoDiagnostic;
use sigil::{
    dump, loader, Arg, Instrumenter, MatchOptions, NameSupply, ProbeConfig, Server, Sigil,
    SymbolTable, TypeResolver, Unit,
};
use sigil_inspect::render_ty;
use sigil_ir::prelude::FunParam;
use sigil_symtab::{fixture, Ty};

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(clap::Subcommand, Debug)]
pub enum Cmd {
    /// Resolve a signature against a symbol table.
    Resolve {
        /// Signature string, e.g. `demo/Greeter.greet(String)`.
        signature: String,
        /// JSON table description; the built-in demo table when omitted.
        #[arg(long)]
        table: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = Kind::Function)]
        kind: Kind,
        /// Extension-receiver type token, e.g. `String`.
        #[arg(long)]
        ext: Option<String>,
        /// Compare parameter types nullability-insensitively.
        #[arg(long)]
        ignore_nullability: bool,
        /// Break overload ties towards the fewest Any-erased parameters.
        #[arg(long)]
        prefer_fewest_erased: bool,
    },
    /// Instrument the demo unit and dump (or serve) its IR.
    Demo {
        /// Serve the dump on this address instead of printing it, blocking
        /// until a client requests `/continue`.
        #[arg(long)]
        serve: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum Kind {
    Class,
    Function,
    Constructor,
    Property,
}

fn main() -> miette::Result<()> {
    env_logger::init();
    let cli: Cli = clap::Parser::parse();

    match cli.command {
        Cmd::Resolve {
            signature,
            table,
            kind,
            ext,
            ignore_nullability,
            prefer_fewest_erased,
        } => {
            let table = match table {
                Some(path) => {
                    let json = fs::read_to_string(path).into_diagnostic()?;
                    loader::load(&json)?
                }
                None => fixture::table(),
            };
            let sigil = Sigil::new(&table).with_options(MatchOptions {
                ignore_nullability,
                prefer_fewest_erased,
            });
            resolve(&table, sigil, kind, &signature, ext.as_deref())?;
        }
        Cmd::Demo { serve } => {
            let table = fixture::table();
            let unit = demo_unit(&table)?;
            let doc = dump(&table, &unit);
            match serve {
                Some(addr) => Server::bind(&addr)?.serve(&doc)?,
                None => println!("{}", serde_json::to_string_pretty(&doc).into_diagnostic()?),
            }
        }
    }

    Ok(())
}

fn resolve(
    table: &SymbolTable,
    sigil: Sigil<'_>,
    kind: Kind,
    signature: &str,
    ext: Option<&str>,
) -> miette::Result<()> {
    match kind {
        Kind::Class => {
            let id = sigil.resolve_class(signature)?;
            println!("class {}", table.class(id).path);
        }
        Kind::Function => {
            let ext = ext
                .map(|token| TypeResolver::new(table).resolve_str(token))
                .transpose()?;
            let id = sigil.resolve_function(signature, ext.as_ref())?;
            let def = table.function(id);
            let params = def
                .params
                .iter()
                .map(|p| format!("{}: {}", p.name, render_ty(table, &p.ty)))
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "function {}({params}): {}",
                def.name,
                render_ty(table, &def.ret)
            );
        }
        Kind::Constructor => {
            let id = sigil.resolve_constructor(signature)?;
            let def = table.constructor(id);
            println!(
                "constructor {} with {} parameters",
                table.class(def.owner).path,
                def.params.len()
            );
        }
        Kind::Property => {
            let id = sigil.resolve_property(signature)?;
            let def = table.property(id);
            println!("property {}: {}", def.name, render_ty(table, &def.ty));
        }
    }
    Ok(())
}

/// A small unit exercising the DSL end to end: one function built from
/// signature strings, then instrumented with the default probes.
fn demo_unit(table: &SymbolTable) -> miette::Result<Unit> {
    let sigil = Sigil::new(table);
    let mut unit = Unit::new("demo");

    let string = Ty::class(table.builtins().string);
    let mut builder = sigil.builder(&mut unit);
    builder.create_function(
        "greet",
        vec![FunParam {
            name: "who".to_owned(),
            ty: string.clone(),
        }],
        string,
        |b, id| {
            let greeter = b.construct_str("demo/Greeter(String)", vec!["Sigil".into()])?;
            b.call_on_str(
                Arg::Expr(greeter),
                "demo/Greeter.greet(String)",
                vec![Arg::Param {
                    function: id,
                    index: 0,
                }],
            )
        },
    )?;

    let mut names = NameSupply::new();
    Instrumenter::new(table, ProbeConfig::default()).instrument(&mut unit, &mut names)?;
    Ok(unit)
}
