use log::debug;
use sigil_build::{Arg, BuildError, Builder};
use sigil_ir::prelude::*;
use sigil_symtab::SymbolTable;

use crate::config::ProbeConfig;

/// Applies the enter/exit wrapping to every function of a unit.
pub struct Instrumenter<'t> {
    table: &'t SymbolTable,
    config: ProbeConfig,
}

impl<'t> Instrumenter<'t> {
    pub fn new(table: &'t SymbolTable, config: ProbeConfig) -> Self {
        Self { table, config }
    }

    /// Instruments all functions of `unit` in place. On the first failure
    /// the unit must be considered unusable; nothing is rolled back.
    pub fn instrument(&self, unit: &mut Unit, names: &mut NameSupply) -> Result<(), BuildError> {
        let sink = Builder::new(self.table, unit)
            .create_field(names.fresh("traceSink"), |b| b.object_str(&self.config.sink))?;

        for id in unit.function_ids() {
            self.wrap(unit, sink, id)?;
        }
        Ok(())
    }

    fn wrap(&self, unit: &mut Unit, sink: FieldId, id: FunctionId) -> Result<(), BuildError> {
        let name = unit.function(id).name.clone();
        let original = unit.function(id).body;

        let mut builder = Builder::new(self.table, unit);
        let enter = builder.call_on_str(
            Arg::Field(sink),
            &self.config.enter,
            vec![name.as_str().into()],
        )?;
        let stamp = builder.call_str(&self.config.clock, vec![])?;
        let exit = builder.call_on_str(
            Arg::Field(sink),
            &self.config.exit,
            vec![name.as_str().into(), Arg::Expr(stamp)],
        )?;

        let guarded = unit
            .body_mut()
            .add(node::TryFinally {
                body: original,
                finally: exit,
            })
            .erase();
        let wrapped = unit
            .body_mut()
            .add(node::Block {
                stmts: vec![enter, guarded],
            })
            .erase();
        unit.set_function_body(id, wrapped);

        debug!("instrumented `{name}`");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_symtab::{fixture, Ty};

    fn demo_unit(table: &SymbolTable) -> (Unit, Id<Expr>) {
        let mut unit = Unit::new("demo");
        let string = Ty::class(table.builtins().string);
        let mut builder = Builder::new(table, &mut unit);
        let mut original = None;
        builder
            .create_function("main", Vec::new(), string, |b, _| {
                let root = b.call_str("demo/banner(String)", vec!["hello".into()])?;
                original = Some(root);
                Ok(root)
            })
            .unwrap();
        (unit, original.unwrap())
    }

    #[test]
    fn bodies_are_wrapped_in_enter_and_try_finally() {
        let table = fixture::table();
        let (mut unit, original) = demo_unit(&table);

        let mut names = NameSupply::new();
        Instrumenter::new(&table, ProbeConfig::default())
            .instrument(&mut unit, &mut names)
            .unwrap();

        let (_, main) = unit.functions().next().unwrap();
        let Expr::Block(block) = unit.body().expr(main.body) else {
            panic!("expected a block root");
        };
        assert_eq!(block.stmts.len(), 2);

        let Expr::Call(enter) = unit.body().expr(block.stmts[0]) else {
            panic!("expected the enter probe first");
        };
        assert_eq!(table.function(enter.callee).name, "enter");
        assert!(matches!(
            unit.body().expr(enter.args[0]),
            Expr::Literal(node::Literal::Str(s)) if s == "main"
        ));

        let Expr::TryFinally(guard) = unit.body().expr(block.stmts[1]) else {
            panic!("expected a try/finally guard");
        };
        assert_eq!(guard.body, original);
        let Expr::Call(exit) = unit.body().expr(guard.finally) else {
            panic!("expected the exit probe in the finally arm");
        };
        assert_eq!(table.function(exit.callee).name, "exit");
        assert_eq!(exit.args.len(), 2);
    }

    #[test]
    fn the_sink_field_is_synthesized_once_per_unit() {
        let table = fixture::table();
        let (mut unit, _) = demo_unit(&table);

        let mut names = NameSupply::new();
        Instrumenter::new(&table, ProbeConfig::default())
            .instrument(&mut unit, &mut names)
            .unwrap();

        let fields = unit.fields().collect::<Vec<_>>();
        assert_eq!(fields.len(), 1);
        let (_, field) = fields[0];
        assert_eq!(field.name, "traceSink$0");
        let trace = table.class_by_path("trace/Trace").unwrap();
        assert_eq!(field.ty.class_id(), Some(trace));
    }

    #[test]
    fn an_unresolvable_probe_aborts_the_unit() {
        let table = fixture::table();
        let (mut unit, _) = demo_unit(&table);

        let config = ProbeConfig {
            enter: "trace/Trace.missing(string)".to_owned(),
            ..Default::default()
        };
        let mut names = NameSupply::new();
        let err = Instrumenter::new(&table, config)
            .instrument(&mut unit, &mut names)
            .unwrap_err();
        assert!(matches!(err, BuildError::Resolve(_)));
    }
}
