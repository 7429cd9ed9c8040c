use log::trace;
use sigil_ir::prelude::*;
use sigil_resolve::{MatchOptions, ResolveError, Resolver};
use sigil_symtab::{ClassId, CtorId, FunId, SymbolTable, Ty};

use crate::{arg::Arg, error::BuildError};

/// Constructs call expressions into a unit's arena, slotting receivers the
/// way each callee declares them.
///
/// Every operation either returns the id of a well-formed node or fails
/// immediately; a failed build leaves no usable root behind and the caller is
/// expected to abandon generation for the unit.
pub struct Builder<'u, 't> {
    unit: &'u mut Unit,
    table: &'t SymbolTable,
    opts: MatchOptions,
}

impl<'u, 't> Builder<'u, 't> {
    pub fn new(table: &'t SymbolTable, unit: &'u mut Unit) -> Self {
        Self {
            unit,
            table,
            opts: MatchOptions::default(),
        }
    }

    pub fn with_options(mut self, opts: MatchOptions) -> Self {
        self.opts = opts;
        self
    }

    pub fn unit(&self) -> &Unit {
        self.unit
    }

    pub fn table(&self) -> &'t SymbolTable {
        self.table
    }

    /// Calls a callable that declares no receiver, or a member of a
    /// singleton object (the object instance is slotted implicitly).
    pub fn build_call(&mut self, fun: FunId, args: Vec<Arg>) -> Result<Id<Expr>, BuildError> {
        let def = self.table.function(fun);
        if def.has_extension_receiver() {
            return Err(self.receiver_mismatch(fun, "requires an extension receiver; use call_on"));
        }
        let dispatch = if def.has_dispatch_receiver() {
            match def.owner {
                Some(owner) if self.table.class(owner).is_object => Some(Arg::Class(owner)),
                _ => {
                    return Err(
                        self.receiver_mismatch(fun, "requires a dispatch receiver; use call_on")
                    )
                }
            }
        } else {
            None
        };
        self.emit_call(fun, dispatch, None, args)
    }

    /// Calls with a single receiver, slotted into the dispatch or the
    /// extension slot depending on what the callee declares.
    pub fn call_on(
        &mut self,
        receiver: Arg,
        fun: FunId,
        args: Vec<Arg>,
    ) -> Result<Id<Expr>, BuildError> {
        let def = self.table.function(fun);
        match (def.has_dispatch_receiver(), def.has_extension_receiver()) {
            (true, false) => self.emit_call(fun, Some(receiver), None, args),
            (false, true) => self.emit_call(fun, None, Some(receiver), args),
            (true, true) => {
                Err(self.receiver_mismatch(fun, "declares both receivers; use call_with"))
            }
            (false, false) => Err(self.receiver_mismatch(fun, "does not take a receiver")),
        }
    }

    /// Calls a member extension, which takes a dispatch and an extension
    /// receiver at once.
    pub fn call_with(
        &mut self,
        dispatch: Arg,
        extension: Arg,
        fun: FunId,
        args: Vec<Arg>,
    ) -> Result<Id<Expr>, BuildError> {
        let def = self.table.function(fun);
        if !(def.has_dispatch_receiver() && def.has_extension_receiver()) {
            return Err(self.receiver_mismatch(fun, "does not declare both receivers"));
        }
        self.emit_call(fun, Some(dispatch), Some(extension), args)
    }

    /// Constructor-call sugar: N supplied arguments pick the declared
    /// constructor with N non-defaulted parameters whose types match
    /// positionally; trailing defaulted parameters are omitted.
    pub fn construct(&mut self, class: ClassId, args: Vec<Arg>) -> Result<Id<Expr>, BuildError> {
        let path = self.table.class(class).path.clone();
        let lowered = self.lower_all(args)?;
        let tys = lowered
            .iter()
            .map(|&id| self.unit.ty_of(self.table, id))
            .collect::<Vec<_>>();

        let ctors = self.table.class_constructors(class);
        let by_arity = ctors
            .iter()
            .copied()
            .filter(|&id| {
                let def = self.table.constructor(id);
                // required == N guarantees the slice below is in range.
                def.required_arity() == tys.len()
                    && def.params[tys.len()..].iter().all(|p| p.has_default)
            })
            .collect::<Vec<_>>();

        if by_arity.is_empty() {
            let expected = ctors
                .iter()
                .map(|&id| self.table.constructor(id).required_arity())
                .max()
                .unwrap_or(0);
            return Err(BuildError::ArityMismatch {
                callable: path,
                expected,
                found: tys.len(),
            });
        }

        let typed = by_arity
            .into_iter()
            .filter(|&id| {
                self.table
                    .constructor(id)
                    .params
                    .iter()
                    .zip(&tys)
                    .all(|(p, ty)| p.ty.structurally_eq(ty, self.opts.ignore_nullability))
            })
            .collect::<Vec<_>>();

        match typed.as_slice() {
            [ctor] => Ok(self.unit.body_mut().add(node::New { ctor: *ctor, args: lowered }).erase()),
            [] => Err(ResolveError::NotFound { signature: path }.into()),
            many => Err(ResolveError::Ambiguous {
                signature: path,
                count: many.len(),
            }
            .into()),
        }
    }

    /// Synthesizes a unit field, its type inferred from the initializer's
    /// result type.
    pub fn create_field(
        &mut self,
        name: impl Into<String>,
        init: impl FnOnce(&mut Self) -> Result<Id<Expr>, BuildError>,
    ) -> Result<FieldId, BuildError> {
        let init = init(self)?;
        let ty = self.unit.ty_of(self.table, init);
        Ok(self.unit.add_field(Field {
            name: name.into(),
            ty,
            init,
        }))
    }

    /// Synthesizes a unit function. The declaration is attached before the
    /// body closure runs, so the body can reference its own parameters.
    pub fn create_function(
        &mut self,
        name: impl Into<String>,
        params: Vec<FunParam>,
        ret: Ty,
        body: impl FnOnce(&mut Self, FunctionId) -> Result<Id<Expr>, BuildError>,
    ) -> Result<FunctionId, BuildError> {
        let placeholder = self.unit.body_mut().add(node::Literal::Unit).erase();
        let id = self.unit.add_function(Function {
            name: name.into(),
            params,
            ret,
            body: placeholder,
        });
        let root = body(self, id)?;
        self.unit.set_function_body(id, root);
        Ok(id)
    }

    /// Resolves the callable from a signature string, then builds the call.
    pub fn call_str(&mut self, signature: &str, args: Vec<Arg>) -> Result<Id<Expr>, BuildError> {
        let fun = Resolver::new(self.table).resolve_function(signature, None, self.opts)?;
        self.build_call(fun, args)
    }

    pub fn call_on_str(
        &mut self,
        receiver: Arg,
        signature: &str,
        args: Vec<Arg>,
    ) -> Result<Id<Expr>, BuildError> {
        let fun = Resolver::new(self.table).resolve_function(signature, None, self.opts)?;
        self.call_on(receiver, fun, args)
    }

    pub fn construct_str(
        &mut self,
        signature: &str,
        args: Vec<Arg>,
    ) -> Result<Id<Expr>, BuildError> {
        let ctor = Resolver::new(self.table).resolve_constructor(signature, self.opts)?;
        self.emit_new(ctor, args)
    }

    fn emit_call(
        &mut self,
        fun: FunId,
        dispatch: Option<Arg>,
        extension: Option<Arg>,
        args: Vec<Arg>,
    ) -> Result<Id<Expr>, BuildError> {
        let def = self.table.function(fun);
        let expected = def.required_arity();
        if args.len() != expected {
            return Err(BuildError::ArityMismatch {
                callable: self.callable_name(fun),
                expected,
                found: args.len(),
            });
        }
        trace!("call `{}` with {} arguments", self.callable_name(fun), args.len());

        let dispatch = dispatch.map(|arg| self.lower(arg)).transpose()?;
        let extension = extension.map(|arg| self.lower(arg)).transpose()?;
        let args = self.lower_all(args)?;

        Ok(self
            .unit
            .body_mut()
            .add(node::Call {
                callee: fun,
                dispatch,
                extension,
                args,
            })
            .erase())
    }

    fn emit_new(&mut self, ctor: CtorId, args: Vec<Arg>) -> Result<Id<Expr>, BuildError> {
        let def = self.table.constructor(ctor);
        let expected = def.required_arity();
        if args.len() != expected {
            return Err(BuildError::ArityMismatch {
                callable: self.table.class(def.owner).path.clone(),
                expected,
                found: args.len(),
            });
        }
        let args = self.lower_all(args)?;
        Ok(self.unit.body_mut().add(node::New { ctor, args }).erase())
    }

    /// Resolves a class reference string to a singleton-object access.
    pub fn object_str(&mut self, signature: &str) -> Result<Id<Expr>, BuildError> {
        let class = Resolver::new(self.table).resolve_class(signature)?;
        self.lower(Arg::Class(class))
    }

    /// Lowers one argument to an expression node.
    pub fn lower(&mut self, arg: Arg) -> Result<Id<Expr>, BuildError> {
        let body = self.unit.body_mut();
        let id = match arg {
            Arg::Int(v) => body.add(node::Literal::Int(v)).erase(),
            Arg::Long(v) => body.add(node::Literal::Long(v)).erase(),
            Arg::Double(v) => body.add(node::Literal::Double(v)).erase(),
            Arg::Bool(v) => body.add(node::Literal::Bool(v)).erase(),
            Arg::Str(v) => body.add(node::Literal::Str(v)).erase(),
            Arg::Null => body.add(node::Literal::Null).erase(),
            Arg::Expr(id) => id,
            Arg::Local(local) => body.add(node::GetLocal { local }).erase(),
            Arg::Param { function, index } => {
                let declared = self.unit.function(function);
                if index >= declared.params.len() {
                    return Err(BuildError::InvalidArg {
                        detail: format!(
                            "`{}` declares {} parameters, index {index} is out of range",
                            declared.name,
                            declared.params.len()
                        ),
                    });
                }
                self.unit.body_mut().add(node::GetParam { function, index }).erase()
            }
            Arg::Field(field) => body.add(node::GetField { field }).erase(),
            Arg::Prop(prop) => {
                let def = self.table.property(prop);
                let receiver = match def.owner {
                    None => None,
                    Some(owner) if self.table.class(owner).is_object => {
                        Some(self.unit.body_mut().add(node::GetObject { class: owner }).erase())
                    }
                    Some(owner) => {
                        return Err(BuildError::InvalidArg {
                            detail: format!(
                                "property `{}.{}` needs an instance receiver; build the read explicitly",
                                self.table.class(owner).path,
                                def.name
                            ),
                        })
                    }
                };
                self.unit.body_mut().add(node::GetProp { receiver, prop }).erase()
            }
            Arg::Class(class) => {
                if !self.table.class(class).is_object {
                    return Err(BuildError::InvalidArg {
                        detail: format!(
                            "`{}` is not a singleton object",
                            self.table.class(class).path
                        ),
                    });
                }
                self.unit.body_mut().add(node::GetObject { class }).erase()
            }
        };
        Ok(id)
    }

    fn lower_all(&mut self, args: Vec<Arg>) -> Result<Vec<Id<Expr>>, BuildError> {
        args.into_iter().map(|arg| self.lower(arg)).collect()
    }

    fn receiver_mismatch(&self, fun: FunId, detail: &str) -> BuildError {
        BuildError::ReceiverMismatch {
            callable: self.callable_name(fun),
            detail: detail.to_owned(),
        }
    }

    fn callable_name(&self, fun: FunId) -> String {
        let def = self.table.function(fun);
        match (&def.qualified, def.owner) {
            (Some(qualified), _) => qualified.clone(),
            (None, Some(owner)) => format!("{}.{}", self.table.class(owner).path, def.name),
            (None, None) => def.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_symtab::{fixture, Param, TableBuilder};

    fn call<'a>(unit: &'a Unit, id: Id<Expr>) -> &'a node::Call {
        match unit.body().expr(id) {
            Expr::Call(call) => call,
            other => panic!("expected a call, got {other:?}"),
        }
    }

    #[test]
    fn member_calls_slot_the_dispatch_receiver() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");
        let mut builder = Builder::new(&table, &mut unit);

        let greeter = builder.construct_str("demo/Greeter(String)", vec!["Ada".into()]).unwrap();
        let greeting = builder
            .call_on_str(Arg::Expr(greeter), "demo/Greeter.greet(String)", vec!["world".into()])
            .unwrap();

        let call = call(&unit, greeting);
        assert!(call.dispatch.is_some());
        assert!(call.extension.is_none());
        assert_eq!(call.args.len(), 1);
    }

    #[test]
    fn extension_calls_slot_the_extension_receiver() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");
        let mut builder = Builder::new(&table, &mut unit);

        let id = builder
            .call_on_str("hi".into(), "demo/emphasize(Int)", vec![2.into()])
            .unwrap();

        let call = call(&unit, id);
        assert!(call.dispatch.is_none());
        assert!(call.extension.is_some());
    }

    #[test]
    fn receiver_mismatches_fail_fast() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");
        let mut builder = Builder::new(&table, &mut unit);

        // A receiver for a receiverless top-level function.
        let banner = Resolver::new(&table)
            .resolve_function("demo/banner(String)", None, MatchOptions::default())
            .unwrap();
        assert!(matches!(
            builder.call_on("x".into(), banner, vec!["t".into()]),
            Err(BuildError::ReceiverMismatch { .. })
        ));

        // No receiver for an instance member.
        let greet = Resolver::new(&table)
            .resolve_function("demo/Greeter.greet(String)", None, MatchOptions::default())
            .unwrap();
        assert!(matches!(
            builder.build_call(greet, vec!["w".into()]),
            Err(BuildError::ReceiverMismatch { .. })
        ));
    }

    #[test]
    fn singleton_members_get_an_implicit_object_receiver() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");
        let mut builder = Builder::new(&table, &mut unit);

        let id = builder
            .call_str("trace/Trace.enter(string)", vec!["main".into()])
            .unwrap();

        let call = call(&unit, id);
        let dispatch = call.dispatch.unwrap();
        assert!(matches!(unit.body().expr(dispatch), Expr::GetObject(_)));
    }

    #[test]
    fn argument_count_must_match_the_non_defaulted_arity() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");
        let mut builder = Builder::new(&table, &mut unit);

        assert!(matches!(
            builder.call_str("demo/banner(String)", vec![]),
            Err(BuildError::ArityMismatch {
                expected: 1,
                found: 0,
                ..
            })
        ));

        // `shout` has a defaulted trailing parameter; only the required one
        // is supplied.
        let greeter = builder.construct_str("demo/Greeter(String)", vec!["Ada".into()]).unwrap();
        assert!(builder
            .call_on_str(Arg::Expr(greeter), "demo/Greeter.shout(String)", vec!["hey".into()])
            .is_ok());
    }

    #[test]
    fn construct_picks_the_ctor_by_positional_types() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");
        let mut builder = Builder::new(&table, &mut unit);
        let greeter = table.class_by_path("demo/Greeter").unwrap();

        let one = builder.construct(greeter, vec!["Ada".into()]).unwrap();
        let two = builder
            .construct(greeter, vec!["Ada".into(), true.into()])
            .unwrap();
        let overfull = builder.construct(greeter, vec![1.into(), 2.into(), 3.into()]);

        assert!(matches!(unit.body().expr(one), Expr::New(_)));
        assert!(matches!(unit.body().expr(two), Expr::New(_)));
        assert!(matches!(
            overfull,
            Err(BuildError::ArityMismatch {
                expected: 2,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn construct_omits_trailing_defaulted_parameters() {
        let mut b = TableBuilder::new();
        let string = Ty::class(b.builtins().string);
        let boolean = Ty::class(b.builtins().boolean);
        let widget = b.add_class("app/Widget", &[]);
        b.add_ctor(
            widget,
            vec![
                Param::new("name", string),
                Param::defaulted("loud", boolean),
            ],
        );
        let table = b.finish();

        let mut unit = Unit::new("app");
        let mut builder = Builder::new(&table, &mut unit);

        // One argument covers the single non-defaulted parameter.
        let one = builder.construct(widget, vec!["x".into()]).unwrap();
        // Defaulted parameters cannot be supplied positionally.
        let two = builder.construct(widget, vec!["x".into(), true.into()]);

        assert!(matches!(unit.body().expr(one), Expr::New(_)));
        assert!(matches!(
            two,
            Err(BuildError::ArityMismatch {
                expected: 1,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn parameter_references_are_range_checked() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");
        let mut builder = Builder::new(&table, &mut unit);
        let string = Ty::class(table.builtins().string);

        let id = builder
            .create_function(
                "greet",
                vec![FunParam {
                    name: "who".to_owned(),
                    ty: string.clone(),
                }],
                string,
                |b, id| b.lower(Arg::Param { function: id, index: 0 }),
            )
            .unwrap();

        assert!(builder.lower(Arg::Param { function: id, index: 0 }).is_ok());
        assert!(matches!(
            builder.lower(Arg::Param { function: id, index: 1 }),
            Err(BuildError::InvalidArg { .. })
        ));
    }

    #[test]
    fn built_calls_chain_as_receivers() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");
        let mut builder = Builder::new(&table, &mut unit);

        let sb = builder.construct_str("stringbuilder()", vec![]).unwrap();
        let appended = builder
            .call_on_str(
                Arg::Expr(sb),
                "kotlin/text/StringBuilder.append(String)",
                vec!["x".into()],
            )
            .unwrap();
        let rendered = builder
            .call_on_str(
                Arg::Expr(appended),
                "kotlin/text/StringBuilder.toString()",
                vec![],
            )
            .unwrap();

        let inner = call(&unit, rendered).dispatch.unwrap();
        assert_eq!(inner, appended);
    }

    #[test]
    fn field_types_are_inferred_from_their_initializer() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");
        let mut builder = Builder::new(&table, &mut unit);

        let field = builder
            .create_field("buffer", |b| b.construct_str("stringbuilder()", vec![]))
            .unwrap();

        let sb = table.class_by_path("kotlin/text/StringBuilder").unwrap();
        assert_eq!(unit.field(field).ty.class_id(), Some(sb));
    }
}
