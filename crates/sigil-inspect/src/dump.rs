use serde_json::{json, Value};
use sigil_ir::prelude::*;
use sigil_symtab::{FunId, SymbolTable, Ty, TyBase};

/// Renders a unit and its expression trees as a JSON document with all
/// symbol ids replaced by their names.
pub fn dump(table: &SymbolTable, unit: &Unit) -> Value {
    let fields = unit
        .fields()
        .map(|(_, field)| {
            json!({
                "name": field.name,
                "type": render_ty(table, &field.ty),
                "init": render(table, unit, field.init),
            })
        })
        .collect::<Vec<_>>();

    let functions = unit
        .functions()
        .map(|(_, function)| {
            let params = function
                .params
                .iter()
                .map(|p| json!({ "name": p.name, "type": render_ty(table, &p.ty) }))
                .collect::<Vec<_>>();
            json!({
                "name": function.name,
                "params": params,
                "returns": render_ty(table, &function.ret),
                "body": render(table, unit, function.body),
            })
        })
        .collect::<Vec<_>>();

    json!({
        "unit": unit.name,
        "fields": fields,
        "functions": functions,
    })
}

/// Textual form of a type: path, generic arguments, `?` for nullable and
/// `!` for platform types.
pub fn render_ty(table: &SymbolTable, ty: &Ty) -> String {
    let mut out = match &ty.base {
        TyBase::Class(id) => table.class(*id).path.clone(),
        TyBase::Param(name) => name.clone(),
    };
    if !ty.args.is_empty() {
        out.push('<');
        for (i, arg) in ty.args.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&render_ty(table, arg));
        }
        out.push('>');
    }
    if ty.platform {
        out.push('!');
    } else if ty.nullable {
        out.push('?');
    }
    out
}

fn callee_name(table: &SymbolTable, fun: FunId) -> String {
    let def = table.function(fun);
    match (&def.qualified, def.owner) {
        (Some(qualified), _) => qualified.clone(),
        (None, Some(owner)) => format!("{}.{}", table.class(owner).path, def.name),
        (None, None) => def.name.clone(),
    }
}

fn render_opt(table: &SymbolTable, unit: &Unit, id: Option<Id<Expr>>) -> Value {
    match id {
        Some(id) => render(table, unit, id),
        None => Value::Null,
    }
}

fn render(table: &SymbolTable, unit: &Unit, id: Id<Expr>) -> Value {
    match unit.body().expr(id) {
        Expr::Literal(lit) => match lit {
            node::Literal::Int(v) => json!({ "kind": "int", "value": v }),
            node::Literal::Long(v) => json!({ "kind": "long", "value": v }),
            node::Literal::Double(v) => json!({ "kind": "double", "value": v }),
            node::Literal::Bool(v) => json!({ "kind": "bool", "value": v }),
            node::Literal::Str(v) => json!({ "kind": "string", "value": v }),
            node::Literal::Unit => json!({ "kind": "unit" }),
            node::Literal::Null => json!({ "kind": "null" }),
        },
        Expr::GetLocal(get) => json!({
            "kind": "get_local",
            "name": unit.body().local(get.local).name,
        }),
        Expr::GetParam(get) => json!({
            "kind": "get_param",
            "function": unit.function(get.function).name,
            "name": unit.function(get.function).params[get.index].name,
        }),
        Expr::GetField(get) => json!({
            "kind": "get_field",
            "name": unit.field(get.field).name,
        }),
        Expr::GetProp(get) => {
            let prop = table.property(get.prop);
            json!({
                "kind": "get_property",
                "property": prop.qualified.clone().unwrap_or_else(|| prop.name.clone()),
                "receiver": render_opt(table, unit, get.receiver),
            })
        }
        Expr::GetObject(get) => json!({
            "kind": "get_object",
            "class": table.class(get.class).path,
        }),
        Expr::Call(call) => json!({
            "kind": "call",
            "callee": callee_name(table, call.callee),
            "dispatch": render_opt(table, unit, call.dispatch),
            "extension": render_opt(table, unit, call.extension),
            "args": call.args.iter().map(|&a| render(table, unit, a)).collect::<Vec<_>>(),
            "type": render_ty(table, &table.function(call.callee).ret),
        }),
        Expr::New(new) => json!({
            "kind": "new",
            "class": table.class(table.constructor(new.ctor).owner).path,
            "args": new.args.iter().map(|&a| render(table, unit, a)).collect::<Vec<_>>(),
        }),
        Expr::Let(bind) => json!({
            "kind": "let",
            "local": unit.body().local(bind.local).name,
            "init": render(table, unit, bind.init),
        }),
        Expr::Return(ret) => json!({
            "kind": "return",
            "value": render_opt(table, unit, ret.value),
        }),
        Expr::TryFinally(guard) => json!({
            "kind": "try_finally",
            "body": render(table, unit, guard.body),
            "finally": render(table, unit, guard.finally),
        }),
        Expr::Block(block) => json!({
            "kind": "block",
            "stmts": block.stmts.iter().map(|&s| render(table, unit, s)).collect::<Vec<_>>(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sigil_symtab::fixture;

    #[test]
    fn types_render_with_nullability_markers() {
        let table = fixture::table();
        let b = table.builtins();

        let string = Ty::class(b.string);
        assert_eq!(render_ty(&table, &string), "kotlin/String");
        assert_eq!(render_ty(&table, &string.clone().as_nullable()), "kotlin/String?");
        assert_eq!(render_ty(&table, &string.as_platform()), "kotlin/String!");

        let pair = table
            .apply_args(Ty::class(b.pair), vec![Ty::class(b.int), Ty::class(b.long)])
            .unwrap();
        assert_eq!(render_ty(&table, &pair), "kotlin/Pair<kotlin/Int,kotlin/Long>");
    }

    #[test]
    fn calls_dump_with_resolved_names() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");

        let trace = table.class_by_path("trace/Trace").unwrap();
        let enter = table.member_functions(trace, "enter").next().unwrap();
        let obj = unit.body_mut().add(node::GetObject { class: trace }).erase();
        let site = unit
            .body_mut()
            .add(node::Literal::Str("main".into()))
            .erase();
        let call = unit
            .body_mut()
            .add(node::Call {
                callee: enter,
                dispatch: Some(obj),
                extension: None,
                args: vec![site],
            })
            .erase();

        let value = render(&table, &unit, call);
        assert_eq!(value["kind"], "call");
        assert_eq!(value["callee"], "trace/Trace.enter");
        assert_eq!(value["dispatch"]["kind"], "get_object");
        assert_eq!(value["args"][0]["value"], "main");
    }

    #[test]
    fn units_dump_fields_and_functions() {
        let table = fixture::table();
        let mut unit = Unit::new("demo");
        let init = unit.body_mut().add(node::Literal::Int(1)).erase();
        unit.add_field(Field {
            name: "counter".into(),
            ty: Ty::class(table.builtins().int),
            init,
        });

        let doc = dump(&table, &unit);
        assert_eq!(doc["unit"], "demo");
        assert_eq!(doc["fields"][0]["name"], "counter");
        assert_eq!(doc["fields"][0]["type"], "kotlin/Int");
        assert_eq!(doc["functions"], json!([]));
    }
}
