//! Shared demo table used by tests, the probe pass demo and the CLI.
//!
//! The table seeds the builtin classes with a handful of members plus a small
//! `demo`/`trace` namespace exercising every resolution mode: overloads,
//! defaulted parameters, generics, extensions, companion fallback scopes,
//! platform types and singleton objects.

use crate::{
    def::Param,
    table::{FunSpec, SymbolTable, TableBuilder},
    ty::Ty,
};

pub fn table() -> SymbolTable {
    let mut b = TableBuilder::new();

    let int = Ty::class(b.builtins().int);
    let long = Ty::class(b.builtins().long);
    let unit = Ty::class(b.builtins().unit);
    let boolean = Ty::class(b.builtins().boolean);
    let string = Ty::class(b.builtins().string);
    let any = Ty::class(b.builtins().any);

    let sb_id = b.table().class_by_path("kotlin/text/StringBuilder").unwrap();
    let sb = Ty::class(sb_id);
    b.add_member(sb_id, FunSpec::new("append", sb.clone()).param("value", int.clone()));
    b.add_member(
        sb_id,
        FunSpec::new("append", sb.clone()).param("value", string.clone()),
    );
    b.add_member(
        sb_id,
        FunSpec::new("append", sb.clone()).param("value", any.clone().as_nullable()),
    );
    b.add_member(sb_id, FunSpec::new("toString", string.clone()));
    b.add_ctor(sb_id, Vec::new());

    let java_string = Ty::class(b.table().class_by_path("java/lang/String").unwrap());
    let path = Ty::class(b.table().class_by_path("java/nio/file/Path").unwrap());

    // Probe targets: singleton objects whose members dispatch on the object.
    let trace = b.add_object("trace/Trace");
    b.add_member(trace, FunSpec::new("enter", unit.clone()).param("site", string.clone()));
    b.add_member(
        trace,
        FunSpec::new("exit", unit.clone())
            .param("site", string.clone())
            .param("elapsed", long.clone()),
    );
    let clock = b.add_object("trace/Clock");
    b.add_member(clock, FunSpec::new("now", long.clone()));

    // A plain class with constructors, an overload with a default and a
    // member property.
    let greeter = b.add_class("demo/Greeter", &[]);
    b.add_ctor(greeter, vec![Param::new("name", string.clone())]);
    b.add_ctor(
        greeter,
        vec![
            Param::new("name", string.clone()),
            Param::new("loud", boolean.clone()),
        ],
    );
    b.add_member(greeter, FunSpec::new("greet", string.clone()).param("who", string.clone()));
    b.add_member(
        greeter,
        FunSpec::new("shout", string.clone())
            .param("who", string.clone())
            .defaulted("punctuation", string.clone()),
    );
    b.add_member_prop(greeter, "name", string.clone());

    // Companion fallback scope.
    let service = b.add_class("demo/Service", &[]);
    let companion = b.add_object("demo/Service.Companion");
    b.set_fallback(service, companion);
    b.add_member(service, FunSpec::new("run", unit.clone()));
    b.add_member(companion, FunSpec::new("create", Ty::class(service)));

    // Overload pair distinguished only by a trailing parameter; prefix
    // queries over these stay ambiguous.
    b.add_top_level("demo", FunSpec::new("sink", unit.clone()).param("target", path.clone()));
    b.add_top_level(
        "demo",
        FunSpec::new("sink", unit.clone())
            .param("target", path.clone())
            .param("append", boolean.clone()),
    );

    // Overload pair whose Any-erased parameter counts differ; only the
    // opt-in tie-break mode can pick between them.
    b.add_top_level(
        "demo",
        FunSpec::new("put", unit.clone())
            .param("key", string.clone())
            .param("value", any.clone().as_nullable()),
    );
    b.add_top_level(
        "demo",
        FunSpec::new("put", unit.clone())
            .param("key", string.clone())
            .param("value", int.clone()),
    );

    // Identical shape after nullability erasure.
    let dup = b.add_class("demo/Dup", &[]);
    b.add_member(dup, FunSpec::new("echo", string.clone()).param("value", string.clone()));
    b.add_member(
        dup,
        FunSpec::new("echo", string.clone()).param("value", string.clone().as_nullable()),
    );

    // Foreign-interop declarations: one with declared nullability, one whose
    // nullability is unknown (platform).
    let interop = b.add_class("demo/Interop", &[]);
    b.add_member(
        interop,
        FunSpec::new("trim", string.clone()).param("value", java_string.clone()),
    );
    b.add_member(
        interop,
        FunSpec::new("format", string.clone()).param("value", java_string.clone().as_platform()),
    );

    // Generic owner with a type-parameter-bound member.
    let boxed = b.add_class("demo/Box", &["T"]);
    b.add_member(boxed, FunSpec::new("put", unit.clone()).param("value", Ty::param("T")));
    b.add_member(boxed, FunSpec::new("get", Ty::param("T")));

    // Extensions: a free one and a member one (two receivers).
    b.add_top_level(
        "demo",
        FunSpec::new("emphasize", string.clone())
            .extension(string.clone())
            .param("times", int.clone()),
    );
    let decorator = b.add_class("demo/Decorator", &[]);
    b.add_member(
        decorator,
        FunSpec::new("wrap", string.clone())
            .extension(string.clone())
            .param("prefix", string.clone()),
    );

    b.add_top_level("demo", FunSpec::new("banner", string.clone()).param("text", string.clone()));
    b.add_top_prop("demo", "VERSION", int);

    b.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_registers_demo_namespace() {
        let table = table();
        assert!(table.class_by_path("demo/Greeter").is_some());
        assert!(table.class_by_path("trace/Trace").is_some());
        assert_eq!(table.top_level_functions("demo/sink").len(), 2);
        assert!(table.top_level_property("demo/VERSION").is_some());
    }

    #[test]
    fn service_companion_is_the_fallback_scope() {
        let table = table();
        let service = table.class_by_path("demo/Service").unwrap();
        let companion = table.class_by_path("demo/Service.Companion").unwrap();
        assert_eq!(table.class(service).fallback, Some(companion));
        assert!(table.class(companion).is_object);
    }
}
