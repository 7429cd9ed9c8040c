//! End-to-end resolution behavior over the demo table.

use sigil::{MatchOptions, ResolveError, Sigil};
use sigil_symtab::{fixture, Ty};

fn lenient() -> MatchOptions {
    MatchOptions {
        ignore_nullability: true,
        ..Default::default()
    }
}

#[test]
fn signatures_round_trip_through_parse_and_resolve() {
    let table = fixture::table();
    let sigil = Sigil::new(&table);

    let id = sigil
        .resolve_function("kotlin/text/StringBuilder.append(Int)", None)
        .unwrap();
    let def = table.function(id);
    assert_eq!(def.name, "append");
    assert_eq!(def.params.len(), 1);

    // The same member under a keyword-spelled parameter type.
    let again = sigil
        .resolve_function("kotlin/text/StringBuilder.append(int)", None)
        .unwrap();
    assert_eq!(id, again);
}

#[test]
fn ambiguous_signatures_are_rejected_not_guessed() {
    let table = fixture::table();
    let sigil = Sigil::new(&table).with_options(lenient());

    // `echo(String)` vs `echo(String?)` collapse under nullability erasure.
    let err = sigil
        .resolve_function("demo/Dup.echo(string)", None)
        .unwrap_err();
    assert!(matches!(err, ResolveError::Ambiguous { count: 2, .. }));

    // The or-none variant propagates ambiguity instead of answering None.
    assert!(sigil
        .resolve_function_opt("demo/Dup.echo(string)", None)
        .is_err());
}

#[test]
fn omitted_defaulted_parameters_still_match() {
    let table = fixture::table();
    let sigil = Sigil::new(&table);

    // `shout(who, punctuation = "!")` found by its one required parameter.
    let id = sigil
        .resolve_function("demo/Greeter.shout(String)", None)
        .unwrap();
    let def = table.function(id);
    assert_eq!(def.params.len(), 2);
    assert!(def.params[1].has_default);
}

#[test]
fn wildcard_queries_match_prefixes_only_unambiguously() {
    let table = fixture::table();
    let sigil = Sigil::new(&table);

    // Both `sink` overloads share the `Path` prefix.
    assert!(matches!(
        sigil.resolve_function("demo/sink(Path,*)", None),
        Err(ResolveError::Ambiguous { count: 2, .. })
    ));
    assert!(matches!(
        sigil.resolve_function("demo/sink(*)", None),
        Err(ResolveError::Ambiguous { .. })
    ));

    // Fully spelled out, each overload is reachable.
    assert!(sigil.resolve_function("demo/sink(Path)", None).is_ok());
    assert!(sigil
        .resolve_function("demo/sink(Path,Boolean)", None)
        .is_ok());
}

#[test]
fn the_tie_break_is_opt_in_and_prefers_concrete_overloads() {
    let table = fixture::table();

    let strict = Sigil::new(&table);
    assert!(matches!(
        strict.resolve_function("demo/put(String,*)", None),
        Err(ResolveError::Ambiguous { .. })
    ));

    let tie_break = Sigil::new(&table).with_options(MatchOptions {
        prefer_fewest_erased: true,
        ..Default::default()
    });
    let picked = tie_break.resolve_function("demo/put(String,*)", None).unwrap();
    assert_eq!(
        table.function(picked).params[1].ty.class_id(),
        Some(table.builtins().int)
    );
}

#[test]
fn platform_parameters_match_either_nullability_spelling() {
    let table = fixture::table();
    let sigil = Sigil::new(&table);

    // `format` declares a platform-typed parameter: both forms match.
    assert!(sigil
        .resolve_function("demo/Interop.format(javastring)", None)
        .is_ok());
    assert!(sigil
        .resolve_function("demo/Interop.format(javastring?)", None)
        .is_ok());

    // `trim` declares explicit non-null: only the matching form works...
    assert!(sigil
        .resolve_function("demo/Interop.trim(javastring)", None)
        .is_ok());
    assert!(sigil
        .resolve_function("demo/Interop.trim(javastring?)", None)
        .is_err());

    // ...unless nullability comparison is switched off entirely.
    let lenient = Sigil::new(&table).with_options(lenient());
    assert!(lenient
        .resolve_function("demo/Interop.trim(javastring?)", None)
        .is_ok());
}

#[test]
fn extension_receivers_restrict_the_candidate_set() {
    let table = fixture::table();
    let sigil = Sigil::new(&table);
    let string = Ty::class(table.builtins().string);
    let int = Ty::class(table.builtins().int);

    assert!(sigil
        .resolve_function("demo/emphasize(Int)", Some(&string))
        .is_ok());
    assert!(matches!(
        sigil.resolve_function("demo/emphasize(Int)", Some(&int)),
        Err(ResolveError::NotFound { .. })
    ));

    // Without a receiver constraint the extension is found by name alone.
    assert!(sigil.resolve_function("demo/emphasize(Int)", None).is_ok());
}

#[test]
fn generic_placeholders_and_arguments_round_trip() {
    let table = fixture::table();
    let sigil = Sigil::new(&table);

    // `G` only matches a type-parameter-bound declared position.
    assert!(sigil.resolve_function("demo/Box.put(G)", None).is_ok());
    assert!(sigil
        .resolve_function("demo/Greeter.greet(G)", None)
        .is_err());

    // A nested generic token equals the manually applied form.
    let b = table.builtins();
    let resolved = sigil.resolve_type("Pair<Int,Pair<Int,Int>>").unwrap();
    let int = Ty::class(b.int);
    let inner = table
        .apply_args(Ty::class(b.pair), vec![int.clone(), int.clone()])
        .unwrap();
    let manual = table.apply_args(Ty::class(b.pair), vec![int, inner]).unwrap();
    assert_eq!(resolved, manual);

    // Wrong generic arity is a hard error.
    assert!(matches!(
        sigil.resolve_type("Pair<Int>"),
        Err(ResolveError::GenericArity {
            expected: 2,
            found: 1,
            ..
        })
    ));
}

#[test]
fn classes_constructors_and_properties_resolve() {
    let table = fixture::table();
    let sigil = Sigil::new(&table);

    let greeter = sigil.resolve_class("demo/Greeter").unwrap();
    assert_eq!(table.class(greeter).path, "demo/Greeter");
    assert_eq!(sigil.resolve_class_opt("demo/Nope").unwrap(), None);

    let one = sigil.resolve_constructor("demo/Greeter(String)").unwrap();
    let two = sigil
        .resolve_constructor("demo/Greeter(String,Boolean)")
        .unwrap();
    assert_ne!(one, two);
    assert!(sigil
        .resolve_constructor_opt("demo/Greeter(Int)")
        .unwrap()
        .is_none());

    assert!(sigil.resolve_property("demo/Greeter.name").is_ok());
    assert!(sigil.resolve_property("demo/VERSION").is_ok());
    assert_eq!(sigil.resolve_property_opt("demo/MISSING").unwrap(), None);
}

#[test]
fn companion_scopes_are_searched_when_the_class_has_no_match() {
    let table = fixture::table();
    let sigil = Sigil::new(&table);

    // `run` lives on the class itself, `create` only on the companion.
    assert!(sigil.resolve_function("demo/Service.run()", None).is_ok());
    let create = sigil.resolve_function("demo/Service.create()", None).unwrap();
    let companion = table.class_by_path("demo/Service.Companion").unwrap();
    assert_eq!(table.function(create).owner, Some(companion));
}

#[test]
fn bare_names_need_a_namespace_unless_they_are_keywords() {
    let table = fixture::table();
    let sigil = Sigil::new(&table);

    assert!(sigil.resolve_class("stringbuilder").is_ok());
    assert!(matches!(
        sigil.resolve_class("Greeter"),
        Err(ResolveError::MissingNamespace { .. })
    ));
    assert!(matches!(
        sigil.resolve_function("banner(String)", None),
        Err(ResolveError::MissingNamespace { .. })
    ));
}
