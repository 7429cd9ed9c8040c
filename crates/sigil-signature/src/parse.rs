use chumsky::prelude::*;

use crate::sig::{ParamSpec, TypeToken};

pub(crate) type Extra<'src> = extra::Err<Rich<'src, char>>;

/// A type token: a path, an optional `<...>` argument list (recursive, so
/// commas inside nested brackets never split the outer list) and an optional
/// `?` suffix.
pub(crate) fn type_token<'src>() -> impl Parser<'src, &'src str, TypeToken, Extra<'src>> + Clone {
    recursive(|ty| {
        let base = any()
            .filter(|c: &char| c.is_alphanumeric() || matches!(c, '_' | '/' | '.'))
            .repeated()
            .at_least(1)
            .to_slice();

        let args = ty
            .separated_by(just(',').padded())
            .at_least(1)
            .collect::<Vec<_>>()
            .delimited_by(just('<').padded(), just('>'));

        base.then(args.or_not())
            .then(just('?').or_not())
            .map(|((base, args), nullable): ((&str, _), _)| TypeToken {
                base: base.to_owned(),
                args: args.unwrap_or_default(),
                nullable: nullable.is_some(),
            })
    })
}

fn param_spec<'src>() -> impl Parser<'src, &'src str, ParamSpec, Extra<'src>> + Clone {
    choice((
        just('*').to(ParamSpec::Rest),
        type_token().map(|token| {
            if token.base == "G" && token.args.is_empty() && !token.nullable {
                ParamSpec::Generic
            } else {
                ParamSpec::Concrete(token)
            }
        }),
    ))
}

/// Raw split of a signature: the qualifier text before the parameter list and
/// the parsed parameter specs, if a list is present. The qualifier is
/// decomposed into namespace/owner/member afterwards, outside the grammar.
pub(crate) fn signature<'src>(
) -> impl Parser<'src, &'src str, (&'src str, Option<Vec<ParamSpec>>), Extra<'src>> {
    let qualifier = any()
        .filter(|c: &char| *c != '(')
        .repeated()
        .at_least(1)
        .to_slice();

    let params = param_spec()
        .padded()
        .separated_by(just(','))
        .collect::<Vec<_>>()
        .delimited_by(just('('), just(')'));

    qualifier.then(params.or_not()).then_ignore(end())
}
