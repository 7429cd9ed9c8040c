use std::fmt;

use chumsky::Parser;

use crate::{error::SignatureError, parse};

/// One parsed parameter position of a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamSpec {
    /// A concrete type token that must match the declared parameter.
    Concrete(TypeToken),
    /// `G`: the position must exist but its type is unconstrained.
    Generic,
    /// `*`: all remaining parameters are unconstrained. Final position only.
    Rest,
}

/// A textual type reference: base path, generic arguments, nullability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeToken {
    pub base: String,
    pub args: Vec<TypeToken>,
    pub nullable: bool,
}

impl TypeToken {
    /// Parses a standalone type token, e.g. `Pair<Int,Pair<Int,Int>>?`.
    pub fn parse(input: &str) -> Result<Self, SignatureError> {
        use chumsky::prelude::end;

        parse::type_token()
            .then_ignore(end())
            .parse(input.trim())
            .into_result()
            .map_err(|mut errors| SignatureError::from_rich(input, errors.remove(0)))
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base)?;
        if !self.args.is_empty() {
            write!(f, "<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{arg}")?;
            }
            write!(f, ">")?;
        }
        if self.nullable {
            write!(f, "?")?;
        }
        Ok(())
    }
}

/// A decomposed signature string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Slash-delimited namespace path; empty when the signature had no `/`.
    pub namespace: Vec<String>,
    /// Dot-delimited nested-type path; empty for free functions.
    pub owners: Vec<String>,
    /// Simple name of the target member.
    pub member: String,
    /// `None` when the signature carried no parameter list at all.
    pub params: Option<Vec<ParamSpec>>,
}

impl Signature {
    pub fn parse(input: &str) -> Result<Self, SignatureError> {
        let (qualifier, params) = parse::signature()
            .parse(input)
            .into_result()
            .map_err(|mut errors| SignatureError::from_rich(input, errors.remove(0)))?;

        if let Some(params) = &params {
            let rests = params.iter().filter(|p| matches!(p, ParamSpec::Rest)).count();
            let last_is_rest = matches!(params.last(), Some(ParamSpec::Rest));
            if rests > 1 || (rests == 1 && !last_is_rest) {
                return Err(SignatureError::MisplacedWildcard {
                    signature: input.to_owned(),
                });
            }
        }

        let qualifier = qualifier.trim();
        let bad_segment = || SignatureError::BadSegment {
            signature: input.to_owned(),
        };

        let (namespace, owners, member) = match qualifier.rsplit_once('/') {
            Some((namespace, tail)) => {
                let namespace = namespace
                    .split('/')
                    .map(str::to_owned)
                    .collect::<Vec<_>>();
                let mut segments = tail.split('.').map(str::to_owned).collect::<Vec<_>>();
                let member = segments.pop().ok_or_else(bad_segment)?;
                (namespace, segments, member)
            }
            // No namespace separator: `.` does not split, the whole
            // qualifier is a simple name.
            None => (Vec::new(), Vec::new(), qualifier.to_owned()),
        };

        if !is_ident(&member)
            || namespace.iter().any(|s| !is_ident(s))
            || owners.iter().any(|s| !is_ident(s))
        {
            return Err(bad_segment());
        }

        Ok(Self {
            namespace,
            owners,
            member,
            params,
        })
    }

    pub fn has_namespace(&self) -> bool {
        !self.namespace.is_empty()
    }

    /// Full path of the owning class, e.g. `pkg/Outer.Inner`, if the
    /// signature names a member of a type.
    pub fn owner_path(&self) -> Option<String> {
        if self.owners.is_empty() {
            return None;
        }
        let mut path = self.namespace.join("/");
        if !path.is_empty() {
            path.push('/');
        }
        path.push_str(&self.owners.join("."));
        Some(path)
    }

    /// Qualified name for a top-level lookup, e.g. `pkg/member`.
    pub fn qualified_member(&self) -> String {
        if self.namespace.is_empty() {
            return self.member.clone();
        }
        format!("{}/{}", self.namespace.join("/"), self.member)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.namespace {
            write!(f, "{segment}/")?;
        }
        for owner in &self.owners {
            write!(f, "{owner}.")?;
        }
        write!(f, "{}", self.member)?;
        if let Some(params) = &self.params {
            write!(f, "(")?;
            for (i, param) in params.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                match param {
                    ParamSpec::Concrete(token) => write!(f, "{token}")?,
                    ParamSpec::Generic => write!(f, "G")?,
                    ParamSpec::Rest => write!(f, "*")?,
                }
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

fn is_ident(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}
