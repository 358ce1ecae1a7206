use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::constant::*;
use crate::model::{Value, ValueKind};
use crate::schema::FieldDescriptor;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Failure to interpret a raw text token under a field's declared kind.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoercionError {
    /// The token does not parse under the kind's rules.
    #[error("cannot convert '{token}' to {kind}.")]
    InvalidToken {
        /// The offending raw text.
        token: String,
        /// The kind it was coerced under.
        kind: ValueKind,
    },

    /// The reserved `NULL` literal was supplied for a non-nullable field.
    #[error("value for '{modifier}' may not be null.")]
    NotNullable {
        /// The modifier of the non-nullable field.
        modifier: &'static str,
    },
}

/// Outcome of a coercion that did not fail outright.
///
/// `Skipped` is the named soft-failure: an enumeration literal that matches no member
/// coerces to nothing at all, leaving the target slot at its previous value.
#[derive(Debug, PartialEq)]
pub enum Coercion {
    /// The raw text coerced to a value.
    Set(Value),
    /// The raw text matched nothing; the target slot is to be left untouched.
    Skipped,
}

/// The value coercion engine.
///
/// Stateless apart from the resolved executable directory, which is injected at
/// construction so the `[EXEPATH]` substitution needs no global lookup (and so tests
/// can supply a fixed path).
#[derive(Debug)]
pub struct Coercer {
    exe_dir: String,
}

impl Coercer {
    /// Create a coercer substituting `exe_dir` for the executable-directory token.
    pub fn new(exe_dir: impl Into<String>) -> Self {
        Self {
            exe_dir: exe_dir.into(),
        }
    }

    /// Convert `raw` into a typed value under `field`'s declared kind.
    pub fn coerce(
        &self,
        field: &FieldDescriptor,
        raw: &str,
    ) -> Result<Coercion, CoercionError> {
        if raw == NULL_TOKEN {
            if field.is_nullable() {
                return Ok(Coercion::Set(Value::Absent));
            }

            return Err(CoercionError::NotNullable {
                modifier: field.modifier(),
            });
        }

        let invalid = || CoercionError::InvalidToken {
            token: raw.to_string(),
            kind: field.kind(),
        };

        let value = match field.kind() {
            ValueKind::Str => Value::Str(raw.replace(EXE_DIR_TOKEN, &self.exe_dir)),
            ValueKind::Int => Value::Int(raw.parse().map_err(|_| invalid())?),
            ValueKind::Float if raw.is_empty() => Value::Float(0.0),
            ValueKind::Float => Value::Float(raw.parse().map_err(|_| invalid())?),
            ValueKind::Bool if raw.is_empty() => Value::Bool(true),
            ValueKind::Bool => Value::Bool(parse_bool_literal(raw).ok_or_else(invalid)?),
            ValueKind::DateTime => Value::DateTime(parse_date_time(raw).ok_or_else(invalid)?),
            ValueKind::Enumeration(members) => {
                match members
                    .iter()
                    .copied()
                    .find(|member| member.eq_ignore_ascii_case(raw))
                {
                    Some(member) => Value::Enum(member),
                    None => {
                        #[cfg(feature = "tracing_debug")]
                        {
                            debug!("'{raw}' matches no member of {members:?}; skipping.");
                        }

                        return Ok(Coercion::Skipped);
                    }
                }
            }
            ValueKind::StrList if raw.is_empty() => Value::List(Vec::default()),
            ValueKind::StrList => Value::List(raw.split(',').map(str::to_string).collect()),
        };

        Ok(Coercion::Set(value))
    }
}

/// Parse a strict boolean literal: `true` or `false`, case-insensitively, with
/// surrounding whitespace tolerated. Anything else is no literal at all.
pub(crate) fn parse_bool_literal(token: &str) -> Option<bool> {
    let token = token.trim();

    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_date_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
