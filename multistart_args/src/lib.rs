//! `multistart_args` is the command line parser behind the `multistart` launcher.
//!
//! Although other crates provide command line parser functionality, this tool needs a
//! very particular dialect: a fixed schema of `-modifier value` pairs, matched
//! case-insensitively, with textual defaults coerced through the same engine as user
//! input. Rather than bend a general-purpose parser around that dialect, we declare the
//! schema explicitly and drive everything from it. Specifically:
//! * *Schema-driven parsing*:
//! Every configurable option is a [`FieldDescriptor`] (modifier, value kind, textual
//! default, description). The descriptor table is the single source of truth for
//! default seeding, token matching, coercion, and the usage message.
//! * *Textual defaults*:
//! Defaults are expressed as text and pass through the exact same coercion rules as
//! command line input. A default that does not coerce is a defect in the schema itself,
//! and is rejected when the [`ParamSet`] is constructed — never at parse time.
//! * *Variable-arity booleans*:
//! A boolean modifier may stand alone (`-flag`, meaning `true`) or carry an explicit
//! literal (`-flag false`). Any following token that is not a strict boolean literal is
//! left for the next matching round.
//! * *Usage text as the failure payload*:
//! A parse failure carries the full rendered usage block. The caller prints it and
//! exits; there is nothing else to report.
//!
//! # Usage
//! ```
//! use multistart_args::{Coercer, FieldDescriptor, ParamSet, Schema, ValueKind};
//!
//! let schema = Schema::builder("multistart")
//!     .field(FieldDescriptor::new("-f", ValueKind::Str).help("Command to be started."))
//!     .field(
//!         FieldDescriptor::new("-c", ValueKind::Int)
//!             .default("1")
//!             .help("Number of commands to be executed."),
//!     )
//!     .build()
//!     .expect("invalid schema");
//! let coercer = Coercer::new("/opt/multistart");
//! let params = ParamSet::new(&schema, &coercer)
//!     .expect("invalid schema default")
//!     .load(&["-f", "notepad.exe"])
//!     .expect("invalid command line");
//!
//! assert_eq!(params.str_value("-f"), Some("notepad.exe"));
//! assert_eq!(params.int_value("-c"), Some(1));
//! ```
//!
//! # Value kinds
//! Each field declares a [`ValueKind`], which selects the coercion rule applied to its
//! raw text. The kinds and their quirks:
//!
//! ```console
//! Kind         | Rule
//! -------------------------------------------------------------------------
//! Str          | verbatim; '[EXEPATH]' is replaced by the injected directory
//! Int          | standard integer parsing
//! Float        | standard float parsing; empty text means 0.0
//! Bool         | strict 'true'/'false' literal; empty text means true
//! DateTime     | calendar text (ISO date or date-time)
//! Enumeration  | case-insensitive member match; no match leaves the slot
//! StrList      | split on ',' with no trimming; empty text means []
//! ```
//!
//! A field may additionally be declared nullable, in which case the reserved literal
//! `NULL` (case-sensitive) coerces to the explicit [`Value::Absent`] marker. Supplying
//! `NULL` to a non-nullable field is a coercion error.
//!
//! # Non-goals
//! This crate targets exactly the dialect above. There are no subcommands, no
//! positional arguments, no `--long=value` syntax, and no repeated/multi-valued flags
//! beyond the comma-separated list kind.
#![deny(missing_docs)]
mod coerce;
mod constant;
mod model;
mod parser;
mod schema;

pub use coerce::{Coercer, Coercion, CoercionError};
pub use model::{Value, ValueKind};
pub use parser::{ParamSet, ParseError};
pub use schema::{FieldDescriptor, Schema, SchemaBuilder, SchemaError};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
