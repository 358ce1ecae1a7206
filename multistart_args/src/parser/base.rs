use thiserror::Error;

use crate::coerce::{parse_bool_literal, Coercer, Coercion};
use crate::model::{Value, ValueKind};
use crate::parser::Printer;
use crate::schema::{Schema, SchemaError};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A failed load.
///
/// The payload is the fully rendered usage block (headline, synopsis, and one line per
/// field); the caller is expected to print it and exit without running anything else.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ParseError(pub(crate) String);

/// The schema-shaped record populated during parsing.
///
/// Constructed with every slot seeded from its descriptor's textual default, then
/// mutated slot by slot as matching tokens are consumed by [`ParamSet::load`]. `load`
/// consumes the set and returns it, so a failed parse leaves no partially-assigned
/// set behind.
#[derive(Debug)]
pub struct ParamSet<'p> {
    schema: &'p Schema,
    coercer: &'p Coercer,
    slots: Vec<Value>,
}

impl<'p> ParamSet<'p> {
    /// Create a parameter set with every slot seeded from its field's default.
    ///
    /// Seeding walks the schema in declaration order and routes each `default_text`
    /// through the coercion engine. A default that fails to coerce is a defect in the
    /// schema, reported as a [`SchemaError`].
    pub fn new(schema: &'p Schema, coercer: &'p Coercer) -> Result<Self, SchemaError> {
        let mut slots = vec![Value::Absent; schema.fields().len()];

        for (index, field) in schema.fields().iter().enumerate() {
            match coercer.coerce(field, field.default_text()) {
                Ok(Coercion::Set(value)) => slots[index] = value,
                // An enumeration default that matches no member seeds nothing.
                Ok(Coercion::Skipped) => {}
                Err(error) => {
                    return Err(SchemaError(format!(
                        "invalid default for '{}': {error}",
                        field.modifier()
                    )))
                }
            }
        }

        Ok(Self {
            schema,
            coercer,
            slots,
        })
    }

    /// Run the parser loop over the raw argv tokens.
    ///
    /// A single left-to-right pass. Each token is matched case-insensitively against
    /// the schema's modifiers; the following token is consumed as the field's raw
    /// value and coerced. Boolean fields are the exception: a following strict
    /// `true`/`false` literal is consumed as the value, otherwise the modifier alone
    /// means `true` and the next token is left for the next round.
    ///
    /// Later occurrences of a modifier overwrite earlier ones.
    ///
    /// Any unknown modifier or coercion failure aborts the whole load with a
    /// [`ParseError`] carrying the usage block.
    pub fn load(mut self, tokens: &[&str]) -> Result<Self, ParseError> {
        let mut index = 0;

        while index < tokens.len() {
            let candidate = tokens[index];
            let field_index = self.schema.lookup(candidate).ok_or_else(|| {
                Printer::terminal(self.schema)
                    .usage_error(format!("Invalid modifier '{candidate}'"))
            })?;
            let field = &self.schema.fields()[field_index];

            if let ValueKind::Bool = field.kind() {
                match tokens.get(index + 1).and_then(|token| parse_bool_literal(token)) {
                    Some(literal) => {
                        self.slots[field_index] = Value::Bool(literal);
                        index += 2;
                    }
                    None => {
                        self.slots[field_index] = Value::Bool(true);
                        index += 1;
                    }
                }

                continue;
            }

            index += 1;

            match tokens.get(index) {
                Some(raw) => match self.coercer.coerce(field, raw) {
                    Ok(Coercion::Set(value)) => self.slots[field_index] = value,
                    // Unmatched enumeration literal: the slot keeps its prior value.
                    Ok(Coercion::Skipped) => {}
                    Err(error) => {
                        return Err(
                            Printer::terminal(self.schema).usage_error(error.to_string())
                        )
                    }
                },
                None => {
                    // A trailing modifier with no following value assigns nothing.
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("modifier '{candidate}' has no following value; ignoring.");
                    }
                }
            }

            index += 1;
        }

        Ok(self)
    }

    /// The slot for `modifier`, matched case-insensitively.
    pub fn value(&self, modifier: &str) -> Option<&Value> {
        self.schema
            .lookup(modifier)
            .map(|index| &self.slots[index])
    }

    /// The string slot for `modifier`, if it holds a string.
    pub fn str_value(&self, modifier: &str) -> Option<&str> {
        self.value(modifier).and_then(Value::as_str)
    }

    /// The integer slot for `modifier`, if it holds an integer.
    pub fn int_value(&self, modifier: &str) -> Option<i64> {
        self.value(modifier).and_then(Value::as_int)
    }

    /// The float slot for `modifier`, if it holds a float.
    pub fn float_value(&self, modifier: &str) -> Option<f64> {
        self.value(modifier).and_then(Value::as_float)
    }

    /// The boolean slot for `modifier`, if it holds a boolean.
    pub fn bool_value(&self, modifier: &str) -> Option<bool> {
        self.value(modifier).and_then(Value::as_bool)
    }

    /// The date-time slot for `modifier`, if it holds a date-time.
    pub fn date_time_value(&self, modifier: &str) -> Option<chrono::NaiveDateTime> {
        self.value(modifier).and_then(Value::as_date_time)
    }

    /// The selected member name for `modifier`, if it holds an enumeration value.
    pub fn enum_value(&self, modifier: &str) -> Option<&'static str> {
        self.value(modifier).and_then(Value::as_enum)
    }

    /// The list slot for `modifier`, if it holds a list.
    pub fn list_value(&self, modifier: &str) -> Option<&[String]> {
        self.value(modifier).and_then(Value::as_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescriptor;
    use crate::test::assert_contains;
    use rstest::rstest;

    const MODES: &[&str] = &["Grid", "Stack"];

    fn launcher_schema() -> Schema {
        Schema::builder("multistart")
            .field(FieldDescriptor::new("-f", ValueKind::Str).help("Command to be started."))
            .field(
                FieldDescriptor::new("-p", ValueKind::Str)
                    .default("")
                    .help("Command parameters."),
            )
            .field(
                FieldDescriptor::new("-c", ValueKind::Int)
                    .default("1")
                    .help("Number of commands to be executed."),
            )
            .field(
                FieldDescriptor::new("-s", ValueKind::Int)
                    .default("-1")
                    .help("Screen to display processes."),
            )
            .build()
            .unwrap()
    }

    fn coercer() -> Coercer {
        Coercer::new("/opt/multistart")
    }

    #[test]
    fn seed_defaults() {
        // Setup
        let schema = launcher_schema();
        let coercer = coercer();

        // Execute
        let params = ParamSet::new(&schema, &coercer).unwrap();

        // Verify
        assert_eq!(params.str_value("-f"), Some(""));
        assert_eq!(params.str_value("-p"), Some(""));
        assert_eq!(params.int_value("-c"), Some(1));
        assert_eq!(params.int_value("-s"), Some(-1));
    }

    #[test]
    fn seed_defaults_exe_dir() {
        // Setup
        let schema = Schema::builder("program")
            .field(FieldDescriptor::new("-o", ValueKind::Str).default("[EXEPATH]/cases"))
            .build()
            .unwrap();
        let coercer = coercer();

        // Execute
        let params = ParamSet::new(&schema, &coercer).unwrap();

        // Verify
        assert_eq!(params.str_value("-o"), Some("/opt/multistart/cases"));
    }

    #[test]
    fn seed_invalid_default() {
        // Setup
        let schema = Schema::builder("program")
            .field(FieldDescriptor::new("-c", ValueKind::Int).default("abc"))
            .build()
            .unwrap();
        let coercer = coercer();

        // Execute
        let result = ParamSet::new(&schema, &coercer);

        // Verify
        let error = result.err().unwrap();
        assert_contains!(error.to_string(), "invalid default for '-c'");
    }

    #[test]
    fn seed_missing_default_for_int() {
        // An Int field with no declared default has the empty default text, which does
        // not coerce. That is a schema defect, caught at construction.
        let schema = Schema::builder("program")
            .field(FieldDescriptor::new("-c", ValueKind::Int))
            .build()
            .unwrap();
        let coercer = coercer();

        let result = ParamSet::new(&schema, &coercer);

        assert_matches!(result, Err(SchemaError(_)));
    }

    #[test]
    fn seed_null_default() {
        let schema = Schema::builder("program")
            .field(
                FieldDescriptor::new("-d", ValueKind::DateTime)
                    .nullable()
                    .default("NULL"),
            )
            .build()
            .unwrap();
        let coercer = coercer();

        let params = ParamSet::new(&schema, &coercer).unwrap();

        assert!(params.value("-d").unwrap().is_absent());
    }

    #[test]
    fn load_empty() {
        // Setup
        let schema = launcher_schema();
        let coercer = coercer();

        // Execute
        let params = ParamSet::new(&schema, &coercer).unwrap().load(&[]).unwrap();

        // Verify: all slots still hold their coerced defaults.
        assert_eq!(params.str_value("-f"), Some(""));
        assert_eq!(params.str_value("-p"), Some(""));
        assert_eq!(params.int_value("-c"), Some(1));
        assert_eq!(params.int_value("-s"), Some(-1));
    }

    #[test]
    fn load_launcher_scenario() {
        // Setup
        let schema = launcher_schema();
        let coercer = coercer();

        // Execute
        let params = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-f", "notepad.exe", "-c", "3", "-s", "0"])
            .unwrap();

        // Verify
        assert_eq!(params.str_value("-f"), Some("notepad.exe"));
        assert_eq!(params.str_value("-p"), Some(""));
        assert_eq!(params.int_value("-c"), Some(3));
        assert_eq!(params.int_value("-s"), Some(0));
    }

    #[test]
    fn load_count_only() {
        // Setup
        let schema = launcher_schema();
        let coercer = coercer();

        // Execute
        let params = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-c", "2"])
            .unwrap();

        // Verify: the command stays at its default; that is the caller's problem.
        assert_eq!(params.str_value("-f"), Some(""));
        assert_eq!(params.int_value("-c"), Some(2));
    }

    #[rstest]
    #[case(vec!["-F", "notepad.exe"])]
    #[case(vec!["-f", "notepad.exe"])]
    fn load_case_insensitive_modifier(#[case] tokens: Vec<&str>) {
        let schema = launcher_schema();
        let coercer = coercer();

        let params = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(tokens.as_slice())
            .unwrap();

        assert_eq!(params.str_value("-f"), Some("notepad.exe"));
    }

    #[test]
    fn load_last_write_wins() {
        let schema = launcher_schema();
        let coercer = coercer();

        let params = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-c", "1", "-c", "5", "-C", "7"])
            .unwrap();

        assert_eq!(params.int_value("-c"), Some(7));
    }

    #[test]
    fn load_unknown_modifier() {
        // Setup
        let schema = launcher_schema();
        let coercer = coercer();

        // Execute
        let result = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-x", "1"]);

        // Verify: the payload carries the headline and every declared modifier with
        // its description.
        let message = result.err().unwrap().to_string();
        assert_contains!(message, "Invalid modifier '-x'");
        assert_contains!(message, "USAGE:");
        assert_contains!(message, "multistart [-modifier] [value]");
        assert_contains!(message, "-f");
        assert_contains!(message, "Command to be started.");
        assert_contains!(message, "-p");
        assert_contains!(message, "Command parameters.");
        assert_contains!(message, "-c");
        assert_contains!(message, "Number of commands to be executed.");
        assert_contains!(message, "-s");
        assert_contains!(message, "Screen to display processes.");
    }

    #[test]
    fn load_coercion_failure() {
        let schema = launcher_schema();
        let coercer = coercer();

        let result = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-c", "abc"]);

        let message = result.err().unwrap().to_string();
        assert_contains!(message, "cannot convert 'abc' to Int");
        assert_contains!(message, "USAGE:");
    }

    fn flag_schema() -> Schema {
        Schema::builder("program")
            .field(
                FieldDescriptor::new("-flag", ValueKind::Bool)
                    .default("false")
                    .help("A flag."),
            )
            .field(FieldDescriptor::new("-c", ValueKind::Int).default("1"))
            .build()
            .unwrap()
    }

    #[test]
    fn load_bool_bare() {
        let schema = flag_schema();
        let coercer = coercer();

        let params = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-flag"])
            .unwrap();

        assert_eq!(params.bool_value("-flag"), Some(true));
    }

    #[rstest]
    #[case(vec!["-flag", "false"], false)]
    #[case(vec!["-flag", "FALSE"], false)]
    #[case(vec!["-flag", "true"], true)]
    fn load_bool_literal(#[case] tokens: Vec<&str>, #[case] expected: bool) {
        let schema = flag_schema();
        let coercer = coercer();

        let params = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(tokens.as_slice())
            .unwrap();

        assert_eq!(params.bool_value("-flag"), Some(expected));
    }

    #[test]
    fn load_bool_followed_by_modifier() {
        // '-c' is not a boolean literal, so the flag reads true and '-c 3' is matched
        // as the next modifier/value pair.
        let schema = flag_schema();
        let coercer = coercer();

        let params = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-flag", "-c", "3"])
            .unwrap();

        assert_eq!(params.bool_value("-flag"), Some(true));
        assert_eq!(params.int_value("-c"), Some(3));
    }

    #[test]
    fn load_bool_followed_by_nonsense() {
        // The flag reads true, and the leftover token is re-matched as a modifier
        // candidate, which fails the load.
        let schema = flag_schema();
        let coercer = coercer();

        let result = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-flag", "nonsense"]);

        let message = result.err().unwrap().to_string();
        assert_contains!(message, "Invalid modifier 'nonsense'");
    }

    #[test]
    fn load_trailing_modifier_without_value() {
        // A trailing valueless modifier assigns nothing and raises nothing.
        let schema = launcher_schema();
        let coercer = coercer();

        let params = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-f", "notepad.exe", "-c"])
            .unwrap();

        assert_eq!(params.str_value("-f"), Some("notepad.exe"));
        assert_eq!(params.int_value("-c"), Some(1));
    }

    #[test]
    fn load_null_for_nullable() {
        let schema = Schema::builder("program")
            .field(
                FieldDescriptor::new("-d", ValueKind::DateTime)
                    .nullable()
                    .default("2024-01-01"),
            )
            .build()
            .unwrap();
        let coercer = coercer();

        let params = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-d", "NULL"])
            .unwrap();

        assert!(params.value("-d").unwrap().is_absent());
    }

    #[test]
    fn load_null_for_non_nullable() {
        let schema = launcher_schema();
        let coercer = coercer();

        let result = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-c", "NULL"]);

        let message = result.err().unwrap().to_string();
        assert_contains!(message, "value for '-c' may not be null");
    }

    #[test]
    fn load_enumeration() {
        let schema = Schema::builder("program")
            .field(
                FieldDescriptor::new("-m", ValueKind::Enumeration(MODES))
                    .default("grid"),
            )
            .build()
            .unwrap();
        let coercer = coercer();

        let params = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-m", "STACK"])
            .unwrap();

        assert_eq!(params.enum_value("-m"), Some("Stack"));
    }

    #[test]
    fn load_enumeration_skipped() {
        // An unmatched literal is a deliberate no-op: the slot keeps its seeded value.
        let schema = Schema::builder("program")
            .field(
                FieldDescriptor::new("-m", ValueKind::Enumeration(MODES))
                    .default("grid"),
            )
            .build()
            .unwrap();
        let coercer = coercer();

        let params = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-m", "spiral"])
            .unwrap();

        assert_eq!(params.enum_value("-m"), Some("Grid"));
    }

    #[test]
    fn load_list() {
        let schema = Schema::builder("program")
            .field(FieldDescriptor::new("-t", ValueKind::StrList).default(""))
            .build()
            .unwrap();
        let coercer = coercer();

        let params = ParamSet::new(&schema, &coercer)
            .unwrap()
            .load(&["-t", "a,b,c"])
            .unwrap();

        assert_eq!(
            params.list_value("-t"),
            Some(&["a".to_string(), "b".to_string(), "c".to_string()][..])
        );
    }

    #[test]
    fn value_unknown_modifier() {
        let schema = launcher_schema();
        let coercer = coercer();

        let params = ParamSet::new(&schema, &coercer).unwrap();

        assert_eq!(params.value("-x"), None);
        assert_eq!(params.str_value("-c"), None);
    }
}
