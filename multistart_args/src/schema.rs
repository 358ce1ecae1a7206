use thiserror::Error;

use crate::model::ValueKind;

/// A defect in the schema itself: a duplicate modifier, or a declared default that
/// does not coerce under its field's kind.
///
/// This error is only ever produced at construction time ([`SchemaBuilder::build`] or
/// [`ParamSet::new`](crate::ParamSet::new)); a schema that constructs cleanly cannot
/// raise it while parsing.
#[derive(Debug, Error)]
#[error("Schema error: {0}")]
pub struct SchemaError(pub(crate) String);

/// Metadata for one configurable option: modifier, value kind, textual default, and
/// description.
#[derive(Debug)]
pub struct FieldDescriptor {
    modifier: &'static str,
    kind: ValueKind,
    nullable: bool,
    default_text: &'static str,
    description: Option<&'static str>,
}

impl FieldDescriptor {
    /// Create a descriptor with an empty textual default and no description.
    pub fn new(modifier: &'static str, kind: ValueKind) -> Self {
        Self {
            modifier,
            kind,
            nullable: false,
            default_text: "",
            description: None,
        }
    }

    /// Set the textual default, to be coerced under this field's kind when the
    /// parameter set is constructed.
    pub fn default(self, text: &'static str) -> Self {
        Self {
            default_text: text,
            ..self
        }
    }

    /// Mark the field nullable, accepting the reserved `NULL` literal.
    pub fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    /// Set the description shown in the usage message.
    pub fn help(self, message: &'static str) -> Self {
        Self {
            description: Some(message),
            ..self
        }
    }

    /// The modifier token selecting this field.
    pub fn modifier(&self) -> &'static str {
        self.modifier
    }

    /// The value kind of this field.
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub(crate) fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub(crate) fn default_text(&self) -> &'static str {
        self.default_text
    }

    pub(crate) fn description(&self) -> Option<&'static str> {
        self.description
    }
}

/// The fixed, ordered table of field descriptors.
///
/// Built once via [`Schema::builder`] and never mutated afterwards. Declaration order
/// is preserved; it dictates both default seeding order and the usage message layout.
#[derive(Debug)]
pub struct Schema {
    program: String,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Start building a schema for the named program.
    pub fn builder(program: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            program: program.into(),
            fields: Vec::default(),
        }
    }

    /// Find the field whose modifier equals `candidate` under case-insensitive
    /// comparison.
    pub(crate) fn lookup(&self, candidate: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|field| field.modifier.eq_ignore_ascii_case(candidate))
    }

    pub(crate) fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub(crate) fn program(&self) -> &str {
        &self.program
    }
}

/// Builder for a [`Schema`]; rejects duplicate modifiers at [`SchemaBuilder::build`].
pub struct SchemaBuilder {
    program: String,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    /// Add a field descriptor.
    pub fn field(mut self, descriptor: FieldDescriptor) -> Self {
        self.fields.push(descriptor);
        self
    }

    /// Finalize the schema.
    ///
    /// Modifiers must be unique under the same case-insensitive comparison used for
    /// matching; a duplicate is a [`SchemaError`].
    pub fn build(self) -> Result<Schema, SchemaError> {
        for (index, field) in self.fields.iter().enumerate() {
            let clash = self.fields[..index]
                .iter()
                .any(|other| other.modifier.eq_ignore_ascii_case(field.modifier));

            if clash {
                return Err(SchemaError(format!(
                    "Cannot duplicate the modifier '{}'.",
                    field.modifier
                )));
            }
        }

        Ok(Schema {
            program: self.program,
            fields: self.fields,
        })
    }
}
