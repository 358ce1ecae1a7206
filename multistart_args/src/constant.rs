// Reserved literal marking "no value" for nullable fields.
pub(crate) const NULL_TOKEN: &str = "NULL";

// Substitution token expanded to the directory containing the running executable.
pub(crate) const EXE_DIR_TOKEN: &str = "[EXEPATH]";

pub(crate) const MODIFIER_COLUMN_WIDTH: usize = 15;
pub(crate) const NO_DESCRIPTION: &str = "[No description]";
