use terminal_size::{terminal_size, Width};

use crate::constant::*;
use crate::parser::ParseError;
use crate::schema::Schema;

// Below this there is no room to say anything useful, terminal or not.
const MINIMUM_DESCRIPTION_WIDTH: usize = 17;
const DEFAULT_TOTAL_WIDTH: usize = 80;

/// Renders the usage block: an error headline, the usage synopsis, then one line per
/// field descriptor with the modifier aligned to a fixed column width followed by its
/// description. The rendered text is the payload of the [`ParseError`] it produces.
pub(crate) struct Printer<'p> {
    schema: &'p Schema,
    terminal_width: Option<usize>,
}

impl<'p> Printer<'p> {
    pub(crate) fn terminal(schema: &'p Schema) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self {
            schema,
            terminal_width,
        }
    }

    #[cfg(test)]
    fn fixed(schema: &'p Schema, width: usize) -> Self {
        Self {
            schema,
            terminal_width: Some(width),
        }
    }

    pub(crate) fn usage_error(&self, headline: impl Into<String>) -> ParseError {
        ParseError(self.render(headline.into()))
    }

    fn render(&self, headline: String) -> String {
        let total_width = self.terminal_width.unwrap_or(DEFAULT_TOTAL_WIDTH);
        let left_width = MODIFIER_COLUMN_WIDTH;
        let description_width = std::cmp::max(
            total_width.saturating_sub(left_width + 2),
            MINIMUM_DESCRIPTION_WIDTH,
        );

        let mut lines = vec![
            headline,
            String::default(),
            "USAGE:".to_string(),
            format!("    {} [-modifier] [value]", self.schema.program()),
            String::default(),
            "where the valid modifiers and values are:".to_string(),
        ];

        for field in self.schema.fields() {
            let description = field.description().unwrap_or(NO_DESCRIPTION);
            let mut parts = wrap(description, description_width).into_iter();
            let first = parts.next().unwrap_or_default();
            lines.push(format!("  {:<left_width$}{first}", field.modifier()));

            for part in parts {
                lines.push(format!("  {:<left_width$}{part}", ""));
            }
        }

        lines.join("\n")
    }
}

/// Greedy word wrap; words longer than the width are split hard.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::default();
    let mut current = String::default();

    for word in text.split_whitespace() {
        let mut word = word;

        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            let (head, tail) = word.split_at(width);
            lines.push(head.to_string());
            word = tail;
        }

        if current.is_empty() {
            current.push_str(word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}
