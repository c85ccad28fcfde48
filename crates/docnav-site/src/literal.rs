//! Structural literal documents and their JavaScript serialization.
//!
//! The generated route module is built as a [`Literal`] tree and written out
//! directly in object-literal syntax: object keys are bare, strings are
//! quoted, and identifiers (content references) are emitted verbatim so the
//! module can bind them to its imports.

use std::fmt::Write;

/// Indentation unit for serialized literals.
const INDENT: &str = "  ";

/// A JavaScript structural literal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Literal {
    /// Quoted string.
    Str(String),
    /// Bare identifier referring to an imported binding.
    Ident(String),
    /// Array of literals.
    Array(Vec<Literal>),
    /// Object with bare keys, in insertion order.
    Object(Vec<(&'static str, Literal)>),
}

impl Literal {
    /// Build a string literal.
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Serialize with two-space indentation.
    #[must_use]
    pub fn to_source(&self) -> String {
        let mut out = String::new();
        self.write_source(&mut out, 0);
        out
    }

    fn write_source(&self, out: &mut String, depth: usize) {
        match self {
            Self::Str(value) => write_quoted(out, value, '"'),
            Self::Ident(name) => out.push_str(name),
            Self::Array(items) if items.is_empty() => out.push_str("[]"),
            Self::Object(fields) if fields.is_empty() => out.push_str("{}"),
            Self::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    newline(out, depth + 1);
                    item.write_source(out, depth + 1);
                }
                newline(out, depth);
                out.push(']');
            }
            Self::Object(fields) => {
                out.push('{');
                for (i, (key, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    newline(out, depth + 1);
                    out.push_str(key);
                    out.push_str(": ");
                    value.write_source(out, depth + 1);
                }
                newline(out, depth);
                out.push('}');
            }
        }
    }
}

fn newline(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Write `value` as a quoted JavaScript string.
pub(crate) fn write_quoted(out: &mut String, value: &str, quote: char) {
    out.push(quote);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!(Literal::str("a").to_source(), "\"a\"");
        assert_eq!(Literal::Ident("intro".to_owned()).to_source(), "intro");
        assert_eq!(Literal::Array(Vec::new()).to_source(), "[]");
        assert_eq!(Literal::Object(Vec::new()).to_source(), "{}");
    }

    #[test]
    fn test_string_escaping() {
        assert_eq!(
            Literal::str("say \"hi\"\\\n").to_source(),
            r#""say \"hi\"\\\n""#
        );
        assert_eq!(Literal::str("bell\u{7}").to_source(), "\"bell\\u0007\"");

        let mut out = String::new();
        write_quoted(&mut out, "it's", '\'');
        assert_eq!(out, r"'it\'s'");
    }

    #[test]
    fn test_nested_layout() {
        let literal = Literal::Object(vec![
            ("name", Literal::str("Guides")),
            (
                "children",
                Literal::Array(vec![Literal::Object(vec![(
                    "markdown",
                    Literal::Ident("guidesIntro".to_owned()),
                )])]),
            ),
        ]);

        assert_eq!(
            literal.to_source(),
            "{\n  name: \"Guides\",\n  children: [\n    {\n      markdown: guidesIntro\n    }\n  ]\n}"
        );
    }
}
