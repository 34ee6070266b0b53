use std::fmt;
use std::str::FromStr;

use super::literal::Literal;

/// Column types the compiler knows how to write literals for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SqlType {
    Text,
    DoublePrecision,
    Integer,
    Timestamp,
    /// `character(n)`, `character varying(n)`, `varchar(n)`; keeps its spelling
    Character(String),
    Array(Box<SqlType>),
    /// Anything else; passed through to DDL but has no literal rendering
    Other(String),
}

impl FromStr for SqlType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spelled = s.trim();
        let lowered = spelled.to_ascii_lowercase();

        if let Some(inner) = spelled.strip_suffix("[]") {
            let inner: SqlType = inner.parse()?;
            return Ok(SqlType::Array(Box::new(inner)));
        }

        Ok(match lowered.as_str() {
            "text" => SqlType::Text,
            "double precision" | "float8" => SqlType::DoublePrecision,
            "integer" | "int" | "int4" => SqlType::Integer,
            "timestamp without time zone" | "timestamp" => SqlType::Timestamp,
            s if s.starts_with("character") || s.starts_with("varchar") || s.starts_with("char") => {
                SqlType::Character(spelled.to_string())
            }
            _ => SqlType::Other(spelled.to_string()),
        })
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Text => write!(f, "text"),
            SqlType::DoublePrecision => write!(f, "double precision"),
            SqlType::Integer => write!(f, "integer"),
            SqlType::Timestamp => write!(f, "timestamp without time zone"),
            SqlType::Character(spelled) | SqlType::Other(spelled) => write!(f, "{}", spelled),
            SqlType::Array(inner) => write!(f, "{}[]", inner),
        }
    }
}

impl SqlType {
    /// Renders `value` as an SQL literal for a column of this type.
    ///
    /// Returns `None` when the type has no known rendering.
    pub fn format_literal(&self, value: &Literal) -> Option<String> {
        if value.is_null() {
            return Some("NULL".to_string());
        }
        match self {
            SqlType::Text | SqlType::Character(_) => Some(quote(&plain_text(value))),
            SqlType::Integer | SqlType::DoublePrecision => match value {
                Literal::Number(n) => Some(n.clone()),
                _ => None,
            },
            SqlType::Timestamp => Some(format!("TIMESTAMP {}", quote(&plain_text(value)))),
            SqlType::Array(_) => Some(quote(&array_text(value))),
            SqlType::Other(_) => None,
        }
    }

    /// Rendering used when [`SqlType::format_literal`] has none: unknown
    /// types pass the value through, known types keep it quoted.
    pub(crate) fn fallback_literal(&self, value: &Literal) -> String {
        match self {
            SqlType::Other(_) => plain_text(value),
            _ => quote(&plain_text(value)),
        }
    }

    /// Text form of `value` for a bound parameter; `None` means SQL NULL.
    pub fn parameter_text(&self, value: &Literal) -> Option<String> {
        if value.is_null() {
            return None;
        }
        match self {
            SqlType::Array(_) => Some(array_text(value)),
            _ => Some(plain_text(value)),
        }
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// Bare text of a scalar; collections fall back to directive syntax.
fn plain_text(value: &Literal) -> String {
    match value.as_text() {
        Some(text) => text.to_string(),
        None => value.to_string(),
    }
}

/// Array value with `{}` delimiters, e.g. `[1, 2]` -> `{1, 2}`
fn array_text(value: &Literal) -> String {
    match value {
        Literal::Tuple(items) | Literal::List(items) => {
            let inner: Vec<String> = items.iter().map(array_element).collect();
            format!("{{{}}}", inner.join(", "))
        }
        other => plain_text(other).replace('[', "{").replace(']', "}"),
    }
}

fn array_element(value: &Literal) -> String {
    match value {
        Literal::Str(s) => format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\"")),
        Literal::Tuple(_) | Literal::List(_) => array_text(value),
        other if other.is_null() => "NULL".to_string(),
        other => plain_text(other),
    }
}
