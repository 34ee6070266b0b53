use sqlparser::tokenizer::Token;

use super::literal::{Literal, TokenStream};
use super::sql_type::SqlType;

/// Marker opening a machine-readable header line
pub const DIRECTIVE_PREFIX: &str = "#!";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Nullability {
    Nullable,
    NotNull,
    /// Column constraint text written by the directive author
    Custom(String),
}

impl Nullability {
    fn from_literal(value: &Literal) -> Result<Self, String> {
        match value {
            Literal::Number(n) if n == "0" => Ok(Nullability::NotNull),
            Literal::Number(n) if n == "1" => Ok(Nullability::Nullable),
            Literal::Ident(s) if s.eq_ignore_ascii_case("false") => Ok(Nullability::NotNull),
            Literal::Ident(s) if s.eq_ignore_ascii_case("true") => Ok(Nullability::Nullable),
            Literal::Str(s) => Ok(Nullability::Custom(s.clone())),
            other => Err(format!("invalid nullability {}", other)),
        }
    }

    fn to_literal(&self) -> Literal {
        match self {
            Nullability::NotNull => Literal::Number("0".into()),
            Nullability::Nullable => Literal::Number("1".into()),
            Nullability::Custom(s) => Literal::Str(s.clone()),
        }
    }

    pub fn sql(&self) -> &str {
        match self {
            Nullability::Nullable => "NULL",
            Nullability::NotNull => "NOT NULL",
            Nullability::Custom(s) => s,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: SqlType,
    pub nullability: Nullability,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub name: String,
    pub event: String,
    pub action: String,
}

/// Everything one directive line says about a table
#[derive(Clone, Debug, PartialEq)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    /// Primary-key column
    pub constraint: Option<String>,
    pub rule: Option<Rule>,
    pub rows: Vec<Vec<Literal>>,
}

impl TableSchema {
    pub fn new(name: &str, columns: Vec<ColumnDef>) -> Self {
        Self {
            name: name.to_string(),
            columns,
            constraint: None,
            rule: None,
            rows: Vec::new(),
        }
    }

    /// Directive body (without the `#!` marker) that parses back to `self`.
    pub fn to_directive(&self) -> String {
        let mut columns = vec![Literal::Str("COLUMNS".into())];
        columns.extend(self.columns.iter().map(|c| {
            Literal::Tuple(vec![
                Literal::Str(c.name.clone()),
                Literal::Str(c.sql_type.to_string()),
                c.nullability.to_literal(),
            ])
        }));

        let mut clauses = vec![Literal::Tuple(columns).to_string()];
        if let Some(column) = &self.constraint {
            clauses.push(Literal::Tuple(vec![Literal::Str("CONSTRAINT".into()), Literal::Str(column.clone())]).to_string());
        }
        if let Some(rule) = &self.rule {
            clauses.push(
                Literal::Tuple(vec![
                    Literal::Str("RULE".into()),
                    Literal::Str(rule.name.clone()),
                    Literal::Str(rule.event.clone()),
                    Literal::Str(rule.action.clone()),
                ])
                .to_string(),
            );
        }

        let mut text = format!("{} = {}", self.name, clauses.join(";"));
        if !self.rows.is_empty() {
            let rows = self.rows.iter().map(|r| Literal::Tuple(r.clone())).collect();
            text.push_str(" % ");
            text.push_str(&Literal::Tuple(rows).to_string());
        }
        text
    }
}

pub fn is_directive(line: &str) -> bool {
    line.starts_with(DIRECTIVE_PREFIX)
}

/// Parses one `#! name = clause;clause % rows` line.
pub fn parse_directive(line: &str) -> Result<TableSchema, String> {
    let body = line
        .strip_prefix(DIRECTIVE_PREFIX)
        .ok_or_else(|| format!("directives start with '{}'", DIRECTIVE_PREFIX))?;
    let mut tokens = TokenStream::new(body)?;

    let name = match tokens.next() {
        Some(Token::Word(word)) if word.quote_style.is_none() => word.value,
        other => return Err(format!("expected table name, found {:?}", other)),
    };
    tokens.expect(&Token::Eq)?;

    let mut table = TableSchema::new(&name, Vec::new());
    let mut has_columns = false;
    loop {
        let clause = tokens.literal()?;
        apply_clause(&mut table, &clause, &mut has_columns)?;
        if !tokens.eat(&Token::SemiColon) {
            break;
        }
        // tolerate a trailing ';' before '%' or the end of the line
        if tokens.is_done() || tokens.peek() == Some(&Token::Mod) {
            break;
        }
    }

    if tokens.eat(&Token::Mod) {
        let mut data = Vec::new();
        while !tokens.is_done() {
            data.push(tokens.literal()?);
            if !tokens.eat(&Token::Comma) {
                break;
            }
        }
        table.rows = data_rows(data)?;
    }
    if !tokens.is_done() {
        return Err(format!("unexpected trailing input {:?}", tokens.peek()));
    }
    if !has_columns {
        return Err("missing COLUMNS clause".to_string());
    }
    Ok(table)
}

fn apply_clause(table: &mut TableSchema, clause: &Literal, has_columns: &mut bool) -> Result<(), String> {
    let items = match clause {
        Literal::Tuple(items) if !items.is_empty() => items,
        other => return Err(format!("clause must be a tagged tuple, found {}", other)),
    };
    let tag = match &items[0] {
        Literal::Str(tag) | Literal::Ident(tag) => tag.to_ascii_uppercase(),
        other => return Err(format!("clause tag must be a string, found {}", other)),
    };
    let args = &items[1..];

    match tag.as_str() {
        "COLUMNS" => {
            if *has_columns {
                return Err("COLUMNS given twice".to_string());
            }
            if args.is_empty() {
                return Err("COLUMNS lists no columns".to_string());
            }
            table.columns = args.iter().map(column_def).collect::<Result<_, _>>()?;
            *has_columns = true;
        }
        "CONSTRAINT" => {
            let [column] = args else {
                return Err(format!("CONSTRAINT takes one column, found {}", args.len()));
            };
            table.constraint = Some(text(column, "constraint column")?);
        }
        "RULE" => {
            let [name, event, action] = args else {
                return Err(format!("RULE takes name, event and action, found {} values", args.len()));
            };
            table.rule = Some(Rule {
                name: text(name, "rule name")?,
                event: text(event, "rule event")?,
                action: text(action, "rule action")?,
            });
        }
        other => return Err(format!("unknown clause '{}'", other)),
    }
    Ok(())
}

fn column_def(value: &Literal) -> Result<ColumnDef, String> {
    let Literal::Tuple(parts) = value else {
        return Err(format!("column must be a (name, type, nullability) tuple, found {}", value));
    };
    let [name, sql_type, nullability] = parts.as_slice() else {
        return Err(format!("column must be a (name, type, nullability) tuple, found {}", value));
    };

    let sql_type = match sql_type {
        Literal::Str(s) | Literal::Ident(s) => s.parse::<SqlType>().unwrap_or_else(|never| match never {}),
        other => return Err(format!("column type must be a string, found {}", other)),
    };
    Ok(ColumnDef {
        name: text(name, "column name")?,
        sql_type,
        nullability: Nullability::from_literal(nullability)?,
    })
}

fn text(value: &Literal, what: &str) -> Result<String, String> {
    match value {
        Literal::Str(s) | Literal::Ident(s) => Ok(s.clone()),
        other => Err(format!("{} must be a string, found {}", what, other)),
    }
}

/// Reads the data block: a tuple of row tuples, several row tuples, or a
/// single flat tuple standing for one row.
fn data_rows(data: Vec<Literal>) -> Result<Vec<Vec<Literal>>, String> {
    let is_row = |l: &Literal| matches!(l, Literal::Tuple(_));

    match data.as_slice() {
        [] => Ok(Vec::new()),
        [Literal::Tuple(items)] | [Literal::List(items)] if items.iter().all(is_row) => Ok(items
            .iter()
            .filter_map(|row| row.items().map(<[Literal]>::to_vec))
            .collect()),
        [Literal::Tuple(items)] => Ok(vec![items.clone()]),
        rows if rows.iter().all(is_row) => Ok(rows.iter().filter_map(|row| row.items().map(<[Literal]>::to_vec)).collect()),
        _ => Err("data must be row tuples".to_string()),
    }
}
