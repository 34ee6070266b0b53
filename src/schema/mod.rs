//! Compiles `#!` header directives into SQL text

mod directive;
mod literal;
mod sql_type;

#[cfg(test)]
mod tests;

pub use directive::{ColumnDef, DIRECTIVE_PREFIX, Nullability, Rule, TableSchema, is_directive, parse_directive};
pub use literal::{Literal, parse_literal};
pub use sql_type::SqlType;

/// Problems found while compiling a header; none of them stop the batch
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Directive error on line {line}: {reason}")]
    Directive { line: usize, reason: String },
    #[error("No literal form for value {value} of column {table}.{column} (type {sql_type})")]
    TypeFormatting {
        table: String,
        column: String,
        sql_type: String,
        value: String,
    },
    #[error("Row {row} of table {table} has {found} values for {expected} columns")]
    RowArity {
        table: String,
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Receives generated SQL for execution; retries and connections are its business.
pub trait StatementExecutor {
    type Error;

    fn execute_batch(&mut self, statements: &[String]) -> Result<(), Self::Error>;
}

/// Statements compiled from a header, in line order, plus diagnostics
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SqlBatch {
    pub tables: Vec<TableSchema>,
    pub statements: Vec<String>,
    pub diagnostics: Vec<SchemaError>,
}

impl SqlBatch {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// All statements, one per line
    pub fn to_sql(&self) -> String {
        self.statements.join("\n")
    }

    pub fn execute_with<E: StatementExecutor>(&self, executor: &mut E) -> Result<(), E::Error> {
        if self.statements.is_empty() {
            return Ok(());
        }
        executor.execute_batch(&self.statements)
    }
}

/// An INSERT with positional placeholders and its text-form parameters
#[derive(Clone, Debug, PartialEq)]
pub struct ParameterizedInsert {
    pub sql: String,
    pub params: Vec<Option<String>>,
}

/// Compiles every directive line of `header`.
///
/// Malformed directives are reported with their 1-based line number and
/// skipped; compilation carries on with the next line.
pub fn compile_header(header: &str) -> SqlBatch {
    let mut batch = SqlBatch::default();

    for (idx, line) in header.lines().enumerate() {
        if !is_directive(line) {
            continue;
        }
        let table = match parse_directive(line) {
            Ok(table) => table,
            Err(reason) => {
                let err = SchemaError::Directive { line: idx + 1, reason };
                log::warn!("{}", err);
                batch.diagnostics.push(err);
                continue;
            }
        };

        batch.statements.push(compile_create_table(&table));
        batch.statements.extend(compile_rule(&table));
        let (inserts, diagnostics) = compile_inserts(&table, &table.rows);
        batch.statements.extend(inserts);
        batch.diagnostics.extend(diagnostics);
        batch.tables.push(table);
    }

    log::debug!(
        "compiled {} statements for {} tables ({} diagnostics)",
        batch.statements.len(),
        batch.tables.len(),
        batch.diagnostics.len()
    );
    batch
}

pub fn compile_create_table(table: &TableSchema) -> String {
    let mut defs: Vec<String> = table
        .columns
        .iter()
        .map(|c| format!("{} {} {}", c.name, c.sql_type, c.nullability.sql()))
        .collect();
    if let Some(column) = &table.constraint {
        defs.push(format!("CONSTRAINT {}_pkey PRIMARY KEY ({})", table.name, column));
    }
    format!("CREATE TABLE {} ({});", table.name, defs.join(", "))
}

pub fn compile_rule(table: &TableSchema) -> Option<String> {
    table.rule.as_ref().map(|rule| {
        format!(
            "CREATE RULE {} AS ON {} TO {} DO {};",
            rule.name, rule.event, table.name, rule.action
        )
    })
}

/// One INSERT per row, values written as literals of their column's type.
pub fn compile_inserts(table: &TableSchema, rows: &[Vec<Literal>]) -> (Vec<String>, Vec<SchemaError>) {
    let mut statements = Vec::with_capacity(rows.len());
    let mut diagnostics = Vec::new();

    for (row_idx, row) in rows.iter().enumerate() {
        if let Err(err) = check_arity(table, row_idx, row) {
            diagnostics.push(err);
            continue;
        }

        let values: Vec<String> = table
            .columns
            .iter()
            .zip(row)
            .map(|(column, value)| {
                column.sql_type.format_literal(value).unwrap_or_else(|| {
                    let err = SchemaError::TypeFormatting {
                        table: table.name.clone(),
                        column: column.name.clone(),
                        sql_type: column.sql_type.to_string(),
                        value: value.to_string(),
                    };
                    log::warn!("{}", err);
                    diagnostics.push(err);
                    column.sql_type.fallback_literal(value)
                })
            })
            .collect();

        statements.push(format!("INSERT INTO {} VALUES ({});", table.name, values.join(",")));
    }

    (statements, diagnostics)
}

/// Placeholder form of [`compile_inserts`] for drivers that bind parameters.
pub fn compile_parameterized_inserts(table: &TableSchema) -> (Vec<ParameterizedInsert>, Vec<SchemaError>) {
    let placeholders: Vec<String> = (1..=table.columns.len()).map(|i| format!("${}", i)).collect();
    let sql = format!("INSERT INTO {} VALUES ({});", table.name, placeholders.join(", "));

    let mut inserts = Vec::with_capacity(table.rows.len());
    let mut diagnostics = Vec::new();
    for (row_idx, row) in table.rows.iter().enumerate() {
        if let Err(err) = check_arity(table, row_idx, row) {
            diagnostics.push(err);
            continue;
        }
        let params = table
            .columns
            .iter()
            .zip(row)
            .map(|(column, value)| column.sql_type.parameter_text(value))
            .collect();
        inserts.push(ParameterizedInsert { sql: sql.clone(), params });
    }

    (inserts, diagnostics)
}

fn check_arity(table: &TableSchema, row: usize, values: &[Literal]) -> Result<(), SchemaError> {
    if values.len() == table.columns.len() {
        return Ok(());
    }
    let err = SchemaError::RowArity {
        table: table.name.clone(),
        row,
        expected: table.columns.len(),
        found: values.len(),
    };
    log::warn!("{}", err);
    Err(err)
}
