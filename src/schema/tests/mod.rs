pub mod literal;

use super::*;
use sqlparser::ast::Statement;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

pub const FLT_DIRECTIVE: &str = "#! flt = ('COLUMNS',('id','integer',0),('note','text',1)) % (1,'ok')";

/// Parses generated SQL with a real SQL parser
pub fn parse_sql(sql: &str) -> Vec<Statement> {
    Parser::parse_sql(&PostgreSqlDialect {}, sql).unwrap()
}

pub fn flight_table() -> TableSchema {
    parse_directive(
        "#! flight = ('COLUMNS',('id','integer',0),('tail','character varying(12)',1),\
         ('takeoff','timestamp without time zone',1),('alt','double precision',1),\
         ('probes','text[]',1));('CONSTRAINT','id');('RULE','flight_guard','DELETE','NOTHING') \
         % ((1,'N677F','2011-07-21 10:31:47',8500.5,['cvi','ozone']),(2,'O''Hare',None,-12,[]))",
    )
    .unwrap()
}
