//! Parameterized SQL construction for the two supported backends.
//!
//! Identifiers are only ever `&'static str` taken from [`Level`](crate::features::regions::models::Level),
//! while every value coming from a request goes through [`QueryBuilder::push_bind`].

use std::fmt;
use std::str::FromStr;

use sqlx::any::AnyArguments;
use sqlx::query::Query;
use sqlx::Any;

/// SQL dialect of the configured backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `?` placeholders
    MySql,
    /// `$1, $2, ...` placeholders
    Postgres,
}

impl Dialect {
    pub fn default_port(self) -> u16 {
        match self {
            Dialect::MySql => 3306,
            Dialect::Postgres => 5432,
        }
    }

    /// Placeholder for the bind at 1-based `index`
    fn write_placeholder(self, sql: &mut String, index: usize) {
        match self {
            Dialect::MySql => sql.push('?'),
            Dialect::Postgres => {
                sql.push('$');
                sql.push_str(&index.to_string());
            }
        }
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySql),
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            other => Err(format!("unknown dialect '{}'", other)),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::MySql => f.write_str("mysql"),
            Dialect::Postgres => f.write_str("postgres"),
        }
    }
}

/// A value bound to a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    Int(i64),
    Text(String),
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Arg::Int(value)
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub sql: String,
    pub args: Vec<Arg>,
}

impl BuiltQuery {
    /// Prepares the statement on the `Any` driver with every argument bound in order.
    pub fn as_query(&self) -> Query<'_, Any, AnyArguments<'_>> {
        let mut query = sqlx::query(&self.sql);
        for arg in &self.args {
            query = match arg {
                Arg::Int(value) => query.bind(*value),
                Arg::Text(value) => query.bind(value.as_str()),
            };
        }
        query
    }
}

/// Appends SQL text and binds, numbering placeholders as binds are pushed.
///
/// Placeholders are only produced by [`push_bind`](Self::push_bind), so a `?`
/// inside literal text is never mistaken for one.
#[derive(Debug)]
pub struct QueryBuilder {
    dialect: Dialect,
    sql: String,
    args: Vec<Arg>,
}

impl QueryBuilder {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            args: Vec::new(),
        }
    }

    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    pub fn push_bind(&mut self, arg: impl Into<Arg>) -> &mut Self {
        self.args.push(arg.into());
        self.dialect.write_placeholder(&mut self.sql, self.args.len());
        self
    }

    pub fn build(self) -> BuiltQuery {
        BuiltQuery {
            sql: self.sql,
            args: self.args,
        }
    }
}

// ==================== Query Shapes ====================

/// `SELECT id, <column> FROM <table> [WHERE <column> LIKE %term%] ORDER BY id ASC LIMIT n OFFSET m`
pub fn list_query(
    dialect: Dialect,
    table: &'static str,
    column: &'static str,
    search: Option<&str>,
    limit: i64,
    offset: i64,
) -> BuiltQuery {
    let mut qb = QueryBuilder::new(dialect);
    qb.push(&format!("SELECT id, {} FROM {}", column, table));
    if let Some(term) = search.filter(|t| !t.is_empty()) {
        qb.push(&format!(" WHERE {} LIKE ", column))
            .push_bind(format!("%{}%", term));
    }
    qb.push(" ORDER BY id ASC LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    qb.build()
}

/// `SELECT id, <column> FROM <table> WHERE id = ?`
pub fn detail_query(
    dialect: Dialect,
    table: &'static str,
    column: &'static str,
    id: i64,
) -> BuiltQuery {
    let mut qb = QueryBuilder::new(dialect);
    qb.push(&format!("SELECT id, {} FROM {} WHERE id = ", column, table))
        .push_bind(id);
    qb.build()
}

/// `SELECT id, <column> FROM <table> WHERE <key> = ?`
pub fn children_query(
    dialect: Dialect,
    table: &'static str,
    column: &'static str,
    key: &'static str,
    parent_id: i64,
) -> BuiltQuery {
    let mut qb = QueryBuilder::new(dialect);
    qb.push(&format!("SELECT id, {} FROM {} WHERE {} = ", column, table, key))
        .push_bind(parent_id);
    qb.build()
}

/// `SELECT COUNT(*) FROM <table> WHERE <key> = ?`
pub fn count_by_key_query(
    dialect: Dialect,
    table: &'static str,
    key: &'static str,
    id: i64,
) -> BuiltQuery {
    let mut qb = QueryBuilder::new(dialect);
    qb.push(&format!("SELECT COUNT(*) FROM {} WHERE {} = ", table, key))
        .push_bind(id);
    qb.build()
}

pub fn count_all_query(dialect: Dialect, table: &'static str) -> BuiltQuery {
    let mut qb = QueryBuilder::new(dialect);
    qb.push(&format!("SELECT COUNT(*) FROM {}", table));
    qb.build()
}

/// Cheap existence check used at startup
pub fn table_exists_query(dialect: Dialect, table: &'static str) -> BuiltQuery {
    let mut qb = QueryBuilder::new(dialect);
    qb.push(&format!("SELECT 1 FROM {} LIMIT 1", table));
    qb.build()
}
