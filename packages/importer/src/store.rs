//! Statement execution against the relational store.
//!
//! Converters only need two shapes of statements: an existence query that
//! answers found / not found, and a write (insert, update or delete) with
//! positional parameters. The connection and its transaction are owned by the
//! caller; converters borrow them for the duration of one document.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::{PgConnection, Postgres};

use crate::error::Result;

/// Positional statement parameter.
///
/// Every variant carries an `Option` so that absent values bind as typed
/// SQL `NULL`s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SqlValue {
    Int(Option<i32>),
    BigInt(Option<i64>),
    Bool(Option<bool>),
    Text(Option<String>),
    Timestamp(Option<NaiveDateTime>),
}

macro_rules! impl_from_for_sql_value {
    ($variant:ident, $ty:ty) => {
        impl From<$ty> for SqlValue {
            fn from(value: $ty) -> Self {
                SqlValue::$variant(Some(value))
            }
        }

        impl From<Option<$ty>> for SqlValue {
            fn from(value: Option<$ty>) -> Self {
                SqlValue::$variant(value)
            }
        }
    };
}

impl_from_for_sql_value!(Int, i32);
impl_from_for_sql_value!(BigInt, i64);
impl_from_for_sql_value!(Bool, bool);
impl_from_for_sql_value!(Text, String);
impl_from_for_sql_value!(Timestamp, NaiveDateTime);

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(Some(value.to_string()))
    }
}

/// Destination of converter writes.
#[async_trait]
pub trait Store: Send {
    /// Run an existence query and report whether it returned any row.
    async fn exists(&mut self, sql: &str, params: &[SqlValue]) -> Result<bool>;

    /// Execute a write statement and return the number of affected rows.
    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64>;
}

fn bind_params<'q>(sql: &'q str, params: &'q [SqlValue]) -> Query<'q, Postgres, PgArguments> {
    params
        .iter()
        .fold(sqlx::query(sql), |query, value| match value {
            SqlValue::Int(v) => query.bind(*v),
            SqlValue::BigInt(v) => query.bind(*v),
            SqlValue::Bool(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.as_deref()),
            SqlValue::Timestamp(v) => query.bind(*v),
        })
}

/// PostgreSQL store. Pass `&mut *transaction` to write inside a transaction.
#[async_trait]
impl Store for PgConnection {
    async fn exists(&mut self, sql: &str, params: &[SqlValue]) -> Result<bool> {
        let row = bind_params(sql, params).fetch_optional(&mut *self).await?;
        Ok(row.is_some())
    }

    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        let result = bind_params(sql, params).execute(&mut *self).await?;
        Ok(result.rows_affected())
    }
}

/// Store that runs nothing.
///
/// Every existence query reports "not found", so a dry run shows the
/// statements a first import into an empty database would issue.
#[derive(Debug, Default)]
pub struct DryRunStore {
    queries: usize,
    statements: usize,
}

impl DryRunStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of existence queries seen.
    #[must_use]
    pub fn queries(&self) -> usize {
        self.queries
    }

    /// Number of write statements seen.
    #[must_use]
    pub fn statements(&self) -> usize {
        self.statements
    }
}

#[async_trait]
impl Store for DryRunStore {
    async fn exists(&mut self, sql: &str, params: &[SqlValue]) -> Result<bool> {
        self.queries += 1;
        tracing::debug!(sql, ?params, "dry run: existence query");
        Ok(false)
    }

    async fn execute(&mut self, sql: &str, params: &[SqlValue]) -> Result<u64> {
        self.statements += 1;
        tracing::debug!(sql, ?params, "dry run: statement");
        Ok(1)
    }
}
