//! Query execution through sqlx (MySQL)
//!
//! Errors raised by the driver are returned untouched. A query built for a
//! non-MySQL dialect is refused before the pool is touched; everything past
//! that needs a live connection.

use serde_json::Value;
use sqlx::mysql::{MySqlArguments, MySqlPool, MySqlQueryResult, MySqlRow};
use sqlx::query::Query;
use sqlx::types::Json;
use sqlx::MySql;

use crate::template::PositionalQuery;

impl PositionalQuery {
    /// Build a sqlx query with every value bound in order
    pub fn as_mysql_query(&self) -> Result<Query<'_, MySql, MySqlArguments>, sqlx::Error> {
        if !self.dialect.is_mysql() {
            return Err(sqlx::Error::Configuration(
                format!("cannot run {} placeholders on a MySQL connection", self.dialect).into(),
            ));
        }

        let mut query = sqlx::query(&self.sql);
        for value in &self.values {
            query = bind_value(query, value);
        }
        Ok(query)
    }
}

fn bind_value<'q>(
    query: Query<'q, MySql, MySqlArguments>,
    value: &Value,
) -> Query<'q, MySql, MySqlArguments> {
    match value {
        Value::Null => query.bind(Option::<String>::None),
        Value::Bool(flag) => query.bind(*flag),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                query.bind(int)
            } else if let Some(uint) = number.as_u64() {
                query.bind(uint)
            } else {
                query.bind(number.as_f64().unwrap_or_default())
            }
        }
        Value::String(text) => query.bind(text.clone()),
        other => query.bind(Json(other.clone())),
    }
}

/// Run a statement and return the affected-rows summary
pub async fn execute(pool: &MySqlPool, query: &PositionalQuery) -> Result<MySqlQueryResult, sqlx::Error> {
    tracing::debug!("Executing statement with {} bound value(s)", query.values.len());
    query.as_mysql_query()?.execute(pool).await
}

pub async fn fetch_all(pool: &MySqlPool, query: &PositionalQuery) -> Result<Vec<MySqlRow>, sqlx::Error> {
    tracing::debug!("Fetching rows with {} bound value(s)", query.values.len());
    query.as_mysql_query()?.fetch_all(pool).await
}

pub async fn fetch_optional(
    pool: &MySqlPool,
    query: &PositionalQuery,
) -> Result<Option<MySqlRow>, sqlx::Error> {
    tracing::debug!("Fetching optional row with {} bound value(s)", query.values.len());
    query.as_mysql_query()?.fetch_optional(pool).await
}
