use serde_json::Value;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Sqlite, SqlitePool};

use crate::database::manager::{DatabaseError, DatabaseManager};

/// Rendered SQL plus positional parameters
#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone)]
enum Condition {
    Eq(String, Value),
    In(String, Vec<Value>),
}

/// Single-table SELECT builder with validated identifiers and bound values.
/// `T` is the row type for `select_*`; counting needs none.
pub struct QueryBuilder<T = ()> {
    table_name: String,
    conditions: Vec<Condition>,
    order: Vec<(String, Direction)>,
    limit: Option<i64>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T> {
    pub fn new(table_name: impl Into<String>) -> Result<Self, DatabaseError> {
        let name = table_name.into();
        validate(&name)?;
        Ok(Self {
            table_name: name,
            conditions: Vec::new(),
            order: Vec::new(),
            limit: None,
            _phantom: std::marker::PhantomData,
        })
    }

    pub fn where_eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Eq(column.into(), value.into()));
        self
    }

    /// Adds the condition only when a value is present
    pub fn where_eq_opt<V: Into<Value>>(self, column: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.where_eq(column, v),
            None => self,
        }
    }

    pub fn where_in<I, V>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.conditions
            .push(Condition::In(column.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order.push((column.into(), direction));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn to_sql(&self) -> Result<SqlResult, DatabaseError> {
        let mut query = format!("SELECT * FROM {}", DatabaseManager::quote_identifier(&self.table_name));
        let params = self.push_where(&mut query)?;

        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|(c, d)| validate(c).map(|_| format!("{} {}", DatabaseManager::quote_identifier(c), d.as_sql())))
                .collect::<Result<Vec<_>, _>>()?;
            query.push_str(" ORDER BY ");
            query.push_str(&order.join(", "));
        }

        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit.max(0)));
        }

        Ok(SqlResult { query, params })
    }

    pub fn to_count_sql(&self) -> Result<SqlResult, DatabaseError> {
        let mut query = format!("SELECT COUNT(*) FROM {}", DatabaseManager::quote_identifier(&self.table_name));
        let params = self.push_where(&mut query)?;
        Ok(SqlResult { query, params })
    }

    fn push_where(&self, query: &mut String) -> Result<Vec<Value>, DatabaseError> {
        let mut params = Vec::new();
        let mut clauses = Vec::new();

        for condition in &self.conditions {
            match condition {
                Condition::Eq(column, value) => {
                    validate(column)?;
                    if value.is_null() {
                        clauses.push(format!("{} IS NULL", DatabaseManager::quote_identifier(column)));
                    } else {
                        clauses.push(format!("{} = ?", DatabaseManager::quote_identifier(column)));
                        params.push(value.clone());
                    }
                }
                Condition::In(column, values) => {
                    validate(column)?;
                    if values.is_empty() {
                        // Empty IN list matches nothing
                        clauses.push("1 = 0".to_string());
                    } else {
                        let placeholders = vec!["?"; values.len()].join(", ");
                        clauses.push(format!("{} IN ({})", DatabaseManager::quote_identifier(column), placeholders));
                        params.extend(values.iter().cloned());
                    }
                }
            }
        }

        if !clauses.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&clauses.join(" AND "));
        }
        Ok(params)
    }

    pub async fn count(self, pool: &SqlitePool) -> Result<i64, DatabaseError> {
        let sql_result = self.to_count_sql()?;
        let mut q = sqlx::query_as::<_, (i64,)>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let (count,) = q.fetch_one(pool).await?;
        Ok(count)
    }
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    pub async fn select_all(self, pool: &SqlitePool) -> Result<Vec<T>, DatabaseError> {
        let sql_result = self.to_sql()?;
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        Ok(q.fetch_all(pool).await?)
    }

    pub async fn select_optional(self, pool: &SqlitePool) -> Result<Option<T>, DatabaseError> {
        let sql_result = self.limit(1).to_sql()?;
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        Ok(q.fetch_optional(pool).await?)
    }
}

fn validate(identifier: &str) -> Result<(), DatabaseError> {
    if DatabaseManager::is_valid_identifier(identifier) {
        Ok(())
    } else {
        Err(DatabaseError::InvalidIdentifier(identifier.to_string()))
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    v: &Value,
) -> sqlx::query::QueryAs<'q, Sqlite, O, SqliteArguments<'q>>
where
    O: for<'r> FromRow<'r, SqliteRow>,
{
    match v {
        Value::Null => q.bind(None::<String>),
        Value::Bool(b) => q.bind(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                q.bind(i)
            } else if let Some(f) = n.as_f64() {
                q.bind(f)
            } else {
                q.bind(n.to_string())
            }
        }
        Value::String(s) => q.bind(s.clone()),
        // Nested values are stored as JSON text
        Value::Array(_) | Value::Object(_) => q.bind(v.to_string()),
    }
}
