use crate::errors::{ExpenseServiceError, Result};
use crate::repository::ExpenseRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use split_core::{Expense, ParticipantId, SplitEntry, SplitType};
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{FromRow, Pool, Postgres};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id          UUID PRIMARY KEY,
    amount      NUMERIC NOT NULL CHECK (amount > 0),
    description TEXT NOT NULL,
    paid_by     TEXT NOT NULL,
    split_type  TEXT NOT NULL,
    split_spec  JSONB NOT NULL,
    split_data  JSONB NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL,
    updated_at  TIMESTAMPTZ NOT NULL
)
"#;

/// Expense as stored in PostgreSQL
#[derive(Debug, FromRow)]
struct ExpenseRow {
    id: Uuid,
    amount: Decimal,
    description: String,
    paid_by: String,
    split_type: String,
    split_spec: Json<Vec<SplitEntry>>,
    split_data: Json<Vec<SplitEntry>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ExpenseRow> for Expense {
    type Error = ExpenseServiceError;

    fn try_from(row: ExpenseRow) -> Result<Self> {
        let split_type = row
            .split_type
            .parse::<SplitType>()
            .map_err(ExpenseServiceError::Internal)?;

        Ok(Expense {
            id: row.id,
            amount: row.amount,
            description: row.description,
            paid_by: ParticipantId::new(row.paid_by),
            split_type,
            split_spec: row.split_spec.0,
            split_data: row.split_data.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PostgresExpenseRepository {
    pool: Pool<Postgres>,
}

impl PostgresExpenseRepository {
    pub async fn new(database_url: &str, max_connections: u32, min_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        Ok(PostgresExpenseRepository { pool })
    }

    /// Create the expenses table when missing
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        info!("Expense schema ready");
        Ok(())
    }
}

#[async_trait]
impl ExpenseRepository for PostgresExpenseRepository {
    async fn list(&self) -> Result<Vec<Expense>> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT * FROM expenses
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Expense::try_from).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<Expense>> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT * FROM expenses WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Expense::try_from).transpose()
    }

    async fn insert(&self, expense: &Expense) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, amount, description, paid_by, split_type,
                split_spec, split_data, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(expense.id)
        .bind(expense.amount)
        .bind(&expense.description)
        .bind(expense.paid_by.as_str())
        .bind(expense.split_type.as_str())
        .bind(Json(&expense.split_spec))
        .bind(Json(&expense.split_data))
        .bind(expense.created_at)
        .bind(expense.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, expense: &Expense) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE expenses
            SET amount = $2, description = $3, paid_by = $4, split_type = $5,
                split_spec = $6, split_data = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(expense.id)
        .bind(expense.amount)
        .bind(&expense.description)
        .bind(expense.paid_by.as_str())
        .bind(expense.split_type.as_str())
        .bind(Json(&expense.split_spec))
        .bind(Json(&expense.split_data))
        .bind(expense.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
