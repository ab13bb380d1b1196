//! PostgreSQL implementation of the identity storage provider.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use wicket_model::Identity;
use wicket_storage::error::StorageResult;
use wicket_storage::IdentityProvider;

use crate::error::from_sqlx_error;

/// Schema bootstrap statement.
///
/// The primary key on `email` is the uniqueness constraint that
/// serializes concurrent registrations of the same address.
const CREATE_IDENTITIES_TABLE: &str = r"CREATE TABLE IF NOT EXISTS identities (
    email TEXT PRIMARY KEY,
    secret_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL
)";

/// Ensures the identities table exists.
///
/// # Errors
///
/// Returns a storage error if the DDL statement fails.
pub async fn ensure_schema(pool: &PgPool) -> StorageResult<()> {
    sqlx::query(CREATE_IDENTITIES_TABLE)
        .execute(pool)
        .await
        .map_err(|e| from_sqlx_error(e, ""))?;
    Ok(())
}

/// Row type for the identities table.
#[derive(sqlx::FromRow)]
struct IdentityRow {
    email: String,
    secret_hash: String,
    created_at: DateTime<Utc>,
}

impl From<IdentityRow> for Identity {
    fn from(row: IdentityRow) -> Self {
        Self {
            email: row.email,
            secret_hash: row.secret_hash,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL identity storage provider.
pub struct PgIdentityProvider {
    pool: PgPool,
}

impl PgIdentityProvider {
    /// Creates a new PostgreSQL identity provider.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityProvider for PgIdentityProvider {
    async fn find_by_email(&self, email: &str) -> StorageResult<Option<Identity>> {
        let row: Option<IdentityRow> =
            sqlx::query_as("SELECT email, secret_hash, created_at FROM identities WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| from_sqlx_error(e, email))?;

        Ok(row.map(Identity::from))
    }

    async fn create(&self, identity: &Identity) -> StorageResult<()> {
        // No SELECT-then-INSERT: the insert races straight into the
        // primary-key constraint and a 23505 comes back as Duplicate.
        sqlx::query(
            r"INSERT INTO identities (email, secret_hash, created_at) VALUES ($1, $2, $3)",
        )
        .bind(&identity.email)
        .bind(&identity.secret_hash)
        .bind(identity.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| from_sqlx_error(e, &identity.email))?;

        Ok(())
    }
}
