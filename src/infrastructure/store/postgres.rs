//! PostgreSQL credential store with connection pooling
//!
//! Constraint enforcement (uniqueness, foreign keys, cascade deletion) is
//! delegated to the schema; this module maps the database's verdicts into
//! domain errors and keeps multi-entity mutations inside transactions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::admin::{Admin, AdminId, NewAdmin};
use crate::domain::api_key::{ApiKey, ApiKeyId, NewApiKey};
use crate::domain::store::{ApiKeyWithOwner, CredentialStore, KeySummary, UserWithKeys};
use crate::domain::user::{NewUser, User, UserId};
use crate::domain::{DomainError, DuplicateField};

use super::migrations::PostgresMigrator;

/// PostgreSQL store configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/covi_keys".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }
}

/// PostgreSQL implementation of [`CredentialStore`]
#[derive(Debug, Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    /// Create a store over an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to PostgreSQL with the given configuration
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        Ok(Self::new(pool))
    }

    /// Apply all pending schema migrations
    pub async fn run_migrations(&self) -> Result<(), DomainError> {
        PostgresMigrator::new(self.pool.clone()).run().await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Map a sqlx error into the domain taxonomy
///
/// Constraint names in the message decide the duplicate-field discriminant:
/// PostgreSQL reports `users_email_key`, `admins_email_key` and
/// `api_keys_key_key` for this schema.
fn map_db_error(e: sqlx::Error, context: &str) -> DomainError {
    let msg = e.to_string();

    if msg.contains("duplicate key") || msg.contains("unique constraint") {
        let field = if msg.contains("email") {
            DuplicateField::Email
        } else if msg.contains("api_keys") {
            DuplicateField::Key
        } else {
            DuplicateField::Unknown
        };

        return DomainError::duplicate(field, format!("{}: value already registered", context));
    }

    if msg.contains("foreign key constraint") {
        return DomainError::foreign_key(format!("{}: referenced owner does not exist", context));
    }

    DomainError::storage(format!("{}: {}", context, msg))
}

fn row_to_user(row: &PgRow) -> User {
    User::new(
        UserId::new(row.get::<i64, _>("id")),
        row.get::<String, _>("first_name"),
        row.get::<Option<String>, _>("last_name"),
        row.get::<String, _>("email"),
        row.get::<DateTime<Utc>, _>("created_at"),
    )
}

fn row_to_api_key(row: &PgRow) -> ApiKey {
    ApiKey::new(
        ApiKeyId::new(row.get::<i64, _>("id")),
        row.get::<String, _>("key"),
        row.get::<DateTime<Utc>, _>("expires_at"),
        UserId::new(row.get::<i64, _>("owner_id")),
        row.get::<DateTime<Utc>, _>("created_at"),
    )
}

fn row_to_admin(row: &PgRow) -> Admin {
    Admin::new(
        AdminId::new(row.get::<i64, _>("id")),
        row.get::<String, _>("email"),
        row.get::<String, _>("password"),
        row.get::<DateTime<Utc>, _>("created_at"),
    )
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn create_user(&self, user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING id, first_name, last_name, email, created_at
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to create user"))?;

        Ok(row_to_user(&row))
    }

    async fn create_api_key(&self, api_key: NewApiKey) -> Result<ApiKey, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO api_keys (key, expires_at, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, key, expires_at, owner_id, created_at
            "#,
        )
        .bind(&api_key.key)
        .bind(api_key.expires_at)
        .bind(api_key.owner_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to create API key"))?;

        Ok(row_to_api_key(&row))
    }

    async fn create_user_with_key(
        &self,
        user: NewUser,
        key: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(User, ApiKey), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let user_row = sqlx::query(
            r#"
            INSERT INTO users (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING id, first_name, last_name, email, created_at
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, "Failed to create user"))?;

        let user = row_to_user(&user_row);

        let key_row = sqlx::query(
            r#"
            INSERT INTO api_keys (key, expires_at, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, key, expires_at, owner_id, created_at
            "#,
        )
        .bind(key)
        .bind(expires_at)
        .bind(user.id().get())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_db_error(e, "Failed to create API key"))?;

        let api_key = row_to_api_key(&key_row);

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit issuance: {}", e)))?;

        Ok((user, api_key))
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, first_name, last_name, email, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to get user"))?;

        Ok(row.as_ref().map(row_to_user))
    }

    async fn list_users_with_keys(&self) -> Result<Vec<UserWithKeys>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.email, u.created_at,
                   k.key AS api_key, k.expires_at
            FROM users u
            LEFT JOIN api_keys k ON k.owner_id = u.id
            ORDER BY u.id, k.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to list users"))?;

        let mut result: Vec<UserWithKeys> = Vec::new();

        for row in rows {
            let user = row_to_user(&row);

            if result.last().map(|e| e.user.id()) != Some(user.id()) {
                result.push(UserWithKeys {
                    user,
                    api_keys: Vec::new(),
                });
            }

            // NULL key means the user owns no keys (left join miss).
            if let Some(key) = row.get::<Option<String>, _>("api_key") {
                if let Some(entry) = result.last_mut() {
                    entry.api_keys.push(KeySummary {
                        key,
                        expires_at: row.get::<DateTime<Utc>, _>("expires_at"),
                    });
                }
            }
        }

        Ok(result)
    }

    async fn list_api_keys_with_owner_email(
        &self,
    ) -> Result<Vec<ApiKeyWithOwner>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT k.id, k.key, k.expires_at, k.owner_id, k.created_at,
                   u.email AS owner_email
            FROM api_keys k
            JOIN users u ON u.id = k.owner_id
            ORDER BY k.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to list API keys"))?;

        Ok(rows
            .iter()
            .map(|row| ApiKeyWithOwner {
                api_key: row_to_api_key(row),
                owner_email: row.get::<String, _>("owner_email"),
            })
            .collect())
    }

    async fn delete_user(&self, id: UserId) -> Result<Option<u64>, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(id.get())
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| map_db_error(e, "Failed to look up user"))?;

        if !exists {
            return Ok(None);
        }

        // The schema's ON DELETE CASCADE would remove the keys anyway;
        // deleting them explicitly inside the transaction yields the
        // cascade count while keeping the same atomicity.
        let cascaded = sqlx::query("DELETE FROM api_keys WHERE owner_id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error(e, "Failed to delete owned API keys"))?
            .rows_affected();

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.get())
            .execute(&mut *tx)
            .await
            .map_err(|e| map_db_error(e, "Failed to delete user"))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit revocation: {}", e)))?;

        Ok(Some(cascaded))
    }

    async fn create_admin(&self, admin: NewAdmin) -> Result<Admin, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO admins (email, password)
            VALUES ($1, $2)
            RETURNING id, email, password, created_at
            "#,
        )
        .bind(&admin.email)
        .bind(&admin.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to create admin"))?;

        Ok(row_to_admin(&row))
    }

    async fn find_admin_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password, created_at
            FROM admins
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error(e, "Failed to get admin"))?;

        Ok(row.as_ref().map(row_to_admin))
    }
}
