// src/repositories/link.rs - Data access
use async_trait::async_trait;
use log::{debug, error};
use sqlx::PgPool;

use crate::db::Database;
use crate::errors::RepositoryError;
use crate::models::{Link, NewLink};

type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new link row
    ///
    /// ### Returns
    /// * `Result<String>` - The `short_id` of the inserted row
    ///
    /// ### Errors
    /// * `RepositoryError::Conflict` - If the short id is already taken
    /// * `RepositoryError::Database` - If a database error occurs
    async fn insert(&self, link: &NewLink) -> Result<String>;

    /// Point lookup by short id
    ///
    /// ### Returns
    /// * `Result<Option<Link>>` - The link if found, or `None` if not found
    ///
    /// ### Errors
    /// * `RepositoryError::Database` - If a database error occurs
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>>;

    /// Draws up to `count` short ids of the given type uniformly at random,
    /// without replacement. Order is not meaningful. A non-positive count
    /// returns nothing.
    ///
    /// ### Errors
    /// * `RepositoryError::Database` - If a database error occurs
    async fn sample_short_ids(&self, link_type: &str, count: i64) -> Result<Vec<String>>;

    /// Round trip to the backing store
    async fn ping(&self) -> Result<()>;
}

// Implementation using actual database
pub struct PgLinkRepository {
    pool: PgPool,
}

impl PgLinkRepository {
    pub fn new(db: Database) -> Self {
        Self {
            pool: db.get_pool().clone(),
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, link: &NewLink) -> Result<String> {
        sqlx::query_scalar::<_, String>(
            r#"
                INSERT INTO links (short_id, destination_url, type)
                VALUES ($1, $2, $3)
                RETURNING short_id
            "#,
        )
        .bind(&link.short_id)
        .bind(&link.destination_url)
        .bind(&link.link_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to insert link '{}': {}", link.short_id, e);
            RepositoryError::from(e)
        })
    }

    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Link>> {
        sqlx::query_as::<_, Link>(
            r#"
                SELECT short_id, destination_url, type, created_at
                FROM links
                WHERE short_id = $1
            "#,
        )
        .bind(short_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(RepositoryError::Database)
    }

    async fn sample_short_ids(&self, link_type: &str, count: i64) -> Result<Vec<String>> {
        // The sampling function takes an INTEGER; anything larger asks for every row anyway
        let count = count.clamp(0, i64::from(i32::MAX)) as i32;

        let ids = sqlx::query_scalar::<_, String>(
            "SELECT short_id FROM get_random_links($1, $2)",
        )
        .bind(link_type)
        .bind(count)
        .fetch_all(&self.pool)
        .await?;

        debug!(
            "Sampled {} of {} requested '{}' links",
            ids.len(),
            count,
            link_type
        );
        Ok(ids)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
