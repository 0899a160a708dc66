//! Database connection pool

use sqlx::PgPool;

use crate::error::DbResult;

/// Database connection pool type alias
pub type DbPool = PgPool;

/// Create a new database connection pool
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPool::connect(database_url).await
}

/// Apply the embedded schema migrations
pub async fn run_migrations(pool: &DbPool) -> DbResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

#[cfg(test)]
mod tests {
    const INIT_SQL: &str = include_str!("../migrations/0001_init.sql");

    #[test]
    fn test_user_email_is_not_unique() {
        // Identity is the gateway's user id; an email may move between ids
        let email = INIT_SQL
            .lines()
            .find(|line| line.trim_start().starts_with("email"))
            .unwrap();
        assert!(!email.to_uppercase().contains("UNIQUE"), "{email}");
        assert!(!INIT_SQL.contains("UNIQUE (email)"));
    }
}
