//! Database configuration module for the coupon store.
//!
//! This module handles the `SQLite` connection and table creation using `SeaORM`.
//! The `coupons` table is generated from the entity definition with
//! `Schema::create_table_from_entity`, so the unique constraint on `code` is declared
//! in exactly one place: the entity.

use crate::entities::Coupon;
use crate::errors::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};
use tracing::info;

const DEFAULT_DATABASE_URL: &str = "sqlite://coupons.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a local `SQLite` file that is created on first use.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Opens the coupon store at `database_url`.
///
/// The returned connection is a pool; clones share it. It stays open until
/// [`DatabaseConnection::close`] is called at shutdown.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(database_url);
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!("Connected to coupon store");
    Ok(db)
}

/// Creates the `coupons` table if it does not exist yet.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut coupon_table = schema.create_table_from_entity(Coupon);
    coupon_table.if_not_exists();

    db.execute(builder.build(&coupon_table)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CouponModel;
    use crate::test_utils::memory_connection;
    use sea_orm::{EntityTrait, QuerySelect};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = memory_connection().await?;
        create_tables(&db).await?;

        let _: Vec<CouponModel> = Coupon::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = memory_connection().await?;
        create_tables(&db).await?;
        create_tables(&db).await?;

        let _: Vec<CouponModel> = Coupon::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_connection_with_file_store() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("coupons.sqlite").display());

        let db = create_connection(&url).await?;
        create_tables(&db).await?;
        let _: Vec<CouponModel> = Coupon::find().limit(1).all(&db).await?;
        db.close().await?;
        Ok(())
    }
}
