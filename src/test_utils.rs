//! Shared test utilities for the coupon manager.
//!
//! This module provides helpers for setting up isolated coupon stores and creating
//! test coupons with sensible defaults.

use crate::{
    config::database::create_tables,
    core::{
        codes::{CodeSource, RandomCodes},
        coupon,
    },
    entities,
    errors::Result,
};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::{collections::VecDeque, sync::Mutex};
use tempfile::TempDir;

/// Opens an empty in-memory `SQLite` database.
///
/// An in-memory database lives inside a single connection, so the pool is pinned to
/// exactly one.
pub async fn memory_connection() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    Ok(Database::connect(options).await?)
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for store and service tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = memory_connection().await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Creates a file-backed database in a temporary directory, served by a pool of several
/// connections so that statements really run in parallel.
///
/// Keep the returned [`TempDir`] alive for as long as the connection is used.
pub async fn setup_file_test_db() -> Result<(TempDir, DatabaseConnection)> {
    let dir = tempfile::tempdir()?;
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("coupons.sqlite").display()
    );
    let mut options = ConnectOptions::new(url);
    options.max_connections(8).sqlx_logging(false);
    let db = Database::connect(options).await?;
    create_tables(&db).await?;
    Ok((dir, db))
}

/// Inserts a coupon with a freshly generated random code.
pub async fn create_test_coupon(db: &DatabaseConnection) -> Result<entities::coupon::Model> {
    coupon::insert_coupon(db, &RandomCodes::default().generate()).await
}

/// A [`CodeSource`] that hands out a fixed script of codes, then repeats the last one.
/// Used to force collisions in issuance tests.
#[derive(Debug)]
pub struct ScriptedCodes {
    queue: Mutex<VecDeque<String>>,
    last: Mutex<String>,
}

impl ScriptedCodes {
    /// Creates a source that yields `codes` in order.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: Mutex::new(codes.into_iter().map(Into::into).collect()),
            last: Mutex::new(String::new()),
        }
    }
}

impl CodeSource for ScriptedCodes {
    #[allow(clippy::unwrap_used)]
    fn generate(&self) -> String {
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.queue.lock().unwrap().pop_front() {
            last.clone_from(&next);
        }
        last.clone()
    }
}
