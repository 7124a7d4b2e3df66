//! Coupon store - durable, concurrency-safe persistence for coupons.
//!
//! The store owns the authoritative coupon records. Two rules keep it consistent under
//! concurrent access:
//!
//! - Uniqueness of `code` is enforced by the table's unique constraint, never by a
//!   read-before-insert check. A violation surfaces as [`Error::DuplicateCode`].
//! - The only write to `is_used` is [`try_redeem`], a single conditional
//!   `UPDATE ... WHERE code = ? AND is_used = false`. The database applies it atomically,
//!   so among any number of concurrent callers for one code exactly one sees a row change.
//!   Different codes touch different rows and do not contend on an application lock.

use crate::{
    entities::{Coupon, coupon},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, SqlErr, prelude::*, sea_query::Expr};
use tracing::debug;

/// Result of an atomic redemption attempt against the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeemOutcome {
    /// This call moved the coupon from unused to used
    Redeemed,
    /// The coupon exists but was already used before this call
    AlreadyUsed,
    /// No coupon has this code
    NotFound,
}

/// Creates a new unused coupon with the given code and returns the stored record,
/// including its store-assigned id.
///
/// # Errors
/// Returns [`Error::DuplicateCode`] if a coupon with `code` already exists, or
/// [`Error::Database`] if the insert fails for any other reason.
pub async fn insert_coupon<C>(db: &C, code: &str) -> Result<coupon::Model>
where
    C: ConnectionTrait,
{
    let coupon = coupon::ActiveModel {
        code: Set(code.to_string()),
        is_used: Set(false),
        ..Default::default()
    };

    coupon.insert(db).await.map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::DuplicateCode {
            code: code.to_string(),
        },
        _ => Error::Database(err),
    })
}

/// Retrieves every coupon ordered by id ascending.
pub async fn get_all_coupons<C>(db: &C) -> Result<Vec<coupon::Model>>
where
    C: ConnectionTrait,
{
    Coupon::find()
        .order_by_asc(coupon::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a coupon by its redemption code, returning None if no coupon has it.
///
/// The returned model is a snapshot. Do not base redemption decisions on it; use
/// [`try_redeem`].
pub async fn get_coupon_by_code<C>(db: &C, code: &str) -> Result<Option<coupon::Model>>
where
    C: ConnectionTrait,
{
    Coupon::find()
        .filter(coupon::Column::Code.eq(code))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a coupon by its id, returning None if it does not exist.
pub async fn get_coupon_by_id<C>(db: &C, coupon_id: i64) -> Result<Option<coupon::Model>>
where
    C: ConnectionTrait,
{
    Coupon::find_by_id(coupon_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Atomically marks the coupon with `code` as used if, and only if, it exists and is unused.
///
/// The check and the write are one SQL statement:
/// `UPDATE coupons SET is_used = true WHERE code = ? AND is_used = false`.
/// If it changed a row, this caller won. Otherwise a follow-up lookup tells a missing code
/// apart from a used one; since `is_used` never reverts, an existing row that was not
/// updated is necessarily used.
///
/// Once the update has committed it is final; dropping the returned future afterwards
/// does not undo it.
///
/// # Errors
/// Returns [`Error::Database`] if the store fails. A failed statement leaves `is_used`
/// unchanged.
pub async fn try_redeem<C>(db: &C, code: &str) -> Result<RedeemOutcome>
where
    C: ConnectionTrait,
{
    let result = Coupon::update_many()
        .col_expr(coupon::Column::IsUsed, Expr::value(true))
        .filter(coupon::Column::Code.eq(code))
        .filter(coupon::Column::IsUsed.eq(false))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        debug!(code, "Coupon transitioned to used");
        return Ok(RedeemOutcome::Redeemed);
    }

    match get_coupon_by_code(db, code).await? {
        Some(_) => Ok(RedeemOutcome::AlreadyUsed),
        None => Ok(RedeemOutcome::NotFound),
    }
}
