//! Issuance service - creates new coupons.
//!
//! A generated code is only a candidate; the store decides whether it is unique. On a
//! collision a new candidate is drawn, up to a bounded number of attempts.

use crate::{
    core::{codes::CodeSource, coupon},
    entities::coupon::Model,
    errors::{Error, Result},
};
use sea_orm::ConnectionTrait;
use tracing::{info, instrument, warn};

/// Issues one new coupon and returns the persisted record, including its assigned id.
///
/// # Errors
/// Returns [`Error::IssuanceFailed`] if `max_attempts` consecutive candidates all collided
/// with existing codes, or [`Error::Database`] if the store fails.
#[instrument(skip(db, codes))]
pub async fn issue_coupon<C, S>(db: &C, codes: &S, max_attempts: u32) -> Result<Model>
where
    C: ConnectionTrait,
    S: CodeSource + ?Sized,
{
    for attempt in 1..=max_attempts {
        let code = codes.generate();
        match coupon::insert_coupon(db, &code).await {
            Ok(coupon) => {
                info!(coupon_id = coupon.id, "Issued coupon");
                return Ok(coupon);
            }
            Err(Error::DuplicateCode { code }) => {
                warn!(attempt, code = %code, "Generated coupon code collided, retrying");
            }
            Err(e) => return Err(e),
        }
    }

    Err(Error::IssuanceFailed {
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::codes::RandomCodes;
    use crate::core::coupon::get_all_coupons;
    use crate::test_utils::*;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_issue_coupon_persists_unused_coupon() -> Result<()> {
        let db = setup_test_db().await?;

        let coupon = issue_coupon(&db, &RandomCodes::default(), 5).await?;

        assert!(coupon.id > 0);
        assert_eq!(coupon.code.len(), 16);
        assert!(!coupon.is_used);
        assert_eq!(get_all_coupons(&db).await?, vec![coupon]);
        Ok(())
    }

    #[tokio::test]
    async fn test_issued_codes_are_pairwise_distinct() -> Result<()> {
        let db = setup_test_db().await?;
        let codes = RandomCodes::default();

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let coupon = issue_coupon(&db, &codes, 5).await?;
            assert!(seen.insert(coupon.code));
        }
        assert_eq!(get_all_coupons(&db).await?.len(), 200);
        Ok(())
    }

    #[tokio::test]
    async fn test_issue_coupon_retries_after_collision() -> Result<()> {
        let db = setup_test_db().await?;
        coupon::insert_coupon(&db, "taken").await?;

        let codes = ScriptedCodes::new(["taken", "taken", "fresh"]);
        let coupon = issue_coupon(&db, &codes, 5).await?;

        assert_eq!(coupon.code, "fresh");
        assert_eq!(get_all_coupons(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_issue_coupon_gives_up_after_max_attempts() -> Result<()> {
        let db = setup_test_db().await?;
        coupon::insert_coupon(&db, "taken").await?;

        let codes = ScriptedCodes::new(["taken"]);
        let result = issue_coupon(&db, &codes, 5).await;

        assert!(matches!(result, Err(Error::IssuanceFailed { attempts: 5 })));
        assert_eq!(get_all_coupons(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_issue_coupon_succeeds_on_last_attempt() -> Result<()> {
        let db = setup_test_db().await?;
        coupon::insert_coupon(&db, "taken").await?;

        let codes = ScriptedCodes::new(["taken", "taken", "last-chance"]);
        let coupon = issue_coupon(&db, &codes, 3).await?;
        assert_eq!(coupon.code, "last-chance");
        Ok(())
    }
}
