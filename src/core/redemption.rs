//! Redemption service - validates input and delegates to the store's atomic transition.
//!
//! All race-sensitive logic lives in [`coupon::try_redeem`]; this layer only rejects
//! missing input and translates the store outcome into a user-facing result.

use crate::{
    core::coupon::{self, RedeemOutcome},
    errors::Result,
};
use sea_orm::ConnectionTrait;
use tracing::{info, instrument};

/// User-facing result of a redemption request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedemptionResult {
    /// The request carried no code, or an empty one
    NoCodeProvided,
    /// No coupon has the given code
    NotFound,
    /// The coupon had been redeemed before
    AlreadyUsed,
    /// This request redeemed the coupon
    Redeemed,
}

impl RedemptionResult {
    /// The message shown to the person redeeming.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoCodeProvided => "No coupon code provided.",
            Self::NotFound => "Invalid coupon code.",
            Self::AlreadyUsed => "This coupon has already been used.",
            Self::Redeemed => "Coupon redeemed successfully!",
        }
    }
}

impl From<RedeemOutcome> for RedemptionResult {
    fn from(outcome: RedeemOutcome) -> Self {
        match outcome {
            RedeemOutcome::Redeemed => Self::Redeemed,
            RedeemOutcome::AlreadyUsed => Self::AlreadyUsed,
            RedeemOutcome::NotFound => Self::NotFound,
        }
    }
}

/// Redeems `code` if it names an unused coupon.
///
/// An absent or empty code is answered with [`RedemptionResult::NoCodeProvided`] without
/// touching the store. Anything else is passed verbatim to [`coupon::try_redeem`].
///
/// # Errors
/// Returns an error only if the store fails.
#[instrument(skip(db))]
pub async fn redeem<C>(db: &C, code: Option<&str>) -> Result<RedemptionResult>
where
    C: ConnectionTrait,
{
    let Some(code) = code.filter(|c| !c.is_empty()) else {
        return Ok(RedemptionResult::NoCodeProvided);
    };

    let result = RedemptionResult::from(coupon::try_redeem(db, code).await?);
    info!(?result, "Redemption attempted");
    Ok(result)
}
