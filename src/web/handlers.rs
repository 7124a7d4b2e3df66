//! HTTP handlers for listing, issuing, redeeming and QR images.
//!
//! Handlers hold no locks; the only atomic region is the store's own redemption statement.

use crate::{
    core::{coupon, issuance, redemption},
    errors::{Error, Result},
    web::{
        AppState, qr,
        render::{self, CouponRow},
    },
};
use axum::{
    extract::{Path, RawQuery, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
};
use url::form_urlencoded;

/// First `code` value in a query string; later repeats are ignored.
fn first_code(query: Option<&str>) -> Option<String> {
    form_urlencoded::parse(query?.as_bytes())
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
}

/// `GET /` - lists every coupon.
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let coupons = coupon::get_all_coupons(&state.database).await?;

    let rows = coupons
        .into_iter()
        .map(|c| -> Result<CouponRow> {
            Ok(CouponRow {
                redeem_url: state.redemption_url(&c.code)?.into(),
                id: c.id,
                code: c.code,
                is_used: c.is_used,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Html(render::index_page(&rows)))
}

/// `POST /` - issues one coupon, then sends the browser back to the listing.
pub async fn issue(State(state): State<AppState>) -> Result<Redirect> {
    issuance::issue_coupon(
        &state.database,
        state.codes.as_ref(),
        state.config.issuance.max_attempts,
    )
    .await?;
    Ok(Redirect::to("/"))
}

/// `GET /redeem?code=...` - redeems a coupon and reports the outcome as a message.
pub async fn redeem(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Html<String>> {
    let code = first_code(query.as_deref());
    let result = redemption::redeem(&state.database, code.as_deref()).await?;
    Ok(Html(render::redeem_page(result.message())))
}

/// `GET /qrcode/{id}` - PNG QR image encoding the coupon's redemption URL.
pub async fn qr_code(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let not_found = || Error::CouponNotFound { key: id.clone() };

    let coupon_id: i64 = id.parse().map_err(|_| not_found())?;
    let coupon = coupon::get_coupon_by_id(&state.database, coupon_id)
        .await?
        .ok_or_else(not_found)?;

    let url = state.redemption_url(&coupon.code)?;
    let png = qr::render_png(url.as_str(), state.config.qr.min_dimension)?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_code() {
        assert_eq!(first_code(None), None);
        assert_eq!(first_code(Some("")), None);
        assert_eq!(first_code(Some("other=1")), None);
        assert_eq!(first_code(Some("code=")), Some(String::new()));
        assert_eq!(first_code(Some("code=a&code=b")), Some("a".to_string()));
        assert_eq!(first_code(Some("x=1&code=a+b%26c")), Some("a b&c".to_string()));
    }
}
