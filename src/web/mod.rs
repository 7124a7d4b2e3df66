//! Web layer - HTTP interface over the coupon services.
//!
//! Route table:
//!
//! | Method | Path            | Handler                 |
//! |--------|-----------------|-------------------------|
//! | GET    | `/`             | [`handlers::index`]     |
//! | POST   | `/`             | [`handlers::issue`]     |
//! | GET    | `/redeem`       | [`handlers::redeem`]    |
//! | GET    | `/qrcode/{id}`  | [`handlers::qr_code`]   |

/// Request handlers
pub mod handlers;
/// QR image encoding
pub mod qr;
/// HTML rendering
pub mod render;

use crate::{
    config::AppConfig,
    core::codes::{CodeSource, RandomCodes},
    errors::{Error, Result},
};
use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};
use url::Url;

/// Shared data available to all handlers.
///
/// Holds the store connection, configuration and code source. Cloning is cheap: the
/// connection is a pool handle and everything else is reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Store connection for all coupon operations
    pub database: DatabaseConnection,
    /// Validated application configuration
    pub config: Arc<AppConfig>,
    /// Source of candidate coupon codes
    pub codes: Arc<dyn CodeSource>,
    base_url: Url,
}

impl AppState {
    /// Creates the handler state, generating codes with [`RandomCodes`] sized by the config.
    ///
    /// # Errors
    /// Returns an error if the configured public base URL is invalid.
    pub fn new(database: DatabaseConnection, config: AppConfig) -> Result<Self> {
        let codes = Arc::new(RandomCodes::new(config.issuance.code_bytes));
        Self::with_codes(database, config, codes)
    }

    /// Creates the handler state with an explicit code source.
    pub fn with_codes(
        database: DatabaseConnection,
        config: AppConfig,
        codes: Arc<dyn CodeSource>,
    ) -> Result<Self> {
        let base_url = config.public_base_url()?;
        Ok(Self {
            database,
            config: Arc::new(config),
            codes,
            base_url,
        })
    }

    /// Absolute URL that redeems the coupon with `code`.
    pub fn redemption_url(&self, code: &str) -> Result<Url> {
        let mut url = self.base_url.join("redeem")?;
        url.query_pairs_mut().clear().append_pair("code", code);
        Ok(url)
    }
}

/// Builds the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::issue))
        .route("/redeem", get(handlers::redeem))
        .route("/qrcode/:id", get(handlers::qr_code))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::CouponNotFound { key } => {
                debug!(key = %key, "Coupon not found");
                (
                    StatusCode::NOT_FOUND,
                    Html(render::message_page("Not Found", "Coupon not found.")),
                )
                    .into_response()
            }
            other => {
                error!("Request failed: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(render::message_page(
                        "Server Error",
                        "Something went wrong. Please try again later.",
                    )),
                )
                    .into_response()
            }
        }
    }
}
