//! Unified error type for the coupon manager.
//!
//! Store, issuance, configuration and rendering failures all funnel into [`Error`].
//! Redemption outcomes such as "already used" are *not* errors; they are reported
//! through [`crate::core::redemption::RedemptionResult`].

use thiserror::Error;

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or is invalid
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// The coupon store reported a failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A coupon with this code already exists
    #[error("Coupon code already exists: {code}")]
    DuplicateCode {
        /// The colliding code
        code: String,
    },

    /// No coupon matches the given id or code
    #[error("Coupon not found: {key}")]
    CouponNotFound {
        /// The id or code that was looked up
        key: String,
    },

    /// Every generated code collided with an existing coupon
    #[error("Could not issue a unique coupon code after {attempts} attempts")]
    IssuanceFailed {
        /// Number of insert attempts made
        attempts: u32,
    },

    /// The redemption URL could not be encoded as a QR symbol
    #[error("QR code error: {0}")]
    QrCode(#[from] qrcode::types::QrError),

    /// The QR image could not be encoded as PNG
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// A URL could not be parsed or joined
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Filesystem or socket I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Config`] with the given message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
