//! Core business logic - framework-agnostic coupon operations.
//!
//! Every function takes the store connection explicitly; nothing here knows about HTTP.

/// Random coupon code generation
pub mod codes;
/// Coupon store operations, including the atomic redemption transition
pub mod coupon;
/// Issuing new coupons with bounded retry on code collisions
pub mod issuance;
/// Redeeming coupons by code
pub mod redemption;
