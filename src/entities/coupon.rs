//! Coupon entity - A single-use redemption code.
//!
//! Each coupon has a store-assigned id, a globally unique code used as the external
//! redemption key, and a one-way `is_used` flag that only ever moves from false to true.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Coupon database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
    /// Unique identifier assigned by the store on insertion
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Opaque redemption code, unique across all coupons ever created
    #[sea_orm(unique)]
    pub code: String,
    /// Whether the coupon has been redeemed. Never reverts to false.
    pub is_used: bool,
}

/// Coupons have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
