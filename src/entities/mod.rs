//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod coupon;

pub use coupon::{Column as CouponColumn, Entity as Coupon, Model as CouponModel};
