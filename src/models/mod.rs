//! Data models exchanged with the travel booking backend.
//!
//! Field names follow the backend's camelCase JSON; ids arrive as `_id`.
//! The backend owns ids, timestamps and status transitions.

mod booking;
mod common;
mod community_trip;
mod content;
mod coupon;
mod destination;
mod package;
mod permission;

pub use booking::*;
pub use common::*;
pub use community_trip::*;
pub use content::*;
pub use coupon::*;
pub use destination::*;
pub use package::*;
pub use permission::*;
