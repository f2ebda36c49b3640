//! List screens: paging, filters, debounced search and confirmed deletes.

pub mod list;
pub mod resources;

pub use list::*;
pub use resources::*;
