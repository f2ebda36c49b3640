//! Create/edit forms and the multipart payloads they submit.

pub mod destination;
pub mod editor;
pub mod package;
pub mod payload;

pub use destination::*;
pub use editor::*;
pub use package::*;
pub use payload::*;
