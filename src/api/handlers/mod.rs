//! Route handlers.

mod entity;
mod system;

pub use entity::*;
pub use system::*;
