//! Shared value types used by every lumen crate.

mod color;
mod types;

pub use color::Color;
pub use types::{NodeId, Transform, Viewport};
