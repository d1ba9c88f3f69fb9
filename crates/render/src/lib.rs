//! Rendering adapter: renderer-agnostic interface and the frame loop.
//!
//! # Invariants
//! - Renderers read the scene; they never mutate it.
//! - The frame loop is the only writer after the scene is built, and it only
//!   touches the rotation of the showcase shapes.
//! - The loop has no exit of its own; it stops only when its stop condition says so.

mod frame;
mod renderer;

pub use frame::{AfterFrames, FrameLoop, Never, StopCondition, StopWhen};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "lumen-render v0.1.0"
}
