//! wgpu render backend for lumen scenes.
//!
//! Draws gradient-shaded meshes, shadow-catching transparent meshes and
//! light helper wireframes.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - Geometry is uploaded once; per-frame work is uniform and instance writes.
//! - Colors are uploaded in linear space; the surface format does sRGB encoding.

mod gpu;
mod shaders;
pub mod uniforms;

pub use gpu::WgpuRenderer;
