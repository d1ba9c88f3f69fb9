//! Scene layer: the retained-mode objects the renderers consume.
//!
//! # Invariants
//! - Every node enters the scene exactly once, through `Scene::add*`.
//! - Node ids are assigned in insertion order and never reused.
//! - Helpers are derived from their light; they carry no independent state.
//! - After `demo::build`, only the rotation of the three showcase meshes changes.

pub mod camera;
pub mod demo;
pub mod geometry;
pub mod graph;
pub mod helper;
pub mod light;
pub mod material;

pub use camera::PerspectiveCamera;
pub use demo::{DemoScene, ROTATION_STEP};
pub use geometry::{Geometry, MeshData, Vertex};
pub use graph::{Mesh, Scene, SceneError, SceneNode, SceneObject, SceneSummary};
pub use helper::{Helper, HelperKind, LineSegment};
pub use light::{Light, LightKind};
pub use material::{GradientMaterial, Material, MaterialHandle, ShadowMaterial};
