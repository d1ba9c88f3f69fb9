//! The showcase scene: three gradient-shaded shapes over a shadow-catching
//! floor, one light of every kind, and helpers for the lights that have one.

use crate::camera::PerspectiveCamera;
use crate::geometry::Geometry;
use crate::graph::{Scene, SceneError};
use crate::light::Light;
use crate::material::{GradientMaterial, Material, MaterialHandle, ShadowMaterial};
use glam::Vec3;
use lumen_common::{Color, NodeId, Transform, Viewport};
use std::f32::consts::{FRAC_PI_2, PI};

/// Radians added to the x and y rotation of each shape per frame.
pub const ROTATION_STEP: f32 = 0.01;

pub const CAMERA_FOV: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);

pub const GRADIENT_TOP: u32 = 0xff69b4;
pub const GRADIENT_BOTTOM: u32 = 0xffff00;

const HELPER_SIZE: f32 = 0.2;

/// Everything the frame loop needs, built once at startup.
#[derive(Debug, Clone)]
pub struct DemoScene {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    /// Viewport sampled at build time. Never refreshed.
    pub viewport: Viewport,
    /// The one gradient material shared by the rotating shapes.
    pub gradient: MaterialHandle,
    pub sphere: NodeId,
    pub cube: NodeId,
    pub torus: NodeId,
}

impl DemoScene {
    /// The shapes the frame loop spins.
    pub fn rotating(&self) -> [NodeId; 3] {
        [self.sphere, self.cube, self.torus]
    }

    /// One animation step: spin every rotating shape about x and y.
    pub fn advance(&mut self) {
        for id in self.rotating() {
            if let Some(node) = self.scene.node_mut(id) {
                node.transform.rotation.x += ROTATION_STEP;
                node.transform.rotation.y += ROTATION_STEP;
            }
        }
    }
}

/// Build the showcase for an output surface of the given size.
pub fn build(viewport: Viewport) -> Result<DemoScene, SceneError> {
    let aspect = viewport.aspect();
    let mut camera = PerspectiveCamera::new(CAMERA_FOV, aspect, CAMERA_NEAR, CAMERA_FAR);
    camera.position = CAMERA_POSITION;

    let mut scene = Scene::new();

    let top = Color::from_hex(GRADIENT_TOP);
    let bottom = Color::from_hex(GRADIENT_BOTTOM);
    let gradient = scene.add_material(Material::Gradient(GradientMaterial::new(top, bottom)));

    let sphere = scene.add_mesh(
        "sphere",
        Transform::from_position(Vec3::new(-3.0, 1.0, 0.0)),
        Geometry::Sphere {
            radius: 1.0,
            width_segments: 32,
            height_segments: 32,
        },
        gradient,
    )?;
    let cube = scene.add_mesh(
        "cube",
        Transform::from_position(Vec3::new(0.0, 1.0, 0.0)),
        Geometry::Box {
            width: 1.0,
            height: 1.0,
            depth: 1.0,
        },
        gradient,
    )?;
    let torus = scene.add_mesh(
        "torus",
        Transform::from_position(Vec3::new(3.0, 1.0, 0.0)),
        Geometry::Torus {
            radius: 1.0,
            tube: 0.4,
            radial_segments: 16,
            tubular_segments: 100,
        },
        gradient,
    )?;

    let shadow = scene.add_material(Material::Shadow(ShadowMaterial::new(0.5)));
    scene.add_mesh(
        "floor",
        Transform {
            position: Vec3::new(0.0, -1.0, 0.0),
            rotation: Vec3::new(-FRAC_PI_2, 0.0, 0.0),
            ..Transform::default()
        },
        Geometry::Plane {
            width: 500.0,
            height: 500.0,
        },
        shadow,
    )?;

    scene.add_light(
        "ambient",
        Vec3::ZERO,
        Light::Ambient {
            color: Color::from_hex(0xffffff),
            intensity: 0.5,
        },
    )?;
    let directional = scene.add_light(
        "directional",
        Vec3::new(1.0, 0.25, 0.0),
        Light::Directional {
            color: Color::from_hex(0x00fffc),
            intensity: 0.3,
            target: Vec3::ZERO,
        },
    )?;
    let hemisphere = scene.add_light(
        "hemisphere",
        Vec3::Y,
        Light::Hemisphere {
            sky_color: Color::from_hex(0xff0000),
            ground_color: Color::from_hex(0x0000ff),
            intensity: 0.3,
        },
    )?;
    let point = scene.add_light(
        "point",
        Vec3::new(1.0, -0.5, 1.0),
        Light::Point {
            color: Color::from_hex(0xff9000),
            intensity: 0.5,
            distance: 10.0,
            decay: 2.0,
        },
    )?;
    scene.add_light(
        "rect_area",
        Vec3::ZERO,
        Light::RectArea {
            color: Color::from_hex(0x4e00ff),
            intensity: 2.0,
            width: 1.0,
            height: 1.0,
        },
    )?;
    let spot_target = scene.add_target("spot target", Vec3::ZERO);
    let spot = scene.add_light(
        "spot",
        Vec3::new(0.0, 2.0, 3.0),
        Light::Spot {
            color: Color::from_hex(0xffc0cb),
            intensity: 0.5,
            distance: 10.0,
            angle: PI * 0.1,
            penumbra: 0.25,
            decay: 1.0,
            target: spot_target,
        },
    )?;

    scene.add_helper(hemisphere, HELPER_SIZE)?;
    scene.add_helper(directional, HELPER_SIZE)?;
    scene.add_helper(point, HELPER_SIZE)?;
    scene.add_helper(spot, HELPER_SIZE)?;

    tracing::info!(
        width = viewport.width,
        height = viewport.height,
        nodes = scene.len(),
        "demo scene built"
    );

    Ok(DemoScene {
        scene,
        camera,
        viewport,
        gradient,
        sphere,
        cube,
        torus,
    })
}
