//! CPU-side layouts of everything uploaded to the GPU.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use lumen_scene::{LineSegment, Material, PerspectiveCamera};

/// Shadow coverage fed to shadow-catching materials. No shadow maps are
/// rendered, so nothing is ever occluded.
pub const SHADOW_COVERAGE: f32 = 0.0;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
}

impl CameraUniforms {
    pub fn from_camera(camera: &PerspectiveCamera) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            view: camera.view_matrix().to_cols_array_2d(),
        }
    }
}

/// One layout for every material kind.
///
/// - gradient: `color_a` = top, `color_b` = bottom
/// - shadow: `color_a` = shadow color, `params.x` = opacity, `params.y` = coverage
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MaterialUniforms {
    pub color_a: [f32; 4],
    pub color_b: [f32; 4],
    pub params: [f32; 4],
}

impl MaterialUniforms {
    pub fn from_material(material: &Material) -> Self {
        match material {
            Material::Gradient(g) => Self {
                color_a: g.top.with_alpha(1.0),
                color_b: g.bottom.with_alpha(1.0),
                params: [0.0; 4],
            },
            Material::Shadow(s) => Self {
                color_a: s.color.with_alpha(1.0),
                color_b: [0.0; 4],
                params: [s.opacity, SHADOW_COVERAGE, 0.0, 0.0],
            },
        }
    }
}

/// Per-draw model matrix, fed through an instance-rate vertex buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    pub model_0: [f32; 4],
    pub model_1: [f32; 4],
    pub model_2: [f32; 4],
    pub model_3: [f32; 4],
}

impl InstanceData {
    pub fn from_matrix(model: Mat4) -> Self {
        let cols = model.to_cols_array_2d();
        Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// Flatten helper segments into line-list vertices.
pub fn line_vertices(lines: &[LineSegment]) -> Vec<LineVertex> {
    lines
        .iter()
        .flat_map(|l| {
            let color = l.color.with_alpha(1.0);
            [
                LineVertex {
                    position: l.start.to_array(),
                    color,
                },
                LineVertex {
                    position: l.end.to_array(),
                    color,
                },
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use lumen_common::{Color, Viewport};
    use lumen_scene::{GradientMaterial, ShadowMaterial};

    #[test]
    fn layouts_match_wgsl_sizes() {
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 128);
        assert_eq!(std::mem::size_of::<MaterialUniforms>(), 48);
        assert_eq!(std::mem::size_of::<InstanceData>(), 64);
        assert_eq!(std::mem::size_of::<LineVertex>(), 28);
    }

    #[test]
    fn gradient_packs_top_then_bottom() {
        let top = Color::from_hex(0xff69b4);
        let bottom = Color::from_hex(0xffff00);
        let material = Material::Gradient(GradientMaterial::new(top, bottom));
        let u = MaterialUniforms::from_material(&material);
        assert_eq!(u.color_a, top.with_alpha(1.0));
        assert_eq!(u.color_b, bottom.with_alpha(1.0));
    }

    #[test]
    fn shadow_floor_is_fully_transparent_without_shadows() {
        let material = ShadowMaterial::new(0.5);
        let u = MaterialUniforms::from_material(&Material::Shadow(material));
        assert_eq!(u.params[0], 0.5);
        assert_eq!(u.params[0] * u.params[1], material.alpha(SHADOW_COVERAGE));
        assert_eq!(material.alpha(SHADOW_COVERAGE), 0.0);
    }

    #[test]
    fn instance_columns_round_trip() {
        let model = Mat4::from_translation(Vec3::new(3.0, 1.0, 0.0));
        let inst = InstanceData::from_matrix(model);
        assert_eq!(inst.model_3, [3.0, 1.0, 0.0, 1.0]);
        assert_eq!(inst.model_0, [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn camera_uniforms_follow_camera() {
        let demo = lumen_scene::demo::build(Viewport::new(1280, 720)).unwrap();
        let u = CameraUniforms::from_camera(&demo.camera);
        assert_eq!(u.view[3], [0.0, 0.0, -5.0, 1.0]);
    }

    #[test]
    fn two_vertices_per_segment() {
        let demo = lumen_scene::demo::build(Viewport::new(1280, 720)).unwrap();
        let lines = demo.scene.helper_lines();
        let verts = line_vertices(&lines);
        assert_eq!(verts.len(), lines.len() * 2);
        assert!(verts.iter().all(|v| v.color[3] == 1.0));
    }
}
