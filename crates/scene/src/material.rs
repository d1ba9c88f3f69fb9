use glam::Vec3;
use lumen_common::Color;
use serde::{Deserialize, Serialize};

/// Index into a scene's material table. Meshes share a material by sharing a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Material {
    Gradient(GradientMaterial),
    Shadow(ShadowMaterial),
}

impl Material {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Gradient(_) => "gradient",
            Self::Shadow(_) => "shadow",
        }
    }
}

/// Unlit two-color blend keyed on the vertical component of the surface normal.
///
/// The GPU shader evaluates the same expression per fragment; `shade` is the
/// CPU reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientMaterial {
    pub top: Color,
    pub bottom: Color,
}

impl GradientMaterial {
    pub fn new(top: Color, bottom: Color) -> Self {
        Self { top, bottom }
    }

    /// `normal.y * 0.5 + 0.5` on the normalized normal, in `[0, 1]`.
    pub fn blend_factor(normal: Vec3) -> f32 {
        normal.normalize_or_zero().y * 0.5 + 0.5
    }

    pub fn shade(&self, normal: Vec3) -> Color {
        self.bottom.lerp(self.top, Self::blend_factor(normal))
    }
}

/// Transparent material that only darkens where shadows land.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowMaterial {
    pub color: Color,
    pub opacity: f32,
}

impl ShadowMaterial {
    pub fn new(opacity: f32) -> Self {
        Self {
            color: Color::BLACK,
            opacity,
        }
    }

    /// Alpha written for a fragment lit with the given shadow coverage in `[0, 1]`.
    pub fn alpha(&self, shadow: f32) -> f32 {
        self.opacity * shadow.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pink_yellow() -> GradientMaterial {
        GradientMaterial::new(Color::from_hex(0xff69b4), Color::from_hex(0xffff00))
    }

    #[test]
    fn straight_up_is_top_color() {
        let m = pink_yellow();
        assert_eq!(m.shade(Vec3::Y), m.top);
    }

    #[test]
    fn straight_down_is_bottom_color() {
        let m = pink_yellow();
        assert_eq!(m.shade(Vec3::NEG_Y), m.bottom);
    }

    #[test]
    fn horizontal_is_even_mix() {
        let m = pink_yellow();
        let c = m.shade(Vec3::X);
        let expected = Color::new(
            (m.top.r + m.bottom.r) / 2.0,
            (m.top.g + m.bottom.g) / 2.0,
            (m.top.b + m.bottom.b) / 2.0,
        );
        assert!((c.r - expected.r).abs() < 1e-6);
        assert!((c.g - expected.g).abs() < 1e-6);
        assert!((c.b - expected.b).abs() < 1e-6);
    }

    #[test]
    fn unnormalized_normals_are_normalized_first() {
        let m = pink_yellow();
        assert_eq!(m.shade(Vec3::new(0.0, 2.0, 0.0)), m.top);
        let diagonal = GradientMaterial::blend_factor(Vec3::new(3.0, 3.0, 0.0));
        let expected = 0.5 + 0.5 * std::f32::consts::FRAC_1_SQRT_2;
        assert!((diagonal - expected).abs() < 1e-6);
    }

    #[test]
    fn shadow_alpha_scales_with_opacity() {
        let s = ShadowMaterial::new(0.5);
        assert_eq!(s.alpha(0.0), 0.0);
        assert_eq!(s.alpha(1.0), 0.5);
        assert_eq!(s.alpha(4.0), 0.5);
    }
}
