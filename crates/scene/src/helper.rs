use crate::light::Light;
use glam::Vec3;
use lumen_common::{Color, NodeId};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

const CIRCLE_SEGMENTS: u32 = 32;
/// Cone length used for spot lights with unlimited range.
const UNBOUNDED_SPOT_LENGTH: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelperKind {
    Hemisphere,
    Directional,
    Point,
    Spot,
}

/// Debug wireframe bound to one light node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Helper {
    pub light: NodeId,
    pub kind: HelperKind,
    /// Gizmo size; ignored by spot helpers, whose cone follows the light.
    pub size: f32,
}

/// World-space colored line, the unit the helper pass draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
}

impl LineSegment {
    fn new(start: Vec3, end: Vec3, color: Color) -> Self {
        Self { start, end, color }
    }
}

impl Helper {
    /// Wireframe for `light` placed at `position` and aimed at `target`.
    pub fn lines(&self, light: &Light, position: Vec3, target: Vec3) -> Vec<LineSegment> {
        if light.helper_kind() != Some(self.kind) {
            tracing::warn!(
                kind = ?self.kind,
                light = ?light.kind(),
                "helper does not match its light"
            );
            return Vec::new();
        }
        match *light {
            Light::Hemisphere {
                sky_color,
                ground_color,
                ..
            } => hemisphere(position, self.size, sky_color, ground_color),
            Light::Directional { color, .. } => directional(position, target, self.size, color),
            Light::Point { color, .. } => point(position, self.size, color),
            Light::Spot {
                color,
                distance,
                angle,
                ..
            } => spot(position, target, distance, angle, color),
            Light::Ambient { .. } | Light::RectArea { .. } => Vec::new(),
        }
    }
}

fn basis(direction: Vec3) -> (Vec3, Vec3, Vec3) {
    let dir = direction.try_normalize().unwrap_or(Vec3::NEG_Z);
    let (u, v) = dir.any_orthonormal_pair();
    (dir, u, v)
}

fn circle(center: Vec3, u: Vec3, v: Vec3, radius: f32, color: Color) -> Vec<LineSegment> {
    let at = |i: u32| {
        let a = i as f32 / CIRCLE_SEGMENTS as f32 * TAU;
        center + (u * a.cos() + v * a.sin()) * radius
    };
    (0..CIRCLE_SEGMENTS)
        .map(|i| LineSegment::new(at(i), at(i + 1), color))
        .collect()
}

/// Colors of the upper half, the lower half and the equator of an octahedron.
struct OctahedronColors {
    top: Color,
    bottom: Color,
    equator: Color,
}

/// Twelve-edge octahedron around `center`, with poles along `axes.0`.
fn octahedron(
    center: Vec3,
    axes: (Vec3, Vec3, Vec3),
    size: f32,
    colors: OctahedronColors,
) -> Vec<LineSegment> {
    let (up, u, v) = axes;
    let top = center + up * size;
    let bottom = center - up * size;
    let ring = [u, v, -u, -v].map(|d| center + d * size);

    let mut lines = Vec::with_capacity(12);
    for (i, &p) in ring.iter().enumerate() {
        lines.push(LineSegment::new(top, p, colors.top));
        lines.push(LineSegment::new(bottom, p, colors.bottom));
        let next = ring[(i + 1) % ring.len()];
        lines.push(LineSegment::new(p, next, colors.equator));
    }
    lines
}

fn hemisphere(position: Vec3, size: f32, sky: Color, ground: Color) -> Vec<LineSegment> {
    // Oriented along the light's offset from the origin; sky half points away from it.
    let colors = OctahedronColors {
        top: sky,
        bottom: ground,
        equator: ground.lerp(sky, 0.5),
    };
    octahedron(position, basis(position), size, colors)
}

/// Low-poly wire sphere: four segments around, two from pole to pole.
fn point(position: Vec3, size: f32, color: Color) -> Vec<LineSegment> {
    let colors = OctahedronColors {
        top: color,
        bottom: color,
        equator: color,
    };
    octahedron(position, (Vec3::Y, Vec3::X, Vec3::Z), size, colors)
}

fn directional(position: Vec3, target: Vec3, size: f32, color: Color) -> Vec<LineSegment> {
    let (_, u, v) = basis(target - position);
    let corners = [u + v, -u + v, -u - v, u - v].map(|d| position + d * size);
    let mut lines = Vec::with_capacity(5);
    for (i, &corner) in corners.iter().enumerate() {
        lines.push(LineSegment::new(corner, corners[(i + 1) % 4], color));
    }
    lines.push(LineSegment::new(position, target, color));
    lines
}

fn spot(apex: Vec3, target: Vec3, range: f32, angle: f32, color: Color) -> Vec<LineSegment> {
    let length = if range > 0.0 {
        range
    } else {
        UNBOUNDED_SPOT_LENGTH
    };
    let (dir, u, v) = basis(target - apex);
    let center = apex + dir * length;
    let radius = length * angle.tan();

    let mut lines = circle(center, u, v, radius, color);
    for d in [u, v, -u, -v] {
        lines.push(LineSegment::new(apex, center + d * radius, color));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_light() -> Light {
        Light::Point {
            color: Color::from_hex(0xff9000),
            intensity: 0.5,
            distance: 10.0,
            decay: 2.0,
        }
    }

    #[test]
    fn point_helper_is_octahedron_in_light_color() {
        let helper = Helper {
            light: NodeId(0),
            kind: HelperKind::Point,
            size: 0.2,
        };
        let center = Vec3::new(1.0, -0.5, 1.0);
        let lines = helper.lines(&point_light(), center, Vec3::ZERO);
        assert_eq!(lines.len(), 12);
        for l in &lines {
            assert!((l.start.distance(center) - 0.2).abs() < 1e-5);
            assert!((l.end.distance(center) - 0.2).abs() < 1e-5);
            assert_eq!(l.color, Color::from_hex(0xff9000));
        }
        let top = center + Vec3::Y * 0.2;
        let spokes = lines.iter().filter(|l| l.start == top).count();
        assert_eq!(spokes, 4);
    }

    #[test]
    fn directional_helper_points_at_target() {
        let light = Light::Directional {
            color: Color::from_hex(0x00fffc),
            intensity: 0.3,
            target: Vec3::ZERO,
        };
        let helper = Helper {
            light: NodeId(0),
            kind: HelperKind::Directional,
            size: 0.2,
        };
        let pos = Vec3::new(1.0, 0.25, 0.0);
        let lines = helper.lines(&light, pos, Vec3::ZERO);
        assert_eq!(lines.len(), 5);
        let aim = lines.last().unwrap();
        assert_eq!((aim.start, aim.end), (pos, Vec3::ZERO));
        // The square is perpendicular to the aim line.
        let dir = (Vec3::ZERO - pos).normalize();
        for l in &lines[..4] {
            assert!((l.end - l.start).dot(dir).abs() < 1e-5);
        }
    }

    #[test]
    fn spot_cone_reaches_distance() {
        let angle = std::f32::consts::PI * 0.1;
        let light = Light::Spot {
            color: Color::from_hex(0xffc0cb),
            intensity: 0.5,
            distance: 10.0,
            angle,
            penumbra: 0.25,
            decay: 1.0,
            target: NodeId(0),
        };
        let helper = Helper {
            light: NodeId(1),
            kind: HelperKind::Spot,
            size: 0.0,
        };
        let pos = Vec3::new(0.0, 2.0, 3.0);
        let lines = helper.lines(&light, pos, Vec3::ZERO);
        let spokes = &lines[CIRCLE_SEGMENTS as usize..];
        assert_eq!(spokes.len(), 4);
        let slant = 10.0 / angle.cos();
        for s in spokes {
            assert_eq!(s.start, pos);
            assert!((s.end.distance(pos) - slant).abs() < 1e-3);
        }
    }

    #[test]
    fn hemisphere_halves_use_sky_and_ground() {
        let sky = Color::from_hex(0xff0000);
        let ground = Color::from_hex(0x0000ff);
        let light = Light::Hemisphere {
            sky_color: sky,
            ground_color: ground,
            intensity: 0.3,
        };
        let helper = Helper {
            light: NodeId(0),
            kind: HelperKind::Hemisphere,
            size: 0.2,
        };
        let pos = Vec3::Y;
        let lines = helper.lines(&light, pos, Vec3::ZERO);
        assert_eq!(lines.len(), 12);
        let top = pos + Vec3::Y * 0.2;
        for l in lines.iter().filter(|l| l.start.distance(top) < 1e-6) {
            assert_eq!(l.color, sky);
        }
    }

    #[test]
    fn mismatched_helper_draws_nothing() {
        let helper = Helper {
            light: NodeId(0),
            kind: HelperKind::Spot,
            size: 0.2,
        };
        let lines = helper.lines(&point_light(), Vec3::ZERO, Vec3::ZERO);
        assert!(lines.is_empty());
    }
}
