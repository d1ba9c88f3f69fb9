use crate::helper::HelperKind;
use glam::Vec3;
use lumen_common::{Color, NodeId};
use serde::{Deserialize, Serialize};

/// Every light kind the scene knows about, each with its own parameters.
///
/// Positions live on the owning node's transform, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    Directional {
        color: Color,
        intensity: f32,
        /// World-space point the light shines towards.
        target: Vec3,
    },
    Hemisphere {
        sky_color: Color,
        ground_color: Color,
        intensity: f32,
    },
    Point {
        color: Color,
        intensity: f32,
        /// Range cutoff; `0` means unlimited.
        distance: f32,
        decay: f32,
    },
    RectArea {
        color: Color,
        intensity: f32,
        width: f32,
        height: f32,
    },
    Spot {
        color: Color,
        intensity: f32,
        distance: f32,
        /// Half-angle of the cone, radians.
        angle: f32,
        penumbra: f32,
        decay: f32,
        /// Node the cone is aimed at. Must be in the same scene.
        target: NodeId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    Ambient,
    Directional,
    Hemisphere,
    Point,
    RectArea,
    Spot,
}

impl Light {
    pub fn kind(&self) -> LightKind {
        match self {
            Self::Ambient { .. } => LightKind::Ambient,
            Self::Directional { .. } => LightKind::Directional,
            Self::Hemisphere { .. } => LightKind::Hemisphere,
            Self::Point { .. } => LightKind::Point,
            Self::RectArea { .. } => LightKind::RectArea,
            Self::Spot { .. } => LightKind::Spot,
        }
    }

    pub fn intensity(&self) -> f32 {
        match *self {
            Self::Ambient { intensity, .. }
            | Self::Directional { intensity, .. }
            | Self::Hemisphere { intensity, .. }
            | Self::Point { intensity, .. }
            | Self::RectArea { intensity, .. }
            | Self::Spot { intensity, .. } => intensity,
        }
    }

    /// Main color; the sky color for hemisphere lights.
    pub fn color(&self) -> Color {
        match *self {
            Self::Ambient { color, .. }
            | Self::Directional { color, .. }
            | Self::Point { color, .. }
            | Self::RectArea { color, .. }
            | Self::Spot { color, .. } => color,
            Self::Hemisphere { sky_color, .. } => sky_color,
        }
    }

    /// Which debug helper can visualize this light, if any.
    pub fn helper_kind(&self) -> Option<HelperKind> {
        self.kind().helper_kind()
    }
}

impl LightKind {
    pub fn helper_kind(self) -> Option<HelperKind> {
        match self {
            Self::Hemisphere => Some(HelperKind::Hemisphere),
            Self::Directional => Some(HelperKind::Directional),
            Self::Point => Some(HelperKind::Point),
            Self::Spot => Some(HelperKind::Spot),
            Self::Ambient | Self::RectArea => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Ambient => "ambient",
            Self::Directional => "directional",
            Self::Hemisphere => "hemisphere",
            Self::Point => "point",
            Self::RectArea => "rect_area",
            Self::Spot => "spot",
        }
    }
}
