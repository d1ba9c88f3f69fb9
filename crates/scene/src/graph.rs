use crate::geometry::Geometry;
use crate::helper::{Helper, LineSegment};
use crate::light::{Light, LightKind};
use crate::material::{Material, MaterialHandle};
use glam::Vec3;
use lumen_common::{NodeId, Transform};
use serde::Serialize;

/// Errors from scene construction.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("node {0:?} not found")]
    NodeNotFound(NodeId),
    #[error("material {0:?} not found")]
    MaterialNotFound(MaterialHandle),
    #[error("node {0:?} is not a light")]
    NotALight(NodeId),
    #[error("{} lights have no helper", .0.name())]
    NoHelper(LightKind),
}

/// Geometry paired with a material from the scene's material table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mesh {
    pub geometry: Geometry,
    pub material: MaterialHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneObject {
    Mesh(Mesh),
    Light(Light),
    /// Bare positioned node, used as an aim point.
    Target,
    Helper(Helper),
}

impl SceneObject {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Mesh(_) => "mesh",
            Self::Light(_) => "light",
            Self::Target => "target",
            Self::Helper(_) => "helper",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneNode {
    pub name: String,
    pub transform: Transform,
    pub object: SceneObject,
}

/// Scene root: an insertion-ordered list of nodes plus the materials they share.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    materials: Vec<Material>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        let handle = MaterialHandle(self.materials.len() as u32);
        self.materials.push(material);
        handle
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle.0 as usize)
    }

    pub fn material_mut(&mut self, handle: MaterialHandle) -> Option<&mut Material> {
        self.materials.get_mut(handle.0 as usize)
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    fn push(&mut self, name: &str, transform: Transform, object: SceneObject) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        tracing::debug!(id = id.0, name, kind = object.type_name(), "node added");
        self.nodes.push(SceneNode {
            name: name.to_owned(),
            transform,
            object,
        });
        id
    }

    pub fn add_mesh(
        &mut self,
        name: &str,
        transform: Transform,
        geometry: Geometry,
        material: MaterialHandle,
    ) -> Result<NodeId, SceneError> {
        self.material(material)
            .ok_or(SceneError::MaterialNotFound(material))?;
        let mesh = Mesh { geometry, material };
        Ok(self.push(name, transform, SceneObject::Mesh(mesh)))
    }

    /// Add a light. Spot lights must aim at a node already in the scene.
    pub fn add_light(
        &mut self,
        name: &str,
        position: Vec3,
        light: Light,
    ) -> Result<NodeId, SceneError> {
        if let Light::Spot { target, .. } = light {
            self.node(target).ok_or(SceneError::NodeNotFound(target))?;
        }
        let transform = Transform::from_position(position);
        Ok(self.push(name, transform, SceneObject::Light(light)))
    }

    pub fn add_target(&mut self, name: &str, position: Vec3) -> NodeId {
        let transform = Transform::from_position(position);
        self.push(name, transform, SceneObject::Target)
    }

    /// Attach the debug helper matching the light at `light`.
    pub fn add_helper(&mut self, light: NodeId, size: f32) -> Result<NodeId, SceneError> {
        let node = self.node(light).ok_or(SceneError::NodeNotFound(light))?;
        let SceneObject::Light(l) = &node.object else {
            return Err(SceneError::NotALight(light));
        };
        let kind = l.helper_kind().ok_or(SceneError::NoHelper(l.kind()))?;
        let name = format!("{} helper", node.name);
        Ok(self.push(
            &name,
            Transform::default(),
            SceneObject::Helper(Helper { light, kind, size }),
        ))
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &SceneNode, &Mesh)> {
        self.iter().filter_map(|(id, n)| match &n.object {
            SceneObject::Mesh(m) => Some((id, n, m)),
            _ => None,
        })
    }

    pub fn lights(&self) -> impl Iterator<Item = (NodeId, &SceneNode, &Light)> {
        self.iter().filter_map(|(id, n)| match &n.object {
            SceneObject::Light(l) => Some((id, n, l)),
            _ => None,
        })
    }

    /// World-space wireframes of every helper in the scene.
    pub fn helper_lines(&self) -> Vec<LineSegment> {
        let mut lines = Vec::new();
        for (_, node) in self.iter() {
            let SceneObject::Helper(helper) = &node.object else {
                continue;
            };
            let Some(light_node) = self.node(helper.light) else {
                continue;
            };
            let SceneObject::Light(light) = &light_node.object else {
                continue;
            };
            let target = match light {
                Light::Directional { target, .. } => *target,
                Light::Spot { target, .. } => self
                    .node(*target)
                    .map_or(Vec3::ZERO, |n| n.transform.position),
                _ => Vec3::ZERO,
            };
            lines.extend(helper.lines(light, light_node.transform.position, target));
        }
        lines
    }

    pub fn summary(&self) -> SceneSummary {
        let mut summary = SceneSummary {
            nodes: self.nodes.len(),
            materials: self.materials.len(),
            ..SceneSummary::default()
        };
        for node in &self.nodes {
            match node.object {
                SceneObject::Mesh(_) => summary.meshes += 1,
                SceneObject::Light(_) => summary.lights += 1,
                SceneObject::Target => summary.targets += 1,
                SceneObject::Helper(_) => summary.helpers += 1,
            }
        }
        summary
    }
}

/// Per-kind node counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SceneSummary {
    pub nodes: usize,
    pub meshes: usize,
    pub lights: usize,
    pub targets: usize,
    pub helpers: usize,
    pub materials: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: nodes={} meshes={} lights={} targets={} helpers={} materials={}",
            self.nodes, self.meshes, self.lights, self.targets, self.helpers, self.materials
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::ShadowMaterial;
    use lumen_common::Color;

    fn ambient() -> Light {
        Light::Ambient {
            color: Color::WHITE,
            intensity: 0.5,
        }
    }

    #[test]
    fn ids_follow_insertion_order() {
        let mut scene = Scene::new();
        let a = scene.add_target("a", Vec3::ZERO);
        let b = scene.add_target("b", Vec3::X);
        assert_eq!((a, b), (NodeId(0), NodeId(1)));
        let names: Vec<_> = scene.iter().map(|(_, n)| n.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn mesh_requires_known_material() {
        let mut scene = Scene::new();
        let geometry = Geometry::Plane {
            width: 1.0,
            height: 1.0,
        };
        let err = scene
            .add_mesh("floor", Transform::default(), geometry, MaterialHandle(3))
            .unwrap_err();
        assert!(matches!(err, SceneError::MaterialNotFound(_)));
        assert_eq!(err.to_string(), "material MaterialHandle(3) not found");
        assert!(scene.is_empty());

        let shadow = scene.add_material(Material::Shadow(ShadowMaterial::new(0.5)));
        let added = scene.add_mesh("floor", Transform::default(), geometry, shadow);
        assert!(added.is_ok());
    }

    #[test]
    fn spot_light_requires_existing_target() {
        let mut scene = Scene::new();
        let spot = Light::Spot {
            color: Color::WHITE,
            intensity: 1.0,
            distance: 0.0,
            angle: 0.5,
            penumbra: 0.0,
            decay: 2.0,
            target: NodeId(9),
        };
        let err = scene.add_light("spot", Vec3::ZERO, spot).unwrap_err();
        assert!(matches!(err, SceneError::NodeNotFound(NodeId(9))));
    }

    #[test]
    fn helper_errors() {
        let mut scene = Scene::new();
        let target = scene.add_target("t", Vec3::ZERO);
        let amb = scene.add_light("amb", Vec3::ZERO, ambient()).unwrap();

        let err = scene.add_helper(target, 0.2).unwrap_err();
        assert!(matches!(err, SceneError::NotALight(_)));
        let err = scene.add_helper(amb, 0.2).unwrap_err();
        assert_eq!(err.to_string(), "ambient lights have no helper");
        let err = scene.add_helper(NodeId(42), 0.2).unwrap_err();
        assert!(matches!(err, SceneError::NodeNotFound(NodeId(42))));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn helper_lines_follow_light_position() {
        let mut scene = Scene::new();
        let light = Light::Point {
            color: Color::WHITE,
            intensity: 1.0,
            distance: 0.0,
            decay: 2.0,
        };
        let center = Vec3::new(0.0, 5.0, 0.0);
        let id = scene.add_light("p", center, light).unwrap();
        scene.add_helper(id, 1.0).unwrap();
        let lines = scene.helper_lines();
        assert!(!lines.is_empty());
        for l in &lines {
            assert!((l.start.distance(center) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn summary_counts_kinds() {
        let mut scene = Scene::new();
        scene.add_target("t", Vec3::ZERO);
        scene.add_light("amb", Vec3::ZERO, ambient()).unwrap();
        let s = scene.summary();
        assert_eq!((s.nodes, s.targets, s.lights, s.meshes), (2, 1, 1, 0));
        assert!(s.to_string().contains("nodes=2"));
    }
}
