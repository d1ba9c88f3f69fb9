use lumen_scene::{Material, PerspectiveCamera, Scene, SceneObject};

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and a camera, then produces output. It never
/// mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of `scene` as seen from `camera`.
    fn render(&self, scene: &Scene, camera: &PerspectiveCamera) -> Self::Output;
}

/// Text renderer for headless runs, logs and tests.
///
/// Lists every node in insertion order with its transform.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, camera: &PerspectiveCamera) -> String {
        let mut out = String::new();
        out.push_str(&format!("=== {} ===\n", scene.summary()));
        out.push_str(&format!(
            "Camera: pos=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.3} near={} far={}\n",
            camera.position.x,
            camera.position.y,
            camera.position.z,
            camera.fov,
            camera.aspect,
            camera.near,
            camera.far
        ));

        for (id, node) in scene.iter() {
            let p = node.transform.position;
            let r = node.transform.rotation;
            let detail = match &node.object {
                SceneObject::Mesh(mesh) => {
                    let material = scene.material(mesh.material).map_or("?", Material::name);
                    format!("{} / {}", mesh.geometry.name(), material)
                }
                SceneObject::Light(light) => format!(
                    "{} #{:06x} x{}",
                    light.kind().name(),
                    light.color().to_hex(),
                    light.intensity()
                ),
                SceneObject::Target => String::new(),
                SceneObject::Helper(helper) => format!("-> [{}]", helper.light.0),
            };
            out.push_str(&format!(
                "  [{:>2}] {:<8} {:<22} {:<28} pos=({:.2}, {:.2}, {:.2}) rot=({:.2}, {:.2}, {:.2})\n",
                id.0,
                node.object.type_name(),
                node.name,
                detail,
                p.x,
                p.y,
                p.z,
                r.x,
                r.y,
                r.z
            ));
        }

        out
    }
}
