/// WGSL for scene meshes: one vertex stage, one fragment stage per material kind.
pub const MESH_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    view: mat4x4<f32>,
};

struct Material {
    color_a: vec4<f32>,
    color_b: vec4<f32>,
    params: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

@group(1) @binding(0)
var<uniform> material: Material;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) view_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let model_view = camera.view * model;
    // Transforms are rotation, translation and uniform scale, so the upper
    // 3x3 of model-view works as the normal matrix.
    let normal_matrix = mat3x3<f32>(
        model_view[0].xyz,
        model_view[1].xyz,
        model_view[2].xyz,
    );

    var out: VertexOutput;
    out.clip_position = camera.view_proj * model * vec4<f32>(vertex.position, 1.0);
    out.view_normal = normalize(normal_matrix * vertex.normal);
    return out;
}

// color_a = top, color_b = bottom
@fragment
fn fs_gradient(in: VertexOutput) -> @location(0) vec4<f32> {
    let t = in.view_normal.y * 0.5 + 0.5;
    return vec4<f32>(mix(material.color_b.rgb, material.color_a.rgb, t), 1.0);
}

// color_a = shadow color, params.x = opacity, params.y = shadow coverage
@fragment
fn fs_shadow(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(material.color_a.rgb, material.params.x * material.params.y);
}
"#;

/// WGSL for helper wireframes.
pub const LINE_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
    view: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

struct LineVertex {
    @location(0) position: vec3<f32>,
    @location(1) color: vec4<f32>,
};

struct LineOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_line(vertex: LineVertex) -> LineOutput {
    var out: LineOutput;
    out.clip_position = camera.view_proj * vec4<f32>(vertex.position, 1.0);
    out.color = vertex.color;
    return out;
}

@fragment
fn fs_line(in: LineOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_present() {
        for entry in ["fn vs_main", "fn fs_gradient", "fn fs_shadow"] {
            assert!(MESH_SHADER.contains(entry), "{entry}");
        }
        for entry in ["fn vs_line", "fn fs_line"] {
            assert!(LINE_SHADER.contains(entry), "{entry}");
        }
    }

    #[test]
    fn gradient_blend_matches_cpu_reference() {
        assert!(MESH_SHADER.contains("in.view_normal.y * 0.5 + 0.5"));
        let blend = "mix(material.color_b.rgb, material.color_a.rgb, t)";
        assert!(MESH_SHADER.contains(blend));
    }
}
