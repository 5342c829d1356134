use egui::epaint::{Mesh, Vertex, WHITE_UV};
use egui::{Color32, Painter, Pos2, Rect, Shape};

use super::camera::OrbitCamera;
use super::math::{vec3, Vec3};
use super::room::RoomScene;

const NEAR_PLANE: f32 = 0.2;
const AMBIENT: f32 = 0.42;
const DIFFUSE: f32 = 0.58;

struct ScreenTriangle {
    points: [Pos2; 3],
    color: Color32,
    depth: f32,
}

fn shade(color: Color32, normal: Vec3, light: Vec3) -> Color32 {
    let lambert = normal.dot(light).max(0.0);
    let level = AMBIENT + DIFFUSE * lambert;
    Color32::from_rgb(
        (color.r() as f32 * level).min(255.0) as u8,
        (color.g() as f32 * level).min(255.0) as u8,
        (color.b() as f32 * level).min(255.0) as u8,
    )
}

/// Projects the visible scene through the orbit camera and hands the egui
/// painter one triangle mesh, far-to-near. This is the whole render loop:
/// egui repaints, we re-project.
pub fn paint_scene(painter: &Painter, rect: Rect, camera: &OrbitCamera, scene: &RoomScene) {
    let eye = camera.eye();
    let (right, up, forward) = camera.basis();
    let light = vec3(0.35, 0.8, 0.45).normalized();
    let focal = 0.5 * rect.height() / (camera.fov_y * 0.5).tan();
    let center = rect.center();

    let project = |p: Vec3| -> Option<(Pos2, f32)> {
        let rel = p - eye;
        let depth = rel.dot(forward);
        if depth < NEAR_PLANE {
            return None;
        }
        let x = rel.dot(right) * focal / depth;
        let y = rel.dot(up) * focal / depth;
        Some((Pos2::new(center.x + x, center.y - y), depth))
    };

    let mut triangles: Vec<ScreenTriangle> = Vec::with_capacity(scene.triangle_count());
    for piece in scene.visible_pieces() {
        let mesh = &piece.mesh;
        for tri in mesh.indices.chunks_exact(3) {
            let (i0, i1, i2) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let normal = mesh.normals[i0];
            let centroid =
                (mesh.positions[i0] + mesh.positions[i1] + mesh.positions[i2]) * (1.0 / 3.0);
            // Backface cull against the outward normal.
            if normal.dot(eye - centroid) <= 0.0 {
                continue;
            }
            let Some((p0, d0)) = project(mesh.positions[i0]) else { continue };
            let Some((p1, d1)) = project(mesh.positions[i1]) else { continue };
            let Some((p2, d2)) = project(mesh.positions[i2]) else { continue };
            triangles.push(ScreenTriangle {
                points: [p0, p1, p2],
                color: shade(piece.color, normal, light),
                depth: (d0 + d1 + d2) / 3.0,
            });
        }
    }

    // Painter's algorithm: farthest first.
    triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    let mut out = Mesh::default();
    for tri in &triangles {
        let base = out.vertices.len() as u32;
        for point in tri.points {
            out.vertices.push(Vertex {
                pos: point,
                uv: WHITE_UV,
                color: tri.color,
            });
        }
        out.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    painter.with_clip_rect(rect).add(Shape::mesh(out));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shading_never_exceeds_channel_range() {
        let lit = shade(Color32::from_rgb(250, 250, 250), vec3(0.0, 1.0, 0.0), vec3(0.0, 1.0, 0.0));
        assert!(lit.r() <= 255);
        let dark = shade(Color32::from_rgb(40, 40, 40), vec3(0.0, -1.0, 0.0), vec3(0.0, 1.0, 0.0));
        // Faces pointing away keep the ambient term only.
        assert_eq!(dark.r(), (40.0 * AMBIENT) as u8);
    }
}
