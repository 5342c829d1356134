use super::math::{vec3, Vec3};

/// Flat-shaded triangle mesh in world coordinates. Vertices are duplicated
/// per face so each triangle carries its own normal.
#[derive(Debug, Clone, Default)]
pub struct TriMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl TriMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        let bounds = self
            .positions
            .iter()
            .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));
        Some(bounds)
    }

    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&corners);
        self.normals.extend(std::iter::repeat(normal).take(4));
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}

/// Axis-aligned box. Corner order keeps every face wound counter-clockwise
/// seen from outside, so outward normals match the winding.
pub fn cuboid(center: Vec3, half: Vec3) -> TriMesh {
    let (cx, cy, cz) = (center.x, center.y, center.z);
    let (hx, hy, hz) = (half.x, half.y, half.z);
    let mut mesh = TriMesh::default();

    // +X / -X
    mesh.push_quad(
        [
            vec3(cx + hx, cy - hy, cz - hz),
            vec3(cx + hx, cy + hy, cz - hz),
            vec3(cx + hx, cy + hy, cz + hz),
            vec3(cx + hx, cy - hy, cz + hz),
        ],
        vec3(1.0, 0.0, 0.0),
    );
    mesh.push_quad(
        [
            vec3(cx - hx, cy - hy, cz + hz),
            vec3(cx - hx, cy + hy, cz + hz),
            vec3(cx - hx, cy + hy, cz - hz),
            vec3(cx - hx, cy - hy, cz - hz),
        ],
        vec3(-1.0, 0.0, 0.0),
    );
    // +Y / -Y
    mesh.push_quad(
        [
            vec3(cx - hx, cy + hy, cz - hz),
            vec3(cx - hx, cy + hy, cz + hz),
            vec3(cx + hx, cy + hy, cz + hz),
            vec3(cx + hx, cy + hy, cz - hz),
        ],
        vec3(0.0, 1.0, 0.0),
    );
    mesh.push_quad(
        [
            vec3(cx - hx, cy - hy, cz + hz),
            vec3(cx - hx, cy - hy, cz - hz),
            vec3(cx + hx, cy - hy, cz - hz),
            vec3(cx + hx, cy - hy, cz + hz),
        ],
        vec3(0.0, -1.0, 0.0),
    );
    // +Z / -Z
    mesh.push_quad(
        [
            vec3(cx + hx, cy - hy, cz + hz),
            vec3(cx + hx, cy + hy, cz + hz),
            vec3(cx - hx, cy + hy, cz + hz),
            vec3(cx - hx, cy - hy, cz + hz),
        ],
        vec3(0.0, 0.0, 1.0),
    );
    mesh.push_quad(
        [
            vec3(cx - hx, cy - hy, cz - hz),
            vec3(cx - hx, cy + hy, cz - hz),
            vec3(cx + hx, cy + hy, cz - hz),
            vec3(cx + hx, cy - hy, cz - hz),
        ],
        vec3(0.0, 0.0, -1.0),
    );

    mesh
}

/// Y-axis cylinder with radial side normals and flat caps.
pub fn cylinder(center: Vec3, radius: f32, half_height: f32, segments: u32) -> TriMesh {
    let segments = segments.max(3);
    let mut mesh = TriMesh::default();
    let top = center.y + half_height;
    let bottom = center.y - half_height;

    let ring = |i: u32| {
        let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
        (angle.cos(), angle.sin())
    };

    for i in 0..segments {
        let (c0, s0) = ring(i);
        let (c1, s1) = ring(i + 1);
        let p0 = vec3(center.x + c0 * radius, bottom, center.z + s0 * radius);
        let p1 = vec3(center.x + c1 * radius, bottom, center.z + s1 * radius);
        let p2 = vec3(center.x + c1 * radius, top, center.z + s1 * radius);
        let p3 = vec3(center.x + c0 * radius, top, center.z + s0 * radius);
        let normal = vec3((c0 + c1) * 0.5, 0.0, (s0 + s1) * 0.5).normalized();
        // Winding flipped relative to push_quad's CCW-from-outside boxes
        // because the ring runs clockwise seen from +Y.
        mesh.push_quad([p1, p0, p3, p2], normal);
    }

    for (y, normal) in [(top, vec3(0.0, 1.0, 0.0)), (bottom, vec3(0.0, -1.0, 0.0))] {
        let base = mesh.positions.len() as u32;
        mesh.positions.push(vec3(center.x, y, center.z));
        mesh.normals.push(normal);
        for i in 0..=segments {
            let (c, s) = ring(i);
            mesh.positions
                .push(vec3(center.x + c * radius, y, center.z + s * radius));
            mesh.normals.push(normal);
        }
        for i in 0..segments {
            if normal.y > 0.0 {
                mesh.indices.extend_from_slice(&[base, base + 2 + i, base + 1 + i]);
            } else {
                mesh.indices.extend_from_slice(&[base, base + 1 + i, base + 2 + i]);
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_six_faces() {
        let mesh = cuboid(Vec3::ZERO, vec3(1.0, 1.0, 1.0));
        assert_eq!(mesh.positions.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        let (lo, hi) = mesh.bounds().unwrap();
        assert_eq!(lo, vec3(-1.0, -1.0, -1.0));
        assert_eq!(hi, vec3(1.0, 1.0, 1.0));
    }

    #[test]
    fn cylinder_triangle_count_scales_with_segments() {
        let mesh = cylinder(Vec3::ZERO, 0.5, 1.0, 8);
        // 8 side quads (2 tris each) + two 8-triangle caps.
        assert_eq!(mesh.triangle_count(), 8 * 2 + 8 * 2);
    }

    #[test]
    fn cylinder_bounds_match_radius_and_height() {
        let mesh = cylinder(vec3(1.0, 2.0, 3.0), 0.5, 0.25, 16);
        let (lo, hi) = mesh.bounds().unwrap();
        assert!((lo.y - 1.75).abs() < 1e-5);
        assert!((hi.y - 2.25).abs() < 1e-5);
        assert!((hi.x - 1.5).abs() < 1e-3);
    }
}
