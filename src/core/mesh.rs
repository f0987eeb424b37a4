use std::f32::consts::{PI, TAU};

use glam::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub pos: Vec3,  // Position in model space
    pub norm: Vec3, // Shading normal
}

impl Vertex {
    pub fn new(pos: Vec3, norm: Vec3) -> Self {
        Self { pos, norm }
    }
}

/// Indexed triangle mesh. Front faces wind counter-clockwise.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>, // Vertex buffer
    pub tris: Vec<[usize; 3]>, // Indices into the vertex buffer
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, tris: Vec<[usize; 3]>) -> Self {
        Self { vertices, tris }
    }

    pub fn tri_count(&self) -> usize {
        self.tris.len()
    }

    /// Geometric normal of a triangle from its winding.
    pub fn face_normal(&self, tri: usize) -> Vec3 {
        let [a, b, c] = self.tris[tri];
        let v0 = self.vertices[a].pos;
        let v1 = self.vertices[b].pos;
        let v2 = self.vertices[c].pos;
        (v1 - v0).cross(v2 - v0).normalize_or_zero()
    }

    pub fn centroid(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        let sum = self.vertices.iter().fold(Vec3::ZERO, |acc, v| acc + v.pos);
        sum / self.vertices.len() as f32
    }

    /// Axis-aligned box centred on the origin, flat shaded (four vertices per face).
    pub fn cube(width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width, height, depth) * 0.5;
        // (normal, u, v) with u x v == normal so (-u,-v), (u,-v), (u,v) winds outward
        #[rustfmt::skip]
        let faces = [
            (Vec3::X,     Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z,     Vec3::Y),
            (Vec3::Y,     Vec3::X,     Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X,     Vec3::Z),
            (Vec3::Z,     Vec3::X,     Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut tris = Vec::with_capacity(12);
        for (norm, u, v) in faces {
            let center = norm * half;
            let du = u * u.abs().dot(half);
            let dv = v * v.abs().dot(half);
            let base = vertices.len();
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                vertices.push(Vertex::new(center + du * su + dv * sv, norm));
            }
            tris.push([base, base + 1, base + 2]);
            tris.push([base, base + 2, base + 3]);
        }
        Mesh::new(vertices, tris)
    }

    /// Rectangle in the XY plane facing +Z.
    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width * 0.5, height * 0.5);
        let vertices = vec![
            Vertex::new(Vec3::new(-hw, -hh, 0.0), Vec3::Z),
            Vertex::new(Vec3::new(hw, -hh, 0.0), Vec3::Z),
            Vertex::new(Vec3::new(hw, hh, 0.0), Vec3::Z),
            Vertex::new(Vec3::new(-hw, hh, 0.0), Vec3::Z),
        ];
        Mesh::new(vertices, vec![[0, 1, 2], [0, 2, 3]])
    }

    /// Closed cone centred on the origin, apex on +Y, base cap on -Y.
    pub fn cone(radius: f32, height: f32, radial_segments: usize) -> Self {
        let segments = radial_segments.max(3);
        let half_h = height * 0.5;
        let apex = Vec3::new(0.0, half_h, 0.0);
        let base_center = Vec3::new(0.0, -half_h, 0.0);

        let ring = |i: usize| {
            let theta = TAU * i as f32 / segments as f32;
            (theta, Vec3::new(radius * theta.sin(), -half_h, radius * theta.cos()))
        };
        let side_normal =
            |theta: f32| Vec3::new(height * theta.sin(), radius, height * theta.cos()).normalize();

        let mut vertices = Vec::with_capacity(segments * 5 + 1);
        let mut tris = Vec::with_capacity(segments * 2);

        for i in 0..segments {
            let (t0, p0) = ring(i);
            let (t1, p1) = ring(i + 1);
            let base = vertices.len();
            vertices.push(Vertex::new(apex, side_normal((t0 + t1) * 0.5)));
            vertices.push(Vertex::new(p0, side_normal(t0)));
            vertices.push(Vertex::new(p1, side_normal(t1)));
            tris.push([base, base + 1, base + 2]);
        }

        let cap_center = vertices.len();
        vertices.push(Vertex::new(base_center, Vec3::NEG_Y));
        let cap_start = vertices.len();
        for i in 0..segments {
            vertices.push(Vertex::new(ring(i).1, Vec3::NEG_Y));
        }
        for i in 0..segments {
            let a = cap_start + i;
            let b = cap_start + (i + 1) % segments;
            tris.push([cap_center, b, a]);
        }

        Mesh::new(vertices, tris)
    }

    /// UV sphere centred on the origin with smooth normals.
    pub fn sphere(radius: f32, width_segments: usize, height_segments: usize) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);
        let row = ws + 1;

        let mut vertices = Vec::with_capacity(row * (hs + 1));
        for iy in 0..=hs {
            let theta = PI * iy as f32 / hs as f32;
            for ix in 0..=ws {
                let phi = TAU * ix as f32 / ws as f32;
                let dir = Vec3::new(
                    -phi.cos() * theta.sin(),
                    theta.cos(),
                    phi.sin() * theta.sin(),
                );
                vertices.push(Vertex::new(dir * radius, dir));
            }
        }

        let mut tris = Vec::with_capacity(ws * (hs - 1) * 2);
        for iy in 0..hs {
            for ix in 0..ws {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;
                // the pole rows collapse one edge, so skip the degenerate half
                if iy != 0 {
                    tris.push([a, b, d]);
                }
                if iy != hs - 1 {
                    tris.push([b, c, d]);
                }
            }
        }

        Mesh::new(vertices, tris)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every face of a convex mesh centred on the origin should point away from it.
    fn assert_outward(mesh: &Mesh) {
        let center = mesh.centroid();
        for (i, tri) in mesh.tris.iter().enumerate() {
            let face_center = tri
                .iter()
                .fold(Vec3::ZERO, |acc, &idx| acc + mesh.vertices[idx].pos)
                / 3.0;
            let n = mesh.face_normal(i);
            assert!(
                n.dot(face_center - center) > 0.0,
                "triangle {i} winds inward: normal {n:?} at {face_center:?}"
            );
        }
    }

    #[test]
    fn unit_cube_spans_half_unit_each_way() {
        let cube = Mesh::cube(1.0, 1.0, 1.0);
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.tri_count(), 12);
        for v in &cube.vertices {
            assert_eq!(v.pos.abs(), Vec3::splat(0.5));
        }
        assert_outward(&cube);
    }

    #[test]
    fn cube_face_normals_match_winding() {
        let cube = Mesh::cube(1.0, 2.0, 3.0);
        for (i, tri) in cube.tris.iter().enumerate() {
            let n = cube.face_normal(i);
            assert!((n - cube.vertices[tri[0]].norm).length() < 1e-6);
        }
    }

    #[test]
    fn plane_faces_positive_z() {
        let plane = Mesh::plane(100.0, 100.0);
        assert_eq!(plane.tri_count(), 2);
        for i in 0..plane.tri_count() {
            assert!((plane.face_normal(i) - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn cone_has_side_and_cap_triangles() {
        let cone = Mesh::cone(0.5, 2.0, 8);
        assert_eq!(cone.tri_count(), 16);
        let max_y = cone.vertices.iter().map(|v| v.pos.y).fold(f32::MIN, f32::max);
        let min_y = cone.vertices.iter().map(|v| v.pos.y).fold(f32::MAX, f32::min);
        assert_eq!(max_y, 1.0);
        assert_eq!(min_y, -1.0);
        // the vertex average is pulled toward the base but stays inside the cone
        assert_outward(&cone);
    }

    #[test]
    fn sphere_winds_outward_and_skips_pole_slivers() {
        let sky = Mesh::sphere(500.0, 32, 15);
        assert_eq!(sky.vertices.len(), 33 * 16);
        assert_eq!(sky.tri_count(), 32 * 14 * 2);
        for v in &sky.vertices {
            assert!((v.pos.length() - 500.0).abs() < 1e-2);
        }
        assert_outward(&sky);
    }
}
