use crate::core::Side;
use glam::{Vec3, Vec4};

/// A vertex after the model-view-projection transform, carrying the
/// attributes the fragment stage interpolates.
#[derive(Clone, Debug)]
pub struct ClipVertex {
    pub position: Vec4,
    pub world: Vec3,
    pub normal: Vec3,
}

impl ClipVertex {
    pub fn lerp(&self, other: &ClipVertex, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            world: self.world.lerp(other.world, t),
            normal: self.normal.lerp(other.normal, t),
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClipTriangle {
    pub vertices: [ClipVertex; 3],
}

/// The view volume `-w <= x, y, z <= w` as six planes; a clip-space point is
/// inside a plane when `dot(plane, point) >= 0`.
const CLIP_PLANES: [Vec4; 6] = [
    Vec4::new(1.0, 0.0, 0.0, 1.0),  // left
    Vec4::new(-1.0, 0.0, 0.0, 1.0), // right
    Vec4::new(0.0, 1.0, 0.0, 1.0),  // bottom
    Vec4::new(0.0, -1.0, 0.0, 1.0), // top
    Vec4::new(0.0, 0.0, 1.0, 1.0),  // near
    Vec4::new(0.0, 0.0, -1.0, 1.0), // far
];

/// Culls triangles by facing and clips the survivors to the view volume.
pub struct Clipper {
    backface_culling: bool,
}

impl Clipper {
    pub fn new() -> Self {
        Self {
            backface_culling: true,
        }
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.backface_culling = enabled;
    }

    /// Clip one triangle. The result is empty when it is culled or entirely
    /// outside, and may hold several triangles when an edge crosses a plane.
    pub fn clip_triangle(&self, triangle: &ClipTriangle, side: Side) -> Vec<ClipTriangle> {
        if !self.should_process_triangle(triangle, side) {
            return Vec::new();
        }

        let mut triangles = vec![triangle.clone()];

        // Clip against each frustum plane
        for plane in &CLIP_PLANES {
            triangles = self.clip_against_plane(triangles, *plane);
            if triangles.is_empty() {
                break;
            }
        }

        triangles
    }

    fn should_process_triangle(&self, triangle: &ClipTriangle, side: Side) -> bool {
        if self.is_degenerate(triangle) {
            return false;
        }
        if !self.backface_culling {
            return true;
        }
        match side {
            Side::Front => self.is_front_facing(triangle),
            Side::Back => !self.is_front_facing(triangle),
            Side::Double => true,
        }
    }

    fn is_degenerate(&self, triangle: &ClipTriangle) -> bool {
        // Check if any two vertices are effectively the same point
        let epsilon = 1e-12;
        for i in 0..3 {
            let j = (i + 1) % 3;
            let diff = triangle.vertices[i].position - triangle.vertices[j].position;
            if diff.length_squared() < epsilon {
                return true;
            }
        }
        false
    }

    /// Counter-clockwise in clip space means facing the camera.
    ///
    /// The signed area is taken from homogeneous coordinates so it stays valid
    /// for vertices behind the camera, before any clipping happened.
    fn is_front_facing(&self, tri: &ClipTriangle) -> bool {
        let [a, b, c] = [
            tri.vertices[0].position,
            tri.vertices[1].position,
            tri.vertices[2].position,
        ];
        let xyw = |v: Vec4| Vec3::new(v.x, v.y, v.w);
        // determinant of the 3x3 matrix of (x, y, w) rows
        let det = xyw(a).dot(xyw(b).cross(xyw(c)));
        det > 0.0
    }

    fn clip_against_plane(&self, triangles: Vec<ClipTriangle>, plane: Vec4) -> Vec<ClipTriangle> {
        let mut result = Vec::new();

        for triangle in triangles {
            // Calculate distances to plane for each vertex
            let distances = [
                plane.dot(triangle.vertices[0].position),
                plane.dot(triangle.vertices[1].position),
                plane.dot(triangle.vertices[2].position),
            ];
            let inside_count = distances.iter().filter(|&&d| d >= 0.0).count();

            match inside_count {
                0 => continue,              // Triangle is completely outside
                3 => result.push(triangle), // Triangle is completely inside
                _ => result.extend(self.clip_triangle_against_plane(&triangle, distances)),
            }
        }

        result
    }

    fn clip_triangle_against_plane(
        &self,
        triangle: &ClipTriangle,
        distances: [f32; 3],
    ) -> Vec<ClipTriangle> {
        let mut new_verts = Vec::with_capacity(4);
        // Walk the edges, keeping inside vertices and adding a vertex wherever an edge crosses
        for i in 0..3 {
            let j = (i + 1) % 3;

            let v0 = &triangle.vertices[i];
            let v1 = &triangle.vertices[j];
            let d0 = distances[i];
            let d1 = distances[j];

            if d0 >= 0.0 {
                new_verts.push(v0.clone());
            }

            if (d0 < 0.0) != (d1 < 0.0) {
                let t = d0 / (d0 - d1);
                new_verts.push(v0.lerp(v1, t));
            }
        }

        // Fan the clipped polygon back into triangles
        (1..new_verts.len().saturating_sub(1))
            .map(|i| ClipTriangle {
                vertices: [
                    new_verts[0].clone(),
                    new_verts[i].clone(),
                    new_verts[i + 1].clone(),
                ],
            })
            .collect()
    }
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vert(x: f32, y: f32, z: f32, w: f32) -> ClipVertex {
        ClipVertex {
            position: Vec4::new(x, y, z, w),
            world: Vec3::new(x, y, z),
            normal: Vec3::Z,
        }
    }

    fn ccw() -> ClipTriangle {
        ClipTriangle {
            vertices: [
                vert(-0.5, -0.5, 0.0, 1.0),
                vert(0.5, -0.5, 0.0, 1.0),
                vert(0.0, 0.5, 0.0, 1.0),
            ],
        }
    }

    fn cw() -> ClipTriangle {
        let mut t = ccw();
        t.vertices.swap(1, 2);
        t
    }

    #[test]
    fn inside_triangle_passes_untouched() {
        let out = Clipper::new().clip_triangle(&ccw(), Side::Front);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].vertices[1].position, ccw().vertices[1].position);
    }

    #[test]
    fn culling_follows_side() {
        let clipper = Clipper::new();
        assert!(clipper.clip_triangle(&cw(), Side::Front).is_empty());
        assert_eq!(clipper.clip_triangle(&cw(), Side::Back).len(), 1);
        assert!(clipper.clip_triangle(&ccw(), Side::Back).is_empty());
        assert_eq!(clipper.clip_triangle(&cw(), Side::Double).len(), 1);
    }

    #[test]
    fn straddling_triangle_is_split() {
        let tri = ClipTriangle {
            vertices: [
                vert(0.0, 0.0, 0.0, 1.0),
                vert(3.0, 0.0, 0.0, 1.0),
                vert(0.0, 0.5, 0.0, 1.0),
            ],
        };
        let out = Clipper::new().clip_triangle(&tri, Side::Front);
        assert_eq!(out.len(), 2);
        for t in &out {
            for v in &t.vertices {
                assert!(v.position.x <= v.position.w + 1e-6);
            }
        }
    }

    #[test]
    fn triangle_fully_behind_near_plane_vanishes() {
        let tri = ClipTriangle {
            vertices: [
                vert(-0.5, -0.5, -2.0, 1.0),
                vert(0.5, -0.5, -2.0, 1.0),
                vert(0.0, 0.5, -2.0, 1.0),
            ],
        };
        assert!(Clipper::new().clip_triangle(&tri, Side::Front).is_empty());
    }

    #[test]
    fn culling_can_be_disabled() {
        let mut clipper = Clipper::new();
        clipper.set_backface_culling(false);
        assert_eq!(clipper.clip_triangle(&cw(), Side::Front).len(), 1);
    }
}
