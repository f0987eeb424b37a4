use crate::core::{Color, Scene, Side};
use crate::pipeline::{Fragment, ProcessedGeometry};
use glam::{Vec2, Vec3};
use log::trace;
use rayon::prelude::*;

/// A clipped vertex after the perspective divide.
#[derive(Clone, Copy, Debug)]
struct ScreenVertex {
    pos: Vec2,
    depth: f32,
    inv_w: f32,
    world: Vec3,
    normal: Vec3,
}

pub struct Rasterizer {
    width: usize,
    height: usize,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
    }

    /// Turn clipped triangles into shaded fragments. Modifies the fragment buffer in place.
    pub fn rasterize(
        &self,
        geometry: &[ProcessedGeometry],
        scene: &Scene,
        frags: &mut Vec<Fragment>,
    ) {
        frags.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        trace!("Rasterizing {} triangles", geometry.len());

        frags.par_extend(
            geometry
                .par_iter()
                .flat_map_iter(|geo| self.process_triangle(geo, scene)),
        );

        trace!("Generated {} fragments", frags.len());
    }

    fn process_triangle(&self, geo: &ProcessedGeometry, scene: &Scene) -> Vec<Fragment> {
        let entity = &scene.entities[geo.entity_id];
        let screen = geo.vertices.clone().map(|v| {
            let inv_w = 1.0 / v.position.w;
            let ndc = v.position.truncate() * inv_w;
            ScreenVertex {
                pos: self.ndc_to_screen(ndc.x, ndc.y),
                depth: ndc.z,
                inv_w,
                world: v.world,
                normal: v.normal,
            }
        });

        let eye = scene.camera.position();
        let shade = |world: Vec3, normal: Vec3| {
            let mut n = normal.normalize_or_zero();
            // surfaces seen from behind are lit on the face the viewer sees
            if entity.side != Side::Front && n.dot(eye - world) < 0.0 {
                n = -n;
            }
            entity.material.shade(world, n, eye, &scene.lights)
        };

        self.rasterize_triangle_barycentric(&screen, shade)
    }

    /// NDC to pixel coordinates, with +Y up in NDC mapped to row 0 at the top.
    fn ndc_to_screen(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x + 1.0) * 0.5 * self.width as f32,
            (1.0 - y) * 0.5 * self.height as f32,
        )
    }

    fn rasterize_triangle_barycentric<F>(&self, verts: &[ScreenVertex; 3], shade: F) -> Vec<Fragment>
    where
        F: Fn(Vec3, Vec3) -> Color,
    {
        let mut fragments = Vec::new();
        let (v0, v1, v2) = (verts[0].pos, verts[1].pos, verts[2].pos);

        // Compute bounding box, clamped to the screen
        let min = v0.min(v1).min(v2).max(Vec2::ZERO);
        let max = v0
            .max(v1)
            .max(v2)
            .min(Vec2::new(self.width as f32 - 1.0, self.height as f32 - 1.0));
        if min.x > max.x || min.y > max.y || barycentric(min, v0, v1, v2).is_none() {
            return fragments;
        }

        for y in min.y.floor() as usize..=max.y.ceil() as usize {
            if y >= self.height {
                break;
            }
            for x in min.x.floor() as usize..=max.x.ceil() as usize {
                if x >= self.width {
                    break;
                }
                // sample at the pixel center
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) = barycentric(p, v0, v1, v2) else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * verts[0].depth + w1 * verts[1].depth + w2 * verts[2].depth;

                // perspective-correct interpolation of the varyings
                let p0 = w0 * verts[0].inv_w;
                let p1 = w1 * verts[1].inv_w;
                let p2 = w2 * verts[2].inv_w;
                let sum = p0 + p1 + p2;
                if sum <= 0.0 {
                    continue;
                }
                let world =
                    (verts[0].world * p0 + verts[1].world * p1 + verts[2].world * p2) / sum;
                let normal =
                    (verts[0].normal * p0 + verts[1].normal * p1 + verts[2].normal * p2) / sum;

                fragments.push(Fragment {
                    screen_pos: Vec2::new(x as f32, y as f32),
                    depth,
                    color: shade(world, normal),
                });
            }
        }

        fragments
    }
}

fn barycentric(p: Vec2, v0: Vec2, v1: Vec2, v2: Vec2) -> Option<(f32, f32, f32)> {
    let denom = (v1.y - v2.y) * (v0.x - v2.x) + (v2.x - v1.x) * (v0.y - v2.y);
    if denom.abs() < 1e-10 {
        // Degenerate triangle
        return None;
    }
    let w0 = ((v1.y - v2.y) * (p.x - v2.x) + (v2.x - v1.x) * (p.y - v2.y)) / denom;
    let w1 = ((v2.y - v0.y) * (p.x - v2.x) + (v0.x - v2.x) * (p.y - v2.y)) / denom;
    let w2 = 1.0 - w0 - w1;
    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barycentric_weights_sum_to_one() {
        let (a, b, c) = (Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 4.0));
        let (w0, w1, w2) = barycentric(Vec2::new(1.0, 1.0), a, b, c).unwrap();
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
        assert!((w0 - 0.5).abs() < 1e-6);
        assert!((w1 - 0.25).abs() < 1e-6);
        assert!((w2 - 0.25).abs() < 1e-6);
    }

    #[test]
    fn collinear_points_are_degenerate() {
        let a = Vec2::ZERO;
        assert!(barycentric(Vec2::ONE, a, Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)).is_none());
    }

    #[test]
    fn covers_pixels_inside_triangle_only() {
        let rast = Rasterizer::new(8, 8);
        let v = |x: f32, y: f32| ScreenVertex {
            pos: Vec2::new(x, y),
            depth: 0.0,
            inv_w: 1.0,
            world: Vec3::ZERO,
            normal: Vec3::Y,
        };
        let frags = rast.rasterize_triangle_barycentric(
            &[v(0.0, 0.0), v(8.0, 0.0), v(0.0, 8.0)],
            |_, _| Color::RED,
        );
        // pixel centers with x + y + 1 <= 8
        assert_eq!(frags.len(), 36);
        assert!(frags
            .iter()
            .all(|f| f.screen_pos.x + f.screen_pos.y + 1.0 <= 8.0 && f.color == Color::RED));
    }
}
