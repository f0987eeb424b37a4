use std::cell::{Ref, RefCell};

use glam::Vec4;
use log::{debug, trace};

use crate::core::Scene;

use super::{
    buffer::Buffer, rasterizer::Rasterizer, ClipTriangle, ClipVertex, Clipper, Fragment,
    ProcessedGeometry,
};

/// The renderer: turns a [`Scene`] into pixels in a double-buffered target.
///
/// The pipeline handles:
/// - Vertex processing and transformation to clip space
/// - Triangle culling and clipping against the view volume
/// - Rasterization of triangles to shaded fragments
/// - Depth tested writes into the back buffer, then a buffer swap
pub struct Pipeline<B: Buffer> {
    width: usize,                              // Output width in pixels
    height: usize,                             // Output height in pixels
    front_buffer: RefCell<B>,                  // Last completed frame
    back_buffer: RefCell<B>,                   // Buffer being rendered to
    geometry: RefCell<Vec<ProcessedGeometry>>, // Clipped geometry ready for rasterization
    rasterizer: RefCell<Rasterizer>,           // Converts triangles to fragments
    clipper: RefCell<Clipper>,                 // Culls and clips triangles
    fragments: RefCell<Vec<Fragment>>,         // Output fragments from rasterization
}

impl<B: Buffer> Pipeline<B> {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            front_buffer: RefCell::new(B::new(width, height)),
            back_buffer: RefCell::new(B::new(width, height)),
            geometry: RefCell::new(Vec::with_capacity(1024)),
            rasterizer: RefCell::new(Rasterizer::new(width, height)),
            clipper: RefCell::new(Clipper::new()),
            fragments: RefCell::new(Vec::with_capacity(1024)),
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Resize the output. Asking for the current size is a no-op.
    pub fn set_size(&mut self, width: usize, height: usize) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        debug!(
            "Resizing pipeline {}x{} -> {}x{}",
            self.width, self.height, width, height
        );
        self.width = width;
        self.height = height;
        self.front_buffer.get_mut().resize(width, height);
        self.back_buffer.get_mut().resize(width, height);
        self.rasterizer.get_mut().resize(width, height);
    }

    /// The most recently completed frame.
    pub fn front_buffer(&self) -> Ref<'_, B> {
        self.front_buffer.borrow()
    }

    pub fn set_backface_culling(&self, enabled: bool) {
        self.clipper.borrow_mut().set_backface_culling(enabled);
    }

    /// Render one frame of `scene` from its camera.
    ///
    /// Steps:
    /// 1. Clear back buffer
    /// 2. Transform vertices to clip space, cull and clip triangles
    /// 3. Rasterize visible triangles to shaded fragments
    /// 4. Depth test fragments into the back buffer
    /// 5. Swap front and back buffers
    pub fn render_frame(&self, scene: &Scene) {
        self.back_buffer.borrow_mut().clear();

        self.process_geometry(scene);

        self.rasterizer.borrow().rasterize(
            &self.geometry.borrow(),
            scene,
            &mut self.fragments.borrow_mut(),
        );

        self.process_fragments(&self.fragments.borrow());

        self.swap_buffers();
    }

    /// Run every entity's triangles through the model-view-projection
    /// transform and the clipper, refilling the geometry buffer.
    pub fn process_geometry(&self, scene: &Scene) {
        let view_proj = scene.camera.view_projection();
        let clipper = self.clipper.borrow();
        let mut geometry = self.geometry.borrow_mut();
        geometry.clear();

        for (i, entity) in scene.entities.iter().enumerate() {
            let model_matrix = entity.transform.model_mat();
            let normal_matrix = entity.transform.normal_mat();
            let mvp_matrix = view_proj * model_matrix;

            for tri in &entity.mesh.tris {
                let vertices = tri.map(|idx| {
                    let v = &entity.mesh.vertices[idx];
                    ClipVertex {
                        position: mvp_matrix * Vec4::from((v.pos, 1.0)),
                        world: model_matrix.transform_point3(v.pos),
                        normal: normal_matrix * v.norm,
                    }
                });

                let clipped = clipper.clip_triangle(&ClipTriangle { vertices }, entity.side);
                geometry.extend(clipped.into_iter().map(|t| ProcessedGeometry {
                    entity_id: i,
                    vertices: t.vertices,
                }));
            }
        }
        trace!("Processed geometry: {} triangles", geometry.len());
    }

    fn process_fragments(&self, fragments: &[Fragment]) {
        let mut buffer = self.back_buffer.borrow_mut();
        for fragment in fragments {
            let pixel = B::create_pixel(fragment.color);
            let pos = (
                fragment.screen_pos.x as usize,
                fragment.screen_pos.y as usize,
            );
            buffer.set_pixel(pos, &fragment.depth, pixel);
        }
    }

    fn swap_buffers(&self) {
        std::mem::swap(
            &mut *self.front_buffer.borrow_mut(),
            &mut *self.back_buffer.borrow_mut(),
        );
    }
}
