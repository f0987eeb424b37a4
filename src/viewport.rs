use log::info;

use crate::{
    core::Scene,
    error::RenderError,
    pipeline::{Buffer, Pipeline},
};

/// Match the camera projection and the render target to a new surface size.
///
/// Calling it again with the same size changes nothing. A zero dimension is
/// rejected and leaves both the camera and the pipeline untouched.
pub fn resize<B: Buffer>(
    scene: &mut Scene,
    pipeline: &mut Pipeline<B>,
    width: usize,
    height: usize,
) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidViewport { width, height });
    }
    if pipeline.size() != (width, height) {
        info!("Viewport resized to {}x{}", width, height);
    }
    scene.camera.set_aspect(width, height);
    pipeline.set_size(width, height);
    Ok(())
}
