use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::SceneConfig,
    core::{Camera, Color, DirectionalLight, Entity, EntityKind, Material, Mesh, Scene, Side},
    error::RenderError,
    util::format_mat4,
};

/// Assembles the garden scene from a [`SceneConfig`] and a seeded RNG.
///
/// The same seed always yields the same cube and tree placement and the same
/// cube colors.
pub struct SceneBuilder {
    config: SceneConfig,
    seed: u64,
}

impl SceneBuilder {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            seed: rand::random(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Draw a fresh seed. It is logged so the layout can be rebuilt with `--seed`.
    pub fn from_entropy(config: SceneConfig) -> Self {
        let builder = Self::new(config);
        info!("Drew scene seed {} from entropy", builder.seed);
        builder
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn build(&self, width: usize, height: usize) -> Result<Scene, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidViewport { width, height });
        }
        info!("Building scene {}x{} with seed {}", width, height, self.seed);

        let cfg = &self.config;
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut scene = Scene::new(self.camera(width, height));

        scene.add_entity(self.sky());
        scene.add_entity(self.ground());

        for i in 0..cfg.cube_count {
            let pos = Vec3::new(
                sample_extent(&mut rng, cfg.cube_extent),
                cfg.cube_height,
                sample_extent(&mut rng, cfg.cube_extent),
            );
            let color = Color::from_u32(rng.gen_range(0..0x0100_0000));
            let cube = Entity::new(
                format!("cube_{i}"),
                EntityKind::Cube,
                Mesh::cube(1.0, 1.0, 1.0),
                Material::phong(color),
            )
            .with_position(pos);
            debug!("{} at {:?}", cube, pos);
            scene.add_rotating(cube);
        }

        for i in 0..cfg.tree_count {
            let pos = Vec3::new(
                sample_extent(&mut rng, cfg.tree_extent),
                cfg.tree_height,
                sample_extent(&mut rng, cfg.tree_extent),
            );
            let tree = Entity::new(
                format!("tree_{i}"),
                EntityKind::Tree,
                Mesh::cone(cfg.tree_radius, cfg.tree_cone_height, cfg.tree_segments),
                Material::phong(cfg.tree_color),
            )
            .with_position(pos);
            debug!("{} at {:?}", tree, pos);
            scene.add_entity(tree);
        }

        scene.add_light(DirectionalLight::new(
            cfg.light_position,
            cfg.light_color,
            cfg.light_intensity,
        ));

        debug!("{}", format_mat4("Camera View Matrix", &scene.camera.view_matrix()));
        debug!(
            "{}",
            format_mat4("Camera Projection Matrix", &scene.camera.projection_matrix())
        );
        info!(
            "Scene ready: {} entities, {} rotating",
            scene.entities.len(),
            scene.rotating().len()
        );
        Ok(scene)
    }

    fn camera(&self, width: usize, height: usize) -> Camera {
        let cfg = &self.config;
        let mut camera = Camera::new(
            cfg.camera_fov,
            width as f32 / height as f32,
            cfg.camera_near,
            cfg.camera_far,
        );
        camera.set_position(cfg.camera_position);
        camera
    }

    fn sky(&self) -> Entity {
        let cfg = &self.config;
        Entity::new(
            "sky",
            EntityKind::Sky,
            Mesh::sphere(cfg.sky_radius, cfg.sky_width_segments, cfg.sky_height_segments),
            Material::SkyGradient(cfg.sky),
        )
        .with_side(Side::Back)
    }

    fn ground(&self) -> Entity {
        let cfg = &self.config;
        Entity::new(
            "ground",
            EntityKind::Ground,
            Mesh::plane(cfg.ground_size, cfg.ground_size),
            Material::basic(cfg.ground_color),
        )
        .with_rotation(Vec3::new(-FRAC_PI_2, 0.0, 0.0))
    }
}

fn sample_extent(rng: &mut StdRng, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(-extent..extent)
    } else {
        0.0
    }
}
