use std::path::PathBuf;

use glam::Vec3;
use log::LevelFilter;

use crate::core::{Color, SkyGradient};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayTarget {
    Terminal,
    Window,
}

/// Layout and animation constants of the garden.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub cube_count: usize,
    /// Cubes are placed with x and z in `[-cube_extent, cube_extent)`
    pub cube_extent: f32,
    pub cube_height: f32,
    pub tree_count: usize,
    /// Trees are placed with x and z in `[-tree_extent, tree_extent)`
    pub tree_extent: f32,
    pub tree_height: f32,
    pub tree_radius: f32,
    pub tree_cone_height: f32,
    pub tree_segments: usize,
    pub tree_color: Color,
    pub ground_size: f32,
    pub ground_color: Color,
    pub sky_radius: f32,
    pub sky_width_segments: usize,
    pub sky_height_segments: usize,
    pub sky: SkyGradient,
    pub light_position: Vec3,
    pub light_color: Color,
    pub light_intensity: f32,
    pub camera_position: Vec3,
    pub camera_fov: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    /// Radians added to each cube's X and Y angle per frame
    pub rotation_step: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            cube_count: 5,
            cube_extent: 5.0,
            cube_height: 0.5,
            tree_count: 10,
            tree_extent: 10.0,
            tree_height: 1.0,
            tree_radius: 0.5,
            tree_cone_height: 2.0,
            tree_segments: 8,
            tree_color: Color::FOREST_GREEN,
            ground_size: 100.0,
            ground_color: Color::GREEN,
            sky_radius: 500.0,
            sky_width_segments: 32,
            sky_height_segments: 15,
            sky: SkyGradient::default(),
            light_position: Vec3::new(5.0, 10.0, 7.5),
            light_color: Color::WHITE,
            light_intensity: 1.0,
            camera_position: Vec3::new(0.0, 5.0, 15.0),
            camera_fov: 75.0,
            camera_near: 0.1,
            camera_far: 1000.0,
            rotation_step: 0.01,
        }
    }
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct Config {
    pub target: DisplayTarget,
    /// Placement seed; drawn from entropy (and logged) when absent
    pub seed: Option<u64>,
    pub width: usize,
    pub height: usize,
    pub target_fps: u32,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    pub scene: SceneConfig,
}

impl Config {
    pub const DEFAULT_WIDTH: usize = 1280;
    pub const DEFAULT_HEIGHT: usize = 720;
    pub const DEFAULT_FPS: u32 = 60;
    pub const DEFAULT_LOG_FILE: &'static str = "garden_renderer.log";
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: DisplayTarget::Window,
            seed: None,
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            target_fps: Self::DEFAULT_FPS,
            log_file: PathBuf::from(Self::DEFAULT_LOG_FILE),
            log_level: LevelFilter::Info,
            scene: SceneConfig::default(),
        }
    }
}
