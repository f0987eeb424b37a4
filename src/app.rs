use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::{
    core::Scene,
    error::RenderError,
    metrics::Metrics,
    pipeline::Pipeline,
    renderers::{HostEvent, Surface},
    viewport,
};

/// Per-frame scene update: spins every entity in the scene's update list.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    step: f32,
    ticks: u64,
}

impl FrameDriver {
    pub fn new(step: f32) -> Self {
        Self { step, ticks: 0 }
    }

    pub fn tick(&mut self, scene: &mut Scene) {
        scene.spin(self.step);
        self.ticks += 1;
    }

    /// Number of ticks applied so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Stop and pause switches for a running [`App`]. Clones share state, so a
/// handle can be sent to another thread.
#[derive(Debug, Clone, Default)]
pub struct LoopControl {
    stopped: Arc<AtomicBool>,
    paused: Arc<AtomicBool>,
}

impl LoopControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
    }

    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }
}

/// Ties a scene, a renderer and a host surface into the display loop.
pub struct App<S: Surface> {
    surface: S,
    scene: Scene,
    pipeline: Pipeline<S::Target>,
    driver: FrameDriver,
    control: LoopControl,
    metrics: Metrics,
    frame_duration: Duration,
    last_frame: Instant,
}

impl<S: Surface> App<S> {
    pub fn new(surface: S, mut scene: Scene, driver: FrameDriver, target_fps: u32) -> Self {
        let (width, height) = surface.size();
        let mut pipeline = Pipeline::new(width, height);
        if let Err(e) = viewport::resize(&mut scene, &mut pipeline, width, height) {
            warn!("Starting with an unusable surface: {}", e);
        }

        Self {
            surface,
            scene,
            pipeline,
            driver,
            control: LoopControl::new(),
            metrics: Metrics::new(),
            frame_duration: Duration::from_secs_f32(1.0 / target_fps.max(1) as f32),
            last_frame: Instant::now(),
        }
    }

    /// A handle that can stop or pause the loop from anywhere.
    pub fn control(&self) -> LoopControl {
        self.control.clone()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn pipeline(&self) -> &Pipeline<S::Target> {
        &self.pipeline
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn driver(&self) -> &FrameDriver {
        &self.driver
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// One refresh: handle host events, advance the animation unless paused,
    /// then draw and present.
    pub fn step(&mut self) -> Result<(), RenderError> {
        let frame_start = Instant::now();

        for event in self.surface.poll_events()? {
            self.handle_event(event);
        }
        if self.control.is_stopped() {
            return Ok(());
        }

        if !self.control.is_paused() {
            self.driver.tick(&mut self.scene);
        }

        self.pipeline.render_frame(&self.scene);
        self.surface.present(&self.pipeline.front_buffer())?;

        self.metrics.update(frame_start.elapsed());
        let now = Instant::now();
        if self.metrics.roll_window(now) {
            debug!("{}", self.metrics);
            self.metrics.reset_window(now);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::Resized { width, height } => {
                if let Err(e) = viewport::resize(&mut self.scene, &mut self.pipeline, width, height)
                {
                    warn!("Ignoring resize: {}", e);
                }
            }
            HostEvent::CloseRequested => {
                info!("Close requested");
                self.control.stop();
            }
        }
    }

    /// Step at the target frame rate until stopped or the surface closes.
    pub fn run(&mut self) -> Result<(), RenderError> {
        info!(
            "Entering display loop at {:.1} fps",
            1.0 / self.frame_duration.as_secs_f32()
        );
        while !self.control.is_stopped() && self.surface.is_open() {
            let now = Instant::now();
            let delta = now - self.last_frame;
            if delta >= self.frame_duration {
                self.step()?;
                self.last_frame = now;
            } else {
                thread::sleep(self.frame_duration - delta);
            }
        }
        info!("Display loop finished after {} ticks", self.driver.ticks());
        Ok(())
    }

    /// Run `n` steps back to back with no frame pacing. Ends early only if
    /// the loop is stopped.
    pub fn run_frames(&mut self, n: usize) -> Result<(), RenderError> {
        for _ in 0..n {
            if self.control.is_stopped() {
                break;
            }
            self.step()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Entity, EntityKind, Material, Mesh};
    use std::f32::consts::TAU;

    fn spinning_scene(cubes: usize) -> Scene {
        let mut scene = Scene::default();
        for i in 0..cubes {
            scene.add_rotating(Entity::new(
                format!("cube_{i}"),
                EntityKind::Cube,
                Mesh::cube(1.0, 1.0, 1.0),
                Material::basic(crate::core::Color::RED),
            ));
        }
        scene
    }

    #[test]
    fn tick_turns_every_cube_about_x_and_y() {
        let mut scene = spinning_scene(3);
        let mut driver = FrameDriver::new(0.01);
        for _ in 0..100 {
            driver.tick(&mut scene);
        }
        assert_eq!(driver.ticks(), 100);
        for cube in scene.rotating_entities() {
            let rot = cube.transform.rotation();
            assert!((rot.x - 1.0).abs() < 1e-3);
            assert!((rot.y - 1.0).abs() < 1e-3);
            assert_eq!(rot.z, 0.0);
        }
    }

    #[test]
    fn angles_wrap_into_one_turn() {
        let mut scene = spinning_scene(1);
        let mut driver = FrameDriver::new(0.01);
        for _ in 0..700 {
            driver.tick(&mut scene);
        }
        let rot = scene.entities[0].transform.rotation();
        let expected = 7.0_f32.rem_euclid(TAU);
        assert!((rot.x - expected).abs() < 1e-3);
        assert!(rot.x < TAU);
    }

    #[test]
    fn loop_control_clones_share_state() {
        let control = LoopControl::new();
        let handle = control.clone();
        handle.pause();
        assert!(control.is_paused());
        handle.resume();
        assert!(!control.is_paused());
        thread::spawn(move || handle.stop()).join().unwrap();
        assert!(control.is_stopped());
    }
}
