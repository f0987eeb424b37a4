use std::fs::OpenOptions;

use log::info;
use simplelog::WriteLogger;

use garden_renderer::{
    config::{Config, DisplayTarget},
    create_clap_command, handle_clap_matches,
    renderers::{Surface, TerminalSurface, WindowSurface},
    App, FrameDriver, RenderError, SceneBuilder,
};

fn main() -> Result<(), RenderError> {
    let matches = create_clap_command().get_matches();
    let config = handle_clap_matches(&matches);

    // stdout belongs to the terminal surface, so everything is logged to a file
    let log_file = OpenOptions::new()
        .write(true)
        .create(true)
        .append(true)
        .open(&config.log_file)?;
    WriteLogger::init(config.log_level, simplelog::Config::default(), log_file)?;
    info!("Starting with {:?}", config);

    match config.target {
        DisplayTarget::Window => {
            let surface = WindowSurface::new(config.width, config.height)?;
            run(surface, &config)
        }
        DisplayTarget::Terminal => {
            let surface = TerminalSurface::new()?;
            run(surface, &config)
        }
    }
}

fn run<S: Surface>(surface: S, config: &Config) -> Result<(), RenderError> {
    let builder = match config.seed {
        Some(seed) => SceneBuilder::new(config.scene.clone()).with_seed(seed),
        None => SceneBuilder::from_entropy(config.scene.clone()),
    };
    info!("Scene seed: {}", builder.seed());

    let (width, height) = surface.size();
    let scene = builder.build(width.max(1), height.max(1))?;
    let driver = FrameDriver::new(config.scene.rotation_step);
    App::new(surface, scene, driver, config.target_fps).run()
}
