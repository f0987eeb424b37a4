use std::{path::PathBuf, str::FromStr};

use clap::{value_parser, Arg, Command};
use log::LevelFilter;

pub mod app;
pub mod builder;
pub mod config;
pub mod core;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod renderers;
pub mod util;
pub mod viewport;

pub use app::{App, FrameDriver, LoopControl};
pub use builder::SceneBuilder;
pub use config::{Config, DisplayTarget, SceneConfig};
pub use core::Camera;
pub use core::Color;
pub use core::Entity;
pub use core::Scene;
pub use error::RenderError;
pub use metrics::Metrics;
pub use util::format_mat4;

pub fn create_clap_command() -> Command {
    Command::new("garden_renderer")
        .about("Software-rendered garden of spinning cubes and cone trees under a gradient sky")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("mode")
                .short('m')
                .long("mode")
                .value_name("MODE")
                .help("Where to draw ('window', 'terminal', 'w', or 't')")
                .required(false)
                .value_parser(["window", "terminal", "w", "t"]), // Accept both long and shorthand
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .value_name("SEED")
                .help("Seed for cube and tree placement. Random (and logged) if not supplied.")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("PIXELS")
                .help("Initial window width")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_name("PIXELS")
                .help("Initial window height")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Where to write the log")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log verbosity")
                .value_parser(["off", "error", "warn", "info", "debug", "trace"]),
        )
}

pub fn handle_clap_matches(matches: &clap::ArgMatches) -> Config {
    let defaults = Config::default();

    // the value parser only lets the four mode spellings through
    let target = match matches.get_one::<String>("mode").map(|s| s.as_str()) {
        Some("terminal" | "t") => DisplayTarget::Terminal,
        _ => DisplayTarget::Window,
    };
    let log_level = matches
        .get_one::<String>("log-level")
        .and_then(|s| LevelFilter::from_str(s).ok())
        .unwrap_or(defaults.log_level);

    Config {
        target,
        seed: matches.get_one::<u64>("seed").copied(),
        width: matches
            .get_one::<usize>("width")
            .copied()
            .unwrap_or(defaults.width),
        height: matches
            .get_one::<usize>("height")
            .copied()
            .unwrap_or(defaults.height),
        log_file: matches
            .get_one::<PathBuf>("log-file")
            .cloned()
            .unwrap_or(defaults.log_file),
        log_level,
        ..defaults
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let matches = create_clap_command()
            .try_get_matches_from(std::iter::once("garden_renderer").chain(args.iter().copied()))
            .unwrap();
        handle_clap_matches(&matches)
    }

    #[test]
    fn no_flags_gives_defaults() {
        let config = parse(&[]);
        assert_eq!(config.target, DisplayTarget::Window);
        assert_eq!(config.seed, None);
        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.log_level, LevelFilter::Info);
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn short_and_long_flags() {
        let config = parse(&[
            "-m",
            "t",
            "-s",
            "42",
            "--width",
            "320",
            "--height",
            "200",
            "--log-file",
            "out.log",
            "--log-level",
            "debug",
        ]);
        assert_eq!(config.target, DisplayTarget::Terminal);
        assert_eq!(config.seed, Some(42));
        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.log_file, PathBuf::from("out.log"));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn every_mode_spelling_maps_to_its_target() {
        assert_eq!(parse(&["--mode", "window"]).target, DisplayTarget::Window);
        assert_eq!(parse(&["-m", "w"]).target, DisplayTarget::Window);
        assert_eq!(parse(&["--mode", "terminal"]).target, DisplayTarget::Terminal);
        assert_eq!(parse(&["-m", "t"]).target, DisplayTarget::Terminal);
    }

    #[test]
    fn unknown_mode_is_rejected_by_the_parser() {
        assert!(create_clap_command()
            .try_get_matches_from(["garden_renderer", "--mode", "video"])
            .is_err());
    }
}
