use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use tinyraster::config::{DEFAULT_HEIGHT, DEFAULT_MESH, DEFAULT_OUTPUT, DEFAULT_WIDTH, DEMO_SIZE};
use tinyraster::{Engine, Mesh, RasterizerType, RenderConfig, Scene};

fn create_clap_command() -> Command {
    Command::new("tinyraster")
        .about("Rasterize an OBJ mesh into a TGA image on the CPU")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("mesh")
                .value_name("MESH")
                .help(format!("Path to the .obj mesh to render [default: {DEFAULT_MESH}]"))
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the TGA image")
                .default_value(DEFAULT_OUTPUT)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .value_name("PIXELS")
                .help(format!(
                    "Image width [default: {DEFAULT_WIDTH}, {DEMO_SIZE} for the triangles scene]"
                ))
                .value_parser(value_parser!(u32).range(1..=16384)),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .value_name("PIXELS")
                .help(format!(
                    "Image height [default: {DEFAULT_HEIGHT}, {DEMO_SIZE} for the triangles scene]"
                ))
                .value_parser(value_parser!(u32).range(1..=16384)),
        )
        .arg(
            Arg::new("scene")
                .short('s')
                .long("scene")
                .value_name("SCENE")
                .help("What to draw: 'shaded', 'wireframe' or 'triangles'")
                .default_value(Scene::default().name())
                .value_parser(|s: &str| s.parse::<Scene>()),
        )
        .arg(
            Arg::new("rasterizer")
                .short('r')
                .long("rasterizer")
                .value_name("ALGORITHM")
                .help("Triangle fill: 'barycentric' (z-buffered) or 'sweep'")
                .default_value(RasterizerType::default().name())
                .value_parser(|s: &str| s.parse::<RasterizerType>()),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Log more; repeat for debug output")
                .action(ArgAction::Count),
        )
}

fn init_logging(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    TermLogger::init(
        level,
        ConfigBuilder::new().build(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("failed to initialise logging")
}

fn config_from_matches(matches: &ArgMatches) -> RenderConfig {
    let scene = matches.get_one::<Scene>("scene").copied().unwrap_or_default();
    let defaults = RenderConfig::for_scene(scene);
    RenderConfig {
        width: matches.get_one::<u32>("width").copied().unwrap_or(defaults.width),
        height: matches.get_one::<u32>("height").copied().unwrap_or(defaults.height),
        rasterizer: matches
            .get_one::<RasterizerType>("rasterizer")
            .copied()
            .unwrap_or(defaults.rasterizer),
        output: matches
            .get_one::<PathBuf>("output")
            .cloned()
            .unwrap_or(defaults.output.clone()),
        ..defaults
    }
}

fn main() -> Result<()> {
    let matches = create_clap_command().get_matches();
    init_logging(matches.get_count("verbose"))?;

    let config = config_from_matches(&matches);
    let mesh = if config.scene.needs_mesh() {
        let path = matches
            .get_one::<PathBuf>("mesh")
            .cloned()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MESH));
        let mesh = Mesh::from_obj(&path)
            .with_context(|| format!("failed to load mesh {}", path.display()))?;
        Some(mesh)
    } else {
        None
    };

    let output = config.output.clone();
    let mut engine = Engine::new(config);
    let stats = engine.render(mesh.as_ref());
    info!(
        "{} faces: {} drawn, {} culled, {} degenerate",
        stats.faces, stats.drawn, stats.culled, stats.degenerate
    );

    engine
        .write(&output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_well_formed() {
        create_clap_command().debug_assert();
    }

    #[test]
    fn defaults_match_config() {
        let matches = create_clap_command().get_matches_from(["tinyraster"]);
        assert_eq!(config_from_matches(&matches), RenderConfig::default());
        assert!(matches.get_one::<PathBuf>("mesh").is_none());
    }

    #[test]
    fn flags_override_config() {
        let matches = create_clap_command().get_matches_from([
            "tinyraster",
            "head.obj",
            "--scene",
            "wireframe",
            "-r",
            "sweep",
            "--width",
            "320",
            "-o",
            "frame.tga",
            "-vv",
        ]);
        let config = config_from_matches(&matches);
        assert_eq!(config.scene, Scene::Wireframe);
        assert_eq!(config.rasterizer, RasterizerType::Sweep);
        assert_eq!((config.width, config.height), (320, DEFAULT_HEIGHT));
        assert_eq!(config.output, PathBuf::from("frame.tga"));
        assert_eq!(matches.get_one::<PathBuf>("mesh"), Some(&PathBuf::from("head.obj")));
        assert_eq!(matches.get_count("verbose"), 2);
    }

    #[test]
    fn triangles_scene_uses_demo_size_unless_overridden() {
        let matches = create_clap_command().get_matches_from(["tinyraster", "-s", "triangles"]);
        let config = config_from_matches(&matches);
        assert_eq!(config.scene, Scene::Triangles);
        assert_eq!((config.width, config.height), (DEMO_SIZE, DEMO_SIZE));

        let matches = create_clap_command()
            .get_matches_from(["tinyraster", "-s", "triangles", "--height", "300"]);
        let config = config_from_matches(&matches);
        assert_eq!((config.width, config.height), (DEMO_SIZE, 300));
    }

    #[test]
    fn rejects_unknown_scene_and_zero_size() {
        assert!(create_clap_command()
            .try_get_matches_from(["tinyraster", "--scene", "teapot"])
            .is_err());
        assert!(create_clap_command()
            .try_get_matches_from(["tinyraster", "--width", "0"])
            .is_err());
    }
}
