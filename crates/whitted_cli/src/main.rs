mod demo;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use whitted_core::{load_scene, Texture};
use whitted_math::Vector;
use whitted_renderer::camera::{DEFAULT_ROTATION_SPEED, DEFAULT_SPEED};
use whitted_renderer::{render, Camera, RenderConfig};

/// Render a scene file with the recursive ray tracer.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene description file; renders a built-in scene when omitted
    scene: Option<PathBuf>,

    /// Output image; format follows the extension (default Output_<n>.bmp)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Worker threads (default: all cores)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Render on the calling thread only
    #[arg(long)]
    single_threaded: bool,

    /// Floor samples a texture instead of the checker pattern
    #[arg(long)]
    texture_mode: bool,

    /// Image used by the floor in texture mode (gray when omitted)
    #[arg(long, value_name = "IMAGE")]
    texture: Option<PathBuf>,

    /// Override the scene's reflection depth
    #[arg(short, long)]
    depth: Option<u32>,

    /// Override the scene's (square) resolution
    #[arg(short, long)]
    resolution: Option<u32>,

    /// Field of view in degrees
    #[arg(long, default_value_t = 80.0)]
    view_angle: f64,

    /// Camera position as x,y,z
    #[arg(long, value_parser = parse_vector, default_value = "125,-125,125", allow_hyphen_values = true)]
    eye: Vector,

    /// Point the camera looks at
    #[arg(long, value_parser = parse_vector, default_value = "0,0,0", allow_hyphen_values = true)]
    target: Vector,

    /// Up hint for the camera frame
    #[arg(long, value_parser = parse_vector, default_value = "0,0,1", allow_hyphen_values = true)]
    up: Vector,

    /// Distance of one camera move step
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    speed: f64,

    /// Degrees of one camera rotation step
    #[arg(long, default_value_t = DEFAULT_ROTATION_SPEED)]
    rotation_speed: f64,

    /// Camera steps applied in order before rendering (repeatable)
    #[arg(long = "move", value_enum, value_name = "MOVE")]
    moves: Vec<CameraMove>,
}

/// One camera control step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum CameraMove {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    LookLeft,
    LookRight,
    LookUp,
    LookDown,
    TiltClockwise,
    TiltCounterclockwise,
    UpSameRef,
    DownSameRef,
}

impl CameraMove {
    fn apply(self, camera: &mut Camera) {
        match self {
            CameraMove::Forward => camera.move_forward(),
            CameraMove::Backward => camera.move_backward(),
            CameraMove::Left => camera.move_left(),
            CameraMove::Right => camera.move_right(),
            CameraMove::Up => camera.move_up(),
            CameraMove::Down => camera.move_down(),
            CameraMove::LookLeft => camera.look_left(),
            CameraMove::LookRight => camera.look_right(),
            CameraMove::LookUp => camera.look_up(),
            CameraMove::LookDown => camera.look_down(),
            CameraMove::TiltClockwise => camera.tilt_clockwise(),
            CameraMove::TiltCounterclockwise => camera.tilt_counterclockwise(),
            CameraMove::UpSameRef => camera.move_up_same_ref(),
            CameraMove::DownSameRef => camera.move_down_same_ref(),
        }
    }
}

/// Parse `x,y,z`.
fn parse_vector(s: &str) -> Result<Vector, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in '{s}': {e}"))?;

    match parts[..] {
        [x, y, z] => Ok(Vector::new(x, y, z)),
        _ => Err(format!("expected x,y,z, got '{s}'")),
    }
}

fn build_camera(args: &Args) -> Result<Camera> {
    let mut camera = Camera::look_at(args.eye, args.target, args.up, args.speed, args.rotation_speed)
        .context("Invalid camera placement")?;

    for step in &args.moves {
        step.apply(&mut camera);
    }
    log::debug!(
        "Camera at {:?}, look {:?}, up {:?}",
        camera.position(),
        camera.look(),
        camera.up()
    );

    Ok(camera)
}

fn build_config(args: &Args, scene_depth: u32, scene_resolution: u32) -> RenderConfig {
    let resolution = args.resolution.unwrap_or(scene_resolution);
    let mut config = RenderConfig::default()
        .with_resolution(resolution, resolution)
        .with_depth(args.depth.unwrap_or(scene_depth))
        .with_view_angle(args.view_angle);

    if let Some(threads) = args.threads {
        config = config.with_threads(threads);
    }
    config.multithreading = !args.single_threaded;
    config
}

/// Decode an image file into a floor texture.
fn load_texture(path: &Path) -> Result<Texture> {
    let img = image::open(path)
        .with_context(|| format!("Failed to load texture {}", path.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();

    Texture::from_rgb_bytes(width, height, img.as_raw())
        .with_context(|| format!("Texture {} has no pixels", path.display()))
}

/// First `Output_<n>.bmp` in `dir` that does not exist yet.
fn next_output_path(dir: &Path) -> PathBuf {
    (1u32..)
        .map(|n| dir.join(format!("Output_{n}.bmp")))
        .find(|path| !path.exists())
        .unwrap_or_else(|| dir.join("Output.bmp"))
}

fn run(args: &Args) -> Result<()> {
    let description = match &args.scene {
        Some(path) => load_scene(path).with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, rendering the demo scene");
            demo::demo_scene().context("Failed to build demo scene")?
        }
    };

    let mut scene = description.scene;
    scene.texture_mode = args.texture_mode;
    if let Some(path) = &args.texture {
        scene = scene.with_texture(Arc::new(load_texture(path)?));
    }

    let camera = build_camera(args)?;
    let config = build_config(args, description.reflection_depth, description.resolution);

    let start = Instant::now();
    let image = render(&camera, &scene, &config)?;

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| next_output_path(Path::new(".")));
    image::save_buffer(
        &output,
        image.as_bytes(),
        image.width,
        image.height,
        image::ColorType::Rgb8,
    )
    .with_context(|| format!("Failed to save {}", output.display()))?;

    log::info!("Saved {} in {:.2?}", output.display(), start.elapsed());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    run(&args)
}
