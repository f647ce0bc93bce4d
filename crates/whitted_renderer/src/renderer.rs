//! Framebuffer driver.
//!
//! Casts one primary ray per pixel from the camera's view window, resolves
//! the nearest hit, shades it and writes the clamped 8-bit color. Columns
//! are fanned out over a rayon pool; each worker owns a disjoint column
//! range, so the output is identical to a single-threaded run.

use std::time::Instant;

use rayon::prelude::*;
use thiserror::Error;
use whitted_core::color::to_rgb8;
use whitted_core::Scene;
use whitted_math::{GeometryResult, Ray, Vector};

use crate::camera::Camera;
use crate::columns::{partition_columns, ColumnRange, ColumnResult};
use crate::shading::shade;

/// Pixel value where nothing was hit.
pub const BACKGROUND: [u8; 3] = [0, 0, 0];

/// Errors reported before a render starts.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid image size {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Thread count must be at least 1")]
    NoThreads,

    #[error("View angle must be between 0 and 180 degrees, got {0}")]
    InvalidViewAngle(f64),

    #[error("Invalid clip planes: near {near}, far {far}")]
    InvalidClipPlanes { near: f64, far: f64 },

    #[error("Failed to start render threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Full field of view in degrees
    pub view_angle: f64,
    /// Distance from the eye to the view window
    pub near_plane: f64,
    /// Hits farther than this along the look direction are dropped
    pub far_plane: f64,
    /// Maximum number of surface hits per primary ray
    pub max_depth: u32,
    /// Worker threads used when `multithreading` is on
    pub threads: usize,
    pub multithreading: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 768,
            image_height: 768,
            view_angle: 80.0,
            near_plane: 1.0,
            far_plane: 500.0,
            max_depth: 3,
            threads: std::thread::available_parallelism().map_or(1, |n| n.get()),
            multithreading: true,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set reflection depth.
    pub fn with_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set worker count; 1 renders on the calling thread.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_view_angle(mut self, degrees: f64) -> Self {
        self.view_angle = degrees;
        self
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.threads == 0 {
            return Err(RenderError::NoThreads);
        }
        if !(self.view_angle > 0.0 && self.view_angle < 180.0) {
            return Err(RenderError::InvalidViewAngle(self.view_angle));
        }
        if !(self.near_plane > 0.0 && self.far_plane > self.near_plane) {
            return Err(RenderError::InvalidClipPlanes {
                near: self.near_plane,
                far: self.far_plane,
            });
        }
        Ok(())
    }

    /// Number of workers a render will actually use.
    pub fn worker_count(&self) -> usize {
        if self.multithreading {
            self.threads.max(1)
        } else {
            1
        }
    }
}

/// 8-bit RGB image, row-major, black until written.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<[u8; 3]>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with the background color.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// Tightly packed RGB bytes, ready for an image encoder.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy a rendered column range into place.
    fn write_columns(&mut self, result: &ColumnResult) {
        let height = self.height as usize;
        for (offset, column) in result.pixels.chunks_exact(height).enumerate() {
            let x = result.range.start + offset as u32;
            for (y, rgb) in column.iter().enumerate() {
                self.set(x, y as u32, *rgb);
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// World-space geometry of the view window for one camera pose.
#[derive(Debug, Clone, Copy)]
struct ViewWindow {
    eye: Vector,
    look: Vector,
    /// Center of pixel (0, 0)
    top_left: Vector,
    /// One pixel to the right
    step_right: Vector,
    /// One pixel up
    step_up: Vector,
}

impl ViewWindow {
    fn new(camera: &Camera, config: &RenderConfig) -> Self {
        let window_size = 2.0 * (config.view_angle.to_radians() / 2.0).tan() * config.near_plane;
        let step_right = camera.right() * (window_size / config.image_width as f64);
        let step_up = camera.up() * (window_size / config.image_height as f64);

        let top_left = camera.position() + camera.look() * config.near_plane - camera.right() * (window_size / 2.0)
            + camera.up() * (window_size / 2.0)
            + step_right * 0.5
            - step_up * 0.5;

        Self {
            eye: camera.position(),
            look: camera.look(),
            top_left,
            step_right,
            step_up,
        }
    }

    /// Ray from the window point of pixel (i, j), pointing away from the eye.
    fn primary_ray(&self, i: u32, j: u32) -> GeometryResult<Ray> {
        let pixel = self.top_left + self.step_right * i as f64 - self.step_up * j as f64;
        Ray::new(pixel, pixel - self.eye)
    }
}

/// Color of pixel (i, j), or `None` for background.
fn render_pixel(view: &ViewWindow, scene: &Scene, config: &RenderConfig, i: u32, j: u32) -> Option<[u8; 3]> {
    let ray = view.primary_ray(i, j).ok()?;
    let (object, t) = scene.nearest_hit(&ray)?;

    if view.look.dot(ray.direction() * t) > config.far_plane {
        return None;
    }

    Some(to_rgb8(shade(&ray, object, t, scene, config.max_depth)))
}

/// Render every pixel of a column range, column by column.
fn render_columns(range: ColumnRange, view: &ViewWindow, scene: &Scene, config: &RenderConfig) -> ColumnResult {
    let mut pixels = Vec::with_capacity(range.width() as usize * config.image_height as usize);

    for i in range.columns() {
        for j in 0..config.image_height {
            pixels.push(render_pixel(view, scene, config, i, j).unwrap_or(BACKGROUND));
        }
    }

    ColumnResult::new(range, pixels)
}

/// Render the scene as seen from `camera`.
pub fn render(camera: &Camera, scene: &Scene, config: &RenderConfig) -> Result<ImageBuffer, RenderError> {
    config.validate()?;

    let workers = config.worker_count();
    log::info!(
        "Rendering {}x{} with {} thread(s), depth {}, {} objects, {} lights",
        config.image_width,
        config.image_height,
        workers,
        config.max_depth,
        scene.object_count(),
        scene.light_count()
    );
    let start = Instant::now();

    let view = ViewWindow::new(camera, config);
    let mut image = ImageBuffer::new(config.image_width, config.image_height);

    if workers == 1 {
        let whole = ColumnRange::new(0, config.image_width, 0);
        image.write_columns(&render_columns(whole, &view, scene, config));
    } else {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
        let ranges = partition_columns(config.image_width, workers);

        let results: Vec<ColumnResult> = pool.install(|| {
            ranges
                .into_par_iter()
                .filter(|range| !range.is_empty())
                .map(|range| render_columns(range, &view, scene, config))
                .collect()
        });

        for result in &results {
            log::debug!("Columns {:?} done", result.range.columns());
            image.write_columns(result);
        }
    }

    log::info!("Render finished in {:.2?}", start.elapsed());
    Ok(image)
}
