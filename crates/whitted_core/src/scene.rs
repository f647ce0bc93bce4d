//! Scene context threaded through every intersection and shading call.

use std::sync::Arc;

use whitted_math::{Interval, Ray};

use crate::color::WHITE;
use crate::floor::Floor;
use crate::light::Light;
use crate::material::PhongCoefficients;
use crate::object::Object;
use crate::texture::{TextureSampler, FALLBACK_TEXTURE};

/// Side length of the floor every loaded scene stands on.
pub const DEFAULT_FLOOR_WIDTH: f64 = 1000.0;

/// Checker tile size of the default floor.
pub const DEFAULT_TILE_WIDTH: f64 = 20.0;

/// Objects, lights and surface settings for one render.
///
/// Read-only while rendering; worker threads share it by reference.
#[derive(Clone, Default)]
pub struct Scene {
    pub objects: Vec<Object>,
    pub lights: Vec<Light>,

    /// Floor samples `texture` instead of its checker pattern
    pub texture_mode: bool,

    texture: Option<Arc<dyn TextureSampler>>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its index.
    pub fn add_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Append the standard checkered floor and return its index.
    pub fn add_default_floor(&mut self) -> usize {
        self.add_object(Object::new(
            Floor::new(DEFAULT_FLOOR_WIDTH, DEFAULT_TILE_WIDTH),
            WHITE,
            PhongCoefficients::new(0.4, 0.2, 0.2, 0.2, 1),
        ))
    }

    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    /// Install the sampler used in texture mode.
    pub fn with_texture(mut self, texture: Arc<dyn TextureSampler>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Sampler the floor should use right now, if any.
    ///
    /// `None` when texture mode is off; the fallback gray when it is on
    /// but nothing was installed.
    pub fn active_texture(&self) -> Option<&dyn TextureSampler> {
        if !self.texture_mode {
            return None;
        }
        Some(self.texture.as_deref().unwrap_or(&FALLBACK_TEXTURE))
    }

    /// Nearest object hit by `ray` and its distance.
    ///
    /// Only strictly positive distances count. On exact ties the object
    /// seen first wins.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<(&Object, f64)> {
        let mut nearest = None;
        let mut closest_so_far = f64::INFINITY;

        for object in &self.objects {
            if let Some(t) = object.intersect(ray) {
                if Interval::new(0.0, closest_so_far).surrounds(t) {
                    closest_so_far = t;
                    nearest = Some((object, t));
                }
            }
        }

        nearest
    }

    /// Get object count.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}
