//! Recursive Phong shading with hard shadows and mirror reflection.

use whitted_core::color::BLACK;
use whitted_core::{Color, Light, Object, Scene};
use whitted_math::{reflect, Interval, Ray, Vector, EPSILON};

/// Color seen along `ray`, following at most `depth` surface hits.
///
/// Depth 0 and rays that hit nothing give black.
pub fn trace(ray: &Ray, scene: &Scene, depth: u32) -> Color {
    if depth == 0 {
        return BLACK;
    }

    match scene.nearest_hit(ray) {
        Some((object, t)) => shade(ray, object, t, scene, depth),
        None => BLACK,
    }
}

/// Shade the point where `ray` meets `object` at distance `t`.
///
/// Sums the ambient term, a diffuse and specular term for every light
/// that reaches the point, and the reflection traced with one less level
/// of depth.
pub fn shade(ray: &Ray, object: &Object, t: f64, scene: &Scene, depth: u32) -> Color {
    if depth == 0 {
        return BLACK;
    }

    let point = ray.at(t);
    let normal = match object.normal_at(point) {
        Ok(normal) => normal,
        Err(err) => {
            log::trace!("No normal on {} at {:?}: {}", object.shape.kind(), point, err);
            return BLACK;
        }
    };
    // Face the incoming ray
    let normal = if ray.direction().dot(normal) > 0.0 {
        -normal
    } else {
        normal
    };

    let base = object.color_at(point, scene.active_texture());
    let phong = &object.phong;

    let mut color = base * phong.ambient;

    for light in &scene.lights {
        if let Some(contribution) = direct_light(light, ray, object, point, normal, base, scene) {
            color += contribution;
        }
    }

    let reflected = reflect(normal, ray.direction());
    if let Ok(reflection_ray) = Ray::new(point, reflected) {
        let reflection_ray = reflection_ray.nudged(EPSILON);
        if let Some((next, t_next)) = scene.nearest_hit(&reflection_ray) {
            color += shade(&reflection_ray, next, t_next, scene, depth - 1) * phong.reflection;
        }
    }

    color
}

/// Diffuse plus specular light from one source, or `None` when the light
/// does not reach the point.
fn direct_light(
    light: &Light,
    ray: &Ray,
    object: &Object,
    point: Vector,
    normal: Vector,
    base: Color,
    scene: &Scene,
) -> Option<Color> {
    let to_point = point - light.position();
    let light_distance = to_point.length();
    if light_distance <= EPSILON {
        return None;
    }

    let shadow_ray = Ray::new(light.position(), to_point).ok()?;
    let falloff = light.falloff(shadow_ray.direction())?;

    if is_occluded(&shadow_ray, light_distance, scene) {
        return None;
    }

    let lambert = normal.dot(-shadow_ray.direction()).max(0.0);
    if lambert < EPSILON {
        return None;
    }

    let phong = &object.phong;
    let diffuse = light.color() * phong.diffuse * lambert * base * falloff;

    let bounce = reflect(normal, shadow_ray.direction());
    let highlight = bounce.dot(-ray.direction()).max(0.0).powf(f64::from(phong.shininess));
    let specular = light.color() * phong.specular * highlight * base * falloff;

    Some(diffuse + specular)
}

/// True if anything sits strictly between the light and the shaded point.
pub fn is_occluded(shadow_ray: &Ray, light_distance: f64, scene: &Scene) -> bool {
    let between = Interval::new(EPSILON, light_distance - EPSILON);

    scene
        .objects
        .iter()
        .filter_map(|object| object.intersect(shadow_ray))
        .any(|t| between.surrounds(t))
}
