//! Built-in scene rendered when no scene file is given.

use whitted_core::{
    Color, Object, PhongCoefficients, PointLight, Quadric, Scene, SceneDescription, Sphere, SpotLight, Triangle,
};
use whitted_math::{GeometryResult, Vector};

/// Two spheres, a triangle and a clipped cylinder on the checkered floor,
/// lit by two point lights and a blue spot light.
pub fn demo_scene() -> GeometryResult<SceneDescription> {
    let mut scene = Scene::new();

    scene.add_object(Object::new(
        Sphere::new(Vector::new(40.0, 0.0, 10.0), 10.0)?,
        Color::new(0.0, 1.0, 0.0),
        PhongCoefficients::new(0.4, 0.2, 0.2, 0.2, 10),
    ));
    scene.add_object(Object::new(
        Sphere::new(Vector::new(-30.0, 60.0, 20.0), 20.0)?,
        Color::new(0.0, 0.0, 1.0),
        PhongCoefficients::new(0.2, 0.2, 0.4, 0.2, 15),
    ));
    scene.add_object(Object::new(
        Triangle::new(
            Vector::new(50.0, 30.0, 0.0),
            Vector::new(70.0, 60.0, 0.0),
            Vector::new(50.0, 45.0, 50.0),
        )?,
        Color::new(1.0, 0.0, 0.0),
        PhongCoefficients::new(0.4, 0.2, 0.1, 0.3, 5),
    ));

    // x² + y² = 100, cut to 0 <= z <= 20
    let cylinder = Quadric::new(
        [1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -100.0],
        Vector::new(0.0, 0.0, 0.0),
        Vector::new(0.0, 0.0, 20.0),
    );
    scene.add_object(Object::new(
        cylinder,
        Color::new(0.0, 1.0, 1.0),
        PhongCoefficients::new(0.4, 0.2, 0.1, 0.3, 10),
    ));

    scene.add_default_floor();

    scene.add_light(PointLight::new(Vector::new(70.0, 70.0, 70.0), Color::new(1.0, 1.0, 1.0)));
    scene.add_light(PointLight::new(Vector::new(-70.0, -70.0, 120.0), Color::splat(0.6)));
    scene.add_light(SpotLight::new(
        Vector::new(-70.0, 70.0, 70.0),
        Color::new(0.0, 0.0, 1.0),
        Vector::new(1.0, -1.0, -1.0),
        12.0,
    )?);

    Ok(SceneDescription {
        reflection_depth: 3,
        resolution: 768,
        scene,
    })
}
