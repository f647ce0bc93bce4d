//! Plain-text scene file loader.
//!
//! The format is a whitespace separated token stream; line breaks carry
//! no meaning beyond error reporting.
//!
//! ```text
//! <reflection_depth> <resolution>
//! <object_count>
//!   sphere   cx cy cz radius                     <surface>
//!   triangle x1 y1 z1 x2 y2 z2 x3 y3 z3          <surface>
//!   general  A B C D E F G H I J  rx ry rz  l w h <surface>
//! <point_light_count>
//!   x y z  r g b
//! <spot_light_count>
//!   x y z  r g b  dx dy dz  cutoff_degrees
//! ```
//!
//! where `<surface>` is `r g b ambient diffuse specular reflection shininess`.
//!
//! Unknown object types and degenerate primitives are logged and skipped;
//! the rest of the scene still loads. The default floor is appended after
//! the object list.

use std::collections::VecDeque;
use std::path::Path;

use thiserror::Error;
use whitted_math::{GeometryResult, Vector};

use crate::color::Color;
use crate::light::{PointLight, SpotLight};
use crate::material::PhongCoefficients;
use crate::object::Object;
use crate::quadric::Quadric;
use crate::scene::Scene;
use crate::sphere::Sphere;
use crate::triangle::Triangle;

/// Object type words recognised in the object list.
const OBJECT_KINDS: [&str; 3] = ["sphere", "triangle", "general"];

/// Errors that can occur while reading a scene file.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected end of scene file while reading {0}")]
    UnexpectedEof(&'static str),

    #[error("Invalid {what} '{token}' at line {line}")]
    InvalidNumber {
        what: &'static str,
        token: String,
        line: usize,
    },
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// Everything a scene file provides.
#[derive(Clone)]
pub struct SceneDescription {
    /// Maximum number of reflection bounces
    pub reflection_depth: u32,
    /// Output image is `resolution` × `resolution`
    pub resolution: u32,
    pub scene: Scene,
}

/// Load a scene file from disk.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let description = parse_scene(&content)?;

    log::debug!(
        "Loaded scene {}: {} objects, {} lights",
        path.as_ref().display(),
        description.scene.object_count(),
        description.scene.light_count()
    );

    Ok(description)
}

/// Parse scene file contents.
pub fn parse_scene(content: &str) -> SceneResult<SceneDescription> {
    let mut tokens = Tokens::new(content);

    let reflection_depth = tokens.next_u32("reflection depth")?;
    let resolution = tokens.next_u32("resolution")?;

    let mut scene = Scene::new();
    let mut remaining = tokens.next_count("object count")?;
    let mut skipped_unknown = false;

    while remaining > 0 {
        remaining -= 1;
        let (line, kind) = tokens.next_token("object type")?;

        let object = match kind.as_str() {
            "sphere" => parse_sphere(&mut tokens)?,
            "triangle" => parse_triangle(&mut tokens)?,
            "general" => parse_general(&mut tokens)?,
            other => {
                log::warn!("Unknown object type '{}' at line {}, skipping", other, line);
                remaining = tokens.resync(remaining);
                skipped_unknown = true;
                continue;
            }
        };

        match object {
            Ok(object) => {
                scene.add_object(object);
            }
            Err(err) => log::warn!("Skipping {} at line {}: {}", kind, line, err),
        }
    }

    // Unknown entries may leave parameters of their own before the lights
    if skipped_unknown {
        tokens.skip_to_light_section();
    }
    scene.add_default_floor();

    let point_lights = tokens.next_count("point light count")?;
    for _ in 0..point_lights {
        let position = tokens.next_vector("point light position")?;
        let color = tokens.next_vector("point light color")?;
        scene.add_light(PointLight::new(position, color));
    }

    let spot_lights = tokens.next_count("spot light count")?;
    for _ in 0..spot_lights {
        let line = tokens.line();
        let position = tokens.next_vector("spot light position")?;
        let color = tokens.next_vector("spot light color")?;
        let direction = tokens.next_vector("spot light direction")?;
        let cutoff = tokens.next_f64("spot light cutoff")?;

        match SpotLight::new(position, color, direction, cutoff) {
            Ok(spot) => scene.add_light(spot),
            Err(err) => log::warn!("Skipping spot light at line {}: {}", line, err),
        }
    }

    Ok(SceneDescription {
        reflection_depth,
        resolution,
        scene,
    })
}

fn parse_sphere(tokens: &mut Tokens) -> SceneResult<GeometryResult<Object>> {
    let center = tokens.next_vector("sphere center")?;
    let radius = tokens.next_f64("sphere radius")?;
    let (color, phong) = parse_surface(tokens)?;

    Ok(Sphere::new(center, radius).map(|s| Object::new(s, color, phong)))
}

fn parse_triangle(tokens: &mut Tokens) -> SceneResult<GeometryResult<Object>> {
    let a = tokens.next_vector("triangle vertex")?;
    let b = tokens.next_vector("triangle vertex")?;
    let c = tokens.next_vector("triangle vertex")?;
    let (color, phong) = parse_surface(tokens)?;

    Ok(Triangle::new(a, b, c).map(|t| Object::new(t, color, phong)))
}

fn parse_general(tokens: &mut Tokens) -> SceneResult<GeometryResult<Object>> {
    let mut coefficients = [0.0; 10];
    for c in coefficients.iter_mut() {
        *c = tokens.next_f64("quadric coefficient")?;
    }
    let corner = tokens.next_vector("quadric reference point")?;
    let dimensions = tokens.next_vector("quadric dimensions")?;
    let (color, phong) = parse_surface(tokens)?;

    Ok(Ok(Object::new(
        Quadric::new(coefficients, corner, dimensions),
        color,
        phong,
    )))
}

/// `r g b ambient diffuse specular reflection shininess`
fn parse_surface(tokens: &mut Tokens) -> SceneResult<(Color, PhongCoefficients)> {
    let color = tokens.next_vector("color")?;
    let ambient = tokens.next_f64("ambient coefficient")?;
    let diffuse = tokens.next_f64("diffuse coefficient")?;
    let specular = tokens.next_f64("specular coefficient")?;
    let reflection = tokens.next_f64("reflection coefficient")?;
    let shininess = tokens.next_u32("shininess")?;

    Ok((
        color,
        PhongCoefficients::new(ambient, diffuse, specular, reflection, shininess),
    ))
}

/// Whitespace token stream that remembers source lines.
struct Tokens {
    tokens: VecDeque<(usize, String)>,
    last_line: usize,
}

impl Tokens {
    fn new(content: &str) -> Self {
        let tokens = content
            .lines()
            .enumerate()
            .flat_map(|(i, line)| line.split_whitespace().map(move |t| (i + 1, t.to_string())))
            .collect();

        Self {
            tokens,
            last_line: 0,
        }
    }

    /// Line of the next token, or of the last one read at end of input.
    fn line(&self) -> usize {
        self.tokens.front().map_or(self.last_line, |(line, _)| *line)
    }

    fn next_token(&mut self, what: &'static str) -> SceneResult<(usize, String)> {
        let (line, token) = self.tokens.pop_front().ok_or(SceneError::UnexpectedEof(what))?;
        self.last_line = line;
        Ok((line, token))
    }

    fn next_f64(&mut self, what: &'static str) -> SceneResult<f64> {
        let (line, token) = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| SceneError::InvalidNumber { what, token, line })
    }

    fn next_u32(&mut self, what: &'static str) -> SceneResult<u32> {
        let (line, token) = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| SceneError::InvalidNumber { what, token, line })
    }

    fn next_count(&mut self, what: &'static str) -> SceneResult<usize> {
        let (line, token) = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| SceneError::InvalidNumber { what, token, line })
    }

    fn next_vector(&mut self, what: &'static str) -> SceneResult<Vector> {
        Ok(Vector::new(
            self.next_f64(what)?,
            self.next_f64(what)?,
            self.next_f64(what)?,
        ))
    }

    /// Drop the parameters of an entry whose arity is unknown and return
    /// how many objects are still expected.
    ///
    /// Skips to the next object type word. Light sections are purely
    /// numeric, so every type word ahead starts an object and the count is
    /// capped by them; with none left, no more objects are expected.
    fn resync(&mut self, objects_remaining: usize) -> usize {
        if objects_remaining == 0 {
            return 0;
        }

        let is_kind = |token: &str| OBJECT_KINDS.contains(&token);
        match self.tokens.iter().position(|(_, token)| is_kind(token.as_str())) {
            Some(start) => {
                self.tokens.drain(..start);
                let kinds_ahead = self.tokens.iter().filter(|(_, token)| is_kind(token.as_str())).count();
                objects_remaining.min(kinds_ahead)
            }
            None => 0,
        }
    }

    /// Keep the earliest suffix that forms a complete light section.
    fn skip_to_light_section(&mut self) {
        let words: Vec<&str> = self.tokens.iter().map(|(_, t)| t.as_str()).collect();
        if let Some(start) = (0..words.len()).find(|&i| is_light_section(&words[i..])) {
            self.tokens.drain(..start);
        }
    }
}

/// True if `words` is exactly a point-light block followed by a spot-light block.
fn is_light_section(words: &[&str]) -> bool {
    light_section_len(words) == Some(words.len())
}

/// Token count of the light section starting at `words[0]`, if its counts
/// and numbers are well formed.
fn light_section_len(words: &[&str]) -> Option<usize> {
    let count = |i: usize| words.get(i).and_then(|w| w.parse::<usize>().ok());
    let numeric = |from: usize, to: usize| {
        words
            .get(from..to)
            .is_some_and(|slice| slice.iter().all(|w| w.parse::<f64>().is_ok()))
    };

    let spot_index = count(0)?.checked_mul(6)?.checked_add(1)?;
    let end = count(spot_index)?.checked_mul(10)?.checked_add(spot_index + 1)?;

    (numeric(1, spot_index) && numeric(spot_index + 1, end)).then_some(end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::Light;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const SCENE: &str = "\
3
768

3
sphere
40.0 0.0 10.0
10.0
0.0 1.0 0.0
0.4 0.2 0.2 0.2
10

triangle
50 30 0
70 60 0
50 45 50
1.0 0.0 0.0
0.4 0.2 0.1 0.3
5

general
1 1 1 0 0 0 0 0 0 -100
0 0 0
0 0 20
0.0 1.0 0.0
0.4 0.2 0.1 0.3
10

1
70.0 70.0 70.0
1.0 0.0 0.0

1
-70 70 70
0.0 0.0 1.0
1 -1 -1
12
";

    #[test]
    fn test_parse_full_scene() {
        let description = parse_scene(SCENE).unwrap();

        assert_eq!(description.reflection_depth, 3);
        assert_eq!(description.resolution, 768);

        let scene = &description.scene;
        // three objects plus the default floor
        assert_eq!(scene.object_count(), 4);
        let kinds: Vec<_> = scene.objects.iter().map(|o| o.shape.kind()).collect();
        assert_eq!(kinds, ["sphere", "triangle", "general", "floor"]);

        let sphere = &scene.objects[0];
        assert_eq!(sphere.color, Color::new(0.0, 1.0, 0.0));
        assert_eq!(sphere.phong, PhongCoefficients::new(0.4, 0.2, 0.2, 0.2, 10));

        assert_eq!(scene.light_count(), 2);
        assert!(matches!(scene.lights[0], Light::Point(_)));
        match scene.lights[1] {
            Light::Spot(spot) => {
                assert_eq!(spot.cutoff_deg(), 12.0);
                assert!((spot.direction().length() - 1.0).abs() < 1e-12);
            }
            _ => panic!("expected a spot light"),
        }
    }

    #[test]
    fn test_unknown_object_is_skipped() {
        init_logging();
        let content = "\
1 100
3
cube 1 2 3 4
sphere 0 0 0 5  1 1 1  1 0 0 0 1
torus 9 9
0
0
";
        let description = parse_scene(content).unwrap();
        let kinds: Vec<_> = description.scene.objects.iter().map(|o| o.shape.kind()).collect();

        assert_eq!(kinds, ["sphere", "floor"]);
        assert_eq!(description.scene.light_count(), 0);
    }

    #[test]
    fn test_unknown_last_object_keeps_lights() {
        init_logging();
        let content = "\
1 100
1
torus 9 9 9
1
0 0 100 1 1 1
0
";
        let description = parse_scene(content).unwrap();

        assert_eq!(description.scene.object_count(), 1);
        assert_eq!(description.scene.light_count(), 1);
        assert_eq!(description.scene.lights[0].position(), Vector::new(0.0, 0.0, 100.0));
    }

    #[test]
    fn test_consecutive_unknown_objects_keep_lights() {
        init_logging();
        let content = "\
1 100
2
cube 1 2 3 4
torus 9 9
1
0 0 100 1 1 1
0
";
        let description = parse_scene(content).unwrap();

        assert_eq!(description.scene.object_count(), 1);
        assert_eq!(description.scene.light_count(), 1);
        assert_eq!(description.scene.lights[0].position(), Vector::new(0.0, 0.0, 100.0));
    }

    #[test]
    fn test_unknown_then_known_object() {
        init_logging();
        let content = "\
1 100
4
cube 1 2 3 4
torus 9 9
sphere 0 0 0 5  1 1 1  1 0 0 0 1
cone 2 2
1
0 0 100 1 1 1
0
";
        let description = parse_scene(content).unwrap();
        let kinds: Vec<_> = description.scene.objects.iter().map(|o| o.shape.kind()).collect();

        assert_eq!(kinds, ["sphere", "floor"]);
        assert_eq!(description.scene.light_count(), 1);
    }

    #[test]
    fn test_degenerate_primitive_is_skipped() {
        init_logging();
        let content = "\
2 64
2
triangle 0 0 0  1 0 0  2 0 0  1 1 1  1 0 0 0 1
sphere 0 0 0 -3  1 1 1  1 0 0 0 1
0
1
0 0 10  1 1 1  0 0 0  30
";
        let description = parse_scene(content).unwrap();

        // only the floor survives; the zero-direction spot light is dropped
        assert_eq!(description.scene.object_count(), 1);
        assert_eq!(description.scene.light_count(), 0);
    }

    #[test]
    fn test_empty_object_list() {
        let description = parse_scene("0 10 0 0 0").unwrap();
        assert_eq!(description.reflection_depth, 0);
        assert_eq!(description.scene.object_count(), 1);
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_scene("3\n7x8\n").err().unwrap();
        match err {
            SceneError::InvalidNumber { line, token, .. } => {
                assert_eq!(line, 2);
                assert_eq!(token, "7x8");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_truncated_file() {
        let err = parse_scene("3 768 1 sphere 0 0").err().unwrap();
        assert!(matches!(err, SceneError::UnexpectedEof("sphere center")));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_scene("/definitely/not/a/scene.txt").err().unwrap();
        assert!(matches!(err, SceneError::Io(_)));
    }

    #[test]
    fn test_is_light_section() {
        assert!(is_light_section(&["0", "0"]));
        assert!(is_light_section(&["1", "0", "0", "1", "1", "1", "1", "0"]));
        assert!(!is_light_section(&["9", "0", "0"]));
        assert!(!is_light_section(&["1", "0"]));
    }
}
