/// Point lights, Phong materials and the reflectance model
use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::color::{self, Rgb};

/// Directions shorter than this cannot be normalized and contribute no light.
const DIRECTION_EPSILON: f32 = 1e-12;

/// A point light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Point3<f32>,
    /// Per-channel intensity
    pub intensity: Rgb,
}

impl Light {
    pub fn new(position: Point3<f32>, intensity: Rgb) -> Self {
        Self { position, intensity }
    }
}

/// All lights of a scene plus the ambient term
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Lighting {
    pub lights: Vec<Light>,
    pub ambient: Rgb,
}

/// Phong reflectance coefficients.
///
/// Coefficients are per channel; [`Material::uniform`] builds grey ones from scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ka: Rgb,
    pub kd: Rgb,
    pub ks: Rgb,
    pub shininess: f32,
}

impl Material {
    pub fn uniform(ka: f32, kd: f32, ks: f32, shininess: f32) -> Self {
        Self {
            ka: Vector3::repeat(ka),
            kd: Vector3::repeat(kd),
            ks: Vector3::repeat(ks),
            shininess,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::uniform(0.2, 0.7, 0.5, 32.0)
    }
}

/// Light arriving at the camera from `point`.
///
/// For each light the diffuse term is `kd · max(0, N·L) · I` and the specular
/// term `ks · max(0, R·V)^n · I`, with `R` the reflection of `-L` about `N`.
/// The sum over lights plus `ka · ambient` is multiplied channel-wise by
/// `base` and clamped to [0, 1]. A zero normal receives only ambient light.
pub fn reflectance(
    point: &Point3<f32>,
    normal: &Vector3<f32>,
    base: &Rgb,
    camera: &Point3<f32>,
    material: &Material,
    lighting: &Lighting,
) -> Rgb {
    let mut total = material.ka.component_mul(&lighting.ambient);

    let n = normal.try_normalize(DIRECTION_EPSILON);
    let v = (camera - point).try_normalize(DIRECTION_EPSILON);

    if let Some(n) = n {
        for light in &lighting.lights {
            let Some(l) = (light.position - point).try_normalize(DIRECTION_EPSILON) else {
                continue;
            };

            let diffuse = n.dot(&l).max(0.0);
            total += material.kd.component_mul(&light.intensity) * diffuse;

            if let Some(v) = v {
                // reflection of -L about N
                let r = n * (2.0 * n.dot(&l)) - l;
                let specular = r.dot(&v).max(0.0).powf(material.shininess);
                total += material.ks.component_mul(&light.intensity) * specular;
            }
        }
    }

    color::clamp(total.component_mul(base))
}
