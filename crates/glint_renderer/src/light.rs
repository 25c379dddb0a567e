//! Light sources.
//!
//! Every light reports a flat `base_color`; directional and point lights
//! also compute Lambert diffuse and Phong specular terms at an intercept.

use glint_core::Color;
use glint_math::{normalize, reflect, Interval, Vec3};

use crate::hittable::Intercept;

/// Capability shared by every light variant.
pub trait Illuminate {
    /// `intensity * color`.
    fn base_color(&self) -> Color;

    /// Lambert term at the intercept, already weighted by `1 - ks`.
    fn diffuse_contribution(&self, hit: &Intercept) -> Color;

    /// Phong term at the intercept seen from `viewer`, weighted by `ks`.
    fn specular_contribution(&self, hit: &Intercept, viewer: Vec3) -> Color;

    /// Unit direction from `point` toward the light. `None` for ambient
    /// light, and for a point light sitting exactly on `point`.
    fn direction_from(&self, point: Vec3) -> Option<Vec3>;

    /// Distances along a shadow ray from `point` at which a hit blocks
    /// this light.
    fn shadow_range(&self, _point: Vec3) -> Interval {
        Interval::FORWARD
    }
}

/// Uniform light from everywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientLight {
    pub intensity: f32,
    pub color: Color,
}

/// Light arriving from a single direction with no falloff.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    /// Unit direction the light travels in
    pub direction: Vec3,
    pub intensity: f32,
    pub color: Color,
}

/// Light emitted from a position, falling off with squared distance.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub intensity: f32,
    pub color: Color,
}

impl AmbientLight {
    pub fn new(intensity: f32, color: Color) -> Self {
        Self { intensity, color }
    }
}

impl DirectionalLight {
    /// The direction is normalized here.
    pub fn new(direction: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            direction: normalize(direction),
            intensity,
            color,
        }
    }
}

impl PointLight {
    pub fn new(position: Vec3, intensity: f32, color: Color) -> Self {
        Self {
            position,
            intensity,
            color,
        }
    }

    /// `1 / R²` at `point`, or 1 when the point sits on the light.
    fn attenuation(&self, point: Vec3) -> f32 {
        let r2 = self.position.distance_squared(point);
        if r2 > 0.0 {
            1.0 / r2
        } else {
            1.0
        }
    }
}

/// Lambert term for a unit direction toward the light.
fn lambert(hit: &Intercept, to_light: Vec3, intensity: f32, color: Color) -> Color {
    let cos = Interval::UNIT.clamp(hit.normal.dot(to_light));
    color * (cos * intensity * (1.0 - hit.material.ks))
}

/// Phong term for a unit direction toward the light.
fn phong(hit: &Intercept, to_light: Vec3, viewer: Vec3, intensity: f32, color: Color) -> Color {
    let view = normalize(viewer - hit.point);
    let mirrored = reflect(to_light, hit.normal);
    let spec = view.dot(mirrored).max(0.0).powf(hit.material.specular);
    color * (spec * hit.material.ks * intensity)
}

fn clamp_channels(color: Color) -> Color {
    color.clamp(Vec3::ZERO, Vec3::ONE)
}

impl Illuminate for AmbientLight {
    fn base_color(&self) -> Color {
        self.color * self.intensity
    }

    fn diffuse_contribution(&self, _hit: &Intercept) -> Color {
        Color::ZERO
    }

    fn specular_contribution(&self, _hit: &Intercept, _viewer: Vec3) -> Color {
        Color::ZERO
    }

    fn direction_from(&self, _point: Vec3) -> Option<Vec3> {
        None
    }
}

impl Illuminate for DirectionalLight {
    fn base_color(&self) -> Color {
        self.color * self.intensity
    }

    fn diffuse_contribution(&self, hit: &Intercept) -> Color {
        lambert(hit, -self.direction, self.intensity, self.color)
    }

    fn specular_contribution(&self, hit: &Intercept, viewer: Vec3) -> Color {
        phong(hit, -self.direction, viewer, self.intensity, self.color)
    }

    fn direction_from(&self, _point: Vec3) -> Option<Vec3> {
        Some(-self.direction)
    }
}

impl Illuminate for PointLight {
    fn base_color(&self) -> Color {
        self.color * self.intensity
    }

    fn diffuse_contribution(&self, hit: &Intercept) -> Color {
        let to_light = normalize(self.position - hit.point);
        let diffuse = lambert(hit, to_light, self.intensity, self.color);
        clamp_channels(diffuse * self.attenuation(hit.point))
    }

    fn specular_contribution(&self, hit: &Intercept, viewer: Vec3) -> Color {
        let to_light = normalize(self.position - hit.point);
        let specular = phong(hit, to_light, viewer, self.intensity, self.color);
        clamp_channels(specular * self.attenuation(hit.point))
    }

    fn direction_from(&self, point: Vec3) -> Option<Vec3> {
        let to_light = normalize(self.position - point);
        (to_light != Vec3::ZERO).then_some(to_light)
    }

    /// Only geometry between the point and the light casts a shadow.
    fn shadow_range(&self, point: Vec3) -> Interval {
        Interval::new(0.0, self.position.distance(point))
    }
}

/// Any light a scene can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient(AmbientLight),
    Directional(DirectionalLight),
    Point(PointLight),
}

impl Light {
    fn as_illuminate(&self) -> &dyn Illuminate {
        match self {
            Light::Ambient(l) => l,
            Light::Directional(l) => l,
            Light::Point(l) => l,
        }
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self, Light::Ambient(_))
    }
}

impl Illuminate for Light {
    fn base_color(&self) -> Color {
        self.as_illuminate().base_color()
    }

    fn diffuse_contribution(&self, hit: &Intercept) -> Color {
        self.as_illuminate().diffuse_contribution(hit)
    }

    fn specular_contribution(&self, hit: &Intercept, viewer: Vec3) -> Color {
        self.as_illuminate().specular_contribution(hit, viewer)
    }

    fn direction_from(&self, point: Vec3) -> Option<Vec3> {
        self.as_illuminate().direction_from(point)
    }

    fn shadow_range(&self, point: Vec3) -> Interval {
        self.as_illuminate().shadow_range(point)
    }
}

impl From<AmbientLight> for Light {
    fn from(light: AmbientLight) -> Self {
        Light::Ambient(light)
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}
