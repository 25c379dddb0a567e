//! The closed set of scene shapes.

use glint_core::Material;
use glint_math::Ray;

use crate::aa_box::AaBox;
use crate::hittable::{Hittable, SurfaceHit};
use crate::mesh::TriangleMesh;
use crate::plane::{Disk, Plane};
use crate::sphere::Sphere;
use crate::triangle::Triangle;

/// Any shape a scene can hold.
#[derive(Debug, Clone)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Disk(Disk),
    Box(AaBox),
    Triangle(Triangle),
    Mesh(TriangleMesh),
}

impl Shape {
    fn as_hittable(&self) -> &dyn Hittable {
        match self {
            Shape::Sphere(s) => s,
            Shape::Plane(p) => p,
            Shape::Disk(d) => d,
            Shape::Box(b) => b,
            Shape::Triangle(t) => t,
            Shape::Mesh(m) => m,
        }
    }
}

impl Hittable for Shape {
    #[inline]
    fn intersect(&self, ray: &Ray) -> Option<SurfaceHit> {
        self.as_hittable().intersect(ray)
    }

    #[inline]
    fn material(&self) -> &Material {
        self.as_hittable().material()
    }
}

macro_rules! impl_from_shape {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Shape {
                fn from(shape: $ty) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_from_shape! {
    Sphere => Sphere,
    Plane => Plane,
    Disk => Disk,
    Box => AaBox,
    Triangle => Triangle,
    Mesh => TriangleMesh,
}
