//! Reflection, refraction and Fresnel terms.
//!
//! All functions take the incident vector `v` and surface normal `n` as unit
//! vectors. Refraction helpers share one convention: when `v` lies on the
//! same side as `n` (`n.dot(v) >= 0`) the ray is leaving the medium, so the
//! normal is flipped and the indices `n1`/`n2` are swapped.

use crate::Vec3;

/// Normalize `v`, leaving a zero-length vector unchanged.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    let magnitude = v.length();
    if magnitude == 0.0 {
        v
    } else {
        v / magnitude
    }
}

/// Mirror `v` about `n`: `normalize(2 * dot(v, n) * n - v)`.
///
/// Both vectors point away from the surface, so the result is the outgoing
/// direction for a view vector `v`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    normalize(2.0 * v.dot(n) * n - v)
}

/// Cosine of incidence, oriented normal and oriented indices.
fn orient(v: Vec3, n: Vec3, n1: f32, n2: f32) -> (f32, Vec3, f32, f32) {
    let c1 = n.dot(v);
    if c1 < 0.0 {
        (-c1, n, n1, n2)
    } else {
        (c1, -n, n2, n1)
    }
}

/// Refract `v` through a boundary from index `n1` into `n2` (Snell's law).
///
/// Callers check [`total_internal_reflection`] first; under total internal
/// reflection the transmitted term is clamped to zero instead of producing NaN.
pub fn refract(v: Vec3, n: Vec3, n1: f32, n2: f32) -> Vec3 {
    let (c1, n, n1, n2) = orient(v, n, n1, n2);
    let eta = n1 / n2;
    let k = (1.0 - eta * eta * (1.0 - c1 * c1)).max(0.0);

    normalize(eta * (v + c1 * n) - k.sqrt() * n)
}

/// True when the incidence angle meets or exceeds the critical angle.
pub fn total_internal_reflection(v: Vec3, n: Vec3, n1: f32, n2: f32) -> bool {
    let (c1, _, n1, n2) = orient(v, n, n1, n2);
    if n1 < n2 {
        return false;
    }

    let theta1 = c1.min(1.0).acos();
    let theta_c = (n2 / n1).asin();
    theta1 >= theta_c
}

/// Fresnel reflectance and transmittance `(kr, kt)`, with `kr + kt == 1`.
pub fn fresnel(v: Vec3, n: Vec3, n1: f32, n2: f32) -> (f32, f32) {
    let (c1, _, n1, n2) = orient(v, n, n1, n2);

    let s2 = n1 * (1.0 - c1 * c1).max(0.0).sqrt() / n2;
    if s2 >= 1.0 {
        return (1.0, 0.0);
    }
    let c2 = (1.0 - s2 * s2).sqrt();

    let f1 = ((n2 * c1 - n1 * c2) / (n2 * c1 + n1 * c2)).powi(2);
    let f2 = ((n1 * c2 - n2 * c1) / (n1 * c2 + n2 * c1)).powi(2);

    let kr = ((f1 + f2) / 2.0).clamp(0.0, 1.0);
    (kr, 1.0 - kr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_normalize_zero_is_unchanged() {
        assert_eq!(normalize(Vec3::ZERO), Vec3::ZERO);
        assert!((normalize(Vec3::new(3.0, 0.0, 4.0)).length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_reflect_about_normal() {
        let v = normalize(Vec3::new(1.0, 1.0, 0.0));
        let r = reflect(v, Vec3::Y);

        assert!(approx(r, normalize(Vec3::new(-1.0, 1.0, 0.0))));
    }

    #[test]
    fn test_reflect_twice_returns_original() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let v = normalize(Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)));
            let n = normalize(Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)));
            if v == Vec3::ZERO || n == Vec3::ZERO {
                continue;
            }

            let once = reflect(v, n);
            assert!(approx(reflect(once, n), v), "v={v:?} n={n:?}");
        }
    }

    #[test]
    fn test_refract_head_on_passes_straight() {
        let t = refract(Vec3::NEG_Y, Vec3::Y, 1.0, 1.5);
        assert!(approx(t, Vec3::NEG_Y));
    }

    #[test]
    fn test_refract_obeys_snell() {
        let v = normalize(Vec3::new(1.0, -1.0, 0.0));
        let t = refract(v, Vec3::Y, 1.0, 1.5);

        let sin_i = v.cross(Vec3::Y).length();
        let sin_t = t.cross(Vec3::Y).length();
        assert!((1.0 * sin_i - 1.5 * sin_t).abs() < 1e-4);
        assert!(t.y < 0.0);
    }

    #[test]
    fn test_refract_from_inside_swaps_indices() {
        // Leaving glass along the normal keeps going out.
        let t = refract(Vec3::Y, Vec3::Y, 1.0, 1.5);
        assert!(approx(t, Vec3::Y));
    }

    #[test]
    fn test_total_internal_reflection() {
        // Entering a denser medium never reflects totally.
        let grazing = normalize(Vec3::new(1.0, -0.05, 0.0));
        assert!(!total_internal_reflection(grazing, Vec3::Y, 1.0, 1.5));

        // Leaving glass at a grazing angle does.
        let inside = normalize(Vec3::new(1.0, 0.05, 0.0));
        assert!(total_internal_reflection(inside, Vec3::Y, 1.0, 1.5));

        // Leaving glass head-on does not.
        assert!(!total_internal_reflection(Vec3::Y, Vec3::Y, 1.0, 1.5));
    }

    #[test]
    fn test_fresnel_sums_to_one() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let v = normalize(Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)));
            if v == Vec3::ZERO {
                continue;
            }
            let n1 = rng.gen_range(0.1..3.0);
            let n2 = rng.gen_range(0.1..3.0);

            let (kr, kt) = fresnel(v, Vec3::Y, n1, n2);
            assert!((kr + kt - 1.0).abs() < 1e-5, "kr={kr} kt={kt}");
            assert!((0.0..=1.0).contains(&kr));
        }
    }

    #[test]
    fn test_fresnel_head_on_glass() {
        let (kr, _) = fresnel(Vec3::NEG_Y, Vec3::Y, 1.0, 1.5);
        // ((1.5 - 1) / (1.5 + 1))^2
        assert!((kr - 0.04).abs() < 1e-4);
    }
}
