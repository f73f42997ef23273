use crate::body::Body;
use crate::integrator::NewtonianGravity;
use crate::vector::Vector2D;

const EARTH_DIAMETER_KM: f64 = 12_756.0;
const EARTH_MASS_KG: f64 = 5.972e24;
const SUN_MASS_KG: f64 = 1.989e30;
const SUN_RADIUS_KM: f64 = 696_000.0;

/// Mass of the Sun in Earth masses, the mass unit of the presets.
pub const SUN_MASS: f64 = SUN_MASS_KG / EARTH_MASS_KG;

/// (name, diameter in km, mean orbital distance in AU)
const PLANETS: [(&str, f64, f64); 8] = [
    ("Mercury", 4_878.0, 0.39),
    ("Venus", 12_104.0, 0.72),
    ("Earth", 12_756.0, 1.0),
    ("Mars", 6_786.0, 1.52),
    ("Jupiter", 142_700.0, 5.2),
    ("Saturn", 120_400.0, 9.54),
    ("Uranus", 51_100.0, 19.19),
    ("Neptune", 49_500.0, 30.07),
];

/// Speed of a circular orbit of radius `r` around `central_mass`: v = sqrt(GM / r).
pub fn circular_speed(central_mass: f64, r: f64) -> f64 {
    (NewtonianGravity::G * central_mass / r).sqrt()
}

/// The Sun followed by the eight planets.
///
/// Each planet starts on the +x axis at its mean orbital distance, moving
/// along +y at circular speed. Masses are estimated from diameter relative
/// to Earth: m = (d / d_earth)³.
pub fn solar_system() -> Vec<Body> {
    let mut bodies = Vec::with_capacity(PLANETS.len() + 1);
    bodies.push(Body::sun("Sun", SUN_MASS, SUN_RADIUS_KM));

    for (name, diameter, distance) in PLANETS {
        let mass = (diameter / EARTH_DIAMETER_KM).powi(3);
        bodies.push(Body::orbiting(
            name,
            mass,
            diameter / 2.0,
            Vector2D::new(distance, 0.0),
            Vector2D::new(0.0, circular_speed(SUN_MASS, distance)),
        ));
    }

    bodies
}

/// Generates a Sun plus `n - 1` unit-mass bodies spread over a disc, each on
/// a circular orbit around the Sun. Deterministic for a given `seed`.
pub fn uniform_disc(n: usize, seed: u64) -> Vec<Body> {
    let mut rng = fastrand::Rng::with_seed(seed);
    let inner_radius = 0.3;
    let outer_radius = 40.0;

    let mut bodies: Vec<Body> = Vec::with_capacity(n);
    if n == 0 {
        return bodies;
    }
    bodies.push(Body::sun("Sun", SUN_MASS, SUN_RADIUS_KM));

    while bodies.len() < n {
        // Random angle
        let a = rng.f64() * std::f64::consts::TAU;
        let (sin, cos) = a.sin_cos();

        // Random radius with uniform area distribution
        let t = inner_radius / outer_radius;
        let r = (rng.f64() * (1.0 - t * t) + t * t).sqrt() * outer_radius;

        let pos = Vector2D::new(cos, sin) * r;
        // Perpendicular to the radius, counter-clockwise
        let vel = Vector2D::new(-sin, cos) * circular_speed(SUN_MASS, r);

        bodies.push(Body::orbiting(
            format!("body-{}", bodies.len()),
            1.0,
            1.0,
            pos,
            vel,
        ));
    }

    bodies
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn solar_system_puts_sun_first() {
        let bodies = solar_system();
        assert_eq!(bodies.len(), 9);
        assert!(bodies[0].is_sun());
        assert!(bodies[1..].iter().all(|b| !b.is_sun()));
        assert_eq!(bodies[3].name(), "Earth");
        assert_relative_eq!(bodies[3].mass(), 1.0);
    }

    #[test]
    fn uniform_disc_is_seeded() {
        let a = uniform_disc(64, 7);
        let b = uniform_disc(64, 7);
        assert_eq!(a.len(), 64);
        assert_eq!(a, b);
        assert!(a[0].is_sun());
        assert!(uniform_disc(0, 7).is_empty());
    }
}
