use serde::{Deserialize, Serialize};

/// Seeded 2D value noise.
///
/// Lattice corners carry hashed scalars (not gradients) that are blended with
/// smoothstep-weighted bilinear interpolation. Output lies in `[-1, 1]`, is
/// continuous, and depends only on `(seed, x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoiseField {
    seed: i64,
}

impl NoiseField {
    pub fn new(seed: i64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x0 = x.floor();
        let y0 = y.floor();
        let x1 = x0 + 1.0;
        let y1 = y0 + 1.0;

        let tx = smoothstep(x - x0);
        let ty = smoothstep(y - y0);

        let n00 = self.corner(x0, y0);
        let n10 = self.corner(x1, y0);
        let n01 = self.corner(x0, y1);
        let n11 = self.corner(x1, y1);

        let top = lerp(n00, n10, tx);
        let bottom = lerp(n01, n11, tx);
        lerp(top, bottom, ty) * 2.0 - 1.0
    }

    /// Scalar in `[0, 1)` for a lattice point.
    fn corner(&self, x: f64, y: f64) -> f64 {
        let key = x * 12.9898 + y * 78.233;
        // Truncate to a wrapped 32-bit integer before reducing.
        let h = (key * 15731.0 + self.seed as f64) as i64 as i32;
        f64::from(h.rem_euclid(1_000_000)) / 1_000_000.0
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_seed_same_value() {
        let a = NoiseField::new(42);
        let b = NoiseField::new(42);
        for i in 0..50 {
            let x = i as f64 * 0.37 - 4.0;
            let y = i as f64 * 0.11 + 1.5;
            assert_eq!(a.sample(x, y), b.sample(x, y));
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = NoiseField::new(1);
        let b = NoiseField::new(2);
        let differs = (0..20).any(|i| {
            let x = i as f64 * 0.5 + 0.25;
            a.sample(x, 0.75) != b.sample(x, 0.75)
        });
        assert!(differs);
    }

    #[test]
    fn lattice_points_hit_corner_values() {
        let noise = NoiseField::new(7);
        let at_corner = noise.sample(3.0, -2.0);
        assert_eq!(at_corner, noise.corner(3.0, -2.0) * 2.0 - 1.0);
    }

    proptest! {
        #[test]
        fn output_in_range(seed in -1_000_000i64..1_000_000, x in -50.0f64..50.0, y in -50.0f64..50.0) {
            let v = NoiseField::new(seed).sample(x, y);
            prop_assert!((-1.0..=1.0).contains(&v), "sample {v} out of range");
        }

        #[test]
        fn small_steps_change_little(seed in 0i64..1_000_000, x in -20.0f64..20.0, y in -20.0f64..20.0) {
            let noise = NoiseField::new(seed);
            let d = (noise.sample(x, y) - noise.sample(x + 1e-4, y + 1e-4)).abs();
            // Smoothstep slope peaks at 1.5 per axis, values span 2.
            prop_assert!(d < 0.01, "jump of {d} at ({x}, {y})");
        }
    }
}
