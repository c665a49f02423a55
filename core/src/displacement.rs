use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;

use crate::error::{Result, TerrainError};
use crate::layer::{Layer, Point};

// 2^24 + 1 points is already far beyond any image width
pub const MAX_ITERATIONS: u32 = 24;

// Source of the random sign applied to each midpoint.
// `true` means the midpoint is pushed up by the current displacement.
pub trait SignSource {
    fn next_sign(&mut self) -> bool;
}

impl<S: SignSource + ?Sized> SignSource for &mut S {
    fn next_sign(&mut self) -> bool {
        (**self).next_sign()
    }
}

// Fair coin flips from any rand RNG
pub struct RandomSigns<R = Pcg64Mcg> {
    rng: R,
}

impl RandomSigns<Pcg64Mcg> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg64Mcg::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSigns<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> SignSource for RandomSigns<R> {
    fn next_sign(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

// Replays a fixed sign sequence, wrapping around at the end.
// An empty sequence always answers `true`.
#[derive(Debug, Clone)]
pub struct FixedSigns {
    signs: Vec<bool>,
    next: usize,
}

impl FixedSigns {
    pub fn new(signs: Vec<bool>) -> Self {
        Self { signs, next: 0 }
    }

    pub fn always(sign: bool) -> Self {
        Self::new(vec![sign])
    }
}

impl SignSource for FixedSigns {
    fn next_sign(&mut self) -> bool {
        if self.signs.is_empty() {
            return true;
        }
        let sign = self.signs[self.next % self.signs.len()];
        self.next = self.next.wrapping_add(1);
        sign
    }
}

// 1D midpoint displacement between two endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct MidpointDisplacement {
    start: Point,
    end: Point,
    roughness: f64, // decay exponent, displacement shrinks by 2^-roughness per iteration
    initial_displacement: Option<f64>,
    iterations: u32,
}

impl MidpointDisplacement {
    pub fn new(start: Point, end: Point, roughness: f64, iterations: u32) -> Self {
        Self {
            start,
            end,
            roughness,
            initial_displacement: None,
            iterations,
        }
    }

    // Without this the first displacement is the mean of the endpoint elevations
    pub fn initial_displacement(mut self, displacement: f64) -> Self {
        self.initial_displacement = Some(displacement);
        self
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn start_displacement(&self) -> f64 {
        self.initial_displacement
            .unwrap_or((self.start.y + self.end.y) / 2.0)
    }

    // Displacement applied to the midpoints inserted at `level` (0-based)
    pub fn displacement_at(&self, level: u32) -> f64 {
        self.start_displacement() * 2f64.powf(-self.roughness * f64::from(level))
    }

    fn validate(&self) -> Result<()> {
        let params = [
            ("start.x", self.start.x),
            ("start.y", self.start.y),
            ("end.x", self.end.x),
            ("end.y", self.end.y),
            ("roughness", self.roughness),
            ("initial_displacement", self.start_displacement()),
        ];
        for (name, value) in params {
            if !value.is_finite() {
                return Err(TerrainError::NonFiniteParameter { name, value });
            }
        }
        if self.start.x >= self.end.x {
            return Err(TerrainError::InvalidInterval {
                start: self.start.x,
                end: self.end.x,
            });
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(TerrainError::TooManyIterations {
                requested: self.iterations,
                max: MAX_ITERATIONS,
            });
        }
        Ok(())
    }

    // Each level doubles the point count minus one. Midpoints of a level are
    // computed from the previous level only, left to right, one sign each.
    pub fn generate<S: SignSource + ?Sized>(&self, signs: &mut S) -> Result<Layer> {
        self.validate()?;

        let decay = 2f64.powf(-self.roughness);
        let mut displacement = self.start_displacement();
        let mut points = vec![self.start, self.end];

        for level in 0..self.iterations {
            let mut next = Vec::with_capacity(points.len() * 2 - 1);
            for pair in points.windows(2) {
                let (left, right) = (pair[0], pair[1]);
                let mut mid = left.midpoint(right);
                if !(left.x < mid.x && mid.x < right.x) {
                    return Err(TerrainError::ResolutionExhausted { level });
                }
                mid.y += if signs.next_sign() {
                    displacement
                } else {
                    -displacement
                };
                next.push(left);
                next.push(mid);
            }
            next.push(self.end);
            points = next;
            displacement *= decay;
        }

        Ok(Layer::from_sorted(points))
    }

    pub fn generate_seeded(&self, seed: u64) -> Result<Layer> {
        self.generate(&mut RandomSigns::seeded(seed))
    }
}

// Free-function form of `MidpointDisplacement`
pub fn midpoint_displacement<S: SignSource + ?Sized>(
    start: Point,
    end: Point,
    roughness: f64,
    initial_displacement: Option<f64>,
    iterations: u32,
    signs: &mut S,
) -> Result<Layer> {
    let mut generator = MidpointDisplacement::new(start, end, roughness, iterations);
    if let Some(d) = initial_displacement {
        generator = generator.initial_displacement(d);
    }
    generator.generate(signs)
}
