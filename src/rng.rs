//! Deterministic, pure, serializable PRNG (Park-Miller-shaped LCG).
//!
//! Every method is a pure function of its inputs: it returns the generated
//! value alongside the *next* state rather than mutating anything in place,
//! so that `(config, scenario, action-sequence)` continues to determine all
//! dealt cards exactly (I3). Implementations that need non-reproducible
//! randomness for test fixtures reach for `rand` instead; this module is the
//! only thing allowed to influence a `GameState`'s own dealt cards.

const MULTIPLIER: u64 = 1_103_515_245;
const INCREMENT: u64 = 12_345;
const MODULUS: u64 = 1 << 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// `seed = 0` is coerced to `1` so the generator never absorbs into the
    /// degenerate all-zero fixed point.
    pub fn new(seed: u64) -> Self {
        let state = if seed == 0 { 1 } else { seed % MODULUS };
        Self { state }
    }

    pub fn seed(&self) -> u64 {
        self.state
    }

    /// `(float in [0,1), state')`.
    pub fn next(self) -> (f64, Self) {
        let state = (MULTIPLIER.wrapping_mul(self.state).wrapping_add(INCREMENT)) % MODULUS;
        let value = state as f64 / (MODULUS - 1) as f64;
        (value, Self { state })
    }

    /// `(int in [0,n), state')`. `n = 0` always yields `0` without advancing.
    pub fn randint(self, n: u64) -> (u64, Self) {
        if n == 0 {
            return (0, self);
        }
        let (value, next) = self.next();
        (((value * n as f64) as u64).min(n - 1), next)
    }
}
