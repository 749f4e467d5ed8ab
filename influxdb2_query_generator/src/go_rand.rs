//! A seeded pseudo-random source that reproduces the stream of the reference benchmark
//! harness, so that a corpus generated here is byte-identical to one generated there for the
//! same seed.
//!
//! The source is an additive lagged Fibonacci generator (`x[n] = x[n-607] + x[n-273]` over
//! 64-bit words) whose initial state comes from a Park-Miller LCG XOR-ed with a fixed table.
//! [`GoRand`] exposes it as a [`rand::RngCore`], and [`GoRngExt`] adds the bounded sampling
//! rules the harness uses on top of it. The sampling rules differ from the ones `rand` uses in
//! [`rand::Rng::gen_range`], which is why the query generators never call `gen_range`.

use rand::{Error as RandError, RngCore, SeedableRng};

mod cooked;

const RNG_LEN: usize = 607;
const RNG_TAP: usize = 273;
const RNG_MASK: u64 = (1 << 63) - 1;
const INT32_MAX: i64 = (1 << 31) - 1;

/// Substituted for a zero seed, which would otherwise produce a degenerate LCG stream.
const ZERO_SEED_REPLACEMENT: i64 = 89_482_311;

/// The harness' pseudo-random source.
///
/// The state is boxed so that moving a generator around stays cheap.
#[derive(Clone)]
pub struct GoRand {
    tap: usize,
    feed: usize,
    vec: Box<[i64; RNG_LEN]>,
}

impl std::fmt::Debug for GoRand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoRand")
            .field("tap", &self.tap)
            .field("feed", &self.feed)
            .finish_non_exhaustive()
    }
}

impl GoRand {
    /// Create a source seeded with `seed`.
    pub fn new(seed: i64) -> Self {
        let mut rng = Self {
            tap: 0,
            feed: RNG_LEN - RNG_TAP,
            vec: Box::new([0; RNG_LEN]),
        };
        rng.seed(seed);
        rng
    }

    /// Reset the source to the state [`GoRand::new`] would produce for `seed`.
    pub fn seed(&mut self, seed: i64) {
        self.tap = 0;
        self.feed = RNG_LEN - RNG_TAP;

        let mut seed = seed % INT32_MAX;
        if seed < 0 {
            seed += INT32_MAX;
        }
        if seed == 0 {
            seed = ZERO_SEED_REPLACEMENT;
        }

        let mut x = seed as i32;
        for i in -20..RNG_LEN as isize {
            x = seed_lcg(x);
            if i >= 0 {
                let mut u = (x as i64) << 40;
                x = seed_lcg(x);
                u ^= (x as i64) << 20;
                x = seed_lcg(x);
                u ^= x as i64;
                u ^= cooked::RNG_COOKED[i as usize];
                self.vec[i as usize] = u;
            }
        }
    }

    fn step(&mut self) -> u64 {
        self.tap = self.tap.checked_sub(1).unwrap_or(RNG_LEN - 1);
        self.feed = self.feed.checked_sub(1).unwrap_or(RNG_LEN - 1);

        let x = self.vec[self.feed].wrapping_add(self.vec[self.tap]);
        self.vec[self.feed] = x;
        x as u64
    }
}

/// One step of `x[n+1] = 48271 * x[n] mod (2^31 - 1)` using Schrage's method.
fn seed_lcg(x: i32) -> i32 {
    const A: i32 = 48271;
    const Q: i32 = 44488;
    const R: i32 = 3399;

    let hi = x / Q;
    let lo = x % Q;
    let mut x = A * lo - R * hi;
    if x < 0 {
        x += INT32_MAX as i32;
    }
    x
}

impl RngCore for GoRand {
    fn next_u32(&mut self) -> u32 {
        (self.int63() >> 31) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.step()
    }

    /// Little-endian bytes of successive `next_u64` outputs; a partial tail chunk drops the
    /// unused high bytes.
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), RandError> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for GoRand {
    type Seed = [u8; 8];

    /// The seed bytes are read as a little-endian `i64`.
    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(i64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state as i64)
    }
}

/// Bounded sampling with the harness' rejection rules, available on any [`RngCore`].
///
/// Only a [`GoRand`] makes the results match the harness; any other source still yields
/// uniformly distributed values.
pub trait GoRngExt: RngCore {
    /// A non-negative 63-bit integer.
    fn int63(&mut self) -> i64 {
        (self.next_u64() & RNG_MASK) as i64
    }

    /// A non-negative 31-bit integer.
    fn int31(&mut self) -> i32 {
        (self.int63() >> 32) as i32
    }

    /// A uniformly distributed integer in `[0, n)`.
    ///
    /// # Panics
    ///
    /// If `n <= 0`.
    fn int63n(&mut self, n: i64) -> i64 {
        assert!(n > 0, "invalid argument to int63n: {n}");
        if n & (n - 1) == 0 {
            return self.int63() & (n - 1);
        }
        let max = (RNG_MASK - (1u64 << 63) % n as u64) as i64;
        let mut v = self.int63();
        while v > max {
            v = self.int63();
        }
        v % n
    }

    /// A uniformly distributed integer in `[0, n)`.
    ///
    /// # Panics
    ///
    /// If `n <= 0`.
    fn int31n(&mut self, n: i32) -> i32 {
        assert!(n > 0, "invalid argument to int31n: {n}");
        if n & (n - 1) == 0 {
            return self.int31() & (n - 1);
        }
        let max = (INT32_MAX as u32 - (1u32 << 31) % n as u32) as i32;
        let mut v = self.int31();
        while v > max {
            v = self.int31();
        }
        v % n
    }

    /// A uniformly distributed index in `[0, n)`.
    ///
    /// # Panics
    ///
    /// If `n == 0`.
    fn intn(&mut self, n: usize) -> usize {
        assert!(n > 0, "invalid argument to intn: {n}");
        if n as i64 <= INT32_MAX {
            self.int31n(n as i32) as usize
        } else {
            self.int63n(n as i64) as usize
        }
    }
}

impl<R: RngCore + ?Sized> GoRngExt for R {}
