// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::Error;
use crate::hash::HashFamily;

/// Default modulus, the Mersenne prime 2^31 - 1.
pub const DEFAULT_PRIME: u64 = (1 << 31) - 1;

// Bases that make Miller-Rabin deterministic for every u64.
const WITNESSES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Pairwise-independent hash family `h_i(x) = ((a_i * x + b_i) mod p) mod m`.
///
/// Coefficients are drawn uniformly from `[0, p)` once, at construction, and
/// never change afterwards. Use [`PairwiseHash::with_seed`] for reproducible
/// coefficients or [`PairwiseHash::with_coefficients`] to inject them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairwiseHash {
    /// Multipliers, one per function
    a: Vec<u64>,
    /// Offsets, one per function
    b: Vec<u64>,
    /// Prime modulus (p)
    prime: u64,
    /// Output range (m)
    range: usize,
    /// Seed the coefficients were drawn from, if they were drawn at all
    seed: Option<u64>,
}

impl PairwiseHash {
    /// Returns a builder for a family of `num_hashes` functions onto `[0, range)`.
    pub fn builder(num_hashes: usize, range: usize) -> PairwiseHashBuilder {
        PairwiseHashBuilder {
            num_hashes,
            range,
            prime: DEFAULT_PRIME,
            seed: None,
        }
    }

    /// Creates a family with randomly drawn coefficients and the default prime.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if `num_hashes` or `range` is zero.
    pub fn new(num_hashes: usize, range: usize) -> Result<Self, Error> {
        Self::builder(num_hashes, range).build()
    }

    /// Creates a family whose coefficients are derived from `seed`.
    ///
    /// Two families built with the same arguments map every key identically.
    pub fn with_seed(num_hashes: usize, range: usize, seed: u64) -> Result<Self, Error> {
        Self::builder(num_hashes, range).seed(seed).build()
    }

    /// Creates a family from explicit coefficient vectors.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if the vectors are empty or of different lengths, if `prime` is not
    /// prime, if any coefficient is not below `prime`, or if `range` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use streamsketch::hash::HashFamily;
    /// use streamsketch::hash::PairwiseHash;
    ///
    /// let family = PairwiseHash::with_coefficients(10, 13, vec![1, 2], vec![0, 5]).unwrap();
    /// // (1 * 4 + 0) % 13 % 10 = 4, (2 * 4 + 5) % 13 % 10 = 0
    /// assert_eq!(family.evaluate(4).unwrap(), vec![4, 0]);
    /// ```
    pub fn with_coefficients(
        range: usize,
        prime: u64,
        a: Vec<u64>,
        b: Vec<u64>,
    ) -> Result<Self, Error> {
        validate_shape(a.len(), range, prime)?;
        if a.len() != b.len() {
            return Err(
                Error::config_invalid("coefficient vectors must have the same length")
                    .with_context("a_len", a.len())
                    .with_context("b_len", b.len()),
            );
        }
        if let Some(&c) = a.iter().chain(&b).find(|&&c| c >= prime) {
            return Err(Error::config_invalid("coefficients must be below the prime")
                .with_context("coefficient", c)
                .with_context("prime", prime));
        }

        Ok(Self::from_parts(a, b, prime, range, None))
    }

    /// Returns the prime modulus.
    pub fn prime(&self) -> u64 {
        self.prime
    }

    /// Returns the seed the coefficients were drawn from.
    ///
    /// `None` when the coefficients were injected.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the `(a, b)` coefficient vectors.
    pub fn coefficients(&self) -> (&[u64], &[u64]) {
        (&self.a, &self.b)
    }

    fn from_parts(a: Vec<u64>, b: Vec<u64>, prime: u64, range: usize, seed: Option<u64>) -> Self {
        if (range as u128) > u128::from(prime) {
            log::warn!(
                "hash range {range} exceeds prime {prime}; indices at or above the prime never occur"
            );
        }
        log::debug!(
            "pairwise hash family: num_hashes={}, range={range}, prime={prime}, seed={seed:?}",
            a.len()
        );

        PairwiseHash {
            a,
            b,
            prime,
            range,
            seed,
        }
    }

    #[inline]
    fn index(&self, a: u64, b: u64, x: u64) -> usize {
        // a, b < p and x < 2^63, so the product fits comfortably in u128.
        let h = (u128::from(a) * u128::from(x) + u128::from(b)) % u128::from(self.prime);
        (h % self.range as u128) as usize
    }
}

impl HashFamily for PairwiseHash {
    fn num_hashes(&self) -> usize {
        self.a.len()
    }

    fn range(&self) -> usize {
        self.range
    }

    fn evaluate(&self, x: i64) -> Result<Vec<usize>, Error> {
        let x = u64::try_from(x).map_err(|_| Error::negative_key(x))?;
        Ok(self
            .a
            .iter()
            .zip(&self.b)
            .map(|(&a, &b)| self.index(a, b, x))
            .collect())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`PairwiseHash`].
///
/// # Examples
///
/// ```
/// use streamsketch::hash::HashFamily;
/// use streamsketch::hash::PairwiseHash;
///
/// let family = PairwiseHash::builder(5, 1000)
///     .prime((1 << 61) - 1)
///     .seed(9001)
///     .build()
///     .unwrap();
/// assert_eq!(family.num_hashes(), 5);
/// assert_eq!(family.prime(), (1 << 61) - 1);
/// ```
#[derive(Debug, Clone)]
pub struct PairwiseHashBuilder {
    num_hashes: usize,
    range: usize,
    prime: u64,
    seed: Option<u64>,
}

impl PairwiseHashBuilder {
    /// Sets the prime modulus. It should exceed every key the family will see.
    pub fn prime(mut self, prime: u64) -> Self {
        self.prime = prime;
        self
    }

    /// Sets the seed the coefficients are drawn from.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draws the coefficients and builds the family.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if `num_hashes` or `range` is zero, or if the modulus is not prime.
    pub fn build(self) -> Result<PairwiseHash, Error> {
        validate_shape(self.num_hashes, self.range, self.prime)?;

        let seed = self.seed.unwrap_or_else(rand::random::<u64>);
        let mut rng = StdRng::seed_from_u64(seed);
        let a = (0..self.num_hashes)
            .map(|_| rng.random_range(0..self.prime))
            .collect();
        let b = (0..self.num_hashes)
            .map(|_| rng.random_range(0..self.prime))
            .collect();

        Ok(PairwiseHash::from_parts(
            a,
            b,
            self.prime,
            self.range,
            Some(seed),
        ))
    }
}

// Largest coefficient vector a Vec<u64> can hold.
const MAX_NUM_HASHES: usize = isize::MAX as usize / size_of::<u64>();

fn validate_shape(num_hashes: usize, range: usize, prime: u64) -> Result<(), Error> {
    if num_hashes == 0 {
        return Err(Error::config_invalid("num_hashes must be at least 1"));
    }
    if num_hashes > MAX_NUM_HASHES {
        return Err(Error::config_invalid("too many hash functions")
            .with_context("num_hashes", num_hashes));
    }
    if range == 0 {
        return Err(Error::config_invalid("range must be at least 1"));
    }
    if !is_prime(prime) {
        return Err(Error::config_invalid("modulus must be prime").with_context("prime", prime));
    }
    Ok(())
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(m)) as u64
}

fn pow_mod(mut base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1;
    base %= m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

/// Deterministic Miller-Rabin test, exact for all `u64`.
fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for p in WITNESSES {
        if n % p == 0 {
            return n == p;
        }
    }

    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for a in WITNESSES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}
