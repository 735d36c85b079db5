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

use std::f64::consts::E;
use std::fmt;

use crate::countmin::NoiseCorrection;
use crate::countmin::noise::median;
use crate::error::Error;
use crate::error::ErrorKind;
use crate::hash::HashFamily;
use crate::hash::PairwiseHash;

// Largest counter matrix a Vec<u64> can hold.
const MAX_NUM_CELLS: usize = isize::MAX as usize / size_of::<u64>();

/// Count-Min sketch over non-negative integer keys with non-negative weights.
///
/// Counters live in a `num_hashes x num_buckets` matrix stored row-major. Each
/// row is indexed by one function of the sketch's [`HashFamily`].
#[derive(Debug, Clone, PartialEq)]
pub struct CountMinSketch<H = PairwiseHash> {
    hasher: H,
    num_hashes: usize,
    num_buckets: usize,
    counts: Vec<u64>,
    /// Sum of all update weights. Every update adds its weight to one cell of
    /// every row, so this equals the sum of any single row.
    total_weight: u64,
    epsilon: f64,
    delta: f64,
    noise_correction: NoiseCorrection,
}

impl CountMinSketch {
    /// Creates a sketch with `num_hashes` rows of `num_buckets` counters and a
    /// randomly drawn hash family.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if either dimension is zero.
    pub fn new(num_hashes: usize, num_buckets: usize) -> Result<Self, Error> {
        CountMinSketchBuilder::with_dimensions(num_hashes, num_buckets).build()
    }

    /// Creates a sketch whose hash family is derived from `seed`.
    pub fn with_seed(num_hashes: usize, num_buckets: usize, seed: u64) -> Result<Self, Error> {
        CountMinSketchBuilder::with_dimensions(num_hashes, num_buckets)
            .seed(seed)
            .build()
    }

    /// Creates a sketch sized for relative error `epsilon` holding with
    /// probability `1 - delta`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] unless `epsilon > 0` and `0 < delta < 1`.
    pub fn from_error(
        epsilon: f64,
        delta: f64,
        noise_correction: NoiseCorrection,
    ) -> Result<Self, Error> {
        CountMinSketchBuilder::with_error(epsilon, delta)?
            .noise_correction(noise_correction)
            .build()
    }

    /// Suggests the number of buckets per row for relative error `epsilon`:
    /// `ceil(e / epsilon)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use streamsketch::countmin::CountMinSketch;
    ///
    /// assert_eq!(CountMinSketch::suggest_num_buckets(0.01).unwrap(), 272);
    /// ```
    pub fn suggest_num_buckets(epsilon: f64) -> Result<usize, Error> {
        if !(epsilon > 0.0 && epsilon.is_finite()) {
            return Err(Error::config_invalid("epsilon must be positive and finite")
                .with_context("epsilon", epsilon));
        }
        let num_buckets = (E / epsilon).ceil();
        if num_buckets > MAX_NUM_CELLS as f64 {
            return Err(Error::config_invalid("epsilon is too small")
                .with_context("epsilon", epsilon)
                .with_context("num_buckets", num_buckets));
        }
        Ok(num_buckets as usize)
    }

    /// Suggests the number of rows for failure probability `delta`:
    /// `ceil(ln(1 / delta))`, computed as `ceil(-ln(delta))` so that subnormal
    /// deltas stay finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use streamsketch::countmin::CountMinSketch;
    ///
    /// assert_eq!(CountMinSketch::suggest_num_hashes(0.01).unwrap(), 5);
    /// ```
    pub fn suggest_num_hashes(delta: f64) -> Result<usize, Error> {
        if !(delta > 0.0 && delta < 1.0) {
            return Err(
                Error::config_invalid("delta must be between 0.0 and 1.0 (exclusive)")
                    .with_context("delta", delta),
            );
        }
        let num_hashes = (-delta.ln()).ceil();
        if num_hashes > MAX_NUM_CELLS as f64 {
            return Err(Error::config_invalid("delta is too small")
                .with_context("delta", delta)
                .with_context("num_hashes", num_hashes));
        }
        Ok(num_hashes as usize)
    }
}

impl<H: HashFamily> CountMinSketch<H> {
    /// Adds weight `v` to key `x`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidInput`] if `x` or `v` is negative, or if the
    /// total weight would overflow. The sketch is left unchanged.
    pub fn update(&mut self, x: i64, v: i64) -> Result<(), Error> {
        if v < 0 {
            return Err(Error::negative_weight(v));
        }
        let indices = self.hasher.evaluate(x)?;

        let weight = v as u64;
        let total_weight = self.total_weight.checked_add(weight).ok_or_else(|| {
            Error::new(ErrorKind::InvalidInput, "update weight overflows the total weight")
                .with_context("weight", weight)
                .with_context("total_weight", self.total_weight)
        })?;

        // No cell exceeds the total, so the cells cannot overflow either.
        for (row, bucket) in indices.into_iter().enumerate() {
            self.counts[row * self.num_buckets + bucket] += weight;
        }
        self.total_weight = total_weight;
        Ok(())
    }

    /// Returns the uncorrected estimate: the minimum of the key's counters.
    ///
    /// Never below the true count of `x`.
    pub fn raw_count(&self, x: i64) -> Result<u64, Error> {
        let indices = self.hasher.evaluate(x)?;
        Ok(self.cells(&indices).min().unwrap_or(0))
    }

    /// Returns the frequency estimate of `x` under the configured
    /// [`NoiseCorrection`].
    ///
    /// With [`NoiseCorrection::None`] this is [`raw_count`](Self::raw_count).
    /// Otherwise the per-row noise is subtracted from each of the key's
    /// counters, the median over rows is taken, and the result is clipped to
    /// `[0, raw_count]`.
    ///
    /// The result is an `f64`, so counts above 2^53 are rounded and the raw
    /// estimate may come out below the true count. Use
    /// [`raw_count`](Self::raw_count) when the exact upper bound matters.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidInput`] if `x` is negative.
    pub fn count(&self, x: i64) -> Result<f64, Error> {
        let indices = self.hasher.evaluate(x)?;
        let raw = self.cells(&indices).min().unwrap_or(0) as f64;

        let Some(row_noise) = self.noise_correction.row_noise() else {
            return Ok(raw);
        };

        let mut corrected: Vec<f64> = self
            .cells(&indices)
            .enumerate()
            .map(|(i, cell)| cell as f64 - row_noise(self.row(i), cell, self.total_weight))
            .collect();
        Ok(median(&mut corrected).clamp(0.0, raw))
    }

    /// Returns the total weight seen, which is also the sum of row 0.
    pub fn cardinality(&self) -> u64 {
        self.total_weight
    }

    /// Returns true if no positive weight has been added.
    pub fn is_empty(&self) -> bool {
        self.total_weight == 0
    }

    /// Returns the number of rows (d).
    pub fn num_hashes(&self) -> usize {
        self.num_hashes
    }

    /// Returns the number of buckets per row (w).
    pub fn num_buckets(&self) -> usize {
        self.num_buckets
    }

    /// Returns the relative error target.
    ///
    /// For sketches built from explicit dimensions this is `e / w`.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Returns the failure probability target.
    ///
    /// For sketches built from explicit dimensions this is `e^-d`.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Returns the configured estimator.
    pub fn noise_correction(&self) -> NoiseCorrection {
        self.noise_correction
    }

    /// Returns the hash family backing this sketch.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Summarizes the error guarantee at the current cardinality.
    ///
    /// With [`NoiseCorrection::None`], `true_count(x) <= count(x) <=
    /// true_count(x) + error_bound` holds with probability at least `confidence`.
    pub fn stats(&self) -> CountMinStats {
        CountMinStats {
            cardinality: self.total_weight,
            epsilon: self.epsilon,
            delta: self.delta,
            error_bound: self.epsilon * self.total_weight as f64,
            confidence: 1.0 - self.delta,
        }
    }

    fn row(&self, row: usize) -> &[u64] {
        let start = row * self.num_buckets;
        &self.counts[start..start + self.num_buckets]
    }

    fn cells<'a>(&'a self, indices: &'a [usize]) -> impl Iterator<Item = u64> + 'a {
        indices
            .iter()
            .enumerate()
            .map(|(row, &bucket)| self.counts[row * self.num_buckets + bucket])
    }
}

/// Error guarantee of a [`CountMinSketch`] at its current cardinality.
///
/// The `Display` form is a short human-readable report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountMinStats {
    /// Total weight seen
    pub cardinality: u64,
    /// Relative error target
    pub epsilon: f64,
    /// Failure probability target
    pub delta: f64,
    /// `epsilon * cardinality`
    pub error_bound: f64,
    /// `1 - delta`
    pub confidence: f64,
}

impl fmt::Display for CountMinStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cardinality: {}", self.cardinality)?;
        writeln!(
            f,
            "error bound: {:.2} (epsilon = {})",
            self.error_bound, self.epsilon
        )?;
        write!(
            f,
            "confidence: {:.2}% (delta = {})",
            100.0 * self.confidence,
            self.delta
        )
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`CountMinSketch`].
///
/// # Examples
///
/// ```
/// use streamsketch::countmin::CountMinSketchBuilder;
/// use streamsketch::countmin::NoiseCorrection;
///
/// let sketch = CountMinSketchBuilder::with_error(0.01, 0.01)
///     .unwrap()
///     .noise_correction(NoiseCorrection::Median)
///     .seed(9001)
///     .build()
///     .unwrap();
/// assert_eq!(sketch.num_hashes(), 5);
/// assert_eq!(sketch.num_buckets(), 272);
/// ```
#[derive(Debug, Clone)]
pub struct CountMinSketchBuilder {
    num_hashes: usize,
    num_buckets: usize,
    epsilon: Option<f64>,
    delta: Option<f64>,
    noise_correction: NoiseCorrection,
    seed: Option<u64>,
}

impl CountMinSketchBuilder {
    /// Sizes the sketch explicitly.
    pub fn with_dimensions(num_hashes: usize, num_buckets: usize) -> Self {
        CountMinSketchBuilder {
            num_hashes,
            num_buckets,
            epsilon: None,
            delta: None,
            noise_correction: NoiseCorrection::None,
            seed: None,
        }
    }

    /// Sizes the sketch from error targets:
    /// `w = ceil(e / epsilon)` and `d = ceil(ln(1 / delta))`.
    pub fn with_error(epsilon: f64, delta: f64) -> Result<Self, Error> {
        let num_buckets = CountMinSketch::suggest_num_buckets(epsilon)?;
        let num_hashes = CountMinSketch::suggest_num_hashes(delta)?;
        log::debug!(
            "count-min sketch sized for epsilon={epsilon}, delta={delta}: num_hashes={num_hashes}, num_buckets={num_buckets}"
        );

        Ok(CountMinSketchBuilder {
            epsilon: Some(epsilon),
            delta: Some(delta),
            ..Self::with_dimensions(num_hashes, num_buckets)
        })
    }

    /// Sets the estimator used by [`CountMinSketch::count`].
    pub fn noise_correction(mut self, noise_correction: NoiseCorrection) -> Self {
        self.noise_correction = noise_correction;
        self
    }

    /// Sets the seed of the internally built hash family.
    ///
    /// Ignored by [`build_with_hasher`](Self::build_with_hasher).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the sketch with its own [`PairwiseHash`] family.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if either dimension is zero.
    pub fn build(self) -> Result<CountMinSketch, Error> {
        self.num_cells()?;
        let mut hasher = PairwiseHash::builder(self.num_hashes, self.num_buckets);
        if let Some(seed) = self.seed {
            hasher = hasher.seed(seed);
        }
        let hasher = hasher.build()?;
        self.build_with_hasher(hasher)
    }

    /// Builds the sketch over a caller-supplied hash family.
    ///
    /// The family must have one function per row and a range equal to the
    /// number of buckets.
    pub fn build_with_hasher<H: HashFamily>(self, hasher: H) -> Result<CountMinSketch<H>, Error> {
        let num_cells = self.num_cells()?;
        if hasher.num_hashes() != self.num_hashes || hasher.range() != self.num_buckets {
            return Err(
                Error::config_invalid("hash family does not match sketch dimensions")
                    .with_context("num_hashes", self.num_hashes)
                    .with_context("num_buckets", self.num_buckets)
                    .with_context("hasher_num_hashes", hasher.num_hashes())
                    .with_context("hasher_range", hasher.range()),
            );
        }

        let epsilon = self.epsilon.unwrap_or(E / self.num_buckets as f64);
        let delta = self.delta.unwrap_or((-(self.num_hashes as f64)).exp());
        log::debug!(
            "count-min sketch built: num_hashes={}, num_buckets={}, epsilon={epsilon}, delta={delta}, noise_correction={}",
            self.num_hashes,
            self.num_buckets,
            self.noise_correction
        );

        Ok(CountMinSketch {
            hasher,
            num_hashes: self.num_hashes,
            num_buckets: self.num_buckets,
            counts: vec![0; num_cells],
            total_weight: 0,
            epsilon,
            delta,
            noise_correction: self.noise_correction,
        })
    }

    fn num_cells(&self) -> Result<usize, Error> {
        if self.num_hashes == 0 {
            return Err(Error::config_invalid("num_hashes must be at least 1"));
        }
        if self.num_buckets == 0 {
            return Err(Error::config_invalid("num_buckets must be at least 1"));
        }
        self.num_hashes
            .checked_mul(self.num_buckets)
            .filter(|&cells| cells <= MAX_NUM_CELLS)
            .ok_or_else(|| {
                Error::config_invalid("sketch dimensions exceed the addressable size")
                    .with_context("num_hashes", self.num_hashes)
                    .with_context("num_buckets", self.num_buckets)
            })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::DEFAULT_PRIME;

    /// Row `i` maps key `x` to bucket `(x + i) % 4`.
    fn shifted_sketch(noise_correction: NoiseCorrection) -> CountMinSketch {
        let hasher =
            PairwiseHash::with_coefficients(4, DEFAULT_PRIME, vec![1, 1, 1], vec![0, 1, 2])
                .unwrap();
        let mut sketch = CountMinSketchBuilder::with_dimensions(3, 4)
            .noise_correction(noise_correction)
            .build_with_hasher(hasher)
            .unwrap();

        // row0: [11, 2, 0, 0]
        // row1: [0, 11, 2, 0]
        // row2: [0, 0, 11, 2]
        sketch.update(0, 10).unwrap();
        sketch.update(1, 2).unwrap();
        sketch.update(4, 1).unwrap();
        sketch
    }

    #[test]
    fn test_init() {
        let sketch = CountMinSketch::with_seed(3, 5, 123).unwrap();
        assert_eq!(sketch.num_hashes(), 3);
        assert_eq!(sketch.num_buckets(), 5);
        assert!(sketch.is_empty());
        assert_eq!(sketch.cardinality(), 0);
        assert_eq!(sketch.raw_count(17).unwrap(), 0);
        assert_eq!(sketch.count(17).unwrap(), 0.0);
        assert_eq!(sketch.noise_correction(), NoiseCorrection::None);
        assert_eq!(sketch.hasher().seed(), Some(123));
    }

    #[test]
    fn test_implied_error_targets() {
        let sketch = CountMinSketch::with_seed(2, 100, 1).unwrap();
        assert!((sketch.epsilon() - E / 100.0).abs() < 1e-12);
        assert!((sketch.delta() - (-2.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_from_error_dimensions() {
        let sketch = CountMinSketch::from_error(0.1, 0.05, NoiseCorrection::None).unwrap();
        assert_eq!(sketch.num_buckets(), 28);
        assert_eq!(sketch.num_hashes(), 3);
        assert_eq!(sketch.epsilon(), 0.1);
        assert_eq!(sketch.delta(), 0.05);
    }

    #[test]
    fn test_raw_counts_with_collisions() {
        let sketch = shifted_sketch(NoiseCorrection::None);
        assert_eq!(sketch.cardinality(), 13);
        assert_eq!(sketch.raw_count(0).unwrap(), 11);
        assert_eq!(sketch.raw_count(1).unwrap(), 2);
        assert_eq!(sketch.raw_count(2).unwrap(), 0);
        assert_eq!(sketch.count(4).unwrap(), 11.0);

        for row in 0..3 {
            assert_eq!(sketch.row(row).iter().sum::<u64>(), sketch.cardinality());
        }
    }

    #[test]
    fn test_mean_correction() {
        let sketch = shifted_sketch(NoiseCorrection::Mean);
        // noise per row is (13 - 11) / 3
        let expected = 11.0 - 2.0 / 3.0;
        assert!((sketch.count(0).unwrap() - expected).abs() < 1e-9);
        // 2 - 11 / 3 is negative and clips to zero
        assert_eq!(sketch.count(1).unwrap(), 0.0);
        assert_eq!(sketch.count(2).unwrap(), 0.0);
        assert_eq!(sketch.raw_count(0).unwrap(), 11);
    }

    #[test]
    fn test_median_correction() {
        let sketch = shifted_sketch(NoiseCorrection::Median);
        // each row median is (0 + 2) / 2 = 1
        assert_eq!(sketch.count(0).unwrap(), 10.0);
        assert_eq!(sketch.count(1).unwrap(), 1.0);
        assert_eq!(sketch.count(2).unwrap(), 0.0);
    }

    #[test]
    fn test_mean_correction_single_bucket() {
        let mut sketch = CountMinSketchBuilder::with_dimensions(2, 1)
            .noise_correction(NoiseCorrection::Mean)
            .seed(5)
            .build()
            .unwrap();
        sketch.update(1, 4).unwrap();
        sketch.update(2, 6).unwrap();
        assert_eq!(sketch.count(1).unwrap(), 10.0);
    }

    #[test]
    fn test_negative_weight_leaves_sketch_unchanged() {
        let mut sketch = shifted_sketch(NoiseCorrection::None);
        let snapshot = sketch.clone();

        let err = sketch.update(3, -1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.context("weight"), Some("-1"));
        assert_eq!(sketch, snapshot);

        let err = sketch.update(-3, 1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(sketch, snapshot);
    }

    #[test]
    fn test_overflow_is_rejected() {
        let mut sketch = CountMinSketch::with_seed(2, 8, 3).unwrap();
        sketch.update(1, i64::MAX).unwrap();
        sketch.update(2, i64::MAX).unwrap();
        let snapshot = sketch.clone();

        let err = sketch.update(3, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(sketch, snapshot);
        sketch.update(3, 1).unwrap();
        assert_eq!(sketch.cardinality(), u64::MAX);
    }

    #[test]
    fn test_count_above_f64_precision() {
        let mut sketch = CountMinSketch::with_seed(2, 8, 5).unwrap();
        let heavy: i64 = (1 << 53) + 1;
        sketch.update(3, heavy).unwrap();
        assert_eq!(sketch.raw_count(3).unwrap(), heavy as u64);
        assert_eq!(sketch.count(3).unwrap(), (1u64 << 53) as f64);
    }

    #[test]
    fn test_subnormal_delta_builds() {
        let sketch = CountMinSketch::from_error(0.5, 5e-324, NoiseCorrection::None).unwrap();
        assert_eq!(sketch.num_hashes(), 745);
        assert_eq!(sketch.num_buckets(), 6);
    }

    #[test]
    fn test_zero_weight_update() {
        let mut sketch = CountMinSketch::with_seed(2, 8, 3).unwrap();
        sketch.update(1, 0).unwrap();
        assert!(sketch.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        for (d, w) in [(0, 10), (3, 0)] {
            let err = CountMinSketch::new(d, w).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        }
        for (epsilon, delta) in [
            (0.0, 0.1),
            (-0.1, 0.1),
            (f64::INFINITY, 0.1),
            (0.1, 0.0),
            (0.1, 1.0),
            (0.1, -0.5),
        ] {
            let err = CountMinSketch::from_error(epsilon, delta, NoiseCorrection::None).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        }

        let err = CountMinSketch::from_error(1e-300, 0.5, NoiseCorrection::None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context("epsilon"), Some(1e-300_f64.to_string().as_str()));

        let err = CountMinSketch::new(usize::MAX, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context("num_hashes"), Some(usize::MAX.to_string().as_str()));

        let err = CountMinSketchBuilder::with_dimensions(1 << 40, 1 << 40)
            .build_with_hasher(PairwiseHash::with_seed(1, 1, 1).unwrap())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context("num_buckets"), Some("1099511627776"));

        let hasher = PairwiseHash::with_seed(3, 64, 1).unwrap();
        let err = CountMinSketchBuilder::with_dimensions(4, 64)
            .build_with_hasher(hasher)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context("hasher_num_hashes"), Some("3"));
    }

    #[test]
    fn test_suggestions() {
        assert_eq!(CountMinSketch::suggest_num_buckets(0.2).unwrap(), 14);
        assert_eq!(CountMinSketch::suggest_num_buckets(0.1).unwrap(), 28);
        assert_eq!(CountMinSketch::suggest_num_buckets(0.05).unwrap(), 55);
        assert_eq!(CountMinSketch::suggest_num_buckets(0.01).unwrap(), 272);

        assert_eq!(CountMinSketch::suggest_num_hashes(0.5).unwrap(), 1);
        assert_eq!(CountMinSketch::suggest_num_hashes(0.05).unwrap(), 3);
        assert_eq!(CountMinSketch::suggest_num_hashes(0.001).unwrap(), 7);
        // ln(1 / 5e-324) would overflow through the reciprocal
        assert_eq!(CountMinSketch::suggest_num_hashes(5e-324).unwrap(), 745);

        let err = CountMinSketch::suggest_num_buckets(f64::MIN_POSITIVE).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_stats() {
        let mut sketch = CountMinSketch::from_error(0.01, 0.01, NoiseCorrection::None).unwrap();
        sketch.update(42, 10).unwrap();
        sketch.update(7, 5).unwrap();

        let stats = sketch.stats();
        assert_eq!(stats.cardinality, 15);
        assert!((stats.error_bound - 0.15).abs() < 1e-12);
        assert!((stats.confidence - 0.99).abs() < 1e-12);
    }
}
