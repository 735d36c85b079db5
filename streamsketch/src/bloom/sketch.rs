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

use std::f64::consts::LN_2;
use std::fmt;

use crate::error::Error;
use crate::hash::HashFamily;
use crate::hash::PairwiseHash;

/// A Bloom filter over non-negative integer keys.
///
/// Provides membership queries with:
/// - No false negatives (added keys always return `true`)
/// - Tunable false positive rate
/// - Constant space usage
///
/// The filter is generic over its [`HashFamily`] so that a family can be
/// shared with other structures. By default it owns a [`PairwiseHash`].
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter<H = PairwiseHash> {
    /// Hash family with d functions and range M
    hasher: H,
    /// Total number of bits in the filter (M)
    capacity_bits: usize,
    /// Count of bits set to 1 (for statistics)
    num_bits_set: u64,
    /// Bit array packed into u64 words
    /// Length = ceil(capacity_bits / 64)
    bit_array: Vec<u64>,
}

impl BloomFilter {
    /// Creates an empty filter of `num_bits` bits indexed by `num_hashes`
    /// randomly drawn hash functions.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if either argument is zero.
    pub fn new(num_bits: usize, num_hashes: usize) -> Result<Self, Error> {
        BloomFilterBuilder::with_size(num_bits, num_hashes).build()
    }

    /// Creates an empty filter whose hash family is derived from `seed`.
    pub fn with_seed(num_bits: usize, num_hashes: usize, seed: u64) -> Result<Self, Error> {
        BloomFilterBuilder::with_size(num_bits, num_hashes)
            .seed(seed)
            .build()
    }

    /// Creates a filter pre-populated with `items`.
    ///
    /// # Examples
    ///
    /// ```
    /// use streamsketch::bloom::BloomFilter;
    ///
    /// let filter = BloomFilter::from_items(1000, 5, [1, 5, 9]).unwrap();
    /// assert!(filter.contains(5).unwrap());
    /// ```
    pub fn from_items<I>(num_bits: usize, num_hashes: usize, items: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = i64>,
    {
        BloomFilterBuilder::with_size(num_bits, num_hashes)
            .items(items)
            .build()
    }

    /// Returns the optimal `(num_bits, num_hashes)` for `max_items` keys at a
    /// target false positive probability `fpp`.
    ///
    /// `num_bits = ceil(-N * log2(p) / ln 2)` and `num_hashes = ceil(-log2(p))`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// unless `0 < fpp < 1` and `max_items > 0`.
    pub fn optimal_size(fpp: f64, max_items: u64) -> Result<(usize, usize), Error> {
        if !(fpp > 0.0 && fpp < 1.0) {
            return Err(
                Error::config_invalid("fpp must be between 0.0 and 1.0 (exclusive)")
                    .with_context("fpp", fpp),
            );
        }
        if max_items == 0 {
            return Err(Error::config_invalid("max_items must be greater than 0"));
        }

        let log2_fpp = fpp.log2();
        let num_bits = (-(max_items as f64) * log2_fpp / LN_2).ceil();
        let num_hashes = (-log2_fpp).ceil();
        if num_bits >= usize::MAX as f64 {
            return Err(Error::config_invalid("filter size exceeds usize")
                .with_context("fpp", fpp)
                .with_context("max_items", max_items));
        }
        Ok((num_bits as usize, num_hashes as usize))
    }
}

impl<H: HashFamily> BloomFilter<H> {
    // ========================================================================
    // Query Operations
    // ========================================================================

    /// Tests whether a key is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Key was **possibly** added (or false positive)
    /// - `false`: Key was **definitely not** added
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidInput`](crate::error::ErrorKind::InvalidInput)
    /// if `x` is negative.
    pub fn contains(&self, x: i64) -> Result<bool, Error> {
        let indices = self.hasher.evaluate(x)?;
        Ok(self.check_bits(&indices))
    }

    /// Tests and adds a key in a single operation.
    ///
    /// Returns whether the key was possibly already in the set before it was added.
    ///
    /// # Examples
    ///
    /// ```
    /// use streamsketch::bloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::with_seed(1000, 5, 1).unwrap();
    /// assert!(!filter.contains_and_add(42).unwrap());
    /// assert!(filter.contains_and_add(42).unwrap());
    /// ```
    pub fn contains_and_add(&mut self, x: i64) -> Result<bool, Error> {
        let indices = self.hasher.evaluate(x)?;
        let was_present = self.check_bits(&indices);
        self.set_bits(&indices);
        Ok(was_present)
    }

    // ========================================================================
    // Update Operations
    // ========================================================================

    /// Adds a key to the filter.
    ///
    /// After this call, `contains(x)` always returns `true`. Adding a key twice
    /// changes nothing the second time.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidInput`](crate::error::ErrorKind::InvalidInput)
    /// if `x` is negative. The filter is left unchanged.
    pub fn add(&mut self, x: i64) -> Result<(), Error> {
        let indices = self.hasher.evaluate(x)?;
        self.set_bits(&indices);
        Ok(())
    }

    /// Adds every key produced by `items`.
    ///
    /// All keys are hashed before any bit is set, so a negative key anywhere in
    /// the batch leaves the filter unchanged.
    pub fn add_all<I>(&mut self, items: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = i64>,
    {
        let batch = items
            .into_iter()
            .map(|x| self.hasher.evaluate(x))
            .collect::<Result<Vec<_>, _>>()?;
        for indices in &batch {
            self.set_bits(indices);
        }
        Ok(())
    }

    // ========================================================================
    // Statistics and Properties
    // ========================================================================

    /// Returns whether no bit has been set yet.
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the number of bits set to 1.
    pub fn bits_used(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the total number of bits in the filter (M).
    pub fn capacity(&self) -> usize {
        self.capacity_bits
    }

    /// Returns the number of hash functions used (d).
    pub fn num_hashes(&self) -> usize {
        self.hasher.num_hashes()
    }

    /// Returns the hash family backing this filter.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the fraction of bits set.
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.capacity_bits as f64
    }

    /// Theoretical false positive probability after `num_items` insertions.
    ///
    /// Based on the formula `(1 - e^(-d*N/M))^d`. This is advisory only.
    pub fn false_positive_estimate(&self, num_items: u64) -> f64 {
        let d = self.num_hashes() as f64;
        let fill = -d * num_items as f64 / self.capacity_bits as f64;
        (1.0 - fill.exp()).powf(d)
    }

    /// Summarizes the filter for a given number of inserted keys.
    pub fn stats(&self, num_items: u64) -> BloomStats {
        BloomStats {
            num_items,
            false_positive_rate: self.false_positive_estimate(num_items),
            bits_used: self.num_bits_set,
            capacity: self.capacity_bits,
        }
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn check_bits(&self, indices: &[usize]) -> bool {
        indices.iter().all(|&bit_index| self.get_bit(bit_index))
    }

    fn set_bits(&mut self, indices: &[usize]) {
        for &bit_index in indices {
            self.set_bit(bit_index);
        }
    }

    fn get_bit(&self, bit_index: usize) -> bool {
        let word_index = bit_index / 64;
        let mask = 1u64 << (bit_index % 64);
        (self.bit_array[word_index] & mask) != 0
    }

    fn set_bit(&mut self, bit_index: usize) {
        let word_index = bit_index / 64;
        let mask = 1u64 << (bit_index % 64);

        if (self.bit_array[word_index] & mask) == 0 {
            self.bit_array[word_index] |= mask;
            self.num_bits_set += 1;
        }
    }
}

/// Occupancy and theoretical error of a [`BloomFilter`].
///
/// The `Display` form is a one-line human-readable report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BloomStats {
    /// Number of inserted keys the estimate assumes (N)
    pub num_items: u64,
    /// `(1 - e^(-d*N/M))^d`
    pub false_positive_rate: f64,
    /// Bits currently set
    pub bits_used: u64,
    /// Total bits (M)
    pub capacity: usize,
}

impl fmt::Display for BloomStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Given {} inserted elements, the probability of false positives is ~{:.2}%.",
            self.num_items,
            100.0 * self.false_positive_rate
        )
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`BloomFilter`].
///
/// # Examples
///
/// ```
/// use streamsketch::bloom::BloomFilterBuilder;
///
/// // By accuracy
/// let filter = BloomFilterBuilder::with_accuracy(0.01, 1000)
///     .unwrap()
///     .seed(7)
///     .build()
///     .unwrap();
/// assert_eq!(filter.num_hashes(), 7);
///
/// // By size, seeded with initial keys
/// let filter = BloomFilterBuilder::with_size(10_000, 7)
///     .items([3, 1, 4])
///     .build()
///     .unwrap();
/// assert!(filter.contains(4).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    num_bits: usize,
    num_hashes: usize,
    seed: Option<u64>,
    items: Vec<i64>,
}

impl BloomFilterBuilder {
    /// Sizes the filter from a target false positive rate and expected key count.
    ///
    /// See [`BloomFilter::optimal_size`].
    pub fn with_accuracy(fpp: f64, max_items: u64) -> Result<Self, Error> {
        let (num_bits, num_hashes) = BloomFilter::optimal_size(fpp, max_items)?;
        log::debug!(
            "bloom filter sized for fpp={fpp}, max_items={max_items}: num_bits={num_bits}, num_hashes={num_hashes}"
        );
        Ok(Self::with_size(num_bits, num_hashes))
    }

    /// Sizes the filter explicitly.
    pub fn with_size(num_bits: usize, num_hashes: usize) -> Self {
        BloomFilterBuilder {
            num_bits,
            num_hashes,
            seed: None,
            items: Vec::new(),
        }
    }

    /// Sets the seed of the internally built hash family.
    ///
    /// Ignored by [`build_with_hasher`](Self::build_with_hasher).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Adds keys the filter starts out with.
    pub fn items<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        self.items.extend(items);
        self
    }

    /// Builds the filter with its own [`PairwiseHash`] family.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`](crate::error::ErrorKind::ConfigInvalid)
    /// if the size or number of hashes is zero, and
    /// [`ErrorKind::InvalidInput`](crate::error::ErrorKind::InvalidInput)
    /// if an initial key is negative.
    pub fn build(self) -> Result<BloomFilter, Error> {
        let mut hasher = PairwiseHash::builder(self.num_hashes, self.num_bits);
        if let Some(seed) = self.seed {
            hasher = hasher.seed(seed);
        }
        let hasher = hasher.build()?;
        self.build_with_hasher(hasher)
    }

    /// Builds the filter over a caller-supplied hash family.
    ///
    /// The family's range must equal the filter size and its number of
    /// functions must equal the configured number of hashes.
    pub fn build_with_hasher<H: HashFamily>(self, hasher: H) -> Result<BloomFilter<H>, Error> {
        if self.num_bits == 0 {
            return Err(Error::config_invalid("num_bits must be at least 1"));
        }
        if self.num_hashes == 0 {
            return Err(Error::config_invalid("num_hashes must be at least 1"));
        }
        if hasher.range() != self.num_bits || hasher.num_hashes() != self.num_hashes {
            return Err(
                Error::config_invalid("hash family does not match filter dimensions")
                    .with_context("num_bits", self.num_bits)
                    .with_context("num_hashes", self.num_hashes)
                    .with_context("hasher_range", hasher.range())
                    .with_context("hasher_num_hashes", hasher.num_hashes()),
            );
        }

        let mut filter = BloomFilter {
            hasher,
            capacity_bits: self.num_bits,
            num_bits_set: 0,
            bit_array: vec![0u64; self.num_bits.div_ceil(64)],
        };
        filter.add_all(self.items)?;

        log::debug!(
            "bloom filter built: num_bits={}, num_hashes={}, bits_used={}",
            filter.capacity_bits,
            filter.num_hashes(),
            filter.num_bits_set
        );
        Ok(filter)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_builder_with_accuracy() {
        let filter = BloomFilterBuilder::with_accuracy(0.01, 1000)
            .unwrap()
            .build()
            .unwrap();
        assert!(filter.capacity() >= 9000);
        assert_eq!(filter.num_hashes(), 7);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_builder_with_size() {
        let filter = BloomFilterBuilder::with_size(1024, 5).build().unwrap();
        assert_eq!(filter.capacity(), 1024);
        assert_eq!(filter.num_hashes(), 5);
        assert_eq!(filter.bit_array.len(), 16);
    }

    #[test]
    fn test_odd_capacity_rounds_words_up() {
        let mut filter = BloomFilter::with_seed(65, 3, 11).unwrap();
        assert_eq!(filter.bit_array.len(), 2);
        for x in 0..200 {
            filter.add(x).unwrap();
        }
        assert!(filter.bits_used() <= 65);
        assert_eq!(filter.bit_array[1] >> 1, 0);
    }

    #[test]
    fn test_add_and_contains() {
        let mut filter = BloomFilter::with_seed(1000, 5, 3).unwrap();

        filter.add(42).unwrap();
        assert!(filter.contains(42).unwrap());
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut filter = BloomFilter::with_seed(1000, 5, 3).unwrap();
        filter.add(42).unwrap();
        let used = filter.bits_used();
        let snapshot = filter.bit_array.clone();

        filter.add(42).unwrap();
        assert_eq!(filter.bits_used(), used);
        assert_eq!(filter.bit_array, snapshot);
    }

    #[test]
    fn test_contains_and_add() {
        let mut filter = BloomFilter::with_seed(1000, 5, 3).unwrap();

        let was_present = filter.contains_and_add(42).unwrap();
        assert!(!was_present);

        let was_present = filter.contains_and_add(42).unwrap();
        assert!(was_present);
    }

    #[test]
    fn test_negative_key_rejected() {
        let mut filter = BloomFilter::with_seed(1000, 5, 3).unwrap();

        let err = filter.add(-1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(filter.is_empty());

        let err = filter.contains(-1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);

        let err = filter.contains_and_add(-1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(filter.is_empty());
    }

    #[test]
    fn test_add_all_is_atomic() {
        let mut filter = BloomFilter::with_seed(1000, 5, 3).unwrap();
        filter.add(7).unwrap();
        let snapshot = filter.clone();

        let err = filter.add_all([1, 2, -3, 4]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(filter, snapshot);
    }

    #[test]
    fn test_initial_items() {
        let filter = BloomFilter::from_items(1000, 5, [1, 5, 9]).unwrap();
        for x in [1, 5, 9] {
            assert!(filter.contains(x).unwrap());
        }

        let err = BloomFilter::from_items(1000, 5, [1, -5]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_invalid_config() {
        let err = BloomFilter::new(0, 5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = BloomFilter::new(100, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let hasher = PairwiseHash::with_seed(5, 999, 1).unwrap();
        let err = BloomFilterBuilder::with_size(1000, 5)
            .build_with_hasher(hasher)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context("hasher_range"), Some("999"));
    }

    #[test]
    fn test_optimal_size() {
        assert_eq!(BloomFilter::optimal_size(0.05, 1000).unwrap(), (6236, 5));
        assert_eq!(BloomFilter::optimal_size(0.5, 1000).unwrap(), (1443, 1));
        assert_eq!(BloomFilter::optimal_size(0.01, 1000).unwrap().1, 7);

        for fpp in [0.0, 1.0, -0.5, 2.0, f64::NAN] {
            let err = BloomFilter::optimal_size(fpp, 1000).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        }
        let err = BloomFilter::optimal_size(0.05, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = BloomFilter::optimal_size(1e-10, u64::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context("fpp"), Some("0.0000000001"));
        assert_eq!(err.context("max_items"), Some(u64::MAX.to_string().as_str()));
        assert!(BloomFilterBuilder::with_accuracy(1e-10, u64::MAX).is_err());
    }

    #[test]
    fn test_false_positive_estimate() {
        let filter = BloomFilter::with_seed(6236, 5, 3).unwrap();
        assert_eq!(filter.false_positive_estimate(0), 0.0);

        let fpp = filter.false_positive_estimate(1000);
        assert!((fpp - 0.05).abs() < 0.005, "fpp is {fpp}");
        assert!(filter.false_positive_estimate(2000) > fpp);
    }
}
