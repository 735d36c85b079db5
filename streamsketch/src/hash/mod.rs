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

//! Hash families that map non-negative integer keys onto array indices.
//!
//! Both [`BloomFilter`](crate::bloom::BloomFilter) and
//! [`CountMinSketch`](crate::countmin::CountMinSketch) only see a
//! [`HashFamily`]. The crate ships one concrete family, [`PairwiseHash`],
//! whose error bounds rest on pairwise independence alone.
//!
//! # Usage
//!
//! ```rust
//! use streamsketch::hash::HashFamily;
//! use streamsketch::hash::PairwiseHash;
//!
//! let family = PairwiseHash::with_seed(3, 100, 42).unwrap();
//! let indices = family.evaluate(7).unwrap();
//! assert_eq!(indices.len(), 3);
//! assert!(indices.iter().all(|&i| i < 100));
//! assert_eq!(indices, family.evaluate(7).unwrap());
//! ```
//!
//! # Sharing a family
//!
//! A family is immutable once built, so structures that must agree on
//! collisions can borrow one or hold it behind an `Arc`:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use streamsketch::bloom::BloomFilterBuilder;
//! use streamsketch::countmin::CountMinSketchBuilder;
//! use streamsketch::hash::PairwiseHash;
//!
//! let family = Arc::new(PairwiseHash::with_seed(4, 512, 7).unwrap());
//! let filter = BloomFilterBuilder::with_size(512, 4)
//!     .build_with_hasher(Arc::clone(&family))
//!     .unwrap();
//! let sketch = CountMinSketchBuilder::with_dimensions(4, 512)
//!     .build_with_hasher(family)
//!     .unwrap();
//! assert_eq!(filter.capacity(), sketch.num_buckets());
//! ```

use std::sync::Arc;

use crate::error::Error;

mod pairwise;
pub use self::pairwise::DEFAULT_PRIME;
pub use self::pairwise::PairwiseHash;
pub use self::pairwise::PairwiseHashBuilder;

/// A fixed set of hash functions from non-negative integers into `[0, range)`.
///
/// Implementations must be deterministic: evaluating the same key twice on the
/// same family returns the same indices, in the same order.
pub trait HashFamily {
    /// Number of hash functions in the family (`d`).
    fn num_hashes(&self) -> usize;

    /// Size of the output range (`m`). Every index is below this value.
    fn range(&self) -> usize;

    /// Computes one index per hash function for key `x`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidInput`](crate::error::ErrorKind::InvalidInput)
    /// if `x` is negative.
    fn evaluate(&self, x: i64) -> Result<Vec<usize>, Error>;
}

impl<H: HashFamily + ?Sized> HashFamily for &H {
    fn num_hashes(&self) -> usize {
        (**self).num_hashes()
    }

    fn range(&self) -> usize {
        (**self).range()
    }

    fn evaluate(&self, x: i64) -> Result<Vec<usize>, Error> {
        (**self).evaluate(x)
    }
}

impl<H: HashFamily + ?Sized> HashFamily for Arc<H> {
    fn num_hashes(&self) -> usize {
        (**self).num_hashes()
    }

    fn range(&self) -> usize {
        (**self).range()
    }

    fn evaluate(&self, x: i64) -> Result<Vec<usize>, Error> {
        (**self).evaluate(x)
    }
}

impl<H: HashFamily + ?Sized> HashFamily for Box<H> {
    fn num_hashes(&self) -> usize {
        (**self).num_hashes()
    }

    fn range(&self) -> usize {
        (**self).range()
    }

    fn evaluate(&self, x: i64) -> Result<Vec<usize>, Error> {
        (**self).evaluate(x)
    }
}
