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

//! Bloom filter implementation for probabilistic set membership testing.
//!
//! A Bloom filter answers "was this key added?" with no false negatives and a
//! false positive rate controlled by its size and number of hash functions.
//! Keys are non-negative integers; bits are only ever set, never cleared.
//!
//! # Usage
//!
//! ```rust
//! use streamsketch::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::with_seed(1000, 5, 42).unwrap();
//! filter.add_all([1, 5, 9]).unwrap();
//!
//! assert!(filter.contains(1).unwrap());
//! assert!(filter.contains(9).unwrap());
//! ```
//!
//! # Sizing
//!
//! ```rust
//! use streamsketch::bloom::BloomFilter;
//! use streamsketch::bloom::BloomFilterBuilder;
//!
//! // 1000 keys at a 5% false positive rate
//! let (num_bits, num_hashes) = BloomFilter::optimal_size(0.05, 1000).unwrap();
//! assert_eq!((num_bits, num_hashes), (6236, 5));
//!
//! let filter = BloomFilterBuilder::with_accuracy(0.05, 1000)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//! assert_eq!(filter.capacity(), num_bits);
//! println!("{}", filter.stats(1000));
//! ```

mod sketch;
pub use self::sketch::BloomFilter;
pub use self::sketch::BloomFilterBuilder;
pub use self::sketch::BloomStats;
