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

//! # streamsketch
//!
//! Two probabilistic streaming summaries over non-negative integer keys, both
//! built on a shared pairwise-independent hash family:
//!
//! - [`bloom::BloomFilter`]: approximate set membership with no false negatives.
//! - [`countmin::CountMinSketch`]: approximate frequency counts whose raw
//!   estimate never undercounts, with optional noise-corrected estimators.
//!
//! Structures own their arrays and perform no I/O. Every fallible operation
//! returns [`error::Error`] and leaves the structure unchanged on failure.
//!
//! ```rust
//! use streamsketch::bloom::BloomFilter;
//! use streamsketch::countmin::CountMinSketch;
//!
//! let mut seen = BloomFilter::with_seed(1000, 5, 1).unwrap();
//! let mut counts = CountMinSketch::with_seed(5, 2000, 1).unwrap();
//!
//! for x in [3, 1, 4, 1, 5] {
//!     seen.add(x).unwrap();
//!     counts.update(x, 1).unwrap();
//! }
//!
//! assert!(seen.contains(4).unwrap());
//! assert!(counts.raw_count(1).unwrap() >= 2);
//! ```

pub mod bloom;
pub mod countmin;
pub mod error;
pub mod hash;
