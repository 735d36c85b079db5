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

//! Count-Min sketch implementation for frequency estimation.
//!
//! The Count-Min sketch provides approximate frequency counts for streaming data
//! with configurable relative error and confidence bounds. Estimates never fall
//! below the true count; with probability `1 - delta` they exceed it by at most
//! `epsilon` times the total weight seen.
//!
//! # Usage
//!
//! ```rust
//! use streamsketch::countmin::CountMinSketch;
//!
//! let mut sketch = CountMinSketch::with_seed(5, 2000, 42).unwrap();
//!
//! sketch.update(42, 10).unwrap();
//! sketch.update(42, 5).unwrap();
//!
//! assert!(sketch.count(42).unwrap() >= 15.0);
//! assert_eq!(sketch.cardinality(), 15);
//! ```
//!
//! # Noise Correction
//!
//! ```rust
//! use streamsketch::countmin::CountMinSketch;
//! use streamsketch::countmin::NoiseCorrection;
//!
//! let mut sketch = CountMinSketch::from_error(0.01, 0.01, NoiseCorrection::Mean).unwrap();
//! sketch.update(7, 3).unwrap();
//!
//! let corrected = sketch.count(7).unwrap();
//! let raw = sketch.raw_count(7).unwrap();
//! assert!(corrected >= 0.0 && corrected <= raw as f64);
//! println!("{}", sketch.stats());
//! ```

mod noise;
mod sketch;

pub use self::noise::NoiseCorrection;
pub use self::sketch::CountMinSketch;
pub use self::sketch::CountMinSketchBuilder;
pub use self::sketch::CountMinStats;
