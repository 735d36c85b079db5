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

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Estimator applied on top of the raw Count-Min minimum.
///
/// Hash collisions can only inflate a counter, so the raw minimum is biased
/// upward, badly so on skewed streams. The corrected estimators subtract an
/// estimate of the collision noise from every row, combine the rows with a
/// median, and clip the result to `[0, raw]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NoiseCorrection {
    /// Report the raw minimum over rows.
    #[default]
    None,
    /// Row noise is the mean of the other `w - 1` cells of the row.
    Mean,
    /// Row noise is the median of all `w` cells of the row.
    ///
    /// The queried cell takes part in its own row's median. For heavy keys
    /// this overestimates the noise, so their estimate is pulled further down
    /// than exact noise removal would pull it.
    Median,
}

/// Noise estimate for one row, given the row, the queried cell and the
/// sketch cardinality.
pub(super) type NoiseEstimator = fn(&[u64], u64, u64) -> f64;

impl NoiseCorrection {
    /// Returns the lowercase name of the estimator.
    pub const fn as_str(self) -> &'static str {
        match self {
            NoiseCorrection::None => "none",
            NoiseCorrection::Mean => "mean",
            NoiseCorrection::Median => "median",
        }
    }

    /// Returns the per-row noise function, or `None` for the raw estimator.
    pub(super) fn row_noise(self) -> Option<NoiseEstimator> {
        match self {
            NoiseCorrection::None => None,
            NoiseCorrection::Mean => Some(mean_noise),
            NoiseCorrection::Median => Some(median_noise),
        }
    }
}

impl fmt::Display for NoiseCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoiseCorrection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(NoiseCorrection::None),
            "mean" => Ok(NoiseCorrection::Mean),
            "median" => Ok(NoiseCorrection::Median),
            _ => Err(Error::config_invalid(
                "noise correction must be one of: none, mean, median",
            )
            .with_context("value", s)),
        }
    }
}

fn mean_noise(row: &[u64], cell: u64, cardinality: u64) -> f64 {
    if row.len() < 2 {
        return 0.0;
    }
    cardinality.saturating_sub(cell) as f64 / (row.len() - 1) as f64
}

fn median_noise(row: &[u64], _cell: u64, _cardinality: u64) -> f64 {
    let mut values: Vec<f64> = row.iter().map(|&c| c as f64).collect();
    median(&mut values)
}

/// Median of `values`; the mean of the two middle values when the length is even.
///
/// Returns 0 for an empty slice. Reorders `values`.
pub(super) fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_unstable_by(f64::total_cmp);

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_median() {
        assert_eq!(median(&mut []), 0.0);
        assert_eq!(median(&mut [3.0]), 3.0);
        assert_eq!(median(&mut [5.0, 1.0, 3.0]), 3.0);
        assert_eq!(median(&mut [4.0, 1.0, 2.0, 10.0]), 3.0);
        assert_eq!(median(&mut [-2.0, 1.0]), -0.5);
    }

    #[test]
    fn test_mean_noise() {
        // the other three cells hold 13 - 4 = 9 in total
        assert_eq!(mean_noise(&[4, 6, 0, 3], 4, 13), 3.0);
        assert_eq!(mean_noise(&[7], 7, 7), 0.0);
    }

    #[test]
    fn test_median_noise_includes_queried_cell() {
        assert_eq!(median_noise(&[0, 0, 2, 11], 11, 13), 1.0);
        assert_eq!(median_noise(&[0, 9, 11], 11, 20), 9.0);
    }

    #[test]
    fn test_parse_and_display() {
        for nc in [
            NoiseCorrection::None,
            NoiseCorrection::Mean,
            NoiseCorrection::Median,
        ] {
            assert_eq!(nc.to_string().parse::<NoiseCorrection>().unwrap(), nc);
        }
        assert_eq!(
            "MEDIAN".parse::<NoiseCorrection>().unwrap(),
            NoiseCorrection::Median
        );

        let err = "average".parse::<NoiseCorrection>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(err.context("value"), Some("average"));
    }

    #[test]
    fn test_row_noise_dispatch() {
        assert!(NoiseCorrection::None.row_noise().is_none());
        assert!(NoiseCorrection::default().row_noise().is_none());

        let mean = NoiseCorrection::Mean.row_noise().unwrap();
        assert_eq!(mean(&[4, 6, 0, 3], 4, 13), 3.0);
        let median = NoiseCorrection::Median.row_noise().unwrap();
        assert_eq!(median(&[4, 6, 0, 3], 4, 13), 3.5);
    }
}
