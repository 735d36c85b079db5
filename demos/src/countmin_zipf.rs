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

//! Feeds a Zipf-like stream into a Count-Min sketch and reports how far the
//! estimates land from the exact counts.

use std::collections::HashMap;
use std::process::ExitCode;

use clap::Parser;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use streamsketch::countmin::CountMinSketch;
use streamsketch::countmin::NoiseCorrection;
use streamsketch::error::Error;

#[derive(Debug, Parser)]
#[command(about = "Count-Min sketch accuracy demo on a skewed stream")]
struct Args {
    /// Relative error target
    #[arg(long, default_value_t = 0.01)]
    epsilon: f64,
    /// Failure probability target
    #[arg(long, default_value_t = 0.01)]
    delta: f64,
    /// Estimator: none, mean or median
    #[arg(long, default_value_t = NoiseCorrection::None)]
    noise_correction: NoiseCorrection,
    /// Number of samples drawn from the stream
    #[arg(long, default_value_t = 100_000)]
    samples: usize,
    /// Tail exponent of the key distribution, must exceed 1
    #[arg(long, default_value_t = 1.3)]
    exponent: f64,
    /// Seed for both the workload and the hash family
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Draws a key from a discrete power law with `P(k) ~ k^-exponent`, `k >= 1`.
fn zipf_like(rng: &mut impl Rng, exponent: f64) -> i64 {
    let u: f64 = rng.random_range(f64::EPSILON..1.0);
    let k = u.powf(-1.0 / (exponent - 1.0)).floor();
    k.min(i64::MAX as f64) as i64
}

fn run(args: &Args) -> Result<(), Error> {
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut exact: HashMap<i64, i64> = HashMap::new();
    for _ in 0..args.samples {
        *exact.entry(zipf_like(&mut rng, args.exponent)).or_default() += 1;
    }
    println!("The number of distinct values is {}", exact.len());

    let mut sketch = CountMinSketch::from_error(args.epsilon, args.delta, args.noise_correction)?;
    for (&x, &c) in &exact {
        sketch.update(x, c)?;
    }
    println!("\n=== Count-Min Sketch ({}) ===\n", args.noise_correction);
    println!("{}\n", sketch.stats());

    let mut keys: Vec<_> = exact.keys().copied().collect();
    keys.sort_unstable();

    let mut absolute = 0.0;
    let mut relative = 0.0;
    for &x in &keys {
        let truth = exact[&x] as f64;
        let error = (sketch.count(x)? - truth).abs();
        absolute += error;
        relative += error / truth;
    }
    let n = keys.len() as f64;
    println!("   Mean absolute error: {:.3}", absolute / n);
    println!("   Mean relative error: {:.3}", relative / n);

    println!("\n   {:>8} {:>10} {:>12}", "key", "count", "estimate");
    for &x in keys.iter().take(10) {
        println!("   {:>8} {:>10} {:>12.2}", x, exact[&x], sketch.count(x)?);
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    if args.exponent <= 1.0 {
        eprintln!("error: exponent must exceed 1");
        return ExitCode::FAILURE;
    }
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
