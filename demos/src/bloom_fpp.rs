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

//! Measures the empirical false positive rate of a Bloom filter sized by
//! `optimal_size` and compares it with the theoretical estimate.

use std::collections::HashSet;
use std::process::ExitCode;

use clap::Parser;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use streamsketch::bloom::BloomFilterBuilder;
use streamsketch::error::Error;

const KEY_LIMIT: i64 = (1 << 31) - 1;

#[derive(Debug, Parser)]
#[command(about = "Bloom filter false positive rate demo")]
struct Args {
    /// Target false positive probability
    #[arg(long, default_value_t = 0.05)]
    fpp: f64,
    /// Number of distinct keys to insert
    #[arg(long, default_value_t = 1000)]
    items: u64,
    /// Number of absent keys to query
    #[arg(long, default_value_t = 100_000)]
    queries: u64,
    /// Seed for both the workload and the hash family
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

fn run(args: &Args) -> Result<(), Error> {
    let builder = BloomFilterBuilder::with_accuracy(args.fpp, args.items)?;
    let mut filter = builder.seed(args.seed).build()?;
    println!("=== Bloom Filter ===\n");
    println!("   Bits (M): {}", filter.capacity());
    println!("   Hashes (d): {}", filter.num_hashes());

    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut inserted = HashSet::new();
    while (inserted.len() as u64) < args.items {
        inserted.insert(rng.random_range(0..KEY_LIMIT));
    }
    filter.add_all(inserted.iter().copied())?;
    println!("   Load factor: {:.4}", filter.load_factor());

    let mut queries = 0u64;
    let mut false_positives = 0u64;
    while queries < args.queries {
        let x = rng.random_range(0..KEY_LIMIT);
        if inserted.contains(&x) {
            continue;
        }
        queries += 1;
        if filter.contains(x)? {
            false_positives += 1;
        }
    }

    println!();
    println!("{}", filter.stats(args.items));
    println!(
        "Observed {false_positives} false positives in {queries} queries (~{:.2}%).",
        100.0 * false_positives as f64 / queries as f64
    );
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
