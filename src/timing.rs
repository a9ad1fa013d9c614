//! Iteration-averaged timing of the matchers.
//!
//! Kept apart from the algorithms; nothing in the core depends on it.

use crate::error::Result;
use crate::matcher::{find_all, Strategy};
use std::time::{Duration, Instant};
use tracing::debug;

/// Primes compared against each other by [`compare`] callers.
pub const COMPARISON_PRIMES: [u64; 3] = [101, 211, 307];

/// A text/pattern pair to time.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub text: Vec<u8>,
    pub pattern: Vec<u8>,
}

/// Timing result for one strategy on one scenario.
#[derive(Debug, Clone)]
pub struct Measurement {
    pub strategy: Strategy,
    pub iterations: u32,
    pub total: Duration,
    /// Matches found by the last run
    pub matches: usize,
}

impl Measurement {
    /// Mean wall-clock time per run.
    pub fn average(&self) -> Duration {
        if self.iterations == 0 {
            Duration::ZERO
        } else {
            self.total / self.iterations
        }
    }
}

/// Runs `f` `iterations` times, returning the total elapsed time and the last result.
pub fn time_runs<T, F: FnMut() -> T>(iterations: u32, mut f: F) -> (Duration, Option<T>) {
    let start = Instant::now();
    let mut last = None;
    for _ in 0..iterations {
        last = Some(f());
    }
    (start.elapsed(), last)
}

/// The three inputs the comparison has always been run on.
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "short text".to_string(),
            text: b"THIS IS AN EXAMPLE.".to_vec(),
            pattern: b"EX".to_vec(),
        },
        Scenario {
            name: "repeated sentence".to_string(),
            text: "THIS IS A SIMPLE EXAMPLE ".repeat(1000).into_bytes(),
            pattern: b"EXAMPLE".to_vec(),
        },
        Scenario {
            name: "periodic text".to_string(),
            text: b"ABABABACABABABABACABABABACABABABAC".to_vec(),
            pattern: b"ABABABACABABABABAC".to_vec(),
        },
    ]
}

/// Naive matching plus Rabin-Karp with each of [`COMPARISON_PRIMES`].
pub fn comparison_strategies() -> Result<Vec<Strategy>> {
    let mut strategies = vec![Strategy::Naive];
    for &prime in &COMPARISON_PRIMES {
        strategies.push(Strategy::rabin_karp(prime)?);
    }
    Ok(strategies)
}

/// Times [`find_all`] for every strategy on `scenario`.
pub fn compare(
    scenario: &Scenario,
    strategies: &[Strategy],
    iterations: u32,
) -> Result<Vec<Measurement>> {
    let mut results = Vec::with_capacity(strategies.len());

    for strategy in strategies {
        // Validate once so the timed loop cannot fail.
        find_all(&scenario.text, &scenario.pattern, strategy)?;

        let (total, last) = time_runs(iterations, || {
            find_all(&scenario.text, &scenario.pattern, strategy).map(|m| m.len())
        });
        let matches = last.transpose()?.unwrap_or(0);

        debug!(
            scenario = %scenario.name,
            strategy = %strategy,
            iterations,
            ?total,
            "timed scenario"
        );

        results.push(Measurement {
            strategy: *strategy,
            iterations,
            total,
            matches,
        });
    }

    Ok(results)
}
