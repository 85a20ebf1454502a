//! Percentile-bootstrap confidence interval for the phone error rate.
//!
//! The resampling unit is the lexicon entry, not the individual phone: a draw
//! picks `N` entries with replacement and computes
//! `sum(edits) / sum(reference_length)` over the drawn multiset. Errors inside
//! one word stay together, which matches how the corpus was sampled.
//!
//! Draws are independent and run in parallel. Each draw seeds its own RNG from
//! `(seed, draw_index)`, so a fixed seed gives the same interval regardless of
//! thread scheduling.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::prelude::*;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::debug;

use crate::domain::{AlignmentResult, ConfidenceInterval};
use crate::error::ScoringError;

/// Estimate a confidence interval for the corpus error rate.
///
/// - `resamples`: number of bootstrap draws (`>= 1`)
/// - `confidence_level`: e.g. `0.95`, must lie strictly inside `(0, 1)`
/// - `seed`: fixed seed for reproducible output; `None` draws a fresh one
///
/// Per-draw seeds are mixed with `DefaultHasher`, whose output may change
/// between Rust releases: a fixed seed reproduces on the same toolchain only.
pub fn estimate(
    alignments: &[AlignmentResult],
    resamples: usize,
    confidence_level: f64,
    seed: Option<u64>,
) -> Result<ConfidenceInterval, ScoringError> {
    let n = alignments.len();
    if n == 0 || resamples == 0 {
        return Err(ScoringError::InsufficientData { entries: n, resamples });
    }
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(ScoringError::InvalidConfidenceLevel { level: confidence_level });
    }

    let units: Vec<(usize, usize)> = alignments
        .iter()
        .map(|a| {
            let c = a.counts();
            (c.edits(), c.reference_length())
        })
        .collect();

    let (total_edits, total_ref) = units
        .iter()
        .fold((0usize, 0usize), |(e, r), &(ue, ur)| (e + ue, r + ur));
    if total_ref == 0 {
        return Err(ScoringError::UndefinedErrorRate);
    }
    let point_estimate = total_edits as f64 / total_ref as f64;

    let base_seed = seed.unwrap_or_else(rand::random);

    // A draw made only of empty-reference entries has no rate; it is dropped.
    let mut rates: Vec<f64> = (0..resamples)
        .into_par_iter()
        .filter_map(|k| {
            let mut rng = StdRng::seed_from_u64(draw_seed(base_seed, k));
            let mut edits = 0usize;
            let mut ref_len = 0usize;
            for _ in 0..n {
                let (e, r) = units[rng.gen_range(0..n)];
                edits += e;
                ref_len += r;
            }
            (ref_len > 0).then(|| edits as f64 / ref_len as f64)
        })
        .collect();

    if rates.is_empty() {
        return Err(ScoringError::UndefinedErrorRate);
    }
    if rates.len() < resamples {
        debug!(dropped = resamples - rates.len(), "bootstrap draws without reference phones");
    }

    rates.sort_by(f64::total_cmp);

    let alpha = (1.0 - confidence_level) / 2.0;
    let lower_bound = quantile(&rates, alpha);
    let upper_bound = quantile(&rates, 1.0 - alpha);
    let standard_error = std_dev(&rates);

    Ok(ConfidenceInterval {
        point_estimate,
        lower_bound,
        upper_bound,
        confidence_level,
        resamples,
        standard_error,
    })
}

fn draw_seed(base: u64, index: usize) -> u64 {
    let mut hasher = DefaultHasher::new();
    base.hash(&mut hasher);
    index.hash(&mut hasher);
    hasher.finish()
}

/// Nearest-rank empirical quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let len = sorted.len();
    if len <= 1 {
        return sorted[0];
    }
    let rank = ((len - 1) as f64 * q).round() as usize;
    sorted[rank.min(len - 1)]
}

fn std_dev(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    var.sqrt()
}
