/*!
Sentence-level BLEU of a candidate against a single reference. The precisions are computed for
the unigrams up to the 4-grams and are kept as unreduced fractions until they are smoothed.
*/
use ahash::HashMap as AHashMap;
use itertools::izip;
use ndarray::Array1;
use ndarray_stats::{errors::MultiInputError, SummaryStatisticsExt};
use num::rational::Ratio;
use serde::{Deserialize, Serialize};

/// Highest n-gram order. The weights given to BLEU must have exactly this length.
pub const MAX_ORDER: usize = 4;

/// Uniform weights over the unigrams, bigrams, trigrams and 4-grams.
pub const DEFAULT_WEIGHTS: [f64; MAX_ORDER] = [0.25; MAX_ORDER];

/// Smoothing applied to the modified n-gram precisions. The variants are named after the
/// smoothing techniques of Chen & Cherry (2014).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Smoothing {
    /// A precision equal to 0 makes the whole score 0.
    NoSmoothing,
    /// Adds `epsilon` to the numerator of the precisions equal to 0.
    Method1 { epsilon: f64 },
    /// Adds 1 to the numerator and the denominator of every precision above the unigrams. The
    /// higher orders without any match no longer collapse the score to 0.
    #[default]
    Method2,
}

impl Smoothing {
    fn smooth(&self, precisions: &[Ratio<usize>]) -> Vec<f64> {
        match self {
            Self::NoSmoothing => precisions.iter().map(ratio_to_f64).collect(),
            Self::Method1 { epsilon } => precisions
                .iter()
                .map(|p| {
                    if *p.numer() == 0 {
                        epsilon / *p.denom() as f64
                    } else {
                        ratio_to_f64(p)
                    }
                })
                .collect(),
            Self::Method2 => precisions
                .iter()
                .enumerate()
                .map(|(order, p)| {
                    if order == 0 {
                        ratio_to_f64(p)
                    } else {
                        (p.numer() + 1) as f64 / (p.denom() + 1) as f64
                    }
                })
                .collect(),
        }
    }
}

fn ratio_to_f64(ratio: &Ratio<usize>) -> f64 {
    *ratio.numer() as f64 / *ratio.denom() as f64
}

/// Counts the n-grams of order `n` (`n` > 0). The keys borrow from `tokens`.
fn ngram_counts<'t, 'a>(tokens: &'t [&'a str], n: usize) -> AHashMap<&'t [&'a str], usize> {
    let mut counts: AHashMap<&'t [&'a str], usize> = AHashMap::default();
    for window in tokens.windows(n) {
        *counts.entry(window).or_insert(0) += 1;
    }
    counts
}

/// Modified precision of order `n`: the candidate n-gram counts are clipped by the reference
/// counts. The denominator is at least 1 and the fraction is *not* reduced, the smoothing needs
/// the raw counts.
fn modified_precision(reference: &[&str], candidate: &[&str], n: usize) -> Ratio<usize> {
    let candidate_counts = ngram_counts(candidate, n);
    let reference_counts = ngram_counts(reference, n);
    let clipped: usize = candidate_counts
        .iter()
        .map(|(ngram, count)| *count.min(reference_counts.get(ngram).unwrap_or(&0)))
        .sum();
    let total: usize = candidate_counts.values().sum();
    Ratio::new_raw(clipped, total.max(1))
}

/// Penalizes candidates shorter than the reference. An empty candidate gets 0.
pub(crate) fn brevity_penalty(reference_len: usize, candidate_len: usize) -> f64 {
    if candidate_len > reference_len {
        1.0
    } else if candidate_len == 0 {
        0.0
    } else {
        (1.0 - reference_len as f64 / candidate_len as f64).exp()
    }
}

/// BLEU of already tokenized sentences: `BP * exp(sum_n w_n * ln p_n)`.
pub(crate) fn sentence_bleu(
    reference: &[&str],
    candidate: &[&str],
    weights: &[f64; MAX_ORDER],
    smoothing: Smoothing,
) -> Result<f64, MultiInputError> {
    let precisions: Vec<Ratio<usize>> = (1..=MAX_ORDER)
        .map(|n| modified_precision(reference, candidate, n))
        .collect();
    // Without a single matching unigram, no smoothing can produce a meaningful score.
    if precisions.first().map_or(true, |p| *p.numer() == 0) {
        log::debug!("No unigram of the candidate matches the reference, BLEU is 0");
        return Ok(0.0);
    }
    let smoothed = smoothing.smooth(&precisions);
    let mut used_weights = Vec::with_capacity(MAX_ORDER);
    let mut log_precisions = Vec::with_capacity(MAX_ORDER);
    for (order, weight, precision) in izip!(1..=MAX_ORDER, weights, smoothed) {
        if *weight == 0.0 {
            continue;
        }
        if precision == 0.0 {
            log::warn!(
                "The candidate has no matching {}-gram: BLEU is 0. Consider using a smoothing function",
                order
            );
            return Ok(0.0);
        }
        used_weights.push(*weight);
        log_precisions.push(precision.ln());
    }
    let bp = brevity_penalty(reference.len(), candidate.len());
    if log_precisions.is_empty() {
        return Ok(bp);
    }
    let weighted_log = Array1::from(log_precisions).weighted_sum(&Array1::from(used_weights))?;
    Ok(bp * weighted_log.exp())
}
