/**
This module computes the edit-distance metrics (word error rate, character error rate, match
error rate) and the BLEU score of a candidate text against a reference text.
*/
use crate::alignment::ErrorCounts;
use crate::bleu::{sentence_bleu, DEFAULT_WEIGHTS};
use crate::config::{BleuConfig, WeightValueError, WeightsLengthError};
use crate::datastructure::Segments;
use crate::normalize::Pipeline;
use core::fmt;
use either::Either;
use ndarray_stats::errors::MultiInputError;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub struct DivisionByZeroError;

impl Display for DivisionByZeroError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Encountered division by zero")
    }
}

impl Error for DivisionByZeroError {}

#[derive(Debug, Clone, PartialEq)]
/// Enum error encompassing the failures that could happen when scoring a candidate.
pub enum ComputationError {
    /// The reference has no token left after normalization: the rate is undefined.
    EmptyReference(DivisionByZeroError),
    WeightsLength(WeightsLengthError),
    /// A BLEU weight is negative or not finite.
    WeightValue(WeightValueError),
    Statistics(MultiInputError),
}

impl Display for ComputationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyReference(div_err) => write!(
                f,
                "The reference is empty after normalization, the rate is undefined: {}",
                div_err
            ),
            Self::WeightsLength(length_err) => std::fmt::Display::fmt(length_err, f),
            Self::WeightValue(value_err) => std::fmt::Display::fmt(value_err, f),
            Self::Statistics(input_err) => std::fmt::Display::fmt(input_err, f),
        }
    }
}
impl Error for ComputationError {}

impl From<DivisionByZeroError> for ComputationError {
    fn from(value: DivisionByZeroError) -> Self {
        Self::EmptyReference(value)
    }
}
impl From<WeightsLengthError> for ComputationError {
    fn from(value: WeightsLengthError) -> Self {
        Self::WeightsLength(value)
    }
}
impl From<WeightValueError> for ComputationError {
    fn from(value: WeightValueError) -> Self {
        Self::WeightValue(value)
    }
}
impl From<MultiInputError> for ComputationError {
    fn from(value: MultiInputError) -> Self {
        Self::Statistics(value)
    }
}

/// Tokens on which the reference and the candidate are aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Granularity {
    Word,
    Character,
}

/// Measures derived from the word alignment of a reference and a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentMeasures {
    pub counts: ErrorCounts,
    /// Word error rate: (S + D + I) / (H + S + D)
    pub wer: f64,
    /// Match error rate: (S + D + I) / (H + S + D + I)
    pub mer: f64,
    /// Word information lost: 1 - wip
    pub wil: f64,
    /// Word information preserved: (H / reference length) * (H / candidate length)
    pub wip: f64,
}

fn ratio(numerator: usize, denominator: usize) -> Result<f64, DivisionByZeroError> {
    if denominator == 0 {
        return Err(DivisionByZeroError);
    }
    Ok(numerator as f64 / denominator as f64)
}

/// Normalizes both texts and aligns them at the given granularity. Fails when the reference is
/// empty after normalization.
fn align(
    reference: &str,
    candidate: &str,
    pipeline: &Pipeline,
    granularity: Granularity,
) -> Result<ErrorCounts, ComputationError> {
    let reference = pipeline.apply(reference);
    if reference.is_empty() {
        return Err(DivisionByZeroError.into());
    }
    let candidate = pipeline.apply(candidate);
    let reference_tokens: Vec<&str> = tokens(&reference, granularity).collect();
    let candidate_tokens: Vec<&str> = tokens(&candidate, granularity).collect();
    let counts = ErrorCounts::between(&reference_tokens, &candidate_tokens);
    log::debug!(
        "{:?} alignment of {} reference and {} candidate tokens: {}",
        granularity,
        reference_tokens.len(),
        candidate_tokens.len(),
        counts
    );
    Ok(counts)
}

/// Words of the segments, or characters of their words. The spaces between words are not
/// characters.
fn tokens(segments: &Segments, granularity: Granularity) -> impl Iterator<Item = &str> + '_ {
    match granularity {
        Granularity::Word => Either::Left(segments.iter().map(String::as_str)),
        Granularity::Character => Either::Right(segments.characters()),
    }
}

/// Word error rate of the candidate, using the default normalization pipeline.
///
/// WER = (substitutions + deletions + insertions) / number of reference words. It is 0 for a
/// perfect match and can be greater than 1 when the candidate is longer than the reference.
///
/// # Example
/// ```rust
/// use textscore::wer;
///
/// assert_eq!(wer("Don't stop!", "do not stop").unwrap(), 0.0);
/// assert_eq!(wer("a", "a b c d").unwrap(), 3.0);
/// assert!(wer("", "a b c d").is_err());
/// ```
pub fn wer(reference: &str, candidate: &str) -> Result<f64, ComputationError> {
    wer_conf(reference, candidate, &Pipeline::default())
}

/// Word error rate of the candidate, normalizing both texts with `pipeline`.
pub fn wer_conf(
    reference: &str,
    candidate: &str,
    pipeline: &Pipeline,
) -> Result<f64, ComputationError> {
    let counts = align(reference, candidate, pipeline, Granularity::Word)?;
    Ok(ratio(counts.errors(), counts.reference_len())?)
}

/// Character error rate of the candidate, using the default normalization pipeline.
///
/// Same as the word error rate, on the characters of the normalized words. The whitespace
/// separating the words is not counted.
///
/// # Example
/// ```rust
/// use textscore::cer;
///
/// // One substitution over the 6 characters of "abcdef".
/// assert!((cer("abc def", "abc dxf").unwrap() - 1.0 / 6.0).abs() < 1e-9);
/// ```
pub fn cer(reference: &str, candidate: &str) -> Result<f64, ComputationError> {
    cer_conf(reference, candidate, &Pipeline::default())
}

/// Character error rate of the candidate, normalizing both texts with `pipeline`.
pub fn cer_conf(
    reference: &str,
    candidate: &str,
    pipeline: &Pipeline,
) -> Result<f64, ComputationError> {
    let counts = align(reference, candidate, pipeline, Granularity::Character)?;
    Ok(ratio(counts.errors(), counts.reference_len())?)
}

/// Match error rate of the candidate, using the default normalization pipeline.
///
/// MER = (S + D + I) / (H + S + D + I). Unlike the WER, it is always in [0, 1].
///
/// # Example
/// ```rust
/// use textscore::mer;
///
/// assert_eq!(mer("a", "a b c d").unwrap(), 0.75);
/// ```
pub fn mer(reference: &str, candidate: &str) -> Result<f64, ComputationError> {
    mer_conf(reference, candidate, &Pipeline::default())
}

/// Match error rate of the candidate, normalizing both texts with `pipeline`.
pub fn mer_conf(
    reference: &str,
    candidate: &str,
    pipeline: &Pipeline,
) -> Result<f64, ComputationError> {
    let counts = align(reference, candidate, pipeline, Granularity::Word)?;
    Ok(ratio(counts.errors(), counts.aligned_len())?)
}

/// Computes every measure of the word alignment at once: the counts, WER, MER, WIL and WIP.
pub fn measures(
    reference: &str,
    candidate: &str,
    pipeline: &Pipeline,
) -> Result<AlignmentMeasures, ComputationError> {
    let counts = align(reference, candidate, pipeline, Granularity::Word)?;
    let wer = ratio(counts.errors(), counts.reference_len())?;
    let mer = ratio(counts.errors(), counts.aligned_len())?;
    // An empty candidate preserves no information.
    let wip = match counts.candidate_len() {
        0 => 0.0,
        candidate_len => {
            ratio(counts.hits, counts.reference_len())? * ratio(counts.hits, candidate_len)?
        }
    };
    Ok(AlignmentMeasures {
        counts,
        wer,
        mer,
        wil: 1.0 - wip,
        wip,
    })
}

/// BLEU score of the candidate with uniform weights and the `Smoothing::Method2` smoothing. Both
/// texts are only split on whitespace, they are not normalized.
///
/// # Example
/// ```rust
/// use textscore::bleu;
///
/// let score = bleu("the cat sat on the mat", "the cat sat on the mat").unwrap();
/// assert!((score - 1.0).abs() < 1e-9);
/// ```
pub fn bleu(reference: &str, candidate: &str) -> Result<f64, ComputationError> {
    let reference: Vec<&str> = reference.split_whitespace().collect();
    let candidate: Vec<&str> = candidate.split_whitespace().collect();
    Ok(sentence_bleu(
        &reference,
        &candidate,
        &DEFAULT_WEIGHTS,
        Default::default(),
    )?)
}

/// BLEU score of the candidate with the weights and smoothing of `config`. Fails if there are not
/// exactly four weights or if a weight is negative or not finite.
pub fn bleu_conf(
    reference: &str,
    candidate: &str,
    config: &BleuConfig,
) -> Result<f64, ComputationError> {
    let weights = config.checked_weights()?;
    let reference: Vec<&str> = reference.split_whitespace().collect();
    let candidate: Vec<&str> = candidate.split_whitespace().collect();
    Ok(sentence_bleu(
        &reference,
        &candidate,
        &weights,
        config.smoothing(),
    )?)
}
