/*
 * This modules contains the `BleuConfig` struct, which implements the default trait, and its
 * builder. The config can be passed to the `bleu_conf` function to change the weights of the
 * n-gram orders or the smoothing function.
*/
use crate::bleu::{Smoothing, DEFAULT_WEIGHTS, MAX_ORDER};
use crate::metrics::ComputationError;
use either::Either as LeftOrRight;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The BLEU weights must hold exactly one weight per n-gram order.
pub struct WeightsLengthError(pub(crate) usize);

impl Display for WeightsLengthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expected {} BLEU weights (one per n-gram order), got {}",
            MAX_ORDER, self.0
        )
    }
}
impl Error for WeightsLengthError {}

#[derive(Debug, Clone, Copy, PartialEq)]
/// A BLEU weight is negative, infinite or NaN.
pub struct WeightValueError {
    pub(crate) order: usize,
    pub(crate) value: f64,
}

impl Display for WeightValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The BLEU weight of the {}-grams must be finite and non-negative, got {}",
            self.order, self.value
        )
    }
}
impl Error for WeightValueError {}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
/// Parameters of the BLEU score. The weights are stored as given; their length and their values
/// are checked when the score is computed.
pub struct BleuConfig {
    /// Weight of the unigrams, bigrams, trigrams and 4-grams precisions. They are usually
    /// non-negative and sum to 1.
    pub(crate) weights: Vec<f64>,
    /// Smoothing used when some precisions are zero.
    pub(crate) smoothing: Smoothing,
}

impl Default for BleuConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS.to_vec(),
            smoothing: Smoothing::default(),
        }
    }
}

impl BleuConfig {
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn smoothing(&self) -> Smoothing {
        self.smoothing
    }

    /// Returns the weights as a fixed-size array, or an error if there are not exactly
    /// `MAX_ORDER` of them or if one of them is negative or not finite.
    pub(crate) fn checked_weights(&self) -> Result<[f64; MAX_ORDER], ComputationError> {
        let weights = <[f64; MAX_ORDER]>::try_from(self.weights.as_slice())
            .map_err(|_| WeightsLengthError(self.weights.len()))?;
        if let Some((index, value)) = weights
            .iter()
            .enumerate()
            .find(|(_, w)| !w.is_finite() || **w < 0.0)
        {
            return Err(WeightValueError {
                order: index + 1,
                value: *value,
            }
            .into());
        }
        Ok(weights)
    }
}

impl Display for BleuConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Weights of the n-gram orders: {:?}\n Smoothing function: {:?}",
            self.weights, self.smoothing
        )
    }
}

/// This builder can be used to build and customize a `BleuConfig` structure.
pub struct BleuConfigBuilder {
    weights: LeftOrRight<Vec<f64>, [f64; MAX_ORDER]>,
    smoothing: Smoothing,
}

impl Default for BleuConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BleuConfigBuilder {
    pub fn new() -> Self {
        Self {
            weights: LeftOrRight::Right(DEFAULT_WEIGHTS),
            smoothing: Smoothing::default(),
        }
    }
    pub fn weights<W: Into<Vec<f64>>>(mut self, weights: W) -> Self {
        self.weights = LeftOrRight::Left(weights.into());
        self
    }
    pub fn smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }
    pub fn build(self) -> BleuConfig {
        BleuConfig {
            weights: self.weights.either(|given| given, |default| default.to_vec()),
            smoothing: self.smoothing,
        }
    }
}
