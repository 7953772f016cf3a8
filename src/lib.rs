/*!
Text-similarity metrics scoring a candidate text against a reference text. It is built with a
focus on exactness (the scores match the usual reference implementations) and on speed.
# METRICS
* BLEU: geometric mean of the modified n-gram precisions (unigrams to 4-grams), multiplied by a
    brevity penalty. The texts are only split on whitespace. By default, the precisions above the
    unigrams are smoothed by adding 1 to their numerator and their denominator. Higher is better.
* WER: word error rate, `(S + D + I) / N` where `S`, `D` and `I` are the substitutions, deletions
    and insertions of the minimal alignment of the words and `N` the number of reference words.
    It can be greater than 1.
* CER: character error rate, the WER computed on the characters of the words. The whitespace
    between the words is not counted.
* MER: match error rate, `(S + D + I) / (H + S + D + I)` where `H` is the number of hits. It is
    always in [0, 1].

# NORMALIZATION
Before computing WER, CER and MER, both texts go through a `Pipeline`. The default one expands
the common English contractions, drops empty texts, lowercases, collapses repeated whitespace,
strips, removes the punctuation and splits the text into words. A reference that is empty after
normalization is an error (`ComputationError::EmptyReference`): the rate is undefined.

# Terminology
* The reference is the expected text, the candidate is the text being scored (a translation, a
    transcription, ...).
* A segment is one input text inside the normalization pipeline. The pipeline outputs a list of
    segments, each being a list of words.
*/

mod alignment;
mod bleu;
mod config;
mod datastructure;
mod metrics;
mod normalize;
mod reporter;

// The public api starts here
pub use alignment::{Alignment, EditOp, ErrorCounts};

pub use bleu::{Smoothing, DEFAULT_WEIGHTS, MAX_ORDER};

pub use config::{BleuConfig, BleuConfigBuilder, WeightValueError, WeightsLengthError};

pub use datastructure::{Segments, SegmentsIter};

pub use metrics::{
    bleu, bleu_conf, cer, cer_conf, measures, mer, mer_conf, wer, wer_conf, AlignmentMeasures,
    ComputationError, DivisionByZeroError,
};

pub use normalize::{ParsingTransformError, Pipeline, Transform};

pub use reporter::{evaluate, Scores};
