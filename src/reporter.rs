/**
This modules gives a tool to prettyprint every score of a single reference/candidate pair.
*/
use crate::metrics::{bleu, cer, mer, wer, ComputationError};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The scores of a candidate against its reference. It can be displayed as if it was collected
/// into a dataframe, or serialized. It is built with the `evaluate` function.
///
/// # Example
///
/// ```rust
/// use textscore::evaluate;
///
/// let scores = evaluate("the cat sat on the mat", "the cat sat on the mat").unwrap();
///
/// let expected_report = "Metric, Score
/// BLEU, 1
/// WER, 0
/// CER, 0
/// MER, 0\n";
///
/// assert_eq!(expected_report, scores.to_string());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    /// BLEU score, higher is better
    pub bleu: f64,
    /// Word error rate, lower is better
    pub wer: f64,
    /// Character error rate, lower is better
    pub cer: f64,
    /// Match error rate, lower is better
    pub mer: f64,
}

/// The Scores struct acts as a dataframe when displayed.
impl Display for Scores {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Metric, Score")?;
        writeln!(f, "BLEU, {}", self.bleu)?;
        writeln!(f, "WER, {}", self.wer)?;
        writeln!(f, "CER, {}", self.cer)?;
        writeln!(f, "MER, {}", self.mer)
    }
}

/// Computes the four metrics of the candidate with their default parameters. Fails if the
/// reference is empty after normalization.
pub fn evaluate(reference: &str, candidate: &str) -> Result<Scores, ComputationError> {
    Ok(Scores {
        bleu: bleu(reference, candidate)?,
        wer: wer(reference, candidate)?,
        cer: cer(reference, candidate)?,
        mer: mer(reference, candidate)?,
    })
}
