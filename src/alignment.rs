/*!
Levenshtein alignment between a reference sequence and a candidate sequence. Every operation
costs 1. The alignment is recovered from the dynamic programming table so that the
substitutions, deletions, insertions and hits can be counted, not only the distance. When only
the counts are needed, `ErrorCounts::between` keeps two rows of the table instead of all of them.
*/
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Edit operation transforming the reference into the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditOp {
    /// The tokens are identical (a hit).
    Equal,
    Substitute,
    /// A reference token is missing from the candidate.
    Delete,
    /// A candidate token is missing from the reference.
    Insert,
}

/// Counts of the operations of an alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorCounts {
    pub hits: usize,
    pub substitutions: usize,
    pub deletions: usize,
    pub insertions: usize,
}

impl ErrorCounts {
    /// S + D + I
    pub fn errors(&self) -> usize {
        self.substitutions + self.deletions + self.insertions
    }
    /// Length of the reference: H + S + D
    pub fn reference_len(&self) -> usize {
        self.hits + self.substitutions + self.deletions
    }
    /// Length of the candidate: H + S + I
    pub fn candidate_len(&self) -> usize {
        self.hits + self.substitutions + self.insertions
    }
    /// H + S + D + I
    pub fn aligned_len(&self) -> usize {
        self.hits + self.errors()
    }

    /// Counts of the minimal alignment of `reference` and `candidate`, the same as
    /// `Alignment::new(reference, candidate).counts()`. Only two rows of the dynamic programming
    /// table are kept, each cell holding the counts of its best path, so the memory is linear in
    /// the length of the candidate.
    pub fn between<T: PartialEq>(reference: &[T], candidate: &[T]) -> Self {
        let mut previous: Vec<ErrorCounts> = (0..=candidate.len())
            .map(|j| ErrorCounts {
                insertions: j,
                ..Default::default()
            })
            .collect();
        let mut current = previous.clone();
        for (i, reference_token) in reference.iter().enumerate() {
            current[0] = ErrorCounts {
                deletions: i + 1,
                ..Default::default()
            };
            for (j, candidate_token) in candidate.iter().enumerate() {
                let mut diagonal = previous[j];
                if reference_token == candidate_token {
                    diagonal.hits += 1;
                } else {
                    diagonal.substitutions += 1;
                }
                let mut deletion = previous[j + 1];
                deletion.deletions += 1;
                let mut insertion = current[j];
                insertion.insertions += 1;
                // Same preference as the backtrace of `Alignment::new`.
                let mut best = diagonal;
                if deletion.errors() < best.errors() {
                    best = deletion;
                }
                if insertion.errors() < best.errors() {
                    best = insertion;
                }
                current[j + 1] = best;
            }
            std::mem::swap(&mut previous, &mut current);
        }
        previous[candidate.len()]
    }
}

impl Display for ErrorCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "hits: {}, substitutions: {}, deletions: {}, insertions: {}",
            self.hits, self.substitutions, self.deletions, self.insertions
        )
    }
}

/// Minimal alignment of two sequences, as a list of `EditOp`s in reading order.
///
/// When many alignments have the minimal cost, the backtrace prefers (from the end of the
/// sequences) a match or a substitution, then a deletion, then an insertion.
///
/// # Example
/// ```rust
/// use textscore::{Alignment, EditOp};
///
/// let alignment = Alignment::new(&["a", "b", "c"], &["a", "x", "c", "d"]);
/// assert_eq!(
///     alignment.ops(),
///     &[EditOp::Equal, EditOp::Substitute, EditOp::Equal, EditOp::Insert]
/// );
/// assert_eq!(alignment.distance(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Alignment {
    ops: Vec<EditOp>,
}

impl Alignment {
    pub fn new<T: PartialEq>(reference: &[T], candidate: &[T]) -> Self {
        let table = distance_table(reference, candidate);
        let (mut i, mut j) = (reference.len(), candidate.len());
        let mut ops = Vec::with_capacity(i.max(j));
        while i > 0 || j > 0 {
            if i > 0 && j > 0 {
                let cost = usize::from(reference[i - 1] != candidate[j - 1]);
                if table[[i, j]] == table[[i - 1, j - 1]] + cost {
                    ops.push(if cost == 0 {
                        EditOp::Equal
                    } else {
                        EditOp::Substitute
                    });
                    i -= 1;
                    j -= 1;
                    continue;
                }
            }
            if i > 0 && table[[i, j]] == table[[i - 1, j]] + 1 {
                ops.push(EditOp::Delete);
                i -= 1;
            } else {
                ops.push(EditOp::Insert);
                j -= 1;
            }
        }
        ops.reverse();
        Self { ops }
    }

    pub fn ops(&self) -> &[EditOp] {
        &self.ops
    }

    pub fn counts(&self) -> ErrorCounts {
        self.ops
            .iter()
            .fold(ErrorCounts::default(), |mut counts, op| {
                match op {
                    EditOp::Equal => counts.hits += 1,
                    EditOp::Substitute => counts.substitutions += 1,
                    EditOp::Delete => counts.deletions += 1,
                    EditOp::Insert => counts.insertions += 1,
                };
                counts
            })
    }

    /// Levenshtein distance: number of operations other than `EditOp::Equal`.
    pub fn distance(&self) -> usize {
        self.ops.iter().filter(|op| **op != EditOp::Equal).count()
    }
}

/// Dynamic programming table. `table[[i, j]]` is the edit distance between the first `i` tokens of
/// the reference and the first `j` tokens of the candidate.
fn distance_table<T: PartialEq>(reference: &[T], candidate: &[T]) -> Array2<usize> {
    let (n, m) = (reference.len(), candidate.len());
    let mut table = Array2::<usize>::zeros((n + 1, m + 1));
    for i in 0..=n {
        table[[i, 0]] = i;
    }
    for j in 0..=m {
        table[[0, j]] = j;
    }
    for i in 1..=n {
        for j in 1..=m {
            let cost = usize::from(reference[i - 1] != candidate[j - 1]);
            table[[i, j]] = (table[[i - 1, j - 1]] + cost)
                .min(table[[i - 1, j]] + 1)
                .min(table[[i, j - 1]] + 1);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{QuickCheck, TestResult};
    use rstest::rstest;

    fn counts(reference: &str, candidate: &str) -> ErrorCounts {
        let r: Vec<&str> = reference.split_whitespace().collect();
        let c: Vec<&str> = candidate.split_whitespace().collect();
        Alignment::new(&r, &c).counts()
    }

    #[rstest]
    #[case("a b c", "a b c", ErrorCounts { hits: 3, substitutions: 0, deletions: 0, insertions: 0 })]
    #[case("a", "a b c d", ErrorCounts { hits: 1, substitutions: 0, deletions: 0, insertions: 3 })]
    #[case("a b c", "", ErrorCounts { hits: 0, substitutions: 0, deletions: 3, insertions: 0 })]
    #[case("", "a b", ErrorCounts { hits: 0, substitutions: 0, deletions: 0, insertions: 2 })]
    #[case("a b c d", "a x c", ErrorCounts { hits: 2, substitutions: 1, deletions: 1, insertions: 0 })]
    #[case("a b", "b a", ErrorCounts { hits: 0, substitutions: 2, deletions: 0, insertions: 0 })]
    fn test_counts(#[case] reference: &str, #[case] candidate: &str, #[case] expected: ErrorCounts) {
        assert_eq!(counts(reference, candidate), expected);
    }

    #[test]
    fn test_kitten_sitting() {
        let reference: Vec<char> = "kitten".chars().collect();
        let candidate: Vec<char> = "sitting".chars().collect();
        let alignment = Alignment::new(&reference, &candidate);
        assert_eq!(alignment.distance(), 3);
        assert_eq!(
            alignment.counts(),
            ErrorCounts {
                hits: 4,
                substitutions: 2,
                deletions: 0,
                insertions: 1
            }
        );
    }

    #[test]
    fn test_empty_sequences() {
        let empty: [&str; 0] = [];
        let alignment = Alignment::new(&empty, &empty);
        assert!(alignment.ops().is_empty());
        assert_eq!(alignment.counts(), ErrorCounts::default());
    }

    #[test]
    fn test_ops_order() {
        let alignment = Alignment::new(&["x", "a", "b"], &["a", "b", "y"]);
        assert_eq!(
            alignment.ops(),
            &[EditOp::Delete, EditOp::Equal, EditOp::Equal, EditOp::Insert]
        );
    }

    #[test]
    fn test_counts_are_consistent_with_lengths() {
        fn consistent(reference: Vec<u8>, candidate: Vec<u8>) -> TestResult {
            if reference.len() > 40 || candidate.len() > 40 {
                return TestResult::discard();
            }
            // Small alphabet to get hits.
            let reference: Vec<u8> = reference.into_iter().map(|b| b % 4).collect();
            let candidate: Vec<u8> = candidate.into_iter().map(|b| b % 4).collect();
            let alignment = Alignment::new(&reference, &candidate);
            let counts = alignment.counts();
            let table = distance_table(&reference, &candidate);
            TestResult::from_bool(
                counts.reference_len() == reference.len()
                    && counts.candidate_len() == candidate.len()
                    && counts.errors() == alignment.distance()
                    && alignment.distance() == table[[reference.len(), candidate.len()]],
            )
        }
        let mut qc = QuickCheck::new().tests(1000);
        qc.quickcheck(consistent as fn(reference: Vec<u8>, candidate: Vec<u8>) -> TestResult)
    }

    #[rstest]
    #[case("a b c", "a b c")]
    #[case("a", "a b c d")]
    #[case("a b c", "")]
    #[case("", "a b")]
    #[case("", "")]
    #[case("a b c d", "a x c")]
    #[case("a b", "b a")]
    #[case("x a b", "a b y")]
    fn test_between_matches_alignment(#[case] reference: &str, #[case] candidate: &str) {
        let r: Vec<&str> = reference.split_whitespace().collect();
        let c: Vec<&str> = candidate.split_whitespace().collect();
        assert_eq!(ErrorCounts::between(&r, &c), Alignment::new(&r, &c).counts());
    }

    #[test]
    fn test_between_is_the_alignment_counts() {
        fn same_counts(reference: Vec<u8>, candidate: Vec<u8>) -> TestResult {
            if reference.len() > 40 || candidate.len() > 40 {
                return TestResult::discard();
            }
            let reference: Vec<u8> = reference.into_iter().map(|b| b % 3).collect();
            let candidate: Vec<u8> = candidate.into_iter().map(|b| b % 3).collect();
            TestResult::from_bool(
                ErrorCounts::between(&reference, &candidate)
                    == Alignment::new(&reference, &candidate).counts(),
            )
        }
        let mut qc = QuickCheck::new().tests(1000);
        qc.quickcheck(same_counts as fn(reference: Vec<u8>, candidate: Vec<u8>) -> TestResult)
    }

    #[test]
    fn test_between_long_sequences() {
        let reference: Vec<u32> = (0..3_000).map(|i| i % 26).collect();
        let candidate: Vec<u32> = (0..3_000)
            .map(|i| if i % 10 == 0 { 99 } else { i % 26 })
            .collect();
        let counts = ErrorCounts::between(&reference, &candidate);
        assert_eq!(counts.substitutions, 300);
        assert_eq!(counts.hits, 2_700);
        assert_eq!(counts.errors(), 300);
    }
}
