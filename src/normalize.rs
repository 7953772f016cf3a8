/*!
Normalization applied to the reference and the candidate before computing the edit-distance
metrics (WER, CER and MER). A `Pipeline` is an ordered list of `Transform`s working on a list of
segments (one segment per input string). The last step of every pipeline reduces the segments
into lists of words.
*/
use crate::datastructure::Segments;
use enum_iterator::{all, Sequence};
use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::OnceLock;

/// Contractions are expanded in this order. The matching is case-sensitive and happens before
/// lowercasing, which is why `Won't` becomes `Wo not`.
const CONTRACTIONS: [(&str, &str); 11] = [
    ("won't", "will not"),
    ("can't", "can not"),
    ("let's", "let us"),
    ("n't", " not"),
    ("'re", " are"),
    ("'s", " is"),
    ("'d", " would"),
    ("'ll", " will"),
    ("'t", " not"),
    ("'ve", " have"),
    ("'m", " am"),
];

fn multiple_spaces_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s\s+").expect("the whitespace pattern is a valid regex"))
}

fn punctuation_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\p{P}").expect("the punctuation pattern is a valid regex"))
}

/// A single step of the normalization pipeline. The declaration order is the order of the
/// default pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Sequence, Serialize, Deserialize)]
pub enum Transform {
    /// Expands common English contractions, such as `don't` into `do not`.
    ExpandCommonEnglishContractions,
    /// Drops the segments containing nothing but whitespace.
    RemoveEmptyStrings,
    ToLowerCase,
    /// Replaces every run of at least two whitespace characters by a single space.
    RemoveMultipleSpaces,
    /// Removes leading and trailing whitespace.
    Strip,
    /// Removes the characters of the Unicode punctuation category. Nothing is inserted in their
    /// place: `"hello,world"` becomes `"helloworld"`.
    RemovePunctuation,
}

impl Transform {
    fn apply_str(&self, s: String) -> String {
        match self {
            Self::ExpandCommonEnglishContractions => CONTRACTIONS
                .iter()
                .fold(s, |acc, (from, to)| acc.replace(from, to)),
            Self::RemoveEmptyStrings => s,
            Self::ToLowerCase => s.to_lowercase(),
            Self::RemoveMultipleSpaces => multiple_spaces_regex().replace_all(&s, " ").into_owned(),
            Self::Strip => s.trim().to_string(),
            Self::RemovePunctuation => punctuation_regex().replace_all(&s, "").into_owned(),
        }
    }

    /// Applies the transform to every segment.
    pub fn apply(&self, segments: Vec<String>) -> Vec<String> {
        match self {
            Self::RemoveEmptyStrings => segments
                .into_iter()
                .filter(|s| !s.trim().is_empty())
                .collect(),
            _ => segments.into_iter().map(|s| self.apply_str(s)).collect(),
        }
    }
}

impl Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ExpandCommonEnglishContractions => "expand_common_english_contractions",
            Self::RemoveEmptyStrings => "remove_empty_strings",
            Self::ToLowerCase => "to_lower_case",
            Self::RemoveMultipleSpaces => "remove_multiple_spaces",
            Self::Strip => "strip",
            Self::RemovePunctuation => "remove_punctuation",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingTransformError(String);

impl Display for ParsingTransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not parse the {} into a `Transform`", self.0)
    }
}

impl Error for ParsingTransformError {}

/// Parsing ignores the case, the underscores and the dashes: `to_lower_case`, `ToLowerCase` and
/// `to-lower-case` are all accepted.
impl FromStr for Transform {
    type Err = ParsingTransformError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        all::<Transform>()
            .find(|t| t.to_string().replace('_', "") == key)
            .ok_or_else(|| ParsingTransformError(String::from(s)))
    }
}

/// Ordered and immutable list of transforms. The default pipeline contains every `Transform`, in
/// declaration order. Whatever the transforms are, the pipeline always finishes by splitting
/// each segment into words.
///
/// # Example
/// ```rust
/// use textscore::{Pipeline, Transform};
///
/// let pipeline = Pipeline::default();
/// let segments = pipeline.apply("Don't   STOP, now!");
/// let words: Vec<&str> = segments.iter().map(String::as_str).collect();
/// assert_eq!(words, vec!["do", "not", "stop", "now"]);
///
/// let custom: Pipeline = [Transform::ToLowerCase].into_iter().collect();
/// let words: Vec<Vec<String>> = custom.apply("Don't STOP").into();
/// assert_eq!(words, vec![vec!["don't".to_string(), "stop".to_string()]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pipeline {
    transforms: Vec<Transform>,
}

impl Default for Pipeline {
    fn default() -> Self {
        all::<Transform>().collect()
    }
}

impl FromIterator<Transform> for Pipeline {
    fn from_iter<T: IntoIterator<Item = Transform>>(iter: T) -> Self {
        Self {
            transforms: iter.into_iter().collect(),
        }
    }
}

impl Pipeline {
    pub fn new(transforms: Vec<Transform>) -> Self {
        Self { transforms }
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Normalizes a single text. The outer list of the result has at most one segment; it is
    /// empty when the text is dropped by `Transform::RemoveEmptyStrings`.
    pub fn apply(&self, text: &str) -> Segments {
        self.apply_segments(vec![String::from(text)])
    }

    pub(crate) fn apply_segments(&self, segments: Vec<String>) -> Segments {
        let transformed = self
            .transforms
            .iter()
            .fold(segments, |acc, transform| transform.apply(acc));
        let words: Vec<Vec<String>> = transformed
            .into_iter()
            .map(|s| s.split_whitespace().map(String::from).collect())
            .collect();
        Segments::from(words)
    }
}

impl Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let steps = self
            .transforms
            .iter()
            .map(|t| t.to_string())
            .chain(std::iter::once(String::from("reduce_to_list_of_list_of_words")))
            .join(" -> ");
        write!(f, "{}", steps)
    }
}
