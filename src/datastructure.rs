use serde::{Deserialize, Serialize};
use std::slice::Iter;

/// List of lists of words, stored flat to keep every word of a text in a single allocation.
/// The outer list holds the segments of the normalized input and the inner lists hold the words
/// of each segment. `indices` holds the boundaries of the segments: segment `k` spans
/// `tokens[indices[k]..indices[k + 1]]`.
#[derive(Debug, Eq, PartialEq, Hash, Clone, Serialize, Deserialize)]
pub struct Segments {
    pub(crate) tokens: Box<[String]>,
    pub(crate) indices: Box<[usize]>,
}

impl Default for Segments {
    fn default() -> Self {
        Self {
            tokens: Box::new([]),
            indices: Box::new([0]),
        }
    }
}

impl Segments {
    pub fn new(segments: Vec<Vec<String>>) -> Self {
        Self::from(segments)
    }

    /// Number of words, all segments included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if there is no word at all. There can still be segments, if they are
    /// empty.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of segments in the outer list.
    pub fn n_segments(&self) -> usize {
        self.indices.len().saturating_sub(1)
    }

    /// Iterates over every word, segment after segment.
    pub fn iter(&self) -> Iter<'_, String> {
        self.tokens.iter()
    }

    /// Iterates over the segments.
    pub fn iter_segments(&self) -> SegmentsIter<'_> {
        SegmentsIter {
            segments: self,
            position: 0,
        }
    }

    /// Text view of the words: the words are joined by a single space.
    pub fn joined(&self) -> String {
        self.tokens.join(" ")
    }

    /// Iterates over the characters of every word, as `&str` slices. The separators between the
    /// words are not characters of the segments.
    pub fn characters(&self) -> impl Iterator<Item = &str> + '_ {
        self.tokens.iter().flat_map(|word| {
            word.char_indices()
                .map(move |(i, c)| &word[i..i + c.len_utf8()])
        })
    }
}

impl From<Vec<Vec<String>>> for Segments {
    fn from(value: Vec<Vec<String>>) -> Self {
        let length: usize = value.iter().map(|v| v.len()).sum();
        let mut flattened = Vec::with_capacity(length);
        let mut indices = Vec::with_capacity(value.len() + 1);
        indices.push(0);
        for vec in value.into_iter() {
            flattened.extend(vec);
            indices.push(flattened.len());
        }
        Self {
            tokens: flattened.into_boxed_slice(),
            indices: indices.into_boxed_slice(),
        }
    }
}

impl From<Segments> for Vec<Vec<String>> {
    fn from(value: Segments) -> Self {
        value.iter_segments().map(|s| s.to_vec()).collect()
    }
}

pub struct SegmentsIter<'a> {
    segments: &'a Segments,
    position: usize,
}

impl<'a> Iterator for SegmentsIter<'a> {
    type Item = &'a [String];
    fn next(&mut self) -> Option<Self::Item> {
        let start = *self.segments.indices.get(self.position)?;
        let end = *self.segments.indices.get(self.position + 1)?;
        self.position += 1;
        self.segments.tokens.get(start..end)
    }
}
