//! Word-level TF-IDF vectorization with unigram+bigram features.
//!
//! Feature indices are assigned by sorting the vocabulary, so a fixed
//! training corpus always produces the same feature space.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// A sparse feature row: (feature index, weight), sorted by index.
pub type SparseRow = Vec<(usize, f64)>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerParams {
    /// Inclusive n-gram range, e.g. (1, 2) for unigrams + bigrams.
    pub ngram_range: (usize, usize),
    /// Minimum document frequency (absolute count) for a term.
    pub min_df: usize,
    /// Maximum document frequency as a proportion of documents.
    pub max_df: f64,
}

impl Default for VectorizerParams {
    fn default() -> Self {
        Self {
            ngram_range: (1, 2),
            min_df: 1,
            max_df: 0.95,
        }
    }
}

/// TF-IDF vectorizer: term counts weighted by smoothed inverse
/// document frequency, L2-normalized per document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    params: VectorizerParams,
    vocab: HashMap<String, usize>,
    idf: Vec<f64>,
}

/// Function words carrying no sentiment signal. Sorted for binary
/// search. Negations ("not", "no") and intensifiers ("very") are kept
/// on purpose.
const STOP_WORDS: &[&str] = &[
    "am", "an", "and", "are", "at", "be", "been", "but", "by", "did", "do",
    "does", "for", "had", "has", "have", "he", "her", "his", "in", "is", "it",
    "its", "me", "my", "of", "on", "or", "our", "she", "so", "that", "the",
    "their", "them", "these", "they", "this", "those", "to", "too", "ve",
    "was", "we", "were", "with", "you", "your",
];

/// Lowercase word tokens: maximal alphanumeric runs of length >= 2,
/// minus stop words.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|tok| tok.chars().count() >= 2)
        .filter(|tok| STOP_WORDS.binary_search(tok).is_err())
        .map(str::to_string)
        .collect()
}

/// Count n-grams of each size in the range, keyed by the
/// space-joined token sequence.
fn count_ngrams(tokens: &[String], range: (usize, usize)) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for n in range.0..=range.1 {
        if n == 0 || n > tokens.len() {
            continue;
        }
        for window in tokens.windows(n) {
            *counts.entry(window.join(" ")).or_insert(0) += 1;
        }
    }
    counts
}

impl TfidfVectorizer {
    /// Build the vocabulary and idf table from the training corpus.
    pub fn fit<T: AsRef<str>>(texts: &[T], params: VectorizerParams) -> Self {
        debug!(num_texts = texts.len(), "fitting TfidfVectorizer");
        let n_docs = texts.len();

        // Document frequency per term.
        let mut df: HashMap<String, usize> = HashMap::new();
        for text in texts {
            let tokens = tokenize(text.as_ref());
            for term in count_ngrams(&tokens, params.ngram_range).into_keys() {
                *df.entry(term).or_insert(0) += 1;
            }
        }

        // min_df is an absolute count, max_df a proportion of docs.
        let max_count = (params.max_df * n_docs as f64).floor() as usize;
        let mut terms: Vec<(String, usize)> = df
            .into_iter()
            .filter(|(_, count)| *count >= params.min_df && *count <= max_count.max(1))
            .collect();
        terms.sort_by(|a, b| a.0.cmp(&b.0));

        let mut vocab = HashMap::with_capacity(terms.len());
        let mut idf = Vec::with_capacity(terms.len());
        for (index, (term, doc_freq)) in terms.into_iter().enumerate() {
            // Smoothed idf: ln((n + 1) / (df + 1)) + 1
            idf.push(((n_docs as f64 + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0);
            vocab.insert(term, index);
        }

        debug!(vocab_size = vocab.len(), "TfidfVectorizer fit complete");
        Self { params, vocab, idf }
    }

    /// Transform one document into a sorted, L2-normalized sparse row.
    /// Terms outside the training vocabulary are dropped.
    pub fn transform(&self, text: &str) -> SparseRow {
        let tokens = tokenize(text);
        let counts = count_ngrams(&tokens, self.params.ngram_range);

        let mut row: SparseRow = counts
            .into_iter()
            .filter_map(|(term, count)| {
                self.vocab
                    .get(&term)
                    .map(|&index| (index, count as f64 * self.idf[index]))
            })
            .collect();
        row.sort_unstable_by_key(|(index, _)| *index);

        let norm = row.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, v) in &mut row {
                *v /= norm;
            }
        }
        row
    }

    /// Transform a batch of documents.
    pub fn transform_batch<T: AsRef<str>>(&self, texts: &[T]) -> Vec<SparseRow> {
        texts.iter().map(|t| self.transform(t.as_ref())).collect()
    }

    pub fn num_features(&self) -> usize {
        self.vocab.len()
    }

    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocab
    }
}
