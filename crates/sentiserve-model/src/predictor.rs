//! Online prediction over the cached pipeline.

use std::path::PathBuf;

use sentiserve_core::{Error, Label, Prediction, Result};

use crate::cache::ModelCache;

/// Synchronous single-text predictor.
///
/// For a fixed trained artifact, `predict` is a pure function of its
/// input: identical text always yields the identical label and score
/// within the process lifetime. One text in, one result out; no
/// batching, no queuing.
pub struct Predictor {
    cache: ModelCache,
}

impl Predictor {
    /// Predictor over the artifact at `model_path`. The artifact is
    /// not touched until the first prediction.
    pub fn new(model_path: impl Into<PathBuf>) -> Self {
        Self {
            cache: ModelCache::new(model_path),
        }
    }

    pub fn from_cache(cache: ModelCache) -> Self {
        Self { cache }
    }

    /// Predict the sentiment of a single text.
    ///
    /// Whitespace-only input is rejected before any inference. The
    /// returned score is the probability of the winning class; an
    /// exact tie predicts negative.
    pub fn predict(&self, text: &str) -> Result<Prediction> {
        if text.trim().is_empty() {
            return Err(Error::invalid_input("text must be a non-empty string"));
        }

        let pipeline = self.cache.get_or_load()?;
        let probs = pipeline.predict_proba(text);
        let (index, score) = if probs[1] > probs[0] {
            (1, probs[1])
        } else {
            (0, probs[0])
        };
        let label = Label::from_index(index)
            .ok_or_else(|| Error::internal(format!("no label for class index {index}")))?;
        Ok(Prediction { label, score })
    }

    pub fn cache(&self) -> &ModelCache {
        &self.cache
    }
}
