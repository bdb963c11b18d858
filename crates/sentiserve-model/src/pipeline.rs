//! The fitted pipeline persisted as a single artifact.
//!
//! Vectorizer and classifier are serialized together so inference
//! needs no separate feature-engineering step: the exact feature/label
//! contract used at training time travels with the weights.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::{LogisticRegression, TrainParams};
use crate::vectorizer::{TfidfVectorizer, VectorizerParams};

/// Text -> TF-IDF -> logistic regression (binary).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentimentPipeline {
    vectorizer: TfidfVectorizer,
    classifier: LogisticRegression,
}

impl SentimentPipeline {
    /// Fit the vectorizer on the training texts, then the classifier
    /// on the resulting feature rows.
    pub fn fit<T: AsRef<str>>(texts: &[T], labels: &[u8]) -> Self {
        debug!(num_texts = texts.len(), "fitting sentiment pipeline");
        let vectorizer = TfidfVectorizer::fit(texts, VectorizerParams::default());
        let rows = vectorizer.transform_batch(texts);
        let classifier = LogisticRegression::fit(
            &rows,
            labels,
            vectorizer.num_features(),
            &TrainParams::default(),
        );
        Self {
            vectorizer,
            classifier,
        }
    }

    /// Probability per class index for one text:
    /// `[P(negative), P(positive)]`.
    pub fn predict_proba(&self, text: &str) -> [f64; 2] {
        let row = self.vectorizer.transform(text);
        self.classifier.predict_proba(&row)
    }

    /// Hard class prediction; an exact tie goes to class 0.
    pub fn predict(&self, text: &str) -> u8 {
        let probs = self.predict_proba(text);
        u8::from(probs[1] > probs[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn fits_and_separates_the_fallback_corpus() {
        let data = Dataset::fallback();
        let pipeline = SentimentPipeline::fit(&data.texts, &data.labels);
        let correct = data
            .texts
            .iter()
            .zip(&data.labels)
            .filter(|(text, &label)| pipeline.predict(text) == label)
            .count();
        // On its own training data the pipeline should be near-perfect.
        assert!(correct >= data.len() - 1, "only {correct}/12 correct");
    }

    #[test]
    fn predict_proba_is_a_distribution() {
        let data = Dataset::fallback();
        let pipeline = SentimentPipeline::fit(&data.texts, &data.labels);
        let probs = pipeline.predict_proba("what a day");
        assert!((probs[0] + probs[1] - 1.0).abs() < 1e-12);
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
    }

    #[test]
    fn artifact_round_trip_preserves_predictions() {
        let data = Dataset::fallback();
        let pipeline = SentimentPipeline::fit(&data.texts, &data.labels);
        let json = serde_json::to_string(&pipeline).unwrap();
        let restored: SentimentPipeline = serde_json::from_str(&json).unwrap();
        for text in &data.texts {
            assert_eq!(pipeline.predict_proba(text), restored.predict_proba(text));
        }
    }
}
