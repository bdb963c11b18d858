//! Sentiserve Model
//!
//! Offline training and online serving of a binary sentiment
//! classifier. The trainer fits a TF-IDF + logistic regression
//! pipeline on a labeled corpus and persists it as a single JSON
//! artifact; the predictor lazily loads that artifact (at most one
//! successful load per process) and answers single-text predictions.
//!
//! Data flows one way: [`trainer::train`] writes the artifact,
//! [`Predictor`] reads it. There is no feedback loop and no shared
//! mutable state between requests beyond the cached model handle.

pub mod cache;
pub mod classifier;
pub mod dataset;
pub mod evaluation;
pub mod pipeline;
pub mod predictor;
pub mod trainer;
pub mod vectorizer;

pub use cache::ModelCache;
pub use classifier::LogisticRegression;
pub use dataset::Dataset;
pub use evaluation::ClassificationReport;
pub use pipeline::SentimentPipeline;
pub use predictor::Predictor;
pub use trainer::{train, TrainerConfig, TrainingOutcome};
pub use vectorizer::TfidfVectorizer;
