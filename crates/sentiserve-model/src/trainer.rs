//! Offline training: load -> split -> fit -> evaluate -> refit -> persist.
//!
//! Metrics come from a model fitted on the train partition and scored
//! on the held-out partition; the persisted artifact is then refitted
//! on the full dataset so its vocabulary covers every labeled example.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sentiserve_core::Result;
use tracing::info;

use crate::dataset::Dataset;
use crate::evaluation::ClassificationReport;
use crate::pipeline::SentimentPipeline;

pub const MODEL_FILE: &str = "sentiment_model.json";
pub const METRICS_FILE: &str = "metrics.json";

/// Training configuration. Defaults give the fixed relative layout:
/// dataset at `data/sentiment.csv`, outputs under `model/`.
#[derive(Debug, Clone)]
pub struct TrainerConfig {
    /// Optional external dataset; the fallback corpus is used when
    /// this file does not exist.
    pub data_path: PathBuf,
    /// Directory receiving the artifact and the metrics record.
    pub model_dir: PathBuf,
    pub test_ratio: f64,
    pub seed: u64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/sentiment.csv"),
            model_dir: PathBuf::from("model"),
            test_ratio: 0.2,
            seed: 42,
        }
    }
}

impl TrainerConfig {
    pub fn with_model_dir(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Self::default()
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(MODEL_FILE)
    }

    pub fn metrics_path(&self) -> PathBuf {
        self.model_dir.join(METRICS_FILE)
    }
}

/// Metrics record written next to the artifact; for human inspection,
/// never read back by the predictor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingMetrics {
    pub accuracy: f64,
    pub report: String,
}

/// What a training run produced.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub accuracy: f64,
    pub report: String,
    pub model_path: PathBuf,
    pub metrics_path: PathBuf,
    pub train_size: usize,
    pub test_size: usize,
}

/// Train the pipeline and persist the artifact plus metrics.
///
/// Dataset validation failures abort before anything is written;
/// there is no retry and no silent fallback for a malformed file.
pub fn train(config: &TrainerConfig) -> Result<TrainingOutcome> {
    let data = Dataset::load(&config.data_path)?;
    let (train_set, test_set) = data.stratified_split(config.test_ratio, config.seed);
    info!(
        train = train_set.len(),
        test = test_set.len(),
        "fitting pipeline"
    );

    let held_out_model = SentimentPipeline::fit(&train_set.texts, &train_set.labels);

    let predicted: Vec<u8> = test_set
        .texts
        .iter()
        .map(|text| held_out_model.predict(text))
        .collect();
    let report = ClassificationReport::compute(&predicted, &test_set.labels);
    let rendered = report.render();

    // The persisted model is refitted on the full dataset; the metrics
    // above always describe the held-out evaluation.
    let pipeline = SentimentPipeline::fit(&data.texts, &data.labels);

    fs::create_dir_all(&config.model_dir)?;
    let model_path = config.model_path();
    write_json(&model_path, &pipeline)?;
    let metrics_path = config.metrics_path();
    write_json(
        &metrics_path,
        &TrainingMetrics {
            accuracy: report.accuracy,
            report: rendered.clone(),
        },
    )?;

    info!(
        accuracy = report.accuracy,
        model = %model_path.display(),
        "training complete"
    );
    Ok(TrainingOutcome {
        accuracy: report.accuracy,
        report: rendered,
        model_path,
        metrics_path,
        train_size: train_set.len(),
        test_size: test_set.len(),
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}
