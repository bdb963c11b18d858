//! End-to-end lifecycle: train on the fallback corpus, then serve
//! predictions from the persisted artifact.

use sentiserve_core::{Error, Label};
use sentiserve_model::{train, Predictor, TrainerConfig};

fn fallback_config(dir: &std::path::Path) -> TrainerConfig {
    TrainerConfig {
        // No file at this path, so training uses the fallback corpus.
        data_path: dir.join("sentiment.csv"),
        model_dir: dir.join("model"),
        ..TrainerConfig::default()
    }
}

#[test]
fn train_then_predict_known_examples() {
    let dir = tempfile::tempdir().unwrap();
    let config = fallback_config(dir.path());
    let outcome = train(&config).unwrap();
    assert!(outcome.model_path.exists());

    let predictor = Predictor::new(outcome.model_path);

    let pred = predictor.predict("I absolutely love this!").unwrap();
    assert_eq!(pred.label, Label::Positive);
    assert!(pred.score >= 0.5);

    let pred = predictor.predict("This is terrible and I hate it.").unwrap();
    assert_eq!(pred.label, Label::Negative);
    assert!(pred.score >= 0.5);
}

#[test]
fn predictions_are_stable_across_predictor_instances() {
    let dir = tempfile::tempdir().unwrap();
    let config = fallback_config(dir.path());
    let outcome = train(&config).unwrap();

    let a = Predictor::new(&outcome.model_path);
    let b = Predictor::new(&outcome.model_path);
    let text = "works perfectly, really happy";
    assert_eq!(a.predict(text).unwrap(), b.predict(text).unwrap());
}

#[test]
fn two_training_runs_agree_on_accuracy() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();
    let first = train(&fallback_config(dir_a.path())).unwrap();
    let second = train(&fallback_config(dir_b.path())).unwrap();
    assert_eq!(first.accuracy, second.accuracy);
}

#[test]
fn csv_dataset_overrides_the_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let data_path = dir.path().join("sentiment.csv");
    let mut rows = String::from("text,label\n");
    for _ in 0..6 {
        rows.push_str("\"the film was superb and delightful\",1\n");
        rows.push_str("\"the film was dreadful and boring\",0\n");
    }
    std::fs::write(&data_path, rows).unwrap();

    let config = TrainerConfig {
        data_path,
        model_dir: dir.path().join("model"),
        ..TrainerConfig::default()
    };
    let outcome = train(&config).unwrap();
    assert_eq!(outcome.train_size + outcome.test_size, 12);

    let predictor = Predictor::new(outcome.model_path);
    let pred = predictor.predict("superb and delightful").unwrap();
    assert_eq!(pred.label, Label::Positive);
}

#[test]
fn serving_without_training_reports_not_found_every_time() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = Predictor::new(dir.path().join("model").join("sentiment_model.json"));
    for _ in 0..3 {
        let err = predictor.predict("anything at all").unwrap_err();
        assert!(matches!(err, Error::ModelNotFound { .. }));
    }
}

#[test]
fn concurrent_first_predictions_share_one_load() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = train(&fallback_config(dir.path())).unwrap();
    let predictor = std::sync::Arc::new(Predictor::new(outcome.model_path));

    let handles: Vec<_> = (0..12)
        .map(|_| {
            let predictor = std::sync::Arc::clone(&predictor);
            std::thread::spawn(move || predictor.predict("great value").unwrap())
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(predictor.cache().load_count(), 1);
}
