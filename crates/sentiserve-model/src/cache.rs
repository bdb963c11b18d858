//! Lazy, thread-safe model loading.
//!
//! The cache is an explicit object constructed once at process start
//! and injected into whatever serves predictions. Once the slot is
//! populated, calls take only a read lock; the exclusive `load_lock`
//! is held during the initial load, so under concurrent first calls
//! exactly one thread reads and deserializes the artifact while the
//! rest block and then see the populated handle. A successful load is
//! permanent for the process; a missing file is reported on every call
//! until training creates it.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use sentiserve_core::{Error, Result};
use tracing::info;

use crate::pipeline::SentimentPipeline;

pub struct ModelCache {
    path: PathBuf,
    slot: RwLock<Option<Arc<SentimentPipeline>>>,
    load_lock: Mutex<()>,
    loads: AtomicUsize,
}

impl ModelCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            slot: RwLock::new(None),
            load_lock: Mutex::new(()),
            loads: AtomicUsize::new(0),
        }
    }

    /// Return the cached pipeline, loading it from disk on the first
    /// successful call. The steady state is a shared read lock.
    pub fn get_or_load(&self) -> Result<Arc<SentimentPipeline>> {
        if let Some(pipeline) = self.slot.read().as_ref() {
            return Ok(Arc::clone(pipeline));
        }

        let _guard = self.load_lock.lock();
        // Another thread may have loaded while we waited for the lock.
        if let Some(pipeline) = self.slot.read().as_ref() {
            return Ok(Arc::clone(pipeline));
        }

        if !self.path.exists() {
            return Err(Error::model_not_found(&self.path));
        }

        let file = File::open(&self.path)?;
        let pipeline: SentimentPipeline = serde_json::from_reader(BufReader::new(file))?;
        self.loads.fetch_add(1, Ordering::Relaxed);
        info!(path = %self.path.display(), "model artifact loaded");

        let pipeline = Arc::new(pipeline);
        *self.slot.write() = Some(Arc::clone(&pipeline));
        Ok(pipeline)
    }

    /// Number of times the artifact has been deserialized from disk.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn trained_artifact(dir: &Path) -> PathBuf {
        let data = Dataset::fallback();
        let pipeline = SentimentPipeline::fit(&data.texts, &data.labels);
        let path = dir.join("sentiment_model.json");
        std::fs::write(&path, serde_json::to_string(&pipeline).unwrap()).unwrap();
        path
    }

    #[test]
    fn missing_file_fails_on_every_call() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ModelCache::new(dir.path().join("sentiment_model.json"));
        for _ in 0..3 {
            let err = cache.get_or_load().unwrap_err();
            assert!(matches!(err, Error::ModelNotFound { .. }));
        }
        assert_eq!(cache.load_count(), 0);
    }

    #[test]
    fn load_happens_once_and_handle_is_shared() {
        let dir = tempfile::tempdir().unwrap();
        let path = trained_artifact(dir.path());
        let cache = ModelCache::new(path);

        let first = cache.get_or_load().unwrap();
        let second = cache.get_or_load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.load_count(), 1);
    }

    #[test]
    fn warm_reads_skip_the_load_lock() {
        let dir = tempfile::tempdir().unwrap();
        let path = trained_artifact(dir.path());
        let cache = ModelCache::new(path);
        let first = cache.get_or_load().unwrap();

        // Would deadlock if the warm path still went through the
        // exclusive load lock.
        let _held = cache.load_lock.lock();
        let second = cache.get_or_load().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn recovers_once_training_creates_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentiment_model.json");
        let cache = ModelCache::new(&path);
        assert!(cache.get_or_load().is_err());

        trained_artifact(dir.path());
        assert!(cache.get_or_load().is_ok());
        assert_eq!(cache.load_count(), 1);
    }

    #[test]
    fn concurrent_first_calls_deserialize_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = trained_artifact(dir.path());
        let cache = Arc::new(ModelCache::new(path));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.get_or_load().map(|p| Arc::as_ptr(&p) as usize))
            })
            .collect();

        let pointers: Vec<usize> = handles
            .into_iter()
            .map(|h| h.join().unwrap().unwrap())
            .collect();
        assert!(pointers.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.load_count(), 1);
    }
}
