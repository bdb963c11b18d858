//! Labeled text dataset: CSV ingestion, fallback corpus, and the
//! seeded stratified train/test split.

use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use sentiserve_core::{Error, Result};
use tracing::{debug, info};

/// An ordered sequence of (text, label) pairs. Labels are exactly 0
/// (negative) or 1 (positive).
#[derive(Debug, Clone)]
pub struct Dataset {
    pub texts: Vec<String>,
    pub labels: Vec<u8>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    /// The built-in fallback corpus: 12 labeled sentences, 7 positive
    /// and 5 negative, so a stratified split always sees both classes.
    pub fn fallback() -> Self {
        let pairs: [(&str, u8); 12] = [
            ("I love this product, it is fantastic!", 1),
            ("Absolutely wonderful experience. Highly recommend.", 1),
            ("This is the best thing I've bought this year.", 1),
            ("Terrible quality and awful support.", 0),
            ("I hate it. Waste of money.", 0),
            ("Not good at all, very disappointed.", 0),
            ("Great value and works perfectly.", 1),
            ("Really happy with the performance.", 1),
            ("Awful packaging and broken on arrival.", 0),
            ("Brilliant! Exceeded my expectations.", 1),
            ("Mediocre at best, would not buy again.", 0),
            ("Pretty decent overall, satisfied with it.", 1),
        ];
        Dataset {
            texts: pairs.iter().map(|(t, _)| (*t).to_string()).collect(),
            labels: pairs.iter().map(|(_, l)| *l).collect(),
        }
    }

    /// Read a dataset from a CSV file with a header row.
    ///
    /// The file must declare `text` and `label` columns (any column
    /// order); anything else is a configuration error, never a silent
    /// fallback.
    pub fn from_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(|e| Error::config(format!("failed to read {}: {e}", path.display())))?;

        let headers = reader
            .headers()
            .map_err(|e| Error::config(format!("failed to read {} headers: {e}", path.display())))?
            .clone();
        let text_idx = headers.iter().position(|h| h == "text");
        let label_idx = headers.iter().position(|h| h == "label");
        let (text_idx, label_idx) = match (text_idx, label_idx) {
            (Some(t), Some(l)) => (t, l),
            _ => {
                return Err(Error::config(format!(
                    "{} must have columns: text,label",
                    path.display()
                )))
            }
        };

        let mut texts = Vec::new();
        let mut labels = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record
                .map_err(|e| Error::config(format!("{} row {}: {e}", path.display(), row + 1)))?;
            let text = record.get(text_idx).unwrap_or_default();
            if text.trim().is_empty() {
                return Err(Error::config(format!(
                    "{} row {}: text must be non-empty",
                    path.display(),
                    row + 1
                )));
            }
            let label = record.get(label_idx).unwrap_or_default();
            let label: u8 = label.trim().parse().map_err(|_| {
                Error::config(format!(
                    "{} row {}: label must be 0 or 1, got {label:?}",
                    path.display(),
                    row + 1
                ))
            })?;
            if label > 1 {
                return Err(Error::config(format!(
                    "{} row {}: label must be 0 or 1, got {label}",
                    path.display(),
                    row + 1
                )));
            }
            texts.push(text.to_string());
            labels.push(label);
        }

        if texts.is_empty() {
            return Err(Error::config(format!(
                "{} contains no data rows",
                path.display()
            )));
        }

        debug!(rows = texts.len(), path = %path.display(), "loaded CSV dataset");
        Ok(Dataset { texts, labels })
    }

    /// Load the dataset from `path` if the file exists, else use the
    /// fallback corpus. A present-but-malformed file fails hard so a
    /// configuration mistake is never masked by the fallback.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            info!(path = %path.display(), "loading external dataset");
            Self::from_csv(path)
        } else {
            info!("no external dataset found, using built-in fallback corpus");
            Ok(Self::fallback())
        }
    }

    /// Split into train/test partitions, stratified by label.
    ///
    /// Each class is shuffled with the seeded RNG and contributes
    /// roughly `test_ratio` of its members to the test partition; a
    /// class with at least two members always keeps one in each
    /// partition. Fixed seed in, fixed partitions out.
    pub fn stratified_split(&self, test_ratio: f64, seed: u64) -> (Dataset, Dataset) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut train_idx = Vec::new();
        let mut test_idx = Vec::new();

        for class in [0u8, 1u8] {
            let mut members: Vec<usize> = (0..self.len())
                .filter(|&i| self.labels[i] == class)
                .collect();
            members.shuffle(&mut rng);

            let n_test = if members.len() >= 2 {
                ((members.len() as f64 * test_ratio).round() as usize)
                    .clamp(1, members.len() - 1)
            } else {
                0
            };
            test_idx.extend(members.drain(..n_test));
            train_idx.extend(members);
        }

        train_idx.sort_unstable();
        test_idx.sort_unstable();
        debug!(
            train = train_idx.len(),
            test = test_idx.len(),
            "stratified split complete"
        );
        (self.subset(&train_idx), self.subset(&test_idx))
    }

    fn subset(&self, indices: &[usize]) -> Dataset {
        Dataset {
            texts: indices.iter().map(|&i| self.texts[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn fallback_covers_both_classes() {
        let data = Dataset::fallback();
        assert_eq!(data.len(), 12);
        let positives = data.labels.iter().filter(|&&l| l == 1).count();
        assert_eq!(positives, 7);
        assert_eq!(data.len() - positives, 5);
    }

    #[test]
    fn split_is_stratified_and_seeded() {
        let data = Dataset::fallback();
        let (train, test) = data.stratified_split(0.2, 42);
        assert_eq!(train.len() + test.len(), data.len());
        // round(0.2 * count) is 1 for both the 7- and 5-member classes.
        assert_eq!(test.labels.iter().filter(|&&l| l == 0).count(), 1);
        assert_eq!(test.labels.iter().filter(|&&l| l == 1).count(), 1);

        let (train2, test2) = data.stratified_split(0.2, 42);
        assert_eq!(train.texts, train2.texts);
        assert_eq!(test.texts, test2.texts);
    }

    #[test]
    fn split_keeps_both_classes_in_train() {
        let data = Dataset::fallback();
        let (train, _) = data.stratified_split(0.2, 7);
        assert!(train.labels.contains(&0));
        assert!(train.labels.contains(&1));
    }

    #[test]
    fn csv_with_required_columns_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "label,text").unwrap();
        writeln!(file, "1,\"I love it\"").unwrap();
        writeln!(file, "0,\"I hate it\"").unwrap();
        file.flush().unwrap();

        let data = Dataset::from_csv(file.path()).unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data.labels, vec![1, 0]);
        assert_eq!(data.texts[0], "I love it");
    }

    #[test]
    fn csv_missing_label_column_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "text,sentiment").unwrap();
        writeln!(file, "\"I love it\",1").unwrap();
        file.flush().unwrap();

        let err = Dataset::from_csv(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn csv_with_empty_text_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "text,label").unwrap();
        writeln!(file, "\"   \",1").unwrap();
        file.flush().unwrap();

        let err = Dataset::from_csv(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn csv_with_non_binary_label_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "text,label").unwrap();
        writeln!(file, "\"meh\",2").unwrap();
        file.flush().unwrap();

        let err = Dataset::from_csv(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn load_falls_back_only_when_file_absent() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("sentiment.csv");
        let data = Dataset::load(&missing).unwrap();
        assert_eq!(data.len(), 12);

        std::fs::write(&missing, "foo,bar\n1,2\n").unwrap();
        let err = Dataset::load(&missing).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
