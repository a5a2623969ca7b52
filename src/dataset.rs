// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Labeled pose datasets.
//!
//! A [`Dataset`] is an ordered collection of [`LabeledSequence`]s. It can be persisted
//! as JSON, summarized, and exported as classifier input tensors in the node-major
//! `(keypoints, frames, dims)` layout together with integer class indices from a
//! [`LabelMap`].

use std::collections::BTreeMap;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::error::{ResampleError, Result};
use crate::sequence::PoseSequence;

/// Action class tag attached to a motion clip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Create a label.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Label {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Label {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// A pose sequence with its action label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledSequence {
    /// The motion clip.
    pub sequence: PoseSequence,
    /// Its action class.
    pub label: Label,
}

impl LabeledSequence {
    /// Pair a sequence with a label.
    pub fn new(sequence: PoseSequence, label: impl Into<Label>) -> Self {
        Self {
            sequence,
            label: label.into(),
        }
    }
}

/// Sorted, de-duplicated labels mapped to contiguous class indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    labels: Vec<Label>,
}

impl LabelMap {
    /// Build a map from any collection of labels.
    pub fn from_labels<'a>(labels: impl IntoIterator<Item = &'a Label>) -> Self {
        let mut labels: Vec<Label> = labels.into_iter().cloned().collect();
        labels.sort();
        labels.dedup();
        Self { labels }
    }

    /// Class index of `label`.
    #[must_use]
    pub fn index_of(&self, label: &Label) -> Option<usize> {
        self.labels.binary_search(label).ok()
    }

    /// Label for class index `index`.
    #[must_use]
    pub fn label_of(&self, index: usize) -> Option<&Label> {
        self.labels.get(index)
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the map has no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Labels in class-index order.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}

/// Aggregate statistics over a dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    /// Number of records.
    pub records: usize,
    /// Shortest sequence length (0 for an empty dataset).
    pub min_len: usize,
    /// Longest sequence length.
    pub max_len: usize,
    /// Mean sequence length.
    pub mean_len: f64,
    /// Keypoints per frame, if every record agrees.
    pub keypoints: Option<usize>,
    /// Coordinates per keypoint, if every record agrees.
    pub dims: Option<usize>,
    /// Record count per label.
    pub label_counts: BTreeMap<Label, usize>,
}

/// One training example for the graph-convolutional classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    /// Coordinates in `(keypoints, frames, dims)` layout.
    pub input: Array3<f32>,
    /// Class index from the [`LabelMap`].
    pub class: usize,
}

/// An ordered collection of labeled pose sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<LabeledSequence>,
}

impl Dataset {
    /// Create an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap existing records.
    #[must_use]
    pub const fn from_records(records: Vec<LabeledSequence>) -> Self {
        Self { records }
    }

    /// Append a labeled sequence.
    pub fn push(&mut self, sequence: PoseSequence, label: impl Into<Label>) {
        self.records.push(LabeledSequence::new(sequence, label));
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in order.
    #[must_use]
    pub fn records(&self) -> &[LabeledSequence] {
        &self.records
    }

    /// Consume, returning the records.
    #[must_use]
    pub fn into_records(self) -> Vec<LabeledSequence> {
        self.records
    }

    /// Iterate over records.
    pub fn iter(&self) -> std::slice::Iter<'_, LabeledSequence> {
        self.records.iter()
    }

    /// Iterate over record labels.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.records.iter().map(|r| &r.label)
    }

    /// Class index map over the labels present in this dataset.
    #[must_use]
    pub fn label_map(&self) -> LabelMap {
        LabelMap::from_labels(self.labels())
    }

    /// Check every record's internal shape consistency.
    ///
    /// # Errors
    ///
    /// Returns the first [`ResampleError::VisibilityMismatch`] found.
    pub fn validate(&self) -> Result<()> {
        self.records.iter().try_for_each(|r| r.sequence.validate())
    }

    /// Compute aggregate statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn summary(&self) -> DatasetSummary {
        let lengths: Vec<usize> = self.records.iter().map(|r| r.sequence.len()).collect();
        let total: usize = lengths.iter().sum();

        let uniform = |f: fn(&PoseSequence) -> usize| {
            let mut values = self.records.iter().map(|r| f(&r.sequence));
            let first = values.next()?;
            values.all(|v| v == first).then_some(first)
        };

        let mut label_counts = BTreeMap::new();
        for label in self.labels() {
            *label_counts.entry(label.clone()).or_insert(0) += 1;
        }

        DatasetSummary {
            records: self.records.len(),
            min_len: lengths.iter().copied().min().unwrap_or(0),
            max_len: lengths.iter().copied().max().unwrap_or(0),
            mean_len: if lengths.is_empty() {
                0.0
            } else {
                total as f64 / lengths.len() as f64
            },
            keypoints: uniform(PoseSequence::num_keypoints),
            dims: uniform(PoseSequence::dims),
            label_counts,
        }
    }

    /// Export classifier inputs and class indices.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::UnknownLabel`] if a record's label is not in `map`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_training_examples(&self, map: &LabelMap) -> Result<Vec<TrainingExample>> {
        self.records
            .iter()
            .map(|r| {
                let class = map
                    .index_of(&r.label)
                    .ok_or_else(|| ResampleError::UnknownLabel(r.label.to_string()))?;
                Ok(TrainingExample {
                    input: r.sequence.to_node_major().mapv(|v| v as f32),
                    class,
                })
            })
            .collect()
    }

    /// Read a dataset from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::Serialization`] on malformed input and
    /// [`ResampleError::VisibilityMismatch`] if a record is internally inconsistent.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let dataset: Self = serde_json::from_reader(BufReader::new(reader))?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Write the dataset as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::Serialization`] or [`ResampleError::Io`] on failure.
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Load a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::Io`] if the file cannot be opened, otherwise as
    /// [`Dataset::from_reader`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(File::open(path)?)
    }

    /// Save the dataset to a JSON file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::Io`] if the file or its directory cannot be created.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        self.to_writer(File::create(path)?)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a LabeledSequence;
    type IntoIter = std::slice::Iter<'a, LabeledSequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<LabeledSequence> for Dataset {
    fn from_iter<I: IntoIterator<Item = LabeledSequence>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn clip(frames: usize, value: f64) -> PoseSequence {
        PoseSequence::from_array(Array3::from_elem((frames, 33, 3), value))
    }

    fn sample() -> Dataset {
        let mut ds = Dataset::new();
        ds.push(clip(40, 0.1), "UnderServe");
        ds.push(clip(60, 0.2), "OverServe");
        ds.push(clip(20, 0.3), "UnderServe");
        ds
    }

    #[test]
    fn test_label_map_sorted() {
        let map = sample().label_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map.index_of(&Label::from("OverServe")), Some(0));
        assert_eq!(map.index_of(&Label::from("UnderServe")), Some(1));
        assert_eq!(map.label_of(1).map(Label::as_str), Some("UnderServe"));
        assert_eq!(map.index_of(&Label::from("C")), None);
    }

    #[test]
    fn test_summary() {
        let summary = sample().summary();
        assert_eq!(summary.records, 3);
        assert_eq!(summary.min_len, 20);
        assert_eq!(summary.max_len, 60);
        assert!((summary.mean_len - 40.0).abs() < f64::EPSILON);
        assert_eq!(summary.keypoints, Some(33));
        assert_eq!(summary.dims, Some(3));
        assert_eq!(summary.label_counts[&Label::from("UnderServe")], 2);
    }

    #[test]
    fn test_summary_empty() {
        let summary = Dataset::new().summary();
        assert_eq!(summary.records, 0);
        assert_eq!(summary.min_len, 0);
        assert_eq!(summary.keypoints, None);
    }

    #[test]
    fn test_training_examples() {
        let ds = sample();
        let examples = ds.to_training_examples(&ds.label_map()).unwrap();
        assert_eq!(examples.len(), 3);
        assert_eq!(examples[1].input.dim(), (33, 60, 3));
        assert_eq!(examples[1].class, 0);
        assert!((examples[2].input[[0, 0, 0]] - 0.3).abs() < 1e-6);

        let partial = LabelMap::from_labels([&Label::from("OverServe")]);
        assert!(matches!(
            ds.to_training_examples(&partial),
            Err(ResampleError::UnknownLabel(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let mut ds = sample();
        let vis = PoseSequence::with_visibility(Array3::zeros((3, 2, 3)), Array2::ones((3, 2))).unwrap();
        ds.push(vis, "C");

        let mut buf = Vec::new();
        ds.to_writer(&mut buf).unwrap();
        let loaded = Dataset::from_reader(buf.as_slice()).unwrap();
        assert_eq!(loaded, ds);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Dataset::from_reader("{\"records\": 5}".as_bytes());
        assert!(matches!(err, Err(ResampleError::Serialization(_))));
    }

    #[test]
    fn test_rejects_inconsistent_visibility() {
        let json = r#"{"records":[{"label":"A","sequence":{
            "data":{"v":1,"dim":[2,1,1],"data":[0.0,1.0]},
            "visibility":{"v":1,"dim":[3,1],"data":[1.0,1.0,1.0]}}}]}"#;
        assert!(matches!(
            Dataset::from_reader(json.as_bytes()),
            Err(ResampleError::VisibilityMismatch { found_frames: 3, .. })
        ));
    }
}
