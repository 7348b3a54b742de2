use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use serde_json::{error::Category, Map, Value};

pub const EPISODES_KEY: &str = "episodes";
pub const SCORES_KEY: &str = "scores";

/// Reasons a training log could not be loaded
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("could not read file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("expected a JSON object at the top level")]
    NotAnObject,

    #[error("missing key '{key}'")]
    MissingKey { key: &'static str },

    #[error("invalid value for '{key}': {source}")]
    InvalidField {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Malformed JSON and absent keys only affect the file at hand; a run may skip it and
    /// carry on. Anything else is a type or access problem and ends the run.
    pub fn is_skippable(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::MissingKey { .. })
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Io => Self::Io(err.into()),
            _ => Self::Parse(err),
        }
    }
}

/// The scores of one agent's training run, with the running maximum derived on load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingRecord {
    pub episodes: Vec<i64>,
    pub scores: Vec<f64>,
    pub max_scores: Vec<f64>,
}

impl TrainingRecord {
    pub fn new(episodes: Vec<i64>, scores: Vec<f64>) -> Self {
        let max_scores = running_max(&scores);
        Self {
            episodes,
            scores,
            max_scores,
        }
    }

    /// Read and parse a training log from `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_value(value)
    }

    /// Build a record from an already parsed document
    ///
    /// Keys other than `episodes` and `scores` are ignored.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let Value::Object(mut doc) = value else {
            return Err(LoadError::NotAnObject);
        };

        let scores: Vec<f64> = take_field(&mut doc, SCORES_KEY)?;
        let episodes: Vec<i64> = take_field(&mut doc, EPISODES_KEY)?;

        Ok(Self::new(episodes, scores))
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

fn take_field<T>(doc: &mut Map<String, Value>, key: &'static str) -> Result<T, LoadError>
where
    T: serde::de::DeserializeOwned,
{
    let value = doc.remove(key).ok_or(LoadError::MissingKey { key })?;
    serde_json::from_value(value).map_err(|source| LoadError::InvalidField { key, source })
}

/// Best score seen so far at each position, inclusive
///
/// The running maximum starts at 0 rather than at the first score, so a run of negative
/// scores reports 0 until a positive score appears.
pub fn running_max(scores: &[f64]) -> Vec<f64> {
    scores
        .iter()
        .scan(0.0_f64, |best, &score| {
            *best = best.max(score);
            Some(*best)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    #[test]
    fn running_max_functional() {
        assert_eq!(running_max(&[1.0, 3.0, 2.0, 5.0]), [1.0, 3.0, 3.0, 5.0]);
        assert_eq!(running_max(&[]), Vec::<f64>::new());
    }

    #[test]
    fn running_max_floors_at_zero() {
        assert_eq!(running_max(&[-2.0, -1.0]), [0.0, 0.0]);
        assert_eq!(running_max(&[-5.0, 2.0, -1.0, 1.0]), [0.0, 2.0, 2.0, 2.0]);
    }

    #[test]
    fn running_max_is_non_decreasing() {
        let scores = [4.0, -3.0, 7.5, 0.0, 7.5, 12.0, -20.0, 3.0];
        let max = running_max(&scores);
        assert_eq!(max.len(), scores.len());
        assert!(max.windows(2).all(|w| w[0] <= w[1]), "non-decreasing");
        for (i, m) in max.iter().enumerate() {
            let expected = scores[..=i].iter().fold(0.0_f64, |a, &b| a.max(b));
            assert_eq!(*m, expected, "prefix max at {i}");
        }
    }

    #[test]
    fn from_value_derives_max_scores() {
        let record =
            TrainingRecord::from_value(json!({"episodes": [0, 1, 2, 3], "scores": [1, 3, 2, 5]}))
                .unwrap();
        assert_eq!(record.episodes, [0, 1, 2, 3]);
        assert_eq!(record.scores, [1.0, 3.0, 2.0, 5.0]);
        assert_eq!(record.max_scores, [1.0, 3.0, 3.0, 5.0]);
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn from_value_ignores_extra_keys() {
        let record = TrainingRecord::from_value(json!({
            "episodes": [0, 1],
            "scores": [-2, -1],
            "epsilon": [1.0, 0.9],
        }))
        .unwrap();
        assert_eq!(record.max_scores, [0.0, 0.0]);
    }

    #[test]
    fn missing_keys() {
        let err = TrainingRecord::from_value(json!({"episodes": [0, 1]})).unwrap_err();
        assert!(matches!(err, LoadError::MissingKey { key: SCORES_KEY }));

        let err = TrainingRecord::from_value(json!({"scores": [1.0]})).unwrap_err();
        assert!(matches!(err, LoadError::MissingKey { key: EPISODES_KEY }));
    }

    #[test]
    fn wrong_shapes() {
        let err = TrainingRecord::from_value(json!([1, 2, 3])).unwrap_err();
        assert!(matches!(err, LoadError::NotAnObject));

        let err =
            TrainingRecord::from_value(json!({"episodes": [0], "scores": ["high"]})).unwrap_err();
        assert!(matches!(err, LoadError::InvalidField { key: SCORES_KEY, .. }));
    }

    #[test]
    fn from_reader_reports_parse_errors() {
        let err = TrainingRecord::from_reader(&b"{\"scores\": [1, 2"[..]).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)), "got {err:?}");

        let err = TrainingRecord::from_reader(&b"not json"[..]).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"episodes":[0,1,2,3],"scores":[1,3,2,5]}}"#).unwrap();

        let record = TrainingRecord::load(file.path()).unwrap();
        assert_eq!(record.max_scores, [1.0, 3.0, 3.0, 5.0]);
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = TrainingRecord::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
        assert!(!err.is_skippable());
    }

    #[test]
    fn only_parse_and_missing_key_are_skippable() {
        let parse = TrainingRecord::from_reader(&b"{"[..]).unwrap_err();
        assert!(parse.is_skippable());

        let missing = TrainingRecord::from_value(json!({"episodes": [0]})).unwrap_err();
        assert!(missing.is_skippable());

        let not_object = TrainingRecord::from_value(json!([1, 2])).unwrap_err();
        assert!(!not_object.is_skippable());

        let wrong_type =
            TrainingRecord::from_value(json!({"episodes": [0], "scores": ["x"]})).unwrap_err();
        assert!(!wrong_type.is_skippable());
    }
}
