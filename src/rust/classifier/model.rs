use ndarray::{Array1, Array2};
use serde::Deserialize;

use super::error::ClassifierError;
use super::utils::{sigmoid, softmax};

/// On-disk shape of a fitted logistic regression, before validation.
#[derive(Debug, Deserialize)]
struct RawLogisticModel {
    classes: Vec<String>,
    coef: Vec<Vec<f32>>,
    intercept: Vec<f32>,
}

/// A fitted linear classifier producing one label per feature vector.
///
/// Two-class models carry a single coefficient row whose positive side
/// selects `classes[1]`. Models with more classes carry one row per class
/// and the highest-scoring row wins.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawLogisticModel")]
pub struct LogisticModel {
    classes: Vec<String>,
    coef: Array2<f32>,
    intercept: Array1<f32>,
}

impl TryFrom<RawLogisticModel> for LogisticModel {
    type Error = String;

    fn try_from(raw: RawLogisticModel) -> Result<Self, Self::Error> {
        if raw.classes.len() < 2 {
            return Err(format!("expected at least 2 classes, got {}", raw.classes.len()));
        }

        let rows = raw.coef.len();
        let expected_rows = if raw.classes.len() == 2 { 1 } else { raw.classes.len() };
        if rows != expected_rows {
            return Err(format!(
                "{} classes need {} coefficient rows, got {}",
                raw.classes.len(),
                expected_rows,
                rows
            ));
        }
        if raw.intercept.len() != rows {
            return Err(format!(
                "intercept has {} entries for {} coefficient rows",
                raw.intercept.len(),
                rows
            ));
        }

        let width = raw.coef[0].len();
        if raw.coef.iter().any(|row| row.len() != width) {
            return Err("coefficient rows differ in width".to_string());
        }

        let flat: Vec<f32> = raw.coef.into_iter().flatten().collect();
        let coef = Array2::from_shape_vec((rows, width), flat)
            .map_err(|e| format!("failed to shape coefficients: {}", e))?;

        Ok(Self {
            classes: raw.classes,
            coef,
            intercept: Array1::from(raw.intercept),
        })
    }
}

impl LogisticModel {
    pub fn new(
        classes: Vec<String>,
        coef: Vec<Vec<f32>>,
        intercept: Vec<f32>,
    ) -> Result<Self, ClassifierError> {
        Self::try_from(RawLogisticModel { classes, coef, intercept })
            .map_err(ClassifierError::BuildError)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of features each input vector must have.
    pub fn n_features(&self) -> usize {
        self.coef.ncols()
    }

    /// Raw linear scores, one per coefficient row.
    pub fn decision_function(&self, features: &Array1<f32>) -> Result<Array1<f32>, ClassifierError> {
        if features.len() != self.n_features() {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.n_features(),
                actual: features.len(),
            });
        }
        Ok(self.coef.dot(features) + &self.intercept)
    }

    /// Probability of each class, aligned with [`classes`](Self::classes).
    pub fn predict_proba(&self, features: &Array1<f32>) -> Result<Array1<f32>, ClassifierError> {
        let scores = self.decision_function(features)?;
        if self.classes.len() == 2 {
            let positive = sigmoid(scores[0]);
            Ok(Array1::from(vec![1.0 - positive, positive]))
        } else {
            Ok(softmax(&scores))
        }
    }

    /// Returns the predicted label and its probability.
    pub fn predict(&self, features: &Array1<f32>) -> Result<(String, f32), ClassifierError> {
        let probabilities = self.predict_proba(features)?;
        if probabilities.iter().any(|p| p.is_nan()) {
            return Err(ClassifierError::PredictionError(
                "classifier produced NaN probabilities".into(),
            ));
        }

        // First maximum wins, so a two-class tie goes to classes[0].
        let mut best = 0;
        for (index, &p) in probabilities.iter().enumerate() {
            if p > probabilities[best] {
                best = index;
            }
        }

        let label = self
            .classes
            .get(best)
            .cloned()
            .ok_or_else(|| ClassifierError::PredictionError(format!("no class at index {}", best)))?;
        Ok((label, probabilities[best]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use serde_json::json;

    fn binary_model() -> LogisticModel {
        LogisticModel::new(
            vec!["0".into(), "1".into()],
            vec![vec![2.0, -2.0]],
            vec![0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_binary_prediction() {
        let model = binary_model();
        let (label, p) = model.predict(&array![1.0, 0.0]).unwrap();
        assert_eq!(label, "1");
        assert!(p > 0.5);

        let (label, p) = model.predict(&array![0.0, 1.0]).unwrap();
        assert_eq!(label, "0");
        assert!(p > 0.5);
    }

    #[test]
    fn test_zero_decision_goes_to_first_class() {
        let model = binary_model();
        let (label, p) = model.predict(&array![0.0, 0.0]).unwrap();
        assert_eq!(label, "0");
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_multiclass_prediction() {
        let model: LogisticModel = serde_json::from_value(json!({
            "classes": ["neg", "neu", "pos"],
            "coef": [[1.0, 0.0], [0.0, 0.0], [0.0, 1.0]],
            "intercept": [0.0, 0.1, 0.0]
        }))
        .unwrap();
        let (label, _) = model.predict(&array![0.0, 3.0]).unwrap();
        assert_eq!(label, "pos");
        let proba = model.predict_proba(&array![0.0, 0.0]).unwrap();
        assert!((proba.sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = binary_model();
        match model.predict(&array![1.0, 0.0, 0.0]) {
            Err(ClassifierError::DimensionMismatch { expected, actual }) => {
                assert_eq!(expected, 2);
                assert_eq!(actual, 3);
            }
            other => panic!("expected dimension mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_models() {
        assert!(LogisticModel::new(vec!["1".into()], vec![vec![1.0]], vec![0.0]).is_err());
        assert!(LogisticModel::new(
            vec!["0".into(), "1".into()],
            vec![vec![1.0], vec![1.0]],
            vec![0.0, 0.0]
        )
        .is_err());
        assert!(LogisticModel::new(vec!["0".into(), "1".into()], vec![vec![1.0]], vec![]).is_err());
        assert!(LogisticModel::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec![1.0], vec![1.0, 2.0], vec![1.0]],
            vec![0.0, 0.0, 0.0]
        )
        .is_err());
    }
}
