//! Regression artifact port
//!
//! The model-fitting routine itself is an external collaborator; this
//! crate only consumes its output: named coefficients plus a
//! prediction function over a design matrix.

use std::collections::HashMap;

use crate::effects::matrix::DesignMatrix;
use crate::errors::{CoreError, Result};

/// Fitted-model contract
///
/// Immutable once fitted. A coefficient absent from the mapping is a
/// legitimate model specification, never an error; callers treat it
/// as zero where the math requires a value.
pub trait RegressionArtifact {
    /// Term names in the model's column order
    fn terms(&self) -> &[String];

    /// Coefficient for a term, if the model includes it
    fn coefficient(&self, term: &str) -> Option<f64>;

    /// Predicted values for a design matrix
    ///
    /// The matrix must carry a column for every model term.
    fn predict(&self, matrix: &DesignMatrix) -> Result<Vec<f64>>;
}

/// Linear-predictor artifact: prediction = X * beta
///
/// The simplest implementation of the contract; fitted GLM wrappers
/// from callers plug in the same way.
#[derive(Debug, Clone)]
pub struct LinearArtifact {
    terms: Vec<String>,
    coefficients: HashMap<String, f64>,
}

impl LinearArtifact {
    /// Build from ordered (term, coefficient) pairs
    pub fn new(coefficients: Vec<(String, f64)>) -> Self {
        let terms = coefficients.iter().map(|(name, _)| name.clone()).collect();
        let coefficients = coefficients.into_iter().collect();
        Self {
            terms,
            coefficients,
        }
    }
}

impl RegressionArtifact for LinearArtifact {
    fn terms(&self) -> &[String] {
        &self.terms
    }

    fn coefficient(&self, term: &str) -> Option<f64> {
        self.coefficients.get(term).copied()
    }

    fn predict(&self, matrix: &DesignMatrix) -> Result<Vec<f64>> {
        if matrix.n_rows() == 0 {
            return Err(CoreError::effects("cannot predict on an empty matrix"));
        }
        let mut predictions = vec![0.0; matrix.n_rows()];
        for term in &self.terms {
            let beta = self.coefficients[term];
            let column = matrix.require_column(term)?;
            for (prediction, value) in predictions.iter_mut().zip(column) {
                *prediction += beta * value;
            }
        }
        Ok(predictions)
    }
}
