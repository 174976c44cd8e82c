//! Named-column design matrix

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, Result};

/// Design matrix with ordered named columns of f64 values
///
/// Column order matters: prediction inputs are assembled in the fitted
/// model's term order. All columns share the same row count.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DesignMatrix {
    columns: Vec<String>,
    data: HashMap<String, Vec<f64>>,
    rows: usize,
}

impl DesignMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ordered (name, values) pairs
    ///
    /// Fails if column lengths disagree or a name repeats.
    pub fn from_columns(columns: Vec<(String, Vec<f64>)>) -> Result<Self> {
        let mut matrix = Self::new();
        for (name, values) in columns {
            matrix.set_column(&name, values)?;
        }
        Ok(matrix)
    }

    /// Insert or replace a column
    ///
    /// A replaced column keeps its original position; a new column is
    /// appended. The first column fixes the row count.
    pub fn set_column(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        if self.columns.is_empty() {
            self.rows = values.len();
        } else if values.len() != self.rows {
            return Err(CoreError::matrix(format!(
                "column {} has {} rows, expected {}",
                name,
                values.len(),
                self.rows
            )));
        }
        if !self.data.contains_key(name) {
            self.columns.push(name.to_owned());
        }
        self.data.insert(name.to_owned(), values);
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.rows
    }

    /// Column names in insertion order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.data.get(name).map(Vec::as_slice)
    }

    /// Column required to exist, as an error otherwise
    pub fn require_column(&self, name: &str) -> Result<&[f64]> {
        self.column(name)
            .ok_or_else(|| CoreError::matrix(format!("no column named {}", name)))
    }

    /// Sample mean of one column
    pub fn mean(&self, name: &str) -> Option<f64> {
        let values = self.data.get(name)?;
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Sample means of every column
    pub fn means(&self) -> HashMap<String, f64> {
        self.columns
            .iter()
            .filter_map(|name| self.mean(name).map(|m| (name.clone(), m)))
            .collect()
    }

    /// Column subset in the given order
    ///
    /// Used to restrict a synthetic dataset to a fitted model's terms;
    /// fails if any requested column is absent.
    pub fn select(&self, names: &[String]) -> Result<DesignMatrix> {
        let mut selected = Self::new();
        for name in names {
            let values = self.require_column(name)?.to_vec();
            selected.set_column(name, values)?;
        }
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> DesignMatrix {
        DesignMatrix::from_columns(vec![
            ("x1".to_owned(), vec![1.0, 2.0, 3.0]),
            ("x2".to_owned(), vec![4.0, 5.0, 6.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_matrix_columns_ordered() {
        let matrix = sample();
        assert_eq!(matrix.columns(), &["x1".to_owned(), "x2".to_owned()]);
        assert_eq!(matrix.n_rows(), 3);
    }

    #[test]
    fn test_matrix_length_mismatch_rejected() {
        let mut matrix = sample();
        let result = matrix.set_column("x3", vec![1.0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_matrix_replace_keeps_position() {
        let mut matrix = sample();
        matrix.set_column("x1", vec![9.0, 9.0, 9.0]).unwrap();

        assert_eq!(matrix.columns(), &["x1".to_owned(), "x2".to_owned()]);
        assert_eq!(matrix.column("x1").unwrap(), &[9.0, 9.0, 9.0]);
    }

    #[test]
    fn test_matrix_means() {
        let matrix = sample();
        assert_eq!(matrix.mean("x1"), Some(2.0));
        assert_eq!(matrix.mean("missing"), None);

        let means = matrix.means();
        assert_eq!(means["x2"], 5.0);
    }

    #[test]
    fn test_matrix_select_order() {
        let matrix = sample();
        let selected = matrix
            .select(&["x2".to_owned(), "x1".to_owned()])
            .unwrap();

        assert_eq!(selected.columns(), &["x2".to_owned(), "x1".to_owned()]);
        assert_eq!(selected.column("x1").unwrap(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_matrix_select_missing_column() {
        let matrix = sample();
        assert!(matrix.select(&["nope".to_owned()]).is_err());
    }

    #[test]
    fn test_matrix_serde_fixture() {
        // Fixtures load as plain JSON
        let json = r#"{
            "columns": ["x1"],
            "data": {"x1": [1.0, 2.0]},
            "rows": 2
        }"#;
        let matrix: DesignMatrix = serde_json::from_str(json).unwrap();

        assert_eq!(matrix.n_rows(), 2);
        assert_eq!(matrix.column("x1").unwrap(), &[1.0, 2.0]);
    }
}
