//! Effect estimation engine
//!
//! Marginal and total effects of a focal variable in a fitted
//! interaction-term regression model. The fitting itself is external
//! (see [`RegressionArtifact`]); this module reconstructs interaction
//! terms and computes derivative-based effect estimates.

mod matrix;
mod model;
pub mod terms;

pub use matrix::DesignMatrix;
pub use model::{LinearArtifact, RegressionArtifact};

use terms::{crowd_interaction_name, parse_term, Term, CROWD_PCT, CROWD_PCT_SQUARED};
use tracing::debug;

use crate::errors::{CoreError, Result};

/// The three fixed interaction partners of `crowd_pct` in the total
/// effect model: cohesion, efficiency and inequality statistics.
pub const TOTAL_EFFECT_PARTNERS: [&str; 3] =
    ["avg_clustering", "avg_min_path", "gini_coefficient"];

/// Scalar overrides for the total-effect synthetic dataset
///
/// `None` keeps the observed column from the input data; `Some(v)`
/// holds the variable fixed at `v` across all rows (including zero,
/// which is a meaningful evaluation point).
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalEffectOverrides {
    pub crowd_pct: Option<f64>,
    pub avg_clustering: Option<f64>,
    pub avg_min_path: Option<f64>,
    pub gini_coefficient: Option<f64>,
}

impl TotalEffectOverrides {
    fn partner(&self, name: &str) -> Option<f64> {
        match name {
            "avg_clustering" => self.avg_clustering,
            "avg_min_path" => self.avg_min_path,
            "gini_coefficient" => self.gini_coefficient,
            _ => None,
        }
    }
}

fn mean_of(predictions: &[f64]) -> Result<f64> {
    if predictions.is_empty() {
        return Err(CoreError::effects("effect over zero rows is undefined"));
    }
    Ok(predictions.iter().sum::<f64>() / predictions.len() as f64)
}

/// Marginal effect of one variable
///
/// Per-row effect is `beta_v + crowd_pct * beta_{vXcrowd_pct}`, or just
/// `beta_v` when the model carries no interaction term for `variable`.
/// The effect is scaled by the model's per-row prediction and averaged.
pub fn marginal_effect(
    variable: &str,
    model: &dyn RegressionArtifact,
    x: &DesignMatrix,
    all_data: &DesignMatrix,
) -> Result<f64> {
    let predictions = model.predict(x)?;
    let beta = model.coefficient(variable).unwrap_or(0.0);

    let cross_term = crowd_interaction_name(variable);
    let effects: Vec<f64> = match model.coefficient(&cross_term) {
        Some(beta_cross) => {
            let crowd = all_data.require_column(CROWD_PCT)?;
            if crowd.len() != predictions.len() {
                return Err(CoreError::effects(format!(
                    "input data has {} rows, predictions have {}",
                    crowd.len(),
                    predictions.len()
                )));
            }
            crowd.iter().map(|c| beta + c * beta_cross).collect()
        }
        None => vec![beta; predictions.len()],
    };

    let marginal: Vec<f64> = effects
        .iter()
        .zip(&predictions)
        .map(|(effect, prediction)| effect * prediction)
        .collect();
    mean_of(&marginal)
}

/// Total effect of `crowd_pct`
///
/// Builds a synthetic dataset where the focal variable (and its
/// square) and each of the three partner statistics may be held at a
/// caller-supplied scalar, recomputes the partner interaction columns
/// as products, and evaluates the analytic partial derivative of the
/// prediction with respect to `crowd_pct`:
///
/// `prediction * (2*b_q*crowd + b_c + clustering*b_1 + gini*b_2 + path*b_3)`
///
/// Coefficients missing from the model count as zero.
pub fn total_effect(
    model: &dyn RegressionArtifact,
    x: &DesignMatrix,
    all_data: &DesignMatrix,
    overrides: TotalEffectOverrides,
) -> Result<f64> {
    let rows = x.n_rows();
    let mut effects_data = x.clone();

    let crowd: Vec<f64> = match overrides.crowd_pct {
        Some(value) => vec![value; rows],
        None => {
            let observed = all_data.require_column(CROWD_PCT)?;
            if observed.len() != rows {
                return Err(CoreError::effects(format!(
                    "input data has {} rows, design matrix has {}",
                    observed.len(),
                    rows
                )));
            }
            observed.to_vec()
        }
    };
    effects_data.set_column(CROWD_PCT, crowd.clone())?;
    effects_data.set_column(CROWD_PCT_SQUARED, crowd.iter().map(|c| c * c).collect())?;

    for partner in TOTAL_EFFECT_PARTNERS {
        let values: Vec<f64> = match overrides.partner(partner) {
            Some(value) => vec![value; rows],
            None => all_data.require_column(partner)?.to_vec(),
        };
        let products: Vec<f64> = crowd.iter().zip(&values).map(|(c, v)| c * v).collect();
        effects_data.set_column(partner, values)?;
        effects_data.set_column(&crowd_interaction_name(partner), products)?;
    }

    // Missing coefficients are legitimate model variation, not errors
    let beta_crowd = model.coefficient(CROWD_PCT).unwrap_or(0.0);
    let beta_quadratic = model.coefficient(CROWD_PCT_SQUARED).unwrap_or(0.0);
    let partner_betas: Vec<f64> = TOTAL_EFFECT_PARTNERS
        .iter()
        .map(|partner| {
            model
                .coefficient(&crowd_interaction_name(partner))
                .unwrap_or(0.0)
        })
        .collect();

    let pred_data = effects_data.select(model.terms())?;
    let predictions = model.predict(&pred_data)?;
    debug!(rows = predictions.len(), "evaluating total effect");

    let mut totals = Vec::with_capacity(predictions.len());
    for (i, prediction) in predictions.iter().enumerate() {
        let mut derivative = 2.0 * beta_quadratic * crowd[i] + beta_crowd;
        for (partner, beta) in TOTAL_EFFECT_PARTNERS.iter().zip(&partner_betas) {
            derivative += effects_data.require_column(partner)?[i] * beta;
        }
        totals.push(prediction * derivative);
    }
    mean_of(&totals)
}

/// Synthetic variation dataset for `crowd_pct`
///
/// 100 rows with crowd_pct = 0.00, 0.01, ..., 0.99; every other
/// regressor held at its sample mean. Interaction columns follow the
/// external naming contract: `a:b` is the product of the two means,
/// `{v}Xcrowd_pct` tracks the running crowd_pct value, and `Intercept`
/// is always 1.
pub fn crowd_pct_variation(all_data: &DesignMatrix, x: &DesignMatrix) -> Result<DesignMatrix> {
    let means = all_data.means();
    let mean_for = |name: &str| -> Result<f64> {
        means
            .get(name)
            .copied()
            .ok_or_else(|| CoreError::effects(format!("no sample mean for column {}", name)))
    };

    let mut variation = DesignMatrix::new();
    for name in x.columns() {
        let mut values = Vec::with_capacity(100);
        for i in 0..100 {
            let crowd = i as f64 / 100.0;
            let value = match parse_term(name) {
                Term::Intercept => 1.0,
                Term::CrowdPct => crowd,
                Term::CrowdPctSquared => crowd * crowd,
                Term::Interaction { left, right } => mean_for(left)? * mean_for(right)?,
                Term::CrowdInteraction { partner } => crowd * mean_for(partner)?,
                Term::Plain(plain) => mean_for(plain)?,
            };
            values.push(value);
        }
        variation.set_column(name, values)?;
    }
    Ok(variation)
}
