//! Logistic model of attempt risk.
//!
//! ```text
//! intercept  = ln(prev / (1 - prev))
//! log_odds   = Σ ln(OR_i) · b_i
//! adjustment = mean(ln OR) · average_behavior
//! risk       = 1 / (1 + exp(-(intercept + log_odds - adjustment)))
//! ```
//!
//! The adjustment shifts the curve so an agent with `average_behavior`
//! active factors (of average weight) sits exactly at `prev`; agents below
//! the average come out healthier than the general population.

use crate::{AgentError, AgentResult};

/// Precomputed coefficients of the risk model for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct RiskModel {
    log_odds_ratios: Vec<f64>,
    intercept:       f64,
    adjustment:      f64,
}

impl RiskModel {
    /// Build the model.  Every odds ratio must be finite and > 0 and the
    /// prevalence must lie strictly inside (0, 1).
    pub fn new(odds_ratios: &[f64], prevalence: f64, average_behavior: f64) -> AgentResult<Self> {
        if !(prevalence > 0.0 && prevalence < 1.0) {
            return Err(AgentError::Domain(format!(
                "general prevalence must lie strictly inside (0, 1), got {prevalence}"
            )));
        }
        if let Some(bad) = odds_ratios.iter().find(|&&or| !(or.is_finite() && or > 0.0)) {
            return Err(AgentError::Domain(format!("odds ratio must be > 0, got {bad}")));
        }

        let log_odds_ratios: Vec<f64> = odds_ratios.iter().map(|or| or.ln()).collect();
        let mean_log_or = if log_odds_ratios.is_empty() {
            0.0
        } else {
            log_odds_ratios.iter().sum::<f64>() / log_odds_ratios.len() as f64
        };

        Ok(Self {
            intercept:  (prevalence / (1.0 - prevalence)).ln(),
            adjustment: mean_log_or * average_behavior,
            log_odds_ratios,
        })
    }

    /// Number of behaviors the model expects.
    pub fn n_beh(&self) -> usize {
        self.log_odds_ratios.len()
    }

    /// ln(odds ratio) of each behavior.
    pub fn log_odds_ratios(&self) -> &[f64] {
        &self.log_odds_ratios
    }

    /// Attempt probability for `behavior`.  Indices past `n_beh` are ignored.
    pub fn risk(&self, behavior: &[bool]) -> f64 {
        let log_odds: f64 = self
            .log_odds_ratios
            .iter()
            .zip(behavior)
            .filter(|&(_, &b)| b)
            .map(|(w, _)| w)
            .sum();
        sigmoid(self.intercept + log_odds - self.adjustment)
    }
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
