use serde::{Deserialize, Serialize};
use smartcore::metrics::{mean_squared_error, r2 as r2_score};

/// Held-out evaluation of a fitted model. Diagnostic only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub mse: f64,
    pub r2: f64,
    pub train_rows: usize,
    pub test_rows: usize,
}

impl ModelMetrics {
    /// Scores predictions for the held-out rows. `y_true` must not be empty.
    ///
    /// A constant target scores R² 1.0 when predicted exactly and 0.0
    /// otherwise, where the plain formula would divide by zero.
    pub fn evaluate(y_true: &[f64], y_pred: &[f64], train_rows: usize) -> Self {
        let (truth, predicted) = (y_true.to_vec(), y_pred.to_vec());
        let constant = y_true.windows(2).all(|w| w[0] == w[1]);
        let r2 = if constant {
            if y_true == y_pred {
                1.0
            } else {
                0.0
            }
        } else {
            r2_score(&truth, &predicted)
        };

        Self {
            mse: mean_squared_error(&truth, &predicted),
            r2,
            train_rows,
            test_rows: y_true.len(),
        }
    }
}
