use serde::{Deserialize, Serialize};
use smartcore::api::{Transformer, UnsupervisedEstimator};
use smartcore::linalg::basic::arrays::Array;
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::preprocessing::numerical::{StandardScaler, StandardScalerParameters};

use crate::domain::features::{CATEGORICAL_FEATURES, NUMERIC_FEATURES};
use crate::domain::FeatureRow;
use crate::errors::{PipelineError, Result};
use crate::model::encoder::OneHotEncoder;

/// Turns `FeatureRow`s into the dense matrix the forest trains on:
/// one-hot categorical columns first, then the standardized numeric ones.
#[derive(Serialize, Deserialize)]
pub struct ColumnTransformer {
    encoder: OneHotEncoder,
    scaler: StandardScaler<f64>,
}

fn numeric_matrix(rows: &[FeatureRow]) -> DenseMatrix<f64> {
    let values: Vec<Vec<f64>> = rows.iter().map(|r| r.numeric().to_vec()).collect();
    DenseMatrix::from_2d_vec(&values)
}

fn ensure_rows(rows: &[FeatureRow]) -> Result<()> {
    if rows.is_empty() {
        return Err(PipelineError::InsufficientData(
            "no feature rows to transform".into(),
        ));
    }
    Ok(())
}

impl ColumnTransformer {
    pub fn fit(rows: &[FeatureRow]) -> Result<Self> {
        ensure_rows(rows)?;
        let encoder = OneHotEncoder::fit(rows.iter().map(FeatureRow::categorical));
        let scaler =
            StandardScaler::fit(&numeric_matrix(rows), StandardScalerParameters::default())?;
        Ok(Self { encoder, scaler })
    }

    pub fn n_outputs(&self) -> usize {
        self.encoder.n_outputs() + NUMERIC_FEATURES.len()
    }

    pub fn transform(&self, rows: &[FeatureRow]) -> Result<DenseMatrix<f64>> {
        ensure_rows(rows)?;
        let scaled = self.scaler.transform(&numeric_matrix(rows))?;

        let mut values = Vec::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            let mut out = Vec::with_capacity(self.n_outputs());
            self.encoder.encode_into(&row.categorical(), &mut out);
            // A column with no spread at fit time never splits; pin it to 0.
            out.extend((0..NUMERIC_FEATURES.len()).map(|j| {
                let v = *scaled.get((i, j));
                if v.is_finite() {
                    v
                } else {
                    0.0
                }
            }));
            values.push(out);
        }
        Ok(DenseMatrix::from_2d_vec(&values))
    }

    pub fn feature_names(&self) -> Vec<String> {
        let mut names = self.encoder.feature_names(&CATEGORICAL_FEATURES);
        names.extend(NUMERIC_FEATURES.iter().map(|n| n.to_string()));
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(x: &DenseMatrix<f64>, i: usize) -> Vec<f64> {
        (0..x.shape().1).map(|j| *x.get((i, j))).collect()
    }

    fn rows() -> Vec<FeatureRow> {
        vec![
            FeatureRow::new("Villa", "Suburbs", 300.0, 30.0),
            FeatureRow::new("Apartment", "Downtown", 100.0, 10.0),
        ]
    }

    #[test]
    fn categorical_block_precedes_numeric_block() {
        let rows = rows();
        let t = ColumnTransformer::fit(&rows).unwrap();
        assert_eq!(t.n_outputs(), 7);

        let x = t.transform(&rows).unwrap();
        assert_eq!(x.shape(), (2, 7));
        let (villa, flat) = (row_of(&x, 0), row_of(&x, 1));
        assert_eq!(&villa[..4], &[0.0, 1.0, 0.0, 1.0]);
        assert_eq!(&flat[..4], &[1.0, 0.0, 1.0, 0.0]);

        // size and visits are centered and mirror each other
        for j in 4..6 {
            assert!(villa[j] > 0.0);
            assert!((villa[j] + flat[j]).abs() < 1e-12);
        }
        // popularity is 0.1 for both rows
        assert_eq!(villa[6], 0.0);
        assert_eq!(flat[6], 0.0);
    }

    #[test]
    fn unseen_categories_leave_the_one_hot_block_empty() {
        let t = ColumnTransformer::fit(&rows()).unwrap();
        let x = t
            .transform(&[FeatureRow::new("Castle", "Moon", 200.0, 20.0)])
            .unwrap();
        let encoded = row_of(&x, 0);
        assert_eq!(&encoded[..4], &[0.0; 4]);
        assert!(encoded.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn feature_names_match_width() {
        let t = ColumnTransformer::fit(&rows()).unwrap();
        let names = t.feature_names();
        assert_eq!(names.len(), t.n_outputs());
        assert_eq!(names.last().map(String::as_str), Some("VisitPopularity"));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            ColumnTransformer::fit(&[]),
            Err(PipelineError::InsufficientData(_))
        ));
    }
}
