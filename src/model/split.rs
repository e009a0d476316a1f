use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::model_selection::train_test_split as shuffle_split;

use crate::errors::{PipelineError, Result};

/// Row indices of a train/test split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Seeded shuffle of `0..n` holding out `floor(n * test_fraction)` rows.
///
/// When that rounds down to zero every row trains and nothing is held out.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Result<SplitIndices> {
    let test_size = test_fraction as f32;
    if !(0.0..1.0).contains(&test_fraction) || test_size >= 1.0 {
        return Err(PipelineError::Model(format!(
            "test fraction must be in [0, 1), got {test_fraction}"
        )));
    }
    if n < 2 {
        return Err(PipelineError::InsufficientData(format!(
            "need at least 2 properties to train, got {n}"
        )));
    }

    let ids: Vec<usize> = (0..n).collect();
    if (n as f32 * test_size) < 1.0 {
        return Ok(SplitIndices {
            train: ids,
            test: Vec::new(),
        });
    }

    // The row ids ride through the splitter as both matrix and target.
    let rows: Vec<Vec<usize>> = ids.iter().map(|&i| vec![i]).collect();
    let id_matrix = DenseMatrix::from_2d_vec(&rows);
    let (_, _, train, test) = shuffle_split(&id_matrix, &ids, test_size, true, Some(seed));

    Ok(SplitIndices { train, test })
}
