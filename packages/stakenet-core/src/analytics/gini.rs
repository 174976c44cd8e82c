//! Gini coefficient of a discrete distribution

/// Gini coefficient over a degree sequence
///
/// Standard formulation G = MAD / (2 * mean), with the mean absolute
/// difference taken over all n^2 ordered pairs. Undefined (`None`) for
/// an empty sequence or a zero mean.
///
/// For any sequence with a nonzero mean the result lies in [0, 1);
/// an all-equal sequence yields exactly 0.
pub fn gini(values: &[usize]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<usize>() as f64 / n;
    if mean == 0.0 {
        return None;
    }

    let mut mad = 0.0;
    for &a in values {
        for &b in values {
            mad += (a as f64 - b as f64).abs();
        }
    }
    mad /= n * n;

    Some(mad / (2.0 * mean))
}
