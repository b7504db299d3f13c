use crate::error::ModelError;

/// Poisson probability mass `e^-λ · λ^k / k!` with `λ = expected_goals`.
///
/// The mass is accumulated iteratively (`p_k = p_{k-1} · λ / k`) instead of
/// evaluating the factorial, so it stays finite well past the k ≤ 10,
/// λ ≤ 8 range the market model needs.
pub fn probability(expected_goals: f64, k: u32) -> Result<f64, ModelError> {
    if !(expected_goals > 0.0) {
        return Err(ModelError::NonPositiveRate(expected_goals));
    }

    let mut p = (-expected_goals).exp();
    for i in 1..=k {
        p *= expected_goals / i as f64;
    }
    Ok(p)
}

/// Masses for k = 0..=max_k as one pass. Same recurrence as `probability`,
/// shared by the scoreline enumeration so it does not restart from k = 0 on
/// every cell.
pub fn pmf(expected_goals: f64, max_k: u32) -> Result<Vec<f64>, ModelError> {
    if !(expected_goals > 0.0) {
        return Err(ModelError::NonPositiveRate(expected_goals));
    }

    let mut out = vec![0.0; max_k as usize + 1];
    out[0] = (-expected_goals).exp();
    for k in 1..=max_k as usize {
        out[k] = out[k - 1] * expected_goals / k as f64;
    }
    Ok(out)
}
