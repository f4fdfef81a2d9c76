//! Linear-interpolated percentile.

/// Returns the `p`-quantile of `values` using linear interpolation between
/// the two closest ranks.
///
/// `p` is clamped to `[0, 1]`. The input does not need to be sorted. An empty
/// slice yields `None`.
///
/// ```
/// use fxsignal_core::percentile;
///
/// assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 0.5), Some(2.5));
/// assert_eq!(percentile(&[], 0.5), None);
/// ```
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let last = sorted.len() - 1;
    let k = last as f64 * p.clamp(0.0, 1.0);
    let floor_idx = k.floor() as usize;
    let ceil_idx = (floor_idx + 1).min(last);

    if floor_idx == ceil_idx {
        return Some(sorted[floor_idx]);
    }

    let lower = sorted[floor_idx] * (ceil_idx as f64 - k);
    let upper = sorted[ceil_idx] * (k - floor_idx as f64);
    Some(lower + upper)
}
