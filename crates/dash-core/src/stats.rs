// ── Percentile helper ─────────────────────────────────────────────────────────

/// Compute the `p`-th percentile of a **sorted** slice using standard linear
/// interpolation (the same algorithm used by NumPy's `percentile` function
/// and pandas' `quantile`).
///
/// Returns `0.0` for an empty slice.
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    if sorted_data.is_empty() {
        return 0.0;
    }
    let len = sorted_data.len();
    if len == 1 {
        return sorted_data[0];
    }
    let p = p.clamp(0.0, 100.0);
    let rank = (p / 100.0) * (len as f64 - 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted_data[lo];
    }
    let frac = rank - lo as f64;
    sorted_data[lo] + frac * (sorted_data[hi] - sorted_data[lo])
}

/// Median of a sorted slice (`0.0` when empty).
pub fn median(sorted_data: &[f64]) -> f64 {
    percentile(sorted_data, 50.0)
}

/// Arithmetic mean; `0.0` for an empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Return a sorted copy of the finite values in `values`.
pub fn sorted_finite(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    out.sort_by(f64::total_cmp);
    out
}

// ── Histogram binning ─────────────────────────────────────────────────────────

/// Equal-width bin edges spanning `[min, max]`.
///
/// Produces `bins + 1` edges.  When every value is equal (`min == max`) a
/// single unit-wide bin starting at `min` is returned instead.
pub fn bin_edges(min: f64, max: f64, bins: usize) -> Vec<f64> {
    if bins == 0 || !min.is_finite() || !max.is_finite() || max < min {
        return Vec::new();
    }
    if max == min {
        return vec![min, min + 1.0];
    }
    let width = (max - min) / bins as f64;
    let mut edges: Vec<f64> = (0..bins).map(|i| min + width * i as f64).collect();
    edges.push(max);
    edges
}

/// Index of the bin containing `value`.
///
/// Bins are half-open `[lo, hi)` except the last, which also includes its
/// upper edge.  Returns `None` for values outside the edges.
pub fn bin_index(edges: &[f64], value: f64) -> Option<usize> {
    if edges.len() < 2 || !value.is_finite() {
        return None;
    }
    let first = edges[0];
    let last = edges[edges.len() - 1];
    if value < first || value > last {
        return None;
    }
    let bins = edges.len() - 1;
    // Position of the first edge strictly greater than `value`.
    let upper = edges.partition_point(|&e| e <= value);
    Some(upper.saturating_sub(1).min(bins - 1))
}
