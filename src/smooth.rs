use std::num::NonZeroUsize;

/// Centered moving average with a box kernel of `window` samples
///
/// Behaves like a "same" mode convolution: the output has `max(values.len(), window)` entries
/// and samples near the edges are summed over the part of the window that overlaps the data,
/// but still divided by the full `window`. Callers that need one value per input sample
/// should truncate the result.
pub fn moving_average(values: &[f64], window: NonZeroUsize) -> Vec<f64> {
    let len = values.len();
    if len == 0 {
        return Vec::new();
    }

    let window = window.get();
    let scale = 1.0 / window as f64;
    let offset = (len.min(window) - 1) / 2;

    (0..len.max(window))
        .map(|i| {
            let end = i + offset;
            let start = (end + 1).saturating_sub(window);
            let end = end.min(len - 1);
            values[start..=end].iter().map(|v| v * scale).sum()
        })
        .collect()
}
