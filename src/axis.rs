//! Axis labels and bounds for the population plot.
//!
//! The Y axis is fixed to fractions of the theoretical maximum population.
//! The X axis starts as a projection of future ticks from 0 and switches to a
//! window that trails the latest sample once the plot has filled.

/// Number of label steps along each axis
const AXIS_DIVISIONS: u32 = 5;

/// Ticks spanned by one label step on the X axis
fn ticks_per_division(size: usize) -> f64 {
    (2.0 * size as f64 - 2.0) / AXIS_DIVISIONS as f64
}

/// Y labels from top to bottom: 100%, 80%, ... 20% of `size²`
pub fn y_labels(size: usize) -> Vec<i64> {
    let max = (size * size) as f64;
    (1..=AXIS_DIVISIONS)
        .rev()
        .map(|i| (max / AXIS_DIVISIONS as f64 * i as f64).round() as i64)
        .collect()
}

/// X labels from left to right.
///
/// `scrolling` selects the trailing axis anchored at `time`; otherwise the
/// labels project forward from 0.
pub fn x_labels(size: usize, interval: u64, time: u64, scrolling: bool) -> Vec<i64> {
    let step = interval as f64 * ticks_per_division(size);
    if scrolling {
        (0..=AXIS_DIVISIONS)
            .rev()
            .map(|i| (time as f64 - step * i as f64).round() as i64)
            .collect()
    } else {
        (0..=AXIS_DIVISIONS)
            .map(|i| (step * i as f64).round() as i64)
            .collect()
    }
}

/// Plot range for the Y axis
pub fn y_bounds(size: usize) -> [f64; 2] {
    [0.0, (size * size) as f64]
}

/// Plot range for the X axis, matching the outermost X labels
pub fn x_bounds(size: usize, interval: u64, time: u64, scrolling: bool) -> [f64; 2] {
    let span = interval as f64 * ticks_per_division(size) * AXIS_DIVISIONS as f64;
    if scrolling {
        [time as f64 - span, time as f64]
    } else {
        [0.0, span]
    }
}
