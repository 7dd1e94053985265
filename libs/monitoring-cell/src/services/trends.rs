// =====================================================================================
// TREND ANALYSIS
// =====================================================================================

use crate::models::{MetricSample, Trend};

const TREND_WINDOW: usize = 5;
const TREND_THRESHOLD_PCT: f64 = 5.0;

/// Directional classification of a metric's recent values (oldest first).
/// Percent change is taken over the last five samples; a zero baseline is
/// classified as stable rather than divided by.
pub fn analyze_trend(samples: &[MetricSample]) -> Trend {
    if samples.len() < 2 {
        return Trend::Stable;
    }

    let window = &samples[samples.len().saturating_sub(TREND_WINDOW)..];
    let first = window[0].value;
    let last = window[window.len() - 1].value;

    if first == 0.0 {
        return Trend::Stable;
    }

    let change_pct = (last - first) / first * 100.0;
    if change_pct > TREND_THRESHOLD_PCT {
        Trend::Up
    } else if change_pct < -TREND_THRESHOLD_PCT {
        Trend::Down
    } else {
        Trend::Stable
    }
}
