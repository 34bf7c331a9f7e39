use analysis_core::{round_to, Bar, MultiTimeframePerformance, Period};
use chrono::Duration;

/// Percentage return over the bars inside one lookback window ending at
/// the last bar. `None` with fewer than two bars in the window.
pub fn period_return(bars: &[Bar], period: Period) -> Option<f64> {
    let end = bars.last()?;
    let start_at = end.timestamp - Duration::days(period.lookback_days());

    let window: Vec<&Bar> = bars.iter().filter(|b| b.timestamp >= start_at).collect();
    if window.len() < 2 {
        return None;
    }

    let first = window[0].close;
    if first <= 0.0 || !first.is_finite() {
        return None;
    }
    Some(round_to((end.close / first - 1.0) * 100.0, 2))
}

/// Returns for every lookback period, measured back from the last bar.
/// Bars are expected in chronological order.
pub fn multi_timeframe_performance(bars: &[Bar]) -> MultiTimeframePerformance {
    let mut performance = MultiTimeframePerformance::default();
    for period in Period::ALL {
        performance.set(period, period_return(bars, period));
    }
    performance
}
