#[cfg(test)]
mod tests {
    use super::super::indicators::*;
    use super::super::signals::{unified_signal, TradeSignal};
    use analysis_core::{Bar, EngineConfig};
    use approx::assert_relative_eq;
    use chrono::{Duration, Utc};

    // Helper function to create sample price data
    fn sample_prices() -> Vec<f64> {
        vec![
            44.34, 44.09, 44.15, 43.61, 44.33, 44.83, 45.10, 45.42, 45.84, 46.08,
            45.89, 46.03, 45.61, 46.28, 46.28, 46.00, 46.03, 46.41, 46.22, 45.64,
        ]
    }

    // Steady trend: each close moves by `step`, with a 1.0 band either side
    fn trending_bars(count: usize, start: f64, step: f64) -> Vec<Bar> {
        (0..count)
            .map(|i| {
                let close = start + step * i as f64;
                Bar {
                    timestamp: Utc::now() - Duration::days((count - i) as i64),
                    open: close - step / 2.0,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 1_000_000.0,
                    vwap: None,
                }
            })
            .collect()
    }

    #[test]
    fn test_sma_basic() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = sma(&data, 3);

        assert_eq!(result.len(), 3);
        assert_relative_eq!(result[0], 2.0);
        assert_relative_eq!(result[1], 3.0);
        assert_relative_eq!(result[2], 4.0);
    }

    #[test]
    fn test_sma_insufficient_data() {
        assert!(sma(&[1.0, 2.0], 5).is_empty());
        assert!(sma(&[1.0, 2.0], 0).is_empty());
    }

    #[test]
    fn test_sma_real_prices() {
        let prices = sample_prices();
        let result = sma(&prices, 5);

        let expected_first = (44.34 + 44.09 + 44.15 + 43.61 + 44.33) / 5.0;
        assert_relative_eq!(result[0], expected_first, epsilon = 1e-9);
        assert_eq!(result.len(), prices.len() - 4);
    }

    #[test]
    fn test_ema_seeded_with_sma() {
        let data = vec![22.0, 24.0, 23.0, 25.0, 26.0];
        let result = ema(&data, 3);

        assert_eq!(result.len(), 3);
        assert_relative_eq!(result[0], 23.0);
        // (25 - 23) * 0.5 + 23
        assert_relative_eq!(result[1], 24.0);
        assert_relative_eq!(result[2], 25.0);
    }

    #[test]
    fn test_ema_increases_with_uptrend() {
        let data: Vec<f64> = (1..=10).map(f64::from).collect();
        let result = ema(&data, 3);

        for pair in result.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_rsi_bounds() {
        let result = rsi(&sample_prices(), 14);

        assert_eq!(result.len(), sample_prices().len() - 14);
        for &value in &result {
            assert!((0.0..=100.0).contains(&value));
        }
    }

    #[test]
    fn test_rsi_insufficient_data() {
        assert!(rsi(&[1.0, 2.0, 3.0], 14).is_empty());
    }

    #[test]
    fn test_rsi_extremes() {
        let uptrend: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_relative_eq!(*rsi(&uptrend, 14).last().unwrap(), 100.0);

        let downtrend: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        assert!(*rsi(&downtrend, 14).last().unwrap() < 30.0);
    }

    #[test]
    fn test_macd_needs_slow_window() {
        let result = macd(&sample_prices(), 12, 26, 9);
        assert!(result.macd_line.is_empty());
    }

    #[test]
    fn test_macd_histogram() {
        let closes: Vec<f64> = trending_bars(60, 100.0, 0.5).iter().map(|b| b.close).collect();
        let result = macd(&closes, 12, 26, 9);

        assert_eq!(result.macd_line.len(), 60 - 26 + 1);
        assert_eq!(result.histogram.len(), result.signal_line.len());
        let offset = result.macd_line.len() - result.signal_line.len();
        for (i, &hist) in result.histogram.iter().enumerate() {
            assert_relative_eq!(hist, result.macd_line[i + offset] - result.signal_line[i], epsilon = 1e-9);
        }
        // Fast EMA leads in an uptrend
        assert!(*result.macd_line.last().unwrap() > 0.0);
    }

    #[test]
    fn test_bollinger_bands_ordering() {
        let result = bollinger_bands(&sample_prices(), 10, 2.0);

        assert_eq!(result.upper.len(), result.middle.len());
        assert_eq!(result.middle.len(), result.lower.len());
        for i in 0..result.upper.len() {
            assert!(result.upper[i] > result.middle[i]);
            assert!(result.middle[i] > result.lower[i]);
        }
    }

    #[test]
    fn test_bollinger_bands_flat_prices() {
        let result = bollinger_bands(&[100.0; 20], 10, 2.0);

        for i in 0..result.upper.len() {
            assert_relative_eq!(result.upper[i], result.lower[i]);
        }
    }

    #[test]
    fn test_adx_uptrend() {
        let result = adx(&trending_bars(40, 100.0, 1.0), ADX_PERIOD);

        assert!(!result.adx.is_empty());
        assert!(result.plus_di.last().unwrap() > result.minus_di.last().unwrap());
        assert!(*result.adx.last().unwrap() > 25.0);
    }

    #[test]
    fn test_adx_insufficient_data() {
        let result = adx(&trending_bars(20, 100.0, 1.0), ADX_PERIOD);
        assert!(result.adx.is_empty());
    }

    #[test]
    fn test_rolling_vwap() {
        let mut bars = trending_bars(5, 10.0, 0.0);
        bars[4].volume = 3_000_000.0;
        bars[4].close = 20.0;
        bars[4].high = 20.0;
        bars[4].low = 20.0;

        // Four bars at typical 10 with 1M each, one at 20 with 3M
        let vwap = rolling_vwap(&bars, 20).unwrap();
        assert_relative_eq!(vwap, (40.0 + 60.0) / 7.0, epsilon = 1e-9);

        for bar in &mut bars {
            bar.volume = 0.0;
        }
        assert!(rolling_vwap(&bars, 20).is_none());
    }

    #[test]
    fn test_ichimoku_midpoints() {
        let bars = trending_bars(60, 100.0, 1.0);
        let cloud = ichimoku(&bars, 9, 26, 52).unwrap();

        // Last close is 159; windows end there with a 1.0 band
        assert_relative_eq!(cloud.tenkan, (160.0 + 150.0) / 2.0);
        assert_relative_eq!(cloud.kijun, (160.0 + 133.0) / 2.0);
        assert_relative_eq!(cloud.senkou_a, (cloud.tenkan + cloud.kijun) / 2.0);
        assert_relative_eq!(cloud.senkou_b, (160.0 + 107.0) / 2.0);

        assert!(ichimoku(&bars[..40], 9, 26, 52).is_none());
    }

    #[test]
    fn test_volume_ratio() {
        let mut bars = trending_bars(4, 10.0, 1.0);
        assert_relative_eq!(volume_ratio(&bars).unwrap(), 1.0);

        bars[3].volume = 4_000_000.0;
        // 4M / mean(1M, 1M, 1M, 4M)
        assert_relative_eq!(volume_ratio(&bars).unwrap(), 4.0 / 1.75);
        assert!(volume_ratio(&[]).is_none());
    }

    #[test]
    fn test_compute_indicator_set_requires_history() {
        let set = compute_indicator_set(&trending_bars(MIN_BARS - 1, 100.0, 1.0));
        assert!(set.is_empty());
    }

    #[test]
    fn test_compute_indicator_set_uptrend() {
        let bars = trending_bars(60, 100.0, 1.0);
        let set = compute_indicator_set(&bars);

        assert_relative_eq!(set.rsi.unwrap(), 100.0);
        assert!(set.macd.unwrap() > 0.0);
        assert_relative_eq!(set.sma_20.unwrap(), 149.5);
        assert!(set.sma_50.is_some());
        assert!(set.sma_200.is_none());
        assert!(set.adx.unwrap() >= 25.0);
        assert!(set.plus_di.unwrap() > set.minus_di.unwrap());
        assert!(set.ichimoku_senkou_a.is_some());
        assert_relative_eq!(set.volume_ratio.unwrap(), 1.0);

        // Overbought RSI is outvoted by the trend indicators
        let signal = unified_signal(&set, Some(159.0), &EngineConfig::default());
        assert_eq!(signal.signal, TradeSignal::Buy);
        assert_eq!(signal.reasons[0], "RSI overbought (100)");
    }
}
