use analysis_core::config::{
    ALERT_VOLUME_RATIO, APPROACHING_52W_HIGH_PCT, DRAWDOWN_WARNING_PCT, EXTREME_VOLUME_RATIO,
    NEAR_52W_HIGH_PCT, NEAR_52W_LOW_PCT, SMA_200_TEST_BAND_PCT,
};
use analysis_core::{known, positive, BacktestResult, SecuritySnapshot};

fn pct_from(price: f64, level: f64) -> f64 {
    (price - level) / level * 100.0
}

/// Alerts for price near its 52-week extremes or the 200-day SMA, unusual
/// volume, and a deep historical drawdown. Checks run in that order and
/// fire independently. No price, no alerts.
pub fn price_alerts(snapshot: &SecuritySnapshot, backtest: Option<&BacktestResult>) -> Vec<String> {
    let mut alerts = Vec::new();
    let Some(price) = positive(snapshot.price) else {
        return alerts;
    };

    if let Some(high) = positive(snapshot.high_52w) {
        let pct = pct_from(price, high);
        if pct > -NEAR_52W_HIGH_PCT {
            alerts.push(format!("[HOT] Near 52W high! Only {:.1}% away", pct.abs()));
        } else if pct > -APPROACHING_52W_HIGH_PCT {
            alerts.push(format!("[~] Approaching 52W high ({:.1}% away)", pct.abs()));
        }
    }

    if let Some(low) = positive(snapshot.low_52w) {
        let pct = pct_from(price, low);
        if pct < NEAR_52W_LOW_PCT {
            alerts.push(format!("[!] Near 52W low! Only {pct:.1}% above"));
        }
    }

    if let Some(sma_200) = positive(snapshot.indicators.sma_200) {
        let pct = pct_from(price, sma_200);
        if pct > -SMA_200_TEST_BAND_PCT && pct < SMA_200_TEST_BAND_PCT {
            alerts.push(format!("[*] Testing 200 SMA support/resistance at ${sma_200:.2}"));
        }
    }

    if let (Some(volume), Some(avg_volume)) = (positive(snapshot.volume), positive(snapshot.avg_volume)) {
        let ratio = volume / avg_volume;
        if ratio > EXTREME_VOLUME_RATIO {
            alerts.push(format!("[!!!] EXTREME volume! {ratio:.1}x average - unusual activity"));
        } else if ratio > ALERT_VOLUME_RATIO {
            alerts.push(format!("[!!] High volume: {ratio:.1}x average"));
        }
    }

    if let Some(drawdown) = backtest.and_then(|b| known(b.max_drawdown)) {
        if drawdown < DRAWDOWN_WARNING_PCT {
            alerts.push(format!(
                "[!] Historical max drawdown: {drawdown:.1}% - high volatility expected"
            ));
        }
    }

    alerts
}
