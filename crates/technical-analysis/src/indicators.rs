use analysis_core::{round_to, Bar, TechnicalIndicatorSet};

/// Bars required before any indicator set is produced
pub const MIN_BARS: usize = 50;
pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const MACD_SIGNAL: usize = 9;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_STD: f64 = 2.0;
pub const ADX_PERIOD: usize = 14;
pub const VWAP_PERIOD: usize = 20;
pub const ICHIMOKU_TENKAN: usize = 9;
pub const ICHIMOKU_KIJUN: usize = 26;
pub const ICHIMOKU_SENKOU_B: usize = 52;

/// Simple Moving Average
pub fn sma(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }

    let mut result = Vec::with_capacity(data.len() - period + 1);
    for i in period - 1..data.len() {
        let sum: f64 = data[i + 1 - period..=i].iter().sum();
        result.push(sum / period as f64);
    }
    result
}

/// Exponential Moving Average, seeded with the SMA of the first `period` values.
/// Output is aligned with `sma`: element 0 corresponds to `data[period - 1]`.
pub fn ema(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return vec![];
    }

    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(data.len() - period + 1);
    result.push(data[..period].iter().sum::<f64>() / period as f64);

    for value in &data[period..] {
        let prev = result[result.len() - 1];
        result.push((value - prev) * multiplier + prev);
    }

    result
}

/// Relative Strength Index (Wilder smoothing)
pub fn rsi(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period + 1 {
        return vec![];
    }

    let mut gains = Vec::with_capacity(data.len() - 1);
    let mut losses = Vec::with_capacity(data.len() - 1);

    for i in 1..data.len() {
        let change = data[i] - data[i - 1];
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(change.abs());
        }
    }

    let mut avg_gain = gains[..period].iter().sum::<f64>() / period as f64;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period as f64;

    let mut rsi_values = Vec::with_capacity(gains.len() - period + 1);
    rsi_values.push(rsi_from_averages(avg_gain, avg_loss));

    for i in period..gains.len() {
        avg_gain = (avg_gain * (period - 1) as f64 + gains[i]) / period as f64;
        avg_loss = (avg_loss * (period - 1) as f64 + losses[i]) / period as f64;
        rsi_values.push(rsi_from_averages(avg_gain, avg_loss));
    }

    rsi_values
}

fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        return 100.0;
    }
    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

/// MACD (Moving Average Convergence Divergence)
pub struct MacdResult {
    pub macd_line: Vec<f64>,
    pub signal_line: Vec<f64>,
    pub histogram: Vec<f64>,
}

pub fn macd(data: &[f64], fast_period: usize, slow_period: usize, signal_period: usize) -> MacdResult {
    if fast_period == 0 || slow_period == 0 || signal_period == 0 || slow_period < fast_period {
        return MacdResult { macd_line: vec![], signal_line: vec![], histogram: vec![] };
    }

    let ema_fast = ema(data, fast_period);
    let ema_slow = ema(data, slow_period);
    if ema_slow.is_empty() {
        return MacdResult { macd_line: vec![], signal_line: vec![], histogram: vec![] };
    }

    let offset = slow_period - fast_period;
    let macd_line: Vec<f64> = (offset..ema_fast.len())
        .map(|i| ema_fast[i] - ema_slow[i - offset])
        .collect();

    let signal_line = ema(&macd_line, signal_period);

    let hist_offset = macd_line.len().saturating_sub(signal_line.len());
    let histogram = signal_line
        .iter()
        .enumerate()
        .map(|(i, s)| macd_line[i + hist_offset] - s)
        .collect();

    MacdResult {
        macd_line,
        signal_line,
        histogram,
    }
}

/// Bollinger Bands
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

/// Bands at `std_dev` sample standard deviations around the SMA.
pub fn bollinger_bands(data: &[f64], period: usize, std_dev: f64) -> BollingerBands {
    if period < 2 || data.len() < period {
        return BollingerBands { upper: vec![], middle: vec![], lower: vec![] };
    }

    let middle = sma(data, period);
    let mut upper = Vec::with_capacity(middle.len());
    let mut lower = Vec::with_capacity(middle.len());

    for i in period - 1..data.len() {
        let slice = &data[i + 1 - period..=i];
        let mean = middle[i + 1 - period];
        let variance: f64 =
            slice.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (period - 1) as f64;
        let std = variance.sqrt();

        upper.push(mean + std_dev * std);
        lower.push(mean - std_dev * std);
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}

/// Average Directional Index (ADX), trend strength on a 0-100 scale
pub struct AdxResult {
    pub adx: Vec<f64>,
    pub plus_di: Vec<f64>,
    pub minus_di: Vec<f64>,
}

pub fn adx(bars: &[Bar], period: usize) -> AdxResult {
    if period == 0 || bars.len() < period * 2 + 1 {
        return AdxResult { adx: vec![], plus_di: vec![], minus_di: vec![] };
    }

    // Calculate +DM, -DM and TR
    let mut plus_dm = Vec::with_capacity(bars.len() - 1);
    let mut minus_dm = Vec::with_capacity(bars.len() - 1);
    let mut true_range = Vec::with_capacity(bars.len() - 1);

    for i in 1..bars.len() {
        let up_move = bars[i].high - bars[i - 1].high;
        let down_move = bars[i - 1].low - bars[i].low;

        plus_dm.push(if up_move > down_move && up_move > 0.0 { up_move } else { 0.0 });
        minus_dm.push(if down_move > up_move && down_move > 0.0 { down_move } else { 0.0 });

        let hl = bars[i].high - bars[i].low;
        let hc = (bars[i].high - bars[i - 1].close).abs();
        let lc = (bars[i].low - bars[i - 1].close).abs();
        true_range.push(hl.max(hc).max(lc));
    }

    // Wilder smoothing
    let mut smoothed_plus_dm = plus_dm[..period].iter().sum::<f64>();
    let mut smoothed_minus_dm = minus_dm[..period].iter().sum::<f64>();
    let mut smoothed_tr = true_range[..period].iter().sum::<f64>();

    let mut plus_di_values = Vec::new();
    let mut minus_di_values = Vec::new();
    let mut dx_values = Vec::new();

    for i in period..plus_dm.len() {
        smoothed_plus_dm = smoothed_plus_dm - smoothed_plus_dm / period as f64 + plus_dm[i];
        smoothed_minus_dm = smoothed_minus_dm - smoothed_minus_dm / period as f64 + minus_dm[i];
        smoothed_tr = smoothed_tr - smoothed_tr / period as f64 + true_range[i];

        let pdi = if smoothed_tr > 0.0 { 100.0 * smoothed_plus_dm / smoothed_tr } else { 0.0 };
        let mdi = if smoothed_tr > 0.0 { 100.0 * smoothed_minus_dm / smoothed_tr } else { 0.0 };

        plus_di_values.push(pdi);
        minus_di_values.push(mdi);

        let di_sum = pdi + mdi;
        let dx = if di_sum > 0.0 { 100.0 * (pdi - mdi).abs() / di_sum } else { 0.0 };
        dx_values.push(dx);
    }

    if dx_values.len() < period {
        return AdxResult { adx: vec![], plus_di: plus_di_values, minus_di: minus_di_values };
    }

    let mut adx_values = Vec::with_capacity(dx_values.len() - period + 1);
    let mut adx_val = dx_values[..period].iter().sum::<f64>() / period as f64;
    adx_values.push(adx_val);

    for dx in &dx_values[period..] {
        adx_val = (adx_val * (period - 1) as f64 + dx) / period as f64;
        adx_values.push(adx_val);
    }

    AdxResult {
        adx: adx_values,
        plus_di: plus_di_values,
        minus_di: minus_di_values,
    }
}

/// Volume-weighted average price over the trailing `period` bars, using the
/// typical price. `None` when the window traded no volume.
pub fn rolling_vwap(bars: &[Bar], period: usize) -> Option<f64> {
    if bars.is_empty() || period == 0 {
        return None;
    }

    let window = &bars[bars.len().saturating_sub(period)..];
    let (tpv, volume) = window.iter().fold((0.0, 0.0), |(tpv, vol), bar| {
        let typical_price = (bar.high + bar.low + bar.close) / 3.0;
        (tpv + typical_price * bar.volume, vol + bar.volume)
    });

    if volume > 0.0 {
        Some(tpv / volume)
    } else {
        None
    }
}

/// Ichimoku cloud lines computed at the latest bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IchimokuCloud {
    pub tenkan: f64,
    pub kijun: f64,
    pub senkou_a: f64,
    pub senkou_b: f64,
}

fn midpoint(bars: &[Bar], period: usize) -> f64 {
    let window = &bars[bars.len() - period..];
    let highest = window.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let lowest = window.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    (highest + lowest) / 2.0
}

pub fn ichimoku(bars: &[Bar], tenkan: usize, kijun: usize, senkou_b: usize) -> Option<IchimokuCloud> {
    let longest = tenkan.max(kijun).max(senkou_b);
    if tenkan == 0 || kijun == 0 || senkou_b == 0 || bars.len() < longest {
        return None;
    }

    let tenkan_val = midpoint(bars, tenkan);
    let kijun_val = midpoint(bars, kijun);

    Some(IchimokuCloud {
        tenkan: tenkan_val,
        kijun: kijun_val,
        senkou_a: (tenkan_val + kijun_val) / 2.0,
        senkou_b: midpoint(bars, senkou_b),
    })
}

/// Latest volume relative to the mean volume of the series (1.0 when the
/// series traded nothing).
pub fn volume_ratio(bars: &[Bar]) -> Option<f64> {
    let last = bars.last()?;
    let avg = bars.iter().map(|b| b.volume).sum::<f64>() / bars.len() as f64;
    Some(if avg > 0.0 { last.volume / avg } else { 1.0 })
}

fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Derive the latest indicator readings from a daily bar series.
///
/// Fewer than [`MIN_BARS`] bars yields an empty set; each indicator is left
/// absent when the series is too short for its own window.
pub fn compute_indicator_set(bars: &[Bar]) -> TechnicalIndicatorSet {
    if bars.len() < MIN_BARS {
        return TechnicalIndicatorSet::default();
    }

    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

    let ema_12 = ema(&closes, MACD_FAST).last().copied();
    let ema_26 = ema(&closes, MACD_SLOW).last().copied();
    let bb = bollinger_bands(&closes, BOLLINGER_PERIOD, BOLLINGER_STD);

    let adx_result = adx(bars, ADX_PERIOD);
    let (adx_value, plus_di, minus_di) = match adx_result.adx.last() {
        Some(&value) => (
            Some(round2(value)),
            adx_result.plus_di.last().map(|v| round2(*v)),
            adx_result.minus_di.last().map(|v| round2(*v)),
        ),
        None => (None, None, None),
    };

    let cloud = ichimoku(bars, ICHIMOKU_TENKAN, ICHIMOKU_KIJUN, ICHIMOKU_SENKOU_B);

    TechnicalIndicatorSet {
        rsi: rsi(&closes, RSI_PERIOD).last().copied(),
        macd: macd(&closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL).macd_line.last().copied(),
        sma_20: sma(&closes, 20).last().copied(),
        sma_50: sma(&closes, 50).last().copied(),
        sma_200: sma(&closes, 200).last().copied(),
        ema_12,
        ema_26,
        bollinger_upper: bb.upper.last().copied(),
        bollinger_lower: bb.lower.last().copied(),
        adx: adx_value,
        plus_di,
        minus_di,
        ichimoku_tenkan: cloud.map(|c| round2(c.tenkan)),
        ichimoku_kijun: cloud.map(|c| round2(c.kijun)),
        ichimoku_senkou_a: cloud.map(|c| round2(c.senkou_a)),
        ichimoku_senkou_b: cloud.map(|c| round2(c.senkou_b)),
        vwap: rolling_vwap(bars, VWAP_PERIOD),
        volume_ratio: volume_ratio(bars),
    }
}
