use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Drop values that cannot take part in arithmetic (NaN, ±inf).
///
/// Every scorer reads its numeric inputs through this so a garbage value is
/// handled exactly like a missing one.
pub fn known(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Like [`known`], but additionally requires the value to be strictly positive.
/// Used for prices and volumes that appear as denominators.
pub fn positive(value: Option<f64>) -> Option<f64> {
    known(value).filter(|v| *v > 0.0)
}

/// OHLCV bar data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    #[serde(default)]
    pub vwap: Option<f64>,
}

/// A piece of user-submitted commentary about a security (e.g. a forum post).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentaryRecord {
    /// Body length in characters
    #[serde(alias = "post_length")]
    pub text_length: u64,
    /// Net upvotes
    #[serde(alias = "score")]
    pub upvotes: i64,
    #[serde(alias = "num_comments")]
    pub comment_count: i64,
    /// Fraction of votes that were upvotes, expected in [0, 1]
    pub upvote_ratio: f64,
    /// Category tag attached by the author
    pub flair: Option<String>,
    /// Community the commentary was posted to
    #[serde(alias = "subreddit")]
    pub community: Option<String>,
}

/// Point-in-time technical indicator readings. Every field is optional; an
/// absent reading simply removes that indicator from the vote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalIndicatorSet {
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub sma_200: Option<f64>,
    pub ema_12: Option<f64>,
    pub ema_26: Option<f64>,
    pub bollinger_upper: Option<f64>,
    pub bollinger_lower: Option<f64>,
    pub adx: Option<f64>,
    pub plus_di: Option<f64>,
    pub minus_di: Option<f64>,
    pub ichimoku_tenkan: Option<f64>,
    pub ichimoku_kijun: Option<f64>,
    pub ichimoku_senkou_a: Option<f64>,
    pub ichimoku_senkou_b: Option<f64>,
    pub vwap: Option<f64>,
    pub volume_ratio: Option<f64>,
}

impl TechnicalIndicatorSet {
    /// True when no reading is usable.
    pub fn is_empty(&self) -> bool {
        [
            self.rsi,
            self.macd,
            self.sma_20,
            self.sma_50,
            self.sma_200,
            self.ema_12,
            self.ema_26,
            self.bollinger_upper,
            self.bollinger_lower,
            self.adx,
            self.plus_di,
            self.minus_di,
            self.ichimoku_tenkan,
            self.ichimoku_kijun,
            self.ichimoku_senkou_a,
            self.ichimoku_senkou_b,
            self.vwap,
            self.volume_ratio,
        ]
        .iter()
        .all(|v| known(*v).is_none())
    }
}

/// Return lookback periods, in the order used by the momentum weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonths,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "2Y")]
    TwoYears,
    #[serde(rename = "3Y")]
    ThreeYears,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::ThreeYears,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Period::OneMonth => "1M",
            Period::ThreeMonths => "3M",
            Period::SixMonths => "6M",
            Period::OneYear => "1Y",
            Period::TwoYears => "2Y",
            Period::ThreeYears => "3Y",
        }
    }

    /// Calendar days covered by the period
    pub fn lookback_days(&self) -> i64 {
        match self {
            Period::OneMonth => 30,
            Period::ThreeMonths => 90,
            Period::SixMonths => 180,
            Period::OneYear => 365,
            Period::TwoYears => 730,
            Period::ThreeYears => 1095,
        }
    }
}

/// Percentage returns per lookback period (e.g. `12.5` = +12.5%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MultiTimeframePerformance {
    #[serde(rename = "1M")]
    pub one_month: Option<f64>,
    #[serde(rename = "3M")]
    pub three_months: Option<f64>,
    #[serde(rename = "6M")]
    pub six_months: Option<f64>,
    #[serde(rename = "1Y")]
    pub one_year: Option<f64>,
    #[serde(rename = "2Y")]
    pub two_years: Option<f64>,
    #[serde(rename = "3Y")]
    pub three_years: Option<f64>,
}

impl MultiTimeframePerformance {
    pub fn get(&self, period: Period) -> Option<f64> {
        let raw = match period {
            Period::OneMonth => self.one_month,
            Period::ThreeMonths => self.three_months,
            Period::SixMonths => self.six_months,
            Period::OneYear => self.one_year,
            Period::TwoYears => self.two_years,
            Period::ThreeYears => self.three_years,
        };
        known(raw)
    }

    pub fn set(&mut self, period: Period, value: Option<f64>) {
        let slot = match period {
            Period::OneMonth => &mut self.one_month,
            Period::ThreeMonths => &mut self.three_months,
            Period::SixMonths => &mut self.six_months,
            Period::OneYear => &mut self.one_year,
            Period::TwoYears => &mut self.two_years,
            Period::ThreeYears => &mut self.three_years,
        };
        *slot = value;
    }

    /// Builder-style setter, handy for fixtures.
    pub fn with(mut self, period: Period, value: f64) -> Self {
        self.set(period, Some(value));
        self
    }

    /// Present periods in table order.
    pub fn present(&self) -> impl Iterator<Item = (Period, f64)> + '_ {
        Period::ALL
            .into_iter()
            .filter_map(move |p| self.get(p).map(|v| (p, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// Snapshot of a tradable security as handed over by the data-fetching layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySnapshot {
    pub symbol: String,
    pub price: Option<f64>,
    #[serde(alias = "52w_high")]
    pub high_52w: Option<f64>,
    #[serde(alias = "52w_low")]
    pub low_52w: Option<f64>,
    pub volume: Option<f64>,
    pub avg_volume: Option<f64>,
    pub beta: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub current_ratio: Option<f64>,
    /// Net margin as a fraction (0.12 = 12%)
    pub profit_margin: Option<f64>,
    pub market_cap: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub peg_ratio: Option<f64>,
    pub price_to_book: Option<f64>,
    pub price_target: Option<f64>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    #[serde(alias = "technical_indicators")]
    pub indicators: TechnicalIndicatorSet,
    #[serde(alias = "mtf_performance")]
    pub performance: MultiTimeframePerformance,
}

/// Historical performance metrics. All percentages are in percent units;
/// `max_drawdown` is negative (e.g. `-35.2`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestResult {
    pub total_return: Option<f64>,
    pub annualized_return: Option<f64>,
    pub volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub sortino_ratio: Option<f64>,
    pub calmar_ratio: Option<f64>,
    pub max_drawdown: Option<f64>,
    pub win_rate: Option<f64>,
    pub profit_factor: Option<f64>,
    pub beta: Option<f64>,
    /// Annualised return above what beta to the benchmark explains
    pub alpha: Option<f64>,
    pub benchmark_return: Option<f64>,
    pub excess_return: Option<f64>,
    pub trading_days: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Single-letter suffix used in compact strike labels ("150C")
    pub fn suffix(&self) -> char {
        match self {
            OptionType::Call => 'C',
            OptionType::Put => 'P',
        }
    }
}

/// A strike whose traded volume is large relative to its open interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnusualStrike {
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub strike: f64,
    pub volume: u64,
    #[serde(default, alias = "oi")]
    pub open_interest: u64,
    /// Volume divided by open interest
    pub ratio: f64,
}

/// Summary of the nearest-expiry options chain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsChainSummary {
    pub pc_ratio: Option<f64>,
    pub max_pain: Option<f64>,
    /// Sorted by ratio, highest first
    pub unusual_strikes: Vec<UnusualStrike>,
    #[serde(alias = "total_call_vol")]
    pub total_call_volume: u64,
    #[serde(alias = "total_put_vol")]
    pub total_put_volume: u64,
    pub total_call_oi: u64,
    pub total_put_oi: u64,
    pub expiry: String,
}

/// Directional read shared by the classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl Bias {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bias::Bullish => "BULLISH",
            Bias::Bearish => "BEARISH",
            Bias::Neutral => "NEUTRAL",
        }
    }
}
