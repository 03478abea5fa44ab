use serde::Serialize;

/// Per-model contribution within a daily or monthly usage record
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct ModelBreakdown {
    pub model_name: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_creation_tokens: u64,
    pub cache_read_tokens: u64,
    pub cost: f64,
}

/// Usage for a single calendar day, as reported upstream
#[derive(Debug, Clone, Serialize, Default)]
pub struct DailyUsage {
    pub date: String,
    pub cost: f64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub models_used: Vec<String>,
    pub model_breakdowns: Vec<ModelBreakdown>,
}

/// Usage for a single calendar month, aggregated by the upstream tool
/// (not recomputed from daily records here)
#[derive(Debug, Clone, Serialize, Default)]
pub struct MonthlyUsage {
    pub month: String,
    pub cost: f64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
    pub models_used: Vec<String>,
    pub model_breakdowns: Vec<ModelBreakdown>,
}

/// One 5-hour rolling billing window
#[derive(Debug, Clone, Serialize, Default)]
pub struct BlockUsage {
    pub block_id: String,
    pub start_time: String,
    pub end_time: String,
    pub is_active: bool,
    pub cost: f64,
    pub total_tokens: u64,
    pub models: Vec<String>,
}

/// Immutable aggregate over the three usage reports.
///
/// Grand totals are summed from daily records only; monthly and block
/// records are carried for display but never reconciled against them.
/// The max costs floor at 1.0 so bar-chart fill ratios never divide by zero.
#[derive(Debug, Clone, Serialize)]
pub struct UsageSnapshot {
    pub total_cost: f64,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cache_creation_tokens: u64,
    pub cache_read_tokens: u64,
    pub total_tokens: u64,
    pub daily: Vec<DailyUsage>,
    pub monthly: Vec<MonthlyUsage>,
    pub blocks: Vec<BlockUsage>,
    pub max_daily_cost: f64,
    pub max_monthly_cost: f64,
    pub max_block_cost: f64,
}
