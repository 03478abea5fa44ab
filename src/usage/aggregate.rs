//! Aggregation of the three usage reports into a single snapshot.

use serde_json::Value;

use super::decode;
use super::types::{BlockUsage, DailyUsage, MonthlyUsage, UsageSnapshot};

/// Build a [`UsageSnapshot`] from the three report payloads.
///
/// Each report is optional (a failed upstream invocation yields `None`) and
/// each is expected to carry one named array of records: `"daily"`,
/// `"monthly"`, `"blocks"`. This function is total: any missing report,
/// missing array, or malformed record degrades to defaults and the snapshot
/// is still produced.
///
/// Grand totals come from daily records only. Monthly and block data are
/// decoded for display but intentionally never folded into the totals.
/// Source order is preserved; "most recent first" is a rendering concern.
pub fn aggregate(
    daily_report: Option<&Value>,
    monthly_report: Option<&Value>,
    blocks_report: Option<&Value>,
) -> UsageSnapshot {
    let mut total_cost = 0.0f64;
    let mut input_tokens = 0u64;
    let mut output_tokens = 0u64;
    let mut cache_creation_tokens = 0u64;
    let mut cache_read_tokens = 0u64;
    let mut total_tokens = 0u64;

    let mut daily: Vec<DailyUsage> = Vec::new();
    if let Some(report) = daily_report {
        for record in decode::array_field(report, "daily") {
            let usage = decode::daily_record(record);

            total_cost += usage.cost;
            input_tokens += usage.input_tokens;
            output_tokens += usage.output_tokens;
            total_tokens += usage.total_tokens;
            // The day-level record carries no cache fields; cache totals
            // come from its per-model breakdowns.
            for breakdown in &usage.model_breakdowns {
                cache_creation_tokens += breakdown.cache_creation_tokens;
                cache_read_tokens += breakdown.cache_read_tokens;
            }

            daily.push(usage);
        }
    }

    let mut monthly: Vec<MonthlyUsage> = Vec::new();
    if let Some(report) = monthly_report {
        for record in decode::array_field(report, "monthly") {
            monthly.push(decode::monthly_record(record));
        }
    }

    let mut blocks: Vec<BlockUsage> = Vec::new();
    if let Some(report) = blocks_report {
        for record in decode::array_field(report, "blocks") {
            blocks.push(decode::block_record(record));
        }
    }

    let max_daily_cost = max_cost(daily.iter().map(|d| d.cost));
    let max_monthly_cost = max_cost(monthly.iter().map(|m| m.cost));
    let max_block_cost = max_cost(blocks.iter().map(|b| b.cost));

    UsageSnapshot {
        total_cost,
        input_tokens,
        output_tokens,
        cache_creation_tokens,
        cache_read_tokens,
        total_tokens,
        daily,
        monthly,
        blocks,
        max_daily_cost,
        max_monthly_cost,
        max_block_cost,
    }
}

/// Max cost over a sequence, flooring at 1.0 when empty so chart fill
/// ratios never divide by zero
fn max_cost(costs: impl Iterator<Item = f64>) -> f64 {
    costs.fold(None::<f64>, |acc, c| match acc {
        Some(m) => Some(m.max(c)),
        None => Some(c),
    })
    .unwrap_or(1.0)
}
