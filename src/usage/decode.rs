//! Best-effort extraction of usage records from loosely-typed report JSON.
//!
//! The upstream tool's output is treated as untrusted: every field is read
//! with an explicit default (strings → "", costs → 0.0, counts → 0, arrays
//! → empty), so malformed records degrade to zeroed fields instead of
//! failing the whole aggregation. The default policy lives here and nowhere
//! else.

use serde_json::Value;

use super::types::{BlockUsage, DailyUsage, ModelBreakdown, MonthlyUsage};

pub fn str_field(record: &Value, key: &str) -> String {
    record
        .get(key)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string()
}

pub fn f64_field(record: &Value, key: &str) -> f64 {
    record.get(key).and_then(|v| v.as_f64()).unwrap_or(0.0)
}

pub fn u64_field(record: &Value, key: &str) -> u64 {
    record.get(key).and_then(|v| v.as_u64()).unwrap_or(0)
}

pub fn bool_field(record: &Value, key: &str) -> bool {
    record.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
}

/// Read an array field as a slice, empty when absent or mistyped
pub fn array_field<'a>(record: &'a Value, key: &str) -> &'a [Value] {
    record
        .get(key)
        .and_then(|v| v.as_array())
        .map(|v| v.as_slice())
        .unwrap_or(&[])
}

/// Read an array of strings, skipping non-string elements
pub fn string_list(record: &Value, key: &str) -> Vec<String> {
    array_field(record, key)
        .iter()
        .filter_map(|v| v.as_str())
        .map(str::to_string)
        .collect()
}

pub fn model_breakdown(record: &Value) -> ModelBreakdown {
    ModelBreakdown {
        model_name: str_field(record, "modelName"),
        input_tokens: u64_field(record, "inputTokens"),
        output_tokens: u64_field(record, "outputTokens"),
        cache_creation_tokens: u64_field(record, "cacheCreationTokens"),
        cache_read_tokens: u64_field(record, "cacheReadTokens"),
        cost: f64_field(record, "cost"),
    }
}

fn model_breakdowns(record: &Value) -> Vec<ModelBreakdown> {
    array_field(record, "modelBreakdowns")
        .iter()
        .map(model_breakdown)
        .collect()
}

pub fn daily_record(record: &Value) -> DailyUsage {
    DailyUsage {
        date: str_field(record, "date"),
        cost: f64_field(record, "totalCost"),
        input_tokens: u64_field(record, "inputTokens"),
        output_tokens: u64_field(record, "outputTokens"),
        total_tokens: u64_field(record, "totalTokens"),
        models_used: string_list(record, "modelsUsed"),
        model_breakdowns: model_breakdowns(record),
    }
}

pub fn monthly_record(record: &Value) -> MonthlyUsage {
    MonthlyUsage {
        month: str_field(record, "month"),
        cost: f64_field(record, "totalCost"),
        input_tokens: u64_field(record, "inputTokens"),
        output_tokens: u64_field(record, "outputTokens"),
        total_tokens: u64_field(record, "totalTokens"),
        models_used: string_list(record, "modelsUsed"),
        model_breakdowns: model_breakdowns(record),
    }
}

/// Block records name their cost `costUSD`, unlike daily/monthly `totalCost`
pub fn block_record(record: &Value) -> BlockUsage {
    BlockUsage {
        block_id: str_field(record, "id"),
        start_time: str_field(record, "startTime"),
        end_time: str_field(record, "endTime"),
        is_active: bool_field(record, "isActive"),
        cost: f64_field(record, "costUSD"),
        total_tokens: u64_field(record, "totalTokens"),
        models: string_list(record, "models"),
    }
}
