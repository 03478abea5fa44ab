mod aggregate;
mod decode;
pub mod runner;
mod types;

pub use aggregate::aggregate;
pub use types::{BlockUsage, DailyUsage, ModelBreakdown, MonthlyUsage, UsageSnapshot};
