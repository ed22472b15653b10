//! Aggregate call statistics

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use dakiya::CallStats;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total_calls: i64,
    pub successful_deliveries: i64,
    pub escalated_calls: i64,
    /// Seconds, over calls with a recorded duration
    pub average_duration: f64,
    /// Percent of all calls that ended completed
    pub success_rate: f64,
}

impl From<CallStats> for StatsResponse {
    fn from(stats: CallStats) -> Self {
        Self {
            total_calls: stats.total_calls,
            successful_deliveries: stats.successful_deliveries,
            escalated_calls: stats.escalated_calls,
            average_duration: stats.average_duration,
            success_rate: stats.success_rate,
        }
    }
}
