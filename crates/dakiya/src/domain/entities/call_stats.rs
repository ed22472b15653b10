//! CallStats - Aggregate numbers over all call sessions

use serde::{Deserialize, Serialize};

use crate::domain::entities::CallSession;
use crate::domain::value_objects::CallStatus;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallStats {
    pub total_calls: i64,
    /// Calls that ended `completed`
    pub successful_deliveries: i64,
    pub escalated_calls: i64,
    /// Mean duration in seconds over calls that recorded one
    pub average_duration: f64,
    /// `successful_deliveries / total_calls * 100`, 0 when there are no calls
    pub success_rate: f64,
}

impl CallStats {
    pub fn from_counts(
        total_calls: i64,
        successful_deliveries: i64,
        escalated_calls: i64,
        average_duration: Option<f64>,
    ) -> Self {
        let success_rate = if total_calls > 0 {
            successful_deliveries as f64 / total_calls as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total_calls,
            successful_deliveries,
            escalated_calls,
            average_duration: average_duration.unwrap_or(0.0),
            success_rate,
        }
    }

    pub fn from_sessions<'a>(sessions: impl IntoIterator<Item = &'a CallSession>) -> Self {
        let mut total = 0i64;
        let mut completed = 0i64;
        let mut escalated = 0i64;
        let mut duration_sum = 0i64;
        let mut with_duration = 0i64;

        for session in sessions {
            total += 1;
            match session.status {
                CallStatus::Completed => completed += 1,
                CallStatus::Escalated => escalated += 1,
                _ => {}
            }
            if let Some(secs) = session.duration_secs {
                duration_sum += secs;
                with_duration += 1;
            }
        }

        let average = (with_duration > 0).then(|| duration_sum as f64 / with_duration as f64);
        Self::from_counts(total, completed, escalated, average)
    }
}
