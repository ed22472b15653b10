//! Stats Routes

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use super::error_response;
use crate::models::StatsResponse;
use crate::AppState;

/// Aggregate call statistics
#[utoipa::path(
    get,
    path = "/api/stats",
    responses(
        (status = 200, description = "Call statistics", body = StatsResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Stats"
)]
pub async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, (StatusCode, String)> {
    let stats = state.dashboard.stats().await.map_err(error_response)?;
    Ok(Json(stats.into()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/stats", get(get_stats))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use dakiya::testing::ScriptedProvider;
    use dakiya::{CallSessionRepository, CallStatus, NewCallSession, SessionUpdate};

    use crate::models::StatsResponse;
    use crate::test_support::TestApp;

    #[tokio::test]
    async fn test_stats() {
        let app = TestApp::new(ScriptedProvider::new());
        for status in [CallStatus::Completed, CallStatus::Completed, CallStatus::Escalated] {
            let session = app
                .sessions
                .create(NewCallSession::new("+91 98765 43210"))
                .await
                .unwrap();
            app.sessions
                .merge(session.id, SessionUpdate {
                    duration_secs: Some(60),
                    ..SessionUpdate::status(status)
                })
                .await
                .unwrap();
        }
        app.sessions
            .create(NewCallSession::new("+91 98765 43211"))
            .await
            .unwrap();

        let response = app
            .router()
            .oneshot(Request::get("/api/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let stats: StatsResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(stats.total_calls, 4);
        assert_eq!(stats.successful_deliveries, 2);
        assert_eq!(stats.escalated_calls, 1);
        assert_eq!(stats.average_duration, 60.0);
        assert_eq!(stats.success_rate, 50.0);
    }
}
