use std::sync::Arc;

use anyhow::Context;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod adapters;
mod application;
mod config;
mod models;
mod routes;
#[cfg(test)]
mod test_support;

use adapters::{
    InMemoryCallSessionRepository, InMemorySettingsRepository, OpenAiProvider,
    PgCallSessionRepository, PgSettingsRepository, TwilioClient, TwimlFormatter,
    UnconfiguredProvider,
};
use application::{CallService, DashboardService};
use config::{AppConfig, SessionStoreKind};
use dakiya::{
    CallSessionRepository, EscalationPolicy, LlmProvider, SettingsRepository, TurnProcessor,
};

/// Application state shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub call_service: Arc<CallService>,
    pub dashboard: Arc<DashboardService>,
    pub twiml: Arc<TwimlFormatter>,
}

#[derive(Serialize)]
struct HealthCheck {
    status: String,
    message: String,
    version: String,
}

async fn health_check() -> Json<HealthCheck> {
    Json(HealthCheck {
        status: "ok".to_string(),
        message: "Dakiya API is running - the assistant is taking calls".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Full HTTP surface: telephony webhooks, dashboard API and docs
pub fn app(state: AppState) -> Router {
    let openapi = routes::swagger::ApiDoc::openapi();

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi))
        .route("/health", get(health_check))
        .merge(routes::voice::router())
        .merge(routes::call_log::router())
        .merge(routes::stats::router())
        .merge(routes::settings::router())
        .merge(routes::test_call::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[shuttle_runtime::main]
async fn main(
    #[shuttle_shared_db::Postgres] pool: PgPool,
    #[shuttle_runtime::Secrets] secrets: shuttle_runtime::SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing::info!("📞 Dakiya API initializing...");

    let config = AppConfig::from_lookup(|key| secrets.get(key)).context("Invalid configuration")?;

    // Session and settings stores
    let (sessions, settings): (Arc<dyn CallSessionRepository>, Arc<dyn SettingsRepository>) =
        match config.session_store {
            SessionStoreKind::Postgres => {
                sqlx::migrate!()
                    .run(&pool)
                    .await
                    .context("Failed to run database migrations")?;
                tracing::info!("✅ Database migrations completed");

                (
                    Arc::new(PgCallSessionRepository::new(pool.clone())),
                    Arc::new(PgSettingsRepository::new(pool)),
                )
            }
            SessionStoreKind::Memory => {
                tracing::warn!("⚠️  SESSION_STORE=memory - call logs are lost on restart");
                (
                    Arc::new(InMemoryCallSessionRepository::new()),
                    Arc::new(InMemorySettingsRepository::new()),
                )
            }
        };

    // Language model
    let provider: Arc<dyn LlmProvider> = match &config.llm.api_key {
        Some(key) => {
            let provider = OpenAiProvider::new(&config.llm, key.clone())
                .context("Failed to build language model client")?;
            tracing::info!(model = %config.llm.model, "🤖 Language model configured");
            Arc::new(provider)
        }
        None => {
            tracing::warn!("⚠️  No OPENAI_API_KEY set - every turn hands off to a human");
            Arc::new(UnconfiguredProvider)
        }
    };

    let processor = TurnProcessor::new(provider)
        .with_options(config.llm.completion_options())
        .with_timeout(config.llm.timeout);
    let policy = EscalationPolicy::new().with_max_turns(config.max_turns);

    let call_service = CallService::new(sessions.clone(), settings.clone(), processor, policy);

    // Outbound test calls
    let mut dashboard = DashboardService::new(sessions, settings);
    match config.twilio.clone() {
        Some(twilio) => {
            if config.public_base_url.is_none() {
                tracing::warn!("⚠️  No PUBLIC_BASE_URL set - test calls disabled");
            }
            dashboard = dashboard.with_telephony(
                Arc::new(TwilioClient::new(twilio).context("Failed to build Twilio client")?),
                config.public_base_url.clone(),
            );
            tracing::info!("☎️  Twilio client initialized");
        }
        None => tracing::warn!("⚠️  Twilio credentials missing - test calls disabled"),
    }

    let state = AppState {
        call_service: Arc::new(call_service),
        dashboard: Arc::new(dashboard),
        twiml: Arc::new(TwimlFormatter::new(config.voice)),
    };

    tracing::info!("📚 Swagger UI: /swagger-ui");
    tracing::info!("✅ Dakiya API ready");

    Ok(app(state).into())
}
