//! Router-level test harness backed by in-memory stores

use std::sync::Arc;
use std::time::Duration;

use axum::Router;

use dakiya::testing::ScriptedProvider;
use dakiya::{EscalationPolicy, TelephonyClient, TurnProcessor};

use crate::adapters::{InMemoryCallSessionRepository, InMemorySettingsRepository, TwimlFormatter};
use crate::application::{CallService, DashboardService};
use crate::AppState;

pub struct TestApp {
    pub state: AppState,
    pub sessions: Arc<InMemoryCallSessionRepository>,
    pub settings: Arc<InMemorySettingsRepository>,
}

impl TestApp {
    pub fn new(provider: ScriptedProvider) -> Self {
        Self::with_shared_provider(Arc::new(provider))
    }

    pub fn with_shared_provider(provider: Arc<ScriptedProvider>) -> Self {
        let sessions = Arc::new(InMemoryCallSessionRepository::new());
        let settings = Arc::new(InMemorySettingsRepository::new());

        let processor = TurnProcessor::new(provider).with_timeout(Duration::from_millis(500));
        let call_service = CallService::new(
            sessions.clone(),
            settings.clone(),
            processor,
            EscalationPolicy::new(),
        );
        let dashboard = DashboardService::new(sessions.clone(), settings.clone());

        Self {
            state: AppState {
                call_service: Arc::new(call_service),
                dashboard: Arc::new(dashboard),
                twiml: Arc::new(TwimlFormatter::default()),
            },
            sessions,
            settings,
        }
    }

    pub fn with_telephony(mut self, telephony: Arc<dyn TelephonyClient>) -> Self {
        let dashboard = DashboardService::new(self.sessions.clone(), self.settings.clone())
            .with_telephony(telephony, Some("https://dakiya.test".to_string()));
        self.state.dashboard = Arc::new(dashboard);
        self
    }

    pub fn router(&self) -> Router {
        crate::app(self.state.clone())
    }
}
