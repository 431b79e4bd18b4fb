use credit_ai::config::AppConfig;
use credit_ai::decisions::{DecisionService, PrequalConfig};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the decision service with any environment policy overrides applied
/// over the compiled defaults.
pub(crate) fn decision_service(config: &AppConfig) -> DecisionService {
    DecisionService::new(config.policy.apply(PrequalConfig::default()))
}

pub(crate) fn default_decision_service() -> DecisionService {
    DecisionService::new(PrequalConfig::default())
}
