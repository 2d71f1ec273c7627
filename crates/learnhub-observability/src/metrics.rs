use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use ::metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::{Duration, Instant};

const DURATION_BUCKETS: &[f64] = &[
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

/// Installs the global Prometheus recorder and spawns its upkeep task.
///
/// Must be called from inside a Tokio runtime, once per process.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            DURATION_BUCKETS,
        )?
        .install_recorder()?;

    let upkeep = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep.run_upkeep();
        }
    });

    Ok(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(start.elapsed().as_secs_f64());

    response
}

/// Why a gate turned a request away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    MissingToken,
    InvalidToken,
    ExpiredToken,
    IdentityNotFound,
    Forbidden,
}

impl GateRejection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::ExpiredToken => "expired_token",
            Self::IdentityNotFound => "identity_not_found",
            Self::Forbidden => "forbidden",
        }
    }
}

pub fn track_gate_rejection(reason: GateRejection) {
    counter!("auth_gate_rejections_total", "reason" => reason.as_str()).increment(1);
}

pub fn track_user_created(role: &str) {
    counter!("users_created_total", "role" => role.to_string()).increment(1);
}

pub fn track_login_success(role: &str) {
    counter!("user_logins_total", "role" => role.to_string(), "status" => "success").increment(1);
}

pub fn track_login_failure(reason: &str) {
    counter!("user_logins_total", "reason" => reason.to_string(), "status" => "failure")
        .increment(1);
}

pub fn track_token_issued() {
    counter!("tokens_issued_total").increment(1);
}

pub fn track_application_created() {
    counter!("educator_applications_created_total").increment(1);
}

pub fn track_application_reviewed(outcome: &str) {
    counter!("educator_applications_reviewed_total", "outcome" => outcome.to_string())
        .increment(1);
}

pub fn track_purchase_completed(amount: i64) {
    counter!("purchases_completed_total").increment(1);
    counter!("purchase_revenue_minor_units_total").increment(amount.max(0) as u64);
}

pub fn track_assessment_generated(outcome: &'static str) {
    counter!("assessments_generated_total", "outcome" => outcome).increment(1);
}

/// Records the score as a fraction of the question count.
pub fn track_assessment_submitted(score: i32, total: usize) {
    counter!("assessments_submitted_total").increment(1);
    if total > 0 {
        histogram!("assessment_score_ratio").record(f64::from(score.max(0)) / total as f64);
    }
}
