//! LearnHub observability.
//!
//! - [`init_tracing`] installs the console and rolling JSON log layers.
//! - [`logging_middleware`] and [`metrics_middleware`] wrap every request.
//! - [`init_metrics`] installs the Prometheus recorder; the `track_*`
//!   helpers record domain counters and are no-ops until it is installed.

pub mod logging;
pub mod metrics;

pub use self::logging::{init_tracing, logging_middleware};
pub use self::metrics::{
    GateRejection, init_metrics, metrics_middleware, track_application_created,
    track_application_reviewed, track_assessment_generated, track_assessment_submitted,
    track_gate_rejection, track_login_failure, track_login_success,
    track_purchase_completed, track_token_issued, track_user_created,
};
pub use metrics_exporter_prometheus::PrometheusHandle;
