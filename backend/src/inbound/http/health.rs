//! Health endpoints: liveness & readiness probes for orchestration and load balancers.
//! Document endpoints in OpenAPI via Utoipa.
//!
//! Probe outcomes are not faults. A failing probe is a bare 503 that passes
//! the exception boundary untouched, while the correlation stage still
//! stamps `x-correlation-id` on it like any other response.
use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::ApiResponse;

/// Which orchestration probe is being answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Can the service take movie traffic?
    Readiness,
    /// Should the process keep running?
    Liveness,
}

/// Body of a passing probe, wrapped in the usual `data` envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct ProbeReport {
    status: &'static str,
}

/// Shared health state for readiness and liveness checks.
/// The service starts unready, becomes ready once the listener is bound and
/// the catalogue is wired, and fails both probes after draining begins.
pub struct HealthState {
    ready: AtomicBool,
    draining: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            draining: AtomicBool::new(false),
        }
    }
}

impl HealthState {
    /// Create a new health state starting as not ready but live.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready to serve the movie API.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Start draining: readiness and liveness both report 503 from now on.
    pub fn begin_draining(&self) {
        self.draining.store(true, Ordering::Release);
    }

    /// Whether `probe` currently passes.
    pub fn passes(&self, probe: Probe) -> bool {
        let draining = self.draining.load(Ordering::Acquire);
        match probe {
            Probe::Readiness => !draining && self.ready.load(Ordering::Acquire),
            Probe::Liveness => !draining,
        }
    }

    fn respond(&self, probe: Probe) -> HttpResponse {
        if self.passes(probe) {
            let status = match probe {
                Probe::Readiness => "ready",
                Probe::Liveness => "alive",
            };
            HttpResponse::Ok()
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .json(ApiResponse::success(ProbeReport { status }))
        } else {
            HttpResponse::ServiceUnavailable()
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .finish()
        }
    }
}

/// Readiness probe. Return 200 once the catalogue is wired and the listener is bound; return 503 otherwise.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle movie traffic"),
        (
            status = 405,
            description = "Method not allowed; only GET probes are supported"
        ),
        (status = 503, description = "Server is starting or draining")
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(Probe::Readiness)
}

/// Liveness probe. Return 200 until draining begins and 503 afterwards.
/// Call `HealthState::begin_draining` before graceful shutdown to surface the drain early.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive"),
        (
            status = 405,
            description = "Method not allowed; only GET probes are supported"
        ),
        (
            status = 503,
            description = "Server is shutting down"
        )
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(Probe::Liveness)
}
