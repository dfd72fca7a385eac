//! Orchestrator probes.
//!
//! The service moves through [`Lifecycle`] phases once: `starting` until the
//! listener is bound, `serving` while it handles traffic, `draining` once the
//! server has stopped accepting work. Readiness passes only while serving;
//! liveness fails only while draining.

use std::sync::atomic::{AtomicU8, Ordering};

use actix_web::{HttpResponse, HttpResponseBuilder, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Service lifecycle phase reported by the probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    Starting,
    Serving,
    Draining,
}

impl Lifecycle {
    const fn to_u8(self) -> u8 {
        match self {
            Self::Starting => 0,
            Self::Serving => 1,
            Self::Draining => 2,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Starting,
            1 => Self::Serving,
            _ => Self::Draining,
        }
    }
}

/// Probe payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeStatus {
    #[schema(example = "serving")]
    pub status: Lifecycle,
}

/// Shared lifecycle flag, written by the bootstrap and read by the probes.
#[derive(Debug)]
pub struct HealthState {
    phase: AtomicU8,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            phase: AtomicU8::new(Lifecycle::Starting.to_u8()),
        }
    }
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from_u8(self.phase.load(Ordering::Acquire))
    }

    /// Move from `starting` to `serving`. Has no effect once draining.
    pub fn mark_serving(&self) {
        // A failed exchange means shutdown already started.
        let _ = self.phase.compare_exchange(
            Lifecycle::Starting.to_u8(),
            Lifecycle::Serving.to_u8(),
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }

    pub fn mark_draining(&self) {
        self.phase
            .store(Lifecycle::Draining.to_u8(), Ordering::Release);
    }
}

fn probe(mut builder: HttpResponseBuilder, status: Lifecycle) -> HttpResponse {
    builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(ProbeStatus { status })
}

/// Readiness probe: 200 only while serving.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    responses(
        (status = 200, description = "Serving traffic", body = ProbeStatus),
        (status = 503, description = "Starting or draining", body = ProbeStatus)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    match state.lifecycle() {
        Lifecycle::Serving => probe(HttpResponse::Ok(), Lifecycle::Serving),
        other => probe(HttpResponse::ServiceUnavailable(), other),
    }
}

/// Liveness probe: 503 only while draining.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    responses(
        (status = 200, description = "Process is up", body = ProbeStatus),
        (status = 503, description = "Draining", body = ProbeStatus)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    match state.lifecycle() {
        Lifecycle::Draining => probe(HttpResponse::ServiceUnavailable(), Lifecycle::Draining),
        other => probe(HttpResponse::Ok(), other),
    }
}
