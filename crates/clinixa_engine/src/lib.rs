//! Clinixa engine: HTTP transport and the session controller that executes core effects.
mod client;
mod controller;
mod types;

pub use client::{AnalysisClient, ClientSettings, ReqwestAnalysisClient, DEFAULT_BASE_URL};
pub use controller::SessionController;
pub use types::{
    FailureKind, TransportError, ANALYSIS_FALLBACK, HEALTH_CHECK_FAILED, MALFORMED_RESPONSE,
    SERVER_UNREACHABLE, TIMED_OUT,
};
