#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Request and error body types for the nearby server.
//!
//! Successful response bodies come from `nearby_insights_models`; this
//! crate only carries the inbound request shape and the transport-level
//! error envelope.

use serde::{Deserialize, Serialize};

/// Body of `POST /insights`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsRequest {
    /// The street address to look up.
    pub address: Option<String>,
}

/// Transport-level error envelope (bad method, bad JSON, missing
/// configuration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub ok: bool,
    /// Human-readable error description.
    pub error: String,
}

impl ErrorBody {
    /// Creates an error body with the given message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}
