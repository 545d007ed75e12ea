// SPDX-License-Identifier: MPL-2.0
//! Backend health and process metrics for the dashboard.
//!
//! Metrics are polled, so a failed poll is simply reported and the next one
//! tried; these calls make a single attempt.

use super::Client;
use crate::error::{Error, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;

const UNKNOWN_STATUS: &str = "UNKNOWN";

/// One dashboard sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    /// Overall application status (`UP`, `DOWN`, ...).
    pub status: String,
    /// Status of the model server component, `UNKNOWN` when not reported.
    pub ollama_status: String,
    pub uptime_secs: f64,
    pub memory_used_bytes: f64,
}

impl Metrics {
    #[must_use]
    pub fn is_up(status: &str) -> bool {
        status == "UP"
    }
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
    #[serde(default)]
    components: Option<Components>,
}

#[derive(Debug, Deserialize)]
struct Components {
    #[serde(default)]
    ollama: Option<Component>,
}

#[derive(Debug, Deserialize)]
struct Component {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MetricBody {
    #[serde(default)]
    measurements: Vec<Measurement>,
}

#[derive(Debug, Deserialize)]
struct Measurement {
    value: f64,
}

impl MetricBody {
    fn first_value(&self) -> Result<f64> {
        self.measurements
            .first()
            .map(|measurement| measurement.value)
            .ok_or_else(|| Error::Decode("metric has no measurements".to_string()))
    }
}

impl HealthBody {
    fn ollama_status(&self) -> String {
        self.components
            .as_ref()
            .and_then(|components| components.ollama.as_ref())
            .and_then(|ollama| ollama.status.clone())
            .filter(|status| !status.is_empty())
            .unwrap_or_else(|| UNKNOWN_STATUS.to_string())
    }
}

impl Client {
    /// Fetches health, uptime and memory concurrently.
    pub async fn fetch_metrics(&self) -> Result<Metrics> {
        let (health, uptime, memory) = futures_util::future::try_join3(
            self.get_json::<HealthBody>("/actuator/health"),
            self.get_json::<MetricBody>("/actuator/metrics/process.uptime"),
            self.get_json::<MetricBody>("/actuator/metrics/jvm.memory.used"),
        )
        .await?;

        Ok(Metrics {
            ollama_status: health.ollama_status(),
            status: health.status,
            uptime_secs: uptime.first_value()?,
            memory_used_bytes: memory.first_value()?,
        })
    }

    /// Checks that the backend answers at all.
    pub async fn ping(&self) -> Result<String> {
        let response = self.request(Method::GET, "/api/chat/ping").send().await?;
        super::text_or_error(response).await
    }

    /// Reads a JSON body whatever the status: the health endpoint reports
    /// `DOWN` with a 503 and a regular body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|err| {
            if (200..300).contains(&status) {
                Error::from(err)
            } else {
                Error::from_response_body(status, &body)
            }
        })
    }
}

/// Formats seconds as `"{h}h {m}m {s}s"`, truncating fractions.
#[must_use]
pub fn format_uptime(secs: f64) -> String {
    let total = if secs.is_finite() && secs > 0.0 {
        secs as u64
    } else {
        0
    };
    format!("{}h {}m {}s", total / 3600, (total % 3600) / 60, total % 60)
}

/// Formats a byte count in mebibytes with two decimals.
#[must_use]
pub fn format_bytes(bytes: f64) -> String {
    format!("{:.2} MB", bytes / (1024.0 * 1024.0))
}
