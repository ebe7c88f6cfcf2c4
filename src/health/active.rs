//! Collector liveness probe.
//!
//! # Responsibilities
//! - Periodically send a bare GET to the log collector
//! - Report the status code or transport error on the diagnostic channel

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::config::{CollectorConfig, ProbeConfig};
use crate::lifecycle::ShutdownSignal;

/// Result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The collector answered, with any status.
    Responded(StatusCode),
    /// Connection refused, DNS failure, malformed target, etc.
    Failed(String),
}

pub struct CollectorProber {
    client: Client<HttpConnector, Body>,
    target: String,
    interval: Duration,
}

impl CollectorProber {
    pub fn new(collector: &CollectorConfig, probe: &ProbeConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Self {
            client,
            target: format!("{}{}", collector.base_url(), probe.path),
            interval: Duration::from_secs(probe.interval_secs.max(1)),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Probe on every tick until shutdown. The first probe fires one
    /// interval after start.
    pub async fn run(self, mut shutdown: ShutdownSignal) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            target = %self.target,
            "Collector prober starting"
        );

        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    // Detached: a hanging probe never delays the next one.
                    let client = self.client.clone();
                    let target = self.target.clone();
                    tokio::spawn(async move {
                        report(&probe(&client, &target).await);
                    });
                }
                _ = shutdown.wait() => {
                    tracing::info!("Collector prober received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Run one probe and return its outcome without reporting it.
    pub async fn probe_once(&self) -> ProbeOutcome {
        probe(&self.client, &self.target).await
    }
}

async fn probe(client: &Client<HttpConnector, Body>, target: &str) -> ProbeOutcome {
    let request = match Request::builder()
        .method("GET")
        .uri(target)
        .header("user-agent", "elk-logging-app-probe")
        .body(Body::empty())
    {
        Ok(req) => req,
        Err(e) => return ProbeOutcome::Failed(format!("invalid probe request: {e}")),
    };

    match client.request(request).await {
        Ok(response) => ProbeOutcome::Responded(response.status()),
        Err(e) => ProbeOutcome::Failed(e.to_string()),
    }
}

fn report(outcome: &ProbeOutcome) {
    match outcome {
        ProbeOutcome::Responded(status) => {
            tracing::info!(status = status.as_u16(), "Collector health check status");
        }
        ProbeOutcome::Failed(error) => {
            tracing::error!(error = %error, "Error checking collector health");
        }
    }
}
