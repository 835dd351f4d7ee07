//! Logging and metrics setup

use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides the defaults.
pub fn init_tracing() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("auth_api=info".parse()?)
                .add_directive("latchkey_auth_core=info".parse()?)
                .add_directive("latchkey_db=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
    Ok(())
}

/// Install the Prometheus recorder and describe the service metrics
pub fn setup_metrics() -> anyhow::Result<PrometheusHandle> {
    // Sign-up, sign-in and change-password pay one Argon2 hash each, so
    // the upper buckets matter more than for typical handlers
    let command_latency_buckets = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("latchkey_command_duration_seconds".to_string()),
            command_latency_buckets,
        )?
        .install_recorder()?;

    metrics::describe_counter!(
        "latchkey_commands_total",
        "Total commands handled by command and outcome"
    );
    metrics::describe_histogram!(
        "latchkey_command_duration_seconds",
        "Command latency in seconds by command"
    );
    metrics::describe_counter!(
        "latchkey_snapshot_failures_total",
        "Mutations whose snapshot could not be saved"
    );

    Ok(handle)
}
