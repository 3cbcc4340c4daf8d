//! Query metrics and tracing helpers.
//!
//! With the `metrics` feature, adapter calls are counted and timed through OpenTelemetry
//! instruments exported into a Prometheus registry ([`BuoyMetrics::registry`]). The meter
//! provider behind them belongs to [`BuoyMetrics`]; the process-global OpenTelemetry
//! provider is left to the application.
//! With the `tracing` feature, each adapter call runs inside an `info` span.

#[cfg(feature = "metrics")]
pub use prometheus_metrics::{BuoyMetrics, METRICS};

#[cfg(feature = "metrics")]
mod prometheus_metrics {
    use once_cell::sync::Lazy;
    use opentelemetry::{
        global,
        metrics::{Counter, Histogram, MeterProvider as _},
    };
    use opentelemetry_sdk::metrics::SdkMeterProvider;
    use std::time::Duration;

    pub static METRICS: Lazy<BuoyMetrics> = Lazy::new(BuoyMetrics::init);

    pub struct BuoyMetrics {
        pub registry: prometheus::Registry,
        pub queries_total: Counter<u64>,
        pub query_errors_total: Counter<u64>,
        pub not_found_total: Counter<u64>,
        pub query_duration: Histogram<f64>,
        // Never installed as the global provider.
        _provider: Option<SdkMeterProvider>,
    }

    impl BuoyMetrics {
        pub fn init() -> Self {
            let registry = prometheus::Registry::new();
            let (meter, provider) = match opentelemetry_prometheus::exporter()
                .with_registry(registry.clone())
                .build()
            {
                Ok(exporter) => {
                    let provider = SdkMeterProvider::builder().with_reader(exporter).build();
                    (provider.meter("buoy"), Some(provider))
                }
                Err(e) => {
                    log::warn!("prometheus exporter unavailable, metrics are not exported: {e}");
                    (global::meter("buoy"), None)
                }
            };

            let queries_total = meter
                .u64_counter("buoy_queries_total")
                .with_description("Total adapter calls")
                .build();

            let query_errors_total = meter
                .u64_counter("buoy_query_errors_total")
                .with_description("Adapter calls that returned an error")
                .build();

            let not_found_total = meter
                .u64_counter("buoy_entity_not_found_total")
                .with_description("Identifier lookups that found no row")
                .build();

            let query_duration = meter
                .f64_histogram("buoy_query_duration_seconds")
                .with_description("Duration of adapter calls")
                .build();

            Self {
                registry,
                queries_total,
                query_errors_total,
                not_found_total,
                query_duration,
                _provider: provider,
            }
        }

        pub fn record_query(&self, elapsed: Duration) {
            self.queries_total.add(1, &[]);
            self.query_duration.record(elapsed.as_secs_f64(), &[]);
        }

        pub fn record_query_error(&self) {
            self.query_errors_total.add(1, &[]);
        }

        pub fn record_not_found(&self) {
            self.not_found_total.add(1, &[]);
        }
    }
}

#[cfg(feature = "tracing")]
pub(crate) mod tracing_helpers {
    use crate::executor::RowId;
    use tracing::Span;

    pub(crate) fn run_query_span(table: &str, sql: &str) -> Span {
        tracing::info_span!("buoy.query", table = %table, sql = %sql)
    }

    pub(crate) fn find_by_id_span(table: &str, id: &RowId) -> Span {
        tracing::info_span!("buoy.find_by_id", table = %table, id = %id)
    }
}
