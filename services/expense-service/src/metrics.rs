use lazy_static::lazy_static;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // Business metrics - expense lifecycle
    pub static ref EXPENSES_RECORDED: IntCounterVec = IntCounterVec::new(
        Opts::new("expenses_recorded_total", "Total expenses recorded"),
        &["split_type"]
    ).expect("metric can be created");

    pub static ref EXPENSES_UPDATED: IntCounterVec = IntCounterVec::new(
        Opts::new("expenses_updated_total", "Total expense updates"),
        &["shares_recomputed"]
    ).expect("metric can be created");

    pub static ref EXPENSES_DELETED: IntCounter = IntCounter::new(
        "expenses_deleted_total",
        "Total expenses deleted"
    ).expect("metric can be created");

    pub static ref VALIDATION_REJECTIONS: IntCounter = IntCounter::new(
        "expense_validation_rejections_total",
        "Total expense requests rejected by validation"
    ).expect("metric can be created");

    // Settlement metrics
    pub static ref SETTLEMENT_RUNS: IntCounterVec = IntCounterVec::new(
        Opts::new("settlement_runs_total", "Total balance and settlement computations"),
        &["kind"]
    ).expect("metric can be created");

    pub static ref SETTLEMENT_PLAN_SIZE: Histogram = Histogram::with_opts(
        HistogramOpts::new("settlement_plan_transactions", "Transactions per settlement plan")
            .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0])
    ).expect("metric can be created");
}

/// Register all metrics with the service registry
pub fn register_metrics() -> Result<(), prometheus::Error> {
    REGISTRY.register(Box::new(EXPENSES_RECORDED.clone()))?;
    REGISTRY.register(Box::new(EXPENSES_UPDATED.clone()))?;
    REGISTRY.register(Box::new(EXPENSES_DELETED.clone()))?;
    REGISTRY.register(Box::new(VALIDATION_REJECTIONS.clone()))?;
    REGISTRY.register(Box::new(SETTLEMENT_RUNS.clone()))?;
    REGISTRY.register(Box::new(SETTLEMENT_PLAN_SIZE.clone()))?;
    Ok(())
}

/// Generate metrics output in Prometheus text format
pub fn render() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = vec![];
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_render() {
        // Already registered by another test in this process is fine
        let _ = register_metrics();
        EXPENSES_DELETED.inc();

        let output = render().unwrap();
        assert!(output.contains("expenses_deleted_total"));
    }
}
