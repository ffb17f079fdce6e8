use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use canonical::BrandReport;
use generator::GeneratorError;

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_generate(&self, latency: Duration, result: Result<(), GeneratorError>);
    fn record_canonical(&self, latency: Duration, report: &BrandReport);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

pub(crate) struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    pub(crate) fn record_generate(self, result: Result<(), GeneratorError>) {
        self.recorder.record_generate(self.start.elapsed(), result);
    }

    pub(crate) fn record_canonical(self, report: &BrandReport) {
        self.recorder.record_canonical(self.start.elapsed(), report);
    }
}
