//! Metrics collection and reporting for simulation runs.
//!
//! Tracks per-request routing records, aggregates them into a run report
//! with SLA and energy totals, and renders the console tables.

use serde::{Deserialize, Serialize};
use slacksim_balancer::BackendSnapshot;

/// Per-request routing record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub request_id: u64,
    /// Name of the backend chosen for this request.
    pub backend: String,
    /// Pool index of the chosen backend.
    pub backend_index: usize,
    /// Observed response time for the request.
    pub response_time_ms: u64,
    /// Whether the response time met the SLA.
    pub sla_adhered: bool,
    /// Rated energy of the chosen backend at selection time.
    pub rated_energy: f64,
}

/// Percentile values for a distribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Percentiles {
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Percentiles {
    /// Compute percentiles from a slice of values.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self {
                p50: 0.0,
                p90: 0.0,
                p99: 0.0,
                min: 0.0,
                max: 0.0,
                mean: 0.0,
            };
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;

        Self {
            p50: percentile_sorted(&sorted, 50.0),
            p90: percentile_sorted(&sorted, 90.0),
            p99: percentile_sorted(&sorted, 99.0),
            min: sorted[0],
            max: sorted[n - 1],
            mean,
        }
    }
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (p / 100.0 * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Aggregated results for an entire simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Run label from the configuration.
    pub name: String,
    /// Seed the workload was driven with.
    pub seed: u64,

    // SLA accounting
    pub total_requests: u64,
    pub sla_adhered: u64,
    pub sla_violated: u64,
    pub adherence_rate: f64,

    // Energy and timing
    /// Sum of the chosen backend's rated energy across all requests.
    pub total_rated_energy: f64,
    /// Total wall time the pool spent inside optimization cycles.
    pub optimization_time_ms: u64,
    /// Wall-clock duration of the run. Host-dependent, excluded from
    /// determinism comparisons.
    pub duration_ms: u64,
    pub requests_per_sec: f64,

    // Distribution and per-backend summary
    pub response_time: Percentiles,
    /// Requests routed to each backend, by pool index.
    pub per_backend_requests: Vec<u64>,
    /// Final backend snapshots, in pool order.
    pub backends: Vec<BackendSnapshot>,
}

/// Collector that accumulates per-request records during a run.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    records: Vec<RequestRecord>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Record a routed request.
    pub fn record(&mut self, record: RequestRecord) {
        self.records.push(record);
    }

    /// All records so far, in request order.
    pub fn records(&self) -> &[RequestRecord] {
        &self.records
    }

    /// Aggregate the collected records into a run report.
    ///
    /// `snapshots` are the pool's final backend states; optimization time
    /// and per-backend routing counts are derived against them.
    pub fn aggregate(
        &self,
        name: &str,
        seed: u64,
        duration_ms: u64,
        snapshots: Vec<BackendSnapshot>,
    ) -> RunReport {
        let total = self.records.len() as u64;
        let adhered = self.records.iter().filter(|r| r.sla_adhered).count() as u64;
        let violated = total - adhered;

        let rt_values: Vec<f64> = self
            .records
            .iter()
            .map(|r| r.response_time_ms as f64)
            .collect();
        let total_rated_energy: f64 = self.records.iter().map(|r| r.rated_energy).sum();
        let optimization_time_ms: u64 = snapshots.iter().map(|s| s.time_consumed_ms).sum();

        let mut per_backend_requests = vec![0u64; snapshots.len()];
        for record in &self.records {
            if let Some(count) = per_backend_requests.get_mut(record.backend_index) {
                *count += 1;
            }
        }

        let duration_sec = duration_ms as f64 / 1000.0;

        RunReport {
            name: name.to_string(),
            seed,
            total_requests: total,
            sla_adhered: adhered,
            sla_violated: violated,
            adherence_rate: if total > 0 {
                adhered as f64 / total as f64
            } else {
                0.0
            },
            total_rated_energy,
            optimization_time_ms,
            duration_ms,
            requests_per_sec: if duration_sec > 0.0 {
                total as f64 / duration_sec
            } else {
                0.0
            },
            response_time: Percentiles::from_values(&rt_values),
            per_backend_requests,
            backends: snapshots,
        }
    }
}

/// Format a run report as a pretty-printed table string.
pub fn format_table(report: &RunReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{:=<72}\n",
        format!("  {} Results  ", report.name)
    ));
    out.push_str(&format!(
        "  Seed: {} | Requests: {} ({} adhered, {} violated, {:.1}% SLA)\n",
        report.seed,
        report.total_requests,
        report.sla_adhered,
        report.sla_violated,
        report.adherence_rate * 100.0,
    ));
    out.push_str(&format!("{:-<72}\n", "  Performance Metrics  "));
    out.push_str(&format!(
        "  Total rated energy:  {:>10.1} units\n",
        report.total_rated_energy
    ));
    out.push_str(&format!(
        "  Optimization time:   {:>10} ms\n",
        report.optimization_time_ms
    ));
    out.push_str(&format!(
        "  Response time (ms)   P50={:>7.1}  P90={:>7.1}  P99={:>7.1}  mean={:>7.1}\n",
        report.response_time.p50,
        report.response_time.p90,
        report.response_time.p99,
        report.response_time.mean,
    ));
    out.push_str(&format!(
        "  Wall clock: {:.1}s  Throughput: {:.1} req/s\n",
        report.duration_ms as f64 / 1000.0,
        report.requests_per_sec,
    ));
    out.push_str(&format!("{:-<72}\n", "  Backends  "));
    out.push_str(&format!(
        "  {:<14} {:>7} {:>7} {:>7} {:>10} {:>10} {:>9}\n",
        "Name", "Weight", "Load", "Slack", "Fitness", "Energy", "Requests"
    ));
    for (i, snap) in report.backends.iter().enumerate() {
        let routed = report.per_backend_requests.get(i).copied().unwrap_or(0);
        out.push_str(&format!(
            "  {:<14} {:>7} {:>7} {:>7} {:>10.4} {:>10.1} {:>9}\n",
            snap.name,
            snap.weight,
            snap.current_load,
            snap.slack_time,
            snap.fitness,
            snap.energy_estimate,
            routed,
        ));
    }
    out.push_str(&format!("{:=<72}\n", ""));
    out
}

/// Format a comparison table across seeds of the same configuration.
pub fn format_seed_comparison(reports: &[RunReport]) -> String {
    if reports.is_empty() {
        return String::from("No results to compare.\n");
    }

    let mut out = String::new();
    out.push_str(&format!("\n{:=<72}\n", "  Seed Comparison  "));
    out.push_str(&format!(
        "{:<10} {:>10} {:>12} {:>10} {:>10} {:>10}\n",
        "Seed", "SLA %", "Energy", "RT p50", "RT p99", "Req/s"
    ));
    out.push_str(&format!("{:-<72}\n", ""));

    for r in reports {
        out.push_str(&format!(
            "{:<10} {:>9.1}% {:>12.1} {:>10.1} {:>10.1} {:>10.1}\n",
            r.seed,
            r.adherence_rate * 100.0,
            r.total_rated_energy,
            r.response_time.p50,
            r.response_time.p99,
            r.requests_per_sec,
        ));
    }
    out.push_str(&format!("{:=<72}\n", ""));
    out
}
