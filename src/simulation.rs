// 🎰 Monte Carlo Engine - Sample, transform, aggregate
// Repeats a scenario's sample->transform step N times and reports empirical
// confidence intervals instead of a single point estimate

use crate::finance::ScenarioOutcome;
use crate::report::{format_pct, format_usd};
use crate::stats::{percentile_sorted, probability, summarize, MetricSummary};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// SETTINGS
// ============================================================================

/// How a simulation is run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// Number of sample->transform iterations
    pub iterations: usize,

    /// Confidence level for interval reporting (default 0.95)
    pub confidence_level: f64,

    /// Seed for the pseudo-random generator; `None` seeds from entropy.
    /// A fixed seed makes repeated runs bit-identical.
    pub seed: Option<u64>,
}

impl SimulationSettings {
    pub fn new() -> Self {
        SimulationSettings {
            iterations: 10_000,
            confidence_level: 0.95,
            seed: Some(42),
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SCENARIO
// ============================================================================

/// One uncertain model: draws its inputs and produces one financial outcome
///
/// Implementations share their closed-form arithmetic with the calculator's
/// point-estimate path, so the simulated mean converges to the analytic
/// estimate as the iteration count grows.
pub trait Scenario {
    fn simulate(&self, rng: &mut StdRng) -> Result<ScenarioOutcome>;
}

// ============================================================================
// SIMULATION TABLE
// ============================================================================

/// The raw per-iteration outcome table, kept for exports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationTable {
    pub rows: Vec<ScenarioOutcome>,
}

impl SimulationTable {
    /// Export every iteration row
    pub fn export_raw_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

        writer
            .write_record(["iteration", "annual_benefit", "roi_pct", "npv", "payback_months"])
            .context("Failed to write CSV header")?;

        for (i, row) in self.rows.iter().enumerate() {
            writer
                .write_record([
                    i.to_string(),
                    row.annual_benefit.to_string(),
                    row.roi_pct.to_string(),
                    row.npv.to_string(),
                    row.payback_months.map(|p| p.to_string()).unwrap_or_default(),
                ])
                .context("Failed to write CSV row")?;
        }

        writer.flush().context("Failed to flush CSV writer")?;
        Ok(())
    }

    /// Export one summary row per metric (mean/median/std/min/max/quartiles)
    pub fn export_summary_csv<P: AsRef<Path>>(&self, path: P, confidence_level: f64) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

        writer
            .write_record([
                "metric", "mean", "median", "std", "min", "max", "q25", "q75", "ci_lower",
                "ci_upper",
            ])
            .context("Failed to write CSV header")?;

        for (name, values) in self.metric_columns() {
            if values.is_empty() {
                continue;
            }
            let mut sorted = values.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let summary = match summarize(&values, confidence_level) {
                Some(summary) => summary,
                None => continue,
            };

            writer
                .write_record([
                    name.to_string(),
                    summary.mean.to_string(),
                    summary.median.to_string(),
                    summary.std_dev.to_string(),
                    sorted[0].to_string(),
                    sorted[sorted.len() - 1].to_string(),
                    percentile_sorted(&sorted, 25.0).to_string(),
                    percentile_sorted(&sorted, 75.0).to_string(),
                    summary.ci_lower.to_string(),
                    summary.ci_upper.to_string(),
                ])
                .context("Failed to write CSV row")?;
        }

        writer.flush().context("Failed to flush CSV writer")?;
        Ok(())
    }

    /// Export the percentile ladder (1/5/10/25/50/75/90/95/99) per metric
    pub fn export_percentiles_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

        let columns = self.metric_columns();
        let mut header = vec!["percentile".to_string()];
        header.extend(columns.iter().map(|(name, _)| name.to_string()));
        writer.write_record(&header).context("Failed to write CSV header")?;

        let sorted: Vec<Vec<f64>> = columns
            .iter()
            .map(|(_, values)| {
                let mut v = values.clone();
                v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                v
            })
            .collect();

        for pct in [1.0, 5.0, 10.0, 25.0, 50.0, 75.0, 90.0, 95.0, 99.0] {
            let mut record = vec![format!("{}th", pct as u32)];
            for column in &sorted {
                if column.is_empty() {
                    record.push(String::new());
                } else {
                    record.push(percentile_sorted(column, pct).to_string());
                }
            }
            writer.write_record(&record).context("Failed to write CSV row")?;
        }

        writer.flush().context("Failed to flush CSV writer")?;
        Ok(())
    }

    /// Write the raw/summary/percentile trio with a shared filename prefix,
    /// returning the three paths written
    pub fn export_bundle(&self, prefix: &str, confidence_level: f64) -> Result<[String; 3]> {
        let raw = format!("{}_raw_data.csv", prefix);
        let summary = format!("{}_summary_stats.csv", prefix);
        let percentiles = format!("{}_percentiles.csv", prefix);

        self.export_raw_csv(&raw)?;
        self.export_summary_csv(&summary, confidence_level)?;
        self.export_percentiles_csv(&percentiles)?;

        Ok([raw, summary, percentiles])
    }

    /// Finite values per metric, in export order. Payback keeps only rows
    /// that actually break even.
    fn metric_columns(&self) -> [(&'static str, Vec<f64>); 4] {
        [
            (
                "annual_benefit",
                self.rows
                    .iter()
                    .map(|r| r.annual_benefit)
                    .filter(|v| v.is_finite())
                    .collect(),
            ),
            (
                "roi_pct",
                self.rows.iter().map(|r| r.roi_pct).filter(|v| v.is_finite()).collect(),
            ),
            (
                "npv",
                self.rows.iter().map(|r| r.npv).filter(|v| v.is_finite()).collect(),
            ),
            (
                "payback_months",
                self.rows
                    .iter()
                    .filter_map(|r| r.payback_months)
                    .filter(|v| v.is_finite())
                    .collect(),
            ),
        ]
    }
}

// ============================================================================
// UNCERTAINTY REPORT
// ============================================================================

/// Summary statistics and derived probabilities for a finished simulation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UncertaintyReport {
    pub annual_benefit: MetricSummary,
    pub roi_pct: MetricSummary,
    pub npv: MetricSummary,

    /// Payback statistics over the iterations that break even; `None` when
    /// no iteration does
    pub payback_months: Option<MetricSummary>,

    /// P(ROI > 0), measured against the full iteration count
    pub positive_roi_probability: f64,

    /// P(NPV > 0), measured against the full iteration count
    pub positive_npv_probability: f64,

    /// Fraction of iterations with a finite payback
    pub break_even_probability: f64,

    /// Iterations excluded from the benefit/ROI/NPV summaries because a
    /// metric came out non-finite (dropped, never clamped)
    pub dropped_iterations: usize,

    pub iterations: usize,
    pub confidence_level: f64,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

impl UncertaintyReport {
    /// Multi-line text block for embedding in a calculator report
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let ci = format!("{:.0}%", self.confidence_level * 100.0);

        out.push_str(&format!(
            "Based on {} iterations at a {} confidence level:\n\n",
            crate::report::format_count(self.iterations as f64),
            ci
        ));
        out.push_str(&format!(
            "• Annual Benefit:\n  - Mean: {}\n  - {} CI: {} - {}\n",
            format_usd(self.annual_benefit.mean),
            ci,
            format_usd(self.annual_benefit.ci_lower),
            format_usd(self.annual_benefit.ci_upper),
        ));
        if let Some(factor) = self.annual_benefit.range_factor() {
            out.push_str(&format!("  - Range Factor: {:.1}x\n", factor));
        }
        out.push_str(&format!(
            "\n• Net Present Value:\n  - Mean: {}\n  - {} CI: {} - {}\n  - Probability of Positive NPV: {}\n",
            format_usd(self.npv.mean),
            ci,
            format_usd(self.npv.ci_lower),
            format_usd(self.npv.ci_upper),
            format_pct(self.positive_npv_probability),
        ));
        match &self.payback_months {
            Some(payback) => out.push_str(&format!(
                "\n• Payback Period:\n  - Median: {:.0} months\n  - {} CI: {:.0} - {:.0} months\n  - Break-even Probability: {}\n",
                payback.median,
                ci,
                payback.ci_lower,
                payback.ci_upper,
                format_pct(self.break_even_probability),
            )),
            None => out.push_str("\n• Payback Period: no iteration breaks even within the horizon\n"),
        }
        out.push_str(&format!(
            "\n• Return on Investment:\n  - Mean: {:.0}%\n  - {} CI: {:.0}% - {:.0}%\n  - Probability of Positive ROI: {}\n",
            self.roi_pct.mean,
            ci,
            self.roi_pct.ci_lower,
            self.roi_pct.ci_upper,
            format_pct(self.positive_roi_probability),
        ));
        if self.dropped_iterations > 0 {
            out.push_str(&format!(
                "\n({} iterations produced non-finite results and were excluded)\n",
                self.dropped_iterations
            ));
        }
        out
    }

    /// Export the report as pretty-printed JSON
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write JSON file: {}", path.display()))?;
        Ok(())
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Runs a scenario's sample->transform step repeatedly and aggregates the
/// outcomes into an [`UncertaintyReport`]
pub struct MonteCarloEngine {
    pub settings: SimulationSettings,
}

impl MonteCarloEngine {
    pub fn new(settings: SimulationSettings) -> Self {
        MonteCarloEngine { settings }
    }

    pub fn run<S: Scenario>(&self, scenario: &S) -> Result<(UncertaintyReport, SimulationTable)> {
        if self.settings.iterations == 0 {
            anyhow::bail!("iteration count must be at least 1");
        }
        if !(self.settings.confidence_level > 0.0 && self.settings.confidence_level < 1.0) {
            anyhow::bail!(
                "confidence level must lie in (0, 1), got {}",
                self.settings.confidence_level
            );
        }

        let mut rng = match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log::info!(
            "running {} Monte Carlo iterations (seed: {:?})",
            self.settings.iterations,
            self.settings.seed
        );

        let mut rows = Vec::with_capacity(self.settings.iterations);
        for _ in 0..self.settings.iterations {
            rows.push(scenario.simulate(&mut rng)?);
        }

        let report = self.aggregate(&rows)?;
        Ok((report, SimulationTable { rows }))
    }

    fn aggregate(&self, rows: &[ScenarioOutcome]) -> Result<UncertaintyReport> {
        let confidence = self.settings.confidence_level;
        let iterations = rows.len();

        let dropped = rows
            .iter()
            .filter(|r| {
                !(r.annual_benefit.is_finite() && r.roi_pct.is_finite() && r.npv.is_finite())
            })
            .count();
        if dropped > 0 {
            log::warn!(
                "{} of {} iterations produced non-finite results and were dropped",
                dropped,
                iterations
            );
        }

        let benefits: Vec<f64> =
            rows.iter().map(|r| r.annual_benefit).filter(|v| v.is_finite()).collect();
        let rois: Vec<f64> = rows.iter().map(|r| r.roi_pct).filter(|v| v.is_finite()).collect();
        let npvs: Vec<f64> = rows.iter().map(|r| r.npv).filter(|v| v.is_finite()).collect();
        let paybacks: Vec<f64> = rows
            .iter()
            .filter_map(|r| r.payback_months)
            .filter(|v| v.is_finite())
            .collect();

        let annual_benefit = summarize(&benefits, confidence)
            .context("every iteration produced a non-finite annual benefit")?;
        let roi_pct =
            summarize(&rois, confidence).context("every iteration produced a non-finite ROI")?;
        let npv =
            summarize(&npvs, confidence).context("every iteration produced a non-finite NPV")?;

        Ok(UncertaintyReport {
            annual_benefit,
            roi_pct,
            npv,
            payback_months: summarize(&paybacks, confidence),
            positive_roi_probability: probability(&rois, iterations, |v| v > 0.0),
            positive_npv_probability: probability(&npvs, iterations, |v| v > 0.0),
            break_even_probability: paybacks.len() as f64 / iterations as f64,
            dropped_iterations: dropped,
            iterations,
            confidence_level: confidence,
            generated_at: chrono::Utc::now(),
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::UncertainInput;

    /// A toy scenario: benefit ~ Normal(1000, 100), fixed 500 investment
    struct ToyScenario {
        benefit: UncertainInput,
    }

    impl ToyScenario {
        fn new() -> Self {
            ToyScenario {
                benefit: UncertainInput::normal(1000.0, 100.0),
            }
        }
    }

    impl Scenario for ToyScenario {
        fn simulate(&self, rng: &mut StdRng) -> Result<ScenarioOutcome> {
            let benefit = self.benefit.sample(rng)?;
            let investment = 500.0;
            Ok(ScenarioOutcome {
                annual_benefit: benefit,
                roi_pct: crate::finance::roi_percentage(benefit, investment),
                npv: benefit - investment,
                payback_months: if benefit > 0.0 {
                    Some(investment / (benefit / 12.0))
                } else {
                    None
                },
            })
        }
    }

    #[test]
    fn test_same_seed_bit_identical() {
        let engine = MonteCarloEngine::new(SimulationSettings::new().with_iterations(500));
        let scenario = ToyScenario::new();

        let (a, _) = engine.run(&scenario).unwrap();
        let (b, _) = engine.run(&scenario).unwrap();

        assert_eq!(a.annual_benefit.mean.to_bits(), b.annual_benefit.mean.to_bits());
        assert_eq!(a.npv.ci_upper.to_bits(), b.npv.ci_upper.to_bits());
        assert_eq!(a.roi_pct.std_dev.to_bits(), b.roi_pct.std_dev.to_bits());
        println!("✅ Seed determinism test passed");
    }

    #[test]
    fn test_ci_brackets_median_for_every_metric() {
        let engine = MonteCarloEngine::new(SimulationSettings::new().with_iterations(2_000));
        let (report, _) = engine.run(&ToyScenario::new()).unwrap();

        for summary in [report.annual_benefit, report.roi_pct, report.npv] {
            assert!(summary.ci_lower <= summary.median);
            assert!(summary.median <= summary.ci_upper);
        }
        let payback = report.payback_months.unwrap();
        assert!(payback.ci_lower <= payback.median && payback.median <= payback.ci_upper);
    }

    #[test]
    fn test_mean_tracks_analytic_expectation() {
        let engine = MonteCarloEngine::new(SimulationSettings::new());
        let (report, _) = engine.run(&ToyScenario::new()).unwrap();

        // E[benefit] = 1000; Monte Carlo error at n=10,000 is a few units
        assert!((report.annual_benefit.mean - 1000.0).abs() / 1000.0 < 0.05);
        assert!(report.positive_npv_probability > 0.99);
    }

    #[test]
    fn test_single_iteration_works() {
        let engine = MonteCarloEngine::new(SimulationSettings::new().with_iterations(1));
        let (report, table) = engine.run(&ToyScenario::new()).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(report.annual_benefit.ci_lower, report.annual_benefit.ci_upper);
    }

    #[test]
    fn test_zero_iterations_is_an_error() {
        let engine = MonteCarloEngine::new(SimulationSettings::new().with_iterations(0));
        assert!(engine.run(&ToyScenario::new()).is_err());
    }

    /// A scenario whose ROI is occasionally NaN, to exercise the drop policy
    struct SometimesNan {
        counter: std::cell::Cell<usize>,
    }

    impl Scenario for SometimesNan {
        fn simulate(&self, _rng: &mut StdRng) -> Result<ScenarioOutcome> {
            let i = self.counter.get();
            self.counter.set(i + 1);
            let roi = if i % 10 == 0 { f64::NAN } else { 25.0 };
            Ok(ScenarioOutcome {
                annual_benefit: 100.0,
                roi_pct: roi,
                npv: 50.0,
                payback_months: Some(6.0),
            })
        }
    }

    #[test]
    fn test_non_finite_rows_dropped_not_fatal() {
        let engine = MonteCarloEngine::new(SimulationSettings::new().with_iterations(100));
        let scenario = SometimesNan {
            counter: std::cell::Cell::new(0),
        };
        let (report, _) = engine.run(&scenario).unwrap();

        assert_eq!(report.dropped_iterations, 10);
        assert_eq!(report.roi_pct.mean, 25.0);
        // Probabilities keep the full denominator
        assert_eq!(report.positive_roi_probability, 0.9);
        println!("✅ Non-finite drop policy test passed");
    }

    #[test]
    fn test_csv_bundle_export() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("toy").to_string_lossy().into_owned();

        let engine = MonteCarloEngine::new(SimulationSettings::new().with_iterations(200));
        let (report, table) = engine.run(&ToyScenario::new()).unwrap();

        let paths = table.export_bundle(&prefix, report.confidence_level).unwrap();
        for path in &paths {
            let content = std::fs::read_to_string(path).unwrap();
            assert!(content.lines().count() > 1, "{} is empty", path);
        }

        // Raw file has one line per iteration plus the header
        let raw = std::fs::read_to_string(&paths[0]).unwrap();
        assert_eq!(raw.lines().count(), 201);
    }

    #[test]
    fn test_json_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let engine = MonteCarloEngine::new(SimulationSettings::new().with_iterations(100));
        let (report, _) = engine.run(&ToyScenario::new()).unwrap();
        report.export_json(&path).unwrap();

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["iterations"], 100);
        assert!(parsed["annual_benefit"]["mean"].is_f64());
    }
}
